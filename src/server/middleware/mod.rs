//! Request guards, session wrappers and the enrichment middleware.

pub mod auth;
pub mod enrichment;
pub mod session;

#[cfg(test)]
mod test;
