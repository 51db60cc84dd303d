//! Service layer for business logic and orchestration.
//!
//! Services sit between the controller (API) layer and the data (repository) layer. They
//! implement the player rules, coordinate repository calls with the external Steam,
//! geolocation and Discord collaborators, and work with domain models rather than DTOs or
//! entity models.
//!
//! External collaborators are reached through the `GeoLocator`, `ProfileProvider` and
//! `PlayerNotifier` traits so tests can swap them for in-process doubles.

pub mod auth;
pub mod enrichment;
pub mod geolocation;
pub mod notification;
pub mod player;
pub mod steam;

#[cfg(test)]
pub(crate) mod test;
