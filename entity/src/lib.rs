//! SeaORM entities for the player database.

pub mod prelude;

pub mod player;
