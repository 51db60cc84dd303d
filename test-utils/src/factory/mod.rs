//! Factory methods for creating test data.
//!
//! Each entity has a `Factory` struct for customization and a `create_*` convenience
//! function for quick default creation.
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let player = factory::create_player(&db).await?;
//!
//! let player = factory::player::PlayerFactory::new(&db)
//!     .player_id("76561198000000000")
//!     .name("Alice")
//!     .country_code(Some("US"))
//!     .build()
//!     .await?;
//! ```

pub mod helpers;
pub mod player;

pub use player::{create_player, create_player_with_id};
