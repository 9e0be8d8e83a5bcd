//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per host frame callback
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::collides;
pub use state::{Droplet, GameEvent, GamePhase, GameState, Obstacle, Otter, Splash};
pub use tick::{TickInput, tick};
