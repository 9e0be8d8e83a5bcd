//! Otter River - a river-runner arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (obstacle lifecycle, collision, scoring)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser input mapping
//! - `settings`: Visual preferences persisted to LocalStorage

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

/// Game configuration constants
pub mod consts {
    /// Probability of spawning an obstacle on any given tick
    pub const SPAWN_CHANCE: f32 = 0.02;

    /// Half-width of the drivable lane; obstacle x is drawn from
    /// [-LANE_HALF_WIDTH, LANE_HALF_WIDTH)
    pub const LANE_HALF_WIDTH: f32 = 4.0;
    /// Full steering range of the otter; normalized input [-1, 1] maps to
    /// [-LATERAL_RANGE, LATERAL_RANGE]
    pub const LATERAL_RANGE: f32 = 5.0;

    /// Depth at which obstacles spawn (far upstream)
    pub const SPAWN_Z: f32 = -100.0;
    /// Depth past which an obstacle is behind the camera and counts as dodged
    pub const DESPAWN_Z: f32 = 10.0;
    /// Per-tick obstacle drift toward the camera
    pub const OBSTACLE_SPEED: f32 = 0.2;

    /// Collision when otter-obstacle distance is strictly below this
    pub const COLLISION_RADIUS: f32 = 1.0;

    /// Height of the otter and obstacles above the water plane
    pub const SURFACE_Y: f32 = 0.5;

    /// Droplets per splash group
    pub const SPLASH_DROPLETS: usize = 20;
    /// Downward acceleration applied to splash droplets each tick
    pub const SPLASH_GRAVITY: f32 = 0.01;
    /// Splash droplet life decay per tick (droplets start at 1.0)
    pub const SPLASH_DECAY: f32 = 1.0 / 60.0;

    /// Camera placement for the render bridge
    pub const CAMERA_Y: f32 = 5.0;
    pub const CAMERA_Z: f32 = 10.0;
}
