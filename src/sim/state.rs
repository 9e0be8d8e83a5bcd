//! Game state and core simulation types

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended on collision; irreversible until a full reset
    GameOver,
}

/// The player's otter
///
/// Only `x` ever moves, driven by steering input. `y` sits on the water
/// surface and `z` anchors the near end of the lane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Otter {
    pub pos: Vec3,
}

impl Default for Otter {
    fn default() -> Self {
        Self {
            pos: Vec3::new(0.0, SURFACE_Y, 0.0),
        }
    }
}

/// A drifting obstacle
///
/// Spawns far upstream and advances toward the camera by `OBSTACLE_SPEED`
/// every tick until it collides with the otter or passes `DESPAWN_Z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec3,
}

/// A single water droplet in a splash group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Droplet {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Remaining life in [0, 1]; doubles as render opacity
    pub life: f32,
}

/// A splash particle group, emitted when the otter steers
///
/// Visual only: splashes never participate in collision or scoring. An
/// explicit type rather than a flag on a generic scene node so the renderer
/// can match on what it is drawing.
#[derive(Debug, Clone, PartialEq)]
pub struct Splash {
    pub droplets: Vec<Droplet>,
}

impl Splash {
    /// Advance droplets one tick: integrate velocity, pull down, decay life
    pub fn update(&mut self) {
        for d in &mut self.droplets {
            d.pos += d.vel;
            d.vel.y -= SPLASH_GRAVITY;
            d.life -= SPLASH_DECAY;
        }
        self.droplets.retain(|d| d.life > 0.0);
    }

    pub fn is_dead(&self) -> bool {
        self.droplets.is_empty()
    }
}

/// Simulation events produced by a tick, consumed by the presentation layer
///
/// State progression never depends on anyone observing these; a host with no
/// HUD can drop them on the floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A new obstacle entered the lane
    ObstacleSpawned { id: u32 },
    /// An obstacle drifted past the otter; score already updated
    ObstaclePassed { id: u32, score: u32 },
    /// The otter hit an obstacle
    Collision { id: u32 },
    /// The run ended this tick (emitted once, on the transition)
    GameOver { final_score: u32 },
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Obstacles dodged so far
    pub score: u32,
    /// Player otter
    pub otter: Otter,
    /// Active obstacles, in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Active splash groups (visual only)
    pub splashes: Vec<Splash>,
    /// Per-tick spawn probability
    pub spawn_chance: f32,
    /// Optional cap on concurrent obstacles; `None` preserves the source's
    /// unbounded behavior
    pub max_obstacles: Option<usize>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a fresh session with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: 0,
            otter: Otter::default(),
            obstacles: Vec::new(),
            splashes: Vec::new(),
            spawn_chance: SPAWN_CHANCE,
            max_obstacles: None,
            next_id: 1,
        }
    }

    /// Reinitialize everything for a new session
    ///
    /// Equivalent to replacing the state with `GameState::new(seed)`; tunables
    /// are reset too.
    pub fn reset(&mut self, seed: u64) {
        *self = Self::new(seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform draw in [0, 1) for the spawn roll
    pub(crate) fn spawn_roll(&mut self) -> f32 {
        self.rng.random()
    }

    /// Spawn an obstacle at a random lane position far upstream
    pub fn spawn_obstacle(&mut self) -> u32 {
        let x = self.rng.random_range(-LANE_HALF_WIDTH..LANE_HALF_WIDTH);
        self.spawn_obstacle_at(x, SPAWN_Z)
    }

    /// Spawn an obstacle at an explicit position (deterministic setup)
    pub fn spawn_obstacle_at(&mut self, x: f32, z: f32) -> u32 {
        let id = self.next_entity_id();
        self.obstacles.push(Obstacle {
            id,
            pos: Vec3::new(x, SURFACE_Y, z),
        });
        id
    }

    /// Emit a splash group at the otter's position
    pub fn spawn_splash(&mut self) {
        let origin = self.otter.pos;
        let mut droplets = Vec::with_capacity(SPLASH_DROPLETS);
        for _ in 0..SPLASH_DROPLETS {
            let dx = self.rng.random_range(-0.25..0.25);
            let dz = self.rng.random_range(-0.25..0.25);
            let vel = Vec3::new(
                self.rng.random_range(-0.1..0.1),
                self.rng.random_range(0.0..0.3),
                self.rng.random_range(-0.1..0.1),
            );
            droplets.push(Droplet {
                pos: Vec3::new(origin.x + dx, 0.1, origin.z + dz),
                vel,
                life: 1.0,
            });
        }
        self.splashes.push(Splash { droplets });
    }
}
