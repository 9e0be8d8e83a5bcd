//! Per-frame simulation tick
//!
//! The host calls `tick` once per display frame. Each tick applies the latest
//! steering input, rolls the obstacle spawn, advances every obstacle (with
//! collision and despawn checks), and ages splash particles. Once the phase is
//! `GameOver` the whole tick is a no-op until the host resets the session.

use super::collision::collides;
use super::state::{GameEvent, GamePhase, GameState};
use crate::consts::*;

/// Input for a single tick (last value wins; no queueing)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal steering position, normalized to [-1, 1]. Out-of-range
    /// values are clamped, not rejected. `None` leaves the otter where it is.
    pub steer: Option<f32>,
}

/// Advance the game state by one tick, returning what happened
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<GameEvent> {
    if state.phase == GamePhase::GameOver {
        return Vec::new();
    }

    let mut events = Vec::new();
    state.time_ticks += 1;

    // Steering: clamp to the lane and splash when the otter actually moves
    if let Some(steer) = input.steer {
        let target = steer.clamp(-1.0, 1.0) * LATERAL_RANGE;
        if (target - state.otter.pos.x).abs() > f32::EPSILON {
            state.otter.pos.x = target;
            state.spawn_splash();
        }
    }

    // Spawn roll. The roll is consumed every tick so a cap does not perturb
    // the RNG stream for later ticks.
    let roll = state.spawn_roll();
    let below_cap = state
        .max_obstacles
        .is_none_or(|cap| state.obstacles.len() < cap);
    if roll < state.spawn_chance && below_cap {
        let id = state.spawn_obstacle();
        events.push(GameEvent::ObstacleSpawned { id });
    }

    // Advance obstacles from the end toward the start so in-place removal is
    // safe. A collision ends the run but does not break the loop: the rest of
    // the set still advances (and can still despawn) this tick.
    let mut i = state.obstacles.len();
    while i > 0 {
        i -= 1;
        state.obstacles[i].pos.z += OBSTACLE_SPEED;
        let obstacle = state.obstacles[i];

        if collides(state.otter.pos, obstacle.pos) {
            if state.phase == GamePhase::Playing {
                state.phase = GamePhase::GameOver;
            }
            events.push(GameEvent::Collision { id: obstacle.id });
        }

        if obstacle.pos.z > DESPAWN_Z {
            state.obstacles.remove(i);
            state.score += 1;
            events.push(GameEvent::ObstaclePassed {
                id: obstacle.id,
                score: state.score,
            });
        }
    }

    if state.phase == GamePhase::GameOver {
        events.push(GameEvent::GameOver {
            final_score: state.score,
        });
    }

    // Age splash groups, retire empty ones
    for splash in &mut state.splashes {
        splash.update();
    }
    state.splashes.retain(|s| !s.is_dead());

    events
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A state with random spawning disabled, for deterministic setups
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.spawn_chance = 0.0;
        state
    }

    fn steer(x: f32) -> TickInput {
        TickInput { steer: Some(x) }
    }

    #[test]
    fn test_obstacle_passes_and_scores() {
        let mut state = quiet_state();
        state.spawn_obstacle_at(0.0, SPAWN_Z);

        // Move the otter out of the obstacle's path first
        let events = tick(&mut state, &steer(1.0));
        assert!(events.is_empty());
        assert_eq!(state.otter.pos.x, LATERAL_RANGE);

        // z = -100 + n * 0.2 crosses the despawn line around tick 551 (a
        // tick or so of slack for accumulated float error)
        let mut last_events = Vec::new();
        while !state.obstacles.is_empty() && state.time_ticks < 600 {
            last_events = tick(&mut state, &TickInput::default());
        }
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
        assert!((549..=552).contains(&state.time_ticks));
        assert!(matches!(
            last_events[0],
            GameEvent::ObstaclePassed { score: 1, .. }
        ));
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_collision_ends_run_without_scoring() {
        let mut state = quiet_state();
        // Obstacle half a unit in front of the otter; one tick brings it to
        // z = 0.7, still inside the collision radius
        state.spawn_obstacle_at(0.0, 0.5);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.score, 0);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Collision { .. })));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::GameOver { final_score: 0 }))
        );
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut state = quiet_state();
        state.spawn_obstacle_at(0.0, 0.5);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        let ticks_before = state.time_ticks;
        let otter_before = state.otter.pos;
        let obstacles_before = state.obstacles.clone();

        // Steering and further ticks must not touch anything
        let events = tick(&mut state, &steer(0.5));
        assert!(events.is_empty());
        assert_eq!(state.time_ticks, ticks_before);
        assert_eq!(state.otter.pos, otter_before);
        assert_eq!(state.obstacles, obstacles_before);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_no_spawns_after_game_over() {
        let mut state = quiet_state();
        state.spawn_obstacle_at(0.0, 0.5);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);

        // Even a guaranteed spawn roll must not fire once the run is over
        state.spawn_chance = 1.0;
        let count = state.obstacles.len();
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.obstacles.len(), count);
    }

    #[test]
    fn test_two_despawns_in_one_tick() {
        let mut state = quiet_state();
        state.spawn_obstacle_at(-3.0, 9.9);
        state.spawn_obstacle_at(3.0, 9.9);

        let events = tick(&mut state, &TickInput::default());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 2);
        let passed = events
            .iter()
            .filter(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
            .count();
        assert_eq!(passed, 2);
    }

    #[test]
    fn test_collision_does_not_short_circuit_the_tick() {
        let mut state = quiet_state();
        // One obstacle about to hit the otter, one about to despawn
        state.spawn_obstacle_at(0.0, 0.3);
        state.spawn_obstacle_at(3.0, 9.9);

        let events = tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        // The despawning obstacle was still advanced and removed this tick
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::Collision { .. })));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::ObstaclePassed { .. }))
        );
    }

    #[test]
    fn test_steering_clamps_out_of_range_input() {
        let mut state = quiet_state();
        tick(&mut state, &steer(2.0));
        assert_eq!(state.otter.pos.x, LATERAL_RANGE);

        tick(&mut state, &steer(-3.0));
        assert_eq!(state.otter.pos.x, -LATERAL_RANGE);
    }

    #[test]
    fn test_obstacle_cap_limits_spawns() {
        let mut state = GameState::new(777);
        state.spawn_chance = 1.0;
        state.max_obstacles = Some(3);

        for _ in 0..10 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.obstacles.len(), 3);
    }

    #[test]
    fn test_spawned_x_stays_in_lane() {
        let mut state = GameState::new(42);
        state.spawn_chance = 1.0;
        for _ in 0..200 {
            tick(&mut state, &TickInput::default());
            if state.phase == GamePhase::GameOver {
                break;
            }
        }
        for obstacle in &state.obstacles {
            assert!(obstacle.pos.x >= -LANE_HALF_WIDTH);
            assert!(obstacle.pos.x < LANE_HALF_WIDTH);
            assert_eq!(obstacle.pos.y, SURFACE_Y);
        }
    }

    #[test]
    fn test_splash_emitted_on_steer_and_decays() {
        let mut state = quiet_state();
        tick(&mut state, &steer(0.5));
        assert_eq!(state.splashes.len(), 1);

        // Holding the same steering position emits no further splashes
        tick(&mut state, &steer(0.5));
        assert_eq!(state.splashes.len(), 1);

        // Droplets live 1.0 / SPLASH_DECAY ticks, then the group retires
        for _ in 0..61 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.splashes.is_empty());
    }

    #[test]
    fn test_determinism() {
        let inputs = [
            steer(0.2),
            TickInput::default(),
            steer(-0.8),
            TickInput::default(),
        ];

        let mut a = GameState::new(99999);
        let mut b = GameState::new(99999);
        for _ in 0..300 {
            for input in &inputs {
                tick(&mut a, input);
                tick(&mut b, input);
            }
        }

        assert_eq!(a.time_ticks, b.time_ticks);
        assert_eq!(a.score, b.score);
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.obstacles, b.obstacles);
        assert_eq!(a.otter.pos, b.otter.pos);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Score never decreases and the otter never leaves the lane,
            /// whatever the input stream does
            #[test]
            fn score_monotonic_and_otter_in_range(
                seed in any::<u64>(),
                steers in prop::collection::vec(
                    prop::option::of(-3.0f32..3.0), 1..400,
                ),
            ) {
                let mut state = GameState::new(seed);
                let mut last_score = 0;
                for s in steers {
                    tick(&mut state, &TickInput { steer: s });
                    prop_assert!(state.score >= last_score);
                    last_score = state.score;
                    prop_assert!(state.otter.pos.x >= -LATERAL_RANGE);
                    prop_assert!(state.otter.pos.x <= LATERAL_RANGE);
                }
            }

            /// A tick after game over is always a perfect no-op
            #[test]
            fn game_over_tick_is_noop(steer_x in -2.0f32..2.0) {
                let mut state = GameState::new(4242);
                state.spawn_chance = 0.0;
                state.spawn_obstacle_at(0.0, 0.5);
                tick(&mut state, &TickInput::default());
                prop_assert_eq!(state.phase, GamePhase::GameOver);

                let ticks = state.time_ticks;
                let score = state.score;
                let events = tick(&mut state, &TickInput { steer: Some(steer_x) });
                prop_assert!(events.is_empty());
                prop_assert_eq!(state.time_ticks, ticks);
                prop_assert_eq!(state.score, score);
            }
        }
    }
}
