//! Otter River entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use otter_river::Settings;
    use otter_river::platform::normalized_lane_x;
    use otter_river::renderer::{RenderState, build_scene};
    use otter_river::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        input: TickInput,
        settings: Settings,
        /// Whether the frame loop is currently scheduled
        running: bool,
        /// Last score pushed to the DOM, to avoid redundant writes
        last_score: Option<u32>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            Self {
                state: GameState::new(seed),
                render_state: None,
                input: TickInput::default(),
                settings,
                running: false,
                last_score: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick with the latest input
        fn update(&mut self, time: f64) -> Vec<GameEvent> {
            let events = tick(&mut self.state, &self.input);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            events
        }

        /// Render the current frame
        fn render(&mut self) {
            let droplets = self.settings.effective_splash_droplets();
            let vertices = build_scene(&self.state, droplets);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in the DOM
        ///
        /// Every lookup is guarded: a page without the HUD markup still plays.
        fn update_hud(&mut self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if self.last_score != Some(self.state.score) {
                if let Some(el) = document.get_element_by_id("score") {
                    el.set_text_content(Some(&format!("Score: {}", self.state.score)));
                }
                self.last_score = Some(self.state.score);
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }

        /// Show the game-over overlay with the final score
        fn show_game_over(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "");
            }
            if let Some(el) = document.get_element_by_id("final-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
        }

        fn hide_game_over(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("game-over") {
                let _ = el.set_attribute("class", "hidden");
            }
        }

        /// Full session reset; the otter, obstacles, score, and RNG all start
        /// over (the source reloaded the whole page here)
        fn restart(&mut self, seed: u64) {
            self.state.reset(seed);
            self.input = TickInput::default();
            self.last_score = None;
            self.hide_game_over();
            log::info!("Game restarted with seed: {}", seed);
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Otter River starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        game.borrow_mut().render_state = Some(render_state);

        // Set up input handlers
        setup_input_handlers(&canvas, game.clone());

        // Start game loop
        game.borrow_mut().running = true;
        request_animation_frame(game);

        log::info!("Otter River running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Mouse move - steer across the viewport width
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let w = canvas_clone.client_width() as f32;
                g.input.steer = Some(normalized_lane_x(event.offset_x() as f32, w));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    let w = canvas_clone.client_width() as f32;
                    g.input.steer = Some(normalized_lane_x(x, w));
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click / tap restarts a finished run. Harmless while playing: the
        // handler only fires a restart once the loop has stopped.
        for event_name in ["mousedown", "touchstart"] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let should_restart = {
                    let g = game.borrow();
                    !g.running && g.state.phase == GamePhase::GameOver
                };
                if should_restart {
                    let seed = js_sys::Date::now() as u64;
                    {
                        let mut g = game.borrow_mut();
                        g.restart(seed);
                        g.running = true;
                    }
                    request_animation_frame(game.clone());
                }
            });
            let _ =
                canvas.add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let game_over = {
            let mut g = game.borrow_mut();

            let events = g.update(time);
            g.render();
            g.update_hud();

            for event in &events {
                if let GameEvent::GameOver { final_score } = event {
                    log::info!("Game over! Final score: {}", final_score);
                    g.show_game_over();
                }
            }

            let done = g.state.phase == GamePhase::GameOver;
            if done {
                // Freeze the loop; the restart tap re-schedules it
                g.running = false;
            }
            done
        };

        if !game_over {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Otter River (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_demo_session();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Deterministic headless session: dodge left and right until the run ends
#[cfg(not(target_arch = "wasm32"))]
fn run_demo_session() {
    use otter_river::sim::{GamePhase, GameState, TickInput, tick};

    let seed = 20240817;
    let mut state = GameState::new(seed);
    log::info!("Demo session with seed {}", seed);

    let mut ticks = 0u64;
    while state.phase == GamePhase::Playing && ticks < 100_000 {
        // Weave across the lane
        let steer = ((ticks as f32) * 0.002).sin();
        tick(&mut state, &TickInput { steer: Some(steer) });
        ticks += 1;
    }

    println!(
        "Session over after {} ticks: score {}, {} obstacles still in the lane",
        ticks,
        state.score,
        state.obstacles.len()
    );
}
