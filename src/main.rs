//! Banana Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use banana_catch::renderer::{DrawCommand, RenderState};
    use banana_catch::sim::{Outcome, SessionEvent};
    use banana_catch::{GameConfig, Runner, Viewport};

    /// First-frame delta when there is no previous timestamp
    const FIRST_FRAME_DT: f32 = 1.0 / 60.0;
    /// Delay before the result dialog so the final frame gets painted
    const RESULT_DELAY_MS: i32 = 100;

    /// Game instance holding all state
    struct Game {
        runner: Runner,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        last_time: f64,
        /// An animation frame callback is queued
        frame_pending: bool,
        /// Browser id of the one-second countdown interval
        countdown_interval: Option<i32>,
    }

    impl Game {
        fn new(runner: Runner, canvas: HtmlCanvasElement) -> Self {
            Self {
                runner,
                render_state: None,
                canvas,
                last_time: 0.0,
                frame_pending: false,
                countdown_interval: None,
            }
        }

        /// Canvas size in CSS pixels
        fn viewport(&self) -> Viewport {
            Viewport::new(
                self.canvas.client_width() as f32,
                self.canvas.client_height() as f32,
            )
        }

        /// Match the backing store to the CSS size at the current pixel ratio
        fn resize(&mut self) {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let viewport = self.viewport();
            let width = (viewport.width as f64 * dpr) as u32;
            let height = (viewport.height as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height, dpr as f32);
            }
            self.runner.resize(viewport);
        }

        /// Paint a draw list
        fn render(&mut self, commands: &[DrawCommand]) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(commands) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        let scale = render_state.scale;
                        render_state.resize(w, h, scale);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Run one animation frame
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FIRST_FRAME_DT
            };
            self.last_time = time;

            self.runner.resize(self.viewport());
            if let Some(commands) = self.runner.frame(dt) {
                self.render(&commands);
            }
            self.process_events();
        }

        /// Apply session events to the page
        fn process_events(&mut self) {
            for event in self.runner.drain_events() {
                match event {
                    SessionEvent::Started => {}
                    SessionEvent::ScoreChanged(score) => set_text("gameScore", score),
                    SessionEvent::TimeChanged(seconds) => set_text("gameTime", seconds),
                    SessionEvent::Ended(outcome) => {
                        self.stop_countdown();
                        show_result(outcome);
                    }
                    SessionEvent::Cleared => {
                        self.stop_countdown();
                        let viewport = self.viewport();
                        self.render(&banana_catch::renderer::cleared(
                            viewport.width,
                            viewport.height,
                        ));
                    }
                }
            }
        }

        fn stop_countdown(&mut self) {
            if let Some(id) = self.countdown_interval.take() {
                if let Some(window) = web_sys::window() {
                    window.clear_interval_with_handle(id);
                }
                log::debug!("Countdown interval {} cleared", id);
            }
        }
    }

    fn set_text(id: &str, value: u32) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(&value.to_string()));
        }
    }

    fn show_result(outcome: Outcome) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let message = outcome.message();
        let closure = Closure::once(move || {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            RESULT_DELAY_MS,
        );
        closure.forget();
    }

    pub async fn run() -> Result<(), String> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| e.to_string())?;

        log::info!("Banana Catch starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Only the play page carries the canvas
        let Some(canvas) = document.get_element_by_id("gameCanvas") else {
            log::info!("No game canvas on this page");
            return Ok(());
        };
        let canvas: HtmlCanvasElement = canvas
            .dyn_into()
            .map_err(|_| "gameCanvas is not a canvas")?;

        let config = canvas
            .get_attribute("data-config")
            .map(|json| GameConfig::from_json_or_default(&json))
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        let viewport = Viewport::new(canvas.client_width() as f32, canvas.client_height() as f32);
        let runner = Runner::new(config, viewport, seed);
        let game = Rc::new(RefCell::new(Game::new(runner, canvas.clone())));
        game.borrow_mut().resize();

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let (width, height) = (canvas.width(), canvas.height());
        let scale = window.device_pixel_ratio() as f32;
        let render_state = RenderState::new(surface, &adapter, width, height, scale)
            .await
            .map_err(|e| format!("Failed to set up renderer: {e}"))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_buttons(game.clone());
        setup_resize(game.clone());

        // Blank field until the first round starts
        {
            let mut g = game.borrow_mut();
            let viewport = g.viewport();
            g.render(&banana_catch::renderer::cleared(viewport.width, viewport.height));
        }

        log::info!("Banana Catch ready");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().runner.input.key_down(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().runner.input.key_up(&event.key());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch zones: left half / right half of the canvas
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut()
                        .runner
                        .input
                        .touch_start(x, rect.width() as f32);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                game.borrow_mut().runner.input.touch_end();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        if let Some(btn) = document.get_element_by_id("startGame") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                start_round(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("resetGame") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.runner.reset();
                g.process_events();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize();
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn start_round(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if !g.runner.start() {
                return;
            }
            g.process_events();
            g.last_time = 0.0;
        }
        start_countdown(game.clone());

        let pending = std::mem::replace(&mut game.borrow_mut().frame_pending, true);
        if !pending {
            request_animation_frame(game);
        }
    }

    fn start_countdown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let period_ms = (game.borrow().runner.session.countdown().period() * 1000.0) as i32;

        let game_clone = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = game_clone.borrow_mut();
            g.runner.session.countdown_tick();
            g.process_events();
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms,
        ) {
            Ok(id) => game.borrow_mut().countdown_interval = Some(id),
            Err(e) => log::error!("Failed to start countdown: {:?}", e),
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.frame(time);
            let keep_going = g.runner.wants_frame();
            g.frame_pending = keep_going;
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use banana_catch::{GameConfig, Runner, Viewport};
    use std::time::{SystemTime, UNIX_EPOCH};

    env_logger::init();
    log::info!("Banana Catch (native) starting...");
    log::info!("Native mode plays a headless autopilot round - run with `trunk serve` for the web version");

    // Optional tuning override: first argument is a JSON file
    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => GameConfig::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Cannot read {}: {}", path, e);
                GameConfig::default()
            }
        },
        None => GameConfig::default(),
    };

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);

    let limit = config.round_seconds as f64 + 5.0;
    let mut runner = Runner::new(config, Viewport::default(), seed);
    runner.autopilot = true;
    runner.start();

    match runner.run_until_end(1.0 / 60.0, limit) {
        Some(outcome) => println!("{}", outcome.message()),
        None => println!("Round did not finish"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
