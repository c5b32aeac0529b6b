//! Neon Pong entry point
//!
//! On the web this wires the canvas, DOM events and the animation loop to
//! `App`. Natively it runs a headless AI-vs-AI match and logs the rallies.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use neon_pong::audio::AudioManager;
    use neon_pong::consts::SIM_DT;
    use neon_pong::renderer::{RenderState, scene};
    use neon_pong::{App, Key, Settings};

    /// Everything the animation loop needs
    struct Host {
        app: App,
        render_state: Option<RenderState>,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        last_time: f64,
    }

    impl Host {
        /// CSS pixel offset on the canvas to world coordinates
        fn to_world(&self, css_x: f32, css_y: f32) -> glam::Vec2 {
            let dpr = web_sys::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0) as f32;
            match &self.render_state {
                Some(rs) => rs.viewport.screen_to_world(css_x * dpr, css_y * dpr),
                None => glam::Vec2::ZERO,
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;

            self.app.update(dt);

            self.audio.set_muted(self.app.is_muted());
            for sound in self.app.drain_sounds() {
                self.audio.play(sound);
            }

            self.render((time / 1000.0) as f32);
        }

        fn render(&mut self, time: f32) {
            let vertices = scene::build(&self.app, time);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.reconfigure();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let dpr = window.device_pixel_ratio();
            let width = (self.canvas.client_width() as f64 * dpr) as u32;
            let height = (self.canvas.client_height() as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(rs) = self.render_state.as_mut() {
                rs.resize(width, height);
            }
        }
    }

    fn js_err(e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Neon Pong starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let audio = AudioManager::new(&settings);
        let app = App::new(settings, seed);
        log::info!("App initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(js_err)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_err)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height).await.map_err(js_err)?;

        let host = Rc::new(RefCell::new(Host {
            app,
            render_state: Some(render_state),
            audio,
            canvas: canvas.clone(),
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, host.clone())?;
        setup_auto_pause(host.clone())?;

        // Start game loop
        request_animation_frame(host);

        log::info!("Neon Pong running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = Key::from_dom(&event.key());
                if key == Key::Other {
                    return;
                }
                // Keep arrows and space from scrolling the page
                event.prevent_default();
                if event.repeat() {
                    return;
                }
                let mut h = host.borrow_mut();
                h.audio.resume();
                h.app.key_down(key);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                host.borrow_mut().app.key_up(Key::from_dom(&event.key()));
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host.borrow_mut();
                let world = h.to_world(event.offset_x() as f32, event.offset_y() as f32);
                h.app.pointer_move(world);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut h = host.borrow_mut();
                h.audio.resume();
                let world = h.to_world(event.offset_x() as f32, event.offset_y() as f32);
                h.app.pointer_move(world);
                h.app.pointer_down(world);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch: move steers, start also clicks
        for (name, press) in [("touchmove", false), ("touchstart", true)] {
            let host = host.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.touches().get(0) else {
                    return;
                };
                let rect = canvas_clone.get_bounding_client_rect();
                let x = touch.client_x() as f32 - rect.left() as f32;
                let y = touch.client_y() as f32 - rect.top() as f32;

                let mut h = host.borrow_mut();
                let world = h.to_world(x, y);
                h.app.pointer_move(world);
                if press {
                    h.audio.resume();
                    h.app.pointer_down(world);
                }
            });
            canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                host.borrow_mut().resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_auto_pause(host: Rc<RefCell<Host>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    host.borrow_mut().app.auto_pause();
                }
            });
            document.add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                host.borrow_mut().app.auto_pause();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        host.borrow_mut().frame(time);
        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::PathBuf;

    use clap::Parser;

    use neon_pong::consts::SIM_DT;
    use neon_pong::sim::{Difficulty, Game, GameConfig, GameEvent, Mode, Side, TickInput, tick};
    use neon_pong::{QualityPreset, Settings, SettingsError};

    /// Run a headless AI-vs-AI match of Neon Pong
    #[derive(Parser, Debug)]
    #[command(name = "neon-pong", version, about)]
    pub struct Args {
        /// Match seed (same seed, same match)
        #[arg(long, default_value_t = 1)]
        pub seed: u64,

        /// AI difficulty for both sides (easy, normal, hard)
        #[arg(long, value_parser = parse_difficulty)]
        pub difficulty: Option<Difficulty>,

        /// Points needed to win
        #[arg(long)]
        pub win_score: Option<u32>,

        /// Settings JSON file
        #[arg(long)]
        pub config: Option<PathBuf>,

        /// Effects quality (low, medium, high); caps simulated particles
        #[arg(long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,

        /// Give up after this many simulated seconds
        #[arg(long, default_value_t = 600.0)]
        pub max_seconds: f32,
    }

    fn parse_difficulty(s: &str) -> Result<Difficulty, String> {
        Difficulty::from_str(s).ok_or_else(|| format!("unknown difficulty '{s}'"))
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::from_str(s).ok_or_else(|| format!("unknown quality '{s}'"))
    }

    pub fn run(args: Args) -> Result<(), SettingsError> {
        let mut settings = match &args.config {
            Some(path) => Settings::load_from_path(path)?,
            None => Settings::default(),
        };
        if let Some(quality) = args.quality {
            settings.apply_preset(quality);
        }

        let config = GameConfig {
            mode: Mode::Demo,
            difficulty: args.difficulty.unwrap_or(settings.difficulty),
            win_score: args.win_score.unwrap_or(settings.win_score).max(1),
        };

        let mut game = Game::new(config, args.seed);
        game.particle_cap = settings.max_particles();
        let input = TickInput::default();
        let mut rally_hits = 0u32;

        while !game.is_over() && game.elapsed < args.max_seconds {
            tick(&mut game, &input, SIM_DT);
            for event in game.drain_events() {
                match event {
                    GameEvent::PaddleHit { .. } => rally_hits += 1,
                    GameEvent::PointScored { side, points } => {
                        log::info!(
                            "[{:7.2}s] {} +{} after {} returns",
                            game.elapsed,
                            side.as_str(),
                            points,
                            rally_hits
                        );
                        rally_hits = 0;
                    }
                    GameEvent::RallyStart | GameEvent::GameOver { .. } => {}
                    other => log::debug!("[{:7.2}s] {:?}", game.elapsed, other),
                }
            }
        }

        let (left, right) = (game.score(Side::Left), game.score(Side::Right));
        if game.is_over() {
            println!(
                "Final: Left {left} - Right {right} ({:.1}s simulated, seed {})",
                game.elapsed, game.seed
            );
        } else {
            log::warn!("Stopped after {:.0}s without a winner", args.max_seconds);
            println!("Unfinished: Left {left} - Right {right} (seed {})", game.seed);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), neon_pong::SettingsError> {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Pong (native) starting...");

    headless::run(headless::Args::parse())
}
