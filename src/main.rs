//! Sky Shooter entry point
//!
//! Handles platform-specific initialization and drives the session loops.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_shooter::audio::AudioManager;
    use sky_shooter::input::Key;
    use sky_shooter::renderer::{RenderState, scene_vertices};
    use sky_shooter::{GameConfig, ScreenProfile, Session, Settings, TaskStatus, TaskToken, Tasks};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        audio: AudioManager,
        canvas: HtmlCanvasElement,
        document: Document,
        /// Pending animation frame request
        animation_id: Option<i32>,
        /// Running spawn interval and the callback it calls
        spawn_interval_id: Option<i32>,
        spawn_closure: Option<Closure<dyn FnMut()>>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        /// Record a frame timestamp and refresh the FPS estimate
        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let snapshot = self.session.snapshot();
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene_vertices(&snapshot);
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

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let document = &self.document;

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.session.score().to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.class_list().remove_1("hidden");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.class_list().add_1("hidden");
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.session.is_game_over() {
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.session.score().to_string()));
                    }
                    let _ = el.class_list().remove_1("hidden");
                } else {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }

        /// Cancel whichever loops are still scheduled
        fn cancel_loops(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(id) = self.animation_id.take() {
                let _ = window.cancel_animation_frame(id);
            }
            self.clear_spawn_interval();
        }

        /// Stop the interval; its closure stays alive until replaced
        fn clear_spawn_interval(&mut self) {
            if let (Some(window), Some(id)) = (web_sys::window(), self.spawn_interval_id.take()) {
                window.clear_interval_with_handle(id);
            }
        }

        /// Preference hotkey pressed: persist it and apply what can change live
        fn on_settings_hotkey(&mut self) {
            self.settings.save();
            self.audio.apply_settings(&self.settings);
            self.update_hud();
            if self.settings.roster != self.session.config().roster {
                log::info!(
                    "Roster {} selected, used from the next game",
                    self.settings.roster.as_str()
                );
            }
        }

        /// Session ended during the last frame
        fn on_game_over(&mut self) {
            self.cancel_loops();
            self.audio.stop_music();
            log::info!("Final score: {}", self.session.score());
        }

        /// Convert a touch's client Y into canvas pixels
        fn touch_to_canvas_y(&self, client_y: i32) -> f32 {
            let rect = self.canvas.get_bounding_client_rect();
            let css_height = rect.height() as f32;
            let canvas_height = self.session.config().height;
            let y = client_y as f32 - rect.top() as f32;
            if css_height > 0.0 {
                y * canvas_height / css_height
            } else {
                y
            }
        }
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Shooter starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Canvas size follows the device profile
        let profile = ScreenProfile::detect(&window.navigator().user_agent().unwrap_or_default());
        let inner_w = window.inner_width()?.as_f64().unwrap_or(0.0) as f32;
        let inner_h = window.inner_height()?.as_f64().unwrap_or(0.0) as f32;

        let settings = Settings::load();
        let config = GameConfig::for_profile(profile, inner_w, inner_h).with_roster(settings.roster);
        let canvas_size = (config.width, config.height);

        let dpr = window.device_pixel_ratio();
        let width = (config.width as f64 * dpr) as u32;
        let height = (config.height as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);
        canvas.set_attribute(
            "style",
            &format!("width:{}px;height:{}px", config.width, config.height),
        )?;

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(config, seed).map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Session ready ({:?}), seed: {}", profile, seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height, canvas_size)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let audio = AudioManager::new(&settings);
        let game = Rc::new(RefCell::new(Game {
            session,
            settings,
            render_state: Some(render_state),
            audio,
            canvas: canvas.clone(),
            document: document.clone(),
            animation_id: None,
            spawn_interval_id: None,
            spawn_closure: None,
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_restart_button(&document, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.class_list().remove_1("hidden");
        }

        let tasks = game.borrow_mut().session.start(now_ms());
        start_loops(&game, tasks)?;

        log::info!("Sky Shooter running!");
        Ok(())
    }

    /// Schedule both loops for a freshly started generation
    fn start_loops(game: &Rc<RefCell<Game>>, tasks: Tasks) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let period = game.borrow().session.config().spawn_interval_ms;

        let spawn_game = game.clone();
        let spawn_token = tasks.spawn;
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = spawn_game.borrow_mut();
            if g.session.on_spawn(spawn_token) == TaskStatus::Stop {
                g.clear_spawn_interval();
            }
        });
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period as i32,
        )?;

        {
            let mut g = game.borrow_mut();
            g.spawn_interval_id = Some(id);
            // Replacing drops the previous generation's callback, already cleared
            g.spawn_closure = Some(closure);
        }

        request_animation_frame(game.clone(), tasks.frame);
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, token: TaskToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let loop_game = game.clone();
        let closure = Closure::once(move |time: f64| {
            game_loop(loop_game, token, time);
        });
        if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            game.borrow_mut().animation_id = Some(id);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, token: TaskToken, time: f64) {
        let status = {
            let mut g = game.borrow_mut();
            g.animation_id = None;

            let report = g.session.on_frame(token, time);
            g.audio.play_events(&report.events);
            g.track_fps(time);
            g.render();
            g.update_hud();

            if report.events.game_over {
                g.on_game_over();
            }
            report.status
        };

        if status == TaskStatus::Continue {
            request_animation_frame(game, token);
        }
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let code = event.key();
                if let Some(key) = Key::from_code(&code) {
                    g.session.input_mut().key_down(key);
                } else if !event.repeat() && g.settings.apply_hotkey(&code) {
                    g.on_settings_hotkey();
                }
                g.audio.start_music();
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.key()) {
                    game.borrow_mut().session.input_mut().key_up(key);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch start
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let y = g.touch_to_canvas_y(touch.client_y());
                    g.session.input_mut().touch_start(y);
                }
                g.audio.start_music();
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let y = g.touch_to_canvas_y(touch.client_y());
                    g.session.input_mut().touch_move(y);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch end
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.input_mut().touch_end();
            });
            canvas.add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-button") else {
            log::warn!("No restart button in page");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let seed = js_sys::Date::now() as u64;
            let tasks = {
                let mut g = game.borrow_mut();
                g.cancel_loops();
                g.audio.reset_music();
                let roster = g.settings.roster;
                g.session.set_roster(roster);
                let tasks = g.session.restart(seed, now_ms());
                g.update_hud();
                tasks
            };
            if let Err(e) = start_loops(&game, tasks) {
                log::error!("Failed to restart loops: {:?}", e);
            }
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Sky Shooter failed to start: {:?}", e);
    }
}

/// Frames simulated by the native demo (one minute at 60 Hz)
#[cfg(not(target_arch = "wasm32"))]
const DEMO_FRAMES: u32 = 3600;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), sky_shooter::ConfigError> {
    use sky_shooter::consts::FRAME_MS;
    use sky_shooter::input::Key;
    use sky_shooter::{GameConfig, Session, Settings, TaskStatus};

    env_logger::init();
    log::info!("Sky Shooter (native) starting headless demo...");

    let settings = Settings::load();
    let config = GameConfig::default().with_roster(settings.roster);
    let mut session = Session::new(config, 42)?;
    let tasks = session.start(0.0);

    let mut kills = 0u32;
    let mut frames = 0u32;
    for frame in 1..=DEMO_FRAMES {
        let now = frame as f64 * FRAME_MS;
        session.advance_spawn_clock(tasks.spawn, FRAME_MS);

        // Sweep the ship up and down every two seconds
        let input = session.input_mut();
        input.reset();
        input.key_down(if (frame / 120) % 2 == 0 { Key::Up } else { Key::Down });

        let report = session.on_frame(tasks.frame, now);
        kills += report.events.enemies_destroyed;
        frames = frame;
        if report.status == TaskStatus::Stop {
            break;
        }
    }

    log::info!(
        "Demo finished after {} frames: score {}, {} enemies destroyed, game over: {}",
        frames,
        session.score(),
        kills,
        session.is_game_over()
    );
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
