//! Floaty Squirrel entry point
//!
//! The web build drives the game from `requestAnimationFrame`; the native
//! build plays autopilot rounds headlessly and keeps the high score on disk.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlInputElement, KeyboardEvent, MouseEvent, TouchEvent};

    use floaty_squirrel::audio::{AudioManager, Muteable};
    use floaty_squirrel::consts::*;
    use floaty_squirrel::persistence::LocalStorage;
    use floaty_squirrel::renderer::{RenderState, build_frame_vertices};
    use floaty_squirrel::session::Frame;
    use floaty_squirrel::sim::{GameInput, GamePhase, GameState, autopilot_input};
    use floaty_squirrel::{Session, SettingsStore};

    type WebSession = Session<SettingsStore<LocalStorage>, Muteable<AudioManager>>;

    /// Game instance holding all state
    struct Game {
        session: WebSession,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        /// Autopilot flies while set
        demo: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = SettingsStore::load(LocalStorage);
            let audio = Muteable::new(AudioManager::new(), store.sound_enabled());
            Self {
                session: Session::new(GameState::new(seed), store, audio),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                demo: false,
            }
        }

        /// Player input; also unlocks Web Audio, which needs a user gesture
        fn press(&mut self, input: GameInput) {
            self.session.audio().inner().resume();
            self.session.queue_input(input);
        }

        /// Demo rounds are flown by the autopilot and never reach the high score
        fn set_demo(&mut self, demo: bool) {
            self.demo = demo;
            self.session.set_record_scores(!demo);
            // Neither side inherits a round the other started
            self.session.queue_input(GameInput::Cancel);
            log::info!("Demo mode: {}", demo);
        }

        fn set_window_resizable(&mut self, resizable: bool) {
            self.session.high_scores_mut().set_window_resizable(resizable);
            log::info!("Window resizing {}", if resizable { "on" } else { "off" });
        }

        fn set_sound_enabled(&mut self, enabled: bool) {
            self.session.high_scores_mut().set_sound_enabled(enabled);
            self.session.audio_mut().set_enabled(enabled);
            log::info!("Sound {}", if enabled { "on" } else { "off" });
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if self.demo
                    && let Some(input) = autopilot_input(self.session.state())
                {
                    self.session.queue_input(input);
                }
                self.session.tick();
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Render the current frame
        fn render(&mut self, frame: &Frame) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let vertices = build_frame_vertices(frame);
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

        /// Update HUD elements in DOM
        fn update_hud(&self, frame: &Frame) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&frame.score.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&frame.high_score.to_string()));
            }

            let idle = frame.phase == GamePhase::Idle;
            set_visible(&document, "start-prompt", idle);
            set_visible(&document, "demo-badge", self.demo);

            if let Some(el) = document.get_element_by_id("last-score") {
                match frame.last_score {
                    Some(score) if idle => {
                        el.set_text_content(Some(&format!("Score: {}", score)));
                        let _ = el.set_attribute("class", "");
                    }
                    _ => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn js_err(context: &str, e: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&format!("{}: {}", context, e))
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(|e| js_err("logger", e))?;

        log::info!("Floaty Squirrel starting...");

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
            .map_err(|_| "element #canvas is not a canvas")?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| js_err("surface", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| js_err("adapter", e))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            width,
            height,
            (SCREEN_WIDTH, SCREEN_HEIGHT),
        )
        .await
        .map_err(|e| js_err("device", e))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_sound_toggle(&document, game.clone());
        setup_resize_toggle(&document, &canvas, game.clone());
        setup_resize(canvas, game.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        request_animation_frame(game);

        log::info!("Floaty Squirrel running!");
        Ok(())
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        if let Some(window) = web_sys::window() {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " => {
                        // Keep the page from scrolling
                        event.prevent_default();
                        g.press(GameInput::Impulse);
                    }
                    "Escape" => g.press(GameInput::Cancel),
                    "d" | "D" => {
                        let demo = !g.demo;
                        g.set_demo(demo);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().press(GameInput::Impulse);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().press(GameInput::Impulse);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_sound_toggle(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        let Some(toggle) = document
            .get_element_by_id("sound-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        toggle.set_checked(game.borrow().session.audio().is_enabled());

        let toggle_clone = toggle.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().set_sound_enabled(toggle_clone.checked());
        });
        let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize_toggle(
        document: &web_sys::Document,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) {
        let Some(toggle) = document
            .get_element_by_id("resize-toggle")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
        else {
            return;
        };
        toggle.set_checked(game.borrow().session.high_scores().window_resizable());

        let toggle_clone = toggle.clone();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let resizable = toggle_clone.checked();
            game.borrow_mut().set_window_resizable(resizable);
            if resizable {
                fit_canvas(&canvas, &game);
            }
        });
        let _ = toggle.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Match the canvas backing store to its on-page size
    fn fit_canvas(canvas: &HtmlCanvasElement, game: &Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let (width, height) = canvas_pixel_size(&window, canvas);
        canvas.set_width(width);
        canvas.set_height(height);
        if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
            render_state.resize(width, height);
        }
    }

    /// Follows window resizes while the resizable setting is on
    fn setup_resize(canvas: HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let resizable = game.borrow().session.high_scores().window_resizable();
            if resizable {
                fit_canvas(&canvas, &game);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
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
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            let frame = g.session.snapshot();
            g.render(&frame);
            g.update_hud(&frame);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs;
    use std::path::PathBuf;
    use std::process::ExitCode;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use clap::Parser;

    use floaty_squirrel::audio::{Muteable, ScoreFeedback, Silent};
    use floaty_squirrel::consts::TICK_MS;
    use floaty_squirrel::persistence::{FileStorage, MemoryStorage, Storage};
    use floaty_squirrel::sim::{GameEvent, GameInput, GameState, autopilot_input};
    use floaty_squirrel::{HighScoreStore, Session, SettingsStore, Tuning};

    #[derive(Parser, Debug)]
    #[command(name = "floaty-squirrel")]
    #[command(about = "Headless Floaty Squirrel: autopilot rounds with a persistent high score")]
    struct Cli {
        /// Number of rounds to play
        #[arg(long, default_value_t = 3)]
        rounds: u32,
        /// RNG seed (defaults to the current time)
        #[arg(long)]
        seed: Option<u64>,
        /// JSON file overriding game tuning values
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Disable the score chime for this run
        #[arg(long)]
        mute: bool,
        /// Directory for settings and high score (defaults to the per-user data dir)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// Abandon a round after this many ticks
        #[arg(long, default_value_t = 20_000)]
        max_ticks: u64,
        /// Pace ticks at the game's frame rate instead of running flat out
        #[arg(long)]
        realtime: bool,
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let cli = Cli::parse();

        let tuning = match load_tuning(&cli) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::error!("{}", e);
                return ExitCode::FAILURE;
            }
        };

        let store = SettingsStore::load(open_storage(&cli));
        let sound = store.sound_enabled() && !cli.mute;
        let audio = Muteable::new(open_audio(sound), sound);

        let seed = cli.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis() as u64)
                .unwrap_or_default()
        });
        log::info!("Floaty Squirrel (native) starting with seed {}", seed);

        let mut session = Session::new(GameState::with_tuning(seed, tuning), store, audio);
        for round in 1..=cli.rounds {
            let score = play_round(&mut session, &cli);
            match score {
                Some(score) => println!("Round {}: score {}", round, score),
                None => println!("Round {}: stopped after {} ticks", round, cli.max_ticks),
            }
        }
        println!("High score: {}", session.high_scores().get());

        ExitCode::SUCCESS
    }

    fn load_tuning(cli: &Cli) -> Result<Tuning, String> {
        let Some(path) = &cli.tuning else {
            return Ok(Tuning::default());
        };
        let json = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read tuning file {}: {}", path.display(), e))?;
        Tuning::from_json(&json).map_err(|e| format!("Invalid tuning file {}: {}", path.display(), e))
    }

    fn open_storage(cli: &Cli) -> Box<dyn Storage> {
        let opened = match &cli.data_dir {
            Some(dir) => FileStorage::new(dir),
            None => FileStorage::default_location(),
        };
        match opened {
            Ok(storage) => {
                log::info!("Data directory: {}", storage.dir().display());
                Box::new(storage)
            }
            Err(e) => {
                log::warn!("No data directory ({}) - high score will not persist", e);
                Box::new(MemoryStorage::new())
            }
        }
    }

    #[cfg(feature = "native-audio")]
    fn open_audio(enabled: bool) -> Box<dyn ScoreFeedback> {
        use floaty_squirrel::audio::RodioChime;

        if enabled && let Some(chime) = RodioChime::try_new() {
            return Box::new(chime);
        }
        Box::new(Silent)
    }

    #[cfg(not(feature = "native-audio"))]
    fn open_audio(_enabled: bool) -> Box<dyn ScoreFeedback> {
        Box::new(Silent)
    }

    /// Fly one autopilot round; `None` when it hit the tick limit
    fn play_round<H, A>(session: &mut Session<H, A>, cli: &Cli) -> Option<u32>
    where
        H: HighScoreStore,
        A: ScoreFeedback,
    {
        for _ in 0..cli.max_ticks {
            if let Some(input) = autopilot_input(session.state()) {
                session.queue_input(input);
            }
            let crashed = session.tick().iter().find_map(|event| match event {
                GameEvent::Crashed { score, .. } => Some(*score),
                _ => None,
            });
            if crashed.is_some() {
                return crashed;
            }
            if cli.realtime {
                std::thread::sleep(Duration::from_millis(TICK_MS as u64));
            }
        }

        session.queue_input(GameInput::Cancel);
        session.tick();
        None
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}
