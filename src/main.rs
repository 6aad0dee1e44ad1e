//! Silla Vibe entry point
//!
//! Wires the game core to the DOM and runs the frame loop in the browser.
//! Natively, plays a few scripted runs headlessly and logs them.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, MouseEvent};

    use silla_vibe::Settings;
    use silla_vibe::audio::AudioManager;
    use silla_vibe::game::{GameController, Renderer, TickInput};
    use silla_vibe::platform::storage::LocalStorageScores;

    /// Longest frame step fed to the game; playback pauses while the tab is hidden
    const MAX_FRAME_MS: f64 = 100.0;
    /// Tile width in the grid template (px)
    const TILE_PX: u32 = 80;

    type Controller = GameController<DomRenderer, AudioManager, LocalStorageScores>;

    /// Renderer over the page's static elements and the tile grid
    struct DomRenderer {
        document: Document,
        input: Rc<RefCell<TickInput>>,
        tiles: Vec<Element>,
        // Dropped (and unregistered) when the grid is rebuilt
        tile_listeners: Vec<Closure<dyn FnMut(MouseEvent)>>,
    }

    impl DomRenderer {
        fn new(document: Document, input: Rc<RefCell<TickInput>>) -> Self {
            Self {
                document,
                input,
                tiles: Vec::new(),
                tile_listeners: Vec::new(),
            }
        }

        fn element(&self, id: &str) -> Option<Element> {
            let el = self.document.get_element_by_id(id);
            if el.is_none() {
                log::warn!("Missing element #{}", id);
            }
            el
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn create_tile(&self, index: usize) -> Option<(Element, Closure<dyn FnMut(MouseEvent)>)> {
            let tile = self.document.create_element("div").ok()?;
            tile.class_list().add_1("tile").ok()?;
            tile.set_attribute("data-index", &index.to_string()).ok()?;

            let input = self.input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                input.borrow_mut().clicks.push(index);
            });
            tile.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .ok()?;
            Some((tile, closure))
        }
    }

    impl Renderer for DomRenderer {
        fn build_grid(&mut self, grid_size: u32) {
            let Some(grid) = self.element("tile-grid") else {
                return;
            };
            grid.set_inner_html("");
            self.tiles.clear();
            self.tile_listeners.clear();

            if let Some(grid) = grid.dyn_ref::<HtmlElement>() {
                let columns = format!("repeat({}, {}px)", grid_size, TILE_PX);
                let _ = grid.style().set_property("grid-template-columns", &columns);
            }

            let count = grid_size as usize * grid_size as usize;
            for index in 0..count {
                let Some((tile, closure)) = self.create_tile(index) else {
                    log::error!("Failed to create tile {}", index);
                    continue;
                };
                let _ = grid.append_child(&tile);
                self.tiles.push(tile);
                self.tile_listeners.push(closure);
            }
        }

        fn set_highlight(&mut self, tile: usize, on: bool) {
            if let Some(el) = self.tiles.get(tile) {
                let classes = el.class_list();
                let _ = if on {
                    classes.add_1("active")
                } else {
                    classes.remove_1("active")
                };
            }
        }

        fn show_level(&mut self, stage: u32, level_in_stage: u32) {
            self.set_text("stage-display", &stage.to_string());
            self.set_text("level-display", &level_in_stage.to_string());
        }

        fn show_message(&mut self, message: &str) {
            self.set_text("message", message);
        }

        fn set_start_enabled(&mut self, enabled: bool) {
            if let Some(btn) = self
                .element("startButton")
                .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok())
            {
                btn.set_disabled(!enabled);
            }
        }

        fn set_start_label(&mut self, label: &str) {
            self.set_text("startButton", label);
        }

        fn set_next_level_visible(&mut self, visible: bool) {
            if let Some(btn) = self
                .element("nextLevelButton")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let display = if visible { "inline-block" } else { "none" };
                let _ = btn.style().set_property("display", display);
            }
        }

        fn show_scores(&mut self, labels: &[String]) {
            let Some(list) = self.element("score-list") else {
                return;
            };
            list.set_inner_html("");
            for label in labels {
                if let Ok(li) = self.document.create_element("li") {
                    li.set_text_content(Some(label));
                    let _ = list.append_child(&li);
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        controller: Controller,
        settings: Settings,
        input: Rc<RefCell<TickInput>>,
        last_time: f64,
        // Sub-millisecond remainder carried between frames
        carry_ms: f64,
    }

    impl Game {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time).clamp(0.0, MAX_FRAME_MS)
            } else {
                0.0
            };
            self.last_time = time;

            self.carry_ms += dt;
            let step = self.carry_ms.floor();
            self.carry_ms -= step;

            let input = std::mem::take(&mut *self.input.borrow_mut());
            if input.start {
                // Browsers only allow audio after a user gesture
                self.controller.audio_mut().resume();
            }
            self.controller.tick(&input, step as u32);
        }

        /// Flip mute, persist it and apply it to the tone player
        fn toggle_mute(&mut self) -> &'static str {
            let muted = self.settings.toggle_muted();
            self.settings.save();
            self.controller.audio_mut().apply_settings(&self.settings);
            log::info!("Audio {}", if muted { "muted" } else { "unmuted" });
            self.settings.mute_label()
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Silla Vibe starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let input = Rc::new(RefCell::new(TickInput::default()));
        let renderer = DomRenderer::new(document.clone(), input.clone());
        let audio = AudioManager::new(&settings);

        let seed = js_sys::Date::now() as u64;
        let controller = GameController::new(
            renderer,
            audio,
            LocalStorageScores,
            seed,
            settings.timing(),
        );

        setup_buttons(&document, input.clone());
        if let Some(btn) = document.get_element_by_id("muteButton") {
            btn.set_text_content(Some(settings.mute_label()));
        }

        let game = Rc::new(RefCell::new(Game {
            controller,
            settings,
            input,
            last_time: 0.0,
            carry_ms: 0.0,
        }));
        setup_mute_button(&document, game.clone());
        request_animation_frame(game);

        log::info!("Silla Vibe running!");
    }

    fn setup_buttons(document: &Document, input: Rc<RefCell<TickInput>>) {
        if let Some(btn) = document.get_element_by_id("startButton") {
            let input = input.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                input.borrow_mut().start = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("nextLevelButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                input.borrow_mut().next_level = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_mute_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.get_element_by_id("muteButton") else {
            return;
        };
        let btn_clone = btn.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            let label = game.borrow_mut().toggle_mute();
            btn_clone.set_text_content(Some(label));
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
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
        game.borrow_mut().update(time);
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Silla Vibe (native) starting...");
    log::info!("Native mode plays scripted runs - run with `trunk serve` for the web version");

    demo::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::time::{SystemTime, UNIX_EPOCH};

    use silla_vibe::Settings;
    use silla_vibe::game::{
        GameController, GamePhase, MemoryRepository, RecordingAudio, RecordingRenderer,
    };

    /// Levels the scripted player fails on, one run each
    const FAIL_LEVELS: [u32; 3] = [4, 13, 11];

    pub fn run() {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let settings = Settings::load();
        let mut game = GameController::new(
            RecordingRenderer::new(),
            RecordingAudio::default(),
            MemoryRepository::new(),
            seed,
            settings.timing(),
        );

        for fail_at in FAIL_LEVELS {
            game.start();
            while game.phase() != GamePhase::GameOver {
                game.run_pending();
                match game.phase() {
                    GamePhase::AwaitingInput => {
                        let sequence = game.state().sequence.clone();
                        if game.level() == fail_at {
                            let tiles = game.state().tile_count();
                            game.click((sequence[0] + 1) % tiles);
                        } else {
                            for tile in sequence {
                                game.click(tile);
                            }
                        }
                    }
                    GamePhase::LevelSuccess => game.next_level(),
                    GamePhase::GameOver => {}
                    phase => {
                        log::error!("Scripted player stuck in {:?}", phase);
                        return;
                    }
                }
            }
        }

        log::info!(
            "Played {} runs, {} tones",
            FAIL_LEVELS.len(),
            game.audio().tones.len()
        );
        for (rank, label) in game.renderer().scores.iter().enumerate() {
            println!("{:>2}. {}", rank + 1, label);
        }
    }
}
