//! Bucket Toss entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlElement, MouseEvent, TouchEvent};

    use bucket_toss::Settings;
    use bucket_toss::consts::*;
    use bucket_toss::sim::{
        self, FruitKind, FruitState, GamePhase, GameState, Rect, aim_line,
    };

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        /// Countdown interval handle, cleared when the round ends
        timer_id: Option<i32>,
        /// DOM nodes reused across bursts
        particle_pool: Vec<Element>,
        /// Outcome overlay already shown for this round
        outcome_shown: bool,
    }

    impl Game {
        fn new(settings: Settings, viewport: Vec2, bucket: Rect) -> Self {
            let seed = js_sys::Date::now() as u64;
            Self {
                state: GameState::new(seed, settings.round_seconds, viewport, bucket),
                settings,
                timer_id: None,
                particle_pool: Vec::new(),
                outcome_shown: false,
            }
        }

        /// Re-read viewport and bucket geometry from the DOM (handles resizes)
        fn refresh_layout(&mut self) {
            let window = web_sys::window().expect("no window");
            let document = window.document().expect("no document");
            self.state
                .set_layout(viewport_size(&window), bucket_rect(&document));
        }

        /// Push the current state into the DOM
        fn render(&mut self) {
            let window = web_sys::window().expect("no window");
            let document = window.document().expect("no document");

            // Fruit positions and state classes
            for fruit in &self.state.fruits {
                let id = format!("fruit-{}", fruit.kind.as_str());
                let Some(el) = document.get_element_by_id(&id) else {
                    continue;
                };

                let class = match fruit.state {
                    FruitState::Resting => "fruit",
                    FruitState::Dragging => "fruit dragging",
                    FruitState::InFlight => "fruit thrown",
                    FruitState::Bucketed { .. } => "fruit in-bucket",
                    FruitState::Vanished => "fruit hidden",
                };
                let _ = el.set_attribute("class", class);

                if let Some(style) = el.dyn_ref::<HtmlElement>().map(|h| h.style()) {
                    let _ = style.set_property("left", &format!("{}px", fruit.pos.x));
                    let _ = style.set_property("top", &format!("{}px", fruit.pos.y));
                }
            }

            self.render_aim_line(&document);
            self.render_particles(&document);
            self.update_hud(&document);
        }

        /// Aim line geometry, derived fresh from the gesture each frame
        fn render_aim_line(&self, document: &Document) {
            let Some(el) = document.get_element_by_id("aim-line") else {
                return;
            };

            let line = self
                .settings
                .aim_line
                .then(|| self.state.drag.as_ref().and_then(aim_line))
                .flatten();

            match line {
                Some(line) => {
                    let _ = el.set_attribute("class", "aim-line show");
                    if let Some(style) = el.dyn_ref::<HtmlElement>().map(|h| h.style()) {
                        let _ = style.set_property("left", &format!("{}px", line.origin.x));
                        let _ = style.set_property("top", &format!("{}px", line.origin.y));
                        let _ = style.set_property("width", &format!("{}px", line.length));
                        let _ = style.set_property("height", &format!("{}px", line.thickness));
                        let _ = style.set_property(
                            "transform",
                            &format!("rotate({}deg)", line.angle.to_degrees()),
                        );
                    }
                }
                None => {
                    let _ = el.set_attribute("class", "aim-line");
                }
            }
        }

        /// Burst particles, rendered through a small reusable node pool
        fn render_particles(&mut self, document: &Document) {
            let visible = if self.settings.effective_particles() {
                self.state.particles.len()
            } else {
                0
            };

            // Grow the pool on demand
            while self.particle_pool.len() < visible {
                let Ok(el) = document.create_element("div") else {
                    break;
                };
                let _ = el.set_attribute("class", "particle hidden");
                if let Some(body) = document.body() {
                    let _ = body.append_child(&el);
                }
                self.particle_pool.push(el);
            }

            for (i, el) in self.particle_pool.iter().enumerate() {
                match (i < visible).then(|| &self.state.particles[i]) {
                    Some(particle) => {
                        let _ = el.set_attribute("class", "particle show");
                        if let Some(style) = el.dyn_ref::<HtmlElement>().map(|h| h.style()) {
                            let _ =
                                style.set_property("left", &format!("{}px", particle.pos.x));
                            let _ = style.set_property("top", &format!("{}px", particle.pos.y));
                            let fade =
                                particle.ticks_left as f32 / BURST_LIFETIME_STEPS as f32;
                            let _ = style.set_property("opacity", &format!("{:.2}", fade));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "particle hidden");
                    }
                }
            }
        }

        /// Update HUD counters in the DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("time-left") {
                el.set_text_content(Some(&self.state.time_left.to_string()));
            }
            if let Some(el) = document.get_element_by_id("fruits-left") {
                el.set_text_content(Some(&self.state.fruits_remaining().to_string()));
            }
        }

        /// Show the terminal overlay and stop the countdown
        fn show_outcome(&mut self, won: bool) {
            let window = web_sys::window().expect("no window");
            let document = window.document().expect("no document");

            if let Some(id) = self.timer_id.take() {
                window.clear_interval_with_handle(id);
            }

            if let Some(title) = document.get_element_by_id("game-over-title") {
                let (text, color) = if won {
                    ("Congratulations!", "#27ae60")
                } else {
                    ("Time's Up!", "#e74c3c")
                };
                title.set_text_content(Some(text));
                if let Some(style) = title.dyn_ref::<HtmlElement>().map(|h| h.style()) {
                    let _ = style.set_property("color", color);
                }
            }

            if let Some(message) = document.get_element_by_id("game-over-message") {
                let text = if won {
                    "You got all the fruit in the bucket!".to_string()
                } else {
                    format!(
                        "You got {} out of {} fruit in the bucket.",
                        self.state.bucketed_count(),
                        self.state.fruits.len()
                    )
                };
                message.set_text_content(Some(&text));
            }

            if let Some(overlay) = document.get_element_by_id("game-over") {
                let _ = overlay.set_attribute("class", "show");
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Bucket Toss starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let settings = Settings::load();
        let viewport = viewport_size(&window);
        let bucket = bucket_rect(&document);
        let game = Rc::new(RefCell::new(Game::new(settings, viewport, bucket)));

        log::info!("Round started with seed: {}", game.borrow().state.seed);

        setup_input_handlers(&document, game.clone());
        setup_restart_button(game.clone());
        start_countdown(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Bucket Toss running!");
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) {
        // Grab handlers, one pair per fruit
        for kind in FruitKind::ALL {
            let Some(el) = document.get_element_by_id(&format!("fruit-{}", kind.as_str()))
            else {
                log::warn!("missing element for {}", kind.as_str());
                continue;
            };

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    event.prevent_default();
                    let mut g = game.borrow_mut();
                    sim::begin_drag(&mut g.state, kind, mouse_pos(&event));
                });
                let _ = el
                    .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if let Some(pos) = touch_pos(&event) {
                        let mut g = game.borrow_mut();
                        sim::begin_drag(&mut g.state, kind, pos);
                    }
                });
                let _ = el.add_event_listener_with_callback(
                    "touchstart",
                    closure.as_ref().unchecked_ref(),
                );
                closure.forget();
            }
        }

        // Move/release land on the document, not the fruit, once a drag starts
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                sim::update_drag(&mut g.state, mouse_pos(&event));
            });
            let _ = document
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(pos) = touch_pos(&event) {
                    let mut g = game.borrow_mut();
                    sim::update_drag(&mut g.state, pos);
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Release resolves against the last tracked pointer position
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let mut g = game.borrow_mut();
                if let Some(pointer) = g.state.drag.map(|d| d.pointer) {
                    sim::end_drag(&mut g.state, pointer);
                }
            });
            let _ = document
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                let mut g = game.borrow_mut();
                if let Some(pointer) = g.state.drag.map(|d| d.pointer) {
                    sim::end_drag(&mut g.state, pointer);
                }
            });
            let _ = document
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                restart(&game);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Begin a fresh round: new seed, fresh timer, overlay hidden
    fn restart(game: &Rc<RefCell<Game>>) {
        let seed = js_sys::Date::now() as u64;
        {
            let mut g = game.borrow_mut();
            let round_seconds = g.settings.round_seconds;
            g.state.reset(seed, round_seconds);
            g.outcome_shown = false;

            let document = web_sys::window()
                .and_then(|w| w.document())
                .expect("no document");
            if let Some(overlay) = document.get_element_by_id("game-over") {
                let _ = overlay.set_attribute("class", "hidden");
            }
        }
        start_countdown(game.clone());
        log::info!("Round restarted with seed: {}", seed);
    }

    /// (Re)arm the 1 Hz countdown interval
    fn start_countdown(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        if let Some(id) = game.borrow_mut().timer_id.take() {
            window.clear_interval_with_handle(id);
        }

        let tick_game = game.clone();
        let closure = Closure::<dyn FnMut()>::new(move || {
            let mut g = tick_game.borrow_mut();
            sim::second_tick(&mut g.state);
        });
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            1000,
        ) {
            Ok(id) => game.borrow_mut().timer_id = Some(id),
            Err(e) => log::error!("Failed to start countdown: {:?}", e),
        }
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        let finished = {
            let mut g = game.borrow_mut();
            g.refresh_layout();
            sim::step(&mut g.state);
            g.render();

            match g.state.phase {
                GamePhase::GameOver { won } if !g.outcome_shown => {
                    g.outcome_shown = true;
                    g.show_outcome(won);
                    Some(won)
                }
                _ => None,
            }
        };

        if finished.is_some() && game.borrow().settings.auto_restart {
            schedule_auto_restart(game.clone());
        }

        request_animation_frame(game);
    }

    /// Re-run automatically after the outcome screen, when enabled
    fn schedule_auto_restart(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let delay = game.borrow().settings.restart_delay_ms as i32;

        let closure = Closure::once(move || {
            restart(&game);
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            delay,
        );
        closure.forget();
    }

    fn viewport_size(window: &web_sys::Window) -> Vec2 {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0);
        Vec2::new(w as f32, h as f32)
    }

    fn bucket_rect(document: &Document) -> Rect {
        document
            .get_element_by_id("bucket")
            .map(|el| {
                let r = el.get_bounding_client_rect();
                Rect::new(
                    r.left() as f32,
                    r.top() as f32,
                    r.width() as f32,
                    r.height() as f32,
                )
            })
            .unwrap_or_else(|| {
                log::warn!("no #bucket element, collisions will never hit");
                Rect::new(0.0, 0.0, 0.0, 0.0)
            })
    }

    fn mouse_pos(event: &MouseEvent) -> Vec2 {
        Vec2::new(event.client_x() as f32, event.client_y() as f32)
    }

    fn touch_pos(event: &TouchEvent) -> Option<Vec2> {
        event
            .touches()
            .get(0)
            .map(|t| Vec2::new(t.client_x() as f32, t.client_y() as f32))
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Bucket Toss (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    run_demo_toss();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted toss against a fixed layout, exercising the sim end to end
#[cfg(not(target_arch = "wasm32"))]
fn run_demo_toss() {
    use bucket_toss::consts::ROUND_SECONDS;
    use bucket_toss::sim::{self, FruitKind, GameState, Rect};
    use glam::Vec2;

    let viewport = Vec2::new(800.0, 600.0);
    let bucket = Rect::new(50.0, 500.0, 100.0, 80.0);
    let mut state = GameState::new(42, ROUND_SECONDS, viewport, bucket);

    // Pull the apple 60px up so it flings straight down into the bucket
    let anchor = state.fruit(FruitKind::Apple).center();
    sim::begin_drag(&mut state, FruitKind::Apple, anchor);
    sim::end_drag(&mut state, anchor - Vec2::new(0.0, 60.0));

    let mut steps = 0;
    while !state.fruit(FruitKind::Apple).is_bucketed() && steps < 600 {
        sim::step(&mut state);
        steps += 1;
    }

    println!(
        "apple {} after {} steps ({} of {} bucketed)",
        if state.fruit(FruitKind::Apple).is_bucketed() {
            "landed"
        } else {
            "missed"
        },
        steps,
        state.bucketed_count(),
        state.fruits.len()
    );
}
