//! Blob Arena entry point
//!
//! On the web this wires the canvas, pointer and resize events to the frame
//! driver. Natively it runs one headless session with a scripted pointer and
//! prints a JSON summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlCanvasElement, HtmlElement, MouseEvent};

    use blob_arena::platform::web::{
        CanvasSurface, FrameCallback, RafScheduler, fit_canvas_to_window, show_restart,
    };
    use blob_arena::platform::{restart_label, score_label};
    use blob_arena::{FrameDriver, FrameStatus, Settings};

    type Driver = Rc<RefCell<FrameDriver<RafScheduler>>>;

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Blob Arena starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("missing #gameCanvas")?
            .dyn_into()?;
        let score_el = document.get_element_by_id("score");
        let restart_btn = document
            .query_selector(".button")?
            .and_then(|el| el.dyn_into::<HtmlElement>().ok());

        let search = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&search, |part| {
            js_sys::decode_uri_component(part).ok().map(String::from)
        });
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);

        let bounds = fit_canvas_to_window(&canvas);
        let mut surface = CanvasSurface::new(&canvas)?;

        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let driver: Driver = Rc::new(RefCell::new(FrameDriver::new(
            settings,
            bounds,
            seed,
            RafScheduler::new(callback.clone()),
        )));

        setup_input_handlers(&canvas, driver.clone());
        setup_resize_handler(canvas.clone(), driver.clone());
        setup_restart_button(restart_btn.as_ref());

        let frame_driver = driver.clone();
        let mut shown_score = None;
        *callback.borrow_mut() = Some(Closure::new(move |_time: f64| {
            let mut d = frame_driver.borrow_mut();
            let status = d.on_frame(&mut surface);

            let score = d.score();
            if shown_score != Some(score) {
                update_score(score_el.as_ref(), score);
                shown_score = Some(score);
            }

            if let FrameStatus::GameOver { score, .. } = status {
                if let Some(btn) = restart_btn.as_ref() {
                    show_restart(btn, &restart_label(score));
                }
            }
        }));

        driver.borrow_mut().start();
        log::info!("Blob Arena running!");
        Ok(())
    }

    fn update_score(el: Option<&Element>, score: f32) {
        if let Some(el) = el {
            el.set_text_content(Some(&score_label(score)));
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, driver: Driver) {
        let target = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let rect = target.get_bounding_client_rect();
            let x = event.client_x() as f64 - rect.left();
            let y = event.client_y() as f64 - rect.top();
            driver.borrow_mut().set_pointer(x as f32, y as f32);
        });
        if let Err(e) = canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to register mousemove listener: {:?}", e);
        }
        closure.forget();
    }

    fn setup_resize_handler(canvas: HtmlCanvasElement, driver: Driver) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let bounds = fit_canvas_to_window(&canvas);
            driver.borrow_mut().resize(bounds.width, bounds.height);
        });
        if let Err(e) = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to register resize listener: {:?}", e);
        }
        closure.forget();
    }

    /// A new session is a fresh page: clicking restart reloads
    fn setup_restart_button(button: Option<&HtmlElement>) {
        let Some(btn) = button else {
            log::warn!("No restart button found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            if let Some(window) = web_sys::window() {
                log::info!("Restarting session");
                if let Err(e) = window.location().reload() {
                    log::error!("Reload failed: {:?}", e);
                }
            }
        });
        if let Err(e) = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref()) {
            log::warn!("Failed to register click listener: {:?}", e);
        }
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        web_sys::console::error_1(&e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use serde::Serialize;

    use blob_arena::render::NullSurface;
    use blob_arena::sim::{Bounds, GameOverReason};
    use blob_arena::{FrameDriver, FrameStatus, ManualScheduler, Settings};

    /// Frames to run when no limit is configured (one minute at 60 Hz)
    const DEFAULT_TICKS: u64 = 3_600;

    #[derive(Debug, Serialize)]
    struct Summary {
        seed: u64,
        ticks: u64,
        score: f32,
        player_radius: f32,
        outcome: Option<GameOverReason>,
    }

    pub fn run() {
        let settings = Settings::from_env();
        let seed = settings.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or_default()
        });
        let max_ticks = settings.max_ticks.unwrap_or(DEFAULT_TICKS);
        let bounds = Bounds::new(1280.0, 720.0);

        let mut driver = FrameDriver::new(settings, bounds, seed, ManualScheduler::default());
        let mut surface = NullSurface;
        let mut outcome = None;
        driver.start();

        while driver.state().time_ticks < max_ticks {
            // Scripted pointer: a slow orbit around the center
            let t = driver.state().time_ticks as f32 * 0.01;
            let center = bounds.center();
            driver.set_pointer(center.x + t.cos() * 300.0, center.y + t.sin() * 200.0);

            match driver.pump(&mut surface) {
                Some(FrameStatus::Continue) => {}
                Some(FrameStatus::GameOver { reason, .. }) => {
                    outcome = Some(reason);
                    break;
                }
                Some(FrameStatus::Halted) | None => break,
            }
        }
        driver.halt();

        let state = driver.state();
        let summary = Summary {
            seed,
            ticks: state.time_ticks,
            score: state.player.score,
            player_radius: state.player.body.radius,
            outcome,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize summary: {}", e),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Blob Arena (native) starting headless session...");
    log::info!("Browser build: run with `trunk serve` for the playable version");
    headless::run();
}
