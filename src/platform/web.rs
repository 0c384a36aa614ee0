//! Browser host
//!
//! Owns the requestAnimationFrame registration and wires DOM events into
//! [`Game`]. Frame callbacks are cancelled on stop, so a stopped host
//! schedules nothing.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, KeyboardEvent, Window};

use crate::config::Tuning;
use crate::game::Game;
use crate::renderer::{CanvasRenderer, SpriteUrls};
use crate::sim::HudSnapshot;

/// Buttons that start a new run
const RESTART_BUTTONS: [&str; 2] = ["restart-btn", "play-again-btn"];

struct Host {
    game: Game,
    renderer: CanvasRenderer,
    /// Pending requestAnimationFrame id
    frame_handle: Option<i32>,
    container: Option<Element>,
}

type Shared = Rc<RefCell<Host>>;

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

/// Set up the game on the page's `#canvas` and start the frame loop
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::warn_1(&format!("Logger already set: {e}").into());
    }

    log::info!("Juu Climb starting...");

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document
        .get_element_by_id("canvas")
        .ok_or_else(|| JsValue::from_str("no canvas"))?
        .dyn_into()?;

    let tuning = Tuning::load();
    let seed = js_sys::Date::now() as u64;
    let renderer = CanvasRenderer::new(canvas.clone(), &SpriteUrls::default())?;

    let host = Rc::new(RefCell::new(Host {
        game: Game::new(seed, tuning),
        renderer,
        frame_handle: None,
        container: canvas.parent_element(),
    }));

    fit_to_container(&host);
    setup_keyboard(&window, &host);
    setup_resize(&window, &host);
    setup_restart_buttons(&document, &host);
    setup_lifecycle(&window, &host);

    start(&host);
    log::info!("Juu Climb running with seed {}", seed);
    Ok(())
}

fn start(host: &Shared) {
    {
        let mut h = host.borrow_mut();
        if h.game.is_running() {
            return;
        }
        h.game.start();
    }
    schedule_frame(host.clone());
}

fn stop(host: &Shared) {
    let mut h = host.borrow_mut();
    h.game.stop();
    if let Some(id) = h.frame_handle.take() {
        if let Ok(window) = window() {
            let _ = window.cancel_animation_frame(id);
        }
    }
}

fn schedule_frame(host: Shared) {
    let Ok(window) = window() else {
        return;
    };
    let next = host.clone();
    let callback = Closure::once_into_js(move |time: f64| on_frame(next, time));
    match window.request_animation_frame(callback.unchecked_ref()) {
        Ok(id) => host.borrow_mut().frame_handle = Some(id),
        Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
    }
}

fn on_frame(host: Shared, time: f64) {
    {
        let mut h = host.borrow_mut();
        h.frame_handle = None;
        if !h.game.is_running() {
            return;
        }

        let Host { game, renderer, .. } = &mut *h;
        game.frame(time, renderer);
        update_hud(&game.snapshot());
    }
    schedule_frame(host);
}

fn fit_to_container(host: &Shared) {
    let mut h = host.borrow_mut();
    let width = match &h.container {
        Some(el) => el.client_width() as f32,
        None => window()
            .ok()
            .and_then(|w| w.inner_width().ok())
            .and_then(|w| w.as_f64())
            .unwrap_or(0.0) as f32,
    };
    h.game.resize(width);
}

fn setup_keyboard(window: &Window, host: &Shared) {
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            // Bound keys would otherwise scroll the page
            if host.borrow_mut().game.key_down(&event.key()) {
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            host.borrow_mut().game.key_up(&event.key());
        });
        let _ = window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn setup_resize(window: &Window, host: &Shared) {
    let host = host.clone();
    let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
        fit_to_container(&host);
    });
    let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn setup_restart_buttons(document: &Document, host: &Shared) {
    for id in RESTART_BUTTONS {
        let Some(btn) = document.get_element_by_id(id) else {
            continue;
        };
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let seed = js_sys::Date::now() as u64;
            host.borrow_mut().game.restart_with_seed(seed);
            start(&host);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Stop the loop when the page goes away, resume when it is restored
fn setup_lifecycle(window: &Window, host: &Shared) {
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            stop(&host);
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
    {
        let host = host.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            start(&host);
        });
        let _ = window.add_event_listener_with_callback("pageshow", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn set_text(document: &Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        if el.text_content().as_deref() != Some(text) {
            el.set_text_content(Some(text));
        }
    }
}

fn update_hud(hud: &HudSnapshot) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    set_text(&document, "hud-distance", &format!("{} m", hud.distance_meters));
    set_text(&document, "hud-fuel", &format!("{}%", hud.fuel_percent));
    set_text(&document, "hud-coins", &hud.coins.to_string());

    if let Some(el) = document.get_element_by_id("game-over") {
        if hud.ended {
            let _ = el.set_attribute("class", "");
            set_text(&document, "final-distance", &format!("{} m", hud.distance_meters));
            set_text(&document, "final-coins", &hud.coins.to_string());
        } else {
            let _ = el.set_attribute("class", "hidden");
        }
    }
}
