//! Floating Orbs entry point
//!
//! On web: mounts the backdrop and wires the landing page's modal and deck
//! controls to it. Natively: runs a scripted headless session.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_page {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, HtmlInputElement, KeyboardEvent, MouseEvent};

    use floating_orbs::gate::{request_deck_access, submitted_passcode};
    use floating_orbs::glow::place_glows;
    use floating_orbs::web::{OrbBackdrop, read_viewport};

    type Backdrop = Rc<RefCell<Option<OrbBackdrop>>>;

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Floating Orbs starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let backdrop = match OrbBackdrop::new(None, None) {
            Ok(backdrop) => backdrop,
            Err(e) => {
                log::error!("Could not mount orbs: {:?}", e);
                return;
            }
        };
        let backdrop: Backdrop = Rc::new(RefCell::new(Some(backdrop)));

        setup_modal(&document, backdrop.clone());
        setup_deck(&document, backdrop.clone());
        setup_escape(backdrop.clone());
        setup_teardown(backdrop);

        log::info!("Floating Orbs running!");
    }

    fn with_backdrop(backdrop: &Backdrop, f: impl FnOnce(&OrbBackdrop)) {
        if let Some(b) = backdrop.borrow().as_ref() {
            f(b);
        }
    }

    fn on_click(document: &Document, id: &str, handler: impl FnMut(MouseEvent) + 'static) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(handler);
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn set_class(document: &Document, id: &str, class: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", class);
        }
    }

    fn setup_modal(document: &Document, backdrop: Backdrop) {
        {
            let backdrop = backdrop.clone();
            on_click(document, "signup-btn", move |_event| {
                with_backdrop(&backdrop, |b| {
                    place_modal_glows(b);
                    b.set_condensing(true);
                });
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_class(&document, "signup-modal", "modal modal-open");
                }
            });
        }

        on_click(document, "modal-close", move |_event| {
            with_backdrop(&backdrop, |b| b.set_condensing(false));
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_class(&document, "signup-modal", "modal");
            }
        });
    }

    /// Put each `.modal-glow` where its orb currently is
    fn place_modal_glows(backdrop: &OrbBackdrop) {
        let Some(window) = web_sys::window() else { return };
        let Some(document) = window.document() else { return };
        let Some(positions) = backdrop.feed().latest() else { return };
        let Some(glows) = place_glows(&positions, &read_viewport(&window)) else { return };

        let Ok(nodes) = document.query_selector_all(".modal-glow") else { return };
        for (i, glow) in glows.iter().enumerate() {
            let Some(el) = nodes
                .item(i as u32)
                .and_then(|n| n.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let style = el.style();
            let size = format!("{}px", glow.class.glow_size());
            let _ = style.set_property("left", &glow.left_css());
            let _ = style.set_property("top", &glow.top_css());
            let _ = style.set_property("width", &size);
            let _ = style.set_property("height", &size);
            let _ = style.set_property("background", glow.class.glow_gradient());
            let _ = style.set_property("transition-delay", &glow.delay_css());
        }
    }

    fn setup_deck(document: &Document, backdrop: Backdrop) {
        {
            let backdrop = backdrop.clone();
            let in_flight = Rc::new(Cell::new(false));
            on_click(document, "passcode-submit", move |event| {
                event.prevent_default();
                if in_flight.get() {
                    return;
                }
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                let raw = document
                    .get_element_by_id("passcode-input")
                    .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
                    .map(|input| input.value())
                    .unwrap_or_default();
                let Some(passcode) = submitted_passcode(&raw).map(str::to_string) else {
                    return;
                };

                in_flight.set(true);
                let in_flight = Rc::clone(&in_flight);
                let backdrop = backdrop.clone();
                wasm_bindgen_futures::spawn_local(async move {
                    let verdict = request_deck_access(&passcode).await;
                    in_flight.set(false);
                    match verdict {
                        Ok(true) => {
                            log::info!("Deck unlocked");
                            with_backdrop(&backdrop, |b| {
                                b.set_condensing(false);
                                b.set_dispersing(true);
                            });
                            set_class(&document, "signup-modal", "modal");
                            set_class(&document, "deck", "deck deck-open");
                            set_class(&document, "passcode-error", "hidden");
                        }
                        Ok(false) => {
                            log::info!("Wrong passcode");
                            set_class(&document, "passcode-error", "");
                        }
                        Err(e) => {
                            log::warn!("Passcode check failed: {}", e);
                            set_class(&document, "passcode-error", "");
                        }
                    }
                });
            });
        }

        on_click(document, "deck-close", move |_event| {
            with_backdrop(&backdrop, |b| b.set_dispersing(false));
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                set_class(&document, "deck", "deck");
            }
        });
    }

    fn setup_escape(backdrop: Backdrop) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if event.key() == "Escape" {
                with_backdrop(&backdrop, |b| {
                    b.set_condensing(false);
                    b.set_dispersing(false);
                });
                if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                    set_class(&document, "signup-modal", "modal");
                    set_class(&document, "deck", "deck");
                }
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Unmount on page hide so no frame callback outlives the page
    fn setup_teardown(backdrop: Backdrop) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            if let Some(b) = backdrop.borrow_mut().take() {
                b.unmount();
            }
        });
        let _ = window.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_page::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Floating Orbs (native) starting...");
    log::info!("Native mode runs a headless session; build for wasm32 for the page backdrop");

    headless_session();

    // `floating-orbs <passcode>` checks it the way the deck endpoint would
    if let Some(passcode) = std::env::args().nth(1) {
        check_passcode(&passcode);
    } else {
        gate_status();
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Physics, open and close the modal, open and close the deck
#[cfg(not(target_arch = "wasm32"))]
fn headless_session() {
    use floating_orbs::{AnimationProfile, Animator, Intents, LiveFeed, ModeKind, Viewport};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    let viewport = Viewport::new(1280.0, 800.0);
    let feed = LiveFeed::new();
    let reader = feed.reader();
    let mut animator = Animator::new(viewport, AnimationProfile::load(), 2024).with_sink(feed);

    let script = [
        (0.0, Intents::default()),
        (2_000.0, Intents::new(true, false)),
        (3_500.0, Intents::default()),
        (5_000.0, Intents::new(false, true)),
        (7_000.0, Intents::default()),
        (9_000.0, Intents::default()),
    ];

    let mut now: f64 = 0.0;
    let mut last_mode = ModeKind::Physics;
    for window in script.windows(2) {
        let (start, intents) = window[0];
        let end = window[1].0;
        now = now.max(start);
        while now < end {
            let out = animator.advance(now, viewport, intents);
            if out.mode != last_mode {
                log::info!("{:>7.0} ms  {} -> {}", now, last_mode.as_str(), out.mode.as_str());
                last_mode = out.mode;
            }
            now += FRAME_MS;
        }
    }

    if let Some(positions) = reader.latest() {
        for (i, p) in positions.iter().enumerate() {
            log::info!("orb {} at ({:.1}, {:.1})", i, p.x, p.y);
        }
    }
    println!(
        "Headless session: {} physics steps, final mode {}",
        animator.system().steps,
        animator.mode().as_str()
    );
}

#[cfg(not(target_arch = "wasm32"))]
fn check_passcode(raw: &str) {
    use floating_orbs::gate::{PasscodeRequest, expected_from_env, submitted_passcode, verify_passcode};

    let Some(passcode) = submitted_passcode(raw) else {
        log::warn!("Empty passcode, nothing to check");
        return;
    };
    let request = PasscodeRequest {
        passcode: passcode.to_string(),
    };
    let verdict = verify_passcode(expected_from_env().as_deref(), &request);
    match serde_json::to_string(&verdict.reply()) {
        Ok(body) => println!("{} {}", verdict.status(), body),
        Err(e) => log::error!("Could not encode reply: {}", e),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn gate_status() {
    use floating_orbs::gate::{PASSCODE_ENV, expected_from_env};

    match expected_from_env() {
        Some(code) if !code.is_empty() => log::info!("{} is set; deck gate active", PASSCODE_ENV),
        _ => log::warn!("{} is not set; deck gate answers 503", PASSCODE_ENV),
    }
}
