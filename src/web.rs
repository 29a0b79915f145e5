//! Browser mounting
//!
//! `OrbBackdrop` owns one animator driven by requestAnimationFrame. The frame
//! callback only holds a weak handle to the loop, so dropping the backdrop
//! (or calling `unmount` from JS) cancels the pending frame, releases the
//! callback and removes the orb elements.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Window};

use crate::animator::Animator;
use crate::error::OrbError;
use crate::feed::{FeedReader, LiveFeed};
use crate::frame_loop::{FrameHost, FrameId, FrameLoop};
use crate::motion::Intents;
use crate::profile::{AnimationProfile, ProfilePreset};
use crate::render::DomSurface;
use crate::sim::Viewport;

type FrameCallback = Closure<dyn FnMut(f64)>;
type CallbackSlot = Rc<RefCell<Option<FrameCallback>>>;
type OrbLoop = FrameLoop<RafHost, DomSurface>;

/// requestAnimationFrame host
pub struct RafHost {
    window: Window,
    callback: CallbackSlot,
}

impl FrameHost for RafHost {
    fn request_frame(&mut self) -> Result<FrameId, OrbError> {
        let slot = self.callback.borrow();
        let callback = slot.as_ref().ok_or(OrbError::Detached)?;
        self.window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| OrbError::FrameRequest(format!("{:?}", e)))
    }

    fn cancel_frame(&mut self, id: FrameId) {
        let _ = self.window.cancel_animation_frame(id);
    }
}

/// Current viewport from the window
pub fn read_viewport(window: &Window) -> Viewport {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
    Viewport::new(dim(window.inner_width()), dim(window.inner_height()))
}

/// Random seed for a fresh mount
fn mount_seed() -> u64 {
    let mut buf = [0u8; 8];
    match getrandom::fill(&mut buf) {
        Ok(()) => u64::from_le_bytes(buf),
        Err(_) => js_sys::Date::now() as u64,
    }
}

/// The orb backdrop mounted into a page
#[wasm_bindgen]
pub struct OrbBackdrop {
    // Field order matters: the loop (and its pending frame) goes first,
    // then the callback it was scheduled with.
    frame_loop: Rc<RefCell<OrbLoop>>,
    _callback: CallbackSlot,
    intents: Rc<Cell<Intents>>,
    feed: FeedReader,
}

impl OrbBackdrop {
    /// Mount under `parent` with the given profile
    pub fn mount_in(parent: &Element, profile: AnimationProfile) -> Result<Self, OrbError> {
        let window = web_sys::window().ok_or(OrbError::NoWindow)?;
        let document = window.document().ok_or(OrbError::NoDocument)?;

        let surface = DomSurface::mount(&document, parent)?;
        let feed = LiveFeed::new();
        let reader = feed.reader();
        let animator = Animator::new(read_viewport(&window), profile, mount_seed()).with_sink(feed);

        let callback: CallbackSlot = Rc::new(RefCell::new(None));
        let host = RafHost {
            window: window.clone(),
            callback: Rc::clone(&callback),
        };
        let intents = Rc::new(Cell::new(Intents::default()));

        // The callback must exist before the first request
        let weak_loop: Rc<RefCell<Weak<RefCell<OrbLoop>>>> = Rc::new(RefCell::new(Weak::new()));
        {
            let weak_loop = Rc::clone(&weak_loop);
            let intents = Rc::clone(&intents);
            let window = window.clone();
            *callback.borrow_mut() = Some(Closure::new(move |now: f64| {
                let Some(frame_loop) = weak_loop.borrow().upgrade() else {
                    return;
                };
                let viewport = read_viewport(&window);
                if let Err(e) = frame_loop.borrow_mut().on_frame(now, viewport, intents.get()) {
                    log::error!("Orb frame loop stopped: {}", e);
                }
            }));
        }

        let frame_loop = Rc::new(RefCell::new(FrameLoop::start(host, surface, animator)?));
        *weak_loop.borrow_mut() = Rc::downgrade(&frame_loop);

        log::info!("Orb backdrop mounted");
        Ok(Self {
            frame_loop,
            _callback: callback,
            intents,
            feed: reader,
        })
    }

    /// Read-only handle to the live positions
    pub fn feed(&self) -> FeedReader {
        self.feed.clone()
    }
}

#[wasm_bindgen]
impl OrbBackdrop {
    /// Mount under the element with id `parent_id` (or `<body>`), using a
    /// named preset or the stored profile
    #[wasm_bindgen(constructor)]
    pub fn new(parent_id: Option<String>, preset: Option<String>) -> Result<OrbBackdrop, JsValue> {
        let mount = || -> Result<OrbBackdrop, OrbError> {
            let document = web_sys::window()
                .ok_or(OrbError::NoWindow)?
                .document()
                .ok_or(OrbError::NoDocument)?;
            let parent: Element = match parent_id {
                Some(id) => document
                    .get_element_by_id(&id)
                    .ok_or(OrbError::MissingElement(id))?,
                None => document
                    .body()
                    .ok_or_else(|| OrbError::MissingElement("body".into()))?
                    .into(),
            };
            // An explicit preset also becomes the stored choice for later visits
            let profile = match preset.as_deref().and_then(ProfilePreset::from_str) {
                Some(preset) => {
                    let profile = AnimationProfile::from_preset(preset);
                    profile.save();
                    profile
                }
                None => AnimationProfile::load(),
            };
            OrbBackdrop::mount_in(&parent, profile)
        };
        mount().map_err(|e| JsError::new(&e.to_string()).into())
    }

    /// Modal open/closed
    #[wasm_bindgen(js_name = setCondensing)]
    pub fn set_condensing(&self, on: bool) {
        let mut intents = self.intents.get();
        intents.condensing = on;
        self.intents.set(intents);
    }

    /// Deck open/closed
    #[wasm_bindgen(js_name = setDispersing)]
    pub fn set_dispersing(&self, on: bool) {
        let mut intents = self.intents.get();
        intents.dispersing = on;
        self.intents.set(intents);
    }

    /// Latest positions as x0, y0, x1, y1, x2, y2 (empty before the first frame)
    pub fn positions(&self) -> Vec<f32> {
        self.feed.flattened()
    }

    /// Active mode name
    pub fn mode(&self) -> String {
        self.frame_loop.borrow().animator().mode().as_str().to_string()
    }

    /// Stop animating and remove the orbs
    pub fn unmount(self) {
        log::info!("Orb backdrop unmounted");
    }
}
