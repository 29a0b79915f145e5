//! DOM surface: a fixed full-viewport container with three orb divs

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::{OrbSurface, opacity_css, transform_css};
use crate::animator::FrameOutput;
use crate::consts::ORB_COUNT;
use crate::error::OrbError;
use crate::sim::ORB_CLASSES;

pub struct DomSurface {
    container: HtmlElement,
    orbs: [HtmlElement; ORB_COUNT],
    z_index: Option<i32>,
}

impl DomSurface {
    /// Create the container and orb elements under `parent`
    pub fn mount(document: &Document, parent: &Element) -> Result<Self, OrbError> {
        let container = create_div(document, "floating-orbs-container")?;
        set_style(&container, "position", "fixed")?;
        set_style(&container, "inset", "0")?;
        set_style(&container, "overflow", "hidden")?;
        set_style(&container, "pointer-events", "none")?;

        let mut orbs = Vec::with_capacity(ORB_COUNT);
        for class in ORB_CLASSES {
            let orb = create_div(document, "floating-orb")?;
            let size = format!("{}px", class.size());
            set_style(&orb, "position", "absolute")?;
            set_style(&orb, "top", "0")?;
            set_style(&orb, "left", "0")?;
            set_style(&orb, "width", &size)?;
            set_style(&orb, "height", &size)?;
            set_style(&orb, "border-radius", "50%")?;
            set_style(&orb, "background-color", class.color())?;
            set_style(&orb, "will-change", "transform, opacity")?;
            container.append_child(&orb).map_err(OrbError::dom)?;
            orbs.push(orb);
        }
        parent.append_child(&container).map_err(OrbError::dom)?;

        let orbs: [HtmlElement; ORB_COUNT] = orbs
            .try_into()
            .map_err(|_| OrbError::Dom("orb element count".into()))?;

        log::info!("Orb surface mounted");
        Ok(Self {
            container,
            orbs,
            z_index: None,
        })
    }
}

impl OrbSurface for DomSurface {
    fn apply(&mut self, frame: &FrameOutput) {
        if self.z_index != Some(frame.z_index) {
            let _ = set_style(&self.container, "z-index", &frame.z_index.to_string());
            self.z_index = Some(frame.z_index);
        }
        for (el, orb) in self.orbs.iter().zip(frame.orbs.iter()) {
            let _ = set_style(el, "transform", &transform_css(orb));
            let _ = set_style(el, "opacity", &opacity_css(orb));
        }
    }
}

impl Drop for DomSurface {
    fn drop(&mut self) {
        self.container.remove();
    }
}

fn create_div(document: &Document, class: &str) -> Result<HtmlElement, OrbError> {
    let el = document.create_element("div").map_err(OrbError::dom)?;
    el.set_class_name(class);
    el.dyn_into::<HtmlElement>()
        .map_err(|_| OrbError::Dom("div is not an HtmlElement".into()))
}

fn set_style(el: &HtmlElement, property: &str, value: &str) -> Result<(), OrbError> {
    el.style().set_property(property, value).map_err(OrbError::dom)
}
