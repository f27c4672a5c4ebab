//! Browser implementations of the viewport and stage seams.

use std::collections::HashMap;

use folio_core::{Bounds, Property, Props, Rect, Stage, ViewportObserver};
use tracing::trace;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

/// Reads scroll position and layout from the live document
pub struct DomViewport {
    window: Window,
    document: Document,
}

impl DomViewport {
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    fn client_rect(&self, id: &str) -> Option<web_sys::DomRect> {
        self.document
            .get_element_by_id(id)
            .map(|el| el.get_bounding_client_rect())
    }
}

impl ViewportObserver for DomViewport {
    fn scroll_offset(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|h| h.as_f64())
            .unwrap_or(0.0)
    }

    fn section_bounds(&self, id: &str) -> Option<Bounds> {
        let rect = self.client_rect(id)?;
        Some(Bounds {
            top: rect.top() + self.scroll_offset(),
            height: rect.height(),
        })
    }

    fn target_rect(&self, id: &str) -> Option<Rect> {
        let rect = self.client_rect(id)?;
        Some(Rect {
            top: rect.top(),
            bottom: rect.bottom(),
        })
    }
}

/// Writes animated values as inline styles on the element with the target id
#[derive(Default)]
pub struct DomStage {
    values: HashMap<String, Props>,
}

impl DomStage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stage for DomStage {
    fn apply(&mut self, target: &str, props: &Props) -> bool {
        let Some(element) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(target))
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        else {
            return false;
        };

        let current = self.values.entry(target.to_string()).or_default();
        current.merge(props);

        let style = element.style();
        for (name, value) in css_declarations(current) {
            if let Err(e) = style.set_property(name, &value) {
                trace!(target_id = target, property = name, ?e, "style write failed");
            }
        }
        true
    }
}

/// CSS declarations for a full set of animated values.
///
/// Translation and scale share the `transform` property, so both are always
/// written together.
pub fn css_declarations(props: &Props) -> Vec<(&'static str, String)> {
    let mut out = Vec::new();

    let moves = [Property::X, Property::Y, Property::Scale]
        .into_iter()
        .any(|p| props.contains(p));
    if moves {
        let value = |p: Property| props.get(p).unwrap_or_else(|| p.rest_value());
        out.push((
            "transform",
            format!(
                "translate3d({}px, {}px, 0) scale({})",
                round(value(Property::X)),
                round(value(Property::Y)),
                round(value(Property::Scale))
            ),
        ));
    }
    if let Some(opacity) = props.get(Property::Opacity) {
        out.push(("opacity", round(opacity.clamp(0.0, 1.0)).to_string()));
    }
    if let Some(width) = props.get(Property::Width) {
        out.push(("width", format!("{}%", round(width))));
    }
    out
}

fn round(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Seconds since page load
pub fn now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

pub fn scroll_window_to(offset: f64) {
    if let Some(window) = web_sys::window() {
        window.scroll_to_with_x_and_y(0.0, offset);
    }
}

/// The URL fragment including its `#`, if any
pub fn location_hash() -> Option<String> {
    web_sys::window()
        .and_then(|w| w.location().hash().ok())
        .filter(|hash| !hash.is_empty())
}
