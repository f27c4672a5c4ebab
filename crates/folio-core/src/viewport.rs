use std::collections::HashMap;

/// Document-space position of a section: distance from the top of the page
/// and laid-out height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

/// Viewport-relative edges of an element, as a bounding client rect reports them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub top: f64,
    pub bottom: f64,
}

/// Read-only access to the rendering surface.
///
/// The scroll tracker, the navigation controller and the animation triggers
/// only ever see the page through this trait, so tests and the CLI can swap
/// in a synthetic layout.
pub trait ViewportObserver {
    /// Current vertical scroll offset in pixels
    fn scroll_offset(&self) -> f64;

    /// Height of the visible area in pixels
    fn viewport_height(&self) -> f64;

    /// Layout of the section with this id, `None` while it is not mounted
    fn section_bounds(&self, id: &str) -> Option<Bounds>;

    /// Bounding rect of an arbitrary element, `None` while it is not mounted
    fn target_rect(&self, id: &str) -> Option<Rect>;
}

/// In-memory page layout.
#[derive(Debug, Clone, Default)]
pub struct StaticViewport {
    offset: f64,
    height: f64,
    elements: HashMap<String, Bounds>,
    order: Vec<String>,
}

impl StaticViewport {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            height: viewport_height,
            ..Self::default()
        }
    }

    /// Lay sections out one after another starting at the top of the page
    pub fn stacked(sections: &[(&str, f64)], viewport_height: f64) -> Self {
        let mut viewport = Self::new(viewport_height);
        let mut top = 0.0;
        for (id, height) in sections {
            viewport.place(id, top, *height);
            top += height;
        }
        viewport
    }

    /// Place (or move) an element at a document position
    pub fn place(&mut self, id: &str, top: f64, height: f64) {
        if !self.elements.contains_key(id) {
            self.order.push(id.to_string());
        }
        self.elements.insert(id.to_string(), Bounds { top, height });
    }

    /// Remove an element, as if it were unmounted
    pub fn remove(&mut self, id: &str) {
        self.elements.remove(id);
        self.order.retain(|existing| existing != id);
    }

    pub fn scroll_to(&mut self, offset: f64) {
        self.offset = offset.max(0.0);
    }

    /// Total document height covered by placed elements
    pub fn document_height(&self) -> f64 {
        self.elements
            .values()
            .map(|b| b.top + b.height)
            .fold(0.0, f64::max)
    }

    /// Ids in placement order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}

impl ViewportObserver for StaticViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset
    }

    fn viewport_height(&self) -> f64 {
        self.height
    }

    fn section_bounds(&self, id: &str) -> Option<Bounds> {
        self.elements.get(id).copied()
    }

    fn target_rect(&self, id: &str) -> Option<Rect> {
        self.elements.get(id).map(|b| Rect {
            top: b.top - self.offset,
            bottom: b.top + b.height - self.offset,
        })
    }
}
