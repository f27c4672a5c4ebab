use tracing::debug;

use crate::section::Sections;
use crate::viewport::ViewportObserver;

/// Height of the fixed navigation bar that covers the top of the page
pub const DEFAULT_HEADER_OFFSET: f64 = 100.0;
/// Scroll distance after which the navigation bar switches to its solid style
pub const DEFAULT_SCROLL_THRESHOLD: f64 = 50.0;

/// Snapshot of what the navigation bar needs to render
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
    pub scrolled: bool,
    pub active: String,
}

/// Maps the viewport's scroll offset to the active section.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    sections: Sections,
    header_offset: f64,
    threshold: f64,
    state: ScrollState,
}

impl ScrollTracker {
    pub fn new(sections: Sections, header_offset: f64, threshold: f64) -> Self {
        let state = ScrollState {
            offset: 0.0,
            scrolled: false,
            active: sections.first().id.clone(),
        };
        Self {
            sections,
            header_offset,
            threshold,
            state,
        }
    }

    pub fn with_defaults(sections: Sections) -> Self {
        Self::new(sections, DEFAULT_HEADER_OFFSET, DEFAULT_SCROLL_THRESHOLD)
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn active(&self) -> &str {
        &self.state.active
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    pub fn header_offset(&self) -> f64 {
        self.header_offset
    }

    /// Recompute from the viewport.
    ///
    /// Returns the new state only when the active section or the scrolled
    /// flag changed; a bare offset change is recorded but not reported.
    pub fn update(&mut self, viewport: &dyn ViewportObserver) -> Option<ScrollState> {
        let offset = viewport.scroll_offset();
        let scrolled = offset > self.threshold;
        let active = self
            .locate(viewport, offset)
            .map(str::to_string)
            .unwrap_or_else(|| self.state.active.clone());

        let changed = active != self.state.active || scrolled != self.state.scrolled;
        self.state.offset = offset;

        if !changed {
            return None;
        }

        if active != self.state.active {
            debug!(from = %self.state.active, to = %active, offset, "active section changed");
        }
        self.state.active = active;
        self.state.scrolled = scrolled;
        Some(self.state.clone())
    }

    /// First section in page order whose band contains the offset
    fn locate(&self, viewport: &dyn ViewportObserver, offset: f64) -> Option<&str> {
        let position = offset + self.header_offset;
        self.sections.ids().find(|id| {
            let Some(bounds) = viewport.section_bounds(id) else {
                return false;
            };
            if bounds.height <= 0.0 {
                return false;
            }
            let top = bounds.top - self.header_offset;
            let bottom = top + bounds.height;
            top <= position && position < bottom
        })
    }

    /// Overwrite the active section. Unknown ids are ignored.
    pub fn set_active(&mut self, id: &str) -> bool {
        if !self.sections.contains(id) || self.state.active == id {
            return false;
        }
        self.state.active = id.to_string();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewport::StaticViewport;

    fn layout() -> StaticViewport {
        StaticViewport::stacked(
            &[
                ("hero", 900.0),
                ("about", 800.0),
                ("projects", 1200.0),
                ("skills", 1000.0),
                ("contact", 900.0),
            ],
            800.0,
        )
    }

    #[test]
    fn test_initial_state_defaults_to_first_section() {
        let tracker = ScrollTracker::with_defaults(Sections::portfolio());
        assert_eq!(tracker.active(), "hero");
        assert!(!tracker.state().scrolled);
    }

    #[test]
    fn test_update_reports_only_changes() {
        let mut viewport = layout();
        let mut tracker = ScrollTracker::with_defaults(Sections::portfolio());

        // Still hero, still below the threshold
        viewport.scroll_to(10.0);
        assert!(tracker.update(&viewport).is_none());
        assert_eq!(tracker.state().offset, 10.0);

        viewport.scroll_to(60.0);
        let state = tracker.update(&viewport).unwrap();
        assert!(state.scrolled);
        assert_eq!(state.active, "hero");

        viewport.scroll_to(70.0);
        assert!(tracker.update(&viewport).is_none());
    }

    #[test]
    fn test_band_uses_header_offset_on_both_sides() {
        let mut viewport = layout();
        let mut tracker = ScrollTracker::with_defaults(Sections::portfolio());

        // about band: top 900 - 100 = 800, bottom 1600; position = offset + 100
        viewport.scroll_to(699.0);
        tracker.update(&viewport);
        assert_eq!(tracker.active(), "hero");

        viewport.scroll_to(700.0);
        tracker.update(&viewport);
        assert_eq!(tracker.active(), "about");
    }

    #[test]
    fn test_zero_height_never_matches() {
        let mut viewport = StaticViewport::new(800.0);
        viewport.place("hero", 0.0, 0.0);
        viewport.place("about", 0.0, 500.0);
        let mut tracker = ScrollTracker::with_defaults(Sections::portfolio());
        tracker.set_active("contact");

        viewport.scroll_to(0.0);
        tracker.update(&viewport);
        assert_eq!(tracker.active(), "about");
    }

    #[test]
    fn test_overlapping_sections_first_in_page_order_wins() {
        let mut viewport = StaticViewport::new(800.0);
        viewport.place("hero", 0.0, 1000.0);
        viewport.place("about", 500.0, 1000.0);
        let mut tracker = ScrollTracker::with_defaults(Sections::portfolio());
        tracker.set_active("contact");

        // position 700 sits in hero (-100..900) and about (400..1400)
        viewport.scroll_to(600.0);
        let state = tracker.update(&viewport).unwrap();
        assert_eq!(state.active, "hero");
        assert_eq!(tracker.active(), "hero");
    }

    #[test]
    fn test_set_active_ignores_unknown() {
        let mut tracker = ScrollTracker::with_defaults(Sections::portfolio());
        assert!(!tracker.set_active("blog"));
        assert!(tracker.set_active("skills"));
        assert!(!tracker.set_active("skills"));
        assert_eq!(tracker.active(), "skills");
    }
}
