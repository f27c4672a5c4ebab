use tracing::debug;

use crate::ease::Ease;
use crate::scroll::{ScrollState, ScrollTracker};
use crate::section::{Section, Sections};
use crate::viewport::ViewportObserver;

/// Length of the animated scroll after a navigation click, in seconds
pub const NAV_SCROLL_DURATION: f64 = 1.0;

/// An animated change of the viewport's scroll offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothScroll {
    pub from: f64,
    pub to: f64,
    pub duration: f64,
    pub ease: Ease,
}

impl SmoothScroll {
    pub fn new(from: f64, to: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            duration: duration.max(0.0),
            ease: Ease::POWER2_IN_OUT,
        }
    }

    pub fn with_duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    /// Scroll offset `elapsed` seconds into the animation
    pub fn offset_at(&self, elapsed: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let t = self.ease.apply(elapsed / self.duration);
        self.from + (self.to - self.from) * t
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.duration
    }
}

/// A navigation entry as the navbar renders it
#[derive(Debug, Clone, PartialEq)]
pub struct NavItem<'a> {
    pub section: &'a Section,
    pub is_active: bool,
}

/// Owns the active-section state the navigation bar highlights.
///
/// The active id changes from two sources: scroll recomputation and
/// navigation clicks. The last write wins, except that scroll updates arriving
/// inside the suppression window after a click are ignored.
#[derive(Debug, Clone)]
pub struct NavController {
    tracker: ScrollTracker,
    scroll_duration: f64,
    suppress_for: f64,
    suppressed_until: Option<f64>,
}

impl NavController {
    pub fn new(tracker: ScrollTracker) -> Self {
        Self {
            tracker,
            scroll_duration: NAV_SCROLL_DURATION,
            suppress_for: 0.0,
            suppressed_until: None,
        }
    }

    pub fn scroll_duration(mut self, seconds: f64) -> Self {
        self.scroll_duration = seconds.max(0.0);
        self
    }

    /// Ignore scroll recomputation for this long after a click
    pub fn suppress_for(mut self, seconds: f64) -> Self {
        self.suppress_for = seconds.max(0.0);
        self
    }

    pub fn sections(&self) -> &Sections {
        self.tracker.sections()
    }

    pub fn active(&self) -> &str {
        self.tracker.active()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.tracker.active() == id
    }

    pub fn scrolled(&self) -> bool {
        self.tracker.state().scrolled
    }

    pub fn state(&self) -> &ScrollState {
        self.tracker.state()
    }

    pub fn items(&self) -> Vec<NavItem<'_>> {
        self.sections()
            .iter()
            .map(|section| NavItem {
                section,
                is_active: self.is_active(&section.id),
            })
            .collect()
    }

    /// Feed a scroll event at time `now` (seconds). Returns the new state
    /// when the navbar has to re-render.
    pub fn on_scroll(&mut self, viewport: &dyn ViewportObserver, now: f64) -> Option<ScrollState> {
        if let Some(until) = self.suppressed_until {
            if now < until {
                // Keep the offset and the scrolled style current, not the highlight
                let active = self.tracker.active().to_string();
                let scrolled = self.tracker.state().scrolled;
                self.tracker.update(viewport);
                self.tracker.set_active(&active);
                let state = self.tracker.state();
                return (state.scrolled != scrolled).then(|| state.clone());
            }
            self.suppressed_until = None;
        }
        self.tracker.update(viewport)
    }

    /// Mark `id` active immediately and return the scroll that brings it
    /// under the header.
    ///
    /// Unknown sections, or sections that are not laid out yet, return `None`
    /// and leave the state untouched.
    pub fn navigate(
        &mut self,
        id: &str,
        viewport: &dyn ViewportObserver,
        now: f64,
    ) -> Option<SmoothScroll> {
        if !self.sections().contains(id) {
            return None;
        }
        let bounds = viewport.section_bounds(id)?;
        let target = (bounds.top - self.tracker.header_offset()).max(0.0);

        self.tracker.set_active(id);
        if self.suppress_for > 0.0 {
            self.suppressed_until = Some(now + self.suppress_for);
        }
        debug!(section = id, target, "navigating");

        Some(SmoothScroll::new(
            viewport.scroll_offset(),
            target,
            self.scroll_duration,
        ))
    }

    /// Navigate to the section named by a URL fragment such as `#skills`
    pub fn navigate_to_fragment(
        &mut self,
        fragment: &str,
        viewport: &dyn ViewportObserver,
        now: f64,
    ) -> Option<SmoothScroll> {
        let id = self.sections().parse_fragment(fragment)?.to_string();
        self.navigate(&id, viewport, now)
    }
}
