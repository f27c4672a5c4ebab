use std::fmt;
use std::str::FromStr;

use crate::animation::TargetId;
use crate::viewport::Rect;

/// When an animation starts playing
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// As soon as the page mounts
    OnMount,
    /// When an element scrolls into a band of the viewport
    OnViewportEnter(ViewportTrigger),
    /// Only through explicit actions (hover, focus, submit feedback)
    Manual,
}

/// Element edge measured against a viewport line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
}

impl Edge {
    fn of(self, rect: Rect) -> f64 {
        match self {
            Edge::Top => rect.top,
            Edge::Bottom => rect.bottom,
        }
    }
}

/// A line `viewport_fraction` of the way down the viewport that an element
/// edge has to reach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub edge: Edge,
    pub viewport_fraction: f64,
}

impl Anchor {
    pub fn top(viewport_fraction: f64) -> Self {
        Self {
            edge: Edge::Top,
            viewport_fraction,
        }
    }

    pub fn bottom(viewport_fraction: f64) -> Self {
        Self {
            edge: Edge::Bottom,
            viewport_fraction,
        }
    }

    /// True once the element edge has scrolled up to or past the line
    fn reached(&self, rect: Rect, viewport_height: f64) -> bool {
        self.edge.of(rect) <= self.viewport_fraction * viewport_height
    }
}

/// What a playhead does in response to a trigger callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Play,
    Pause,
    Resume,
    Reverse,
    Restart,
    Reset,
    Complete,
    None,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Play => write!(f, "play"),
            Action::Pause => write!(f, "pause"),
            Action::Resume => write!(f, "resume"),
            Action::Reverse => write!(f, "reverse"),
            Action::Restart => write!(f, "restart"),
            Action::Reset => write!(f, "reset"),
            Action::Complete => write!(f, "complete"),
            Action::None => write!(f, "none"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "play" => Ok(Action::Play),
            "pause" => Ok(Action::Pause),
            "resume" => Ok(Action::Resume),
            "reverse" => Ok(Action::Reverse),
            "restart" => Ok(Action::Restart),
            "reset" => Ok(Action::Reset),
            "complete" => Ok(Action::Complete),
            "none" => Ok(Action::None),
            _ => Err(format!(
                "Invalid action: {}. Use play, pause, resume, reverse, restart, reset, complete or none",
                s
            )),
        }
    }
}

/// Actions for the four ways an element can cross its trigger band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleActions {
    pub on_enter: Action,
    pub on_leave: Action,
    pub on_enter_back: Action,
    pub on_leave_back: Action,
}

impl ToggleActions {
    /// Play forward on enter, play backward when scrolled back above the start
    pub const TOGGLE: ToggleActions = ToggleActions {
        on_enter: Action::Play,
        on_leave: Action::None,
        on_enter_back: Action::None,
        on_leave_back: Action::Reverse,
    };

    /// Play once and hold the final state
    pub const PLAY_ONCE: ToggleActions = ToggleActions {
        on_enter: Action::Play,
        on_leave: Action::None,
        on_enter_back: Action::None,
        on_leave_back: Action::None,
    };

    pub fn for_crossing(&self, crossing: Crossing) -> Action {
        match crossing {
            Crossing::Enter => self.on_enter,
            Crossing::Leave => self.on_leave,
            Crossing::EnterBack => self.on_enter_back,
            Crossing::LeaveBack => self.on_leave_back,
        }
    }
}

impl Default for ToggleActions {
    fn default() -> Self {
        Self::TOGGLE
    }
}

impl fmt::Display for ToggleActions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.on_enter, self.on_leave, self.on_enter_back, self.on_leave_back
        )
    }
}

impl FromStr for ToggleActions {
    type Err = String;

    /// Parse the four-word form, e.g. `"play none none reverse"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let words: Vec<&str> = s.split_whitespace().collect();
        let [on_enter, on_leave, on_enter_back, on_leave_back] = words.as_slice() else {
            return Err(format!(
                "Invalid toggle actions: {:?}. Expected four actions (enter, leave, enter-back, leave-back)",
                s
            ));
        };
        Ok(Self {
            on_enter: on_enter.parse()?,
            on_leave: on_leave.parse()?,
            on_enter_back: on_enter_back.parse()?,
            on_leave_back: on_leave_back.parse()?,
        })
    }
}

/// Where an element sits relative to its trigger band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// Start line not reached yet
    Before,
    Active,
    /// End line passed
    After,
}

/// A band boundary crossed between two observations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Enter,
    Leave,
    EnterBack,
    LeaveBack,
}

impl Region {
    /// Boundaries crossed moving from `self` to `next`, in the order a
    /// continuous scroll would cross them
    pub fn crossings(self, next: Region) -> &'static [Crossing] {
        match (self, next) {
            (Region::Before, Region::Active) => &[Crossing::Enter],
            (Region::Active, Region::After) => &[Crossing::Leave],
            (Region::After, Region::Active) => &[Crossing::EnterBack],
            (Region::Active, Region::Before) => &[Crossing::LeaveBack],
            (Region::Before, Region::After) => &[Crossing::Enter, Crossing::Leave],
            (Region::After, Region::Before) => &[Crossing::EnterBack, Crossing::LeaveBack],
            _ => &[],
        }
    }
}

/// Fires when the trigger element's start edge reaches the start line and
/// stops when its end edge passes the end line.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportTrigger {
    pub trigger: TargetId,
    pub start: Anchor,
    pub end: Option<Anchor>,
    pub actions: ToggleActions,
}

impl ViewportTrigger {
    pub fn new(trigger: impl Into<TargetId>, start: Anchor) -> Self {
        Self {
            trigger: trigger.into(),
            start,
            end: None,
            actions: ToggleActions::default(),
        }
    }

    pub fn end(mut self, end: Anchor) -> Self {
        self.end = Some(end);
        self
    }

    pub fn actions(mut self, actions: ToggleActions) -> Self {
        self.actions = actions;
        self
    }

    /// Region of the trigger element for a given bounding rect.
    ///
    /// Without an end anchor the band ends once the element's bottom leaves
    /// the top of the viewport.
    pub fn region(&self, rect: Rect, viewport_height: f64) -> Region {
        if !self.start.reached(rect, viewport_height) {
            return Region::Before;
        }
        let end = self.end.unwrap_or(Anchor::bottom(0.0));
        let line = end.viewport_fraction * viewport_height;
        if end.edge.of(rect) < line {
            Region::After
        } else {
            Region::Active
        }
    }
}

impl From<ViewportTrigger> for Trigger {
    fn from(trigger: ViewportTrigger) -> Self {
        Trigger::OnViewportEnter(trigger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal() -> ViewportTrigger {
        ViewportTrigger::new("about", Anchor::top(0.7)).end(Anchor::bottom(0.3))
    }

    #[test]
    fn test_region_bands() {
        let trigger = reveal();
        let vh = 1000.0;
        // top at 800 > 700: not yet
        assert_eq!(trigger.region(Rect { top: 800.0, bottom: 1600.0 }, vh), Region::Before);
        assert_eq!(trigger.region(Rect { top: 700.0, bottom: 1500.0 }, vh), Region::Active);
        assert_eq!(trigger.region(Rect { top: -500.0, bottom: 300.0 }, vh), Region::Active);
        assert_eq!(trigger.region(Rect { top: -600.0, bottom: 299.0 }, vh), Region::After);
    }

    #[test]
    fn test_region_without_end_uses_viewport_top() {
        let trigger = ViewportTrigger::new("bar", Anchor::top(0.85));
        let vh = 1000.0;
        assert_eq!(trigger.region(Rect { top: 900.0, bottom: 920.0 }, vh), Region::Before);
        assert_eq!(trigger.region(Rect { top: 10.0, bottom: 30.0 }, vh), Region::Active);
        assert_eq!(trigger.region(Rect { top: -40.0, bottom: -20.0 }, vh), Region::After);
    }

    #[test]
    fn test_crossings_for_jumps() {
        assert_eq!(Region::Before.crossings(Region::After), &[Crossing::Enter, Crossing::Leave]);
        assert_eq!(
            Region::After.crossings(Region::Before),
            &[Crossing::EnterBack, Crossing::LeaveBack]
        );
        assert!(Region::Active.crossings(Region::Active).is_empty());
    }

    #[test]
    fn test_toggle_actions_parse() {
        let actions: ToggleActions = "play none none reverse".parse().unwrap();
        assert_eq!(actions, ToggleActions::TOGGLE);
        assert_eq!(actions.to_string(), "play none none reverse");
        assert_eq!(actions.for_crossing(Crossing::LeaveBack), Action::Reverse);

        let once: ToggleActions = "PLAY none none none".parse().unwrap();
        assert_eq!(once, ToggleActions::PLAY_ONCE);
    }

    #[test]
    fn test_toggle_actions_parse_errors() {
        assert!("play none".parse::<ToggleActions>().is_err());
        assert!("play none none rewind".parse::<ToggleActions>().is_err());
    }
}
