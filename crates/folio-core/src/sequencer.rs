use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

use crate::animation::{AnimationSpec, Props, Timeline};
use crate::trigger::{Action, Region, Trigger};
use crate::viewport::ViewportObserver;

/// Write side of the rendering surface.
pub trait Stage {
    /// Write property values to a target.
    ///
    /// Returns false when the target does not exist; callers treat that as a
    /// silent no-op.
    fn apply(&mut self, target: &str, props: &Props) -> bool;
}

/// In-memory stage that keeps the latest value of every property it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingStage {
    values: BTreeMap<String, Props>,
    mounted: Option<BTreeSet<String>>,
    writes: usize,
}

impl RecordingStage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage that only knows about the given targets; writes elsewhere are dropped
    pub fn with_targets<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            mounted: Some(targets.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn get(&self, target: &str) -> Option<&Props> {
        self.values.get(target)
    }

    pub fn values(&self) -> &BTreeMap<String, Props> {
        &self.values
    }

    /// Number of accepted writes
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl Stage for RecordingStage {
    fn apply(&mut self, target: &str, props: &Props) -> bool {
        if let Some(mounted) = &self.mounted {
            if !mounted.contains(target) {
                return false;
            }
        }
        self.values.entry(target.to_string()).or_default().merge(props);
        self.writes += 1;
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Motion {
    Idle,
    Forward,
    Backward,
}

/// Position and direction of one timeline's playback
#[derive(Debug, Clone, PartialEq)]
pub struct Playhead {
    time: f64,
    motion: Motion,
    reversed: bool,
}

impl Default for Playhead {
    fn default() -> Self {
        Self {
            time: 0.0,
            motion: Motion::Idle,
            reversed: false,
        }
    }
}

impl Playhead {
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn is_moving(&self) -> bool {
        self.motion != Motion::Idle
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Apply a trigger action. Returns true when the rendered state may have
    /// changed and needs a write.
    pub fn apply(&mut self, action: Action, duration: Option<f64>) -> bool {
        let before = self.clone();
        match action {
            Action::Play => {
                self.reversed = false;
                self.motion = Motion::Forward;
            }
            Action::Reverse => {
                self.reversed = true;
                self.motion = Motion::Backward;
            }
            Action::Pause => self.motion = Motion::Idle,
            Action::Resume => {
                self.motion = if self.reversed {
                    Motion::Backward
                } else {
                    Motion::Forward
                };
            }
            Action::Restart => {
                self.reversed = false;
                self.time = 0.0;
                self.motion = Motion::Forward;
            }
            Action::Reset => {
                self.reversed = false;
                self.time = 0.0;
                self.motion = Motion::Idle;
            }
            Action::Complete => {
                if let Some(end) = duration {
                    self.time = end;
                }
                self.motion = Motion::Idle;
            }
            Action::None => {}
        }
        self.settle(duration);
        *self != before
    }

    /// Advance by `dt` seconds. Returns true while the playhead moved.
    pub fn tick(&mut self, dt: f64, duration: Option<f64>) -> bool {
        let before = self.time;
        match self.motion {
            Motion::Idle => return false,
            Motion::Forward => self.time += dt.max(0.0),
            Motion::Backward => self.time -= dt.max(0.0),
        }
        self.settle(duration);
        self.time != before || self.is_moving()
    }

    /// Clamp to the timeline and stop at either end
    fn settle(&mut self, duration: Option<f64>) {
        if self.time <= 0.0 && self.motion == Motion::Backward {
            self.time = 0.0;
            self.motion = Motion::Idle;
        }
        if let Some(end) = duration {
            if self.time >= end && self.motion == Motion::Forward {
                self.time = end;
                self.motion = Motion::Idle;
            }
            self.time = self.time.clamp(0.0, end);
        }
        self.time = self.time.max(0.0);
    }
}

/// Handle to a registered animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationId(usize);

#[derive(Debug)]
struct Entry {
    timeline: Timeline,
    trigger: Trigger,
    region: Region,
    playhead: Playhead,
    cancelled: bool,
    dirty: bool,
}

impl Entry {
    fn apply(&mut self, action: Action) {
        if self.playhead.apply(action, self.timeline.duration()) {
            self.dirty = true;
        }
    }
}

/// Plays registered timelines in response to mount, scroll and explicit
/// actions, and writes their frames to a [`Stage`].
#[derive(Debug, Default)]
pub struct Sequencer {
    entries: Vec<Entry>,
    mounted: bool,
}

impl Sequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single spec under its own trigger
    pub fn add(&mut self, spec: AnimationSpec) -> AnimationId {
        let trigger = spec.trigger.clone();
        self.register(Timeline::single(spec), trigger)
    }

    /// Register a timeline. Every spec on it follows the timeline's trigger.
    pub fn register(&mut self, timeline: Timeline, trigger: Trigger) -> AnimationId {
        let id = AnimationId(self.entries.len());
        let mut entry = Entry {
            timeline,
            trigger,
            region: Region::Before,
            playhead: Playhead::default(),
            cancelled: false,
            dirty: true,
        };
        if self.mounted && entry.trigger == Trigger::OnMount {
            entry.apply(Action::Play);
        }
        self.entries.push(entry);
        id
    }

    /// Start every on-mount entry, in registration order
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        for entry in self.entries.iter_mut().filter(|e| !e.cancelled) {
            if entry.trigger == Trigger::OnMount {
                entry.apply(Action::Play);
            }
        }
    }

    /// Re-evaluate every viewport trigger against the current layout
    pub fn observe(&mut self, viewport: &dyn ViewportObserver) {
        let viewport_height = viewport.viewport_height();
        for (index, entry) in self.entries.iter_mut().enumerate() {
            if entry.cancelled {
                continue;
            }
            let Trigger::OnViewportEnter(trigger) = &entry.trigger else {
                continue;
            };
            let Some(rect) = viewport.target_rect(&trigger.trigger) else {
                trace!(target_id = %trigger.trigger, "trigger element not mounted");
                continue;
            };

            let region = trigger.region(rect, viewport_height);
            if region == entry.region {
                continue;
            }
            let actions: Vec<Action> = entry
                .region
                .crossings(region)
                .iter()
                .map(|crossing| trigger.actions.for_crossing(*crossing))
                .collect();
            debug!(entry = index, from = ?entry.region, to = ?region, ?actions, "trigger crossed");
            entry.region = region;
            for action in actions {
                entry.apply(action);
            }
        }
    }

    /// Apply an action directly, e.g. from a hover or submit handler
    pub fn apply(&mut self, id: AnimationId, action: Action) {
        if let Some(entry) = self.entries.get_mut(id.0).filter(|e| !e.cancelled) {
            entry.apply(action);
        }
    }

    /// Advance every live playhead by `dt` seconds and write changed frames.
    ///
    /// Returns true while anything is still moving.
    pub fn tick(&mut self, dt: f64, stage: &mut dyn Stage) -> bool {
        let mut moving = false;
        for entry in self.entries.iter_mut().filter(|e| !e.cancelled) {
            let advanced = entry.playhead.tick(dt, entry.timeline.duration());
            if advanced || entry.dirty {
                write_frame(entry, stage);
            }
            moving |= entry.playhead.is_moving();
        }
        moving
    }

    /// Write the current frame of every mount and scroll entry, so initial
    /// states are visible before any trigger fires
    pub fn render_initial(&mut self, stage: &mut dyn Stage) {
        for entry in self.entries.iter_mut().filter(|e| !e.cancelled) {
            if entry.trigger != Trigger::Manual {
                write_frame(entry, stage);
            }
        }
    }

    pub fn is_animating(&self) -> bool {
        self.entries
            .iter()
            .any(|e| !e.cancelled && (e.playhead.is_moving() || e.dirty))
    }

    /// Stop an animation for good; it will never write again
    pub fn cancel(&mut self, id: AnimationId) {
        if let Some(entry) = self.entries.get_mut(id.0) {
            entry.cancelled = true;
        }
    }

    /// Cancel everything, used on teardown
    pub fn kill_all(&mut self) {
        debug!(count = self.entries.len(), "killing all animations");
        for entry in &mut self.entries {
            entry.cancelled = true;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn region(&self, id: AnimationId) -> Option<Region> {
        self.entries.get(id.0).map(|e| e.region)
    }

    pub fn playhead(&self, id: AnimationId) -> Option<&Playhead> {
        self.entries.get(id.0).map(|e| &e.playhead)
    }

    pub fn is_cancelled(&self, id: AnimationId) -> bool {
        self.entries.get(id.0).is_none_or(|e| e.cancelled)
    }
}

fn write_frame(entry: &mut Entry, stage: &mut dyn Stage) {
    let frame = entry.timeline.sample(entry.playhead.time());
    for (target, props) in &frame {
        if !stage.apply(target, props) {
            trace!(target_id = %target, "skipping write to missing target");
        }
    }
    entry.dirty = false;
}
