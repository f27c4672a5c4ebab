use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::ease::Ease;
use crate::trigger::Trigger;

/// Element id of an animated node
pub type TargetId = String;

/// Property values per target at one instant
pub type Frame = BTreeMap<TargetId, Props>;

/// Duration a spec gets when none is given, in seconds
pub const DEFAULT_DURATION: f64 = 0.5;

/// Visual properties the sequencer can drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Property {
    /// Horizontal offset in pixels
    X,
    /// Vertical offset in pixels
    Y,
    Opacity,
    Scale,
    /// Width as a percentage of the parent
    Width,
}

impl Property {
    /// Value the property has when nothing animates it
    pub fn rest_value(self) -> f64 {
        match self {
            Property::X | Property::Y => 0.0,
            Property::Opacity | Property::Scale => 1.0,
            Property::Width => 100.0,
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Property::X => write!(f, "x"),
            Property::Y => write!(f, "y"),
            Property::Opacity => write!(f, "opacity"),
            Property::Scale => write!(f, "scale"),
            Property::Width => write!(f, "width"),
        }
    }
}

/// A set of property values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Props(BTreeMap<Property, f64>);

impl Props {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, property: Property, value: f64) -> Self {
        self.0.insert(property, value);
        self
    }

    pub fn set(&mut self, property: Property, value: f64) {
        self.0.insert(property, value);
    }

    pub fn get(&self, property: Property) -> Option<f64> {
        self.0.get(&property).copied()
    }

    pub fn contains(&self, property: Property) -> bool {
        self.0.contains_key(&property)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Property, f64)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrite with every value from `other`
    pub fn merge(&mut self, other: &Props) {
        for (property, value) in other.iter() {
            self.0.insert(property, value);
        }
    }

    /// Values between `from` and `to` at eased progress `t`.
    ///
    /// Only properties named in `to` are produced; a property missing from
    /// `from` starts at its rest value.
    pub fn interpolate(from: &Props, to: &Props, t: f64) -> Props {
        let mut out = Props::new();
        for (property, end) in to.iter() {
            let start = from.get(property).unwrap_or_else(|| property.rest_value());
            out.set(property, start + (end - start) * t);
        }
        out
    }
}

/// How often a tween plays after its first run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Repeat {
    /// Extra plays after the first, `None` for forever
    pub count: Option<u32>,
    /// Alternate direction on every other play
    pub yoyo: bool,
}

impl Repeat {
    pub fn times(count: u32, yoyo: bool) -> Self {
        Self {
            count: Some(count),
            yoyo,
        }
    }

    pub fn forever(yoyo: bool) -> Self {
        Self { count: None, yoyo }
    }

    fn plays(&self) -> Option<u32> {
        self.count.map(|c| c.saturating_add(1))
    }
}

/// Declarative description of one entrance transition
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSpec {
    pub targets: Vec<TargetId>,
    pub from: Props,
    pub to: Props,
    pub duration: f64,
    pub ease: Ease,
    pub stagger: Option<f64>,
    pub repeat: Option<Repeat>,
    pub trigger: Trigger,
}

impl AnimationSpec {
    pub fn from_to<I, S>(targets: I, from: Props, to: Props) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<TargetId>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
            from,
            to,
            duration: DEFAULT_DURATION,
            ease: Ease::default(),
            stagger: None,
            repeat: None,
            trigger: Trigger::OnMount,
        }
    }

    pub fn duration(mut self, seconds: f64) -> Self {
        self.duration = seconds.max(0.0);
        self
    }

    pub fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn stagger(mut self, seconds: f64) -> Self {
        self.stagger = Some(seconds.max(0.0));
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = Some(repeat);
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = trigger;
        self
    }

    /// Time from the spec's start until its last target finishes, `None` when
    /// it repeats forever
    pub fn span(&self) -> Option<f64> {
        let plays = match self.repeat.as_ref() {
            Some(repeat) => repeat.plays()?,
            None => 1,
        };
        let last = self.stagger_offset(self.targets.len().saturating_sub(1));
        Some(last + self.duration * f64::from(plays))
    }

    fn stagger_offset(&self, index: usize) -> f64 {
        self.stagger.unwrap_or(0.0) * index as f64
    }
}

/// Where a spec lands on a timeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// After everything already on the timeline
    End,
    /// This many seconds before the timeline's current end (`-=s`)
    Overlap(f64),
    /// Together with the previously added spec
    WithPrevious,
    /// Absolute time from the timeline origin
    At(f64),
}

/// One target's resolved transition
#[derive(Debug, Clone, PartialEq)]
struct Tween {
    target: TargetId,
    from: Props,
    to: Props,
    start: f64,
    duration: f64,
    ease: Ease,
    repeat: Option<Repeat>,
}

impl Tween {
    /// Eased progress at `local` seconds after the tween's start
    fn progress(&self, local: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.ease.apply(1.0);
        }

        let plays = match self.repeat.as_ref() {
            Some(repeat) => repeat.plays(),
            None => Some(1),
        };
        let mut cycle = (local / self.duration).floor();
        let mut within = local - cycle * self.duration;
        if let Some(plays) = plays {
            let last = f64::from(plays) - 1.0;
            if cycle > last {
                cycle = last;
                within = self.duration;
            }
        }

        let mut linear = within / self.duration;
        if self.repeat.is_some_and(|r| r.yoyo) && cycle as u64 % 2 == 1 {
            linear = 1.0 - linear;
        }
        self.ease.apply(linear)
    }

    fn value_at(&self, local: f64) -> Props {
        Props::interpolate(&self.from, &self.to, self.progress(local))
    }
}

/// Specs laid out on a shared time origin.
///
/// Sampling is a pure function of elapsed time, so a timeline can be
/// previewed or tested without a clock.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Timeline {
    tweens: Vec<Tween>,
    starts: Vec<f64>,
    end: f64,
    infinite: bool,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Timeline holding a single spec at its origin
    pub fn single(spec: AnimationSpec) -> Self {
        Self::new().then(spec, Position::End)
    }

    /// Builder form of [`Timeline::push`]
    pub fn then(mut self, spec: AnimationSpec, position: Position) -> Self {
        self.push(spec, position);
        self
    }

    /// Add a spec and return its resolved start time
    pub fn push(&mut self, spec: AnimationSpec, position: Position) -> f64 {
        let start = match position {
            Position::End => self.end,
            Position::Overlap(seconds) => (self.end - seconds).max(0.0),
            Position::WithPrevious => self.starts.last().copied().unwrap_or(0.0),
            Position::At(seconds) => seconds.max(0.0),
        };

        for (index, target) in spec.targets.iter().enumerate() {
            let tween = Tween {
                target: target.clone(),
                from: spec.from.clone(),
                to: spec.to.clone(),
                start: start + spec.stagger_offset(index),
                duration: spec.duration,
                ease: spec.ease,
                repeat: spec.repeat,
            };
            // Keep tweens ordered by start so later starters override
            let at = self.tweens.partition_point(|t| t.start <= tween.start);
            self.tweens.insert(at, tween);
        }

        match spec.span() {
            Some(span) => self.end = self.end.max(start + span),
            None => {
                self.infinite = true;
                let first_pass = spec.stagger_offset(spec.targets.len().saturating_sub(1)) + spec.duration;
                self.end = self.end.max(start + first_pass);
            }
        }
        self.starts.push(start);
        start
    }

    /// Resolved start of every pushed spec, in push order
    pub fn starts(&self) -> &[f64] {
        &self.starts
    }

    /// Total length, `None` when something repeats forever
    pub fn duration(&self) -> Option<f64> {
        if self.infinite { None } else { Some(self.end) }
    }

    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }

    pub fn targets(&self) -> BTreeSet<&str> {
        self.tweens.iter().map(|t| t.target.as_str()).collect()
    }

    /// Property values per target at `elapsed` seconds from the origin
    pub fn sample(&self, elapsed: f64) -> Frame {
        let mut frame = Frame::new();
        for tween in &self.tweens {
            let values = frame.entry(tween.target.clone()).or_default();
            if elapsed >= tween.start {
                values.merge(&tween.value_at(elapsed - tween.start));
            } else {
                // Not started yet: hold the from state unless an earlier tween owns it
                for (property, value) in tween.from.iter() {
                    if !values.contains(property) {
                        values.set(property, value);
                    }
                }
            }
        }
        frame.retain(|_, props| !props.is_empty());
        frame
    }
}
