//! Browser-independent core of the folio portfolio site.
//!
//! Layout is read through [`viewport::ViewportObserver`] and animated values
//! are written through [`sequencer::Stage`], so everything here runs the same
//! under the browser front end, the CLI preview and plain unit tests.

pub mod animation;
pub mod choreography;
pub mod contact;
pub mod content;
pub mod ease;
pub mod nav;
pub mod scroll;
pub mod section;
pub mod sequencer;
pub mod trigger;
pub mod viewport;

pub use animation::{AnimationSpec, Frame, Position, Property, Props, Repeat, Timeline};
pub use choreography::Choreography;
pub use contact::{ContactForm, Field, SubmitRejected, SubmitTicket};
pub use content::Portfolio;
pub use ease::Ease;
pub use nav::{NavController, SmoothScroll};
pub use scroll::{ScrollState, ScrollTracker};
pub use section::{Section, Sections};
pub use sequencer::{AnimationId, RecordingStage, Sequencer, Stage};
pub use trigger::{Action, Anchor, ToggleActions, Trigger, ViewportTrigger};
pub use viewport::{Bounds, Rect, StaticViewport, ViewportObserver};
