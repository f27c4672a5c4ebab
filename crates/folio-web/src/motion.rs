use folio_core::choreography::{Choreography, Registered};
use folio_core::{Action, AnimationId, Sequencer, SmoothScroll};
use gloo::render::{AnimationFrame, request_animation_frame};
use leptos::prelude::*;
use tracing::debug;

use crate::dom::{self, DomStage, DomViewport};

/// A smooth scroll in flight
struct ScrollRun {
    scroll: SmoothScroll,
    elapsed: f64,
}

/// Everything the frame loop drives
pub struct Motion {
    sequencer: Sequencer,
    registered: Registered,
    stage: DomStage,
    scroll: Option<ScrollRun>,
    frame: Option<AnimationFrame>,
    last_timestamp: Option<f64>,
}

impl Motion {
    /// Advance by the time since the previous frame. Returns true while
    /// anything is still moving.
    fn step(&mut self, timestamp: f64) -> bool {
        let dt = self
            .last_timestamp
            .map(|last| ((timestamp - last) / 1000.0).max(0.0))
            .unwrap_or(0.0);
        self.last_timestamp = Some(timestamp);

        let mut moving = self.sequencer.tick(dt, &mut self.stage);

        if let Some(run) = &mut self.scroll {
            run.elapsed += dt;
            dom::scroll_window_to(run.scroll.offset_at(run.elapsed));
            if run.scroll.is_finished(run.elapsed) {
                self.scroll = None;
            } else {
                moving = true;
            }
        }

        if !moving {
            self.last_timestamp = None;
        }
        moving
    }
}

/// Shared handle to the page's [`Motion`], provided as context.
///
/// The frame loop only runs while something moves; every entry point that can
/// start motion wakes it.
#[derive(Clone, Copy)]
pub struct MotionHandle(StoredValue<Motion, LocalStorage>);

impl MotionHandle {
    pub fn new(choreography: &Choreography) -> Self {
        let mut sequencer = Sequencer::new();
        let registered = choreography.register(&mut sequencer);
        Self(StoredValue::new_local(Motion {
            sequencer,
            registered,
            stage: DomStage::new(),
            scroll: None,
            frame: None,
            last_timestamp: None,
        }))
    }

    /// Write initial states, start the entrance and evaluate scroll triggers
    pub fn mount(self) {
        self.0.update_value(|m| {
            m.sequencer.render_initial(&mut m.stage);
            m.sequencer.mount();
        });
        self.observe();
    }

    /// Re-check scroll triggers against the current layout
    pub fn observe(self) {
        let Some(viewport) = DomViewport::current() else {
            return;
        };
        self.0.try_update_value(|m| m.sequencer.observe(&viewport));
        self.wake();
    }

    /// Drive a registered micro-interaction
    pub fn play(self, pick: impl FnOnce(&Registered) -> Option<AnimationId>, action: Action) {
        self.0.try_update_value(|m| {
            if let Some(id) = pick(&m.registered) {
                m.sequencer.apply(id, action);
            }
        });
        self.wake();
    }

    /// Start a smooth scroll, replacing any scroll in flight
    pub fn scroll(self, scroll: SmoothScroll) {
        debug!(from = scroll.from, to = scroll.to, "smooth scroll");
        self.0.try_update_value(|m| {
            m.scroll = Some(ScrollRun {
                scroll,
                elapsed: 0.0,
            })
        });
        self.wake();
    }

    /// Stop every animation and the frame loop for good
    pub fn shutdown(self) {
        self.0.try_update_value(|m| {
            m.sequencer.kill_all();
            m.scroll = None;
            m.frame = None;
        });
    }

    fn wake(self) {
        let idle = self.0.try_with_value(|m| m.frame.is_none()).unwrap_or(false);
        if idle {
            self.schedule();
        }
    }

    fn schedule(self) {
        let handle = request_animation_frame(move |timestamp| self.on_frame(timestamp));
        self.0.try_update_value(|m| m.frame = Some(handle));
    }

    fn on_frame(self, timestamp: f64) {
        let moving = self
            .0
            .try_update_value(|m| {
                m.frame = None;
                m.step(timestamp)
            })
            .unwrap_or(false);
        if moving {
            self.schedule();
        }
    }
}

pub fn use_motion() -> MotionHandle {
    expect_context::<MotionHandle>()
}
