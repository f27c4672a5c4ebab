use folio_core::choreography::{self, Choreography};
use folio_core::contact::SUBMIT_DELAY;
use folio_core::{
    Action, Anchor, AnimationSpec, ContactForm, Field, NavController, Portfolio, Property, Props,
    RecordingStage, ScrollTracker, Sections, Sequencer, StaticViewport, SubmitRejected,
    ViewportObserver, ViewportTrigger,
};

fn page() -> StaticViewport {
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

fn tracker() -> ScrollTracker {
    ScrollTracker::with_defaults(Sections::portfolio())
}

#[test]
fn test_offsets_inside_one_section_report_it() {
    let mut viewport = page();
    let mut tracker = tracker();

    // Band for a section starting at document top T with height H:
    // T - 100 <= offset + 100 < T - 100 + H
    let cases = [
        (0.0, "hero"),
        (650.0, "hero"),
        (900.0, "about"),
        (1600.0, "projects"),
        (2750.0, "skills"),
        (3800.0, "contact"),
    ];
    for (offset, expected) in cases {
        viewport.scroll_to(offset);
        tracker.update(&viewport);
        assert_eq!(tracker.active(), expected, "offset {}", offset);
    }
}

#[test]
fn test_gaps_keep_previous_section() {
    let mut viewport = StaticViewport::new(800.0);
    viewport.place("hero", 0.0, 900.0);
    viewport.place("about", 1400.0, 800.0);
    let mut tracker = tracker();

    viewport.scroll_to(1000.0);
    tracker.update(&viewport);
    assert_eq!(tracker.active(), "hero");

    viewport.scroll_to(1300.0);
    tracker.update(&viewport);
    assert_eq!(tracker.active(), "about");

    // Past the last laid-out section
    viewport.scroll_to(5000.0);
    assert!(tracker.update(&viewport).is_none());
    assert_eq!(tracker.active(), "about");
}

#[test]
fn test_navigation_marks_section_active_synchronously() {
    let viewport = page();
    let mut nav = NavController::new(tracker());
    for section in ["about", "projects", "skills", "contact", "hero"] {
        assert!(nav.navigate(section, &viewport, 0.0).is_some());
        assert_eq!(nav.active(), section);
    }
}

#[test]
fn test_load_with_skills_fragment() {
    let mut viewport = page();
    let mut nav = NavController::new(tracker());

    let scroll = nav.navigate_to_fragment("#skills", &viewport, 0.0).unwrap();
    assert!(nav.is_active("skills"));

    // Run the smooth scroll to completion, feeding scroll events as it goes
    let mut elapsed = 0.0;
    while !scroll.is_finished(elapsed) {
        elapsed += 1.0 / 60.0;
        viewport.scroll_to(scroll.offset_at(elapsed));
        nav.on_scroll(&viewport, elapsed);
    }

    assert_eq!(viewport.scroll_offset(), scroll.to);
    assert_eq!(nav.active(), "skills");
    let highlighted: Vec<_> = nav
        .items()
        .into_iter()
        .filter(|item| item.is_active)
        .map(|item| item.section.label.clone())
        .collect();
    assert_eq!(highlighted, vec!["Skills".to_string()]);
}

#[test]
fn test_viewport_enter_animation_is_idempotent() {
    let run = |enter_twice: bool| {
        let mut viewport = page();
        let mut stage = RecordingStage::new();
        let mut sequencer = Sequencer::new();
        let trigger = ViewportTrigger::new("about", Anchor::top(0.7)).end(Anchor::bottom(0.3));
        sequencer.add(
            AnimationSpec::from_to(
                ["about-text"],
                Props::new().with(Property::X, 100.0).with(Property::Opacity, 0.0),
                Props::new().with(Property::X, 0.0).with(Property::Opacity, 1.0),
            )
            .duration(1.0)
            .trigger(trigger.into()),
        );
        sequencer.mount();
        sequencer.render_initial(&mut stage);

        viewport.scroll_to(600.0);
        sequencer.observe(&viewport);
        sequencer.tick(0.4, &mut stage);
        if enter_twice {
            // Still inside the band: no new crossing
            viewport.scroll_to(650.0);
            sequencer.observe(&viewport);
        }
        sequencer.tick(2.0, &mut stage);
        stage.get("about-text").cloned()
    };

    let once = run(false).unwrap();
    assert_eq!(once.get(Property::Opacity), Some(1.0));
    assert_eq!(run(true), Some(once));
}

#[test]
fn test_contact_submit_cycle() {
    let mut form = ContactForm::new();
    form.set(Field::Name, "Grace");
    form.set(Field::Email, "grace@example.com");
    form.set(Field::Subject, "Project");
    form.set(Field::Message, "Hello there");

    let ticket = form.begin_submit().unwrap();
    assert!(form.is_submitting());
    assert!(!form.can_submit());
    assert_eq!(SUBMIT_DELAY.as_secs(), 2);

    form.finish_submit(ticket);
    assert!(!form.is_submitting());
    for field in Field::ALL {
        assert_eq!(form.get(field), "");
    }
}

#[test]
fn test_empty_message_never_submits() {
    let mut form = ContactForm::new();
    form.set(Field::Name, "Grace");
    form.set(Field::Email, "grace@example.com");
    form.set(Field::Subject, "Project");

    assert_eq!(
        form.begin_submit().unwrap_err(),
        SubmitRejected::MissingFields(vec![Field::Message])
    );
    assert!(!form.is_submitting());
}

#[test]
fn test_full_page_choreography() {
    let portfolio = Portfolio::builtin().unwrap();
    let choreography = Choreography::for_portfolio(&portfolio);
    let mut sequencer = Sequencer::new();
    let registered = choreography.register(&mut sequencer);
    let mut stage = RecordingStage::new();
    let mut viewport = page();

    sequencer.render_initial(&mut stage);
    let title = stage.get(choreography::HERO_TITLE).unwrap();
    assert_eq!(title.get(Property::Opacity), Some(0.0));
    // Manual micro-interactions stay untouched until used
    assert!(stage.get(&choreography::project_card_body(0)).is_none());

    sequencer.mount();
    sequencer.tick(2.0, &mut stage);
    let title = stage.get(choreography::HERO_TITLE).unwrap();
    assert_eq!(title.get(Property::Opacity), Some(1.0));
    assert_eq!(title.get(Property::Y), Some(0.0));
    // The float keeps the hero moving
    assert!(sequencer.is_animating());

    viewport.scroll_to(600.0);
    sequencer.observe(&viewport);
    sequencer.tick(1.5, &mut stage);
    let text = stage.get(choreography::ABOUT_TEXT).unwrap();
    assert_eq!(text.get(Property::X), Some(0.0));

    sequencer.apply(registered.project_hover[2], Action::Play);
    sequencer.tick(0.3, &mut stage);
    let body = stage.get(&choreography::project_card_body(2)).unwrap();
    assert!((body.get(Property::Y).unwrap() + 10.0).abs() < 1e-9);

    sequencer.kill_all();
    let writes = stage.writes();
    sequencer.tick(1.0, &mut stage);
    assert_eq!(stage.writes(), writes);
}
