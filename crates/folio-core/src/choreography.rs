//! The site's motion design, expressed as timelines over stable element ids.
//!
//! Both the browser front end and the CLI preview build their animations
//! from here, so the ids below are the contract with the markup.

use crate::animation::{AnimationSpec, Position, Property, Props, Repeat, Timeline};
use crate::contact::Field;
use crate::content::Portfolio;
use crate::ease::Ease;
use crate::sequencer::{AnimationId, Sequencer};
use crate::trigger::{Anchor, ToggleActions, Trigger, ViewportTrigger};

pub const HERO_TITLE: &str = "hero-title";
pub const HERO_SUBTITLE: &str = "hero-subtitle";
pub const HERO_CTA: &str = "hero-cta";
pub const HERO_IMAGE: &str = "hero-image";
pub const ABOUT_IMAGE: &str = "about-image";
pub const ABOUT_TEXT: &str = "about-text";
pub const PROJECTS_HEADING: &str = "projects-heading";
pub const SKILLS_HEADING: &str = "skills-heading";
pub const CONTACT_FORM: &str = "contact-form";

pub fn project_card(index: usize) -> String {
    format!("project-card-{}", index)
}

/// Inner card that lifts on hover, separate from the entrance target
pub fn project_card_body(index: usize) -> String {
    format!("project-card-body-{}", index)
}

pub fn skill_card(index: usize) -> String {
    format!("skill-card-{}", index)
}

pub fn skill_bar(index: usize) -> String {
    format!("skill-bar-{}", index)
}

pub fn contact_input(field: Field) -> String {
    format!("contact-{}", field.key())
}

fn hidden_below(y: f64) -> Props {
    Props::new().with(Property::Y, y).with(Property::Opacity, 0.0)
}

fn shown() -> Props {
    Props::new().with(Property::Y, 0.0).with(Property::Opacity, 1.0)
}

/// Ids returned by [`Choreography::register`]
#[derive(Debug, Clone)]
pub struct Registered {
    pub hero: AnimationId,
    pub reveals: Vec<(String, AnimationId)>,
    pub project_hover: Vec<AnimationId>,
    pub input_focus: Vec<(Field, AnimationId)>,
    pub success_pulse: AnimationId,
}

impl Registered {
    pub fn focus(&self, field: Field) -> Option<AnimationId> {
        self.input_focus
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, id)| *id)
    }
}

/// Every animation on the page
#[derive(Debug, Clone)]
pub struct Choreography {
    hero: Timeline,
    reveals: Vec<(String, Timeline, Trigger)>,
    project_hover: Vec<AnimationSpec>,
    input_focus: Vec<(Field, AnimationSpec)>,
    success_pulse: AnimationSpec,
}

impl Choreography {
    pub fn for_portfolio(portfolio: &Portfolio) -> Self {
        let actions = portfolio.motion.reveal_actions();
        let project_count = portfolio.projects.len();
        let skill_levels: Vec<u8> = portfolio.skills.all().map(|s| s.level).collect();

        let mut reveals = Vec::new();

        for heading in [PROJECTS_HEADING, SKILLS_HEADING] {
            let spec = AnimationSpec::from_to([heading], hidden_below(50.0), shown()).duration(1.0);
            let trigger = ViewportTrigger::new(heading, Anchor::top(0.8))
                .end(Anchor::bottom(0.2))
                .actions(actions);
            reveals.push((heading.to_string(), Timeline::single(spec), trigger.into()));
        }

        // Image and text slide in from opposite sides
        let about = Timeline::new()
            .then(
                AnimationSpec::from_to(
                    [ABOUT_IMAGE],
                    Props::new().with(Property::X, -100.0).with(Property::Opacity, 0.0),
                    Props::new().with(Property::X, 0.0).with(Property::Opacity, 1.0),
                )
                .duration(1.0)
                .ease(Ease::POWER3_OUT),
                Position::End,
            )
            .then(
                AnimationSpec::from_to(
                    [ABOUT_TEXT],
                    Props::new().with(Property::X, 100.0).with(Property::Opacity, 0.0),
                    Props::new().with(Property::X, 0.0).with(Property::Opacity, 1.0),
                )
                .duration(1.0)
                .ease(Ease::POWER3_OUT),
                Position::WithPrevious,
            );
        reveals.push(("about".to_string(), about, section_reveal("about", actions)));

        let cards = AnimationSpec::from_to(
            (0..project_count).map(project_card),
            hidden_below(80.0).with(Property::Scale, 0.9),
            shown().with(Property::Scale, 1.0),
        )
        .duration(0.8)
        .stagger(0.15)
        .ease(Ease::POWER3_OUT);
        reveals.push((
            "projects".to_string(),
            Timeline::single(cards),
            section_reveal("projects", actions),
        ));

        let skill_cards = AnimationSpec::from_to(
            (0..skill_levels.len()).map(skill_card),
            hidden_below(60.0).with(Property::Scale, 0.9),
            shown().with(Property::Scale, 1.0),
        )
        .duration(0.8)
        .stagger(0.1)
        .ease(Ease::POWER3_OUT);
        reveals.push((
            "skills".to_string(),
            Timeline::single(skill_cards),
            section_reveal("skills", actions),
        ));

        // Each bar fills to its level when the bar itself comes into view
        for (index, level) in skill_levels.iter().enumerate() {
            let bar = skill_bar(index);
            let spec = AnimationSpec::from_to(
                [bar.clone()],
                Props::new().with(Property::Width, 0.0),
                Props::new().with(Property::Width, f64::from(*level)),
            )
            .duration(1.5)
            .ease(Ease::POWER2_OUT);
            let trigger = ViewportTrigger::new(bar.clone(), Anchor::top(0.85)).actions(actions);
            reveals.push((bar, Timeline::single(spec), trigger.into()));
        }

        let form = AnimationSpec::from_to([CONTACT_FORM], hidden_below(80.0), shown())
            .duration(1.0)
            .ease(Ease::POWER3_OUT);
        reveals.push((
            "contact".to_string(),
            Timeline::single(form),
            section_reveal("contact", actions),
        ));

        let project_hover = (0..project_count)
            .map(|index| {
                AnimationSpec::from_to(
                    [project_card_body(index)],
                    Props::new().with(Property::Y, 0.0).with(Property::Scale, 1.0),
                    Props::new().with(Property::Y, -10.0).with(Property::Scale, 1.02),
                )
                .duration(0.3)
                .ease(Ease::POWER2_OUT)
                .trigger(Trigger::Manual)
            })
            .collect();

        let input_focus = Field::ALL
            .into_iter()
            .map(|field| {
                let spec = AnimationSpec::from_to(
                    [contact_input(field)],
                    Props::new().with(Property::Scale, 1.0),
                    Props::new().with(Property::Scale, 1.02),
                )
                .duration(0.2)
                .ease(Ease::POWER2_OUT)
                .trigger(Trigger::Manual);
                (field, spec)
            })
            .collect();

        let success_pulse = AnimationSpec::from_to(
            [CONTACT_FORM],
            Props::new().with(Property::Scale, 1.0),
            Props::new().with(Property::Scale, 1.05),
        )
        .duration(0.2)
        .ease(Ease::POWER2_IN_OUT)
        .repeat(Repeat::times(1, true))
        .trigger(Trigger::Manual);

        Self {
            hero: hero_timeline(),
            reveals,
            project_hover,
            input_focus,
            success_pulse,
        }
    }

    /// The entrance played on load
    pub fn hero(&self) -> &Timeline {
        &self.hero
    }

    /// Named scroll-triggered timelines
    pub fn reveals(&self) -> impl Iterator<Item = (&str, &Timeline, &Trigger)> {
        self.reveals
            .iter()
            .map(|(name, timeline, trigger)| (name.as_str(), timeline, trigger))
    }

    /// Look up a timeline by name; `hero` names the load entrance
    pub fn timeline(&self, name: &str) -> Option<&Timeline> {
        if name == "hero" {
            return Some(&self.hero);
        }
        self.reveals
            .iter()
            .find(|(n, _, _)| n == name)
            .map(|(_, timeline, _)| timeline)
    }

    /// Register everything with a sequencer
    pub fn register(&self, sequencer: &mut Sequencer) -> Registered {
        let hero = sequencer.register(self.hero.clone(), Trigger::OnMount);
        let reveals = self
            .reveals
            .iter()
            .map(|(name, timeline, trigger)| {
                (name.clone(), sequencer.register(timeline.clone(), trigger.clone()))
            })
            .collect();
        let project_hover = self
            .project_hover
            .iter()
            .map(|spec| sequencer.add(spec.clone()))
            .collect();
        let input_focus = self
            .input_focus
            .iter()
            .map(|(field, spec)| (*field, sequencer.add(spec.clone())))
            .collect();
        let success_pulse = sequencer.add(self.success_pulse.clone());

        Registered {
            hero,
            reveals,
            project_hover,
            input_focus,
            success_pulse,
        }
    }
}

fn section_reveal(section: &str, actions: ToggleActions) -> Trigger {
    ViewportTrigger::new(section, Anchor::top(0.7))
        .end(Anchor::bottom(0.3))
        .actions(actions)
        .into()
}

/// Title, subtitle, call to action and image rise in with overlapping
/// starts, then the image floats up and down for good
fn hero_timeline() -> Timeline {
    let rise = |target: &str, duration: f64| {
        AnimationSpec::from_to([target], hidden_below(50.0), shown())
            .duration(duration)
            .ease(Ease::POWER3_OUT)
    };
    let float = AnimationSpec::from_to(
        [HERO_IMAGE],
        Props::new().with(Property::Y, 0.0),
        Props::new().with(Property::Y, -20.0),
    )
    .duration(3.0)
    .ease(Ease::POWER2_IN_OUT)
    .repeat(Repeat::forever(true));

    Timeline::new()
        .then(rise(HERO_TITLE, 1.0), Position::End)
        .then(rise(HERO_SUBTITLE, 0.8), Position::Overlap(0.5))
        .then(rise(HERO_CTA, 0.6), Position::Overlap(0.3))
        .then(rise(HERO_IMAGE, 0.8), Position::Overlap(0.4))
        .then(float, Position::End)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::RecordingStage;

    fn choreography() -> Choreography {
        Choreography::for_portfolio(&Portfolio::builtin().unwrap())
    }

    #[test]
    fn test_hero_starts() {
        let choreography = choreography();
        let starts = choreography.hero().starts();
        let expected = [0.0, 0.5, 1.0, 1.2, 2.0];
        assert_eq!(starts.len(), expected.len());
        for (got, want) in starts.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9, "{:?}", starts);
        }
        assert_eq!(choreography.hero().duration(), None);
    }

    #[test]
    fn test_hero_initial_frame_is_hidden() {
        let frame = choreography().hero().sample(0.0);
        for target in [HERO_SUBTITLE, HERO_CTA, HERO_IMAGE] {
            assert_eq!(frame[target].get(Property::Opacity), Some(0.0), "{}", target);
            assert_eq!(frame[target].get(Property::Y), Some(50.0), "{}", target);
        }
    }

    #[test]
    fn test_reveals_cover_every_card_and_bar() {
        let choreography = choreography();
        let projects = choreography.timeline("projects").unwrap();
        assert_eq!(projects.targets().len(), 6);
        let skills = choreography.timeline("skills").unwrap();
        assert_eq!(skills.targets().len(), 18);
        assert!(choreography.timeline(&skill_bar(17)).is_some());
        assert!(choreography.timeline("blog").is_none());
    }

    #[test]
    fn test_skill_bar_fills_to_level() {
        let portfolio = Portfolio::builtin().unwrap();
        let choreography = Choreography::for_portfolio(&portfolio);
        let bar = choreography.timeline(&skill_bar(1)).unwrap();
        let end = bar.sample(10.0);
        assert_eq!(end[&skill_bar(1)].get(Property::Width), Some(95.0));
    }

    #[test]
    fn test_register_counts() {
        let mut sequencer = Sequencer::new();
        let registered = choreography().register(&mut sequencer);
        assert_eq!(registered.project_hover.len(), 6);
        assert_eq!(registered.input_focus.len(), 4);
        assert!(registered.focus(Field::Message).is_some());
        // hero + 2 headings + about + projects + skills + 18 bars + contact + 6 + 4 + pulse
        assert_eq!(sequencer.len(), 1 + 2 + 1 + 1 + 1 + 18 + 1 + 6 + 4 + 1);
    }

    #[test]
    fn test_success_pulse_settles_at_rest() {
        let mut sequencer = Sequencer::new();
        let registered = choreography().register(&mut sequencer);
        let mut stage = RecordingStage::with_targets([CONTACT_FORM]);

        sequencer.apply(registered.success_pulse, crate::trigger::Action::Restart);
        sequencer.tick(0.2, &mut stage);
        let peak = stage.get(CONTACT_FORM).unwrap().get(Property::Scale).unwrap();
        assert!((peak - 1.05).abs() < 1e-9);
        sequencer.tick(1.0, &mut stage);
        let rest = stage.get(CONTACT_FORM).unwrap().get(Property::Scale).unwrap();
        assert!((rest - 1.0).abs() < 1e-9);
    }
}
