use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::scroll::{DEFAULT_HEADER_OFFSET, DEFAULT_SCROLL_THRESHOLD};
use crate::trigger::ToggleActions;

/// Content shipped with the site
const BUILTIN: &str = include_str!("../content/portfolio.toml");

/// Everything the page displays, plus motion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    pub about: About,
    #[serde(default)]
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub contact: Contact,
    pub footer: Footer,
    #[serde(default)]
    pub motion: MotionSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub role: String,
    pub tagline: String,
    pub portrait: String,
    #[serde(default)]
    pub cv: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct About {
    pub paragraphs: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub title: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub emoji: Option<String>,
    pub accent: String,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub code_url: Option<String>,
}

/// What fills a project card's picture slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectArt<'a> {
    Image(&'a str),
    Emoji(&'a str),
    /// Nothing configured: the title's first letter on the accent gradient
    Initial(char),
}

impl Project {
    pub fn art(&self) -> ProjectArt<'_> {
        if let Some(image) = self.image.as_deref().filter(|s| !s.is_empty()) {
            return ProjectArt::Image(image);
        }
        if let Some(emoji) = self.emoji.as_deref().filter(|s| !s.is_empty()) {
            return ProjectArt::Emoji(emoji);
        }
        ProjectArt::Initial(self.initial())
    }

    /// Fallback letter when the image fails to load
    pub fn initial(&self) -> char {
        self.title.chars().next().unwrap_or('?')
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    pub intro: String,
    pub categories: Vec<SkillCategory>,
    #[serde(default)]
    pub extra: Vec<String>,
}

impl Skills {
    /// Every skill in page order
    pub fn all(&self) -> impl Iterator<Item = &Skill> {
        self.categories.iter().flat_map(|c| c.skills.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub title: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency in percent
    pub level: u8,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub intro: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    #[serde(default)]
    pub socials: Vec<Social>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Social {
    pub name: String,
    pub url: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Footer {
    pub brand: String,
    pub tagline: String,
}

/// Tunables for scrolling and motion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSettings {
    pub header_offset: f64,
    pub scroll_threshold: f64,
    pub nav_scroll_seconds: f64,
    pub cta_scroll_seconds: f64,
    pub submit_delay_ms: u64,
    /// Four-word toggle actions used by every scroll reveal
    pub reveal_actions: String,
}

impl Default for MotionSettings {
    fn default() -> Self {
        Self {
            header_offset: DEFAULT_HEADER_OFFSET,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            nav_scroll_seconds: 1.0,
            cta_scroll_seconds: 1.2,
            submit_delay_ms: 2000,
            reveal_actions: ToggleActions::TOGGLE.to_string(),
        }
    }
}

impl MotionSettings {
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Parsed reveal actions, falling back to the toggle preset
    pub fn reveal_actions(&self) -> ToggleActions {
        self.reveal_actions.parse().unwrap_or_else(|e: String| {
            warn!("{}; using the default toggle actions", e);
            ToggleActions::TOGGLE
        })
    }
}

impl Portfolio {
    /// Content embedded at build time
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN).context("Failed to parse built-in portfolio content")
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("Invalid portfolio content")
    }

    /// Load content from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read content file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse content file: {}", path.display()))
    }

    /// Every problem with the content, empty when it is usable as is
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.profile.name.trim().is_empty() {
            problems.push("profile.name is empty".to_string());
        }
        if self.about.paragraphs.is_empty() {
            problems.push("about.paragraphs is empty".to_string());
        }

        let mut titles = HashSet::new();
        for project in &self.projects {
            if !titles.insert(project.title.as_str()) {
                problems.push(format!("Duplicate project title: {}", project.title));
            }
            if project.technologies.is_empty() {
                problems.push(format!("Project {} lists no technologies", project.title));
            }
        }

        for category in &self.skills.categories {
            if category.skills.is_empty() {
                problems.push(format!("Skill category {} is empty", category.title));
            }
            for skill in &category.skills {
                if skill.level > 100 {
                    problems.push(format!(
                        "Skill {} has level {} (must be 0-100)",
                        skill.name, skill.level
                    ));
                }
            }
        }

        if !self.contact.email.contains('@') {
            problems.push(format!("contact.email is not an address: {}", self.contact.email));
        }

        let motion = &self.motion;
        if motion.header_offset < 0.0 {
            problems.push("motion.header_offset must not be negative".to_string());
        }
        if motion.nav_scroll_seconds < 0.0 || motion.cta_scroll_seconds < 0.0 {
            problems.push("motion scroll durations must not be negative".to_string());
        }
        if let Err(e) = motion.reveal_actions.parse::<ToggleActions>() {
            problems.push(format!("motion.reveal_actions: {}", e));
        }

        problems
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_content_is_valid() {
        let portfolio = Portfolio::builtin().unwrap();
        assert_eq!(portfolio.profile.name, "Andres");
        assert_eq!(portfolio.projects.len(), 6);
        assert_eq!(portfolio.skills.all().count(), 18);
        assert!(portfolio.validate().is_empty(), "{:?}", portfolio.validate());
        assert_eq!(portfolio.motion.reveal_actions(), ToggleActions::TOGGLE);
    }

    #[test]
    fn test_project_art() {
        let portfolio = Portfolio::builtin().unwrap();
        assert_eq!(portfolio.projects[0].art(), ProjectArt::Image("/assets/marketcito.PNG"));
        assert_eq!(portfolio.projects[2].art(), ProjectArt::Emoji("🌤️"));

        let mut bare = portfolio.projects[0].clone();
        bare.image = None;
        assert_eq!(bare.art(), ProjectArt::Initial('M'));
    }

    #[test]
    fn test_validate_reports_every_problem() {
        let mut portfolio = Portfolio::builtin().unwrap();
        portfolio.profile.name = " ".to_string();
        portfolio.skills.categories[0].skills[0].level = 140;
        let duplicate = portfolio.projects[0].clone();
        portfolio.projects.push(duplicate);
        portfolio.motion.reveal_actions = "play".to_string();

        let problems = portfolio.validate();
        assert_eq!(problems.len(), 4, "{:?}", problems);
        assert!(problems.iter().any(|p| p.contains("Duplicate project title")));
        assert!(problems.iter().any(|p| p.contains("level 140")));
        assert_eq!(portfolio.motion.reveal_actions(), ToggleActions::TOGGLE);
    }

    #[test]
    fn test_motion_defaults_when_table_missing() {
        let without_motion: String = BUILTIN
            .split("[motion]")
            .next()
            .unwrap()
            .to_string();
        let portfolio = Portfolio::from_toml_str(&without_motion).unwrap();
        assert_eq!(portfolio.motion, MotionSettings::default());
        assert_eq!(portfolio.motion.submit_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_load_from_file() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(BUILTIN.as_bytes())?;
        let portfolio = Portfolio::load(file.path())?;
        assert_eq!(portfolio.contact.location, "Santo Domingo, DR");
        Ok(())
    }

    #[test]
    fn test_load_reports_path_on_parse_error() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"not = [valid")?;
        let err = Portfolio::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse content file"));
        Ok(())
    }
}
