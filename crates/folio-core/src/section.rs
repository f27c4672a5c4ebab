use anyhow::{bail, Result};
use std::collections::HashSet;

/// A navigable block of the page, addressed by a stable id.
///
/// The id doubles as the element id in the document and as the URL fragment
/// (`#about`), so it is the only thing the layout layer and the core share.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: String,
    pub label: String,
}

impl Section {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Sections in top-to-bottom page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sections {
    items: Vec<Section>,
}

impl Sections {
    /// Build an ordered section list, rejecting empty lists and duplicate ids
    pub fn new(items: Vec<Section>) -> Result<Self> {
        if items.is_empty() {
            bail!("A page needs at least one section");
        }

        let mut seen = HashSet::new();
        for section in &items {
            if section.id.trim().is_empty() {
                bail!("Section ids must not be empty (label: {})", section.label);
            }
            if !seen.insert(section.id.as_str()) {
                bail!("Duplicate section id: {}", section.id);
            }
        }

        Ok(Self { items })
    }

    /// The portfolio's navigation set
    pub fn portfolio() -> Self {
        Self {
            items: vec![
                Section::new("hero", "Home"),
                Section::new("about", "About"),
                Section::new("projects", "Projects"),
                Section::new("skills", "Skills"),
                Section::new("contact", "Contact"),
            ],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.items.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The first section in page order, used as the default active section
    pub fn first(&self) -> &Section {
        &self.items[0]
    }

    /// Resolve a URL fragment such as `#skills` to a known section id
    pub fn parse_fragment<'a>(&self, fragment: &'a str) -> Option<&'a str> {
        let id = fragment.strip_prefix('#').unwrap_or(fragment).trim();
        if id.is_empty() || !self.contains(id) {
            return None;
        }
        Some(id)
    }
}
