//! Content document model (`data/data.json`)
//!
//! Every level of the document is optional. A missing field and an empty
//! string are treated the same way: the corresponding element is not
//! rendered and its placeholder stays in place.
//!
//! Trust boundary, decided per field:
//! - `hero.title` is [`TrustedHtml`] and is inserted verbatim, so authors can
//!   use line breaks or inline styling in the headline.
//! - every other text field is plain text and is always escaped.
//! - URLs and icon class names are escaped as attribute values.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Formatted text supplied by the site author and rendered without escaping
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TrustedHtml(String);

impl TrustedHtml {
    pub fn new(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The whole content document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentDocument {
    pub settings: Option<Settings>,
    pub hero: Option<Hero>,
    pub about: Option<About>,
    pub skills: Option<Vec<Skill>>,
    pub projects: Option<Vec<Project>>,
}

impl ContentDocument {
    /// Parse a document from JSON text
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    /// Projects in source order, empty when the section is absent
    pub fn projects(&self) -> &[Project] {
        self.projects.as_deref().unwrap_or_default()
    }

    /// Skills in source order, empty when the section is absent
    pub fn skills(&self) -> &[Skill] {
        self.skills.as_deref().unwrap_or_default()
    }
}

/// Site-wide settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logo: Option<String>,
}

/// Hero banner
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Hero {
    pub title: Option<TrustedHtml>,
    pub subtitle: Option<String>,
    pub image: Option<String>,
}

/// About section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct About {
    /// Newline-delimited paragraphs
    pub description: Option<String>,
    pub image: Option<String>,
}

/// A skill card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Skill {
    pub name: Option<String>,
    /// Icon font class list, e.g. `fab fa-rust`
    pub icon: Option<String>,
}

/// A portfolio project
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Project {
    /// Optional explicit identifier; derived from the title when absent
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub code_link: Option<String>,
    pub demo_link: Option<String>,
}

impl Project {
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn image(&self) -> &str {
        self.image.as_deref().unwrap_or_default()
    }

    /// Code link, when present and non-empty
    pub fn code_link(&self) -> Option<&str> {
        self.code_link.as_deref().filter(|l| !l.is_empty())
    }

    /// Demo link, when present and non-empty
    pub fn demo_link(&self) -> Option<&str> {
        self.demo_link.as_deref().filter(|l| !l.is_empty())
    }
}

/// Address of a rendered project: its position plus a stable identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProjectKey {
    pub index: usize,
    pub id: String,
}

impl ProjectKey {
    /// Assign keys to projects in order, de-duplicating identifiers
    ///
    /// An explicit `id` keeps its name unless an earlier project already
    /// claimed it. Ids derived from titles never take a name that any
    /// project declares explicitly; clashes get the first free `-N` suffix.
    pub fn assign(projects: &[Project]) -> Vec<ProjectKey> {
        let explicit = |project: &Project| {
            project
                .id
                .as_deref()
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(str::to_string)
        };
        let reserved: HashSet<String> = projects.iter().filter_map(explicit).collect();
        let mut issued: HashSet<String> = HashSet::new();

        projects
            .iter()
            .enumerate()
            .map(|(index, project)| {
                let id = match explicit(project) {
                    Some(id) if !issued.contains(&id) => id,
                    Some(id) => Self::next_free(&id, &issued, &reserved),
                    None => {
                        let base = slug::slugify(project.title());
                        let base = if base.is_empty() {
                            "project".to_string()
                        } else {
                            base
                        };
                        if issued.contains(&base) || reserved.contains(&base) {
                            Self::next_free(&base, &issued, &reserved)
                        } else {
                            base
                        }
                    }
                };

                issued.insert(id.clone());
                ProjectKey { index, id }
            })
            .collect()
    }

    fn next_free(base: &str, issued: &HashSet<String>, reserved: &HashSet<String>) -> String {
        (2u64..)
            .map(|n| format!("{}-{}", base, n))
            .find(|id| !issued.contains(id) && !reserved.contains(id))
            .unwrap_or_else(|| base.to_string())
    }
}
