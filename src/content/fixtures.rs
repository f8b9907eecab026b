//! TOML-backed content store
//!
//! Loads categories and position assignments from a TOML document and serves
//! them through `ContentStore`, including the ancestor-fallback search. Used
//! by the CLI and by tests; production deployments would put their own store
//! behind the same trait.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::{Assignment, Category, Content, ContentStore};

/// Errors that can occur when loading content fixtures
#[derive(Error, Debug)]
pub enum FixtureError {
    #[error("Failed to read content file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse content TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Category '{slug}' defined more than once")]
    DuplicateCategory { slug: String },
    #[error("Category '{slug}' references unknown parent '{parent}'")]
    UnknownParent { slug: String, parent: String },
    #[error("Position '{name}' references unknown category '{category}'")]
    UnknownCategory { name: String, category: String },
    #[error("Position '{name}' in category '{category}' needs exactly one of 'markup' or 'object'")]
    InvalidContent { name: String, category: String },
}

/// TOML structure for deserializing content fixtures
#[derive(Deserialize)]
struct TomlContent {
    site: Option<String>,
    #[serde(default)]
    categories: Vec<TomlCategory>,
    #[serde(default)]
    positions: Vec<TomlPosition>,
}

#[derive(Deserialize)]
struct TomlCategory {
    slug: String,
    title: Option<String>,
    parent: Option<String>,
}

#[derive(Deserialize)]
struct TomlPosition {
    category: String,
    name: String,
    #[serde(default = "default_true")]
    active: bool,
    #[serde(default = "default_true")]
    inherit: bool,
    markup: Option<String>,
    object: Option<BTreeMap<String, String>>,
}

fn default_true() -> bool {
    true
}

const DEFAULT_SITE: &str = "default";

/// An in-memory content store loaded from TOML
#[derive(Debug, Clone)]
pub struct FixtureStore {
    site: String,
    categories: BTreeMap<String, Category>,
    positions: Vec<Assignment>,
}

impl FixtureStore {
    /// Load a content store from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a content store from a TOML string
    pub fn from_str(content: &str) -> Result<Self, FixtureError> {
        let parsed: TomlContent = toml::from_str(content)?;
        let site = parsed.site.unwrap_or_else(|| DEFAULT_SITE.to_string());

        let mut categories = BTreeMap::new();
        for record in parsed.categories {
            let category = Category {
                site: site.clone(),
                slug: record.slug.clone(),
                title: record.title,
                parent: record.parent,
            };
            if categories.insert(record.slug.clone(), category).is_some() {
                return Err(FixtureError::DuplicateCategory { slug: record.slug });
            }
        }
        for category in categories.values() {
            if let Some(parent) = &category.parent {
                if !categories.contains_key(parent) {
                    return Err(FixtureError::UnknownParent {
                        slug: category.slug.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        let mut positions = Vec::new();
        for record in parsed.positions {
            if !categories.contains_key(&record.category) {
                return Err(FixtureError::UnknownCategory {
                    name: record.name,
                    category: record.category,
                });
            }
            let content = match (record.markup, record.object) {
                (Some(markup), None) => Content::Markup(markup),
                (None, Some(object)) => Content::Object(object),
                _ => {
                    return Err(FixtureError::InvalidContent {
                        name: record.name,
                        category: record.category,
                    });
                }
            };
            positions.push(Assignment {
                category: record.category,
                name: record.name,
                active: record.active,
                inherit: record.inherit,
                content,
            });
        }

        Ok(Self {
            site,
            categories,
            positions,
        })
    }

    /// The site this store serves
    pub fn site(&self) -> &str {
        &self.site
    }

    fn find(&self, slug: &str, name: &str, exact: bool) -> Option<&Assignment> {
        self.positions.iter().find(|a| {
            a.category == slug && a.name == name && a.active && (exact || a.inherit)
        })
    }
}

impl ContentStore for FixtureStore {
    fn category(&self, site: &str, slug: &str) -> Option<&Category> {
        self.categories.get(slug).filter(|c| c.site == site)
    }

    fn active_position(
        &self,
        category: &Category,
        name: &str,
        nofallback: bool,
    ) -> Option<&Assignment> {
        let mut slug = category.slug.as_str();
        let mut exact = true;
        // Guards against parent cycles in hand-written fixtures
        let mut seen = HashSet::new();

        loop {
            if !seen.insert(slug.to_string()) {
                return None;
            }
            if let Some(assignment) = self.find(slug, name, exact) {
                return Some(assignment);
            }
            if nofallback {
                return None;
            }
            slug = self.categories.get(slug)?.parent.as_deref()?;
            exact = false;
        }
    }
}
