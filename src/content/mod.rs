//! Content model and store contracts
//!
//! Categories and position assignments are editorial data owned elsewhere;
//! this subsystem only reads them. The `ContentStore` trait is the seam to
//! whatever persistence or cache backs a deployment, and `FixtureStore` is
//! the bundled TOML-backed implementation.

pub mod fixtures;

use std::collections::BTreeMap;

/// A hierarchical category node, identified by a slug unique within a site
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    pub site: String,
    pub slug: String,
    pub title: Option<String>,
    /// Parent category slug, if any
    pub parent: Option<String>,
}

/// An editorial assignment of content to a (category, position-name) slot
///
/// Created and edited by staff through the CMS; looked up read-only here and
/// never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Slug of the category this assignment belongs to
    pub category: String,
    /// Position name the assignment fills
    pub name: String,
    /// Inactive assignments are invisible to resolution
    pub active: bool,
    /// Whether this assignment may be found through ancestor fallback
    pub inherit: bool,
    pub content: Content,
}

/// The content bound to an assignment
///
/// Each variant knows how to render itself; see `RenderContent` in the render
/// module for the single-method capability both variants implement.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    /// Stored markup, compiled and rendered against the current context
    Markup(String),
    /// A referenced object whose fields are merged into the directive body
    Object(BTreeMap<String, String>),
}

/// Read-only lookup contract consumed by the renderer
///
/// Both operations treat misses as `None`, never as errors; the renderer maps
/// them to empty output or the conditional false branch.
pub trait ContentStore {
    /// Cached category lookup, scoped to a site
    fn category(&self, site: &str, slug: &str) -> Option<&Category>;

    /// Find the active assignment for (category, name)
    ///
    /// With `nofallback` set only the exact category is checked; otherwise the
    /// implementation searches the ancestor chain.
    fn active_position(
        &self,
        category: &Category,
        name: &str,
        nofallback: bool,
    ) -> Option<&Assignment>;
}
