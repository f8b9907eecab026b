//! Position Tags - template directives for editorially placed content slots
//!
//! A "position" is a named content slot scoped to a category in a site's
//! category tree. Editorial staff assign content to positions elsewhere; this
//! crate compiles `{% position %}` / `{% ifposition %}` directives into
//! immutable render nodes and renders them against a read-only content store,
//! falling back to ancestor categories when the current one has no assignment.
//!
//! # Example
//!
//! ```rust
//! use position_tags::{render, FixtureStore};
//!
//! let store = FixtureStore::from_str(r#"
//!     site = "example.com"
//!
//!     [[categories]]
//!     slug = "news"
//!
//!     [[positions]]
//!     category = "news"
//!     name = "top_left"
//!     markup = "HELLO"
//! "#).unwrap();
//!
//! let out = render(
//!     r#"{% position top_left for "news" %}{% endposition %}"#,
//!     &store,
//!     "example.com",
//! ).unwrap();
//! assert_eq!(out, "HELLO");
//! ```

pub mod content;
pub mod error;
pub mod parser;
pub mod render;

pub use content::fixtures::{FixtureError, FixtureStore};
pub use content::{Assignment, Category, Content, ContentStore};
pub use error::ParseError;
pub use parser::{parse, Template};
pub use render::{Context, RenderContent, Renderer, Value};

use thiserror::Error;

/// Errors that can occur in the compile-and-render pipeline
///
/// Only compile-time problems surface here; render-time lookup misses are
/// absorbed into the output per the soft-miss policy.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error compiling the template
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error loading the content fixtures
    #[error("content error: {0}")]
    Content(#[from] FixtureError),
}

/// Compile and render template source with an empty context
pub fn render<S: ContentStore>(
    source: &str,
    store: &S,
    site: &str,
) -> Result<String, RenderError> {
    render_with_context(source, store, site, &mut Context::new())
}

/// Compile and render template source against an existing context
pub fn render_with_context<S: ContentStore>(
    source: &str,
    store: &S,
    site: &str,
    ctx: &mut Context,
) -> Result<String, RenderError> {
    let template = parse(source)?;
    Ok(Renderer::new(store, site).render(&template, ctx))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        site = "example.com"

        [[categories]]
        slug = "frontpage"

        [[categories]]
        slug = "news"
        parent = "frontpage"

        [[positions]]
        category = "frontpage"
        name = "top_left"
        markup = "HELLO"
    "#;

    #[test]
    fn test_render_pipeline() {
        let store = FixtureStore::from_str(FIXTURE).unwrap();
        let out = render(
            r#"{% position top_left for "news" %}X{% endposition %}"#,
            &store,
            "example.com",
        )
        .unwrap();
        assert_eq!(out, "HELLO");
    }

    #[test]
    fn test_render_surfaces_parse_errors() {
        let store = FixtureStore::from_str(FIXTURE).unwrap();
        let result = render("{% position %}{% endposition %}", &store, "example.com");
        assert!(matches!(result, Err(RenderError::Parse(_))));
    }

    #[test]
    fn test_render_with_context_binds_variables() {
        let store = FixtureStore::from_str(FIXTURE).unwrap();
        let mut ctx = Context::new();
        ctx.insert("user", "ana");
        let out = render_with_context("hi {{ user }}", &store, "example.com", &mut ctx).unwrap();
        assert_eq!(out, "hi ana");
    }
}
