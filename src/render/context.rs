//! Render context: the variable scopes a template is rendered against

use std::collections::BTreeMap;

use crate::content::Category;

/// A value bound to a context variable
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    /// A category object, usable directly as a directive's category argument
    Category(Category),
    /// Nested fields, reached through dotted paths
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Attribute access for one dotted-path segment
    fn attr(&self, name: &str) -> Option<Value> {
        match self {
            Value::Str(_) => None,
            Value::Category(cat) => match name {
                "slug" => Some(Value::Str(cat.slug.clone())),
                "site" => Some(Value::Str(cat.site.clone())),
                "title" => Some(Value::Str(cat.title.clone().unwrap_or_default())),
                _ => None,
            },
            Value::Map(map) => map.get(name).cloned(),
        }
    }

    /// Text emitted when the value is interpolated into output
    pub fn to_output(&self) -> String {
        match self {
            Value::Str(s) => s.clone(),
            Value::Category(cat) => cat.slug.clone(),
            Value::Map(_) => String::new(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

/// A stack of variable scopes
///
/// Inner scopes (pushed while rendering assignment content) shadow outer
/// ones. The base scope is never popped.
#[derive(Debug, Clone)]
pub struct Context {
    scopes: Vec<BTreeMap<String, Value>>,
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl Context {
    pub fn new() -> Self {
        Self {
            scopes: vec![BTreeMap::new()],
        }
    }

    /// Bind a variable in the innermost scope
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.scopes
            .last_mut()
            .expect("context always has a base scope")
            .insert(name.into(), value.into());
    }

    pub fn push_scope(&mut self) {
        self.scopes.push(BTreeMap::new());
    }

    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Resolve a dotted variable path, innermost scope first
    ///
    /// `None` for an unbound first segment or a missing attribute anywhere
    /// along the path.
    pub fn resolve(&self, path: &str) -> Option<Value> {
        let mut parts = path.split('.');
        let first = parts.next()?;
        let mut value = self
            .scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(first))?
            .clone();
        for part in parts {
            value = value.attr(part)?;
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category() -> Category {
        Category {
            site: "example.com".to_string(),
            slug: "news".to_string(),
            title: Some("News".to_string()),
            parent: None,
        }
    }

    #[test]
    fn test_resolve_simple_variable() {
        let mut ctx = Context::new();
        ctx.insert("name", "value");
        assert_eq!(ctx.resolve("name"), Some(Value::Str("value".to_string())));
        assert_eq!(ctx.resolve("missing"), None);
    }

    #[test]
    fn test_resolve_category_attributes() {
        let mut ctx = Context::new();
        ctx.insert("cat", Value::Category(category()));
        assert_eq!(ctx.resolve("cat.slug"), Some(Value::Str("news".to_string())));
        assert_eq!(
            ctx.resolve("cat.title"),
            Some(Value::Str("News".to_string()))
        );
        assert_eq!(ctx.resolve("cat.nope"), None);
    }

    #[test]
    fn test_resolve_map_path() {
        let mut ctx = Context::new();
        let mut fields = BTreeMap::new();
        fields.insert("title".to_string(), Value::from("Headline"));
        ctx.insert("object", Value::Map(fields));
        assert_eq!(
            ctx.resolve("object.title"),
            Some(Value::Str("Headline".to_string()))
        );
    }

    #[test]
    fn test_inner_scope_shadows_outer() {
        let mut ctx = Context::new();
        ctx.insert("name", "outer");
        ctx.push_scope();
        ctx.insert("name", "inner");
        assert_eq!(ctx.resolve("name"), Some(Value::Str("inner".to_string())));
        ctx.pop_scope();
        assert_eq!(ctx.resolve("name"), Some(Value::Str("outer".to_string())));
    }

    #[test]
    fn test_base_scope_survives_pop() {
        let mut ctx = Context::new();
        ctx.insert("name", "kept");
        ctx.pop_scope();
        assert_eq!(ctx.resolve("name"), Some(Value::Str("kept".to_string())));
    }

    #[test]
    fn test_string_attribute_is_miss() {
        let mut ctx = Context::new();
        ctx.insert("name", "value");
        assert_eq!(ctx.resolve("name.length"), None);
    }
}
