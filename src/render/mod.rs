//! Position resolution and template rendering
//!
//! Rendering never fails: every lookup miss (undefined variable, unknown
//! category, no active assignment) is absorbed as empty output or the
//! conditional false branch. Compiled nodes are immutable, so one template
//! can be rendered repeatedly across requests with different contexts.

mod context;

pub use context::{Context, Value};

use crate::content::{Category, Content, ContentStore};
use crate::parser::{
    parse, CategoryArg, IfPositionNode, Node, NodeList, PositionNode, Template,
};

/// Capability implemented by each content variant: merge the assignment's
/// content with the directive body and produce output text
pub trait RenderContent {
    fn render<S: ContentStore>(
        &self,
        renderer: &Renderer<'_, S>,
        ctx: &mut Context,
        fragment: &NodeList,
        box_type: Option<&str>,
    ) -> String;
}

impl RenderContent for Content {
    fn render<S: ContentStore>(
        &self,
        renderer: &Renderer<'_, S>,
        ctx: &mut Context,
        fragment: &NodeList,
        box_type: Option<&str>,
    ) -> String {
        match self {
            Content::Markup(text) => match parse(text) {
                Ok(template) => renderer.render_nodes(&template.nodes, ctx),
                // Render-time errors never propagate; broken stored markup
                // degrades to its raw text
                Err(_) => text.clone(),
            },
            Content::Object(fields) => {
                let object = fields
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::from(v.clone())))
                    .collect();
                ctx.push_scope();
                ctx.insert("object", Value::Map(object));
                if let Some(box_type) = box_type {
                    ctx.insert("box_type", box_type);
                }
                let out = renderer.render_nodes(fragment, ctx);
                ctx.pop_scope();
                out
            }
        }
    }
}

/// Renders compiled templates against a content store
pub struct Renderer<'a, S: ContentStore> {
    store: &'a S,
    site: &'a str,
}

impl<'a, S: ContentStore> Renderer<'a, S> {
    pub fn new(store: &'a S, site: &'a str) -> Self {
        Self { store, site }
    }

    /// Render a compiled template
    pub fn render(&self, template: &Template, ctx: &mut Context) -> String {
        self.render_nodes(&template.nodes, ctx)
    }

    /// Render a compiled fragment (a directive body or branch)
    pub fn render_nodes(&self, nodes: &NodeList, ctx: &mut Context) -> String {
        let mut out = String::new();
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Variable(var) => {
                    // Unresolvable variables render as nothing
                    if let Some(value) = ctx.resolve(&var.path) {
                        out.push_str(&value.to_output());
                    }
                }
                Node::Position(position) => out.push_str(&self.render_position(position, ctx)),
                Node::IfPosition(ifposition) => {
                    out.push_str(&self.render_ifposition(ifposition, ctx))
                }
            }
        }
        out
    }

    /// Resolve a directive's category argument
    ///
    /// A context variable holding a category is used directly; anything else
    /// falls back to a slug lookup scoped to this renderer's site.
    fn resolve_category(&self, arg: &CategoryArg, ctx: &Context) -> Option<Category> {
        match arg {
            CategoryArg::Slug(slug) => self.store.category(self.site, slug).cloned(),
            CategoryArg::Variable(path) => {
                if let Some(Value::Category(category)) = ctx.resolve(path) {
                    return Some(category);
                }
                self.store.category(self.site, path).cloned()
            }
        }
    }

    fn render_position(&self, node: &PositionNode, ctx: &mut Context) -> String {
        let Some(category) = self.resolve_category(&node.args.category, ctx) else {
            return String::new();
        };
        let Some(assignment) =
            self.store
                .active_position(&category, &node.args.position, node.args.nofallback)
        else {
            return String::new();
        };
        assignment
            .content
            .render(self, ctx, &node.body, node.args.box_type.as_deref())
    }

    fn render_ifposition(&self, node: &IfPositionNode, ctx: &mut Context) -> String {
        // Presence test only; the matched assignment's content is discarded.
        // Every miss routes to the false branch, whatever its cause.
        let found = self
            .resolve_category(&node.args.category, ctx)
            .and_then(|category| {
                self.store
                    .active_position(&category, &node.args.position, node.args.nofallback)
            })
            .is_some();

        if found {
            self.render_nodes(&node.true_branch, ctx)
        } else {
            self.render_nodes(&node.false_branch, ctx)
        }
    }
}
