//! AST for compiled templates
//!
//! A `Template` is the compiled form of one template source. Its nodes are
//! immutable after parsing: a node can be rendered any number of times across
//! requests, but is never re-parsed. Only the values resolved through the
//! render context vary between calls.

/// A compiled template: a flat list of top-level nodes
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub nodes: NodeList,
}

/// Sequence of nodes making up a template body or directive branch
pub type NodeList = Vec<Node>;

/// One compiled template node
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// Literal text, emitted verbatim
    Text(String),
    /// `{{ variable.path }}` interpolation
    Variable(VariableRef),
    /// `{% position ... %} ... {% endposition %}`
    Position(PositionNode),
    /// `{% ifposition ... %} ... [{% else %} ...] {% endifposition %}`
    IfPosition(IfPositionNode),
}

/// A dotted variable reference, resolved against the context at render time
#[derive(Debug, Clone, PartialEq)]
pub struct VariableRef {
    pub path: String,
}

impl VariableRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// The category argument of a position directive
#[derive(Debug, Clone, PartialEq)]
pub enum CategoryArg {
    /// Bare identifier: a context variable, with slug-literal fallback
    Variable(String),
    /// Quoted literal: always a slug lookup
    Slug(String),
}

/// Parsed arguments shared by both directive forms
///
/// Grammar:
///   POSITION_NAME for CATEGORY [nofallback]
///   POSITION_NAME for CATEGORY using BOX_TYPE [nofallback]
#[derive(Debug, Clone, PartialEq)]
pub struct TagArgs {
    pub position: String,
    pub category: CategoryArg,
    pub box_type: Option<String>,
    pub nofallback: bool,
}

/// Render node for the unconditional `{% position %}` form
#[derive(Debug, Clone, PartialEq)]
pub struct PositionNode {
    pub args: TagArgs,
    pub body: NodeList,
}

/// Render node for the `{% ifposition %}` presence test
#[derive(Debug, Clone, PartialEq)]
pub struct IfPositionNode {
    pub args: TagArgs,
    pub true_branch: NodeList,
    pub false_branch: NodeList,
}
