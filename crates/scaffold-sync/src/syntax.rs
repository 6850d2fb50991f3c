//! Immutable syntax tree for TypeScript spec and class files.
//!
//! Source text is parsed with tree-sitter and immediately lowered into an
//! arena of [`NodeData`] tagged with a small [`SyntaxKind`] enum. Everything
//! downstream works on this tree, so the rest of the crate never matches on
//! tree-sitter node names.
//!
//! Positions are byte offsets into the original text. Besides `[start, end)`
//! each node records `full_start`: the end of the previous significant token,
//! so `full_start..start` is the node's leading trivia (whitespace and
//! comments). Removing a node's full span therefore takes its indentation and
//! preceding comments with it.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tree_sitter::TreeCursor;

use crate::parser_pool::{with_parser, Dialect};

/// Node kinds the update engine cares about. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxKind {
    SourceFile,
    ExportStatement,
    FunctionDeclaration,
    ClassDeclaration,
    MethodDefinition,
    FormalParameter,
    /// `let`/`const`/`var` statement.
    VariableStatement,
    VariableDeclarator,
    NewExpression,
    CallExpression,
    ArgumentList,
    ObjectLiteral,
    ArrayLiteral,
    /// Value-position name, including object shorthand (`{ service }`).
    Identifier,
    /// Member name after a dot, method or class member name.
    PropertyName,
    TypeName,
    Comma,
    Comment,
    Error,
    Other(&'static str),
}

impl SyntaxKind {
    fn lower(kind: &'static str) -> Self {
        match kind {
            "program" => SyntaxKind::SourceFile,
            "export_statement" => SyntaxKind::ExportStatement,
            "function_declaration" | "generator_function_declaration" => {
                SyntaxKind::FunctionDeclaration
            }
            "class_declaration" | "abstract_class_declaration" => SyntaxKind::ClassDeclaration,
            "method_definition" => SyntaxKind::MethodDefinition,
            "required_parameter" | "optional_parameter" => SyntaxKind::FormalParameter,
            "lexical_declaration" | "variable_declaration" => SyntaxKind::VariableStatement,
            "variable_declarator" => SyntaxKind::VariableDeclarator,
            "new_expression" => SyntaxKind::NewExpression,
            "call_expression" => SyntaxKind::CallExpression,
            "arguments" => SyntaxKind::ArgumentList,
            "object" => SyntaxKind::ObjectLiteral,
            "array" => SyntaxKind::ArrayLiteral,
            "identifier" | "shorthand_property_identifier" => SyntaxKind::Identifier,
            "property_identifier" => SyntaxKind::PropertyName,
            "type_identifier" => SyntaxKind::TypeName,
            "," => SyntaxKind::Comma,
            "comment" => SyntaxKind::Comment,
            "ERROR" => SyntaxKind::Error,
            other => SyntaxKind::Other(other),
        }
    }

    /// Comma-separated element lists.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            SyntaxKind::ArgumentList | SyntaxKind::ObjectLiteral | SyntaxKind::ArrayLiteral
        )
    }

    pub fn is_trivia(self) -> bool {
        self == SyntaxKind::Comment
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
pub struct NodeData {
    pub kind: SyntaxKind,
    pub full_start: usize,
    pub start: usize,
    pub end: usize,
    /// Grammar field this node fills in its parent (`name`, `body`, ...).
    pub field: Option<&'static str>,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// Parsed file. Owns its node arena and borrows the source text.
#[derive(Debug)]
pub struct SyntaxTree<'src> {
    path: PathBuf,
    text: &'src str,
    nodes: Vec<NodeData>,
    has_errors: bool,
}

/// Parse `text` into a [`SyntaxTree`].
///
/// Never fails: syntax errors produce a partial tree, and a parser that
/// returns nothing produces an empty `SourceFile`.
pub fn parse<'src>(path: &Path, text: &'src str) -> SyntaxTree<'src> {
    let dialect = Dialect::from_path(path);
    let ts_tree = with_parser(dialect, |parser| parser.parse(text, None));

    let mut tree = SyntaxTree {
        path: path.to_path_buf(),
        text,
        nodes: Vec::new(),
        has_errors: false,
    };

    match ts_tree {
        Some(ts_tree) => {
            let root = ts_tree.root_node();
            tree.has_errors = root.has_error();
            let mut cursor = root.walk();
            tree.lower(&mut cursor);
            if tree.has_errors {
                log::debug!(
                    "{}: syntax errors present, continuing with a partial tree",
                    path.display()
                );
            }
        }
        None => {
            log::warn!("{}: parser produced no tree", path.display());
            tree.nodes.push(NodeData {
                kind: SyntaxKind::SourceFile,
                full_start: 0,
                start: 0,
                end: text.len(),
                field: None,
                parent: None,
                children: Vec::new(),
            });
        }
    }

    tree
}

impl<'src> SyntaxTree<'src> {
    /// Preorder walk of the cursor's subtree into the arena. Iterative, so
    /// nesting depth is bounded by heap, not by the thread's stack.
    fn lower(&mut self, cursor: &mut TreeCursor) {
        // open ancestors of the current node, each with the trivia start for
        // its next child
        let mut open: Vec<(NodeId, usize)> = Vec::new();
        let mut full_start = 0;

        loop {
            let ts_node = cursor.node();
            let id = NodeId(self.nodes.len());
            let parent = open.last().map(|&(parent, _)| parent);
            self.nodes.push(NodeData {
                kind: SyntaxKind::lower(ts_node.kind()),
                full_start: full_start.min(ts_node.start_byte()),
                start: ts_node.start_byte(),
                end: ts_node.end_byte(),
                field: cursor.field_name(),
                parent,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                self.nodes[parent.0].children.push(id);
            }

            if cursor.goto_first_child() {
                open.push((id, full_start));
                continue;
            }

            let mut finished = id;
            loop {
                let Some((_, trivia_start)) = open.last_mut() else {
                    return;
                };
                let data = &self.nodes[finished.0];
                if !data.kind.is_trivia() {
                    *trivia_start = data.end;
                }
                if cursor.goto_next_sibling() {
                    full_start = *trivia_start;
                    break;
                }
                cursor.goto_parent();
                if let Some((parent, _)) = open.pop() {
                    finished = parent;
                }
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &'src str {
        self.text
    }

    /// Whether the parser had to recover from syntax errors.
    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    pub fn root(&self) -> Node<'_> {
        Node {
            tree: self,
            id: NodeId(0),
        }
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

/// Cheap handle to a node inside a [`SyntaxTree`].
#[derive(Clone, Copy)]
pub struct Node<'a> {
    tree: &'a SyntaxTree<'a>,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> SyntaxKind {
        self.data().kind
    }

    pub fn start(&self) -> usize {
        self.data().start
    }

    pub fn end(&self) -> usize {
        self.data().end
    }

    pub fn full_start(&self) -> usize {
        self.data().full_start
    }

    pub fn range(&self) -> Range<usize> {
        self.start()..self.end()
    }

    /// Range including leading trivia.
    pub fn full_range(&self) -> Range<usize> {
        self.full_start()..self.end()
    }

    pub fn text(&self) -> &'a str {
        &self.tree.text[self.range()]
    }

    pub fn full_text(&self) -> &'a str {
        &self.tree.text[self.full_range()]
    }

    /// Text of the whole file this node belongs to.
    pub fn source_text(&self) -> &'a str {
        self.tree.text
    }

    pub fn field(&self) -> Option<&'static str> {
        self.data().field
    }

    pub fn parent(&self) -> Option<Node<'a>> {
        self.data().parent.map(|id| self.tree.node(id))
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    /// Children that are not comments.
    pub fn significant_children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        self.children().filter(|c| !c.kind().is_trivia())
    }

    pub fn child_by_field(&self, field: &str) -> Option<Node<'a>> {
        self.children().find(|c| c.field() == Some(field))
    }

    /// Preorder traversal starting at (and including) this node.
    pub fn descendants(&self) -> Descendants<'a> {
        Descendants {
            tree: self.tree,
            stack: vec![self.id],
        }
    }

    /// Whether `self` lies inside the subtree rooted at `other` (or is `other`).
    pub fn is_within(&self, other: Node<'_>) -> bool {
        let mut current = Some(*self);
        while let Some(node) = current {
            if node.id == other.id {
                return true;
            }
            current = node.parent();
        }
        false
    }

    pub fn next_significant_sibling(&self) -> Option<Node<'a>> {
        let parent = self.parent()?;
        parent
            .significant_children()
            .skip_while(|c| c.id != self.id)
            .nth(1)
    }

    pub fn prev_significant_sibling(&self) -> Option<Node<'a>> {
        let parent = self.parent()?;
        parent
            .significant_children()
            .take_while(|c| c.id != self.id)
            .last()
    }
}

impl std::fmt::Debug for Node<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}@{}..{}", self.kind(), self.start(), self.end())
    }
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for Node<'_> {}

/// Lazy preorder iterator over a subtree. Clone it to restart a scan.
#[derive(Clone)]
pub struct Descendants<'a> {
    tree: &'a SyntaxTree<'a>,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let data = &self.tree.nodes[id.0];
        self.stack.extend(data.children.iter().rev());
        Some(self.tree.node(id))
    }
}

/// Debug dump of a subtree, one node per line, for `log::trace!`.
pub fn dump(node: Node<'_>) -> String {
    let mut out = String::new();
    for n in node.descendants() {
        let mut depth = 0;
        let mut current = n;
        while current != node {
            match current.parent() {
                Some(parent) => {
                    depth += 1;
                    current = parent;
                }
                None => break,
            }
        }
        out.push_str(&"  ".repeat(depth));
        out.push_str(&format!("{:?} {:?}\n", n.kind(), n.text()));
    }
    out
}
