//
// setup_locator.rs
//
// Finds the generated setup helper among a file's top-level declarations
//

use crate::syntax::{Node, SyntaxKind, SyntaxTree};

/// The located setup function.
#[derive(Debug, Clone, Copy)]
pub struct SetupFunction<'a> {
    pub node: Node<'a>,
    pub name: &'a str,
}

/// Top-level declarations in source order, with `export` wrappers removed.
fn top_level_declarations<'a>(tree: &'a SyntaxTree<'a>) -> impl Iterator<Item = Node<'a>> + 'a {
    tree.root().significant_children().map(|node| {
        if node.kind() == SyntaxKind::ExportStatement {
            node.child_by_field("declaration").unwrap_or(node)
        } else {
            node
        }
    })
}

/// Returns the first top-level function declaration whose name starts with
/// `prefix`. Later matches are ignored.
pub fn find_setup_function<'a>(tree: &'a SyntaxTree<'a>, prefix: &str) -> Option<SetupFunction<'a>> {
    top_level_declarations(tree)
        .filter(|node| node.kind() == SyntaxKind::FunctionDeclaration)
        .filter_map(|node| {
            let name = node.child_by_field("name")?.text();
            Some(SetupFunction { node, name })
        })
        .find(|setup| setup.name.starts_with(prefix))
}
