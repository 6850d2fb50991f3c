//
// instantiation.rs
//
// Reads the dependencies currently wired into `new ClassUnderTest(...)`
//

use crate::syntax::{Node, SyntaxKind};

/// First `new` expression (preorder) under `setup` whose text mentions
/// `class_name`.
pub fn find_instantiation<'a>(setup: Node<'a>, class_name: &str) -> Option<Node<'a>> {
    setup
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::NewExpression)
        .find(|node| node.text().contains(class_name))
}

/// Identifier names inside the first argument list of `instantiation`, in
/// order and with duplicates. `new Foo` without parentheses wires nothing.
pub fn wired_identifiers<'a>(instantiation: Node<'a>) -> Vec<&'a str> {
    let Some(arguments) = instantiation
        .descendants()
        .find(|node| node.kind() == SyntaxKind::ArgumentList)
    else {
        return Vec::new();
    };

    arguments
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Identifier)
        .map(|node| node.text())
        .collect()
}
