//! Comma handling for removed nodes.
//!
//! Removing `b` from `new C(a, b, c)` must also remove one of the commas
//! around it. [`SeparatorPolicy::ListAware`] applies these rules, first match
//! wins:
//!
//! | node position                                            | absorbs            |
//! |----------------------------------------------------------|--------------------|
//! | list element, all later elements removed, no trailing `,` | the preceding `,`  |
//! | next significant sibling is `,`                          | that `,`           |
//! | anything else                                            | nothing            |
//!
//! A run of removed elements at the end of a list therefore removes the comma
//! that separated it from the last kept element, and two removals never claim
//! the same comma. [`SeparatorPolicy::NextChar`] only looks at the single
//! character after the node.

use std::collections::HashSet;
use std::ops::Range;

use crate::config::SeparatorPolicy;
use crate::syntax::{Node, NodeId, SyntaxKind};

/// Byte range to delete for `node`, including its leading trivia and the
/// separator chosen by `policy`. `removed` holds every node being removed in
/// the same pass.
pub fn removal_span(node: Node<'_>, policy: SeparatorPolicy, removed: &HashSet<NodeId>) -> Range<usize> {
    match policy {
        SeparatorPolicy::ListAware => list_aware_span(node, removed),
        SeparatorPolicy::NextChar => next_char_span(node),
    }
}

fn next_char_span(node: Node<'_>) -> Range<usize> {
    let mut span = node.full_range();
    if node.source_text().as_bytes().get(span.end) == Some(&b',') {
        span.end += 1;
    }
    span
}

fn list_aware_span(node: Node<'_>, removed: &HashSet<NodeId>) -> Range<usize> {
    let mut span = node.full_range();

    let in_list = node.parent().is_some_and(|p| p.kind().is_list());
    if in_list && closes_list(node, removed) {
        if let Some(comma) = node.prev_significant_sibling().filter(is_comma) {
            span.start = comma.start();
        }
        return span;
    }

    if let Some(comma) = node.next_significant_sibling().filter(is_comma) {
        span.end = comma.end();
    }
    span
}

/// True when nothing kept follows `node` in its list and the list has no
/// trailing comma.
fn closes_list(node: Node<'_>, removed: &HashSet<NodeId>) -> bool {
    let mut current = node;
    loop {
        let Some(next) = current.next_significant_sibling() else {
            return true;
        };
        if !is_comma(&next) {
            return true;
        }
        match next.next_significant_sibling() {
            Some(element) if !is_closing_bracket(&element) => {
                if !removed.contains(&element.id()) {
                    return false;
                }
                current = element;
            }
            _ => return false,
        }
    }
}

fn is_comma(node: &Node<'_>) -> bool {
    node.kind() == SyntaxKind::Comma
}

fn is_closing_bracket(node: &Node<'_>) -> bool {
    matches!(
        node.kind(),
        SyntaxKind::Other(")") | SyntaxKind::Other("]") | SyntaxKind::Other("}")
    )
}
