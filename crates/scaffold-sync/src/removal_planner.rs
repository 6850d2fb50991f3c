//
// removal_planner.rs
//
// Decides which spans of the setup function disappear for a set of stale names
//

use std::collections::HashSet;
use std::ops::Range;

use indexmap::IndexSet;

use crate::config::SeparatorPolicy;
use crate::separator::removal_span;
use crate::syntax::{Node, NodeId, SyntaxKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalSite {
    /// A whole `let`/`const` statement of the setup body.
    Declaration,
    /// A reference to the name anywhere else in the setup function.
    Usage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedRemoval<'a> {
    pub site: RemovalSite,
    /// Stale name this removal belongs to.
    pub name: &'a str,
    pub span: Range<usize>,
}

/// Plan one removal per declaration statement and per usage of each stale
/// name inside `setup`.
///
/// Declarations come first, then usages, each group in source order. Usages
/// never include declared names or anything inside a removed declaration, so
/// the returned spans do not overlap.
pub fn plan_removals<'a>(
    setup: Node<'a>,
    stale: &IndexSet<&str>,
    policy: SeparatorPolicy,
) -> Vec<PlannedRemoval<'a>> {
    if stale.is_empty() {
        return Vec::new();
    }

    let declarations: Vec<(Node<'a>, &'a str)> = setup
        .child_by_field("body")
        .into_iter()
        .flat_map(|body| body.significant_children())
        .filter(|node| node.kind() == SyntaxKind::VariableStatement)
        .filter_map(|statement| {
            declared_names(statement)
                .find(|name| stale.contains(*name))
                .map(|name| (statement, name))
        })
        .collect();

    let usages: Vec<Node<'a>> = setup
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Identifier)
        .filter(|node| stale.contains(node.text()))
        .filter(|node| !is_declared_name(*node))
        .filter(|node| !declarations.iter().any(|(decl, _)| node.is_within(*decl)))
        .collect();

    let removed: HashSet<NodeId> = declarations
        .iter()
        .map(|(node, _)| node.id())
        .chain(usages.iter().map(|node| node.id()))
        .collect();

    let mut removals: Vec<PlannedRemoval<'a>> = declarations
        .iter()
        .map(|(node, name)| PlannedRemoval {
            site: RemovalSite::Declaration,
            name: *name,
            span: removal_span(*node, policy, &removed),
        })
        .collect();
    removals.extend(usages.iter().map(|node| PlannedRemoval {
        site: RemovalSite::Usage,
        name: node.text(),
        span: removal_span(*node, policy, &removed),
    }));

    log::debug!(
        "planned {} declaration and {} usage removals for {:?}",
        declarations.len(),
        usages.len(),
        stale
    );
    for removal in &removals {
        log::trace!("{:?} of `{}` at {:?}", removal.site, removal.name, removal.span);
    }
    debug_assert!(spans_are_disjoint(&removals), "overlapping removals: {:?}", removals);

    removals
}

/// Names bound by the declarators of a variable statement.
fn declared_names<'a>(statement: Node<'a>) -> impl Iterator<Item = &'a str> + 'a {
    statement
        .children()
        .filter(|node| node.kind() == SyntaxKind::VariableDeclarator)
        .filter_map(|declarator| declarator.child_by_field("name"))
        .filter(|name| name.kind() == SyntaxKind::Identifier)
        .map(|name| name.text())
}

fn is_declared_name(identifier: Node<'_>) -> bool {
    identifier.field() == Some("name")
        && identifier
            .parent()
            .is_some_and(|p| p.kind() == SyntaxKind::VariableDeclarator)
}

fn spans_are_disjoint(removals: &[PlannedRemoval<'_>]) -> bool {
    let mut spans: Vec<&Range<usize>> = removals.iter().map(|r| &r.span).collect();
    spans.sort_by_key(|span| span.start);
    spans.windows(2).all(|pair| pair[0].end <= pair[1].start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::setup_locator::find_setup_function;
    use crate::syntax::parse;
    use std::path::Path;

    const FIXTURE: &str = r#"import { ToUpdate } from "./to-update";

describe("ToUpdate", () => {});

function setup() {
  let stringDependency: string;
  const service = autoSpy(Object);
  const builder = {
    stringDependency,
    service,
    default() {
      return builder;
    },
    build() {
      return new ToUpdate(stringDependency, service);
    }
  };

  return builder;
}"#;

    fn plan(code: &str, stale: &[&str], policy: SeparatorPolicy) -> Vec<(RemovalSite, String)> {
        let tree = parse(Path::new("to-update.spec.ts"), code);
        let setup = find_setup_function(&tree, "setup").expect("setup function");
        let stale: IndexSet<&str> = stale.iter().copied().collect();
        plan_removals(setup.node, &stale, policy)
            .into_iter()
            .map(|r| (r.site, code[r.span].to_string()))
            .collect()
    }

    #[test]
    fn test_nothing_stale_plans_nothing() {
        assert!(plan(FIXTURE, &[], SeparatorPolicy::ListAware).is_empty());
    }

    #[test]
    fn test_one_declaration_two_usages() {
        let removals = plan(FIXTURE, &["stringDependency"], SeparatorPolicy::ListAware);
        assert_eq!(
            removals,
            vec![
                (RemovalSite::Declaration, "\n  let stringDependency: string;".to_string()),
                (RemovalSite::Usage, "\n    stringDependency,".to_string()),
                (RemovalSite::Usage, "stringDependency,".to_string()),
            ]
        );
    }

    #[test]
    fn test_declarations_come_before_usages() {
        let removals = plan(FIXTURE, &["stringDependency", "service"], SeparatorPolicy::ListAware);
        let sites: Vec<RemovalSite> = removals.iter().map(|(site, _)| *site).collect();
        assert_eq!(
            sites,
            vec![
                RemovalSite::Declaration,
                RemovalSite::Declaration,
                RemovalSite::Usage,
                RemovalSite::Usage,
                RemovalSite::Usage,
                RemovalSite::Usage,
            ]
        );
        assert_eq!(removals[1].1, "\n  const service = autoSpy(Object);");
        // Both constructor arguments go, so neither keeps a comma behind.
        assert_eq!(removals[4].1, "stringDependency");
        assert_eq!(removals[5].1, ", service");
    }

    #[test]
    fn test_legacy_policy_keeps_leading_comma() {
        let removals = plan(FIXTURE, &["service"], SeparatorPolicy::NextChar);
        let texts: Vec<&str> = removals.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(
            texts,
            vec!["\n  const service = autoSpy(Object);", "\n    service,", " service"]
        );
    }

    #[test]
    fn test_removals_name_their_stale_dependency() {
        let tree = parse(Path::new("to-update.spec.ts"), FIXTURE);
        let setup = find_setup_function(&tree, "setup").expect("setup function");
        let stale: IndexSet<&str> = ["service", "stringDependency"].into_iter().collect();
        let names: Vec<(RemovalSite, &str)> =
            plan_removals(setup.node, &stale, SeparatorPolicy::ListAware)
                .iter()
                .map(|r| (r.site, r.name))
                .collect();
        assert_eq!(
            names,
            vec![
                (RemovalSite::Declaration, "stringDependency"),
                (RemovalSite::Declaration, "service"),
                (RemovalSite::Usage, "stringDependency"),
                (RemovalSite::Usage, "service"),
                (RemovalSite::Usage, "stringDependency"),
                (RemovalSite::Usage, "service"),
            ]
        );
    }

    #[test]
    fn test_nested_declaration_name_is_not_a_usage() {
        let code = r#"function setup() {
  const builder = {
    build() {
      const service = make();
      return new Widget(service);
    }
  };
  return builder;
}"#;
        let removals = plan(code, &["service"], SeparatorPolicy::ListAware);
        assert_eq!(removals, vec![(RemovalSite::Usage, "service".to_string())]);
    }

    #[test]
    fn test_usage_inside_removed_declaration_is_skipped() {
        let code = r#"function setup() {
  let config: string;
  const service = autoSpy(config);
  return new Widget(config, service);
}"#;
        let removals = plan(code, &["config", "service"], SeparatorPolicy::ListAware);
        assert_eq!(
            removals,
            vec![
                (RemovalSite::Declaration, "\n  let config: string;".to_string()),
                (RemovalSite::Declaration, "\n  const service = autoSpy(config);".to_string()),
                (RemovalSite::Usage, "config".to_string()),
                (RemovalSite::Usage, ", service".to_string()),
            ]
        );
    }

    #[test]
    fn test_member_names_are_not_usages() {
        let code = r#"function setup() {
  let service: Service;
  const builder = {
    withService(s: Service) {
      builder.service = s;
      return builder;
    },
    build() {
      return new Widget(service);
    }
  };
  return builder;
}"#;
        let removals = plan(code, &["service"], SeparatorPolicy::ListAware);
        assert_eq!(removals.len(), 2);
        assert_eq!(removals[0].0, RemovalSite::Declaration);
        assert_eq!(removals[1], (RemovalSite::Usage, "service".to_string()));
    }

    #[test]
    fn test_only_direct_body_statements_are_declarations() {
        let code = r#"function setup() {
  if (flag) {
    let service = 1;
  }
  return new Widget(service);
}"#;
        let removals = plan(code, &["service"], SeparatorPolicy::ListAware);
        assert_eq!(removals, vec![(RemovalSite::Usage, "service".to_string())]);
    }

    #[test]
    fn test_multi_declarator_statement_removed_whole() {
        let code = "function setup() {\n  let a: string, b: number;\n  return new Widget(a, b);\n}";
        let removals = plan(code, &["b"], SeparatorPolicy::ListAware);
        assert_eq!(
            removals,
            vec![
                (RemovalSite::Declaration, "\n  let a: string, b: number;".to_string()),
                (RemovalSite::Usage, ", b".to_string()),
            ]
        );
    }
}
