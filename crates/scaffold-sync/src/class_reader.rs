//
// class_reader.rs
//
// Reads the constructor parameters of the class-under-test from its source
//

use std::path::Path;

use serde::Serialize;

use crate::dependency_diff::DesiredDependency;
use crate::error::ClassReadError;
use crate::syntax::{self, Node, SyntaxKind};

/// Name and constructor parameters of a class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassSignature {
    pub name: String,
    pub dependencies: Vec<DesiredDependency>,
}

/// Read the constructor parameters of `class_name`, or of the first class
/// declared in `source` when no name is given.
///
/// Parameter properties (`private readonly http: HttpClient`) count like any
/// other parameter. A class without a constructor has no dependencies.
pub fn read_class_signature(
    path: &Path,
    source: &str,
    class_name: Option<&str>,
) -> Result<ClassSignature, ClassReadError> {
    let tree = syntax::parse(path, source);

    let class = tree
        .root()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::ClassDeclaration)
        .filter_map(|node| Some((node, node.child_by_field("name")?.text())))
        .find(|(_, name)| class_name.map_or(true, |wanted| wanted == *name))
        .ok_or_else(|| ClassReadError::ClassNotFound {
            path: path.to_path_buf(),
            class_name: class_name.map(String::from),
        })?;

    let (node, name) = class;
    let dependencies = constructor(node)
        .and_then(|ctor| ctor.child_by_field("parameters"))
        .map(|params| {
            params
                .children()
                .filter(|p| p.kind() == SyntaxKind::FormalParameter)
                .filter_map(read_parameter)
                .collect()
        })
        .unwrap_or_default();

    log::debug!("{}: class `{}` takes {:?}", path.display(), name, dependencies);

    Ok(ClassSignature {
        name: name.to_string(),
        dependencies,
    })
}

fn constructor<'a>(class: Node<'a>) -> Option<Node<'a>> {
    class
        .child_by_field("body")?
        .children()
        .filter(|member| member.kind() == SyntaxKind::MethodDefinition)
        .find(|method| {
            method
                .child_by_field("name")
                .is_some_and(|name| name.text() == "constructor")
        })
}

fn read_parameter(parameter: Node<'_>) -> Option<DesiredDependency> {
    let pattern = parameter.child_by_field("pattern")?;
    if pattern.kind() != SyntaxKind::Identifier {
        log::debug!("skipping constructor parameter `{}`", parameter.text());
        return None;
    }

    let type_name = parameter.child_by_field("type").map(|annotation| {
        annotation
            .text()
            .trim_start_matches(':')
            .trim()
            .to_string()
    });

    Some(DesiredDependency {
        name: pattern.text().to_string(),
        type_name,
    })
}
