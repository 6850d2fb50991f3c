//
// parser_pool.rs
//
// Thread-local parser pool for efficient parser reuse
//

use std::cell::RefCell;
use std::path::Path;
use tree_sitter::Parser;

/// TypeScript grammar flavour used to parse a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    TypeScript,
    Tsx,
}

impl Dialect {
    /// Picks the grammar from the file extension; anything that is not `.tsx`
    /// is parsed as plain TypeScript.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("tsx") => Dialect::Tsx,
            _ => Dialect::TypeScript,
        }
    }
}

thread_local! {
    static TYPESCRIPT_PARSER: RefCell<Parser> = RefCell::new({
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .expect("Failed to set TypeScript language");
        parser
    });

    static TSX_PARSER: RefCell<Parser> = RefCell::new({
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .expect("Failed to set TSX language");
        parser
    });
}

/// Execute a function with the thread-local parser for `dialect`.
/// The parser is reused across calls on the same thread.
pub fn with_parser<F, R>(dialect: Dialect, f: F) -> R
where
    F: FnOnce(&mut Parser) -> R,
{
    match dialect {
        Dialect::TypeScript => TYPESCRIPT_PARSER.with(|parser| f(&mut parser.borrow_mut())),
        Dialect::Tsx => TSX_PARSER.with(|parser| f(&mut parser.borrow_mut())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_from_path() {
        assert_eq!(Dialect::from_path(Path::new("a.spec.ts")), Dialect::TypeScript);
        assert_eq!(Dialect::from_path(Path::new("widget.component.tsx")), Dialect::Tsx);
        assert_eq!(Dialect::from_path(Path::new("no_extension")), Dialect::TypeScript);
    }

    #[test]
    fn test_parser_initialized_with_typescript_language() {
        let result = with_parser(Dialect::TypeScript, |parser| {
            parser.parse("let x: number = 1;", None).is_some()
        });
        assert!(result, "Parser should successfully parse TypeScript code");
    }

    #[test]
    fn test_parser_reuse_on_same_thread() {
        let result1 = with_parser(Dialect::TypeScript, |p| p.parse("const a = 1;", None).is_some());
        let result2 = with_parser(Dialect::TypeScript, |p| p.parse("const b = 2;", None).is_some());
        let result3 = with_parser(Dialect::Tsx, |p| p.parse("const c = <div />;", None).is_some());

        assert!(result1 && result2 && result3, "All parses should succeed");
    }

    #[test]
    fn test_parser_state_reset_between_uses() {
        let tree1 = with_parser(Dialect::TypeScript, |p| p.parse("function setup() {}", None))
            .expect("parse should succeed");
        let tree2 = with_parser(Dialect::TypeScript, |p| p.parse("let y = 42;", None))
            .expect("parse should succeed");

        let root1 = tree1.root_node();
        let root2 = tree2.root_node();
        assert_eq!(root1.kind(), "program");
        assert_eq!(root2.kind(), "program");
        let child1 = root1.child(0).map(|n| n.kind());
        let child2 = root2.child(0).map(|n| n.kind());
        assert_eq!(child1, Some("function_declaration"));
        assert_eq!(child2, Some("lexical_declaration"));
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn ts_snippet() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-z][a-zA-Z0-9]{0,5}".prop_map(|name| format!("let {}: string;", name)),
            "[a-z][a-zA-Z0-9]{0,5}".prop_map(|name| format!("const {} = autoSpy(Object);", name)),
            "[a-z][a-zA-Z0-9]{0,5}".prop_map(|name| format!("function setup{}() {{}}", name)),
            Just("export class X {}".to_string()),
            Just("describe('X', () => {});".to_string()),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_parser_instance_reuse(
            snippets in prop::collection::vec(ts_snippet(), 1..10)
        ) {
            for snippet in &snippets {
                let result = with_parser(Dialect::TypeScript, |parser| parser.parse(snippet, None));
                prop_assert!(result.is_some(), "Parser should successfully parse: {}", snippet);
            }
        }
    }
}
