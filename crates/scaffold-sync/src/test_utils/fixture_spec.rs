//! Deterministic generator for generated-style spec files and their classes.
//!
//! Produces the same `setup()`/builder shape the scaffold template writes, so
//! tests and benchmarks can drift a class away from its spec and check what
//! the update engine does about it.
//!
//! All output is deterministic (no randomness), so benchmarks are reproducible.

use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A class and the spec generated for an older version of it.
#[derive(Debug, Clone)]
pub struct ScaffoldFixture {
    /// File name without extension, e.g. `to-update`.
    pub stem: String,
    pub class_name: String,
    /// Dependencies the spec's setup function wires.
    pub wired: Vec<String>,
    /// Constructor parameters the class has now.
    pub current: Vec<String>,
}

impl ScaffoldFixture {
    /// Spec and class agree on `dependencies`.
    pub fn in_sync(stem: &str, class_name: &str, dependencies: &[&str]) -> Self {
        Self::drifted(stem, class_name, dependencies, dependencies)
    }

    pub fn drifted(stem: &str, class_name: &str, wired: &[&str], current: &[&str]) -> Self {
        Self {
            stem: stem.to_string(),
            class_name: class_name.to_string(),
            wired: wired.iter().map(|s| s.to_string()).collect(),
            current: current.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Wide fixture for benchmarks: `count` wired dependencies, every
    /// `stale_every`-th of which the class no longer takes.
    pub fn wide(count: usize, stale_every: usize) -> Self {
        let wired: Vec<String> = (0..count).map(|i| format!("dep{}", i)).collect();
        let current = wired
            .iter()
            .enumerate()
            .filter(|(i, _)| stale_every == 0 || i % stale_every != 0)
            .map(|(_, name)| name.clone())
            .collect();
        Self {
            stem: "wide".to_string(),
            class_name: "Wide".to_string(),
            wired,
            current,
        }
    }

    pub fn class_source(&self) -> String {
        let params = self
            .current
            .iter()
            .map(|name| format!("{}: {}", name, type_for(name)))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "export class {} {{\n  constructor({}) {{}}\n}}\n",
            self.class_name, params
        )
    }

    pub fn spec_source(&self) -> String {
        render_spec(&self.stem, &self.class_name, &self.wired)
    }
}

/// `service` → `Service`.
fn type_for(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Render a spec file in the generated scaffold layout.
pub fn render_spec(stem: &str, class_name: &str, dependencies: &[String]) -> String {
    let mut out = String::new();

    writeln!(out, "import {{ {} }} from './{}';", class_name, stem).unwrap();
    out.push('\n');
    writeln!(out, "describe('{}', () => {{", class_name).unwrap();
    writeln!(out, "  it('when build is called it should construct', () => {{").unwrap();
    writeln!(out, "    // arrange").unwrap();
    writeln!(out, "    const {{ build }} = setup().default();").unwrap();
    writeln!(out, "    // act").unwrap();
    writeln!(out, "    const instance = build();").unwrap();
    writeln!(out, "    // assert").unwrap();
    writeln!(out, "    expect(instance).toBeTruthy();").unwrap();
    writeln!(out, "  }});").unwrap();
    writeln!(out, "}});").unwrap();
    out.push('\n');

    writeln!(out, "function setup() {{").unwrap();
    for name in dependencies {
        writeln!(out, "  let {}: {};", name, type_for(name)).unwrap();
    }
    writeln!(out, "  const builder = {{").unwrap();
    for name in dependencies {
        writeln!(out, "    {},", name).unwrap();
    }
    writeln!(out, "    default() {{").unwrap();
    writeln!(out, "      return builder;").unwrap();
    writeln!(out, "    }},").unwrap();
    writeln!(out, "    build() {{").unwrap();
    writeln!(
        out,
        "      return new {}({});",
        class_name,
        dependencies.join(", ")
    )
    .unwrap();
    writeln!(out, "    }}").unwrap();
    writeln!(out, "  }};").unwrap();
    out.push('\n');
    writeln!(out, "  return builder;").unwrap();
    writeln!(out, "}}").unwrap();

    out
}

/// Temporary directory holding fixture classes and specs.
pub struct FixtureWorkspace {
    dir: TempDir,
}

impl FixtureWorkspace {
    /// Write `<stem>.ts` and `<stem>.spec.ts` for every fixture.
    pub fn create(fixtures: &[ScaffoldFixture]) -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let workspace = Self { dir };
        for fixture in fixtures {
            workspace.write(&format!("{}.ts", fixture.stem), &fixture.class_source());
            workspace.write(&format!("{}.spec.ts", fixture.stem), &fixture.spec_source());
        }
        workspace
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn class_path(&self, stem: &str) -> PathBuf {
        self.root().join(format!("{}.ts", stem))
    }

    /// Write `content` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.root().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        fs::write(&path, content).expect("Failed to write fixture file");
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_deterministic() {
        let fixture = ScaffoldFixture::in_sync("widget", "Widget", &["a", "b"]);
        assert_eq!(fixture.spec_source(), fixture.spec_source());
    }

    #[test]
    fn test_spec_layout() {
        let spec = render_spec("widget", "Widget", &["service".to_string()]);
        assert!(spec.contains("function setup() {\n  let service: Service;\n  const builder = {\n    service,\n"));
        assert!(spec.contains("return new Widget(service);"));
    }

    #[test]
    fn test_class_source() {
        let fixture = ScaffoldFixture::in_sync("widget", "Widget", &["a", "service"]);
        assert_eq!(
            fixture.class_source(),
            "export class Widget {\n  constructor(a: A, service: Service) {}\n}\n"
        );
    }

    #[test]
    fn test_wide_fixture() {
        let fixture = ScaffoldFixture::wide(6, 3);
        assert_eq!(fixture.wired.len(), 6);
        assert_eq!(fixture.current, vec!["dep1", "dep2", "dep4", "dep5"]);
    }

    #[test]
    fn test_workspace_writes_files() {
        let workspace = FixtureWorkspace::create(&[ScaffoldFixture::in_sync("w", "W", &["a"])]);
        assert!(workspace.class_path("w").is_file());
        assert!(workspace.root().join("w.spec.ts").is_file());
    }
}
