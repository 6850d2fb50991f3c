//
// cli/sync.rs
//
// File-system harness around `update`
//
// For every class file it finds the companion `*.spec.ts`, reads the class's
// constructor parameters, computes the removal edits for the spec and writes
// the patched spec back (unless --dry-run).
//
// Directories are walked recursively; only class files that already have a
// spec file are picked up there. Files are processed in parallel.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;
use ropey::Rope;
use serde::Serialize;
use walkdir::WalkDir;

use crate::class_reader::read_class_signature;
use crate::config::{SeparatorPolicy, UpdateConfig};
use crate::edit::Edit;
use crate::patch::apply_edits;
use crate::update::plan_update;

/// Parsed arguments for a sync run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncArgs {
    pub paths: Vec<PathBuf>,
    pub class_name: Option<String>,
    pub config: UpdateConfig,
    pub dry_run: bool,
    pub json: bool,
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Help,
    Version,
    Sync(SyncArgs),
}

/// Parse the CLI args following the executable name.
///
/// Expected usage: `scaffold-sync [OPTIONS] <PATH>...`. `--help` and
/// `--version` win wherever they appear, unless an earlier argument is bad.
pub fn parse_args(args: &mut impl Iterator<Item = String>) -> Result<Invocation, String> {
    let mut paths = Vec::new();
    let mut class_name = None;
    let mut config = UpdateConfig::default();
    let mut dry_run = false;
    let mut json = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--class" => {
                let name = args
                    .next()
                    .ok_or_else(|| "--class requires a class name".to_string())?;
                class_name = Some(name);
            }
            "--setup-prefix" => {
                let prefix = args
                    .next()
                    .filter(|p| !p.is_empty())
                    .ok_or_else(|| "--setup-prefix requires a non-empty prefix".to_string())?;
                config.setup_prefix = prefix;
            }
            "--legacy-separators" => config.separator_policy = SeparatorPolicy::NextChar,
            "--dry-run" => dry_run = true,
            "--json" => json = true,
            "--help" => return Ok(Invocation::Help),
            "--version" => return Ok(Invocation::Version),
            other if other.starts_with('-') => {
                return Err(format!("Unknown flag: '{}'", other));
            }
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    if paths.is_empty() {
        return Err("Missing required <PATH> argument".to_string());
    }
    if class_name.is_some() && paths.len() > 1 {
        return Err("--class can only be used with a single class file".to_string());
    }

    Ok(Invocation::Sync(SyncArgs {
        paths,
        class_name,
        config,
        dry_run,
        json,
    }))
}

/// `foo.component.ts` → `foo.component.spec.ts`, next to the class file.
pub fn spec_path_for(class_path: &Path) -> PathBuf {
    let stem = class_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = class_path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "ts".to_string());
    class_path.with_file_name(format!("{}.spec.{}", stem, ext))
}

fn is_class_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    (name.ends_with(".ts") || name.ends_with(".tsx"))
        && !name.ends_with(".d.ts")
        && !name.contains(".spec.")
}

/// Expand `paths` into class files. Files are taken as given; directories
/// contribute every class file that already has a spec file.
pub fn collect_class_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let walker = WalkDir::new(path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "node_modules");
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    log::warn!("skipping unreadable entry: {}", err);
                    continue;
                }
            };
            let candidate = entry.path();
            if entry.file_type().is_file()
                && is_class_file(candidate)
                && spec_path_for(candidate).is_file()
            {
                files.push(candidate.to_path_buf());
            }
        }
    }
    files
}

/// An edit plus its 1-based position in the spec file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocatedEdit {
    #[serde(flatten)]
    pub edit: Edit,
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum SyncStatus {
    Updated { edits: Vec<LocatedEdit> },
    UpToDate,
    /// There is nothing to update; generating a new spec is out of scope.
    NoSpecFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncReport {
    pub class_file: PathBuf,
    pub spec_file: PathBuf,
    pub class_name: String,
    /// Constructor parameters the spec does not wire; left for a human.
    pub unwired: Vec<String>,
    #[serde(flatten)]
    pub status: SyncStatus,
}

/// Bring the spec file of `class_path` in line with the class's constructor.
pub fn sync_class_file(
    class_path: &Path,
    class_name: Option<&str>,
    config: &UpdateConfig,
    dry_run: bool,
) -> Result<SyncReport> {
    let class_source = fs::read_to_string(class_path)
        .with_context(|| format!("Failed to read class file {}", class_path.display()))?;
    let signature = read_class_signature(class_path, &class_source, class_name)?;

    let spec_path = spec_path_for(class_path);
    let mut report = SyncReport {
        class_file: class_path.to_path_buf(),
        spec_file: spec_path.clone(),
        class_name: signature.name.clone(),
        unwired: Vec::new(),
        status: SyncStatus::NoSpecFile,
    };
    if !spec_path.is_file() {
        log::info!("{}: no spec file, nothing to update", class_path.display());
        return Ok(report);
    }

    let spec_source = fs::read_to_string(&spec_path)
        .with_context(|| format!("Failed to read spec file {}", spec_path.display()))?;
    let plan = plan_update(
        &spec_path,
        &spec_source,
        &signature.dependencies,
        &signature.name,
        config,
    )?;
    report.unwired = plan.unwired.iter().map(|d| d.name.clone()).collect();

    if plan.edits.is_empty() {
        report.status = SyncStatus::UpToDate;
        return Ok(report);
    }

    let rope = Rope::from_str(&spec_source);
    let located = plan
        .edits
        .iter()
        .map(|edit| {
            let (line, column) = edit.line_col(&rope);
            LocatedEdit {
                edit: edit.clone(),
                line: line + 1,
                column: column + 1,
            }
        })
        .collect();

    if !dry_run {
        let patched = apply_edits(&spec_source, &plan.edits)?;
        fs::write(&spec_path, patched)
            .with_context(|| format!("Failed to write spec file {}", spec_path.display()))?;
        log::info!("{}: removed {} stale reference(s)", spec_path.display(), plan.edits.len());
    }

    report.status = SyncStatus::Updated { edits: located };
    Ok(report)
}

/// Human-readable summary of one report.
pub fn format_report(report: &SyncReport, dry_run: bool) -> String {
    let mut lines = Vec::new();
    match &report.status {
        SyncStatus::Updated { edits } => {
            let verb = if dry_run { "would update" } else { "updated" };
            lines.push(format!(
                "{} {} ({} edit{})",
                verb,
                report.spec_file.display(),
                edits.len(),
                if edits.len() == 1 { "" } else { "s" }
            ));
            lines.extend(edits.iter().map(|located| {
                format!(
                    "  {}:{}:{}  remove {:?}",
                    report.spec_file.display(),
                    located.line,
                    located.column,
                    located.edit.text.trim()
                )
            }));
        }
        SyncStatus::UpToDate => {
            lines.push(format!("up to date {}", report.spec_file.display()));
        }
        SyncStatus::NoSpecFile => {
            lines.push(format!("no spec file for {}", report.class_file.display()));
        }
    }
    if !report.unwired.is_empty() {
        lines.push(format!(
            "  not wired in setup (add by hand): {}",
            report.unwired.join(", ")
        ));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Run a sync over every class file named by `args`. Returns the number of
/// files that could not be updated.
pub fn run(args: &SyncArgs) -> Result<usize> {
    let class_files = collect_class_files(&args.paths);
    log::debug!("syncing {} class file(s)", class_files.len());

    let results: Vec<(PathBuf, Result<SyncReport>)> = class_files
        .par_iter()
        .map(|path| {
            let result =
                sync_class_file(path, args.class_name.as_deref(), &args.config, args.dry_run);
            (path.clone(), result)
        })
        .collect();

    let mut reports = Vec::new();
    let mut failures = 0;
    for (path, result) in results {
        match result {
            Ok(report) => reports.push(report),
            Err(err) => {
                failures += 1;
                log::error!("{}: {:#}", path.display(), err);
                eprintln!("cannot update existing test file for {}: {:#}", path.display(), err);
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", format_report(report, args.dry_run));
        }
    }

    Ok(failures)
}
