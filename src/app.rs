// Declare modules
pub mod aggregator;
pub mod cli;
pub mod config;
pub mod error;
pub mod locator;
pub mod models;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use self::aggregator::Aggregator;
use self::cli::Cli;
use self::config::resolve_settings;
use self::error::CombineError;
use self::locator::Locator;
use self::models::{Outcome, Settings};

/// Parses args, wires up logging and runs one combine pass.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    init_logger(args.log_level());

    // 2. Identify Workspace Root
    let root = match &args.root {
        Some(root) => root.clone(),
        None => env::current_dir().context("Failed to get current directory")?,
    };

    // 3. Resolve Settings (fresh every run)
    let settings = resolve_settings(&args, &root)?;

    // 4. Locate + Aggregate
    let outcome = combine(&root, &settings).context("Error combining README files")?;

    // 5. Report
    if let Outcome::Combined {
        output_path,
        summary,
    } = outcome
    {
        println!(
            "Successfully combined {} file(s) into {}",
            summary.combined, settings.output_file_name
        );
        if !summary.failures.is_empty() {
            println!("Skipped {} unreadable file(s)", summary.failures.len());
        }
        println!("Output file: {}", output_path.display());
    }

    Ok(())
}

/// Locates matching files under `root` and writes them into the configured output file.
///
/// Returns `Outcome::NoMatches` without touching the output when nothing matches.
/// The output file itself is never fed back in as an input.
pub fn combine(root: &Path, settings: &Settings) -> Result<Outcome, CombineError> {
    let root = resolve_workspace(root)?;

    log::info!(
        "Searching for files matching '{}' in {}",
        settings.file_pattern,
        root.display()
    );
    let mut paths = Locator::new(
        &root,
        &settings.file_pattern,
        &settings.exclude_pattern,
        settings.case_insensitive,
    )?
    .locate();

    let output_path = root.join(&settings.output_file_name);
    paths.retain(|p| *p != output_path);

    if paths.is_empty() {
        log::warn!(
            "No files matching '{}' found in {}",
            settings.file_pattern,
            root.display()
        );
        return Ok(Outcome::NoMatches);
    }

    log::info!("Found {} file(s)", paths.len());
    let summary = Aggregator::aggregate(&paths, &output_path)?;

    Ok(Outcome::Combined {
        output_path,
        summary,
    })
}

fn resolve_workspace(root: &Path) -> Result<PathBuf, CombineError> {
    let no_workspace = |source| CombineError::NoWorkspace {
        path: root.to_path_buf(),
        source,
    };

    let canonical = fs::canonicalize(root).map_err(no_workspace)?;
    if !canonical.is_dir() {
        return Err(no_workspace(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    Ok(canonical)
}

fn init_logger(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn combines_sorted_readmes_into_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b/README.md", "B");
        write(dir.path(), "a/README.md", "A");

        let outcome = combine(dir.path(), &Settings::default()).unwrap();

        let Outcome::Combined {
            output_path,
            summary,
        } = outcome
        else {
            panic!("expected a combined outcome");
        };
        assert_eq!(summary.combined, 2);
        assert_eq!(output_path.file_name().unwrap(), "allreadme.txt");

        let root = fs::canonicalize(dir.path()).unwrap();
        let text = fs::read_to_string(&output_path).unwrap();
        let header = |folder: &str| {
            format!("FILE: {}", root.join(folder).join("README.md").display())
        };
        let a = text.find(&header("a")).unwrap();
        let b = text.find(&header("b")).unwrap();
        assert!(a < b);
        assert!(text.ends_with(&format!("\n{}\n", aggregator::rule())));
    }

    #[test]
    fn no_matches_leaves_output_untouched() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "docs/guide.md", "guide");

        let outcome = combine(dir.path(), &Settings::default()).unwrap();

        assert!(matches!(outcome, Outcome::NoMatches));
        assert!(!dir.path().join("allreadme.txt").exists());
    }

    #[test]
    fn output_file_is_not_combined_into_itself() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "notes/todo.txt", "todo");
        let settings = Settings {
            file_pattern: "**/*.txt".into(),
            ..Settings::default()
        };

        combine(dir.path(), &settings).unwrap();
        let first = fs::read(dir.path().join("allreadme.txt")).unwrap();
        combine(dir.path(), &settings).unwrap();
        let second = fs::read(dir.path().join("allreadme.txt")).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn case_insensitive_setting_finds_mixed_case_readmes() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a/readme.md", "lower");
        write(dir.path(), "b/Readme.md", "title");
        let settings = Settings {
            case_insensitive: true,
            ..Settings::default()
        };

        let Outcome::Combined { summary, .. } = combine(dir.path(), &settings).unwrap() else {
            panic!("expected a combined outcome");
        };

        assert_eq!(summary.combined, 2);
    }

    #[test]
    fn missing_workspace_is_fatal() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("not-here");

        let err = combine(&missing, &Settings::default()).unwrap_err();

        assert!(matches!(err, CombineError::NoWorkspace { .. }));
    }

    #[test]
    fn file_as_workspace_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", "x");

        let err = combine(&dir.path().join("README.md"), &Settings::default()).unwrap_err();

        assert!(matches!(err, CombineError::NoWorkspace { .. }));
    }

    #[test]
    fn output_in_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "README.md", "x");
        let settings = Settings {
            output_file_name: "nope/combined.txt".into(),
            ..Settings::default()
        };

        let err = combine(dir.path(), &settings).unwrap_err();

        assert!(matches!(err, CombineError::OutputWrite { .. }));
    }
}
