use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_PATTERN: &str = "**/README.md";
pub const DEFAULT_EXCLUDE_PATTERN: &str = "**/node_modules/**";
pub const DEFAULT_OUTPUT_FILE_NAME: &str = "allreadme.txt";

/// Represents the final configuration after layering settings files and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file_pattern: String,
    pub exclude_pattern: String,
    pub output_file_name: String,
    pub case_insensitive: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            file_pattern: DEFAULT_FILE_PATTERN.to_string(),
            exclude_pattern: DEFAULT_EXCLUDE_PATTERN.to_string(),
            output_file_name: DEFAULT_OUTPUT_FILE_NAME.to_string(),
            case_insensitive: false,
        }
    }
}

/// A located file and the folder that contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub folder: PathBuf,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let folder = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Self { path, folder }
    }
}

/// Result of reading one entry. Only `Ok` content becomes a block in the output.
#[derive(Debug)]
pub struct ReadOutcome {
    pub entry: FileEntry,
    pub content: io::Result<String>,
}

#[derive(Debug)]
pub struct FileReadFailure {
    pub path: PathBuf,
    pub message: String,
}

/// What the aggregator reports back once the output has been written.
#[derive(Debug, Default)]
pub struct AggregationSummary {
    pub combined: usize,
    pub failures: Vec<FileReadFailure>,
}

#[derive(Debug)]
pub enum Outcome {
    /// Nothing matched; the output file was not touched.
    NoMatches,
    Combined {
        output_path: PathBuf,
        summary: AggregationSummary,
    },
}
