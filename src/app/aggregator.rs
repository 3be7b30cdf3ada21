use crate::app::error::{CombineError, Result};
use crate::app::models::{AggregationSummary, FileEntry, FileReadFailure, ReadOutcome};
use std::fs;
use std::path::{Path, PathBuf};

pub const RULE_WIDTH: usize = 80;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

pub struct Aggregator;

impl Aggregator {
    /// Reads every path in order. A failed read is kept as an `Err` outcome and logged;
    /// it never stops the batch. Bytes that are not valid UTF-8 become U+FFFD.
    pub fn read_all(paths: &[PathBuf]) -> Vec<ReadOutcome> {
        let total = paths.len();

        paths
            .iter()
            .enumerate()
            .map(|(idx, path)| {
                let entry = FileEntry::new(path);
                let content = fs::read(&entry.path)
                    .map(|bytes| String::from_utf8_lossy(&bytes).into_owned());

                match &content {
                    Ok(_) => log::info!("[{}/{}] ✓ {}", idx + 1, total, short_name(&entry.path)),
                    Err(e) => log::warn!(
                        "[{}/{}] ✗ Error reading {}: {}",
                        idx + 1,
                        total,
                        entry.path.display(),
                        e
                    ),
                }

                ReadOutcome { entry, content }
            })
            .collect()
    }

    /// Builds the combined text. Only successfully read files get a block.
    pub fn render(outcomes: &[ReadOutcome]) -> String {
        let rule = rule();
        let mut out = String::new();

        for outcome in outcomes {
            if let Ok(content) = &outcome.content {
                out.push('\n');
                out.push_str(&rule);
                out.push('\n');
                out.push_str(&format!(
                    "\nFILE: {}\nFOLDER: {}\n",
                    outcome.entry.path.display(),
                    outcome.entry.folder.display()
                ));
                out.push_str(&rule);
                out.push_str("\n\n");
                out.push_str(content);
            }
        }

        out.push('\n');
        out.push_str(&rule);
        out.push('\n');
        out
    }

    pub fn summarize(outcomes: Vec<ReadOutcome>) -> AggregationSummary {
        let mut summary = AggregationSummary::default();

        for outcome in outcomes {
            match outcome.content {
                Ok(_) => summary.combined += 1,
                Err(e) => summary.failures.push(FileReadFailure {
                    path: outcome.entry.path,
                    message: e.to_string(),
                }),
            }
        }

        summary
    }

    /// Reads, renders and writes `paths` into `output_path`, replacing whatever was there.
    /// The write is a plain overwrite; an interrupted run can leave a partial file.
    pub fn aggregate(paths: &[PathBuf], output_path: &Path) -> Result<AggregationSummary> {
        let outcomes = Self::read_all(paths);
        let text = Self::render(&outcomes);

        fs::write(output_path, text).map_err(|source| CombineError::OutputWrite {
            path: output_path.to_path_buf(),
            source,
        })?;

        Ok(Self::summarize(outcomes))
    }
}

fn short_name(path: &Path) -> String {
    let file = path.file_name().unwrap_or_default().to_string_lossy();
    match path
        .parent()
        .and_then(|p| p.file_name())
        .map(|f| f.to_string_lossy())
    {
        Some(folder) => format!("{}/{}", folder, file),
        None => file.to_string(),
    }
}
