use crate::app::error::{CombineError, Result};
use globset::{GlobBuilder, GlobMatcher};
use ignore::{DirEntry, WalkBuilder};
use pathdiff::diff_paths;
use std::path::{Path, PathBuf};

/// Finds files under a root whose root-relative path matches an include glob
/// and does not match an exclude glob.
pub struct Locator {
    root: PathBuf,
    include: GlobMatcher,
    exclude: Option<GlobMatcher>,
    prune: Option<GlobMatcher>,
}

impl Locator {
    /// An empty `exclude` disables exclusion. `case_insensitive` applies to both globs.
    pub fn new(
        root: impl Into<PathBuf>,
        include: &str,
        exclude: &str,
        case_insensitive: bool,
    ) -> Result<Self> {
        let exclude = exclude.trim();
        let (exclude, prune) = if exclude.is_empty() {
            (None, None)
        } else {
            (
                Some(compile(exclude, case_insensitive)?),
                prune_matcher(exclude, case_insensitive)?,
            )
        };

        Ok(Self {
            root: root.into(),
            include: compile(include, case_insensitive)?,
            exclude,
            prune,
        })
    }

    /// Walks the tree and returns matching paths sorted by their full path string.
    pub fn locate(&self) -> Vec<PathBuf> {
        let mut paths = Vec::new();

        let root = self.root.clone();
        let prune = self.prune.clone();

        // Host search semantics: hidden files are searched, ignore files are not honoured.
        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                if entry.file_name() == ".git" {
                    return false;
                }
                match (&prune, entry.file_type()) {
                    (Some(prune), Some(t)) if t.is_dir() => diff_paths(entry.path(), &root)
                        .map_or(true, |relative| !prune.is_match(relative)),
                    _ => true,
                }
            })
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    if let Some(path) = self.process_entry(&entry) {
                        paths.push(path);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        // OsStr ordering is byte order, i.e. plain string order rather than per-component.
        paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        paths
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<PathBuf> {
        if !entry.file_type().is_some_and(|t| t.is_file()) {
            return None;
        }

        let path = entry.path();
        let relative = diff_paths(path, &self.root)?;

        if let Some(exclude) = &self.exclude {
            if exclude.is_match(&relative) {
                log::debug!("Excluded {}", relative.display());
                return None;
            }
        }

        if !self.include.is_match(&relative) {
            return None;
        }

        log::debug!("Matched {}", relative.display());
        Some(path.to_path_buf())
    }
}

/// Build a case-sensitive `Locator` and run it once.
pub fn locate(root: &Path, include: &str, exclude: &str) -> Result<Vec<PathBuf>> {
    Ok(Locator::new(root, include, exclude, false)?.locate())
}

fn compile(pattern: &str, case_insensitive: bool) -> Result<GlobMatcher> {
    let glob = GlobBuilder::new(pattern)
        .literal_separator(true)
        .case_insensitive(case_insensitive)
        .build()
        .map_err(|source| CombineError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
    Ok(glob.compile_matcher())
}

/// `X/**` excludes everything below any directory matching `X`, so such directories
/// are not descended into at all. Other exclude shapes are only applied per file.
fn prune_matcher(exclude: &str, case_insensitive: bool) -> Result<Option<GlobMatcher>> {
    match exclude.strip_suffix("/**") {
        Some(dir) if !dir.is_empty() => Ok(Some(compile(dir, case_insensitive)?)),
        _ => Ok(None),
    }
}
