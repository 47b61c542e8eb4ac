/*!
 * Subdirectory scanning and file classification
 */

use std::fs;
use std::io;
use std::path::Path;

use glob_match::glob_match;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{ClassifyRule, Config, ScanSpec};
use crate::error::{FilterGenError, Result};
use crate::types::{FileEntry, ItemKind};
use crate::utils::include_path;

/// Files discovered in one scanned subdirectory
#[derive(Debug, Clone)]
pub struct DirectoryScan {
    /// Group owning the discovered files
    pub group: String,
    /// Classified files, in discovery order
    pub entries: Vec<FileEntry>,
    /// Names of files no rule matched or that are not valid UTF-8
    pub skipped: Vec<String>,
}

/// Classify a file name against ordered rules; first match wins
pub fn classify(rules: &[ClassifyRule], file_name: &str) -> Option<ItemKind> {
    rules
        .iter()
        .find(|rule| glob_match(&rule.pattern, file_name))
        .map(|rule| rule.kind)
}

/// Scanner for the configured subdirectories
pub struct Scanner {
    /// Scanner configuration
    config: Config,
}

impl Scanner {
    /// Create a new scanner
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan every configured subdirectory
    ///
    /// Fails on the first directory that is missing or unreadable.
    pub fn scan(&self) -> Result<Vec<DirectoryScan>> {
        self.config
            .layout
            .scans
            .iter()
            .map(|spec| self.scan_directory(spec))
            .collect()
    }

    /// Scan one subdirectory, non-recursively
    fn scan_directory(&self, spec: &ScanSpec) -> Result<DirectoryScan> {
        let dir = self.config.project_root.join(&spec.subdirectory);
        let wrap = |source: io::Error| FilterGenError::ScanDirectory {
            path: dir.clone(),
            source,
        };

        let (mut file_names, unrepresentable) = list_files(&dir).map_err(wrap)?;
        if self.config.sort_entries {
            file_names.sort();
        }

        let group = spec.group_name().to_string();
        let mut entries = Vec::new();
        let mut skipped = unrepresentable;

        for name in file_names {
            match classify(&spec.rules, &name) {
                Some(kind) => {
                    let include = include_path(&spec.subdirectory, &name);
                    debug!(file = %include, %kind, group = %group, "classified");
                    entries.push(FileEntry {
                        include,
                        kind,
                        group: group.clone(),
                    });
                }
                None => {
                    debug!(file = %name, "no rule matched, skipping");
                    skipped.push(name);
                }
            }
        }

        info!(
            directory = %dir.display(),
            matched = entries.len(),
            skipped = skipped.len(),
            "scanned"
        );

        Ok(DirectoryScan {
            group,
            entries,
            skipped,
        })
    }
}

/// Names of the immediate non-directory entries of `dir`, in listing order
///
/// Names that are not valid UTF-8 are returned separately, lossily rendered,
/// and never become include paths.
fn list_files(dir: &Path) -> io::Result<(Vec<String>, Vec<String>)> {
    let metadata = fs::metadata(dir)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(io::ErrorKind::NotFound, "not a directory"));
    }

    let mut names = Vec::new();
    let mut unrepresentable = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_dir() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_string()),
            None => {
                let lossy = entry.file_name().to_string_lossy().to_string();
                warn!(file = %lossy, "file name is not valid UTF-8, skipping");
                unrepresentable.push(lossy);
            }
        }
    }

    Ok((names, unrepresentable))
}
