/*!
 * Manifest generation: scan, assemble, write
 */

use std::time::Instant;

use tracing::debug;

use crate::config::Config;
use crate::error::Result;
use crate::report::GenerationReport;
use crate::scanner::{DirectoryScan, Scanner};
use crate::types::{FileEntry, Group, ManifestDocument};
use crate::utils::group_id;
use crate::writer::XmlWriter;

/// Drives one generator run
pub struct Generator {
    config: Config,
}

impl Generator {
    /// Create a generator for a validated configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Scan, build and write the manifest
    ///
    /// Scanning finishes before the output is touched, so a missing
    /// subdirectory leaves any previous manifest in place.
    pub fn run(&self) -> Result<GenerationReport> {
        let start_time = Instant::now();

        let scans = Scanner::new(self.config.clone()).scan()?;
        let doc = self.build_document(&scans)?;
        let output = XmlWriter::new(self.config.clone()).write(&doc)?;

        let skipped = scans.iter().map(|s| s.skipped.len()).sum();
        Ok(GenerationReport::new(&output, start_time.elapsed(), &doc, skipped))
    }

    /// Assemble the document from the layout and scan results
    pub fn build_document(&self, scans: &[DirectoryScan]) -> Result<ManifestDocument> {
        let layout = &self.config.layout;
        let strategy = self.config.id_strategy;
        let mut doc = ManifestDocument::new();

        for spec in &layout.groups {
            doc.add_group(Group {
                name: spec.name.clone(),
                id: group_id(strategy, &spec.name),
                extensions: spec.extensions.clone(),
            })?;
        }
        for scan in scans {
            doc.add_group(Group {
                name: scan.group.clone(),
                id: group_id(strategy, &scan.group),
                extensions: None,
            })?;
        }

        // Fixed entries lead each block
        for fixed in &layout.fixed_entries {
            doc.push_entry(FileEntry {
                include: fixed.path.clone(),
                kind: fixed.kind,
                group: fixed.group.clone(),
            })?;
        }

        for scan in scans {
            for entry in &scan.entries {
                doc.push_entry(entry.clone())?;
            }
        }

        debug!(
            groups = doc.groups().len(),
            entries = doc.entry_count(),
            "manifest assembled"
        );
        Ok(doc)
    }
}
