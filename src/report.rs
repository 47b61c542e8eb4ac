/*!
 * Reporting functionality for filtergen
 *
 * Renders the confirmation printed after a successful run, either as a
 * single line or as tables built with the tabled library.
 */

use std::path::Path;
use std::time::Duration;

use clap::ValueEnum;
use tabled::{
    settings::{object::Columns, Alignment, Modify, Padding, Style},
    Table, Tabled,
};

use crate::types::{FileEntry, ItemKind, ManifestDocument};

/// Summary of a completed generator run
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Output file path
    pub output_file: String,
    /// Time taken to scan and write
    pub duration: Duration,
    /// Group names with their braced identifiers
    pub groups: Vec<(String, String)>,
    /// Every emitted entry, compile block first
    pub entries: Vec<FileEntry>,
    /// Files seen during scanning that matched no rule
    pub skipped_files: usize,
}

impl GenerationReport {
    /// Collect the report for a written document
    pub fn new(
        output_file: &Path,
        duration: Duration,
        doc: &ManifestDocument,
        skipped_files: usize,
    ) -> Self {
        Self {
            output_file: output_file.display().to_string(),
            duration,
            groups: doc
                .groups()
                .iter()
                .map(|g| (g.name.clone(), g.braced_id()))
                .collect(),
            entries: doc
                .entries(ItemKind::ClCompile)
                .iter()
                .chain(doc.entries(ItemKind::ClInclude))
                .cloned()
                .collect(),
            skipped_files,
        }
    }

    /// Number of entries of one kind
    pub fn count(&self, kind: ItemKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

/// Format of the report output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ReportFormat {
    /// One confirmation line
    #[default]
    Plain,
    /// Console tables
    Table,
}

/// Report generator for run results
pub struct Reporter {
    format: ReportFormat,
}

impl Reporter {
    /// Create a new reporter
    pub fn new(format: ReportFormat) -> Self {
        Self { format }
    }

    /// Generate a report string
    pub fn generate_report(&self, report: &GenerationReport) -> String {
        match self.format {
            ReportFormat::Plain => self.generate_plain_report(report),
            ReportFormat::Table => self.generate_console_report(report),
        }
    }

    /// Print the report to stdout
    pub fn print_report(&self, report: &GenerationReport) {
        println!("{}", self.generate_report(report));
    }

    fn generate_plain_report(&self, report: &GenerationReport) -> String {
        let name = Path::new(&report.output_file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| report.output_file.clone());
        format!("Generated {}", name)
    }

    // Summary table using the tabled crate
    fn create_summary_table(&self, report: &GenerationReport) -> String {
        #[derive(Tabled)]
        struct SummaryRow {
            #[tabled(rename = "Metric")]
            key: String,

            #[tabled(rename = "Value")]
            value: String,
        }

        let rows = vec![
            SummaryRow {
                key: "📂 Output File".to_string(),
                value: report.output_file.clone(),
            },
            SummaryRow {
                key: "⏱️ Process Time".to_string(),
                value: format!("{:.4?}", report.duration),
            },
            SummaryRow {
                key: "🗂️ Filters".to_string(),
                value: report.groups.len().to_string(),
            },
            SummaryRow {
                key: "📄 Compile Items".to_string(),
                value: report.count(ItemKind::ClCompile).to_string(),
            },
            SummaryRow {
                key: "📑 Include Items".to_string(),
                value: report.count(ItemKind::ClInclude).to_string(),
            },
            SummaryRow {
                key: "⏭️ Skipped Files".to_string(),
                value: report.skipped_files.to_string(),
            },
        ];

        styled(Table::new(rows))
    }

    fn create_groups_table(&self, report: &GenerationReport) -> String {
        #[derive(Tabled)]
        struct GroupRow {
            #[tabled(rename = "Filter")]
            name: String,

            #[tabled(rename = "Identifier")]
            id: String,
        }

        let rows = report.groups.iter().map(|(name, id)| GroupRow {
            name: name.clone(),
            id: id.clone(),
        });

        styled(Table::new(rows))
    }

    fn create_entries_table(&self, report: &GenerationReport) -> String {
        #[derive(Tabled)]
        struct EntryRow {
            #[tabled(rename = "Item")]
            include: String,

            #[tabled(rename = "Kind")]
            kind: String,

            #[tabled(rename = "Filter")]
            group: String,
        }

        let rows = report.entries.iter().map(|e| EntryRow {
            include: e.include.clone(),
            kind: e.kind.to_string(),
            group: e.group.clone(),
        });

        styled(Table::new(rows))
    }

    fn generate_console_report(&self, report: &GenerationReport) -> String {
        format!(
            "{}\n{}\n\n{}\n{}\n\n{}\n{}",
            "📋  ITEMS",
            self.create_entries_table(report),
            "🗂️  FILTERS",
            self.create_groups_table(report),
            "✅  MANIFEST GENERATED",
            self.create_summary_table(report)
        )
    }
}

fn styled(mut table: Table) -> String {
    table
        .with(Style::rounded())
        .with(Padding::new(1, 1, 0, 0))
        .with(Modify::new(Columns::new(..)).with(Alignment::left()));
    table.to_string()
}
