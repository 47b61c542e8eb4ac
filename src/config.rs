/*!
 * Configuration handling for filtergen
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use clap_complete::Shell;
use serde::Deserialize;

use crate::error::{FilterGenError, Result};
use crate::report::ReportFormat;
use crate::types::ItemKind;
use crate::utils::{HEADER_EXTENSIONS, SOURCE_EXTENSIONS};

/// How group identifiers are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum IdStrategy {
    /// Fresh random identifier for every group on every run
    #[default]
    Random,
    /// Identifier derived from the group name, identical across runs
    Stable,
}

/// Command-line arguments for filtergen
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "filtergen",
    version = env!("CARGO_PKG_VERSION"),
    about = "Generate a .vcxproj.filters manifest for a native project",
    long_about = "Scans the configured subdirectories of a native project and writes a Visual Studio filters document grouping sources and headers into IDE folders."
)]
pub struct Args {
    /// Project root (defaults to the layout's root)
    pub project_root: Option<PathBuf>,

    /// Output file, relative to the project root unless absolute
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// JSON file describing groups, fixed entries and scanned directories
    #[clap(long, value_name = "FILE")]
    pub layout: Option<PathBuf>,

    /// Group identifier strategy
    #[clap(long, value_enum, default_value_t = IdStrategy::default())]
    pub ids: IdStrategy,

    /// Sort discovered files by name instead of keeping directory listing order
    #[clap(long)]
    pub sort: bool,

    /// Confirmation output format
    #[clap(long, value_enum, default_value_t = ReportFormat::default())]
    pub report: ReportFormat,

    /// Generate shell completions
    #[clap(long = "generate", value_enum)]
    pub generate: Option<Shell>,
}

/// A generic group declared up front
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupSpec {
    pub name: String,
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
}

/// A file that is always listed, independent of scanning
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FixedEntry {
    pub path: String,
    pub kind: ItemKind,
    pub group: String,
}

/// Maps file names matching a glob pattern to an item kind
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClassifyRule {
    pub pattern: String,
    pub kind: ItemKind,
}

/// A subdirectory whose immediate files are classified into one group
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScanSpec {
    /// Directory relative to the project root
    pub subdirectory: String,
    /// Group name, defaults to the subdirectory name
    #[serde(default)]
    pub group: Option<String>,
    /// Classification rules, first match wins
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassifyRule>,
}

impl ScanSpec {
    /// Name of the group owning this directory's files
    pub fn group_name(&self) -> &str {
        self.group.as_deref().unwrap_or(&self.subdirectory)
    }
}

fn default_rules() -> Vec<ClassifyRule> {
    vec![
        ClassifyRule {
            pattern: "*.cpp".to_string(),
            kind: ItemKind::ClCompile,
        },
        ClassifyRule {
            pattern: "*.h".to_string(),
            kind: ItemKind::ClInclude,
        },
    ]
}

/// Project layout knowledge
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Layout {
    /// Project root directory
    pub root: PathBuf,
    /// Manifest file name, relative to the root unless absolute
    pub output_file: PathBuf,
    pub groups: Vec<GroupSpec>,
    pub fixed_entries: Vec<FixedEntry>,
    pub scans: Vec<ScanSpec>,
}

impl Default for Layout {
    fn default() -> Self {
        let extensions = |list: &[&str]| -> Option<Vec<String>> {
            Some(list.iter().map(|e| e.to_string()).collect())
        };

        Self {
            root: PathBuf::from("src").join("Lightroom.Core"),
            output_file: PathBuf::from("Lightroom.Core.vcxproj.filters"),
            groups: vec![
                GroupSpec {
                    name: "Source Files".to_string(),
                    extensions: extensions(SOURCE_EXTENSIONS),
                },
                GroupSpec {
                    name: "Header Files".to_string(),
                    extensions: extensions(HEADER_EXTENSIONS),
                },
            ],
            fixed_entries: vec![
                FixedEntry {
                    path: "LightroomSDK.cpp".to_string(),
                    kind: ItemKind::ClCompile,
                    group: "Source Files".to_string(),
                },
                FixedEntry {
                    path: "LightroomSDK.h".to_string(),
                    kind: ItemKind::ClInclude,
                    group: "Header Files".to_string(),
                },
            ],
            scans: vec![ScanSpec {
                subdirectory: "d3d11rhi".to_string(),
                group: None,
                rules: default_rules(),
            }],
        }
    }
}

impl Layout {
    /// Load a layout from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            crate::error!(Config, "Cannot read layout {}: {}", path.display(), e)
        })?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Check that group names are unique and every reference resolves
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let declared = self
            .groups
            .iter()
            .map(|g| g.name.as_str())
            .chain(self.scans.iter().map(ScanSpec::group_name));
        for name in declared {
            crate::ensure!(!name.is_empty(), Config, "Group names must not be empty");
            crate::ensure!(names.insert(name), Config, "Duplicate group name: {}", name);
        }

        for entry in &self.fixed_entries {
            crate::ensure!(
                names.contains(entry.group.as_str()),
                Config,
                "Fixed entry {} references unknown group {}",
                entry.path,
                entry.group
            );
        }

        for scan in &self.scans {
            crate::ensure!(
                !scan.subdirectory.is_empty(),
                Config,
                "Scanned subdirectory must not be empty"
            );
            crate::ensure!(
                !scan.rules.is_empty(),
                Config,
                "No classification rules for {}",
                scan.subdirectory
            );
            crate::ensure!(
                scan.rules.iter().all(|r| !r.pattern.is_empty()),
                Config,
                "Empty classification pattern for {}",
                scan.subdirectory
            );
        }

        Ok(())
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Project root directory
    pub project_root: PathBuf,

    /// Output file path as configured
    pub output_file: PathBuf,

    /// Groups, fixed entries and scans
    pub layout: Layout,

    /// Group identifier strategy
    pub id_strategy: IdStrategy,

    /// Sort discovered entries by file name
    pub sort_entries: bool,

    /// Confirmation output format
    pub report_format: ReportFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_layout(Layout::default())
    }
}

impl Config {
    /// Configuration for a layout with default run options
    pub fn from_layout(layout: Layout) -> Self {
        Self {
            project_root: layout.root.clone(),
            output_file: layout.output_file.clone(),
            layout,
            id_strategy: IdStrategy::default(),
            sort_entries: false,
            report_format: ReportFormat::default(),
        }
    }

    /// Create configuration from command-line arguments
    pub fn from_args(args: Args) -> Result<Self> {
        let layout = match &args.layout {
            Some(path) => Layout::from_file(path)?,
            None => Layout::default(),
        };

        let mut config = Self::from_layout(layout);
        if let Some(root) = args.project_root {
            config.project_root = root;
        }
        if let Some(output) = args.output {
            config.output_file = output;
        }
        config.id_strategy = args.ids;
        config.sort_entries = args.sort;
        config.report_format = args.report;

        Ok(config)
    }

    /// Resolved destination of the manifest
    pub fn output_path(&self) -> PathBuf {
        if self.output_file.is_absolute() {
            self.output_file.clone()
        } else {
            self.project_root.join(&self.output_file)
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.project_root.is_dir() {
            return Err(FilterGenError::InvalidArgument(format!(
                "Project root not found: {}",
                self.project_root.display()
            )));
        }

        crate::ensure!(
            !self.output_file.as_os_str().is_empty(),
            InvalidArgument,
            "Output file must not be empty"
        );

        self.layout.validate()
    }
}
