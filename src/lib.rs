/*!
 * filtergen - Generate Visual Studio .vcxproj.filters manifests
 *
 * Scans the known subdirectories of a native project, classifies files by
 * suffix and writes a filters document grouping them into IDE folders.
 */

pub mod config;
pub mod error;
pub mod generator;
pub mod report;
pub mod scanner;
pub mod types;
pub mod utils;
pub mod writer;


// Re-export main components for easier access
pub use config::{Config, IdStrategy, Layout};
pub use error::{FilterGenError, Result};
pub use generator::Generator;
pub use report::{GenerationReport, ReportFormat, Reporter};
pub use scanner::Scanner;
pub use types::{FileEntry, Group, ItemKind, ManifestDocument};
pub use writer::XmlWriter;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
