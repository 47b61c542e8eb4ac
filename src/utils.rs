/*!
 * Utility functions for filtergen
 */

use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::config::IdStrategy;

/// Extensions the IDE associates with the generic source group
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "cpp", "c", "cc", "cxx", "c++", "def", "odl", "idl", "hpj", "bat", "asm", "asmx",
];

/// Extensions the IDE associates with the generic header group
pub const HEADER_EXTENSIONS: &[&str] = &[
    "h", "hh", "hpp", "hxx", "h++", "hm", "inl", "inc", "ipp", "xsd",
];

/// Namespace for name-derived group identifiers
static STABLE_ID_NAMESPACE: Lazy<Uuid> =
    Lazy::new(|| Uuid::new_v5(&Uuid::NAMESPACE_OID, b"filtergen.vcxproj.filters"));

/// Produce an identifier for a group
pub fn group_id(strategy: IdStrategy, name: &str) -> Uuid {
    match strategy {
        IdStrategy::Random => Uuid::new_v4(),
        IdStrategy::Stable => Uuid::new_v5(&STABLE_ID_NAMESPACE, name.as_bytes()),
    }
}

/// Build the project-relative include path the project system expects
///
/// Separators are normalized to backslashes.
pub fn include_path(subdirectory: &str, file_name: &str) -> String {
    let dir = subdirectory.trim_end_matches(['/', '\\']).replace('/', "\\");
    if dir.is_empty() {
        file_name.to_string()
    } else {
        format!("{}\\{}", dir, file_name)
    }
}

/// Join an extension list the way the filters format stores it
pub fn join_extensions(extensions: &[String]) -> String {
    extensions.join(";")
}
