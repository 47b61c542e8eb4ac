/*!
 * XML writer for .vcxproj.filters documents
 */

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tempfile::NamedTempFile;
use tracing::info;

use crate::config::Config;
use crate::error::{FilterGenError, Result};
use crate::types::{FileEntry, Group, ItemKind, ManifestDocument};
use crate::utils::join_extensions;

/// MSBuild project namespace
pub const MSBUILD_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// Tools version stamped on the project element
pub const TOOLS_VERSION: &str = "4.0";

/// XML writer for manifest documents
pub struct XmlWriter {
    /// Writer configuration
    config: Config,
}

impl XmlWriter {
    /// Create a new XML writer
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Write the manifest to the configured output path
    ///
    /// The destination is replaced atomically: it either holds the complete
    /// new document or is left as it was.
    pub fn write(&self, doc: &ManifestDocument) -> Result<PathBuf> {
        let path = self.config.output_path();
        let bytes = self.render(doc)?;

        persist_atomically(&path, &bytes).map_err(|source| FilterGenError::Output {
            path: path.clone(),
            source,
        })?;

        info!(output = %path.display(), bytes = bytes.len(), "manifest written");
        Ok(path)
    }

    /// Serialize the manifest to UTF-8 bytes
    pub fn render(&self, doc: &ManifestDocument) -> io::Result<Vec<u8>> {
        let mut xml_writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        xml_writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;

        let mut project = BytesStart::new("Project");
        project.push_attribute(("ToolsVersion", TOOLS_VERSION));
        project.push_attribute(("xmlns", MSBUILD_NAMESPACE));
        xml_writer.write_event(Event::Start(project))?;

        self.write_groups(doc.groups(), &mut xml_writer)?;
        self.write_items(ItemKind::ClCompile, doc.entries(ItemKind::ClCompile), &mut xml_writer)?;
        self.write_items(ItemKind::ClInclude, doc.entries(ItemKind::ClInclude), &mut xml_writer)?;

        xml_writer.write_event(Event::End(BytesEnd::new("Project")))?;

        let mut bytes = xml_writer.into_inner();
        bytes.push(b'\n');
        Ok(bytes)
    }

    /// Write the filter declarations
    fn write_groups<W: Write>(&self, groups: &[Group], writer: &mut Writer<W>) -> io::Result<()> {
        writer.write_event(Event::Start(BytesStart::new("ItemGroup")))?;

        for group in groups {
            let mut start_tag = BytesStart::new("Filter");
            start_tag.push_attribute(("Include", group.name.as_str()));
            writer.write_event(Event::Start(start_tag))?;

            write_text_element(writer, "UniqueIdentifier", &group.braced_id())?;
            if let Some(extensions) = &group.extensions {
                write_text_element(writer, "Extensions", &join_extensions(extensions))?;
            }

            writer.write_event(Event::End(BytesEnd::new("Filter")))?;
        }

        writer.write_event(Event::End(BytesEnd::new("ItemGroup")))?;
        Ok(())
    }

    /// Write one item block, one element per entry
    fn write_items<W: Write>(
        &self,
        kind: ItemKind,
        entries: &[FileEntry],
        writer: &mut Writer<W>,
    ) -> io::Result<()> {
        writer.write_event(Event::Start(BytesStart::new("ItemGroup")))?;

        for entry in entries {
            let mut start_tag = BytesStart::new(kind.as_ref());
            start_tag.push_attribute(("Include", entry.include.as_str()));
            writer.write_event(Event::Start(start_tag))?;
            write_text_element(writer, "Filter", &entry.group)?;
            writer.write_event(Event::End(BytesEnd::new(kind.as_ref())))?;
        }

        writer.write_event(Event::End(BytesEnd::new("ItemGroup")))?;
        Ok(())
    }
}

/// Write `<tag>text</tag>`
fn write_text_element<W: Write>(writer: &mut Writer<W>, tag: &str, text: &str) -> io::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Mode given to a manifest that did not exist before
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Write to a sibling temporary file, then rename it over `path`
///
/// A read-only destination is refused rather than replaced.
fn persist_atomically(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let existing = match fs::metadata(path) {
        Ok(metadata) => Some(metadata),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => return Err(e),
    };
    if let Some(metadata) = &existing {
        if metadata.permissions().readonly() {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "destination is read-only",
            ));
        }
    }

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    match existing {
        // Keep the mode of a file being replaced
        Some(metadata) => tmp.as_file().set_permissions(metadata.permissions())?,
        None => set_new_file_mode(tmp.as_file())?,
    }

    tmp.persist(path)?;
    Ok(())
}

#[cfg(unix)]
fn set_new_file_mode(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn set_new_file_mode(_file: &fs::File) -> io::Result<()> {
    Ok(())
}
