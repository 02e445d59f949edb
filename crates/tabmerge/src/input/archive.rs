//! In-memory ZIP archive reading.

use std::io::{Cursor, Read, Seek};
use std::path::Path;

use tracing::{debug, warn};
use zip::ZipArchive;

use super::parser::FileKind;
use crate::error::{MergeError, Result};

/// Resource-fork entries macOS adds when zipping from Finder.
const MACOS_METADATA_DIR: &str = "__MACOSX/";

/// Upper bound on the buffer reserved up front for one entry. The declared
/// size comes from the archive itself and is not trusted beyond this.
const MAX_PREALLOCATION: usize = 8 * 1024 * 1024;

/// A supported file pulled out of an archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Path of the entry inside the archive.
    pub name: String,
    /// Parser to dispatch to.
    pub kind: FileKind,
    /// Decompressed bytes, or the reason they could not be read.
    pub data: std::result::Result<Vec<u8>, String>,
}

/// Everything found in an archive.
#[derive(Debug, Clone, Default)]
pub struct ArchiveContents {
    /// Supported entries, in archive order.
    pub entries: Vec<ArchiveEntry>,
    /// Entries skipped because their type is not supported.
    pub skipped: Vec<String>,
    /// Number of file entries in the archive (directories excluded).
    pub total_files: usize,
}

/// Read a ZIP archive from disk.
pub fn read_archive(path: impl AsRef<Path>) -> Result<ArchiveContents> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| MergeError::io(path, e))?;
    read_from(file)
}

/// Read a ZIP archive held in memory.
pub fn read_archive_bytes(bytes: &[u8]) -> Result<ArchiveContents> {
    read_from(Cursor::new(bytes))
}

fn read_from<R: Read + Seek>(reader: R) -> Result<ArchiveContents> {
    let mut archive = ZipArchive::new(reader)?;
    if archive.is_empty() {
        return Err(MergeError::EmptyArchive);
    }

    let mut contents = ArchiveContents::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        contents.total_files += 1;

        let kind = match FileKind::from_name(&name) {
            Some(kind) if !name.starts_with(MACOS_METADATA_DIR) => kind,
            _ => {
                warn!(file = %name, "skipping unsupported file");
                contents.skipped.push(name);
                continue;
            }
        };

        let mut buf = Vec::with_capacity(initial_capacity(entry.size()));
        let data = match entry.read_to_end(&mut buf) {
            Ok(_) => Ok(buf),
            Err(e) => Err(e.to_string()),
        };

        debug!(file = %name, %kind, "extracted archive entry");
        contents.entries.push(ArchiveEntry { name, kind, data });
    }

    Ok(contents)
}

fn initial_capacity(declared: u64) -> usize {
    usize::try_from(declared)
        .unwrap_or(usize::MAX)
        .min(MAX_PREALLOCATION)
}
