//! Input handling: archives, file-type dispatch and parsing.

mod archive;
mod parser;
mod source;

pub use archive::{read_archive, read_archive_bytes, ArchiveContents, ArchiveEntry};
pub use parser::{FileKind, Parser, ParserConfig};
pub use source::{DataTable, SourceMetadata};
