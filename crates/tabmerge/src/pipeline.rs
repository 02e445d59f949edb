//! Main TabMerge struct and public API.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::Result;
use crate::input::{read_archive, read_archive_bytes, ArchiveContents, Parser, ParserConfig, SourceMetadata};
use crate::merge::{BatchMerger, MergeReport, ParsedFile};
use crate::schema::CanonicalSchema;

/// Configuration for a merge run.
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Columns every merged file must carry.
    pub schema: CanonicalSchema,
    /// Process files on the rayon pool.
    pub parallel: bool,
    /// Rows shown in previews of the merged table.
    pub preview_rows: usize,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            schema: CanonicalSchema::default(),
            parallel: false,
            preview_rows: 10,
        }
    }
}

/// Result of merging an archive.
#[derive(Debug, Clone, Serialize)]
pub struct ArchiveMerge {
    /// Archive entries skipped as unsupported.
    pub skipped: Vec<String>,
    /// Metadata for every file that parsed.
    pub sources: Vec<SourceMetadata>,
    /// Per-file outcomes and the merged table.
    pub report: MergeReport,
    /// When the merge ran.
    pub generated_at: DateTime<Utc>,
}

/// The main merge engine: archive in, canonical table out.
#[derive(Debug, Clone)]
pub struct TabMerge {
    config: MergeConfig,
    parser: Parser,
}

impl TabMerge {
    /// Create a TabMerge instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(MergeConfig::default())
    }

    /// Create a TabMerge instance with custom configuration.
    pub fn with_config(config: MergeConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    /// Replace the canonical schema.
    pub fn with_schema(mut self, schema: CanonicalSchema) -> Self {
        self.config.schema = schema;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &MergeConfig {
        &self.config
    }

    /// Canonical schema in use.
    pub fn schema(&self) -> &CanonicalSchema {
        &self.config.schema
    }

    /// Merge every supported file in a ZIP archive on disk.
    pub fn merge_archive(&self, path: impl AsRef<Path>) -> Result<ArchiveMerge> {
        let path = path.as_ref();
        info!(archive = %path.display(), "merging archive");
        self.merge_contents(read_archive(path)?)
    }

    /// Merge every supported file in a ZIP archive held in memory.
    pub fn merge_archive_bytes(&self, bytes: &[u8]) -> Result<ArchiveMerge> {
        self.merge_contents(read_archive_bytes(bytes)?)
    }

    /// Parse the archive's entries; failures become per-file read failures.
    pub fn parse_contents(&self, contents: ArchiveContents) -> (Vec<ParsedFile>, Vec<SourceMetadata>) {
        let mut files = Vec::with_capacity(contents.entries.len());
        let mut sources = Vec::new();

        for entry in contents.entries {
            let parsed = entry
                .data
                .and_then(|bytes| {
                    self.parser
                        .parse_bytes(&entry.name, &bytes)
                        .map_err(|e| e.to_string())
                });

            match parsed {
                Ok((table, metadata)) => {
                    debug!(file = %entry.name, rows = table.row_count(), "parsed");
                    sources.push(metadata);
                    files.push(ParsedFile::parsed(entry.name, table));
                }
                Err(reason) => files.push(ParsedFile::failed(entry.name, reason)),
            }
        }

        (files, sources)
    }

    /// Merge already-parsed files.
    pub fn merge_files(&self, files: Vec<ParsedFile>) -> Result<MergeReport> {
        BatchMerger::new(&self.config.schema)
            .parallel(self.config.parallel)
            .merge(files)
    }

    fn merge_contents(&self, contents: ArchiveContents) -> Result<ArchiveMerge> {
        let skipped = contents.skipped.clone();
        let (files, sources) = self.parse_contents(contents);
        let report = self.merge_files(files)?;

        Ok(ArchiveMerge {
            skipped,
            sources,
            report,
            generated_at: Utc::now(),
        })
    }
}

impl Default for TabMerge {
    fn default() -> Self {
        Self::new()
    }
}
