//! The `info` view: metadata, chunk list and data totals.

use std::fmt;

use cas_reader_core::{ChunkInfo, ChunkStore, DecodeStats, Metadata};
use serde::Serialize;

/// Everything `info` shows about one file.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub file: String,
    pub metadata: Metadata,
    pub chunks: Vec<ChunkInfo>,
    pub data_bytes: usize,
    pub data_crc32: u32,
    pub trailing_bytes: usize,
}

impl InfoReport {
    pub fn build(file: &str, store: &ChunkStore, stats: &DecodeStats) -> Self {
        Self {
            file: file.to_string(),
            metadata: store.metadata(),
            chunks: store.describe_chunks(),
            data_bytes: store.to_flat_bytes().len(),
            data_crc32: store.data_crc32(),
            trailing_bytes: stats.trailing_bytes(),
        }
    }

    pub fn to_text(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for InfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = &self.metadata;

        writeln!(f, "CAS File: {}", self.file)?;
        writeln!(f)?;
        writeln!(f, "Metadata:")?;
        writeln!(f, "  description: {}", meta.description.as_deref().unwrap_or("(none)"))?;
        writeln!(f, "  baud_rate: {}", meta.baud_rate)?;
        writeln!(f, "  chunk_count: {}", meta.chunk_count)?;
        writeln!(f, "  data_block_count: {}", meta.data_block_count)?;
        writeln!(f)?;
        writeln!(f, "Chunks:")?;
        for info in &self.chunks {
            writeln!(
                f,
                "  [{}] {}: {} bytes (aux: {})",
                info.index, info.type_name, info.length, info.aux_data
            )?;
        }
        writeln!(f)?;
        writeln!(f, "Total data bytes: {}", self.data_bytes)?;
        writeln!(f, "Data CRC-32: {:#010x}", self.data_crc32)
    }
}
