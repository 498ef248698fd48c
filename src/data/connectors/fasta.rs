use super::SequenceSource;
use crate::error::{DesignError, Result};
use bio::io::fasta;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Residues of the first record read from `reader`.
///
/// `None` when the input holds no record or the first record has no residues.
/// Text before the first `>` header is a format error.
pub fn read_first_record<R: Read>(reader: R) -> Result<Option<String>> {
    let record = match fasta::Reader::new(reader).records().next() {
        Some(record) => record.map_err(|e| DesignError::InvalidFasta(e.to_string()))?,
        None => return Ok(None),
    };
    record
        .check()
        .map_err(|e| DesignError::InvalidFasta(format!("record {}: {}", record.id(), e)))?;

    let sequence = String::from_utf8(record.seq().to_vec())
        .map_err(|e| DesignError::InvalidFasta(e.to_string()))?;
    Ok((!sequence.is_empty()).then_some(sequence))
}

pub fn parse_fasta(text: &str) -> Result<Option<String>> {
    read_first_record(text.as_bytes())
}

/// Local FASTA files, either one file for every gene id or one file per id
pub struct FastaFile {
    paths: HashMap<String, PathBuf>,
    fallback: Option<PathBuf>,
}

impl FastaFile {
    /// Serve `path` regardless of the requested gene id
    pub fn single<P: AsRef<Path>>(path: P) -> Self {
        Self {
            paths: HashMap::new(),
            fallback: Some(path.as_ref().to_path_buf()),
        }
    }

    pub fn mapped() -> Self {
        Self {
            paths: HashMap::new(),
            fallback: None,
        }
    }

    pub fn with_gene<P: AsRef<Path>>(mut self, gene_id: impl Into<String>, path: P) -> Self {
        self.paths.insert(gene_id.into(), path.as_ref().to_path_buf());
        self
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Option<String>> {
        let file = File::open(path.as_ref()).map_err(|e| {
            DesignError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read FASTA {}: {}", path.as_ref().display(), e),
            ))
        })?;
        read_first_record(file)
    }
}

impl SequenceSource for FastaFile {
    fn fetch(&self, gene_id: &str) -> Result<Option<String>> {
        match self.paths.get(gene_id).or(self.fallback.as_ref()) {
            Some(path) => Self::load(path),
            None => Ok(None),
        }
    }
}
