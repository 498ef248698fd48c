use super::SequenceSource;
use crate::error::Result;
use std::collections::HashMap;

/// Fixed gene id to sequence map
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    sequences: HashMap<String, String>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sequence(mut self, gene_id: impl Into<String>, sequence: impl Into<String>) -> Self {
        self.sequences.insert(gene_id.into(), sequence.into());
        self
    }
}

impl SequenceSource for StaticSource {
    fn fetch(&self, gene_id: &str) -> Result<Option<String>> {
        Ok(self.sequences.get(gene_id).cloned())
    }
}
