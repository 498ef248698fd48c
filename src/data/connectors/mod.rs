mod fasta;
mod memory;

pub use fasta::{parse_fasta, read_first_record, FastaFile};
pub use memory::StaticSource;

use crate::error::Result;

/// Where raw sequences come from. `Ok(None)` means the gene id is unknown to the source.
pub trait SequenceSource: Send + Sync {
    fn fetch(&self, gene_id: &str) -> Result<Option<String>>;
}
