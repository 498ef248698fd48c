pub mod connectors;

pub use connectors::{parse_fasta, read_first_record, FastaFile, SequenceSource, StaticSource};
