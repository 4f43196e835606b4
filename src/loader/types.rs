use std::path::PathBuf;

use compact_str::CompactString;
use thiserror::Error;

/// One `id,weight` row, collected before tree construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    /// Full `/`-delimited entity id
    pub id: CompactString,
    /// Weight for `revision`
    pub weight: f64,
    /// Revision (input file) the row came from
    pub revision: usize,
    /// 1-based line number within its source, for diagnostics
    pub line: usize,
}

/// Fatal input errors. No partial hierarchy is produced when one occurs.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no input files given")]
    NoInput,

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{source_name}: header must be exactly `id,weight`, found `{found}`")]
    Header { source_name: String, found: String },

    #[error("{source_name}:{line}: expected 2 fields, found {found}")]
    FieldCount {
        source_name: String,
        line: usize,
        found: usize,
    },

    #[error("{source_name}:{line}: invalid weight `{value}`")]
    InvalidWeight {
        source_name: String,
        line: usize,
        value: String,
    },

    #[error("{source_name}:{line}: invalid id `{id}`")]
    InvalidId {
        source_name: String,
        line: usize,
        id: String,
    },
}
