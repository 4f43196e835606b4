//! HierarchyLoader: turns per-revision `id,weight` files into an [`EntityTree`].
//!
//! Each input file holds one revision; the files are read in revision order.

pub mod csv;
pub mod types;

use std::path::Path;

use crate::tree::{self, arena::EntityTree};

pub use self::csv::parse_csv;
pub use self::types::{LoadError, RawRecord};

/// Read every file (one revision each) and build the summed hierarchy.
pub fn load_revisions<P: AsRef<Path>>(paths: &[P]) -> Result<EntityTree, LoadError> {
    let mut sources = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        sources.push((path.display().to_string(), text));
    }
    tracing::info!("Loaded {} revision file(s)", sources.len());
    load_sources(&sources)
}

/// Same as [`load_revisions`] over in-memory `(name, text)` pairs.
pub fn load_sources<N: AsRef<str>, T: AsRef<str>>(sources: &[(N, T)]) -> Result<EntityTree, LoadError> {
    if sources.is_empty() {
        return Err(LoadError::NoInput);
    }

    let mut records = Vec::new();
    for (revision, (name, text)) in sources.iter().enumerate() {
        records.extend(parse_csv(name.as_ref(), text.as_ref(), revision)?);
    }
    Ok(tree::build_tree(&records, sources.len()))
}
