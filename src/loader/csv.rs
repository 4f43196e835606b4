use compact_str::CompactString;

use super::types::{LoadError, RawRecord};
use crate::tree::arena::ID_DELIMITER;

const HEADER: [&str; 2] = ["id", "weight"];

/// Parse one revision's `id,weight` file.
///
/// The format is a bare comma split (no quoting), so ids cannot contain
/// commas.
pub fn parse_csv(source_name: &str, text: &str, revision: usize) -> Result<Vec<RawRecord>, LoadError> {
    let mut lines = text.lines();

    let header = lines.next().unwrap_or("");
    let fields: Vec<&str> = header.split(',').collect();
    if fields != HEADER {
        return Err(LoadError::Header {
            source_name: source_name.to_string(),
            found: header.to_string(),
        });
    }

    let mut records = Vec::new();
    for (i, row) in lines.enumerate() {
        let line = i + 2;
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() != 2 {
            return Err(LoadError::FieldCount {
                source_name: source_name.to_string(),
                line,
                found: fields.len(),
            });
        }

        let id = fields[0];
        if id.is_empty() || id.split(ID_DELIMITER).any(str::is_empty) {
            return Err(LoadError::InvalidId {
                source_name: source_name.to_string(),
                line,
                id: id.to_string(),
            });
        }

        let weight = match fields[1].trim().parse::<f64>() {
            Ok(w) if w.is_finite() && w >= 0.0 => w,
            _ => {
                return Err(LoadError::InvalidWeight {
                    source_name: source_name.to_string(),
                    line,
                    value: fields[1].to_string(),
                })
            }
        };

        records.push(RawRecord {
            id: CompactString::new(id),
            weight,
            revision,
            line,
        });
    }

    tracing::debug!("{}: {} records for revision {}", source_name, records.len(), revision);
    Ok(records)
}
