use std::collections::HashMap;

use crate::tree::arena::NodeId;

/// Labels are only recomputed at this step of the transition progress.
const REFRESH_STEP: f64 = 0.2;
const REFRESH_WINDOW: f64 = 0.01;

/// Whether a label computed earlier in the transition should be refreshed.
pub fn should_refresh(progress: f64) -> bool {
    progress.rem_euclid(REFRESH_STEP) < REFRESH_WINDOW
}

/// Cut `name` to what fits in `width` with fixed-width characters, leaving
/// half a character of padding. Empty when nothing fits.
pub fn truncate(name: &str, width: f64, char_width: f64) -> String {
    if char_width <= 0.0 {
        return String::new();
    }
    let available = width - char_width / 2.0;
    let count = name.chars().count();
    if available > char_width * count as f64 {
        return name.to_string();
    }
    let fits = (available / char_width).floor().max(0.0) as usize;
    name.chars().take(fits).collect()
}

/// Per-entity label text, reused between throttled refreshes.
#[derive(Debug, Default)]
pub struct LabelCache {
    labels: HashMap<NodeId, String>,
}

impl LabelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Label for `id`, recomputed when the cache is empty for it or the
    /// progress hits a refresh step.
    pub fn label(&mut self, id: NodeId, name: &str, width: f64, char_width: f64, progress: f64) -> &str {
        let refresh = should_refresh(progress) || !self.labels.contains_key(&id);
        let label = self.labels.entry(id).or_default();
        if refresh {
            *label = truncate(name, width, char_width);
        }
        label
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
