use crate::geometry::Rect;
use crate::layout::Technique;
use crate::tree::arena::{EntityTree, NodeId};

/// Canvas and technique settings for a [`Treemap`].
#[derive(Debug, Clone, PartialEq)]
pub struct TreemapConfig {
    /// Full drawing surface width
    pub width: f64,
    /// Full drawing surface height
    pub height: f64,
    /// Inset applied on every side before laying out
    pub margin: f64,
    pub technique: Technique,
}

impl Default for TreemapConfig {
    fn default() -> Self {
        Self {
            width: 1080.0,
            height: 1080.0,
            margin: 80.0,
            technique: Technique::Squarified,
        }
    }
}

impl TreemapConfig {
    /// The rectangle the root is laid out in: the surface minus the margin.
    pub fn canvas(&self) -> Rect {
        Rect::new(
            self.margin,
            self.margin,
            (self.width - 2.0 * self.margin).max(0.0),
            (self.height - 2.0 * self.margin).max(0.0),
        )
    }
}

/// Owns the hierarchy and drives one layout technique through its revisions.
pub struct Treemap {
    tree: EntityTree,
    canvas: Rect,
    technique: Technique,
    revision: usize,
}

impl Treemap {
    pub fn new(mut tree: EntityTree, canvas: Rect, technique: Technique) -> Self {
        tree.clear_rectangles();
        let root = tree.root;
        tree.get_mut(root).set_rectangle(Some(canvas), 0);
        tracing::info!(
            "Treemap: {} entities, {} revision(s), {} in {:.0}x{:.0}",
            tree.len(),
            tree.number_of_revisions(),
            technique,
            canvas.width,
            canvas.height
        );
        Self {
            tree,
            canvas,
            technique,
            revision: 0,
        }
    }

    pub fn from_config(tree: EntityTree, config: &TreemapConfig) -> Self {
        Self::new(tree, config.canvas(), config.technique)
    }

    /// Lay the tree out for the current revision. Running it twice in a row
    /// leaves every current rectangle unchanged.
    pub fn compute(&mut self) {
        self.technique.layout(&mut self.tree, self.canvas, self.revision);
        tracing::debug!("Computed {} for revision {}", self.technique, self.revision);
    }

    /// Step to the next revision and recompute. Returns `false`, leaving
    /// everything as is, when already at the last revision.
    pub fn advance_revision(&mut self) -> bool {
        if self.revision + 1 >= self.tree.number_of_revisions() {
            tracing::info!("Already at the last revision ({})", self.revision);
            return false;
        }
        self.revision += 1;
        tracing::info!("Advancing to revision {}", self.revision);
        self.compute();
        true
    }

    /// Every entity, depth-first pre-order from the root.
    pub fn flatten(&self) -> Vec<NodeId> {
        self.tree.flatten()
    }

    /// Rectangle to draw at `progress` through the transition into the
    /// current revision (0 = previous layout, 1 = current).
    pub fn drawable_rectangle(&self, id: NodeId, progress: f64) -> Option<Rect> {
        self.tree.get(id).drawable_rectangle(progress)
    }

    /// Entities weighing nothing in the current revision are not drawn.
    pub fn is_visible(&self, id: NodeId) -> bool {
        self.tree.get(id).weight(self.revision) > 0.0
    }

    pub fn tree(&self) -> &EntityTree {
        &self.tree
    }

    pub fn canvas(&self) -> Rect {
        self.canvas
    }

    pub fn technique(&self) -> Technique {
        self.technique
    }

    pub fn revision(&self) -> usize {
        self.revision
    }

    pub fn is_last_revision(&self) -> bool {
        self.revision + 1 >= self.tree.number_of_revisions()
    }
}
