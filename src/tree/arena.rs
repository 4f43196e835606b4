use compact_str::CompactString;

use crate::geometry::{Point, Rect};

/// Delimiter between the segments of an entity id.
pub const ID_DELIMITER: char = '/';

/// Index into the arena `Vec<Entity>`. Uses u32 to save memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node of the weighted hierarchy, stored in a flat arena.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Full `/`-delimited path. Empty for the root.
    pub id: CompactString,
    /// One weight per revision. For internal nodes: sum of the children.
    pub weights: Vec<f64>,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    /// Children in insertion order
    pub children: Vec<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u32,
    /// Fixed reference location, seeded by a squarified pass.
    pub anchor_point: Option<Point>,
    /// Working copy of the anchor, remapped during an Nmap pass.
    pub moving_point: Option<Point>,
    rectangle: Option<Rect>,
    past_rectangle: Option<Rect>,
    history: Vec<Option<Rect>>,
}

impl Entity {
    pub fn new(id: &str, revisions: usize) -> Self {
        Self {
            id: CompactString::new(id),
            weights: vec![0.0; revisions],
            parent: None,
            children: Vec::new(),
            depth: 0,
            anchor_point: None,
            moving_point: None,
            rectangle: None,
            past_rectangle: None,
            history: vec![None; revisions],
        }
    }

    /// Last path segment, the part worth printing in a label.
    pub fn short_id(&self) -> &str {
        self.id.rsplit(ID_DELIMITER).next().unwrap_or("")
    }

    pub fn weight(&self, revision: usize) -> f64 {
        self.weights.get(revision).copied().unwrap_or(0.0)
    }

    pub fn set_weight(&mut self, weight: f64, revision: usize) {
        if let Some(slot) = self.weights.get_mut(revision) {
            *slot = weight;
        }
    }

    pub fn number_of_revisions(&self) -> usize {
        self.weights.len()
    }

    pub fn maximum_weight(&self) -> f64 {
        self.weights.iter().copied().fold(0.0, f64::max)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn rectangle(&self) -> Option<Rect> {
        self.rectangle
    }

    pub fn past_rectangle(&self) -> Option<Rect> {
        self.past_rectangle
    }

    /// Rectangle last assigned while laying out `revision`.
    pub fn rectangle_at(&self, revision: usize) -> Option<Rect> {
        self.history.get(revision).copied().flatten()
    }

    /// Replace the current rectangle. The previous one (or the new one, if
    /// there was none) becomes the blend origin.
    pub fn set_rectangle(&mut self, rect: Option<Rect>, revision: usize) {
        self.past_rectangle = match self.rectangle {
            Some(current) => Some(current),
            None => rect,
        };
        self.rectangle = rect;
        if let (Some(rect), Some(slot)) = (rect, self.history.get_mut(revision)) {
            *slot = Some(rect);
        }
    }

    /// Drop every rectangle, including history.
    pub fn clear_rectangles(&mut self) {
        self.rectangle = None;
        self.past_rectangle = None;
        self.history.iter_mut().for_each(|slot| *slot = None);
    }

    /// Set both anchor and moving point.
    pub fn init_point(&mut self, point: Point) {
        self.anchor_point = Some(point);
        self.moving_point = Some(point);
    }

    /// Interpolated draw geometry between the past and current rectangle.
    pub fn drawable_rectangle(&self, progress: f64) -> Option<Rect> {
        let current = self.rectangle?;
        let past = self.past_rectangle.unwrap_or(current);
        Some(Rect::blend(&past, &current, progress))
    }

    /// Aspect ratio of the current rectangle, 0 when there is none.
    pub fn aspect_ratio(&self) -> f64 {
        self.rectangle.map(|r| r.aspect_ratio()).unwrap_or(0.0)
    }
}

/// The entity hierarchy stored as a flat arena of nodes.
#[derive(Debug, Clone)]
pub struct EntityTree {
    /// All nodes in contiguous memory
    pub nodes: Vec<Entity>,
    /// Root node index
    pub root: NodeId,
    revisions: usize,
}

impl EntityTree {
    /// Create a tree holding only the (empty-id) root.
    pub fn new(revisions: usize) -> Self {
        EntityTree {
            nodes: vec![Entity::new("", revisions)],
            root: NodeId(0),
            revisions,
        }
    }

    /// Append a child under `parent`. Returns the new node's ID.
    pub fn add_child(&mut self, parent: NodeId, id: &str) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        let mut node = Entity::new(id, self.revisions);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;

        self.nodes[parent.index()].children.push(new_id);
        self.nodes.push(node);
        new_id
    }

    /// Get a node by ID.
    pub fn get(&self, id: NodeId) -> &Entity {
        &self.nodes[id.index()]
    }

    /// Get a mutable node by ID.
    pub fn get_mut(&mut self, id: NodeId) -> &mut Entity {
        &mut self.nodes[id.index()]
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree holds nothing but the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn number_of_revisions(&self) -> usize {
        self.revisions
    }

    pub fn children(&self, parent: NodeId) -> &[NodeId] {
        &self.nodes[parent.index()].children
    }

    /// Look up a node by full id. Linear; meant for tests and tooling.
    pub fn find(&self, id: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|e| e.id == id)
            .map(|i| NodeId(i as u32))
    }

    /// Depth-first, pre-order list of every node starting at the root.
    pub fn flatten(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }
        out
    }

    pub fn clear_rectangles(&mut self) {
        self.nodes.iter_mut().for_each(Entity::clear_rectangles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EntityTree {
        let mut tree = EntityTree::new(2);
        let a = tree.add_child(tree.root, "a");
        tree.add_child(a, "a/x");
        tree.add_child(a, "a/y");
        tree.add_child(tree.root, "b");
        tree
    }

    #[test]
    fn flatten_is_depth_first_preorder() {
        let tree = sample();
        let ids: Vec<&str> = tree.flatten().iter().map(|&n| tree.get(n).id.as_str()).collect();
        assert_eq!(ids, vec!["", "a", "a/x", "a/y", "b"]);
    }

    #[test]
    fn short_id_is_last_segment() {
        let tree = sample();
        let x = tree.find("a/x").unwrap();
        assert_eq!(tree.get(x).short_id(), "x");
        assert_eq!(tree.get(tree.root).short_id(), "");
        assert_eq!(tree.get(x).depth, 2);
    }

    #[test]
    fn depth_counts_past_sixteen_bits() {
        let mut tree = EntityTree::new(1);
        let mut node = tree.root;
        for _ in 0..70_000 {
            node = tree.add_child(node, "n");
        }
        assert_eq!(tree.get(node).depth, 70_000);
    }

    #[test]
    fn set_rectangle_keeps_previous_as_past() {
        let mut e = Entity::new("e", 2);
        let first = Rect::new(0.0, 0.0, 10.0, 10.0);
        let second = Rect::new(5.0, 0.0, 5.0, 10.0);

        e.set_rectangle(Some(first), 0);
        assert_eq!(e.past_rectangle(), Some(first));

        e.set_rectangle(Some(second), 1);
        assert_eq!(e.past_rectangle(), Some(first));
        assert_eq!(e.rectangle(), Some(second));
        assert_eq!(e.rectangle_at(0), Some(first));
        assert_eq!(e.rectangle_at(1), Some(second));

        assert_eq!(e.drawable_rectangle(0.0), Some(first));
        assert_eq!(e.drawable_rectangle(1.0), Some(second));
    }

    #[test]
    fn unset_rectangle_is_not_drawable() {
        let e = Entity::new("e", 1);
        assert_eq!(e.drawable_rectangle(0.5), None);
        assert_eq!(e.aspect_ratio(), 0.0);
    }

    #[test]
    fn maximum_weight_spans_revisions() {
        let mut e = Entity::new("e", 3);
        e.set_weight(2.0, 0);
        e.set_weight(5.0, 1);
        e.set_weight(1.0, 2);
        assert_eq!(e.maximum_weight(), 5.0);
        assert_eq!(e.weight(7), 0.0);
    }
}
