use super::colors::leaf_fill;
use super::labels::LabelCache;
use super::{DrawCommand, Frame, RenderConfig};
use crate::geometry::Point;
use crate::treemap::Treemap;

/// Build the draw list for `treemap` at `progress` through the current
/// transition. Frame size is the canvas plus the same inset on the far side.
pub fn build_frame(treemap: &Treemap, progress: f64, config: &RenderConfig, labels: &mut LabelCache) -> Frame {
    let canvas = treemap.canvas();
    let tree = treemap.tree();
    let mut commands = Vec::new();

    for id in treemap.flatten() {
        if !treemap.is_visible(id) {
            continue;
        }
        let Some(rect) = treemap.drawable_rectangle(id, progress) else {
            continue;
        };
        let entity = tree.get(id);

        if entity.is_leaf() {
            commands.push(DrawCommand::Fill {
                rect,
                color: leaf_fill(config.leaf_color, entity.aspect_ratio()),
            });
        }

        let opacity = if entity.is_leaf() {
            config.leaf_border_opacity
        } else {
            config.node_border_opacity
        };
        commands.push(DrawCommand::Border {
            rect,
            color: config.border_color.with_alpha(opacity),
        });

        if config.show_labels && rect.width > config.label_threshold && rect.height > config.label_threshold {
            let text = labels.label(id, entity.short_id(), rect.width, config.char_width, progress);
            if !text.is_empty() {
                commands.push(DrawCommand::Label {
                    text: text.to_string(),
                    at: Point::new(rect.x + config.label_offset.x, rect.y + config.label_offset.y),
                    color: config.border_color,
                });
            }
        }
    }

    tracing::debug!(
        "Frame at progress {:.2}: {} commands for revision {}",
        progress,
        commands.len(),
        treemap.revision()
    );

    Frame {
        width: canvas.x * 2.0 + canvas.width,
        height: canvas.y * 2.0 + canvas.height,
        background: config.background,
        commands,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::Technique;
    use crate::render::colors::AppColor;
    use crate::tree::arena::EntityTree;

    fn treemap() -> Treemap {
        let mut tree = EntityTree::new(2);
        let dir = tree.add_child(tree.root, "dir");
        let a = tree.add_child(dir, "dir/alpha");
        let b = tree.add_child(dir, "dir/beta");
        let gone = tree.add_child(tree.root, "gone");
        tree.get_mut(a).weights = vec![1.0, 1.0];
        tree.get_mut(b).weights = vec![3.0, 1.0];
        tree.get_mut(gone).weights = vec![0.0, 2.0];
        tree.get_mut(dir).weights = vec![4.0, 2.0];
        tree.get_mut(tree.root).weights = vec![4.0, 4.0];
        let mut map = Treemap::new(tree, Rect::new(10.0, 10.0, 400.0, 100.0), Technique::SliceAndDice);
        map.compute();
        map
    }

    #[test]
    fn leaves_are_filled_and_every_visible_entity_is_bordered() {
        let map = treemap();
        let frame = build_frame(&map, 1.0, &RenderConfig::default(), &mut LabelCache::new());

        assert_eq!(frame.fills().count(), 2, "alpha and beta only");
        let borders: Vec<f32> = frame
            .commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Border { color, .. } => Some(color.a),
                _ => None,
            })
            .collect();
        // root, dir, alpha, beta; "gone" weighs nothing yet.
        assert_eq!(borders, vec![1.0, 1.0, 0.3, 0.3]);
        assert_eq!(frame.width, 420.0);
        assert_eq!(frame.height, 120.0);
    }

    #[test]
    fn labels_need_room() {
        let map = treemap();
        let frame = build_frame(&map, 1.0, &RenderConfig::default(), &mut LabelCache::new());
        let labels: Vec<&str> = frame.labels().collect();
        // Strips of the 400x100 canvas: alpha 400x25, beta 400x75.
        assert_eq!(labels, vec!["dir", "alpha", "beta"]);

        let tight = RenderConfig {
            label_threshold: 50.0,
            ..RenderConfig::default()
        };
        let frame = build_frame(&map, 1.0, &tight, &mut LabelCache::new());
        assert_eq!(frame.labels().collect::<Vec<_>>(), vec!["dir", "beta"]);
    }

    #[test]
    fn squarer_leaves_are_darker() {
        let map = treemap();
        let frame = build_frame(&map, 1.0, &RenderConfig::default(), &mut LabelCache::new());
        let fills: Vec<AppColor> = frame.fills().map(|(_, c)| *c).collect();
        // alpha is 400x25 (ratio 1/16), beta 400x75 (ratio 3/16).
        assert!(fills[0].g > fills[1].g);
        assert!((fills[0].g - AppColor::LAWN_GREEN.g * 0.9375).abs() < 1e-6);
    }
}
