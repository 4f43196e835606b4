pub mod colors;
pub mod labels;
pub mod scene;
pub mod svg;

use crate::geometry::{Point, Rect};
use colors::AppColor;

pub use labels::LabelCache;
pub use scene::build_frame;

/// Drawing settings shared by every frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Advance of one label character (fixed-width font)
    pub char_width: f64,
    /// Minimum width and height a rectangle needs before it gets a label
    pub label_threshold: f64,
    /// Label baseline relative to the rectangle corner
    pub label_offset: Point,
    pub leaf_color: AppColor,
    pub border_color: AppColor,
    pub leaf_border_opacity: f32,
    pub node_border_opacity: f32,
    pub background: AppColor,
    /// Whether labels are emitted at all
    pub show_labels: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            label_threshold: 20.0,
            label_offset: Point::new(4.0, 20.0),
            leaf_color: AppColor::LAWN_GREEN,
            border_color: AppColor::BLACK,
            leaf_border_opacity: 0.3,
            node_border_opacity: 1.0,
            background: AppColor::WHITE,
            show_labels: true,
        }
    }
}

/// One backend-agnostic drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill { rect: Rect, color: AppColor },
    Border { rect: Rect, color: AppColor },
    Label { text: String, at: Point, color: AppColor },
}

/// Everything needed to draw one moment of a transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub width: f64,
    pub height: f64,
    pub background: AppColor,
    pub commands: Vec<DrawCommand>,
}

impl Frame {
    pub fn fills(&self) -> impl Iterator<Item = (&Rect, &AppColor)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}
