/// Our color representation: linear channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl AppColor {
    pub const BLACK: AppColor = AppColor::new(0.0, 0.0, 0.0);
    pub const WHITE: AppColor = AppColor::new(1.0, 1.0, 1.0);
    /// CSS `lawngreen` (#7CFC00), the leaf fill.
    pub const LAWN_GREEN: AppColor = AppColor::new(124.0 / 255.0, 252.0 / 255.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Scale the color channels by `factor` (clamped to `0..=1`), keeping alpha.
    pub fn shade(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: self.r * f,
            g: self.g * f,
            b: self.b * f,
            a: self.a,
        }
    }

    /// 8-bit channels, rounded.
    pub fn to_rgb8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// `#rrggbb`, alpha dropped.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_rgb8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

/// Leaf fill for a rectangle of the given aspect ratio: the squarer the
/// rectangle, the darker the fill.
pub fn leaf_fill(base: AppColor, aspect_ratio: f64) -> AppColor {
    base.shade((1.0 - aspect_ratio).clamp(0.0, 1.0) as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lawn_green_hex() {
        assert_eq!(AppColor::LAWN_GREEN.to_hex(), "#7cfc00");
    }

    #[test]
    fn shading_follows_aspect_ratio() {
        assert_eq!(leaf_fill(AppColor::LAWN_GREEN, 1.0).to_rgb8(), [0, 0, 0]);
        assert_eq!(leaf_fill(AppColor::LAWN_GREEN, 0.0), AppColor::LAWN_GREEN);
        assert_eq!(leaf_fill(AppColor::WHITE, 0.5).to_rgb8(), [128, 128, 128]);
        // Out-of-range ratios clamp instead of overflowing.
        assert_eq!(leaf_fill(AppColor::WHITE, -1.0), AppColor::WHITE);
    }

    #[test]
    fn alpha_is_kept_by_shade() {
        let c = AppColor::BLACK.with_alpha(0.3).shade(0.5);
        assert_eq!(c.a, 0.3);
    }
}
