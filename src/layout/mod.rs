pub mod check;
pub mod nmap;
pub mod ordered;
pub mod rows;
pub mod slice_dice;
pub mod spiral;
pub mod squarify;
pub mod strip;

use std::fmt;
use std::str::FromStr;

use crate::geometry::Rect;
use crate::tree::arena::EntityTree;

pub use self::nmap::NmapPolicy;
pub use self::ordered::PivotPolicy;

/// The layout algorithm a treemap is computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Technique {
    #[default]
    Squarified,
    Ordered(PivotPolicy),
    SliceAndDice,
    Strip,
    Spiral,
    Nmap(NmapPolicy),
}

impl Technique {
    /// Every technique, in the order the tools list them.
    pub const ALL: [Technique; 8] = [
        Technique::Squarified,
        Technique::Ordered(PivotPolicy::Middle),
        Technique::Ordered(PivotPolicy::Size),
        Technique::SliceAndDice,
        Technique::Strip,
        Technique::Spiral,
        Technique::Nmap(NmapPolicy::AlternateCut),
        Technique::Nmap(NmapPolicy::EqualWeight),
    ];

    /// Name accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Technique::Squarified => "squarified",
            Technique::Ordered(PivotPolicy::Middle) => "ordered-middle",
            Technique::Ordered(PivotPolicy::Size) => "ordered-size",
            Technique::SliceAndDice => "slice-and-dice",
            Technique::Strip => "strip",
            Technique::Spiral => "spiral",
            Technique::Nmap(NmapPolicy::AlternateCut) => "nmap-alternate",
            Technique::Nmap(NmapPolicy::EqualWeight) => "nmap-equal",
        }
    }

    /// Lay the whole tree out in `bounds` for `revision`, mutating rectangles
    /// (and anchor/moving points, where the technique uses them) in place.
    pub fn layout(self, tree: &mut EntityTree, bounds: Rect, revision: usize) {
        match self {
            Technique::Squarified => squarify::layout(tree, bounds, revision),
            Technique::Ordered(policy) => ordered::layout(tree, bounds, revision, policy),
            Technique::SliceAndDice => slice_dice::layout(tree, bounds, revision),
            Technique::Strip => strip::layout(tree, bounds, revision),
            Technique::Spiral => spiral::layout(tree, bounds, revision),
            Technique::Nmap(policy) => nmap::layout(tree, bounds, revision, policy),
        }
    }
}

impl fmt::Display for Technique {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown technique '{0}' (expected one of: squarified, ordered-middle, ordered-size, slice-and-dice, strip, spiral, nmap-alternate, nmap-equal)")]
pub struct UnknownTechnique(pub String);

impl FromStr for Technique {
    type Err = UnknownTechnique;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Technique::ALL
            .into_iter()
            .find(|t| t.name() == wanted)
            .ok_or_else(|| UnknownTechnique(s.to_string()))
    }
}
