//! The closed set of terrain brushes and their registry table

use std::fmt;
use std::str::FromStr;

/// Terrain brush variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrushKind {
    Raise,
    Lower,
    SetHeight,
    Average,
}

/// Static description of a brush for tool selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrushInfo {
    pub kind: BrushKind,
    pub name: &'static str,
    pub tooltip: &'static str,
    /// Ascending display order
    pub order: u32,
}

/// Every brush, sorted by `order`.
pub const BRUSHES: [BrushInfo; 4] = [
    BrushInfo { kind: BrushKind::Raise, name: "Raise", tooltip: "Raise", order: 100 },
    BrushInfo { kind: BrushKind::Lower, name: "Lower", tooltip: "Lower", order: 200 },
    BrushInfo { kind: BrushKind::SetHeight, name: "Set Height", tooltip: "Set height", order: 300 },
    BrushInfo { kind: BrushKind::Average, name: "Average", tooltip: "Average", order: 400 },
];

impl BrushKind {
    /// All brushes in display order
    pub fn all() -> impl Iterator<Item = BrushKind> {
        BRUSHES.iter().map(|info| info.kind)
    }

    pub fn info(self) -> &'static BrushInfo {
        match self {
            BrushKind::Raise => &BRUSHES[0],
            BrushKind::Lower => &BRUSHES[1],
            BrushKind::SetHeight => &BRUSHES[2],
            BrushKind::Average => &BRUSHES[3],
        }
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    pub fn tooltip(self) -> &'static str {
        self.info().tooltip
    }

    pub fn order(self) -> u32 {
        self.info().order
    }
}

impl fmt::Display for BrushKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for an unknown brush name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBrush(pub String);

impl fmt::Display for UnknownBrush {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown brush: {}", self.0)
    }
}

impl std::error::Error for UnknownBrush {}

impl FromStr for BrushKind {
    type Err = UnknownBrush;

    /// Case-insensitive, ignoring spaces, dashes and underscores
    /// ("Set Height", "set_height" and "setheight" all match).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .map(|c| c.to_ascii_lowercase())
            .collect();

        BRUSHES
            .iter()
            .find(|info| info.name.replace(' ', "").eq_ignore_ascii_case(&key))
            .map(|info| info.kind)
            .ok_or_else(|| UnknownBrush(s.to_string()))
    }
}
