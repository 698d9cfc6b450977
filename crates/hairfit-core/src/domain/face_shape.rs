//! Face shape categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Coarse facial outline category.
///
/// Variant order is significant: score ties resolve to the variant that
/// comes first in [`FaceShape::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceShape {
    Oval,
    Round,
    Square,
    Heart,
    Long,
    Diamond,
}

impl FaceShape {
    /// Every variant, in enumeration order.
    pub const ALL: [Self; 6] = [
        Self::Oval,
        Self::Round,
        Self::Square,
        Self::Heart,
        Self::Long,
        Self::Diamond,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oval => "oval",
            Self::Round => "round",
            Self::Square => "square",
            Self::Heart => "heart",
            Self::Long => "long",
            Self::Diamond => "diamond",
        }
    }
}

impl fmt::Display for FaceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown face shape name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown face shape '{0}'")]
pub struct UnknownFaceShape(pub String);

impl FromStr for FaceShape {
    type Err = UnknownFaceShape;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|shape| shape.as_str() == name)
            .ok_or_else(|| UnknownFaceShape(s.to_string()))
    }
}
