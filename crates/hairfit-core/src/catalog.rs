//! Static hairstyle catalog and face-shape recommendations.

use serde::Serialize;

use crate::domain::FaceShape;

/// A hairstyle the catalog can recommend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hairstyle {
    pub id: u8,
    pub name: &'static str,
}

static HAIRSTYLES: [Hairstyle; 9] = [
    Hairstyle { id: 1, name: "Textured Quiff" },
    Hairstyle { id: 2, name: "Side-Swept Fringe" },
    Hairstyle { id: 3, name: "Classic Pompadour" },
    Hairstyle { id: 4, name: "Layered Shag" },
    Hairstyle { id: 5, name: "Angular Fringe" },
    Hairstyle { id: 6, name: "Chin-Length Bob" },
    Hairstyle { id: 7, name: "Soft Curtain Bangs" },
    Hairstyle { id: 8, name: "Tousled Waves" },
    Hairstyle { id: 9, name: "Long Side Part" },
];

/// Returns the recommended hairstyle ids for a face shape, best first.
///
/// An absent shape yields no recommendations.
#[must_use]
pub const fn recommend(shape: Option<FaceShape>) -> &'static [u8] {
    match shape {
        Some(FaceShape::Oval) => &[1, 2, 3, 4, 5],
        Some(FaceShape::Round) => &[2, 5, 6, 8],
        Some(FaceShape::Square) => &[1, 3, 7, 9],
        Some(FaceShape::Heart) => &[2, 4, 6, 9],
        Some(FaceShape::Long) => &[3, 5, 7, 8],
        Some(FaceShape::Diamond) => &[1, 4, 6, 8],
        None => &[],
    }
}

/// Looks up a hairstyle by id.
#[must_use]
pub fn hairstyle(id: u8) -> Option<&'static Hairstyle> {
    HAIRSTYLES.iter().find(|h| h.id == id)
}

/// All hairstyles, ordered by id.
#[must_use]
pub fn hairstyles() -> &'static [Hairstyle] {
    &HAIRSTYLES
}
