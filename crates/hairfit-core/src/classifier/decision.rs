//! Definitive overrides, the chin-ratio gate and winner selection.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::measurements::Measurements;
use super::scores::{ScoreTable, Tally};
use crate::domain::FaceShape;

/// Maximum gap between the two best scores that counts as a near tie.
const TIE_MARGIN: i32 = 3;

/// How the final face shape was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    /// Strong forehead-to-jaw tapering; scoring was discarded.
    HeartOverride,
    /// Near-circular outline; scoring was discarded.
    RoundOverride,
    /// Highest score, no near tie.
    Scored,
    /// The two best scores were within the tie margin and a secondary
    /// measurement cascade picked the winner.
    TieBreak {
        first: FaceShape,
        second: FaceShape,
    },
    /// No shape scored above zero.
    Fallback,
}

/// Definitive overrides. `Some` means the shape is decided without scoring.
pub(crate) fn definitive_override(m: &Measurements) -> Option<(FaceShape, Decision)> {
    let ftj = m.forehead_to_jaw_ratio;
    let taper = m.face_tapering;
    if (ftj >= 1.4 && taper >= 0.3) || (taper >= 0.4 && ftj >= 1.25) {
        debug!(
            forehead_to_jaw = ftj,
            tapering = taper,
            "heart override fired"
        );
        return Some((FaceShape::Heart, Decision::HeartOverride));
    }

    if (m.face_circularity > 0.95 && m.roundness_coefficient > 0.85)
        || (m.width_to_height_ratio > 0.95 && m.cheek_fullness > 0.45)
    {
        debug!(
            circularity = m.face_circularity,
            roundness = m.roundness_coefficient,
            width_to_height = m.width_to_height_ratio,
            cheek_fullness = m.cheek_fullness,
            "round override fired"
        );
        return Some((FaceShape::Round, Decision::RoundOverride));
    }

    None
}

/// Chin-ratio gate, applied only when no override fired.
pub(crate) fn chin_gate(m: &Measurements, tally: &mut Tally) {
    use FaceShape::{Oval, Round};

    let ratio = m.chin_ratio;
    let deltas: &[_] = if ratio >= 0.17 {
        &[(Oval, 15)]
    } else if ratio < 0.10 {
        &[(Round, 15)]
    } else if ratio < 0.12 {
        &[(Round, 8)]
    } else if ratio < 0.15 {
        &[(Oval, 5)]
    } else {
        &[(Oval, 10)]
    };
    tally.apply("chin_ratio", deltas);
}

/// Winner selection: pick the best score, then disambiguate near ties.
pub(crate) fn select(scores: &ScoreTable, m: &Measurements) -> (FaceShape, Decision) {
    let mut best = FaceShape::Oval;
    let mut best_score = 0;
    for shape in FaceShape::ALL {
        if scores.get(shape) > best_score {
            best = shape;
            best_score = scores.get(shape);
        }
    }

    if best_score <= 0 {
        return (FaceShape::Round, Decision::Fallback);
    }

    let ranked = scores.ranked();
    let (first, top) = ranked[0];
    let (second, runner_up) = ranked[1];
    if runner_up <= 0 || top - runner_up > TIE_MARGIN {
        return (best, Decision::Scored);
    }

    match break_tie(first, second, m) {
        Some(winner) => {
            debug!(%first, %second, %winner, "near tie resolved");
            (winner, Decision::TieBreak { first, second })
        }
        None => (best, Decision::Scored),
    }
}

/// Secondary-measurement cascades for the near ties seen in practice.
///
/// Returns `None` for pairs without a cascade.
fn break_tie(a: FaceShape, b: FaceShape, m: &Measurements) -> Option<FaceShape> {
    use FaceShape::{Heart, Long, Oval, Round, Square};

    let other = match (a, b) {
        (Oval, other) | (other, Oval) => other,
        _ => return None,
    };

    let winner = match other {
        Heart => {
            if m.forehead_to_jaw_ratio > 1.22 || (m.chin_ratio < 0.14 && m.jaw_angle < 95.0) {
                Heart
            } else {
                Oval
            }
        }
        Round => {
            if m.width_to_height_ratio > 0.9 || m.cheek_fullness > 0.47 {
                Round
            } else {
                Oval
            }
        }
        Long => {
            if m.width_to_height_ratio < 0.72 || m.face_circularity < 0.74 {
                Long
            } else {
                Oval
            }
        }
        Square => {
            if (m.jaw_to_forehead_ratio > 0.92 && m.jaw_angle > 115.0) || m.jaw_roundness < 60.0 {
                Square
            } else {
                Oval
            }
        }
        _ => return None,
    };

    Some(winner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::rules::tests::baseline;

    fn table(entries: &[(FaceShape, i32)]) -> ScoreTable {
        let mut table = ScoreTable::default();
        for &(shape, score) in entries {
            table.add(shape, score);
        }
        table
    }

    #[test]
    fn test_heart_override_on_tapering_face() {
        let mut m = baseline();
        m.forehead_to_jaw_ratio = 1.5;
        m.face_tapering = 0.35;
        // round override conditions hold too; heart wins
        m.face_circularity = 0.99;
        m.roundness_coefficient = 2.0;
        assert_eq!(
            definitive_override(&m),
            Some((FaceShape::Heart, Decision::HeartOverride))
        );
    }

    #[test]
    fn test_heart_override_second_clause() {
        let mut m = baseline();
        m.forehead_to_jaw_ratio = 1.25;
        m.face_tapering = 0.4;
        assert_eq!(
            definitive_override(&m).map(|(s, _)| s),
            Some(FaceShape::Heart)
        );

        m.forehead_to_jaw_ratio = 1.24;
        assert_eq!(definitive_override(&m), None);
    }

    #[test]
    fn test_round_override() {
        let mut m = baseline();
        m.width_to_height_ratio = 0.96;
        m.cheek_fullness = 0.46;
        assert_eq!(
            definitive_override(&m),
            Some((FaceShape::Round, Decision::RoundOverride))
        );

        m.cheek_fullness = 0.45;
        assert_eq!(definitive_override(&m), None);
    }

    #[test]
    fn test_round_override_on_circular_face() {
        let mut m = baseline();
        m.width_to_height_ratio = 0.9;
        m.cheek_fullness = 0.40;
        m.face_circularity = 0.96;
        m.roundness_coefficient = 2.0;
        assert_eq!(
            definitive_override(&m),
            Some((FaceShape::Round, Decision::RoundOverride))
        );

        m.face_circularity = 0.95;
        assert_eq!(definitive_override(&m), None);
    }

    #[test]
    fn test_chin_gate_bands() {
        let gate = |ratio: f64| {
            let mut m = baseline();
            m.chin_ratio = ratio;
            let mut tally = Tally::new(false);
            chin_gate(&m, &mut tally);
            tally.into_table()
        };

        assert_eq!(gate(0.17).oval, 15);
        assert_eq!(gate(0.16).oval, 10);
        assert_eq!(gate(0.13).oval, 5);
        assert_eq!(gate(0.11).round, 8);
        assert_eq!(gate(0.05).round, 15);
    }

    #[test]
    fn test_no_positive_score_falls_back_to_round() {
        let m = baseline();
        assert_eq!(
            select(&ScoreTable::default(), &m),
            (FaceShape::Round, Decision::Fallback)
        );

        let negative = table(&[(FaceShape::Oval, -10), (FaceShape::Diamond, -1)]);
        assert_eq!(select(&negative, &m).0, FaceShape::Round);
    }

    #[test]
    fn test_clear_winner() {
        let scores = table(&[(FaceShape::Long, 40), (FaceShape::Oval, 30)]);
        assert_eq!(
            select(&scores, &baseline()),
            (FaceShape::Long, Decision::Scored)
        );
    }

    #[test]
    fn test_exact_tie_prefers_enumeration_order() {
        let scores = table(&[(FaceShape::Diamond, 20), (FaceShape::Square, 20)]);
        // no cascade for square/diamond
        assert_eq!(
            select(&scores, &baseline()),
            (FaceShape::Square, Decision::Scored)
        );
    }

    #[test]
    fn test_oval_heart_tie_follows_forehead_ratio() {
        let scores = table(&[(FaceShape::Oval, 10), (FaceShape::Heart, 9)]);

        let mut wide_forehead = baseline();
        wide_forehead.forehead_to_jaw_ratio = 1.25;
        assert_eq!(
            select(&scores, &wide_forehead),
            (
                FaceShape::Heart,
                Decision::TieBreak {
                    first: FaceShape::Oval,
                    second: FaceShape::Heart
                }
            )
        );

        let mut balanced = baseline();
        balanced.forehead_to_jaw_ratio = 1.2;
        assert_eq!(select(&scores, &balanced).0, FaceShape::Oval);
    }

    #[test]
    fn test_oval_heart_tie_short_pointed_chin() {
        let scores = table(&[(FaceShape::Heart, 12), (FaceShape::Oval, 10)]);
        let mut m = baseline();
        m.forehead_to_jaw_ratio = 1.1;
        m.chin_ratio = 0.13;
        m.jaw_angle = 80.0;
        assert_eq!(select(&scores, &m).0, FaceShape::Heart);

        m.chin_ratio = 0.2;
        assert_eq!(select(&scores, &m).0, FaceShape::Oval);
    }

    #[test]
    fn test_oval_round_tie() {
        let scores = table(&[(FaceShape::Oval, 20), (FaceShape::Round, 18)]);
        let mut m = baseline();
        m.cheek_fullness = 0.46;
        assert_eq!(select(&scores, &m).0, FaceShape::Oval);

        m.width_to_height_ratio = 0.92;
        assert_eq!(select(&scores, &m).0, FaceShape::Round);
    }

    #[test]
    fn test_oval_long_tie() {
        let scores = table(&[(FaceShape::Long, 30), (FaceShape::Oval, 27)]);
        let mut m = baseline();
        assert_eq!(select(&scores, &m).0, FaceShape::Oval);

        m.width_to_height_ratio = 0.71;
        assert_eq!(select(&scores, &m).0, FaceShape::Long);
    }

    #[test]
    fn test_oval_square_tie() {
        let scores = table(&[(FaceShape::Square, 25), (FaceShape::Oval, 25)]);
        let mut m = baseline();
        assert_eq!(select(&scores, &m).0, FaceShape::Oval);

        m.jaw_to_forehead_ratio = 0.95;
        m.jaw_angle = 120.0;
        m.jaw_roundness = 60.0;
        assert_eq!(select(&scores, &m).0, FaceShape::Square);
    }

    #[test]
    fn test_gap_beyond_margin_skips_cascade() {
        let scores = table(&[(FaceShape::Oval, 14), (FaceShape::Heart, 10)]);
        let mut m = baseline();
        m.forehead_to_jaw_ratio = 1.3;
        assert_eq!(select(&scores, &m), (FaceShape::Oval, Decision::Scored));
    }
}
