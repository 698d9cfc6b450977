//! Threshold-banded scoring rules.
//!
//! Rules run in a fixed order and every band's thresholds and deltas
//! are empirical; keep them literal.

use super::measurements::Measurements;
use super::scores::Tally;
use crate::domain::FaceShape::{Diamond, Heart, Long, Oval, Round, Square};

/// Applies every scoring rule, in order.
pub(crate) fn score(m: &Measurements, tally: &mut Tally) {
    width_to_height(m, tally);
    roundness_coefficient(m, tally);
    circularity(m, tally);
    cheek_curvature(m, tally);
    jaw_to_forehead(m, tally);
    forehead_dominance(m, tally);
    tapering(m, tally);
    mid_width_dominance(m, tally);
    uniform_width(m, tally);
    balanced_proportions(m, tally);
    cheek_fullness(m, tally);
    jaw_roundness(m, tally);
}

fn width_to_height(m: &Measurements, tally: &mut Tally) {
    let ratio = m.width_to_height_ratio;
    let deltas: &[_] = if ratio > 0.95 {
        &[(Round, 20)]
    } else if ratio >= 0.85 {
        &[(Round, 10), (Square, 8)]
    } else if ratio >= 0.78 {
        &[(Oval, 10), (Square, 3)]
    } else if ratio >= 0.70 {
        &[(Oval, 15)]
    } else {
        &[(Long, 20)]
    };
    tally.apply("width_to_height", deltas);
}

fn roundness_coefficient(m: &Measurements, tally: &mut Tally) {
    let coefficient = m.roundness_coefficient;
    #[allow(clippy::float_cmp)]
    let near_square = coefficient == 2.0;
    let deltas: &[_] = if near_square {
        &[(Round, 10), (Square, 8)]
    } else if coefficient > 0.8 {
        &[(Round, 5), (Oval, 3)]
    } else if coefficient > 0.6 {
        &[(Oval, 8)]
    } else {
        &[(Long, 10)]
    };
    tally.apply("roundness_coefficient", deltas);
}

fn circularity(m: &Measurements, tally: &mut Tally) {
    let circularity = m.face_circularity;
    let deltas: &[_] = if circularity > 0.9 {
        &[(Round, 10)]
    } else if circularity >= 0.8 {
        &[(Oval, 3), (Square, 3)]
    } else if circularity >= 0.7 {
        &[(Oval, 5)]
    } else {
        &[(Long, 10)]
    };
    tally.apply("circularity", deltas);
}

fn cheek_curvature(m: &Measurements, tally: &mut Tally) {
    let curvature = m.cheek_curvature;
    let deltas: &[_] = if curvature > 0.42 {
        &[(Long, 5), (Oval, 3)]
    } else if curvature >= 0.3 {
        &[(Oval, 5)]
    } else {
        &[(Round, 5), (Square, 5)]
    };
    tally.apply("cheek_curvature", deltas);
}

fn jaw_to_forehead(m: &Measurements, tally: &mut Tally) {
    let ratio = m.jaw_to_forehead_ratio;
    let deltas: &[_] = if ratio > 0.9 {
        &[(Square, 15)]
    } else if ratio >= 0.8 {
        &[(Square, 5), (Oval, 5)]
    } else if ratio >= 0.7 {
        &[(Oval, 5)]
    } else {
        &[(Heart, 15)]
    };
    tally.apply("jaw_to_forehead", deltas);
}

fn forehead_dominance(m: &Measurements, tally: &mut Tally) {
    if m.forehead_to_jaw_ratio >= 1.3 {
        tally.apply("forehead_to_jaw", &[(Heart, 10)]);
    }
    if m.upper_to_lower_face_width_ratio >= 1.3 {
        tally.apply("upper_to_lower_width", &[(Heart, 5)]);
    }
}

fn tapering(m: &Measurements, tally: &mut Tally) {
    if m.face_tapering >= 0.25 {
        tally.apply("tapering", &[(Heart, 10)]);
    } else if m.face_tapering >= 0.15 {
        tally.apply("tapering", &[(Heart, 5)]);
    }

    if m.chin_pointedness < 60.0 {
        tally.apply("chin_pointedness", &[(Heart, 10), (Diamond, 5)]);
    } else if m.chin_pointedness < 70.0 {
        tally.apply("chin_pointedness", &[(Heart, 5)]);
    }
}

/// Cheekbones clearly wider than both forehead and jaw.
fn mid_width_dominance(m: &Measurements, tally: &mut Tally) {
    if is_mid_dominant(m) && m.mid_third_width > m.bottom_third_width * 1.3 {
        tally.apply("mid_width_dominance", &[(Diamond, 40), (Oval, -10)]);
    }
}

fn uniform_width(m: &Measurements, tally: &mut Tally) {
    let widths = [m.top_third_width, m.mid_third_width, m.bottom_third_width];
    let widest = widths.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let narrowest = widths.iter().copied().fold(f64::INFINITY, f64::min);
    if widest / narrowest < 1.15 {
        tally.apply("uniform_width", &[(Square, 15)]);
    }
}

fn balanced_proportions(m: &Measurements, tally: &mut Tally) {
    if (0.65..=0.8).contains(&m.width_to_height_ratio)
        && (0.7..=0.9).contains(&m.jaw_to_forehead_ratio)
        && !is_mid_dominant(m)
    {
        tally.apply("balanced_proportions", &[(Oval, 10)]);
    }
}

fn cheek_fullness(m: &Measurements, tally: &mut Tally) {
    let fullness = m.cheek_fullness;
    let deltas: &[_] = if fullness > 0.49 {
        &[(Round, 8)]
    } else if fullness >= 0.475 {
        &[(Oval, 5)]
    } else {
        &[(Long, 5)]
    };
    tally.apply("cheek_fullness", deltas);
}

fn jaw_roundness(m: &Measurements, tally: &mut Tally) {
    let roundness = m.jaw_roundness;
    let deltas: &[_] = if roundness < 75.0 {
        &[(Square, 8), (Round, 3)]
    } else if roundness < 90.0 {
        &[(Round, 8)]
    } else if roundness <= 115.0 {
        &[(Oval, 8)]
    } else {
        &[(Heart, 5)]
    };
    tally.apply("jaw_roundness", deltas);
}

fn is_mid_dominant(m: &Measurements) -> bool {
    m.mid_third_width > m.top_third_width * 1.12
}
