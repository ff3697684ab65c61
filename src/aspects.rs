use std::fmt;

use serde::{Deserialize, Serialize};

use crate::body::CelestialBody;
use crate::zodiac::normalize_longitude;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AspectKind {
    Conjunction,
    Opposition,
    Trine,
    Square,
    Sextile,
}

impl AspectKind {
    pub fn symbol(self) -> char {
        match self {
            AspectKind::Conjunction => '☌',
            AspectKind::Opposition => '☍',
            AspectKind::Trine => '△',
            AspectKind::Square => '□',
            AspectKind::Sextile => '⚹',
        }
    }

    /// Trines and sextiles; conjunctions depend on the bodies involved.
    pub fn is_harmonious(self) -> bool {
        matches!(self, AspectKind::Trine | AspectKind::Sextile)
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// One row of the aspect table: nominal angle and allowed orb, in degrees.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectDefinition {
    pub kind: AspectKind,
    pub angle: f64,
    pub orb: f64,
}

impl AspectDefinition {
    pub const fn new(kind: AspectKind, angle: f64, orb: f64) -> Self {
        AspectDefinition { kind, angle, orb }
    }
}

/// Default table. Order matters: the first matching row wins.
pub const DEFAULT_ASPECTS: [AspectDefinition; 5] = [
    AspectDefinition::new(AspectKind::Conjunction, 0.0, 8.0),
    AspectDefinition::new(AspectKind::Opposition, 180.0, 8.0),
    AspectDefinition::new(AspectKind::Trine, 120.0, 7.0),
    AspectDefinition::new(AspectKind::Square, 90.0, 7.0),
    AspectDefinition::new(AspectKind::Sextile, 60.0, 5.0),
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Aspect {
    pub body_a: CelestialBody,
    pub body_b: CelestialBody,
    pub kind: AspectKind,
    /// Nominal angle of the matched aspect.
    pub exact_angle: f64,
    /// Actual separation of the pair, in [0, 180].
    pub separation: f64,
    /// `|separation - exact_angle|`, always within the orb.
    pub deviation: f64,
}

/// Shortest arc between two longitudes, in [0, 180].
pub fn angular_separation(a: f64, b: f64) -> f64 {
    let diff = (normalize_longitude(a) - normalize_longitude(b)).abs();
    diff.min(360.0 - diff)
}

/// First row of `table` whose orb contains `separation`.
pub fn classify_separation(
    separation: f64,
    table: &[AspectDefinition],
) -> Option<&AspectDefinition> {
    table
        .iter()
        .find(|definition| (separation - definition.angle).abs() <= definition.orb)
}

/// Classifies a single pair. Symmetric in its two bodies; the returned aspect
/// always lists the bodies in canonical order.
pub fn aspect_between(
    a: (CelestialBody, f64),
    b: (CelestialBody, f64),
    table: &[AspectDefinition],
) -> Option<Aspect> {
    let (first, second) = if a.0 <= b.0 { (a, b) } else { (b, a) };
    let separation = angular_separation(first.1, second.1);
    classify_separation(separation, table).map(|definition| Aspect {
        body_a: first.0,
        body_b: second.0,
        kind: definition.kind,
        exact_angle: definition.angle,
        separation,
        deviation: (separation - definition.angle).abs(),
    })
}

/// Scans every unordered pair of `positions`, in canonical body order.
pub fn detect_aspects(
    positions: &[(CelestialBody, f64)],
    table: &[AspectDefinition],
) -> Vec<Aspect> {
    let mut sorted = positions.to_vec();
    sorted.sort_by_key(|(body, _)| *body);

    let mut aspects = Vec::new();
    for (i, &first) in sorted.iter().enumerate() {
        for &second in sorted.iter().skip(i + 1) {
            if let Some(aspect) = aspect_between(first, second, table) {
                aspects.push(aspect);
            }
        }
    }
    aspects
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use CelestialBody::*;

    fn classify(a: f64, b: f64) -> Option<Aspect> {
        aspect_between((Sun, a), (Moon, b), &DEFAULT_ASPECTS)
    }

    #[test]
    fn same_longitude_is_exact_conjunction() {
        let aspect = classify(123.4, 123.4).unwrap();
        assert_eq!(aspect.kind, AspectKind::Conjunction);
        assert_abs_diff_eq!(aspect.deviation, 0.0);
        assert_abs_diff_eq!(aspect.separation, 0.0);
    }

    #[test]
    fn near_opposition_within_orb() {
        let aspect = classify(10.0, 187.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::Opposition);
        assert_abs_diff_eq!(aspect.separation, 177.0, epsilon = 1e-9);
        assert_abs_diff_eq!(aspect.deviation, 3.0, epsilon = 1e-9);
        assert_eq!(aspect.exact_angle, 180.0);
    }

    #[test]
    fn separation_of_170_has_no_aspect() {
        assert_eq!(classify(0.0, 170.0), None);
        assert_eq!(classify(100.0, 270.0), None);
    }

    #[test]
    fn separation_wraps_across_zero() {
        assert_abs_diff_eq!(angular_separation(355.0, 5.0), 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(angular_separation(5.0, 355.0), 10.0, epsilon = 1e-9);
        let aspect = classify(356.0, 2.0).unwrap();
        assert_eq!(aspect.kind, AspectKind::Conjunction);
        assert_abs_diff_eq!(aspect.deviation, 6.0, epsilon = 1e-9);
        assert_eq!(classify(300.0, 61.0).map(|a| a.kind), Some(AspectKind::Trine));
    }

    #[test]
    fn orb_edges_are_inclusive() {
        assert_eq!(classify(0.0, 8.0).map(|a| a.kind), Some(AspectKind::Conjunction));
        assert_eq!(classify(0.0, 8.5), None);
        assert_eq!(classify(0.0, 97.0).map(|a| a.kind), Some(AspectKind::Square));
        assert_eq!(classify(0.0, 65.0).map(|a| a.kind), Some(AspectKind::Sextile));
        assert_eq!(classify(0.0, 66.0), None);
        assert_eq!(classify(0.0, 113.0).map(|a| a.kind), Some(AspectKind::Trine));
    }

    #[test]
    fn classification_is_symmetric() {
        let mut a = 0.0;
        while a < 360.0 {
            let mut b = 0.0;
            while b < 360.0 {
                let forward = aspect_between((Venus, a), (Mars, b), &DEFAULT_ASPECTS);
                let backward = aspect_between((Mars, b), (Venus, a), &DEFAULT_ASPECTS);
                assert_eq!(forward, backward);
                b += 7.5;
            }
            a += 11.0;
        }
    }

    #[test]
    fn first_table_row_wins_on_overlap() {
        let table = [
            AspectDefinition::new(AspectKind::Square, 90.0, 20.0),
            AspectDefinition::new(AspectKind::Trine, 120.0, 20.0),
        ];
        let aspect = aspect_between((Sun, 0.0), (Moon, 105.0), &table).unwrap();
        assert_eq!(aspect.kind, AspectKind::Square);

        let reversed = [table[1], table[0]];
        let aspect = aspect_between((Sun, 0.0), (Moon, 105.0), &reversed).unwrap();
        assert_eq!(aspect.kind, AspectKind::Trine);
    }

    #[test]
    fn scans_every_pair_once() {
        let positions = [(Mars, 90.0), (Sun, 0.0), (Moon, 180.0), (Venus, 45.0)];
        let aspects = detect_aspects(&positions, &DEFAULT_ASPECTS);
        let pairs: Vec<_> = aspects.iter().map(|a| (a.body_a, a.body_b, a.kind)).collect();
        assert_eq!(
            pairs,
            vec![
                (Sun, Moon, AspectKind::Opposition),
                (Sun, Mars, AspectKind::Square),
                (Moon, Mars, AspectKind::Square),
            ]
        );
    }

    #[test]
    fn harmonious_kinds() {
        assert!(AspectKind::Trine.is_harmonious());
        assert!(!AspectKind::Square.is_harmonious());
        assert_eq!(AspectKind::Opposition.to_string(), "Opposition");
    }
}
