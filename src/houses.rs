use std::fmt;

use serde::{Serialize, Serializer};

use crate::zodiac::normalize_longitude;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum House {
    First = 1,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
    Ninth,
    Tenth,
    Eleventh,
    Twelfth,
}

impl House {
    pub fn from_index(index: usize) -> Option<House> {
        match index {
            1 => Some(House::First),
            2 => Some(House::Second),
            3 => Some(House::Third),
            4 => Some(House::Fourth),
            5 => Some(House::Fifth),
            6 => Some(House::Sixth),
            7 => Some(House::Seventh),
            8 => Some(House::Eighth),
            9 => Some(House::Ninth),
            10 => Some(House::Tenth),
            11 => Some(House::Eleventh),
            12 => Some(House::Twelfth),
            _ => None,
        }
    }

    pub fn all() -> impl Iterator<Item = House> {
        (1..=12).filter_map(House::from_index)
    }

    pub fn number(self) -> u8 {
        self as u8
    }

    /// Traditional area of life the house governs.
    pub fn theme(self) -> &'static str {
        match self {
            House::First => "Self, personality, appearance",
            House::Second => "Money, possessions, values",
            House::Third => "Communication, siblings, short trips",
            House::Fourth => "Home, family, roots",
            House::Fifth => "Creativity, romance, children",
            House::Sixth => "Work, health, daily routine",
            House::Seventh => "Partnerships, marriage, open enemies",
            House::Eighth => "Transformation, shared resources, death",
            House::Ninth => "Higher education, travel, philosophy",
            House::Tenth => "Career, public image, authority",
            House::Eleventh => "Friends, groups, hopes and dreams",
            House::Twelfth => "Spirituality, hidden things, subconscious",
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

// Houses travel as plain numbers in serialized charts.
impl Serialize for House {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

/// Finds the house whose arc `[cusp[i], cusp[i + 1])` contains `longitude`.
///
/// Arcs that cross 0° (`cusp[i] > cusp[i + 1]`) match on either side of the
/// wrap. When nothing matches, which only float noise around a cusp can
/// cause, the twelfth house is returned and the miss is logged.
pub fn assign_house(longitude: f64, cusps: &[f64; 12]) -> House {
    let target = normalize_longitude(longitude);

    for i in 0..12 {
        let start = cusps[i];
        let end = cusps[(i + 1) % 12];
        let inside = if start > end {
            target >= start || target < end
        } else {
            start <= target && target < end
        };
        if inside {
            return House::from_index(i + 1).unwrap_or(House::Twelfth);
        }
    }

    tracing::warn!(
        longitude = target,
        ?cusps,
        "longitude fell outside every house arc, assigning the twelfth house"
    );
    House::Twelfth
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equal_cusps(first: f64) -> [f64; 12] {
        let mut cusps = [0.0; 12];
        for (i, cusp) in cusps.iter_mut().enumerate() {
            *cusp = normalize_longitude(first + 30.0 * i as f64);
        }
        cusps
    }

    // Unequal arcs with the twelfth house straddling 0°.
    const PLACIDUS_LIKE: [f64; 12] = [
        10.0, 38.5, 66.0, 95.0, 127.5, 160.0, 190.0, 218.5, 246.0, 275.0, 307.5, 340.0,
    ];

    #[test]
    fn wraparound_arc_catches_both_sides_of_zero() {
        assert_eq!(assign_house(350.0, &PLACIDUS_LIKE), House::Twelfth);
        assert_eq!(assign_house(5.0, &PLACIDUS_LIKE), House::Twelfth);
        assert_eq!(assign_house(0.0, &PLACIDUS_LIKE), House::Twelfth);
        assert_eq!(assign_house(10.0, &PLACIDUS_LIKE), House::First);
        assert_eq!(assign_house(339.99, &PLACIDUS_LIKE), House::Eleventh);
    }

    #[test]
    fn cusp_boundaries_are_closed_on_the_left() {
        assert_eq!(assign_house(38.5, &PLACIDUS_LIKE), House::Second);
        assert_eq!(assign_house(190.0, &PLACIDUS_LIKE), House::Seventh);
        assert_eq!(assign_house(189.999, &PLACIDUS_LIKE), House::Sixth);
    }

    #[test]
    fn every_longitude_lands_in_exactly_one_house() {
        for cusps in [PLACIDUS_LIKE, equal_cusps(0.0), equal_cusps(217.3), equal_cusps(355.0)] {
            let mut longitude = 0.0;
            while longitude < 360.0 {
                let matching = (0..12)
                    .filter(|&i| {
                        let (start, end) = (cusps[i], cusps[(i + 1) % 12]);
                        if start > end {
                            longitude >= start || longitude < end
                        } else {
                            start <= longitude && longitude < end
                        }
                    })
                    .count();
                assert_eq!(matching, 1, "longitude {} with cusps {:?}", longitude, cusps);
                let house = assign_house(longitude, &cusps);
                assert!((1..=12).contains(&house.number()));
                longitude += 0.5;
            }
        }
    }

    #[test]
    fn targets_are_normalized_first() {
        assert_eq!(assign_house(365.0, &PLACIDUS_LIKE), House::Twelfth);
        assert_eq!(assign_house(-170.0, &PLACIDUS_LIKE), House::Seventh);
    }

    #[test]
    fn degenerate_cusps_fall_back_to_twelfth() {
        assert_eq!(assign_house(42.0, &[100.0; 12]), House::Twelfth);
    }

    #[test]
    fn house_indices() {
        assert_eq!(House::all().count(), 12);
        assert_eq!(House::from_index(0), None);
        assert_eq!(House::from_index(13), None);
        assert_eq!(House::Tenth.number(), 10);
        assert_eq!(House::First.theme(), "Self, personality, appearance");
    }
}
