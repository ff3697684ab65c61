use std::collections::HashMap;
use std::sync::Arc;
use std::thread;

use approx::assert_abs_diff_eq;
use natal_core::{
    compute_chart, AnalyticEphemeris, AspectKind, BirthData, CelestialBody, ChartAssembler,
    ChartConfig, ChartError, ChartSummary, Ephemeris, EphemerisError, House, HouseFrame,
    HouseSystem, JulianDay, ZodiacSign,
};

/// Deterministic ephemeris: fixed longitudes per body, cusps starting at
/// 340° so the twelfth house straddles 0°.
struct StubEphemeris {
    longitudes: HashMap<CelestialBody, f64>,
}

const STUB_CUSPS: [f64; 12] = [
    10.0, 40.0, 68.0, 95.0, 125.0, 158.0, 190.0, 220.0, 248.0, 275.0, 305.0, 340.0,
];

impl StubEphemeris {
    fn new() -> Self {
        let longitudes = [
            (CelestialBody::Sun, 86.5),
            (CelestialBody::Moon, 350.0),
            (CelestialBody::Mercury, 70.25),
            (CelestialBody::Venus, 355.0),
            (CelestialBody::Mars, 263.5),
            (CelestialBody::Jupiter, 126.0),
            (CelestialBody::Saturn, 304.0),
            (CelestialBody::Uranus, 280.0),
            (CelestialBody::Neptune, 284.0),
            (CelestialBody::Pluto, 228.0),
        ]
        .into_iter()
        .collect();
        StubEphemeris { longitudes }
    }

    fn without(mut self, body: CelestialBody) -> Self {
        self.longitudes.remove(&body);
        self
    }
}

impl Ephemeris for StubEphemeris {
    fn body_longitude(&self, body: CelestialBody, _: JulianDay) -> Result<f64, EphemerisError> {
        self.longitudes
            .get(&body)
            .copied()
            .ok_or_else(|| EphemerisError::NonConvergence(body.to_string()))
    }

    fn house_frame(
        &self,
        _: JulianDay,
        latitude: f64,
        _: f64,
        _: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        if latitude.abs() > 66.0 {
            return Err(EphemerisError::OutOfRange(format!("latitude {}", latitude)));
        }
        Ok(HouseFrame {
            cusps: STUB_CUSPS,
            ascendant: STUB_CUSPS[0],
            midheaven: STUB_CUSPS[9],
        })
    }
}

fn birth() -> BirthData {
    BirthData::parse("1991-06-18", "07:10", 10.522, 76.172).unwrap()
}

#[test]
fn end_to_end_with_stub() {
    let chart = compute_chart(&StubEphemeris::new(), &birth()).unwrap();

    assert_eq!(chart.bodies().len(), 10);
    for body in CelestialBody::iter() {
        let placed = chart.body(body).unwrap();
        assert!((0.0..360.0).contains(&placed.longitude));
        assert!((0.0..30.0).contains(&placed.sign_degree));
    }

    let sun = chart.body(CelestialBody::Sun).unwrap();
    assert_eq!(sun.sign, ZodiacSign::Gemini);
    assert_abs_diff_eq!(sun.sign_degree, 26.5);
    assert_eq!(sun.house, House::Third);

    assert_eq!(chart.body(CelestialBody::Moon).unwrap().house, House::Twelfth);
    assert_eq!(chart.body(CelestialBody::Venus).unwrap().house, House::Twelfth);
    assert_eq!(chart.body(CelestialBody::Saturn).unwrap().house, House::Tenth);

    let cusps = chart.house_cusps();
    assert_eq!(cusps.len(), 12);
    let coverage: f64 = (0..12)
        .map(|i| (cusps[(i + 1) % 12].longitude - cusps[i].longitude).rem_euclid(360.0))
        .sum();
    assert_abs_diff_eq!(coverage, 360.0, epsilon = 1e-9);
    assert!(cusps.iter().zip(House::all()).all(|(cusp, house)| cusp.house == house));

    assert_eq!(chart.ascendant().sign, ZodiacSign::Aries);
    assert_eq!(chart.midheaven().sign, ZodiacSign::Capricorn);
}

#[test]
fn aspects_in_stub_chart() {
    let chart = compute_chart(&StubEphemeris::new(), &birth()).unwrap();
    let find = |a: CelestialBody, b: CelestialBody| {
        chart
            .aspects()
            .iter()
            .find(|aspect| aspect.body_a == a && aspect.body_b == b)
            .map(|aspect| aspect.kind)
    };

    // 86.5 vs 263.5: 177° apart
    assert_eq!(find(CelestialBody::Sun, CelestialBody::Mars), Some(AspectKind::Opposition));
    // 350 vs 355
    assert_eq!(find(CelestialBody::Moon, CelestialBody::Venus), Some(AspectKind::Conjunction));
    // 280 vs 284
    assert_eq!(find(CelestialBody::Uranus, CelestialBody::Neptune), Some(AspectKind::Conjunction));
    // 141.5° matches nothing
    assert_eq!(find(CelestialBody::Sun, CelestialBody::Pluto), None);

    for aspect in chart.aspects() {
        assert!(aspect.body_a < aspect.body_b);
        assert!(aspect.deviation <= 8.0);
        assert!((0.0..=180.0).contains(&aspect.separation));
    }
}

#[test]
fn same_inputs_give_identical_charts() {
    let eph = StubEphemeris::new();
    let first = compute_chart(&eph, &birth()).unwrap();
    let second = compute_chart(&eph, &birth()).unwrap();
    assert_eq!(first, second);

    let analytic_a = compute_chart(&AnalyticEphemeris, &birth()).unwrap();
    let analytic_b = compute_chart(&AnalyticEphemeris, &birth()).unwrap();
    assert_eq!(analytic_a, analytic_b);
}

#[test]
fn missing_body_degrades_the_chart() {
    let eph = StubEphemeris::new().without(CelestialBody::Mars);
    let chart = compute_chart(&eph, &birth()).unwrap();

    assert_eq!(chart.bodies().len(), 9);
    assert_eq!(chart.missing_bodies(), &[CelestialBody::Mars]);
    assert!(!chart.is_complete());
    assert!(chart.aspects_of(CelestialBody::Mars).next().is_none());
}

#[test]
fn fatal_failures() {
    let mut eph = StubEphemeris::new();
    eph.longitudes.clear();
    assert_eq!(compute_chart(&eph, &birth()), Err(ChartError::NoBodiesResolved));

    let polar = BirthData::parse("1991-06-18", "07:10", 78.2, 15.6).unwrap();
    assert!(matches!(
        compute_chart(&StubEphemeris::new(), &polar),
        Err(ChartError::HouseSystemFailure(_))
    ));
}

#[test]
fn serializes_to_the_documented_shape() {
    let chart = compute_chart(&StubEphemeris::new(), &birth()).unwrap();
    let json = serde_json::to_value(&chart).unwrap();

    assert_eq!(json["birth_data"]["date"], "1991-06-18");
    assert_eq!(json["birth_data"]["time"], "07:10");
    assert_eq!(json["house_system"], "placidus");
    assert_eq!(json["bodies"]["Sun"]["sign"], "Gemini");
    assert_eq!(json["bodies"]["Sun"]["house"], 3);
    assert_eq!(json["bodies"]["Sun"]["symbol"], "☉");
    assert_eq!(json["bodies"]["Sun"]["sign_symbol"], "♊");
    assert_eq!(json["bodies"]["Sun"]["formatted"], "26.5° Gemini");
    assert_eq!(json["house_cusps"].as_array().unwrap().len(), 12);
    assert_eq!(json["house_cusps"][0]["house"], 1);
    assert_eq!(json["ascendant"]["sign"], "Aries");
    assert_eq!(json["ascendant"]["symbol"], "AC");
    assert_eq!(json["ascendant"]["formatted"], "10.0° Aries");
    assert_eq!(json["midheaven"]["symbol"], "MC");
    assert_eq!(json["house_cusps"][11]["sign_symbol"], "♓");
    assert_eq!(json["house_cusps"][11]["formatted"], "10.0° Pisces");
    assert_eq!(json["missing_bodies"].as_array().unwrap().len(), 0);
    assert!(json["aspects"][0]["kind"].is_string());
}

#[test]
fn charts_compute_in_parallel() {
    let eph = Arc::new(AnalyticEphemeris);
    let expected = compute_chart(&*eph, &birth()).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let eph = Arc::clone(&eph);
            thread::spawn(move || compute_chart(&*eph, &birth()).unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}

#[test]
fn analytic_chart_for_a_real_birth() {
    let chart = compute_chart(&AnalyticEphemeris, &birth()).unwrap();

    assert!(chart.is_complete());
    assert_eq!(chart.house_cusps().len(), 12);
    // mid-June: Sun in Gemini
    assert_eq!(chart.body(CelestialBody::Sun).unwrap().sign, ZodiacSign::Gemini);
    assert_eq!(chart.house_cusps()[0].longitude, chart.ascendant().longitude);
    assert_eq!(chart.house_cusps()[9].longitude, chart.midheaven().longitude);
}

#[test]
fn early_births_lose_only_the_planets() {
    let birth = BirthData::parse("1750-03-02", "12:00", 48.85, 2.35).unwrap();
    let chart = compute_chart(&AnalyticEphemeris, &birth).unwrap();

    assert_eq!(chart.bodies().len(), 2);
    assert!(chart.body(CelestialBody::Sun).is_some());
    assert!(chart.body(CelestialBody::Moon).is_some());
    assert_eq!(chart.missing_bodies().len(), 8);
}

#[test]
fn house_system_and_orbs_from_config() {
    let config = ChartConfig::from_json_str(
        r#"{
            "house_system": "equal",
            "aspects": [{ "kind": "Conjunction", "angle": 0.0, "orb": 1.0 }]
        }"#,
    )
    .unwrap();
    let chart = ChartAssembler::new(&AnalyticEphemeris)
        .with_config(config)
        .assemble(&birth())
        .unwrap();

    assert_eq!(chart.house_system(), HouseSystem::Equal);
    assert!(chart
        .aspects()
        .iter()
        .all(|aspect| aspect.kind == AspectKind::Conjunction && aspect.deviation <= 1.0));
    let cusps = chart.house_cusps();
    let first_arc = (cusps[1].longitude - cusps[0].longitude).rem_euclid(360.0);
    assert_abs_diff_eq!(first_arc, 30.0, epsilon = 1e-9);
}

#[test]
fn summary_from_stub_chart() {
    let eph = StubEphemeris::new().without(CelestialBody::Venus);
    let chart = compute_chart(&eph, &birth()).unwrap();
    let summary = ChartSummary::from_chart(&chart);

    assert_eq!(summary.sun, Some(ZodiacSign::Gemini));
    assert_eq!(summary.moon, Some(ZodiacSign::Pisces));
    assert_eq!(summary.rising, ZodiacSign::Aries);
    assert_eq!(
        summary.personal,
        vec![
            (CelestialBody::Sun, ZodiacSign::Gemini),
            (CelestialBody::Moon, ZodiacSign::Pisces),
            (CelestialBody::Mercury, ZodiacSign::Gemini),
            (CelestialBody::Mars, ZodiacSign::Sagittarius),
        ]
    );
    assert!(summary.render().starts_with(
        "Your birth chart shows a Sun in Gemini, Moon in Pisces, and Rising sign in Aries."
    ));
}
