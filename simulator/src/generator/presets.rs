use anyhow::bail;
use coveragecore::placement::{
    ExclusionZone, ExclusionZoneSet, GeneratedSpec, LineSpec, PlacementSource,
};
use coveragecore::propagation::PropagationParameters;
use coveragecore::scenario::{ScenarioConfig, TierConfig};
use coveragecore::Coordinate;

/// Built-in venue plans, named by slug.
pub const PRESET_NAMES: &[&str] = &[
    "velodrome",
    "aquatic-center",
    "sports-hall",
    "shooting-range",
    "athletics-track",
];

const CARRIER_HZ: f64 = 3.5e9;
const NODE_POWER_DBM: f64 = 33.0;

fn params(path_loss_exponent: f64) -> PropagationParameters {
    PropagationParameters {
        frequency_hz: CARRIER_HZ,
        reference_distance: 1.0,
        path_loss_exponent,
        transmit_power_dbm: NODE_POWER_DBM,
    }
}

fn indoor() -> PropagationParameters {
    params(3.2)
}

fn outdoor() -> PropagationParameters {
    params(2.5)
}

fn points(raw: &[(f64, f64)]) -> Vec<Coordinate> {
    raw.iter().map(|&point| point.into()).collect()
}

fn tier(name: &str, params: PropagationParameters, placements: Vec<PlacementSource>) -> TierConfig {
    TierConfig {
        name: name.to_string(),
        params,
        exclusion_zones: ExclusionZoneSet::default(),
        max_nodes: None,
        placements,
    }
}

fn line(start: (f64, f64), end: (f64, f64), count: usize) -> PlacementSource {
    PlacementSource::Line(LineSpec {
        start: start.into(),
        end: end.into(),
        count,
    })
}

pub fn build_preset(name: &str) -> anyhow::Result<ScenarioConfig> {
    let scenario = match name {
        "velodrome" => velodrome(),
        "aquatic-center" => aquatic_center(),
        "sports-hall" => sports_hall(),
        "shooting-range" => shooting_range(),
        "athletics-track" => athletics_track(),
        other => bail!(
            "unknown preset {} (available: {})",
            other,
            PRESET_NAMES.join(", ")
        ),
    };
    Ok(scenario)
}

/// Track oval is off limits for small cells only; radio units line its rim.
fn velodrome() -> ScenarioConfig {
    let mut small_cells = tier(
        "small-cells",
        indoor(),
        vec![PlacementSource::literal(points(&[(300.0, 25.0), (300.0, 370.0)]))],
    );
    small_cells.exclusion_zones =
        ExclusionZoneSet::new(vec![ExclusionZone::new(60.0, 50.0, 550.0, 350.0)]);

    let mut rru = tier(
        "rru",
        indoor(),
        vec![
            line((60.0, 350.0), (550.0, 350.0), 20),
            line((60.0, 50.0), (550.0, 50.0), 20),
            line((60.0, 50.0), (60.0, 350.0), 5),
            line((550.0, 50.0), (550.0, 350.0), 5),
        ],
    );
    rru.max_nodes = Some(50);

    ScenarioConfig {
        name: "velodrome".into(),
        width: 620,
        height: 400,
        floor_dbm: coveragecore::coverage::FLOOR_DBM,
        exclusion_zones: ExclusionZoneSet::default(),
        tiers: vec![small_cells, rru],
    }
}

/// Pools are forbidden; radio units come from a lattice topped up at random.
fn aquatic_center() -> ScenarioConfig {
    let (width, height) = (800, 420);
    let rru = GeneratedSpec {
        end: Some(Coordinate::new(width as f64 - 60.0, height as f64 - 60.0)),
        target_count: Some(70),
        min_separation: 35.0,
        random_seed: 99,
        random_margin: 50.0,
        ..GeneratedSpec::lattice(Coordinate::new(60.0, 60.0), (50.0, 40.0))
    };
    ScenarioConfig {
        name: "aquatic-center".into(),
        width,
        height,
        floor_dbm: coveragecore::coverage::FLOOR_DBM,
        exclusion_zones: ExclusionZoneSet::new(vec![ExclusionZone::new(140.0, 130.0, 665.0, 300.0)]),
        tiers: vec![
            tier(
                "small-cells",
                indoor(),
                vec![PlacementSource::literal(points(&[
                    (150.0, 50.0),
                    (480.0, 50.0),
                    (300.0, 350.0),
                ]))],
            ),
            tier("rru", indoor(), vec![PlacementSource::Generated(rru)]),
        ],
    }
}

/// Candidate rows along the stands and corridors, thinned to 25 px spacing.
fn sports_hall() -> ScenarioConfig {
    let mut candidates = Vec::new();
    for x in (30..700).step_by(40) {
        for y in [30, 65, 235, 270] {
            candidates.push(Coordinate::new(x as f64, y as f64));
        }
    }
    for y in (40..300).step_by(30) {
        for x in [30, 260, 635, 700] {
            candidates.push(Coordinate::new(x as f64, y as f64));
        }
    }
    let mut rru = tier(
        "rru",
        indoor(),
        vec![PlacementSource::Literal {
            points: candidates,
            min_separation: 25.0,
        }],
    );
    rru.max_nodes = Some(35);

    ScenarioConfig {
        name: "sports-hall".into(),
        width: 730,
        height: 300,
        floor_dbm: coveragecore::coverage::FLOOR_DBM,
        exclusion_zones: ExclusionZoneSet::new(vec![
            ExclusionZone::new(28.0, 27.0, 216.0, 258.0),
            ExclusionZone::new(262.0, 51.0, 634.0, 244.0),
        ]),
        tiers: vec![
            tier(
                "small-cells",
                indoor(),
                vec![PlacementSource::literal(points(&[
                    (100.0, 270.0),
                    (450.0, 25.0),
                    (670.0, 150.0),
                ]))],
            ),
            rru,
        ],
    }
}

fn shooting_range() -> ScenarioConfig {
    ScenarioConfig {
        name: "shooting-range".into(),
        width: 500,
        height: 300,
        floor_dbm: coveragecore::coverage::FLOOR_DBM,
        exclusion_zones: ExclusionZoneSet::new(vec![ExclusionZone::new(53.0, 29.0, 441.0, 163.0)]),
        tiers: vec![
            tier(
                "small-cells",
                indoor(),
                vec![PlacementSource::literal(points(&[(250.0, 200.0)]))],
            ),
            tier("rru", indoor(), vec![line((90.0, 260.0), (330.0, 260.0), 8)]),
        ],
    }
}

/// Outdoor venue served by small cells alone.
fn athletics_track() -> ScenarioConfig {
    ScenarioConfig {
        name: "athletics-track".into(),
        width: 1000,
        height: 560,
        floor_dbm: coveragecore::coverage::FLOOR_DBM,
        exclusion_zones: ExclusionZoneSet::default(),
        tiers: vec![tier(
            "small-cells",
            outdoor(),
            vec![PlacementSource::literal(points(&[
                (200.0, 50.0),
                (700.0, 50.0),
                (900.0, 500.0),
            ]))],
        )],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coveragecore::scenario::CoverageEngine;

    #[test]
    fn every_preset_builds_and_validates() {
        for name in PRESET_NAMES {
            let scenario = build_preset(name).unwrap();
            assert_eq!(&scenario.name, name);
            scenario.validate().unwrap();
        }
    }

    #[test]
    fn unknown_preset_lists_available_names() {
        let err = build_preset("bowling-alley").unwrap_err();
        assert!(err.to_string().contains("velodrome"));
    }

    #[test]
    fn velodrome_rim_units_ignore_the_track_zone() {
        let outcome = CoverageEngine::new().run(&build_preset("velodrome").unwrap()).unwrap();
        assert_eq!(outcome.tiers[0].transmitters.len(), 2);
        assert_eq!(outcome.tiers[1].transmitters.len(), 50);
    }

    #[test]
    fn aquatic_center_reaches_its_radio_unit_target() {
        let scenario = build_preset("aquatic-center").unwrap();
        let outcome = CoverageEngine::new().run(&scenario).unwrap();
        let rru = &outcome.tiers[1].transmitters;
        assert_eq!(rru.len(), 70);
        assert!(rru.iter().all(|site| scenario.exclusion_zones.is_allowed(site)));
        // small cell at (300, 350) is outside the pools
        assert_eq!(outcome.tiers[0].transmitters.len(), 3);
    }

    #[test]
    fn sports_hall_caps_thinned_candidates() {
        let outcome = CoverageEngine::new().run(&build_preset("sports-hall").unwrap()).unwrap();
        let rru = &outcome.tiers[1].transmitters;
        assert_eq!(rru.len(), 35);
        for (i, site) in rru.iter().enumerate() {
            for other in &rru[..i] {
                assert!(site.distance(other) >= 25.0);
            }
        }
    }
}
