use hex_core::{
    Catalog, FeatureDescriptor, Gamemap, Location, MapConfig, SightOptions, SightOutcome,
    TerrainDescriptor, line_of_sight, tile_in_the_way, trace_sight,
};

fn catalog() -> Catalog {
    let mut catalog = Catalog::new().with_terrain(TerrainDescriptor::new("grass", "Grass"));
    catalog.add_feature(FeatureDescriptor::new("wall", "Palisade", 5.0));
    catalog.add_feature(FeatureDescriptor::new("shrub", "Shrub", 0.2));
    catalog
}

fn flat(width: usize, height: usize) -> Gamemap {
    let row = vec!["0 grass"; width].join(",");
    let text = vec![row; height].join("\n");
    Gamemap::parse(&text, &catalog()).unwrap()
}

const FROM: Location = Location::new(2, 0);
const TO: Location = Location::new(2, 5);
const MIDDLE: Location = Location::new(2, 2);

#[test]
fn flat_map_is_visible_end_to_end() {
    let map = flat(5, 6);
    let mut crossed = Vec::new();

    assert!(line_of_sight(&map, FROM, TO, Some(&mut crossed), None));
    assert_eq!(crossed.first(), Some(&FROM));
    assert!(!crossed.contains(&TO));
    for row in 1..5 {
        assert!(crossed.contains(&Location::new(2, row)));
    }
}

#[test]
fn raised_tile_blocks_and_is_reported() {
    let mut map = flat(5, 6);
    map.adjust_height(MIDDLE, 30);

    assert!(!line_of_sight(&map, FROM, TO, None, None));
    assert_eq!(tile_in_the_way(&map, FROM, TO, None, None), Some(MIDDLE));

    let mut crossed = Vec::new();
    tile_in_the_way(&map, FROM, TO, Some(&mut crossed), None);
    assert_eq!(crossed.last(), Some(&MIDDLE));
}

#[test]
fn self_query_marches_nothing() {
    let map = flat(5, 6);
    let mut crossed = Vec::new();

    assert!(line_of_sight(&map, MIDDLE, MIDDLE, Some(&mut crossed), Some(0)));
    assert!(crossed.is_empty());
}

#[test]
fn short_range_fails_on_open_ground() {
    let map = flat(5, 6);
    assert!(!line_of_sight(&map, FROM, TO, None, Some(2)));
    assert!(line_of_sight(&map, FROM, TO, None, Some(5)));

    let options = SightOptions::default().with_range(Some(2));
    let outcome = trace_sight(&map, FROM, TO, &options, None);
    assert!(matches!(outcome, SightOutcome::OutOfRange(loc) if loc.col == 2 && loc.row >= 2));
}

#[test]
fn tall_feature_blocks_where_terrain_would_not() {
    let catalog = catalog();
    let mut map = flat(5, 6);
    assert!(line_of_sight(&map, FROM, TO, None, None));

    map.set_feature(MIDDLE, Some("shrub"), &catalog);
    assert!(line_of_sight(&map, FROM, TO, None, None));

    map.set_feature(MIDDLE, Some("wall"), &catalog);
    assert_eq!(tile_in_the_way(&map, FROM, TO, None, None), Some(MIDDLE));
    assert_eq!(map.tile(MIDDLE).height(), 0);
}

#[test]
fn feature_on_the_target_never_blocks() {
    let catalog = catalog();
    let mut map = flat(5, 6);
    map.set_feature(TO, Some("wall"), &catalog);
    assert!(line_of_sight(&map, FROM, TO, None, None));
}

#[test]
fn every_pair_on_a_flat_map_is_visible() {
    let map = flat(6, 6);
    let locations: Vec<Location> = map.tiles().iter().map(|t| t.location()).collect();

    for &a in &locations {
        for &b in &locations {
            let mut crossed = Vec::new();
            assert!(line_of_sight(&map, a, b, Some(&mut crossed), None), "{a} -> {b}");
            if a == b {
                continue;
            }
            assert_eq!(crossed[0], a);
            assert!(!crossed.contains(&b), "{a} -> {b}: {crossed:?}");
            assert!(crossed.windows(2).all(|w| w[0] != w[1]));
            assert!(crossed.iter().all(|loc| map.contains(*loc)));
        }
    }
}

#[test]
fn off_map_endpoints_are_not_visible() {
    let map = flat(3, 3);
    let outside = Location::new(-1, 1);

    assert!(!line_of_sight(&map, outside, Location::ORIGIN, None, None));
    let outcome = trace_sight(&map, Location::ORIGIN, outside, &SightOptions::default(), None);
    assert_eq!(outcome, SightOutcome::OffMap(outside));
}

#[test]
fn eye_height_comes_from_config() {
    let mut map = flat(5, 6);
    map.adjust_height(MIDDLE, 9);

    let config = MapConfig::default();
    assert_eq!(
        trace_sight(&map, FROM, TO, &SightOptions::from(&config), None),
        SightOutcome::Blocked(MIDDLE)
    );

    let config = config.with_eye_height(12);
    assert!(trace_sight(&map, FROM, TO, &SightOptions::from(&config), None).is_visible());
}
