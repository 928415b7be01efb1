use std::io::Write;

use hex_content::{CatalogLoader, ConfigLoader, MapLoader};
use hex_core::{Location, MapConfig, Relation, TerrainOracle, line_of_sight};
use tempfile::NamedTempFile;

const CATALOG: &str = r#"(
    terrains: [
        (id: "grass", name: "Grass", default_cost: 1, textures: ["grass-1.png", "grass-2.png"]),
        (id: "water", name: "Water", default_cost: 4, overlap_priority: 2),
    ],
    features: [
        (id: "pine", name: "Pine", vision_block: 3.0, models: ["pine.3ds"]),
        (id: "bush", name: "Bush"),
    ],
)"#;

const MAP: &str = "\
0 grass,0 grass,0 water,0 grass
0 grass,0 grass pine,0 grass,12 grass
0 grass,0 grass,0 grass,0 grass
";

fn temp_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn catalog_loads_descriptors_with_defaults() {
    let file = temp_file(CATALOG);
    let catalog = CatalogLoader::load(file.path()).unwrap();

    assert_eq!(catalog.terrain_ids().collect::<Vec<_>>(), ["grass", "water"]);
    assert_eq!(catalog.feature_count(), 2);

    let grass = catalog.terrain("grass").unwrap();
    assert_eq!(grass.default_cost, 1);
    assert_eq!(grass.textures.len(), 2);
    assert_eq!(catalog.terrain("water").unwrap().overlap_priority, 2);

    let bush = catalog.feature("bush").unwrap();
    assert_eq!(bush.vision_block, 0.0);
    assert_eq!(bush.default_cost, -1);
    assert!(catalog.feature("oak").is_none());
}

#[test]
fn catalog_rejects_malformed_ron() {
    let file = temp_file("(terrains: [(id: 3)])");
    let err = CatalogLoader::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("catalog RON"));
}

#[test]
fn map_loads_through_catalog() {
    let catalog = CatalogLoader::load(temp_file(CATALOG).path()).unwrap();
    let map = MapLoader::load(temp_file(MAP).path(), &catalog).unwrap();

    assert_eq!(map.dimensions().width, 4);
    assert_eq!(map.dimensions().height, 3);
    assert_eq!(map.tile(Location::new(2, 0)).terrain_id(), Some("water"));
    assert_eq!(map.tile(Location::new(1, 1)).feature_id(), Some("pine"));

    // (3,1) stands 12 above every neighbour.
    let peak = map.tile(Location::new(3, 1));
    assert!(peak.has_cliffs());
    assert_eq!(peak.num_neighbours(), 0);
    assert_eq!(map.relation(Location::new(3, 2), hex_core::Direction::North), Relation::Cliff);

    // The pine at (1,1) sits between (1,0) and (1,2).
    assert!(!line_of_sight(&map, Location::new(1, 0), Location::new(1, 2), None, None));
    assert!(line_of_sight(&map, Location::new(0, 0), Location::new(0, 2), None, None));
}

#[test]
fn map_save_round_trips() {
    let catalog = CatalogLoader::load(temp_file(CATALOG).path()).unwrap();
    let mut map = MapLoader::load(temp_file(MAP).path(), &catalog).unwrap();
    map.adjust_height(Location::new(0, 0), 4);
    map.set_feature(Location::new(2, 2), Some("bush"), &catalog);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.map");
    MapLoader::save(&path, &map).unwrap();
    let reloaded = MapLoader::load(&path, &catalog).unwrap();

    assert_eq!(reloaded.write(), map.write());
    assert_eq!(reloaded.tile(Location::new(0, 0)).height(), 4);
    assert_eq!(reloaded.tile(Location::new(2, 2)).feature_id(), Some("bush"));
}

#[test]
fn map_errors_carry_the_path() {
    let catalog = CatalogLoader::load(temp_file(CATALOG).path()).unwrap();
    let file = temp_file("0 grass,0 grass\n0 grass\n");
    let err = MapLoader::load(file.path(), &catalog).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("inconsistent number of tiles"));
    assert!(message.contains(&file.path().display().to_string()));

    let missing = MapLoader::load(&file.path().with_extension("missing"), &catalog);
    assert!(missing.unwrap_err().to_string().contains("Failed to read file"));
}

#[test]
fn config_overrides_only_given_keys() {
    let file = temp_file("eye_height = 6\n");
    let config = ConfigLoader::load(file.path()).unwrap();
    assert_eq!(config.eye_height, 6);
    assert_eq!(config.sight_step, MapConfig::DEFAULT_SIGHT_STEP);

    let empty = ConfigLoader::load(temp_file("").path()).unwrap();
    assert_eq!(empty, MapConfig::default());

    let file = temp_file("eye_height = \"tall\"");
    let message = ConfigLoader::load(file.path()).unwrap_err().to_string();
    assert!(message.contains("map config"));
    assert!(message.contains(&file.path().display().to_string()));
}
