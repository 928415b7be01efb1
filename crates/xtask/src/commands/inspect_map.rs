//! Summarize a map file
//!
//! Loads a map through its catalog and reports dimensions, terrain usage,
//! cliffs and the height range.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use hex_core::{Direction, Gamemap};

use super::load_world;

/// Summarize a map file
#[derive(Parser)]
pub struct InspectMap {
    /// Map text file
    #[arg(value_name = "MAP")]
    map: PathBuf,

    /// Terrain/feature catalog (RON)
    #[arg(short, long, value_name = "RON")]
    catalog: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable overview
    Summary,
    /// Machine-readable JSON
    Json,
}

/// Aggregated facts about a map.
struct MapStats {
    width: u32,
    height: u32,
    terrains: BTreeMap<String, usize>,
    features: BTreeMap<String, usize>,
    cliffs: usize,
    min_height: i32,
    max_height: i32,
}

impl MapStats {
    fn collect(map: &Gamemap) -> Self {
        let dims = map.dimensions();
        let mut stats = Self {
            width: dims.width,
            height: dims.height,
            terrains: BTreeMap::new(),
            features: BTreeMap::new(),
            cliffs: 0,
            min_height: i32::MAX,
            max_height: i32::MIN,
        };

        for tile in map.tiles() {
            let terrain = tile.terrain_id().unwrap_or("(none)");
            *stats.terrains.entry(terrain.to_owned()).or_default() += 1;
            if let Some(feature) = tile.feature_id() {
                *stats.features.entry(feature.to_owned()).or_default() += 1;
            }

            // Each cliff edge is reported by its upper tile only.
            stats.cliffs += Direction::ALL
                .into_iter()
                .filter(|dir| tile.cliff(*dir).is_some())
                .count();

            stats.min_height = stats.min_height.min(tile.height());
            stats.max_height = stats.max_height.max(tile.height());
        }

        stats
    }
}

impl InspectMap {
    pub fn execute(self) -> Result<()> {
        let (_, map) = load_world(&self.map, &self.catalog)?;
        let stats = MapStats::collect(&map);

        match self.format {
            OutputFormat::Summary => print_summary(&self.map, &stats),
            OutputFormat::Json => print_json(&stats)?,
        }

        Ok(())
    }
}

fn print_summary(path: &std::path::Path, stats: &MapStats) {
    println!("{} {}", style("Map File:").bold().cyan(), path.display());
    println!(
        "{} {}x{}",
        style("Dimensions:").bold().cyan(),
        stats.width,
        stats.height
    );
    println!(
        "{} {}..={}",
        style("Heights:").bold().cyan(),
        stats.min_height,
        stats.max_height
    );
    println!("{} {}", style("Cliff Edges:").bold().cyan(), stats.cliffs);
    println!();

    println!("{}", style("Terrain:").bold().yellow());
    for (id, count) in &stats.terrains {
        println!("  {id}: {count}");
    }
    println!();

    if !stats.features.is_empty() {
        println!("{}", style("Features:").bold().yellow());
        for (id, count) in &stats.features {
            println!("  {id}: {count}");
        }
        println!();
    }
}

fn print_json(stats: &MapStats) -> Result<()> {
    let value = serde_json::json!({
        "width": stats.width,
        "height": stats.height,
        "terrains": stats.terrains,
        "features": stats.features,
        "cliffs": stats.cliffs,
        "min_height": stats.min_height,
        "max_height": stats.max_height,
    });
    let json = serde_json::to_string_pretty(&value).context("Failed to serialize map stats")?;
    println!("{}", json);
    Ok(())
}
