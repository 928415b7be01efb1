//! Trace a sightline between two tiles
//!
//! Prints whether the target is visible, what stopped the line and which
//! tiles it crossed.

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use hex_content::ConfigLoader;
use hex_core::{Location, MapConfig, SightOptions, SightOutcome, distance_between, trace_sight};

use super::load_world;

/// Trace a sightline between two tiles
#[derive(Parser)]
pub struct Sight {
    /// Map text file
    #[arg(value_name = "MAP")]
    map: PathBuf,

    /// Terrain/feature catalog (RON)
    #[arg(short, long, value_name = "RON")]
    catalog: PathBuf,

    /// Viewer location as COL,ROW
    #[arg(long, value_name = "COL,ROW", value_parser = parse_location)]
    from: Location,

    /// Target location as COL,ROW
    #[arg(long, value_name = "COL,ROW", value_parser = parse_location)]
    to: Location,

    /// Maximum sight range in world units
    #[arg(short, long, value_name = "N")]
    range: Option<u32>,

    /// Map configuration (TOML) overriding eye height and step length
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,
}

impl Sight {
    pub fn execute(self) -> Result<()> {
        let (_, map) = load_world(&self.map, &self.catalog)?;
        let config = match &self.config {
            Some(path) => ConfigLoader::load(path)?,
            None => MapConfig::default(),
        };

        for loc in [self.from, self.to] {
            if !map.contains(loc) {
                let dims = map.dimensions();
                bail!("{loc} is outside the {}x{} map", dims.width, dims.height);
            }
        }

        let options = SightOptions::from(&config).with_range(self.range);
        let mut crossed = Vec::new();
        let outcome = trace_sight(&map, self.from, self.to, &options, Some(&mut crossed));

        println!(
            "{} {} -> {} (hex distance {})",
            style("Sightline:").bold().cyan(),
            self.from,
            self.to,
            distance_between(self.from, self.to)
        );
        match outcome {
            SightOutcome::Visible => println!("{}", style("Visible").bold().green()),
            SightOutcome::Blocked(loc) => {
                println!("{} at {}", style("Blocked").bold().red(), loc);
            }
            SightOutcome::OutOfRange(loc) => {
                println!("{} at {}", style("Out of range").bold().yellow(), loc);
            }
            SightOutcome::OffMap(loc) => {
                println!("{} {}", style("Off map:").bold().red(), loc);
            }
        }

        let path: Vec<String> = crossed.iter().map(ToString::to_string).collect();
        println!("{} {}", style("Crossed:").bold().cyan(), path.join(" "));

        Ok(())
    }
}

fn parse_location(value: &str) -> Result<Location, String> {
    let (col, row) = value
        .split_once(',')
        .ok_or_else(|| format!("expected COL,ROW, got `{value}`"))?;
    let col = col.trim().parse().map_err(|e| format!("invalid column: {e}"))?;
    let row = row.trim().parse().map_err(|e| format!("invalid row: {e}"))?;
    Ok(Location::new(col, row))
}
