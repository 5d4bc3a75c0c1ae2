use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tools::bake::bake;
use tools::pick::{PickTarget, pick};
use tools::resolve_config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Country picking globe: offline raster baking and picks")]
struct Args {
    /// Engine config JSON (falls back to $GLOBE_CONFIG, then defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rasterize a GeoJSON FeatureCollection into visual.png, identity.png and index.json
    Bake {
        /// Input GeoJSON FeatureCollection
        #[arg(long)]
        input: PathBuf,

        /// Output directory
        #[arg(long, default_value = "out")]
        out: PathBuf,
    },

    /// Resolve one surface position to a country and print the status line
    Pick {
        /// Input GeoJSON FeatureCollection
        #[arg(long)]
        input: PathBuf,

        /// Longitude in degrees (requires --lat)
        #[arg(long, requires = "lat", conflicts_with_all = ["u", "v"], allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Latitude in degrees (requires --lon)
        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        /// Surface U in [0, 1) (requires --v)
        #[arg(long, requires = "v")]
        u: Option<f64>,

        /// Surface V in [0, 1), 0 at the south pole (requires --u)
        #[arg(long, requires = "u")]
        v: Option<f64>,

        /// Write the highlight layer for the picked country as PNG
        #[arg(long)]
        highlight_out: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = resolve_config(args.config.as_deref())?;

    match args.command {
        Command::Bake { input, out } => {
            let index = bake(&input, &out, &config)?;
            println!(
                "wrote {} ({} countries, source {})",
                out.display(),
                index.features.len(),
                index.source_hash
            );
        }
        Command::Pick {
            input,
            lon,
            lat,
            u,
            v,
            highlight_out,
        } => {
            let target = match (lon, lat, u, v) {
                (Some(lon), Some(lat), _, _) => PickTarget::LonLat { lon, lat },
                (_, _, Some(u), Some(v)) => PickTarget::Uv { u, v },
                _ => return Err("pick needs --lon/--lat or --u/--v".into()),
            };
            let outcome = pick(&input, target, config, highlight_out.as_deref())?;
            if let Some(path) = &highlight_out {
                info!(path = %path.display(), "wrote highlight layer");
            }
            println!("{}", outcome.status_line());
        }
    }
    Ok(())
}
