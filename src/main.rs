mod config;
mod download;
mod template;
mod tiles;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use template::UrlTemplate;
use tiles::{BoundingBox, TileRange};

#[derive(Parser)]
#[command(
    name = "gibs-tiles",
    about = "Download satellite imagery tiles covering a bounding box"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    tiles: TileArgs,

    /// Verbosity (-v for debug, -vv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every tile in the bounding box and save it to disk (default)
    Download,

    /// Print the tile range and request URLs without fetching anything
    Plan,
}

#[derive(Args)]
struct TileArgs {
    /// Tile zoom level
    #[arg(short, long, global = true, default_value_t = config::DEFAULT_ZOOM)]
    zoom: u32,

    /// Tile URL template with {z}, {x} and {y} placeholders
    #[arg(short, long, global = true, default_value = config::GIBS_URL_TEMPLATE)]
    url: String,

    /// Directory the tile images are written to
    #[arg(short, long, global = true, default_value = config::OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Southern edge of the bounding box (degrees)
    #[arg(long, global = true, default_value_t = config::BBOX_SOUTH, allow_hyphen_values = true)]
    south: f64,

    /// Western edge of the bounding box (degrees)
    #[arg(long, global = true, default_value_t = config::BBOX_WEST, allow_hyphen_values = true)]
    west: f64,

    /// Northern edge of the bounding box (degrees)
    #[arg(long, global = true, default_value_t = config::BBOX_NORTH, allow_hyphen_values = true)]
    north: f64,

    /// Eastern edge of the bounding box (degrees)
    #[arg(long, global = true, default_value_t = config::BBOX_EAST, allow_hyphen_values = true)]
    east: f64,
}

impl TileArgs {
    fn range(&self) -> TileRange {
        let bbox = BoundingBox::new(self.south, self.west, self.north, self.east);
        TileRange::covering(&bbox, self.zoom)
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn build_client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .user_agent(config::USER_AGENT)
        .build()?)
}

fn print_plan(template: &UrlTemplate, range: &TileRange) {
    println!(
        "zoom {}: x {}..={}, y {}..={} ({}x{} = {} tiles)",
        range.zoom,
        range.min.x,
        range.max.x,
        range.min.y,
        range.max.y,
        range.width(),
        range.height(),
        range.len(),
    );
    for tile in range.iter() {
        println!(
            "{}\t{}",
            download::tile_file_name(tile),
            template.url(range.zoom, tile.x, tile.y),
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let template = UrlTemplate::new(cli.tiles.url.as_str())?;
    let range = cli.tiles.range();

    match cli.command.unwrap_or(Commands::Download) {
        Commands::Download => {
            let client = build_client()?;
            download::download_tiles(&client, &template, &range, &cli.tiles.output_dir)
                .await
                .context("Tile download aborted")?;
        }

        Commands::Plan => print_plan(&template, &range),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_downloads_the_default_area() {
        let cli = Cli::try_parse_from(["gibs-tiles"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.tiles.zoom, config::DEFAULT_ZOOM);
        assert_eq!(cli.tiles.url, config::GIBS_URL_TEMPLATE);
        assert_eq!(cli.tiles.output_dir, PathBuf::from("."));
        assert_eq!(cli.tiles.range().len(), 1);
    }

    #[test]
    fn flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "gibs-tiles",
            "plan",
            "--zoom",
            "1",
            "--south",
            "-10",
            "--west",
            "-10",
            "--north",
            "10",
            "--east",
            "10",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Plan)));
        assert_eq!(cli.tiles.range().len(), 4);
    }
}
