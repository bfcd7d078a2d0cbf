use reqwest::StatusCode;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::*;
use crate::template::UrlTemplate;
use crate::tiles::{TileIndex, TileRange};

/// Every variant is fatal: the run stops at the first failing tile and files
/// already written are left in place.
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Error fetching data from {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("API returned status {status} for {url}")]
    Status { url: String, status: StatusCode },

    #[error("Error reading response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },

    #[error("Error creating file {}: {source}", path.display())]
    CreateFile { path: PathBuf, source: std::io::Error },

    #[error("Error saving image to {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DownloadSummary {
    pub tiles: u64,
    pub bytes: u64,
}

pub fn tile_file_name(tile: TileIndex) -> String {
    format!("{FILE_PREFIX}_{}_{}.{FILE_EXTENSION}", tile.x, tile.y)
}

/// Fetch every tile in `range` (x outer, y inner) and save each body verbatim
/// under `out_dir`.
pub async fn download_tiles(
    client: &reqwest::Client,
    template: &UrlTemplate,
    range: &TileRange,
    out_dir: &Path,
) -> Result<DownloadSummary, DownloadError> {
    info!(
        "Fetching {}x{} = {} tiles at zoom {}",
        range.width(),
        range.height(),
        range.len(),
        range.zoom,
    );
    debug!(template = template.as_str(), "URL template");
    if range.is_empty() {
        warn!("Bounding box covers no tiles");
    }

    let mut summary = DownloadSummary::default();
    for tile in range.iter() {
        let bytes = fetch_tile(client, template, range.zoom, tile, out_dir).await?;
        summary.tiles += 1;
        summary.bytes += bytes;
        info!("Saved satellite image {}_{}.{FILE_EXTENSION}", tile.x, tile.y);
    }

    info!(
        "Downloaded {} tiles ({} bytes) to {}",
        summary.tiles,
        summary.bytes,
        out_dir.display(),
    );
    Ok(summary)
}

/// Stream one tile to disk. Response and file are both dropped on return.
async fn fetch_tile(
    client: &reqwest::Client,
    template: &UrlTemplate,
    zoom: u32,
    tile: TileIndex,
    out_dir: &Path,
) -> Result<u64, DownloadError> {
    let url = template.url(zoom, tile.x, tile.y);
    debug!(%url, "GET");

    let mut response = match client.get(&url).send().await {
        Ok(response) => response,
        Err(source) => return Err(DownloadError::Request { url, source }),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return Err(DownloadError::Status { url, status });
    }

    let path = out_dir.join(tile_file_name(tile));
    let mut file = match File::create(&path).await {
        Ok(file) => file,
        Err(source) => return Err(DownloadError::CreateFile { path, source }),
    };

    let mut written = 0u64;
    loop {
        let chunk = match response.chunk().await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => break,
            Err(source) => return Err(DownloadError::Body { url, source }),
        };
        if let Err(source) = file.write_all(&chunk).await {
            return Err(DownloadError::Write { path, source });
        }
        written += chunk.len() as u64;
    }
    if let Err(source) = file.flush().await {
        return Err(DownloadError::Write { path, source });
    }

    debug!(path = %path.display(), bytes = written, "wrote tile");
    Ok(written)
}
