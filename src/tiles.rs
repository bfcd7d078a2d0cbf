use geo_types::Coord;
use std::f64::consts::PI;

/// Slippy-map tile index. Signed so out-of-range coordinates stay visible
/// instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileIndex {
    pub x: i64,
    pub y: i64,
}

/// Area of interest given by its southwest and northeast corners
/// (`x` = longitude, `y` = latitude).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south_west: Coord<f64>,
    pub north_east: Coord<f64>,
}

impl BoundingBox {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Self {
        Self {
            south_west: Coord { x: west, y: south },
            north_east: Coord { x: east, y: north },
        }
    }
}

/// Inclusive rectangle of tiles at one zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileRange {
    pub zoom: u32,
    pub min: TileIndex,
    pub max: TileIndex,
}

impl TileRange {
    /// Tiles covering both corners of `bbox` and everything between them.
    ///
    /// Mercator y grows southward, so the north edge gives the smallest y.
    /// Corners are normalised per axis; swapped corners give the same range.
    pub fn covering(bbox: &BoundingBox, zoom: u32) -> Self {
        let sw = tile_index(bbox.south_west.y, bbox.south_west.x, zoom);
        let ne = tile_index(bbox.north_east.y, bbox.north_east.x, zoom);
        Self {
            zoom,
            min: TileIndex {
                x: sw.x.min(ne.x),
                y: sw.y.min(ne.y),
            },
            max: TileIndex {
                x: sw.x.max(ne.x),
                y: sw.y.max(ne.y),
            },
        }
    }

    pub fn width(&self) -> u64 {
        span(self.min.x, self.max.x)
    }

    pub fn height(&self) -> u64 {
        span(self.min.y, self.max.y)
    }

    /// Tile count, saturating at `u64::MAX` for whole-world boxes at deep zooms.
    pub fn len(&self) -> u64 {
        self.width().saturating_mul(self.height())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Tiles in row-major order: x outer, y inner.
    pub fn iter(&self) -> impl Iterator<Item = TileIndex> + use<> {
        let (min, max) = (self.min, self.max);
        (min.x..=max.x).flat_map(move |x| (min.y..=max.y).map(move |y| TileIndex { x, y }))
    }
}

/// Number of indices in `min..=max`, clamped to `0..=u64::MAX`.
fn span(min: i64, max: i64) -> u64 {
    (i128::from(max) - i128::from(min) + 1).clamp(0, i128::from(u64::MAX)) as u64
}

/// Web Mercator tile containing (`lat`, `lon`) at `zoom`.
///
/// No clamping: points outside the projection's usable latitude or outside
/// [-180, 180) map to indices outside `[0, 2^zoom)`. At the poles the
/// intermediate value is infinite or NaN and saturates in the cast, so a
/// range reaching lat = -90 has `i64::MAX` as its max y and is effectively
/// unbounded.
pub fn tile_index(lat: f64, lon: f64, zoom: u32) -> TileIndex {
    let n = 2_f64.powi(zoom as i32);
    let x = ((lon + 180.0) / 360.0 * n).floor() as i64;
    let y = (mercator_y(lat) * n).floor() as i64;
    TileIndex { x, y }
}

/// Latitude to Web Mercator Y fraction (0.0 = top, 1.0 = bottom).
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}
