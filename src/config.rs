/// Bounding box for central Paris
pub const BBOX_SOUTH: f64 = 48.8156;
pub const BBOX_NORTH: f64 = 48.9022;
pub const BBOX_WEST: f64 = 2.2241;
pub const BBOX_EAST: f64 = 2.4699;

pub const DEFAULT_ZOOM: u32 = 8;

/// NASA GIBS true-colour VIIRS imagery, WMTS path order z/y/x.
pub const GIBS_URL_TEMPLATE: &str = "https://gibs.earthdata.nasa.gov/wmts/epsg4326/best/VIIRS_SNPP_CorrectedReflectance_TrueColor/default/2021-09-15/250m/{z}/{y}/{x}.jpg";

pub const OUTPUT_DIR: &str = ".";
pub const FILE_PREFIX: &str = "satellite_image";
pub const FILE_EXTENSION: &str = "jpg";

pub const USER_AGENT: &str = "gibs-tiles/0.1";
