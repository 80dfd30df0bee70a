/// Application-wide constants.
/// Camera values follow MapLibre conventions: center is (lng, lat).
pub const DEFAULT_CENTER: [f64; 2] = [0.0, 20.0];
pub const DEFAULT_ZOOM: f64 = 1.5;
/// Duration for host-triggered camera flights (ms).
pub const DEFAULT_FLY_DURATION_MS: f64 = 2000.0;

pub const OSM_TILE_URL: &str = "https://tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const OSM_ATTRIBUTION: &str =
    "© <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors";

/// Data file and portrait directory, resolved against the page base path.
pub const LEADERS_GEOJSON: &str = "leaders.geojson";
pub const PORTRAITS_DIR: &str = "assets/portraits";
