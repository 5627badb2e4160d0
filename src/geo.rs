//! Map Geometry
//!
//! Web Mercator projection and slippy-map tile layout for the map picker.

use std::f64::consts::PI;

/// Edge length of one map tile in pixels
pub const TILE_SIZE: f64 = 256.0;

/// Zoom level the map opens at
pub const DEFAULT_ZOOM: u8 = 15;

/// Latitude beyond which Web Mercator is undefined
const MAX_LATITUDE: f64 = 85.051_128_779_8;

/// Tile servers rotated across to spread load
const TILE_SUBDOMAINS: [&str; 3] = ["a", "b", "c"];

/// A geographic coordinate in degrees
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// World pixel coordinates of `pos` at `zoom`
pub fn project(pos: LatLng, zoom: u8) -> (f64, f64) {
    let scale = world_size(zoom);
    let lat = pos.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();
    let x = (pos.lng + 180.0) / 360.0 * scale;
    let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / PI) / 2.0 * scale;
    (x, y)
}

/// Inverse of [`project`]
pub fn unproject(x: f64, y: f64, zoom: u8) -> LatLng {
    let scale = world_size(zoom);
    let lng = x / scale * 360.0 - 180.0;
    let n = PI - 2.0 * PI * y / scale;
    LatLng::new(n.sinh().atan().to_degrees(), lng)
}

fn world_size(zoom: u8) -> f64 {
    TILE_SIZE * 2f64.powi(i32::from(zoom))
}

/// One tile placed inside the viewport
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub z: u8,
    /// Offset of the tile's top-left corner from the viewport's, in pixels
    pub left: f64,
    pub top: f64,
}

impl Tile {
    /// OpenStreetMap tile URL
    pub fn url(&self) -> String {
        let subdomain = TILE_SUBDOMAINS[((self.x + self.y) % 3) as usize];
        format!(
            "https://{}.tile.openstreetmap.org/{}/{}/{}.png",
            subdomain, self.z, self.x, self.y
        )
    }
}

/// A rectangular map view centered on a coordinate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapViewport {
    pub center: LatLng,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

impl MapViewport {
    pub fn new(center: LatLng, zoom: u8, width: f64, height: f64) -> Self {
        Self { center, zoom, width, height }
    }

    /// World pixel position of the viewport's top-left corner
    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = project(self.center, self.zoom);
        (cx - self.width / 2.0, cy - self.height / 2.0)
    }

    /// Viewport pixel position of `pos`
    pub fn to_screen(&self, pos: LatLng) -> (f64, f64) {
        let (x, y) = project(pos, self.zoom);
        let (ox, oy) = self.origin();
        (x - ox, y - oy)
    }

    /// Coordinate under the viewport pixel `(x, y)`
    pub fn to_lat_lng(&self, x: f64, y: f64) -> LatLng {
        let (ox, oy) = self.origin();
        unproject(ox + x, oy + y, self.zoom)
    }

    /// Tiles covering the viewport
    ///
    /// Columns wrap around the antimeridian; rows past the poles are skipped.
    pub fn tiles(&self) -> Vec<Tile> {
        let (ox, oy) = self.origin();
        let count = 1i64 << self.zoom;

        let first_x = (ox / TILE_SIZE).floor() as i64;
        let last_x = ((ox + self.width) / TILE_SIZE).ceil() as i64 - 1;
        let first_y = (oy / TILE_SIZE).floor() as i64;
        let last_y = ((oy + self.height) / TILE_SIZE).ceil() as i64 - 1;

        let mut tiles = Vec::new();
        for ty in first_y..=last_y {
            if ty < 0 || ty >= count {
                continue;
            }
            for tx in first_x..=last_x {
                tiles.push(Tile {
                    x: tx.rem_euclid(count) as u32,
                    y: ty as u32,
                    z: self.zoom,
                    left: tx as f64 * TILE_SIZE - ox,
                    top: ty as f64 * TILE_SIZE - oy,
                });
            }
        }
        tiles
    }
}
