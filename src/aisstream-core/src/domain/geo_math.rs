use geo::{Destination, Distance, Haversine, Point, point};
use serde::{Deserialize, Serialize};

/// Bearing from the center towards the north east corner of a [BoundingBox].
static NORTH_EAST_BEARING: f64 = 45.0;
/// Bearing from the center towards the south west corner of a [BoundingBox].
static SOUTH_WEST_BEARING: f64 = 225.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// A rectangular area described by its south west and north east corners.
///
/// Only constructed through [BoundingBox::around], a box is replaced rather than adjusted when the
/// reference point moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    south_west: GeoPoint,
    north_east: GeoPoint,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> GeoPoint {
        GeoPoint {
            latitude,
            longitude,
        }
    }

    /// Great-circle distance in meters using the haversine formula.
    pub fn distance(&self, other: &GeoPoint) -> f64 {
        Haversine.distance(Point::from(*self), Point::from(*other))
    }
}

impl BoundingBox {
    /// Computes the box whose diagonal corners both lie `radius_meters` from `center`.
    pub fn around(center: GeoPoint, radius_meters: f64) -> BoundingBox {
        let center = Point::from(center);
        let south_west = Haversine.destination(center, SOUTH_WEST_BEARING, radius_meters);
        let north_east = Haversine.destination(center, NORTH_EAST_BEARING, radius_meters);

        BoundingBox {
            south_west: south_west.into(),
            north_east: north_east.into(),
        }
    }

    pub fn south_west(&self) -> GeoPoint {
        self.south_west
    }

    pub fn north_east(&self) -> GeoPoint {
        self.north_east
    }

    /// The corners in the `[[lat, lon], [lat, lon]]` layout aisstream expects.
    pub fn as_corners(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.latitude, self.south_west.longitude],
            [self.north_east.latitude, self.north_east.longitude],
        ]
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(value: GeoPoint) -> Self {
        point!(x: value.longitude, y: value.latitude)
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(value: Point<f64>) -> Self {
        GeoPoint {
            latitude: value.y(),
            longitude: value.x(),
        }
    }
}
