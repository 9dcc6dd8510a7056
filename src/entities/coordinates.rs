use geo_types::Point;
use serde::{Deserialize, Serialize};

use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, Error> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid_input_error());
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Routing services exchange positions as (longitude, latitude) pairs,
    /// the inverse of the internal order.
    pub fn from_wire(pair: [f64; 2]) -> Result<Self, Error> {
        Self::new(pair[1], pair[0])
    }

    pub fn to_wire(&self) -> String {
        format!("{},{}", self.longitude, self.latitude)
    }
}

impl From<Coordinates> for Point<f64> {
    fn from(coordinates: Coordinates) -> Self {
        Point::new(coordinates.longitude, coordinates.latitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_pairs() {
        assert!(Coordinates::new(90.1, 0.0).is_err());
        assert!(Coordinates::new(-90.1, 0.0).is_err());
        assert!(Coordinates::new(0.0, 180.5).is_err());
        assert!(Coordinates::new(0.0, -181.0).is_err());
        assert!(Coordinates::new(13.0827, 80.2707).is_ok());
    }

    #[test]
    fn wire_order_is_longitude_first() {
        let coordinates = Coordinates::from_wire([80.2707, 13.0827]).unwrap();

        assert_eq!(coordinates.latitude, 13.0827);
        assert_eq!(coordinates.longitude, 80.2707);
        assert_eq!(coordinates.to_wire(), "80.2707,13.0827");
    }

    #[test]
    fn point_conversion_maps_x_to_longitude() {
        let point: geo_types::Point<f64> = Coordinates::new(13.0827, 80.2707).unwrap().into();

        assert_eq!(point.x(), 80.2707);
        assert_eq!(point.y(), 13.0827);
    }
}
