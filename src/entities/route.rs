use geo_types::LineString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::{Coordinates, Place};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Maneuver {
    pub instruction: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RouteLeg {
    pub maneuvers: Vec<Maneuver>,
}

/// The polyline to draw, in (latitude, longitude) order.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RoutePath(pub Vec<Coordinates>);

impl RoutePath {
    pub fn points(&self) -> &[Coordinates] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&RoutePath> for LineString<f64> {
    fn from(path: &RoutePath) -> Self {
        path.0
            .iter()
            .map(|c| (c.longitude, c.latitude))
            .collect::<Vec<_>>()
            .into()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Route {
    pub id: Uuid,
    pub origin: Place,
    pub destination: Place,
    pub path: RoutePath,
    pub legs: Vec<RouteLeg>,
}

impl Route {
    pub fn new(origin: Place, destination: Place, path: RoutePath, legs: Vec<RouteLeg>) -> Self {
        Self {
            id: Uuid::new_v4(),
            origin,
            destination,
            path,
            legs,
        }
    }

    pub fn first_leg(&self) -> Option<&RouteLeg> {
        self.legs.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(latitude: f64, longitude: f64) -> Place {
        Place::new(
            Coordinates::new(latitude, longitude).unwrap(),
            "test".into(),
        )
    }

    #[test]
    fn first_leg_is_none_for_empty_legs() {
        let route = Route::new(
            place(13.08, 80.27),
            place(12.98, 80.16),
            RoutePath::default(),
            vec![],
        );

        assert!(route.first_leg().is_none());
    }

    #[test]
    fn line_string_preserves_point_order() {
        let path = RoutePath(vec![
            Coordinates::new(13.08, 80.27).unwrap(),
            Coordinates::new(13.00, 80.20).unwrap(),
        ]);

        let line: LineString<f64> = (&path).into();
        let points: Vec<_> = line.points().collect();

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].y(), 13.08);
        assert_eq!(points[0].x(), 80.27);
        assert_eq!(points[1].y(), 13.00);
    }
}
