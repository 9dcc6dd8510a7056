use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::{Coordinates, Place, Route};
use crate::error::{invalid_input_error, Error};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryRole {
    Origin,
    Destination,
}

impl fmt::Display for QueryRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Origin => write!(f, "origin"),
            Self::Destination => write!(f, "destination"),
        }
    }
}

impl FromStr for QueryRole {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "origin" => Ok(Self::Origin),
            "destination" => Ok(Self::Destination),
            _ => Err(invalid_input_error()),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LivePosition {
    pub coordinates: Coordinates,
    pub updated_at: DateTime<Utc>,
}

impl LivePosition {
    pub fn new(coordinates: Coordinates) -> Self {
        Self {
            coordinates,
            updated_at: Utc::now(),
        }
    }
}

/// All mutable session data. Owned by the engine and mutated only through
/// its methods; collaborators return results or emit events instead.
#[derive(Debug, Default)]
pub struct SessionState {
    pub origin_query: String,
    pub destination_query: String,
    pub origin: Option<Place>,
    pub destination: Option<Place>,
    pub route: Option<Route>,
    pub live_position: Option<LivePosition>,
    pub transcript: String,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self, role: QueryRole) -> &str {
        match role {
            QueryRole::Origin => &self.origin_query,
            QueryRole::Destination => &self.destination_query,
        }
    }

    pub fn set_query(&mut self, role: QueryRole, text: String) {
        match role {
            QueryRole::Origin => self.origin_query = text,
            QueryRole::Destination => self.destination_query = text,
        }
    }

    pub fn set_place(&mut self, role: QueryRole, place: Option<Place>) {
        match role {
            QueryRole::Origin => self.origin = place,
            QueryRole::Destination => self.destination = place,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            origin_query: self.origin_query.clone(),
            destination_query: self.destination_query.clone(),
            origin_marker: self.origin.as_ref().map(|p| p.coordinates),
            destination_marker: self.destination.as_ref().map(|p| p.coordinates),
            live_position: self.live_position.as_ref().map(|p| p.coordinates),
            route_polyline: self
                .route
                .as_ref()
                .map(|r| r.path.points().to_vec())
                .unwrap_or_default(),
            transcript: self.transcript.clone(),
        }
    }
}

/// Read-only projection handed to the presentation shell.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Snapshot {
    pub origin_query: String,
    pub destination_query: String,
    pub origin_marker: Option<Coordinates>,
    pub destination_marker: Option<Coordinates>,
    pub live_position: Option<Coordinates>,
    pub route_polyline: Vec<Coordinates>,
    pub transcript: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{RouteLeg, RoutePath};

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!("origin".parse::<QueryRole>().unwrap(), QueryRole::Origin);
        assert_eq!(
            "destination".parse::<QueryRole>().unwrap(),
            QueryRole::Destination
        );
        assert!("waypoint".parse::<QueryRole>().is_err());
    }

    #[test]
    fn snapshot_projects_current_state() {
        let mut state = SessionState::new();
        state.set_query(QueryRole::Origin, "Chennai Central".into());

        let origin = Place::new(
            Coordinates::new(13.0827, 80.2707).unwrap(),
            "Chennai Central".into(),
        );
        let destination = Place::new(
            Coordinates::new(12.9941, 80.1709).unwrap(),
            "Chennai Airport".into(),
        );

        state.set_place(QueryRole::Origin, Some(origin.clone()));
        state.set_place(QueryRole::Destination, Some(destination.clone()));
        state.route = Some(Route::new(
            origin,
            destination,
            RoutePath(vec![Coordinates::new(13.0, 80.2).unwrap()]),
            vec![RouteLeg::default()],
        ));

        let snapshot = state.snapshot();

        assert_eq!(snapshot.origin_query, "Chennai Central");
        assert_eq!(snapshot.origin_marker.unwrap().latitude, 13.0827);
        assert_eq!(snapshot.destination_marker.unwrap().longitude, 80.1709);
        assert_eq!(snapshot.route_polyline.len(), 1);
        assert!(snapshot.live_position.is_none());
    }

    #[test]
    fn empty_state_projects_empty_polyline() {
        let snapshot = SessionState::new().snapshot();

        assert!(snapshot.route_polyline.is_empty());
        assert_eq!(snapshot.transcript, "");
    }
}
