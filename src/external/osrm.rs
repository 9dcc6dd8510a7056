use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::Router;
use crate::config::Config;
use crate::entities::{Coordinates, Maneuver, Place, Route, RouteLeg, RoutePath};
use crate::error::{no_route_error, upstream_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<RouteCandidate>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteCandidate {
    pub geometry: RouteGeometry,
    #[serde(default)]
    pub legs: Vec<LegDetail>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RouteGeometry {
    pub coordinates: Vec<[f64; 2]>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LegDetail {
    #[serde(default)]
    pub steps: Vec<StepDetail>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StepDetail {
    pub maneuver: ManeuverDetail,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ManeuverDetail {
    #[serde(default)]
    pub instruction: String,
}

pub struct OsrmRouter {
    client: Client,
    base_url: String,
}

impl OsrmRouter {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder().timeout(config.request_timeout).build()?;

        Ok(Self {
            client,
            base_url: config.routing_base.clone(),
        })
    }
}

#[async_trait]
impl Router for OsrmRouter {
    #[tracing::instrument(skip(self))]
    async fn create_route(&self, origin: Place, destination: Place) -> Result<Route, Error> {
        // Path segment is lon,lat;lon,lat per the wire format.
        let url = format!(
            "{}/route/v1/driving/{};{}",
            self.base_url,
            origin.coordinates.to_wire(),
            destination.coordinates.to_wire()
        );

        let res = self
            .client
            .get(url)
            .query(&[
                ("overview", "full"),
                ("geometries", "geojson"),
                ("steps", "true"),
            ])
            .send()
            .await?;

        // Routing failures arrive as a non-"Ok" code in the body, so only
        // server-side failures are treated as upstream errors here.
        if res.status().as_u16() >= 500 {
            return Err(upstream_error());
        }

        let response: RouteResponse = res.json().await?;

        route_from_response(origin, destination, response)
    }
}

/// Takes the first route candidate and swaps its geometry back to
/// (latitude, longitude) order.
pub fn route_from_response(
    origin: Place,
    destination: Place,
    response: RouteResponse,
) -> Result<Route, Error> {
    if response.code != "Ok" {
        return Err(no_route_error());
    }

    let candidate = match response.routes.into_iter().next() {
        Some(candidate) => candidate,
        None => return Err(no_route_error()),
    };

    let mut points = Vec::with_capacity(candidate.geometry.coordinates.len());

    for pair in candidate.geometry.coordinates {
        points.push(Coordinates::from_wire(pair).map_err(|_| upstream_error())?);
    }

    let legs = candidate
        .legs
        .into_iter()
        .map(|leg| RouteLeg {
            maneuvers: leg
                .steps
                .into_iter()
                .map(|step| Maneuver {
                    instruction: step.maneuver.instruction,
                })
                .collect(),
        })
        .collect();

    Ok(Route::new(origin, destination, RoutePath(points), legs))
}
