use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::api::Geocoder;
use crate::config::Config;
use crate::entities::{Coordinates, Place};
use crate::error::{invalid_input_error, not_found_error, upstream_error, Error};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: String,
}

pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &Config) -> Result<Self, Error> {
        let client = Client::builder()
            .user_agent("viator/0.1")
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.geocode_base.clone(),
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    #[tracing::instrument(skip(self))]
    async fn resolve(&self, query: &str) -> Result<Place, Error> {
        let url = format!("{}/search", self.base_url);

        let res = self
            .client
            .get(url)
            .query(&[("format", "json")])
            .query(&[("q", query)])
            .send()
            .await?;

        let status_code = res.status().as_u16();

        if status_code >= 400 && status_code < 500 {
            return Err(invalid_input_error());
        } else if status_code != 200 {
            return Err(upstream_error());
        }

        let candidates: Vec<SearchCandidate> = res.json().await?;

        place_from_candidates(query, candidates)
    }
}

/// Takes the first candidate in service order; no local re-ranking.
pub fn place_from_candidates(
    query: &str,
    candidates: Vec<SearchCandidate>,
) -> Result<Place, Error> {
    let first = match candidates.into_iter().next() {
        Some(candidate) => candidate,
        None => return Err(not_found_error()),
    };

    let latitude: f64 = first.lat.parse().map_err(|_| upstream_error())?;
    let longitude: f64 = first.lon.parse().map_err(|_| upstream_error())?;

    let coordinates = Coordinates::new(latitude, longitude).map_err(|_| upstream_error())?;

    let description = if first.display_name.is_empty() {
        query.to_string()
    } else {
        first.display_name
    };

    Ok(Place::new(coordinates, description))
}
