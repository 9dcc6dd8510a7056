use std::env;
use std::time::Duration;

/// Runtime settings for a navigation session. Every field can be
/// overridden through the environment; defaults point at the public
/// OpenStreetMap services.
#[derive(Clone, Debug)]
pub struct Config {
    pub geocode_base: String,
    pub routing_base: String,
    pub request_timeout: Duration,
    pub capture_window: Duration,
    pub recenter_zoom: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocode_base: "https://nominatim.openstreetmap.org".into(),
            routing_base: "http://router.project-osrm.org".into(),
            request_timeout: Duration::from_secs(10),
            capture_window: Duration::from_millis(3000),
            recenter_zoom: 13,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base) = env::var("GEOCODE_API_BASE") {
            config.geocode_base = base;
        }

        if let Ok(base) = env::var("ROUTING_API_BASE") {
            config.routing_base = base;
        }

        if let Some(secs) = parse_var("REQUEST_TIMEOUT_SECS") {
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(millis) = parse_var("CAPTURE_WINDOW_MS") {
            config.capture_window = Duration::from_millis(millis);
        }

        if let Some(zoom) = parse_var("RECENTER_ZOOM") {
            config.recenter_zoom = zoom;
        }

        config
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    match env::var(name) {
        Ok(value) => match value.parse() {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                tracing::warn!("ignoring unparseable {} value: {}", name, value);
                None
            }
        },
        Err(_) => None,
    }
}
