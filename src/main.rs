use std::sync::Arc;
use std::time::Duration;

use viator::config::Config;
use viator::engine::Engine;
use viator::entities::Coordinates;
use viator::external::nominatim::NominatimGeocoder;
use viator::external::osrm::OsrmRouter;
use viator::server::serve;
use viator::simulation::{ScriptedCapture, SimulatedPositionSource};
use viator::speech::ConsoleSpeech;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let config = Config::from_env();

    let geocoder = NominatimGeocoder::new(&config).unwrap();
    let router = OsrmRouter::new(&config).unwrap();

    // Demo session anchored on Chennai.
    let anchor = Coordinates::new(13.0827, 80.2707).unwrap();

    let engine = Engine::new(
        Arc::new(geocoder),
        Arc::new(router),
        Arc::new(ConsoleSpeech),
        Arc::new(ScriptedCapture::new(vec![
            "Chennai Central".into(),
            "Chennai International Airport".into(),
        ])),
        Arc::new(SimulatedPositionSource::new(
            anchor,
            Duration::from_secs(2),
        )),
        config,
    );

    serve(engine).await;
}
