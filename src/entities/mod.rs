mod coordinates;
mod place;
mod route;
mod session;

pub use coordinates::Coordinates;
pub use place::Place;
pub use route::{Maneuver, Route, RouteLeg, RoutePath};
pub use session::{LivePosition, QueryRole, SessionState, Snapshot};
