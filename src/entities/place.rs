use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Place {
    pub id: Uuid,
    pub coordinates: Coordinates,
    pub description: String,
}

impl Place {
    pub fn new(coordinates: Coordinates, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            coordinates,
            description,
        }
    }
}
