use oso::PolarClass;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::Coordinates;

#[derive(Clone, Debug, Serialize, Deserialize, PolarClass)]
pub struct Place {
    #[polar(attribute)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub address: String,
    // derived from the address at creation time, never re-derived
    pub location: Coordinates,
    pub image: String,
    #[polar(attribute)]
    pub creator_id: Uuid,
}

/// Caller-supplied fields of a new place. The image path is produced by the
/// upload layer before the engine is invoked.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceDraft {
    pub title: String,
    pub description: String,
    pub address: String,
    pub image: String,
}

/// The only mutable fields of an existing place.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlaceChanges {
    pub title: String,
    pub description: String,
}

impl Place {
    pub fn new(creator_id: Uuid, draft: PlaceDraft, location: Coordinates) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            description: draft.description,
            address: draft.address,
            location,
            image: draft.image,
            creator_id,
        }
    }

    pub fn apply(&mut self, changes: PlaceChanges) {
        self.title = changes.title;
        self.description = changes.description;
    }
}
