mod location;
mod place;
mod user;

pub use location::Coordinates;
pub use place::{Place, PlaceChanges, PlaceDraft};
pub use user::{Credentials, Signup, User, UserProfile};
