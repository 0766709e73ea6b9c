use oso::{Oso, PolarClass};

use crate::auth::{Directory, User};
use crate::entities::Place;

pub fn new() -> Oso {
    let mut o = Oso::new();

    o.register_class(Directory::get_polar_class()).unwrap();
    o.register_class(User::get_polar_class()).unwrap();
    o.register_class(Place::get_polar_class()).unwrap();

    o.load_str(include_str!("rules.polar")).unwrap();

    o
}

#[cfg(test)]
fn test_place(creator_id: uuid::Uuid) -> Place {
    use crate::entities::{Coordinates, PlaceDraft};

    let draft = PlaceDraft {
        title: "Cafe".into(),
        description: "Nice spot".into(),
        address: "1 Main St".into(),
        image: "uploads/images/cafe.png".into(),
    };

    Place::new(creator_id, draft, Coordinates { lat: 1.0, lng: 2.0 })
}

#[test]
fn creator_may_update_and_delete() {
    let authorizor = new();

    let creator = User {
        id: uuid::Uuid::new_v4(),
    };
    let place = test_place(creator.id);

    let result = authorizor.is_allowed(creator.clone(), "update", place.clone());
    assert_eq!(result.unwrap(), true);

    let result = authorizor.is_allowed(creator.clone(), "delete", place.clone());
    assert_eq!(result.unwrap(), true);
}

#[test]
fn non_creator_is_denied() {
    let authorizor = new();

    let creator = User {
        id: uuid::Uuid::new_v4(),
    };
    let stranger = User {
        id: uuid::Uuid::new_v4(),
    };
    let place = test_place(creator.id);

    let result = authorizor.is_allowed(stranger.clone(), "update", place.clone());
    assert_eq!(result.unwrap(), false);

    let result = authorizor.is_allowed(stranger.clone(), "delete", place.clone());
    assert_eq!(result.unwrap(), false);
}

#[test]
fn reading_is_not_gated_by_the_policy() {
    // reads are public endpoints; the policy only ever sees mutations
    let authorizor = new();

    let stranger = User {
        id: uuid::Uuid::new_v4(),
    };
    let place = test_place(uuid::Uuid::new_v4());

    let result = authorizor.is_allowed(stranger, "read", place);
    assert_eq!(result.unwrap(), false);
}

#[test]
fn any_user_may_create_places() {
    let authorizor = new();

    let user = User {
        id: uuid::Uuid::new_v4(),
    };

    let result = authorizor.is_allowed(user, "create_place", Directory::default());
    assert_eq!(result.unwrap(), true);
}
