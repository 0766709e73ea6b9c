use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A registered account. The full record (including the password hash) only
/// ever travels between the engine and the store; read endpoints expose the
/// [`UserProfile`] projection instead.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: String,
    pub password_hash: String,
    pub places: Vec<Uuid>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image: String,
    pub places: Vec<Uuid>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Signup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub image: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl User {
    pub fn new(name: String, email: String, password_hash: String, image: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            image,
            password_hash,
            places: Vec::new(),
        }
    }

    pub fn add_place(&mut self, place_id: Uuid) {
        self.places.push(place_id);
    }

    pub fn remove_place(&mut self, place_id: Uuid) {
        self.places.retain(|id| *id != place_id);
    }

    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            image: self.image.clone(),
            places: self.places.clone(),
        }
    }
}

#[test]
fn place_list_stays_ordered() {
    let mut user = User::new("a".into(), "a@b.c".into(), "hash".into(), "img".into());

    let first = Uuid::new_v4();
    let second = Uuid::new_v4();
    let third = Uuid::new_v4();

    user.add_place(first);
    user.add_place(second);
    user.add_place(third);

    assert_eq!(user.places, vec![first, second, third]);

    user.remove_place(second);
    assert_eq!(user.places, vec![first, third]);

    // removing an id that is not present is a no-op
    user.remove_place(second);
    assert_eq!(user.places, vec![first, third]);
}

#[test]
fn profile_omits_password_hash() {
    let user = User::new("a".into(), "a@b.c".into(), "hash".into(), "img".into());
    let profile = serde_json::to_value(user.profile()).unwrap();

    assert!(profile.get("password_hash").is_none());
    assert_eq!(profile["email"], "a@b.c");
}
