pub mod authorizor;
pub mod password;
pub mod token;

mod directory;
mod user;

pub use directory::Directory;
pub use user::User;
