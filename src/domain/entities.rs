pub mod education;
pub mod experience;
pub mod profile;
pub mod social;
pub mod sub_collection;
pub mod token;
pub mod user;
