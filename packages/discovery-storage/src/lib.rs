pub mod audit;
pub mod db;
pub mod endorsements;
pub mod models;
pub mod overlay;
pub mod schema;
pub mod seed;

mod error;

pub use error::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;
