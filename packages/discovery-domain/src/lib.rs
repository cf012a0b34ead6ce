pub mod dataset;
pub mod endorsement;
pub mod filters;
pub mod identity;
pub mod provider;
pub mod slug;
pub mod timestamp;
