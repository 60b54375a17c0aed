pub mod address;
pub mod auth;
pub mod org;
pub mod request;
pub mod resident;
pub mod schedule;
pub mod settings;
pub mod task;
