pub mod address;
pub mod auth;
pub mod org;
pub mod requests;
pub mod residents;
pub mod schedule;
pub mod settings;
pub mod tasks;
pub mod users;
