pub mod auth;
pub mod directory_service;
pub mod request_service;
pub mod schedule_service;
pub mod task_service;
