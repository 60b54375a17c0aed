use sqlx::migrate::Migrator;

pub mod address_repo;
pub use address_repo::AddressRepository;
pub mod org_repo;
pub use org_repo::OrgRepository;
pub mod schedule_repo;
pub use schedule_repo::ScheduleRepository;
pub mod resident_repo;
pub use resident_repo::ResidentRepository;
pub mod request_repo;
pub use request_repo::RequestRepository;
pub mod user_repo;
pub use user_repo::UserRepository;
pub mod settings_repo;
pub use settings_repo::SettingsRepository;

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!();
