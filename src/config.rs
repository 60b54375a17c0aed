// src/config.rs

use std::{env, net::SocketAddr, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::FixedOffset;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

use crate::{
    db::{
        AddressRepository, OrgRepository, RequestRepository, ResidentRepository,
        ScheduleRepository, SettingsRepository, UserRepository,
    },
    services::{
        auth::AuthService, directory_service::DirectoryService,
        request_service::RequestService, schedule_service::ScheduleService,
        task_service::TaskService,
    },
};

/// Runtime settings, read once from the environment (and `.env`).
#[derive(Debug, Clone)]
pub struct Config {
    /// Env: `DATABASE_URL`, e.g. `sqlite://dispatch.db`
    pub database_url: String,
    /// Env: `JWT_SECRET`
    pub jwt_secret: String,
    /// Env: `BIND_ADDR`. Default: `0.0.0.0:3000`
    pub bind_addr: SocketAddr,
    /// Env: `TOKEN_TTL_HOURS`. Default: 168
    pub token_ttl_hours: i64,
    /// Offset dates are shown in. Env: `DISPLAY_UTC_OFFSET_MINUTES`. Default: 180
    pub display_offset: FixedOffset,
    /// Env: `BCRYPT_COST`
    pub bcrypt_cost: u32,
    /// Superuser created on an empty database.
    /// Env: `BOOTSTRAP_ADMIN_USERNAME` + `BOOTSTRAP_ADMIN_PASSWORD`
    pub bootstrap_admin: Option<(String, String)>,
}

fn parse_or<T: FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("{key} is invalid: {e}")),
        Err(_) => Ok(default),
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        let bind_addr = parse_or("BIND_ADDR", SocketAddr::from(([0, 0, 0, 0], 3000)))?;
        let token_ttl_hours = parse_or("TOKEN_TTL_HOURS", 168_i64)?;
        let offset_minutes = parse_or("DISPLAY_UTC_OFFSET_MINUTES", 180_i32)?;
        let display_offset = FixedOffset::east_opt(offset_minutes * 60)
            .context("DISPLAY_UTC_OFFSET_MINUTES is out of range")?;
        let bcrypt_cost = parse_or("BCRYPT_COST", bcrypt::DEFAULT_COST)?;

        let bootstrap_admin = match (
            env::var("BOOTSTRAP_ADMIN_USERNAME"),
            env::var("BOOTSTRAP_ADMIN_PASSWORD"),
        ) {
            (Ok(username), Ok(password)) => Some((username, password)),
            _ => None,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            bind_addr,
            token_ttl_hours,
            display_offset,
            bcrypt_cost,
            bootstrap_admin,
        })
    }
}

// Shared by every handler; cloning is cheap (pool and Arcs)
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub config: Arc<Config>,

    pub address_repo: AddressRepository,
    pub org_repo: OrgRepository,
    pub resident_repo: ResidentRepository,
    pub user_repo: UserRepository,
    pub settings_repo: SettingsRepository,

    pub auth_service: AuthService,
    pub directory_service: DirectoryService,
    pub request_service: RequestService,
    pub task_service: TaskService,
    pub schedule_service: ScheduleService,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let db_pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect_with(options)
            .await?;

        tracing::info!("database connection established");

        Ok(Self::with_pool(db_pool, config))
    }

    /// Wires repositories and services around an existing pool.
    pub fn with_pool(db_pool: SqlitePool, config: Config) -> Self {
        let config = Arc::new(config);

        let address_repo = AddressRepository::new(db_pool.clone());
        let org_repo = OrgRepository::new(db_pool.clone());
        let resident_repo = ResidentRepository::new(db_pool.clone());
        let user_repo = UserRepository::new(db_pool.clone());
        let settings_repo = SettingsRepository::new(db_pool.clone());
        let request_repo = RequestRepository::new(db_pool.clone());
        let schedule_repo = ScheduleRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            user_repo.clone(),
            config.jwt_secret.clone(),
            config.token_ttl_hours,
            config.bcrypt_cost,
        );
        let directory_service = DirectoryService::new(address_repo.clone(), org_repo.clone());
        let request_service = RequestService::new(request_repo.clone(), config.display_offset);
        let task_service = TaskService::new(request_repo);
        let schedule_service = ScheduleService::new(schedule_repo, db_pool.clone());

        Self {
            db_pool,
            config,
            address_repo,
            org_repo,
            resident_repo,
            user_repo,
            settings_repo,
            auth_service,
            directory_service,
            request_service,
            task_service,
            schedule_service,
        }
    }
}
