// src/test_support.rs

use std::str::FromStr;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
};
use chrono::FixedOffset;
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use crate::{
    config::{AppState, Config},
    db::MIGRATOR,
    models::auth::CreateUserPayload,
    routes::build_router,
};

pub const PASSWORD: &str = "correct-horse";

/// A migrated in-memory database with three principals: a superuser
/// (id 1, the bootstrap account), a staff account and an account with no
/// capability.
pub struct TestApp {
    pub state: AppState,
    pub admin: String,
    pub staff: String,
    pub nobody: String,
}

fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".into(),
        jwt_secret: "test-secret".into(),
        bind_addr: ([127, 0, 0, 1], 0).into(),
        token_ttl_hours: 1,
        display_offset: FixedOffset::east_opt(3 * 3600).unwrap(),
        bcrypt_cost: 4,
        bootstrap_admin: None,
    }
}

impl TestApp {
    pub async fn new() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        // One connection that never closes: the in-memory database lives
        // as long as it does.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .unwrap();
        MIGRATOR.run(&pool).await.unwrap();

        let state = AppState::with_pool(pool, test_config());

        let admin = Self::account(&state, "admin", true, true).await;
        let staff = Self::account(&state, "dispatcher", true, false).await;
        let nobody = Self::account(&state, "guest", false, false).await;

        Self {
            state,
            admin,
            staff,
            nobody,
        }
    }

    async fn account(state: &AppState, username: &str, is_staff: bool, is_superuser: bool) -> String {
        let user = state
            .auth_service
            .create_user(&CreateUserPayload {
                username: username.into(),
                password: PASSWORD.into(),
                first_name: String::new(),
                last_name: String::new(),
                is_staff,
                is_superuser,
            })
            .await
            .unwrap();
        state.auth_service.create_token(user.id).unwrap()
    }

    /// Sends one request through the full router. Non-JSON bodies come back
    /// as a JSON string, empty ones as null.
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = build_router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();

        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
        };
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// POSTs as the superuser and returns the new row's id.
    pub async fn create(&self, uri: &str, body: Value) -> i64 {
        let (status, value) = self.post(uri, &self.admin, body).await;
        assert_eq!(status, StatusCode::CREATED, "{uri}: {value}");
        value["id"].as_i64().unwrap()
    }

    /// City, street and building, an office with a housing complex and one
    /// house, plus a department with one position and one service.
    pub async fn seed(&self) -> Seed {
        let city = self.create("/api/v1/city/create/", json!({ "name": "Казань" })).await;
        let street = self
            .create("/api/v1/street/create/", json!({ "city": city, "name": "Ленина" }))
            .await;
        let building = self
            .create("/api/v1/address/create/", json!({ "street": street, "number": "5" }))
            .await;
        let office = self
            .create(
                "/api/v1/office/create/",
                json!({ "name": "УК Центр", "address": building }),
            )
            .await;
        let complex = self
            .create(
                "/api/v1/complex/create/",
                json!({ "name": "ЖК Северный", "office": office }),
            )
            .await;
        let house = self
            .create(
                "/api/v1/house/create/",
                json!({ "complex": complex, "address": building }),
            )
            .await;
        let department = self
            .create("/api/v1/department/create/", json!({ "name": "Сантехника" }))
            .await;
        let position = self
            .create(
                "/api/v1/position/create/",
                json!({ "name": "Сантехник", "department": department }),
            )
            .await;
        let service = self
            .create(
                "/api/v1/service/create/",
                json!({ "name": "Замена смесителя", "description": "Демонтаж и установка", "position": position }),
            )
            .await;
        let resident = self
            .create(
                "/api/v1/resident/create/",
                json!({
                    "name": "Анна", "surname": "Кузнецова", "patronymic": "Игоревна",
                    "phone": "+79990001122", "tg_id": 5550001
                }),
            )
            .await;

        Seed {
            city,
            building,
            office,
            complex,
            house,
            position,
            service,
            resident,
        }
    }

    pub async fn employee(&self, seed: &Seed, name: &str, tg_id: i64) -> i64 {
        self.create(
            "/api/v1/employee/create/",
            json!({
                "name": name, "surname": "Петров", "patronymic": "Сергеевич",
                "position": seed.position, "office": seed.office, "tg_id": tg_id
            }),
        )
        .await
    }

    pub async fn request(&self, seed: &Seed, text: &str, status: i64) -> i64 {
        self.create(
            "/api/v1/request/create/",
            json!({
                "text": text, "status": status, "resident": seed.resident,
                "address": seed.house, "apartment": "12"
            }),
        )
        .await
    }
}

pub struct Seed {
    pub city: i64,
    pub building: i64,
    pub office: i64,
    pub complex: i64,
    pub house: i64,
    pub position: i64,
    pub service: i64,
    pub resident: i64,
}
