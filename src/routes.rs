// src/routes.rs

use axum::{
    extract::Request,
    http::StatusCode,
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::{
    common::{
        error::ApiError,
        i18n::{self, MessageKey},
    },
    config::AppState,
    handlers,
    middleware::{auth::auth_guard, i18n::Locale},
};

#[cfg(test)]
mod tests;

pub fn build_router(state: AppState) -> Router {
    // Everything under /api/v1 needs a bearer token; capabilities are
    // checked per handler.
    let api_routes = Router::new()
        // Addresses
        .route("/address/", get(handlers::address::list_addresses))
        .route("/address/create/", post(handlers::address::create_address))
        .route("/address/delete/{id}", delete(handlers::address::delete_address))
        .route("/city/", get(handlers::address::list_cities))
        .route("/city/create/", post(handlers::address::create_city))
        .route("/city/{id}/streets", get(handlers::address::city_streets))
        .route("/street/create/", post(handlers::address::create_street))
        .route("/complex/", get(handlers::address::list_complexes))
        .route("/complex/create/", post(handlers::address::create_complex))
        .route("/complex/delete/{id}", delete(handlers::address::delete_complex))
        .route("/complex/{id}/houses", get(handlers::address::complex_houses))
        .route("/house/", get(handlers::address::list_houses))
        .route("/house/create/", post(handlers::address::create_house))
        .route("/house/delete/{id}", delete(handlers::address::delete_house))
        // Organisation
        .route("/office/", get(handlers::org::list_offices))
        .route("/office/create/", post(handlers::org::create_office))
        .route("/office/delete/{id}", delete(handlers::org::delete_office))
        .route("/department/", get(handlers::org::list_departments))
        .route("/department/create/", post(handlers::org::create_department))
        .route("/department/delete/{id}", delete(handlers::org::delete_department))
        .route("/position/", get(handlers::org::list_positions))
        .route("/position/create/", post(handlers::org::create_position))
        .route("/position/delete/{id}", delete(handlers::org::delete_position))
        .route("/employee/", get(handlers::org::list_employees))
        .route("/employee/create/", post(handlers::org::create_employee))
        .route("/employee/delete/{id}", delete(handlers::org::delete_employee))
        .route("/service/", get(handlers::org::list_services))
        .route("/service/employees/", get(handlers::org::service_employees))
        .route("/service/create/", post(handlers::org::create_service))
        .route("/service/delete/{id}", delete(handlers::org::delete_service))
        // Work schedules
        .route("/schedule/", get(handlers::schedule::list_schedules))
        .route("/schedule/create/", post(handlers::schedule::create_schedule))
        .route("/schedule/delete/{id}", delete(handlers::schedule::delete_schedule))
        .route("/schedule/{id}", get(handlers::schedule::get_schedule))
        .route(
            "/schedule/workday/manage/{id}",
            get(handlers::schedule::get_work_day)
                .put(handlers::schedule::put_work_day)
                .patch(handlers::schedule::patch_work_day),
        )
        // Residents
        .route("/resident/", get(handlers::residents::list_residents))
        .route("/resident/create/", post(handlers::residents::create_resident))
        .route("/resident/by_tgid/{chat_id}", get(handlers::residents::resident_by_chat_id))
        // Requests
        .route("/requests/new", get(handlers::requests::list_new))
        .route("/requests/active", get(handlers::requests::list_active))
        .route("/requests/closed", get(handlers::requests::list_closed))
        .route("/requests/from-user/{chat_id}", get(handlers::requests::list_from_resident))
        .route("/request/create/", post(handlers::requests::create_request))
        .route(
            "/request/{id}",
            get(handlers::requests::get_request)
                .put(handlers::requests::put_request)
                .patch(handlers::requests::patch_request),
        )
        .route("/request/{id}/tasks", get(handlers::requests::request_tasks))
        // Tasks
        .route("/task/create", post(handlers::tasks::create_task))
        .route("/task/delete/{id}", delete(handlers::tasks::delete_task))
        .route(
            "/task/{id}",
            get(handlers::tasks::get_task)
                .put(handlers::tasks::put_task)
                .patch(handlers::tasks::patch_task),
        )
        .route("/tasks/for-master/{chat_id}", get(handlers::tasks::tasks_for_master))
        // Accounts and bot settings
        .route("/user/", get(handlers::users::list_users))
        .route("/user/create/", post(handlers::users::create_user))
        .route("/user/delete/{id}", delete(handlers::users::delete_user))
        .route(
            "/bottokens/manage/{id}",
            get(handlers::settings::get_settings)
                .put(handlers::settings::put_settings)
                .patch(handlers::settings::patch_settings),
        )
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_guard));

    let me_routes = Router::new()
        .route("/auth/users/me/", get(handlers::auth::get_me))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_guard));

    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/auth/token/login/", post(handlers::auth::login))
        .merge(me_routes)
        .nest("/api/v1", api_routes)
        .fallback(route_not_found)
        .layer(TraceLayer::new_for_http().make_span_with(|request: &Request| {
            let request_id = Uuid::new_v4();
            tracing::info_span!(
                "http_request",
                %request_id,
                method = %request.method(),
                uri = %request.uri(),
            )
        }))
        .with_state(state)
}

async fn route_not_found(locale: Locale) -> ApiError {
    ApiError::new(StatusCode::NOT_FOUND, i18n::text(locale.lang(), MessageKey::RouteNotFound))
}
