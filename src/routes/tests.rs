use axum::http::{Method, StatusCode};
use serde_json::json;

use crate::test_support::{TestApp, PASSWORD};

fn ids(value: &serde_json::Value) -> Vec<i64> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_i64().unwrap())
        .collect()
}

// -----------------------------------------------------------------------------
// Authentication and capabilities
// -----------------------------------------------------------------------------

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));
}

#[tokio::test]
async fn api_rejects_missing_and_forged_tokens() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/api/v1/requests/new", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["detail"].is_string());

    let (status, _) = app.get("/api/v1/requests/new", "not-a-jwt").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_issues_a_token_for_me() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/token/login/",
            None,
            Some(json!({ "username": "dispatcher", "password": PASSWORD })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["auth_token"].as_str().unwrap().to_string();

    let (status, me) = app.get("/auth/users/me/", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "dispatcher");
    assert_eq!(me["is_staff"], true);
    assert!(me.get("password_hash").is_none());

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/token/login/",
            None,
            Some(json!({ "username": "dispatcher", "password": "wrong-password" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn principal_without_capability_is_forbidden() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/api/v1/requests/new", &app.nobody).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Superuser-only area
    let (status, _) = app.get("/api/v1/city/", &app.staff).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn forbidden_delete_leaves_the_row() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let (status, _) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/house/delete/{}", seed.house),
            Some(&app.staff),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (_, houses) = app.get("/api/v1/house/", &app.admin).await;
    assert_eq!(ids(&houses), vec![seed.house]);
}

#[tokio::test]
async fn errors_follow_accept_language() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/request/999", &app.staff).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Объект не найден: заявка.");

    let request = axum::http::Request::builder()
        .uri("/api/v1/request/999")
        .header("authorization", format!("Bearer {}", app.staff))
        .header("accept-language", "en-US,en;q=0.9")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(
        crate::routes::build_router(app.state.clone()),
        request,
    )
    .await
    .unwrap();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["detail"], "Not found: request.");
}

// -----------------------------------------------------------------------------
// Directory
// -----------------------------------------------------------------------------

#[tokio::test]
async fn created_city_is_listed() {
    let app = TestApp::new().await;
    let (status, city) = app
        .post("/api/v1/city/create/", &app.admin, json!({ "name": "Москва" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(city["name"], "Москва");

    let (status, cities) = app.get("/api/v1/city/", &app.admin).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cities, json!([{ "id": city["id"], "name": "Москва" }]));
}

#[tokio::test]
async fn empty_name_is_a_field_error() {
    let app = TestApp::new().await;
    let (status, body) = app
        .post("/api/v1/city/create/", &app.admin, json!({ "name": "" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["name"].is_array());
}

#[tokio::test]
async fn address_and_house_labels() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let (_, addresses) = app.get("/api/v1/address/", &app.staff).await;
    assert_eq!(
        addresses,
        json!([{ "id": seed.building, "name": "Казань, Ленина, д. 5" }])
    );

    let (_, houses) = app
        .get(&format!("/api/v1/complex/{}/houses", seed.complex), &app.staff)
        .await;
    assert_eq!(houses[0]["name"], "Ленина, д. 5");

    let (_, houses) = app.get("/api/v1/house/", &app.admin).await;
    assert_eq!(houses[0]["name"], "ЖК Северный, Ленина, д. 5");

    let (_, streets) = app
        .get(&format!("/api/v1/city/{}/streets", seed.city), &app.admin)
        .await;
    assert_eq!(streets[0]["name"], "Ленина");
}

#[tokio::test]
async fn dangling_reference_is_a_bad_request() {
    let app = TestApp::new().await;
    let (status, _) = app
        .post(
            "/api/v1/street/create/",
            &app.admin,
            json!({ "city": 404, "name": "Пушкина" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn referenced_rows_cannot_be_deleted() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/v1/complex/delete/{}", seed.complex),
            Some(&app.admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["detail"].is_string());

    let (_, complexes) = app.get("/api/v1/complex/", &app.staff).await;
    assert_eq!(ids(&complexes), vec![seed.complex]);
}

#[tokio::test]
async fn eligible_employees_match_position_and_office() {
    let app = TestApp::new().await;
    let seed = app.seed().await;
    let plumber = app.employee(&seed, "Иван", 111).await;

    let other_department = app
        .create("/api/v1/department/create/", json!({ "name": "Электрика" }))
        .await;
    let electrician_position = app
        .create(
            "/api/v1/position/create/",
            json!({ "name": "Электрик", "department": other_department }),
        )
        .await;
    app.create(
        "/api/v1/employee/create/",
        json!({
            "name": "Олег", "surname": "Смирнов", "position": electrician_position,
            "office": seed.office
        }),
    )
    .await;

    let uri = format!(
        "/api/v1/service/employees/?position_pk={}&office_pk={}",
        seed.position, seed.office
    );
    let (status, employees) = app.get(&uri, &app.staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        employees,
        json!([{ "id": plumber, "name": "Петров Иван Сергеевич" }])
    );
}

// -----------------------------------------------------------------------------
// Residents
// -----------------------------------------------------------------------------

#[tokio::test]
async fn unknown_chat_id_reports_absence() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/resident/by_tgid/42", &app.staff).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "exists": false }));
}

#[tokio::test]
async fn registered_chat_id_is_found_once() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let (status, body) = app.get("/api/v1/resident/by_tgid/5550001", &app.staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["exists"], true);
    assert_eq!(body["resident"]["id"], seed.resident);
    assert_eq!(body["resident"]["name"], "Кузнецова Анна Игоревна");
    assert!(body["resident"].get("phone").is_none());

    let (status, _) = app
        .post(
            "/api/v1/resident/create/",
            &app.staff,
            json!({ "name": "Пётр", "surname": "Иванов", "phone": "+79990003344", "tg_id": 5550001 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, residents) = app.get("/api/v1/resident/", &app.staff).await;
    assert_eq!(
        residents,
        json!([{ "id": seed.resident, "name": "Кузнецова Анна Игоревна" }])
    );
}

// -----------------------------------------------------------------------------
// Malformed requests
// -----------------------------------------------------------------------------

#[tokio::test]
async fn bad_path_segment_answers_with_detail() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/request/abc", &app.staff).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Некорректные параметры запроса.");
    assert!(body["errors"]["non_field_errors"][0].is_string());
}

#[tokio::test]
async fn missing_query_parameter_answers_with_detail() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/v1/service/employees/", &app.staff).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Некорректные параметры запроса.");
    assert!(body["errors"]["non_field_errors"][0].is_string());
}

#[tokio::test]
async fn unknown_route_is_a_json_not_found() {
    let app = TestApp::new().await;

    let (status, body) = app.send(Method::GET, "/no/such/page", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Страница не найдена.");

    let (status, body) = app.get("/api/v1/no-such-resource/", &app.staff).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Страница не найдена.");
}

// -----------------------------------------------------------------------------
// Requests
// -----------------------------------------------------------------------------

#[tokio::test]
async fn buckets_partition_requests_by_status() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let fresh = app.request(&seed, "Течёт кран", 1).await;
    let accepted = app.request(&seed, "Не работает лифт", 2).await;
    let in_progress = app.request(&seed, "Нет света в подъезде", 3).await;
    let done = app.request(&seed, "Сломан домофон", 4).await;
    let fresh_again = app.request(&seed, "Шумят трубы", 1).await;

    let (status, new) = app.get("/api/v1/requests/new", &app.staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ids(&new), vec![fresh, fresh_again]);
    assert_eq!(new[0]["address"], "Ленина, д. 5");
    assert_eq!(new[0]["info"], "Течёт кран");

    let (_, active) = app.get("/api/v1/requests/active", &app.staff).await;
    assert_eq!(ids(&active), vec![accepted, in_progress]);

    let (_, closed) = app.get("/api/v1/requests/closed", &app.staff).await;
    assert_eq!(ids(&closed), vec![done]);

    // Moving a request changes its bucket
    let (status, detail) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/request/{fresh}"),
            Some(&app.staff),
            Some(json!({ "status": 3 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], 3);
    assert_eq!(detail["status_name"], "В работе");

    let (_, new) = app.get("/api/v1/requests/new", &app.staff).await;
    assert_eq!(ids(&new), vec![fresh_again]);
    let (_, active) = app.get("/api/v1/requests/active", &app.staff).await;
    assert_eq!(ids(&active), vec![fresh, accepted, in_progress]);
}

#[tokio::test]
async fn request_detail_round_trips_the_payload() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let (status, created) = app
        .post(
            "/api/v1/request/create/",
            &app.staff,
            json!({
                "text": "Протекает крыша", "photo": "photos/roof.jpg",
                "resident": seed.resident, "address": seed.house, "apartment": "12"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["status"], 1);
    assert_eq!(created["text"], "Протекает крыша");
    assert_eq!(created["photo"], "photos/roof.jpg");
    assert_eq!(created["resident"], seed.resident);
    assert_eq!(created["address"], seed.house);
    assert_eq!(created["apartment"], "12");

    let id = created["id"].as_i64().unwrap();
    let (status, detail) = app.get(&format!("/api/v1/request/{id}"), &app.staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["info"], "Протекает крыша");
    assert_eq!(detail["status_name"], "Новая");
    assert_eq!(detail["resident"], "Кузнецова Анна Игоревна");
    assert_eq!(detail["address"], "Ленина, д. 5, кв. 12");
    assert_eq!(detail["complex"], "ЖК Северный");
    assert_eq!(detail["office_id"], seed.office);
    assert_eq!(detail["date"].as_str().unwrap().len(), "31.05.2024 01:05".len());

    let (_, mine) = app.get("/api/v1/requests/from-user/5550001", &app.staff).await;
    assert_eq!(ids(&mine), vec![id]);
    let (_, nobody) = app.get("/api/v1/requests/from-user/1", &app.staff).await;
    assert_eq!(nobody, json!([]));
}

#[tokio::test]
async fn unknown_status_code_is_rejected() {
    let app = TestApp::new().await;
    let seed = app.seed().await;

    let (status, body) = app
        .post(
            "/api/v1/request/create/",
            &app.staff,
            json!({ "text": "x", "status": 9, "resident": seed.resident, "address": seed.house }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["non_field_errors"].is_array());
}

#[tokio::test]
async fn put_requires_status() {
    let app = TestApp::new().await;
    let seed = app.seed().await;
    let id = app.request(&seed, "Течёт кран", 1).await;

    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/v1/request/{id}"),
            Some(&app.staff),
            Some(json!({ "photo": "a.jpg" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["status"].is_array());
}

// -----------------------------------------------------------------------------
// Tasks
// -----------------------------------------------------------------------------

#[tokio::test]
async fn master_sees_only_own_open_tasks() {
    let app = TestApp::new().await;
    let seed = app.seed().await;
    let ivan = app.employee(&seed, "Иван", 111).await;
    let oleg = app.employee(&seed, "Олег", 222).await;
    let request = app.request(&seed, "Течёт кран", 2).await;

    let task = |employee: i64, status: i64| {
        json!({ "request": request, "employee": employee, "service": seed.service, "status": status })
    };
    let (_, open) = app.post("/api/v1/task/create", &app.staff, task(ivan, 1)).await;
    let (_, working) = app.post("/api/v1/task/create", &app.staff, task(ivan, 3)).await;
    app.post("/api/v1/task/create", &app.staff, task(ivan, 4)).await;
    app.post("/api/v1/task/create", &app.staff, task(oleg, 1)).await;

    let (status, tasks) = app.get("/api/v1/tasks/for-master/111", &app.staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        ids(&tasks),
        vec![open["id"].as_i64().unwrap(), working["id"].as_i64().unwrap()]
    );
    assert!(tasks.as_array().unwrap().iter().all(|t| t["employee"] == "Иван Сергеевич"));
    assert_eq!(tasks[1]["status"], "В работе");

    let (_, tasks) = app.get("/api/v1/tasks/for-master/999", &app.staff).await;
    assert_eq!(tasks, json!([]));

    let (_, all) = app
        .get(&format!("/api/v1/request/{request}/tasks"), &app.staff)
        .await;
    assert_eq!(all.as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn task_detail_and_update() {
    let app = TestApp::new().await;
    let seed = app.seed().await;
    let ivan = app.employee(&seed, "Иван", 111).await;
    let request = app.request(&seed, "Течёт кран", 2).await;

    let (status, task) = app
        .post(
            "/api/v1/task/create",
            &app.staff,
            json!({ "request": request, "employee": ivan, "service": seed.service }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(task["status"], 1);
    let id = task["id"].as_i64().unwrap();

    let (status, detail) = app
        .send(
            Method::PUT,
            &format!("/api/v1/task/{id}"),
            Some(&app.staff),
            Some(json!({ "status": 4 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["status"], 4);
    assert_eq!(detail["status_name"], "Выполнена");
    assert_eq!(detail["task"], "Замена смесителя");
    assert_eq!(detail["task_description"], "Демонтаж и установка");
    assert_eq!(detail["request"], request);

    // The owning request can move, the assignee cannot
    let petr = app.employee(&seed, "Пётр", 222).await;
    let other_request = app.request(&seed, "Не работает лифт", 2).await;
    let (status, detail) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/task/{id}"),
            Some(&app.staff),
            Some(json!({ "request": other_request, "employee": petr })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["request"], other_request);
    assert_eq!(detail["employee"], "Иван Сергеевич");
    assert_eq!(detail["status"], 4);

    let (status, _) = app
        .send(
            Method::PATCH,
            &format!("/api/v1/task/{id}"),
            Some(&app.staff),
            Some(json!({ "request": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Done tasks leave the master's list
    let (_, tasks) = app.get("/api/v1/tasks/for-master/111", &app.staff).await;
    assert_eq!(tasks, json!([]));

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/task/delete/{id}"), Some(&app.staff), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get(&format!("/api/v1/task/{id}"), &app.staff).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tasks_of_missing_request_is_not_found() {
    let app = TestApp::new().await;
    let (status, _) = app.get("/api/v1/request/77/tasks", &app.staff).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// -----------------------------------------------------------------------------
// Schedules
// -----------------------------------------------------------------------------

#[tokio::test]
async fn new_schedule_has_seven_days() {
    let app = TestApp::new().await;
    let id = app
        .create("/api/v1/schedule/create/", json!({ "name": "Пятидневка" }))
        .await;

    let (status, schedule) = app.get(&format!("/api/v1/schedule/{id}"), &app.admin).await;
    assert_eq!(status, StatusCode::OK);
    let days = schedule["work_days"].as_array().unwrap();
    assert_eq!(days.len(), 7);

    assert_eq!(days[0]["day_of_week"], 1);
    assert_eq!(days[0]["day_of_week_name"], "Понедельник");
    assert_eq!(days[0]["start_time"], "09:00");
    assert_eq!(days[0]["end_time"], "18:00");
    assert_eq!(days[0]["resume"], "Пн: 09:00–18:00");

    // Weekend is off and never exposes hours
    for day in &days[5..] {
        assert_eq!(day["is_not_working"], true);
        assert!(day.get("start_time").is_none());
        assert!(day.get("end_time").is_none());
    }
    assert_eq!(days[6]["resume"], "Вс: выходной");

    let (_, list) = app.get("/api/v1/schedule/", &app.admin).await;
    assert_eq!(list[0]["work_days"].as_array().unwrap().len(), 7);
    assert_eq!(list[0]["work_days"][5]["resume"], "Сб: выходной");
}

#[tokio::test]
async fn work_day_updates_keep_hours_consistent() {
    let app = TestApp::new().await;
    let id = app
        .create("/api/v1/schedule/create/", json!({ "name": "Пятидневка" }))
        .await;
    let (_, schedule) = app.get(&format!("/api/v1/schedule/{id}"), &app.admin).await;
    let monday = schedule["work_days"][0]["id"].as_i64().unwrap();
    let saturday = schedule["work_days"][5]["id"].as_i64().unwrap();
    let uri = |day: i64| format!("/api/v1/schedule/workday/manage/{day}");

    let (status, body) = app
        .send(Method::PATCH, &uri(monday), Some(&app.admin), Some(json!({ "start_time": "19:00" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]["end_time"].is_array());

    let (status, day) = app
        .send(
            Method::PUT,
            &uri(saturday),
            Some(&app.admin),
            Some(json!({ "is_not_working": false, "start_time": "10:00", "end_time": "14:00", "day_of_week": 1 })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(day["day_of_week"], 6);
    assert_eq!(day["start_time"], "10:00");
    assert_eq!(day["resume"], "Сб: 10:00–14:00");

    let (status, day) = app
        .send(Method::PATCH, &uri(monday), Some(&app.admin), Some(json!({ "is_not_working": true })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(day.get("start_time").is_none());
}

#[tokio::test]
async fn deleting_a_schedule_removes_its_days() {
    let app = TestApp::new().await;
    let id = app
        .create("/api/v1/schedule/create/", json!({ "name": "Сменный" }))
        .await;
    let (_, schedule) = app.get(&format!("/api/v1/schedule/{id}"), &app.admin).await;
    let monday = schedule["work_days"][0]["id"].as_i64().unwrap();

    let (status, _) = app
        .send(Method::DELETE, &format!("/api/v1/schedule/delete/{id}"), Some(&app.admin), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .get(&format!("/api/v1/schedule/workday/manage/{monday}"), &app.admin)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// -----------------------------------------------------------------------------
// Accounts and bot settings
// -----------------------------------------------------------------------------

#[tokio::test]
async fn user_list_hides_the_bootstrap_account() {
    let app = TestApp::new().await;

    let (status, created) = app
        .post(
            "/api/v1/user/create/",
            &app.admin,
            json!({ "username": "operator", "password": "long-enough", "is_staff": true }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(created.get("password").is_none());
    assert!(created.get("password_hash").is_none());

    let (_, users) = app.get("/api/v1/user/", &app.admin).await;
    let names: Vec<_> = users
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["dispatcher", "guest", "operator"]);
    assert_eq!(users[0]["name"], "dispatcher: Персонал");

    let (status, _) = app
        .post(
            "/api/v1/user/create/",
            &app.admin,
            json!({ "username": "operator", "password": "long-enough" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn bot_tokens_can_be_patched() {
    let app = TestApp::new().await;

    let (status, settings) = app.get("/api/v1/bottokens/manage/1", &app.staff).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["resident_bot_token"], "");

    let (status, settings) = app
        .send(
            Method::PATCH,
            "/api/v1/bottokens/manage/1",
            Some(&app.staff),
            Some(json!({ "staff_bot_token": "123:abc" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["staff_bot_token"], "123:abc");
    assert_eq!(settings["resident_bot_token"], "");

    let (status, _) = app
        .send(
            Method::PUT,
            "/api/v1/bottokens/manage/1",
            Some(&app.staff),
            Some(json!({ "staff_bot_token": "x" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
