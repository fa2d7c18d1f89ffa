mod common;

use actix_web::{
    body::MessageBody,
    dev::ServiceResponse,
    http::StatusCode,
    test, web, App,
};
use domain_rental::model::vo::Role;
use rental_marketplace::{
    api::ResponseBody,
    infrastructure::{config::JwtValidationConfig, middleware::authorization::AddUserInfo},
    server::routes,
};
use serde_json::{json, Value};
use uuid::Uuid;

macro_rules! marketplace {
    ($sp:expr) => {
        test::init_service(
            App::new().app_data(web::Data::from($sp.clone())).service(
                web::scope("")
                    .wrap(AddUserInfo::new(JwtValidationConfig::with_secret(common::SECRET)))
                    .configure(routes),
            ),
        )
        .await
    };
}

macro_rules! send {
    ($app:expr, $req:expr $(,)?) => {
        test::call_service($app, $req.to_request())
    };
}

async fn body<B: MessageBody>(resp: ServiceResponse<B>) -> ResponseBody<Value> {
    test::read_body_json(resp).await
}

#[actix_web::test]
async fn missing_token_is_unauthenticated() {
    let (sp, _, _) = common::provider_with_room(Uuid::new_v4());
    let app = marketplace!(sp);

    let resp = send!(&app, test::TestRequest::get().uri("/request/GetRequests")).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body(resp).await;
    assert_eq!(body.status, 100);
    assert!(body.content.is_none());

    let forged = test::TestRequest::get()
        .uri("/request/GetRequests")
        .insert_header(("Authorization", "Bearer not-a-token"));
    assert_eq!(send!(&app, forged).await.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn request_lifecycle_over_http() {
    let landlord = Uuid::new_v4();
    let tenant = Uuid::new_v4();
    let (sp, _, room) = common::provider_with_room(landlord);
    let app = marketplace!(sp);

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/request/CreateRequest")
            .insert_header(("Authorization", common::bearer(tenant, Role::Tenant)))
            .set_json(json!({
                "roomId": room.id,
                "visitDate": "2025-03-10T10:00:00Z",
                "message": "Monday works for me"
            })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body(resp).await;
    assert_eq!(created.status, 200);
    assert_eq!(created.message, "success");
    let content = created.content.unwrap();
    assert_eq!(content["status"], "pending");
    let request_id = content["id"].as_str().unwrap().to_owned();

    let transition = |caller: Uuid, role: Role, action: &str| {
        test::TestRequest::post()
            .uri("/request/TransitionRequest")
            .insert_header(("Authorization", common::bearer(caller, role)))
            .set_json(json!({ "requestId": request_id, "action": action }))
    };

    let resp = send!(&app, transition(tenant, Role::Tenant, "approve")).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let resp = send!(&app, transition(landlord, Role::Landlord, "approve")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await.content.unwrap()["status"], "approve");

    let resp = send!(&app, transition(tenant, Role::Tenant, "tenant-confirm")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body(resp).await.content.unwrap()["status"], "completed");

    let resp = send!(&app, transition(tenant, Role::Tenant, "tenant-confirm")).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    let conflict = body(resp).await;
    assert!(conflict.message.contains(&room.id.to_string()));

    let resp = send!(
        &app,
        test::TestRequest::get()
            .uri("/room/GetOccupiedRooms")
            .insert_header(("Authorization", common::bearer(tenant, Role::Tenant))),
    )
    .await;
    let rooms = body(resp).await.content.unwrap();
    assert_eq!(rooms.as_array().map(Vec::len), Some(1));
    assert_eq!(rooms[0]["id"], json!(room.id));
}

#[actix_web::test]
async fn tenant_cancel_answers_with_empty_content() {
    let landlord = Uuid::new_v4();
    let tenant = Uuid::new_v4();
    let (sp, store, room) = common::provider_with_room(landlord);
    let app = marketplace!(sp);
    let auth = common::bearer(tenant, Role::Tenant);

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/request/CreateRequest")
            .insert_header(("Authorization", auth.clone()))
            .set_json(json!({ "roomId": room.id })),
    )
    .await;
    let request_id = body(resp).await.content.unwrap()["id"].clone();

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/request/TransitionRequest")
            .insert_header(("Authorization", auth))
            .set_json(json!({ "requestId": request_id, "action": "tenant-cancel" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body(resp).await.content.is_none());
    assert!(store.requests().unwrap().is_empty());
}

#[actix_web::test]
async fn malformed_input_is_a_bad_request() {
    let landlord = Uuid::new_v4();
    let (sp, _, room) = common::provider_with_room(landlord);
    let app = marketplace!(sp);
    let tenant = common::bearer(Uuid::new_v4(), Role::Tenant);

    let unknown_action = test::TestRequest::post()
        .uri("/request/TransitionRequest")
        .insert_header(("Authorization", tenant.clone()))
        .set_json(json!({ "requestId": Uuid::new_v4(), "action": "teleport" }));
    let resp = send!(&app, unknown_action).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body(resp).await.status, 401);

    let missing_room = test::TestRequest::post()
        .uri("/request/CreateRequest")
        .insert_header(("Authorization", tenant.clone()))
        .set_json(json!({ "message": "hello" }));
    let resp = send!(&app, missing_room).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(body(resp).await.message.contains("roomId"));

    let broken_json = test::TestRequest::post()
        .uri("/request/CreateRequest")
        .insert_header(("Authorization", tenant.clone()))
        .insert_header(("Content-Type", "application/json"))
        .set_payload(format!(r#"{{"roomId": "{}""#, room.id));
    let resp = send!(&app, broken_json).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bad_id = test::TestRequest::post()
        .uri("/request/MarkRequestRead/not-a-uuid")
        .insert_header(("Authorization", tenant.clone()));
    assert_eq!(send!(&app, bad_id).await.status(), StatusCode::BAD_REQUEST);

    let bad_type = test::TestRequest::get()
        .uri("/notification/GetNotifications?type=gossip")
        .insert_header(("Authorization", tenant));
    assert_eq!(send!(&app, bad_type).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn landlord_inbox_filters_by_type() {
    let landlord = Uuid::new_v4();
    let (sp, _, room) = common::provider_with_room(landlord);
    let app = marketplace!(sp);

    let resp = send!(
        &app,
        test::TestRequest::post()
            .uri("/request/CreateRequest")
            .insert_header(("Authorization", common::bearer(Uuid::new_v4(), Role::Tenant)))
            .set_json(json!({ "roomId": room.id, "message": "Is parking included?" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let auth = common::bearer(landlord, Role::Landlord);
    let resp = send!(
        &app,
        test::TestRequest::get()
            .uri("/notification/GetNotifications?type=room-request")
            .insert_header(("Authorization", auth.clone())),
    )
    .await;
    let inbox = body(resp).await.content.unwrap();
    assert_eq!(inbox[0]["type"], "room-request");
    assert_eq!(inbox[0]["content"], "Is parking included?");

    let resp = send!(
        &app,
        test::TestRequest::get()
            .uri("/notification/GetNotifications?type=issue-report")
            .insert_header(("Authorization", auth.clone())),
    )
    .await;
    assert_eq!(body(resp).await.content.unwrap(), json!([]));

    let resp = send!(
        &app,
        test::TestRequest::get()
            .uri("/notification/GetUnreadNotificationCount")
            .insert_header(("Authorization", auth)),
    )
    .await;
    assert_eq!(body(resp).await.content.unwrap()["count"], 1);
}
