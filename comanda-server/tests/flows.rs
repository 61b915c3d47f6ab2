//! Database-backed flow tests: the order-total invariants and the
//! table-number uniqueness conflict, driven through the router.

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;

use comanda_server::api;
use comanda_server::auth::account_auth::create_token;
use comanda_server::db;
use comanda_server::state::AppState;
use comanda_server::util::hash_password;
use shared::models::MembershipRole;

const TEST_SECRET: &str = "test-jwt-secret";
const OWNER_EMAIL: &str = "owner@example.com";
const OWNER_PASSWORD: &str = "secret-password";

struct TestApp {
    router: Router,
    token: String,
    account_id: i64,
}

impl TestApp {
    async fn request(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token));
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = response.into_body().collect().await.expect("body").to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("POST", uri, Some(body)).await
    }

    async fn patch(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request("PATCH", uri, Some(body)).await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request("GET", uri, None).await
    }
}

/// One owner account with a fresh tenant, logged in via a signed token.
async fn setup(pool: PgPool) -> TestApp {
    let hashed = hash_password(OWNER_PASSWORD).expect("hash");
    let (account, tenant) = db::accounts::create_account(
        &pool,
        "owner",
        OWNER_EMAIL,
        &hashed,
        None,
        None,
        Some("Trattoria Group"),
    )
    .await
    .expect("owner account");
    let tenant = tenant.expect("bootstrapped tenant");
    let token = create_token(account.id, tenant.id, MembershipRole::Owner, TEST_SECRET)
        .expect("token");

    let state = AppState {
        pool,
        jwt_secret: TEST_SECRET.to_string(),
    };
    TestApp {
        router: api::create_router(state),
        token,
        account_id: account.id,
    }
}

async fn create_restaurant(app: &TestApp) -> i64 {
    let (status, body) = app
        .post(
            "/api/restaurants",
            json!({
                "name": "Trattoria Da Mario",
                "address": "Via Roma 1",
                "phone": "555-0100",
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_i64().expect("restaurant id")
}

async fn create_order(app: &TestApp, restaurant_id: i64) -> i64 {
    let (status, body) = app
        .post("/api/orders", json!({ "restaurant_id": restaurant_id }))
        .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["id"].as_i64().expect("order id")
}

#[sqlx::test(migrations = "./migrations")]
async fn plate_line_updates_order_total(pool: PgPool) {
    let app = setup(pool).await;
    let restaurant_id = create_restaurant(&app).await;

    let (status, body) = app
        .post(
            "/api/plates",
            json!({
                "restaurant_id": restaurant_id,
                "name": "Carbonara",
                "price": 10.50,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let plate_id = body["data"]["id"].as_i64().expect("plate id");

    let order_id = create_order(&app, restaurant_id).await;

    let (status, body) = app
        .post(
            &format!("/api/orders/{order_id}/plates"),
            json!({ "plate_id": plate_id, "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["subtotal"], json!(21.0));

    let (status, body) = app.get(&format!("/api/orders/{order_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["total_amount"], json!(21.0));
    assert_eq!(body["data"]["plates"].as_array().map(Vec::len), Some(1));
}

#[sqlx::test(migrations = "./migrations")]
async fn negative_total_customization_is_rejected(pool: PgPool) {
    let app = setup(pool).await;
    let restaurant_id = create_restaurant(&app).await;

    let (_, body) = app
        .post(
            "/api/plates",
            json!({
                "restaurant_id": restaurant_id,
                "name": "Margherita",
                "price": 10.00,
            }),
        )
        .await;
    let plate_id = body["data"]["id"].as_i64().expect("plate id");

    let (status, body) = app
        .post(
            "/api/products",
            json!({
                "restaurant_id": restaurant_id,
                "name": "Pecorino",
                "unit": "kg",
                "price": 6.00,
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let product_id = body["data"]["id"].as_i64().expect("product id");

    let order_id = create_order(&app, restaurant_id).await;
    let (_, body) = app
        .post(
            &format!("/api/orders/{order_id}/plates"),
            json!({ "plate_id": plate_id, "quantity": 1 }),
        )
        .await;
    let line_id = body["data"]["id"].as_i64().expect("plate line id");

    // 2 x 6.00 removed from a 10.00 total would go negative.
    let (status, body) = app
        .post(
            &format!("/api/orders/plates/{line_id}/products"),
            json!({ "product_id": product_id, "quantity": 2, "action": "remove" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], json!(4003));

    // The rejected insert rolled back: total and lines are untouched.
    let (_, body) = app.get(&format!("/api/orders/{order_id}")).await;
    assert_eq!(body["data"]["total_amount"], json!(10.0));
    assert_eq!(
        body["data"]["plates"][0]["products"].as_array().map(Vec::len),
        Some(0)
    );

    // A removal that keeps the total non-negative goes through.
    let (status, _) = app
        .post(
            &format!("/api/orders/plates/{line_id}/products"),
            json!({ "product_id": product_id, "quantity": 1, "action": "remove" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/orders/{order_id}")).await;
    assert_eq!(body["data"]["total_amount"], json!(4.0));
    assert_eq!(
        body["data"]["plates"][0]["products"].as_array().map(Vec::len),
        Some(1)
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_table_number_conflicts(pool: PgPool) {
    let app = setup(pool).await;
    let restaurant_id = create_restaurant(&app).await;

    let (status, _) = app
        .post(
            "/api/tables",
            json!({ "restaurant_id": restaurant_id, "number": 1, "capacity": 4 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .post(
            "/api/tables",
            json!({ "restaurant_id": restaurant_id, "number": 1, "capacity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], json!(7002));
}

#[sqlx::test(migrations = "./migrations")]
async fn login_works_after_email_update(pool: PgPool) {
    let app = setup(pool).await;

    let (status, body) = app
        .patch(
            &format!("/api/accounts/{}", app.account_id),
            json!({ "email": "  New.Owner@Example.COM " }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], json!("new.owner@example.com"));

    let (status, body) = app
        .post(
            "/api/accounts/login",
            json!({ "email": "new.owner@example.com", "password": OWNER_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].is_string());

    let (status, _) = app
        .post(
            "/api/accounts/login",
            json!({ "email": OWNER_EMAIL, "password": OWNER_PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
