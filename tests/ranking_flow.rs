mod common;

use actix_web::{test, http::StatusCode};
use chrono::{Duration, Utc};
use common::{TestContext, client::{bearer, TestClient}};

#[tokio::test]
async fn test_rankings_order_and_periods() {
    println!("\n\n[+] Running test: test_rankings_order_and_periods");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (alpha, _) = client.create_test_user("alpha").await;
    let (bravo, _) = client.create_test_user("bravo").await;
    let (charlie, _) = client.create_test_user("charlie").await;
    let (_idle, _) = client.create_test_user("idle").await;
    println!("[+] Created four users.");

    let now = Utc::now();
    client.log_item(&alpha, "coffee", 5000, now).await;
    client.log_item(&alpha, "cake", -2000, now).await;
    client.log_item(&bravo, "taxi", 3000, now).await;
    client.log_item(&charlie, "old habit", 50000, now - Duration::days(400)).await;

    println!("[>] GET /api/rankings?period=day");
    let req = test::TestRequest::get().uri("/api/rankings?period=day").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let board: serde_json::Value = test::read_body_json(resp).await;
    let board = board.as_array().expect("ranking array");
    assert_eq!(board.len(), 4);

    // alpha and bravo tie at 3000; nickname breaks the tie
    assert_eq!(board[0]["name"], "alpha-nick");
    assert_eq!(board[0]["total"], 3000);
    assert_eq!(board[0]["item_count"], 2);
    assert_eq!(board[1]["name"], "bravo-nick");
    assert_eq!(board[1]["total"], 3000);
    // nothing logged today: zero totals, still listed
    assert_eq!(board[2]["total"], 0);
    assert_eq!(board[3]["total"], 0);
    assert_eq!(board[2]["name"], "charlie-nick");

    println!("[>] GET /api/rankings?period=all");
    let req = test::TestRequest::get().uri("/api/rankings?period=all").to_request();
    let resp = test::call_service(&app, req).await;
    let board: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(board[0]["name"], "charlie-nick");
    assert_eq!(board[0]["total"], 50000);

    println!("[>] GET /api/rankings (defaults to week)");
    let req = test::TestRequest::get().uri("/api/rankings").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    println!("[>] GET /api/rankings?period=year");
    let req = test::TestRequest::get().uri("/api/rankings?period=year").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    println!("[/] Test passed: Rankings ordered per period.");
}

#[tokio::test]
async fn test_public_profile_totals() {
    println!("\n\n[+] Running test: test_public_profile_totals");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (viewer, viewer_token) = client.create_test_user("viewer").await;
    let (saver, _) = client.create_test_user("thrifty").await;
    client.log_item(&saver, "bus instead of taxi", 8000, Utc::now()).await;
    client.log_item(&saver, "weak moment", -1000, Utc::now()).await;

    println!("[>] GET /api/users/{}", saver.id);
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", saver.id))
        .insert_header(bearer(&viewer_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["nickname"], "thrifty-nick");
    assert_eq!(profile["total_saved"], 7000);
    assert_eq!(profile["item_count"], 2);
    assert!(profile.get("email").is_none());

    println!("[>] Profile with no items");
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", viewer.id))
        .insert_header(bearer(&viewer_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let profile: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(profile["total_saved"], 0);

    println!("[>] Unknown and malformed ids");
    let req = test::TestRequest::get()
        .uri(&format!("/api/users/{}", uuid::Uuid::new_v4()))
        .insert_header(bearer(&viewer_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri("/api/users/not-a-uuid")
        .insert_header(bearer(&viewer_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    println!("[/] Test passed: Public profile aggregates.");
}
