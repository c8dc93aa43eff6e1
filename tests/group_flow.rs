mod common;

use actix_web::{test, http::StatusCode};
use chrono::{Duration, Utc};
use common::{TestContext, client::{bearer, TestClient}};
use patience_lion::config::config;
use patience_lion::types::period::{Period, PeriodWindow};
use serde_json::json;

#[tokio::test]
async fn test_group_create_join_and_board() {
    println!("\n\n[+] Running test: test_group_create_join_and_board");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (founder, founder_token) = client.create_test_user("founder").await;
    let (friend, friend_token) = client.create_test_user("friend").await;
    let (_outsider, outsider_token) = client.create_test_user("outsider").await;
    println!("[+] Created three users.");

    println!("[>] Creating group");
    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(&founder_token))
        .set_json(json!({ "name": "  Frugal Pride " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    println!("[<] Received response with status: {}", resp.status());
    assert_eq!(resp.status(), StatusCode::CREATED);
    let group: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(group["name"], "Frugal Pride");
    let code = group["code"].as_str().expect("join code").to_string();
    assert_eq!(code.len(), 6);
    let group_id = group["id"].as_str().expect("group id").to_string();

    println!("[>] Joining with a lowercased code");
    let req = test::TestRequest::post()
        .uri("/api/groups/join")
        .insert_header(bearer(&friend_token))
        .set_json(json!({ "code": code.to_lowercase() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    println!("[>] Joining twice");
    let req = test::TestRequest::post()
        .uri("/api/groups/join")
        .insert_header(bearer(&friend_token))
        .set_json(json!({ "code": code }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    println!("[>] Joining an unknown code");
    let req = test::TestRequest::post()
        .uri("/api/groups/join")
        .insert_header(bearer(&outsider_token))
        .set_json(json!({ "code": "ZZZZZZZ" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    client.log_item(&friend, "homemade lunch", 12000, Utc::now()).await;
    client.log_item(&founder, "skipped movie", 4000, Utc::now()).await;
    // last week's haul must not count towards this week's board
    let last_week = PeriodWindow::current(Period::Week, Utc::now(), config().utc_offset())
        .previous()
        .expect("weeks have a predecessor");
    client.log_item(&founder, "last week's windfall", 500000, last_week.start + Duration::hours(1)).await;

    println!("[>] Listing groups for the friend");
    let req = test::TestRequest::get()
        .uri("/api/groups")
        .insert_header(bearer(&friend_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let groups: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(groups.as_array().map(Vec::len), Some(1));
    assert_eq!(groups[0]["member_count"], 2);

    println!("[>] Group detail as a member");
    let req = test::TestRequest::get()
        .uri(&format!("/api/groups/{}", group_id))
        .insert_header(bearer(&founder_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let detail: serde_json::Value = test::read_body_json(resp).await;
    let members = detail["members"].as_array().expect("members");
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["id"], friend.id.to_string());
    assert_eq!(members[0]["weekly_total"], 12000);
    assert_eq!(members[1]["id"], founder.id.to_string());
    assert_eq!(members[1]["weekly_total"], 4000);

    println!("[>] Group detail as an outsider");
    let req = test::TestRequest::get()
        .uri(&format!("/api/groups/{}", group_id))
        .insert_header(bearer(&outsider_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    println!("[>] Empty group name");
    let req = test::TestRequest::post()
        .uri("/api/groups")
        .insert_header(bearer(&founder_token))
        .set_json(json!({ "name": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    println!("[/] Test passed: Group board flow.");
}

#[tokio::test]
async fn test_group_leave_kick_and_ownership() {
    println!("\n\n[+] Running test: test_group_leave_kick_and_ownership");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (founder, founder_token) = client.create_test_user("founder").await;
    let (second, second_token) = client.create_test_user("second").await;
    let (third, third_token) = client.create_test_user("third").await;

    let group = ctx.db.create_group(founder.id, "Den".to_string()).await.expect("Failed to create group");
    ctx.db.join_group(&group.code, second.id).await.expect("second joins");
    ctx.db.join_group(&group.code, third.id).await.expect("third joins");
    println!("[+] Group {} has three members.", group.id);

    println!("[>] A plain member tries to kick another");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/groups/{}/members/{}", group.id, third.id))
        .insert_header(bearer(&second_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    println!("[>] Founder kicks the third member");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/groups/{}/members/{}", group.id, third.id))
        .insert_header(bearer(&founder_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["group_deleted"], false);
    assert!(body["new_owner"].is_null());

    println!("[>] Kicked member can no longer view the group");
    let req = test::TestRequest::get()
        .uri(&format!("/api/groups/{}", group.id))
        .insert_header(bearer(&third_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    println!("[>] Founder leaves; ownership passes on");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/groups/{}/members/{}", group.id, founder.id))
        .insert_header(bearer(&founder_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["new_owner"], second.id.to_string());

    let group_now = ctx.db.get_group(group.id).await.expect("group still exists");
    assert_eq!(group_now.created_by, second.id);

    println!("[>] Last member leaves; group is deleted");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/groups/{}/members/{}", group.id, second.id))
        .insert_header(bearer(&second_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["group_deleted"], true);

    println!("[>] The group is gone");
    let req = test::TestRequest::get()
        .uri(&format!("/api/groups/{}", group.id))
        .insert_header(bearer(&second_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
    println!("[/] Test passed: Leave, kick and ownership transfer.");
}

#[tokio::test]
async fn test_group_delete_is_creator_only() {
    println!("\n\n[+] Running test: test_group_delete_is_creator_only");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());
    let app = test::init_service(client.create_app()).await;

    let (founder, founder_token) = client.create_test_user("founder").await;
    let (member, member_token) = client.create_test_user("member").await;
    let group = ctx.db.create_group(founder.id, "Savers".to_string()).await.expect("Failed to create group");
    ctx.db.join_group(&group.code, member.id).await.expect("member joins");

    println!("[>] Member tries to delete the group");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/groups/{}", group.id))
        .insert_header(bearer(&member_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    println!("[>] Founder deletes the group");
    let req = test::TestRequest::delete()
        .uri(&format!("/api/groups/{}", group.id))
        .insert_header(bearer(&founder_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    println!("[>] Member's group list is empty");
    let req = test::TestRequest::get()
        .uri("/api/groups")
        .insert_header(bearer(&member_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let groups: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(groups.as_array().map(Vec::len), Some(0));

    println!("[>] Malformed group id");
    let req = test::TestRequest::delete()
        .uri("/api/groups/not-a-uuid")
        .insert_header(bearer(&founder_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
    println!("[/] Test passed: Only the creator deletes.");
}

#[tokio::test]
async fn test_group_code_collision_tries_the_next_code() {
    println!("\n\n[+] Running test: test_group_code_collision_tries_the_next_code");
    let ctx = TestContext::new().await;
    let client = TestClient::new(ctx.db.clone());

    let (founder, _) = client.create_test_user("founder").await;
    let first = ctx.db.create_group(founder.id, "First".to_string()).await.expect("Failed to create group");
    println!("[+] First group holds code {}.", first.code);

    println!("[>] Creating a group whose first two candidate codes are taken");
    let second = ctx.db
        .create_group_with_codes(
            founder.id,
            "Second".to_string(),
            [first.code.clone(), first.code.clone(), "FRESH1".to_string()],
        )
        .await
        .expect("third candidate should win");
    assert_eq!(second.code, "FRESH1");
    assert!(ctx.db.is_group_member(second.id, founder.id).await.expect("membership lookup"));

    println!("[>] Every candidate taken");
    let err = ctx.db
        .create_group_with_codes(founder.id, "Third".to_string(), [first.code.clone()])
        .await
        .expect_err("no free code left");
    assert!(matches!(err, patience_lion::types::error::AppError::Internal(_)));
    println!("[/] Test passed: Code collisions fall through to the next candidate.");
}
