// End-to-end tests for the JSON API over an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use basketsim_app::config::LeagueConfig;
use basketsim_app::db::Database;
use basketsim_app::LeagueContext;
use basketsim_core::model::{NewPlayer, Position, SkillRatings};
use basketsim_core::sim::SimulationConfig;
use basketsim_server::{build_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_context() -> Arc<LeagueContext> {
    let db = Database::open(":memory:").expect("in-memory db");
    let simulation = SimulationConfig {
        seed: Some(7),
        ..SimulationConfig::default()
    };
    Arc::new(LeagueContext::new(
        Arc::new(db),
        LeagueConfig::default(),
        simulation,
    ))
}

fn app(ctx: &Arc<LeagueContext>) -> Router {
    build_router(AppState::new(ctx.clone()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_team(app: &Router, name: &str, region: &str) -> (StatusCode, Value) {
    send(
        app,
        Method::POST,
        "/api/teams",
        Some(json!({ "name": name, "region": region, "owner_id": null })),
    )
    .await
}

#[tokio::test]
async fn health_reports_ok() {
    let ctx = test_context();
    let (status, body) = send(&app(&ctx), Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "BasketSim API is running");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn creating_a_team_backfills_its_region() {
    let ctx = test_context();
    let app = app(&ctx);

    let (status, team) = create_team(&app, "Madrid Hoopers", "Spain").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(team["name"], "Madrid Hoopers");
    assert_eq!(team["region"], "Spain");

    let (status, teams) = send(&app, Method::GET, "/api/teams", None).await;
    assert_eq!(status, StatusCode::OK);
    let teams = teams.as_array().unwrap();
    assert_eq!(teams.len(), 10);
    let bots = teams
        .iter()
        .filter(|t| t["name"].as_str().unwrap().starts_with("Spain Bots"))
        .count();
    assert_eq!(bots, 9);
}

#[tokio::test]
async fn owner_filter_returns_only_their_team() {
    let ctx = test_context();
    let app = app(&ctx);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/teams",
        Some(json!({ "name": "Lyon Lions", "region": "France", "owner_id": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, mine) = send(&app, Method::GET, "/api/teams?owner_id=42", None).await;
    let mine = mine.as_array().unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0]["name"], "Lyon Lions");

    let (status, err) = send(
        &app,
        Method::POST,
        "/api/teams",
        Some(json!({ "name": "Paris Owls", "region": "France", "owner_id": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(err["error"].is_string());
}

#[tokio::test]
async fn missing_team_is_a_json_404() {
    let ctx = test_context();
    let (status, body) = send(&app(&ctx), Method::GET, "/api/teams/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("999"));
}

#[tokio::test]
async fn duplicate_team_name_conflicts() {
    let ctx = test_context();
    let app = app(&ctx);

    let (status, _) = create_team(&app, "Rome Rockets", "Italy").await;
    assert_eq!(status, StatusCode::CREATED);
    let (status, body) = create_team(&app, "Rome Rockets", "Italy").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn schedule_simulate_and_reject_replay() {
    let ctx = test_context();
    let app = app(&ctx);
    create_team(&app, "Berlin Bears", "Germany").await;

    let (status, scheduled) = send(
        &app,
        Method::POST,
        "/api/matches/schedule",
        Some(json!({ "start_date": "2026-01-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let scheduled = scheduled.as_array().unwrap();
    assert_eq!(scheduled.len(), 90);
    let first_id = scheduled[0]["id"].as_i64().unwrap();

    let uri = format!("/api/matches/{first_id}/simulate");
    let (status, result) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(result["status"], "played");
    assert!(result["home_score"].as_u64().unwrap() >= 50);

    let (status, body) = send(&app, Method::POST, &uri, None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());

    let (status, details) = send(&app, Method::GET, &format!("/api/matches/{first_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["home_score"], result["home_score"]);
    assert!(details["home_team"]["roster"].is_array());
}

#[tokio::test]
async fn simulating_unknown_match_is_404() {
    let ctx = test_context();
    let (status, _) = send(&app(&ctx), Method::POST, "/api/matches/12345/simulate", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn bad_start_date_is_400() {
    let ctx = test_context();
    let app = app(&ctx);
    create_team(&app, "Oslo Owls", "Norway").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/matches/schedule",
        Some(json!({ "start_date": "someday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("someday"));
}

#[tokio::test]
async fn scheduling_an_empty_league_is_400() {
    let ctx = test_context();
    let (status, _) = send(&app(&ctx), Method::POST, "/api/matches/schedule", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn match_listing_is_paginated() {
    let ctx = test_context();
    let app = app(&ctx);
    create_team(&app, "Porto Pumas", "Portugal").await;
    send(&app, Method::POST, "/api/matches/schedule", Some(json!({}))).await;

    let (status, page) = send(&app, Method::GET, "/api/matches?page=2&page_size=5", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["total"], 90);
    assert_eq!(page["page"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 5);

    let (status, _) = send(&app, Method::GET, "/api/matches?status=finished", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn reschedule_replaces_the_schedule() {
    let ctx = test_context();
    let app = app(&ctx);
    create_team(&app, "Vienna Vipers", "Austria").await;
    send(&app, Method::POST, "/api/matches/schedule", Some(json!({}))).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/matches/reschedule",
        Some(json!({ "start_date": "2026-05-01T18:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["created"], 90);

    let (_, page) = send(&app, Method::GET, "/api/matches", None).await;
    assert_eq!(page["total"], 90);
}

#[tokio::test]
async fn draft_then_release_a_player() {
    let ctx = test_context();
    let app = app(&ctx);
    let (_, team) = create_team(&app, "Dublin Dragons", "Ireland").await;
    let team_id = team["id"].as_i64().unwrap();

    ctx.store()
        .insert_players(&[NewPlayer {
            first_name: "Ada".into(),
            last_name: "Quinn".into(),
            age: 23,
            position: Position::PointGuard,
            skills: SkillRatings::default(),
            overall: 70,
            salary: 5_000,
        }])
        .unwrap();
    let (_, players) = send(&app, Method::GET, "/api/players?status=available", None).await;
    let player_id = players[0]["id"].as_i64().unwrap();

    let draft = json!({ "team_id": team_id, "player_id": player_id, "position": "PG", "number": 7 });
    let (status, entry) = send(&app, Method::POST, "/api/players/draft", Some(draft.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(entry["number"], 7);

    let (status, _) = send(&app, Method::POST, "/api/players/draft", Some(draft)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, roster) = send(&app, Method::GET, &format!("/api/teams/{team_id}/roster"), None).await;
    assert_eq!(roster.as_array().unwrap().len(), 1);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/players/release",
        Some(json!({ "team_id": team_id, "player_id": player_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (_, team) = send(&app, Method::GET, &format!("/api/teams/{team_id}"), None).await;
    assert_eq!(team["budget"], 100_000);
    assert!(team["roster"].as_array().unwrap().is_empty());
}
