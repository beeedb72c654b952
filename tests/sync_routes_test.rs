// ABOUTME: Integration tests for the Strava batch sync route against a local Strava stub
// ABOUTME: Covers parameter validation, storage, per-athlete failure handling and batch limits
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic, clippy::float_cmp)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use chrono::Utc;
use common::{create_athlete, create_test_server_resources_with, store_tokens, TEST_API_SECRET};
use helpers::axum_test::AxumTestRequest;
use helpers::strava_stub::{activity_json, spawn_strava_stub, StravaStub, EXPIRED_TOKEN};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use stravaman_providers::StravaClient;
use stravaman_server::models::ActivitySummary;
use stravaman_server::resources::ServerResources;
use stravaman_server::routes::SyncRoutes;

async fn stub_with_athletes(
    activities: Vec<(&str, Vec<Value>)>,
) -> (StravaStub, Arc<ServerResources>) {
    let stub = spawn_strava_stub(
        activities
            .into_iter()
            .map(|(token, list)| (token.to_owned(), list))
            .collect::<HashMap<_, _>>(),
    )
    .await;
    let client = StravaClient::with_base_url(stub.base_url.clone()).unwrap();
    let resources = create_test_server_resources_with(Arc::new(client), Some(TEST_API_SECRET)).await;
    (stub, resources)
}

#[tokio::test]
async fn test_invalid_parameters_rejected() {
    let (stub, resources) = stub_with_athletes(Vec::new()).await;

    for uri in [
        "/strava_data/2023-13-01/5",
        "/strava_data/yesterday/5",
        "/strava_data/2023-03-01/-1",
        "/strava_data/2023-03-01/many",
    ] {
        let body: Value = AxumTestRequest::get(uri)
            .send(SyncRoutes::routes(resources.clone()))
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["error"]["code"], "INVALID_FORMAT", "{uri}");
    }
    assert!(stub.requests().is_empty());
}

#[tokio::test]
async fn test_sync_stores_activities_and_summaries() {
    let (stub, resources) = stub_with_athletes(vec![(
        "token-1",
        vec![
            activity_json(11, "Run", "2023-03-02T07:00:00Z", 5000.0, 1500),
            activity_json(12, "Yoga", "2023-03-03T07:00:00Z", 0.0, 3600),
            activity_json(13, "Run", "2023-03-04T07:00:00Z", 2500.0, 800),
        ],
    )])
    .await;
    let db = &resources.database;
    create_athlete(db, "1", "Ann", "Runner", Some("Red")).await;
    store_tokens(db, "1", "token-1").await;

    let report: Value = AxumTestRequest::get("/strava_data/2023-03-01/10")
        .send(SyncRoutes::routes(resources.clone()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["queried"], serde_json::json!(["1"]));
    assert_eq!(report["activities_stored"], 3);
    assert_eq!(report["after"], "2023-03-01");
    assert_eq!(report["batch_limit_reached"], false);

    let requests = stub.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].token, "token-1");
    // Midnight UTC of the requested day
    assert_eq!(requests[0].after, 1_677_628_800);
    assert_eq!(requests[0].page, 1);

    let records = db.list_activity_records().await.unwrap();
    assert_eq!(records.len(), 3);
    assert!(records.iter().all(|r| r.team.as_deref() == Some("Red")));

    let summary = db.get_activity_summary("1").await.unwrap().unwrap();
    assert_eq!(summary.totals["Run"], 7500.0);
    assert_eq!(summary.totals["Yoga"], 3600.0);
    assert_eq!(summary.firstname.as_deref(), Some("Ann"));
    assert_eq!(summary.update_date, Some(Utc::now().date_naive()));
}

#[tokio::test]
async fn test_refused_athlete_is_zeroed_and_batch_continues() {
    let (_stub, resources) = stub_with_athletes(vec![(
        "token-2",
        vec![activity_json(21, "Ride", "2023-03-02T07:00:00Z", 20000.0, 3600)],
    )])
    .await;
    let db = &resources.database;
    create_athlete(db, "1", "Ann", "Runner", Some("Red")).await;
    create_athlete(db, "2", "Bob", "Rider", Some("Blue")).await;
    store_tokens(db, "1", EXPIRED_TOKEN).await;
    store_tokens(db, "2", "token-2").await;

    let report: Value = AxumTestRequest::get("/strava_data/2023-03-01/10")
        .send(SyncRoutes::routes(resources.clone()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["queried"], serde_json::json!(["1", "2"]));
    assert_eq!(report["failed"], serde_json::json!(["1"]));
    assert_eq!(report["activities_stored"], 1);

    let zeroed = db.get_activity_summary("1").await.unwrap().unwrap();
    assert!(zeroed.totals.is_empty());
    assert_eq!(zeroed.firstname.as_deref(), Some("Ann"));
    assert_eq!(zeroed.update_date, Some(Utc::now().date_naive()));

    let synced = db.get_activity_summary("2").await.unwrap().unwrap();
    assert_eq!(synced.totals["Ride"], 20000.0);
}

#[tokio::test]
async fn test_batch_limit_and_current_athletes() {
    let (stub, resources) = stub_with_athletes(vec![
        ("token-2", Vec::new()),
        ("token-3", Vec::new()),
        ("token-4", Vec::new()),
    ])
    .await;
    let db = &resources.database;
    for id in ["1", "2", "3", "4"] {
        store_tokens(db, id, &format!("token-{id}")).await;
    }
    db.upsert_activity_summary(
        "1",
        &ActivitySummary {
            update_date: Some(Utc::now().date_naive()),
            ..ActivitySummary::default()
        },
    )
    .await
    .unwrap();

    let report: Value = AxumTestRequest::get("/strava_data/2023-03-01/2")
        .send(SyncRoutes::routes(resources.clone()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["skipped"], serde_json::json!(["1"]));
    assert_eq!(report["queried"], serde_json::json!(["2", "3"]));
    assert_eq!(report["batch_limit_reached"], true);

    let tokens: Vec<String> = stub.requests().into_iter().map(|r| r.token).collect();
    assert_eq!(tokens, vec!["token-2", "token-3"]);

    let report: Value = AxumTestRequest::get("/strava_data/2023-03-01/2")
        .send(SyncRoutes::routes(resources.clone()))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["skipped"], serde_json::json!(["1", "2", "3"]));
    assert_eq!(report["queried"], serde_json::json!(["4"]));
    assert_eq!(report["batch_limit_reached"], false);
}

#[tokio::test]
async fn test_zero_batch_queries_nobody() {
    let (stub, resources) = stub_with_athletes(vec![("token-1", Vec::new())]).await;
    store_tokens(&resources.database, "1", "token-1").await;

    let report: Value = AxumTestRequest::get("/strava_data/2023-03-01/0")
        .send(SyncRoutes::routes(resources))
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(report["queried"], serde_json::json!([]));
    assert_eq!(report["batch_limit_reached"], true);
    assert!(stub.requests().is_empty());
}
