use assert_matches::assert_matches;
use serde::Deserialize;
use serde_json::json;
use wiremock::{MockServer, Mock, ResponseTemplate};
use wiremock::matchers::{body_json, header, method, path, query_param};

use shared_config::AppConfig;
use shared_database::{DatabaseError, SupabaseClient};
use shared_utils::test_utils::TestConfig;

#[derive(Debug, Deserialize, PartialEq)]
struct Row {
    id: String,
    name: String,
}

fn config_for(mock_server: &MockServer) -> AppConfig {
    TestConfig::default().with_supabase_url(&mock_server.uri())
}

#[tokio::test]
async fn test_select_sends_service_key_and_decodes_rows() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("name", "eq.John"))
        .and(header("apikey", config.supabase_service_key.as_str()))
        .and(header("Authorization", format!("Bearer {}", config.supabase_service_key).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "1", "name": "John" },
            { "id": "2", "name": "John" }
        ])))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config);
    let rows: Vec<Row> = client.select("users", "name=eq.John").await.unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], Row { id: "2".into(), name: "John".into() });
}

#[tokio::test]
async fn test_select_one_returns_none_for_empty_result() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config);
    let row: Option<Row> = client.select_one("users", "id=eq.missing").await.unwrap();

    assert!(row.is_none());
}

#[tokio::test]
async fn test_insert_requests_representation() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/rest/v1/users"))
        .and(header("Prefer", "return=representation"))
        .and(body_json(json!({ "name": "John" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            { "id": "1", "name": "John" }
        ])))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config);
    let row: Row = client.insert("users", json!({ "name": "John" })).await.unwrap();

    assert_eq!(row.id, "1");
}

#[tokio::test]
async fn test_unique_violation_maps_to_conflict() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("POST"))
        .and(path("/rest/v1/appointments"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "code": "23505",
            "message": "duplicate key value violates unique constraint"
        })))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config);
    let result: Result<Row, _> = client.insert("appointments", json!({})).await;

    assert_matches!(result, Err(DatabaseError::Conflict(_)));
}

#[tokio::test]
async fn test_update_with_no_matching_rows_is_empty_result() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/users"))
        .and(query_param("id", "eq.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config);
    let result: Result<Row, _> = client.update("users", "id=eq.1", json!({ "name": "Jane" })).await;

    assert_matches!(result, Err(DatabaseError::EmptyResult(table)) if table == "users");
}

#[tokio::test]
async fn test_server_error_is_reported_with_status() {
    let mock_server = MockServer::start().await;
    let config = config_for(&mock_server);

    Mock::given(method("GET"))
        .and(path("/rest/v1/users"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = SupabaseClient::new(&config);
    let result: Result<Vec<Row>, _> = client.select("users", "").await;

    assert_matches!(result, Err(DatabaseError::Api { status: 500, .. }));
}
