use std::io::Write;

use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rstest::rstest;
use search_core::{ErrorEnvelope, User};
use search_server::{app, ServerConfig};
use tower::ServiceExt;

const DATASET: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/dataset.xml");

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_with(config: ServerConfig, uri: &str, token: &str) -> axum::response::Response {
    app(config)
        .oneshot(
            Request::builder()
                .uri(uri)
                .header("AccessToken", token)
                .body(String::new())
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get(uri: &str) -> axum::response::Response {
    get_with(ServerConfig::new(DATASET), uri, "AccessToken").await
}

async fn error_text(response: axum::response::Response) -> String {
    body_json::<ErrorEnvelope>(response).await.error
}

fn ids(users: &[User]) -> Vec<i64> {
    users.iter().map(|u| u.id).collect()
}

// --- validation ---

#[rstest]
#[case::empty_limit("/?limit=&offset=0&query=&order_field=&order_by=0", "no limit in request")]
#[case::no_limit("/?offset=0&order_by=0", "no limit in request")]
#[case::empty_offset("/?limit=1&offset=&query=&order_field=&order_by=0", "no offset in request")]
#[case::quoted_order_by(
    "/?limit=1&offset=0&query=&order_field=&order_by=%22%22",
    "no order_by in request"
)]
#[case::bad_field_asc("/?limit=1&offset=0&order_field=N&order_by=1", "ErrorBadOrderField")]
#[case::bad_field_desc("/?limit=1&offset=0&order_field=N&order_by=-1", "ErrorBadOrderField")]
#[case::bad_direction("/?limit=1&offset=0&order_field=&order_by=2", "have no such sort parameter")]
#[tokio::test]
async fn invalid_requests_return_400(#[case] uri: &str, #[case] expected: &str) {
    let resp = get(uri).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_text(resp).await, expected);
}

#[tokio::test]
async fn first_value_of_a_repeated_parameter_wins() {
    let resp = get("/?limit=1&limit=2&offset=0&order_field=Id&order_by=1&order_by=2").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(ids(&users), vec![0]);
}

#[rstest]
#[case::broken_escape("/?limit=%zz&offset=0&order_by=0")]
#[case::half_escaped_limit("/?limit=%31%z&offset=0&order_by=0")]
#[tokio::test]
async fn broken_escapes_are_an_envelope(#[case] uri: &str) {
    let resp = get(uri).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_text(resp).await, "no limit in request");
}

#[tokio::test]
async fn unknown_field_is_ignored_without_sorting() {
    let resp = get("/?limit=2&offset=0&order_field=N&order_by=0").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let users: Vec<User> = body_json(resp).await;
    assert_eq!(ids(&users), vec![0, 1]);
}

// --- access token ---

#[tokio::test]
async fn rejected_token_returns_401() {
    let resp = get_with(ServerConfig::new(DATASET), "/?limit=1&offset=0&order_by=0", "bad").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(error_text(resp).await, "Bad AccessToken");
}

#[tokio::test]
async fn other_tokens_are_accepted() {
    let resp = get_with(ServerConfig::new(DATASET), "/?limit=1&offset=0&order_by=0", "whatever").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn rejected_token_is_configurable() {
    let mut config = ServerConfig::new(DATASET);
    config.rejected_token = "revoked".to_string();
    let resp = get_with(config.clone(), "/?limit=1&offset=0&order_by=0", "revoked").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let resp = get_with(config, "/?limit=1&offset=0&order_by=0", "bad").await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- dataset ---

#[tokio::test]
async fn missing_dataset_returns_400() {
    let config = ServerConfig::new("/definitely/not/here/dataset.xml");
    let resp = get_with(config, "/?limit=1&offset=0&order_by=0", "AccessToken").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_text(resp).await, "no such file or directory");
}

#[tokio::test]
async fn missing_dataset_wins_over_bad_parameters() {
    let config = ServerConfig::new("/definitely/not/here/dataset.xml");
    let resp = get_with(config, "/?limit=x", "bad").await;
    assert_eq!(error_text(resp).await, "no such file or directory");
}

#[tokio::test]
async fn malformed_dataset_returns_400() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"<root><row><id>zero</id></row></root>").unwrap();
    let config = ServerConfig::new(file.path());
    let resp = get_with(config, "/?limit=1&offset=0&order_by=0", "AccessToken").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(error_text(resp).await, "can't unpack result json");
}

// --- results ---

#[tokio::test]
async fn success_is_a_json_array() {
    let resp = get("/?limit=1&offset=0&order_field=Id&order_by=1").await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()["content-type"], "application/json");
    let body: serde_json::Value = body_json(resp).await;
    let first = &body.as_array().unwrap()[0];
    assert_eq!(first["Id"], 0);
    assert_eq!(first["Name"], "Boyd Wolf");
    assert_eq!(first["Age"], 22);
    assert_eq!(first["Gender"], "male");
    assert_eq!(
        first["About"],
        "Nulla cillum enim voluptate consequat laborum esse excepteur.\n"
    );
}

#[rstest]
#[case::id_asc("Id", 1, vec![0, 1, 2])]
#[case::id_desc("Id", -1, vec![11, 10, 9])]
#[case::name_asc("Name", 1, vec![8, 5, 0])]
#[case::empty_field_is_name("", 1, vec![8, 5, 0])]
#[case::name_desc("Name", -1, vec![9, 4, 7])]
#[case::age_asc("Age", 1, vec![1, 8, 11])]
#[case::age_desc("Age", -1, vec![9, 10, 6])]
#[tokio::test]
async fn ordering(#[case] field: &str, #[case] order_by: i64, #[case] expected: Vec<i64>) {
    let uri = format!("/?limit=3&offset=0&order_field={field}&order_by={order_by}");
    let users: Vec<User> = body_json(get(&uri).await).await;
    assert_eq!(ids(&users), expected);
}

#[tokio::test]
async fn window_applies_offset() {
    let users: Vec<User> = body_json(get("/?limit=2&offset=1&order_field=Id&order_by=1").await).await;
    assert_eq!(ids(&users), vec![1, 2]);
}

#[tokio::test]
async fn short_result_ignores_offset() {
    let users: Vec<User> = body_json(get("/?limit=5&offset=10&order_by=0").await).await;
    assert_eq!(ids(&users), (0..12).collect::<Vec<_>>());
}

#[tokio::test]
async fn negative_window_returns_everything() {
    let users: Vec<User> = body_json(get("/?limit=-1&offset=-5&order_by=0").await).await;
    assert_eq!(users.len(), 12);
}

#[tokio::test]
async fn query_matches_name_or_about() {
    let users: Vec<User> = body_json(get("/?limit=10&offset=0&query=Boyd&order_field=Id&order_by=1").await).await;
    assert_eq!(ids(&users), vec![0, 5]);

    let users: Vec<User> = body_json(get("/?limit=10&offset=0&query=Boyd%20Wolf&order_by=0").await).await;
    assert_eq!(ids(&users), vec![0]);

    let users: Vec<User> = body_json(get("/?limit=10&offset=0&query=boyd&order_by=0").await).await;
    assert!(users.is_empty());
}
