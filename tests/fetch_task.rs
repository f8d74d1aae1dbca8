use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetch_task_cmd() -> Command {
    let mut cmd = Command::cargo_bin("specpipe").unwrap();
    cmd.env_clear();
    cmd.arg("fetch-task");
    cmd
}

async fn mock_task(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/task/{id}")))
        .and(query_param("include_markdown_description", "true"))
        .and(header("Authorization", "pk_test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test(flavor = "multi_thread")]
async fn writes_document_with_parent_chain() {
    let server = MockServer::start().await;
    mock_task(
        &server,
        "9001",
        json!({
            "id": "9001",
            "name": "Ship the resolver",
            "markdown_description": "Walk the chain.",
            "url": "https://app.clickup.com/t/9001",
            "parent": "9002",
        }),
    )
    .await;
    mock_task(
        &server,
        "9002",
        json!({
            "id": "9002",
            "name": "Milestone",
            "description": "Parent body",
            "url": "https://app.clickup.com/t/9002",
            "parent": {"id": "9003"},
        }),
    )
    .await;
    mock_task(&server, "9003", json!({"id": "9003", "parent": null})).await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("spec.md");

    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/9001")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .env("CLICKUP_API_BASE", server.uri())
        .env("OUTPUT_FILE", out.to_str().unwrap())
        .assert()
        .success();

    let document = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        document,
        "# ClickUp Task\n\
         - URL: https://app.clickup.com/t/9001\n\
         - ID: 9001\n\
         - Title: Ship the resolver\n\
         \n\
         ## Description\n\
         Walk the chain.\n\
         \n\
         ## Parent Tasks (nearest -> root)\n\
         ### Parent 1\n\
         - ID: 9002\n\
         - URL: https://app.clickup.com/t/9002\n\
         - Title: Milestone\n\
         - Description:\n\
         Parent body\n\
         \n\
         ### Parent 2\n\
         - ID: 9003\n\
         - Description:\n\
         (No description provided in ClickUp task.)\n"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn ancestor_failure_becomes_a_warning_section() {
    let server = MockServer::start().await;
    mock_task(
        &server,
        "9001",
        json!({"id": "9001", "name": "Child", "parent": "9002"}),
    )
    .await;
    mock_task(
        &server,
        "9002",
        json!({"id": "9002", "name": "Middle", "parent": "9003"}),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/task/9003"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("spec.md");

    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/9001")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .env("CLICKUP_API_BASE", server.uri())
        .env("OUTPUT_FILE", out.to_str().unwrap())
        .assert()
        .success();

    let document = std::fs::read_to_string(&out).unwrap();
    assert!(document.contains("### Parent 1\n- ID: 9002"));
    assert!(!document.contains("### Parent 2"));
    assert!(document.contains(
        "## Parent Fetch Warnings\n- Parent task 9003 fetch failed: HTTP 403 Unauthorized/Forbidden"
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn custom_ids_resolve_team_from_url_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/DEV-1"))
        .and(query_param("include_markdown_description", "true"))
        .and(query_param("custom_task_ids", "true"))
        .and(query_param("team_id", "1234567"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "DEV-1",
            "name": "Custom id task",
            "parent": null,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("spec.md");

    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/1234567/DEV-1")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .env("CLICKUP_API_BASE", server.uri())
        .env("OUTPUT_FILE", out.to_str().unwrap())
        .assert()
        .success();

    assert!(std::fs::read_to_string(&out)
        .unwrap()
        .contains("- ID: DEV-1"));
}

#[test]
fn missing_url_exits_2() {
    fetch_task_cmd()
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No CLICKUP_URL provided."));
}

#[test]
fn missing_token_exits_3() {
    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/9001")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No CLICKUP_API_TOKEN provided."));
}

#[test]
fn docs_url_exits_4() {
    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/docs/abc")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .assert()
        .code(4)
        .stderr(predicate::str::contains("ClickUp Docs URL detected"));
}

#[test]
fn custom_ids_without_team_exit_4() {
    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/ABC-123")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .assert()
        .code(4)
        .stderr(predicate::str::contains(
            "custom_task_ids enabled but CLICKUP_TEAM_ID is missing.",
        ));
}

#[test]
fn url_without_task_segment_exits_5() {
    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/home")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .assert()
        .code(5)
        .stderr(predicate::str::contains(
            "Could not extract ClickUp task ID from URL.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn initial_http_failure_exits_6() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/9001"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/9001")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .env("CLICKUP_API_BASE", server.uri())
        .assert()
        .code(6)
        .stderr(predicate::str::contains(
            "Failed to fetch ClickUp task: HTTP 500",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn initial_auth_failure_exits_6_with_distinct_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/9001"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/9001")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .env("CLICKUP_API_BASE", server.uri())
        .assert()
        .code(6)
        .stderr(predicate::str::contains("HTTP 401 Unauthorized/Forbidden"));
}

#[tokio::test(flavor = "multi_thread")]
async fn initial_non_json_body_exits_7() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/task/9001"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>sorry</html>"))
        .mount(&server)
        .await;

    fetch_task_cmd()
        .env("CLICKUP_URL", "https://app.clickup.com/t/9001")
        .env("CLICKUP_API_TOKEN", "pk_test_token")
        .env("CLICKUP_API_BASE", server.uri())
        .assert()
        .code(7)
        .stderr(predicate::str::contains("Invalid JSON response from ClickUp."));
}
