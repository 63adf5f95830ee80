// Integration tests for the pull request creation task
// Tests cover construction defaults, run-time overrides, secrets and transport errors

mod support;

use ghpr::context::{Secrets, TaskContext};
use ghpr::task::{CreatePullRequest, PrOverrides, TaskError};
use ghpr_http::header::{AUTHORIZATION, USER_AGENT};
use serde_json::json;
use std::collections::BTreeSet;
use support::{FakeResponse, RecordingTransport};

fn context_with(name: &str, value: serde_json::Value) -> TaskContext {
    let mut secrets = Secrets::new();
    secrets.insert(name, value);
    TaskContext::with_secrets(secrets)
}

#[test]
fn test_initializes_with_nothing_and_sets_defaults() {
    let task = CreatePullRequest::new();
    assert!(task.repo().is_none());
    assert!(task.body().is_none());
    assert!(task.title().is_none());
    assert!(task.head().is_none());
    assert!(task.base().is_none());
    assert!(task.token_secret().is_none());
    assert_eq!(task.api_base(), "https://api.github.com");
}

#[test]
fn test_generic_options_are_kept() {
    let task = CreatePullRequest::new()
        .with_name("test-task")
        .with_checkpoint(true)
        .with_tags(vec!["bob"]);

    assert_eq!(task.name(), "test-task");
    assert_eq!(task.checkpoint(), Some(true));
    let expected: BTreeSet<String> = ["bob".to_string()].into_iter().collect();
    assert_eq!(task.tags(), &expected);
}

#[test]
fn test_tags_list_becomes_set() {
    let task = CreatePullRequest::new().with_tags(["bob", "bob", "alice"]);
    assert_eq!(task.tags().len(), 2);
    assert!(task.tags().contains("bob"));
    assert!(task.tags().contains("alice"));
}

#[test]
fn test_initializes_each_attr() {
    type Setter = fn(CreatePullRequest) -> CreatePullRequest;
    type Getter = fn(&CreatePullRequest) -> Option<&str>;

    let cases: [(&str, Setter, Getter); 5] = [
        ("repo", |t| t.with_repo("my-value"), CreatePullRequest::repo),
        ("body", |t| t.with_body("my-value"), CreatePullRequest::body),
        ("title", |t| t.with_title("my-value"), CreatePullRequest::title),
        ("head", |t| t.with_head("my-value"), CreatePullRequest::head),
        ("base", |t| t.with_base("my-value"), CreatePullRequest::base),
    ];

    for (attr, set, get) in cases {
        let task = set(CreatePullRequest::new());
        assert_eq!(get(&task), Some("my-value"), "attribute {attr}");

        let others = cases
            .iter()
            .filter(|(other, _, _)| *other != attr)
            .map(|(_, _, other_get)| other_get(&task));
        for value in others {
            assert!(value.is_none(), "only {attr} should be set");
        }
    }
}

#[tokio::test]
async fn test_repo_is_required_eventually() {
    let task = CreatePullRequest::new();
    let transport = RecordingTransport::new();

    let err = task
        .run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::MissingField { field: "repo" }));
    assert!(err.to_string().contains("repo"));
    assert!(err.is_validation());
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_missing_repo_checked_before_secret_lookup() {
    // The secret does not exist, yet the repo error must win.
    let task = CreatePullRequest::new().with_token_secret("GITHUB_ACCESS_TOKEN");
    let transport = RecordingTransport::new();

    let err = task
        .run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::MissingField { .. }));
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_creds_are_pulled_from_secret_at_runtime() {
    let task = CreatePullRequest::new().with_token_secret("GITHUB_ACCESS_TOKEN");
    let transport = RecordingTransport::new();
    let context = context_with("GITHUB_ACCESS_TOKEN", json!({"key": 42}));

    task.run(
        &transport,
        &context,
        &PrOverrides::new().with_repo("org/repo"),
    )
    .await
    .unwrap();

    let request = transport.only_request();
    assert_eq!(request.url, "https://api.github.com/repos/org/repo/pulls");
    assert_eq!(
        request.headers.get(AUTHORIZATION).unwrap().to_str().unwrap(),
        "token {'key': 42}"
    );
}

#[tokio::test]
async fn test_string_secret_is_used_verbatim() {
    let task = CreatePullRequest::new()
        .with_repo("org/repo")
        .with_token_secret("TOKEN");
    let transport = RecordingTransport::new();
    let context = context_with("TOKEN", json!("ghp_123"));

    task.run(&transport, &context, &PrOverrides::new())
        .await
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.headers.get(AUTHORIZATION).unwrap(), "token ghp_123");
}

#[tokio::test]
async fn test_no_authorization_without_token_secret() {
    let task = CreatePullRequest::new().with_repo("org/repo");
    let transport = RecordingTransport::new();
    let context = context_with("GITHUB_ACCESS_TOKEN", json!("unused"));

    task.run(&transport, &context, &PrOverrides::new())
        .await
        .unwrap();

    let request = transport.only_request();
    assert!(request.headers.get(AUTHORIZATION).is_none());
    assert!(request.headers.get(USER_AGENT).is_some());
}

#[tokio::test]
async fn test_missing_secret_is_reported() {
    let task = CreatePullRequest::new()
        .with_repo("org/repo")
        .with_token_secret("GITHUB_ACCESS_TOKEN");
    let transport = RecordingTransport::new();

    let err = task
        .run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap_err();

    assert!(
        matches!(err, TaskError::SecretNotFound { ref name } if name == "GITHUB_ACCESS_TOKEN")
    );
    assert_eq!(transport.call_count(), 0);
}

#[tokio::test]
async fn test_payload_contains_only_set_fields() {
    let task = CreatePullRequest::new()
        .with_repo("org/repo")
        .with_title("Add feature")
        .with_base("main");
    let transport = RecordingTransport::new();

    task.run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap();

    let request = transport.only_request();
    assert_eq!(request.json, json!({"title": "Add feature", "base": "main"}));
}

#[tokio::test]
async fn test_payload_with_no_fields_is_empty_object() {
    let task = CreatePullRequest::new();
    let transport = RecordingTransport::new();

    task.run(
        &transport,
        &TaskContext::new(),
        &PrOverrides::new().with_repo("org/repo"),
    )
    .await
    .unwrap();

    assert_eq!(transport.only_request().json, json!({}));
}

#[tokio::test]
async fn test_run_time_values_override_for_one_call_only() {
    let task = CreatePullRequest::new()
        .with_repo("org/configured")
        .with_title("Configured title")
        .with_body("Configured body")
        .with_head("configured-head")
        .with_base("main");
    let transport = RecordingTransport::new();
    let overrides = PrOverrides::new()
        .with_repo("org/override")
        .with_title("Override title")
        .with_head("override-head");

    task.run(&transport, &TaskContext::new(), &overrides)
        .await
        .unwrap();
    task.run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap();

    let requests = transport.requests();
    assert_eq!(requests.len(), 2);

    assert_eq!(
        requests[0].url,
        "https://api.github.com/repos/org/override/pulls"
    );
    assert_eq!(
        requests[0].json,
        json!({
            "title": "Override title",
            "body": "Configured body",
            "head": "override-head",
            "base": "main",
        })
    );

    assert_eq!(
        requests[1].url,
        "https://api.github.com/repos/org/configured/pulls"
    );
    assert_eq!(requests[1].json["title"], "Configured title");
    assert_eq!(task.repo(), Some("org/configured"));
}

#[tokio::test]
async fn test_response_is_returned_unchanged() {
    let task = CreatePullRequest::new().with_repo("org/repo");
    let transport = RecordingTransport::responding(422, json!({"message": "Validation Failed"}));

    let response = task
        .run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap();

    assert_eq!(
        response,
        FakeResponse {
            status: 422,
            body: json!({"message": "Validation Failed"}),
        }
    );
}

#[tokio::test]
async fn test_transport_error_propagates() {
    let task = CreatePullRequest::new().with_repo("org/repo");
    let transport = RecordingTransport::failing("connection reset by peer");

    let err = task
        .run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap_err();

    assert!(matches!(err, TaskError::Transport(_)));
    assert_eq!(err.to_string(), "connection reset by peer");
    assert!(!err.is_validation());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_enterprise_api_base() {
    let task = CreatePullRequest::new()
        .with_repo("org/repo")
        .with_api_base("https://ghe.example.com/api/v3");
    let transport = RecordingTransport::new();

    task.run(&transport, &TaskContext::new(), &PrOverrides::new())
        .await
        .unwrap();

    assert_eq!(
        transport.only_request().url,
        "https://ghe.example.com/api/v3/repos/org/repo/pulls"
    );
}

#[tokio::test]
async fn test_concurrent_runs_share_task() {
    let task = CreatePullRequest::new().with_title("Shared");
    let transport = RecordingTransport::new();
    let context = TaskContext::new();

    let first = PrOverrides::new().with_repo("org/one");
    let second = PrOverrides::new().with_repo("org/two");
    let (a, b) = tokio::join!(
        task.run(&transport, &context, &first),
        task.run(&transport, &context, &second),
    );
    assert!(a.is_ok());
    assert!(b.is_ok());

    let mut urls: Vec<String> = transport.requests().into_iter().map(|r| r.url).collect();
    urls.sort();
    assert_eq!(
        urls,
        vec![
            "https://api.github.com/repos/org/one/pulls".to_string(),
            "https://api.github.com/repos/org/two/pulls".to_string(),
        ]
    );
}
