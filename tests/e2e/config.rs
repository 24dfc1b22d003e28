use super::*;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn missing_explicit_config_file_fails() {
    let ctx = TestContext::new();

    ctx.gitrelease()
        .args(["--repo", "o/r", "--config"])
        .arg(ctx.temp.child("absent.yaml").path())
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn invalid_config_file_fails() {
    let ctx = TestContext::new();
    let config = ctx.write_config("page_size: [not, a, number]\n");

    ctx.gitrelease()
        .args(["--repo", "o/r", "--config"])
        .arg(&config)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[tokio::test(flavor = "multi_thread")]
async fn config_file_supplies_api_url_and_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/group%2Fproject/releases"))
        .and(header("private-token", "from-file"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "tag_name": "v4.2.0" }])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.write_config(&format!(
        "gitlab_api_url: {}\ngitlab_token: from-file\n",
        mock_server.uri()
    ));

    ctx.gitrelease()
        .args(["--repo", "group/project", "--provider", "gitlab", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(single_line("v4.2.0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn env_token_beats_config_file_and_flag_beats_env() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/latest"))
        .and(header("authorization", "token from-env"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": "env" })),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/latest"))
        .and(header("authorization", "token from-flag"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": "flag" })),
        )
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    let config = ctx.write_config("github_token: from-file\n");

    ctx.against(&mock_server.uri())
        .args(["--repo", "o/r", "--config"])
        .arg(&config)
        .env("GITHUB_TOKEN", "from-env")
        .assert()
        .success()
        .stdout(single_line("env"));

    ctx.against(&mock_server.uri())
        .args(["--repo", "o/r", "--github-token", "from-flag", "--config"])
        .arg(&config)
        .env("GITHUB_TOKEN", "from-env")
        .assert()
        .success()
        .stdout(single_line("flag"));
}
