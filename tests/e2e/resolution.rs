use super::*;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn named(names: &[&str]) -> serde_json::Value {
    json!(names.iter().map(|n| json!({ "name": n })).collect::<Vec<_>>())
}

#[tokio::test(flavor = "multi_thread")]
async fn github_latest_release() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/php/php-src/releases/latest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "tag_name": "php-8.4.1" })))
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args(["--repo", "php/php-src"])
        .assert()
        .success()
        .stdout(single_line("php-8.4.1"));
}

#[tokio::test(flavor = "multi_thread")]
async fn github_version_prefix_picks_highest_semver() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/php/php-src/tags"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(named(&[
            "php-8.2.1",
            "php-8.2.26",
            "php-8.2.2",
            "php-7.4.0",
        ])))
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args(["--repo", "php/php-src", "--version-prefix", "8.2"])
        .assert()
        .success()
        .stdout(single_line("php-8.2.26"));
}

#[tokio::test(flavor = "multi_thread")]
async fn no_matching_prefix_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/php/php-src/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(named(&["php-8.2.1"])))
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args(["--repo", "php/php-src", "--version-prefix", "9.0"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains(
            "no tags found for version prefix: 9.0",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn unparseable_matches_fail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/projects/php%2Fphp-src/repository/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(named(&["php-8.2.x-custom"])))
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args(["--repo", "php/php-src", "--provider", "GitLab", "--prefix", "8.2"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no semver-compatible tags found"));
}

#[tokio::test(flavor = "multi_thread")]
async fn bitbucket_version_prefix_walks_next_links() {
    let mock_server = MockServer::start().await;
    let tags_path = "/repositories/php/php-src/refs/tags";

    Mock::given(method("GET"))
        .and(path(tags_path))
        .and(query_param("pagelen", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{ "name": "php-8.1.9" }, { "name": "php-8.3.0" }],
            "next": format!("{}{}?page=2", mock_server.uri(), tags_path)
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(tags_path))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [{ "name": "php-8.1.27" }, { "name": "php-8.1.27-RC1" }]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args([
            "--repo",
            "php/php-src",
            "--provider",
            "bitbucket",
            "--version-prefix",
            "8.1",
        ])
        .assert()
        .success()
        .stdout(single_line("php-8.1.27"));
}

#[tokio::test(flavor = "multi_thread")]
async fn custom_tag_prefix() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/rust-lang/cargo/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(named(&[
            "0.80.0", "0.81.0", "0.9.0",
        ])))
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args([
            "--repo",
            "rust-lang/cargo",
            "--tag-prefix",
            "",
            "--version-prefix",
            "0.",
        ])
        .assert()
        .success()
        .stdout(single_line("0.81.0"));
}

#[tokio::test(flavor = "multi_thread")]
async fn rate_limit_is_reported_with_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/o/r/releases/latest"))
        .respond_with(
            ResponseTemplate::new(403)
                .insert_header("X-RateLimit-Remaining", "0")
                .insert_header("X-RateLimit-Reset", "1700000000"),
        )
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args(["--repo", "o/r"])
        .assert()
        .code(1)
        .stderr(
            predicate::str::contains(
                "GitHub rate limit exceeded. Try again at 2023-11-14 22:13:20 UTC",
            )
            .and(predicate::str::contains("GITHUB_TOKEN")),
        );
}

#[tokio::test(flavor = "multi_thread")]
async fn not_found_names_repository() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let ctx = TestContext::new();
    ctx.against(&mock_server.uri())
        .args(["--repo", "owner/gone", "--provider", "bitbucket"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "Bitbucket repository not found: owner/gone",
        ));
}
