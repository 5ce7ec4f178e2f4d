//! End-to-end pipeline tests with stubbed collaborators: feeds and article
//! pages are served by a local mock HTTP server, and the two model calls
//! are substituted through the `Complete` seam.

use chrono::NaiveDate;
use std::error::Error;
use std::sync::atomic::{AtomicUsize, Ordering};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use daily_digest::api::Complete;
use daily_digest::config::{DigestConfig, ModelConfig};
use daily_digest::pipeline::{self, RunOutcome};

const ARTICLE_TEXT: &str = "Officials confirmed on Monday that the long-awaited \
    program will move forward after months of negotiation, with funding secured \
    through the end of the decade and broad support from both chambers.";

/// Model stub that counts invocations and returns a fixed response.
struct StubModel {
    response: String,
    calls: AtomicUsize,
}

impl StubModel {
    fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            calls: AtomicUsize::new(0),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Complete for StubModel {
    async fn complete(&self, _prompt: &str) -> Result<String, Box<dyn Error>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.response.clone())
    }
}

fn config_for(server: &MockServer, feeds: Vec<String>, output_path: &str) -> DigestConfig {
    DigestConfig {
        feeds,
        interests: "science policy".to_string(),
        models: ModelConfig {
            base_url: format!("{}/v1", server.uri()),
            curator_model: "curator".to_string(),
            editor_model: "editor".to_string(),
        },
        per_feed_cap: 10,
        summary_max_chars: 500,
        fallback_count: 5,
        selection_target: "5 to 7".to_string(),
        output_path: output_path.to_string(),
    }
}

fn rss_with_links(links: &[String]) -> String {
    let items: String = links
        .iter()
        .enumerate()
        .map(|(i, link)| {
            format!(
                "<item><title>Story {i}</title><link>{link}</link>\
                 <description>Summary {i}</description></item>"
            )
        })
        .collect();
    format!(
        "<?xml version=\"1.0\"?><rss version=\"2.0\"><channel>\
         <title>Test Feed</title><link>https://example.com</link>\
         <description>test</description>{items}</channel></rss>"
    )
}

fn run_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 8, 31).unwrap()
}

#[tokio::test]
async fn test_full_run_publishes_briefing_with_citations() {
    let server = MockServer::start().await;
    let article_urls: Vec<String> = (0..3).map(|i| format!("{}/article/{i}", server.uri())).collect();

    // One healthy feed with three entries, one erroring feed.
    Mock::given(method("GET"))
        .and(path("/feed/ok.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_links(&article_urls)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed/down.xml"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    for i in 0..3 {
        Mock::given(method("GET"))
            .and(path(format!("/article/{i}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<html><body><article><p>{ARTICLE_TEXT}</p></article></body></html>"
            )))
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    let config = config_for(
        &server,
        vec![
            format!("{}/feed/down.xml", server.uri()),
            format!("{}/feed/ok.xml", server.uri()),
        ],
        out.to_str().unwrap(),
    );

    // Curator picks two of the three links; editor cites both.
    let curator = StubModel::new(format!(
        "[\"{}\", \"{}\"]",
        article_urls[0], article_urls[2]
    ));
    let editor = StubModel::new(format!(
        "## Science\n\nFirst story summary. [Read full article]({})\n\n\
         ## Policy\n\nSecond story summary. [Read full article]({})",
        article_urls[0], article_urls[2]
    ));

    let client = reqwest::Client::new();
    let outcome = pipeline::run(&client, &config, &curator, &editor, run_date())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Published);
    assert_eq!(curator.call_count(), 1);
    assert_eq!(editor.call_count(), 1);

    let page = std::fs::read_to_string(&out).unwrap();
    assert!(page.contains("<h1>📅 2026-08-31</h1>"));
    assert!(page.contains(&format!(
        r#"<a href="{}">Read full article</a>"#,
        article_urls[0]
    )));
    assert!(page.contains(&format!(
        r#"<a href="{}">Read full article</a>"#,
        article_urls[2]
    )));
    // The unselected article was never cited
    assert!(!page.contains(&article_urls[1]));
}

#[tokio::test]
async fn test_zero_headlines_stops_before_any_model_call() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/feed/down.xml"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    std::fs::write(&out, "sentinel from the previous run").unwrap();

    let config = config_for(
        &server,
        vec![format!("{}/feed/down.xml", server.uri())],
        out.to_str().unwrap(),
    );
    let curator = StubModel::new("[]");
    let editor = StubModel::new("never used");

    let client = reqwest::Client::new();
    let outcome = pipeline::run(&client, &config, &curator, &editor, run_date())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::NoHeadlines);
    assert_eq!(curator.call_count(), 0);
    assert_eq!(editor.call_count(), 0);
    // The previously published page survives untouched
    assert_eq!(
        std::fs::read_to_string(&out).unwrap(),
        "sentinel from the previous run"
    );
}

#[tokio::test]
async fn test_empty_selection_stops_before_extraction() {
    let server = MockServer::start().await;
    let links = vec![format!("{}/article/0", server.uri())];
    Mock::given(method("GET"))
        .and(path("/feed/ok.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_links(&links)))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    std::fs::write(&out, "sentinel").unwrap();

    let config = config_for(
        &server,
        vec![format!("{}/feed/ok.xml", server.uri())],
        out.to_str().unwrap(),
    );
    let curator = StubModel::new("[]");
    let editor = StubModel::new("never used");

    let client = reqwest::Client::new();
    let outcome = pipeline::run(&client, &config, &curator, &editor, run_date())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::NoSelection);
    assert_eq!(editor.call_count(), 0);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "sentinel");
}

#[tokio::test]
async fn test_all_extractions_failing_stops_before_synthesis() {
    let server = MockServer::start().await;
    let links = vec![format!("{}/article/missing", server.uri())];
    Mock::given(method("GET"))
        .and(path("/feed/ok.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_links(&links)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/article/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    std::fs::write(&out, "sentinel").unwrap();

    let config = config_for(
        &server,
        vec![format!("{}/feed/ok.xml", server.uri())],
        out.to_str().unwrap(),
    );
    let curator = StubModel::new(format!("[\"{}\"]", links[0]));
    let editor = StubModel::new("never used");

    let client = reqwest::Client::new();
    let outcome = pipeline::run(&client, &config, &curator, &editor, run_date())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::NoContent);
    assert_eq!(editor.call_count(), 0);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "sentinel");
}

#[tokio::test]
async fn test_unparseable_selection_still_publishes_via_fallback() {
    let server = MockServer::start().await;
    let article_urls: Vec<String> = (0..2).map(|i| format!("{}/article/{i}", server.uri())).collect();
    Mock::given(method("GET"))
        .and(path("/feed/ok.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(rss_with_links(&article_urls)))
        .mount(&server)
        .await;
    for i in 0..2 {
        Mock::given(method("GET"))
            .and(path(format!("/article/{i}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(format!(
                "<html><body><article><p>{ARTICLE_TEXT}</p></article></body></html>"
            )))
            .mount(&server)
            .await;
    }

    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("index.html");
    let config = config_for(
        &server,
        vec![format!("{}/feed/ok.xml", server.uri())],
        out.to_str().unwrap(),
    );

    let curator = StubModel::new("I couldn't decide, sorry!");
    let editor = StubModel::new("## Briefing\n\nFallback run.");

    let client = reqwest::Client::new();
    let outcome = pipeline::run(&client, &config, &curator, &editor, run_date())
        .await
        .unwrap();

    assert_eq!(outcome, RunOutcome::Published);
    assert!(std::fs::read_to_string(&out).unwrap().contains("Fallback run."));
}
