// tests/http_crawl.rs
// =============================================================================
// Crawls a real (local) HTTP server with the default fetcher and filters.
// =============================================================================

use bounded_crawler::{Config, Crawler, Termination};
use mockito::{Mock, Server, ServerGuard};
use std::collections::HashSet;
use std::time::Duration;

async fn page(server: &mut ServerGuard, path: &str, body: &str) -> Mock {
    server
        .mock("GET", path)
        .with_status(200)
        .with_header("content-type", "text/html; charset=utf-8")
        .with_body(body)
        .create_async()
        .await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn crawls_local_site_with_defaults() {
    let mut server = Server::new_async().await;
    let base = server.url();

    let _root = page(
        &mut server,
        "/",
        r#"<html><body>
            <a href="/a">A</a>
            <a href="/b">B</a>
            <a href="https://external.test/x">External</a>
            <a href="mailto:owner@site.test">Mail</a>
        </body></html>"#,
    )
    .await;
    let _a = page(&mut server, "/a", r#"<a href="/c">C</a><a href="/">Home</a>"#).await;
    let _c = page(&mut server, "/c", r#"<a href="/a">Back</a>"#).await;
    let _b = server
        .mock("GET", "/b")
        .with_status(404)
        .create_async()
        .await;

    let crawler = Crawler::new(
        Config::new(format!("{}/", base))
            .with_limit(50)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();

    let mut urls = Vec::new();
    let mut errors = Vec::new();
    let summary = crawler
        .start(|u| urls.push(u), |e| errors.push(e.to_string()))
        .await;

    let reported: HashSet<String> = urls.into_iter().collect();
    let expected: HashSet<String> = [
        format!("{}/a", base),
        format!("{}/b", base),
        format!("{}/c", base),
        "https://external.test/x".to_string(),
    ]
    .into_iter()
    .collect();

    assert_eq!(reported, expected);
    assert_eq!(errors.len(), 1, "errors: {:?}", errors);
    assert!(errors[0].contains("404"));
    assert_eq!(summary.termination, Termination::Drained);
    assert_eq!(summary.reported, 4);
    assert_eq!(summary.errors, 1);
}

#[tokio::test]
async fn limit_applies_to_http_crawl() {
    let mut server = Server::new_async().await;
    let base = server.url();

    let _root = page(
        &mut server,
        "/",
        r#"<a href="/1">1</a><a href="/2">2</a><a href="/3">3</a>"#,
    )
    .await;
    let _one = page(&mut server, "/1", "").await;

    let crawler = Crawler::new(Config::new(format!("{}/", base)).with_limit(1)).unwrap();

    let mut urls = Vec::new();
    let summary = crawler.start(|u| urls.push(u), |_| {}).await;

    assert_eq!(urls, vec![format!("{}/1", base)]);
    assert_eq!(summary.termination, Termination::BudgetExhausted);
}
