//! Integration tests for the harvester
//!
//! These tests use wiremock to serve mock catalog and work pages and run the
//! catalog resolver, the work extractor and full harvests end-to-end.

use wikiscribe::config::{Config, FailureMode, FetchConfig, SourceConfig};
use wikiscribe::output::{HarvestedWork, OutputResult, WorkSink, WorkStatus};
use wikiscribe::{Harvester, WikiscribeError};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration whose work namespace lives on the mock server
fn create_test_config(base_url: &str, failure_mode: FailureMode) -> Config {
    Config {
        source: SourceConfig {
            work_namespace_prefix: format!("{}/wiki", base_url),
            ..SourceConfig::default()
        },
        fetch: FetchConfig {
            timeout_secs: Some(5),
            failure_mode,
        },
        ..Config::default()
    }
}

/// Builds a catalog page with the bullet list at the position the default layout reads
fn catalog_page(hrefs: &[&str]) -> String {
    let items: String = hrefs
        .iter()
        .map(|href| format!(r#"<li><a href="{}">work</a> (1920)</li>"#, href))
        .collect();
    format!(
        r#"<html><head><title>Author</title></head><body>
        <div class="mw-page-container-jump">jump</div>
        <div class="mw-banner">banner</div>
        <div class="mw-page-container">
          <div class="vector-header">header</div>
          <div class="vector-tabs">tabs</div>
          <div class="mw-body">
            <div>indicators</div><div>heading</div><div>toolbar</div>
            <div id="bodyContent">
              <div class="mw-parser-output">
                <ul>{}</ul>
              </div>
            </div>
          </div>
        </div>
        </body></html>"#,
        items
    )
}

/// Builds a work or chapter page
fn content_page(links: &[&str], content: &str) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        r#"<html><body>
        <div id="header">{}</div>
        <div id="mw-content-text"><div class="mw-parser-output">{}</div></div>
        </body></html>"#,
        anchors, content
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=UTF-8")
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Sink keeping every work it receives
#[derive(Default)]
struct RecordingSink {
    started: Vec<(usize, String)>,
    works: Vec<HarvestedWork>,
}

impl WorkSink for RecordingSink {
    fn begin(&mut self, index: usize, url: &str) -> OutputResult<()> {
        self.started.push((index, url.to_string()));
        Ok(())
    }

    fn accept(&mut self, work: &HarvestedWork) -> OutputResult<()> {
        self.works.push(work.clone());
        Ok(())
    }
}

#[tokio::test]
async fn test_catalog_rejects_reserved_and_duplicate_links() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Author:Lovecraft",
        catalog_page(&["/wiki/Dagon", "/wiki/Special:Random", "/wiki/Dagon"]),
    )
    .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let works = harvester
        .resolve_author_works(&format!("{}/wiki/Author:Lovecraft", base_url), &[])
        .await
        .expect("Catalog resolution failed");

    assert_eq!(works, vec![format!("{}/wiki/Dagon", base_url)]);
}

#[tokio::test]
async fn test_catalog_filters_namespace_and_exclusions() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Author:Lovecraft",
        catalog_page(&[
            "/wiki/The_Tomb",
            "/wiki/Author:Poe",
            "https://commons.wikimedia.org/wiki/Dagon",
            "/wiki/A_Bibliography",
            "/wiki/The_Tomb/Notes",
            "/w/index.php?title=Dagon&action=edit",
            "Polaris",
            "/wiki/Help:Contents",
        ]),
    )
    .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let exclude = vec![format!("{}/wiki/A_Bibliography", base_url)];
    let works = harvester
        .resolve_author_works(&format!("{}/wiki/Author:Lovecraft", base_url), &exclude)
        .await
        .expect("Catalog resolution failed");

    assert_eq!(
        works,
        vec![
            format!("{}/wiki/The_Tomb", base_url),
            format!("{}/wiki/Polaris", base_url),
        ]
    );
}

#[tokio::test]
async fn test_catalog_without_expected_structure_is_empty() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Author:Nobody",
        r#"<html><body><ul><li><a href="/wiki/Dagon">Dagon</a></li></ul></body></html>"#
            .to_string(),
    )
    .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let works = harvester
        .resolve_author_works(&format!("{}/wiki/Author:Nobody", base_url), &[])
        .await
        .expect("Catalog resolution failed");

    assert!(works.is_empty());
}

#[tokio::test]
async fn test_catalog_http_error_propagates() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/wiki/Author:Missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Skip)).expect("harvester");
    let result = harvester
        .resolve_author_works(&format!("{}/wiki/Author:Missing", base_url), &[])
        .await;

    assert!(matches!(
        result,
        Err(WikiscribeError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_single_page_work_reads_its_own_page() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Loaded once for sub-page discovery and once as the only text page
    Mock::given(method("GET"))
        .and(path("/wiki/Dagon"))
        .respond_with(html(content_page(
            &["#top", "/wiki/Author:Lovecraft"],
            "<p>I am writing this under an appreciable mental strain.</p>\
             <div><p>It was in one of the most open spaces.</p></div>",
        )))
        .expect(2)
        .mount(&mock_server)
        .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let text = harvester
        .extract_work(&format!("{}/wiki/Dagon", base_url))
        .await
        .expect("Extraction failed");

    assert_eq!(
        text,
        "I am writing this under an appreciable mental strain.\nIt was in one of the most open spaces."
    );
}

#[tokio::test]
async fn test_chapter_without_backlink_contributes_nothing() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Mountains",
        content_page(
            &[],
            r#"<ul>
                 <li><a href="/wiki/Mountains/Chapter_1">I</a></li>
                 <li><a href="/wiki/Mountains/Chapter_2">II</a></li>
               </ul>"#,
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Mountains/Chapter_1",
        content_page(&["/wiki/Mountains"], "<p>I am forced into speech.</p>"),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Mountains/Chapter_2",
        content_page(&["/wiki/Somewhere_Else"], "<p>Unrelated text.</p>"),
    )
    .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let text = harvester
        .extract_work(&format!("{}/wiki/Mountains", base_url))
        .await
        .expect("Extraction failed");

    assert_eq!(text, "I am forced into speech.");
}

#[tokio::test]
async fn test_chapters_concatenated_in_link_order_without_full_view() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Mountains",
        content_page(
            &[],
            r#"<ul>
                 <li><a href="/wiki/Mountains/Chapter_2">II</a></li>
                 <li><a href="/wiki/Mountains/full">Full text</a></li>
                 <li><a href="/wiki/Mountains/Chapter_1">I</a></li>
                 <li><a href="/wiki/Mountains/Chapter_2">II again</a></li>
               </ul>"#,
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Mountains/Chapter_1",
        content_page(&["/wiki/Mountains"], "<p>One.</p><p>Two.</p>"),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Mountains/Chapter_2"))
        .respond_with(html(content_page(
            &["/wiki/Mountains"],
            "<div><div><p>Three.</p></div></div>",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Mountains/full"))
        .respond_with(html(content_page(&["/wiki/Mountains"], "<p>Everything.</p>")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let text = harvester
        .extract_work(&format!("{}/wiki/Mountains", base_url))
        .await
        .expect("Extraction failed");

    assert_eq!(text, "Three.One.\nTwo.");
}

#[tokio::test]
async fn test_failing_chapter_strict_aborts() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Mountains",
        content_page(
            &[],
            r#"<ul>
                 <li><a href="/wiki/Mountains/Chapter_1">I</a></li>
                 <li><a href="/wiki/Mountains/Chapter_2">II</a></li>
               </ul>"#,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Mountains/Chapter_1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Mountains/Chapter_2"))
        .respond_with(html(content_page(&["/wiki/Mountains"], "<p>Two.</p>")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let result = harvester
        .extract_work(&format!("{}/wiki/Mountains", base_url))
        .await;

    assert!(matches!(
        result,
        Err(WikiscribeError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_failing_chapter_skip_continues() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Mountains",
        content_page(
            &[],
            r#"<ul>
                 <li><a href="/wiki/Mountains/Chapter_1">I</a></li>
                 <li><a href="/wiki/Mountains/Chapter_2">II</a></li>
               </ul>"#,
        ),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Mountains/Chapter_1"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/wiki/Mountains/Chapter_2",
        content_page(&["/wiki/Mountains"], "<p>Two.</p>"),
    )
    .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Skip)).expect("harvester");
    let text = harvester
        .extract_work(&format!("{}/wiki/Mountains", base_url))
        .await
        .expect("Extraction failed");

    assert_eq!(text, "Two.");
}

#[tokio::test]
async fn test_harvest_author_end_to_end() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Author:Lovecraft",
        catalog_page(&["/wiki/Dagon", "/wiki/Polaris", "/wiki/File:Portrait.jpg"]),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Dagon",
        content_page(&["/wiki/Dagon"], "<p>Dagon text.</p>"),
    )
    .await;
    mount_page(
        &mock_server,
        "/wiki/Polaris",
        content_page(&["/wiki/Polaris"], "<div><p>Polaris text.</p></div>"),
    )
    .await;

    let harvester =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let mut sink = RecordingSink::default();
    let report = harvester
        .harvest_author(&format!("{}/wiki/Author:Lovecraft", base_url), &[], &mut sink)
        .await
        .expect("Harvest failed");

    let dagon = format!("{}/wiki/Dagon", base_url);
    let polaris = format!("{}/wiki/Polaris", base_url);

    assert_eq!(
        sink.started,
        vec![(0, dagon.clone()), (1, polaris.clone())]
    );
    assert_eq!(sink.works.len(), 2);
    assert_eq!(sink.works[0].url, dagon);
    assert_eq!(sink.works[0].text, "Dagon text.");
    assert_eq!(sink.works[1].index, 1);
    assert_eq!(sink.works[1].text, "Polaris text.");

    assert_eq!(report.works.len(), 2);
    assert_eq!(report.extracted_count(), 2);
    assert_eq!(
        report.works[1].status,
        WorkStatus::Extracted {
            chars: "Polaris text.".len()
        }
    );
}

#[tokio::test]
async fn test_harvest_author_skip_records_failed_work() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_page(
        &mock_server,
        "/wiki/Author:Lovecraft",
        catalog_page(&["/wiki/Lost_Work", "/wiki/Dagon"]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/wiki/Lost_Work"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;
    mount_page(
        &mock_server,
        "/wiki/Dagon",
        content_page(&["/wiki/Dagon"], "<p>Dagon text.</p>"),
    )
    .await;

    let catalog_url = format!("{}/wiki/Author:Lovecraft", base_url);

    let strict =
        Harvester::new(create_test_config(&base_url, FailureMode::Strict)).expect("harvester");
    let mut sink = RecordingSink::default();
    let result = strict.harvest_author(&catalog_url, &[], &mut sink).await;
    assert!(matches!(
        result,
        Err(WikiscribeError::Status { status: 404, .. })
    ));
    assert!(sink.works.is_empty());

    let lenient =
        Harvester::new(create_test_config(&base_url, FailureMode::Skip)).expect("harvester");
    let mut sink = RecordingSink::default();
    let report = lenient
        .harvest_author(&catalog_url, &[], &mut sink)
        .await
        .expect("Harvest failed");

    assert_eq!(report.works.len(), 2);
    assert!(matches!(report.works[0].status, WorkStatus::Failed { .. }));
    assert_eq!(report.failed_count(), 1);
    assert_eq!(sink.works.len(), 1);
    assert_eq!(sink.works[0].index, 1);
    assert_eq!(sink.works[0].text, "Dagon text.");
}
