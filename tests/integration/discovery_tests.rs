use resource_scout::classify::UNKNOWN_TYPE;
use resource_scout::config::Config;
use resource_scout::crawler::discover_resources;
use resource_scout::{Crawler, Resource, ResourceCache, SqliteCache};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serves an HTML seed page at `/`
async fn mount_seed(server: &MockServer, body: &str) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

/// Serves an empty 200 response at `route`
async fn mount_file(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .mount(server)
        .await;
}

fn crawler() -> Crawler {
    Crawler::new(&Config::default()).expect("Failed to build crawler")
}

#[tokio::test]
async fn test_discovers_same_site_links() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(
        &server,
        r#"<html><body>
        <a href="/test1/file1.pdf">File 1</a>
        <a href="/file3.aspx">File 3</a>
        <a href="/file4">File 4</a>
        <a href="http://other.com/x">Elsewhere</a>
        <a href="mailto:info@test.lt">Mail</a>
        </body></html>"#,
    )
    .await;
    mount_file(&server, "/test1/file1.pdf").await;
    mount_file(&server, "/file3.aspx").await;
    mount_file(&server, "/file4").await;

    let crawler = crawler();
    let resources = crawler.discover(None, &website).collect().await;

    assert_eq!(resources.len(), 3);

    let pdf = &resources[0];
    assert_eq!(pdf.website, website);
    assert_eq!(pdf.url, format!("{}/test1/file1.pdf", website));
    assert_eq!(pdf.name, "file1.pdf");
    assert_eq!(pdf.file_type, "pdf");
    assert!(pdf.is_data);
    assert!(!pdf.cached_forever);

    let aspx = &resources[1];
    assert_eq!(aspx.url, format!("{}/file3.aspx", website));
    assert!(!aspx.is_data);
    assert!(aspx.cached_forever);

    let unknown = &resources[2];
    assert_eq!(unknown.url, format!("{}/file4", website));
    assert_eq!(unknown.file_type, UNKNOWN_TYPE);
    assert!(!unknown.is_data);
    assert!(!unknown.cached_forever);
}

#[tokio::test]
async fn test_headers_name_the_resource() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(
        &server,
        r#"<a href="/download?id=7">Report</a><a href="/export">Export</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/download"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-disposition", "attachment; filename=\"report.xlsx\""),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/csv"))
        .mount(&server)
        .await;

    let resources = crawler().discover(None, &website).collect().await;

    assert_eq!(resources.len(), 2);
    assert_eq!(resources[0].name, "report.xlsx");
    assert_eq!(resources[0].file_type, "xlsx");
    assert!(resources[0].is_data);
    assert_eq!(resources[1].name, "export.csv");
    assert_eq!(resources[1].file_type, "csv");
    assert!(resources[1].is_data);
}

#[tokio::test]
async fn test_non_html_seed_is_single_resource() {
    let server = MockServer::start().await;
    let website = format!("{}/report.pdf", server.uri());

    Mock::given(method("GET"))
        .and(path("/report.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .expect(1)
        .mount(&server)
        .await;

    let resources = crawler().discover(None, &website).collect().await;

    assert_eq!(
        resources,
        vec![Resource {
            website: website.clone(),
            url: website.clone(),
            name: "report.pdf".to_string(),
            file_type: "pdf".to_string(),
            is_data: true,
            cached_forever: false,
        }]
    );
}

#[tokio::test]
async fn test_unreachable_link_is_skipped() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(
        &server,
        r#"<a href="/a.csv">A</a>
        <a href="http://127.0.0.1:1/dead.pdf">Dead</a>
        <a href="/missing.xls">Missing</a>
        <a href="/b.pdf">B</a>"#,
    )
    .await;
    mount_file(&server, "/a.csv").await;
    mount_file(&server, "/b.pdf").await;
    Mock::given(method("GET"))
        .and(path("/missing.xls"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let resources = crawler().discover(None, &website).collect().await;

    let urls: Vec<&str> = resources.iter().map(|r| r.url.as_str()).collect();
    assert_eq!(
        urls,
        vec![
            format!("{}/a.csv", website).as_str(),
            format!("{}/b.pdf", website).as_str()
        ]
    );
}

#[tokio::test]
async fn test_unreachable_seed_yields_nothing() {
    let resources = crawler().discover(None, "http://127.0.0.1:1/").collect().await;
    assert!(resources.is_empty());
}

#[tokio::test]
async fn test_error_status_seed_yields_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let resources = crawler().discover(None, &server.uri()).collect().await;
    assert!(resources.is_empty());
}

#[tokio::test]
async fn test_invalid_seed_yields_nothing() {
    let crawler = crawler();
    assert!(crawler.discover(None, "ftp://test.lt/").collect().await.is_empty());
    assert!(crawler.discover(None, "not a url").collect().await.is_empty());
}

#[tokio::test]
async fn test_robots_disallowed_links_not_fetched() {
    let server = MockServer::start().await;
    let website = server.uri();

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /private/\n"),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_seed(
        &server,
        r#"<a href="/private/secret.csv">Secret</a><a href="/public/open.csv">Open</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/private/secret.csv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_file(&server, "/public/open.csv").await;

    let resources = crawler().discover(None, &website).collect().await;

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].url, format!("{}/public/open.csv", website));
}

#[tokio::test]
async fn test_robots_disallowing_seed_yields_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /\n"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<a href=\"/a.csv\">A</a>", "text/html"))
        .expect(0)
        .mount(&server)
        .await;

    let resources = crawler().discover(None, &server.uri()).collect().await;
    assert!(resources.is_empty());
}

#[tokio::test]
async fn test_cached_links_not_fetched() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(&server, r#"<a href="/old.csv">Old</a><a href="/new.csv">New</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/old.csv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    mount_file(&server, "/new.csv").await;

    let crawler = crawler();
    let mut cache = SqliteCache::open_in_memory().unwrap();
    let old_url = format!("{}/old.csv", website);
    let classification = crawler
        .classifier()
        .classify_name(&old_url, "old.csv".to_string());
    cache
        .insert(&Resource::new(&website, &old_url, classification))
        .unwrap();

    let resources = crawler.discover(Some(&cache), &website).collect().await;

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].url, format!("{}/new.csv", website));
}

#[tokio::test]
async fn test_discovery_is_lazy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let crawler = crawler();
    let discovery = crawler.discover(None, &server.uri());
    assert_eq!(discovery.website(), server.uri());
    drop(discovery);
}

#[tokio::test]
async fn test_resources_yielded_one_at_a_time() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(&server, r#"<a href="/1.csv">1</a><a href="/2.csv">2</a>"#).await;
    mount_file(&server, "/1.csv").await;
    mount_file(&server, "/2.csv").await;

    let crawler = crawler();
    let mut discovery = crawler.discover(None, &website);

    let first = discovery.next().await.expect("first resource");
    assert_eq!(first.name, "1.csv");
    let second = discovery.next().await.expect("second resource");
    assert_eq!(second.name, "2.csv");
    assert!(discovery.next().await.is_none());
    assert!(discovery.next().await.is_none());
}

#[tokio::test]
async fn test_discover_resources_drains_sequence() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(&server, r#"<a href="/1.csv">1</a><a href="/2.csv">2</a>"#).await;
    mount_file(&server, "/1.csv").await;
    mount_file(&server, "/2.csv").await;

    let resources = discover_resources(&Config::default(), None, &website)
        .await
        .unwrap();

    assert_eq!(resources.len(), 2);
    assert!(resources.iter().all(|r| r.website == website && r.is_data));
}

#[tokio::test]
async fn test_download_script_typed_by_content_type() {
    let server = MockServer::start().await;
    let website = server.uri();

    mount_seed(&server, r#"<a href="/download.php?id=5">Licencijos</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/download.php"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("content-type", "application/vnd.ms-excel"),
        )
        .mount(&server)
        .await;

    let resources = crawler().discover(None, &website).collect().await;

    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].name, "download.php.xls");
    assert_eq!(resources[0].file_type, "xls");
    assert!(resources[0].is_data);
    assert!(!resources[0].cached_forever);
}
