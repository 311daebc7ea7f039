use resource_scout::config::Config;
use resource_scout::output::ckan_resources;
use resource_scout::storage::open_cache;
use resource_scout::{refresh, Crawler, ResourceCache, SqliteCache};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEED_PAGE: &str = r#"<html><body>
    <a href="/test1/file1.pdf">File 1</a>
    <a href="/file3.aspx">File 3</a>
    <a href="/file4">File 4</a>
    </body></html>"#;

/// Serves the seed page and its three links, each expected `times` times
async fn mount_site(server: &MockServer, seed_times: u64, link_times: u64) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(SEED_PAGE, "text/html"))
        .expect(seed_times)
        .mount(server)
        .await;

    for route in ["/test1/file1.pdf", "/file3.aspx", "/file4"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200))
            .expect(link_times)
            .mount(server)
            .await;
    }
}

#[tokio::test]
async fn test_refresh_stores_all_resources() {
    let server = MockServer::start().await;
    let website = server.uri();
    mount_site(&server, 1, 1).await;

    let crawler = Crawler::new(&Config::default()).unwrap();
    let mut cache = SqliteCache::open_in_memory().unwrap();

    let summary = refresh(&crawler, &mut cache, &website).await;

    assert_eq!(summary.discovered, 3);
    assert_eq!(summary.inserted, 3);
    assert_eq!(summary.failed, 0);

    let all = cache.query_all(Some(&website)).unwrap();
    assert_eq!(all.len(), 3);

    let data = cache.query_data(&website).unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0].url, format!("{}/test1/file1.pdf", website));
    assert_eq!(data[0].file_type, "pdf");

    let resources = ckan_resources(&cache, &website).unwrap();
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].format, "pdf");
}

#[tokio::test]
async fn test_refresh_is_idempotent() {
    let server = MockServer::start().await;
    let website = server.uri();
    // The seed page is fetched on every run; cached links are not.
    mount_site(&server, 2, 1).await;

    let crawler = Crawler::new(&Config::default()).unwrap();
    let mut cache = SqliteCache::open_in_memory().unwrap();

    let first = refresh(&crawler, &mut cache, &website).await;
    let second = refresh(&crawler, &mut cache, &website).await;

    assert_eq!(first.inserted, 3);
    assert_eq!(second.discovered, 0);
    assert_eq!(second.inserted, 0);
    assert_eq!(cache.query_all(Some(&website)).unwrap().len(), 3);
}

#[tokio::test]
async fn test_refresh_persists_across_reopen() {
    let server = MockServer::start().await;
    let website = server.uri();
    mount_site(&server, 2, 1).await;

    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("cache.db");
    let crawler = Crawler::new(&Config::default()).unwrap();

    {
        let mut cache = open_cache(&db_path).unwrap();
        refresh(&crawler, &mut cache, &website).await;
    }

    let mut cache = open_cache(&db_path).unwrap();
    let summary = refresh(&crawler, &mut cache, &website).await;

    assert_eq!(summary.inserted, 0);
    assert_eq!(cache.query_all_data().unwrap().len(), 1);
}

#[tokio::test]
async fn test_websites_are_cached_separately() {
    let server = MockServer::start().await;
    let website = server.uri();
    let alias = format!("{}/", website);
    mount_site(&server, 2, 2).await;

    let crawler = Crawler::new(&Config::default()).unwrap();
    let mut cache = SqliteCache::open_in_memory().unwrap();

    refresh(&crawler, &mut cache, &website).await;
    let summary = refresh(&crawler, &mut cache, &alias).await;

    assert_eq!(summary.inserted, 3);
    assert_eq!(cache.query_all(None).unwrap().len(), 6);
    assert_eq!(cache.query_all_data().unwrap().len(), 2);
}

#[tokio::test]
async fn test_self_linking_seed_is_fetched_on_every_refresh() {
    let server = MockServer::start().await;
    let website = format!("{}/", server.uri());

    // Every refresh fetches the seed page; the self-link only on the first.
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"<a href="/">Home</a><a href="/a.csv">A</a>"#, "text/html"),
        )
        .expect(3)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a.csv"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(&Config::default()).unwrap();
    let mut cache = SqliteCache::open_in_memory().unwrap();

    let first = refresh(&crawler, &mut cache, &website).await;
    assert_eq!(first.inserted, 2);
    assert!(cache.contains(&website, &website));

    let second = refresh(&crawler, &mut cache, &website).await;
    assert_eq!(second.discovered, 0);
    assert_eq!(cache.query_data(&website).unwrap().len(), 1);
}
