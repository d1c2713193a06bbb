//! End-to-end runs of the coordinator against a mock catalog

use crate::fixtures::{
    home_page, listing_page, mount_html, mount_image, mount_status, test_config, ItemPage,
};
use catalog_scraper::crawler::Coordinator;
use catalog_scraper::output::{read_category_csv, CategoryExport, OutputHandler, OutputResult};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ALPHA: &str = "/catalogue/category/books/alpha_1/index.html";
const BETA: &str = "/catalogue/category/books/beta_2/index.html";
const BETA_PAGE_2: &str = "/catalogue/category/books/beta_2/page-2.html";

/// Two categories: alpha has one page with two items, beta has two pages
/// with one item each.
async fn mount_two_category_catalog(server: &MockServer) {
    mount_html(
        server,
        "/index.html",
        home_page(&[
            "catalogue/category/books/alpha_1/index.html",
            "catalogue/category/books/beta_2/index.html",
        ]),
    )
    .await;

    mount_html(
        server,
        ALPHA,
        listing_page(
            &[
                "../../../first-item_1/index.html",
                "../../../second-item_2/index.html",
            ],
            None,
        ),
    )
    .await;
    mount_html(
        server,
        BETA,
        listing_page(&["../../../third-item_3/index.html"], Some("page-2.html")),
    )
    .await;
    mount_html(
        server,
        BETA_PAGE_2,
        listing_page(&["../../../fourth-item_4/index.html"], None),
    )
    .await;

    for (slug, title, upc, category) in [
        ("first-item_1", "First Item", "upc-0001", "Alpha"),
        ("second-item_2", "Second Item", "upc-0002", "Alpha"),
        ("third-item_3", "Third Item", "upc-0003", "Beta"),
        ("fourth-item_4", "Fourth Item", "upc-0004", "Beta"),
    ] {
        let image_src = format!("../../media/{}.jpg", slug);
        mount_html(
            server,
            &format!("/catalogue/{}/index.html", slug),
            ItemPage::new(title, upc, category, &image_src).render(),
        )
        .await;
    }
}

#[tokio::test]
async fn test_full_scrape_two_categories() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_category_catalog(&mock_server).await;

    for slug in ["first-item_1", "second-item_2", "third-item_3", "fourth-item_4"] {
        mount_image(
            &mock_server,
            &format!("/media/{}.jpg", slug),
            slug.as_bytes(),
        )
        .await;
    }

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());

    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let stats = coordinator.run().await.expect("Scrape failed");

    assert_eq!(stats.categories_discovered, 2);
    assert_eq!(stats.categories_exported, 2);
    assert_eq!(stats.item_links_found, 4);
    assert_eq!(stats.items_extracted, 4);
    assert_eq!(stats.items_failed, 0);
    assert_eq!(stats.images_archived, 4);
    assert!(stats.finished_at.is_some());

    let alpha = read_category_csv(&out.path().join("alpha_1.csv")).expect("alpha export");
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[0].title, "First Item");
    assert_eq!(alpha[1].title, "Second Item");
    assert_eq!(
        alpha[0].product_page_url,
        format!("{}/catalogue/first-item_1/index.html", base_url)
    );
    assert_eq!(alpha[0].upc, "upc-0001");
    assert_eq!(alpha[0].price_incl_tax, "51.77");
    assert_eq!(alpha[0].price_excl_tax, "50.10");
    assert_eq!(alpha[0].availability, "In stock (3 available)");
    assert_eq!(alpha[0].description, "About First Item.");
    assert_eq!(alpha[0].category, "Alpha");
    assert_eq!(alpha[0].rating, "Three");
    assert_eq!(
        alpha[0].image_url,
        format!("{}/media/first-item_1.jpg", base_url)
    );
    assert_eq!(alpha[0].image_path, "images/Alpha/First Item.jpg");

    let beta = read_category_csv(&out.path().join("beta_2.csv")).expect("beta export");
    let titles: Vec<&str> = beta.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Third Item", "Fourth Item"]);

    for record in alpha.iter().chain(beta.iter()) {
        let image = out.path().join(&record.image_path);
        assert!(image.exists(), "missing image {}", image.display());
    }
    let bytes = std::fs::read(out.path().join("images/Beta/Fourth Item.jpg")).unwrap();
    assert_eq!(bytes, b"fourth-item_4");
}

#[tokio::test]
async fn test_image_failure_keeps_record() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_category_catalog(&mock_server).await;

    mount_status(&mock_server, "/media/second-item_2.jpg", 404).await;
    for slug in ["first-item_1", "third-item_3", "fourth-item_4"] {
        mount_image(&mock_server, &format!("/media/{}.jpg", slug), b"jpeg").await;
    }

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());

    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(stats.items_extracted, 4);
    assert_eq!(stats.images_archived, 3);
    assert_eq!(stats.images_failed, 1);

    let alpha = read_category_csv(&out.path().join("alpha_1.csv")).expect("alpha export");
    assert_eq!(alpha.len(), 2);
    assert_eq!(alpha[1].image_path, "images/Alpha/Second Item.jpg");
    assert!(!out.path().join(&alpha[1].image_path).exists());
    assert!(out.path().join(&alpha[0].image_path).exists());
}

#[tokio::test]
async fn test_item_parse_failure_drops_only_that_item() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/index.html",
        home_page(&["catalogue/category/books/alpha_1/index.html"]),
    )
    .await;
    mount_html(
        &mock_server,
        ALPHA,
        listing_page(
            &["../../../good_1/index.html", "../../../broken_2/index.html"],
            None,
        ),
    )
    .await;
    mount_html(
        &mock_server,
        "/catalogue/good_1/index.html",
        ItemPage::new("Good", "upc-good", "Alpha", "../../media/good.jpg").render(),
    )
    .await;

    let broken = ItemPage::new("Broken", "upc-broken", "Alpha", "../../media/broken.jpg")
        .render()
        .replace("<h1>Broken</h1>", "");
    mount_html(&mock_server, "/catalogue/broken_2/index.html", broken).await;

    mount_image(&mock_server, "/media/good.jpg", b"good").await;
    Mock::given(method("GET"))
        .and(path("/media/broken.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"broken".to_vec()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());
    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(stats.items_extracted, 1);
    assert_eq!(stats.items_failed, 1);

    let rows = read_category_csv(&out.path().join("alpha_1.csv")).expect("alpha export");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].title, "Good");
}

#[tokio::test]
async fn test_empty_discovery_halts_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/index.html",
        "<html><body><p>Maintenance</p></body></html>".to_string(),
    )
    .await;

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());
    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(stats.categories_discovered, 0);
    assert_eq!(stats.categories_exported, 0);
    assert!(stats.finished_at.is_some());
    assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_home_page_failure_halts_run() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_status(&mock_server, "/index.html", 500).await;

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());
    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(stats.categories_discovered, 0);
    assert!(stats.exported_files.is_empty());
}

#[tokio::test]
async fn test_category_without_items_is_skipped() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/index.html",
        home_page(&[
            "catalogue/category/books/alpha_1/index.html",
            "catalogue/category/books/beta_2/index.html",
        ]),
    )
    .await;
    mount_html(&mock_server, ALPHA, listing_page(&[], None)).await;
    mount_html(
        &mock_server,
        BETA,
        listing_page(&["../../../only_1/index.html"], None),
    )
    .await;
    mount_html(
        &mock_server,
        "/catalogue/only_1/index.html",
        ItemPage::new("Only", "upc-only", "Beta", "../../media/only.jpg").render(),
    )
    .await;
    mount_image(&mock_server, "/media/only.jpg", b"only").await;

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());
    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Scrape failed");

    assert_eq!(stats.categories_discovered, 2);
    assert_eq!(stats.categories_skipped, 1);
    assert_eq!(stats.categories_exported, 1);
    assert!(!out.path().join("alpha_1.csv").exists());
    assert!(out.path().join("beta_2.csv").exists());
}

#[tokio::test]
async fn test_reserved_characters_in_title() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html(
        &mock_server,
        "/index.html",
        home_page(&["catalogue/category/books/alpha_1/index.html"]),
    )
    .await;
    mount_html(
        &mock_server,
        ALPHA,
        listing_page(&["../../../odd_1/index.html"], None),
    )
    .await;
    mount_html(
        &mock_server,
        "/catalogue/odd_1/index.html",
        ItemPage::new("Who: Me?", "upc-odd", "Sci/Fi", "../../media/odd.jpg").render(),
    )
    .await;
    mount_image(&mock_server, "/media/odd.jpg", b"odd").await;

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());
    Coordinator::new(config)
        .expect("Failed to create coordinator")
        .run()
        .await
        .expect("Scrape failed");

    let rows = read_category_csv(&out.path().join("alpha_1.csv")).expect("alpha export");
    assert_eq!(rows[0].title, "Who: Me?");
    assert_eq!(rows[0].category, "Sci/Fi");
    assert_eq!(rows[0].image_path, "images/SciFi/Who Me.jpg");
    assert!(out.path().join("images/SciFi/Who Me.jpg").exists());
}

/// Keeps exports in memory instead of writing files
struct RecordingHandler {
    exports: Arc<Mutex<Vec<CategoryExport>>>,
}

impl OutputHandler for RecordingHandler {
    fn write_category(&self, export: &CategoryExport) -> OutputResult<PathBuf> {
        self.exports.lock().unwrap().push(export.clone());
        Ok(PathBuf::from(format!("memory/{}", export.slug)))
    }
}

#[tokio::test]
async fn test_custom_output_handler_receives_each_category_once() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    mount_two_category_catalog(&mock_server).await;
    for slug in ["first-item_1", "second-item_2", "third-item_3", "fourth-item_4"] {
        mount_image(&mock_server, &format!("/media/{}.jpg", slug), b"jpeg").await;
    }

    let out = tempfile::tempdir().expect("Failed to create temp dir");
    let config = test_config(format!("{}/index.html", base_url), out.path());
    let exports = Arc::new(Mutex::new(Vec::new()));

    let stats = Coordinator::new(config)
        .expect("Failed to create coordinator")
        .with_output_handler(Box::new(RecordingHandler {
            exports: Arc::clone(&exports),
        }))
        .run()
        .await
        .expect("Scrape failed");

    let exports = exports.lock().unwrap();
    let slugs: Vec<&str> = exports.iter().map(|e| e.slug.as_str()).collect();
    assert_eq!(slugs, vec!["alpha_1", "beta_2"]);
    assert_eq!(exports[0].records.len(), 2);
    assert_eq!(exports[1].records.len(), 2);

    assert_eq!(
        stats.exported_files,
        vec![PathBuf::from("memory/alpha_1"), PathBuf::from("memory/beta_2")]
    );
    assert!(!out.path().join("alpha_1.csv").exists());
}
