//! Integration tests for the search pipeline
//!
//! These tests use wiremock to stand in for both the marketplace and the bank
//! page and exercise pagination, degradation, and aggregation end-to-end.

use autoprecio::config::Config;
use autoprecio::crawler::{SearchQuery, Searcher, StopReason};
use std::time::{Duration, Instant};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing both sources at the mock server
fn create_test_config(server: &MockServer, max_pages: u32) -> Config {
    let mut config = Config::default();
    config.marketplace.base_url = format!("{}/", server.uri());
    config.marketplace.max_pages = max_pages;
    config.marketplace.page_delay_ms = 0;
    config.exchange_rate.url = format!("{}/bank", server.uri());
    config.exchange_rate.timeout_secs = 2;
    config.http.timeout_secs = 5;
    config
}

/// One result card priced with `symbol`
fn listing_card(title: &str, symbol: &str, price: &str, km: &str) -> String {
    format!(
        r#"<li class="ui-search-layout__item">
            <div class="ui-search-result__content-wrapper">
                <a class="ui-search-item__group__element ui-search-link__title-card" href="https://auto.example.com/{title}">
                    <h2 class="ui-search-item__title">{title}</h2>
                </a>
                <span class="andes-money-amount__currency-symbol">{symbol}</span>
                <span class="andes-money-amount__fraction">{price}</span>
                <ul class="ui-search-card-attributes"><li>2018</li><li>{km}</li></ul>
                <span class="ui-search-item__group__element ui-search-item__location">Rosario - Santa Fe</span>
            </div>
        </li>"#
    )
}

/// A card the extractor skips (no content container)
fn ad_card() -> String {
    r#"<li class="ui-search-layout__item"><div class="ui-search-result__wrapper">promo</div></li>"#
        .to_string()
}

fn results_page(cards: &[String]) -> String {
    format!(
        r#"<html><body><ol class="ui-search-layout">{}</ol></body></html>"#,
        cards.join("\n")
    )
}

fn empty_results_page() -> String {
    r#"<html><body><div class="ui-search-rescue">No hay publicaciones</div></body></html>"#
        .to_string()
}

fn bank_page(sell: &str) -> String {
    format!(
        r#"<html><body><span class="value buy">1.100,00</span><span class="value sell">{}</span></body></html>"#,
        sell
    )
}

async fn mount_page(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_bank(server: &MockServer, response: ResponseTemplate, times: u64) {
    Mock::given(method("GET"))
        .and(path("/bank"))
        .respond_with(response)
        .expect(times)
        .mount(server)
        .await;
}

async fn requested_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_mixed_currency_search() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/peugeot-208-gt-2018",
        results_page(&[
            listing_card("local", "$", "5.000.000", "15.000 km"),
            listing_card("foreign", "U$S", "20.000", "5.000 km"),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/peugeot-208-gt-2018_Desde_3",
        empty_results_page(),
    )
    .await;
    mount_bank(
        &mock_server,
        ResponseTemplate::new(200).set_body_string(bank_page("1.155,00")),
        1,
    )
    .await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let aggregate = searcher
        .search("Peugeot 208 GT", "2018")
        .await
        .expect("search failed");

    assert_eq!(aggregate.records.len(), 2);
    assert_eq!(aggregate.records[0].local_price, 5_000_000.0);
    assert_eq!(aggregate.records[1].local_price, 23_100_000.0);
    assert_eq!(aggregate.mean_local_price, 14_050_000);
    assert_eq!(aggregate.min_local_price, 5_000_000);
    assert_eq!(aggregate.max_local_price, 23_100_000);
    assert_eq!(aggregate.min_distance_km, 5_000);
    assert_eq!(aggregate.max_distance_km, 15_000);
    assert_eq!(aggregate.records[0].record.location, "Rosario - Santa Fe");
    assert_eq!(aggregate.records[1].record.seller, "N/A");
}

#[tokio::test]
async fn test_pagination_stops_on_empty_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/ford-ka-2018",
        results_page(&[
            listing_card("a", "$", "1.000", "10 km"),
            listing_card("b", "$", "2.000", "20 km"),
        ]),
    )
    .await;
    mount_page(
        &mock_server,
        "/ford-ka-2018_Desde_3",
        results_page(&[
            listing_card("c", "$", "3.000", "30 km"),
            listing_card("d", "$", "4.000", "40 km"),
        ]),
    )
    .await;
    mount_page(&mock_server, "/ford-ka-2018_Desde_5", empty_results_page()).await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let query = SearchQuery::new("Ford Ka", "2018").unwrap();
    let collection = searcher.collect_pages(&query).await.expect("collect");

    assert_eq!(collection.stop, StopReason::EmptyPage { page: 3 });
    assert_eq!(collection.pages_fetched, 3);
    let titles: Vec<&str> = collection
        .listings
        .iter()
        .map(|l| l.title.as_str())
        .collect();
    assert_eq!(titles, vec!["a", "b", "c", "d"]);

    // Page 4 is never attempted
    assert_eq!(
        requested_paths(&mock_server).await,
        vec![
            "/ford-ka-2018",
            "/ford-ka-2018_Desde_3",
            "/ford-ka-2018_Desde_5"
        ]
    );
}

#[tokio::test]
async fn test_page_cap_bounds_fetches() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/fiat-uno-2010"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&[listing_card("uno", "$", "900.000", "1 km")])),
        )
        .expect(5)
        .mount(&mock_server)
        .await;
    mount_bank(
        &mock_server,
        ResponseTemplate::new(200).set_body_string(bank_page("1.155,00")),
        1,
    )
    .await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let aggregate = searcher.search("Fiat Uno", "2010").await.expect("search");

    assert_eq!(aggregate.records.len(), 5);
    assert_eq!(aggregate.mean_local_price, 900_000);

    let paths = requested_paths(&mock_server).await;
    assert_eq!(
        paths,
        vec![
            "/fiat-uno-2010",
            "/fiat-uno-2010_Desde_2",
            "/fiat-uno-2010_Desde_3",
            "/fiat-uno-2010_Desde_4",
            "/fiat-uno-2010_Desde_5",
            "/bank"
        ]
    );
}

#[tokio::test]
async fn test_fetch_failure_keeps_gathered_listings() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/renault-sandero-2016",
        results_page(&[listing_card("first", "$", "7.500.000", "80.000 km")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/renault-sandero-2016_Desde_2"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let query = SearchQuery::new("Renault Sandero", "2016").unwrap();
    let collection = searcher.collect_pages(&query).await.expect("collect");

    assert_eq!(
        collection.stop,
        StopReason::FetchFailed {
            page: 2,
            reason: "HTTP 503".to_string()
        }
    );
    assert_eq!(collection.pages_fetched, 2);
    assert_eq!(collection.listings.len(), 1);
    assert_eq!(collection.listings[0].raw_amount, 7_500_000);
}

#[tokio::test]
async fn test_first_page_failure_returns_empty_aggregate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/chevrolet-onix-2020"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&mock_server)
        .await;
    // The rate is not needed when nothing was found
    mount_bank(
        &mock_server,
        ResponseTemplate::new(200).set_body_string(bank_page("1.155,00")),
        0,
    )
    .await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let aggregate = searcher.search("Chevrolet Onix", "2020").await.expect("search");

    assert!(aggregate.records.is_empty());
    assert_eq!(aggregate.mean_local_price, 0);
    assert_eq!(aggregate.min_local_price, 0);
    assert_eq!(aggregate.max_local_price, 0);
    assert_eq!(aggregate.min_distance_km, 0);
    assert_eq!(aggregate.max_distance_km, 0);

    let value = serde_json::to_value(&aggregate).unwrap();
    assert_eq!(value["datos"], serde_json::json!([]));
}

#[tokio::test]
async fn test_rate_status_failure_uses_fallback() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/toyota-hilux-2019",
        results_page(&[
            listing_card("usd-1", "U$S", "30.000", "60.000 km"),
            listing_card("usd-2", "U$S", "10.000", "90.000 km"),
        ]),
    )
    .await;
    mount_page(&mock_server, "/toyota-hilux-2019_Desde_3", empty_results_page()).await;
    mount_bank(&mock_server, ResponseTemplate::new(500), 1).await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let aggregate = searcher.search("Toyota Hilux", "2019").await.expect("search");

    assert_eq!(aggregate.records[0].local_price, 30_000.0 * 1155.0);
    assert_eq!(aggregate.records[1].local_price, 10_000.0 * 1155.0);
    assert_eq!(aggregate.max_local_price, 34_650_000);
    assert_eq!(aggregate.min_local_price, 11_550_000);
}

#[tokio::test]
async fn test_rate_transport_failure_uses_fallback() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/vw-gol-2012",
        results_page(&[listing_card("gol", "U$S", "4.000", "150.000 km")]),
    )
    .await;
    mount_page(&mock_server, "/vw-gol-2012_Desde_2", empty_results_page()).await;

    let mut config = create_test_config(&mock_server, 5);
    config.exchange_rate.url = "http://127.0.0.1:9/".to_string();
    config.exchange_rate.timeout_secs = 1;

    let aggregate = Searcher::new(config)
        .expect("searcher")
        .search("VW Gol", "2012")
        .await
        .expect("search");

    assert_eq!(aggregate.records[0].local_price, 4_620_000.0);
    assert_eq!(aggregate.mean_local_price, 4_620_000);
}

#[tokio::test]
async fn test_rate_missing_element_uses_configured_fallback() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/honda-fit-2011",
        results_page(&[listing_card("fit", "U$S", "2", "1 km")]),
    )
    .await;
    mount_page(&mock_server, "/honda-fit-2011_Desde_2", empty_results_page()).await;
    mount_bank(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html><body>mantenimiento</body></html>"),
        1,
    )
    .await;

    let mut config = create_test_config(&mock_server, 5);
    config.exchange_rate.fallback_rate = 1000.0;

    let aggregate = Searcher::new(config)
        .expect("searcher")
        .search("Honda Fit", "2011")
        .await
        .expect("search");

    assert_eq!(aggregate.records[0].local_price, 2000.0);
}

#[tokio::test]
async fn test_live_rate_applied_to_foreign_listings_only() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/nissan-kicks-2023",
        results_page(&[
            listing_card("ars", "$", "30.000.000", "0 km"),
            listing_card("usd", "U$S", "25.000", "12.000 km"),
        ]),
    )
    .await;
    mount_page(&mock_server, "/nissan-kicks-2023_Desde_3", empty_results_page()).await;
    mount_bank(
        &mock_server,
        ResponseTemplate::new(200).set_body_string(bank_page("1.200,00")),
        1,
    )
    .await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let aggregate = searcher.search("Nissan Kicks", "2023").await.expect("search");

    assert_eq!(aggregate.records[0].local_price, 30_000_000.0);
    assert_eq!(aggregate.records[1].local_price, 30_000_000.0);
    assert_eq!(aggregate.mean_local_price, 30_000_000);
    assert_eq!(aggregate.min_distance_km, 0);
    assert_eq!(aggregate.max_distance_km, 12_000);
}

#[tokio::test]
async fn test_offset_counts_skipped_cards() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/citroen-c3-2017",
        results_page(&[ad_card(), listing_card("c3", "$", "6.000.000", "70.000 km")]),
    )
    .await;
    mount_page(&mock_server, "/citroen-c3-2017_Desde_3", empty_results_page()).await;

    let searcher = Searcher::new(create_test_config(&mock_server, 5)).expect("searcher");
    let query = SearchQuery::new("Citroen C3", "2017").unwrap();
    let collection = searcher.collect_pages(&query).await.expect("collect");

    assert_eq!(collection.listings.len(), 1);
    assert_eq!(collection.stop, StopReason::EmptyPage { page: 2 });
}

#[tokio::test]
async fn test_configured_user_agent_is_sent() {
    let mock_server = MockServer::start().await;
    let user_agent = "Mozilla/5.0 (X11; Linux x86_64) autoprecio-test/1.0";

    Mock::given(method("GET"))
        .and(path("/jeep-renegade-2021"))
        .and(header("user-agent", user_agent))
        .respond_with(ResponseTemplate::new(200).set_body_string(empty_results_page()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server, 5);
    config.http.user_agent = user_agent.to_string();

    let searcher = Searcher::new(config).expect("searcher");
    let query = SearchQuery::new("Jeep Renegade", "2021").unwrap();
    let collection = searcher.collect_pages(&query).await.expect("collect");

    assert_eq!(collection.stop, StopReason::EmptyPage { page: 1 });
}

#[tokio::test]
async fn test_page_delay_between_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/fiat-palio-2009"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&[listing_card("palio", "$", "1", "1 km")])),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server, 3);
    config.marketplace.page_delay_ms = 40;

    let searcher = Searcher::new(config).expect("searcher");
    let query = SearchQuery::new("Fiat Palio", "2009").unwrap();

    let started = Instant::now();
    let collection = searcher.collect_pages(&query).await.expect("collect");

    assert_eq!(collection.stop, StopReason::PageCap);
    assert_eq!(collection.pages_fetched, 3);
    // Two pauses: after pages 1 and 2, none after the last page
    assert!(started.elapsed() >= Duration::from_millis(80));
}

#[tokio::test]
async fn test_no_delay_after_last_page() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/fiat-uno-2012",
        results_page(&[listing_card("uno", "$", "1.500.000", "90.000 km")]),
    )
    .await;
    mount_bank(&mock_server, ResponseTemplate::new(200), 0).await;

    let mut config = create_test_config(&mock_server, 1);
    config.marketplace.page_delay_ms = 3000;

    let searcher = Searcher::new(config).expect("searcher");
    let query = SearchQuery::new("Fiat Uno", "2012").unwrap();

    let started = Instant::now();
    let collection = searcher.collect_pages(&query).await.expect("collect");
    let elapsed = started.elapsed();

    assert_eq!(collection.stop, StopReason::PageCap);
    assert_eq!(collection.pages_fetched, 1);
    assert_eq!(collection.listings.len(), 1);
    assert!(
        elapsed < Duration::from_millis(1500),
        "slept after the final page: {:?}",
        elapsed
    );
}
