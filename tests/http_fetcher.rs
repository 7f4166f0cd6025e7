// tests/http_fetcher.rs
//
// The real reqwest-backed fetcher and card API against a local tiny_http server.
//
mod common;

use std::{thread, time::Duration};

use common::jpeg_bytes;
use ygo_scrape::{
    api::{CardApi, MetadataSource},
    core::net::{Fetch, HttpFetcher},
    ScrapeError,
};

/// Serve fixed routes forever on an ephemeral port. Returns the base URL.
fn serve(routes: Vec<(&'static str, u16, Vec<u8>)>) -> String {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http");
    let port = server.server_addr().to_ip().expect("ip address").port();
    thread::spawn(move || {
        for req in server.incoming_requests() {
            let path = req.url().split('?').next().unwrap_or("").to_string();
            let resp = match routes.iter().find(|(p, _, _)| *p == path) {
                Some((_, status, body)) => tiny_http::Response::from_data(body.clone()).with_status_code(*status),
                None => tiny_http::Response::from_data(b"not found".to_vec()).with_status_code(404),
            };
            let _ = req.respond(resp);
        }
    });
    format!("http://127.0.0.1:{port}")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new("ygo_scrape-tests").unwrap()
}

#[test]
fn fetch_returns_body_on_success() {
    let jpg = jpeg_bytes([5, 6, 7]);
    let base = serve(vec![("/c/1.jpg", 200, jpg.clone())]);

    let got = fetcher().fetch(&format!("{base}/c/1.jpg"), Duration::from_secs(5)).unwrap();
    assert_eq!(got, jpg);
}

#[test]
fn fetch_maps_404_to_http_error() {
    let base = serve(vec![]);

    match fetcher().fetch(&format!("{base}/c/404.jpg"), Duration::from_secs(5)) {
        Err(ScrapeError::Http { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[test]
fn fetch_maps_refused_connection_to_network_error() {
    // Bind then drop to get a port nobody listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();

    let res = fetcher().fetch(&format!("http://127.0.0.1:{port}/x.jpg"), Duration::from_secs(2));
    assert!(matches!(res, Err(ScrapeError::Network { .. })));
}

#[test]
fn card_api_decodes_listing() {
    let body = br#"{"data":[{"id":46986414,"name":"Dark Magician","race":"Spellcaster",
        "card_images":[{"id":46986414,"image_url_cropped":"https://img/46986414.jpg"}]}]}"#;
    let base = serve(vec![("/api/v7/cardinfo.php", 200, body.to_vec())]);
    let http = fetcher();
    let api = CardApi::new(&http, format!("{base}/api/v7/cardinfo.php"), Duration::from_secs(5));

    let cards = api.cards_for("Spellcaster").unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].cropped_url(), Some("https://img/46986414.jpg"));
}

#[test]
fn card_api_error_status_surfaces_as_http() {
    let base = serve(vec![("/api/v7/cardinfo.php", 400, br#"{"error":"bad race"}"#.to_vec())]);
    let http = fetcher();
    let api = CardApi::new(&http, format!("{base}/api/v7/cardinfo.php"), Duration::from_secs(5));

    assert!(matches!(api.cards_for("Nope"), Err(ScrapeError::Http { status: 400, .. })));
}
