#![cfg(not(target_arch = "wasm32"))]
//! `TourView` mounted in a headless `VirtualDom` against a mocked Mesh API.

use std::time::Duration;

use dioxus::prelude::*;
use httpmock::prelude::*;
use serde_json::json;
use ui::core::config::MeshConfig;
use ui::core::events::{ContentChanged, ContentEvents};
use ui::i18n::Locale;
use ui::tours::TourView;

fn harbour_walk() -> Element {
    rsx! {
        TourView { id: "42".to_string(), locale: Locale::En }
    }
}

fn tour_body() -> serde_json::Value {
    json!({
        "uuid": "42",
        "language": "en",
        "fields": {
            "title": "Harbour walk",
            "name": "harbour-walk",
            "image": {"path": "/img/x.jpg", "fields": {"attribution": "Photo: Jane"}},
            "size": 12.0,
            "price": 25.0,
            "description": "Along the docks."
        }
    })
}

/// Let spawned tasks and effects run, then flush dirty scopes.
async fn pump(dom: &mut VirtualDom) {
    let _ = tokio::time::timeout(Duration::from_millis(50), dom.wait_for_work()).await;
    dom.render_immediate_to_vec();
}

async fn pump_until(dom: &mut VirtualDom, mut done: impl FnMut(&VirtualDom) -> bool) {
    for _ in 0..100 {
        if done(dom) {
            return;
        }
        pump(dom).await;
    }
}

#[tokio::test]
async fn fetches_on_mount_and_once_per_notification() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/v2/musetech/nodes/42")
                .query_param("lang", "en")
                .query_param("expandAll", "true");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(tour_body());
        })
        .await;

    let config = MeshConfig::new(&server.url("/api/v2")).unwrap();
    let events = ContentEvents::new();
    let mut dom = VirtualDom::new(harbour_walk)
        .with_root_context(config)
        .with_root_context(events.clone());

    dom.rebuild_in_place();
    assert!(!dioxus_ssr::render(&dom).contains("tour-detail"));

    pump_until(&mut dom, |dom| dioxus_ssr::render(dom).contains("Harbour walk")).await;
    let html = dioxus_ssr::render(&dom).replace("&amp;", "&");
    assert!(html.contains("Seats"), "{html}");
    assert!(html.contains("Price"), "{html}");
    assert!(html.contains(" 12"), "{html}");
    assert!(html.contains("/musetech/webroot/img/x.jpg?w=600&mode=smart"), "{html}");
    assert_eq!(mock.hits_async().await, 1);

    let delivered = events.publish(ContentChanged {
        address: "mesh.node.updated".into(),
        uuid: Some("42".into()),
        language: Some("en".into()),
    });
    assert_eq!(delivered, 1);

    for _ in 0..100 {
        if mock.hits_async().await >= 2 {
            break;
        }
        pump(&mut dom).await;
    }
    for _ in 0..5 {
        pump(&mut dom).await;
    }
    assert_eq!(mock.hits_async().await, 2);
    assert!(dioxus_ssr::render(&dom).contains("Harbour walk"));
}

#[tokio::test]
async fn failed_first_fetch_renders_nothing() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/api/v2/musetech/nodes/42");
            then.status(404);
        })
        .await;

    let config = MeshConfig::new(&server.url("/api/v2")).unwrap();
    let mut dom = VirtualDom::new(harbour_walk)
        .with_root_context(config)
        .with_root_context(ContentEvents::new());

    dom.rebuild_in_place();
    for _ in 0..100 {
        if mock.hits_async().await >= 1 {
            break;
        }
        pump(&mut dom).await;
    }
    for _ in 0..5 {
        pump(&mut dom).await;
    }

    assert_eq!(mock.hits_async().await, 1);
    assert!(!dioxus_ssr::render(&dom).contains("tour-detail"));
}
