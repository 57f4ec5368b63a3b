use dioxus::logger::tracing::{error, info};
use dioxus::prelude::*;

use ui::core::config::{ConfigError, MeshConfig};
use ui::core::events::ContentEvents;
use ui::i18n::Locale;
use ui::views::{NotFound, TourPage};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/:lang/tours/:id")]
    TourPage { lang: Locale, id: String },
    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

/// Site-wide backend settings, shared with the other front-end bundles.
const CONFIG_JSON: &str = include_str!("../config.json");

fn load_config() -> Result<MeshConfig, ConfigError> {
    let config = MeshConfig::from_json(CONFIG_JSON)?;
    match option_env!("MUSETECH_MESH_URL") {
        Some(url) => config.with_base_url(url),
        None => Ok(config),
    }
}

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_hook(|| {
        load_config().map_err(|err| {
            error!("invalid site configuration: {err}");
            err.to_string()
        })
    });

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        match config {
            Ok(config) => rsx! { Site { config } },
            Err(message) => rsx! {
                section { class: "page page-config-error",
                    h1 { "Configuration error" }
                    p { "{message}" }
                }
            },
        }
    }
}

/// Provides the backend config and the content-change hub to every route,
/// and keeps the event-bus bridge connected while the site is mounted.
#[component]
fn Site(config: MeshConfig) -> Element {
    use_context_provider(|| config.clone());
    let events = use_context_provider(ContentEvents::new);

    #[cfg(target_arch = "wasm32")]
    {
        let url = config.eventbus_url();
        use_hook(|| info!(%url, "starting event bus bridge"));
        use_future(move || ui::core::bridge::run(url.clone(), events.clone()));
    }
    #[cfg(not(target_arch = "wasm32"))]
    use_hook(|| {
        info!(
            subscribers = events.subscriber_count(),
            "event bus bridge is wasm-only; live updates disabled"
        )
    });

    rsx! {
        Router::<Route> {}
    }
}
