use dioxus::prelude::*;
use futures_util::StreamExt;
use time::OffsetDateTime;
use tracing::debug;

use crate::core::config::MeshConfig;
use crate::core::events::ContentEvents;
use crate::i18n::Locale;
use crate::mesh::MeshClient;

use super::controller::{FetchRequest, TourController};
use super::presentation::TourPresentation;

const TOUR_CSS: Asset = asset!("/assets/styling/tour.css");

/// Tour detail page body.
///
/// Expects a [`MeshConfig`] and a [`ContentEvents`] hub in context. Fetches
/// on mount and on every `(id, locale)` change, refetches on every content
/// notification, and renders nothing until a tour has loaded. The
/// subscription and in-flight fetches are owned by this scope and end with it.
#[component]
pub fn TourView(id: String, locale: Locale) -> Element {
    let config = use_context::<MeshConfig>();
    let events = use_context::<ContentEvents>();
    let client = use_hook({
        let config = config.clone();
        move || MeshClient::new(config)
    });
    let mut state = use_signal(TourController::default);

    let params_client = client.clone();
    use_effect(use_reactive!(|(id, locale)| {
        let request = state.write().set_params(&id, locale);
        if let Some(request) = request {
            debug!(%id, %locale, "tour parameters changed");
            dispatch(state, params_client.clone(), request);
        }
    }));

    let events_client = client.clone();
    use_future(move || {
        let events = events.clone();
        let client = events_client.clone();
        async move {
            let mut subscription = events.subscribe();
            while let Some(change) = subscription.next().await {
                debug!(address = %change.address, "content changed; refreshing tour");
                let request = state.write().refresh();
                if let Some(request) = request {
                    dispatch(state, client.clone(), request);
                }
            }
        }
    });

    let controller = state.read();
    let Some(tour) = controller.tour() else {
        return rsx! {};
    };
    let view = TourPresentation::build(tour, locale, &config, OffsetDateTime::now_utc());

    rsx! {
        document::Link { rel: "stylesheet", href: TOUR_CSS }
        TourDetail { view }
    }
}

fn dispatch(mut state: Signal<TourController>, client: MeshClient, request: FetchRequest) {
    spawn(async move {
        let result = client
            .fetch_tour(&request.params.id, request.params.locale)
            .await;
        let outcome = state.write().complete(request, result);
        debug!(?outcome, "tour fetch completed");
    });
}

/// Markup for a loaded tour.
#[component]
pub fn TourDetail(view: TourPresentation) -> Element {
    let TourPresentation {
        labels,
        back_href,
        title,
        picture,
        attribution,
        seats,
        price,
        description,
        next_date,
    } = view;

    rsx! {
        section { class: "page-section tour-detail",
            div { class: "tour-detail__card",
                div { class: "tour-detail__title",
                    h2 { class: "section-heading",
                        a {
                            class: "tour-detail__back",
                            href: "{back_href}",
                            title: "{labels.back}",
                            "<<"
                        }
                        " {title}"
                    }
                }

                if let Some(pic) = picture {
                    div { class: "tour-detail__media",
                        picture {
                            for entry in pic.sources.iter() {
                                source {
                                    key: "{entry.media}",
                                    "media": "{entry.media}",
                                    "srcset": "{entry.srcset}",
                                }
                            }
                            img {
                                class: "tour-detail__image",
                                alt: "{pic.alt}",
                                "srcset": "{pic.img_srcset}",
                            }
                        }
                    }
                }
                div { class: "image-attribution",
                    p { "{attribution}" }
                }

                div { class: "tour-detail__facts",
                    span { class: "tour-detail__fact",
                        b { "{labels.seats}:" }
                        " {seats}"
                    }
                    span { class: "tour-detail__fact",
                        b { "{labels.price}:" }
                        " {price}"
                    }
                }

                if let Some(next) = next_date {
                    div { class: "tour-detail__next",
                        span { class: "tour-detail__fact",
                            b { "{labels.next_date}:" }
                            " {next.when}"
                        }
                        span { class: "tour-detail__fact",
                            b { "{labels.free_seats}:" }
                            " {next.free_seats}"
                        }
                    }
                }

                div { class: "tour-detail__description",
                    h3 { class: "tour-detail__description-heading", "{labels.description}" }
                    p { "{description}" }
                }
            }
        }
    }
}
