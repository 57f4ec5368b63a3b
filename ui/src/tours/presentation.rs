//! Everything the tour detail markup needs, computed from a tour snapshot,
//! the page locale and the backend configuration.

use time::OffsetDateTime;

use crate::core::config::MeshConfig;
use crate::core::format;
use crate::i18n::Locale;
use crate::mesh::image::{self, BREAKPOINTS, FALLBACK_WIDTH};
use crate::mesh::Tour;
use crate::t;

/// Locale-specific labels of the detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub seats: String,
    pub price: String,
    pub description: String,
    pub back: String,
    pub next_date: String,
    pub free_seats: String,
}

impl Labels {
    pub fn for_locale(locale: Locale) -> Self {
        Self {
            seats: t!(locale, "tour-seats"),
            price: t!(locale, "tour-price"),
            description: t!(locale, "tour-description"),
            back: t!(locale, "tour-back"),
            next_date: t!(locale, "tour-next-date"),
            free_seats: t!(locale, "tour-free-seats"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureSource {
    pub media: String,
    pub srcset: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    pub sources: Vec<PictureSource>,
    pub img_srcset: String,
    pub alt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NextDate {
    pub when: String,
    pub free_seats: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TourPresentation {
    pub labels: Labels,
    /// Locale-scoped listing page, `/{locale}/tours`.
    pub back_href: String,
    pub title: String,
    pub picture: Option<Picture>,
    pub attribution: String,
    pub seats: String,
    pub price: String,
    pub description: String,
    pub next_date: Option<NextDate>,
}

impl TourPresentation {
    pub fn build(tour: &Tour, locale: Locale, config: &MeshConfig, now: OffsetDateTime) -> Self {
        let fields = &tour.fields;
        let image_ref = fields.image.as_ref();

        let picture = image_ref
            .and_then(|image_ref| image_ref.path.as_deref())
            .map(|path| Picture {
                sources: BREAKPOINTS
                    .iter()
                    .map(|bp| PictureSource {
                        media: bp.media_query(),
                        srcset: image::resized_url(config, path, bp.width),
                    })
                    .collect(),
                img_srcset: image::resized_url(config, path, FALLBACK_WIDTH),
                alt: fields.name.clone().unwrap_or_default(),
            });

        Self {
            labels: Labels::for_locale(locale),
            back_href: format!("/{locale}/tours"),
            title: fields.title.clone().unwrap_or_default(),
            picture,
            attribution: image_ref
                .and_then(|image_ref| image_ref.fields.attribution.clone())
                .unwrap_or_default(),
            seats: fields.size.map(|size| size.to_string()).unwrap_or_default(),
            price: fields.price.map(format::format_price).unwrap_or_default(),
            description: fields.description.clone().unwrap_or_default(),
            next_date: tour.next_bookable(now).map(|(when, free_seats)| NextDate {
                when: format::format_date_time(when),
                free_seats,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::datetime;

    fn config() -> MeshConfig {
        MeshConfig::new("https://cms.example").unwrap()
    }

    fn harbour_walk() -> Tour {
        serde_json::from_value(json!({
            "uuid": "42",
            "fields": {
                "title": "Harbour walk",
                "name": "harbour-walk",
                "image": {"path": "/img/x.jpg", "fields": {"attribution": "Photo: Jane"}},
                "size": 12,
                "price": 25.0,
                "description": "Along the docks.",
                "dates": [{"fields": {"date": "2026-05-01T10:00:00Z", "seats": 3}}]
            }
        }))
        .unwrap()
    }

    const NOW: OffsetDateTime = datetime!(2026-04-01 00:00 UTC);

    #[test]
    fn picture_uses_three_breakpoints_and_fallback() {
        let view = TourPresentation::build(&harbour_walk(), Locale::En, &config(), NOW);
        let picture = view.picture.unwrap();

        let srcsets: Vec<&str> = picture.sources.iter().map(|s| s.srcset.as_str()).collect();
        assert_eq!(
            srcsets,
            [
                "https://cms.example/musetech/webroot/img/x.jpg?w=500&mode=smart",
                "https://cms.example/musetech/webroot/img/x.jpg?w=800&mode=smart",
                "https://cms.example/musetech/webroot/img/x.jpg?w=1200&mode=smart",
            ]
        );
        assert_eq!(picture.sources[0].media, "(min-height: 320px)");
        assert_eq!(picture.sources[2].media, "(min-height: 1280px)");
        assert_eq!(
            picture.img_srcset,
            "https://cms.example/musetech/webroot/img/x.jpg?w=600&mode=smart"
        );
        assert_eq!(picture.alt, "harbour-walk");
    }

    #[test]
    fn english_labels() {
        let view = TourPresentation::build(&harbour_walk(), Locale::En, &config(), NOW);
        assert_eq!(view.labels.seats, "Seats");
        assert_eq!(view.labels.price, "Price");
        assert_eq!(view.back_href, "/en/tours");
        assert_eq!(view.seats, "12");
        assert_eq!(view.price, "25");
    }

    #[test]
    fn german_labels() {
        let view = TourPresentation::build(&harbour_walk(), Locale::De, &config(), NOW);
        assert_eq!(view.labels.seats, "Plätze");
        assert_eq!(view.labels.price, "Preis");
        assert_eq!(view.back_href, "/de/tours");
    }

    #[test]
    fn labels_match_locale_table_for_every_locale() {
        for locale in Locale::ALL {
            let view = TourPresentation::build(&harbour_walk(), locale, &config(), NOW);
            assert_eq!(view.labels, Labels::for_locale(locale));
        }
    }

    #[test]
    fn next_date_is_formatted() {
        let view = TourPresentation::build(&harbour_walk(), Locale::En, &config(), NOW);
        assert_eq!(
            view.next_date,
            Some(NextDate {
                when: "2026-05-01 10:00".into(),
                free_seats: 3
            })
        );
    }

    #[test]
    fn missing_fields_render_empty() {
        let bare: Tour = serde_json::from_value(json!({"uuid": "7", "fields": {}})).unwrap();
        let view = TourPresentation::build(&bare, Locale::En, &config(), NOW);
        assert!(view.picture.is_none());
        assert_eq!(view.title, "");
        assert_eq!(view.attribution, "");
        assert_eq!(view.seats, "");
        assert_eq!(view.price, "");
        assert_eq!(view.description, "");
        assert!(view.next_date.is_none());
    }
}
