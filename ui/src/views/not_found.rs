use dioxus::prelude::*;

use crate::i18n::Locale;
use crate::t;

/// Catch-all route, also reached for unsupported locale prefixes.
#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let locale = segments
        .first()
        .and_then(|first| first.parse::<Locale>().ok())
        .unwrap_or_default();

    rsx! {
        section { class: "page page-not-found",
            h1 { {t!(locale, "not-found-title")} }
            p { {t!(locale, "not-found-body")} }
        }
    }
}
