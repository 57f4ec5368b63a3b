use dioxus::prelude::*;

use crate::i18n::Locale;
use crate::tours::TourView;

/// Route target for `/:lang/tours/:id`.
#[component]
pub fn TourPage(lang: Locale, id: String) -> Element {
    rsx! {
        TourView { id, locale: lang }
    }
}
