//! Internationalization (i18n) support for `musetech-ui`.
//!
//! This module wires together:
//! - `i18n-embed` (asset loading + language negotiation)
//! - `fluent` (message formatting)
//! - `rust-embed` (compile-time embedding of `.ftl` files)
//! - `i18n-embed-fl` (`fl!` macro for compile‑time checked lookups)
//!
//! Folder layout (relative to this crate root):
//! ```text
//! i18n.toml
//! i18n/
//!   en/musetech-ui.ftl   (fallback/reference)
//!   de/musetech-ui.ftl
//! ```
//!
//! There is no process-wide "current language". Every supported [`Locale`]
//! owns its own `FluentLanguageLoader`, and callers pass the locale they
//! render for explicitly:
//! ```ignore
//! use ui::i18n::Locale;
//! let seats = ui::t!(Locale::De, "tour-seats"); // "Plätze"
//! ```
//!
//! To add a new locale:
//! 1. Copy `en/musetech-ui.ftl` to `i18n/<lang>/musetech-ui.ftl` and translate it.
//! 2. Add a variant to [`Locale`] (plus its loader below).
//! 3. Run tests to ensure completeness.
use std::fmt;
use std::str::FromStr;

use i18n_embed::fluent::FluentLanguageLoader;
use once_cell::sync::Lazy;
use rust_embed::Embed;
use thiserror::Error;
use unic_langid::LanguageIdentifier;

pub use i18n_embed_fl::fl; // Re-export for convenience.

/// Translation macro bound to an explicit locale.
/// Examples:
///     t!(Locale::En, "tour-seats")
///     t!(locale, "tour-price")
#[macro_export]
macro_rules! t {
    ($locale:expr, $key:literal) => {
        $crate::i18n::fl!($crate::i18n::loader($locale), $key)
    };
    ($locale:expr, $key:literal, $( $arg:ident = $value:expr ),+ $(,)?) => {
        $crate::i18n::fl!($crate::i18n::loader($locale), $key, $( $arg = $value ),+ )
    };
}

/// Fluent "domain" (matches the crate / the fallback FTL filename).
const DOMAIN: &str = "musetech-ui";

/// Embed all locale folders under `i18n/`.
#[derive(Embed)]
#[folder = "i18n"]
struct Localizations;

/// Display languages supported by the tour pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    De,
    #[default]
    En,
}

impl Locale {
    pub const ALL: [Locale; 2] = [Locale::De, Locale::En];

    /// Two-letter key used in routes and as the Mesh `lang` parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Locale::De => "de",
            Locale::En => "en",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale `{0}`")]
pub struct LocaleError(pub String);

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "de" => Ok(Locale::De),
            "en" => Ok(Locale::En),
            other => Err(LocaleError(other.to_string())),
        }
    }
}

static LOADER_DE: Lazy<FluentLanguageLoader> = Lazy::new(|| build_loader(Locale::De));
static LOADER_EN: Lazy<FluentLanguageLoader> = Lazy::new(|| build_loader(Locale::En));

/// Loader holding the bundle for `locale` (with `en` as fallback).
pub fn loader(locale: Locale) -> &'static FluentLanguageLoader {
    match locale {
        Locale::De => &LOADER_DE,
        Locale::En => &LOADER_EN,
    }
}

fn build_loader(locale: Locale) -> FluentLanguageLoader {
    let fallback: LanguageIdentifier = "en".parse().expect("valid fallback language identifier");
    let loader = FluentLanguageLoader::new(DOMAIN, fallback);
    let requested: Vec<LanguageIdentifier> = match locale.as_str().parse() {
        Ok(lang) => vec![lang],
        Err(_) => Vec::new(),
    };
    if let Err(err) = i18n_embed::select(&loader, &Localizations, &requested) {
        tracing::warn!(%locale, "failed selecting language ({err}); continuing with fallback");
    }
    loader
}

/// List available (embedded) language identifiers.
pub fn available_languages() -> Vec<String> {
    let mut langs = Localizations::iter()
        .filter_map(|path| path.split('/').next().map(|s| s.to_string()))
        .collect::<Vec<_>>();
    langs.sort();
    langs.dedup();
    langs
}
