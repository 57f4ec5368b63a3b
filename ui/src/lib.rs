//! Shared UI crate for the Musetech tour pages: content client, live-update
//! plumbing, localization and the views themselves.

pub mod core;
pub mod i18n;
pub mod mesh;
pub mod tours;
pub mod views;
