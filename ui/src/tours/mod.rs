//! The tour detail page: view state, presentation model and components.

pub mod controller;
pub mod presentation;

mod view;
pub use view::{TourDetail, TourView};
