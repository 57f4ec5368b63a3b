//! Access to the Gentics Mesh content backend: node model, REST client and
//! image-transform URLs.

mod client;
pub use client::{MeshClient, MeshError};

pub mod image;

mod model;
pub use model::{ImageFields, ImageRef, Tour, TourDate, TourDateFields, TourFields};
