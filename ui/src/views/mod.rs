mod tour;
pub use tour::TourPage;

mod not_found;
pub use not_found::NotFound;
