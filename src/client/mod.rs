pub mod fetcher;
pub mod traits;

pub use fetcher::{venue_path, HttpVenueClient};
pub use traits::VenueApi;
