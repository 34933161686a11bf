pub mod error;
pub mod images;
pub mod tmdb;
pub mod traits;

pub use error::ApiError;
pub use images::{image_url, youtube_url, ImageSize};
pub use tmdb::TmdbClient;
pub use traits::{CatalogApi, TimeWindow};
