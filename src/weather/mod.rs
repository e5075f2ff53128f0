pub mod fetcher;
pub mod models;

pub use fetcher::{FetchError, WeatherFetcher};
pub use models::WeatherRecord;
