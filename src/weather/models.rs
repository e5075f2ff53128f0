use serde::{Deserialize, Serialize};

/// A single normalized weather observation as persisted to the record store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Deployment-level location identifier (partition key)
    pub location_id: String,

    /// Seconds since epoch at fetch time (sort key within a location)
    pub timestamp: i64,

    /// Temperature in degrees Celsius
    pub temperature: f64,

    /// Relative humidity percentage
    pub humidity: f64,

    /// Rainfall in millimeters over the preceding hour; 0.0 when the
    /// provider reports no rain
    pub rainfall: f64,

    /// Wind speed in meters per second
    pub wind_speed: f64,
}
