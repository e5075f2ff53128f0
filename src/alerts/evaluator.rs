use tracing::debug;

use crate::config::models::AlertThresholds;
use crate::weather::WeatherRecord;

/// Returns true when the record breaches either alert threshold.
///
/// Both comparisons are strict greater-than: a value exactly at the
/// threshold does not trigger.
pub fn exceeds_thresholds(record: &WeatherRecord, thresholds: &AlertThresholds) -> bool {
    let triggered = record.temperature > thresholds.temperature
        || record.rainfall > thresholds.rainfall;

    debug!(
        "Alert evaluation for '{}': temp={} (limit {}), rainfall={} (limit {}) -> {}",
        record.location_id,
        record.temperature,
        thresholds.temperature,
        record.rainfall,
        thresholds.rainfall,
        triggered
    );

    triggered
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(temperature: f64, rainfall: f64) -> WeatherRecord {
        WeatherRecord {
            location_id: "tokyo".to_string(),
            timestamp: 1_700_000_000,
            temperature,
            humidity: 60.0,
            rainfall,
            wind_speed: 3.2,
        }
    }

    #[test]
    fn test_no_alert_below_thresholds() {
        let thresholds = AlertThresholds::default();
        assert!(!exceeds_thresholds(&record(25.0, 0.0), &thresholds));
    }

    #[test]
    fn test_exact_threshold_does_not_trigger() {
        let thresholds = AlertThresholds::default();
        assert!(!exceeds_thresholds(&record(30.0, 0.0), &thresholds));
        assert!(!exceeds_thresholds(&record(30.0, 30.0), &thresholds));
    }

    #[test]
    fn test_temperature_triggers() {
        let thresholds = AlertThresholds::default();
        assert!(exceeds_thresholds(&record(30.1, 0.0), &thresholds));
    }

    #[test]
    fn test_rainfall_triggers() {
        let thresholds = AlertThresholds::default();
        assert!(exceeds_thresholds(&record(20.0, 30.5), &thresholds));
    }

    #[test]
    fn test_custom_thresholds() {
        let thresholds = AlertThresholds {
            temperature: 35.0,
            rainfall: 10.0,
        };
        assert!(!exceeds_thresholds(&record(32.0, 0.0), &thresholds));
        assert!(exceeds_thresholds(&record(32.0, 11.0), &thresholds));
    }
}
