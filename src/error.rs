use thiserror::Error;

#[derive(Debug, Error)]
pub enum TenkiError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::parser::ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] crate::weather::fetcher::FetchError),

    #[error("Store error: {0}")]
    Store(#[from] crate::store::StoreError),

    #[error("Notification error: {0}")]
    Notify(#[from] crate::alerts::notifier::NotifyError),

    #[error("Retention sweep error: {0}")]
    Sweep(#[from] crate::retention::SweepError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
