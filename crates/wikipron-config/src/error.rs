#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("language name must not be empty")]
    EmptyLanguage,

    #[error("cut-off date {0:?} is not a YYYY-MM-DD date")]
    InvalidDate(String),

    #[error("cut-off date {date} is later than today ({today})")]
    FutureDate { date: String, today: String },

    #[error("concurrency must be at least 1")]
    ZeroConcurrency,
}
