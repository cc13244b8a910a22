use thiserror::Error;

/// Aggregates the per-crate error taxonomies behind one error type for
/// `railway_core` consumers, composing narrow per-crate errors rather
/// than one God error type.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error(transparent)]
    Model(#[from] model::ModelError),

    #[error(transparent)]
    Schedule(#[from] solution::ScheduleError),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}
