use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error(
        "invalid resource name: {0:?} (name must be non-empty and relative, without `..` segments)"
    )]
    InvalidName(String),

    #[error(
        "unknown transport type: {0:?} (expected one of rest, microservice, ws, graphql-code-first, graphql-schema-first)"
    )]
    UnknownTransport(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {message}")]
    Parse { path: String, message: String },
}
