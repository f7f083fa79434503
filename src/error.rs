use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to open dataset '{0}'")]
    Open(PathBuf, #[source] sqlx::Error),

    #[error("Dataset has no table '{0}'")]
    MissingTable(&'static str),

    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// A query that failed while serving a request.
#[derive(Debug)]
pub struct QueryFailed(pub sqlx::Error);

impl warp::reject::Reject for QueryFailed {}
