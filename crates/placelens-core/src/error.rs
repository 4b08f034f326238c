use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate facet id: {0}")]
    DuplicateFacet(String),

    #[error("Invalid facet table: {0}")]
    InvalidFacetTable(String),
}

pub type Result<T> = std::result::Result<T, Error>;
