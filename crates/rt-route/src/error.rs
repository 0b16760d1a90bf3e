use rt_core::CoreError;
use rt_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("route request parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type RouteResult<T> = Result<T, RouteError>;
