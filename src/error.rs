//! Crate-wide error type.

use thiserror::Error as ThisError;

use crate::geo::Point;
use crate::solver::BalancedPlan;

#[derive(Debug, ThisError)]
pub enum Error {
    /// Input cannot support the requested partition.
    #[error("invalid data: {0}")]
    Data(String),
    #[error("point {0} has no address in the index")]
    Lookup(Point),
    /// The cost oracle failed or answered with something unusable.
    #[error("cost oracle: {0}")]
    Oracle(String),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("config: {0}")]
    Config(#[from] serde_json::Error),
    /// A leg value with no recognised unit marker.
    #[error("cannot read {expected} from {text:?}")]
    Parse { text: String, expected: &'static str },
    #[error("routes still unbalanced after {iterations} iterations (spread {spread:.1} min)")]
    ConvergenceLimit {
        iterations: usize,
        spread: f64,
        plan: Box<BalancedPlan>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn data(message: impl Into<String>) -> Self {
        Self::Data(message.into())
    }

    pub fn oracle(message: impl Into<String>) -> Self {
        Self::Oracle(message.into())
    }
}
