//! Tipos de erro para bell-core

use thiserror::Error;

/// Resultado customizado para operações de simulação
pub type BellResult<T> = Result<T, BellError>;

/// Erros que podem ocorrer em simulações de Bell
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BellError {
    #[error("Invalid spin axis: {0} (expected X, Y or Z)")]
    InvalidAxis(String),

    #[error("No trials: a statistic needs a positive trial count")]
    NoTrials,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown inequality: {0}")]
    UnknownInequality(String),
}
