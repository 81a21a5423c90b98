use std::backtrace::Backtrace;
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The caller-facing failure categories of the solver.
///
/// Search exhaustion is deliberately absent: a search that returns to the
/// root without finding a solution terminates normally with an empty result.
#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("the projection does not currently model a problem (zero variables)")]
    ProblemNotModelled,
    #[error("a solve is already in progress on this solver instance")]
    SolverBusy,
    #[error("the solve was cancelled")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}

impl Error {
    /// The wrapped [`SolverError`], for matching on the failure category.
    pub fn inner(&self) -> &SolverError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}
