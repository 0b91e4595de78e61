use thiserror::Error;

/// Failure to obtain or parse the host's version string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostVersionError {
    #[error("host version source failed: {0}")]
    Source(String),
    #[error("host version string has no leading integer: {0:?}")]
    Unparseable(String),
    #[error("host version component out of range: {0}")]
    ComponentOverflow(String),
}

/// Every way a version check can fail. Nothing here is recovered internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompareError {
    #[error("2 inputs required.")]
    BadArity,
    #[error("1 output allowed.")]
    BadOutputArity,
    #[error("1st input must be a string.")]
    BadOperatorType,
    #[error("2nd input must be numeric.")]
    BadQueryType,
    #[error("2nd input must have 1 to 4 elements (got {0}).")]
    BadQueryLength(usize),
    #[error("Input N must contain integer values (got {0}).")]
    BadQueryValue(f64),
    #[error("Operator must be: '<=', '<', '>=', '>', '==' (got {0:?}).")]
    BadRelop(String),
    #[error(transparent)]
    HostVersion(#[from] HostVersionError),
}

impl CompareError {
    /// Stable identifier for the failed precondition.
    pub fn id(&self) -> &'static str {
        match self {
            CompareError::BadArity => "hostver:BadNInput",
            CompareError::BadOutputArity => "hostver:BadNOutput",
            CompareError::BadOperatorType => "hostver:BadInput1",
            CompareError::BadQueryType => "hostver:BadInput2",
            CompareError::BadQueryLength(_) => "hostver:BadInput2Len",
            CompareError::BadQueryValue(_) => "hostver:BadInput2Value",
            CompareError::BadRelop(_) => "hostver:BadRelop",
            CompareError::HostVersion(_) => "hostver:HostVersion",
        }
    }
}
