//! Variadic entry point for embedders that pass untyped argument lists
//! (scripting bridges, FFI shims). Argument shape is checked here; the
//! comparison itself goes through [`VersionComparator::is_host_version`].

use crate::comparator::VersionComparator;
use crate::error::CompareError;
use crate::source::HostVersionSource;

/// A dynamically typed call argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    Text(String),
    Numbers(Vec<f64>),
    Logical(Vec<bool>),
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<Vec<f64>> for Arg {
    fn from(v: Vec<f64>) -> Self {
        Arg::Numbers(v)
    }
}

impl From<f64> for Arg {
    fn from(v: f64) -> Self {
        Arg::Numbers(vec![v])
    }
}

/// `match = call(op, n)` with `nargout` requested results.
pub fn call<S: HostVersionSource>(
    comparator: &VersionComparator<S>,
    nargout: usize,
    args: &[Arg],
) -> Result<bool, CompareError> {
    let [op, query] = args else {
        return Err(CompareError::BadArity);
    };
    if nargout > 1 {
        return Err(CompareError::BadOutputArity);
    }
    let Arg::Text(op) = op else {
        return Err(CompareError::BadOperatorType);
    };
    let Arg::Numbers(query) = query else {
        return Err(CompareError::BadQueryType);
    };
    comparator.is_host_version(op, query)
}
