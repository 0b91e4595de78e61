use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::CompareError;

/// Relational operator applied as `host <op> query`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relop {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Relop {
    pub const ALL: [Relop; 5] = [Relop::Lt, Relop::Le, Relop::Gt, Relop::Ge, Relop::Eq];

    pub fn as_str(&self) -> &'static str {
        match self {
            Relop::Lt => "<",
            Relop::Le => "<=",
            Relop::Gt => ">",
            Relop::Ge => ">=",
            Relop::Eq => "==",
        }
    }

    /// Decide the result from the first differing component, or `None` when
    /// every compared component was equal.
    pub fn evaluate(&self, first_difference: Option<Ordering>) -> bool {
        match first_difference {
            Some(ord) => match self {
                Relop::Lt | Relop::Le => ord == Ordering::Less,
                Relop::Gt | Relop::Ge => ord == Ordering::Greater,
                Relop::Eq => false,
            },
            None => matches!(self, Relop::Le | Relop::Ge | Relop::Eq),
        }
    }
}

impl FromStr for Relop {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Relop::Lt),
            "<=" => Ok(Relop::Le),
            ">" => Ok(Relop::Gt),
            ">=" => Ok(Relop::Ge),
            "==" => Ok(Relop::Eq),
            other => Err(CompareError::BadRelop(other.to_string())),
        }
    }
}

impl fmt::Display for Relop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
