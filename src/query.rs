use crate::error::CompareError;
use crate::version::COMPONENTS;

/// Caller-supplied version to compare against: 1 to 4 integer components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryVector {
    components: Vec<i64>,
}

impl QueryVector {
    /// Build from integer components, checking only the length.
    pub fn new(components: &[i64]) -> Result<Self, CompareError> {
        check_len(components.len())?;
        Ok(Self {
            components: components.to_vec(),
        })
    }

    /// Build from numeric input. Only the first element must be a whole
    /// number; the others are truncated toward zero without complaint.
    pub fn from_f64(values: &[f64]) -> Result<Self, CompareError> {
        check_len(values.len())?;
        let first = values[0];
        if first != first.floor() {
            return Err(CompareError::BadQueryValue(first));
        }
        Ok(Self {
            components: values.iter().map(|v| *v as i64).collect(),
        })
    }

    pub fn components(&self) -> &[i64] {
        &self.components
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

fn check_len(len: usize) -> Result<(), CompareError> {
    if len == 0 || len > COMPONENTS {
        return Err(CompareError::BadQueryLength(len));
    }
    Ok(())
}
