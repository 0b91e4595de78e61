use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::HostVersionError;

/// The current version of hostver, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of components kept from a host version string.
pub const COMPONENTS: usize = 4;

fn leading_components() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^\s*(\d+)(?:\.(\d+))?(?:\.(\d+))?(?:\.(\d+))?")
            .expect("static pattern")
    })
}

/// A host version truncated or zero-filled to exactly four components,
/// e.g. `7.8.0.342 (R2009a)` becomes `[7, 8, 0, 342]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct HostVersion([u32; COMPONENTS]);

impl HostVersion {
    pub const fn new(components: [u32; COMPONENTS]) -> Self {
        Self(components)
    }

    /// Parse up to four leading `.`-separated integers. Anything after the
    /// last integer (a release tag, a second dotted group) is ignored.
    pub fn parse(raw: &str) -> Result<Self, HostVersionError> {
        let caps = leading_components()
            .captures(raw)
            .ok_or_else(|| HostVersionError::Unparseable(raw.to_string()))?;

        let mut components = [0u32; COMPONENTS];
        for (slot, group) in components.iter_mut().zip(caps.iter().skip(1)) {
            if let Some(m) = group {
                *slot = m
                    .as_str()
                    .parse()
                    .map_err(|_| HostVersionError::ComponentOverflow(m.as_str().to_string()))?;
            }
        }
        Ok(Self(components))
    }

    pub fn components(&self) -> &[u32; COMPONENTS] {
        &self.0
    }

    /// The first `len` components (clamped to four).
    pub fn prefix(&self, len: usize) -> &[u32] {
        &self.0[..len.min(COMPONENTS)]
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}
