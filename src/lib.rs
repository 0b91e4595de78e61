pub mod cli;
pub mod comparator;
pub mod config;
pub mod entry;
pub mod error;
pub mod logging;
pub mod query;
pub mod relop;
pub mod source;
pub mod version;

/// Re-export commonly used items
pub use comparator::{compare_with, VersionComparator};
pub use error::{CompareError, HostVersionError};
pub use query::QueryVector;
pub use relop::Relop;
pub use source::{CommandSource, HostVersionSource, PackageSource, StaticSource};
pub use version::{HostVersion, VERSION};
