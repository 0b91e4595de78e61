use std::process::Command;

use crate::error::HostVersionError;
use crate::version::VERSION;

/// Capability that yields the host's raw version string.
pub trait HostVersionSource: Send + Sync {
    /// Short description used in log output.
    fn describe(&self) -> String;

    fn version_string(&self) -> Result<String, HostVersionError>;
}

impl<S: HostVersionSource + ?Sized> HostVersionSource for Box<S> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    fn version_string(&self) -> Result<String, HostVersionError> {
        (**self).version_string()
    }
}

/// A fixed version string.
#[derive(Debug, Clone)]
pub struct StaticSource(pub String);

impl StaticSource {
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }
}

impl HostVersionSource for StaticSource {
    fn describe(&self) -> String {
        format!("static {:?}", self.0)
    }

    fn version_string(&self) -> Result<String, HostVersionError> {
        Ok(self.0.clone())
    }
}

/// The version of this crate itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct PackageSource;

impl HostVersionSource for PackageSource {
    fn describe(&self) -> String {
        format!("hostver {}", VERSION)
    }

    fn version_string(&self) -> Result<String, HostVersionError> {
        Ok(VERSION.to_string())
    }
}

/// Runs a host executable (e.g. `python3 --version`) and extracts the
/// version token from what it prints.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
}

impl CommandSource {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Build from an argv list; the first entry is the program.
    pub fn from_argv(argv: &[String]) -> Result<Self, HostVersionError> {
        let (program, args) = argv
            .split_first()
            .ok_or_else(|| HostVersionError::Source("empty host command".to_string()))?;
        Ok(Self::new(program.clone(), args.to_vec()))
    }
}

impl HostVersionSource for CommandSource {
    fn describe(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn version_string(&self) -> Result<String, HostVersionError> {
        let output = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| HostVersionError::Source(format!("{}: {}", self.describe(), e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            tracing::warn!(
                command = %self.describe(),
                status = %output.status,
                "host command exited with failure"
            );
            return Err(HostVersionError::Source(format!(
                "{} exited with {}: {}",
                self.describe(),
                output.status,
                stderr.trim()
            )));
        }

        // Some programs print their version on stderr.
        let text = if stdout.trim().is_empty() {
            stderr
        } else {
            stdout
        };

        version_token(&text)
            .map(str::to_string)
            .ok_or_else(|| HostVersionError::Unparseable(text.trim().to_string()))
    }
}

/// First whitespace-separated token that starts with a digit.
fn version_token(text: &str) -> Option<&str> {
    text.split_whitespace()
        .map(|t| t.trim_start_matches(['v', 'V']))
        .find(|t| t.starts_with(|c: char| c.is_ascii_digit()))
}
