use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use crate::comparator::VersionComparator;
use crate::config::{load_config, load_config_from_path, ConfigError, HostverConfig};
use crate::error::CompareError;
use crate::source::{CommandSource, HostVersionSource, StaticSource};

#[derive(Parser, Debug)]
#[command(
    name = "hostver",
    version,
    about = "Compare a host program's version against a version vector",
    allow_negative_numbers = true
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file (defaults to hostver.json in the config directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Use this host version string instead of the configured source
    #[arg(long, conflicts_with = "host_command")]
    pub host_version: Option<String>,

    /// Run this command to obtain the host version, e.g. "python3 --version".
    /// Split on whitespace, so paths or arguments containing spaces are not
    /// supported; use `host.command` in the config file for those
    #[arg(long, allow_hyphen_values = true)]
    pub host_command: Option<String>,

    /// Print the resolved host version and exit
    #[arg(long)]
    pub show: bool,

    /// Relational operator: <, <=, >, >=, ==
    #[arg(required_unless_present = "show")]
    pub op: Option<String>,

    /// One to four version components
    pub query: Vec<f64>,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("{id}: {0}", id = .0.id())]
    Compare(#[from] CompareError),
}

/// Outcome of a CLI invocation, before it becomes an exit code.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Matched(bool),
    Shown(String),
}

impl Cli {
    fn overrides_host(&self) -> bool {
        self.host_version.is_some() || self.host_command.is_some()
    }

    /// Load the config file. When the host version comes from a flag, a
    /// broken config file is not fatal: defaults are used and the load
    /// error is handed back for logging.
    pub fn load_config(&self) -> Result<(HostverConfig, Option<ConfigError>), ConfigError> {
        let loaded = match &self.config {
            Some(path) => load_config_from_path(path),
            None => load_config(),
        };
        match loaded {
            Ok(config) => Ok((config, None)),
            Err(e) if self.overrides_host() => Ok((HostverConfig::default(), Some(e))),
            Err(e) => Err(e),
        }
    }

    fn source(&self, config: &HostverConfig) -> Result<Box<dyn HostVersionSource>, ConfigError> {
        if let Some(version) = &self.host_version {
            return Ok(Box::new(StaticSource::new(version.clone())));
        }
        if let Some(command) = &self.host_command {
            let argv: Vec<String> = command.split_whitespace().map(str::to_string).collect();
            return Ok(Box::new(CommandSource::from_argv(&argv)?));
        }
        config.source()
    }

    /// Evaluate the invocation against an already loaded config.
    pub fn execute(&self, config: &HostverConfig) -> Result<Outcome, CliError> {
        let comparator = VersionComparator::new(self.source(config)?);
        if self.show {
            return Ok(Outcome::Shown(comparator.host_version()?.to_string()));
        }
        let op = self.op.as_deref().unwrap_or_default();
        Ok(Outcome::Matched(comparator.is_host_version(op, &self.query)?))
    }
}

/// Run the CLI application. Exit code 0 means the comparison held, 1 that
/// it did not, 2 that the call was invalid.
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let (config, ignored) = match cli.load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("hostver: {}", e);
            return ExitCode::from(2);
        }
    };

    crate::logging::init_logging(cli.verbose, config.log_level(), config.log_json());
    if let Some(e) = ignored {
        tracing::warn!(
            error = %e,
            "ignoring unreadable config, host version given on command line"
        );
    }

    match cli.execute(&config) {
        Ok(Outcome::Matched(matched)) => {
            println!("{}", matched);
            if matched {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Ok(Outcome::Shown(version)) => {
            println!("{}", version);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("hostver: {}", e);
            ExitCode::from(2)
        }
    }
}
