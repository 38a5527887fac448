//! The command-line surface of the "chownr" binary.

use std::{path::PathBuf, process::ExitCode};

use clap::{Parser, ValueEnum};
use tracing::{debug, info, warn};

use crate::{
    identity::{IdentityError, parse_owner_spec},
    ownership::SymlinkOwnerPolicy,
    tree::TreeOwnerChanger,
};

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
    Silent,
}

impl LogLevel {
    pub fn to_tracing_level(&self) -> Option<tracing::Level> {
        match self {
            LogLevel::Trace => Some(tracing::Level::TRACE),
            LogLevel::Debug => Some(tracing::Level::DEBUG),
            LogLevel::Info => Some(tracing::Level::INFO),
            LogLevel::Warn => Some(tracing::Level::WARN),
            LogLevel::Error => Some(tracing::Level::ERROR),
            LogLevel::Silent => None,
        }
    }
}

/// Recursively change the owning user and group of filesystem trees, skipping entries that
/// can't be changed.
#[derive(Parser, Debug, Clone)]
#[command(name = "chownr", version)]
pub struct Cli {
    /// The target ownership as "OWNER:GROUP", or "OWNER:" for the owner's login group. Names and
    /// numeric IDs are both accepted.
    pub owner: String,

    /// The roots of the trees to change.
    #[clap(required = true)]
    pub paths: Vec<PathBuf>,

    /// Set the owning user of symbolic links on the links themselves instead of their targets.
    #[clap(long)]
    pub no_dereference: bool,

    /// Log every entry that couldn't be changed and exit with a failure status if there were any.
    #[clap(long)]
    pub report: bool,

    /// The most verbose level of log events to print to stderr. "trace" prints every visited entry.
    #[clap(long, short, default_value = "warn", value_enum)]
    pub log_level: LogLevel,
}

/// The outcome of walking every path given to the "chownr" binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The trees were walked without "--report" and all per-entry failures were discarded.
    Applied,
    /// The trees were walked with "--report".
    Reported { visited: usize, failed: usize },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            RunOutcome::Applied => true,
            RunOutcome::Reported { failed, .. } => *failed == 0,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// An error that aborts the "chownr" binary before any tree is walked.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid ownership specification: {0}")]
    InvalidOwner(#[from] IdentityError),
}

impl CliError {
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(2)
    }
}

impl Cli {
    pub fn setup_tracing(&self) {
        if let Some(level) = self.log_level.to_tracing_level() {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .without_time()
                .compact()
                .init();
        }
    }

    pub fn symlink_owner_policy(&self) -> SymlinkOwnerPolicy {
        if self.no_dereference {
            SymlinkOwnerPolicy::NoFollow
        } else {
            SymlinkOwnerPolicy::Follow
        }
    }

    /// Resolve the target ownership and walk every given path. Without "--report", the outcome is
    /// always a success regardless of per-entry failures.
    pub fn run(&self) -> Result<RunOutcome, CliError> {
        let ownership = parse_owner_spec(&self.owner)?;
        debug!("Resolved \"{}\" to {}:{}", self.owner, ownership.uid, ownership.gid);

        let changer = TreeOwnerChanger::new(ownership).symlink_owner_policy(self.symlink_owner_policy());

        if !self.report {
            for path in &self.paths {
                changer.apply(path);
            }
            return Ok(RunOutcome::Applied);
        }

        let mut visited = 0;
        let mut failed = 0;
        for path in &self.paths {
            let report = changer.apply_with_report(path);
            for failure in &report.failures {
                warn!("{failure}");
            }
            visited += report.visited;
            failed += report.failures.len();
        }
        info!("Visited {visited} entries with {failed} failures");

        Ok(RunOutcome::Reported { visited, failed })
    }
}
