use std::{
    fmt::Display,
    path::{Path, PathBuf},
};

/// The step of a tree walk at which a [ChownFailure] occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WalkStep {
    /// Reading the entry's own (non-followed) metadata failed, so the entry was skipped.
    Inspect,
    /// Listing a directory's children failed. The directory's own ownership was still set.
    ListDirectory,
    /// Setting the owning user failed.
    SetUser,
    /// Setting the owning group failed.
    SetGroup,
}

impl Display for WalkStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WalkStep::Inspect => write!(f, "inspecting"),
            WalkStep::ListDirectory => write!(f, "listing"),
            WalkStep::SetUser => write!(f, "setting the owning user of"),
            WalkStep::SetGroup => write!(f, "setting the owning group of"),
        }
    }
}

/// A single failure that was recovered from during a tree walk.
#[derive(Debug, thiserror::Error)]
#[error("{step} \"{}\" failed: {source}", .path.display())]
pub struct ChownFailure {
    pub path: PathBuf,
    pub step: WalkStep,
    #[source]
    pub source: std::io::Error,
}

/// The outcome of [TreeOwnerChanger::apply_with_report](crate::tree::TreeOwnerChanger::apply_with_report).
/// Every failure was recovered from locally, so the walk always ran to completion.
#[derive(Debug, Default)]
pub struct ChownReport {
    /// How many entries had their ownership change attempted.
    pub visited: usize,
    /// All failures in the order they occurred.
    pub failures: Vec<ChownFailure>,
}

impl ChownReport {
    /// Whether no failure occurred at any step.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Iterates over the failures that occurred at the given [WalkStep].
    pub fn failures_at(&self, step: WalkStep) -> impl Iterator<Item = &ChownFailure> {
        self.failures.iter().filter(move |failure| failure.step == step)
    }

    pub(crate) fn record(&mut self, path: &Path, step: WalkStep, source: std::io::Error) {
        self.failures.push(ChownFailure {
            path: path.to_owned(),
            step,
            source,
        });
    }
}
