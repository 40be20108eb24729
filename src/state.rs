//! Comparison state container
//!
//! All UI state that matters for correctness lives in [`DiffState`] and only
//! changes through [`DiffState::reduce`]. The current [`Phase`] is derived from
//! the fields, never stored.

use crate::differ::{self, Comparison};
use crate::file::{FileInput, FileReadError};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Which of the two files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::A, Side::B];

    pub fn index(self) -> usize {
        match self {
            Side::A => 0,
            Side::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ComparisonError {
    #[error("File {0} has not been selected")]
    MissingInput(Side),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Could not load file {side}: {source}")]
    FileRead {
        side: Side,
        #[source]
        source: FileReadError,
    },

    #[error(transparent)]
    Comparison(#[from] ComparisonError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Empty,
    PartiallySelected,
    BothSelected,
    Compared,
    Errored,
}

/// Identifies a load request so that late replies can be discarded
pub type Ticket = u64;

#[derive(Debug)]
pub enum Action {
    LoadStarted(Side, Ticket),
    FileLoaded(Side, Ticket, FileInput),
    LoadFailed(Side, Ticket, FileReadError),
    Compare,
    DismissError,
    Reset,
}

#[derive(Debug, Default)]
pub struct DiffState {
    files: [Option<FileInput>; 2],
    pending: [Option<Ticket>; 2],
    result: Option<Comparison>,
    error: Option<AppError>,
}

impl DiffState {
    pub fn file(&self, side: Side) -> Option<&FileInput> {
        self.files[side.index()].as_ref()
    }

    pub fn is_loading(&self, side: Side) -> bool {
        self.pending[side.index()].is_some()
    }

    /// Sides that hold a file or are waiting for one
    pub fn occupied(&self) -> [bool; 2] {
        Side::BOTH.map(|side| self.file(side).is_some() || self.is_loading(side))
    }

    pub fn result(&self) -> Option<&Comparison> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&AppError> {
        self.error.as_ref()
    }

    pub fn can_compare(&self) -> bool {
        self.files.iter().all(Option::is_some)
    }

    pub fn phase(&self) -> Phase {
        if self.error.is_some() {
            Phase::Errored
        } else if self.result.is_some() {
            Phase::Compared
        } else {
            match self.files.iter().filter(|f| f.is_some()).count() {
                0 => Phase::Empty,
                1 => Phase::PartiallySelected,
                _ => Phase::BothSelected,
            }
        }
    }

    /// Apply an action and return the next state
    pub fn reduce(mut self, action: Action) -> Self {
        match action {
            Action::LoadStarted(side, ticket) => {
                self.pending[side.index()] = Some(ticket);
            }
            Action::FileLoaded(side, ticket, input) => {
                if !self.accept(side, ticket) {
                    return self;
                }
                info!("Loaded file {}: {} ({} bytes)", side, input.name, input.content.len());
                self.files[side.index()] = Some(input);
                self.result = None;
                self.error = None;
            }
            Action::LoadFailed(side, ticket, source) => {
                if !self.accept(side, ticket) {
                    return self;
                }
                warn!("Failed to load file {}: {}", side, source);
                self.result = None;
                self.error = Some(AppError::FileRead { side, source });
            }
            Action::Compare => match self.compare_files() {
                Ok(comparison) => {
                    self.result = Some(comparison);
                    self.error = None;
                }
                Err(e) => {
                    warn!("Compare failed: {}", e);
                    self.result = None;
                    self.error = Some(e.into());
                }
            },
            Action::DismissError => {
                self.error = None;
            }
            Action::Reset => {
                info!("Reset comparison");
                return Self::default();
            }
        }
        self
    }

    fn compare_files(&self) -> Result<Comparison, ComparisonError> {
        let a = self.file(Side::A).ok_or(ComparisonError::MissingInput(Side::A))?;
        let b = self.file(Side::B).ok_or(ComparisonError::MissingInput(Side::B))?;
        let comparison = differ::compare(&a.content, &b.content);
        info!(
            "Compared {} and {}: {} rows, +{} -{} ~{}",
            a.name,
            b.name,
            comparison.len(),
            comparison.summary.added,
            comparison.summary.removed,
            comparison.summary.changed
        );
        Ok(comparison)
    }

    /// Clear the pending ticket if it matches, reporting whether the reply is current
    fn accept(&mut self, side: Side, ticket: Ticket) -> bool {
        let slot = &mut self.pending[side.index()];
        if *slot == Some(ticket) {
            *slot = None;
            true
        } else {
            debug!("Ignoring stale load reply {} for file {}", ticket, side);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn loaded(state: DiffState, side: Side, ticket: Ticket, content: &str) -> DiffState {
        let name = format!("{}.xml", side);
        state
            .reduce(Action::LoadStarted(side, ticket))
            .reduce(Action::FileLoaded(side, ticket, FileInput::new(name, content)))
    }

    fn read_error() -> FileReadError {
        FileReadError::Io {
            path: "missing.xml".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        }
    }

    #[test]
    fn test_phases() {
        let state = DiffState::default();
        assert_eq!(state.phase(), Phase::Empty);
        assert!(!state.can_compare());

        let state = loaded(state, Side::A, 1, "a");
        assert_eq!(state.phase(), Phase::PartiallySelected);

        let state = loaded(state, Side::B, 2, "b");
        assert_eq!(state.phase(), Phase::BothSelected);
        assert!(state.can_compare());

        let state = state.reduce(Action::Compare);
        assert_eq!(state.phase(), Phase::Compared);
        assert_eq!(state.result().map(|r| r.summary.changed), Some(1));
    }

    #[test]
    fn test_loading_a_file_clears_result() {
        let state = loaded(DiffState::default(), Side::A, 1, "a");
        let state = loaded(state, Side::B, 2, "a").reduce(Action::Compare);
        assert!(state.result().is_some());

        let state = loaded(state, Side::B, 3, "changed");
        assert!(state.result().is_none());
        assert_eq!(state.phase(), Phase::BothSelected);
        assert_eq!(state.file(Side::B).map(|f| f.content.as_str()), Some("changed"));
    }

    #[test]
    fn test_stale_reply_is_ignored() {
        let state = DiffState::default()
            .reduce(Action::LoadStarted(Side::A, 1))
            .reduce(Action::LoadStarted(Side::A, 2));
        assert!(state.is_loading(Side::A));

        let state = state.reduce(Action::FileLoaded(Side::A, 1, FileInput::new("old.xml", "old")));
        assert!(state.file(Side::A).is_none());
        assert!(state.is_loading(Side::A));

        let state = state.reduce(Action::FileLoaded(Side::A, 2, FileInput::new("new.xml", "new")));
        assert_eq!(state.file(Side::A).map(|f| f.name.as_str()), Some("new.xml"));
        assert!(!state.is_loading(Side::A));
    }

    #[test]
    fn test_compare_without_both_files() {
        let state = loaded(DiffState::default(), Side::B, 1, "b").reduce(Action::Compare);
        assert_eq!(state.phase(), Phase::Errored);
        assert!(matches!(
            state.error(),
            Some(AppError::Comparison(ComparisonError::MissingInput(Side::A)))
        ));
        // Selection survives so the user can retry
        assert!(state.file(Side::B).is_some());

        let state = state.reduce(Action::DismissError);
        assert_eq!(state.phase(), Phase::PartiallySelected);
    }

    #[test]
    fn test_read_error_keeps_other_file() {
        let state = loaded(DiffState::default(), Side::A, 1, "a");
        let state = state
            .reduce(Action::LoadStarted(Side::B, 2))
            .reduce(Action::LoadFailed(Side::B, 2, read_error()));

        assert_eq!(state.phase(), Phase::Errored);
        assert!(matches!(
            state.error(),
            Some(AppError::FileRead { side: Side::B, .. })
        ));
        assert!(state.file(Side::A).is_some());
        assert!(state.file(Side::B).is_none());
    }

    #[test]
    fn test_read_error_clears_stale_result() {
        let state = loaded(DiffState::default(), Side::A, 1, "a");
        let state = loaded(state, Side::B, 2, "b").reduce(Action::Compare);
        let state = state
            .reduce(Action::LoadStarted(Side::A, 3))
            .reduce(Action::LoadFailed(Side::A, 3, read_error()));

        assert!(state.result().is_none());
        // The previous selection of the failed side is kept
        assert_eq!(state.file(Side::A).map(|f| f.content.as_str()), Some("a"));
    }

    #[test]
    fn test_successful_load_clears_error() {
        let state = DiffState::default().reduce(Action::Compare);
        assert!(state.error().is_some());

        let state = loaded(state, Side::A, 1, "a");
        assert!(state.error().is_none());
    }

    #[test]
    fn test_two_dropped_files_fill_both_sides() {
        let mut state = DiffState::default();
        let mut targets = Vec::new();
        for ticket in 1..=2 {
            let side = crate::ui::drop_zone::target_side(None, &[None, None], state.occupied());
            targets.push(side);
            state = state.reduce(Action::LoadStarted(side, ticket));
        }

        assert_eq!(targets, vec![Side::A, Side::B]);
        assert!(state.is_loading(Side::A));
        assert!(state.is_loading(Side::B));
        assert_eq!(state.occupied(), [true, true]);
    }

    #[test]
    fn test_reset() {
        let state = loaded(DiffState::default(), Side::A, 1, "a");
        let state = loaded(state, Side::B, 2, "b")
            .reduce(Action::Compare)
            .reduce(Action::LoadStarted(Side::A, 3))
            .reduce(Action::Reset);

        assert_eq!(state.phase(), Phase::Empty);
        assert!(state.file(Side::A).is_none());
        assert!(state.file(Side::B).is_none());
        assert!(state.result().is_none());
        assert!(!state.is_loading(Side::A));
    }
}
