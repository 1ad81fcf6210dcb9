//! Patient board: status buckets, counts and filters over a study list.

use std::{fmt, str::FromStr};

use super::StudyView;

/// Display bucket for a status name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    Completed,
    InProgress,
    Partial,
    Pending,
}

impl StatusKind {
    /// Buckets a status name. Spanish aliases are accepted and anything
    /// unrecognised counts as pending.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "COMPLETED" | "COMPLETADO" => StatusKind::Completed,
            "IN_PROGRESS" | "EN_PROCESO" | "INPROGRESS" => StatusKind::InProgress,
            "PARTIAL" | "PARCIAL" => StatusKind::Partial,
            _ => StatusKind::Pending,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusKind::Completed => "completed",
            StatusKind::InProgress => "in-progress",
            StatusKind::Partial => "partial",
            StatusKind::Pending => "pending",
        }
    }
}

impl fmt::Display for StatusKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Board filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BoardFilter {
    #[default]
    All,
    /// Everything not completed.
    Open,
    Kind(StatusKind),
}

impl BoardFilter {
    pub fn matches(&self, kind: StatusKind) -> bool {
        match self {
            BoardFilter::All => true,
            BoardFilter::Open => kind != StatusKind::Completed,
            BoardFilter::Kind(k) => *k == kind,
        }
    }
}

impl FromStr for BoardFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(BoardFilter::All),
            "open" => Ok(BoardFilter::Open),
            "completed" => Ok(BoardFilter::Kind(StatusKind::Completed)),
            "in-progress" => Ok(BoardFilter::Kind(StatusKind::InProgress)),
            "partial" => Ok(BoardFilter::Kind(StatusKind::Partial)),
            "pending" => Ok(BoardFilter::Kind(StatusKind::Pending)),
            other => Err(format!(
                "unknown filter '{other}' (expected all, open, completed, in-progress, partial or pending)"
            )),
        }
    }
}

/// Study counts per bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoardStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub partial: usize,
    pub pending: usize,
}

impl BoardStats {
    pub fn from_studies(studies: &[StudyView]) -> Self {
        studies.iter().fold(Self::default(), |mut stats, study| {
            stats.total += 1;
            match StatusKind::from_name(&study.status.name) {
                StatusKind::Completed => stats.completed += 1,
                StatusKind::InProgress => stats.in_progress += 1,
                StatusKind::Partial => stats.partial += 1,
                StatusKind::Pending => stats.pending += 1,
            }
            stats
        })
    }
}

/// Studies matching `filter`, preserving order.
pub fn filter_studies(studies: &[StudyView], filter: BoardFilter) -> Vec<&StudyView> {
    studies
        .iter()
        .filter(|s| filter.matches(StatusKind::from_name(&s.status.name)))
        .collect()
}
