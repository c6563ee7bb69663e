//! Per-participant aggregation.
//!
//! Collapses repeated join/leave rows into one row per identity and computes
//! the attendance summary shown on the dashboard and written to the export.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, warn};

use attendance_core::models::{
    AttendanceStatus, ClassifiedParticipant, ExportRow, IdentityKey, ReportWarning,
};
use attendance_core::stats;

// ── StatusCounts ──────────────────────────────────────────────────────────────

/// Number of unique participants per attendance status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub full_attended: usize,
    pub partial_attended: usize,
    pub did_not_attend: usize,
}

impl StatusCounts {
    /// Add one participant with `status`.
    pub fn add(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::FullAttended => self.full_attended += 1,
            AttendanceStatus::PartialAttended => self.partial_attended += 1,
            AttendanceStatus::DidNotAttend => self.did_not_attend += 1,
        }
    }

    /// Count for `status`, zero when nobody has it.
    pub fn get(&self, status: AttendanceStatus) -> usize {
        match status {
            AttendanceStatus::FullAttended => self.full_attended,
            AttendanceStatus::PartialAttended => self.partial_attended,
            AttendanceStatus::DidNotAttend => self.did_not_attend,
        }
    }

    pub fn total(&self) -> usize {
        self.full_attended + self.partial_attended + self.did_not_attend
    }

    /// `(status, count)` pairs for statuses with at least one member.
    pub fn non_zero(&self) -> Vec<(AttendanceStatus, usize)> {
        AttendanceStatus::ALL
            .iter()
            .map(|s| (*s, self.get(*s)))
            .filter(|(_, n)| *n > 0)
            .collect()
    }
}

// ── AttendanceSummary ─────────────────────────────────────────────────────────

/// Deduplicated participants and their statistics.
#[derive(Debug, Clone, Serialize)]
pub struct AttendanceSummary {
    pub identity_key: IdentityKey,
    /// One row per identity, first occurrence kept, in input order.
    pub participants: Vec<ClassifiedParticipant>,
    pub total_unique: usize,
    pub status_counts: StatusCounts,
    pub mean_duration: f64,
    pub median_duration: f64,
    pub warnings: Vec<ReportWarning>,
}

impl AttendanceSummary {
    /// Rows restricted to the exported columns.
    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.participants.iter().map(ExportRow::from).collect()
    }

    /// Deduplicated durations, in participant order.
    pub fn durations(&self) -> Vec<f64> {
        self.participants
            .iter()
            .map(|p| p.record.duration_minutes)
            .collect()
    }
}

// ── AttendanceAggregator ──────────────────────────────────────────────────────

/// Stateless helper that reduces classified rows to one per identity.
pub struct AttendanceAggregator;

impl AttendanceAggregator {
    /// Pick the identity key: e-mail when the column exists and holds at least
    /// one non-blank value, otherwise name.
    ///
    /// A present but entirely blank e-mail column yields a warning.
    pub fn identity_key(
        rows: &[ClassifiedParticipant],
        has_email_column: bool,
    ) -> (IdentityKey, Option<ReportWarning>) {
        if !has_email_column {
            return (IdentityKey::Name, None);
        }
        let any_email = rows
            .iter()
            .any(|p| !p.record.user_email.trim().is_empty());
        if any_email {
            (IdentityKey::UserEmail, None)
        } else {
            (IdentityKey::Name, Some(ReportWarning::EmptyEmailColumn))
        }
    }

    /// Keep the first row for every distinct key value, preserving order.
    pub fn deduplicate(
        rows: &[ClassifiedParticipant],
        key: IdentityKey,
    ) -> Vec<ClassifiedParticipant> {
        let mut seen: HashSet<&str> = HashSet::new();
        rows.iter()
            .filter(|p| seen.insert(key.value_of(&p.record)))
            .cloned()
            .collect()
    }

    pub fn count_statuses(rows: &[ClassifiedParticipant]) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for p in rows {
            counts.add(p.status);
        }
        counts
    }

    /// Deduplicate `rows` and compute counts, mean and median duration.
    pub fn summarize(rows: &[ClassifiedParticipant], has_email_column: bool) -> AttendanceSummary {
        let (identity_key, warning) = Self::identity_key(rows, has_email_column);
        if let Some(ref w) = warning {
            warn!("{}", w);
        }

        let participants = Self::deduplicate(rows, identity_key);
        let durations: Vec<f64> = participants
            .iter()
            .map(|p| p.record.duration_minutes)
            .collect();

        debug!(
            "Deduplicated {} rows to {} participants by {:?}",
            rows.len(),
            participants.len(),
            identity_key
        );

        AttendanceSummary {
            identity_key,
            total_unique: participants.len(),
            status_counts: Self::count_statuses(&participants),
            mean_duration: stats::mean(&durations),
            median_duration: stats::median(&durations),
            participants,
            warnings: warning.into_iter().collect(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
