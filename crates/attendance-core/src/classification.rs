//! Attendance classification against a reference duration.
//!
//! Rules are evaluated as an ordered list where a later matching rule
//! overrides an earlier one, so the zero-duration rule always has the final
//! word regardless of the threshold.

use crate::formatting::round_to;
use crate::models::{AttendanceStatus, ClassifiedParticipant, ParticipantRecord};

/// Default "full attendance" threshold, in percent of the reference duration.
pub const DEFAULT_THRESHOLD_PERCENT: u8 = 75;

/// Reference used when neither an official nor an observed duration exists.
pub const FALLBACK_REFERENCE_MINUTES: f64 = 1.0;

// ── Reference duration ────────────────────────────────────────────────────────

/// Pick the denominator for attendance percentages.
///
/// The official meeting duration wins when known and non-zero, then the
/// longest observed participant duration, then `1`.
pub fn reference_duration(official: Option<f64>, records: &[ParticipantRecord]) -> f64 {
    if let Some(d) = official.filter(|d| d.is_finite() && *d > 0.0) {
        return d;
    }
    let observed_max = records
        .iter()
        .map(|r| r.duration_minutes)
        .fold(0.0_f64, f64::max);
    if observed_max > 0.0 {
        observed_max
    } else {
        FALLBACK_REFERENCE_MINUTES
    }
}

// ── Rules ─────────────────────────────────────────────────────────────────────

/// Facts a rule can look at for one participant.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput {
    pub duration_minutes: f64,
    pub attendance_percent: f64,
    pub threshold_percent: f64,
}

/// One step of the classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationRule {
    /// Percent-based bucketing: full at or above the threshold, else partial.
    PercentThreshold,
    /// Zero minutes means the participant did not attend.
    ZeroDuration,
}

impl ClassificationRule {
    /// Status this rule assigns, or `None` when it leaves the row untouched.
    pub fn apply(&self, input: &RuleInput) -> Option<AttendanceStatus> {
        match self {
            ClassificationRule::PercentThreshold => {
                if input.attendance_percent >= input.threshold_percent {
                    Some(AttendanceStatus::FullAttended)
                } else {
                    Some(AttendanceStatus::PartialAttended)
                }
            }
            ClassificationRule::ZeroDuration => {
                (input.duration_minutes == 0.0).then_some(AttendanceStatus::DidNotAttend)
            }
        }
    }
}

/// Rule order applied by [`Classifier`]; later entries override earlier ones.
pub const DEFAULT_RULES: [ClassificationRule; 2] = [
    ClassificationRule::PercentThreshold,
    ClassificationRule::ZeroDuration,
];

// ── Classifier ────────────────────────────────────────────────────────────────

/// Buckets participants by attendance percentage.
#[derive(Debug, Clone)]
pub struct Classifier {
    reference_minutes: f64,
    threshold_percent: u8,
    rules: Vec<ClassificationRule>,
}

impl Classifier {
    /// `threshold_percent` values above 100 are clamped to 100.
    pub fn new(reference_minutes: f64, threshold_percent: u8) -> Self {
        let reference_minutes = if reference_minutes.is_finite() && reference_minutes > 0.0 {
            reference_minutes
        } else {
            FALLBACK_REFERENCE_MINUTES
        };
        Self {
            reference_minutes,
            threshold_percent: threshold_percent.min(100),
            rules: DEFAULT_RULES.to_vec(),
        }
    }

    pub fn reference_minutes(&self) -> f64 {
        self.reference_minutes
    }

    pub fn threshold_percent(&self) -> u8 {
        self.threshold_percent
    }

    /// `round(duration / reference * 100, 2)`.
    pub fn attendance_percent(&self, duration_minutes: f64) -> f64 {
        round_to(duration_minutes / self.reference_minutes * 100.0, 2)
    }

    /// Classify a single record.
    pub fn classify(&self, record: &ParticipantRecord) -> ClassifiedParticipant {
        let attendance_percent = self.attendance_percent(record.duration_minutes);
        let input = RuleInput {
            duration_minutes: record.duration_minutes,
            attendance_percent,
            threshold_percent: f64::from(self.threshold_percent),
        };

        let mut status = AttendanceStatus::PartialAttended;
        for rule in &self.rules {
            if let Some(s) = rule.apply(&input) {
                status = s;
            }
        }

        ClassifiedParticipant {
            record: record.clone(),
            attendance_percent,
            status,
        }
    }

    /// Classify every record, preserving order.
    pub fn classify_all(&self, records: &[ParticipantRecord]) -> Vec<ClassifiedParticipant> {
        records.iter().map(|r| self.classify(r)).collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(name: &str, minutes: f64) -> ParticipantRecord {
        ParticipantRecord::new(name, "", minutes)
    }

    // ── reference_duration ───────────────────────────────────────────────────

    #[test]
    fn test_reference_prefers_official_duration() {
        let records = vec![rec("a", 90.0)];
        assert_eq!(reference_duration(Some(60.0), &records), 60.0);
    }

    #[test]
    fn test_reference_falls_back_to_observed_max() {
        let records = vec![rec("a", 30.0), rec("b", 42.0), rec("c", 10.0)];
        assert_eq!(reference_duration(None, &records), 42.0);
        assert_eq!(reference_duration(Some(0.0), &records), 42.0);
    }

    #[test]
    fn test_reference_falls_back_to_one() {
        assert_eq!(reference_duration(None, &[]), 1.0);
        assert_eq!(reference_duration(None, &[rec("a", 0.0)]), 1.0);
    }

    // ── Classifier ───────────────────────────────────────────────────────────

    #[test]
    fn test_classify_full_at_exact_threshold() {
        let c = Classifier::new(60.0, 75);
        let p = c.classify(&rec("Bob", 45.0));
        assert_eq!(p.attendance_percent, 75.0);
        assert_eq!(p.status, AttendanceStatus::FullAttended);
    }

    #[test]
    fn test_classify_partial_below_threshold() {
        let c = Classifier::new(60.0, 75);
        let p = c.classify(&rec("Dan", 44.0));
        assert_eq!(p.attendance_percent, 73.33);
        assert_eq!(p.status, AttendanceStatus::PartialAttended);
    }

    #[test]
    fn test_zero_duration_is_did_not_attend_for_every_threshold() {
        for threshold in [0u8, 1, 50, 75, 100] {
            let c = Classifier::new(60.0, threshold);
            let p = c.classify(&rec("Carol", 0.0));
            assert_eq!(
                p.status,
                AttendanceStatus::DidNotAttend,
                "threshold {threshold} must not override zero duration"
            );
            assert_eq!(p.attendance_percent, 0.0);
        }
    }

    #[test]
    fn test_zero_threshold_marks_positive_duration_full() {
        let c = Classifier::new(60.0, 0);
        let p = c.classify(&rec("Eve", 0.5));
        assert_eq!(p.status, AttendanceStatus::FullAttended);
    }

    #[test]
    fn test_full_iff_percent_at_or_above_threshold() {
        let c = Classifier::new(80.0, 60);
        for minutes in [1.0, 10.0, 47.0, 48.0, 49.0, 80.0, 120.0] {
            let p = c.classify(&rec("x", minutes));
            assert_eq!(
                p.status == AttendanceStatus::FullAttended,
                p.attendance_percent >= 60.0,
                "minutes {minutes} → {}%",
                p.attendance_percent
            );
        }
    }

    #[test]
    fn test_percent_can_exceed_hundred() {
        let c = Classifier::new(30.0, 75);
        let p = c.classify(&rec("Late leaver", 45.0));
        assert_eq!(p.attendance_percent, 150.0);
        assert_eq!(p.status, AttendanceStatus::FullAttended);
    }

    #[test]
    fn test_percent_midpoint_rounds_to_even() {
        let c = Classifier::new(800.0, 75);
        assert_eq!(c.classify(&rec("One minute", 1.0)).attendance_percent, 0.12);
        let c = Classifier::new(8.0, 75);
        assert_eq!(c.classify(&rec("Blip", 0.01)).attendance_percent, 0.12);
        let c = Classifier::new(800.0, 75);
        assert_eq!(c.classify(&rec("Three minutes", 3.0)).attendance_percent, 0.38);
    }

    #[test]
    fn test_threshold_clamped_and_reference_sanitised() {
        let c = Classifier::new(0.0, 250);
        assert_eq!(c.threshold_percent(), 100);
        assert_eq!(c.reference_minutes(), 1.0);
    }

    #[test]
    fn test_classify_all_preserves_order() {
        let c = Classifier::new(10.0, 50);
        let out = c.classify_all(&[rec("a", 10.0), rec("b", 0.0), rec("c", 2.0)]);
        let statuses: Vec<AttendanceStatus> = out.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                AttendanceStatus::FullAttended,
                AttendanceStatus::DidNotAttend,
                AttendanceStatus::PartialAttended,
            ]
        );
    }

    // ── ClassificationRule ───────────────────────────────────────────────────

    #[test]
    fn test_zero_duration_rule_ignores_positive_rows() {
        let input = RuleInput {
            duration_minutes: 5.0,
            attendance_percent: 10.0,
            threshold_percent: 75.0,
        };
        assert_eq!(ClassificationRule::ZeroDuration.apply(&input), None);
        assert_eq!(
            ClassificationRule::PercentThreshold.apply(&input),
            Some(AttendanceStatus::PartialAttended)
        );
    }
}
