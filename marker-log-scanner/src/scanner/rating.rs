//! Rating timing: three consecutive rating phases with durations and counts
//!
//! The phase machine advances `Idle → Good → Bad → Average → Done`, one step
//! per phase marker. Any other marker/phase combination leaves the phase
//! unchanged.

use super::{FileScan, ScanVariant};
use crate::config::RatingConfig;
use crate::resolver::FileSet;
use crate::timestamp::{elapsed, require_timestamp};
use crate::types::{FileLabel, FileResult, LogLine, Result, ScanError, ScanFlow, Timestamp};
use std::fmt;

/// Phase of the rating task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingPhase {
    /// Task not started yet
    Idle,
    /// Rating the good example
    Good,
    /// Rating the bad example
    Bad,
    /// Rating the average example
    Average,
    /// All three ratings completed
    Done,
}

impl fmt::Display for RatingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RatingPhase::Idle => write!(f, "Idle"),
            RatingPhase::Good => write!(f, "Good"),
            RatingPhase::Bad => write!(f, "Bad"),
            RatingPhase::Average => write!(f, "Average"),
            RatingPhase::Done => write!(f, "Done"),
        }
    }
}

/// Marker events that drive the phase machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PhaseEvent {
    Started,
    GoodDone,
    BadDone,
    AverageDone,
}

/// Legal transitions: (from, event, to)
const TRANSITIONS: [(RatingPhase, PhaseEvent, RatingPhase); 4] = [
    (RatingPhase::Idle, PhaseEvent::Started, RatingPhase::Good),
    (RatingPhase::Good, PhaseEvent::GoodDone, RatingPhase::Bad),
    (RatingPhase::Bad, PhaseEvent::BadDone, RatingPhase::Average),
    (RatingPhase::Average, PhaseEvent::AverageDone, RatingPhase::Done),
];

impl RatingPhase {
    /// Phase reached from `self` on `event`, if the transition is legal
    fn after(self, event: PhaseEvent) -> Option<RatingPhase> {
        TRANSITIONS
            .iter()
            .find(|(from, on, _)| *from == self && *on == event)
            .map(|(_, _, to)| *to)
    }

    /// Index into the per-phase accumulators for the three counted phases
    fn slot(self) -> Option<usize> {
        match self {
            RatingPhase::Good => Some(0),
            RatingPhase::Bad => Some(1),
            RatingPhase::Average => Some(2),
            RatingPhase::Idle | RatingPhase::Done => None,
        }
    }
}

/// Rating timing variant
#[derive(Debug, Clone)]
pub struct RatingScan {
    config: RatingConfig,
}

impl RatingScan {
    pub fn new(config: &RatingConfig) -> Result<Self> {
        let markers = [
            &config.start_marker,
            &config.good_done_marker,
            &config.bad_done_marker,
            &config.average_done_marker,
            &config.final_marker,
        ];
        if markers.iter().any(|m| m.is_empty()) || config.count_markers.iter().any(|m| m.is_empty()) {
            return Err(ScanError::InvalidConfig(
                "rating markers must not be empty".to_string(),
            ));
        }
        Ok(Self {
            config: config.clone(),
        })
    }

    pub fn config(&self) -> &RatingConfig {
        &self.config
    }

    /// First phase marker present on the line, in transition order
    fn event(&self, line: &LogLine<'_>) -> Option<PhaseEvent> {
        let config = &self.config;
        [
            (&config.start_marker, PhaseEvent::Started),
            (&config.good_done_marker, PhaseEvent::GoodDone),
            (&config.bad_done_marker, PhaseEvent::BadDone),
            (&config.average_done_marker, PhaseEvent::AverageDone),
        ]
        .into_iter()
        .find(|(marker, _)| line.contains(marker))
        .map(|(_, event)| event)
    }
}

impl ScanVariant for RatingScan {
    fn name(&self) -> &'static str {
        "rating"
    }

    fn header(&self) -> Vec<String> {
        [
            "File",
            "GoodRatingTime",
            "GoodRatingFails",
            "BadRatingTime",
            "BadRatingFails",
            "AverageRatingTime",
            "AverageRatingFails",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    fn files(&self) -> &FileSet {
        &self.config.files
    }

    fn label_chars(&self) -> usize {
        self.config.label_chars
    }

    fn start_file(&self, label: FileLabel) -> Box<dyn FileScan + '_> {
        Box::new(RatingFile {
            scan: self,
            label,
            phase: RatingPhase::Idle,
            reference: 0.0,
            durations: [0.0; 3],
            counts: [0; 3],
            rows: Vec::new(),
        })
    }
}

struct RatingFile<'a> {
    scan: &'a RatingScan,
    label: FileLabel,
    phase: RatingPhase,
    /// Timestamp of the last phase transition
    reference: Timestamp,
    durations: [f64; 3],
    counts: [i64; 3],
    rows: Vec<FileResult>,
}

impl RatingFile<'_> {
    fn advance(&mut self, event: PhaseEvent, line: &LogLine<'_>) -> Result<()> {
        let Some(next) = self.phase.after(event) else {
            log::debug!(
                "{}: ignoring {:?} in phase {} on line {}",
                self.label,
                event,
                self.phase,
                line.number
            );
            return Ok(());
        };

        let now = require_timestamp(line)?;
        if let Some(slot) = self.phase.slot() {
            self.durations[slot] = elapsed(self.reference, now);
        }
        log::debug!("{}: phase {} -> {} at {}", self.label, self.phase, next, now);

        self.reference = now;
        self.phase = next;
        Ok(())
    }
}

impl FileScan for RatingFile<'_> {
    fn on_line(&mut self, line: &LogLine<'_>) -> Result<ScanFlow> {
        let scan = self.scan;

        if let Some(event) = scan.event(line) {
            self.advance(event, line)?;
        }

        if scan.config.count_markers.iter().any(|m| line.contains(m)) {
            if let Some(slot) = self.phase.slot() {
                self.counts[slot] += 1;
            }
        }

        if line.contains(&scan.config.final_marker) {
            // Each phase's count includes the line that opened the phase
            self.rows.push(FileResult::Rating {
                label: self.label.clone(),
                good_time: self.durations[0],
                good_fails: self.counts[0] - 1,
                bad_time: self.durations[1],
                bad_fails: self.counts[1] - 1,
                average_time: self.durations[2],
                average_fails: self.counts[2] - 1,
                incomplete: self.phase != RatingPhase::Done,
            });
            return Ok(ScanFlow::Stop);
        }

        Ok(ScanFlow::Continue)
    }

    fn finish(&mut self) -> Vec<FileResult> {
        if self.rows.is_empty() {
            log::debug!("{}: rating task never completed, no row emitted", self.label);
        }
        std::mem::take(&mut self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::scan_text;
    use std::path::Path;

    fn run(text: &str) -> Vec<FileResult> {
        let variant = RatingScan::new(&RatingConfig::default()).unwrap();
        scan_text(text, FileLabel::new(1, Path::new("Pointing_Rating.log"), 45), &variant).unwrap()
    }

    const FULL_TASK: &str = "\
[10.0]: [Rating]Rating Task Started
[11.0]: [Rating] selected 3
[12.0]: [Pointing] selected 4
[14.0]: [Rating]Completed Good rating
[15.0]: [Rating] selected 1
[17.5]: [Rating]Completed bad rating
[18.0]: [Rating] selected 2
[19.0]: [Rating] selected 3
[20.0]: [Rating] selected 2
[21.0]: [Task]Completed average rating
";

    #[test]
    fn test_transition_table() {
        assert_eq!(RatingPhase::Idle.after(PhaseEvent::Started), Some(RatingPhase::Good));
        assert_eq!(RatingPhase::Good.after(PhaseEvent::GoodDone), Some(RatingPhase::Bad));
        assert_eq!(RatingPhase::Bad.after(PhaseEvent::BadDone), Some(RatingPhase::Average));
        assert_eq!(RatingPhase::Average.after(PhaseEvent::AverageDone), Some(RatingPhase::Done));
        assert_eq!(RatingPhase::Idle.after(PhaseEvent::BadDone), None);
        assert_eq!(RatingPhase::Good.after(PhaseEvent::Started), None);
        assert_eq!(RatingPhase::Done.after(PhaseEvent::AverageDone), None);
    }

    #[test]
    fn test_full_task() {
        let rows = run(FULL_TASK);
        assert_eq!(rows.len(), 1);
        match &rows[0] {
            FileResult::Rating {
                good_time,
                good_fails,
                bad_time,
                bad_fails,
                average_time,
                average_fails,
                incomplete,
                ..
            } => {
                assert_eq!(*good_time, 4.0);
                assert_eq!(*good_fails, 2);
                assert_eq!(*bad_time, 3.5);
                assert_eq!(*bad_fails, 1);
                assert_eq!(*average_time, 3.5);
                assert_eq!(*average_fails, 3);
                assert!(!*incomplete);
            }
            other => panic!("unexpected row: {other:?}"),
        }
    }

    #[test]
    fn test_missing_final_marker_no_row() {
        let text = FULL_TASK.replace("[Task]Completed average rating", "[Rating]Completed average rating");
        assert!(run(&text).is_empty());
    }

    #[test]
    fn test_out_of_order_marker_is_ignored() {
        let text = "\
[1.0]: [Rating]Completed bad rating
[2.0]: [Rating]Rating Task Started
[3.0]: [Rating]Completed Good rating
[4.0]: [Rating]Completed bad rating
[6.0]: [Task]Completed average rating
";
        match &run(text)[0] {
            FileResult::Rating { good_time, bad_time, average_time, good_fails, incomplete, .. } => {
                assert_eq!(*good_time, 1.0);
                assert_eq!(*bad_time, 1.0);
                assert_eq!(*average_time, 2.0);
                assert_eq!(*good_fails, 0);
                assert!(!*incomplete);
            }
            other => panic!("unexpected row: {other:?}"),
        }
    }

    #[test]
    fn test_final_marker_before_phases_complete() {
        let text = "[1.0]: [Rating]Rating Task Started\n[2.0]: [Task]Completed everything\n";
        let config = RatingConfig {
            final_marker: "[Task]Completed everything".to_string(),
            ..RatingConfig::default()
        };
        let variant = RatingScan::new(&config).unwrap();
        let rows =
            scan_text(text, FileLabel::new(1, Path::new("r.log"), 45), &variant).unwrap();
        match &rows[0] {
            FileResult::Rating { good_time, good_fails, bad_fails, incomplete, .. } => {
                assert_eq!(*good_time, 0.0);
                assert_eq!(*good_fails, 0);
                assert_eq!(*bad_fails, -1);
                assert!(*incomplete);
            }
            other => panic!("unexpected row: {other:?}"),
        }
    }
}
