use chrono::{DateTime, Duration, Utc};

/// Candidate appointment start times within a single availability window.
///
/// Steps from the window start by the slot length while the whole slot still
/// fits before the window end, so a trailing partial slot is dropped. The
/// sequence is lazy and restartable: call [`SlotSequence::iter`] again to walk
/// it from the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotSequence {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    slot_length: Duration,
}

impl SlotSequence {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, slot_length_minutes: i64) -> Self {
        Self {
            start,
            end,
            slot_length: Duration::minutes(slot_length_minutes),
        }
    }

    pub fn iter(&self) -> SlotIter {
        SlotIter {
            next: self.start,
            end: self.end,
            slot_length: self.slot_length,
        }
    }
}

impl IntoIterator for &SlotSequence {
    type Item = DateTime<Utc>;
    type IntoIter = SlotIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub struct SlotIter {
    next: DateTime<Utc>,
    end: DateTime<Utc>,
    slot_length: Duration,
}

impl Iterator for SlotIter {
    type Item = DateTime<Utc>;

    fn next(&mut self) -> Option<DateTime<Utc>> {
        if self.slot_length <= Duration::zero() {
            return None;
        }
        if self.next + self.slot_length > self.end {
            return None;
        }

        let slot = self.next;
        self.next += self.slot_length;
        Some(slot)
    }
}
