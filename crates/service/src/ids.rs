use std::sync::atomic::{AtomicU64, Ordering};

use chrono::Utc;
use models::RecordId;

type Clock = Box<dyn Fn() -> u64 + Send + Sync>;

/// Issues record identifiers as decimal millisecond timestamps.
///
/// Ids are strictly increasing within a process: when the clock has not
/// advanced (or went backwards) the next id is `last + 1`. Ids seen during
/// hydration are fed through [`IdGenerator::observe`] so a restored
/// collection never collides with a freshly issued one.
///
/// Once the floor reaches `u64::MAX` there is no larger number left, so ids
/// switch to the non-numeric form `{u64::MAX}-{seq}` with `seq` counting up.
pub struct IdGenerator {
    last: AtomicU64,
    overflow: AtomicU64,
    clock: Clock,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::with_clock(|| Utc::now().timestamp_millis().max(0) as u64)
    }

    pub fn with_clock(clock: impl Fn() -> u64 + Send + Sync + 'static) -> Self {
        Self { last: AtomicU64::new(0), overflow: AtomicU64::new(0), clock: Box::new(clock) }
    }

    pub fn next_id(&self) -> RecordId {
        let now = (self.clock)();
        let mut prev = self.last.load(Ordering::Acquire);
        loop {
            let Some(bumped) = prev.checked_add(1) else {
                return self.next_overflow_id();
            };
            let candidate = now.max(bumped);
            match self.last.compare_exchange_weak(prev, candidate, Ordering::AcqRel, Ordering::Acquire) {
                Ok(_) => return RecordId::from(candidate),
                Err(actual) => prev = actual,
            }
        }
    }

    fn next_overflow_id(&self) -> RecordId {
        let seq = self.overflow.fetch_add(1, Ordering::AcqRel).wrapping_add(1);
        RecordId::new(format!("{}-{}", u64::MAX, seq))
    }

    /// Raise the floor so later ids sort after `id`. Other non-numeric ids are ignored.
    pub fn observe(&self, id: &RecordId) {
        if let Some(value) = id.as_u64() {
            self.last.fetch_max(value, Ordering::AcqRel);
        } else if let Some(seq) = overflow_seq(id.as_str()) {
            self.last.store(u64::MAX, Ordering::Release);
            self.overflow.fetch_max(seq, Ordering::AcqRel);
        }
    }
}

fn overflow_seq(id: &str) -> Option<u64> {
    let (head, seq) = id.split_once('-')?;
    if head.parse::<u64>().ok()? != u64::MAX {
        return None;
    }
    seq.parse().ok()
}

impl Default for IdGenerator {
    fn default() -> Self { Self::new() }
}
