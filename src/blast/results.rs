use std::time::{Duration, Instant};

use crate::io::SourceResult;

use super::engine::{AlignmentEngine, BlastOutcome, Blaster};
use super::sequence::Sequence;

/// Pairs each upstream sequence with one engine call, accumulating the
/// wall-clock time spent inside the engine. One call in flight at a time.
pub struct BlastResultStream<I, E: AlignmentEngine> {
    blaster: Blaster<E>,
    upstream: I,
    total_time: Duration,
}

impl<I, E: AlignmentEngine> BlastResultStream<I, E> {
    pub fn new(blaster: Blaster<E>, upstream: I) -> Self {
        Self {
            blaster,
            upstream,
            total_time: Duration::ZERO,
        }
    }

    /// Accumulated engine time. Zero before the first pull, non-decreasing
    /// afterwards.
    pub fn total_time(&self) -> Duration {
        self.total_time
    }
}

impl<I, E> Iterator for BlastResultStream<I, E>
where
    I: Iterator<Item = SourceResult<Sequence>>,
    E: AlignmentEngine,
{
    type Item = SourceResult<BlastOutcome<E::Report>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.upstream.next()? {
            Ok(subject) => {
                let start = Instant::now();
                let outcome = self.blaster.blast(subject);
                self.total_time += start.elapsed();
                Some(Ok(outcome))
            }
            Err(err) => Some(Err(err)),
        }
    }
}
