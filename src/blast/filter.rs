use std::time::{Duration, Instant};

use log::debug;

/// Injected metrics sink for the filter; created by the pipeline owner and
/// dropped with it.
pub trait PullObserver {
    fn on_item(&mut self, count: u64, inter_pull: Duration);
}

/// Observer that reports every counted item on the `log` facade.
pub struct LogObserver;

impl PullObserver for LogObserver {
    fn on_item(&mut self, count: u64, inter_pull: Duration) {
        debug!("item {count}: +{inter_pull:?}");
    }
}

/// Counting / latency / cap / predicate decorator over any iterator.
///
/// Every upstream item is counted and timed; items rejected by the predicate
/// never reach the consumer. A nonzero `max_count` terminates the stream
/// once the counter passes it, indistinguishable from natural exhaustion.
pub struct ThroughputFilter<I: Iterator, P> {
    upstream: I,
    predicate: P,
    max_count: u64,
    count: u64,
    total_time: Duration,
    last_pull: Instant,
    observer: Option<Box<dyn PullObserver>>,
    done: bool,
}

fn accept_all<T>(_: &T) -> bool {
    true
}

impl<I: Iterator> ThroughputFilter<I, fn(&I::Item) -> bool> {
    /// Pass-all filter: counts and times items without rejecting any.
    pub fn new(upstream: I, max_count: u64) -> Self {
        Self::with_predicate(upstream, max_count, accept_all::<I::Item>)
    }
}

impl<I, P> ThroughputFilter<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    pub fn with_predicate(upstream: I, max_count: u64, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
            max_count,
            count: 0,
            total_time: Duration::ZERO,
            last_pull: Instant::now(),
            observer: None,
            done: false,
        }
    }

    pub fn with_observer(mut self, observer: Box<dyn PullObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Upstream items pulled so far, rejected ones included.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Accumulated time between successive pulls.
    pub fn total_time(&self) -> Duration {
        self.total_time
    }
}

impl<I, P> Iterator for ThroughputFilter<I, P>
where
    I: Iterator,
    P: FnMut(&I::Item) -> bool,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let item = match self.upstream.next() {
                Some(item) => item,
                None => {
                    self.done = true;
                    return None;
                }
            };
            self.count += 1;
            if self.max_count > 0 && self.count > self.max_count {
                self.done = true;
                return None;
            }
            let now = Instant::now();
            let inter_pull = now.duration_since(self.last_pull);
            self.total_time += inter_pull;
            self.last_pull = now;
            if let Some(observer) = self.observer.as_mut() {
                observer.on_item(self.count, inter_pull);
            }
            if (self.predicate)(&item) {
                return Some(item);
            }
        }
    }
}
