use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use sipwatch_core::{RefreshScheduler, Snapshot, SnapshotSource, StopHandle, StopSignal, stop_pair};

/// Stream snapshots as JSON lines until `count` lines (0 = unlimited), Ctrl-C
/// or a closed stdout.
pub fn run(interval_ms: i64, seed: Option<u64>, count: u64) {
    let config = super::scheduler_config(interval_ms);
    let scheduler = RefreshScheduler::new(config, super::make_generator(seed));

    let (handle, signal) = stop_pair();
    let ctrlc_handle = handle.clone();
    if let Err(e) = ctrlc::set_handler(move || ctrlc_handle.stop()) {
        log::warn!("could not install Ctrl-C handler: {e}");
    }

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            std::process::exit(1);
        }
    };
    let lines = runtime.block_on(stream_lines(scheduler, count, std::io::stdout(), handle, signal));
    log::info!("stream finished after {lines} lines");
}

/// How many lines the stream may still print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct LineBudget {
    limit: u64,
    emitted: u64,
}

impl LineBudget {
    /// `limit == 0` never runs out.
    fn new(limit: u64) -> Self {
        Self { limit, emitted: 0 }
    }

    /// Count one printed line. Returns `true` once the budget is spent.
    fn record(&mut self) -> bool {
        self.emitted += 1;
        self.limit > 0 && self.emitted >= self.limit
    }
}

/// Write the current snapshot, then one line per tick, until the budget is
/// spent, `out` fails or `handle` is stopped. Returns the lines written.
///
/// A budget of one prints the initial snapshot and never starts the timer.
async fn stream_lines<G, W>(
    mut scheduler: RefreshScheduler<G>,
    count: u64,
    mut out: W,
    handle: StopHandle,
    signal: StopSignal,
) -> u64
where
    G: SnapshotSource,
    W: Write + Send + 'static,
{
    let mut budget = LineBudget::new(count);
    if !emit(&mut out, &scheduler.current()) {
        return 0;
    }
    if budget.record() {
        return 1;
    }

    let written = Arc::new(AtomicU64::new(1));
    let counter = Arc::clone(&written);
    scheduler.subscribe(move |snapshot| {
        if handle.is_stopped() {
            return;
        }
        if !emit(&mut out, snapshot) {
            log::info!("stdout closed, stopping stream");
            handle.stop();
            return;
        }
        counter.fetch_add(1, Ordering::SeqCst);
        if budget.record() {
            handle.stop();
        }
    });

    scheduler.run(signal).await;
    written.load(Ordering::SeqCst)
}

/// Write one JSON line. Returns `false` once the output is gone (broken pipe).
fn emit(out: &mut impl Write, snapshot: &Snapshot) -> bool {
    let line = match serde_json::to_string(snapshot) {
        Ok(line) => line,
        Err(e) => {
            log::error!("failed to serialize snapshot {}: {e}", snapshot.tick);
            return false;
        }
    };
    writeln!(out, "{line}").and_then(|()| out.flush()).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sipwatch_core::{DefaultGenerator, SchedulerConfig};
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    const INTERVAL_MS: i64 = 1000;

    fn scheduler() -> RefreshScheduler {
        let config = SchedulerConfig::from_millis(INTERVAL_MS).unwrap();
        RefreshScheduler::new(config, DefaultGenerator::seeded(21))
    }

    /// In-memory stdout shared with the test.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn ticks(&self) -> Vec<u64> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str::<Snapshot>(l).unwrap().tick)
                .collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts `lines` flushed lines, then reports a broken pipe.
    struct ClosesAfter {
        lines: usize,
    }

    impl Write for ClosesAfter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.lines == 0 {
                return Err(io::Error::from(io::ErrorKind::BrokenPipe));
            }
            Ok(buf.len())
        }
        fn flush(&mut self) -> io::Result<()> {
            self.lines = self.lines.saturating_sub(1);
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // LineBudget
    // -----------------------------------------------------------------------

    #[test]
    fn budget_of_three_runs_out_on_third_line() {
        let mut b = LineBudget::new(3);
        assert!(!b.record());
        assert!(!b.record());
        assert!(b.record());
    }

    #[test]
    fn budget_of_one_runs_out_immediately() {
        assert!(LineBudget::new(1).record());
    }

    #[test]
    fn zero_budget_is_unlimited() {
        let mut b = LineBudget::new(0);
        for _ in 0..10_000 {
            assert!(!b.record());
        }
    }

    // -----------------------------------------------------------------------
    // stream_lines
    // -----------------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn count_one_prints_only_the_initial_snapshot() {
        let buf = SharedBuf::default();
        let (handle, signal) = stop_pair();
        let start = tokio::time::Instant::now();

        let lines = stream_lines(scheduler(), 1, buf.clone(), handle, signal).await;

        assert_eq!(lines, 1);
        assert_eq!(buf.ticks(), vec![0]);
        assert_eq!(tokio::time::Instant::now(), start);
    }

    #[tokio::test(start_paused = true)]
    async fn count_three_prints_initial_plus_two_ticks() {
        let buf = SharedBuf::default();
        let (handle, signal) = stop_pair();
        let start = tokio::time::Instant::now();

        let lines = stream_lines(scheduler(), 3, buf.clone(), handle, signal).await;

        assert_eq!(lines, 3);
        assert_eq!(buf.ticks(), vec![0, 1, 2]);
        assert_eq!(
            tokio::time::Instant::now() - start,
            Duration::from_millis(2 * INTERVAL_MS as u64)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn count_zero_runs_until_stopped() {
        let buf = SharedBuf::default();
        let (handle, signal) = stop_pair();

        let stopper = handle.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(4 * INTERVAL_MS as u64 + 500)).await;
            stopper.stop();
        });

        let lines = stream_lines(scheduler(), 0, buf.clone(), handle, signal).await;

        assert_eq!(lines, 5);
        assert_eq!(buf.ticks(), vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test(start_paused = true)]
    async fn broken_pipe_stops_the_stream() {
        let (handle, signal) = stop_pair();
        let stopped = handle.clone();

        let lines = stream_lines(scheduler(), 0, ClosesAfter { lines: 2 }, handle, signal).await;

        assert_eq!(lines, 2);
        assert!(stopped.is_stopped());
    }

    #[tokio::test(start_paused = true)]
    async fn closed_output_before_first_line_writes_nothing() {
        let (handle, signal) = stop_pair();
        let lines = stream_lines(scheduler(), 0, ClosesAfter { lines: 0 }, handle, signal).await;
        assert_eq!(lines, 0);
    }
}
