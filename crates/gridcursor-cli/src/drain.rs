use std::{
    io::Write,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::anyhow;
use gridcursor::{cursor::CoordinateCursor, grid::Coordinate, stream::CoordinateStream};
use tokio::{sync::mpsc, task::JoinHandle};
use tokio_util::sync::CancellationToken;

use crate::config::RunConfig;

/// Lines buffered between reader tasks and the stdout writer.
const WRITER_BUFFER: usize = 1024;

/// What each consumer received.
#[derive(Debug, Default)]
pub struct Summary {
    pub per_worker: Vec<u64>,
}

impl Summary {
    pub fn delivered(&self) -> u64 {
        self.per_worker.iter().sum()
    }
}

/// Shared cap on deliveries across all consumers.
#[derive(Debug)]
struct Budget {
    limit: Option<u64>,
    taken: AtomicU64,
}

impl Budget {
    const fn new(limit: Option<u64>) -> Self {
        Self {
            limit,
            taken: AtomicU64::new(0),
        }
    }

    /// Reserves one delivery, or returns `false` once the limit is spent.
    fn claim(&self) -> bool {
        self.limit
            .is_none_or(|limit| self.taken.fetch_add(1, Ordering::Relaxed) < limit)
    }
}

/// Returns `false` when stdout is gone (e.g. a closed pipe).
fn emit(out: &mut impl Write, worker: usize, coordinate: Coordinate) -> bool {
    writeln!(out, "{worker}\t{coordinate}").is_ok()
}

/// Drains `cursor` with `config.workers` OS threads.
///
/// # Errors
///
/// Fails if any worker thread panicked.
pub fn drain_threads<C>(cursor: &C, config: &RunConfig) -> anyhow::Result<Summary>
where
    C: CoordinateCursor + Sync,
{
    let budget = Budget::new(config.limit);

    let per_worker = std::thread::scope(|s| {
        let handles: Vec<_> = (0..config.workers)
            .map(|worker| {
                let budget = &budget;
                s.spawn(move || {
                    let mut received = 0;
                    while budget.claim() {
                        let Some(coordinate) = cursor.next_coordinate().ready() else {
                            break;
                        };
                        received += 1;
                        if !config.quiet && !emit(&mut std::io::stdout().lock(), worker, coordinate)
                        {
                            tracing::warn!(worker, "stdout closed, stopping");
                            break;
                        }
                    }
                    tracing::debug!(worker, received, "worker finished");
                    received
                })
            })
            .collect();

        handles
            .into_iter()
            .enumerate()
            .map(|(worker, h)| {
                h.join().map_err(|_| {
                    tracing::error!(worker, "worker thread panicked");
                    anyhow!("worker {worker} panicked while draining the grid")
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()
    })?;

    Ok(Summary { per_worker })
}

/// Writes reader output from one blocking thread so reader tasks never block
/// on stdout.
fn spawn_writer() -> (mpsc::Sender<(usize, Coordinate)>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::channel::<(usize, Coordinate)>(WRITER_BUFFER);
    let writer = tokio::task::spawn_blocking(move || {
        let mut out = std::io::stdout().lock();
        while let Some((worker, coordinate)) = rx.blocking_recv() {
            if !emit(&mut out, worker, coordinate) {
                tracing::warn!("stdout closed, stopping");
                break;
            }
        }
        let _ = out.flush();
    });
    (tx, writer)
}

/// Drains a stream with `config.workers` reader tasks.
///
/// The stream is cancelled with `shutdown`, and shut down once every reader
/// has stopped.
pub async fn drain_stream(
    config: &RunConfig,
    shutdown: &CancellationToken,
) -> anyhow::Result<Summary> {
    let cursor = config.options.basic_cursor()?;
    let (stream, handle) = CoordinateStream::spawn_with_token(cursor, shutdown);
    let budget = Arc::new(Budget::new(config.limit));
    let (lines, writer) = if config.quiet {
        (None, None)
    } else {
        let (lines, writer) = spawn_writer();
        (Some(lines), Some(writer))
    };

    let readers: Vec<_> = (0..config.workers)
        .map(|worker| {
            let stream = stream.clone();
            let budget = Arc::clone(&budget);
            let lines = lines.clone();
            tokio::spawn(async move {
                let mut received = 0;
                while budget.claim() {
                    let Some(coordinate) = stream.recv().await else {
                        break;
                    };
                    received += 1;
                    if let Some(lines) = &lines {
                        if lines.send((worker, coordinate)).await.is_err() {
                            tracing::warn!(worker, "writer gone, stopping");
                            break;
                        }
                    }
                }
                tracing::debug!(worker, received, "reader finished");
                received
            })
        })
        .collect();
    drop(stream);
    drop(lines);

    let mut per_worker = Vec::with_capacity(readers.len());
    for reader in readers {
        per_worker.push(reader.await?);
    }

    if shutdown.is_cancelled() {
        tracing::info!("stream cancelled before completion");
    }
    handle.shutdown().await?;
    if let Some(writer) = writer {
        writer.await?;
    }

    Ok(Summary { per_worker })
}

#[cfg(test)]
mod tests {
    use gridcursor::{
        GridOptions,
        cursor::{AtomicCursor, CursorStatus},
        grid::{GridSequence, Order},
    };

    use super::*;
    use crate::config::Strategy;

    fn config(options: GridOptions, workers: usize, limit: Option<u64>) -> RunConfig {
        RunConfig {
            options,
            strategy: Strategy::Atomic,
            workers,
            limit,
            quiet: true,
        }
    }

    #[derive(Debug)]
    struct FaultyCursor {
        sequence: GridSequence,
    }

    impl CoordinateCursor for FaultyCursor {
        fn new(sequence: GridSequence, _repeat: bool) -> Self {
            Self { sequence }
        }

        fn next_coordinate(&self) -> CursorStatus {
            panic!("cursor failure");
        }

        fn sequence(&self) -> &GridSequence {
            &self.sequence
        }

        fn is_repeating(&self) -> bool {
            false
        }

        fn served(&self) -> u64 {
            0
        }
    }

    #[test]
    fn threads_drain_every_coordinate() {
        let config = config(GridOptions::new(30, 20), 4, None);
        let cursor: AtomicCursor = config.options.cursor().unwrap();
        let summary = drain_threads(&cursor, &config).unwrap();
        assert_eq!(summary.per_worker.len(), 4);
        assert_eq!(summary.delivered(), 600);
    }

    #[test]
    fn limit_caps_a_repeating_drain() {
        let config = config(GridOptions::new(2, 2).with_repeat(true), 3, Some(50));
        let cursor: AtomicCursor = config.options.cursor().unwrap();
        assert_eq!(drain_threads(&cursor, &config).unwrap().delivered(), 50);
    }

    #[test]
    fn panicking_worker_is_reported() {
        let config = config(GridOptions::new(2, 2), 2, None);
        let cursor: FaultyCursor = config.options.cursor().unwrap();
        let err = drain_threads(&cursor, &config).unwrap_err();
        assert!(err.to_string().contains("panicked"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stream_readers_split_the_grid() {
        let config = config(GridOptions::new(5, 4).with_order(Order::Random), 3, None);
        let summary = drain_stream(&config, &CancellationToken::new()).await.unwrap();
        assert_eq!(summary.delivered(), 20);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn stream_stops_at_limit() {
        let config = config(GridOptions::new(3, 3).with_repeat(true), 2, Some(25));
        let summary = drain_stream(&config, &CancellationToken::new()).await.unwrap();
        assert_eq!(summary.delivered(), 25);
    }
}
