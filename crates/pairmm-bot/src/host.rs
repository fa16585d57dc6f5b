//! JSON-lines host adapter.
//!
//! Reads [`HostEvent`]s from a file or stdin on a tokio task and feeds them
//! over a channel to one blocking worker that owns the [`AutoTrader`].
//! The worker handles events strictly in arrival order; the blocking hedge
//! path may sleep inside it without stalling the reader.
//!
//! Outbound commands are written one JSON object per line.

use std::io::Write;
use std::path::PathBuf;

use pairmm_core::{ClientOrderId, Command, Lifespan, Price, Side, Volume};
use pairmm_executor::{OrderSender, SystemClock};
use pairmm_telemetry::{Metrics, SessionStats};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::AppConfig;
use crate::error::{AppError, AppResult};
use crate::events::HostEvent;
use crate::trader::AutoTrader;

/// Events buffered between the reader and the worker.
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// [`OrderSender`] writing each command as a JSON line.
pub struct JsonLinesSender<W: Write> {
    out: W,
    written: u64,
    failed: u64,
}

impl<W: Write> JsonLinesSender<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            written: 0,
            failed: 0,
        }
    }

    /// Commands written successfully.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Commands lost to write errors.
    pub fn failed(&self) -> u64 {
        self.failed
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, command: &Command) {
        match self.write_line(command) {
            Ok(()) => self.written += 1,
            Err(e) => {
                self.failed += 1;
                error!(
                    order_id = %command.id(),
                    kind = command.kind(),
                    error = %e,
                    "Failed to write command"
                );
            }
        }
    }

    fn write_line(&mut self, command: &Command) -> AppResult<()> {
        serde_json::to_writer(&mut self.out, command).map_err(AppError::CommandWrite)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> OrderSender for JsonLinesSender<W> {
    fn insert_order(
        &mut self,
        id: ClientOrderId,
        side: Side,
        price: Price,
        volume: Volume,
        lifespan: Lifespan,
    ) {
        self.write(&Command::InsertOrder {
            id,
            side,
            price,
            volume,
            lifespan,
        });
    }

    fn cancel_order(&mut self, id: ClientOrderId) {
        self.write(&Command::CancelOrder { id });
    }

    fn hedge_order(&mut self, id: ClientOrderId, side: Side, price: Price, volume: Volume) {
        self.write(&Command::HedgeOrder {
            id,
            side,
            price,
            volume,
        });
    }
}

/// Replay a session from `input` (stdin when `None`), writing commands to
/// `out`. Returns the session summary and the writer.
pub async fn run_replay<W>(
    config: AppConfig,
    input: Option<PathBuf>,
    out: W,
) -> AppResult<(SessionStats, W)>
where
    W: Write + Send + 'static,
{
    let (event_tx, mut event_rx) = mpsc::channel::<HostEvent>(EVENT_CHANNEL_CAPACITY);

    let reader = tokio::spawn(read_events(input, event_tx));

    let worker = tokio::task::spawn_blocking(move || {
        let mut trader = AutoTrader::new(&config, JsonLinesSender::new(out), SystemClock::new());
        let mut handled = 0u64;

        while let Some(event) = event_rx.blocking_recv() {
            if let Err(e) = event.dispatch(&mut trader) {
                warn!(kind = event.kind(), error = %e, "Event dropped");
                continue;
            }
            handled += 1;
        }

        let stats = trader.session_stats();
        let sender = trader.into_sender();
        info!(
            events = handled,
            commands = sender.written(),
            write_failures = sender.failed(),
            "Replay finished"
        );
        (stats, sender.into_inner())
    });

    let lines = reader
        .await
        .map_err(|e| AppError::Worker(format!("Event reader failed: {e}")))??;
    debug!(lines, "Event input exhausted");

    let (stats, out) = worker
        .await
        .map_err(|e| AppError::Worker(format!("Trader worker failed: {e}")))?;

    Metrics::inventory(stats.position, stats.delta);
    Ok((stats, out))
}

/// Read JSON lines until EOF, forwarding parsed events. Malformed lines are
/// logged and skipped. Returns the number of lines read.
async fn read_events(input: Option<PathBuf>, event_tx: mpsc::Sender<HostEvent>) -> AppResult<u64> {
    let source: Box<dyn AsyncRead + Unpin + Send> = match input {
        Some(path) => {
            info!(path = %path.display(), "Reading events from file");
            Box::new(tokio::fs::File::open(path).await?)
        }
        None => {
            info!("Reading events from stdin");
            Box::new(tokio::io::stdin())
        }
    };

    let mut lines = BufReader::new(source).lines();
    let mut line_no = 0u64;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match HostEvent::parse(line) {
            Ok(event) => {
                if event_tx.send(event).await.is_err() {
                    warn!(line = line_no, "Trader worker gone, stopping reader");
                    break;
                }
            }
            Err(e) => warn!(line = line_no, error = %e, "Skipping malformed event"),
        }
    }

    Ok(line_no)
}
