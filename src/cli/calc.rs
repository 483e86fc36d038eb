//! Calc command implementation

use crate::calculator::{CalculatorSession, RequestTicket};
use crate::config::Config;
use crate::dr::{DrClient, DrDataSource, FetchError, UnderlyingSnapshot};
use crate::telemetry::build_sink;
use clap::Args;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

type RealtimeResult = (RequestTicket, Result<UnderlyingSnapshot, FetchError>);

#[derive(Args, Debug)]
pub struct CalcArgs {
    /// DR symbol, e.g. AAPL80
    pub symbol: String,

    /// Keep refreshing the underlying until interrupted
    #[arg(short, long)]
    pub watch: bool,
}

impl CalcArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let source: Arc<dyn DrDataSource> = Arc::new(DrClient::new(config.api.clone())?);
        let sink = build_sink(&config.telemetry, &config.api)?;
        let mut session = CalculatorSession::new(&config.pricing, &config.calculator, sink);

        let dr = source.fetch_dr(&self.symbol).await?;
        let ticket = session.select(dr);

        if !self.watch {
            match source.fetch_realtime(ticket.symbol()).await {
                Ok(snapshot) => {
                    session.apply_realtime(&ticket, snapshot);
                }
                Err(e) => session.realtime_failed(&ticket, &e),
            }
            println!("{}", session.display());
            // Let the calculation event go out before exiting
            session.settle().await;
            return Ok(());
        }

        tracing::info!(symbol = %self.symbol, "Watching DR fair value, Ctrl-C to stop");
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::warn!(error = %e, "Failed to listen for Ctrl-C");
            }
        };
        run_watch(
            &mut session,
            source,
            ticket,
            config.calculator.refresh_interval(),
            shutdown,
            |session| println!("{}\n", session.display()),
        )
        .await;

        tracing::info!("Stopped watching");
        Ok(())
    }
}

/// Refresh realtime inputs on an interval until `shutdown` resolves.
///
/// Fetches run concurrently; each response carries the ticket it was issued
/// with and is dropped if a newer response was already applied.
pub(crate) async fn run_watch<F, R>(
    session: &mut CalculatorSession,
    source: Arc<dyn DrDataSource>,
    first: RequestTicket,
    refresh: Duration,
    shutdown: F,
    mut on_update: R,
) where
    F: Future<Output = ()>,
    R: FnMut(&CalculatorSession),
{
    let (tx, mut rx) = mpsc::channel::<RealtimeResult>(16);
    spawn_fetch(source.clone(), first, tx.clone());

    let mut interval = tokio::time::interval(refresh);
    // The first tick completes immediately and the first fetch is in flight
    interval.tick().await;

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                if let Some(ticket) = session.request_realtime() {
                    spawn_fetch(source.clone(), ticket, tx.clone());
                }
            }
            Some((ticket, result)) = rx.recv() => match result {
                Ok(snapshot) => {
                    if session.apply_realtime(&ticket, snapshot) {
                        on_update(session);
                    }
                }
                Err(e) => session.realtime_failed(&ticket, &e),
            },
        }
    }
}

fn spawn_fetch(source: Arc<dyn DrDataSource>, ticket: RequestTicket, tx: mpsc::Sender<RealtimeResult>) {
    tokio::spawn(async move {
        let result = source.fetch_realtime(ticket.symbol()).await;
        // Receiver is gone once watching stops
        let _ = tx.send((ticket, result)).await;
    });
}
