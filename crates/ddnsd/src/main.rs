// # ddnsd - DDNS Synchronization Daemon
//
// Thin integration layer: all synchronization logic lives in ddns-core.
//
// The ddnsd daemon is responsible for:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the IP resolver and the DNS provider
// 4. Running the scheduler until SIGTERM/SIGINT
//
// ## Configuration
//
// All configuration is done via environment variables:
//
// ### Required
// - `CLOUDFLARE_API_TOKEN`: API token with Zone:Read and DNS:Edit permissions
// - `CLOUDFLARE_ZONE_NAME`: Zone that holds the record (e.g. example.com)
// - `CLOUDFLARE_RECORD_NAME`: Record to keep in sync (e.g. home.example.com)
//
// ### Optional
// - `CURRENT_IP_INFO_ENDPOINT`: Echo service URL (default: https://ipinfo.io/ip)
// - `DURATION_BETWEEN_UPDATES`: Interval between cycles (default: 5m)
// - `CLOUDFLARE_API_BASE_URL`: API base URL (default: https://api.cloudflare.com/client/v4)
// - `DDNS_HTTP_TIMEOUT`: Per-request timeout (default: 30s)
// - `DDNS_OVERLAP_POLICY`: allow | skip (default: allow)
// - `DDNS_ON_CYCLE_ERROR`: continue | exit (default: continue)
// - `DDNS_MATCH_POLICY`: last | strict (default: last)
// - `DDNS_LOG_LEVEL`: trace | debug | info | warn | error (default: info)
//
// ## Example
//
// ```bash
// export CLOUDFLARE_API_TOKEN=your_token
// export CLOUDFLARE_ZONE_NAME=example.com
// export CLOUDFLARE_RECORD_NAME=home.example.com
// export DURATION_BETWEEN_UPDATES=10m
//
// ddnsd
// ```

use anyhow::{Context, Result};
use ddns_core::config::LOG_LEVEL_VAR;
use ddns_core::shutdown::{self, ShutdownTrigger};
use ddns_core::{DnsProvider, IpResolver, Scheduler, SchedulerEvent, SyncConfig};
use ddns_ip_http::HttpIpResolver;
use ddns_provider_cloudflare::CloudflareProvider;
use std::future::Future;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (a cycle failed under the exit policy)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn log_level(name: &str) -> Level {
    match name.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    }
}

fn main() -> ExitCode {
    // The logger comes first so the configuration phase is visible; an
    // invalid level is still reported by configuration validation.
    let level = std::env::var(LOG_LEVEL_VAR).unwrap_or_default();
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&level))
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    // Nothing touches the network before configuration is complete
    info!("configuration started");
    let config = match SyncConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("{}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    for notice in config.notices() {
        if notice.is_warning() {
            warn!("{}", notice);
        } else {
            info!("{}", notice);
        }
    }

    info!(
        zone = %config.zone_name,
        record = %config.record_name,
        ip_info_endpoint = %config.ip_info_url,
        interval = ?config.update_interval,
        "configuration finished"
    );

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    rt.block_on(async {
        let (scheduler, events) = match initialize(&config).await {
            Ok(parts) => parts,
            Err(e) => {
                error!("Initialization error: {:#}", e);
                return DdnsExitCode::ConfigError;
            }
        };

        match run_daemon(scheduler, events, wait_for_shutdown()).await {
            Ok(()) => {
                info!("Shutdown complete");
                DdnsExitCode::CleanShutdown
            }
            Err(e) => {
                error!("Daemon error: {:#}", e);
                DdnsExitCode::RuntimeError
            }
        }
    })
    .into()
}

/// Build the resolver, provider and scheduler
///
/// Requests the IP endpoint once; a failed request is logged and startup
/// continues, since the first cycle will report the same failure.
async fn initialize(config: &SyncConfig) -> Result<(Scheduler, mpsc::Receiver<SchedulerEvent>)> {
    info!("initialization started");

    let resolver: Arc<dyn IpResolver> = Arc::new(
        HttpIpResolver::from_config(config).context("failed to create IP resolver")?,
    );
    let provider: Arc<dyn DnsProvider> = Arc::new(
        CloudflareProvider::from_config(config).context("failed to create DNS provider")?,
    );

    match resolver.resolve().await {
        Ok(address) => info!(address = %address, "current IP address resolved"),
        Err(e) => error!(
            endpoint = resolver.endpoint(),
            "error when requesting the current ip: {}", e
        ),
    }

    let parts = Scheduler::new(resolver, provider, config).context("failed to create scheduler")?;

    info!("initialization finished");
    Ok(parts)
}

/// Run the scheduler until `wait` resolves or the scheduler stops on its own
///
/// Failing to wait for signals stops the scheduler and is reported as an
/// error, never as a requested shutdown.
async fn run_daemon<W>(
    scheduler: Scheduler,
    mut events: mpsc::Receiver<SchedulerEvent>,
    wait: W,
) -> Result<()>
where
    W: Future<Output = Result<&'static str>> + Send + 'static,
{
    let (trigger, signal) = shutdown::channel();

    let signal_task = tokio::spawn(forward_shutdown_signal(wait, trigger));

    // Events are already logged by the scheduler; keep the channel drained
    let event_task = tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            debug!(?event, "scheduler event");
        }
    });

    let result = scheduler.run(signal).await;

    // a finished signal task keeps its output; a pending one is cancelled
    signal_task.abort();
    let signal_result = match signal_task.await {
        Ok(outcome) => outcome,
        Err(e) if e.is_cancelled() => Ok(()),
        Err(e) => Err(anyhow::anyhow!("signal task failed: {}", e)),
    };

    drop(scheduler);
    let _ = event_task.await;

    result?;
    signal_result
}

/// Trigger shutdown once `wait` resolves
///
/// The trigger fires even when waiting failed, so the scheduler never runs
/// without a way to stop it; the failure is handed back to the caller.
async fn forward_shutdown_signal<W>(wait: W, trigger: ShutdownTrigger) -> Result<()>
where
    W: Future<Output = Result<&'static str>>,
{
    let outcome = wait.await;
    match &outcome {
        Ok(name) => info!("Received shutdown signal: {}", name),
        Err(e) => error!("Shutdown signal error, stopping: {:#}", e),
    }
    trigger.trigger();
    outcome.map(|_| ())
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm =
        signal(SignalKind::terminate()).context("Failed to setup SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("Failed to setup SIGINT handler")?;

    Ok(tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    })
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .context("Failed to wait for CTRL-C")?;
    Ok("SIGINT")
}
