use std::sync::Arc;

use execution_agent::api::{run_server, AppState};
use execution_agent::exchange::factory::build_venue;
use execution_agent::queue::{LocalFs, QueueFs};
use execution_agent::services::reporting::OutcomeReporter;
use execution_agent::services::scheduler::PollScheduler;
use execution_agent::{AgentContext, AgentError, AppConfig, EventBus, Poller};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), AgentError> {
    dotenvy::dotenv().ok();

    // Load Configuration
    let config = AppConfig::load()?;

    // Setup Logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting execution agent...");
    info!("Loaded Configuration: {:?}", config);

    // Bootstrap the queue folders
    let fs: Arc<dyn QueueFs> = Arc::new(LocalFs);
    let venue = build_venue(&config)?;
    let bus = EventBus::new(1024);
    let ctx = AgentContext::new(config.clone(), fs.clone(), venue, bus.clone());
    ctx.layout.ensure(fs.as_ref())?;

    let reporter = OutcomeReporter::new();
    reporter.start(bus.clone()).await;

    let poller = Arc::new(Poller::new(&ctx));

    // Listen for Ctrl-C from here on so the startup drain is covered too
    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    // Drain whatever is already waiting before the cadence kicks in. The
    // drain runs as its own task so a signal never drops it mid-file.
    let drain = tokio::spawn({
        let poller = poller.clone();
        async move { poller.run_cycle().await }
    });
    tokio::select! {
        _ = drain => {}
        res = &mut shutdown => {
            res?;
            info!("🛑 Shutdown requested during startup drain, finishing current cycle...");
            poller.wait_idle().await;
            info!("Execution agent stopped");
            return Ok(());
        }
    }

    let mut scheduler = PollScheduler::new(poller.clone(), config.queue.poll_interval())
        .start()
        .await?;

    if let Some(bind) = config.api.bind.clone() {
        let state = Arc::new(AppState {
            reporter: reporter.clone(),
            layout: ctx.layout.clone(),
            fs: fs.clone(),
        });
        tokio::spawn(async move {
            if let Err(e) = run_server(state, &bind).await {
                error!("API server stopped: {}", e);
            }
        });
    } else {
        info!("ℹ️ api.bind not set - status API disabled");
    }

    (&mut shutdown).await?;
    info!("🛑 Shutdown requested, waiting for the current cycle to finish...");

    scheduler.shutdown().await?;
    poller.wait_idle().await;

    info!("Execution agent stopped");
    Ok(())
}
