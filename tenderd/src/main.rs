use tender_core::services::Reconciler;
use tender_sqlite::Db;
use tenderd::{AppConfig, Cli, impls::TenderApp};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Everything observable about a pass comes out through `tracing`, so
    // wire up a subscriber before anything else happens.
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::import()?;
    let AppConfig {
        database,
        schedule,
        ending_soon_window,
        pass_budget,
    } = AppConfig::load(&cli)?;

    let db = Db::open(&database).await?;
    let app = TenderApp::new(db);

    let reconciler = match ending_soon_window {
        Some(window) => Reconciler::new(&app).with_window(window.try_into()?),
        None => Reconciler::new(&app),
    };

    schedule
        .run(async || {
            let pass = reconciler.run_once();
            let report = match pass_budget {
                Some(budget) => match tokio::time::timeout(budget, pass).await {
                    Ok(report) => report?,
                    Err(_) => {
                        // Abandoning is safe: every transition is a CAS, so
                        // the next pass re-selects whatever this one missed.
                        warn!(?budget, "pass overran its budget; abandoned");
                        return Ok(());
                    }
                },
                None => pass.await?,
            };
            info!(
                opened = report.opened,
                closed = report.closed,
                ending_soon = report.ending_soon,
                skipped = report.skipped,
                "pass complete"
            );
            Ok::<_, anyhow::Error>(())
        })
        .await
}
