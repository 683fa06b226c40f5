#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use classroom_signage::{Kiosk, KioskConfig, clock, http_api};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "classroom_signage=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = KioskConfig::from_env()?;
    let addr: SocketAddr = config.http_addr.parse()?;
    let kiosk = Kiosk::open(config.open_store()?, config.remote_client());

    // Background refresh on startup; failures only reach the log.
    {
        let kiosk = kiosk.clone();
        tokio::spawn(async move {
            tokio::join!(kiosk.sync_remote_schedule(false), kiosk.refresh_calendar());
        });
    }
    clock::spawn_ticker(kiosk.clone());

    tracing::info!(%addr, store = ?config.store, "classroom signage listening");
    http_api::serve(addr, kiosk).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the kiosk server.");
}
