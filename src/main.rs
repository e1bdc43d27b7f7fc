use chrono::Local;
use pill_tracker::stats::day_complete;
use pill_tracker::{load_data, resolve_data_path, router, AppState};
use std::{env, net::SocketAddr, time::Duration};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_path = resolve_data_path()?;
    if let Some(parent) = data_path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let data = load_data(&data_path).await;
    let state = AppState::new(data_path, data);

    spawn_reminder(&state);

    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// One-shot best-effort reminder: sleeps, then re-reads the record store and
// only speaks up if today is still incomplete at fire time.
fn spawn_reminder(state: &AppState) {
    let Some(delay) = env::var("REMINDER_DELAY_SECS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
    else {
        return;
    };

    let state = state.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(delay)).await;
        let today = Local::now().date_naive();
        let data = state.data.lock().await;
        if !day_complete(today, &data) {
            info!("reminder: doses for {today} are not fully recorded yet");
        }
    });
}
