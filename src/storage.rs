use crate::errors::AppError;
use crate::models::TrackerData;
use std::{env, path::Path, path::PathBuf};
use tokio::fs;
use tracing::warn;

pub fn resolve_data_path() -> Result<PathBuf, std::io::Error> {
    if let Ok(path) = env::var("APP_DATA_PATH") {
        return Ok(PathBuf::from(path));
    }

    Ok(PathBuf::from("data/state.json"))
}

/// Loads the persisted snapshot. A missing file or a snapshot that fails to
/// parse degrades to defaults; the tracker never refuses to start over bad
/// stored data.
pub async fn load_data(path: &Path) -> TrackerData {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(data) => data,
            Err(err) => {
                warn!("failed to parse snapshot, starting from defaults: {err}");
                TrackerData::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => TrackerData::default(),
        Err(err) => {
            warn!("failed to read snapshot, starting from defaults: {err}");
            TrackerData::default()
        }
    }
}

pub async fn persist_data(path: &Path, data: &TrackerData) -> Result<(), AppError> {
    let snapshot = data.export_snapshot();
    let payload = serde_json::to_vec_pretty(&snapshot).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}
