//! Play-count recording backed by a remote catalog.

use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::{debug, warn};
use wave_core::{TrackCatalog, TrackId};
use wave_playback::PlayRecorder;

/// Fire-and-forget [`PlayRecorder`]
///
/// Each play is sent from a task spawned on `handle`, so the controller
/// never waits on the network. Failures are logged and dropped.
pub struct CatalogPlayRecorder {
    catalog: Arc<dyn TrackCatalog>,
    handle: Handle,
}

impl CatalogPlayRecorder {
    pub fn new(catalog: Arc<dyn TrackCatalog>, handle: Handle) -> Self {
        Self { catalog, handle }
    }
}

impl PlayRecorder for CatalogPlayRecorder {
    fn record_play(&self, track_id: &TrackId) {
        let catalog = Arc::clone(&self.catalog);
        let track_id = track_id.clone();

        self.handle.spawn(async move {
            match catalog.record_play(&track_id).await {
                Ok(plays) => debug!(track_id = %track_id, plays, "Play count updated"),
                Err(e) => warn!(
                    track_id = %track_id,
                    error = %e,
                    kind = "SideEffectFailure",
                    "Failed to record play"
                ),
            }
        });
    }
}
