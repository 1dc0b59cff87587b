use super::ElevationReading;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Hover readout shared between lookups and the redraw ticker.
///
/// Whichever lookup resolves last overwrites the readout, even if it was
/// issued earlier than the one currently shown. The coordinate shown is the
/// one the reading was resolved for, never the caller's own.
#[derive(Clone, Default)]
pub struct ElevationReadout {
    latest: Arc<RwLock<Option<ElevationReading>>>,
}

impl ElevationReadout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, reading: ElevationReading) {
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = Some(reading);
    }

    pub fn latest(&self) -> Option<ElevationReading> {
        *self.latest.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn render(&self) -> String {
        let Some(reading) = self.latest() else {
            return "Elevation: –".to_string();
        };
        let at = reading.at;
        match reading.result.meters() {
            Some(meters) => format!("Elevation: {meters} m  ({:.4}, {:.4})", at.lat, at.lng),
            None => format!("Elevation: unavailable  ({:.4}, {:.4})", at.lat, at.lng),
        }
    }

    /// Re-render every `period` regardless of when lookups complete.
    pub fn spawn_redraw<F>(&self, period: Duration, mut draw: F) -> JoinHandle<()>
    where
        F: FnMut(&str) + Send + 'static,
    {
        let readout = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                draw(&readout.render());
            }
        })
    }
}
