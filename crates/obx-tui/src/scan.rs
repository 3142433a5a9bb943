//! Simulated channel-scan producer.
//!
//! The control model owns no timers: while the search-progress screen is
//! open, this task injects `search-progress` commands into the app's single
//! command queue at a fixed cadence, and the processor merges them
//! monotonically. The app aborts the task when the screen closes.

use std::time::Duration;

use rand::Rng;
use tokio::sync::mpsc;
use tracing::debug;

use obx_core::catalog::Catalog;
use obx_core::command::Command;

use crate::app::AppMessage;

/// Channel names the scan will "discover", split by service type.
#[derive(Debug, Clone)]
pub struct ScanPlan {
    pub tv: Vec<String>,
    pub radio: Vec<String>,
}

impl ScanPlan {
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let (radio, tv): (Vec<_>, Vec<_>) = catalog
            .channels
            .iter()
            .map(|c| c.name.clone())
            .partition(|name| name.to_lowercase().contains("radio"));
        Self { tv, radio }
    }

    /// The slice of each list visible at `progress` percent.
    fn found_at(&self, progress: f32) -> (Vec<String>, Vec<String>) {
        let frac = (progress / 100.0).clamp(0.0, 1.0);
        let tv_n = (self.tv.len() as f32 * frac).round() as usize;
        let radio_n = (self.radio.len() as f32 * frac).round() as usize;
        (
            self.tv[..tv_n.min(self.tv.len())].to_vec(),
            self.radio[..radio_n.min(self.radio.len())].to_vec(),
        )
    }
}

/// Spawn the producer. Emits ticks until progress reaches 100 or the
/// receiver goes away; the caller aborts it when the screen closes early.
pub fn spawn(
    tx: mpsc::Sender<AppMessage>,
    plan: ScanPlan,
    start_from: f32,
    tick_ms: u64,
    step_pct: f32,
) -> tokio::task::AbortHandle {
    let handle = tokio::spawn(async move {
        let mut progress = start_from.clamp(0.0, 100.0);
        let mut interval = tokio::time::interval(Duration::from_millis(tick_ms.max(50)));
        loop {
            interval.tick().await;
            let step = {
                let mut rng = rand::thread_rng();
                step_pct * rng.gen_range(0.5..1.5)
            };
            progress = (progress + step).min(100.0);
            let (tv_list, radio_list) = plan.found_at(progress);
            debug!(
                "scan tick: {:.1}% ({} tv, {} radio)",
                progress,
                tv_list.len(),
                radio_list.len()
            );
            let cmd = Command::SearchProgress {
                progress,
                tv_list,
                radio_list,
            };
            if tx.send(AppMessage::Remote(cmd)).await.is_err() {
                break;
            }
            if progress >= 100.0 {
                break;
            }
        }
    });
    handle.abort_handle()
}
