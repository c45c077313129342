/// Threading and Async Integration Helpers
///
/// Utilities for spawning tokio work on behalf of the egui loop and waking
/// the UI once results are queued.

use crate::observability::{report_error, SOURCE_BACKGROUND_TASK};
use eframe::egui;
use std::sync::{Arc, RwLock};
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use super::controller::LauncherEvent;

/// Event channel plus the context used to wake the UI
#[derive(Clone)]
pub struct AsyncBridge {
    pub event_tx: mpsc::Sender<LauncherEvent>,
    ui_context: Arc<RwLock<Option<egui::Context>>>,
}

impl AsyncBridge {
    /// Create a bridge with a bounded event channel
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<LauncherEvent>) {
        let (event_tx, event_rx) = mpsc::channel(capacity);
        let bridge = AsyncBridge {
            event_tx,
            ui_context: Arc::new(RwLock::new(None)),
        };
        (bridge, event_rx)
    }

    /// Remember the egui context so background tasks can request repaints
    pub fn set_ui_context(&self, ctx: &egui::Context) {
        if let Ok(mut guard) = self.ui_context.write() {
            if guard.is_none() {
                *guard = Some(ctx.clone());
            }
        }
    }

    /// Queue an event and wake the UI; false once the UI is gone
    pub async fn send(&self, event: LauncherEvent) -> bool {
        let delivered = self.event_tx.send(event).await.is_ok();
        if let Ok(guard) = self.ui_context.read() {
            request_ui_repaint(guard.as_ref());
        }
        delivered
    }
}

/// Spawn a task whose failure is reported instead of silently dropped
pub fn spawn_monitored_task<F, Fut>(
    handle: &Handle,
    name: &'static str,
    bridge: AsyncBridge,
    f: F,
) -> tokio::task::JoinHandle<()>
where
    F: FnOnce(AsyncBridge) -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<(), crate::error::AppError>> + Send + 'static,
{
    handle.spawn(async move {
        if let Err(e) = f(bridge).await {
            report_error(&e, SOURCE_BACKGROUND_TASK, Some(name));
        }
    })
}

/// Request UI repaint from a background thread
pub fn request_ui_repaint(ctx: Option<&egui::Context>) {
    if let Some(c) = ctx {
        c.request_repaint();
    }
}
