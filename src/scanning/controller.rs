use std::sync::Arc;

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::{info, warn};
use serde::Serialize;
use tokio::{sync::Mutex, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    camera::{Detector, FrameSource},
    metrics::{MetricsSnapshot, ScanMetrics},
    models::Rect,
    permission::PermissionProvider,
    settings::ScannerSettings,
};

use super::loop_worker::{frame_loop, reducer_loop};
use super::mailbox::batch_mailbox;
use super::sink::ResultSink;
use super::state::ScannerState;
use super::window::ScanWindowHandle;

/// Collaborators the scanner drives; all of them outlive a single session.
#[derive(Clone)]
pub struct ScanComponents {
    pub source: Arc<dyn FrameSource>,
    pub detector: Arc<dyn Detector>,
    pub sink: Arc<dyn ResultSink>,
    pub permission: Arc<dyn PermissionProvider>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScannerSnapshot {
    pub state: ScannerState,
    pub scan_window: Rect,
    pub metrics: MetricsSnapshot,
}

struct Workers {
    cancel_token: CancellationToken,
    frame_task: JoinHandle<()>,
    reducer_task: JoinHandle<()>,
}

#[derive(Clone)]
pub struct ScannerController {
    state: Arc<Mutex<ScannerState>>,
    workers: Arc<Mutex<Option<Workers>>>,
    components: ScanComponents,
    window: ScanWindowHandle,
    settings: ScannerSettings,
    metrics: ScanMetrics,
}

impl ScannerController {
    pub fn new(settings: ScannerSettings, window: ScanWindowHandle, components: ScanComponents) -> Self {
        Self {
            state: Arc::new(Mutex::new(ScannerState::new())),
            workers: Arc::new(Mutex::new(None)),
            components,
            window,
            settings,
            metrics: ScanMetrics::new(),
        }
    }

    pub async fn get_state(&self) -> ScannerState {
        self.state.lock().await.clone()
    }

    pub async fn get_snapshot(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            state: self.get_state().await,
            scan_window: self.window.snapshot(),
            metrics: self.metrics.get_snapshot().await,
        }
    }

    /// Asks for camera permission and, if granted, starts the frame and
    /// reducer loops. Without permission the scanner reports
    /// `CameraUnavailable` and nothing runs.
    pub async fn start_scanning(&self) -> Result<ScannerState> {
        let mut workers = self.workers.lock().await;
        if workers.is_some() {
            bail!("scanning already active");
        }

        let permission = {
            let provider = Arc::clone(&self.components.permission);
            tokio::task::spawn_blocking(move || provider.request_camera_permission())
                .await
                .context("permission request worker join failed")?
        };

        if !permission.is_authorized() {
            warn!("camera permission {}; scanner stays idle", permission.as_str());
            let mut state = self.state.lock().await;
            state.camera_unavailable(permission);
            return Ok(state.clone());
        }

        let session_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        self.metrics.reset().await;

        let cancel_token = CancellationToken::new();
        let (poster, inbox) = batch_mailbox();

        let frame_task = tokio::spawn(frame_loop(
            Arc::clone(&self.components.source),
            Arc::clone(&self.components.detector),
            self.settings.detector.clone(),
            self.settings.frame_rate_cap,
            poster,
            self.metrics.clone(),
            cancel_token.clone(),
        ));

        let reducer_task = tokio::spawn(reducer_loop(
            session_id.clone(),
            inbox,
            self.window.clone(),
            Arc::clone(&self.components.sink),
            self.metrics.clone(),
            cancel_token.clone(),
        ));

        *workers = Some(Workers {
            cancel_token,
            frame_task,
            reducer_task,
        });

        info!(
            "scan session {} started at {} fps cap",
            session_id, self.settings.frame_rate_cap
        );

        let mut state = self.state.lock().await;
        state.begin_session(session_id, started_at);
        Ok(state.clone())
    }

    /// Cancels both loops and waits for them. A no-op when nothing is running.
    pub async fn stop_scanning(&self) -> Result<ScannerState> {
        let running = self.workers.lock().await.take();
        let Some(workers) = running else {
            return Ok(self.get_state().await);
        };

        workers.cancel_token.cancel();
        workers
            .frame_task
            .await
            .context("frame loop task failed to join")?;
        workers
            .reducer_task
            .await
            .context("reducer loop task failed to join")?;

        let mut state = self.state.lock().await;
        state.stop(Utc::now());
        if let Some(session_id) = state.session_id.as_deref() {
            info!("scan session {} stopped", session_id);
        }
        Ok(state.clone())
    }
}
