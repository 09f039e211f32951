use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::permission::PermissionStatus;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScanStatus {
    #[default]
    Idle,
    Scanning,
    /// Permission was not granted; the camera was never started.
    CameraUnavailable,
    Stopped,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScannerState {
    pub status: ScanStatus,
    pub session_id: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub stopped_at: Option<DateTime<Utc>>,
    pub permission: Option<PermissionStatus>,
}

impl ScannerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_scanning(&self) -> bool {
        self.status == ScanStatus::Scanning
    }

    pub fn begin_session(&mut self, session_id: String, started_at: DateTime<Utc>) {
        *self = Self {
            status: ScanStatus::Scanning,
            session_id: Some(session_id),
            started_at: Some(started_at),
            stopped_at: None,
            permission: Some(PermissionStatus::Authorized),
        };
    }

    pub fn camera_unavailable(&mut self, permission: PermissionStatus) {
        *self = Self {
            status: ScanStatus::CameraUnavailable,
            permission: Some(permission),
            ..Self::default()
        };
    }

    pub fn stop(&mut self, stopped_at: DateTime<Utc>) {
        self.status = ScanStatus::Stopped;
        self.stopped_at = Some(stopped_at);
    }
}
