use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::time::Duration;

use crate::{
    camera::{ScriptedDetector, SyntheticCamera},
    models::{BarcodeFormat, Detection, Rect},
    overlay::{centered_scan_area, OverlayAnimator, ScanLineAnimation},
    permission::{FixedPermission, PermissionStatus},
    scanning::{LoggingSink, ScanComponents, ScannerController, ScanWindowTracker},
    settings::ScannerSettings,
};

// Set to true to enable verbose logging in this module
const ENABLE_LOGS: bool = true;

use crate::log_info;

const SCREEN_WIDTH: f32 = 372.0;
const SCREEN_HEIGHT: f32 = 800.0;
const CAMERA_WIDTH: u32 = 640;
const CAMERA_HEIGHT: u32 = 480;

/// Frames the scripted detector cycles through. Only the second one lands a
/// code fully inside the centred 280x280 scan area.
fn demo_script() -> Vec<Vec<Detection>> {
    let inside = Rect::new(270.0, 60.0, 300.0, 500.0);
    let straddling = Rect::new(500.0, 300.0, 360.0, 600.0);

    vec![
        vec![],
        vec![
            Detection::new("XYZ", Some(inside))
                .with_format(BarcodeFormat::QrCode)
                .with_raw_value("XYZ"),
            Detection::new("XYZ", Some(straddling)).with_format(BarcodeFormat::QrCode),
            Detection::new("4006381333931", Some(straddling)).with_format(BarcodeFormat::Ean13),
        ],
        vec![Detection::new("4006381333931", Some(straddling)).with_format(BarcodeFormat::Ean13)],
        vec![Detection::new("NO-GEOMETRY", None).with_format(BarcodeFormat::Code128)],
    ]
}

/// Headless scan session: synthetic camera, scripted detector, logging sink.
pub async fn run_demo(settings: ScannerSettings, run_for: Duration) -> Result<()> {
    let tracker = ScanWindowTracker::new();

    let components = ScanComponents {
        source: Arc::new(SyntheticCamera::new(CAMERA_WIDTH, CAMERA_HEIGHT)),
        detector: Arc::new(ScriptedDetector::cycling(demo_script())),
        sink: Arc::new(LoggingSink),
        permission: Arc::new(FixedPermission(PermissionStatus::Authorized)),
    };
    let controller = ScannerController::new(settings.clone(), tracker.handle(), components);

    let mut animator = OverlayAnimator::new(
        ScanLineAnimation::from(&settings.scan_line),
        settings.overlay_fps,
    );
    let scan_line = animator.subscribe();
    animator.start();

    controller.start_scanning().await?;

    // First layout pass lands after the camera is already streaming.
    tokio::time::sleep(Duration::from_millis(300)).await;
    let area = centered_scan_area(SCREEN_WIDTH, SCREEN_HEIGHT, settings.scan_area_size);
    let window = tracker.on_layout(area.x, area.y, area.width, area.height);
    log_info!("scan area laid out at {:?}", window);

    tokio::time::sleep(run_for).await;

    controller.stop_scanning().await?;
    animator.stop();

    let snapshot = controller.get_snapshot().await;
    log_info!("scan line parked at {:.1}", *scan_line.borrow());
    let report = serde_json::to_string_pretty(&snapshot).context("failed to serialise snapshot")?;
    println!("{report}");

    Ok(())
}
