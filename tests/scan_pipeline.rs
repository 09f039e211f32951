use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::time::Duration;

use image::GrayImage;
use scanframe_lib::{
    camera::{Frame, FrameSource, ScriptedDetector, SyntheticCamera},
    models::{Detection, Rect},
    overlay::centered_scan_area,
    permission::{FixedPermission, PermissionStatus},
    scanning::{
        AcceptedScan, ChannelSink, ResultSink, ScanComponents, ScanStatus, ScanWindowTracker,
        ScannerController,
    },
    settings::ScannerSettings,
};

/// Sink that holds the reducer up so the frame loop outpaces it.
struct SlowSink {
    accepted: AtomicU64,
    delay: Duration,
}

impl ResultSink for SlowSink {
    fn on_accepted(&self, _scan: &AcceptedScan) {
        std::thread::sleep(self.delay);
        self.accepted.fetch_add(1, Ordering::SeqCst);
    }
}

/// Camera whose driver never advances its frame counter.
struct FrozenCounterCamera {
    captures: AtomicU64,
}

impl FrameSource for FrozenCounterCamera {
    fn capture(&self) -> anyhow::Result<Option<Frame>> {
        self.captures.fetch_add(1, Ordering::SeqCst);
        Ok(Some(Frame::new(1, GrayImage::new(4, 4))))
    }
}

fn inside_box() -> Detection {
    Detection::new("XYZ", Some(Rect::new(270.0, 60.0, 300.0, 500.0)))
}

fn settings(frame_rate_cap: u32) -> ScannerSettings {
    ScannerSettings {
        frame_rate_cap,
        ..ScannerSettings::default()
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn slow_reducer_drops_backlog_instead_of_queueing() {
    let tracker = ScanWindowTracker::new();
    let area = centered_scan_area(372.0, 800.0, 280.0);
    tracker.on_layout(area.x, area.y, area.width, area.height);

    let sink = Arc::new(SlowSink {
        accepted: AtomicU64::new(0),
        delay: Duration::from_millis(60),
    });
    let controller = ScannerController::new(
        settings(200),
        tracker.handle(),
        ScanComponents {
            source: Arc::new(SyntheticCamera::new(8, 8)),
            detector: Arc::new(ScriptedDetector::cycling(vec![vec![inside_box()]])),
            sink: sink.clone(),
            permission: Arc::new(FixedPermission(PermissionStatus::Authorized)),
        },
    );

    controller.start_scanning().await.unwrap();
    tokio::time::sleep(Duration::from_millis(600)).await;
    controller.stop_scanning().await.unwrap();

    let metrics = controller.get_snapshot().await.metrics;
    let accepted = sink.accepted.load(Ordering::SeqCst);
    assert!(accepted >= 1);
    assert_eq!(metrics.verdicts.accepted, accepted);
    assert!(metrics.frame_count > accepted);
    assert!(metrics.superseded_count > 0);
}

#[tokio::test]
async fn layout_changes_are_seen_by_the_next_frame() {
    let tracker = ScanWindowTracker::new();
    tracker.on_layout(0.0, 0.0, 50.0, 50.0);

    let (sink, mut accepted) = ChannelSink::new(256);
    let controller = ScannerController::new(
        settings(100),
        tracker.handle(),
        ScanComponents {
            source: Arc::new(SyntheticCamera::new(8, 8)),
            detector: Arc::new(ScriptedDetector::cycling(vec![vec![inside_box()]])),
            sink: Arc::new(sink),
            permission: Arc::new(FixedPermission(PermissionStatus::Authorized)),
        },
    );

    controller.start_scanning().await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(accepted.try_recv().is_err());

    tracker.on_layout(46.0, 260.0, 280.0, 280.0);
    let scan = tokio::time::timeout(Duration::from_secs(5), accepted.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(scan.detection.payload, "XYZ");
    assert_eq!(scan.scan_window, Rect::new(260.0, 46.0, 326.0, 540.0));

    let state = controller.stop_scanning().await.unwrap();
    assert_eq!(state.status, ScanStatus::Stopped);

    let metrics = controller.get_snapshot().await.metrics;
    assert!(metrics.verdicts.outside_window >= 1);
}

#[tokio::test]
async fn restricted_permission_leaves_the_camera_off() {
    let tracker = ScanWindowTracker::new();
    let camera = Arc::new(SyntheticCamera::new(8, 8));
    let (sink, _rx) = ChannelSink::new(1);
    let controller = ScannerController::new(
        settings(100),
        tracker.handle(),
        ScanComponents {
            source: camera.clone(),
            detector: Arc::new(ScriptedDetector::new(vec![])),
            sink: Arc::new(sink),
            permission: Arc::new(FixedPermission(PermissionStatus::Restricted)),
        },
    );

    let state = controller.start_scanning().await.unwrap();
    assert_eq!(state.status, ScanStatus::CameraUnavailable);
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(camera.frames_captured(), 0);
}

#[tokio::test]
async fn repeated_source_frame_numbers_still_get_a_verdict_each() {
    let tracker = ScanWindowTracker::new();
    let area = centered_scan_area(372.0, 800.0, 280.0);
    tracker.on_layout(area.x, area.y, area.width, area.height);

    let camera = Arc::new(FrozenCounterCamera {
        captures: AtomicU64::new(0),
    });
    let (sink, mut accepted) = ChannelSink::new(256);
    let controller = ScannerController::new(
        settings(100),
        tracker.handle(),
        ScanComponents {
            source: camera.clone(),
            detector: Arc::new(ScriptedDetector::cycling(vec![vec![inside_box()]])),
            sink: Arc::new(sink),
            permission: Arc::new(FixedPermission(PermissionStatus::Authorized)),
        },
    );

    controller.start_scanning().await.unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;
    controller.stop_scanning().await.unwrap();

    let metrics = controller.get_snapshot().await.metrics;
    assert!(camera.captures.load(Ordering::SeqCst) >= 5);
    assert!(metrics.verdicts.accepted >= 5);
    assert!(metrics.verdicts.total() + metrics.superseded_count <= metrics.frame_count);

    let mut last_seq = 0;
    while let Ok(scan) = accepted.try_recv() {
        assert!(scan.frame_seq > last_seq);
        last_seq = scan.frame_seq;
    }
    assert!(last_seq >= 5);
}
