use std::time::Duration;

use hero_gallery::events::{GalleryCommand, GalleryFrame, ImageFailed, ScrollTick};
use hero_gallery::gallery::ImageSet;
use hero_gallery::motion::profile::MotionProfile;
use hero_gallery::tasks::controller::{self, ControllerSeed};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

struct Harness {
    cmd_tx: mpsc::Sender<GalleryCommand>,
    fail_tx: mpsc::Sender<ImageFailed>,
    scroll_tx: mpsc::Sender<ScrollTick>,
    frame_rx: mpsc::Receiver<GalleryFrame>,
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<anyhow::Result<()>>,
}

fn spawn_controller() -> Harness {
    let seed = ControllerSeed {
        images: ImageSet::new(
            "images/portrait.jpg",
            &["images/a.jpg".to_owned(), "images/b.jpg".to_owned()],
        ),
        profile: MotionProfile::default(),
        name: "Jane Doe".to_owned(),
        placeholder: "placeholder.svg".to_owned(),
    };
    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (fail_tx, fail_rx) = mpsc::channel(16);
    let (scroll_tx, scroll_rx) = mpsc::channel(16);
    let (frame_tx, frame_rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(controller::run(
        seed,
        cmd_rx,
        fail_rx,
        scroll_rx,
        frame_tx,
        cancel.clone(),
    ));

    Harness {
        cmd_tx,
        fail_tx,
        scroll_tx,
        frame_rx,
        cancel,
        handle,
    }
}

async fn next_frame(h: &mut Harness) -> GalleryFrame {
    tokio::time::timeout(Duration::from_secs(2), h.frame_rx.recv())
        .await
        .expect("timeout waiting for frame")
        .expect("frame channel closed")
}

async fn shutdown(h: Harness) {
    h.cancel.cancel();
    let _ = h.handle.await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn commands_drive_navigation_and_labels() {
    let mut h = spawn_controller();

    let initial = next_frame(&mut h).await;
    assert_eq!(initial.index, 0);
    assert_eq!(initial.count, 3);
    assert_eq!(initial.source, "images/portrait.jpg");
    assert_eq!(initial.label, "Jane Doe - Photo 1");
    assert!(!initial.zoomed && !initial.dialog_open && !initial.failed);

    h.cmd_tx.send(GalleryCommand::Advance).await.unwrap();
    let frame = next_frame(&mut h).await;
    assert_eq!(frame.index, 1);
    assert_eq!(frame.source, "images/a.jpg");
    assert_eq!(frame.label, "Jane Doe - Photo 2");

    h.cmd_tx.send(GalleryCommand::Advance).await.unwrap();
    next_frame(&mut h).await;
    h.cmd_tx.send(GalleryCommand::Advance).await.unwrap();
    let wrapped = next_frame(&mut h).await;
    assert_eq!(wrapped.index, 0, "forward navigation should wrap");

    h.cmd_tx.send(GalleryCommand::Retreat).await.unwrap();
    let back = next_frame(&mut h).await;
    assert_eq!(back.index, 2, "backward navigation should wrap");

    shutdown(h).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn zoom_and_dialog_flags_round_trip() {
    let mut h = spawn_controller();
    next_frame(&mut h).await;

    h.cmd_tx.send(GalleryCommand::ToggleZoom).await.unwrap();
    assert!(next_frame(&mut h).await.zoomed);

    h.cmd_tx.send(GalleryCommand::Advance).await.unwrap();
    let frame = next_frame(&mut h).await;
    assert!(!frame.zoomed, "navigation must reset zoom");

    h.cmd_tx
        .send(GalleryCommand::SetDialogOpen(true))
        .await
        .unwrap();
    assert!(next_frame(&mut h).await.dialog_open);
    h.cmd_tx
        .send(GalleryCommand::SetDialogOpen(false))
        .await
        .unwrap();
    assert!(!next_frame(&mut h).await.dialog_open);

    shutdown(h).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failure_substitutes_the_placeholder_until_navigation() {
    let mut h = spawn_controller();
    next_frame(&mut h).await;

    h.fail_tx
        .send(ImageFailed("images/portrait.jpg".to_owned()))
        .await
        .unwrap();
    let failed = next_frame(&mut h).await;
    assert!(failed.failed);
    assert_eq!(failed.source, "placeholder.svg");
    assert_eq!(failed.label, "Jane Doe - Photo 1", "label keeps the slot");

    h.cmd_tx.send(GalleryCommand::Advance).await.unwrap();
    let moved = next_frame(&mut h).await;
    assert!(!moved.failed, "failure must not outlive its image");
    assert_eq!(moved.source, "images/a.jpg");

    shutdown(h).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stale_failures_are_ignored() {
    let mut h = spawn_controller();
    next_frame(&mut h).await;

    h.fail_tx
        .send(ImageFailed("images/b.jpg".to_owned()))
        .await
        .unwrap();

    // Ensure no frame arrives within a short window
    let none = tokio::time::timeout(Duration::from_millis(300), h.frame_rx.recv()).await;
    assert!(
        none.is_err(),
        "a failure for another reference should not produce a frame"
    );

    shutdown(h).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn scroll_ticks_re_derive_the_motion_values() {
    let mut h = spawn_controller();
    next_frame(&mut h).await;

    h.scroll_tx.send(ScrollTick(0.5)).await.unwrap();
    let mid = next_frame(&mut h).await;
    assert!((mid.motion.progress - 0.5).abs() < 1e-6);
    assert!((mid.motion.offset_pct - 15.0).abs() < 1e-4);

    h.scroll_tx.send(ScrollTick(7.0)).await.unwrap();
    let clamped = next_frame(&mut h).await;
    assert!((clamped.motion.progress - 1.0).abs() < 1e-6);
    assert!((clamped.motion.offset_pct - 30.0).abs() < 1e-4);
    assert!((clamped.motion.scale - 0.9).abs() < 1e-4);

    // Scroll position survives gallery mutations.
    h.cmd_tx.send(GalleryCommand::Advance).await.unwrap();
    let after_advance = next_frame(&mut h).await;
    assert!((after_advance.motion.progress - 1.0).abs() < 1e-6);

    shutdown(h).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn mark_failed_command_is_idempotent() {
    let mut h = spawn_controller();
    next_frame(&mut h).await;

    h.cmd_tx.send(GalleryCommand::MarkFailed).await.unwrap();
    assert!(next_frame(&mut h).await.failed);
    h.cmd_tx.send(GalleryCommand::MarkFailed).await.unwrap();
    assert!(next_frame(&mut h).await.failed);

    shutdown(h).await;
}
