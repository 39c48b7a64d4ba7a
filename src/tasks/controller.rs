use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::events::{GalleryCommand, GalleryFrame, ImageFailed, ScrollTick};
use crate::gallery::{GalleryState, ImageSet};
use crate::motion::profile::MotionProfile;

/// Everything the controller needs beyond its channels.
#[derive(Debug, Clone)]
pub struct ControllerSeed {
    pub images: ImageSet,
    pub profile: MotionProfile,
    pub name: String,
    pub placeholder: String,
}

/// Owns the gallery state for one mount.
///
/// Rules:
/// - Commands mutate the state directly; every mutation emits a frame.
/// - A load failure only counts when it names the currently displayed
///   reference; stale failures for other references are dropped.
/// - Scroll ticks re-derive the motion values and emit a frame without
///   touching the gallery state.
pub async fn run(
    seed: ControllerSeed,
    mut commands: Receiver<GalleryCommand>,
    mut failures: Receiver<ImageFailed>,
    mut scroll: Receiver<ScrollTick>,
    frames: Sender<GalleryFrame>,
    cancel: CancellationToken,
) -> Result<()> {
    let ControllerSeed {
        images,
        profile,
        name,
        placeholder,
    } = seed;
    let mut state = GalleryState::new(images);
    let mut progress = 0.0f32;

    // Initial frame so the host can render before any input arrives.
    if !emit(&frames, snapshot(&state, &name, &placeholder, &profile, progress)).await {
        return Ok(());
    }

    loop {
        select! {
            _ = cancel.cancelled() => break,

            Some(cmd) = commands.recv() => {
                debug!(?cmd, "gallery command");
                match cmd {
                    GalleryCommand::Advance => state.advance(),
                    GalleryCommand::Retreat => state.retreat(),
                    GalleryCommand::ToggleZoom => state.toggle_zoom(),
                    GalleryCommand::SetDialogOpen(open) => state.set_dialog_open(open),
                    GalleryCommand::MarkFailed => state.mark_failed(),
                }
                if !emit(&frames, snapshot(&state, &name, &placeholder, &profile, progress)).await {
                    break;
                }
            }

            Some(ImageFailed(reference)) = failures.recv() => {
                if reference == state.current_image() {
                    debug!(reference = %reference, "image load failed");
                    state.mark_failed();
                    if !emit(&frames, snapshot(&state, &name, &placeholder, &profile, progress)).await {
                        break;
                    }
                } else {
                    debug!(reference = %reference, "stale load failure ignored");
                }
            }

            Some(ScrollTick(p)) = scroll.recv() => {
                if p.is_finite() {
                    progress = p.clamp(0.0, 1.0);
                }
                if !emit(&frames, snapshot(&state, &name, &placeholder, &profile, progress)).await {
                    break;
                }
            }

            else => break,
        }
    }
    Ok(())
}

async fn emit(frames: &Sender<GalleryFrame>, frame: GalleryFrame) -> bool {
    if frames.send(frame).await.is_err() {
        warn!("frame channel closed");
        return false;
    }
    true
}

fn snapshot(
    state: &GalleryState,
    name: &str,
    placeholder: &str,
    profile: &MotionProfile,
    progress: f32,
) -> GalleryFrame {
    let failed = state.has_error();
    let source = if failed {
        placeholder.to_owned()
    } else {
        state.current_image().to_owned()
    };
    GalleryFrame {
        source,
        label: format!("{} - Photo {}", name, state.cursor() + 1),
        index: state.cursor(),
        count: state.len(),
        zoomed: state.is_zoomed(),
        dialog_open: state.is_dialog_open(),
        failed,
        motion: profile.frame(progress),
    }
}
