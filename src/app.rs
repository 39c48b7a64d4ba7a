//! Channel wiring between the console driver, the controller and the host
//! output.

use anyhow::Result;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::Configuration;
use crate::entrance::{EntranceTimeline, HeroElement};
use crate::events::GalleryFrame;
use crate::tasks::{console, controller};

/// Run the interactive demo: stdin commands in, frame snapshots logged out.
pub async fn run(cfg: Configuration) -> Result<()> {
    let mut rng = rand::rng();
    let seed = controller::ControllerSeed {
        images: cfg.image_set(),
        profile: cfg.motion.choose_profile(&mut rng),
        name: cfg.name.clone(),
        placeholder: cfg.placeholder_image.clone(),
    };

    let timeline = EntranceTimeline::from_options(&cfg.entrance);
    info!(
        settled = %humantime::format_duration(timeline.settled_after()),
        "entrance timeline ready"
    );

    let (cmd_tx, cmd_rx) = mpsc::channel(16);
    let (fail_tx, fail_rx) = mpsc::channel(16);
    let (scroll_tx, scroll_rx) = mpsc::channel(64);
    let (frame_tx, mut frame_rx) = mpsc::channel::<GalleryFrame>(16);
    let cancel = CancellationToken::new();

    let controller = tokio::spawn(controller::run(
        seed,
        cmd_rx,
        fail_rx,
        scroll_rx,
        frame_tx,
        cancel.clone(),
    ));
    let console = tokio::spawn(console::run(
        cmd_tx,
        fail_tx,
        scroll_tx,
        cancel.clone(),
    ));

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("ctrl-c received; shutting down");
                cancel.cancel();
                break;
            }
            maybe_frame = frame_rx.recv() => {
                let Some(frame) = maybe_frame else { break };
                info!(
                    source = %frame.source,
                    label = %frame.label,
                    index = frame.index,
                    count = frame.count,
                    zoomed = frame.zoomed,
                    dialog = frame.dialog_open,
                    failed = frame.failed,
                    motion = %frame.motion,
                    "frame"
                );
            }
        }
    }

    cancel.cancel();
    controller.await??;
    console.await??;
    Ok(())
}

/// Log sampled motion tables and entrance poses instead of running
/// interactively. Useful for eyeballing a configuration without a host.
pub fn sweep(cfg: &Configuration, steps: usize) {
    let steps = steps.max(1);

    for (name, profile) in cfg.motion.profiles() {
        info!(profile = %name, "motion sweep");
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            info!(progress = %format!("{t:.2}"), values = %profile.frame(t), "sample");
        }
    }

    let timeline = EntranceTimeline::from_options(&cfg.entrance);
    let settled = timeline.settled_after();
    info!(settled = %humantime::format_duration(settled), "entrance sweep");
    for i in 0..=steps {
        let elapsed = settled.mul_f64(i as f64 / steps as f64);
        for element in HeroElement::ALL {
            let pose = timeline.pose_at(*element, elapsed);
            info!(
                element = element.as_str(),
                at_ms = elapsed.as_millis() as u64,
                opacity = %format!("{:.2}", pose.opacity),
                offset_px = %format!("{:.1}", pose.offset_px),
                scale = %format!("{:.3}", pose.scale),
                "pose"
            );
        }
    }
}
