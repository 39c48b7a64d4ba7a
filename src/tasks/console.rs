use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::sync::mpsc::Sender;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::events::{GalleryCommand, ImageFailed, ScrollTick};

/// A parsed console line.
#[derive(Debug, Clone, PartialEq)]
enum ConsoleInput {
    Command(GalleryCommand),
    Failure(ImageFailed),
    Scroll(f32),
    Quit,
}

// One command per line:
//   next/n, prev/p, zoom/z, open, close,
//   fail            (mark the current image failed)
//   fail <ref>      (simulate the loader failing a specific reference)
//   scroll <frac>   (push viewport progress in [0, 1])
//   quit/q
fn parse(line: &str) -> Option<ConsoleInput> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    match head {
        "next" | "n" => Some(ConsoleInput::Command(GalleryCommand::Advance)),
        "prev" | "p" => Some(ConsoleInput::Command(GalleryCommand::Retreat)),
        "zoom" | "z" => Some(ConsoleInput::Command(GalleryCommand::ToggleZoom)),
        "open" => Some(ConsoleInput::Command(GalleryCommand::SetDialogOpen(true))),
        "close" => Some(ConsoleInput::Command(GalleryCommand::SetDialogOpen(false))),
        "fail" => match words.next() {
            Some(reference) => Some(ConsoleInput::Failure(ImageFailed(reference.to_owned()))),
            None => Some(ConsoleInput::Command(GalleryCommand::MarkFailed)),
        },
        "scroll" => {
            let frac = words.next()?.parse::<f32>().ok()?;
            Some(ConsoleInput::Scroll(frac))
        }
        "quit" | "q" => Some(ConsoleInput::Quit),
        _ => None,
    }
}

/// Drive the controller from stdin, one command per line. Exits on EOF,
/// `quit`, or cancellation.
pub async fn run(
    commands: Sender<GalleryCommand>,
    failures: Sender<ImageFailed>,
    scroll: Sender<ScrollTick>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        select! {
            _ = cancel.cancelled() => break,

            maybe_line = lines.next_line() => {
                let Some(line) = maybe_line? else {
                    info!("stdin closed; console driver exiting");
                    break;
                };
                match parse(&line) {
                    Some(ConsoleInput::Command(cmd)) => {
                        if commands.send(cmd).await.is_err() {
                            break;
                        }
                    }
                    Some(ConsoleInput::Failure(ev)) => {
                        if failures.send(ev).await.is_err() {
                            break;
                        }
                    }
                    Some(ConsoleInput::Scroll(frac)) => {
                        if scroll.send(ScrollTick(frac)).await.is_err() {
                            break;
                        }
                    }
                    Some(ConsoleInput::Quit) => {
                        cancel.cancel();
                        break;
                    }
                    None => {
                        if !line.trim().is_empty() {
                            warn!(line = line.trim(), "unrecognized console input");
                        }
                    }
                }
            }
        }
    }
    Ok(())
}
