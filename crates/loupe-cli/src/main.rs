//! Headless shell around the sampler: prints published samples to stdout
//! and forwards stdin commands. Stands in for a windowed front end.

use loupe_core::{sample_once, Sampler, SamplerCommand, SamplerConfig, SamplerEvent, ScreenPoint};
use loupe_platform::DesktopScreenSource;
use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "loupe=info".into()),
        )
        .try_init();
}

fn main() {
    init_logging();

    if std::env::args().any(|a| a == "--once") {
        run_once();
        return;
    }

    println!("commands: [t]oggle  [c]opy  [o]rigin set  [r]eset origin  [q]uit");

    let handle = Arc::new(Sampler::spawn(
        DesktopScreenSource::new(),
        SamplerConfig::default(),
    ));
    let quitting = Arc::new(AtomicBool::new(false));

    // stdin command loop on its own thread; the main thread prints events.
    {
        let handle = handle.clone();
        let quitting = quitting.clone();
        std::thread::spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(_) => break,
                };
                match line.trim().to_lowercase().as_str() {
                    "t" | "toggle" => handle.send(SamplerCommand::Toggle),
                    "c" | "copy" => handle.send(SamplerCommand::Copy),
                    "o" | "origin" => handle.send(SamplerCommand::SetOrigin),
                    "r" | "reset" => handle.send(SamplerCommand::ResetOrigin),
                    "q" | "quit" => break,
                    "" => {}
                    other => eprintln!("unknown command: {other}"),
                }
            }
            quitting.store(true, Ordering::SeqCst);
            handle.send(SamplerCommand::Shutdown);
        });
    }

    let mut last_line = String::new();
    while !quitting.load(Ordering::SeqCst) {
        let event = match handle.recv_timeout(Duration::from_millis(200)) {
            Some(event) => event,
            None => continue,
        };

        match event {
            SamplerEvent::Sample(sample) => {
                let line = format!(
                    "{}  pos=({},{})  rel=({},{})",
                    sample.color.to_hex(),
                    sample.position.x,
                    sample.position.y,
                    sample.relative.x,
                    sample.relative.y,
                );
                // The cursor mostly sits still; only repaint on change.
                if line != last_line {
                    println!("{line}");
                    last_line = line;
                }
            }
            SamplerEvent::StateChanged { new, .. } => {
                println!("state: {new:?}");
            }
            SamplerEvent::ClipboardText { text } => {
                // The clipboard itself belongs to the windowed shell; here
                // the text just goes to stdout.
                println!("copy: {text}");
            }
            SamplerEvent::Error { message } => {
                error!(%message, "tick failed");
            }
        }
    }
}

/// Take a single sample and print it, without starting the poll loop.
fn run_once() {
    let source = DesktopScreenSource::new();
    match sample_once(&source, ScreenPoint::ZERO, 16, 16) {
        Ok(sample) => {
            println!(
                "{}  pos=({},{})  preview={}",
                sample.color.to_hex(),
                sample.position.x,
                sample.position.y,
                match &sample.image {
                    Some(png) => format!("{} bytes of PNG", png.len()),
                    None => "unavailable".into(),
                },
            );
        }
        Err(e) => {
            error!(error = %e, "sample failed");
            std::process::exit(1);
        }
    }
}
