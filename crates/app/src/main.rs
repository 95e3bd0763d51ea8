//! Sketchpad - headless stroke replay
//!
//! Usage: `sketchpad [SCRIPT.json] [--out IMAGE.ppm]`
//!
//! Replays a timed pointer script (or a built-in pen gesture) through the
//! drawing session into a CPU surface, then prints the final diagnostics as a
//! `SketchToUi::Stats` JSON message.

use std::path::PathBuf;

use sketching::{channel, CpuSurface, Session, SessionNotice, SketchError};
use sketchpad_config::{ConfigError, DisplayConfig, Tunables};
use sketchpad_ipc::{parse_script, IpcError, SketchToUi};
use tracing::{debug, error, info};

mod logging;
mod replay;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("IPC error: {0}")]
    Ipc(#[from] IpcError),
    #[error("Session error: {0}")]
    Sketch(#[from] SketchError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Event loop task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Usage: sketchpad [SCRIPT.json] [--out IMAGE.ppm]")]
    Usage,
}

#[derive(Debug, Default)]
struct Args {
    script: Option<PathBuf>,
    out: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self, AppError> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--out" => parsed.out = Some(args.next().ok_or(AppError::Usage)?.into()),
                "-h" | "--help" => return Err(AppError::Usage),
                _ if parsed.script.is_none() => parsed.script = Some(arg.into()),
                _ => return Err(AppError::Usage),
            }
        }
        Ok(parsed)
    }
}

fn main() {
    logging::init();

    if let Err(e) = run() {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let args = Args::parse(std::env::args().skip(1))?;
    let tunables = Tunables::from_env()?;
    let viewport = DisplayConfig::default();

    info!(
        "Starting Sketchpad replay: K={}, style={:?}, {}x{}",
        tunables.smoothing, tunables.stroke_style, viewport.width, viewport.height
    );

    let inputs = match &args.script {
        Some(path) => {
            info!("Loading pointer script from {}", path.display());
            parse_script(&std::fs::read_to_string(path)?)?
        }
        None => {
            info!("No script given, replaying built-in gesture");
            replay::demo_script()
        }
    };
    let events = replay::interleave_frames(&inputs, replay::DISPLAY_HZ);
    debug!("{} inputs expanded to {} events", inputs.len(), events.len());

    let mut session = Session::new(tunables, viewport);
    session.subscribe(|notice| match notice {
        SessionNotice::StrokeFinished { index, samples } => {
            info!("Stroke {} finished with {} samples", index, samples)
        }
        SessionNotice::StrokeStarted { .. } | SessionNotice::FrameRendered(_) => {}
    });

    let runtime = tokio::runtime::Runtime::new()?;
    let (session, surface) = runtime.block_on(async move {
        let (handle, event_loop) = channel(session, CpuSurface::new(&viewport));
        let task = tokio::spawn(event_loop.run());

        for event in events {
            handle.send(event)?;
        }
        handle.shutdown()?;

        Ok::<_, AppError>(task.await?)
    })?;

    let stats = SketchToUi::Stats {
        refresh_rate: session.refresh_rate(),
        sampling_rate: session.sampling_rate(),
        strokes: session.image().stroke_count(),
        samples: session.image().sample_count(),
    };
    println!("{}", stats.to_json()?);
    info!("{} pixels covered", surface.covered_pixel_count());

    if let Some(path) = &args.out {
        write_ppm(&surface, path)?;
        info!("Wrote {}x{} image to {}", surface.width, surface.height, path.display());
    }

    Ok(())
}

/// Write the surface as a binary PPM, alpha dropped
fn write_ppm(surface: &CpuSurface, path: &std::path::Path) -> Result<(), AppError> {
    let mut data = format!("P6\n{} {}\n255\n", surface.width, surface.height).into_bytes();
    data.reserve((surface.width * surface.height * 3) as usize);

    for y in 0..surface.height {
        for x in 0..surface.width {
            let pixel = surface.get_pixel(x, y).unwrap_or([1.0; 4]);
            data.extend(
                pixel[..3]
                    .iter()
                    .map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8),
            );
        }
    }

    std::fs::write(path, data)?;
    Ok(())
}
