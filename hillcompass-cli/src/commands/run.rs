//! Run command - replay a sensor trace through a compass session.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::ValueEnum;
use hillcompass::config::ConfigFile;
use hillcompass::heading::HeadingStrategy;
use hillcompass::permission::PermissionState;
use hillcompass::provider::{HttpLandmarkProvider, LandmarkProvider, StaticLandmarkProvider};
use hillcompass::sensor::{ChannelSensorSource, SensorFeed};
use hillcompass::session::{CompassSession, OverlayFrame, SessionHandle};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::trace::{parse_landmarks, parse_line, TraceLine};
use crate::error::CliError;

/// Heading source selection for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum StrategyArg {
    /// Platform-fused compass heading
    Fused,
    /// Raw magnetometer atan2 heading
    Magnetometer,
}

impl From<StrategyArg> for HeadingStrategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Fused => HeadingStrategy::Fused,
            StrategyArg::Magnetometer => HeadingStrategy::Magnetometer,
        }
    }
}

/// How frames are printed.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
pub enum OutputFormat {
    /// One JSON object per frame
    Json,
    /// Status line plus one line per marker
    Text,
}

/// Arguments for the run command.
pub struct RunArgs {
    pub trace: Option<PathBuf>,
    pub landmarks: Option<PathBuf>,
    pub url: Option<String>,
    pub strategy: Option<StrategyArg>,
    pub format: OutputFormat,
    pub linger_ms: u64,
}

/// Run the run command.
pub fn run(args: RunArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let _guard = hillcompass::logging::init_logging(&config.logging)?;

    let provider = build_provider(&config, &args)?;

    let mut session_config = config
        .session_config()
        .with_permissions(PermissionState::granted());
    if let Some(strategy) = args.strategy {
        session_config.heading.strategy = strategy.into();
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Received shutdown signal, stopping session...");
        signal_token.cancel();
    })
    .map_err(|e| CliError::Config(format!("Failed to set signal handler: {}", e)))?;

    runtime.block_on(async move {
        let (source, feed) = ChannelSensorSource::new("trace");
        let (session, handle) = CompassSession::new(session_config, provider, vec![Box::new(source)]);

        let session_task = tokio::spawn(session.run(shutdown.clone()));
        let printer_task = tokio::spawn(print_frames(handle.frames(), args.format));

        let replaying = async {
            match &args.trace {
                Some(path) => {
                    let file = tokio::fs::File::open(path).await?;
                    replay(BufReader::new(file), &feed, &handle).await
                }
                None => replay(BufReader::new(tokio::io::stdin()), &feed, &handle).await,
            }
        };

        let result = tokio::select! {
            _ = shutdown.cancelled() => Ok(()),
            result = replaying => result,
        };

        if result.is_ok() && !shutdown.is_cancelled() {
            // Let in-flight lookups land before stopping
            tokio::select! {
                _ = shutdown.cancelled() => {}
                _ = tokio::time::sleep(Duration::from_millis(args.linger_ms)) => {}
            }
        }

        shutdown.cancel();
        let _ = session_task.await;
        let _ = printer_task.await;

        let snapshot = handle.metrics();
        eprintln!();
        eprintln!("Session Summary");
        eprintln!("───────────────");
        eprintln!("  Heading samples:  {}", snapshot.heading_samples);
        eprintln!("  Position samples: {}", snapshot.position_samples);
        eprintln!(
            "  Lookups:          {} issued, {} ok, {} failed, {} aborted, {} stale",
            snapshot.queries_issued,
            snapshot.queries_succeeded,
            snapshot.queries_failed,
            snapshot.queries_aborted,
            snapshot.stale_responses
        );
        eprintln!("  Frames:           {}", snapshot.frames_published);

        result
    })
}

fn build_provider(
    config: &ConfigFile,
    args: &RunArgs,
) -> Result<Arc<dyn LandmarkProvider>, CliError> {
    if let Some(path) = &args.landmarks {
        let content = std::fs::read_to_string(path)?;
        let landmarks = parse_landmarks(&content).map_err(|e| {
            CliError::Config(format!("Invalid landmark file {}: {}", path.display(), e))
        })?;
        info!(count = landmarks.len(), path = %path.display(), "Using static landmarks");
        return Ok(Arc::new(StaticLandmarkProvider::new(landmarks)));
    }

    let mut lookup = config.lookup.clone();
    if let Some(url) = &args.url {
        lookup.base_url = url.clone();
    }
    Ok(Arc::new(HttpLandmarkProvider::from_config(lookup)?))
}

/// Feed every trace line into the session.
async fn replay<R>(reader: R, feed: &SensorFeed, handle: &SessionHandle) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    let mut number = 0;

    while let Some(line) = lines.next_line().await? {
        number += 1;
        let parsed = parse_line(&line).map_err(|message| CliError::Trace {
            line: number,
            message,
        })?;

        match parsed {
            Some(TraceLine::Sensor(event)) => {
                if !feed.send(event).await {
                    debug!(line = number, kind = event.kind(), "Event dropped, sensors not subscribed");
                }
            }
            Some(TraceLine::Permissions(state)) => handle.set_permissions(state).await?,
            None => {}
        }
    }

    info!(lines = number, "Trace finished");
    Ok(())
}

async fn print_frames(mut frames: watch::Receiver<OverlayFrame>, format: OutputFormat) {
    while frames.changed().await.is_ok() {
        let frame = frames.borrow_and_update().clone();
        match format {
            OutputFormat::Json => match serde_json::to_string(&frame) {
                Ok(json) => println!("{}", json),
                Err(e) => warn!(error = %e, "Failed to encode frame"),
            },
            OutputFormat::Text => print_text(&frame),
        }
    }
}

fn print_text(frame: &OverlayFrame) {
    let mut status = frame.headline();
    if frame.approximate {
        status.push_str(" (approx)");
    }
    if let Some(error) = &frame.last_error {
        status.push_str(&format!(" [{}]", error));
    }
    println!("#{} {}", frame.sequence, status);

    for transform in &frame.transforms {
        println!(
            "    {:>+7.1}°  ({:>7.1}, {:>7.1})  {}",
            transform.offset_degrees,
            transform.screen_position.x,
            transform.screen_position.y,
            transform.landmark.name
        );
    }
}
