//! Lookup command - query the landmark service once.

use hillcompass::config::ConfigFile;
use hillcompass::overlay::project_with_layout;
use hillcompass::provider::{HttpLandmarkProvider, LandmarkProvider};
use hillcompass::refresh::GeoPoint;
use hillcompass::{bucket, Heading};
use tracing::info;

use crate::error::CliError;

/// Arguments for the lookup command.
pub struct LookupArgs {
    pub lat: f64,
    pub lon: f64,
    pub url: Option<String>,
    pub radius: Option<f64>,
    pub heading: Option<f64>,
    pub json: bool,
}

/// Run the lookup command.
pub fn run(args: LookupArgs) -> Result<(), CliError> {
    let config = ConfigFile::load()?;
    let _guard = hillcompass::logging::init_logging(&config.logging)?;

    let position = GeoPoint::new(args.lat, args.lon)?;
    let heading = args
        .heading
        .map(|degrees| {
            Heading::from_degrees(degrees)
                .ok_or_else(|| CliError::Config(format!("Invalid heading {}", degrees)))
        })
        .transpose()?;

    let mut lookup = config.lookup.clone();
    if let Some(url) = args.url {
        lookup.base_url = url;
    }
    if let Some(radius) = args.radius {
        lookup.radius = radius;
    }

    let provider = HttpLandmarkProvider::from_config(lookup)?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    info!(%position, url = %provider.config().base_url, "Looking up landmarks");
    let landmarks = runtime.block_on(provider.lookup(position))?;
    let set = bucket(&landmarks);

    if args.json {
        let output = match heading {
            Some(heading) => serde_json::to_string_pretty(&project_with_layout(
                &set,
                heading,
                &config.overlay,
            )),
            None => serde_json::to_string_pretty(&set),
        }
        .map_err(|e| CliError::Config(format!("Failed to encode output: {}", e)))?;
        println!("{}", output);
        return Ok(());
    }

    println!(
        "{} landmarks near {} ({} after bucketing)",
        landmarks.len(),
        position,
        set.len()
    );
    println!();

    match heading {
        Some(heading) => {
            println!("Heading {}", heading);
            println!();
            println!("{:>7}  {:>8}  {:>9}  Name", "Bearing", "Relative", "Distance");
            for transform in project_with_layout(&set, heading, &config.overlay) {
                println!(
                    "{:>6}°  {:>7.1}°  {:>9.2}  {}",
                    transform.key,
                    transform.offset_degrees,
                    transform.landmark.distance,
                    transform.landmark.name
                );
            }
        }
        None => {
            println!("{:>7}  {:>9}  {:>7}  Name", "Bearing", "Distance", "Height");
            for (key, landmark) in &set {
                let height = landmark
                    .height
                    .map(|h| format!("{:.0}", h))
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>6}°  {:>9.2}  {:>7}  {}",
                    key, landmark.distance, height, landmark.name
                );
            }
        }
    }

    Ok(())
}
