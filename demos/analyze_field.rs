use std::env;

use anyhow::Result;
use rsfield::analysis::pipeline::FieldAnalysis;
use rsfield::collect::sensing::client::SensingApiClient;

/// Example: full field analysis against a live sensing backend.
/// Requires FIELD_SENSING_API_URL and FIELD_SENSING_CREDENTIALS to be set.
fn main() -> Result<()> {
    println!("=== Example: Field vegetation health analysis ===\n");

    let base_url =
        env::var("FIELD_SENSING_API_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    println!("Sensing backend: {}", base_url);

    let client = SensingApiClient::connect(&base_url)?;

    // An irrigated field near Bordeaux, France (WGS84).
    let rings = vec![vec![
        [-0.55, 44.80],
        [-0.54, 44.80],
        [-0.54, 44.81],
        [-0.55, 44.81],
        [-0.55, 44.80],
    ]];

    println!("Field outer ring: {} points", rings[0].len());
    println!("Window: trailing year, cloud ceiling 20%, scale 10 m/pixel\n");

    println!("Running the pipeline...");
    println!("  - Searching for cloud-free Sentinel-2 scenes...");
    println!("  - Requesting NDVI = (B8 - B4) / (B8 + B4)...");
    println!("  - Reducing to a spatial mean over the field...");

    let analysis = FieldAnalysis::from_rings(&rings)?;
    match analysis.run(&client) {
        Ok(report) => {
            println!("\nAnalysis complete!");
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Err(err) => {
            println!("\nAnalysis failed (HTTP {})", err.http_status());
            println!("{}", serde_json::to_string_pretty(&err.to_response())?);
        }
    }

    Ok(())
}
