use anyhow::Result;
use rsfield::analysis::pipeline::FieldAnalysis;

/// Example: what each polygon defect looks like at the caller boundary.
fn main() -> Result<()> {
    println!("=== Example: polygon validation error taxonomy ===\n");

    let cases: Vec<(&str, Vec<Vec<[f64; 2]>>)> = vec![
        ("no rings at all", vec![]),
        (
            "outer ring too short",
            vec![vec![[0.0, 45.0], [0.1, 45.0], [0.0, 45.0]]],
        ),
        (
            "outer ring not closed",
            vec![vec![[0.0, 45.0], [0.1, 45.0], [0.1, 45.1], [0.0, 45.1]]],
        ),
        (
            "latitude out of range",
            vec![vec![[0.0, 45.0], [0.1, 95.0], [0.1, 45.1], [0.0, 45.0]]],
        ),
        (
            "non-finite coordinate",
            vec![vec![[0.0, 45.0], [f64::NAN, 45.0], [0.1, 45.1], [0.0, 45.0]]],
        ),
    ];

    for (label, rings) in cases {
        match FieldAnalysis::from_rings(&rings) {
            Ok(_) => println!("{:<28} -> accepted", label),
            Err(err) => {
                println!(
                    "{:<28} -> HTTP {} {}: {}",
                    label,
                    err.http_status(),
                    err.kind(),
                    err.detail()
                );
            }
        }
    }

    Ok(())
}
