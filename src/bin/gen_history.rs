use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use betsync::synthetic::{ProfileKind, SyntheticConfig, generate_history, history_to_csv};

/// Writes a synthetic wager-history CSV for demos and load testing.
fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut out_path = PathBuf::from("history.csv");
    let mut cfg = SyntheticConfig::default();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sharp" => cfg.profile = ProfileKind::Sharp,
            "--rows" => {
                let rows = iter.next().context("--rows requires a count")?;
                cfg.rows = rows.parse().context("--rows must be a number")?;
            }
            other if !other.starts_with("--") => out_path = PathBuf::from(other),
            other => return Err(anyhow::anyhow!("unexpected argument: {other}")),
        }
    }

    let mut rng = rand::thread_rng();
    let rows = generate_history(&cfg, &mut rng);
    let csv = history_to_csv(&rows);
    fs::write(&out_path, csv).with_context(|| format!("write {}", out_path.display()))?;

    println!("Wrote {} rows to {}", rows.len(), out_path.display());
    Ok(())
}
