//! Persistence of named result arrays.

use anyhow::{Context, Result};
use latsim_core::ResultSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Writes the result set to `path` as a pretty-printed JSON object keyed by
/// result name.
pub fn write_results(path: &Path, results: &ResultSet) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("creating result file {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), results)
        .with_context(|| format!("writing results to {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use latsim_core::ResultData;
    use std::fs;

    #[test]
    fn results_round_trip_through_json() {
        let path = std::env::temp_dir().join(format!(
            "latsim_output_test_{}.json",
            std::process::id()
        ));

        let mut results = ResultSet::new();
        results.push("equilibrium_steps", ResultData::Series(vec![7.0, 0.0]));
        results.push("runs", ResultData::Scalar(2.0));
        write_results(&path, &results).expect("write");

        let raw = fs::read_to_string(&path).expect("read back");
        let value: serde_json::Value = serde_json::from_str(&raw).expect("parse");
        assert_eq!(value["equilibrium_steps"][0], 7.0);
        assert_eq!(value["runs"], 2.0);

        let _ = fs::remove_file(&path);
    }
}
