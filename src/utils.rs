//! Thread pools and DataFrame output.

use crate::error::{PisaError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};

/// Run `op` on a rayon pool with `num_threads` threads (0 for all cores).
pub fn run_with_threads<T, F>(num_threads: usize, op: F) -> Result<T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()?;
    Ok(pool.install(op))
}

/// Write a DataFrame next to its input as `{stem}.{ext}` and return the written path.
pub fn write_df_to_file(
    df: &mut DataFrame,
    file_path: &Path,
    file_type: DataFrameFileType,
) -> Result<PathBuf> {
    let file_suffix = file_type.to_string();
    let output = file_path.with_extension(file_suffix);
    let mut file = std::fs::File::create(&output).map_err(|e| PisaError::io(&output, e))?;
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df)?;
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)?;
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)?;
        }
    }
    Ok(output)
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy, Default, PartialEq, Eq)]
pub enum DataFrameFileType {
    /// Comma-separated values
    #[default]
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
    #[value(name = "ndjson")]
    NDJson,
}

impl std::fmt::Display for DataFrameFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            DataFrameFileType::Csv => write!(f, "csv"),
            DataFrameFileType::Parquet => write!(f, "parquet"),
            DataFrameFileType::Json => write!(f, "json"),
            DataFrameFileType::NDJson => write!(f, "ndjson"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_csv_with_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut df = df!(
            "chain" => ["A", "B"],
            "resi" => [1i32, 2],
        )
        .unwrap();

        let written =
            write_df_to_file(&mut df, &dir.path().join("Table"), DataFrameFileType::Csv).unwrap();
        assert_eq!(written, dir.path().join("Table.csv"));

        let content = std::fs::read_to_string(written).unwrap();
        assert_eq!(content, "chain,resi\nA,1\nB,2\n");
    }

    #[test]
    fn format_names_match_extensions() {
        use clap::ValueEnum;

        for file_type in DataFrameFileType::value_variants() {
            let name = file_type.to_possible_value().unwrap();
            assert_eq!(name.get_name(), file_type.to_string());
            assert_eq!(
                DataFrameFileType::from_str(&file_type.to_string(), false).unwrap(),
                *file_type
            );
        }
        assert_eq!(
            DataFrameFileType::from_str("ndjson", false).unwrap(),
            DataFrameFileType::NDJson
        );
    }

    #[test]
    fn runs_on_requested_pool() {
        let n = run_with_threads(2, rayon::current_num_threads).unwrap();
        assert_eq!(n, 2);
    }
}
