use crate::residues::ResidueExt;
use pdbtbx::*;
use polars::prelude::*;
use std::path::Path;

/// Open an atomic data file with [`pdbtbx::open`] and remove non-protein residues.
pub fn load_model(input_file: &String) -> (PDB, Vec<PDBError>) {
    // Load file as complex structure
    let (mut pdb, errors) = pdbtbx::ReadOptions::default()
        .set_only_atomic_coords(true)
        .set_level(pdbtbx::StrictnessLevel::Loose)
        .read(input_file)
        .unwrap();

    // Remove non-protein residues from model
    pdb.remove_residues_by(|res| res.resn().is_none());

    (pdb, errors)
}

/// Run a closure inside a rayon thread pool of the given size.
///
/// `num_threads <= 0` picks one thread per available core.
pub fn run_with_threads<T, F>(num_threads: isize, f: F) -> T
where
    T: Send,
    F: FnOnce() -> T + Send,
{
    let num_threads = if num_threads <= 0 {
        0
    } else {
        num_threads as usize
    };
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build()
        .unwrap();
    pool.install(f)
}

/// Write a DataFrame to a CSV file
pub fn write_df_to_file(df: &mut DataFrame, file_path: &Path, file_type: DataFrameFileType) {
    let file_suffix = file_type.to_string();
    let mut file = std::fs::File::create(file_path.with_extension(file_suffix)).unwrap();
    match file_type {
        DataFrameFileType::Csv => {
            CsvWriter::new(&mut file).finish(df).unwrap();
        }
        DataFrameFileType::Parquet => {
            ParquetWriter::new(&mut file).finish(df).unwrap();
        }
        DataFrameFileType::Json => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::Json)
                .finish(df)
                .unwrap();
        }
        DataFrameFileType::NDJson => {
            JsonWriter::new(&mut file)
                .with_json_format(JsonFormat::JsonLines)
                .finish(df)
                .unwrap();
        }
    }
}

/// File format for writing DataFrames.
#[derive(clap::ValueEnum, Clone, Debug, Copy)]
pub enum DataFrameFileType {
    /// Comma-separated values
    Csv,
    /// Parquet columnar storage
    Parquet,
    /// Standard JSON
    Json,
    /// Newline-delimited JSON
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
    fn load_model_keeps_protein_residues() {
        let root = env!("CARGO_MANIFEST_DIR");
        let path = format!("{}/{}", root, "test-data/synthetic.pdb");

        let (pdb, _) = load_model(&path);
        assert_eq!(pdb.chain_count(), 2);
        assert_eq!(pdb.residue_count(), 4);
        // 9 LYS + 11 ARG + 11 PHE + 12 TYR atoms
        assert_eq!(pdb.atom_count(), 43);
    }

    #[test]
    fn run_with_threads_returns_closure_result() {
        let total = run_with_threads(1, || (0..10).sum::<i32>());
        assert_eq!(total, 45);
        let total = run_with_threads(0, || (0..10).sum::<i32>());
        assert_eq!(total, 45);
    }
}
