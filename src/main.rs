use catpi::{
    find_interactions, load_model, run_with_threads, write_df_to_file, DataFrameFileType,
    ScreenConfig,
};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, trace, warn};

/// Screen a protein structure for candidate cation-π interaction sites
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the PDB or mmCIF file to be analyzed
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Name of the output file. Defaults to the input file stem with a
    /// `_catpi` suffix
    #[arg(short = 'f', long = "filename")]
    filename: Option<String>,

    /// Output file type
    #[arg(short = 't', long, default_value_t = DataFrameFileType::Csv)]
    output_format: DataFrameFileType,

    /// Residue names eligible for consideration at all
    /// [default: LYS ARG PHE TRP TYR]
    #[arg(long, num_args = 1..)]
    residues: Option<Vec<String>>,

    /// Exclude backbone atoms (N, CA, C, O, OXT) before any other filter
    #[arg(long, default_value_t = false)]
    exclude_backbone: bool,

    /// Atom names always dropped, regardless of residue
    /// [default: CB NH1 NH2 NE1 NE2 OH]
    #[arg(long, num_args = 1..)]
    exclude_atoms: Option<Vec<String>>,

    /// Bait atoms as RES:ATOM pairs [default: ARG:CZ LYS:NZ]
    #[arg(long, num_args = 1.., value_parser = parse_bait_atom)]
    bait_atoms: Option<Vec<(String, String)>>,

    /// Prey atoms as RES:ATOM1,ATOM2,... entries
    /// [default: TRP:CD2,CE2,CE3,CZ2,CZ3,CH2 PHE:CG,CD1,CD2,CE1,CE2,CZ
    /// TYR:CG,CD1,CD2,CE1,CE2,CZ]
    #[arg(long, num_args = 1.., value_parser = parse_prey_entry)]
    prey_atoms: Option<Vec<(String, Vec<String>)>>,

    /// Chains to restrict the search to. If unset, all chains are considered
    #[arg(short, long, num_args = 1..)]
    chains: Option<Vec<String>>,

    /// Minimum number of bait-prey atom distances for a residue pair to be
    /// reported
    #[arg(short = 'n', long, default_value_t = 6)]
    min_interactions: usize,

    /// Maximum mean distance (Å) for a residue pair to be reported
    #[arg(short = 'm', long, default_value_t = 5.0)]
    mean_threshold: f64,

    /// Maximum standard deviation (Å) of the distances for a residue pair to
    /// be reported
    #[arg(short = 's', long, default_value_t = 0.75)]
    std_threshold: f64,

    /// Number of threads to use for parallel processing. One thread should be
    /// sufficient unless the structure is very large
    #[arg(short = 'j', long = "num-threads", default_value_t = 1)]
    num_threads: usize,

    /// Verbosity of the program:
    /// -v for info, -vv for debug, and -vvv for trace
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn parse_bait_atom(s: &str) -> Result<(String, String), String> {
    match s.split_once(':') {
        Some((resn, atomn)) if !resn.is_empty() && !atomn.is_empty() && !atomn.contains(':') => {
            Ok((resn.to_uppercase(), atomn.to_uppercase()))
        }
        _ => Err(format!("expected RES:ATOM, got '{s}'")),
    }
}

fn parse_prey_entry(s: &str) -> Result<(String, Vec<String>), String> {
    let (resn, atoms) = s
        .split_once(':')
        .ok_or_else(|| format!("expected RES:ATOM1,ATOM2,..., got '{s}'"))?;
    let atom_names: Vec<String> = atoms
        .split(',')
        .map(|a| a.trim().to_uppercase())
        .filter(|a| !a.is_empty())
        .collect();
    if resn.is_empty() || atom_names.is_empty() {
        return Err(format!("expected RES:ATOM1,ATOM2,..., got '{s}'"));
    }
    Ok((resn.to_uppercase(), atom_names))
}

fn build_config(args: &Args) -> ScreenConfig {
    let mut config = ScreenConfig::default();
    if let Some(residues) = &args.residues {
        config.residues = residues.iter().map(|r| r.to_uppercase()).collect();
    }
    if let Some(exclude_atoms) = &args.exclude_atoms {
        config.exclude_atoms = exclude_atoms.iter().map(|a| a.to_uppercase()).collect();
    }
    if let Some(bait_atoms) = &args.bait_atoms {
        config.bait_atoms = bait_atoms.clone();
    }
    if let Some(prey_atoms) = &args.prey_atoms {
        config.prey_atoms = prey_atoms.clone();
    }
    config.chains = args
        .chains
        .as_ref()
        .map(|chains| chains.iter().cloned().collect());
    config.exclude_backbone = args.exclude_backbone;
    config.min_interactions = args.min_interactions;
    config.mean_threshold = args.mean_threshold;
    config.std_threshold = args.std_threshold;
    config
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();
    trace!("{args:?}");

    // Make sure `input` exists
    let input_path = match Path::new(&args.input).canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to retrieve input file: {}", e);
            std::process::exit(1);
        }
    };
    let output_path = match std::path::absolute(&args.output) {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to resolve the output directory: {}", e);
            std::process::exit(1);
        }
    };
    let input_file: String = input_path.to_str().unwrap().parse().unwrap();

    // Load file as complex structure
    let (pdb, pdb_warnings) = load_model(&input_file);
    for e in &pdb_warnings {
        match e.level() {
            pdbtbx::ErrorLevel::BreakingError => error!("{e}"),
            pdbtbx::ErrorLevel::InvalidatingError => error!("{e}"),
            _ => warn!("{e}"),
        }
    }
    debug!(
        "Loaded {} chains with {} atoms",
        pdb.chain_count(),
        pdb.atom_count()
    );

    let config = build_config(&args);

    // Use the library function
    let mut df_catpi = match run_with_threads(args.num_threads as isize, || {
        debug!("Using {} thread(s)", rayon::current_num_threads());
        find_interactions(&pdb, &config)
    }) {
        Ok(df) => df,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        "Found {} candidate cation-π {}\n{}",
        df_catpi.height(),
        match df_catpi.height() {
            1 => "interaction",
            _ => "interactions",
        },
        df_catpi
    );

    // Prepare output directory
    let _ = std::fs::create_dir_all(output_path.clone());
    let filename = match &args.filename {
        Some(name) => name.clone(),
        None => {
            let stem = input_path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("structure");
            format!("{stem}_catpi")
        }
    };
    let output_file = output_path
        .join(filename)
        .with_extension(args.output_format.to_string());

    // Save res to file
    write_df_to_file(&mut df_catpi, &output_file, args.output_format);
    let output_file_str = output_file.to_str().unwrap();
    info!("Results saved to {output_file_str}");
}
