use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use vmcpgen::{
    emit, resolve, write_if_changed, CmakeFlagInfo, Document, FlagInfo, FlagRegistry,
    UmaFlagInfo,
};

/// Name of the input document under `<rootDir>/oti/`.
const CONSTANT_POOL: &str = "vmconstantpool.xml";

/// vmcpgen - generate the J9 VM constant pool definition and header from vmconstantpool.xml
#[derive(Debug, Parser)]
#[command(name = "vmcpgen", version, about, long_about = None)]
struct Cli {
    /// Target Java version used for applicability filtering.
    #[arg(long = "java-version", value_name = "N")]
    java_version: u32,

    /// Base directory; the input lives at <DIR>/oti/vmconstantpool.xml and the
    /// outputs default to <DIR>/jcl and <DIR>/oti.
    #[arg(long, value_name = "DIR")]
    root_dir: PathBuf,

    /// Directory holding the UMA build-spec files (j9.flags and <ID>.spec).
    #[arg(long, value_name = "DIR", required_unless_present = "cmake_cache")]
    config_dir: Option<PathBuf>,

    /// Build-spec identifier selecting the .spec file inside --config-dir.
    #[arg(long, value_name = "ID", required_unless_present = "cmake_cache")]
    build_spec_id: Option<String>,

    /// Read flags from a CMake cache file instead of a UMA build spec.
    #[arg(long, value_name = "FILE", conflicts_with_all = ["config_dir", "build_spec_id"])]
    cmake_cache: Option<PathBuf>,

    /// Write both outputs into this single directory instead of <rootDir>/jcl and
    /// <rootDir>/oti.
    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Enable verbose (debug-level) logging output, including skipped-write decisions.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Where a generated file goes: its default subdirectory under the root, unless
    /// --output-dir flattens everything into one directory.
    fn output_file(&self, directory: &str, file_name: &str) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.join(file_name),
            None => self.root_dir.join(directory).join(file_name),
        }
    }
}

fn main() -> ExitCode {
    // Usage errors and help exit 1 with the diagnostic on stderr.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            eprint!("{}", err.render());
            return ExitCode::from(1);
        }
    };

    let level = if cli.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            ExitCode::from(255)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let flag_info: Box<dyn FlagInfo> = match &cli.cmake_cache {
        Some(cache) => Box::new(CmakeFlagInfo::from_file(cache)?),
        None => {
            // clap guarantees both are present when --cmake-cache is absent.
            let config_dir = cli.config_dir.as_deref().context("--config-dir missing")?;
            let spec_id = cli.build_spec_id.as_deref().context("--build-spec-id missing")?;
            Box::new(UmaFlagInfo::from_spec(config_dir, spec_id)?)
        }
    };

    let input = cli.root_dir.join("oti").join(CONSTANT_POOL);
    log::info!("Reading constant pool from {}", input.display());
    let document = Document::from_file(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    let mut registry = FlagRegistry::new();
    let mut pool = resolve(&document, &*flag_info, &mut registry)?;
    pool.retain_applicable(cli.java_version, &flag_info.all_set_flags());

    let definition = emit::definition(&pool, cli.java_version)?;
    write_to(&cli.output_file("jcl", "j9vmconstantpool.c"), &definition)?;

    let header = emit::header(&pool, &registry);
    write_to(&cli.output_file("oti", "j9vmconstantpool.h"), &header)?;

    Ok(())
}

fn write_to(path: &Path, content: &str) -> anyhow::Result<()> {
    write_if_changed(path, content)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
