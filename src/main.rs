use clap::{Parser, Subcommand};
use docnav::{config, load, output};
use std::path::{Path, PathBuf};

/// Shared flags for commands that load a site.
#[derive(clap::Args, Clone)]
struct InputArgs {
    /// Site input manifest (versions, documents and raw sidebars as JSON)
    #[arg(long, default_value = "site.json")]
    input: PathBuf,

    /// Directory holding config.toml (defaults to the input's directory)
    #[arg(long)]
    config_dir: Option<PathBuf>,
}

#[derive(Parser)]
#[command(name = "docnav")]
#[command(about = "Build documentation sidebars and previous/next navigation")]
#[command(long_about = "\
Build documentation sidebars and previous/next navigation

Input is a JSON manifest describing one or more versions of a doc set:

  {
    \"versions\": [{
      \"name\": \"current\",
      \"documents\": {
        \"intro.md\": { \"id\": \"intro\", \"directoryPath\": \".\", \"sortKey\": \"intro.md\" }
      },
      \"sidebars\": { \"docs\": [\"intro\", { \"type\": \"autogenerated\", \"dirPath\": \"guides\" }] }
    }]
  }

A version without \"sidebars\" gets one sidebar generated from every document.

Run 'docnav gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Build sidebars and navigation, write them as JSON
    Build {
        #[command(flatten)]
        input: InputArgs,

        /// Output file for the navigation artifact
        #[arg(long, default_value = "navigation.json")]
        output: PathBuf,
    },
    /// Validate sidebars against the documents without writing anything
    Check(InputArgs),
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Build {
            input,
            output: out_path,
        } => {
            println!("==> Loading {}", input.input.display());
            let versions = load_site(&input)?;
            let json = serde_json::to_string_pretty(&load::artifact(&versions))?;
            std::fs::write(&out_path, json)?;
            output::print_load_output(&versions);
            println!("==> Navigation written to {}", out_path.display());
        }
        Command::Check(input) => {
            println!("==> Checking {}", input.input.display());
            let versions = load_site(&input)?;
            output::print_load_output(&versions);
            println!("==> Sidebars are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn load_site(args: &InputArgs) -> Result<Vec<load::LoadedVersion>, Box<dyn std::error::Error>> {
    let config_dir = args
        .config_dir
        .clone()
        .unwrap_or_else(|| input_dir(&args.input));
    let nav_config = config::load_config(&config_dir)?;
    init_thread_pool(&nav_config.processing);

    let site = load::read_site(&args.input)?;
    let opts = config::SidebarOptions::from_config(&nav_config);
    Ok(load::load_versions(&site.versions, &opts)?)
}

/// Directory containing the input manifest, `.` for a bare file name.
fn input_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores. The user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
