use argh::FromArgs;
use guardian_plots::prelude::*;
use guardian_plots::settings::{DEFAULT_OUTPUT_DIR, DEFAULT_SIMULATIONS};
use std::io;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Charts and summaries for Pareto archive experiments
#[derive(FromArgs, Debug)]
struct Args {
    /// log debug output unless RUST_LOG says otherwise
    #[argh(switch, short = 'v')]
    verbose: bool,

    /// chart width in pixels, 320 to 8192 (default: 1200)
    #[argh(option, default = "1200")]
    width: u32,

    /// chart height in pixels, 320 to 8192 (default: 800)
    #[argh(option, default = "800")]
    height: u32,

    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs, Debug)]
#[argh(subcommand)]
enum Command {
    Dominance(DominanceArgs),
    Experiments(ExperimentsArgs),
}

/// Plot the dominance links between archive solutions
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "dominance")]
struct DominanceArgs {
    /// domination links file (default: domination-links.txt)
    #[argh(option, short = 'i', default = "PathBuf::from(\"domination-links.txt\")")]
    input: PathBuf,

    /// output directory (default: report/plots)
    #[argh(option, short = 'o', default = "PathBuf::from(DEFAULT_OUTPUT_DIR)")]
    output: PathBuf,

    /// plot z-scores of both objectives instead of raw values
    #[argh(switch)]
    standardise: bool,
}

/// Plot every experiment result (.dat) file in a directory
#[derive(FromArgs, Debug)]
#[argh(subcommand, name = "experiments")]
struct ExperimentsArgs {
    /// directory holding the result files (default: current directory)
    #[argh(option, short = 'i', default = "PathBuf::from(\".\")")]
    input: PathBuf,

    /// output directory (default: report/plots)
    #[argh(option, short = 'o', default = "PathBuf::from(DEFAULT_OUTPUT_DIR)")]
    output: PathBuf,

    /// number of simulations in each result file (default: 4)
    #[argh(option, short = 's', default = "DEFAULT_SIMULATIONS")]
    simulations: usize,

    /// skip writing run summaries
    #[argh(switch)]
    no_summary: bool,
}

fn main() -> Result<(), ReportError> {
    let args: Args = argh::from_env();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match args.command {
        Command::Dominance(command) => {
            let mut settings = ReportSettings::new(command.output);
            settings.image_size = (args.width, args.height);
            settings.sanitize();

            let (path, edges) =
                generate_dominance_plot_from_file(&command.input, &settings, command.standardise)?;
            info!(path = %path.display(), edges, "dominance chart complete");
        }
        Command::Experiments(command) => {
            let mut settings = ReportSettings::new(command.output);
            settings.image_size = (args.width, args.height);
            settings.simulations = command.simulations;
            settings.write_summaries = !command.no_summary;
            settings.sanitize();

            let report = generate_experiment_plots(&command.input, &settings)?;
            info!(
                files = report.files.len(),
                charts = report.files.iter().map(|file| file.charts.len()).sum::<usize>(),
                output = %settings.output_dir.display(),
                "experiment charts complete"
            );
        }
    }

    Ok(())
}
