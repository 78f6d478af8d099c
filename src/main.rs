use std::path::PathBuf;

use clap::Parser;
use pathtint::annotate::{RunOptions, run};
use pathtint::config::DEFAULT_CONFIG_PATH;


/// Color the shapes of a pathway presentation by values from a data table.
#[derive(Parser)]
#[clap(version, about)]
struct Opts {
    /// Data table with entity names and values (.csv or .xlsx)
    #[clap(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Presentation (.pptx) to annotate; it is not modified
    #[clap(short = 'p', long = "pathway")]
    pub pathway: PathBuf,

    /// Where to write the annotated presentation
    #[clap(short = 'o', long = "output")]
    pub output: PathBuf,

    /// YAML configuration file
    #[clap(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory for the colorbar PNGs, overriding the configuration
    #[clap(long = "legend-dir")]
    pub legend_dir: Option<PathBuf>,
}
impl From<Opts> for RunOptions {
    fn from(opts: Opts) -> Self {
        RunOptions {
            input: opts.input,
            pathway: opts.pathway,
            output: opts.output,
            config: opts.config,
            legend_dir: opts.legend_dir,
        }
    }
}


fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let opts: Opts = Parser::parse();
    let options = RunOptions::from(opts);

    std::process::exit(
        match run(&options) {
            Ok(_) => {
                println!("Annotated pathway saved to {}", options.output.display());
                0
            },
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            },
        }
    )
}
