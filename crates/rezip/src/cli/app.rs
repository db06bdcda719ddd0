use std::path::PathBuf;

use clap::Parser;

#[derive(Clone, Debug, Parser)]
#[command(name = "rezip", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct App {
    /// Source ZIP archive
    pub input: PathBuf,

    /// Destination for the flattened, uncompressed archive
    pub output: PathBuf,

    /// Re-hash the output and write <output>_validation.json
    #[arg(long)]
    pub validate: bool,

    /// Also save the name -> {original path, hash} registry as JSON
    #[arg(long, value_name = "PATH")]
    pub registry: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
