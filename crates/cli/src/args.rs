use std::path::PathBuf;

use clap::Parser;
use omniconvert_core::intake::DEFAULT_MAX_FILE_SIZE_MB;
use omniconvert_pipeline::DEFAULT_MAX_IN_FLIGHT;

/// Queue files and convert them locally or through the inference service.
#[derive(Debug, Parser)]
#[command(name = "omniconvert", version, long_about = None)]
pub struct Args {
    /// Files to convert, in queue order.
    #[arg(value_name = "INPUT", required_unless_present = "list_options")]
    pub inputs: Vec<PathBuf>,

    /// Target format applied to every file whose category offers it,
    /// e.g. `image/webp` or `text/summary`. Other files keep their default.
    #[arg(short, long, value_name = "FORMAT")]
    pub target: Option<String>,

    /// Directory converted files are written to.
    #[arg(short, long, env = "CONVERT_OUTPUT_DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Conversions in flight at once during a pass.
    #[arg(long, env = "CONVERT_MAX_IN_FLIGHT", default_value_t = DEFAULT_MAX_IN_FLIGHT)]
    pub max_in_flight: usize,

    /// Per-file size ceiling in MiB.
    #[arg(long, env = "CONVERT_MAX_FILE_MB", default_value_t = DEFAULT_MAX_FILE_SIZE_MB)]
    pub max_file_mb: u64,

    /// Print the conversion options for every category and exit.
    #[arg(long)]
    pub list_options: bool,
}
