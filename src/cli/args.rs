use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spl-checkouts")]
#[command(about = "Seattle Public Library checkout data processor")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch checkout records from the open-data API into a raw CSV
    Fetch {
        #[arg(short, long, help = "Socrata dataset id (e.g. 5src-czff)")]
        dataset_id: String,

        #[arg(long, help = "Socrata app token (optional, raises rate limits)")]
        app_token: Option<String>,

        #[arg(long, default_value = "checkoutdatetime")]
        date_column: String,

        #[arg(short, long, help = "Range start, %Y-%m-%d or %Y-%m-%dT%H:%M:%S")]
        begin_date: String,

        #[arg(short, long, help = "Range end, not inclusive")]
        end_date: String,

        #[arg(long, default_value_t = 1_000_000)]
        limit: u64,

        #[arg(long)]
        offset: Option<u64>,

        #[arg(long, default_value = "data.seattle.gov")]
        base_url: String,

        #[arg(
            short,
            long,
            help = "Output CSV path [default: output/spl-checkouts-{YYMMDD}.csv]"
        )]
        output_file: Option<PathBuf>,
    },

    /// Enrich a raw export against the data dictionary and persist chunk artifacts
    Transform {
        #[arg(short, long, help = "Raw checkout CSV export")]
        input_file: PathBuf,

        #[arg(short, long, help = "Collection data dictionary CSV")]
        dictionary_file: PathBuf,

        #[arg(short, long, help = "Directory for chunk artifacts")]
        output_dir: PathBuf,

        #[arg(long, default_value = "seattle_lib")]
        base_name: String,

        #[arg(long, default_value_t = 1_000_000)]
        chunk_size: usize,

        #[arg(short, long, default_value = "gzip")]
        compression: String,

        #[arg(long, default_value = "%m/%d/%Y %I:%M:%S %p")]
        date_format: String,

        #[arg(long, help = "Memory-map the input instead of buffered reads")]
        mmap: bool,

        #[arg(long, default_value = "1", help = "Status narration: 0, 1 or 2")]
        verbosity: u8,
    },

    /// Reassemble chunk artifacts into a single CSV
    Reload {
        #[arg(short, long, help = "Directory holding chunk artifacts")]
        input_dir: PathBuf,

        #[arg(long, default_value = "seattle_lib")]
        base_name: String,

        #[arg(long, default_value = "csv.gz")]
        extension: String,

        #[arg(short, long, help = "Number of artifacts to load (1-based, contiguous)")]
        num_chunks: usize,

        #[arg(long, help = "Force gzip/none instead of inferring from the extension")]
        compression: Option<String>,

        #[arg(short, long, help = "Write the reassembled table to this CSV")]
        output_file: Option<PathBuf>,

        #[arg(long, default_value = "1", help = "Status narration: 0, 1 or 2")]
        verbosity: u8,
    },

    /// Reassemble chunks and report daily-count time-series statistics
    Analyze {
        #[arg(short, long, help = "Directory holding chunk artifacts")]
        input_dir: PathBuf,

        #[arg(long, default_value = "seattle_lib")]
        base_name: String,

        #[arg(long, default_value = "csv.gz")]
        extension: String,

        #[arg(short, long, help = "Number of artifacts to load")]
        num_chunks: usize,

        #[arg(
            long,
            default_value = "W",
            help = "Rolling window: W, M, B, Y or a day count"
        )]
        rolling_period: String,

        #[arg(long, help = "Seasonal decomposition period in observations")]
        decompose_period: Option<usize>,

        #[arg(long, help = "Fill daily-count gaps with a symmetric mean window")]
        impute_window: Option<usize>,
    },
}
