/// Structure representing command-line arguments.
#[derive(Debug)]
pub struct Args {
    pub data_dir: std::path::PathBuf,
    pub symbol: String,
    pub list_files: bool,
    pub merge: bool,
    pub limit: Option<usize>,
    pub threads: Option<usize>,
    pub strict: bool,
    pub json: bool,
    pub head: usize,
}

/// Command-line arguments parser using Clap.
///
/// Supports data directory and symbol selection, listing, multi-file merging and
/// summary output options.
impl Args {
    /// Parses command-line arguments using `clap`.
    ///
    /// # Returns
    /// * `Args` - Struct containing parsed arguments.
    ///
    /// # Errors
    /// * Exits with a usage message if arguments are missing or invalid.
    pub fn parse() -> Self {
        Self::from_matches(&Self::command().get_matches())
    }

    fn command() -> clap::Command {
        clap::Command::new("ohlcv-analyze")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Read MarketSim OHLCV exports and print summary statistics")
            .arg(
                clap::Arg::new("data-dir")
                    .short('d')
                    .long("data-dir")
                    .help("Path to the market_history directory with OHLCV CSV files")
                    .default_value(marketsim_ohlcv::config::DEFAULT_DATA_DIR)
                    .num_args(1),
            )
            .arg(
                clap::Arg::new("symbol")
                .short('s')
                .long("symbol")
                .help("Trading symbol")
                .default_value("AAPL")
                .num_args(1),
            )
            .arg(
                clap::Arg::new("list-files")
                .short('l')
                .long("list-files")
                .help("List available OHLCV files for the symbol and exit")
                .action(clap::ArgAction::SetTrue),
            )
            .arg(
                clap::Arg::new("merge")
                .short('m')
                .long("merge")
                .help("Merge all files of the symbol instead of reading only the latest")
                .action(clap::ArgAction::SetTrue),
            )
            .arg(
                clap::Arg::new("limit")
                .short('n')
                .long("limit")
                .help("Merge only the N most recent files")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_usize_positive))
                .requires("merge"),
            )
            .arg(
                clap::Arg::new("threads")
                .short('t')
                .long("threads")
                .help("Number of threads used to parse files (default: all available)")
                .num_args(1)
                .value_parser(clap::builder::ValueParser::new(parse_usize_positive)),
            )
            .arg(
                clap::Arg::new("strict")
                .long("strict")
                .help("Reject files with bars violating low <= open,close <= high")
                .action(clap::ArgAction::SetTrue),
            )
            .arg(
                clap::Arg::new("json")
                .long("json")
                .help("Print the summary as JSON")
                .action(clap::ArgAction::SetTrue),
            )
            .arg(
                clap::Arg::new("head")
                .long("head")
                .help("Number of leading bars to preview (0 disables)")
                .default_value("5")
                .num_args(1)
                .value_parser(clap::value_parser!(usize)),
            )
    }

    fn from_matches(matches: &clap::ArgMatches) -> Self {
        Args {
            data_dir: matches
                .get_one::<String>("data-dir")
                .map(std::path::PathBuf::from)
                .unwrap_or_default(),
            symbol: matches.get_one::<String>("symbol").cloned().unwrap_or_default(),
            list_files: matches.get_flag("list-files"),
            merge: matches.get_flag("merge"),
            limit: matches.get_one::<usize>("limit").cloned(),
            threads: matches.get_one::<usize>("threads").cloned(),
            strict: matches.get_flag("strict"),
            json: matches.get_flag("json"),
            head: matches.get_one::<usize>("head").cloned().unwrap_or(5),
        }
    }
}

/// Validates that a count argument is a positive integer.
///
/// # Arguments
/// * `s` - String representation of the count.
///
/// # Returns
/// * `Result<usize>` - Validated count.
fn parse_usize_positive(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("Must be a positive integer".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("Not a valid number: {}", e)),
    }
}
