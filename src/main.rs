mod cli;

use marketsim_ohlcv::{utils, ReaderConfig, SeriesAggregator, Series, ValidationMode};

/// Main entry point of the application.
///
/// This function orchestrates the entire workflow:
/// 1. Parses command-line arguments and installs the log subscriber.
/// 2. Lists the symbol's files, if requested, and exits.
/// 3. Reads the latest file, or merges all (or the last N) files.
/// 4. Prints a preview of the first bars and the summary statistics.
///
/// # Returns
///
/// * `anyhow::Result<()>` - Success or an error if any step fails.
fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    init_tracing();

    let validation = if args.strict {
        ValidationMode::Strict
    } else {
        ValidationMode::PassThrough
    };
    let aggregator = SeriesAggregator::new(ReaderConfig::new(&args.data_dir).with_validation(validation));

    if args.list_files {
        let files = aggregator.catalog().list_files(Some(&args.symbol))?;
        println!("\nAvailable OHLCV files for {}:", args.symbol);
        for file in &files {
            println!("  {}. {}", file.order + 1, file.path.display());
        }
        println!();
        return Ok(());
    }

    let total_start = std::time::Instant::now();
    let series = if args.merge {
        let threads = utils::effective_threads(args.threads)?;
        println!("🚀 Merging OHLCV files for {} using {} thread(s)", args.symbol, threads);
        if args.threads.is_some() {
            let local_pool = utils::configure_thread_pool(threads)?;
            local_pool.install(|| read_merged(&aggregator, &args))?
        } else {
            read_merged(&aggregator, &args)?
        }
    } else {
        println!("Reading OHLCV data for {}...", args.symbol);
        aggregator.read_latest(&args.symbol)?
    };
    println!(
        "✅ Loaded {} bars in {:?} seconds",
        series.len(),
        total_start.elapsed().as_secs_f64()
    );

    if args.head > 0 && !series.is_empty() {
        println!("📄 First {} bars", args.head.min(series.len()));
        utils::print_bars(series.bars(), args.head);
    }

    let summary = aggregator.summarize(&series)?;
    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{}", "=".repeat(60));
        println!("OHLCV DATA SUMMARY - {}", args.symbol);
        println!("{}", "=".repeat(60));
        println!("{summary}");
        println!("{}\n", "=".repeat(60));
    }

    Ok(())
}

/// Merges the symbol's files behind a progress bar.
fn read_merged(aggregator: &SeriesAggregator, args: &cli::Args) -> anyhow::Result<Series> {
    let candidates = aggregator.catalog().list_files(Some(&args.symbol))?.len();
    let total = match args.limit {
        Some(limit) => candidates.min(limit),
        None => candidates,
    };

    let progress = indicatif::ProgressBar::new(total as u64);
    progress.set_style(
        indicatif::ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} files {msg}")?
            .progress_chars("=> "),
    );
    let merged = aggregator.read_merged_with(&args.symbol, args.limit, &|file| {
        progress.set_message(file.file_name().into_owned());
        progress.inc(1);
    });
    progress.finish_and_clear();

    let merged = merged?;
    for skipped in &merged.skipped {
        println!("⚠️ Skipped {}: {}", skipped.file.path.display(), skipped.error);
    }
    Ok(merged.series)
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
