use tracing_subscriber::EnvFilter;

use crate::analyzers::{RollingWindow, SeriesAnalyzer};
use crate::api::{QueryOptions, SocrataClient};
use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::processors::{GapImputer, RecordTransformer};
use crate::readers::{CheckoutReader, ChunkReader, DictionaryReader};
use crate::utils::constants::API_DATE_FORMAT;
use crate::utils::filename::generate_default_fetch_filename;
use crate::utils::progress::{ProgressReporter, Verbosity};
use crate::writers::{ChunkCompression, ChunkWriter, CsvWriter};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);

    match cli.command {
        Commands::Fetch {
            dataset_id,
            app_token,
            date_column,
            begin_date,
            end_date,
            limit,
            offset,
            base_url,
            output_file,
        } => {
            let output_file = output_file.unwrap_or_else(generate_default_fetch_filename);
            println!("Fetching dataset {} from {}", dataset_id, base_url);
            println!("Date range: {} to {}", begin_date, end_date);

            let progress = ProgressReporter::new_spinner("Fetching records...", false);

            let client = SocrataClient::new()
                .with_base_url(&base_url)
                .with_app_token(app_token);
            let options = QueryOptions {
                limit: Some(limit),
                offset,
                ..Default::default()
            };

            let rows = client
                .fetch_date_range(&dataset_id, &date_column, &begin_date, &end_date, &options)
                .await?;

            progress.finish_with_message(&format!("Fetched {} records", rows.len()));

            CsvWriter::new().write_raw(&rows, &output_file)?;
            println!("Wrote {} rows to {}", rows.len(), output_file.display());
            println!(
                "Note: API timestamps use the {} format; pass it to `transform --date-format`",
                API_DATE_FORMAT
            );
        }

        Commands::Transform {
            input_file,
            dictionary_file,
            output_dir,
            base_name,
            chunk_size,
            compression,
            date_format,
            mmap,
            verbosity,
        } => {
            println!("Transforming checkout data...");
            println!("Input file: {}", input_file.display());
            println!("Dictionary: {}", dictionary_file.display());

            let dictionary = DictionaryReader::new().read_dictionary(&dictionary_file)?;
            println!("Data dictionary prepared: {} collection codes", dictionary.len());

            let progress = ProgressReporter::new_spinner("Reading checkout export...", false);
            let raw = CheckoutReader::new()
                .with_mmap(mmap)
                .read_checkouts(&input_file)?;
            progress.finish_with_message(&format!("Read {} raw rows", raw.len()));

            let outcome = RecordTransformer::new()
                .with_date_format(&date_format)
                .transform(&raw, &dictionary)?;
            println!("\n{}", outcome.summary());

            let writer = ChunkWriter::new()
                .with_chunk_size(chunk_size)
                .with_compression(ChunkCompression::from_name(&compression)?)
                .with_verbosity(Verbosity::from_level(verbosity));

            let paths = writer.write_chunks(&outcome.records, &output_dir, &base_name)?;
            println!(
                "Wrote {} chunk artifacts under {}",
                paths.len(),
                output_dir.display()
            );
            println!("Processing complete!");
        }

        Commands::Reload {
            input_dir,
            base_name,
            extension,
            num_chunks,
            compression,
            output_file,
            verbosity,
        } => {
            println!("Reloading {} chunk artifacts...", num_chunks);

            let mut reader = ChunkReader::new()
                .with_extension(&extension)
                .with_verbosity(Verbosity::from_level(verbosity));
            if let Some(name) = compression {
                reader = reader.with_compression(ChunkCompression::from_name(&name)?);
            }

            let records = reader.load_chunks(&input_dir, &base_name, num_chunks)?;
            println!("Reassembled {} records", records.len());

            if let Some(output_file) = output_file {
                CsvWriter::new().write_records(&records, &output_file)?;
                println!("Wrote reassembled table to {}", output_file.display());
            }
        }

        Commands::Analyze {
            input_dir,
            base_name,
            extension,
            num_chunks,
            rolling_period,
            decompose_period,
            impute_window,
        } => {
            let records = ChunkReader::new()
                .with_extension(&extension)
                .load_chunks(&input_dir, &base_name, num_chunks)?;
            println!("Analyzing {} records", records.len());

            let analyzer = SeriesAnalyzer::new();
            let mut counts = analyzer.daily_counts(&records);

            if let Some(window) = impute_window {
                let report = GapImputer::new().with_window(window).fill_gaps(&counts);
                println!(
                    "Gap imputation: {} filled, {} left unfilled",
                    report.filled,
                    report.unfilled.len()
                );
                counts = report.series;
            }

            println!("\n{}", analyzer.statistics(&counts)?.detailed_summary());

            let window = RollingWindow::parse(&rolling_period)?;
            let rolling = analyzer.rolling(&counts, window)?;
            if let Some(last) = rolling.mean.last_date() {
                println!(
                    "Rolling window: {} days; latest mean {}, latest std {}",
                    rolling.window,
                    rolling
                        .mean
                        .value(last)
                        .map_or("n/a".to_string(), |v| format!("{:.1}", v)),
                    rolling
                        .std
                        .value(last)
                        .map_or("n/a".to_string(), |v| format!("{:.1}", v)),
                );
            }

            if let Some(period) = decompose_period {
                let decomposition = analyzer.decompose(&counts, period)?;
                println!("\nSeasonal profile (period {}):", period);
                for (date, value) in decomposition.seasonal.iter().take(period) {
                    if let Some(value) = value {
                        println!("  {}: {:+.1}", date, value);
                    }
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Ignore a second init when run is called twice in-process (tests).
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
