use anyhow::{Context, Result};
use clap::Parser;
use std::time::Instant;
use tracing::{error, info};

use bandscope::report::{self, ArtistOptions};
use bandscope::utils::{configure_workers, setup_logging, validate_args};
use bandscope::wiki::{DescriptionLookup, WikipediaClient};
use bandscope::{ArtistExpert, Args, CollectionExpert, Dataset};

fn run(args: &Args) -> Result<()> {
    let total_start_time = Instant::now();
    info!(action = "start", component = "analysis", "Starting analysis");

    let dataset = Dataset::load(&args.songs, &args.bands).context("Failed to load tables")?;

    if args.list {
        report::print_artists(&dataset.unique_artists());
        return Ok(());
    }

    if let Some(artist) = args.artist.as_deref() {
        let client = if args.describe {
            Some(WikipediaClient::new(&args.wiki_url)?)
        } else {
            None
        };
        let options = ArtistOptions {
            top: args.top,
            max_words: args.max_words,
            lyrics_mode: args.lyrics_mode(),
            lookup: client.as_ref().map(|c| c as &dyn DescriptionLookup),
        };

        let expert = ArtistExpert::new(&dataset);
        let result = report::build_artist_report(&expert, artist, &options)
            .with_context(|| format!("Failed to analyze artist '{}'", artist))?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            report::print_artist_report(&result);
        }
    } else {
        let expert = CollectionExpert::new(&dataset);
        let result = report::build_collection_report(&expert, &args.band_filter(), args.top);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            report::print_collection_report(&result);
        }
    }

    info!(
        action = "complete",
        component = "analysis",
        duration_ms = total_start_time.elapsed().as_millis(),
        "Analysis completed successfully"
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;
    configure_workers(args.workers)?;

    if let Err(e) = run(&args) {
        error!(action = "error", component = "main", error = ?e, "Analysis failed");
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
    Ok(())
}
