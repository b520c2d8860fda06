mod preview;

use std::path::PathBuf;

use ascr::{config::Config, driver::Driver, notify::Discord, scrape::Fetcher};

/// Watches the BitcoinTalk altcoin announcement board.
///
/// Without a mode flag, prints the newest threads and changes nothing.
#[derive(clap::Parser)]
#[command(version)]
struct Args {
    /// Fetch, record and notify every interval, forever
    #[arg(long = "loop", conflicts_with = "once")]
    looping: bool,

    /// Fetch, record and notify once
    #[arg(long)]
    once: bool,

    /// Number of threads to show
    #[arg(long, default_value_t = 10)]
    count: usize,

    /// Print JSON instead of a listing
    #[arg(long)]
    json: bool,

    /// Write the JSON report to a file
    #[arg(long, value_name = "file")]
    output: Option<PathBuf>,

    /// Only show mining-related threads
    #[arg(long)]
    mining: bool,

    #[command(flatten)]
    config: Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    use clap::Parser;

    pretty_env_logger::formatted_timed_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    let args = Args::parse();
    let config = &args.config;

    let driver = Driver::new(config, Fetcher::new(config)?, Discord::new(config)?);

    if args.looping {
        driver.run_loop().await;
        return Ok(());
    }

    if args.once {
        driver.run_once().await?;
        return Ok(());
    }

    let posts = driver.preview(args.mining, args.count).await?;

    if args.json || args.output.is_some() {
        let report = preview::json(config, &posts, args.mining)?;
        if let Some(output) = args.output {
            std::fs::write(&output, report)?;
            println!("✅ saved to {} ({} posts)", output.display(), posts.len());
        } else {
            println!("{report}");
        }
    } else {
        print!("{}", preview::listing(&posts, args.mining));
    }

    Ok(())
}
