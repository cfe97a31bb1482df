use chrono::Local;
use clap::Parser;
use volby_scrap::{cli::Args, info_time, process::scrape_to_csv, Result};

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let start_time = Local::now();
    let args = Args::parse();
    args.validate()?;

    let client = reqwest::Client::new();
    let rows = scrape_to_csv(&client, &args.url, &args.scrape_config(), &args.output).await?;
    info_time!(
        start_time,
        "Saved {} municipalities to: {}",
        rows,
        args.output.display()
    );

    Ok(())
}
