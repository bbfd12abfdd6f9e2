use clap::Parser;
use std::path::PathBuf;

use apod_desktop::{
    ApodClient, ApodConfig, RunSummary,
    desktop::get_wallpaper_manager,
    input::{resolve_cache_dir, resolve_date},
    logging::init_logging,
    pipeline,
};

#[derive(Parser)]
#[command(name = "apod-desktop")]
#[command(
    version,
    about = "Downloads NASA's Astronomy Picture of the Day, caches it locally and sets it as your desktop background."
)]
pub struct Args {
    #[arg(help = "Absolute path of the image cache directory (created if missing)")]
    cache_dir: Option<PathBuf>,
    #[arg(help = "APOD date (YYYY-MM-DD), defaults to today")]
    date: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();

    let cache_dir = resolve_cache_dir(args.cache_dir.as_deref())?;
    let date = resolve_date(args.date.as_deref())?;
    let config = ApodConfig::from_env()?;

    let client = ApodClient::new(config);
    let manager = get_wallpaper_manager()?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let summary = rt.block_on(pipeline::run(&client, manager.as_ref(), &cache_dir, date))?;

    print_apod_info(&summary);
    Ok(())
}

fn print_apod_info(summary: &RunSummary) {
    println!("APOD image information:");
    println!("Date: {}", summary.date);
    println!("Image Title: {}", summary.image.title);
    println!("Image URL: {}", summary.url);
    println!("Image Size: {}", summary.image.size);
    println!("Image Hash: {}", summary.image.digest);
    if summary.newly_cached {
        println!("Image saved to: {}", summary.image.path.display());
    } else {
        println!("Image already cached at: {}", summary.image.path.display());
    }
}
