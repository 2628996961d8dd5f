use catalog_scraper::config::ScrapeConfig;
use catalog_scraper::pipeline;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ScrapeConfig::default();
    match pipeline::run(&config) {
        Ok(count) => {
            println!("Saved {count} products to {}", config.output_path.display());
        }
        Err(e) => {
            log::error!("scrape failed: {e}");
            std::process::exit(1);
        }
    }
}
