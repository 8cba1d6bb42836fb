use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reqwest::Url;
use std::fs;
use std::path::PathBuf;

use izithakazelo_keeper::config::SiteConfig;
use izithakazelo_keeper::generate::{self, GenerateOptions};
use izithakazelo_keeper::loader::load_dataset;
use izithakazelo_keeper::page::PageHooks;
use izithakazelo_keeper::query::PageKind;
use izithakazelo_keeper::site::render_page;
use izithakazelo_keeper::DatasetOrigin;

const DATASET_SOURCE: &str = "data/clans.json";

#[derive(Parser)]
#[command(name = "izithakazelo-keeper")]
#[command(about = "Static pages and view rendering for the izithakazelo site")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one page per clan plus sitemap.xml
    Generate {
        #[command(flatten)]
        config: SiteConfig,
        /// Fail if any record in the dataset is invalid
        #[arg(long)]
        strict: bool,
        /// Stamp sitemap entries with today's date
        #[arg(long)]
        lastmod: bool,
    },
    /// Render the view for a page URL and print the resulting document as JSON
    Render {
        /// Page URL, e.g. https://izithakazelokeeper.co.za/explore.html?letter=B
        url: String,
        /// Dataset URL or file
        #[arg(long, env = "IZI_DATASET_SOURCE", default_value = DATASET_SOURCE)]
        data: String,
        /// Page HTML to detect containers from; all containers assumed otherwise
        #[arg(long)]
        page_html: Option<PathBuf>,
        /// Seed for the spotlight sample
        #[arg(long)]
        seed: Option<u64>,
        /// Report the stats section as this fraction visible and run the counters
        #[arg(long)]
        stats_visibility: Option<f64>,
    },
    /// Remove generated clan pages and sitemap.xml
    Clean {
        #[command(flatten)]
        config: SiteConfig,
    },
}

fn run_render(
    url: &str,
    data: &str,
    page_html: Option<PathBuf>,
    seed: Option<u64>,
    stats_visibility: Option<f64>,
) -> Result<()> {
    let location = Url::parse(url).with_context(|| format!("Invalid page URL: {}", url))?;
    let hooks = match page_html {
        Some(path) => PageHooks::from_file(&path)?,
        None => PageHooks::all(),
    };

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    // Pages without a view never load the dataset
    let Some(kind) = PageKind::from_url(&location) else {
        bail!("No view for page {}", location);
    };
    info!("Rendering {:?} view for {}", kind, location);

    let dataset = load_dataset(data);
    if dataset.origin() == DatasetOrigin::Fallback {
        info!("Rendering with fallback dataset");
    }

    let document = render_page(&dataset, &hooks, location, stats_visibility, &mut rng)
        .with_context(|| format!("No view for page {}", url))?;
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

fn run_clean(config: &SiteConfig) -> Result<()> {
    println!("Cleaning generated files...");

    if config.sitemap.exists() {
        fs::remove_file(&config.sitemap)?;
        println!("  Removed {}", config.sitemap.display());
    }

    if config.output_dir.exists() {
        fs::remove_dir_all(&config.output_dir)?;
        println!("  Removed {}/", config.output_dir.display());
    }

    println!("Clean complete!");
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            config,
            strict,
            lastmod,
        } => {
            let options = GenerateOptions {
                strict,
                lastmod: lastmod.then(|| chrono::Local::now().date_naive()),
            };
            generate::run_generate(&config, &options).map(|_| ())
        }
        Commands::Render {
            url,
            data,
            page_html,
            seed,
            stats_visibility,
        } => run_render(&url, &data, page_html, seed, stats_visibility),
        Commands::Clean { config } => run_clean(&config),
    }
}
