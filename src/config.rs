//! Generator settings, taken from flags or the environment

use anyhow::{Context, Result};
use clap::Args;
use reqwest::Url;
use std::path::PathBuf;

pub const DATA_PATH: &str = "./data/clans.json";
pub const TEMPLATE_PATH: &str = "./src/clan-template.html";
pub const OUTPUT_DIR: &str = "./clans";
pub const SITEMAP_PATH: &str = "./sitemap.xml";
pub const SITE_URL: &str = "https://izithakazelokeeper.co.za";

#[derive(Debug, Clone, Args)]
pub struct SiteConfig {
    /// Clan dataset (JSON array of clan records)
    #[arg(long, env = "IZI_DATA", default_value = DATA_PATH)]
    pub data: PathBuf,
    /// Page template containing {{CLAN_NAME}}, {{PRAISES_HTML}} and {{SNIPPET}}
    #[arg(long, env = "IZI_TEMPLATE", default_value = TEMPLATE_PATH)]
    pub template: PathBuf,
    /// Directory receiving one page per clan
    #[arg(long, env = "IZI_OUTPUT_DIR", default_value = OUTPUT_DIR)]
    pub output_dir: PathBuf,
    /// Public base URL used for sitemap entries
    #[arg(long, env = "IZI_SITE_URL", default_value = SITE_URL)]
    pub site_url: String,
    /// Where to write sitemap.xml
    #[arg(long, env = "IZI_SITEMAP", default_value = SITEMAP_PATH)]
    pub sitemap: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from(DATA_PATH),
            template: PathBuf::from(TEMPLATE_PATH),
            output_dir: PathBuf::from(OUTPUT_DIR),
            site_url: SITE_URL.to_string(),
            sitemap: PathBuf::from(SITEMAP_PATH),
        }
    }
}

impl SiteConfig {
    /// Site URL without a trailing slash, after checking it parses
    pub fn base_url(&self) -> Result<String> {
        Url::parse(&self.site_url)
            .with_context(|| format!("Invalid site URL: {}", self.site_url))?;
        Ok(self.site_url.trim_end_matches('/').to_string())
    }
}
