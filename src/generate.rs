use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::SiteConfig;
use crate::error::RecordError;
use crate::loader::read_dataset_file;
use crate::types::ClanRecord;
use crate::utils::{html_escape, osc8_file_link, slugify, truncate_chars};

pub const NAME_PLACEHOLDER: &str = "{{CLAN_NAME}}";
pub const PRAISES_PLACEHOLDER: &str = "{{PRAISES_HTML}}";
pub const SNIPPET_PLACEHOLDER: &str = "{{SNIPPET}}";

/// Characters of joined praise text kept for the page description
pub const SNIPPET_LEN: usize = 150;

/// Pages listed in the sitemap ahead of the clan pages
const STATIC_PAGES: &[&str] = &["index.html", "explore.html"];

#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Fail the run if any record was rejected
    pub strict: bool,
    /// Date stamped on every sitemap entry
    pub lastmod: Option<NaiveDate>,
}

/// What a generator run produced
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<PathBuf>,
    pub sitemap_urls: Vec<String>,
    pub rejected: Vec<RecordError>,
    pub sitemap: PathBuf,
}

/// Every praise line in its own paragraph, in order, no separator
pub fn praises_html(clan: &ClanRecord) -> String {
    clan.izithakazelo
        .iter()
        .map(|line| format!("<p>{}</p>", html_escape(line)))
        .collect()
}

/// Praise lines joined with ", " and cut to the first 150 characters
pub fn snippet(clan: &ClanRecord) -> String {
    let joined = clan.izithakazelo.join(", ");
    truncate_chars(&joined, SNIPPET_LEN).to_string()
}

/// Output filename for a clan page
pub fn page_filename(clan: &ClanRecord) -> String {
    format!("{}.html", slugify(&clan.name))
}

/// Fill the template for one clan.
///
/// The name placeholder is replaced everywhere; praises and snippet only at
/// their first occurrence.
pub fn render_clan_page(template: &str, clan: &ClanRecord) -> String {
    template
        .replace(NAME_PLACEHOLDER, &html_escape(&clan.name))
        .replacen(PRAISES_PLACEHOLDER, &praises_html(clan), 1)
        .replacen(SNIPPET_PLACEHOLDER, &html_escape(&snippet(clan)), 1)
}

fn sitemap_entry(loc: &str, lastmod: Option<NaiveDate>) -> String {
    match lastmod {
        Some(date) => format!(
            "<url><loc>{}</loc><lastmod>{}</lastmod></url>",
            html_escape(loc),
            date.format("%Y-%m-%d")
        ),
        None => format!("<url><loc>{}</loc></url>", html_escape(loc)),
    }
}

/// Build sitemap.xml: the static pages first, then `clan_urls` in order
pub fn render_sitemap(site_url: &str, clan_urls: &[String], lastmod: Option<NaiveDate>) -> String {
    let entries: Vec<String> = STATIC_PAGES
        .iter()
        .map(|page| format!("{}/{}", site_url, page))
        .chain(clan_urls.iter().cloned())
        .map(|loc| sitemap_entry(&loc, lastmod))
        .collect();

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
  {}
</urlset>"#,
        entries.join("\n  ")
    )
}

/// Write one clan page as `filename` and return its path
fn generate_clan_page(
    template: &str,
    clan: &ClanRecord,
    filename: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    let page_path = output_dir.join(filename);
    fs::write(&page_path, render_clan_page(template, clan))
        .with_context(|| format!("Failed to write {}", page_path.display()))?;
    Ok(page_path)
}

/// Generate every clan page from already-loaded records
pub fn generate_site(
    clans: &[ClanRecord],
    template: &str,
    config: &SiteConfig,
    lastmod: Option<NaiveDate>,
) -> Result<GenerateReport> {
    let site_url = config.base_url()?;

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let mut report = GenerateReport {
        sitemap: config.sitemap.clone(),
        ..GenerateReport::default()
    };

    for clan in clans {
        let filename = page_filename(clan);
        let page_path = generate_clan_page(template, clan, &filename, &config.output_dir)?;
        report
            .sitemap_urls
            .push(format!("{}/clans/{}", site_url, filename));

        let shown = page_path.to_string_lossy().to_string();
        println!("Generated: {}", osc8_file_link(&shown, &format!("clans/{}", filename)));
        report.pages.push(page_path);
    }

    let sitemap = render_sitemap(&site_url, &report.sitemap_urls, lastmod);
    fs::write(&config.sitemap, sitemap)
        .with_context(|| format!("Failed to write {}", config.sitemap.display()))?;
    info!(
        "Wrote {} with {} URLs",
        config.sitemap.display(),
        report.sitemap_urls.len() + STATIC_PAGES.len()
    );

    Ok(report)
}

/// Main generation function
pub fn run_generate(config: &SiteConfig, options: &GenerateOptions) -> Result<GenerateReport> {
    println!("Loading clans...");
    let parsed = read_dataset_file(&config.data)?;
    let template = fs::read_to_string(&config.template)
        .with_context(|| format!("Failed to read template: {}", config.template.display()))?;
    println!("Loaded {} clans", parsed.clans.len());

    for rejected in &parsed.rejected {
        warn!("Skipping {}", rejected);
    }
    if options.strict && !parsed.rejected.is_empty() {
        bail!(
            "{} invalid record(s) in {}, refusing to generate in strict mode",
            parsed.rejected.len(),
            config.data.display()
        );
    }

    let mut report = generate_site(&parsed.clans, &template, config, options.lastmod)?;
    report.rejected = parsed.rejected;

    println!("-----------------------------------");
    println!(
        "Done! {} clan pages and {} generated ({} skipped).",
        report.pages.len(),
        report.sitemap.display(),
        report.rejected.len()
    );

    Ok(report)
}
