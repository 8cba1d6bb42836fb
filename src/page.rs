//! Which renderer containers a page's HTML actually provides

use anyhow::{anyhow, Context, Result};
use scraper::{Html, Selector};
use std::fs;
use std::path::Path;

pub const HOME_SEARCH: &str = "home-search";
pub const SEARCH_INPUT: &str = "search-input";
pub const CLANS_LIST: &str = "clans-list";
pub const ALPHABET_GRID: &str = "alphabet-grid";
pub const SPOTLIGHT_CONTAINER: &str = "spotlight-container";
pub const STATS_SECTION: &str = "stats";
pub const COUNTER: &str = "counter";
pub const PRAISE_CONTAINER: &str = "praise-container";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageHooks {
    pub home_search: bool,
    pub search_input: bool,
    pub clans_list: bool,
    pub alphabet_grid: bool,
    pub spotlight: bool,
    pub stats: bool,
    pub counters: usize,
    pub praise_container: bool,
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| anyhow!("Bad selector {}: {}", css, e))
}

impl PageHooks {
    /// Every hook present, with both stats counters
    pub fn all() -> Self {
        Self {
            home_search: true,
            search_input: true,
            clans_list: true,
            alphabet_grid: true,
            spotlight: true,
            stats: true,
            counters: 2,
            praise_container: true,
        }
    }

    pub fn from_html(html: &str) -> Result<Self> {
        let document = Html::parse_document(html);
        let count = |css: String| -> Result<usize> {
            Ok(document.select(&selector(&css)?).count())
        };
        let has_id = |id: &str| -> Result<bool> { Ok(count(format!("#{}", id))? > 0) };

        Ok(Self {
            home_search: has_id(HOME_SEARCH)?,
            search_input: has_id(SEARCH_INPUT)?,
            clans_list: has_id(CLANS_LIST)?,
            alphabet_grid: count(format!(".{}", ALPHABET_GRID))? > 0,
            spotlight: has_id(SPOTLIGHT_CONTAINER)?,
            stats: has_id(STATS_SECTION)?,
            counters: count(format!(".{}", COUNTER))?,
            praise_container: has_id(PRAISE_CONTAINER)?,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let html = fs::read_to_string(path)
            .with_context(|| format!("Failed to read page: {}", path.display()))?;
        Self::from_html(&html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_explore_hooks() -> Result<()> {
        let hooks = PageHooks::from_html(
            r#"<html><body>
                <input id="search-input">
                <div class="alphabet-grid"></div>
                <div id="clans-list"></div>
            </body></html>"#,
        )?;
        assert!(hooks.search_input);
        assert!(hooks.alphabet_grid);
        assert!(hooks.clans_list);
        assert!(!hooks.home_search);
        assert!(!hooks.spotlight);
        assert_eq!(hooks.counters, 0);
        Ok(())
    }

    #[test]
    fn counts_counters() -> Result<()> {
        let hooks = PageHooks::from_html(
            r#"<section id="stats"><span class="counter">0</span><span class="counter big">0</span></section>"#,
        )?;
        assert!(hooks.stats);
        assert_eq!(hooks.counters, 2);
        Ok(())
    }
}
