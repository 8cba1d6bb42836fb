//! Markup for the renderer's page containers. Takes already-selected clans
//! and only decides how they look.

use std::collections::BTreeMap;

use crate::select::{LetterFilter, ALPHABET};
use crate::types::ClanRecord;
use crate::utils::{clan_href, html_escape};

pub const NO_CLANS_FOUND: &str = "<p>No clans found.</p>";
pub const CLAN_NOT_FOUND: &str = "<p>Clan not found.</p>";
pub const SEARCH_RESULTS_TITLE: &str = "Search Results";
pub const CONTRIBUTE_PAGE: &str = "contribute.html";

fn clan_tag(clan: &ClanRecord) -> String {
    format!(
        r#"<a href="{}" class="clan-tag">{}</a>"#,
        html_escape(&clan_href(&clan.name)),
        html_escape(&clan.name)
    )
}

fn clan_group(title: &str, clans: &[&ClanRecord]) -> String {
    let tags: String = clans.iter().map(|c| clan_tag(c)).collect();
    format!(
        r#"<div class="clan-group"><h3>{}</h3><div class="clan-tags">{}</div></div>"#,
        html_escape(title),
        tags
    )
}

/// Letter groups in key order, or the empty-listing message
pub fn clan_groups(groups: &BTreeMap<String, Vec<&ClanRecord>>) -> String {
    if groups.is_empty() {
        return NO_CLANS_FOUND.to_string();
    }
    groups
        .iter()
        .map(|(key, clans)| clan_group(key, clans))
        .collect()
}

/// Search hits as one group, or the no-results block inviting contributions
pub fn search_results(results: &[&ClanRecord]) -> String {
    if results.is_empty() {
        return format!(
            r#"<div class="no-results"><p>No results found.</p><a href="{}" class="contribute-link">Contribute by adding this surname clans</a></div>"#,
            CONTRIBUTE_PAGE
        );
    }
    clan_group(SEARCH_RESULTS_TITLE, results)
}

/// The alphabet filter, marking `active` if it is one of the letters shown
pub fn alphabet_grid(active: Option<&LetterFilter>) -> String {
    ALPHABET
        .iter()
        .map(|letter| {
            let class = if active.is_some_and(|a| a.as_str() == *letter) {
                "letter active-letter"
            } else {
                "letter"
            };
            format!(
                r#"<span class="{}" data-letter="{}">{}</span>"#,
                class, letter, letter
            )
        })
        .collect()
}

pub fn spotlight(clans: &[&ClanRecord]) -> String {
    clans
        .iter()
        .map(|clan| {
            format!(
                r#"<a href="{}" class="spotlight-tag">{}</a>"#,
                html_escape(&clan_href(&clan.name)),
                html_escape(&clan.name)
            )
        })
        .collect()
}

pub fn detail_title(name: &str) -> String {
    format!("Izithakazelo zakwa {}", name)
}

/// A clan's praise verses under the localized heading
pub fn clan_detail(clan: &ClanRecord) -> String {
    let praises: String = clan
        .izithakazelo
        .iter()
        .map(|line| format!("<p>{}</p>", html_escape(line)))
        .collect();
    format!(
        r#"<h1>{}</h1><div class="praise-text">{}</div>"#,
        html_escape(&detail_title(&clan.name)),
        praises
    )
}
