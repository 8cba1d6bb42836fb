//! Page views of the site renderer.
//!
//! Each view borrows the page's dataset snapshot, reads its initial state from
//! the page URL and writes markup into a [`Document`]. User events (letter
//! clicks, keystrokes, the stats section becoming visible) are method calls.

use log::debug;
use rand::Rng;
use reqwest::Url;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::page::{
    PageHooks, ALPHABET_GRID, CLANS_LIST, PRAISE_CONTAINER, SPOTLIGHT_CONTAINER,
};
use crate::query::{requested_clan, search_destination, ExploreQuery, PageKind};
use crate::render;
use crate::select::{
    filter_by_letter, find_by_name, group_by_first_letter, search_by_prefix, totals, LetterFilter,
};
use crate::spotlight::{self, SPOTLIGHT_SIZE};
use crate::stats::StatsPanel;
use crate::types::Dataset;

/// Rendered state of the open page
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_letter: Option<String>,
    /// Inner HTML per container hook
    pub containers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub counters: Vec<String>,
}

impl Document {
    pub fn new(location: &Url) -> Self {
        Self {
            location: location.to_string(),
            title: None,
            search_value: None,
            active_letter: None,
            containers: BTreeMap::new(),
            counters: Vec::new(),
        }
    }

    pub fn set_inner_html(&mut self, hook: &str, html: String) {
        self.containers.insert(hook.to_string(), html);
    }

    pub fn inner_html(&self, hook: &str) -> Option<&str> {
        self.containers.get(hook).map(String::as_str)
    }
}

/// Home page: search box, spotlight and stats counters
pub struct HomeView<'a> {
    dataset: &'a Dataset,
    location: Url,
    stats: Option<StatsPanel>,
    document: Document,
}

impl<'a> HomeView<'a> {
    pub fn init<R: Rng + ?Sized>(
        dataset: &'a Dataset,
        hooks: &PageHooks,
        location: Url,
        rng: &mut R,
    ) -> Self {
        let mut view = Self {
            dataset,
            document: Document::new(&location),
            location,
            stats: None,
        };

        // Stats live behind the search box check, spotlight does not
        if hooks.home_search && hooks.stats && hooks.counters > 0 {
            let panel = StatsPanel::new(totals(dataset.clans()), hooks.counters);
            view.document.counters = panel.displays();
            view.stats = Some(panel);
        }

        if hooks.spotlight && !dataset.is_empty() {
            let picked = spotlight::sample(dataset.clans(), SPOTLIGHT_SIZE, rng);
            debug!("Spotlight picked {} clans", picked.len());
            view.document
                .set_inner_html(SPOTLIGHT_CONTAINER, render::spotlight(&picked));
        }

        view
    }

    pub fn dataset(&self) -> &Dataset {
        self.dataset
    }

    /// Enter pressed in the search box: where to navigate, if anywhere
    pub fn commit_search(&self, input: &str) -> Option<Url> {
        search_destination(&self.location, input)
    }

    /// Visibility change of the stats section
    pub fn stats_visible(&mut self, intersection_ratio: f64) -> bool {
        let Some(panel) = self.stats.as_mut() else {
            return false;
        };
        let started = panel.on_visibility(intersection_ratio);
        self.document.counters = panel.displays();
        started
    }

    /// One animation frame. Returns whether another is needed.
    pub fn animation_frame(&mut self) -> bool {
        let Some(panel) = self.stats.as_mut() else {
            return false;
        };
        let pending = panel.frame();
        self.document.counters = panel.displays();
        pending
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Explore page: alphabet filter, live search and the grouped listing
pub struct ExploreView<'a> {
    dataset: &'a Dataset,
    hooks: PageHooks,
    location: Url,
    document: Document,
}

impl<'a> ExploreView<'a> {
    pub fn init(dataset: &'a Dataset, hooks: &PageHooks, location: Url) -> Self {
        let mut view = Self {
            dataset,
            hooks: hooks.clone(),
            document: Document::new(&location),
            location,
        };

        view.set_active_letter(None);
        match ExploreQuery::from_url(&view.location) {
            ExploreQuery::Search(query) => {
                if view.hooks.search_input {
                    view.document.search_value = Some(query.clone());
                }
                view.show_search(&query);
            }
            ExploreQuery::Letter(letter) => {
                view.show_letter(&letter);
                view.set_active_letter(Some(&letter));
            }
        }
        view
    }

    /// Alphabet letter clicked: update the URL in place and re-list
    pub fn select_letter(&mut self, letter: &str) {
        let letter = LetterFilter::parse(letter);
        ExploreQuery::Letter(letter.clone()).apply(&mut self.location);
        self.document.location = self.location.to_string();
        self.set_active_letter(Some(&letter));
        self.show_letter(&letter);
    }

    /// Search box input event
    pub fn input_search(&mut self, query: &str) {
        let state = if query.trim().is_empty() {
            ExploreQuery::Letter(LetterFilter::All)
        } else {
            ExploreQuery::Search(query.to_string())
        };
        state.apply(&mut self.location);
        self.document.location = self.location.to_string();
        if self.hooks.search_input {
            self.document.search_value = Some(query.to_string());
        }
        self.show_search(query);
    }

    fn set_active_letter(&mut self, letter: Option<&LetterFilter>) {
        self.document.active_letter = letter.map(|l| l.to_string());
        if self.hooks.alphabet_grid {
            self.document
                .set_inner_html(ALPHABET_GRID, render::alphabet_grid(letter));
        }
    }

    fn show_letter(&mut self, letter: &LetterFilter) {
        if !self.hooks.clans_list {
            return;
        }
        let selected = filter_by_letter(self.dataset.clans(), letter);
        let html = render::clan_groups(&group_by_first_letter(&selected));
        self.document.set_inner_html(CLANS_LIST, html);
    }

    fn show_search(&mut self, query: &str) {
        if !self.hooks.clans_list {
            return;
        }
        if query.trim().is_empty() {
            self.show_letter(&LetterFilter::All);
            return;
        }
        let results = search_by_prefix(self.dataset.clans(), query);
        self.document
            .set_inner_html(CLANS_LIST, render::search_results(&results));
    }

    pub fn location(&self) -> &Url {
        &self.location
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Render the clan detail page for the `name` in the URL
pub fn clan_view(dataset: &Dataset, hooks: &PageHooks, location: &Url) -> Document {
    let mut document = Document::new(location);
    if !hooks.praise_container {
        return document;
    }

    let name = requested_clan(location);
    match find_by_name(dataset.clans(), &name) {
        Some(clan) => {
            document.title = Some(render::detail_title(&name));
            document.set_inner_html(PRAISE_CONTAINER, render::clan_detail(clan));
        }
        None => document.set_inner_html(PRAISE_CONTAINER, render::CLAN_NOT_FOUND.to_string()),
    }
    document
}

/// Render whichever view the URL names. `None` for pages without one.
pub fn render_page<R: Rng + ?Sized>(
    dataset: &Dataset,
    hooks: &PageHooks,
    location: Url,
    stats_visibility: Option<f64>,
    rng: &mut R,
) -> Option<Document> {
    let document = match PageKind::from_url(&location)? {
        PageKind::Home => {
            let mut home = HomeView::init(dataset, hooks, location, rng);
            if let Some(ratio) = stats_visibility {
                if home.stats_visible(ratio) {
                    while home.animation_frame() {}
                }
            }
            home.into_document()
        }
        PageKind::Explore => ExploreView::init(dataset, hooks, location).into_document(),
        PageKind::Clan => clan_view(dataset, hooks, &location),
    };
    Some(document)
}
