//! Page URL state: which page is open and the explore/detail query parameters

use reqwest::Url;

use crate::select::LetterFilter;
use crate::types::FALLBACK_CLAN_NAME;

pub const SEARCH_PARAM: &str = "search";
pub const LETTER_PARAM: &str = "letter";
pub const NAME_PARAM: &str = "name";

pub const EXPLORE_PAGE: &str = "explore.html";

/// Pages that load the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Explore,
    Clan,
}

impl PageKind {
    /// Pick the page from the last path segment; an empty one is the home page
    pub fn from_url(url: &Url) -> Option<Self> {
        let page = url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .filter(|segment| !segment.is_empty())
            .unwrap_or("index.html");
        match page {
            "index.html" => Some(PageKind::Home),
            "explore.html" => Some(PageKind::Explore),
            "clan.html" => Some(PageKind::Clan),
            _ => None,
        }
    }
}

/// Value of a query parameter, if present
pub fn query_param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Set or remove a query parameter, keeping the others in order
pub fn set_query_param(url: &mut Url, key: &str, value: Option<&str>) {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if let Some(value) = value {
        pairs.push((key.to_string(), value.to_string()));
    }

    if pairs.is_empty() {
        url.set_query(None);
    } else {
        url.query_pairs_mut().clear().extend_pairs(pairs);
    }
}

/// Explore view mode carried in the URL. `search` and `letter` never coexist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExploreQuery {
    Search(String),
    Letter(LetterFilter),
}

impl ExploreQuery {
    /// A non-empty `search` wins; otherwise `letter`, defaulting to ALL
    pub fn from_url(url: &Url) -> Self {
        match query_param(url, SEARCH_PARAM) {
            Some(search) if !search.is_empty() => ExploreQuery::Search(search),
            _ => ExploreQuery::Letter(
                query_param(url, LETTER_PARAM)
                    .map(|l| LetterFilter::parse(&l))
                    .unwrap_or(LetterFilter::All),
            ),
        }
    }

    /// Store this state in `url`, clearing the other parameter
    pub fn apply(&self, url: &mut Url) {
        match self {
            ExploreQuery::Search(search) => {
                set_query_param(url, LETTER_PARAM, None);
                set_query_param(url, SEARCH_PARAM, Some(search));
            }
            ExploreQuery::Letter(letter) => {
                set_query_param(url, SEARCH_PARAM, None);
                let value = match letter {
                    LetterFilter::All => None,
                    LetterFilter::Letter(l) => Some(l.as_str()),
                };
                set_query_param(url, LETTER_PARAM, value);
            }
        }
    }
}

/// Clan requested by the detail page
pub fn requested_clan(url: &Url) -> String {
    query_param(url, NAME_PARAM).unwrap_or_else(|| FALLBACK_CLAN_NAME.to_string())
}

/// Where committing a home-page search goes, or `None` for blank input
pub fn search_destination(current: &Url, input: &str) -> Option<Url> {
    let value = input.trim();
    if value.is_empty() {
        return None;
    }
    let mut destination = current.join(EXPLORE_PAGE).ok()?;
    destination.set_query(None);
    destination.set_fragment(None);
    destination
        .query_pairs_mut()
        .append_pair(SEARCH_PARAM, value);
    Some(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn page_kind_from_last_segment() {
        assert_eq!(PageKind::from_url(&url("https://x.test/")), Some(PageKind::Home));
        assert_eq!(
            PageKind::from_url(&url("https://x.test/explore.html?letter=B")),
            Some(PageKind::Explore)
        );
        assert_eq!(
            PageKind::from_url(&url("https://x.test/site/clan.html")),
            Some(PageKind::Clan)
        );
        assert_eq!(PageKind::from_url(&url("https://x.test/contribute.html")), None);
    }

    #[test]
    fn search_beats_letter() {
        let q = ExploreQuery::from_url(&url("https://x.test/explore.html?letter=B&search=zu"));
        assert_eq!(q, ExploreQuery::Search("zu".into()));
    }

    #[test]
    fn empty_search_falls_back_to_letter() {
        let q = ExploreQuery::from_url(&url("https://x.test/explore.html?search=&letter=m"));
        assert_eq!(q, ExploreQuery::Letter(LetterFilter::Letter("M".into())));
        let q = ExploreQuery::from_url(&url("https://x.test/explore.html"));
        assert_eq!(q, ExploreQuery::Letter(LetterFilter::All));
    }

    #[test]
    fn apply_keeps_params_exclusive() {
        let mut u = url("https://x.test/explore.html?search=bh&ref=home");
        ExploreQuery::Letter(LetterFilter::Letter("Z".into())).apply(&mut u);
        assert_eq!(u.as_str(), "https://x.test/explore.html?ref=home&letter=Z");

        ExploreQuery::Search("ma ngcobo".into()).apply(&mut u);
        assert_eq!(query_param(&u, LETTER_PARAM), None);
        assert_eq!(query_param(&u, SEARCH_PARAM).as_deref(), Some("ma ngcobo"));

        ExploreQuery::Letter(LetterFilter::All).apply(&mut u);
        assert_eq!(u.as_str(), "https://x.test/explore.html?ref=home");
    }

    #[test]
    fn apply_all_clears_query_entirely() {
        let mut u = url("https://x.test/explore.html?letter=B");
        ExploreQuery::Letter(LetterFilter::All).apply(&mut u);
        assert_eq!(u.as_str(), "https://x.test/explore.html");
    }

    #[test]
    fn requested_clan_defaults() {
        assert_eq!(requested_clan(&url("https://x.test/clan.html")), "Bhengu");
        assert_eq!(
            requested_clan(&url("https://x.test/clan.html?name=Ma%20Ngcobo")),
            "Ma Ngcobo"
        );
    }

    #[test]
    fn search_destination_trims_and_encodes() {
        let home = url("https://x.test/index.html");
        let dest = search_destination(&home, "  Ma Ngcobo ").unwrap();
        assert_eq!(dest.path(), "/explore.html");
        assert_eq!(query_param(&dest, SEARCH_PARAM).as_deref(), Some("Ma Ngcobo"));
        assert!(search_destination(&home, "   ").is_none());
    }
}
