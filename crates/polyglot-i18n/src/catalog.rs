//! Searchable, paginated listing of translation keys

use crate::engine::Engine;
use crate::error::I18nResult;
use std::collections::BTreeSet;

/// Keys per page unless a query says otherwise
pub const DEFAULT_PER_PAGE: usize = 25;

/// Which slice of the matching keys to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// One-based page number; `0` means the first page
    Number(usize),
    /// Every matching key
    All,
}

impl Default for Page {
    fn default() -> Self {
        Self::Number(1)
    }
}

/// Parameters of a key search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyQuery {
    /// Locale whose keys are listed; empty means the engine default
    pub primary_locale: String,
    /// Locale being edited, searched as well when it differs from the primary
    pub editing_locale: Option<String>,
    /// Case-insensitive substring matched against keys and values
    pub keyword: Option<String>,
    /// Requested page
    pub page: Page,
    /// Keys per page; `0` falls back to [`DEFAULT_PER_PAGE`]
    pub per_page: usize,
}

impl KeyQuery {
    /// First page of every key of `primary_locale`
    pub fn new(primary_locale: impl Into<String>) -> Self {
        Self {
            primary_locale: primary_locale.into(),
            editing_locale: None,
            keyword: None,
            page: Page::default(),
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Also search `locale`
    #[must_use]
    pub fn editing(mut self, locale: impl Into<String>) -> Self {
        self.editing_locale = Some(locale.into());
        self
    }

    /// Only keep keys whose key or value contains `keyword`
    #[must_use]
    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    /// Select the page to return
    #[must_use]
    pub const fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    /// Set the page size
    #[must_use]
    pub const fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPage {
    /// Matching keys on this page, sorted
    pub keys: Vec<String>,
    /// Number of matching keys across all pages
    pub total: usize,
    /// Current page, `None` when every key was requested
    pub page: Option<usize>,
    /// Number of pages
    pub pages: usize,
    /// Effective page size
    pub per_page: usize,
}

impl Engine {
    /// Search the keys of the primary (and editing) locale
    pub fn search_keys(&self, query: &KeyQuery) -> I18nResult<KeyPage> {
        let primary = if query.primary_locale.is_empty() {
            self.default_locale()
        } else {
            query.primary_locale.as_str()
        };
        let editing = query
            .editing_locale
            .as_deref()
            .filter(|locale| !locale.is_empty() && *locale != primary);
        let keyword = query
            .keyword
            .as_deref()
            .map(str::to_lowercase)
            .filter(|keyword| !keyword.is_empty());

        let keys: BTreeSet<String> = self
            .translations()?
            .into_iter()
            .filter(|t| t.locale == primary || Some(t.locale.as_str()) == editing)
            .filter(|t| {
                keyword.as_deref().map_or(true, |keyword| {
                    t.key.to_lowercase().contains(keyword) || t.value.to_lowercase().contains(keyword)
                })
            })
            .map(|t| t.key)
            .collect();

        Ok(paginate(keys.into_iter().collect(), query.page, query.per_page))
    }
}

fn paginate(keys: Vec<String>, page: Page, per_page: usize) -> KeyPage {
    let per_page = if per_page == 0 { DEFAULT_PER_PAGE } else { per_page };
    let total = keys.len();
    let pages = total.div_ceil(per_page);

    match page {
        Page::All => KeyPage {
            keys,
            total,
            page: None,
            pages,
            per_page,
        },
        Page::Number(number) => {
            let number = number.max(1);
            let start = (number - 1).saturating_mul(per_page);
            let keys = keys.into_iter().skip(start).take(per_page).collect();
            KeyPage {
                keys,
                total,
                page: Some(number),
                pages,
                per_page,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::MemoryBackend;
    use crate::translation::Translation;

    fn engine() -> Engine {
        let engine = Engine::builder()
            .backend(MemoryBackend::new())
            .build()
            .unwrap();
        for (locale, key, value) in [
            ("en-US", "user.name", "Name"),
            ("en-US", "user.email", "Email"),
            ("en-US", "greeting", "Hello"),
            ("de-DE", "greeting", "Hallo"),
            ("de-DE", "farewell", "Tschüss"),
            ("fr-FR", "only.french", "Bonjour"),
        ] {
            engine
                .add_translation(&Translation::new(locale, key, value))
                .unwrap();
        }
        engine
    }

    #[test]
    fn test_lists_primary_locale_sorted() {
        let page = engine().search_keys(&KeyQuery::new("en-US")).unwrap();
        assert_eq!(page.keys, vec!["greeting", "user.email", "user.name"]);
        assert_eq!(page.total, 3);
        assert_eq!(page.pages, 1);
        assert_eq!(page.page, Some(1));
    }

    #[test]
    fn test_empty_primary_uses_default_locale() {
        let page = engine().search_keys(&KeyQuery::new("")).unwrap();
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_editing_locale_is_merged_without_duplicates() {
        let query = KeyQuery::new("en-US").editing("de-DE");
        let page = engine().search_keys(&query).unwrap();
        assert_eq!(page.keys, vec!["farewell", "greeting", "user.email", "user.name"]);
    }

    #[test]
    fn test_keyword_matches_key_or_value_ignoring_case() {
        let engine = engine();
        let by_key = engine
            .search_keys(&KeyQuery::new("en-US").keyword("USER"))
            .unwrap();
        assert_eq!(by_key.keys, vec!["user.email", "user.name"]);

        let by_value = engine
            .search_keys(&KeyQuery::new("en-US").editing("de-DE").keyword("hall"))
            .unwrap();
        assert_eq!(by_value.keys, vec!["greeting"]);
    }

    #[test]
    fn test_pagination() {
        let keys: Vec<String> = (0..60).map(|i| format!("key.{i:02}")).collect();

        let first = paginate(keys.clone(), Page::Number(0), 25);
        assert_eq!(first.page, Some(1));
        assert_eq!(first.keys.len(), 25);
        assert_eq!(first.keys[0], "key.00");
        assert_eq!(first.pages, 3);

        let last = paginate(keys.clone(), Page::Number(3), 25);
        assert_eq!(last.keys.len(), 10);
        assert_eq!(last.keys[0], "key.50");

        let beyond = paginate(keys.clone(), Page::Number(4), 25);
        assert!(beyond.keys.is_empty());
        assert_eq!(beyond.total, 60);

        let all = paginate(keys, Page::All, 25);
        assert_eq!(all.keys.len(), 60);
        assert_eq!(all.page, None);
    }

    #[test]
    fn test_zero_per_page_uses_default() {
        let page = paginate(vec!["a".to_string()], Page::default(), 0);
        assert_eq!(page.per_page, DEFAULT_PER_PAGE);
        assert_eq!(page.pages, 1);
    }
}
