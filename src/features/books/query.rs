use derive_more::derive::Display;
use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: i64 = 12;
pub const MAX_PAGE_SIZE: i64 = 48;
pub const DEFAULT_RANDOM_LIMIT: i64 = 8;
pub const MAX_RANDOM_LIMIT: i64 = 24;

/// Columns a listing may be ordered by.
///
/// Each variant maps to a fixed column identifier, so nothing a client sends
/// ever lands in the ORDER BY clause verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[display("id")]
    Id,
    #[default]
    #[display("title")]
    Title,
    #[display("author")]
    Author,
}

impl SortKey {
    /// Resolves a client-supplied key, falling back to `title` for anything unknown.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("id") => SortKey::Id,
            Some("author") => SortKey::Author,
            _ => SortKey::Title,
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortKey::Id => "id",
            SortKey::Title => "title",
            SortKey::Author => "author",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    #[display("asc")]
    Asc,
    #[display("desc")]
    Desc,
}

impl SortOrder {
    /// Only `desc` selects descending order; everything else is ascending.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        match raw.map(|s| s.trim().to_ascii_lowercase()).as_deref() {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// raw query string for GET /api/books
// every field is kept as text so malformed numbers fall back to defaults instead of a 400
#[derive(Debug, Default)]
pub struct ListParams {
    pub q: Option<String>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListParams {
    /// Folds decoded query pairs into params. A repeated key keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "q" => &mut params.q,
                "sort" => &mut params.sort,
                "order" => &mut params.order,
                "page" => &mut params.page,
                "page_size" => &mut params.page_size,
                _ => continue,
            };
            slot.get_or_insert(value);
        }
        params
    }
}

#[derive(Debug, Default)]
pub struct RandomParams {
    pub limit: Option<String>,
}

impl RandomParams {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let limit = pairs
            .into_iter()
            .find(|(key, _)| key == "limit")
            .map(|(_, value)| value);
        Self { limit }
    }
}

/// A sanitized listing request, ready to be turned into SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub sort: SortKey,
    pub order: SortOrder,
    pub page: i64,
    pub page_size: i64,
}

impl ListQuery {
    pub fn from_params(params: &ListParams) -> Self {
        let search = params
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_owned);

        let page = parse_int(params.page.as_deref()).unwrap_or(1).max(1);
        let page_size = parse_int(params.page_size.as_deref())
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        Self {
            search,
            sort: SortKey::parse_lenient(params.sort.as_deref()),
            order: SortOrder::parse_lenient(params.order.as_deref()),
            page,
            page_size,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::from_params(&ListParams::default())
    }
}

pub fn random_limit(params: &RandomParams) -> i64 {
    parse_int(params.limit.as_deref())
        .unwrap_or(DEFAULT_RANDOM_LIMIT)
        .clamp(1, MAX_RANDOM_LIMIT)
}

fn parse_int(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
}
