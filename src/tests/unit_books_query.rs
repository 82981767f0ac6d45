use crate::database::sqlite::{like_pattern, list_query};
use crate::features::books::query::{
    ListParams, ListQuery, RandomParams, SortKey, SortOrder, random_limit,
};

fn params(pairs: &[(&str, &str)]) -> ListParams {
    let mut params = ListParams::default();
    for (key, value) in pairs {
        let value = Some(value.to_string());
        match *key {
            "q" => params.q = value,
            "sort" => params.sort = value,
            "order" => params.order = value,
            "page" => params.page = value,
            "page_size" => params.page_size = value,
            other => panic!("unknown listing parameter {}", other),
        }
    }
    params
}

#[test]
fn test_defaults_when_nothing_is_given() {
    let query = ListQuery::from_params(&ListParams::default());

    assert_eq!(query.search, None);
    assert_eq!(query.sort, SortKey::Title);
    assert_eq!(query.order, SortOrder::Asc);
    assert_eq!(query.page, 1);
    assert_eq!(query.page_size, 12);
    assert_eq!(query.offset(), 0);
}

#[test]
fn test_sort_key_whitelist() {
    for (raw, expected) in [
        ("id", SortKey::Id),
        ("title", SortKey::Title),
        ("author", SortKey::Author),
        ("AUTHOR", SortKey::Author),
        ("description", SortKey::Title),
        ("pdf_path", SortKey::Title),
        ("title; DROP TABLE books", SortKey::Title),
        ("", SortKey::Title),
    ] {
        let query = ListQuery::from_params(&params(&[("sort", raw)]));
        assert_eq!(query.sort, expected, "sort={:?}", raw);
    }
}

#[test]
fn test_order_only_desc_is_descending() {
    for (raw, expected) in [
        ("desc", SortOrder::Desc),
        ("DESC", SortOrder::Desc),
        ("asc", SortOrder::Asc),
        ("descending", SortOrder::Asc),
        ("random", SortOrder::Asc),
        ("", SortOrder::Asc),
    ] {
        let query = ListQuery::from_params(&params(&[("order", raw)]));
        assert_eq!(query.order, expected, "order={:?}", raw);
    }
}

#[test]
fn test_page_clamps_to_one() {
    for raw in ["0", "-7", "abc", "", "1.5"] {
        let query = ListQuery::from_params(&params(&[("page", raw)]));
        assert_eq!(query.page, 1, "page={:?}", raw);
    }

    let query = ListQuery::from_params(&params(&[("page", "4")]));
    assert_eq!(query.page, 4);
}

#[test]
fn test_page_size_clamps_to_bounds() {
    for (raw, expected) in [
        ("0", 1),
        ("-3", 1),
        ("1", 1),
        ("24", 24),
        ("48", 48),
        ("49", 48),
        ("1000", 48),
        ("twelve", 12),
    ] {
        let query = ListQuery::from_params(&params(&[("page_size", raw)]));
        assert_eq!(query.page_size, expected, "page_size={:?}", raw);
    }
}

#[test]
fn test_offset_follows_page_and_size() {
    for page in 1..=6 {
        for page_size in [1, 7, 12, 48] {
            let page_raw = page.to_string();
            let page_size_raw = page_size.to_string();
            let query = ListQuery::from_params(&params(&[
                ("page", page_raw.as_str()),
                ("page_size", page_size_raw.as_str()),
            ]));
            assert_eq!(query.offset(), (page - 1) * page_size);
        }
    }
}

#[test]
fn test_huge_page_does_not_overflow_offset() {
    let page_raw = i64::MAX.to_string();
    let query = ListQuery::from_params(&params(&[("page", page_raw.as_str()), ("page_size", "48")]));
    assert_eq!(query.offset(), i64::MAX);
}

#[test]
fn test_blank_search_is_ignored() {
    let query = ListQuery::from_params(&params(&[("q", "   \t ")]));
    assert_eq!(query.search, None);

    let query = ListQuery::from_params(&params(&[("q", "  Orwell ")]));
    assert_eq!(query.search.as_deref(), Some("Orwell"));
}

#[test]
fn test_random_limit_clamps_to_bounds() {
    for (raw, expected) in [
        (None, 8),
        (Some("0"), 1),
        (Some("-1"), 1),
        (Some("5"), 5),
        (Some("24"), 24),
        (Some("25"), 24),
        (Some("lots"), 8),
    ] {
        let params = RandomParams {
            limit: raw.map(str::to_string),
        };
        assert_eq!(random_limit(&params), expected, "limit={:?}", raw);
    }
}

#[test]
fn test_like_pattern_escapes_wildcards() {
    assert_eq!(like_pattern("Orwell"), "%Orwell%");
    assert_eq!(like_pattern("100%"), "%100\\%%");
    assert_eq!(like_pattern("snake_case"), "%snake\\_case%");
    assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
}

#[test]
fn test_order_by_comes_from_the_enum() {
    let query = ListQuery::from_params(&params(&[
        ("sort", "title; DROP TABLE books"),
        ("order", "desc; --"),
    ]));
    let builder = list_query(&query);
    let sql = builder.sql();

    assert!(sql.contains("ORDER BY title ASC, id ASC"), "{}", sql);
    assert!(!sql.contains("DROP"), "{}", sql);
    assert!(!sql.contains("WHERE"), "{}", sql);
}

#[test]
fn test_search_text_is_bound_not_inlined() {
    let query = ListQuery::from_params(&params(&[
        ("q", "x' OR 1=1 --"),
        ("sort", "author"),
        ("order", "desc"),
    ]));
    let builder = list_query(&query);
    let sql = builder.sql();

    assert!(sql.contains("WHERE title LIKE ?"), "{}", sql);
    assert!(sql.contains("ORDER BY author DESC, id ASC"), "{}", sql);
    assert!(sql.ends_with("LIMIT ? OFFSET ?"), "{}", sql);
    assert!(!sql.contains("1=1"), "{}", sql);
}

fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// repeated keys keep the first value, unknown keys are ignored
#[test]
fn test_list_params_from_pairs_keeps_first_value() {
    let params = ListParams::from_pairs(pairs(&[
        ("page", "1"),
        ("page", "2"),
        ("sort", "id"),
        ("sort", "author"),
        ("q", "Orwell"),
        ("utm_source", "newsletter"),
        ("q", "Huxley"),
    ]));

    assert_eq!(params.page.as_deref(), Some("1"));
    assert_eq!(params.sort.as_deref(), Some("id"));
    assert_eq!(params.q.as_deref(), Some("Orwell"));
    assert_eq!(params.order, None);
    assert_eq!(params.page_size, None);
}

#[test]
fn test_random_params_from_pairs_keeps_first_value() {
    let params = RandomParams::from_pairs(pairs(&[("limit", "3"), ("limit", "4")]));
    assert_eq!(params.limit.as_deref(), Some("3"));

    let params = RandomParams::from_pairs(pairs(&[("other", "3")]));
    assert_eq!(params.limit, None);
}
