//! Translation of [`CatalogQuery`] into PostgREST query parameters.

use listing_core::{CatalogQuery, Direction, Predicate, QueryValue, RowRange};

/// Filter parameters only; shared by the count and the page request.
pub fn filter_params(query: &CatalogQuery, text_search_config: Option<&str>) -> Vec<(String, String)> {
    let mut params = Vec::with_capacity(query.predicates.len() + 1);
    for predicate in &query.predicates {
        match predicate {
            Predicate::Eq { column, value } => {
                params.push((column.as_str().to_string(), format!("eq.{}", encode_value(value))));
            }
            Predicate::Between { column, min, max } => {
                params.push((column.as_str().to_string(), format!("gte.{min}")));
                params.push((column.as_str().to_string(), format!("lte.{max}")));
            }
            Predicate::ContainsAll { column, values } => {
                let items: Vec<String> = values.iter().map(|v| quote_array_item(v)).collect();
                params.push((column.as_str().to_string(), format!("cs.{{{}}}", items.join(","))));
            }
            Predicate::TextSearch { column, query } => {
                let operator = match text_search_config {
                    Some(config) => format!("wfts({config})"),
                    None => "wfts".to_string(),
                };
                params.push((column.as_str().to_string(), format!("{operator}.{query}")));
            }
        }
    }
    params
}

/// Filters plus projection, ordering and row window for a page request.
pub fn page_params(
    query: &CatalogQuery,
    range: RowRange,
    text_search_config: Option<&str>,
) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(filter_params(query, text_search_config));
    let direction = match query.order.direction {
        Direction::Ascending => "asc",
        Direction::Descending => "desc",
    };
    params.push((
        "order".to_string(),
        format!("{}.{direction}", query.order.column.as_str()),
    ));
    params.push(("offset".to_string(), range.offset().to_string()));
    params.push(("limit".to_string(), range.limit().to_string()));
    params
}

/// Total from a `Content-Range` header such as `0-14/20` or `*/20`.
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.trim().parse().ok()
}

fn encode_value(value: &QueryValue) -> String {
    match value {
        QueryValue::Text(text) => text.clone(),
        QueryValue::Int(n) => n.to_string(),
    }
}

fn quote_array_item(item: &str) -> String {
    let needs_quotes = item.is_empty()
        || item
            .chars()
            .any(|c| matches!(c, ',' | '{' | '}' | '"' | '\\') || c.is_whitespace());
    if !needs_quotes {
        return item.to_string();
    }
    let mut quoted = String::with_capacity(item.len() + 2);
    quoted.push('"');
    for c in item.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
