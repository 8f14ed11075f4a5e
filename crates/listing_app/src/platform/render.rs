use listing_core::{FeedViewModel, ListingRowView, ListingType};

pub const PROMPT_HINT: &str = "[enter] more  [r] retry  [s <text>] search  [q] quit";

/// Renders the status line followed by rows starting at `from`, so repeated
/// renders only print what was appended since the last one.
pub fn render(view: &FeedViewModel, from: usize) -> Vec<String> {
    let mut lines: Vec<String> = view
        .items
        .iter()
        .enumerate()
        .skip(from)
        .map(|(index, row)| render_row(index + 1, row))
        .collect();
    lines.push(status_line(view));
    if let Some(err) = &view.last_error {
        lines.push(format!("! {err} (press r to retry)"));
    }
    lines
}

fn render_row(position: usize, row: &ListingRowView) -> String {
    let suffix = if row.listing_type == ListingType::Rent {
        "/mo"
    } else {
        ""
    };
    let currency = if row.currency.is_empty() {
        String::new()
    } else {
        format!("{} ", row.currency)
    };
    format!(
        "{position:>4}. {title} | {kind} {property} | {beds}bd/{baths}ba | {currency}{price}{suffix} | {location}",
        title = row.title,
        kind = row.listing_type,
        property = row.property_type,
        beds = row.bedrooms,
        baths = row.bathrooms,
        price = format_price(row.price),
        location = row.location,
    )
}

fn status_line(view: &FeedViewModel) -> String {
    let total = view
        .total_count
        .map_or_else(|| "?".to_string(), |count| count.to_string());
    let state = if view.is_loading {
        "loading"
    } else if view.has_more {
        "more available"
    } else {
        "end of results"
    };
    let mut line = format!("-- {} of {} listings, {}", view.items.len(), total, state);
    if let Some(search) = &view.search {
        line.push_str(&format!(", search \"{search}\""));
        if view.search_pending {
            line.push_str(" (updating)");
        }
    }
    line.push_str(" --");
    line
}

/// Whole units with thousands separators; fractions are rounded.
pub fn format_price(price: f64) -> String {
    let whole = price.max(0.0).round() as u64;
    let digits = whole.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
