mod support;

use listing_core::{update, FeedState, FilterState, ListingType, Msg};
use pretty_assertions::assert_eq;
use support::{answer, catalog, fail, ids, init_logging, load_from, record, single_fetch};

fn reset(filter: FilterState, search: Option<&str>) -> Msg {
    Msg::Reset {
        filter,
        search: search.map(ToOwned::to_owned),
    }
}

fn rent() -> FilterState {
    FilterState::default().with_listing_type(ListingType::Rent)
}

fn sale() -> FilterState {
    FilterState::default().with_listing_type(ListingType::Sale)
}

#[test]
fn reset_clears_items_and_fetches_page_zero() {
    init_logging();
    let rows = catalog(40);
    let state = load_from(FeedState::new(15), Msg::LoadNextPage, &rows);
    let state = load_from(state, Msg::LoadNextPage, &rows);
    assert_eq!(state.current_items().len(), 30);

    let (state, effects) = update(state, reset(sale(), Some("garden")));
    assert!(state.current_items().is_empty());
    assert_eq!(state.cursor().page_index(), 0);
    assert!(state.has_more());
    assert!(state.is_loading());
    assert_eq!(state.scope().search(), Some("garden"));

    let (ticket, range) = single_fetch(effects);
    assert_eq!(ticket.page_index, 0);
    assert_eq!(range.offset(), 0);
}

#[test]
fn stale_response_from_previous_scope_is_dropped() {
    init_logging();
    let rent_rows = vec![record("r1", 1), record("r2", 2)];
    let sale_rows = vec![record("s1", 1)];

    let (state, effects) = update(FeedState::new(15), reset(rent(), None));
    let (rent_ticket, rent_range) = single_fetch(effects);

    let (state, effects) = update(state, reset(sale(), None));
    let (sale_ticket, sale_range) = single_fetch(effects);

    let (state, _) = update(state, answer(sale_ticket, sale_range, &sale_rows));
    assert_eq!(ids(&state), vec!["s1"]);

    let (state, effects) = update(state, answer(rent_ticket, rent_range, &rent_rows));
    assert!(effects.is_empty());
    assert_eq!(ids(&state), vec!["s1"]);
    assert_eq!(state.stale_dropped(), 1);
    assert_eq!(state.last_error(), None);
}

#[test]
fn two_quick_resets_resolve_to_the_second_filter() {
    init_logging();
    let rent_rows = vec![record("r1", 1), record("r2", 2)];
    let sale_rows = vec![record("s1", 1), record("s2", 2), record("s3", 3)];

    let (state, effects) = update(FeedState::new(15), reset(rent(), None));
    let (rent_ticket, rent_range) = single_fetch(effects);
    let (state, effects) = update(state, reset(sale(), None));
    let (sale_ticket, sale_range) = single_fetch(effects);

    // Responses arrive in issue order: stale one first.
    let (state, _) = update(state, answer(rent_ticket, rent_range, &rent_rows));
    assert!(state.current_items().is_empty());
    assert!(state.is_loading());

    let (state, _) = update(state, answer(sale_ticket, sale_range, &sale_rows));
    assert_eq!(ids(&state), vec!["s1", "s2", "s3"]);
    assert!(!state.is_loading());
    assert!(!state.has_more());
}

#[test]
fn stale_page_from_same_filter_after_reset_is_dropped() {
    init_logging();
    let rows = catalog(30);
    let state = load_from(FeedState::new(15), reset(rent(), None), &rows);

    let (state, effects) = update(state, Msg::SentinelVisible);
    let (page_one_ticket, page_one_range) = single_fetch(effects);

    // Same filter, but the generation moved on.
    let (state, effects) = update(state, reset(rent(), Some("loft")));
    let (fresh_ticket, fresh_range) = single_fetch(effects);
    let (state, _) = update(state, answer(page_one_ticket, page_one_range, &rows));
    assert!(state.current_items().is_empty());

    let (state, _) = update(state, answer(fresh_ticket, fresh_range, &rows[..3]));
    assert_eq!(ids(&state), vec!["0", "1", "2"]);
}

#[test]
fn repeated_reset_with_same_scope_is_idempotent() {
    init_logging();
    let (state, effects) = update(FeedState::new(15), reset(rent(), Some(" villa ")));
    assert_eq!(effects.len(), 1);

    let (state_again, effects) = update(state.clone(), reset(rent(), Some("villa")));
    assert!(effects.is_empty());
    assert_eq!(state_again, state);
}

#[test]
fn sentinel_is_a_noop_until_next_reset_once_exhausted() {
    init_logging();
    let rows = catalog(3);
    let state = load_from(FeedState::new(15), reset(rent(), None), &rows);
    assert!(!state.has_more());

    let (state, effects) = update(state, Msg::SentinelVisible);
    assert!(effects.is_empty());

    let (state, effects) = update(state, reset(sale(), None));
    assert_eq!(effects.len(), 1);
    assert!(state.has_more());
}

#[test]
fn view_reports_loading_and_dirty_flags() {
    init_logging();
    let (mut state, _effects) = update(FeedState::new(15), reset(rent(), None));
    let view = state.view();
    assert!(view.is_loading);
    assert!(view.has_more);
    assert!(view.dirty);
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn new_search_stays_pending_until_its_first_page_lands() {
    init_logging();
    let rows = catalog(5);
    let state = load_from(FeedState::new(15), reset(rent(), Some("garden")), &rows);
    let view = state.view();
    assert_eq!(view.search.as_deref(), Some("garden"));
    assert!(!view.search_pending);

    let (state, effects) = update(state, reset(rent(), Some("pool")));
    let view = state.view();
    assert_eq!(view.search.as_deref(), Some("pool"));
    assert!(view.search_pending);

    let (ticket, range) = single_fetch(effects);
    let (state, _) = update(state, fail(ticket, "timeout"));
    assert!(state.view().search_pending);

    let (state, effects) = update(state, Msg::LoadNextPage);
    let (ticket, range_retry) = single_fetch(effects);
    assert_eq!(range_retry, range);
    let (state, _) = update(state, answer(ticket, range, &rows));
    let view = state.view();
    assert_eq!(view.search.as_deref(), Some("pool"));
    assert!(!view.search_pending);
}
