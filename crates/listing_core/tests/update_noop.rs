mod support;

use listing_core::{update, FeedState, Msg};
use pretty_assertions::assert_eq;
use support::{catalog, init_logging, load_from};

#[test]
fn sentinel_after_exhaustion_changes_nothing() {
    init_logging();
    let rows = catalog(3);
    let mut state = load_from(FeedState::new(15), Msg::LoadNextPage, &rows);
    assert!(!state.has_more());
    state.consume_dirty();

    let (next, effects) = update(state.clone(), Msg::SentinelVisible);
    assert!(effects.is_empty());
    assert_eq!(next, state);

    let (next, effects) = update(state.clone(), Msg::LoadNextPage);
    assert!(effects.is_empty());
    assert_eq!(next, state);
}

#[test]
fn load_while_in_flight_changes_nothing() {
    init_logging();
    let (mut state, effects) = update(FeedState::new(15), Msg::LoadNextPage);
    assert_eq!(effects.len(), 1);
    state.consume_dirty();

    let (next, effects) = update(state.clone(), Msg::SentinelVisible);
    assert!(effects.is_empty());
    assert_eq!(next, state);
}
