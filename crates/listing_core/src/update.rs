use feed_logging::{feed_debug, feed_trace};

use crate::{Effect, FeedScope, FeedState, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::Reset { filter, search } => {
            let scope = FeedScope::new(filter, search.as_deref());
            if state.is_reset_pending_for(&scope) {
                feed_trace!("reset ignored: page 0 of this scope is already loading");
                return (state, Vec::new());
            }
            state.reset_scope(scope);
            vec![state.issue_fetch()]
        }
        Msg::LoadNextPage => load_next_page(&mut state),
        Msg::SentinelVisible => {
            if state.has_more() {
                load_next_page(&mut state)
            } else {
                Vec::new()
            }
        }
        Msg::PageFetched { ticket, result } => {
            state.apply_fetched(ticket, result);
            Vec::new()
        }
    };

    (state, effects)
}

fn load_next_page(state: &mut FeedState) -> Vec<Effect> {
    if !state.has_more() {
        return Vec::new();
    }
    if let Some(ticket) = state.in_flight() {
        feed_debug!(
            "load of page {} skipped: page {} still in flight",
            state.cursor().page_index(),
            ticket.page_index
        );
        return Vec::new();
    }
    vec![state.issue_fetch()]
}
