use std::time::Duration;

use feed_logging::{feed_debug, feed_info};
use listing_core::{Effect, Msg};
use listing_engine::{EngineClosed, EngineEvent, EngineHandle};

/// Hands feed effects to the engine and turns engine events back into
/// feed messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    ticket,
                    query,
                    range,
                } => {
                    feed_info!(
                        "FetchPage generation={} page={} offset={} limit={}",
                        ticket.generation,
                        ticket.page_index,
                        range.offset(),
                        range.limit()
                    );
                    self.engine.fetch_page(ticket, query, range);
                }
            }
        }
    }

    /// Waits up to `timeout` for the next completion; `Ok(None)` when none
    /// arrived in time.
    pub fn next_msg(&self, timeout: Duration) -> Result<Option<Msg>, EngineClosed> {
        Ok(self.engine.recv_timeout(timeout)?.map(into_msg))
    }
}

fn into_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { ticket, result } => {
            feed_debug!(
                "PageFetched generation={} page={} ok={}",
                ticket.generation,
                ticket.page_index,
                result.is_ok()
            );
            Msg::PageFetched {
                ticket,
                result: result.map_err(|err| err.to_string()),
            }
        }
    }
}
