use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context};
use feed_logging::{feed_info, feed_warn};
use listing_core::{update, FeedScope, FeedState, FilterState, Msg};
use listing_engine::{write_sitemap, CatalogStore, EngineHandle, SitemapOptions};

use super::cli::BrowseArgs;
use super::config::{open_store, AppConfig};
use super::effects::EffectRunner;
use super::render;

const POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Consecutive pages that may add no new ids before paging gives up.
const MAX_STALLED_PAGES: usize = 2;

/// Owns the feed state and pumps messages through `update`, in the same
/// take-update-store order for every message.
struct Session {
    state: FeedState,
    runner: EffectRunner,
}

impl Session {
    fn new(store: Arc<dyn CatalogStore>, state: FeedState) -> anyhow::Result<Self> {
        let engine = EngineHandle::new(store).context("failed to start engine runtime")?;
        Ok(Self {
            state,
            runner: EffectRunner::new(engine),
        })
    }

    /// Returns whether the message changed anything worth rendering.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        self.runner.run(effects);
        was_dirty
    }

    /// Feeds engine completions back until nothing is in flight.
    fn settle(&mut self, mut on_change: impl FnMut(&FeedState)) -> anyhow::Result<()> {
        while self.state.is_loading() {
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL)? {
                if self.dispatch(msg) {
                    on_change(&self.state);
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Input {
    More,
    Retry,
    Search(Option<String>),
    Quit,
    Unknown(String),
}

fn parse_input(line: &str) -> Input {
    let line = line.trim();
    match line {
        "" => Input::More,
        "r" => Input::Retry,
        "q" => Input::Quit,
        "s" => Input::Search(None),
        _ => match line.strip_prefix("s ") {
            Some(term) => Input::Search(Some(term.trim().to_string())),
            None => Input::Unknown(line.to_string()),
        },
    }
}

/// Tracks how many rows have been printed so each render only appends.
#[derive(Default)]
struct Printer {
    printed: usize,
}

impl Printer {
    fn print(&mut self, state: &FeedState) {
        let view = state.view();
        if view.items.len() < self.printed {
            self.printed = 0;
        }
        let mut stdout = io::stdout().lock();
        for line in render::render(&view, self.printed) {
            let _ = writeln!(stdout, "{line}");
        }
        self.printed = view.items.len();
    }
}

pub fn run_browse(config: &AppConfig, args: &BrowseArgs) -> anyhow::Result<()> {
    let store = open_store(&config.store)?;
    let mut session = Session::new(store, FeedState::new(config.page_size))?;
    let mut printer = Printer::default();
    let filter: FilterState = args.filter();
    feed_info!("browse started with filter {:?} search {:?}", filter, args.search);

    session.dispatch(Msg::Reset {
        filter: filter.clone(),
        search: args.search.clone(),
    });

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        session.settle(|state| printer.print(state))?;
        println!("{}", render::PROMPT_HINT);

        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("failed to read from stdin")?;
        let msg = match parse_input(&line) {
            Input::More => Msg::SentinelVisible,
            Input::Retry => Msg::LoadNextPage,
            Input::Search(search) => Msg::Reset {
                filter: filter.clone(),
                search,
            },
            Input::Quit => break,
            Input::Unknown(text) => {
                println!("unknown command {text:?}");
                continue;
            }
        };
        if session.dispatch(msg) {
            printer.print(&session.state);
        } else if !session.state.has_more() {
            println!("no more listings");
        }
    }

    feed_info!(
        "browse finished with {} listings, {} stale responses dropped",
        session.state.current_items().len(),
        session.state.stale_dropped()
    );
    Ok(())
}

/// Pages through the whole catalog, then writes sitemap.xml.
pub fn run_sitemap(config: &AppConfig, out: &Path) -> anyhow::Result<()> {
    let store = open_store(&config.store)?;
    let state = FeedState::with_scope(config.page_size, FeedScope::whole_catalog());
    let mut session = Session::new(store, state)?;
    collect_catalog(&mut session)?;

    let options = SitemapOptions {
        base_url: config.site_base_url.clone(),
        ..SitemapOptions::default()
    };
    let summary = write_sitemap(out, session.state.current_items(), &options)?;
    feed_info!(
        "sitemap written to {} with {} urls",
        summary.output_path.display(),
        summary.url_count
    );
    println!("wrote {} ({} urls)", summary.output_path.display(), summary.url_count);
    Ok(())
}

/// Drives `LoadNextPage` until the feed reports no more rows. A page that
/// only repeats known ids is tolerated a limited number of times in a row,
/// since rows can shift between page reads.
fn collect_catalog(session: &mut Session) -> anyhow::Result<()> {
    let mut stalled = 0;
    loop {
        let before = session.state.current_items().len();
        session.dispatch(Msg::LoadNextPage);
        if !session.state.is_loading() {
            return Ok(());
        }
        session.settle(|_| {})?;
        if let Some(err) = session.state.last_error() {
            bail!("catalog paging stopped at page {}: {err}", session.state.cursor().page_index());
        }
        if session.state.current_items().len() > before {
            stalled = 0;
            continue;
        }
        if session.state.has_more() {
            stalled += 1;
            feed_warn!(
                "page {} added no listings ({} in a row)",
                session.state.cursor().page_index(),
                stalled
            );
            if stalled >= MAX_STALLED_PAGES {
                bail!("catalog kept returning no new listings before reaching its reported count");
            }
        }
    }
}
