//! Async deck loading utilities
//!
//! Helpers for warming the card cache before drawing hands

use crate::loader::database_async::CardSource;
use crate::loader::deck::DeckList;
use crate::loader::identifier::extract_set_id_and_card_id;
use crate::Result;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::warn;

/// Prefetch every distinct resolvable card of a deck in parallel
///
/// This is a hint; cards still load on demand if not prefetched. Energy
/// cards and unresolvable names are skipped, and lookup failures are logged
/// rather than returned.
/// Returns (cards_loaded, duration)
pub async fn prefetch_deck_cards<S: CardSource>(
    source: &Arc<S>,
    deck: &DeckList,
) -> Result<(usize, Duration)> {
    let start = Instant::now();

    let keys: HashSet<String> = deck
        .cards
        .iter()
        .filter(|name| crate::images::energy_symbol(name).is_none())
        .map(|name| extract_set_id_and_card_id(name))
        .filter(|id| id.is_resolved())
        .map(|id| id.lookup_key())
        .collect();

    let mut tasks = Vec::new();
    for key in keys {
        let source = Arc::clone(source);
        let task_key = key.clone();
        tasks.push((
            task_key,
            tokio::spawn(async move { source.fetch_card(&key).await }),
        ));
    }

    let mut loaded = 0;
    for (key, task) in tasks {
        match task.await? {
            Ok(_) => loaded += 1,
            Err(e) => warn!(key = %key, "prefetch failed: {e}"),
        }
    }

    Ok((loaded, start.elapsed()))
}
