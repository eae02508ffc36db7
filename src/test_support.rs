//! In-memory card source for unit tests

use crate::loader::database_async::{CardData, CardSource};
use crate::{HandError, Result};
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
pub struct FakeSource {
    cards: FxHashMap<String, Arc<CardData>>,
    delays: FxHashMap<String, Duration>,
    calls: AtomicUsize,
    completed: AtomicUsize,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_card(
        mut self,
        key: &str,
        category: &str,
        stage: Option<&str>,
        image: Option<&str>,
    ) -> Self {
        let card = CardData {
            name: key.to_string(),
            category: category.to_string(),
            stage: stage.map(str::to_string),
            image: image.map(str::to_string),
        };
        self.cards.insert(key.to_string(), Arc::new(card));
        self
    }

    /// Basic Pokémon whose image base is "img/<key>"
    pub fn with_basic(self, key: &str) -> Self {
        let image = format!("img/{key}");
        self.with_card(key, "Pokemon", Some("Basic"), Some(&image))
    }

    /// Trainer whose image base is "img/<key>"
    pub fn with_trainer(self, key: &str) -> Self {
        let image = format!("img/{key}");
        self.with_card(key, "Trainer", None, Some(&image))
    }

    pub fn with_delay(mut self, key: &str, delay: Duration) -> Self {
        self.delays.insert(key.to_string(), delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Lookups that ran to completion
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }
}

impl CardSource for FakeSource {
    async fn fetch_card(&self, key: &str) -> Result<Arc<CardData>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(key) {
            tokio::time::sleep(*delay).await;
        }
        self.completed.fetch_add(1, Ordering::SeqCst);
        self.cards
            .get(key)
            .cloned()
            .ok_or_else(|| HandError::RemoteLookup(format!("{key} returned 404 Not Found")))
    }
}
