//! Test doubles for the engine.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use locus_core::{CacheEntry, CacheStats, Error, GeocodeCache};
use tokio::time::Instant;

use crate::nominatim::ProviderError;
use crate::provider::{Candidate, GeocodeProvider};

type Answer = Result<Vec<Candidate>, ProviderError>;

/// Provider that answers from a script keyed by the exact query string.
///
/// Each query holds a queue of answers; the last one repeats. Unknown
/// queries get no candidates.
#[derive(Default)]
pub(crate) struct ScriptedProvider {
    answers: Mutex<HashMap<String, Vec<Answer>>>,
    calls: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    latency: Duration,
    panic_on: Option<String>,
}

impl ScriptedProvider {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Panic when asked for `query`, as a buggy provider would.
    pub(crate) fn panic_on(mut self, query: &str) -> Self {
        self.panic_on = Some(query.to_string());
        self
    }

    pub(crate) fn answer(self, query: &str, answer: Answer) -> Self {
        self.answers
            .lock()
            .unwrap()
            .entry(query.to_string())
            .or_default()
            .push(answer);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|(q, _)| q.clone()).collect()
    }

    pub(crate) fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GeocodeProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str, _limit: u8) -> Result<Vec<Candidate>, ProviderError> {
        self.calls.lock().unwrap().push((query.to_string(), Instant::now()));
        if self.panic_on.as_deref() == Some(query) {
            panic!("scripted provider panic for {query}");
        }

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        let mut answers = self.answers.lock().unwrap();
        match answers.get_mut(query) {
            Some(queue) if queue.len() > 1 => queue.remove(0),
            Some(queue) => queue[0].clone(),
            None => Ok(Vec::new()),
        }
    }
}

/// Cache whose every operation fails.
pub(crate) struct BrokenCache;

#[async_trait]
impl GeocodeCache for BrokenCache {
    async fn get(&self, _hash: &str) -> Result<Option<CacheEntry>, Error> {
        Err(Error::InvalidInput("cache offline".into()))
    }

    async fn upsert(&self, _entry: &CacheEntry) -> Result<(), Error> {
        Err(Error::InvalidInput("cache offline".into()))
    }

    async fn stats(&self) -> Result<CacheStats, Error> {
        Err(Error::InvalidInput("cache offline".into()))
    }
}

pub(crate) fn candidate(display: &str, latitude: f64, longitude: f64) -> Candidate {
    Candidate { display_name: display.to_string(), latitude, longitude, ..Default::default() }
}
