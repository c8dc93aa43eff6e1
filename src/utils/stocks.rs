//! Stock quotes for the "what your savings could have bought" banner.
//!
//! One upstream request fetches every configured symbol. The result is
//! memoized in memory for the configured TTL (five to ten minutes). When
//! the upstream fails, readers get the last good list, or an empty one if
//! nothing was fetched yet, and the next attempt waits out a short backoff.
//! Only one request refreshes at a time. The state lock is not held during
//! the upstream call, so readers arriving mid-refresh get the stale list.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde::Deserialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::config::StockConfig;
use crate::types::stock::StockQuote;

const DEFAULT_FAILURE_BACKOFF: Duration = Duration::from_secs(30);

#[async_trait]
pub trait QuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<StockQuote>, String>;
}

pub struct YahooQuotes {
    client: Client,
    url: String,
    symbols: Vec<String>,
}

#[derive(Deserialize)]
struct QuoteEnvelope {
    #[serde(rename = "quoteResponse")]
    quote_response: QuoteResponse,
}

#[derive(Deserialize)]
struct QuoteResponse {
    #[serde(default)]
    result: Vec<RawQuote>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuote {
    symbol: String,
    short_name: Option<String>,
    long_name: Option<String>,
    regular_market_price: Option<f64>,
    currency: Option<String>,
}

impl YahooQuotes {
    pub fn new(cfg: &StockConfig) -> Result<Self, String> {
        let client = ClientBuilder::new()
            .user_agent("patience-lion/0.1 (+reqwest)")
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| format!("build client failed: {e}"))?;
        Ok(Self {
            client,
            url: cfg.quote_url.clone(),
            symbols: cfg.symbols.clone(),
        })
    }
}

fn into_quotes(envelope: QuoteEnvelope) -> Vec<StockQuote> {
    envelope
        .quote_response
        .result
        .into_iter()
        .filter_map(|q| {
            let price = q.regular_market_price.filter(|p| p.is_finite() && *p > 0.0)?;
            Some(StockQuote {
                name: q.short_name.or(q.long_name).unwrap_or_else(|| q.symbol.clone()),
                symbol: q.symbol,
                price,
                currency: q.currency.unwrap_or_else(|| "USD".to_string()),
            })
        })
        .collect()
}

#[async_trait]
impl QuoteSource for YahooQuotes {
    async fn fetch(&self) -> Result<Vec<StockQuote>, String> {
        if self.symbols.is_empty() {
            return Ok(vec![]);
        }
        let res = self
            .client
            .get(&self.url)
            .query(&[("symbols", self.symbols.join(","))])
            .send()
            .await
            .map_err(|e| format!("quote request failed: {e}"))?;

        let status = res.status();
        if !status.is_success() {
            return Err(format!("quote API returned HTTP {status}"));
        }
        let envelope: QuoteEnvelope = res
            .json()
            .await
            .map_err(|e| format!("quote payload unreadable: {e}"))?;
        Ok(into_quotes(envelope))
    }
}

enum Lookup {
    Fresh(Vec<StockQuote>),
    BackingOff,
    Refresh,
}

#[derive(Default)]
struct CacheState {
    quotes: Option<(Instant, Vec<StockQuote>)>,
    failed_at: Option<Instant>,
}

pub struct StockCache {
    source: Arc<dyn QuoteSource>,
    ttl: Duration,
    failure_backoff: Duration,
    state: RwLock<CacheState>,
    refresh: Mutex<()>,
}

impl StockCache {
    pub fn new(source: Arc<dyn QuoteSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            failure_backoff: DEFAULT_FAILURE_BACKOFF,
            state: RwLock::new(CacheState::default()),
            refresh: Mutex::new(()),
        }
    }

    pub fn with_failure_backoff(mut self, backoff: Duration) -> Self {
        self.failure_backoff = backoff;
        self
    }

    fn lookup(&self, state: &CacheState) -> Lookup {
        if let Some((at, quotes)) = &state.quotes {
            if at.elapsed() < self.ttl {
                return Lookup::Fresh(quotes.clone());
            }
        }
        if state.failed_at.is_some_and(|at| at.elapsed() < self.failure_backoff) {
            Lookup::BackingOff
        } else {
            Lookup::Refresh
        }
    }

    fn stale(state: &CacheState) -> Vec<StockQuote> {
        state.quotes.as_ref().map(|(_, q)| q.clone()).unwrap_or_default()
    }

    async fn cached(&self) -> Result<Vec<StockQuote>, Vec<StockQuote>> {
        let state = self.state.read().await;
        match self.lookup(&state) {
            Lookup::Fresh(quotes) => Ok(quotes),
            Lookup::BackingOff => Ok(Self::stale(&state)),
            Lookup::Refresh => Err(Self::stale(&state)),
        }
    }

    pub async fn quotes(&self) -> Vec<StockQuote> {
        let stale = match self.cached().await {
            Ok(quotes) => return quotes,
            Err(stale) => stale,
        };

        // someone else is already refreshing
        let Ok(_refreshing) = self.refresh.try_lock() else {
            return stale;
        };
        // the previous refresher may have finished between the read and the lock
        let stale = match self.cached().await {
            Ok(quotes) => return quotes,
            Err(stale) => stale,
        };

        let fetched = self.source.fetch().await;

        let mut state = self.state.write().await;
        match fetched {
            Ok(quotes) => {
                info!("refreshed {} stock quotes", quotes.len());
                state.quotes = Some((Instant::now(), quotes.clone()));
                state.failed_at = None;
                quotes
            }
            Err(e) => {
                warn!("stock refresh failed, serving cached quotes: {e}");
                state.failed_at = Some(Instant::now());
                stale
            }
        }
    }
}
