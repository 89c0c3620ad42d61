//! Async query and mutation primitives for the client-side cache.
//!
//! `Query<T>` encapsulates one cached fetch as an explicit state machine:
//! Idle -> Loading -> Ready | Error. Once Ready, the data is treated as
//! fresh indefinitely; only `refetch()` or `invalidate()` cause a new read.
//! `invalidate()` keeps the current data on screen and refetches in the
//! background, replacing the cached value when the response arrives.
//!
//! `Mutation<T>` is the write-side counterpart: it runs at most one request
//! at a time and hands the completion to the caller exactly once.
//!
//! Both are polled from the event-loop tick:
//!
//! ```ignore
//! let client = client.clone();
//! let mut todos = Query::new(move || {
//!     let client = client.clone();
//!     async move { client.list().await.map_err(|e| e.to_string()) }
//! });
//! todos.fetch();
//!
//! // In the tick handler
//! todos.poll();
//!
//! // In render
//! match todos.state() {
//!     QueryState::Ready(list) => render_list(list),
//!     QueryState::Error(e) => render_error(e),
//!     _ => render_loading(),
//! }
//! ```

use futures::future::BoxFuture;
use std::future::Future;
use tokio::sync::mpsc;

/// The state of a query.
#[derive(Debug, Clone)]
pub enum QueryState<T> {
  /// Query has not been started
  Idle,
  /// First fetch is outstanding, no data yet
  Loading,
  /// Data is cached and considered fresh
  Ready(T),
  /// Fetch failed with no cached data to fall back on
  Error(String),
}

impl<T> QueryState<T> {
  pub fn is_loading(&self) -> bool {
    matches!(self, QueryState::Loading)
  }

  pub fn is_ready(&self) -> bool {
    matches!(self, QueryState::Ready(_))
  }

  pub fn is_error(&self) -> bool {
    matches!(self, QueryState::Error(_))
  }

  pub fn data(&self) -> Option<&T> {
    match self {
      QueryState::Ready(data) => Some(data),
      _ => None,
    }
  }

  pub fn error(&self) -> Option<&str> {
    match self {
      QueryState::Error(e) => Some(e),
      _ => None,
    }
  }
}

/// A factory function that creates futures for fetching data.
type FetcherFn<T> = Box<dyn Fn() -> BoxFuture<'static, Result<T, String>> + Send + Sync>;

/// One cached async fetch with explicit state management.
pub struct Query<T> {
  state: QueryState<T>,
  fetcher: FetcherFn<T>,
  receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
}

impl<T: Send + 'static> Query<T> {
  /// Create a new query with the given fetcher function.
  ///
  /// The fetcher is a closure that returns a future; it is called each
  /// time a fetch starts.
  pub fn new<F, Fut>(fetcher: F) -> Self
  where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    Self {
      state: QueryState::Idle,
      fetcher: Box::new(move || Box::pin(fetcher())),
      receiver: None,
    }
  }

  pub fn state(&self) -> &QueryState<T> {
    &self.state
  }

  pub fn data(&self) -> Option<&T> {
    self.state.data()
  }

  pub fn is_loading(&self) -> bool {
    self.state.is_loading()
  }

  pub fn is_ready(&self) -> bool {
    self.state.is_ready()
  }

  pub fn is_error(&self) -> bool {
    self.state.is_error()
  }

  pub fn error(&self) -> Option<&str> {
    self.state.error()
  }

  /// Whether a fetch (initial or background) is currently outstanding.
  pub fn is_fetching(&self) -> bool {
    self.receiver.is_some()
  }

  /// Start fetching unless data is already cached or a fetch is in flight.
  ///
  /// Cached data never goes stale on its own, so calling this again after
  /// the query is Ready is a no-op.
  pub fn fetch(&mut self) {
    if self.receiver.is_some() || self.state.is_ready() {
      return;
    }
    self.start_fetch();
  }

  /// Force a fresh read, discarding any cached data.
  pub fn refetch(&mut self) {
    // Cancel any pending fetch by dropping the receiver
    self.receiver = None;
    self.state = QueryState::Loading;
    self.start_fetch();
  }

  /// Mark the cached value stale and refetch in the background.
  ///
  /// The current data stays visible while the new read is outstanding and
  /// is replaced when it completes. Without cached data this is the same
  /// as `refetch()`.
  pub fn invalidate(&mut self) {
    if !self.state.is_ready() {
      self.refetch();
      return;
    }
    self.receiver = None;
    self.start_fetch();
  }

  /// Mutate the cached value in place (optimistic merge).
  ///
  /// No-op unless the query is Ready.
  pub fn update(&mut self, f: impl FnOnce(&mut T)) {
    if let QueryState::Ready(data) = &mut self.state {
      f(data);
    }
  }

  /// Poll for results from a pending fetch.
  ///
  /// Returns `true` if anything changed (data arrived, an error occurred,
  /// or a background refresh ended). Call this in the tick handler.
  pub fn poll(&mut self) -> bool {
    let receiver = match &mut self.receiver {
      Some(rx) => rx,
      None => return false,
    };

    match receiver.try_recv() {
      Ok(Ok(data)) => {
        self.state = QueryState::Ready(data);
        self.receiver = None;
        true
      }
      Ok(Err(error)) => {
        self.receiver = None;
        if self.state.is_ready() {
          // Background refresh failed: keep the cached data visible
          tracing::warn!(error = %error, "background refetch failed, keeping cached data");
        } else {
          self.state = QueryState::Error(error);
        }
        true
      }
      Err(mpsc::error::TryRecvError::Empty) => false,
      Err(mpsc::error::TryRecvError::Disconnected) => {
        // Sender dropped without sending
        self.receiver = None;
        if !self.state.is_ready() {
          self.state = QueryState::Error("Query was cancelled".to_string());
        }
        true
      }
    }
  }

  fn start_fetch(&mut self) {
    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);
    if !self.state.is_ready() {
      self.state = QueryState::Loading;
    }

    let future = (self.fetcher)();
    tokio::spawn(async move {
      let result = future.await;
      // Ignore send errors - receiver may have been dropped
      let _ = tx.send(result);
    });
  }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Query<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Query")
      .field("state", &self.state)
      .field("fetching", &self.receiver.is_some())
      .finish_non_exhaustive()
  }
}

/// One-at-a-time async write operation.
///
/// Unlike `Query`, a mutation has no cached value: the caller receives the
/// completion from `poll()` exactly once and decides how to fold it into
/// the cache (append, invalidate, drop).
pub struct Mutation<T> {
  receiver: Option<mpsc::UnboundedReceiver<Result<T, String>>>,
}

impl<T> Default for Mutation<T> {
  fn default() -> Self {
    Self { receiver: None }
  }
}

impl<T: Send + 'static> Mutation<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Whether a request is currently outstanding.
  pub fn is_in_flight(&self) -> bool {
    self.receiver.is_some()
  }

  /// Spawn the request unless one is already in flight.
  ///
  /// Returns `false` (and drops the future unrun) if a request is pending.
  pub fn start<Fut>(&mut self, future: Fut) -> bool
  where
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    if self.receiver.is_some() {
      return false;
    }

    let (tx, rx) = mpsc::unbounded_channel();
    self.receiver = Some(rx);

    tokio::spawn(async move {
      let result = future.await;
      let _ = tx.send(result);
    });
    true
  }

  /// Take the completion of a finished request, if any.
  pub fn poll(&mut self) -> Option<Result<T, String>> {
    let receiver = self.receiver.as_mut()?;

    match receiver.try_recv() {
      Ok(result) => {
        self.receiver = None;
        Some(result)
      }
      Err(mpsc::error::TryRecvError::Empty) => None,
      Err(mpsc::error::TryRecvError::Disconnected) => {
        self.receiver = None;
        Some(Err("Mutation was cancelled".to_string()))
      }
    }
  }
}

impl<T> std::fmt::Debug for Mutation<T> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Mutation")
      .field("in_flight", &self.receiver.is_some())
      .finish()
  }
}
