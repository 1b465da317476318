//! Highlighter lifecycle management
//!
//! A guarded single-owner handle around the process's one expensive
//! highlighter. Construction happens at most once; concurrent first callers
//! all observe the same instance via a build-in-progress guard, and a
//! failed construction leaves the cache empty so a later attempt with a
//! valid theme can still succeed.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::error::ThemeLoadError;
use crate::theme::{self, ThemeSpec};

use super::Highlighter;

enum CacheState {
    Empty,
    Building,
    Ready(Arc<Highlighter>),
}

/// Lazily-initialized, guarded handle to the shared highlighter.
///
/// Once a highlighter exists, later calls return it regardless of the
/// requested theme; the system assumes one theme per process. This is a
/// documented limitation, not a bug.
pub struct HighlighterCache {
    state: Mutex<CacheState>,
    ready: Condvar,
}

impl HighlighterCache {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(CacheState::Empty),
            ready: Condvar::new(),
        }
    }

    /// The cached highlighter, if one has been constructed.
    pub fn get(&self) -> Option<Arc<Highlighter>> {
        match &*self.lock() {
            CacheState::Ready(hl) => Some(hl.clone()),
            _ => None,
        }
    }

    /// Return the cached highlighter, or resolve the theme and construct
    /// one. Exactly one caller performs the construction; everyone else
    /// blocks until it is published.
    ///
    /// After the first success this is a pure cache read.
    pub fn get_or_init(&self, spec: &ThemeSpec) -> Result<Arc<Highlighter>, ThemeLoadError> {
        {
            let mut state = self.lock();
            loop {
                match &*state {
                    CacheState::Ready(hl) => return Ok(hl.clone()),
                    CacheState::Building => {
                        // Another caller owns construction; wait for it
                        state = self
                            .ready
                            .wait(state)
                            .unwrap_or_else(|poisoned| poisoned.into_inner());
                    }
                    CacheState::Empty => {
                        *state = CacheState::Building;
                        break;
                    }
                }
            }
        }

        // Construction runs outside the lock; waiters park on the condvar
        let built = theme::resolve_theme(spec).map(|t| Arc::new(Highlighter::new(t)));

        let mut state = self.lock();
        match built {
            Ok(hl) => {
                tracing::debug!("Publishing highlighter for theme {}", spec.display_name());
                *state = CacheState::Ready(hl.clone());
                self.ready.notify_all();
                Ok(hl)
            }
            Err(e) => {
                // Failure does not poison the cache
                tracing::debug!("Highlighter construction failed: {}", e);
                *state = CacheState::Empty;
                self.ready.notify_all();
                Err(e)
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for HighlighterCache {
    fn default() -> Self {
        Self::new()
    }
}
