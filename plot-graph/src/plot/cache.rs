//! A cache of compiled expressions, shared across plots.

use once_cell::sync::OnceCell;
use plot_error::Error;
use std::{collections::HashMap, sync::{Arc, Mutex, PoisonError}};
use super::{request::{Mode, PlotRequest}, Prepared};

/// Identifies the compiled expressions a request needs.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub expression: String,
    pub mode: Mode,
    pub derivative: bool,
    pub integral: bool,
}

impl CacheKey {
    /// The key for a request. In surface mode, the derivative and integral flags are ignored, so
    /// they are not part of the key.
    pub fn of(request: &PlotRequest) -> Self {
        let curve = request.mode == Mode::Curve;
        Self {
            expression: request.expression.clone(),
            mode: request.mode,
            derivative: curve && request.show_derivative,
            integral: curve && request.show_integral,
        }
    }
}

type Entry = Arc<OnceCell<Result<Arc<Prepared>, Error>>>;

/// A cache of the parsed, transformed and compiled expressions of each request.
///
/// Each key is prepared at most once: concurrent lookups of a key that is being prepared wait
/// for the first one to finish, and every later lookup only reads the result. Failures are cached
/// as well. Grids and sampled values are never cached.
#[derive(Debug, Default)]
pub struct CompileCache {
    entries: Mutex<HashMap<CacheKey, Entry>>,
}

impl CompileCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The number of keys in the cache.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Returns true if the cache has no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the prepared expressions for the key, preparing them with `prepare` if this is the
    /// first lookup of the key.
    pub(crate) fn get_or_prepare(
        &self,
        key: CacheKey,
        prepare: impl FnOnce() -> Result<Prepared, Error>,
    ) -> Result<Arc<Prepared>, Error> {
        let entry = {
            let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
            Arc::clone(entries.entry(key.clone()).or_default())
        };

        let mut prepared_now = false;
        let result = entry.get_or_init(|| {
            prepared_now = true;
            prepare().map(Arc::new)
        });

        if prepared_now {
            log::debug!("compile cache miss for `{}` ({})", key.expression, key.mode);
        } else {
            log::debug!("compile cache hit for `{}` ({})", key.expression, key.mode);
        }
        result.clone()
    }
}
