//! Memoized, de-duplicating catalog cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use futures::future::{try_join_all, BoxFuture, FutureExt, Shared};
use log::{debug, info, warn};
use parking_lot::Mutex;

use super::error::CatalogResult;
use super::source::{CacheKey, LectureSource};
use crate::models::Lecture;

type SharedFetch = Shared<BoxFuture<'static, CatalogResult<Arc<Vec<Lecture>>>>>;

/// Per-key cache of catalog fetches.
///
/// The first request for a key stores a shared future; every later request,
/// including ones racing the first, awaits that same future. Results (and
/// failures) are kept until [`LectureCache::invalidate`]. There is no retry.
#[derive(Clone)]
pub struct LectureCache {
    source: Arc<dyn LectureSource>,
    entries: Arc<Mutex<HashMap<CacheKey, SharedFetch>>>,
}

impl LectureCache {
    pub fn new(source: Arc<dyn LectureSource>) -> Self {
        Self {
            source,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Lectures for one key, fetched at most once until invalidated.
    pub async fn get_cached_lectures(&self, key: CacheKey) -> CatalogResult<Arc<Vec<Lecture>>> {
        let fetch = {
            let mut entries = self.entries.lock();
            match entries.get(&key) {
                Some(existing) => {
                    debug!("Lecture cache hit for {}", key);
                    existing.clone()
                }
                None => {
                    debug!("Lecture cache miss for {}, fetching", key);
                    let fetch = self.start_fetch(key);
                    entries.insert(key, fetch.clone());
                    fetch
                }
            }
        };
        fetch.await
    }

    /// Both documents merged and de-duplicated by id.
    ///
    /// On a duplicate id the later record wins but keeps the position of the
    /// first occurrence.
    pub async fn get_all_lectures(&self) -> CatalogResult<Vec<Lecture>> {
        let started = Instant::now();
        let documents =
            try_join_all(CacheKey::ALL.iter().map(|key| self.get_cached_lectures(*key))).await?;

        let merged = merge_unique_by_id(documents.iter().flat_map(|doc| doc.iter()));
        info!(
            "Loaded {} unique lectures from {} catalogs in {:.1?}",
            merged.len(),
            documents.len(),
            started.elapsed()
        );
        Ok(merged)
    }

    /// Forget one key, or every key when `None`.
    pub fn invalidate(&self, key: Option<CacheKey>) {
        let mut entries = self.entries.lock();
        match key {
            Some(key) => {
                entries.remove(&key);
                debug!("Invalidated lecture cache for {}", key);
            }
            None => {
                entries.clear();
                debug!("Invalidated lecture cache");
            }
        }
    }

    pub fn is_cached(&self, key: CacheKey) -> bool {
        self.entries.lock().contains_key(&key)
    }

    fn start_fetch(&self, key: CacheKey) -> SharedFetch {
        let source = Arc::clone(&self.source);
        async move {
            match source.fetch(key).await {
                Ok(lectures) => {
                    debug!("Fetched {} lectures for {}", lectures.len(), key);
                    Ok(Arc::new(lectures))
                }
                Err(e) => {
                    warn!("Catalog fetch failed: {}", e);
                    Err(e)
                }
            }
        }
        .boxed()
        .shared()
    }
}

fn merge_unique_by_id<'a, I>(lectures: I) -> Vec<Lecture>
where
    I: IntoIterator<Item = &'a Lecture>,
{
    let mut order: Vec<&'a str> = Vec::new();
    let mut latest: HashMap<&'a str, &'a Lecture> = HashMap::new();
    for lecture in lectures {
        if latest.insert(lecture.id.as_str(), lecture).is_none() {
            order.push(lecture.id.as_str());
        }
    }
    order
        .into_iter()
        .filter_map(|id| latest.get(id).map(|lecture| (*lecture).clone()))
        .collect()
}
