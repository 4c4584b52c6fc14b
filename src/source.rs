// src/source.rs
// Where pages come from. The scrape iterators pull every document through this
// seam so the page specs stay testable offline against captured fixtures.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use crate::core::{cache::HtmlCache, net};

pub trait DocSource {
    /// Fetch one page. `None` means the page could not be retrieved; callers
    /// skip the item and keep walking.
    fn get(&mut self, url: &str) -> Option<String>;
}

/// Cache-backed HTTPS source: read-check-then-write against the append-only
/// HTML cache, network only on a miss.
pub struct CachedHttp {
    cache: HtmlCache,
}

impl CachedHttp {
    pub fn new(cache_dir: &Path) -> io::Result<Self> {
        Ok(Self {
            cache: HtmlCache::new(cache_dir)?,
        })
    }
}

impl DocSource for CachedHttp {
    fn get(&mut self, url: &str) -> Option<String> {
        if let Some(body) = self.cache.lookup(url) {
            return Some(body);
        }
        logf!("Requesting: {url}");
        match net::http_get(url) {
            Ok(body) => {
                self.cache.store(url, &body);
                Some(body)
            }
            Err(e) => {
                loge!("Fetch failed: {url}: {e}");
                None
            }
        }
    }
}

/// In-memory source for offline tests.
#[derive(Default)]
pub struct MemSource {
    pages: HashMap<String, String>,
}

impl MemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: &str, body: &str) {
        self.pages.insert(s!(url), s!(body));
    }
}

impl DocSource for MemSource {
    fn get(&mut self, url: &str) -> Option<String> {
        self.pages.get(url).cloned()
    }
}
