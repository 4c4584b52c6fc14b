// src/core/cache.rs
// Append-only on-disk HTML cache keyed by URL. A cache file is named after the
// last five path segments of the URL joined by '_'; very old entries carried an
// extra ".html" suffix, which is still honored on read. Entries are never
// evicted or rewritten (read-check-then-write, single writer).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub fn cache_key(url: &str) -> String {
    let segs: Vec<&str> = url.split('/').collect();
    let tail = if segs.len() > 5 {
        &segs[segs.len() - 5..]
    } else {
        &segs[..]
    };
    tail.join("_")
}

pub struct HtmlCache {
    dir: PathBuf,
}

impl HtmlCache {
    pub fn new(dir: &Path) -> io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn lookup(&self, url: &str) -> Option<String> {
        let key = cache_key(url);
        let legacy = self.dir.join(join!(&key, ".html"));
        let path = if legacy.is_file() {
            legacy
        } else {
            self.dir.join(&key)
        };
        fs::read_to_string(path).ok()
    }

    /// Best-effort write; a full disk never fails a scrape.
    pub fn store(&self, url: &str, body: &str) {
        if let Err(e) = fs::write(self.dir.join(cache_key(url)), body) {
            loge!("Cache write failed for {url}: {e}");
        }
    }
}
