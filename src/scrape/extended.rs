// src/scrape/extended.rs
// Walk over the extended (jsdoc) class index. Items are Results: a fetch
// failure skips the page like the core walk does, but a parse failure here
// means the site format changed and must abort the version's run.

use std::error::Error;

use crate::params::{base_of, Host};
use crate::records::{ClassRecord, GlobalRecord};
use crate::source::DocSource;
use crate::specs::extended_page::{
    parse_extended_class, parse_extended_index, parse_globals_page, IndexEntry,
};

pub struct ExtendedClassIter<'a> {
    source: &'a mut dyn DocSource,
    base_url: String,
    /// Index entries in reverse, popped from the back.
    queue: Vec<IndexEntry>,
}

impl<'a> ExtendedClassIter<'a> {
    /// A host/version combination without extended docs yields an empty
    /// iterator; an unreachable index page for a supported combination is
    /// an error.
    pub fn new(
        host: Host,
        version: u32,
        source: &'a mut dyn DocSource,
    ) -> Result<Self, Box<dyn Error>> {
        let Some(index_url) = host.extended_index_url(version) else {
            return Ok(Self {
                source,
                base_url: s!(),
                queue: Vec::new(),
            });
        };
        let html = source
            .get(&index_url)
            .ok_or_else(|| format!("cannot fetch extended index: {index_url}"))?;
        let mut queue = parse_extended_index(&html)?;
        queue.reverse();
        Ok(Self {
            source,
            base_url: s!(base_of(&index_url)),
            queue,
        })
    }
}

impl Iterator for ExtendedClassIter<'_> {
    type Item = Result<ClassRecord, Box<dyn Error>>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(entry) = self.queue.pop() {
            let url = join!(&self.base_url, "/", &entry.href);
            let Some(html) = self.source.get(&url) else {
                logd!("Skipping unreachable extended page: {url}");
                continue;
            };
            return Some(parse_extended_class(&html).map(|mut rec| {
                rec.url = Some(url);
                rec
            }));
        }
        None
    }
}

/// The extended globals, all on one page. Combinations without extended docs
/// and unreachable pages both contribute nothing.
pub fn fetch_globals(
    host: Host,
    version: u32,
    source: &mut dyn DocSource,
) -> Result<Vec<GlobalRecord>, Box<dyn Error>> {
    let Some(url) = host.extended_globals_url(version) else {
        return Ok(Vec::new());
    };
    let Some(html) = source.get(&url) else {
        logd!("Globals page unreachable: {url}");
        return Ok(Vec::new());
    };
    parse_globals_page(&html)
}
