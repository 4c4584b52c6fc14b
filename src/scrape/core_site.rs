// src/scrape/core_site.rs
// Depth-first walk over the doxygen hierarchy tree, yielding one ClassRecord
// per reachable class page. Lenient by policy: a broken page never kills the
// walk, it only loses its own record.

use std::error::Error;

use crate::params::{base_of, Host};
use crate::records::ClassRecord;
use crate::source::DocSource;
use crate::specs::class_page::parse_class_page;
use crate::specs::hierarchy::{parse_hierarchy_js, HierarchyNode};

pub struct CoreClassIter<'a> {
    source: &'a mut dyn DocSource,
    base_url: String,
    /// Pending (declared parent, node) pairs, top of stack visited next.
    stack: Vec<(Option<String>, HierarchyNode)>,
    /// Names already yielded; later occurrences are duplicates and dropped.
    used_names: Vec<String>,
}

impl<'a> CoreClassIter<'a> {
    pub fn new(
        host: Host,
        version: u32,
        source: &'a mut dyn DocSource,
    ) -> Result<Self, Box<dyn Error>> {
        let hier_url = host.hierarchy_url(version);
        let js = source
            .get(&hier_url)
            .ok_or_else(|| format!("cannot fetch hierarchy index: {hier_url}"))?;
        let mut roots = parse_hierarchy_js(&js, "hierarchy")?;

        // Harmony keeps its namespaces and global functions in a second,
        // flat index next to the hierarchy
        if let Some(ns_url) = host.namespace_url(version) {
            match source.get(&ns_url) {
                Some(js) => roots.extend(parse_hierarchy_js(&js, "namespaces_dup")?),
                None => loge!("Namespace index unreachable, classes only: {ns_url}"),
            }
        }

        let mut stack = Vec::with_capacity(roots.len());
        for node in roots.into_iter().rev() {
            stack.push((None, node));
        }
        Ok(Self {
            source,
            base_url: s!(base_of(&hier_url)),
            stack,
            used_names: Vec::new(),
        })
    }
}

impl Iterator for CoreClassIter<'_> {
    type Item = ClassRecord;

    fn next(&mut self) -> Option<ClassRecord> {
        while let Some((parent, node)) = self.stack.pop() {
            let HierarchyNode {
                name,
                url,
                children,
            } = node;

            // Scope-qualified names are nested types with no top-level
            // declaration; duplicates keep their first occurrence only.
            // Neither recurses. Checking the node label first saves the
            // fetch; the authoritative check below is on the page title.
            if name.is_empty()
                || name.contains("::")
                || self.used_names.iter().any(|n| *n == name)
            {
                continue;
            }

            let mut yielded = None;
            let mut walk_children = true;
            if let Some(rel) = url {
                let page_url = join!(&self.base_url, "/", &rel);
                match self.source.get(&page_url) {
                    // broken link: lose the record, keep the subtree
                    None => logd!("Skipping unreachable page: {page_url}"),
                    Some(html) => match parse_class_page(&html) {
                        // dedup keys on the parsed page title, not the node
                        // label; the hierarchy lists some classes under an
                        // alias whose page belongs to a name already seen
                        Ok(mut rec) => {
                            if rec.name.contains("::")
                                || self.used_names.iter().any(|n| *n == rec.name)
                            {
                                logd!("Skipping duplicate page: {page_url}");
                                walk_children = false;
                            } else {
                                self.used_names.push(rec.name.clone());
                                rec.parent = parent;
                                rec.url = Some(page_url);
                                yielded = Some(rec);
                            }
                        }
                        Err(e) => {
                            loge!("Failed to parse {page_url}: {e}");
                            walk_children = false;
                        }
                    },
                }
            }

            if walk_children {
                for child in children.into_iter().rev() {
                    self.stack.push((Some(name.clone()), child));
                }
            }
            if yielded.is_some() {
                return yielded;
            }
        }
        None
    }
}
