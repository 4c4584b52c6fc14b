// src/runner.rs
// Top-level orchestration: resolve which host/version combinations to run,
// then produce one declaration file per combination. Everything for one
// combination is emitted into memory first and only written to disk when the
// whole version succeeded.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::emit::{self, EmitConfig};
use crate::overrides::Overrides;
use crate::params::{
    Host, Params, DECL_FILENAME, EXTENDED_MIN_VERSION, HARMONY_VERSIONS, SBPRO_VERSIONS,
};
use crate::progress::Progress;
use crate::records::ClassRecord;
use crate::scrape::{fetch_globals, CoreClassIter, ExtendedClassIter};
use crate::source::{CachedHttp, DocSource};

/// Summary of what was produced.
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
}

/// `progress` can be None (no UI updates) or Some(&mut impl Progress).
pub fn run(
    params: &Params,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let mut source = CachedHttp::new(Path::new(&params.cache_dir))?;
    run_with(params, &mut source, progress)
}

/// Like `run`, but pages come from the given source instead of the cached
/// HTTP client.
pub fn run_with(
    params: &Params,
    source: &mut dyn DocSource,
    mut progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, Box<dyn Error>> {
    let combos: Vec<(Host, u32)> = match (params.host, params.version) {
        (Some(host), Some(version)) => vec![(host, version)],
        (None, None) => {
            let mut all = Vec::new();
            for &v in HARMONY_VERSIONS {
                all.push((Host::Harmony, v));
            }
            for &v in SBPRO_VERSIONS {
                all.push((Host::StoryboardPro, v));
            }
            all
        }
        _ => return Err("--host and --version must be given together".into()),
    };
    let single = combos.len() == 1;

    let overrides = Overrides::load(&Path::new(&params.override_dir).join("overrides.json"))?;
    let fragments = load_fragments(Path::new(&params.override_dir))?;
    let config = EmitConfig::default();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(combos.len());
    }

    let mut written = Vec::with_capacity(combos.len());
    for (host, version) in combos {
        match generate_one(
            host, version, source, &overrides, &fragments, &config, params,
        ) {
            Ok(path) => {
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(host.as_str(), version, &path);
                }
                written.push(path);
            }
            Err(e) if single => return Err(e),
            Err(e) => {
                // one failed version never blocks the rest of the batch
                let msg = format!("{}-{version} failed: {e}", host.as_str());
                loge!("{msg}");
                if let Some(p) = progress.as_deref_mut() {
                    p.log(&msg);
                }
            }
        }
    }
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    Ok(RunSummary {
        files_written: written,
    })
}

/// Hand-written .ts snippets from the override directory, keyed by file stem.
/// The preamble, version-gated addon preambles and the postscript live here.
fn load_fragments(dir: &Path) -> Result<HashMap<String, String>, Box<dyn Error>> {
    let mut fragments = HashMap::new();
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(fragments),
    };
    for entry in entries {
        let path = entry?.path();
        if path.extension().is_some_and(|e| e == "ts") {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                fragments.insert(s!(stem), fs::read_to_string(&path)?);
            }
        }
    }
    Ok(fragments)
}

fn write_fragment(
    buf: &mut Vec<u8>,
    fragments: &HashMap<String, String>,
    name: &str,
    leading_newline: bool,
) -> Result<(), Box<dyn Error>> {
    let Some(text) = fragments.get(name) else {
        logd!("No override fragment named {name}, leaving it out");
        return Ok(());
    };
    if leading_newline {
        buf.write_all(b"\n")?;
    }
    buf.write_all(text.as_bytes())?;
    Ok(())
}

fn generate_one(
    host: Host,
    version: u32,
    source: &mut dyn DocSource,
    overrides: &Overrides,
    fragments: &HashMap<String, String>,
    config: &EmitConfig,
    params: &Params,
) -> Result<PathBuf, Box<dyn Error>> {
    logf!("Generating declarations for {}-{version}", host.as_str());
    let mut buf: Vec<u8> = Vec::new();

    write_fragment(&mut buf, fragments, "preamble", false)?;
    if host == Host::Harmony && version >= EXTENDED_MIN_VERSION {
        write_fragment(&mut buf, fragments, "preamble_harmony16up", true)?;
    }
    if host == Host::StoryboardPro {
        write_fragment(&mut buf, fragments, "preamble_sbpro", true)?;
    }
    buf.write_all(b"\n\n\n")?;

    let mut emit_record = |buf: &mut Vec<u8>, mut rec: ClassRecord| -> Result<(), Box<dyn Error>> {
        if config.skips(&rec.name) {
            return Ok(());
        }
        if !overrides.apply(&mut rec) {
            logd!("Skipping by override: {}", rec.name);
            return Ok(());
        }
        logd!("Writing class: {}", rec.name);
        emit::write_class(buf, config, &rec)?;
        Ok(())
    };

    for rec in CoreClassIter::new(host, version, source)? {
        emit_record(&mut buf, rec)?;
    }
    // the strict walk: a parse error here aborts the version
    for rec in ExtendedClassIter::new(host, version, source)? {
        emit_record(&mut buf, rec?)?;
    }
    for global in fetch_globals(host, version, source)? {
        emit::write_interface(&mut buf, config, &global)?;
    }

    buf.write_all(b"\n\n\n")?;
    if host == Host::Harmony {
        write_fragment(&mut buf, fragments, "harmony_post", false)?;
    }

    let dir = Path::new(&params.out_dir)
        .join(host.as_str())
        .join(version.to_string());
    fs::create_dir_all(&dir)?;
    let path = dir.join(DECL_FILENAME);
    fs::write(&path, &buf)?;
    logf!("Wrote {}", path.display());
    Ok(path)
}
