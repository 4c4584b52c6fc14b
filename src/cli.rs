// src/cli.rs
use std::env;

use crate::params::{Host, Params};

pub fn parse_cli(params: &mut Params) -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "--host" => {
                let v = args.next().ok_or("Missing value for --host")?;
                params.host = Some(Host::from_str(&v.to_ascii_lowercase())?);
            }
            "-v" | "--version" => {
                let v: u32 = args.next().ok_or("Missing value for --version")?.parse()?;
                params.version = Some(v);
            }
            "-o" | "--out" => params.out_dir = args.next().ok_or("Missing output path")?,
            "--override" => {
                params.override_dir = args.next().ok_or("Missing value for --override")?;
            }
            "--cache" => params.cache_dir = args.next().ok_or("Missing value for --cache")?,
            "-h" | "--help" => {
                eprintln!(include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => return Err(format!("Unknown arg: {}", a).into()),
        }
    }

    // catch a nonsense version early instead of after a batch of fetches
    if let (Some(host), Some(version)) = (params.host, params.version) {
        if !host.versions().contains(&version) {
            return Err(format!(
                "Unknown {} version: {} (known: {:?})",
                host.as_str(),
                version,
                host.versions()
            )
            .into());
        }
    }
    Ok(())
}
