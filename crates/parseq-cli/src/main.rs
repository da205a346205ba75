use std::io::Read;
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use parseq_formats::{parse, parse_bytes, ParseOptions};

const USAGE: &str = "usage: parseq <file | accession | sequence>\n       cat plasmid.gb | parseq";

/// Normalize biological sequence files into canonical JSON.
#[derive(Parser, Debug)]
#[command(name = "parseq", version, about)]
struct Cli {
    /// A file path, an accession (NCBI or iGEM), or raw sequence content.
    /// Reads stdin when omitted.
    input: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(json) => println!("{json}"),
        Err(error) => {
            eprintln!("error: {error:#}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let seqs = match cli.input.as_deref() {
        Some(arg) if Path::new(arg).is_file() => {
            debug!(path = %arg, "parsing file");
            let bytes = std::fs::read(arg).with_context(|| format!("reading {arg}"))?;
            let file_name = Path::new(arg)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| arg.to_string());
            parse_bytes(&bytes, &ParseOptions::with_file_name(file_name))?
        }
        Some(arg) if parseq_fetch::is_accession(arg) => {
            debug!(accession = %arg, "resolving accession");
            parseq_fetch::fetch(arg)?
        }
        Some(arg) => {
            debug!("parsing argument as raw content");
            parse(arg, &ParseOptions::default())?
        }
        None => {
            debug!("reading stdin");
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .context("reading stdin")?;
            parse_bytes(&bytes, &ParseOptions::with_file_name("Unknown"))?
        }
    };
    serde_json::to_string_pretty(&seqs).context("serializing result")
}
