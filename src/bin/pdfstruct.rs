//! CLI binary for pdf2deck-extract.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ExtractConfig` and prints results as JSON (or plain text).

use anyhow::{bail, Context, Result};
use clap::Parser;
use pdf2deck_extract::{
    extract_structured_text, inspect, ExtractConfig, PageResult, PageSelection,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "pdfstruct",
    version,
    about = "Extract structured text from a PDF: classified blocks in reading order",
    long_about = None
)]
struct Cli {
    /// Path to the input PDF file.
    input: PathBuf,

    /// Pages to extract: "all", a single page "3", a range "2-10",
    /// or a comma-separated set "1,3,5". 1-indexed.
    #[arg(short, long, default_value = "all")]
    pages: String,

    /// Password for encrypted PDFs.
    #[arg(long, env = "PDFSTRUCT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Character budget for each page's text field.
    #[arg(long, default_value_t = 4000)]
    max_chars: usize,

    /// Write JSON to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,

    /// Print only the reading-order text of each page, no JSON.
    #[arg(long, conflicts_with = "pretty")]
    text: bool,

    /// Print document metadata and exit without extracting.
    #[arg(long)]
    inspect: bool,

    /// Verbose logging (-v: debug, -vv: trace). Also honours RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let input = cli
        .input
        .to_str()
        .context("input path is not valid UTF-8")?
        .to_string();

    if cli.inspect {
        let meta = inspect(&input).await?;
        println!("{}", serde_json::to_string_pretty(&meta)?);
        return Ok(());
    }

    let mut builder = ExtractConfig::builder()
        .max_chars_per_page(cli.max_chars)
        .pages(parse_pages(&cli.pages)?);
    if let Some(pwd) = &cli.password {
        builder = builder.password(pwd);
    }
    let config = builder.build()?;

    let pages = extract_structured_text(&input, &config).await?;

    if cli.text {
        print_text(&pages);
        return Ok(());
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&pages)?
    } else {
        serde_json::to_string(&pages)?
    };

    match &cli.output {
        Some(path) => {
            tokio::fs::write(path, &json)
                .await
                .with_context(|| format!("failed to write '{}'", path.display()))?;
            eprintln!("wrote {} pages to {}", pages.len(), path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn print_text(pages: &[PageResult]) {
    for (i, page) in pages.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{}", page.text);
    }
}

/// Parse the --pages flag into a [`PageSelection`].
fn parse_pages(spec: &str) -> Result<PageSelection> {
    let spec = spec.trim();
    if spec.eq_ignore_ascii_case("all") {
        return Ok(PageSelection::All);
    }
    if let Some((start, end)) = spec.split_once('-') {
        let s: usize = start.trim().parse().context("invalid range start")?;
        let e: usize = end.trim().parse().context("invalid range end")?;
        if s == 0 || e < s {
            bail!("invalid page range '{spec}' (pages are 1-indexed)");
        }
        return Ok(PageSelection::Range(s, e));
    }
    if spec.contains(',') {
        let pages: Vec<usize> = spec
            .split(',')
            .map(|p| p.trim().parse::<usize>())
            .collect::<Result<_, _>>()
            .with_context(|| format!("invalid page set '{spec}'"))?;
        if pages.iter().any(|&p| p == 0) {
            bail!("pages are 1-indexed; 0 is not a valid page");
        }
        return Ok(PageSelection::Set(pages));
    }
    let single: usize = spec
        .parse()
        .with_context(|| format!("invalid page spec '{spec}'"))?;
    if single == 0 {
        bail!("pages are 1-indexed; 0 is not a valid page");
    }
    Ok(PageSelection::Single(single))
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all() {
        assert!(matches!(parse_pages("all").unwrap(), PageSelection::All));
        assert!(matches!(parse_pages("ALL").unwrap(), PageSelection::All));
    }

    #[test]
    fn parse_single_and_range() {
        assert!(matches!(parse_pages("3").unwrap(), PageSelection::Single(3)));
        assert!(matches!(parse_pages("2-10").unwrap(), PageSelection::Range(2, 10)));
    }

    #[test]
    fn parse_set() {
        match parse_pages("1, 3,5").unwrap() {
            PageSelection::Set(v) => assert_eq!(v, vec![1, 3, 5]),
            other => panic!("expected Set, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_and_inverted() {
        assert!(parse_pages("0").is_err());
        assert!(parse_pages("5-2").is_err());
        assert!(parse_pages("banana").is_err());
    }
}
