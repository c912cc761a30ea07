use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;
use quire_core::{
    ConvertConfig, ExportClient, InlineMode, RemoteConfig, UnknownElements, convert_all, load_pages, to_json,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod echo;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Convert HTML pages into rich-text document JSON
#[derive(Parser, Debug)]
#[command(name = "quire")]
#[command(version, about = "Convert HTML pages into rich-text document JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a directory of HTML pages into one JSON array
    Convert(ConvertArgs),
    /// Export the pages under a parent page of a remote document as HTML files
    Export(ExportArgs),
}

#[derive(Args, Debug)]
struct ConvertArgs {
    /// Directory of HTML pages, or a single HTML file
    #[arg(value_name = "INPUT", default_value = "html_pages")]
    input: PathBuf,

    /// Output file, or "-" for stdout
    #[arg(short, long, value_name = "FILE", default_value = "posts.json")]
    output: PathBuf,

    /// Extension of page files
    #[arg(long, default_value = "html", value_name = "EXT")]
    extension: String,

    /// Write single-line JSON
    #[arg(long)]
    compact: bool,

    /// Convert pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Convert the children of unsupported elements instead of dropping them
    #[arg(long)]
    descend_unknown: bool,

    /// Keep every inline child (bare text, elements, line breaks), not only spans
    #[arg(long)]
    inline_children: bool,

    /// Maximum element nesting before a page is skipped
    #[arg(long, default_value = "256", value_name = "NUM")]
    max_depth: usize,
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Remote document id
    #[arg(long, value_name = "ID")]
    doc: String,

    /// Name of the parent page whose children are exported
    #[arg(long, value_name = "NAME")]
    parent: String,

    /// API token
    #[arg(long, env = "QUIRE_API_TOKEN", hide_env_values = true, value_name = "TOKEN")]
    token: String,

    /// Directory the HTML files are written to
    #[arg(long, default_value = "html_pages", value_name = "DIR")]
    out_dir: PathBuf,

    /// File listing the download links
    #[arg(long, default_value = "download_links.txt", value_name = "FILE")]
    links_file: PathBuf,

    /// API base URL
    #[arg(long, default_value = "https://coda.io/apis/v1", value_name = "URL")]
    base_url: String,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Seconds between export status checks
    #[arg(long, default_value = "1", value_name = "SECS")]
    poll_interval: u64,

    /// Status checks per page before giving up
    #[arg(long, default_value = "60", value_name = "NUM")]
    max_attempts: u32,
}

impl ConvertArgs {
    fn config(&self) -> ConvertConfig {
        ConvertConfig::builder()
            .extension(self.extension.as_str())
            .parallel(!self.sequential)
            .pretty(!self.compact)
            .unknown_elements(if self.descend_unknown { UnknownElements::Descend } else { UnknownElements::Drop })
            .inline_mode(if self.inline_children { InlineMode::AllChildren } else { InlineMode::Spans })
            .max_depth(self.max_depth)
            .build()
    }
}

impl ExportArgs {
    fn config(&self) -> RemoteConfig {
        RemoteConfig {
            base_url: self.base_url.clone(),
            api_token: self.token.clone(),
            timeout: self.timeout,
            poll_interval: Duration::from_secs(self.poll_interval),
            max_poll_attempts: self.max_attempts,
            ..Default::default()
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "quire=debug,quire_core=debug,info" } else { "error" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .init();
}

fn run_convert(args: &ConvertArgs, verbose: bool) -> anyhow::Result<()> {
    let config = args.config();
    let started = Instant::now();

    if verbose {
        echo::print_step(1, 3, &format!("Reading pages from {}", args.input.display().bright_white()));
    }

    let loaded = load_pages(&args.input, &config)
        .with_context(|| format!("Failed to read pages from {}", args.input.display()))?;
    debug!(
        input = %args.input.display(),
        pages = loaded.pages.len(),
        unreadable = loaded.failures.len(),
        "loaded pages"
    );

    if loaded.pages.is_empty() && loaded.failures.is_empty() {
        echo::print_warning(&format!(
            "No .{} files found in {}",
            config.extension,
            args.input.display()
        ));
    } else if verbose {
        let bytes: usize = loaded.pages.iter().map(|p| p.html.len()).sum();
        echo::print_detail("Pages", &loaded.pages.len().to_string());
        echo::print_detail("Size", &echo::format_size(bytes));
        eprintln!();
    }

    if verbose {
        echo::print_step(2, 3, "Converting pages");
    }

    let convert_started = Instant::now();
    let mut report = convert_all(loaded.pages, &config);
    for failure in loaded.failures {
        report.push_failure(failure);
    }

    if verbose {
        echo::print_timing("Conversion", convert_started.elapsed());
        eprintln!();
        echo::print_step(3, 3, "Writing output");
    }

    let json = to_json(&report.pages, config.pretty).context("Failed to serialize pages")?;

    if args.output.as_os_str() == "-" {
        println!("{}", json);
    } else {
        fs::write(&args.output, format!("{}\n", json))
            .with_context(|| format!("Failed to write to file: {}", args.output.display()))?;
        echo::print_success(&format!(
            "Saved {} pages to {}",
            report.pages.len(),
            args.output.display().bright_white()
        ));
    }

    echo::print_failures(&report.failures);

    if verbose {
        echo::print_timing("Total", started.elapsed());
    }

    Ok(())
}

async fn run_export(args: &ExportArgs, verbose: bool) -> anyhow::Result<()> {
    let client = ExportClient::new(args.config()).context("Failed to create export client")?;
    debug!(doc = %args.doc, parent = %args.parent, "starting export");

    if verbose {
        echo::print_step(1, 2, &format!("Exporting pages under '{}'", args.parent.bright_white()));
    }

    let summary = client
        .export_to_dir(&args.doc, &args.parent, &args.out_dir)
        .await
        .context("Failed to export pages")?;

    if verbose {
        echo::print_step(2, 2, "Writing download links");
    }

    let mut links = summary.links.join("\n");
    if !links.is_empty() {
        links.push('\n');
    }
    fs::write(&args.links_file, links)
        .with_context(|| format!("Failed to write to file: {}", args.links_file.display()))?;

    echo::print_success(&format!(
        "Exported {} pages to {}",
        summary.written.len(),
        args.out_dir.display().bright_white()
    ));
    echo::print_info(&format!(
        "{} download links saved to {}",
        summary.links.len(),
        args.links_file.display()
    ));
    echo::print_failures(&summary.failures);

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        echo::print_banner();
        echo::print_info("Debug logging enabled");
        eprintln!();
    }

    match &cli.command {
        Command::Convert(args) => run_convert(args, cli.verbose),
        Command::Export(args) => run_export(args, cli.verbose).await,
    }
}
