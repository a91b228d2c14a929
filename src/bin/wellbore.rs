use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use wellbore_rs::{Client, RenderOptions};
use wellbore_rs::{stats, storage, viz};

#[derive(Parser, Debug)]
#[command(
    name = "wellbore",
    version,
    about = "Fetch, render & summarize USGS NWIS well construction diagrams"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a site's data (and optionally render, save, and print stats).
    Get(GetArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct GetArgs {
    /// NWIS site number: 15 digits (e.g., 433152121281301)
    #[arg(short, long)]
    site_no: String,
    /// Cooperator well log id for state lithology records (e.g., "HARN  1841")
    #[arg(short, long)]
    coop_site_no: Option<String>,
    /// Render the diagram to the given SVG path.
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the diagram canvas (default 700).
    #[arg(long, default_value_t = 700)]
    width: u32,
    /// Height of the diagram canvas (default 680).
    #[arg(long, default_value_t = 680)]
    height: u32,
    /// Prefix for pattern tile references inside the SVG.
    #[arg(long, default_value = "patterns")]
    pattern_base: String,
    /// Save flattened intervals to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-kind statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 2 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.2}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Get(args) => cmd_get(args),
    }
}

fn cmd_get(args: GetArgs) -> Result<()> {
    let client = Client::default();
    let report = client.fetch_report(&args.site_no, args.coop_site_no.as_deref())?;
    let intervals = report.intervals();

    if let Some(path) = args.out.as_ref() {
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&intervals, path)?,
            "json" => storage::save_json(&intervals, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", intervals.len(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let opts = RenderOptions {
            width: args.width,
            height: args.height,
            pattern_base: args.pattern_base.clone(),
        };
        viz::render_to_file(&report, plot_path, &opts)?;
        eprintln!("Wrote diagram to {}", plot_path.display());
    }

    if args.stats {
        let summaries = stats::kind_summary(&intervals);
        for s in summaries {
            println!(
                "{}  count={}  top_min={} bottom_max={} dia_max={}",
                s.kind,
                s.count,
                fmt_opt(s.top_min),
                fmt_opt(s.bottom_max),
                fmt_opt(s.dia_max)
            );
        }
    }

    Ok(())
}
