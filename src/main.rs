//! # chatlens CLI
//!
//! Command-line front end for the chatlens library.

use std::fs;
use std::process;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatlens::analysis::{Analyzer, Scope};
use chatlens::cli::{Args, OutputFormat};
use chatlens::config::{AnalysisConfig, ParserConfig};
use chatlens::filter::{FilterConfig, apply_filters};
use chatlens::output::{Report, render_text, to_json, write_records_csv};
use chatlens::parser::ChatParser;
use chatlens::ChatlensError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for the report.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatlensError> {
    let mut analysis_config = AnalysisConfig::new().with_top_users(args.top);
    if let Some(n) = args.top_emojis {
        analysis_config = analysis_config.with_top_emojis(n);
    }
    let analyzer = Analyzer::new(analysis_config)?;

    let mut filter = FilterConfig::new();
    if let Some(after) = &args.after {
        filter = filter.with_date_from(after)?;
    }
    if let Some(before) = &args.before {
        filter = filter.with_date_to(before)?;
    }

    let parser =
        ChatParser::with_config(ParserConfig::new().with_join_continuations(!args.no_join));
    let chat = parser.parse_file(&args.input)?;

    if chat.is_empty() {
        println!("No messages found");
        return Ok(());
    }

    let scope = match &args.user {
        Some(name) => {
            let name = name.trim();
            if !chat.senders().contains(&name) {
                tracing::warn!(sender = name, "sender not present in chat");
            }
            Scope::sender(name)
        }
        None => Scope::Overall,
    };

    let report = chat.report().clone();
    let records = apply_filters(chat.into_records(), &filter);

    if let Some(path) = &args.records_csv {
        write_records_csv(&records, path)?;
        tracing::info!(path = %path.display(), records = records.len(), "wrote records CSV");
    }

    let stats = analyzer.analyze_records(&records, &scope);

    let rendered = match args.format {
        OutputFormat::Text => render_text(&stats),
        OutputFormat::Json => to_json(&Report::new(&report, &stats))? + "\n",
    };

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            println!("✅ Report saved to {}", path.display());
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
