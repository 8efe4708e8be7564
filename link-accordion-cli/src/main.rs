mod demo;
mod outline;

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use link_accordion::{Accordions, Settings};
use pagedom::{Event, EventContext};

use crate::outline::Outline;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger};

/// Attach a link accordion to a demo page, replay clicks and print the result.
#[derive(Debug, Parser)]
#[command(name = "link-accordion", version, about)]
struct Cli {
    /// Number of heading/content sections on the demo page
    #[arg(long, default_value_t = 3)]
    sections: usize,

    /// JSON file with settings overrides (camelCase option names)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Click the control of this section (zero-based); repeatable
    #[arg(long = "click", value_name = "INDEX")]
    clicks: Vec<usize>,

    /// Write debug logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    if cli.verbose {
        TermLogger::init(
            LevelFilter::Debug,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )?;
    } else if let Some(path) = &cli.log_file {
        let log_file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut page = demo::demo_page(cli.sections);
    let mut accordions = Accordions::new();
    accordions.attach(&mut page, demo::CONTAINER_ID, settings)?;

    for &index in &cli.clicks {
        let control = accordions
            .instance(demo::CONTAINER_ID)
            .and_then(|instance| instance.sections().get(index))
            .map(|section| section.control().to_string());
        let Some(control) = control else {
            log::warn!("click {index}: no such section");
            eprintln!("warning: no section {index}, click ignored");
            continue;
        };

        let mut cx = EventContext::new();
        accordions.dispatch(&mut page, &Event::click(control), &mut cx);
    }

    print!("{}", Outline(page.root()));
    Ok(())
}
