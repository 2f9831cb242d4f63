use anyhow::{bail, Context};
use clap::Parser;
use generator::presets::PRESET_NAMES;
use log::info;
use render_bridge::bridge::{render_bind_address, RenderBridge};
use render_bridge::model::CoverageReport;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::WorkflowConfig;
use workflow::runner::Runner;

mod generator;
mod render_bridge;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Multi-tier RF coverage planner for venue floor plans")]
struct Args {
    /// Load a scenario from YAML
    #[arg(long, conflicts_with = "preset")]
    scenario: Option<PathBuf>,
    /// Run a built-in venue plan (see --list-presets)
    #[arg(long)]
    preset: Option<String>,
    /// Print the built-in venue plans and exit
    #[arg(long, default_value_t = false)]
    list_presets: bool,
    /// Override the coverage threshold in dBm
    #[arg(long, allow_negative_numbers = true)]
    threshold: Option<f64>,
    /// Write the JSON coverage report here
    #[arg(long)]
    output: Option<PathBuf>,
    /// Keep the render bridge alive for an external renderer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_presets {
        for name in PRESET_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    let mut workflow_config = match (&args.scenario, &args.preset) {
        (Some(path), _) => WorkflowConfig::load(path)?,
        (None, Some(name)) => WorkflowConfig::from_preset(name)?,
        (None, None) => bail!("pass --scenario <file> or --preset <name>"),
    };
    if let Some(threshold) = args.threshold {
        workflow_config.coverage_threshold_dbm = threshold;
    }

    let runner = Arc::new(Runner::new(workflow_config));
    let result = runner.execute()?;
    let report = CoverageReport::from_result(&result);

    match report.stats {
        Some(stats) => println!(
            "{} -> {}x{} grid, {} transmitters, {:.2}..{:.2} dBm (mean {:.2}), {:.1}% at or above {:.1} dBm",
            report.name,
            report.width,
            report.height,
            report.transmitter_count(),
            stats.min_dbm,
            stats.max_dbm,
            stats.mean_dbm,
            report.coverage_ratio * 100.0,
            report.coverage_threshold_dbm
        ),
        None => println!("{} -> empty grid", report.name),
    }
    let metrics = runner.metrics();
    info!(
        "metrics: tiers={} cells={} placed={} rejected={}",
        metrics.tiers_evaluated,
        metrics.cells_evaluated,
        metrics.transmitters_placed,
        metrics.candidates_rejected
    );

    if let Some(path) = &args.output {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating report directory {}", parent.display()))?;
        }
        let body = serde_json::to_string_pretty(&report).context("serializing coverage report")?;
        fs::write(path, body).with_context(|| format!("writing report {}", path.display()))?;
        info!("report written to {}", path.display());
    }

    if args.serve {
        let bridge = RenderBridge::new();
        bridge.publish(report)?;
        bridge.serve(runner.clone(), render_bind_address())?;
        println!("render bridge running on http://{} (Ctrl+C to stop)...", render_bind_address());
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}
