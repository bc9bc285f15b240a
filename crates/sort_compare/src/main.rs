use anyhow::Result;
use clap::Parser;
use sort_compare::{Cli, Report, render_plot, render_table, run};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = cli.resolve()?;

    log::info!(
        "comparing {} variant(s) on {} size(s), {} run(s) each, pattern={}, seed={:#x}",
        config.variants.len(),
        config.sizes.len(),
        config.runs,
        config.pattern,
        config.seed,
    );

    let results = run(&config)?;

    log::info!("results:");
    println!("{}", render_table(&results, config.runs));

    if let Some(path) = &cli.plot {
        render_plot(&results, path)?;
        log::info!("wrote {}", path.display());
    }

    if let Some(path) = &cli.output {
        Report::new(&config, results).write_json(path)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
