pub mod config;
pub mod report;
pub mod runner;

pub use config::{Cli, Config};
pub use report::{Report, render_plot, render_table};
pub use runner::{Measurement, run};
