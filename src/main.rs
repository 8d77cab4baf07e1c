#![allow(non_snake_case)]
use RustedQuadrature::Utils::errors::TaskError;
use RustedQuadrature::Utils::logger::{init_logger, save_results_to_csv};
use RustedQuadrature::Utils::plots::{plot_errors, plot_values};
use RustedQuadrature::Utils::report::log_report;
use RustedQuadrature::Utils::run_config::{
    RunConfig, RunOverrides, parse_integrand, parse_partition_list, parse_preset, resolve_log_file,
};
use RustedQuadrature::Utils::task_parser::TaskDocument;
use RustedQuadrature::numerical::integrands::{IntegrandKind, Preset};
use RustedQuadrature::numerical::quadrature_compare::{compare, compare_parallel};
use clap::Parser;
use log::{error, info, warn};
use std::error::Error;
use std::path::PathBuf;
use std::process;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(
    name = "rusted_quadrature",
    about = "Compare fixed-grid quadrature rules (rectangles, trapezoid, Simpson) on a built-in integrand"
)]
struct Cli {
    /// Integrand name (use --list-functions to see available options)
    #[arg(short = 'f', long = "func")]
    func: Option<String>,

    /// Lower bound of the interval
    #[arg(short = 'a', long = "a", allow_negative_numbers = true)]
    a: Option<f64>,

    /// Upper bound of the interval
    #[arg(short = 'b', long = "b", allow_negative_numbers = true)]
    b: Option<f64>,

    /// Comma separated partition counts, e.g. 10,1000,100000 (non-positive counts are skipped)
    #[arg(short = 'n', long = "n", allow_hyphen_values = true)]
    n: Option<String>,

    /// Output csv file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Save a log-log plot of the absolute error against n into this PNG file
    #[arg(long)]
    plot: Option<PathBuf>,

    /// Save a plot of the integral value against n into this PNG file
    #[arg(long = "plot-values")]
    plot_values: Option<PathBuf>,

    /// Ready-made run: generic, variant15, variant22
    #[arg(long)]
    preset: Option<String>,

    /// Task file with run settings; command line flags take precedence over it
    #[arg(long)]
    task: Option<PathBuf>,

    /// debug, info, warn, error or off
    #[arg(long)]
    loglevel: Option<String>,

    /// Also write the log into this file ("auto" for a timestamped name)
    #[arg(long = "log-file")]
    log_file: Option<String>,

    /// Spread the (rule, n) runs over all cores
    #[arg(long)]
    parallel: bool,

    /// List all available integrands and presets and exit
    #[arg(long)]
    list_functions: bool,
}

impl Cli {
    fn overrides(&self) -> Result<RunOverrides, TaskError> {
        Ok(RunOverrides {
            preset: self.preset.as_deref().map(parse_preset).transpose()?,
            integrand: self.func.as_deref().map(parse_integrand).transpose()?,
            a: self.a,
            b: self.b,
            partitions: self.n.as_deref().map(parse_partition_list).transpose()?,
            csv_path: self.csv.clone(),
            plot_path: self.plot.clone(),
            plot_values_path: self.plot_values.clone(),
            loglevel: self.loglevel.clone(),
            log_file: self.log_file.as_deref().map(resolve_log_file),
            parallel: if self.parallel { Some(true) } else { None },
        })
    }

    fn config(&self) -> Result<RunConfig, TaskError> {
        let task = match &self.task {
            Some(path) => Some(RunOverrides::from_document(&TaskDocument::from_file(path)?)?),
            None => None,
        };
        RunConfig::resolve(task, self.overrides()?)
    }
}

fn print_catalog() {
    println!("integrands:");
    for kind in IntegrandKind::iter() {
        let exact = if kind.exact(0.0, 1.0).is_some() {
            "exact value known"
        } else {
            "no exact value"
        };
        println!("  {:<10} f(x) = {:<20} {}", kind.to_string(), kind.formula(), exact);
    }
    println!("presets:");
    for preset in Preset::iter() {
        let settings = preset.settings();
        println!(
            "  {:<10} {} on [{}, {}], n = {:?}, csv {}",
            preset.to_string(),
            settings.integrand,
            settings.a,
            settings.b,
            settings.partitions,
            settings.csv_path.display()
        );
    }
}

fn run(config: &RunConfig) -> Result<(), Box<dyn Error>> {
    let exact = config.exact();
    info!(
        "f(x) = {} on [{}, {}], preset {}",
        config.integrand.formula(),
        config.a,
        config.b,
        config.preset
    );
    if config.a == config.b {
        warn!("degenerate interval [{}, {}]: every rule gives 0", config.a, config.b);
    }
    match exact {
        Some(value) => info!("exact value: {}", value),
        None => info!("exact value: undefined"),
    }
    let f = config.integrand.function();
    let results = if config.parallel {
        compare_parallel(config.a, config.b, &config.partitions, f, exact)
    } else {
        compare(config.a, config.b, &config.partitions, f, exact)
    };
    log_report(&results.retain_rules(&config.display_rules));
    save_results_to_csv(&results, &config.csv_path)?;
    if let Some(plot_path) = &config.plot_path {
        plot_errors(&results, plot_path)?;
    }
    if let Some(plot_path) = &config.plot_values_path {
        plot_values(&results, plot_path)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if cli.list_functions {
        print_catalog();
        return;
    }
    let config = match cli.config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(2);
        }
    };
    // validated in RunConfig::resolve
    let level = config.level_filter().unwrap_or_default();
    if let Err(err) = init_logger(level, config.log_file.as_deref()) {
        eprintln!("Error: cannot open log file: {err}");
        process::exit(2);
    }
    if let Err(err) = run(&config) {
        error!("{}", err);
        process::exit(1);
    }
}
