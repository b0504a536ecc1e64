//! Heating cost calculator entry point: CLI wiring and config-driven calculation.

use std::path::Path;
use std::process;

use tracing_subscriber::EnvFilter;

use heat_cost::calc::engine::compute;
use heat_cost::calc::input::ConsumptionInput;
use heat_cost::calc::types::{CalculationRequest, Period};
use heat_cost::config::CalculatorConfig;
use heat_cost::io::export::export_csv;
use heat_cost::io::meters::load_meters_csv;

/// Parsed CLI arguments.
struct CliArgs {
    total_kwh: Option<f64>,
    meters_path: Option<String>,
    period: Option<Period>,
    include_vat: Option<bool>,
    config_path: Option<String>,
    preset: Option<String>,
    out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("heat-cost: heating cost calculator");
    eprintln!();
    eprintln!("Usage: heat-cost (--total <kWh> | --meters <path>) [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --total <kWh>            Consumption for the billing period");
    eprintln!("  --meters <path>          CSV of meter readings (label,start,end)");
    eprintln!("  --period <year|month>    Billing period (default from config: year)");
    eprintln!("  --net                    Report figures without VAT");
    eprintln!("  --gross                  Report figures with VAT");
    eprintln!("  --config <path>          Load tariff and defaults from TOML file");
    eprintln!("  --preset <name>          Use a built-in preset (reference_2023)");
    eprintln!("  --out <path>             Export the result to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start REST API server");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the reference_2023 preset is used.");
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}

fn next_value<'a>(args: &'a [String], i: &mut usize, flag: &str, what: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(v) => v.as_str(),
        None => fail(&format!("{flag} requires {what}")),
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        total_kwh: None,
        meters_path: None,
        period: None,
        include_vat: None,
        config_path: None,
        preset: None,
        out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--total" => {
                let v = next_value(&args, &mut i, "--total", "a number");
                match v.parse::<f64>() {
                    Ok(kwh) => cli.total_kwh = Some(kwh),
                    Err(_) => fail(&format!("--total value \"{v}\" is not a number")),
                }
            }
            "--meters" => {
                cli.meters_path = Some(next_value(&args, &mut i, "--meters", "a path").into());
            }
            "--period" => {
                let v = next_value(&args, &mut i, "--period", "year or month");
                match v.parse::<Period>() {
                    Ok(p) => cli.period = Some(p),
                    Err(e) => fail(&format!("--period {e}")),
                }
            }
            "--net" => cli.include_vat = Some(false),
            "--gross" => cli.include_vat = Some(true),
            "--config" => {
                cli.config_path = Some(next_value(&args, &mut i, "--config", "a path").into());
            }
            "--preset" => {
                cli.preset = Some(next_value(&args, &mut i, "--preset", "a name").into());
            }
            "--out" => {
                cli.out = Some(next_value(&args, &mut i, "--out", "a path").into());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                let v = next_value(&args, &mut i, "--port", "a u16 argument");
                match v.parse::<u16>() {
                    Ok(p) => cli.port = p,
                    Err(_) => fail(&format!("--port value \"{v}\" is not a valid u16")),
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Builds the consumption input from `--total` or `--meters`; exactly one is required.
fn consumption_input(cli: &CliArgs) -> ConsumptionInput {
    match (cli.total_kwh, cli.meters_path.as_deref()) {
        (Some(kwh), None) => ConsumptionInput::Total(kwh),
        (None, Some(path)) => match load_meters_csv(Path::new(path)) {
            Ok(readings) => ConsumptionInput::Meters(readings),
            Err(e) => fail(&format!("failed to read meters \"{path}\": {e}")),
        },
        (Some(_), Some(_)) => fail("--total and --meters are mutually exclusive"),
        (None, None) => fail("one of --total or --meters is required (see --help)"),
    }
}

fn main() {
    let cli = parse_args();
    init_tracing();

    // Load config: --config takes priority, then --preset, then reference default
    let config = if let Some(ref path) = cli.config_path {
        CalculatorConfig::from_toml_file(Path::new(path)).unwrap_or_else(|e| fail(&e.to_string()))
    } else if let Some(ref name) = cli.preset {
        CalculatorConfig::from_preset(name).unwrap_or_else(|e| fail(&e.to_string()))
    } else {
        CalculatorConfig::reference()
    };

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }
    let tariff = config.tariff().unwrap_or_else(|e| fail(&e.to_string()));

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(heat_cost::api::AppState {
            tariff,
            defaults: config.defaults.clone(),
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new()
            .unwrap_or_else(|e| fail(&format!("failed to create tokio runtime: {e}")));
        if let Err(e) = rt.block_on(heat_cost::api::serve(state, addr)) {
            fail(&format!("server error: {e}"));
        }
        return;
    }

    let input = consumption_input(&cli);
    for w in input.warnings() {
        tracing::warn!(meter = w.index + 1, label = %w.label, "{}", w.warning);
    }

    let consumption_kwh = input.resolve().unwrap_or_else(|e| fail(&e.to_string()));
    let request = CalculationRequest::new(consumption_kwh)
        .unwrap_or_else(|e| fail(&e.to_string()))
        .with_period(cli.period.unwrap_or(config.defaults.period))
        .with_vat(cli.include_vat.unwrap_or(config.defaults.include_vat))
        .with_tariff(Some(tariff));

    let result = compute(&request);
    tracing::debug!(?request, "computed cost breakdown");
    println!("{result}");

    if let Some(ref path) = cli.out {
        if let Err(e) = export_csv(&[result], Path::new(path)) {
            fail(&format!("failed to write CSV: {e}"));
        }
        tracing::info!(%path, "result written");
    }
}
