//! Household load profile simulator entry point — CLI wiring and
//! config-driven profile generation.

use std::path::Path;
use std::process;

use hlp_sim::config::HouseholdConfig;
use hlp_sim::io::export::export_csv;
use hlp_sim::sim::profile::BuiltinLoadProfile;

/// Parsed CLI arguments.
struct CliArgs {
    config_path: Option<String>,
    preset: Option<String>,
    residents_override: Option<usize>,
    seed_override: Option<u64>,
    year: i32,
    out: Option<String>,
}

fn print_help() {
    eprintln!("hlp-sim — stochastic household load profile simulator");
    eprintln!();
    eprintln!("Usage: hlp-sim [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --config <path>     Load household config from TOML file");
    eprintln!("  --preset <name>     Use a built-in preset (single, couple, family)");
    eprintln!("  --residents <n>     Override resident count (1-5)");
    eprintln!("  --seed <u64>        Override random seed");
    eprintln!("  --year <year>       Calendar year to simulate (default: 2010)");
    eprintln!("  --out <path>        Export the profile table to CSV");
    eprintln!("  --help              Show this help message");
    eprintln!();
    eprintln!("If no --config or --preset is given, the couple preset is used.");
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        config_path: None,
        preset: None,
        residents_override: None,
        seed_override: None,
        year: 2010,
        out: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--config" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --config requires a path argument");
                    process::exit(1);
                }
                cli.config_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--residents" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --residents requires a number argument");
                    process::exit(1);
                }
                if let Ok(n) = args[i].parse::<usize>() {
                    cli.residents_override = Some(n);
                } else {
                    eprintln!("error: --residents value \"{}\" is not a valid count", args[i]);
                    process::exit(1);
                }
            }
            "--seed" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --seed requires a u64 argument");
                    process::exit(1);
                }
                if let Ok(s) = args[i].parse::<u64>() {
                    cli.seed_override = Some(s);
                } else {
                    eprintln!("error: --seed value \"{}\" is not a valid u64", args[i]);
                    process::exit(1);
                }
            }
            "--year" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --year requires a year argument");
                    process::exit(1);
                }
                if let Ok(y) = args[i].parse::<i32>() {
                    cli.year = y;
                } else {
                    eprintln!("error: --year value \"{}\" is not a valid year", args[i]);
                    process::exit(1);
                }
            }
            "--out" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --out requires a path argument");
                    process::exit(1);
                }
                cli.out = Some(args[i].clone());
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

fn main() {
    let cli = parse_args();

    // Load config: --config takes priority, then --preset, then the default
    let mut config = if let Some(ref path) = cli.config_path {
        match HouseholdConfig::from_toml_file(Path::new(path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match HouseholdConfig::from_preset(name) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        HouseholdConfig::couple()
    };

    // Apply overrides
    if let Some(residents) = cli.residents_override {
        config.household.residents = residents;
    }
    if let Some(seed) = cli.seed_override {
        config.household.seed = seed;
    }

    // Validate
    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Build and run
    let mut profile = match BuiltinLoadProfile::with_builtin(config) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };
    let table = match profile.get_rescheduled_profiles(cli.year) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    // Print summary
    println!(
        "year {} — {} rows at {}min, {} columns",
        cli.year,
        table.num_rows(),
        table.step_min(),
        table.num_columns()
    );
    for (name, values) in table.columns() {
        let sum: f64 = values.iter().sum();
        let peak = values.iter().cloned().fold(0.0_f64, f64::max);
        let mean = if values.is_empty() {
            0.0
        } else {
            sum / values.len() as f64
        };
        println!("  {name:<16} mean {mean:>10.2}  peak {peak:>10.2}");
    }

    // Export CSV if requested
    if let Some(ref path) = cli.out {
        if let Err(e) = export_csv(&table, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Profile table written to {path}");
    }
}
