use anyhow::Result;
use serde::Serialize;
use stayguard_cli::commands;
use stayguard_cli::config::CliConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("stayguard=info".parse()?),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let arg = |i: usize| args.get(i).map(String::as_str);

    match (arg(1), arg(2), arg(3), arg(4)) {
        (Some("evaluate"), Some(config), Some(rules), Some(dataset)) => {
            let config = CliConfig::load(config)?;
            print_json(&commands::run_evaluate(&config, rules, dataset, arg(5))?)
        }
        (Some("dispatch"), Some(config), Some(rules), Some(dataset)) => {
            let config = CliConfig::load(config)?;
            print_json(&commands::run_dispatch(&config, rules, dataset, arg(5))?)
        }
        (Some("list-rules"), Some(config), Some(rules), search) => {
            let config = CliConfig::load(config)?;
            print_json(&commands::run_list_rules(&config, rules, search)?)
        }
        (Some("default-rules"), ..) => print_json(&commands::default_rules_file()),
        (Some("--help") | Some("-h") | Some("help"), ..) => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            std::process::exit(2);
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[allow(clippy::print_stderr)]
fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  stayguard evaluate <config.toml> <rules.json> <dataset.json> [YYYY-MM-DD]");
    eprintln!("      Evaluate every rule and print the raw results");
    eprintln!("  stayguard dispatch <config.toml> <rules.json> <dataset.json> [YYYY-MM-DD]");
    eprintln!("      Apply snooze, mute and cooldown, then print the alerts to send");
    eprintln!("  stayguard list-rules <config.toml> <rules.json> [search]");
    eprintln!("      List rules, optionally filtered by name or description");
    eprintln!("  stayguard default-rules");
    eprintln!("      Print the built-in rules as a rules file");
    eprintln!();
    eprintln!("Set RUST_LOG to adjust log verbosity (default: stayguard=info)");
}
