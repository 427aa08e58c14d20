use clap::Parser;
use element_registry::cli::commands::{cmd_check, cmd_export, cmd_list, cmd_lookup};
use element_registry::cli::config::{Cli, Commands, load_config, resolve_report, resolve_sources};
use element_registry::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = load_config(cli.config.as_deref());
    let sources = resolve_sources(&cli.sources, &config);

    match cli.command {
        Commands::Check {
            format,
            output,
            deny_warnings,
        } => {
            let (format, output) = resolve_report(format.as_deref(), output.as_deref(), &config);
            let passed = cmd_check(
                &sources,
                &format,
                output.as_deref(),
                deny_warnings || config.deny_warnings,
            )?;
            if !passed {
                std::process::exit(1);
            }
        }
        Commands::Lookup { reference } => {
            println!("{}", cmd_lookup(&sources, &reference)?);
        }
        Commands::List { namespace } => {
            for name in cmd_list(&sources, namespace.as_deref())? {
                println!("{}", name);
            }
        }
        Commands::Export { format, output } => {
            cmd_export(&sources, &format, output.as_deref())?;
        }
    }

    Ok(())
}
