use std::time::Instant;

use crate::contribution::source::MultiSource;
use crate::load_registry;
use crate::registry::export::{to_json, to_maestro_script, to_yaml};
use crate::registry::registry_model::Registry;
use crate::report::console::format_console_report;
use crate::report::junit::generate_junit_xml;
use crate::report::report_model::LoadReport;

// ============================================================================
// check subcommand
// ============================================================================

/// Run a load cycle, emit the report, and return whether it passed.
pub fn cmd_check(
    sources: &[String],
    format: &str,
    output: Option<&str>,
    deny_warnings: bool,
) -> Result<bool, Box<dyn std::error::Error>> {
    let source = MultiSource::from_locators(sources);
    let description = sources.join(", ");
    let start = Instant::now();

    let report = match load_registry(&source) {
        Ok(outcome) => {
            let report = LoadReport::from_outcome(&description, &outcome);
            if deny_warnings { report.deny_warnings() } else { report }
        }
        Err(e) => LoadReport::from_error(&description, &e),
    };
    let report = report.with_duration(start.elapsed().as_millis());

    let content = render_report(&report, format)?;
    write_or_print(output, &content)?;

    Ok(report.passed)
}

/// Render a load report in the requested format.
pub fn render_report(report: &LoadReport, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "junit" => Ok(generate_junit_xml(report)),
        "json" => Ok(serde_json::to_string_pretty(report)? + "\n"),
        "console" => Ok(format_console_report(report)),
        other => Err(format!("unknown report format '{}' (expected console, junit or json)", other).into()),
    }
}

// ============================================================================
// lookup / list subcommands
// ============================================================================

/// Resolve a `namespace.symbol` reference against freshly loaded sources.
pub fn cmd_lookup(sources: &[String], reference: &str) -> Result<String, Box<dyn std::error::Error>> {
    let registry = load(sources)?;
    Ok(registry.resolve(reference)?.to_string())
}

/// Namespace names, or the symbols of `namespace` when given.
pub fn cmd_list(sources: &[String], namespace: Option<&str>) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let registry = load(sources)?;
    let names = match namespace {
        Some(ns) => registry.symbols(ns)?,
        None => registry.namespaces(),
    };
    Ok(names.into_iter().map(str::to_string).collect())
}

// ============================================================================
// export subcommand
// ============================================================================

pub fn cmd_export(
    sources: &[String],
    format: &str,
    output: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let registry = load(sources)?;
    let content = render_registry(&registry, format)?;
    write_or_print(output, &content)
}

/// Serialize a registry in the requested export format.
pub fn render_registry(registry: &Registry, format: &str) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "json" => Ok(to_json(registry)? + "\n"),
        "yaml" => Ok(to_yaml(registry)?),
        "maestro" | "js" => Ok(to_maestro_script(registry)),
        other => Err(format!("unknown export format '{}' (expected json, yaml or maestro)", other).into()),
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn load(sources: &[String]) -> Result<Registry, Box<dyn std::error::Error>> {
    // merge warnings are already emitted through tracing
    Ok(load_registry(&MultiSource::from_locators(sources))?.registry)
}

fn write_or_print(output: Option<&str>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, content)?,
        None => print!("{}", content),
    }
    Ok(())
}
