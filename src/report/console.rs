use crate::report::report_model::LoadReport;

// ============================================================================
// Console reporter - formatted terminal output
// ============================================================================

/// Format a load report for terminal output.
///
/// Produces output like:
/// ```text
/// === Element Registry: .maestro/elements ===
///
/// ✓ cards (21 symbols)
/// ✓ login (52 symbols)
///
/// [WARN] login.otpTitle: 'otp_title' from a.js overridden by 'otp_header' from b.js
///
/// === PASSED: 4 contributions, 2 namespaces, 73 symbols (fingerprint 3f2a9c01b7e4) ===
/// ```
pub fn format_console_report(report: &LoadReport) -> String {
    let mut out = String::new();

    out.push_str(&format!("=== Element Registry: {} ===\n\n", report.source));

    for namespace in &report.namespaces {
        out.push_str(&format!(
            "\u{2713} {} ({} symbols)\n",
            namespace.name, namespace.symbols
        ));
    }

    if let Some(ref error) = report.error {
        out.push_str(&format!("[ERROR] {}\n", error));
    }

    for violation in &report.violations {
        out.push_str(&format!("[FAIL] {}\n", violation));
    }

    if !report.warnings.is_empty() {
        out.push('\n');
        let tag = if report.warnings_denied { "DENIED" } else { "WARN" };
        for warning in &report.warnings {
            out.push_str(&format!("[{}] {}\n", tag, warning));
        }
    }

    if report.passed {
        out.push_str(&format!(
            "\n=== PASSED: {} contributions, {} namespaces, {} symbols",
            report.contributions,
            report.namespaces.len(),
            report.symbols
        ));
        if let Some(ref fingerprint) = report.fingerprint {
            out.push_str(&format!(" (fingerprint {})", short_fingerprint(fingerprint)));
        }
    } else {
        out.push_str(&format!(
            "\n=== FAILED: {} violations, {} warnings",
            report.violations.len(),
            report.warnings.len()
        ));
    }

    if let Some(ms) = report.duration_ms {
        out.push_str(&format!(" in {}ms", ms));
    }

    out.push_str(" ===\n");

    out
}

fn short_fingerprint(fingerprint: &str) -> &str {
    fingerprint.get(..12).unwrap_or(fingerprint)
}
