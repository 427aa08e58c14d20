use crate::report::report_model::LoadReport;

// ============================================================================
// JUnit XML reporter - standard CI integration format
// ============================================================================

/// Generate a JUnit XML report for CI systems.
///
/// Each namespace becomes a testcase; its violations (and, in strict mode,
/// its merge warnings) become the failure body. A cycle that aborted before
/// validation is a single failing `load` testcase.
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <testsuite name="element-registry" tests="2" failures="1">
///   <testcase name="cards" classname="element-registry" />
///   <testcase name="login" classname="element-registry">
///     <failure message="1 violation(s)" type="RegistryValidationFailed">login: identifier 'x' is shared by a, b</failure>
///   </testcase>
/// </testsuite>
/// ```
pub fn generate_junit_xml(report: &LoadReport) -> String {
    let time_attr = report
        .duration_ms
        .map(|ms| format!(" time=\"{:.3}\"", ms as f64 / 1000.0))
        .unwrap_or_default();

    let mut cases = String::new();
    let mut tests = 0;
    let mut failures = 0;

    if let Some(ref error) = report.error {
        tests += 1;
        failures += 1;
        cases.push_str(&format!(
            "  <testcase name=\"load\" classname=\"element-registry\">\n    <failure message=\"load cycle aborted\" type=\"LoadError\">{}</failure>\n  </testcase>\n",
            escape_xml(error)
        ));
    }

    for namespace in report.namespace_names() {
        tests += 1;

        let mut lines: Vec<String> = report
            .violations
            .iter()
            .filter(|v| v.namespace() == namespace)
            .map(|v| v.to_string())
            .collect();
        let violation_count = lines.len();

        let mut warning_lines: Vec<String> = report
            .warnings
            .iter()
            .filter(|w| w.namespace == namespace)
            .map(|w| w.to_string())
            .collect();

        if report.warnings_denied {
            lines.append(&mut warning_lines);
        }

        if lines.is_empty() {
            if warning_lines.is_empty() {
                cases.push_str(&format!(
                    "  <testcase name=\"{}\" classname=\"element-registry\" />\n",
                    escape_xml(namespace)
                ));
            } else {
                cases.push_str(&format!(
                    "  <testcase name=\"{name}\" classname=\"element-registry\">\n    <system-out>{body}</system-out>\n  </testcase>\n",
                    name = escape_xml(namespace),
                    body = escape_xml(&warning_lines.join("\n")),
                ));
            }
            continue;
        }

        failures += 1;
        let (message, kind) = if violation_count > 0 {
            (format!("{} violation(s)", violation_count), "RegistryValidationFailed")
        } else {
            (format!("{} merge warning(s)", lines.len()), "MergeWarning")
        };

        cases.push_str(&format!(
            "  <testcase name=\"{name}\" classname=\"element-registry\">\n    <failure message=\"{message}\" type=\"{kind}\">{body}</failure>\n  </testcase>\n",
            name = escape_xml(namespace),
            message = escape_xml(&message),
            kind = kind,
            body = escape_xml(&lines.join("\n")),
        ));
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuite name=\"element-registry\" tests=\"{tests}\" failures=\"{failures}\"{time}>\n{cases}</testsuite>\n",
        tests = tests,
        failures = failures,
        time = time_attr,
        cases = cases,
    )
}

/// Escape XML special characters.
pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
