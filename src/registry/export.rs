use crate::registry::registry_model::Registry;

// ============================================================================
// Registry export
// ============================================================================

/// Pretty JSON in the same `{ namespace: { symbol: identifier } }` shape the
/// loader accepts.
pub fn to_json(registry: &Registry) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(registry)
}

pub fn to_yaml(registry: &Registry) -> Result<String, serde_yaml::Error> {
    serde_yaml::to_string(registry)
}

/// Render the registry as a Maestro elements script, one
/// `output.<namespace> = { ... };` block per namespace in sorted order.
///
/// Flows can `runScript` the result to get every identifier on `output`.
pub fn to_maestro_script(registry: &Registry) -> String {
    let mut out = String::from("// Generated by element-registry. Do not edit.\n");

    for (namespace, map) in registry.iter() {
        out.push('\n');
        if is_identifier(namespace) {
            out.push_str(&format!("output.{} = {{\n", namespace));
        } else {
            out.push_str(&format!("output[{}] = {{\n", quote(namespace)));
        }

        let total = map.len();
        for (i, (symbol, identifier)) in map.iter().enumerate() {
            let key = if is_identifier(symbol) {
                symbol.clone()
            } else {
                quote(symbol)
            };
            let separator = if i + 1 < total { "," } else { "" };
            out.push_str(&format!("  {}: {}{}\n", key, quote(identifier), separator));
        }

        out.push_str("};\n");
    }

    out
}

/// Whether `name` can be written as a bare script identifier.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c == '$' || c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c == '$' || c.is_ascii_alphanumeric())
}

fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}
