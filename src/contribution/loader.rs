use serde_json::Value;
use tracing::debug;

use crate::contribution::contribution_model::Contribution;
use crate::contribution::maestro::parse_elements_script;
use crate::contribution::raw::{RawDocument, value_kind};
use crate::contribution::source::{ContributionSource, DocumentFormat, SourceDocument};
use crate::error::RegistryError;

/// Read every document from `source` and decode it into contributions.
///
/// The result keeps discovery order: documents in the order the source
/// returned them, and contributions in the order they appear inside each
/// document. Nothing is merged or deduplicated here. The first malformed
/// document aborts the load.
pub fn load_contributions(source: &dyn ContributionSource) -> Result<Vec<Contribution>, RegistryError> {
    let documents = source.read_documents()?;
    let mut contributions = Vec::new();

    for document in &documents {
        let parsed = parse_document(document)?;
        debug!(
            locator = %document.locator,
            contributions = parsed.len(),
            "parsed source document"
        );
        contributions.extend(parsed);
    }

    Ok(contributions)
}

/// Decode one document into its contributions.
pub fn parse_document(document: &SourceDocument) -> Result<Vec<Contribution>, RegistryError> {
    let locator = document.locator.as_str();

    let raw: RawDocument = match document.format {
        DocumentFormat::Maestro => parse_elements_script(&document.text)
            .map_err(|e| RegistryError::malformed(locator, e.to_string()))?,
        DocumentFormat::Json => serde_json::from_str(&document.text)
            .map_err(|e| RegistryError::malformed(locator, e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(&document.text)
            .map_err(|e| RegistryError::malformed(locator, e.to_string()))?,
    };

    raw.0
        .into_iter()
        .map(|(namespace, mapping)| {
            if namespace.is_empty() {
                return Err(RegistryError::malformed(locator, "empty namespace name"));
            }

            let entries = mapping
                .0
                .into_iter()
                .map(|(symbol, value)| {
                    if symbol.is_empty() {
                        return Err(RegistryError::malformed(
                            locator,
                            format!("empty symbolic name in namespace '{}'", namespace),
                        ));
                    }
                    match value {
                        Value::String(identifier) => Ok((symbol, identifier)),
                        other => Err(RegistryError::malformed(
                            locator,
                            format!(
                                "symbol '{}' in namespace '{}' has a non-string value ({})",
                                symbol,
                                namespace,
                                value_kind(&other)
                            ),
                        )),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Contribution::new(locator, namespace, entries))
        })
        .collect()
}
