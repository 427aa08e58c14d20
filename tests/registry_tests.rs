use std::sync::Arc;
use std::thread;

use element_registry::contribution::source::{DocumentFormat, EmbeddedSource};
use element_registry::error::RegistryError;
use element_registry::load_registry;
use element_registry::registry::export::{to_json, to_maestro_script, to_yaml};
use element_registry::registry::published::PublishedRegistry;
use element_registry::registry::registry_model::{Registry, split_reference};

mod common;
use crate::common::utils::scripts;

fn sample() -> Registry {
    let source = scripts(&[
        (
            "cards.js",
            "output.cards = { homeCardTile: 'my_card_tile', cvvHidden: 'cvv_hidden' };",
        ),
        (
            "login.js",
            "output.login = { loginButton: 'login_button', 'odd key': \"it's\" };",
        ),
    ]);
    load_registry(&source).unwrap().registry
}

// ============================================================================
// Query surface
// ============================================================================

#[test]
fn lookup_resolves_known_symbols() {
    let registry = sample();
    assert_eq!(registry.lookup("cards", "homeCardTile").unwrap(), "my_card_tile");
    assert_eq!(registry.lookup("login", "odd key").unwrap(), "it's");
}

#[test]
fn lookup_distinguishes_unknown_namespace_from_unknown_symbol() {
    let registry = sample();

    match registry.lookup("settings", "homeCardTile") {
        Err(RegistryError::UnknownNamespace { namespace }) => assert_eq!(namespace, "settings"),
        other => panic!("Expected UnknownNamespace, got {:?}", other),
    }

    match registry.lookup("cards", "loginButton") {
        Err(RegistryError::UnknownSymbol { namespace, symbol }) => {
            assert_eq!(namespace, "cards");
            assert_eq!(symbol, "loginButton");
        }
        other => panic!("Expected UnknownSymbol, got {:?}", other),
    }
}

#[test]
fn resolve_dotted_references() {
    let registry = sample();
    assert_eq!(registry.resolve("login.loginButton").unwrap(), "login_button");
    assert!(matches!(
        registry.resolve("loginButton"),
        Err(RegistryError::InvalidReference { .. })
    ));
    assert!(matches!(
        registry.resolve("nope.loginButton"),
        Err(RegistryError::UnknownNamespace { .. })
    ));

    assert_eq!(split_reference("a.b.c").unwrap(), ("a", "b.c"));
    assert!(split_reference(".b").is_err());
    assert!(split_reference("a.").is_err());
}

#[test]
fn enumeration() {
    let registry = sample();

    assert_eq!(registry.namespaces().into_iter().collect::<Vec<_>>(), vec!["cards", "login"]);
    assert_eq!(
        registry.symbols("cards").unwrap().into_iter().collect::<Vec<_>>(),
        vec!["cvvHidden", "homeCardTile"]
    );
    assert!(matches!(
        registry.symbols("missing"),
        Err(RegistryError::UnknownNamespace { .. })
    ));
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.symbol_count(), 4);
    assert_eq!(registry.get("cards").map(|m| m.len()), Some(2));
    assert!(registry.get("missing").is_none());
}

#[test]
fn empty_source_gives_empty_registry() {
    let outcome = load_registry(&EmbeddedSource::new()).unwrap();
    assert!(outcome.registry.is_empty());
    assert!(outcome.registry.namespaces().is_empty());
    assert!(outcome.warnings.is_empty());
    assert_eq!(outcome.contributions, 0);
}

// ============================================================================
// Idempotence / fingerprint
// ============================================================================

#[test]
fn identical_input_builds_equal_registries() {
    let source = scripts(&[
        ("a.js", "output.login = { x: 'a', y: 'y_id' };"),
        ("b.js", "output.login = { x: 'b' };"),
    ]);

    let first = load_registry(&source).unwrap();
    let second = load_registry(&source).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.warnings.len(), 1);
    assert_eq!(first.registry.fingerprint(), second.registry.fingerprint());
}

#[test]
fn fingerprint_tracks_content() {
    let a = load_registry(&scripts(&[("a.js", "output.login = { x: 'a' }")])).unwrap().registry;
    let b = load_registry(&scripts(&[("b.js", "output.login = { x: 'b' }")])).unwrap().registry;
    let empty_ns = load_registry(&scripts(&[("c.js", "output.login = {}")])).unwrap().registry;

    assert_ne!(a.fingerprint(), b.fingerprint());
    assert_ne!(empty_ns.fingerprint(), Registry::default().fingerprint());
    assert_eq!(a.fingerprint().len(), 40);
}

#[test]
fn fingerprint_is_not_fooled_by_separator_bytes_in_identifiers() {
    let split = load_registry(&scripts(&[("a.js", "output.login = { x: 'a', y: 'b' }")]))
        .unwrap()
        .registry;
    let packed = load_registry(&scripts(&[("b.js", r"output.login = { x: 'a\ny\0b' }")]))
        .unwrap()
        .registry;

    assert_ne!(split, packed);
    assert_ne!(split.fingerprint(), packed.fingerprint());
}

// ============================================================================
// Export
// ============================================================================

#[test]
fn maestro_export_reloads_to_equal_registry() {
    let registry = sample();
    let script = to_maestro_script(&registry);

    assert!(script.contains("output.cards = {"));
    assert!(script.contains("  homeCardTile: 'my_card_tile'"));
    assert!(script.contains("'odd key': 'it\\'s'"));

    let reloaded = load_registry(&scripts(&[("export.js", script.as_str())])).unwrap().registry;
    assert_eq!(reloaded, registry);
}

#[test]
fn json_and_yaml_exports_reload_to_equal_registry() {
    let registry = sample();

    let json = to_json(&registry).unwrap();
    let source = EmbeddedSource::new().with_document("export.json", DocumentFormat::Json, json);
    assert_eq!(load_registry(&source).unwrap().registry, registry);

    let yaml = to_yaml(&registry).unwrap();
    let source = EmbeddedSource::new().with_document("export.yaml", DocumentFormat::Yaml, yaml);
    assert_eq!(load_registry(&source).unwrap().registry, registry);
}

// ============================================================================
// Publishing
// ============================================================================

#[test]
fn failed_reload_keeps_previous_registry() {
    let good = scripts(&[("login.js", "output.login = { loginButton: 'login_button' };")]);
    let (published, warnings) = PublishedRegistry::load(&good).unwrap();
    assert!(warnings.is_empty());

    let before = published.current();

    let colliding = scripts(&[("login.js", "output.login = { a: 'same', b: 'same' };")]);
    assert!(matches!(
        published.reload(&colliding),
        Err(RegistryError::RegistryValidationFailed { .. })
    ));

    let malformed = scripts(&[("login.js", "output.login = { a: 1 };")]);
    assert!(matches!(
        published.reload(&malformed),
        Err(RegistryError::MalformedContribution { .. })
    ));

    assert!(Arc::ptr_eq(&before, &published.current()));
    assert_eq!(published.current().lookup("login", "loginButton").unwrap(), "login_button");
}

#[test]
fn successful_reload_swaps_but_old_snapshots_survive() {
    let published = PublishedRegistry::default();
    assert!(published.current().is_empty());

    let snapshot = published.current();
    let warnings = published
        .reload(&scripts(&[
            ("a.js", "output.login = { x: 'a' };"),
            ("b.js", "output.login = { x: 'b' };"),
        ]))
        .unwrap();

    assert_eq!(warnings.len(), 1);
    assert!(snapshot.is_empty());
    assert_eq!(published.current().lookup("login", "x").unwrap(), "b");
}

#[test]
fn readers_never_see_a_partial_registry() {
    let first = scripts(&[("a.js", "output.login = { a: 'a1', b: 'b1' };")]);
    let second = scripts(&[
        ("a.js", "output.login = { a: 'a2', b: 'b2' };"),
        ("c.js", "output.cards = { c: 'c2' };"),
    ]);

    let (published, _) = PublishedRegistry::load(&first).unwrap();
    let published = Arc::new(published);

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let published = Arc::clone(&published);
            thread::spawn(move || {
                for _ in 0..500 {
                    let registry = published.current();
                    let a = registry.lookup("login", "a").unwrap().to_string();
                    let b = registry.lookup("login", "b").unwrap().to_string();
                    // both symbols always come from the same generation
                    assert_eq!(&a[1..], &b[1..]);
                    assert_eq!(registry.get("cards").is_some(), a == "a2");
                }
            })
        })
        .collect();

    for i in 0..50 {
        let source = if i % 2 == 0 { &second } else { &first };
        published.reload(source).unwrap();
    }

    for reader in readers {
        reader.join().unwrap();
    }
}
