use element_registry::contribution::loader::load_contributions;
use element_registry::contribution::source::{DirectorySource, MultiSource};
use element_registry::load_registry;
use element_registry::report::report_model::LoadReport;

mod common;
use crate::common::utils::{fixture, fixtures_root, scripts};

// ============================================================================
// Authored element tables
// ============================================================================

#[test]
fn fixture_tree_loads_in_path_order() {
    let contributions = load_contributions(&DirectorySource::new(fixtures_root())).unwrap();

    let found: Vec<_> = contributions
        .iter()
        .map(|c| {
            let file = std::path::Path::new(&c.locator)
                .strip_prefix(fixtures_root())
                .unwrap()
                .display()
                .to_string()
                .replace('\\', "/");
            (file, c.namespace.clone())
        })
        .collect();

    assert_eq!(
        found,
        vec![
            ("ata/cards.js".to_string(), "cards".to_string()),
            ("ata/forgot-passcode.js".to_string(), "forgotPasscode".to_string()),
            ("ata/login.js".to_string(), "login".to_string()),
            ("neo/login.js".to_string(), "login".to_string()),
        ]
    );
}

#[test]
fn both_apps_merge_into_one_clean_registry() {
    let outcome = load_registry(&DirectorySource::new(fixtures_root())).unwrap();
    let registry = &outcome.registry;

    assert_eq!(outcome.contributions, 4);
    assert!(outcome.warnings.is_empty(), "{:?}", outcome.warnings);
    assert_eq!(
        registry.namespaces().into_iter().collect::<Vec<_>>(),
        vec!["cards", "forgotPasscode", "login"]
    );
    assert_eq!(registry.symbols("cards").unwrap().len(), 21);
    assert_eq!(registry.symbols("forgotPasscode").unwrap().len(), 15);
    // 10 from one app, 30 distinct from the other
    assert_eq!(registry.symbols("login").unwrap().len(), 40);
    assert_eq!(registry.symbol_count(), 76);

    assert_eq!(registry.resolve("login.loginContinueButton").unwrap(), "login_continue_button");
    assert_eq!(registry.resolve("login.goToLoginButton").unwrap(), "go_to_login_btn");
    assert_eq!(registry.resolve("cards.homeCardTile").unwrap(), "my_card_tile");
    assert_eq!(
        registry.resolve("forgotPasscode.otpVerifyEmailAddressTitle").unwrap(),
        "otp_verify_email_title"
    );
}

#[test]
fn repeated_passcode_checkbox_resolves_to_later_declaration() {
    let registry = load_registry(&DirectorySource::new(fixture("neo/login.js")))
        .unwrap()
        .registry;

    assert_eq!(registry.lookup("login", "passcodeCheckBox").unwrap(), "passcode_checkbox");
    assert_eq!(registry.symbols("login").unwrap().len(), 30);
}

#[test]
fn divergent_revision_of_a_namespace_warns_and_wins() {
    let mut multi = MultiSource::new();
    multi.push(Box::new(DirectorySource::new(fixture("ata"))));
    multi.push(Box::new(scripts(&[(
        "revision/login.js",
        "// revised login screen\noutput.login = {\n  loginButton: 'login_submit_button',\n  newSymbol: 'new_symbol',\n};\n",
    )])));

    let outcome = load_registry(&multi).unwrap();

    assert_eq!(outcome.registry.resolve("login.loginButton").unwrap(), "login_submit_button");
    assert_eq!(outcome.registry.resolve("login.newSymbol").unwrap(), "new_symbol");
    assert_eq!(outcome.registry.resolve("login.codeField").unwrap(), "code_field_0");

    assert_eq!(outcome.warnings.len(), 1);
    let warning = &outcome.warnings[0];
    assert_eq!(warning.symbol, "loginButton");
    assert_eq!(warning.previous_identifier, "login_button");
    assert!(warning.previous_locator.ends_with("login.js"));
    assert_eq!(warning.locator, "revision/login.js");
}

#[test]
fn reloading_fixtures_is_idempotent() {
    let source = DirectorySource::new(fixtures_root());
    let first = load_registry(&source).unwrap();
    let second = load_registry(&source).unwrap();

    assert_eq!(first, second);

    let a = LoadReport::from_outcome("fixtures", &first);
    let b = LoadReport::from_outcome("fixtures", &second);
    assert_eq!(a.fingerprint, b.fingerprint);
    assert!(a.fingerprint.is_some());
}
