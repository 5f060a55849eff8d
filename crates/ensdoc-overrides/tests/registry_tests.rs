//! Registry integration tests over the override fixtures

mod common;

use common::fixtures::{fixture_path, load_override_fixture};
use ensdoc_overrides::{
    format_records, parse, validate, OverrideRegistry, ParamName, RegistryError, WarningKind,
};

// === Loading ===

#[test]
fn test_load_api_fixture() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    assert_eq!(registry.len(), 6);

    let namespaces: Vec<_> = registry.namespaces().collect();
    assert_eq!(namespaces[0], "ensight.batch");
    assert_eq!(namespaces[5], "ensight.query.DISTANCE");
}

#[test]
fn test_load_from_path() {
    let registry =
        OverrideRegistry::load_path(fixture_path("ensight_api.docstr")).unwrap();
    assert!(registry.get("ensight.objs.addcallback").is_some());
}

#[test]
fn test_load_malformed_fixture_fails() {
    let result = OverrideRegistry::load_path(fixture_path("malformed.docstr"));
    assert!(matches!(result, Err(RegistryError::Parse(_))));
}

// === Round-trip fidelity ===

#[test]
fn test_lookup_returns_source_fields_exactly() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();

    let record = registry.lookup("ensight.objs.addcallback").unwrap();
    assert_eq!(
        record.signature.as_deref(),
        Some("(target: ENSOBJ, tag: str, method: object, replace: int = 0, compress: int = 1) -> int")
    );
    assert_eq!(
        record.param_names,
        vec![
            ParamName::positional("target"),
            ParamName::positional("tag"),
            ParamName::positional("method"),
            ParamName::keyword("replace"),
            ParamName::keyword("compress"),
        ]
    );
    assert!(record
        .description
        .starts_with("Register a Python callback on an object."));
    assert!(record
        .description
        .contains("        ensight.objs.addcallback(ensight.objs.core, \"parts\", on_change)"));
}

#[test]
fn test_empty_paramnames_round_trip() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    let record = registry.lookup("ensight.batch").unwrap();
    assert!(record.param_names.is_empty());
    assert!(record.description.starts_with("Detect batch mode."));
}

#[test]
fn test_property_record_without_signature() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    let record = registry.lookup("ensight.query.DISTANCE").unwrap();
    assert_eq!(record.signature, None);
    assert!(record.param_names.is_empty());
}

// === Lookup semantics ===

#[test]
fn test_lookup_miss() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    assert!(matches!(
        registry.lookup("ensight.nonexistent"),
        Err(RegistryError::NotFound { ref namespace }) if namespace == "ensight.nonexistent"
    ));
}

#[test]
fn test_lookup_is_exact_not_prefix() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    assert!(registry.get("ensight.objs").is_none());
    assert!(registry.get("ensight.objs.addcallback.extra").is_none());
}

// === Validation ===

#[test]
fn test_api_fixture_is_consistent() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    assert!(validate(&registry).is_empty());
}

#[test]
fn test_inconsistent_fixture_warns() {
    let registry =
        OverrideRegistry::load_str(&load_override_fixture("inconsistent.docstr")).unwrap();
    let warnings = validate(&registry);
    assert_eq!(warnings.len(), 2);

    assert_eq!(warnings[0].namespace, "ensight.view_transf.zoom");
    assert_eq!(
        warnings[0].kind,
        WarningKind::SignatureArityMismatch {
            signature_params: 2,
            param_names: 1,
        }
    );
    assert_eq!(warnings[1].namespace, "ensight.file.save_image");
    assert_eq!(warnings[1].kind, WarningKind::UnparsableSignature);
}

// === Formatting ===

#[test]
fn test_fixture_survives_canonical_rewrite() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    let canonical = format_records(registry.records());
    let reparsed = parse(&canonical).unwrap();

    assert_eq!(reparsed.len(), registry.len());
    for (original, rewritten) in registry.records().zip(reparsed.iter()) {
        assert_eq!(original.namespace, rewritten.namespace);
        assert_eq!(original.signature, rewritten.signature);
        assert_eq!(original.param_names, rewritten.param_names);
        assert_eq!(original.description, rewritten.description);
    }
}

// === Export ===

#[test]
fn test_json_export_contains_all_records() {
    let registry = OverrideRegistry::load_str(&load_override_fixture("ensight_api.docstr")).unwrap();
    let json = registry.to_json().unwrap();
    for namespace in registry.namespaces() {
        assert!(json.contains(&format!("\"{}\"", namespace)));
    }
}
