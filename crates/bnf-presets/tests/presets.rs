//! Tests for presets and settings files.

use std::io::Write;

use bnf_model::{CodelistEntry, DEFAULT_PROVIDER_ALLOW_LIST};
use bnf_presets::{CodelistPreset, PresetError, Settings, load_preset};

#[test]
fn respiratory_categories_have_reference_multipliers() {
    let entries = load_preset("respiratory").unwrap();
    let settings = Settings::reference().unwrap();

    let mut categories: Vec<&str> = entries.iter().map(|e| e.category.as_str()).collect();
    categories.dedup();
    assert_eq!(categories.len(), 4);
    for category in categories {
        assert!(
            settings.cost_override.multipliers.contains_key(category),
            "no multiplier for {category}"
        );
    }
}

#[test]
fn presets_are_listed_in_stable_order() {
    let names: Vec<&str> = CodelistPreset::all().iter().map(CodelistPreset::name).collect();
    assert_eq!(names, vec!["respiratory", "antimicrobial-analgesic"]);
}

#[test]
fn respiratory_preset_keeps_leading_zeros() {
    let entries = CodelistPreset::Respiratory.load().unwrap();
    assert!(entries.contains(&CodelistEntry::new(
        "Short-acting beta2 agonists",
        "0301011R0"
    )));
}

#[test]
fn reference_providers_match_default_allow_list() {
    let options = Settings::reference().unwrap().to_options(false);
    assert_eq!(options.provider_allow_list, DEFAULT_PROVIDER_ALLOW_LIST.to_vec());
}

#[test]
fn load_settings_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"providers = ["84H00", " 00P00 "]

[cost_override]
enabled = true

[cost_override.multipliers]
Antibacterials = 5
"#
    )
    .unwrap();

    let settings = Settings::load(file.path()).unwrap();
    let options = settings.to_options(false);
    assert_eq!(options.provider_allow_list, vec!["84H00", "00P00"]);
    assert_eq!(
        options.cost_override.multiplier_for("Antibacterials").map(|m| m.get()),
        Some(5)
    );
}

#[test]
fn unknown_settings_key_is_rejected() {
    let err = Settings::from_toml_str("provider = [\"84H00\"]\n", "typo.toml").unwrap_err();
    match err {
        PresetError::Toml { origin, .. } => assert_eq!(origin, "typo.toml"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn missing_settings_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Settings::load(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, PresetError::Io { .. }));
}
