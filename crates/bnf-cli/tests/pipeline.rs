//! Integration tests for the aggregation pipeline.

use std::fs;
use std::path::{Path, PathBuf};

use bnf_cli::pipeline::{AggregateRequest, CodelistSource, export, ingest, run_pipeline};
use bnf_core::AggregationError;
use bnf_model::InputTable;
use bnf_output::OutputFormat;
use bnf_presets::CodelistPreset;
use rust_decimal_macros::dec;

const PRESCRIBING: &str = "\
Commissioner/Provider Code,BNF Code,Items,Quantity X Items,Estimated Drug Cost GBP
84H00,0501013B0,5,10,12.50
84H00,0301011R0,3,600,8.97
00P00,0302000C0,2,240,41.20
99Z00,0501013B0,100,100,100.00
";

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

fn request(prescribing: PathBuf, codelist: Option<CodelistSource>) -> AggregateRequest {
    AggregateRequest {
        prescribing,
        codelist,
        settings: None,
        apply_cost_override: false,
    }
}

#[test]
fn test_pipeline_with_codelist_file() {
    let dir = tempfile::tempdir().unwrap();
    let prescribing = write_file(dir.path(), "epact.csv", PRESCRIBING);
    let codelist = write_file(
        dir.path(),
        "codelist.csv",
        "Category,BNF Prefix\nAntibacterials,0501\nOpioids,040702\n",
    );

    let result = run_pipeline(&request(prescribing, Some(CodelistSource::File(codelist)))).unwrap();
    let grid = &result.outcome.grid;

    assert_eq!(result.record_count, 4);
    assert_eq!(result.outcome.outside_allow_list, 1);
    assert_eq!(grid.providers, vec!["84H00", "00P00"]);
    assert_eq!(grid.categories, vec!["Antibacterials", "Opioids"]);
    assert_eq!(grid.len(), 4);

    let row = grid.get("84H00", "Antibacterials").unwrap();
    assert_eq!(row.items, 5);
    assert_eq!(row.quantity_x_items, dec!(10));
    assert_eq!(row.estimated_cost.to_string(), "12.50");

    for provider in ["84H00", "00P00"] {
        assert!(grid.get(provider, "Opioids").unwrap().measures().is_zero());
    }
    assert!(grid.get("99Z00", "Antibacterials").is_none());
}

#[test]
fn test_pipeline_with_preset_and_cost_override() {
    let dir = tempfile::tempdir().unwrap();
    let prescribing = write_file(dir.path(), "epact.csv", PRESCRIBING);

    let mut request = request(
        prescribing,
        Some(CodelistSource::Preset(CodelistPreset::Respiratory)),
    );
    request.apply_cost_override = true;
    let result = run_pipeline(&request).unwrap();
    let grid = &result.outcome.grid;

    assert!(result.options.cost_override.enabled);
    assert_eq!(grid.categories.len(), 4);

    let saba = grid.get("84H00", "Short-acting beta2 agonists").unwrap();
    assert_eq!(saba.items, 3);
    assert_eq!(saba.estimated_cost.to_string(), "6.00");

    let ics = grid.get("00P00", "Inhaled corticosteroids").unwrap();
    assert_eq!(ics.items, 2);
    assert_eq!(ics.estimated_cost.to_string(), "6.00");
}

#[test]
fn test_pipeline_with_settings_file() {
    let dir = tempfile::tempdir().unwrap();
    let prescribing = write_file(dir.path(), "epact.csv", PRESCRIBING);
    let codelist = write_file(dir.path(), "codelist.csv", "category,bnf_prefix\nAntibacterials,0501\n");
    let settings = write_file(
        dir.path(),
        "settings.toml",
        "providers = [\"99Z00\"]\n\n[cost_override]\nenabled = true\n\n[cost_override.multipliers]\nAntibacterials = 3\n",
    );

    let mut request = request(prescribing, Some(CodelistSource::File(codelist)));
    request.settings = Some(settings);
    let result = run_pipeline(&request).unwrap();
    let grid = &result.outcome.grid;

    assert_eq!(grid.providers, vec!["99Z00"]);
    let row = grid.get("99Z00", "Antibacterials").unwrap();
    assert_eq!(row.items, 100);
    assert_eq!(row.estimated_cost.to_string(), "300.00");
}

#[test]
fn test_missing_codelist_is_reported_before_reading() {
    let err = ingest(Path::new("does-not-exist.csv"), None).unwrap_err();
    assert_eq!(
        err.downcast_ref::<AggregationError>(),
        Some(&AggregationError::MissingInput {
            table: InputTable::Codelist
        })
    );
}

#[test]
fn test_invalid_codelist_fails_run() {
    let dir = tempfile::tempdir().unwrap();
    let prescribing = write_file(dir.path(), "epact.csv", PRESCRIBING);
    let codelist = write_file(dir.path(), "codelist.csv", "category,bnf_prefix\nAntibacterials,\n");

    let err = run_pipeline(&request(prescribing, Some(CodelistSource::File(codelist)))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AggregationError>(),
        Some(AggregationError::InvalidCodelist { position: 1, .. })
    ));
}

#[test]
fn test_codelist_source_from_args() {
    assert_eq!(CodelistSource::from_args(None, None).unwrap(), None);
    assert_eq!(
        CodelistSource::from_args(None, Some("respiratory")).unwrap(),
        Some(CodelistSource::Preset(CodelistPreset::Respiratory))
    );
    assert_eq!(
        CodelistSource::from_args(Some(Path::new("c.csv")), None).unwrap(),
        Some(CodelistSource::File(PathBuf::from("c.csv")))
    );
    assert!(CodelistSource::from_args(None, Some("cardiology")).is_err());
}

#[test]
fn test_export_to_file_and_string() {
    let dir = tempfile::tempdir().unwrap();
    let prescribing = write_file(dir.path(), "epact.csv", PRESCRIBING);
    let codelist = write_file(dir.path(), "codelist.csv", "category,bnf_prefix\nAntibacterials,0501\n");
    let result = run_pipeline(&request(prescribing, Some(CodelistSource::File(codelist)))).unwrap();

    let rendered = export(&result.outcome, OutputFormat::Csv, None)
        .unwrap()
        .unwrap();
    assert_eq!(
        rendered,
        "provider_code,category,items,quantity_x_items,estimated_cost\n\
         84H00,Antibacterials,5,10,12.50\n\
         00P00,Antibacterials,0,0,0.00\n"
    );

    let path = dir.path().join("summary.json");
    assert!(export(&result.outcome, OutputFormat::Json, Some(&path)).unwrap().is_none());
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"estimated_cost\": \"12.50\""));
}
