use std::io::Write;
use std::path::Path;

use structout_core::{Field, FieldType, generate_schema};
use structout_providers::{ProviderCatalog, ProviderConfig, ProviderError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn test_config(id: &str) -> ProviderConfig {
    ProviderConfig::new(
        id,
        r#"[{"key":"type","type":"keyvalue","value":"object","level":1},
            {"key":"properties","type":"object","level":1,"end":true}]"#,
        format!("/v1/{id}"),
    )
}

fn write_json(dir: &Path, config: &ProviderConfig) {
    let path = dir.join(format!("{}.json", config.provider));
    let mut f = std::fs::File::create(path).unwrap();
    serde_json::to_writer_pretty(&mut f, config).unwrap();
    f.flush().unwrap();
}

// ---------------------------------------------------------------------------
// Directory loading
// ---------------------------------------------------------------------------

#[test]
fn test_directory_loading_mixed_formats() {
    let dir = std::env::temp_dir().join("so_prov_integ_mixed");
    std::fs::create_dir_all(&dir).unwrap();

    write_json(&dir, &test_config("alpha"));
    test_config("beta").save(dir.join("beta.yaml")).unwrap();
    test_config("gamma").save(dir.join("gamma.yml")).unwrap();

    let catalog = ProviderCatalog::from_dir(&dir).unwrap();
    assert_eq!(catalog.len(), 3);
    assert!(catalog.contains("alpha"));
    assert!(catalog.contains("beta"));
    assert!(catalog.contains("gamma"));

    let beta = catalog.get("beta").unwrap();
    assert_eq!(beta.gen_ai_url_path_parameter, "/v1/beta");
    assert_eq!(beta.header_rules().len(), 2);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_malformed_template_fails_directory_load() {
    let dir = std::env::temp_dir().join("so_prov_integ_malformed");
    std::fs::create_dir_all(&dir).unwrap();

    write_json(&dir, &test_config("alpha"));
    std::fs::write(dir.join("broken.json"), "{not json").unwrap();

    let result = ProviderCatalog::from_dir(&dir);
    assert!(matches!(result, Err(ProviderError::JsonError(_))));

    std::fs::remove_dir_all(&dir).ok();
}

// ---------------------------------------------------------------------------
// Fallback chains
// ---------------------------------------------------------------------------

#[test]
fn test_missing_directory_falls_back_to_builtin() {
    let catalog = ProviderCatalog::builder()
        .from_dir("/nonexistent/templates/")
        .with_builtin()
        .build()
        .unwrap();

    assert_eq!(catalog.len(), 3);
    assert!(catalog.contains("anthropic"));
}

#[test]
fn test_single_file_source() {
    let dir = std::env::temp_dir().join("so_prov_integ_file");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("custom.json");
    test_config("custom").save(&path).unwrap();

    let catalog = ProviderCatalog::builder().from_file(&path).build().unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.contains("custom"));

    std::fs::remove_dir_all(&dir).ok();
}

// ---------------------------------------------------------------------------
// Templates drive generation end to end
// ---------------------------------------------------------------------------

#[test]
fn test_loaded_template_generates_schema() {
    let dir = std::env::temp_dir().join("so_prov_integ_generate");
    std::fs::create_dir_all(&dir).unwrap();
    write_json(&dir, &test_config("custom"));

    let catalog = ProviderCatalog::from_dir(&dir).unwrap();
    let config = catalog.require("custom").unwrap();

    let fields = vec![
        Field::new("title", FieldType::String).required(),
        Field::new("count", FieldType::Integer),
    ];
    let document = generate_schema(&fields, "Doc", "A document", &config.llm_schema_header);

    assert_eq!(document["type"], "object");
    assert_eq!(document["properties"]["title"]["type"], "string");
    assert_eq!(document["properties"]["count"]["type"], "integer");
    assert_eq!(document["required"], serde_json::json!(["title"]));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_builtin_presets_generate_distinct_envelopes() {
    let catalog = ProviderCatalog::builtin();
    let fields = vec![Field::new("title", FieldType::String)];

    let openai = generate_schema(
        &fields,
        "Doc",
        "A document",
        &catalog.get("openai").unwrap().llm_schema_header,
    );
    assert_eq!(openai["schema"]["type"], "object");
    assert_eq!(openai["schema"]["additionalProperties"], false);

    let anthropic = generate_schema(
        &fields,
        "Doc",
        "A document",
        &catalog.get("anthropic").unwrap().llm_schema_header,
    );
    assert_eq!(anthropic["input_schema"]["type"], "object");

    let gemini = generate_schema(
        &fields,
        "Doc",
        "A document",
        &catalog.get("gemini").unwrap().llm_schema_header,
    );
    assert_eq!(gemini["type"], "object");
    assert_eq!(gemini["propertyOrdering"], serde_json::json!(["title"]));
}
