use assert_cmd::Command;
use serde_json::Value;
use vitrine_test_utils::assert_snapshot;
use vitrine_test_utils::fixtures::{self, catalog_json, numbered_catalog, product};
use vitrine_test_utils::sandbox::Sandbox;

const VITRINE: &str = env!("CARGO_BIN_EXE_vitrine");

fn sandbox_with(content: String) -> Sandbox {
    let mut sb = Sandbox::new();
    sb.write("content.json", content);
    sb
}

#[test]
fn test_help_lists_commands() {
    let output = Command::new(VITRINE).arg("--help").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in ["browse", "list", "show", "validate"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
    assert!(!stdout.contains("--debug"));
}

#[test]
fn test_list_two_products() {
    let sb = sandbox_with(catalog_json([product(1, "Alpha"), product(2, "Beta")]));
    let out = sb.run(VITRINE, ["list"]);
    assert!(out.success(), "{}", out.stderr);
    assert_snapshot!(out.stdout, @r"
       1  Alpha
       2  Beta

    Showing 2 of 2 matches.
    ");
}

#[test]
fn test_list_first_page_of_eight() {
    let sb = sandbox_with(numbered_catalog(8));
    let out = sb.run(VITRINE, ["list"]);
    assert!(out.success(), "{}", out.stderr);
    assert!(out.stdout.contains("Product 6"));
    assert!(!out.stdout.contains("Product 7"));
    assert!(
        out.stdout
            .contains("Showing 6 of 8 matches. Carregar Mais with --page 2")
    );
}

#[test]
fn test_list_second_page_json() {
    let sb = sandbox_with(numbered_catalog(8));
    let out = sb.run(VITRINE, ["list", "--page", "2", "--json"]);
    assert!(out.success(), "{}", out.stderr);
    let json: Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(json["page"], 2);
    assert_eq!(json["total_matches"], 8);
    assert_eq!(json["has_more"], false);
    assert_eq!(json["products"].as_array().unwrap().len(), 8);
    assert_eq!(json["products"][7]["name"], "Product 8");
}

#[test]
fn test_list_query_matches_description() {
    let sb = sandbox_with(catalog_json([
        fixtures::product_with_description(1, "Driver Pack", "Includes WebCam support"),
        product(2, "Camera Tool"),
        product(3, "Printer"),
    ]));
    let out = sb.run(VITRINE, ["list", "--query", "cam", "--json"]);
    assert!(out.success(), "{}", out.stderr);
    let json: Value = serde_json::from_str(&out.stdout).unwrap();
    let ids: Vec<_> = json["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(json["query"], "cam");
}

#[test]
fn test_list_no_results() {
    let sb = sandbox_with(numbered_catalog(3));
    let out = sb.run(VITRINE, ["list", "-q", "zzz"]);
    assert!(out.success(), "{}", out.stderr);
    assert_snapshot!(out.stdout, @"Nenhum produto encontrado.");
}

#[test]
fn test_list_uses_configured_labels_and_page_size() {
    let mut sb = sandbox_with(numbered_catalog(5));
    sb.write_config("page_size = 2\n\n[labels]\nload_more = \"Load more\"\n");
    let out = sb.run(VITRINE, ["list"]);
    assert!(out.success(), "{}", out.stderr);
    assert!(
        out.stdout
            .contains("Showing 2 of 5 matches. Load more with --page 2")
    );
}

#[test]
fn test_source_from_environment() {
    let mut sb = Sandbox::new();
    sb.write("data/catalog.json", numbered_catalog(1));
    sb.env("VITRINE_SOURCE", "data/catalog.json");
    let out = sb.run(VITRINE, ["list"]);
    assert!(out.success(), "{}", out.stderr);
    assert!(out.stdout.contains("Product 1"));
}

#[test]
fn test_show_product() {
    let sb = sandbox_with(catalog_json([
        product(1, "Alpha"),
        fixtures::product_with_description(3, "Product 3", "First line\nSecond line"),
    ]));
    let out = sb.run(VITRINE, ["show", "3"]);
    assert!(out.success(), "{}", out.stderr);
    assert_snapshot!(out.stdout, @r"
    Product 3 Setup
      Tamanho:          12 MB
      Versão:           2.1
      Compatibilidade:  Windows 10+
      Download:         https://downloads.example.com/3.zip

      First line
      Second line
    ");
}

#[test]
fn test_show_json() {
    let sb = sandbox_with(catalog_json([product(4, "Delta")]));
    let out = sb.run(VITRINE, ["show", "4", "--json"]);
    assert!(out.success(), "{}", out.stderr);
    let json: Value = serde_json::from_str(&out.stdout).unwrap();
    assert_eq!(json["title"], "Delta Setup");
    assert_eq!(json["description_lines"], Value::Array(vec![]));
}

#[test]
fn test_show_unknown_id_fails() {
    let sb = sandbox_with(numbered_catalog(2));
    let out = sb.run(VITRINE, ["show", "42"]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Error: Failed to show product from content.json"));
    assert!(out.stderr.contains("No product with id 42"));
}

#[test]
fn test_missing_catalog_fails() {
    let sb = Sandbox::new();
    let out = sb.run(VITRINE, ["list"]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Failed to load catalog from content.json"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let sb = sandbox_with(numbered_catalog(1));
    let out = sb.run(VITRINE, ["--config", "nope.toml", "list"]);
    assert_eq!(out.code, Some(1));
    assert!(out.stderr.contains("Failed to load configuration"));
}

#[test]
fn test_validate_clean_catalog() {
    let sb = sandbox_with(numbered_catalog(3));
    let out = sb.run(VITRINE, ["validate"]);
    assert!(out.success(), "{}", out.stderr);
    assert_snapshot!(out.stdout, @"✓ 3 records accepted from content.json");
}

#[test]
fn test_validate_reports_rejected_records() {
    let sb = sandbox_with(format!(
        r#"[{}, {{"id": 5, "name": "Broken"}}, {}]"#,
        product(1, "Alpha"),
        product(1, "Alpha again")
    ));
    let out = sb.run(VITRINE, ["validate"]);
    assert_eq!(out.code, Some(1));
    assert_snapshot!(out.stdout, @r"
    ✓ 1 records accepted from content.json
    ✗ record 1 (id 5): missing field `image`
    ✗ record 2 (id 1): duplicate id 1
    ");
    assert!(out.stderr.contains("2 malformed records in content.json"));
}

#[test]
fn test_log_file_receives_debug_output() {
    let sb = sandbox_with(numbered_catalog(1));
    let out = sb.run(VITRINE, ["--debug", "--log-file", "vitrine.log", "list"]);
    assert!(out.success(), "{}", out.stderr);
    assert!(!out.stderr.contains("Using catalog source"));
    let log = std::fs::read_to_string(sb.root_path().join("vitrine.log")).unwrap();
    assert!(log.contains("Using catalog source content.json"));
}
