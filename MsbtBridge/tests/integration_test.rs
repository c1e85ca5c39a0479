use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use msbtbridge::batch::{self, DocumentOutcome};
use msbtbridge::config::BatchConfig;
use msbtbridge::diff::SuffixPolicy;
use msbtbridge::document::{load_document, load_value};
use msbtbridge::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::tempdir;

const KOREAN_MENU: &str = r#"{"m_Name":"korean_menu","m_AssetBundleName":"korean","m_Container":[{"first":"assets/format_msbt/ko/korean/korean_menu.bytes","second":{"m_PathID":11}}],"labelDataArray":[{"labelIndex":0,"labelName":"ok","wordDataArray":[{"patternID":-1,"str":"확인","strWidth":40.0}]},{"labelIndex":1,"labelName":"dex","wordDataArray":[{"patternID":-1,"str":"도감","strWidth":40.0}]},{"labelIndex":2,"labelName":"bag","wordDataArray":[{"patternID":-1,"str":"가방","strWidth":40.0}]},{"labelIndex":3,"labelName":"misc","wordDataArray":[{"patternID":-1,"str":"무엇","strWidth":40.0}]}]}"#;

const KOREAN_INDEX: &str = r#"{"m_Name":"korean","m_AssetBundleName":"korean","m_Container":[{"first":"assets/format_msbt/ko/korean/korean_menu.bytes"}]}"#;

const SIMP_MENU: &str = r#"{"m_Name":"simp_chinese_menu","labelDataArray":[{"labelIndex":0,"labelName":"ok","wordDataArray":[{"patternID":-1,"str":"确定","strWidth":24.0}]}]}"#;

const TRAD_MENU: &str = r#"{"m_Name":"trad_chinese_menu","labelDataArray":[{"labelIndex":0,"labelName":"ok","wordDataArray":[{"patternID":-1,"str":"確定","strWidth":24.0}]},{"labelIndex":1,"labelName":"dex","wordDataArray":[{"patternID":-1,"str":"圖鑑","strWidth":24.0}]}]}"#;

const CONFIG: &str = r#"
target_language = "korean"
output_language = "simp_chinese"
target_root = "korean_export"
output_root = "out"

[[sources]]
name = "simp"
root = "common_export"
language = "simp_chinese"

[[sources]]
name = "trad"
root = "common_export"
language = "trad_chinese"
convert = true

[conversion]
table = "TSCharacters.txt"

[[path_rewrites]]
from = "assets/format_msbt/ko/korean/korean_"
to = "assets/format_msbt/si/simp_chinese/simp_chinese_"
"#;

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn setup_backfill(root: &Path) -> BatchConfig {
    write(&root.join("korean_export/korean_menu.json"), KOREAN_MENU);
    write(&root.join("korean_export/korean.json"), KOREAN_INDEX);
    write(&root.join("korean_export/korean_broken.json"), "{not json");
    write(&root.join("common_export/simp_chinese_menu.json"), SIMP_MENU);
    write(&root.join("common_export/trad_chinese_menu.json"), TRAD_MENU);
    write(&root.join("TSCharacters.txt"), "圖\t图\n鑑\t鉴\n確\t确\n");
    write(&root.join("msbtbridge.toml"), CONFIG);
    BatchConfig::load(root.join("msbtbridge.toml")).unwrap()
}

#[test]
fn test_backfill_end_to_end() {
    let dir = tempdir().unwrap();
    let config = setup_backfill(dir.path());

    let updates = AtomicUsize::new(0);
    let report = batch::backfill(&config, &|_| {
        updates.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(report.files_found, 3);
    assert_eq!(report.resolved, 1);
    assert_eq!(report.copied_through, 1);
    assert_eq!(report.load_failures, 1);
    assert_eq!(report.save_failures, 0);
    assert_eq!(report.tiers.primary_aligned, 1);
    assert_eq!(report.tiers.secondary_converted_aligned, 1);
    assert_eq!(report.tiers.term_fallback, 1);
    assert_eq!(report.tiers.unresolved, 1);
    assert_eq!(report.labels_changed, 3);
    assert_eq!(report.source_hits.get("simp"), Some(&1));
    assert_eq!(report.source_hits.get("trad"), Some(&1));
    assert!(updates.load(Ordering::SeqCst) >= 3);

    let names: Vec<&str> = report.files.iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["korean.json", "korean_broken.json", "korean_menu.json"]);
    assert!(matches!(report.files[1].outcome, DocumentOutcome::LoadFailed { .. }));
    assert_eq!(report.files[2].sources_available, vec!["simp".to_string(), "trad".to_string()]);

    let menu = load_value(dir.path().join("out/simp_chinese_menu.json")).unwrap();
    assert_eq!(
        menu,
        json!({
            "m_Name": "simp_chinese_menu",
            "m_AssetBundleName": "simp_chinese",
            "m_Container": [{"first": "assets/format_msbt/si/simp_chinese/simp_chinese_menu.bytes", "second": {"m_PathID": 11}}],
            "labelDataArray": [
                {"labelIndex": 0, "labelName": "ok", "wordDataArray": [{"patternID": -1, "str": "确定", "strWidth": 40.0}]},
                {"labelIndex": 1, "labelName": "dex", "wordDataArray": [{"patternID": -1, "str": "图鉴", "strWidth": 40.0}]},
                {"labelIndex": 2, "labelName": "bag", "wordDataArray": [{"patternID": -1, "str": "背包", "strWidth": 40.0}]},
                {"labelIndex": 3, "labelName": "misc", "wordDataArray": [{"patternID": -1, "str": "무엇", "strWidth": 40.0}]}
            ]
        })
    );
    let keys: Vec<&String> = menu.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["m_Name", "m_AssetBundleName", "m_Container", "labelDataArray"]);

    let index = load_document(dir.path().join("out/simp_chinese.json")).unwrap();
    assert!(!index.has_labels());
    assert_eq!(index.identity_name.as_deref(), Some("simp_chinese"));
    assert_eq!(index.bundle_name.as_deref(), Some("simp_chinese"));

    assert!(!dir.path().join("out/simp_chinese_broken.json").exists());
}

#[test]
fn test_backfill_output_verifies_against_target() {
    let dir = tempdir().unwrap();
    let config = setup_backfill(dir.path());
    batch::backfill(&config, &|_| {}).unwrap();

    let report = batch::verify(
        &dir.path().join("out"),
        "simp_chinese",
        &dir.path().join("korean_export"),
        "korean",
    );
    assert_eq!(report.summary.files_checked, 2);
    assert!(report.is_ok());
}

#[test]
fn test_backfill_is_idempotent_on_inputs() {
    let dir = tempdir().unwrap();
    let config = setup_backfill(dir.path());
    batch::backfill(&config, &|_| {}).unwrap();
    let first = fs::read_to_string(dir.path().join("out/simp_chinese_menu.json")).unwrap();

    batch::backfill(&config, &|_| {}).unwrap();
    let second = fs::read_to_string(dir.path().join("out/simp_chinese_menu.json")).unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(dir.path().join("korean_export/korean_menu.json")).unwrap(), KOREAN_MENU);
}

fn setup_pairs(root: &Path) {
    write(
        &root.join("a/simp_chinese_a.json"),
        r#"{"labelDataArray":[{"labelName":"x","wordDataArray":[{"str":"第１","strWidth":10},{"str":"A","strWidth":5}]}],"status":"on"}"#,
    );
    write(
        &root.join("b/korean_a.json"),
        r#"{"labelDataArray":[{"labelName":"x","wordDataArray":[{"str":"第1","strWidth":12},{"str":"B","strWidth":5}]}],"status":"on"}"#,
    );
    write(&root.join("a/simp_chinese_b.json"), "{}");
    write(&root.join("a/simp_chinese_c.json"), "{");
    write(&root.join("b/korean_c.json"), "{}");
}

#[test]
fn test_analyze_directories() {
    let dir = tempdir().unwrap();
    setup_pairs(dir.path());

    let report = batch::analyze(
        &dir.path().join("a"),
        "simp_chinese",
        &dir.path().join("b"),
        "korean",
        &SuffixPolicy::default(),
        &|_| {},
    );

    assert_eq!(report.pairs.len(), 1);
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].file_a, "simp_chinese_c.json");
    assert_eq!(
        report.totals,
        DiffCounts {
            layout_width: 1,
            numeric_glyph_format: 1,
            content_other: 0,
            total: 2,
        }
    );
    let text = report.render_text();
    assert!(text.contains("Total non-text differences: 2"));
    assert!(text.contains("No other kind of non-text difference was found"));
}

#[test]
fn test_compare_directories() {
    let dir = tempdir().unwrap();
    setup_pairs(dir.path());

    let report = batch::compare(
        &dir.path().join("a"),
        "simp_chinese",
        &dir.path().join("b"),
        "korean",
        &|_| {},
    );

    assert_eq!(report.compared, 1);
    assert_eq!(report.files.len(), 1);
    assert_eq!(
        report.files[0].differences,
        vec![
            "under key 'labelDataArray' list index 0: under key 'wordDataArray' list index 0: key 'str' value differs: 第１ vs 第1".to_string(),
            "under key 'labelDataArray' list index 0: under key 'wordDataArray' list index 0: key 'strWidth' value differs: 10 vs 12".to_string(),
            "under key 'labelDataArray' list index 0: under key 'wordDataArray' list index 1: key 'str' value differs: A vs B".to_string(),
        ]
    );

    let out = dir.path().join("reports/compare.txt");
    batch::write_report(&out, &report.render_text()).unwrap();
    assert!(fs::read_to_string(out).unwrap().starts_with("JSON comparison results"));
}

#[test]
fn test_reformat_files() {
    let dir = tempdir().unwrap();
    write(&dir.path().join("x/a.json"), r#"{"a":"가","b":[1,2]}"#);
    write(&dir.path().join("x/broken.json"), "{oops");

    let files = batch::find_json_files(dir.path());
    let report = batch::reformat(&files, &|_| {});
    assert_eq!(report.success_count, 1);
    assert_eq!(report.fail_count(), 1);

    assert_eq!(
        fs::read_to_string(dir.path().join("x/a.json")).unwrap(),
        "{\n  \"a\": \"가\",\n  \"b\": [\n    1,\n    2\n  ]\n}\n"
    );
    assert_eq!(fs::read_to_string(dir.path().join("x/broken.json")).unwrap(), "{oops");
}
