//! Integration tests for the full split pipeline with real files.

use chatsplit::config::TemplatedConfig;
use chatsplit::core::template::split_template;
use chatsplit::prelude::*;
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{TempDir, tempdir};

const HEAD: &str = "<!DOCTYPE html>\n<html>\n<head><title>ChatGPT Data Export</title></head>\n<body>\n<script>\n";
const TAIL: &str = "function render() { /* viewer */ }\n</script>\n</body>\n</html>\n";

fn templated_doc(records: &Value) -> String {
    format!(
        "{HEAD}var jsonData = {};\nvar assetsJson = {{\"file-1\": \"data:image/png;base64,AAAA\"}};\n{TAIL}",
        serde_json::to_string(records).unwrap()
    )
}

fn write_input(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

fn split_templated(input: &Path, out: &Path) -> SplitReport {
    split_export(&TemplatedExtractor::new(), input, out, None).unwrap()
}

fn split_plain(input: &Path, out: &Path) -> SplitReport {
    split_export(&PlainExtractor::new(), input, out, None).unwrap()
}

// =========================================================================
// Scenarios
// =========================================================================

#[test]
fn test_single_record_templated_export() {
    let dir = tempdir().unwrap();
    let input = write_input(
        &dir,
        "chat.html",
        "var jsonData = [{\"title\":\"Hello World\",\"messages\":[]}];\nvar assetsJson = {};",
    );
    let out = dir.path().join("split_chats");

    let report = split_templated(&input, &out);
    assert!(report.is_success());
    assert_eq!(file_names(&out), vec!["Hello_World.html"]);
}

#[test]
fn test_duplicate_titles_get_numbered() {
    let dir = tempdir().unwrap();
    let input = write_input(
        &dir,
        "chat.html",
        &templated_doc(&json!([{"title": "Q&A"}, {"title": "Q&A"}])),
    );
    let out = dir.path().join("out");

    let report = split_templated(&input, &out);
    assert_eq!(report.written, vec![out.join("Q&A.html"), out.join("Q&A_2.html")]);
}

#[test]
fn test_truncated_payload_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = write_input(
        &dir,
        "chat.html",
        "<script>\nvar jsonData = [{\"title\": \"A\"}, {\"title\":\nvar assetsJson = {};\n</script>",
    );
    let out = dir.path().join("out");

    let err = split_export(&TemplatedExtractor::new(), &input, &out, None).unwrap_err();
    assert!(err.is_malformed_payload());
    assert!(!out.exists());

    assert!(!run_split(ExportFormat::Templated, &input, &out, false));
    assert!(!out.exists());
}

#[test]
fn test_plain_text_segment_body() {
    let dir = tempdir().unwrap();
    let input = write_input(
        &dir,
        "conversations.json",
        r#"[{"name": "Greeting", "chat_messages": [{"sender": "human", "content": [{"type": "text", "text": "hi"}]}]}]"#,
    );
    let out = dir.path().join("claude_chats");

    let report = split_plain(&input, &out);
    assert!(report.is_success());
    let html = fs::read_to_string(out.join("Greeting.html")).unwrap();
    assert!(html.contains("<p><b>human:</b> hi</p>"));
}

// =========================================================================
// Properties on a realistic export
// =========================================================================

fn realistic_records() -> Value {
    json!([
        {"title": "Trip planning", "create_time": 1700000000.5, "mapping": {"a": {"message": {"content": {"parts": ["Paris?"]}}}}},
        {"title": "Trip planning", "mapping": {}},
        {"title": "What is 2/3?", "mapping": {}},
        {"mapping": {}},
        {"title": "Привет 🎉", "mapping": {"b": {"message": null}}},
        {"title": "", "mapping": {}}
    ])
}

#[test]
fn test_every_record_round_trips() {
    let dir = tempdir().unwrap();
    let records = realistic_records();
    let input = write_input(&dir, "chat.html", &templated_doc(&records));
    let out = dir.path().join("out");

    let report = split_templated(&input, &out);
    let originals = records.as_array().unwrap();
    assert_eq!(report.total, originals.len());
    assert_eq!(report.written.len(), originals.len());

    let extractor = TemplatedExtractor::new();
    for (path, original) in report.written.iter().zip(originals) {
        let doc = fs::read_to_string(path).unwrap();
        let export = extractor.split(&doc).unwrap();
        let reparsed = extractor.parse(&export.payload).unwrap();
        assert_eq!(reparsed, vec![original.clone()], "{}", path.display());
    }
}

#[test]
fn test_numbers_survive_reembedding_digit_for_digit() {
    let dir = tempdir().unwrap();
    let stamps: Vec<String> = (0..200)
        .map(|i| format!("1703000{:03}.{:07}", i, (7_919 + i * 104_729) % 10_000_000))
        .collect();
    let records: Vec<String> = stamps
        .iter()
        .enumerate()
        .map(|(i, ts)| {
            format!(
                r#"{{"title":"T{i}","create_time":{ts},"update_time":1.7030000370007919e9,"big":12345678901234567890123}}"#
            )
        })
        .collect();
    let doc = format!("<script>\nvar jsonData = [{}];\nvar assetsJson = {{}};\n</script>\n", records.join(","));
    let input = write_input(&dir, "chat.html", &doc);
    let out = dir.path().join("out");

    let report = split_templated(&input, &out);
    assert_eq!(report.written.len(), stamps.len());

    let extractor = TemplatedExtractor::new();
    for ((path, ts), record) in report.written.iter().zip(&stamps).zip(&records) {
        let output = fs::read_to_string(path).unwrap();
        assert!(output.contains(&format!("\"create_time\": {ts}")), "{}", path.display());
        assert!(output.contains("\"update_time\": 1.7030000370007919e9"));
        assert!(output.contains("\"big\": 12345678901234567890123"));

        let reparsed = extractor.parse(&extractor.split(&output).unwrap().payload).unwrap();
        let original = extractor.parse(&format!("[{record}]")).unwrap();
        assert_eq!(reparsed, original);
    }
}

#[test]
fn test_output_names_for_realistic_export() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "chat.html", &templated_doc(&realistic_records()));
    let out = dir.path().join("out");

    let report = split_templated(&input, &out);
    let names: Vec<String> = report
        .written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "Trip_planning.html",
            "Trip_planning_2.html",
            "What_is_23.html",
            "Untitled_Chat_4.html",
            "Привет_🎉.html",
            "Untitled_Chat_6.html",
        ]
    );
}

#[test]
fn test_template_is_copied_verbatim() {
    let dir = tempdir().unwrap();
    let doc = templated_doc(&realistic_records());
    let input = write_input(&dir, "chat.html", &doc);
    let out = dir.path().join("out");

    let report = split_templated(&input, &out);
    let split = split_template(&doc, &TemplatedConfig::default()).unwrap();
    let payload_start = doc.find("var jsonData = ").unwrap() + "var jsonData = ".len();
    let assets_start = doc.find("var assetsJson = ").unwrap();

    assert_eq!(split.template.prefix, doc[..payload_start]);
    assert_eq!(split.template.suffix, doc[assets_start..]);
    for path in &report.written {
        let output = fs::read_to_string(path).unwrap();
        assert!(output.starts_with(&doc[..payload_start]));
        assert!(output.ends_with(&doc[assets_start..]));
    }
}

#[test]
fn test_missing_title_fallbacks() {
    let dir = tempdir().unwrap();
    let templated = write_input(&dir, "chat.html", &templated_doc(&json!([{"title": "A"}, {}])));
    let plain = write_input(
        &dir,
        "conversations.json",
        r#"[{"name": "A", "chat_messages": []}, {"chat_messages": []}]"#,
    );

    let out = dir.path().join("templated");
    split_templated(&templated, &out);
    assert_eq!(file_names(&out), vec!["A.html", "Untitled_Chat_2.html"]);

    let out = dir.path().join("plain");
    let report = split_plain(&plain, &out);
    assert_eq!(file_names(&out), vec!["A.html"]);
    assert_eq!(report.skipped, vec![2]);
    assert_eq!(report.processed(), 2);
    assert!(report.is_success());
}

// =========================================================================
// Re-runs and pre-existing output
// =========================================================================

#[test]
fn test_second_run_never_overwrites() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "chat.html", &templated_doc(&json!([{"title": "Notes"}])));
    let out = dir.path().join("out");

    split_templated(&input, &out);
    let report = split_templated(&input, &out);
    assert_eq!(report.written, vec![out.join("Notes_2.html")]);
    assert_eq!(file_names(&out), vec!["Notes.html", "Notes_2.html"]);
}

#[test]
fn test_nested_output_dir_is_created() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "conversations.json", r#"[{"name": "Deep"}]"#);
    let out = dir.path().join("a").join("b").join("c");

    let report = split_plain(&input, &out);
    assert_eq!(report.written, vec![out.join("Deep.html")]);
}

#[test]
fn test_format_entry_points_report_success() {
    let dir = tempdir().unwrap();
    let templated = write_input(&dir, "chat.html", &templated_doc(&json!([{"title": "One"}])));
    let plain = write_input(&dir, "conversations.json", r#"[{"name": "Two"}]"#);

    assert!(chatsplit::core::split_templated_export(&templated, dir.path().join("t"), false));
    assert!(chatsplit::core::split_plain_export(&plain, dir.path().join("p"), false));
    assert!(!chatsplit::core::split_plain_export(dir.path().join("missing.json"), dir.path().join("m"), false));
}

#[test]
fn test_verbose_does_not_change_output() {
    let dir = tempdir().unwrap();
    let input = write_input(&dir, "chat.html", &templated_doc(&realistic_records()));

    assert!(run_split(ExportFormat::Templated, &input, &dir.path().join("quiet"), false));
    assert!(run_split(ExportFormat::Templated, &input, &dir.path().join("loud"), true));

    let quiet = file_names(&dir.path().join("quiet"));
    assert_eq!(quiet, file_names(&dir.path().join("loud")));
    for name in &quiet {
        assert_eq!(
            fs::read(dir.path().join("quiet").join(name)).unwrap(),
            fs::read(dir.path().join("loud").join(name)).unwrap()
        );
    }
}
