//! Integration tests for target parsing and the merge engine.

use fmerge_core::{merge, merge_with_report, parse_targets, split_target_list, CoreError, DataMap};

fn data(entries: &[(&str, &str)]) -> DataMap {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

/// Properties file with an injected variable and a dev fragment.
#[test]
fn test_properties_end_to_end() {
    let original = data(&[
        ("app.properties", "a=1"),
        ("app-dev.properties", "b=2\n"),
        ("DB_HOST", "localhost"),
    ]);

    let targets = parse_targets(&["app.properties,DB_HOST=db.host"]);
    let result = merge(&original, &targets).unwrap();

    assert_eq!(
        result,
        data(&[("app.properties", "a=1\ndb.host=localhost\nb=2\n")])
    );
}

/// A target key without an extension aborts the whole merge.
#[test]
fn test_target_without_extension_aborts() {
    let original = data(&[("app.properties", "a=1"), ("config", "x=1")]);
    let targets = parse_targets(&["app.properties", "config"]);

    let err = merge(&original, &targets).unwrap_err();
    assert_eq!(err, CoreError::MissingExtension("config".to_string()));
    assert!(err.to_string().contains("no file extension"));
}

/// Every merged fragment is removed and appears once, verbatim.
#[test]
fn test_fragments_consumed_and_present_once() {
    let original = data(&[
        ("logback.xml", "<configuration>\n"),
        ("logback-appenders.xml", "  <appender/>\n"),
        ("logback-loggers.xml", "  <logger/>"),
        ("application.yaml", "server:\n  port: 8080\n"),
    ]);

    let (result, report) = merge_with_report(&original, &parse_targets(&["logback.xml"])).unwrap();

    let merged = &result["logback.xml"];
    for fragment in ["logback-appenders.xml", "logback-loggers.xml"] {
        assert!(!result.contains_key(fragment));
        assert_eq!(merged.matches(original[fragment].as_str()).count(), 1);
    }
    assert_eq!(merged, "<configuration>\n  <appender/>\n  <logger/>");
    assert_eq!(result["application.yaml"], original["application.yaml"]);
    assert_eq!(report.applied[0].fragments.len(), 2);
}

/// Newline-terminated units never produce a blank line; others get exactly one separator.
#[test]
fn test_newline_boundaries() {
    let original = data(&[
        ("a.conf", "x\n"),
        ("a1.conf", "y\n"),
        ("a2.conf", "z"),
        ("a3.conf", "w"),
    ]);
    let result = merge(&original, &parse_targets(&["a.conf"])).unwrap();

    assert_eq!(result["a.conf"], "x\ny\nz\nw");
    assert!(!result["a.conf"].contains("\n\n"));
}

/// Each injected variable produces exactly one `label=value` line.
#[test]
fn test_variables_injected_once_in_rule_order() {
    let original = data(&[
        ("db.properties", "driver=pg"),
        ("DB_USER", "admin"),
        ("DB_PASS", "secret"),
        ("DB_NAME", ""),
    ]);
    let targets = parse_targets(&["db.properties,DB_USER=db.user,DB_PASS,DB_NAME=db.name,DB_MISSING"]);

    let result = merge(&original, &targets).unwrap();

    assert_eq!(
        result,
        data(&[("db.properties", "driver=pg\ndb.user=admin\nDB_PASS=secret\ndb.name=")])
    );
}

/// Targets from the single joined-argument form behave like repeated flags.
#[test]
fn test_joined_and_repeated_forms_agree() {
    let original = data(&[
        ("a.yaml", "a: 1"),
        ("a-extra.yaml", "e: 1"),
        ("b.properties", "b=1"),
        ("B_VAR", "v"),
    ]);

    let repeated = parse_targets(&["a.yaml", "b.properties,B_VAR=b.var"]);
    let joined = parse_targets(&split_target_list("a.yaml b.properties,B_VAR=b.var"));

    assert_eq!(repeated, joined);
    assert_eq!(
        merge(&original, &joined).unwrap(),
        data(&[("a.yaml", "a: 1\ne: 1"), ("b.properties", "b=1\nb.var=v")])
    );
}

/// The engine never mutates its input.
#[test]
fn test_original_untouched() {
    let original = data(&[("app.properties", "a=1"), ("app-x.properties", "b=2")]);
    let snapshot = original.clone();

    let _ = merge(&original, &parse_targets(&["app.properties"])).unwrap();
    assert_eq!(original, snapshot);
}
