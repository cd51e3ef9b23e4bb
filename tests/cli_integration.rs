//! CLI integration tests for gnquery.
//!
//! These tests run the binary against description files written to a
//! temporary repository.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the gnquery binary command, isolated from the user's config.
fn gnquery(root: &Path) -> Command {
    let mut cmd = Command::cargo_bin("gnquery").unwrap();
    cmd.current_dir(root).env("HOME", root).env("NO_COLOR", "1");
    cmd
}

/// Create a temporary repository root.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write_file(root: &Path, rel: &str, contents: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, contents).unwrap();
    path
}

const FOREACH_BUILD: &str = r#"
[[statement]]
op = "declare"
type = "action_foreach"
name = "gen"
sources = ["a.idl", "b.idl"]
outputs = ["{{source_gen_dir}}/{{source_name_part}}.h"]

[[statement]]
op = "call"
function = "get_target_outputs"
args = [":gen"]
"#;

// ============================================================================
// gnquery eval
// ============================================================================

#[test]
fn test_eval_prints_outputs() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);

    gnquery(tmp.path())
        .args(["eval", "foo/BUILD.toml"])
        .assert()
        .success()
        .stdout("//out/Debug/gen/foo/a.h\n//out/Debug/gen/foo/b.h\n");
}

#[test]
fn test_eval_json() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);

    gnquery(tmp.path())
        .args(["eval", "--json", "foo/BUILD.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file\": \"//foo/BUILD.toml\""))
        .stdout(predicate::str::contains("\"//out/Debug/gen/foo/b.h\""));
}

#[test]
fn test_eval_build_dir_flag() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);

    gnquery(tmp.path())
        .args(["--build-dir", "//out/Release", "eval", "foo/BUILD.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("//out/Release/gen/foo/a.h"));
}

#[test]
fn test_eval_project_config() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);
    write_file(
        tmp.path(),
        ".gnquery/config.toml",
        "[build]\nbuild_dir = \"//out/cfg\"\n",
    );

    gnquery(tmp.path())
        .args(["eval", "foo/BUILD.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("//out/cfg/gen/foo/a.h"));
}

#[test]
fn test_eval_secondary_toolchain() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);

    gnquery(tmp.path())
        .args(["--toolchain", "//build/toolchain:arm", "eval", "foo/BUILD.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("//out/Debug/arm/gen/foo/a.h"));
}

#[test]
fn test_eval_call_before_declaration_fails() {
    let tmp = temp_dir();
    write_file(
        tmp.path(),
        "BUILD.toml",
        r#"
[[statement]]
op = "call"
function = "get_target_outputs"
args = [":late"]

[[statement]]
op = "declare"
type = "action"
name = "late"
outputs = ["//out/Debug/late.txt"]
"#,
    );

    gnquery(tmp.path())
        .args(["eval", "BUILD.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Target not found in this context."))
        .stderr(predicate::str::contains("//BUILD.toml:2"));
}

#[test]
fn test_eval_unsupported_kind_fails() {
    let tmp = temp_dir();
    write_file(
        tmp.path(),
        "BUILD.toml",
        r#"
[[statement]]
op = "declare"
type = "executable"
name = "app"

[[statement]]
op = "call"
function = "get_target_outputs"
args = [":app"]
"#,
    );

    gnquery(tmp.path())
        .args(["eval", "BUILD.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Target is not an action, action_foreach, generated_file, or copy.",
        ));
}

#[test]
fn test_eval_multiple_files() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);
    write_file(tmp.path(), "bar/BUILD.toml", FOREACH_BUILD);

    gnquery(tmp.path())
        .args(["eval", "-j", "2", "foo/BUILD.toml", "bar/BUILD.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("//out/Debug/gen/foo/a.h"))
        .stdout(predicate::str::contains("//out/Debug/gen/bar/b.h"));
}

#[test]
fn test_eval_missing_file() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["eval", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read build description"));
}

// ============================================================================
// gnquery outputs
// ============================================================================

#[test]
fn test_outputs_explicit() {
    let tmp = temp_dir();
    write_file(
        tmp.path(),
        "foo/BUILD.toml",
        r#"
[[statement]]
op = "declare"
type = "action"
name = "gen"
outputs = ["//out/Debug/foo/x.txt", "//out/Debug/y.txt"]
"#,
    );

    gnquery(tmp.path())
        .args(["outputs", "foo/BUILD.toml", "//foo:gen"])
        .assert()
        .success()
        .stdout("//out/Debug/foo/x.txt\n//out/Debug/y.txt\n");
}

#[test]
fn test_outputs_unknown_label() {
    let tmp = temp_dir();
    write_file(tmp.path(), "foo/BUILD.toml", FOREACH_BUILD);

    gnquery(tmp.path())
        .args(["outputs", "foo/BUILD.toml", ":missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not found"));
}

// ============================================================================
// gnquery expand
// ============================================================================

#[test]
fn test_expand_template() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args([
            "expand",
            "--dir",
            "//foo/",
            "-t",
            "{{source_out_dir}}/{{source_name_part}}.o",
            "-t",
            "{{source_file_part}}",
            "a.c",
        ])
        .assert()
        .success()
        .stdout("//out/Debug/obj/foo/a.o\n//out/Debug/a.c\n");
}

#[test]
fn test_expand_rejects_target_relative() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["expand", "-t", "{{source_target_relative}}", "a.c"])
        .assert()
        .failure();
}

// ============================================================================
// gnquery label
// ============================================================================

#[test]
fn test_label_relative() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["label", "--dir", "//foo/", "../bar:baz"])
        .assert()
        .success()
        .stdout("//bar:baz(//build/toolchain:default)\n");
}

#[test]
fn test_label_implicit_name_without_toolchain() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["label", "--no-toolchain", "//foo/bar"])
        .assert()
        .success()
        .stdout("//foo/bar:bar\n");
}

#[test]
fn test_label_syntax_error() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["label", "//foo:"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// ============================================================================
// gnquery help
// ============================================================================

#[test]
fn test_help_lists_functions() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .arg("help")
        .assert()
        .success()
        .stdout(predicate::str::contains("get_target_outputs"))
        .stdout(predicate::str::contains("process_file_template"))
        .stdout(predicate::str::contains("source_expansion"));
}

#[test]
fn test_help_topic() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["help", "source_expansion"])
        .assert()
        .success()
        .stdout(predicate::str::contains("{{source_gen_dir}}"));
}

#[test]
fn test_help_unknown_topic() {
    let tmp = temp_dir();

    gnquery(tmp.path())
        .args(["help", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no help topic"));
}
