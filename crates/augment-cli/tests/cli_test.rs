//! Integration tests for the `augment` binary.

use std::path::Path;
use std::process::{Command, Output};

const POINT: &str = r#"@Value
class Point {
  x: number;
  y: number;
}

const p = new Point(1, 2);
console.log(p.toString());
console.log(p.equals(new Point(1, 2)));
"#;

fn augment(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_augment"))
        .args(args)
        .current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("AUGMENT_LOG")
        .output()
        .expect("failed to run augment")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_expand_to_stdout() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("point.ts"), POINT).unwrap();

    let output = augment(dir.path(), &["expand", "point.ts"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.starts_with("class Point {\n  constructor(x: number, y: number) {\n"));
    assert!(text.contains("  readonly x: number;\n  readonly y: number;\n"));
    assert!(text.contains("Object.freeze(this);"));
    assert!(text.contains("equals(other: any): boolean {"));
    assert!(text.contains("hashCode(): number {"));
    assert!(!text.contains("@Value"));
}

#[test]
fn test_run_evaluates_expanded_module() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("point.ts"), POINT).unwrap();

    let output = augment(dir.path(), &["run", "point.ts"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "Point(x=1, y=2)\ntrue\n");
}

#[test]
fn test_run_reports_uncaught_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("user.ts"),
        r#"@AllArgsConstructor
class User {
  @NonNull name: string;
}
console.log("before");
new User(null);
"#,
    )
    .unwrap();

    let output = augment(dir.path(), &["run", "user.ts"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "before\n");
    assert!(stderr(&output).contains("name cannot be null or undefined"));
}

#[test]
fn test_check_mode() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("plain.ts"), "class Plain {\n  x: number;\n}\n").unwrap();

    let clean = augment(dir.path(), &["expand", "--check", "."]);
    assert_eq!(clean.status.code(), Some(0), "stderr: {}", stderr(&clean));

    std::fs::write(dir.path().join("point.ts"), POINT).unwrap();
    let dirty = augment(dir.path(), &["expand", "--check", "."]);
    assert_eq!(dirty.status.code(), Some(1));
    assert!(stdout(&dirty).contains("point.ts"));
    assert!(!stdout(&dirty).contains("plain.ts"));
}

#[test]
fn test_out_dir_preserves_layout() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir_all(src.join("models")).unwrap();
    std::fs::write(src.join("models/point.ts"), POINT).unwrap();

    let output = augment(dir.path(), &["expand", "src", "--out-dir", "out"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let written = std::fs::read_to_string(dir.path().join("out/models/point.ts")).unwrap();
    assert!(written.contains("toString(): string {"));
}

#[test]
fn test_out_dir_copies_unmarked_files_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("src");
    std::fs::create_dir_all(&src).unwrap();
    let plain = "// helpers\nclass Plain {\n    x: number; // kept\n}\n";
    std::fs::write(src.join("plain.ts"), plain).unwrap();
    std::fs::write(src.join("point.ts"), POINT).unwrap();

    let output = augment(dir.path(), &["expand", "src", "--out-dir", "out"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let copied = std::fs::read_to_string(dir.path().join("out/plain.ts")).unwrap();
    assert_eq!(copied, plain);
    let expanded = std::fs::read_to_string(dir.path().join("out/point.ts")).unwrap();
    assert!(expanded.contains("equals(other: any): boolean {"));
}

#[test]
fn test_json_reports() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("point.ts"), POINT).unwrap();

    let output = augment(dir.path(), &["expand", "point.ts", "--format", "json"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let reports: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let class = &reports[0]["classes"][0];
    assert_eq!(reports[0]["changed"], true);
    assert_eq!(class["name"], "Point");
    assert_eq!(class["markers"][0], "Value");
    assert!(class["generated"]
        .as_array()
        .unwrap()
        .iter()
        .any(|member| member == "equals"));
}

#[test]
fn test_parse_error_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.ts"), "class {\n}\n").unwrap();

    let output = augment(dir.path(), &["expand", "broken.ts"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("class declaration requires a name"));
    assert!(err.contains("broken.ts:1:"));
}

#[test]
fn test_config_file_disables_marker() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("augment.toml"), "disabled = [\"ToString\"]\n").unwrap();
    std::fs::write(
        dir.path().join("a.ts"),
        "@ToString\n@Getter\nclass A {\n  x: number;\n}\n",
    )
    .unwrap();

    let output = augment(dir.path(), &["expand", "a.ts"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let text = stdout(&output);
    assert!(text.starts_with("@ToString\nclass A {"));
    assert!(text.contains("getX(): number {"));
}

#[test]
fn test_markers_listing() {
    let dir = tempfile::tempdir().unwrap();
    let output = augment(dir.path(), &["markers"]);
    assert!(output.status.success());

    let text = stdout(&output);
    let value = text.find("@Value").unwrap();
    let log = text.find("@Log").unwrap();
    assert!(value < log);
    assert!(text.contains("@NonNull"));
}
