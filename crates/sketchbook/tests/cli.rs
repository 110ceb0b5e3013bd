use std::process::Command;

fn sketchbook() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sketchbook"));
    command.env("RUST_LOG", "warn");
    command
}

#[test]
fn list_json_hides_placeholders_by_default() {
    let output = sketchbook().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = entries
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["id"].as_str().unwrap())
        .collect();
    assert_eq!(
        ids,
        ["circle", "spiral", "fractal", "wave", "lissajous", "polygon", "sierpinski"]
    );
}

#[test]
fn list_all_includes_placeholders() {
    let output = sketchbook().args(["list", "--json", "--all"]).output().unwrap();
    assert!(output.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 11);
    assert_eq!(entries[5]["id"], "rose");
    assert_eq!(entries[5]["placeholder"], true);
}

#[test]
fn render_writes_a_png() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("spiral.png");
    let output = sketchbook()
        .args(["render", "spiral", "--frames", "5", "--width", "320", "--out"])
        .arg(&out)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn render_unknown_artwork_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = sketchbook()
        .args(["render", "teapot", "--out"])
        .arg(dir.path().join("teapot.png"))
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown artwork 'teapot'"));
}

#[test]
fn where_honours_the_config_dir_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = sketchbook()
        .arg("where")
        .env("SKETCHBOOK_CONFIG_DIR", dir.path())
        .env_remove("SKETCHBOOK_CONFIG")
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(&dir.path().join("sketchbook.toml").display().to_string()));
    assert!(stdout.contains("missing"));
}
