//! CLI integration tests for Shadowr
//!
//! These tests drive the binary from initialization through editing,
//! import, export and history, checking the commands work together.

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const INITIAL: &str = "5px 5px 15px 0px rgba(0, 0, 0, 0.20)";

/// Get a command instance for the shadowr binary
fn shadowr_cmd() -> assert_cmd::Command {
    assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shadowr"))
}

/// Create a temporary directory and initialize a shadowr workspace
fn setup_workspace() -> TempDir {
    let dir = TempDir::new().unwrap();
    shadowr_cmd().arg("init").arg(dir.path()).assert().success();
    dir
}

/// Run a command inside the workspace and return its stdout
fn run_ok(dir: &TempDir, args: &[&str]) -> String {
    let out = shadowr_cmd()
        .current_dir(dir.path())
        .args(args)
        .output()
        .unwrap();
    assert!(
        out.status.success(),
        "{:?} failed: {}",
        args,
        String::from_utf8_lossy(&out.stderr)
    );
    String::from_utf8(out.stdout).unwrap()
}

fn show(dir: &TempDir) -> String {
    run_ok(dir, &["show"]).trim_end().to_string()
}

// =============================================================================
// Initialization Tests
// =============================================================================

#[test]
fn test_init_creates_structure() {
    let dir = TempDir::new().unwrap();

    shadowr_cmd()
        .arg("init")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized shadowr workspace"));

    assert!(dir.path().join(".shadowr").is_dir());
    assert!(dir.path().join(".shadowr/store").is_dir());
    assert!(dir.path().join(".shadowr/config.toml").is_file());
}

#[test]
fn test_init_is_idempotent() {
    let dir = TempDir::new().unwrap();

    shadowr_cmd().arg("init").arg(dir.path()).assert().success();
    shadowr_cmd().arg("init").arg(dir.path()).assert().success();
}

#[test]
fn test_commands_outside_workspace_fail() {
    let dir = TempDir::new().unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .arg("show")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not in a shadowr workspace"));
}

#[test]
fn test_fresh_workspace_shows_initial_layer() {
    let dir = setup_workspace();

    assert_eq!(show(&dir), INITIAL);
}

// =============================================================================
// Layer Tests
// =============================================================================

#[test]
fn test_layer_add_uses_config_defaults() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["layer", "add"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added layer l-"));

    assert_eq!(
        show(&dir),
        format!("{},\n  0px 4px 8px 0px rgba(0, 0, 0, 0.15)", INITIAL)
    );
}

#[test]
fn test_layer_add_stops_at_max_layers() {
    let dir = setup_workspace();

    for _ in 0..5 {
        run_ok(&dir, &["layer", "add"]);
    }

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["layer", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("6"));
}

#[test]
fn test_layer_remove_keeps_last_layer() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["layer", "remove", "1"])
        .assert()
        .failure();

    assert_eq!(show(&dir), INITIAL);
}

#[test]
fn test_layer_set_updates_values() {
    let dir = setup_workspace();

    run_ok(
        &dir,
        &[
            "layer", "set", "1", "--x", "-4", "--y", "8", "--color", "#3b82f6", "--opacity", "40",
            "--inset",
        ],
    );

    assert_eq!(show(&dir), "inset -4px 8px 15px 0px rgba(59, 130, 246, 0.40)");
}

#[test]
fn test_layer_set_clamps_blur_and_opacity() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "set", "1", "--blur", "-5", "--opacity", "150"]);

    assert_eq!(show(&dir), "5px 5px 0px 0px rgba(0, 0, 0, 1.00)");
}

#[test]
fn test_layer_set_rejects_bad_color() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["layer", "set", "1", "--color", "red"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid color"));
}

#[test]
fn test_layer_toggle_disables_output() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "toggle", "1"]);
    assert_eq!(show(&dir), "none");

    run_ok(&dir, &["layer", "toggle", "1"]);
    assert_eq!(show(&dir), INITIAL);
}

#[test]
fn test_layer_duplicate_and_move() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "set", "1", "--x", "1"]);
    run_ok(&dir, &["layer", "duplicate", "1"]);
    run_ok(&dir, &["layer", "set", "2", "--x", "2"]);
    run_ok(&dir, &["layer", "move", "2", "1"]);

    let css = show(&dir);
    assert!(css.starts_with("2px 5px"), "{}", css);
    assert!(css.ends_with("1px 5px 15px 0px rgba(0, 0, 0, 0.20)"), "{}", css);
}

#[test]
fn test_locked_layer_rejects_edits() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "lock", "1"]);

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["layer", "set", "1", "--x", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("locked"));

    run_ok(&dir, &["layer", "unlock", "1"]);
    run_ok(&dir, &["layer", "set", "1", "--x", "9"]);
    assert!(show(&dir).starts_with("9px"));
}

#[test]
fn test_layer_list_json() {
    let dir = setup_workspace();

    let out = run_ok(&dir, &["--format", "json", "layer", "list"]);
    let rows: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(rows.as_array().unwrap().len(), 1);
    assert_eq!(rows[0]["position"], 1);
    assert_eq!(rows[0]["offsetX"], 5);
    assert_eq!(rows[0]["opacity"], 20);
    assert_eq!(rows[0]["locked"], false);
    assert!(rows[0]["id"].as_str().unwrap().starts_with("l-"));
}

// =============================================================================
// Import / Parse Tests
// =============================================================================

#[test]
fn test_import_replaces_layers() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args([
            "import",
            "box-shadow: 0px 4px 6px 0px rgba(0, 0, 0, 0.1), inset 0px 0px 0px 2px #3b82f6;",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 2 layer(s)"));

    assert_eq!(
        show(&dir),
        "0px 4px 6px 0px rgba(0, 0, 0, 0.10),\n  inset 0px 0px 0px 2px rgba(59, 130, 246, 1.00)"
    );
}

#[test]
fn test_import_from_stdin() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["import", "--stdin"])
        .write_stdin("3px 3px 0px 0px #ff0000\n")
        .assert()
        .success();

    assert_eq!(show(&dir), "3px 3px 0px 0px rgba(255, 0, 0, 1.00)");
}

#[test]
fn test_import_garbage_leaves_state_unchanged() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["import", "not a shadow"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse CSS. Check the format."));

    assert_eq!(show(&dir), INITIAL);
}

#[test]
fn test_import_none_fails() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["import", "none"])
        .assert()
        .failure();
}

#[test]
fn test_parse_works_outside_workspace() {
    let dir = TempDir::new().unwrap();

    let out = shadowr_cmd()
        .current_dir(dir.path())
        .args(["--format", "json", "parse", "2px 2px 4px 0px rgba(255, 0, 0, 0.5)"])
        .output()
        .unwrap();
    assert!(out.status.success());

    let layers: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(layers[0]["color"], "#ff0000");
    assert_eq!(layers[0]["opacity"], 50);
    assert_eq!(layers[0]["css"], "2px 2px 4px 0px rgba(255, 0, 0, 0.50)");
}

#[test]
fn test_parse_verbose_reports_skipped_clauses() {
    let dir = TempDir::new().unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["--verbose", "parse", "1px 1px 0px 0px #000000, garbage"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipped clause: garbage"));
}

// =============================================================================
// Export Tests
// =============================================================================

#[test]
fn test_export_css_default() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .arg("export")
        .assert()
        .success()
        .stdout(format!("box-shadow: {};\n", INITIAL));
}

#[test]
fn test_export_tailwind() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["export", "--as", "tailwind"])
        .assert()
        .success()
        .stdout("shadow-[5px_5px_15px_0px_rgba(0,_0,_0,_0.20)]\n");
}

#[test]
fn test_export_from_css_outside_workspace() {
    let dir = TempDir::new().unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["export", "--as", "react", "--from", "1px 2px 3px 4px #000000"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "boxShadow: '1px 2px 3px 4px rgba(0, 0, 0, 1.00)'",
        ));
}

#[test]
fn test_export_uses_configured_names() {
    let dir = setup_workspace();

    let config_path = dir.path().join(".shadowr/config.toml");
    let config = fs::read_to_string(&config_path)
        .unwrap()
        .replace("variable_name = \"shadow-custom\"", "variable_name = \"card-shadow\"");
    fs::write(&config_path, config).unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["export", "--as", "css-var"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--card-shadow: "))
        .stdout(predicate::str::contains("var(--card-shadow)"));
}

#[test]
fn test_export_to_file() {
    let dir = setup_workspace();
    let target = dir.path().join("shadow.scss");

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["export", "--as", "scss", "-o"])
        .arg(&target)
        .assert()
        .success();

    let content = fs::read_to_string(&target).unwrap();
    assert!(content.starts_with(&format!("$shadow-custom: {};", INITIAL)));
}

#[test]
fn test_export_json_wraps_code() {
    let dir = setup_workspace();

    let out = run_ok(&dir, &["--format", "json", "export", "--as", "css"]);
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();

    assert_eq!(value["format"], "css");
    assert_eq!(value["code"], format!("box-shadow: {};", INITIAL));
}

#[test]
fn test_export_reports_invalid_workspace_config() {
    let dir = setup_workspace();
    fs::write(dir.path().join(".shadowr/config.toml"), "max_layers = 0\n").unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .arg("export")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workspace config"));

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["export", "--from", "1px 1px 0px 0px #000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid workspace config"));
}

#[test]
fn test_invalid_default_color_is_rejected() {
    let dir = setup_workspace();

    let config_path = dir.path().join(".shadowr/config.toml");
    let config = fs::read_to_string(&config_path)
        .unwrap()
        .replace("color = \"#000000\"", "color = \"black\"");
    fs::write(&config_path, config).unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["layer", "add"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("layer_defaults.color"));
}

// =============================================================================
// Preset Tests
// =============================================================================

#[test]
fn test_preset_list_includes_builtins() {
    let dir = TempDir::new().unwrap();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["preset", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Subtle"))
        .stdout(predicate::str::contains("Deep Inset"));
}

#[test]
fn test_preset_apply_is_case_insensitive() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["preset", "apply", "subtle"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applied preset Subtle"));

    assert_eq!(show(&dir), "0px 1px 3px 0px rgba(0, 0, 0, 0.12)");
}

#[test]
fn test_custom_preset_save_apply_delete() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "set", "1", "--x", "11"]);
    run_ok(&dir, &["preset", "save", "Mine"]);
    run_ok(&dir, &["preset", "apply", "Subtle"]);
    run_ok(&dir, &["preset", "apply", "mine"]);
    assert!(show(&dir).starts_with("11px"));

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["preset", "save", "mine"])
        .assert()
        .failure();

    run_ok(&dir, &["preset", "delete", "Mine"]);
    shadowr_cmd()
        .current_dir(dir.path())
        .args(["preset", "apply", "Mine"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Preset not found"));
}

// =============================================================================
// History Tests
// =============================================================================

#[test]
fn test_undo_redo_round_trip() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "set", "1", "--x", "7"]);
    assert!(show(&dir).starts_with("7px"));

    run_ok(&dir, &["undo"]);
    assert_eq!(show(&dir), INITIAL);

    run_ok(&dir, &["redo"]);
    assert!(show(&dir).starts_with("7px"));
}

#[test]
fn test_undo_without_history() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .arg("undo")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to undo"));
}

#[test]
fn test_snapshot_save_and_restore() {
    let dir = setup_workspace();

    run_ok(&dir, &["snapshot", "save", "base"]);
    run_ok(&dir, &["preset", "apply", "Float"]);
    assert_ne!(show(&dir), INITIAL);

    run_ok(&dir, &["snapshot", "restore", "base"]);
    assert_eq!(show(&dir), INITIAL);

    run_ok(&dir, &["snapshot", "delete", "1"]);
    shadowr_cmd()
        .current_dir(dir.path())
        .args(["snapshot", "restore", "base"])
        .assert()
        .failure();
}

#[test]
fn test_recent_colors_newest_first() {
    let dir = setup_workspace();

    run_ok(&dir, &["layer", "set", "1", "--color", "#ff0000"]);
    run_ok(&dir, &["layer", "set", "1", "--color", "#00ff00"]);
    run_ok(&dir, &["layer", "set", "1", "--color", "#ff0000"]);

    assert_eq!(run_ok(&dir, &["colors"]), "#ff0000\n#00ff00\n");
}

// =============================================================================
// Transition Tests
// =============================================================================

#[test]
fn test_transition_scales_offsets() {
    let dir = setup_workspace();

    shadowr_cmd()
        .current_dir(dir.path())
        .args(["transition", "--scale", "2", "--offset", "1", "--easing", "ease-out"])
        .assert()
        .success()
        .stdout(predicate::str::contains("box-shadow: 11px 11px 15px 0px rgba(0, 0, 0, 0.20);"))
        .stdout(predicate::str::contains("transition: box-shadow 300ms ease-out"));
}
