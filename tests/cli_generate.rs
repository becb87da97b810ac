//! CLI integration tests for the `courtsprite` binary.
//!
//! Runs the built binary in temporary directories and checks exit codes,
//! written files and config handling.

use std::path::{Path, PathBuf};
use std::process::Command;

/// Get the path to the courtsprite binary.
fn courtsprite_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_courtsprite"))
}

/// Run courtsprite in `dir` and return (stdout, stderr, exit code).
fn run_in(dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(courtsprite_binary())
        .current_dir(dir)
        .env("XDG_CONFIG_HOME", dir.join("xdg"))
        .args(args)
        .output()
        .expect("Failed to execute courtsprite");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.code().unwrap_or(-1))
}

fn png_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .flatten()
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|n| n.ends_with(".png"))
        .collect();
    names.sort();
    names
}

// ============================================================================
// generate
// ============================================================================

#[test]
fn test_generate_default_roster() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, stderr, code) = run_in(dir.path(), &["generate", "--quiet"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let files = png_files(&dir.path().join("sprites"));
    assert_eq!(files.len(), 20);
    assert!(files.contains(&"player_orange_1.png".to_string()));
    assert!(files.contains(&"player_blue_10.png".to_string()));
}

#[test]
fn test_generate_with_overrides() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, stderr, code) = run_in(
        dir.path(),
        &["generate", "--out", "dist", "--count", "2", "--team", "blue", "--metadata", "-j", "1"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stderr.contains("[2/2]"), "progress missing: {}", stderr);

    let out = dir.path().join("dist");
    assert_eq!(png_files(&out), vec!["player_blue_1.png", "player_blue_2.png"]);

    let json = std::fs::read_to_string(out.join("player_blue_1.json")).unwrap();
    let meta: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(meta["image"], "player_blue_1.png");
    assert_eq!(meta["size"], serde_json::json!([48, 64]));
}

#[test]
fn test_generate_json_progress() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, stderr, code) =
        run_in(dir.path(), &["generate", "--count", "1", "--team", "orange", "--json"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let events: Vec<serde_json::Value> = stderr
        .lines()
        .filter(|l| l.starts_with('{'))
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["event"], "batch_started");
    assert_eq!(events.last().unwrap()["event"], "batch_completed");
    assert_eq!(events.last().unwrap()["succeeded"], 1);
}

#[test]
fn test_generate_reads_project_config() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("courtsprite.toml"),
        "[output]\ndir = \"team\"\n\n[roster]\nteams = [\"secondary\"]\nfirst_number = 30\ncount = 1\n\n[palette]\nblue_main = \"#112233\"\n",
    )
    .unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["generate", "--quiet"]);
    assert_eq!(code, 0, "stderr: {}", stderr);

    let png = dir.path().join("team/player_blue_30.png");
    let image = image::open(&png).unwrap().to_rgba8();
    // Front torso center uses the overridden main shade
    assert_eq!(image.get_pixel(7, 8).0, [0x11, 0x22, 0x33, 255]);
}

#[test]
fn test_generate_invalid_config_exits_2() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("courtsprite.toml"),
        "[roster]\ncount = 0\n\n[palette]\ntransparent = \"#FFFFFF\"\n",
    )
    .unwrap();

    let (_, stderr, code) = run_in(dir.path(), &["generate"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("Error:"));
    assert!(stderr.contains("roster.count"));
    assert!(stderr.contains("palette.transparent"));
    assert!(!dir.path().join("sprites").exists());
}

// ============================================================================
// sheet / frame / palette
// ============================================================================

#[test]
fn test_sheet_command_writes_one_sheet() {
    let dir = tempfile::TempDir::new().unwrap();
    let (stdout, stderr, code) =
        run_in(dir.path(), &["sheet", "--team", "orange", "--number", "7", "-o", "out/", "--metadata"]);
    assert_eq!(code, 0, "stderr: {}", stderr);
    assert!(stdout.contains("player_orange_7.png"));

    let image = image::open(dir.path().join("out/player_orange_7.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (48, 64));
    assert_eq!(image.get_pixel(6, 5).0, [0, 0, 0, 255]);
    assert!(dir.path().join("out/player_orange_7.json").exists());
}

#[test]
fn test_sheet_command_failed_sidecar_leaves_no_png() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join("out/me.json")).unwrap();

    let (stdout, stderr, code) = run_in(
        dir.path(),
        &["sheet", "--team", "blue", "--number", "4", "-o", "out/me.png", "--metadata"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("Error: Failed to save"));
    assert!(!stdout.contains("Saved:"));
    assert!(!dir.path().join("out/me.png").exists());
    assert!(dir.path().join("out/me.json").is_dir());
}

#[test]
fn test_frame_command() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, stderr, code) = run_in(
        dir.path(),
        &["frame", "--direction", "up", "--frame", "1", "--team", "blue", "-o", "up1.png"],
    );
    assert_eq!(code, 0, "stderr: {}", stderr);

    let image = image::open(dir.path().join("up1.png")).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (16, 16));
}

#[test]
fn test_frame_command_rejects_bad_index() {
    let dir = tempfile::TempDir::new().unwrap();
    let (_, stderr, code) =
        run_in(dir.path(), &["frame", "--direction", "down", "--frame", "5", "-o", "bad.png"]);
    assert_eq!(code, 2);
    assert!(stderr.contains("invalid frame index 5"));
    assert!(!dir.path().join("bad.png").exists());
}

#[test]
fn test_palette_commands() {
    let dir = tempfile::TempDir::new().unwrap();
    let (stdout, _, code) = run_in(dir.path(), &["palette", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("orange_main"));
    assert!(stdout.contains("#FF6B35"));
    assert_eq!(stdout.lines().count(), 20);

    let (stdout, _, code) = run_in(dir.path(), &["palette", "show", "blue_light"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("#60A5FA"));

    let (_, stderr, code) = run_in(dir.path(), &["palette", "show", "purple"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown color 'purple'"));
}
