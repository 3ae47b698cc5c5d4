use std::path::Path;
use std::process::Command;

/// Binary with an empty config directory and no destination in the environment.
fn havenwall(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_havenwall"));
    cmd.env("HOME", config_home)
        .env("XDG_CONFIG_HOME", config_home)
        .env_remove("WALLHAVEN_DESTINATION")
        .env_remove("WALLHAVEN_API_KEY")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_exits_zero() {
    let home = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .arg("--help")
        .output()
        .expect("failed to run");
    assert!(output.status.success(), "havenwall --help should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Fetch Wallhaven wallpapers"),
        "help should contain description"
    );
    assert!(stdout.contains("choose-random-background"));
    assert!(stdout.contains("get-wallpapers"));
}

#[test]
fn test_version_exits_zero() {
    let home = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .arg("--version")
        .output()
        .expect("failed to run");
    assert!(output.status.success(), "havenwall --version should exit 0");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("havenwall"),
        "version output should contain crate name"
    );
}

#[test]
fn test_missing_destination_fails() {
    let home = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .arg("choose-random-background")
        .output()
        .expect("failed to run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("destination needs to be set"), "{stderr}");
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_get_wallpapers_without_destination_fails_before_network() {
    let home = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .args(["get-wallpapers", "-c", "anime"])
        .output()
        .expect("failed to run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("destination needs to be set"), "{stderr}");
}

#[test]
fn test_empty_library_reports_no_images() {
    let home = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .args(["choose-random-background", "--destination"])
        .arg(library.path())
        .output()
        .expect("failed to run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no images found"), "{stderr}");
}

#[test]
fn test_destination_from_environment() {
    let home = tempfile::tempdir().unwrap();
    let library = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .env("WALLHAVEN_DESTINATION", library.path())
        .args(["choose-random-background", "-p", "nsfw"])
        .output()
        .expect("failed to run");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no images found"), "{stderr}");
}

#[test]
fn test_unknown_purity_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let output = havenwall(home.path())
        .args(["choose-random-background", "-p", "safe", "--destination", "/tmp"])
        .output()
        .expect("failed to run");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
}
