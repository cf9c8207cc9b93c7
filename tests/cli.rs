use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn write_config(home: &Path, contents: &str) {
    let config_dir = home.join(".config").join("create-hubs-app");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(config_dir.join("config.json"), contents).unwrap();
}

fn run_cli(cwd: &Path, home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_create-hubs-app"))
        .args(args)
        .current_dir(cwd)
        .env("HOME", home)
        .env("APPDATA", home)
        .env("NO_COLOR", "1")
        .output()
        .unwrap()
}

#[test]
fn invalid_name_exits_with_validation_code() {
    let workspace = tempfile::tempdir().unwrap();

    let output = run_cli(workspace.path(), workspace.path(), &["BadName"]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error creating Hubs app:"));
    assert!(stderr.contains("  Invalid project name. name can no longer contain capital letters"));
    assert!(!workspace.path().join("BadName").exists());
}

#[test]
fn unknown_options_are_ignored() {
    let workspace = tempfile::tempdir().unwrap();
    fs::write(workspace.path().join("my-app"), "occupied").unwrap();

    let output = run_cli(
        workspace.path(),
        workspace.path(),
        &["my-app", "--use-yarn", "--verbose", "extra"],
    );

    // Reaches the directory check, so parsing succeeded.
    assert_eq!(output.status.code(), Some(4));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not a directory."));
}

#[test]
fn json_mode_prints_error_envelope() {
    let workspace = tempfile::tempdir().unwrap();
    let project = workspace.path().join("my-app");
    fs::create_dir(&project).unwrap();
    fs::write(project.join("index.html"), "").unwrap();

    let output = run_cli(workspace.path(), workspace.path(), &["my-app", "--json"]);

    assert_eq!(output.status.code(), Some(4));
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["error"]["code"], "project.path_conflict");
    assert_eq!(envelope["error"]["details"]["entries"][0], "index.html");
    assert_eq!(envelope["error"]["details"]["step"], "preparing_directory");
}

#[test]
fn missing_project_path_is_a_usage_error() {
    let workspace = tempfile::tempdir().unwrap();

    let output = run_cli(workspace.path(), workspace.path(), &[]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("project-path"));
}

#[cfg(unix)]
#[test]
fn config_file_selects_package_manager() {
    let workspace = tempfile::tempdir().unwrap();
    write_config(workspace.path(), r#"{"defaults": {"package_manager": {"program": "true"}}}"#);

    let output = run_cli(workspace.path(), workspace.path(), &["my-app"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Finished!\n"));
    assert!(stdout.contains("npm run deploy"));
    assert!(workspace.path().join("my-app").join("package.json").is_file());

    // Progress lines show up even when stderr is a pipe.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Creating a new Hubs app in "));
    assert!(stderr.contains("Installing packages. This might take a couple of minutes."));
}

#[cfg(unix)]
#[test]
fn json_success_keeps_installer_output_off_stdout() {
    let workspace = tempfile::tempdir().unwrap();
    write_config(workspace.path(), r#"{"defaults": {"package_manager": {"program": "echo"}}}"#);

    let output = run_cli(workspace.path(), workspace.path(), &["my-app", "--json"]);

    assert_eq!(output.status.code(), Some(0));
    let envelope: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["data"]["project_name"], "my-app");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("install --save --save-exact --loglevel error hubs-sdk"));
}

#[cfg(unix)]
#[test]
fn config_cannot_unignore_artifact_files() {
    let workspace = tempfile::tempdir().unwrap();
    write_config(
        workspace.path(),
        r#"{"defaults": {
            "package_manager": {"program": "true"},
            "ignored_files": [],
            "extra_ignored_files": []
        }}"#,
    );
    let project = workspace.path().join("my-app");
    fs::create_dir(&project).unwrap();
    fs::write(project.join(".DS_Store"), "").unwrap();

    let output = run_cli(workspace.path(), workspace.path(), &["my-app"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(project.join("package.json").is_file());
}

#[cfg(unix)]
#[test]
fn unknown_option_value_is_not_the_project_path() {
    let workspace = tempfile::tempdir().unwrap();
    write_config(workspace.path(), r#"{"defaults": {"package_manager": {"program": "true"}}}"#);

    let output = run_cli(workspace.path(), workspace.path(), &["--template", "foo", "my-app"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(workspace.path().join("my-app").join("package.json").is_file());
    assert!(!workspace.path().join("foo").exists());
}
