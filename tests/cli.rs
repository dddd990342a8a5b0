use assert_cmd::Command;

/// Binary with the hf-hub cache pointed at a throwaway directory.
fn hubsets(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hubsets").unwrap();
    cmd.env("HF_HOME", home.path())
        .env_remove("HF_TOKEN")
        .env_remove("HF_ENDPOINT")
        .env_remove("HF_DATASETS_SERVER");
    cmd
}

#[test]
fn outputs_tool_name() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.arg("-V");
    cmd.assert().success().stdout("hubsets 0.1.0\n");
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("search"))
        .stdout(predicates::str::contains("info"))
        .stdout(predicates::str::contains("download"));
}

#[test]
fn download_help_lists_flags() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.args(["download", "--help"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("--force-direct"))
        .stdout(predicates::str::contains("--config"))
        .stdout(predicates::str::contains("--output-dir"));
}

#[test]
fn search_requires_keyword() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.arg("search");
    cmd.assert().failure();
}

#[test]
fn malformed_dataset_id_is_reported_not_fatal() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.args(["info", "a/b/c"]);
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("Invalid dataset reference 'a/b/c'"));
}

#[test]
fn download_rejects_non_dataset_url() {
    let home = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.args(["download", "https://example.com/datasets/a/b", "--output-dir"])
        .arg(out.path());
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("expected host 'huggingface.co'"));
}

#[test]
fn invalid_endpoint_fails() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.args(["--endpoint", "not a url", "info", "org/data"]);
    cmd.assert()
        .failure()
        .stderr(predicates::str::contains("Invalid configuration"));
}

#[test]
fn interactive_mode_with_empty_input_exits_cleanly() {
    let home = tempfile::tempdir().unwrap();
    let mut cmd = hubsets(&home);
    cmd.write_stdin("");
    cmd.assert()
        .success()
        .stdout(predicates::str::contains("must not be empty"));
}
