//! End-to-end package flows with a stand-in `git` executable.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use predicates::prelude::*;
use tempfile::TempDir;

use crate::cli_tests::shelp;

/// A `git` replacement that fakes `clone` by creating `bin/hello` in the
/// destination, and fails every other subcommand.
const FAKE_GIT: &str = r#"#!/bin/sh
if [ "$1" = "clone" ]; then
  for dest; do :; done
  mkdir -p "$dest/bin" || exit 1
  printf '#!/bin/sh\necho hello\n' > "$dest/bin/hello"
  chmod +x "$dest/bin/hello"
  exit 0
fi
exit 1
"#;

fn fake_git(dir: &TempDir) -> PathBuf {
    let path = dir.path().join("fake-git");
    fs::write(&path, FAKE_GIT).expect("write fake git");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

fn root_dir(dir: &TempDir) -> PathBuf {
    dir.path().join("root")
}

fn local_package(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join("work").join(name);
    fs::create_dir_all(path.join("bin")).expect("mkdir");
    let exe = path.join("bin").join(format!("{name}-cmd"));
    fs::write(&exe, "#!/bin/sh\n").expect("write");
    fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).expect("chmod");
    path
}

fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}

#[test]
fn test_link_list_remove_flow() {
    let dir = TempDir::new().expect("tempdir");
    let source = local_package(&dir, "mytools");

    shelp(&dir)
        .args(["link", path_arg(&source)])
        .assert()
        .success()
        .stdout(predicate::str::contains("is linked as package \"mytools\""));
    let link = root_dir(&dir).join("bin").join("mytools-cmd");
    assert!(link.is_symlink());

    shelp(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::diff("mytools\n"));

    shelp(&dir)
        .args(["link", path_arg(&source)])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("is already installed"));

    shelp(&dir)
        .args(["uninstall", "mytools"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mytools\" is removed"));
    assert!(!link.exists());
    assert!(source.join("bin").join("mytools-cmd").exists());
}

#[test]
fn test_list_json_marks_links() {
    let dir = TempDir::new().expect("tempdir");
    let source = local_package(&dir, "dots");
    shelp(&dir).args(["link", path_arg(&source)]).assert().success();

    let output = shelp(&dir)
        .args(["list", "--json"])
        .output()
        .expect("run");
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(parsed, serde_json::json!([{ "name": "dots", "linked": true }]));
}

#[test]
fn test_install_with_fake_git() {
    let dir = TempDir::new().expect("tempdir");
    let git = fake_git(&dir);

    shelp(&dir)
        .env("GIT_COMMAND", &git)
        .args(["install", "acct/hello-sh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"hello-sh\" is installed"));

    let root = root_dir(&dir);
    assert_eq!(
        fs::read_link(root.join("bin").join("hello")).expect("readlink"),
        root.join("packages").join("hello-sh").join("bin").join("hello")
    );
    let leftovers = fs::read_dir(root.join("tmp")).expect("tmp exists").count();
    assert_eq!(leftovers, 0, "staging area must be empty");
}

#[test]
fn test_failed_clone_leaves_no_package() {
    let dir = TempDir::new().expect("tempdir");
    let git = dir.path().join("false-git");
    fs::write(&git, "#!/bin/sh\necho 'fatal: not found' >&2\nexit 128\n").expect("write");
    fs::set_permissions(&git, fs::Permissions::from_mode(0o755)).expect("chmod");

    shelp(&dir)
        .env("GIT_COMMAND", &git)
        .args(["install", "acct/missing"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Cloning https://github.com/acct/missing.git failed"));

    let root = root_dir(&dir);
    assert!(!root.join("packages").join("missing").exists());
    assert_eq!(fs::read_dir(root.join("tmp")).expect("tmp exists").count(), 0);
}

#[test]
fn test_bundle_then_prune() {
    let dir = TempDir::new().expect("tempdir");
    let git = fake_git(&dir);
    let config = dir.path().join("shelp.yml");
    fs::write(
        &config,
        "packages:\n  - from: acct/alpha\n  - from: acct/beta\n    as: b\n",
    )
    .expect("write config");

    shelp(&dir)
        .env("GIT_COMMAND", &git)
        .args(["--config", path_arg(&config), "bundle"])
        .assert()
        .success();
    let packages = root_dir(&dir).join("packages");
    assert!(packages.join("alpha").is_dir());
    assert!(packages.join("b").is_dir());

    fs::write(&config, "packages:\n  - from: acct/alpha\n").expect("rewrite config");
    shelp(&dir)
        .args(["--config", path_arg(&config), "prune", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"b\" is removed"));
    assert!(packages.join("alpha").is_dir());
    assert!(!packages.join("b").exists());
}

#[test]
fn test_prune_keeps_links_and_cancels() {
    let dir = TempDir::new().expect("tempdir");
    let source = local_package(&dir, "local");
    shelp(&dir).args(["link", path_arg(&source)]).assert().success();

    shelp(&dir)
        .args(["prune", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nothing to prune"));
    assert!(root_dir(&dir).join("packages").join("local").is_symlink());

    shelp(&dir)
        .args(["prune", "--link", "--yes"])
        .assert()
        .success();
    assert!(!root_dir(&dir).join("packages").join("local").exists());
    assert!(source.exists());
}

#[test]
fn test_relative_root_gives_resolvable_links() {
    let dir = TempDir::new().expect("tempdir");
    let git = fake_git(&dir);

    shelp(&dir)
        .current_dir(dir.path())
        .env("SHELP_ROOT", "rel-root")
        .env("GIT_COMMAND", &git)
        .args(["install", "acct/hello-sh"])
        .assert()
        .success();

    let link = dir.path().join("rel-root").join("bin").join("hello");
    let target = fs::read_link(&link).expect("readlink");
    assert!(target.is_absolute(), "target: {}", target.display());
    assert!(link.exists(), "link must resolve");
}

#[test]
fn test_link_parent_directory_uses_its_name() {
    let dir = TempDir::new().expect("tempdir");
    let source = local_package(&dir, "mytools");

    shelp(&dir)
        .current_dir(source.join("bin"))
        .args(["link", ".."])
        .assert()
        .success()
        .stdout(predicate::str::contains("is linked as package \"mytools\""));
    assert_eq!(
        fs::read_link(root_dir(&dir).join("packages").join("mytools")).expect("readlink"),
        source
    );
}
