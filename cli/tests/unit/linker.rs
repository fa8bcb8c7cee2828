//! Tests for the executable linker and package removal.

use std::fs;

use shelp_cli::application::services::linker::{
    LinkReport, link_all_executables, link_listed_executables, unlink_package_executables,
};
use shelp_cli::application::services::pseudo::link_local;
use shelp_cli::application::services::remover::remove_package;
use shelp_cli::domain::PackageError;

use crate::helpers::{Sandbox, write_executable, write_plain};

fn package_with_bin(sandbox: &Sandbox, name: &str, exes: &[&str]) -> std::path::PathBuf {
    let dir = sandbox.layout.package_path(name);
    fs::create_dir_all(dir.join("bin")).expect("mkdir");
    for exe in exes {
        write_executable(&dir.join("bin").join(exe), "#!/bin/sh\n");
    }
    dir
}

#[test]
fn links_only_executable_files_from_bin() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = package_with_bin(&sandbox, "pkg", &["run"]);
    write_plain(&pkg.join("bin").join("notes.txt"), "x");
    fs::create_dir(pkg.join("bin").join("nested")).expect("mkdir");
    write_executable(&pkg.join("top-level"), "#!/bin/sh\n");

    let report = link_all_executables(&env, &pkg).expect("link");

    assert_eq!(report.linked, ["run"]);
    assert!(report.collisions.is_empty());
    assert_eq!(
        fs::read_link(sandbox.bin_link("run")).expect("readlink"),
        pkg.join("bin").join("run")
    );
    assert!(!sandbox.bin_link("notes.txt").exists());
    assert!(!sandbox.bin_link("nested").exists());
    assert!(!sandbox.bin_link("top-level").exists());
}

#[test]
fn package_without_bin_links_top_level_executables() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = sandbox.layout.package_path("flat");
    fs::create_dir_all(&pkg).expect("mkdir");
    write_executable(&pkg.join("flat.sh"), "#!/bin/sh\n");
    write_plain(&pkg.join("README.md"), "x");

    let report = link_all_executables(&env, &pkg).expect("link");

    assert_eq!(report.linked, ["flat.sh"]);
    assert!(sandbox.bin_link("flat.sh").is_symlink());
    assert!(!sandbox.bin_link("README.md").exists());
}

#[test]
fn collision_is_warned_and_left_untouched() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    write_plain(&sandbox.bin_link("run"), "mine");
    let pkg = package_with_bin(&sandbox, "pkg", &["run", "other"]);

    let report = link_all_executables(&env, &pkg).expect("link");

    assert_eq!(report.collisions, ["run"]);
    assert_eq!(report.linked, ["other"]);
    assert!(report.is_degraded());
    assert_eq!(fs::read_to_string(sandbox.bin_link("run")).expect("read"), "mine");
    let warnings = sandbox.reporter.messages("warn");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("already exists"), "got: {warnings:?}");
}

#[test]
fn existing_link_to_same_target_counts_as_linked() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = package_with_bin(&sandbox, "pkg", &["run"]);

    link_all_executables(&env, &pkg).expect("first link");
    let report = link_all_executables(&env, &pkg).expect("second link");

    assert_eq!(
        report,
        LinkReport {
            linked: vec!["run".to_string()],
            collisions: Vec::new(),
        }
    );
    assert!(sandbox.reporter.messages("warn").is_empty());
}

#[test]
fn listed_executables_must_exist() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = package_with_bin(&sandbox, "pkg", &["run"]);

    let report =
        link_listed_executables(&env, &pkg, &["bin/run".to_string()]).expect("link listed");
    assert_eq!(report.linked, ["run"]);

    let err = link_listed_executables(&env, &pkg, &["bin/missing".to_string()])
        .expect_err("missing executable");
    assert!(err.to_string().contains("executable not found"), "got: {err}");
}

#[test]
fn unlink_matches_path_components_not_string_prefix() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = package_with_bin(&sandbox, "pkg", &["one"]);
    let other = package_with_bin(&sandbox, "pkg-other", &["two"]);
    link_all_executables(&env, &pkg).expect("link pkg");
    link_all_executables(&env, &other).expect("link pkg-other");

    let removed = unlink_package_executables(&env, &pkg).expect("unlink");

    assert_eq!(removed, 1);
    assert!(!sandbox.bin_link("one").exists());
    assert!(sandbox.bin_link("two").is_symlink());
}

#[test]
fn unlink_leaves_regular_files_alone() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = package_with_bin(&sandbox, "pkg", &[]);
    write_plain(&sandbox.bin_link("keep"), "x");

    assert_eq!(unlink_package_executables(&env, &pkg).expect("unlink"), 0);
    assert!(sandbox.bin_link("keep").exists());
}

#[test]
fn remove_deletes_package_and_its_links() {
    let sandbox = Sandbox::new();
    let env = sandbox.env();
    env.prepare_directories().expect("prepare");
    let pkg = package_with_bin(&sandbox, "pkg", &["run"]);
    link_all_executables(&env, &pkg).expect("link");

    remove_package(&env, "pkg").expect("remove");

    assert!(!pkg.exists());
    assert!(!sandbox.bin_link("run").exists());
    assert_eq!(sandbox.reporter.messages("success"), ["\"pkg\" is removed"]);
}

#[test]
fn remove_unknown_package_is_not_installed() {
    let sandbox = Sandbox::new();
    let err = remove_package(&sandbox.env(), "ghost").expect_err("not installed");
    assert!(matches!(
        err.downcast_ref::<PackageError>(),
        Some(PackageError::NotInstalled(name)) if name == "ghost"
    ));
}

#[test]
fn link_local_uses_basename_and_links_executables() {
    let sandbox = Sandbox::new();
    let source = sandbox.scratch("my-tools");
    fs::create_dir(source.join("bin")).expect("mkdir");
    write_executable(&source.join("bin").join("mt"), "#!/bin/sh\n");

    let (name, report) = link_local(&sandbox.env(), &source, None).expect("link local");

    assert_eq!(name, "my-tools");
    assert_eq!(report.linked, ["mt"]);
    let package = sandbox.layout.package_path("my-tools");
    assert_eq!(fs::read_link(&package).expect("readlink"), source);
    assert_eq!(
        fs::read_link(sandbox.bin_link("mt")).expect("readlink"),
        package.join("bin").join("mt")
    );
}

#[test]
fn removing_pseudo_install_keeps_source() {
    let sandbox = Sandbox::new();
    let source = sandbox.scratch("local");
    write_executable(&source.join("lx"), "#!/bin/sh\n");
    let env = sandbox.env();
    link_local(&env, &source, Some("alias")).expect("link local");

    remove_package(&env, "alias").expect("remove");

    assert!(!sandbox.layout.package_path("alias").exists());
    assert!(!sandbox.bin_link("lx").exists());
    assert!(source.join("lx").exists());
}

#[test]
fn link_local_rejects_taken_and_invalid_names() {
    let sandbox = Sandbox::new();
    let source = sandbox.scratch("dup");
    let env = sandbox.env();
    link_local(&env, &source, None).expect("first link");

    let err = link_local(&env, &source, None).expect_err("taken");
    assert!(matches!(
        err.downcast_ref::<PackageError>(),
        Some(PackageError::AlreadyInstalled(_))
    ));

    let err = link_local(&env, &source, Some("../escape")).expect_err("invalid");
    assert!(matches!(
        err.downcast_ref::<PackageError>(),
        Some(PackageError::InvalidName(_))
    ));
}
