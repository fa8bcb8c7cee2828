//! Tests for bundle and prune.

use shelp_cli::application::services::installer::{InstallRequest, install};
use shelp_cli::application::services::pseudo::link_local;
use shelp_cli::application::services::reconciler::{bundle, prune, prune_plan};
use shelp_cli::domain::{BulkTally, PackageEntry, PackageError};

use crate::helpers::{FakeVcs, Sandbox, descriptor, origin_url};

fn entry(from: &str) -> PackageEntry {
    PackageEntry {
        from: from.to_string(),
        ..PackageEntry::default()
    }
}

fn package_error(err: &anyhow::Error) -> &PackageError {
    err.downcast_ref::<PackageError>().expect("package error")
}

async fn install_plain(sandbox: &Sandbox, specifier: &str) {
    let req = InstallRequest {
        package: descriptor(specifier),
        bins: &[],
        overwrite: false,
    };
    install(&sandbox.env(), &req).await.expect("install");
}

// ── bundle ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn bundle_without_entries_is_canceled() {
    let sandbox = Sandbox::new();

    let err = bundle(&sandbox.env(), &[]).await.expect_err("canceled");

    assert!(matches!(package_error(&err), PackageError::Canceled(msg) if msg == "No package is configured"));
    assert!(!sandbox.layout.root().exists());
}

#[tokio::test]
async fn bundle_installs_every_entry_in_order() {
    let sandbox = Sandbox::with_vcs(FakeVcs {
        executables: Vec::new(),
        ..FakeVcs::default()
    });
    let entries = [entry("acct/one"), entry("acct/two")];

    let tally = bundle(&sandbox.env(), &entries).await.expect("bundle");

    assert_eq!(tally, BulkTally { succeeded: 2, failed: 0 });
    assert_eq!(
        sandbox.vcs.calls(),
        [
            "clone https://github.com/acct/one.git ref=- shallow=true",
            "clone https://github.com/acct/two.git ref=- shallow=true",
        ]
    );
}

#[tokio::test]
async fn bundle_twice_reports_already_installed() {
    let sandbox = Sandbox::new();
    let entries = [entry("acct/repo")];

    bundle(&sandbox.env(), &entries).await.expect("first bundle");
    bundle(&sandbox.env(), &entries).await.expect("second bundle");

    assert_eq!(sandbox.vcs.clone_count(), 1);
    assert_eq!(
        sandbox.reporter.messages("success").last().map(String::as_str),
        Some("\"repo\" is already installed")
    );
}

#[tokio::test]
async fn bundle_twice_keeps_commit_pinned_checkout() {
    let sandbox = Sandbox::new();
    let entries = [entry("acct/repo@0123abcd")];

    bundle(&sandbox.env(), &entries).await.expect("first bundle");
    bundle(&sandbox.env(), &entries).await.expect("second bundle");

    assert_eq!(sandbox.vcs.clone_count(), 1);
    assert_eq!(
        sandbox.reporter.messages("success").last().map(String::as_str),
        Some("\"repo\" is already installed")
    );
}

#[tokio::test]
async fn bundle_reinstalls_when_url_differs() {
    let sandbox = Sandbox::new();
    install_plain(&sandbox, "acct/x").await;

    bundle(&sandbox.env(), &[entry("fork/x")]).await.expect("bundle");

    let package = sandbox.layout.package_path("x");
    assert_eq!(origin_url(&package), "https://github.com/fork/x.git");
    assert!(sandbox.bin_link("tool").is_symlink());
}

#[tokio::test]
async fn bundle_replaces_pseudo_install() {
    let sandbox = Sandbox::new();
    let source = sandbox.scratch("x");
    link_local(&sandbox.env(), &source, None).expect("link local");

    bundle(&sandbox.env(), &[entry("acct/x")]).await.expect("bundle");

    let package = sandbox.layout.package_path("x");
    assert!(!package.is_symlink());
    assert_eq!(origin_url(&package), "https://github.com/acct/x.git");
}

#[tokio::test]
async fn bundle_with_some_failures_is_a_warning() {
    let sandbox = Sandbox::with_vcs(FakeVcs {
        executables: Vec::new(),
        ..FakeVcs::default()
    });
    let entries = [entry(""), entry("acct/good"), entry("!!!")];

    let err = bundle(&sandbox.env(), &entries).await.expect_err("partial");

    assert!(matches!(package_error(&err), PackageError::Warning(msg) if msg == "There are some errors"));
    assert!(sandbox.layout.package_path("good").is_dir());
    let warnings = sandbox.reporter.messages("warn");
    assert!(warnings[0].contains("\"from\" is not specified"), "got: {warnings:?}");
    assert_eq!(sandbox.reporter.messages("error").len(), 1);
}

#[tokio::test]
async fn bundle_with_only_failures_fails() {
    let sandbox = Sandbox::with_vcs(FakeVcs {
        fail_clone: true,
        ..FakeVcs::default()
    });

    let err = bundle(&sandbox.env(), &[entry("acct/a"), entry("acct/b")])
        .await
        .expect_err("failed");

    assert!(matches!(package_error(&err), PackageError::OperationFailed(msg) if msg == "Bundle failed"));
    assert_eq!(sandbox.vcs.clone_count(), 2, "one failure must not stop the loop");
    assert_eq!(sandbox.temp_entries(), 0);
}

// ── prune ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn prune_plan_keeps_links_unless_asked() {
    let sandbox = Sandbox::with_vcs(FakeVcs {
        executables: Vec::new(),
        ..FakeVcs::default()
    });
    install_plain(&sandbox, "acct/a").await;
    install_plain(&sandbox, "acct/b").await;
    let source = sandbox.scratch("c");
    link_local(&sandbox.env(), &source, None).expect("link local");
    let declared = [entry("acct/a"), entry("acct/a")];

    let plan = prune_plan(&sandbox.env(), &declared, false).expect("plan");
    assert_eq!(plan.prunees, ["b"]);
    assert_eq!(plan.defined, ["a"]);
    assert_eq!(plan.kept_links, ["c"]);
    assert!(
        sandbox
            .reporter
            .messages("info")
            .contains(&"\"c\" is symlink. Skip".to_string())
    );

    let plan = prune_plan(&sandbox.env(), &declared, true).expect("plan with links");
    assert_eq!(plan.prunees, ["b", "c"]);
    assert!(plan.kept_links.is_empty());
}

#[tokio::test]
async fn prune_plan_honours_aliases() {
    let sandbox = Sandbox::new();
    install_plain(&sandbox, "acct/repo").await;
    let declared = [PackageEntry {
        from: "acct/other".to_string(),
        alias: Some("repo".to_string()),
        ..PackageEntry::default()
    }];

    let plan = prune_plan(&sandbox.env(), &declared, false).expect("plan");

    assert!(plan.is_noop());
    assert_eq!(plan.defined, ["repo"]);
}

#[test]
fn prune_plan_with_nothing_installed() {
    let sandbox = Sandbox::new();

    let err = prune_plan(&sandbox.env(), &[entry("acct/a")], false).expect_err("empty");

    assert!(matches!(package_error(&err), PackageError::NoPackages));
}

#[test]
fn prune_plan_with_only_kept_links_is_noop() {
    let sandbox = Sandbox::new();
    let source = sandbox.scratch("local");
    link_local(&sandbox.env(), &source, None).expect("link local");

    let plan = prune_plan(&sandbox.env(), &[], false).expect("plan");

    assert!(plan.is_noop());
    assert_eq!(plan.kept_links, ["local"]);
}

#[tokio::test]
async fn prune_removes_packages_and_links() {
    let sandbox = Sandbox::new();
    install_plain(&sandbox, "acct/a").await;

    let tally = prune(&sandbox.env(), &["a".to_string()]).expect("prune");

    assert_eq!(tally, BulkTally { succeeded: 1, failed: 0 });
    assert!(!sandbox.layout.package_path("a").exists());
    assert!(!sandbox.bin_link("tool").exists());
}

#[tokio::test]
async fn prune_continues_past_failures() {
    let sandbox = Sandbox::new();
    install_plain(&sandbox, "acct/a").await;

    let err = prune(&sandbox.env(), &["ghost".to_string(), "a".to_string()])
        .expect_err("partial");

    assert!(matches!(package_error(&err), PackageError::Warning(_)));
    assert!(!sandbox.layout.package_path("a").exists());
}
