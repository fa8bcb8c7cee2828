//! Property-based tests for specifier parsing and install equivalence.
//!
//! Uses `proptest` to verify invariants across many random inputs.

use proptest::prelude::*;

use shelp_cli::domain::{
    Existing, InstallPlan, InstalledState, PackageDescriptor, PackageError, SpecifierArgs,
    plan_install, validate_explicit_name,
};

const SEGMENT: &str = "[a-zA-Z0-9_][a-zA-Z0-9_-]{0,15}";

// ============================================================================
// Specifier Parser
// ============================================================================

proptest! {
    /// `account/repo` always resolves to a github.com clone named after repo.
    #[test]
    fn prop_shorthand_defaults_to_github(account in SEGMENT, repo in SEGMENT) {
        let pkg = PackageDescriptor::parse(SpecifierArgs::new(&format!("{account}/{repo}")))
            .expect("valid shorthand");
        prop_assert_eq!(pkg.url, format!("https://github.com/{account}/{repo}.git"));
        prop_assert_eq!(pkg.name, repo);
        prop_assert!(pkg.git_ref.is_none());
    }

    /// An explicit site replaces the default one; the `@ref` suffix is kept.
    #[test]
    fn prop_site_and_ref_are_honoured(
        account in SEGMENT,
        repo in SEGMENT,
        git_ref in "[a-z][a-z0-9.]{0,10}",
    ) {
        let spec = format!("gitlab.com/{account}/{repo}@{git_ref}");
        let pkg = PackageDescriptor::parse(SpecifierArgs::new(&spec)).expect("valid specifier");
        prop_assert_eq!(pkg.url, format!("https://gitlab.com/{account}/{repo}.git"));
        prop_assert_eq!(pkg.git_ref.as_deref(), Some(git_ref.as_str()));
    }

    /// `at` always wins over an `@ref` suffix.
    #[test]
    fn prop_explicit_at_wins(repo in SEGMENT, suffix in "[a-z]{1,8}", at in "[a-z]{1,8}") {
        let spec = format!("acct/{repo}@{suffix}");
        let pkg = PackageDescriptor::parse(SpecifierArgs {
            from: &spec,
            at: Some(at.as_str()),
            ..SpecifierArgs::default()
        })
        .expect("valid specifier");
        prop_assert_eq!(pkg.git_ref, Some(at));
    }

    /// A name containing a path separator is never accepted.
    #[test]
    fn prop_names_stay_single_component(head in "[a-z]{1,8}", tail in "[a-z]{1,8}") {
        let name = format!("{head}/{tail}");
        prop_assert!(validate_explicit_name(&name).is_err());
        let result = PackageDescriptor::parse(SpecifierArgs {
            from: "acct/repo",
            name: Some(name.as_str()),
            ..SpecifierArgs::default()
        });
        prop_assert!(matches!(result, Err(PackageError::InvalidName(_))));
    }

    /// Parsing never panics, whatever the input.
    #[test]
    fn prop_parse_is_total(input in ".{0,64}") {
        let _ = PackageDescriptor::parse(SpecifierArgs::new(&input));
    }
}

#[test]
fn literal_url_keeps_url_and_derives_name() {
    let pkg = PackageDescriptor::parse(SpecifierArgs::new("git@example.com:me/dots.git"))
        .expect("valid url");
    assert_eq!(pkg.url, "git@example.com:me/dots.git");
    assert_eq!(pkg.name, "dots");
}

#[test]
fn empty_specifier_is_rejected() {
    assert!(matches!(
        PackageDescriptor::parse(SpecifierArgs::new("  ")),
        Err(PackageError::InvalidSpecifier(_))
    ));
}

// ============================================================================
// Equivalence Checker
// ============================================================================

fn installed(url: &str, git_ref: &str, is_branch_default: bool) -> InstalledState {
    InstalledState {
        url: url.to_string(),
        git_ref: git_ref.to_string(),
        is_branch_default,
        ..InstalledState::default()
    }
}

proptest! {
    /// A pinned request is satisfied exactly by the same URL and ref.
    #[test]
    fn prop_pinned_request_needs_same_ref(
        repo in SEGMENT,
        git_ref in "[a-z]{1,8}",
        other in "[a-z]{1,8}",
        is_default in any::<bool>(),
    ) {
        let pkg = PackageDescriptor::parse(SpecifierArgs::new(&format!("acct/{repo}@{git_ref}")))
            .expect("valid specifier");
        prop_assert!(pkg.is_equivalent(&installed(&pkg.url, &git_ref, is_default)));
        prop_assert_eq!(
            pkg.is_equivalent(&installed(&pkg.url, &other, is_default)),
            other == git_ref
        );
    }

    /// A different URL is never equivalent, whatever the ref.
    #[test]
    fn prop_url_mismatch_is_never_equivalent(repo in SEGMENT, git_ref in "[a-z]{0,8}") {
        let pkg = PackageDescriptor::parse(SpecifierArgs::new(&format!("acct/{repo}")))
            .expect("valid specifier");
        let other_url = format!("https://github.com/fork/{repo}.git");
        prop_assert!(!pkg.is_equivalent(&installed(&other_url, &git_ref, true)));
    }

    /// Without overwrite, an occupied name is never reinstalled.
    #[test]
    fn prop_no_overwrite_never_reinstalls(repo in SEGMENT, git_ref in "[a-z]{0,8}", is_default in any::<bool>()) {
        let pkg = PackageDescriptor::parse(SpecifierArgs::new(&format!("acct/{repo}")))
            .expect("valid specifier");
        let existing = Existing::Clone(installed("https://example.com/x.git", &git_ref, is_default));
        prop_assert_eq!(plan_install(&pkg, &existing, false), InstallPlan::Conflict);
        prop_assert_eq!(plan_install(&pkg, &existing, true), InstallPlan::Reinstall);
    }
}

#[test]
fn unpinned_request_accepts_default_branch_only() {
    let pkg = PackageDescriptor::parse(SpecifierArgs::new("acct/repo")).expect("valid");
    assert!(pkg.is_equivalent(&installed(&pkg.url, "main", true)));
    assert!(!pkg.is_equivalent(&installed(&pkg.url, "feature", false)));
    assert!(!pkg.is_equivalent(&installed(&pkg.url, "v1.0", false)));
}
