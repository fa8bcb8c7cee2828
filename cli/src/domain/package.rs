//! Package identity: specifier parsing and install equivalence.
//!
//! Pure functions only — no I/O, no async, no filesystem access.

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::PackageError;
use crate::domain::worktree::Worktree;

/// `[site/]account/repo[@ref]` shorthand.
static SHORTHAND_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^(?:([\w\-.]+)/)?([\w\-.]+)/([\w\-.]+)(?:@(.+))?$").expect("valid regex")
});

/// Rule for names derived from a repository or URL.
static DERIVED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\w[\w\-.]*$").expect("valid regex")
});

/// Rule for names given explicitly by the user (`as:` or a CLI argument).
static EXPLICIT_NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^\w+").expect("valid regex")
});

static COMMIT_HASH_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"^[0-9a-f]{7,}$").expect("valid regex")
});

/// Site used when the shorthand omits one.
pub const DEFAULT_SITE: &str = "github.com";

/// Canonical identity of a requested package.
///
/// Built fresh for every operation and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageDescriptor {
    /// Directory name under `packages/`.
    pub name: String,
    /// Clone URL.
    pub url: String,
    /// Branch, tag, or commit hash. `None` tracks the remote default branch.
    pub git_ref: Option<String>,
    /// `git_ref` is a raw commit hash; a shallow clone cannot check it out.
    pub is_commit_hash: bool,
}

/// Raw inputs of the Specifier Parser, as found in a config entry or on the
/// command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpecifierArgs<'a> {
    /// `[site/]account/repo[@ref]` or a literal clone URL.
    pub from: &'a str,
    /// Explicit package name.
    pub name: Option<&'a str>,
    /// Explicit ref, wins over an `@ref` suffix.
    pub at: Option<&'a str>,
}

impl<'a> SpecifierArgs<'a> {
    #[must_use]
    pub fn new(from: &'a str) -> Self {
        Self {
            from,
            ..Self::default()
        }
    }
}

impl PackageDescriptor {
    /// Parse a specifier into a validated descriptor.
    ///
    /// # Errors
    ///
    /// Returns [`PackageError::InvalidSpecifier`] when the specifier is empty
    /// or no usable name can be derived from it, and
    /// [`PackageError::InvalidName`] when an explicit name is malformed.
    pub fn parse(args: SpecifierArgs<'_>) -> Result<Self, PackageError> {
        let from = args.from.trim();
        if from.is_empty() {
            return Err(PackageError::InvalidSpecifier(args.from.to_string()));
        }

        let (url, derived_name, suffix_ref) = if let Some(caps) = SHORTHAND_RE.captures(from) {
            let site = caps.get(1).map_or(DEFAULT_SITE, |m| m.as_str());
            let account = &caps[2];
            let repo = caps[3].strip_suffix(".git").unwrap_or(&caps[3]);
            (
                format!("https://{site}/{account}/{repo}.git"),
                repo.to_string(),
                caps.get(4).map(|m| m.as_str().to_string()),
            )
        } else {
            (from.to_string(), name_from_url(from), None)
        };

        let name = match args.name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(explicit) => {
                validate_explicit_name(explicit)?;
                explicit.to_string()
            }
            None => {
                if !DERIVED_NAME_RE.is_match(&derived_name) {
                    return Err(PackageError::InvalidSpecifier(from.to_string()));
                }
                derived_name
            }
        };

        let git_ref = args
            .at
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(ToString::to_string)
            .or(suffix_ref);
        let is_commit_hash = git_ref.as_deref().is_some_and(|r| COMMIT_HASH_RE.is_match(r));

        Ok(Self {
            name,
            url,
            git_ref,
            is_commit_hash,
        })
    }

    /// The requested ref, with "unpinned" as the empty string.
    #[must_use]
    pub fn ref_str(&self) -> &str {
        self.git_ref.as_deref().unwrap_or("")
    }

    /// Whether an installed package already satisfies this request.
    ///
    /// URLs must match exactly. Refs must be equal, except that an unpinned
    /// request is satisfied by a checkout of the remote default branch, and a
    /// commit hash by a checkout whose `HEAD` it abbreviates.
    #[must_use]
    pub fn is_equivalent(&self, installed: &InstalledState) -> bool {
        if self.url != installed.url {
            return false;
        }
        if self.ref_str() == installed.git_ref {
            return true;
        }
        match self.git_ref.as_deref() {
            None => installed.is_branch_default,
            Some(hash) if self.is_commit_hash => installed.head_commit.starts_with(hash),
            Some(_) => false,
        }
    }
}

/// Identity of an installed (cloned) package, read from its worktree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstalledState {
    pub url: String,
    /// Checked-out branch, else the tag at `HEAD`, else empty.
    pub git_ref: String,
    pub is_branch_default: bool,
    /// Full commit id of `HEAD`; empty when unknown.
    pub head_commit: String,
}

impl From<&Worktree> for InstalledState {
    fn from(wt: &Worktree) -> Self {
        Self {
            url: wt.remote_url.clone(),
            git_ref: wt.branch_or_tag().to_string(),
            is_branch_default: wt.is_branch_default(),
            head_commit: wt.head.clone(),
        }
    }
}

/// Validate a user-supplied package name.
///
/// # Errors
///
/// Returns [`PackageError::InvalidName`] unless the name starts with a word
/// character and stays a single path component.
pub fn validate_explicit_name(name: &str) -> Result<(), PackageError> {
    let single_component = !name.contains(['/', '\\']) && name != "." && name != "..";
    if EXPLICIT_NAME_RE.is_match(name) && single_component {
        Ok(())
    } else {
        Err(PackageError::InvalidName(name.to_string()))
    }
}

/// Last path segment of a URL, without a trailing `.git`.
fn name_from_url(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    last.strip_suffix(".git").unwrap_or(last).to_string()
}
