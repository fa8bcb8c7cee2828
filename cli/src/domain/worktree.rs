//! Identity of a checked-out working tree, as reported by version control.

/// What the version-control client knows about a package checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Worktree {
    /// `remote.origin.url`.
    pub remote_url: String,
    /// Checked-out branch; empty on a detached `HEAD`.
    pub branch: String,
    /// Tag pointing at `HEAD`, if any.
    pub tag: String,
    /// Branch `origin/HEAD` points to.
    pub default_branch: String,
    /// Full commit id of `HEAD`.
    pub head: String,
}

impl Worktree {
    /// The branch if one is checked out, otherwise the tag at `HEAD`.
    #[must_use]
    pub fn branch_or_tag(&self) -> &str {
        if self.branch.is_empty() {
            &self.tag
        } else {
            &self.branch
        }
    }

    #[must_use]
    pub fn is_branch_default(&self) -> bool {
        !self.branch.is_empty() && self.branch == self.default_branch
    }
}

/// Strip the remote prefix from `refs/remotes/origin/HEAD` resolution output,
/// e.g. `origin/main` becomes `main`.
#[must_use]
pub fn default_branch_from_symref(symref: &str) -> String {
    let trimmed = symref.trim();
    trimmed
        .split_once('/')
        .map_or(trimmed, |(_, branch)| branch)
        .to_string()
}
