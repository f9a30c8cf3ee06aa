use crate::domain::model::Allowlist;

/// Anything that can hand the authorizer its allowlist and bypass flag.
pub trait AllowlistProvider: Send + Sync {
    fn allowlist(&self) -> &Allowlist;

    /// True when the current deployment stage is the designated build stage.
    fn bypass(&self) -> bool;
}
