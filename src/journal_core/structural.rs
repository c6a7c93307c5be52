//! Heuristic detection of architecture-relevant commits.
//!
//! A positive result only adds a diagram placeholder to the journal; it never
//! removes content. The rule is a trait so projects with a different layout can
//! supply their own classification.

use super::ChangedPath;

/// Decides whether a single changed path touches an architectural layer.
pub trait StructuralRule {
    fn is_structural_path(&self, change: &ChangedPath) -> bool;
}

impl<F> StructuralRule for F
where
    F: Fn(&ChangedPath) -> bool,
{
    fn is_structural_path(&self, change: &ChangedPath) -> bool {
        self(change)
    }
}

/// True when any of the changed paths matches the rule.
pub fn is_structural(rule: &dyn StructuralRule, changes: &[ChangedPath]) -> bool {
    changes.iter().any(|change| rule.is_structural_path(change))
}

/// Matches paths by file extension plus a layer substring in the path.
///
/// # Examples
///
/// ```
/// use daybook::journal_core::{ChangeKind, ChangedPath, LayerNamingRule, StructuralRule};
///
/// let rule = LayerNamingRule::default();
/// let controller = ChangedPath::new(ChangeKind::Modified, "src/controller/LoginController.rb");
/// let readme = ChangedPath::new(ChangeKind::Modified, "README.md");
///
/// assert!(rule.is_structural_path(&controller));
/// assert!(!rule.is_structural_path(&readme));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerNamingRule {
    extensions: Vec<String>,
    markers: Vec<String>,
}

impl LayerNamingRule {
    pub fn new(extensions: Vec<String>, markers: Vec<String>) -> Self {
        Self {
            extensions,
            markers,
        }
    }
}

impl Default for LayerNamingRule {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self::new(
            owned(crate::constants::DEFAULT_STRUCTURAL_EXTENSIONS),
            owned(crate::constants::DEFAULT_STRUCTURAL_MARKERS),
        )
    }
}

impl StructuralRule for LayerNamingRule {
    fn is_structural_path(&self, change: &ChangedPath) -> bool {
        let path = change.path.as_str();
        self.extensions.iter().any(|ext| path.ends_with(ext.as_str()))
            && self.markers.iter().any(|marker| path.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::ChangeKind;

    fn modified(path: &str) -> ChangedPath {
        ChangedPath::new(ChangeKind::Modified, path)
    }

    #[test]
    fn test_default_rule_matches_layer_files() {
        let rule = LayerNamingRule::default();
        assert!(rule.is_structural_path(&modified("app/models/user.rb")));
        assert!(rule.is_structural_path(&modified("app/services/billing_service.rb")));
        assert!(rule.is_structural_path(&modified("src/controller/LoginController.rb")));
    }

    #[test]
    fn test_default_rule_needs_extension_and_marker() {
        let rule = LayerNamingRule::default();
        assert!(!rule.is_structural_path(&modified("app/models/user.py")));
        assert!(!rule.is_structural_path(&modified("lib/tasks/cleanup.rb")));
        assert!(!rule.is_structural_path(&modified("README.md")));
        // markers are case-sensitive
        assert!(!rule.is_structural_path(&modified("src/LoginController.rb")));
    }

    #[test]
    fn test_rename_is_judged_by_new_path() {
        let rule = LayerNamingRule::default();
        let change = ChangedPath::renamed("notes/user.txt", "app/models/user.rb");
        assert!(rule.is_structural_path(&change));
    }

    #[test]
    fn test_custom_rule() {
        let rule = LayerNamingRule::new(
            vec![".java".to_string()],
            vec!["domain".to_string(), "application".to_string()],
        );
        assert!(rule.is_structural_path(&modified("src/main/java/com/example/domain/Item.java")));
        assert!(!rule.is_structural_path(&modified("app/models/user.rb")));
    }

    #[test]
    fn test_empty_rule_never_matches() {
        let rule = LayerNamingRule::new(Vec::new(), Vec::new());
        assert!(!rule.is_structural_path(&modified("app/models/user.rb")));
    }

    #[test]
    fn test_closure_rule_sees_change_kind() {
        let deletions_only = |change: &ChangedPath| change.kind == ChangeKind::Deleted;
        let changes = vec![
            modified("a.rb"),
            ChangedPath::new(ChangeKind::Deleted, "b.rb"),
        ];
        assert!(is_structural(&deletions_only, &changes));
        assert!(!is_structural(&deletions_only, &changes[..1]));
    }

    #[test]
    fn test_is_structural_any_path() {
        let rule = LayerNamingRule::default();
        let changes = vec![modified("README.md"), modified("app/models/user.rb")];
        assert!(is_structural(&rule, &changes));
        assert!(!is_structural(&rule, &changes[..1]));
        assert!(!is_structural(&rule, &[]));
    }
}
