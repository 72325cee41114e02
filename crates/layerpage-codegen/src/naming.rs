//! CSS class naming.
//!
//! Layer names are arbitrary Unicode; class names are `l<depth>_` followed
//! by the name with every character outside `[A-Za-z0-9_$]` replaced by `_`,
//! cut to `MAX_CLASS_LEN` characters. The mapping is lossy, so distinct
//! layers can share a class. `ClassNames` can optionally break such ties.

use std::collections::HashSet;

/// Longest class name ever emitted, prefix included.
pub const MAX_CLASS_LEN: usize = 50;

/// Sanitize a layer name into a class name for the given depth.
pub fn sanitize_class_name(name: &str, depth: usize) -> String {
    let mut class = format!("l{depth}_");
    class.extend(name.trim().chars().map(|c| {
        if c.is_ascii_alphanumeric() || c == '_' || c == '$' {
            c
        } else {
            '_'
        }
    }));
    // ASCII only, so byte truncation is char truncation.
    class.truncate(MAX_CLASS_LEN);
    class
}

/// Per-compilation class registry.
#[derive(Debug, Default)]
pub struct ClassNames {
    unique: bool,
    taken: HashSet<String>,
}

impl ClassNames {
    /// `unique` appends `_2`, `_3`, ... to names already handed out.
    pub fn new(unique: bool) -> Self {
        Self {
            unique,
            taken: HashSet::new(),
        }
    }

    /// Class name for a layer. Without collisions this is exactly
    /// `sanitize_class_name(name, depth)`.
    pub fn claim(&mut self, name: &str, depth: usize) -> String {
        let base = sanitize_class_name(name, depth);
        if !self.unique || self.taken.insert(base.clone()) {
            return base;
        }

        let mut n = 2usize;
        loop {
            let suffix = format!("_{n}");
            let mut candidate = base.clone();
            candidate.truncate(MAX_CLASS_LEN - suffix.len());
            candidate.push_str(&suffix);
            if self.taken.insert(candidate.clone()) {
                tracing::debug!(class = %base, renamed = %candidate, "Class name collision");
                return candidate;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_valid(class: &str) -> bool {
        class.len() <= MAX_CLASS_LEN
            && class
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
    }

    // =========================================================================
    // sanitize_class_name
    // =========================================================================

    #[test]
    fn test_plain_name() {
        assert_eq!(sanitize_class_name("Header", 0), "l0_Header");
    }

    #[test]
    fn test_spaces_and_hyphens() {
        assert_eq!(sanitize_class_name("nav bar-item", 2), "l2_nav_bar_item");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(sanitize_class_name("  Logo \t", 1), "l1_Logo");
    }

    #[test]
    fn test_dollar_kept() {
        assert_eq!(sanitize_class_name("$price", 0), "l0_$price");
    }

    #[test]
    fn test_unicode_replaced_per_char() {
        assert_eq!(sanitize_class_name("按钮 copy", 3), "l3____copy");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(sanitize_class_name("Card (hover).png", 0), "l0_Card__hover__png");
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(sanitize_class_name("", 4), "l4_");
    }

    #[test]
    fn test_truncated_to_limit() {
        let class = sanitize_class_name(&"a".repeat(80), 12);
        assert_eq!(class.len(), MAX_CLASS_LEN);
        assert!(class.starts_with("l12_aaa"));
    }

    #[test]
    fn test_always_valid() {
        let long = "长".repeat(100);
        for name in ["", "x", "Ünïcödé ✓", "a-b c.d/e", "😀😀😀", long.as_str()] {
            for depth in [0, 1, 9, 10, 250] {
                let class = sanitize_class_name(name, depth);
                assert!(is_valid(&class), "invalid class {class:?}");
                assert!(class.starts_with(&format!("l{depth}_")));
            }
        }
    }

    // =========================================================================
    // ClassNames
    // =========================================================================

    #[test]
    fn test_collisions_shared_by_default() {
        let mut names = ClassNames::new(false);
        assert_eq!(names.claim("Icon", 1), "l1_Icon");
        assert_eq!(names.claim("Icon", 1), "l1_Icon");
        assert_eq!(names.claim("Icon!", 1), "l1_Icon_");
    }

    #[test]
    fn test_unique_tiebreakers() {
        let mut names = ClassNames::new(true);
        assert_eq!(names.claim("Icon", 1), "l1_Icon");
        assert_eq!(names.claim("Icon", 1), "l1_Icon_2");
        assert_eq!(names.claim("Icon", 1), "l1_Icon_3");
        assert_eq!(names.claim("Icon", 2), "l2_Icon");
    }

    #[test]
    fn test_unique_without_collision_matches_sanitizer() {
        let mut names = ClassNames::new(true);
        for name in ["Header", "Hero image", "CTA-button"] {
            assert_eq!(names.claim(name, 0), sanitize_class_name(name, 0));
        }
    }

    #[test]
    fn test_unique_tiebreaker_respects_limit() {
        let long = "b".repeat(60);
        let mut names = ClassNames::new(true);
        let first = names.claim(&long, 0);
        let second = names.claim(&long, 0);
        assert_eq!(first.len(), MAX_CLASS_LEN);
        assert_eq!(second.len(), MAX_CLASS_LEN);
        assert!(second.ends_with("_2"));
        assert_ne!(first, second);
        assert!(is_valid(&second));
    }
}
