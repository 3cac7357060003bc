//! Pest name normalization.

/// Category given to pests created on first mention during a sync.
pub const DEFAULT_PEST_CATEGORY: &str = "uncategorized";

/// Canonical form of a pest name: surrounding whitespace removed.
pub fn canonical_pest_name(name: &str) -> Option<&str> {
    let trimmed = name.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Canonicalize a list of pest names, dropping blanks and repeats while
/// keeping first-mention order.
pub fn normalize_pest_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        if let Some(canonical) = canonical_pest_name(name.as_ref()) {
            if !out.iter().any(|n| n == canonical) {
                out.push(canonical.to_string());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_dedups_in_order() {
        let names = ["  Cupim ", "Erva-de-passarinho", "Cupim", "", "   "];
        assert_eq!(
            normalize_pest_names(&names),
            vec!["Cupim".to_string(), "Erva-de-passarinho".to_string()]
        );
    }

    #[test]
    fn matching_is_case_sensitive() {
        let names = ["Cupim", "cupim"];
        assert_eq!(normalize_pest_names(&names).len(), 2);
    }
}
