//! URL slugs derived from FAQ questions.

/// Lowercase, trim, spaces → `-`, drop `?` and `.`.
pub fn make_slug(text: &str) -> String {
    text.to_lowercase()
        .trim()
        .replace(' ', "-")
        .replace(['?', '.'], "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_slug() {
        assert_eq!(make_slug("How do I reset my password?"), "how-do-i-reset-my-password");
        assert_eq!(make_slug("  Version 2.0 notes. "), "version-20-notes");
        assert_eq!(make_slug("¿Cómo funciona el soporte?"), "¿cómo-funciona-el-soporte");
    }

    #[test]
    fn test_make_slug_empty() {
        assert_eq!(make_slug("   "), "");
        assert_eq!(make_slug("?."), "");
    }
}
