//! Pluralization for resource names in URLs
//!
//! Handles the common English rules so entity macros can derive
//! "/api/companies" from "company" without a per-entity override.

/// Utility for converting singular entity names to their plural form
pub struct Pluralizer;

impl Pluralizer {
    /// Convert a singular noun to its plural form
    ///
    /// # Examples
    ///
    /// ```
    /// use bureau::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("customer"), "customers");
    /// assert_eq!(Pluralizer::pluralize("company"), "companies");
    /// assert_eq!(Pluralizer::pluralize("address"), "addresses");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        if singular.is_empty() {
            return singular.to_string();
        }

        match singular {
            // Words ending in consonant + y -> ies
            s if s.ends_with("y")
                && !s.ends_with("ay")
                && !s.ends_with("ey")
                && !s.ends_with("iy")
                && !s.ends_with("oy")
                && !s.ends_with("uy")
                && s.len() > 1 =>
            {
                format!("{}ies", &s[..s.len() - 1])
            }

            // Words ending in s, ss, sh, ch, x, z -> es
            s if s.ends_with("s")
                || s.ends_with("sh")
                || s.ends_with("ch")
                || s.ends_with("x")
                || s.ends_with("z") =>
            {
                format!("{}es", s)
            }

            // Default: just add s
            s => format!("{}s", s),
        }
    }
}
