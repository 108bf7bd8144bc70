//! Shared string utilities for artifact names.

/// Lower-case the first character (e.g., "OrderItem" -> "orderItem")
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_lowercase().chain(chars).collect(),
    }
}

/// Remove the last extension of a file name (e.g., "Order.java" -> "Order")
pub fn strip_extension(file_name: &str) -> &str {
    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Remove the first matching trailing role suffix
/// (e.g., "OrderMapper" with ["Mapper", "Example"] -> "Order").
///
/// A stem that consists only of a suffix is returned unchanged.
pub fn strip_role_suffix<'a>(stem: &'a str, suffixes: &[&str]) -> &'a str {
    suffixes
        .iter()
        .find_map(|suffix| stem.strip_suffix(suffix).filter(|rest| !rest.is_empty()))
        .unwrap_or(stem)
}

/// Whether `c` can be part of a source identifier.
pub fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_first() {
        assert_eq!(lower_first("Order"), "order");
        assert_eq!(lower_first("OrderItem"), "orderItem");
        assert_eq!(lower_first("order"), "order");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("Order.java"), "Order");
        assert_eq!(strip_extension("OrderMapper.xml"), "OrderMapper");
        assert_eq!(strip_extension("Order"), "Order");
        assert_eq!(strip_extension(".hidden"), ".hidden");
    }

    #[test]
    fn test_strip_role_suffix() {
        let suffixes = ["Mapper", "Example"];
        assert_eq!(strip_role_suffix("OrderMapper", &suffixes), "Order");
        assert_eq!(strip_role_suffix("OrderExample", &suffixes), "Order");
        assert_eq!(strip_role_suffix("Order", &suffixes), "Order");
        assert_eq!(strip_role_suffix("Mapper", &suffixes), "Mapper");
        // Only trailing suffixes are stripped
        assert_eq!(strip_role_suffix("MapperConfig", &suffixes), "MapperConfig");
    }

    #[test]
    fn test_is_ident_char() {
        assert!(is_ident_char('a'));
        assert!(is_ident_char('Z'));
        assert!(is_ident_char('_'));
        assert!(is_ident_char('$'));
        assert!(is_ident_char('9'));
        assert!(!is_ident_char('.'));
        assert!(!is_ident_char('"'));
        assert!(!is_ident_char(' '));
    }
}
