//! Player name normalization shared by searches and the player registry

/// Trim, collapse inner whitespace and title-case every word ("paul  mcbeth" -> "Paul Mcbeth")
pub fn normalize_name(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut normalized = String::with_capacity(collapsed.len());
    let mut previous_is_letter = false;
    for c in collapsed.chars() {
        if previous_is_letter {
            normalized.extend(c.to_lowercase());
        } else {
            normalized.extend(c.to_uppercase());
        }
        previous_is_letter = c.is_alphabetic();
    }
    normalized
}

/// First and last word of a normalized name; a single-word name is both
pub fn split_name(normalized: &str) -> (&str, &str) {
    let first = normalized.split(' ').next().unwrap_or_default();
    let last = normalized.rsplit(' ').next().unwrap_or_default();
    (first, last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_name() {
        assert_eq!(normalize_name("  paul mcbeth "), "Paul Mcbeth");
        assert_eq!(normalize_name("KRISTIN   TATTAR"), "Kristin Tattar");
        assert_eq!(normalize_name("o'brien"), "O'Brien");
        assert_eq!(normalize_name(""), "");
    }

    #[test]
    fn test_split_name() {
        assert_eq!(split_name("Calvin Heimburg"), ("Calvin", "Heimburg"));
        assert_eq!(split_name("Ricky Wysocki Jr"), ("Ricky", "Jr"));
        assert_eq!(split_name("Simon"), ("Simon", "Simon"));
    }
}
