use crate::regional::DEFAULT_PROPERTY_TYPE;

// Declaration order decides ties: food and beverage before retail before office.
const USE_TO_PROPERTY_TYPE: &[(&str, &str)] = &[
    ("cafe", "restaurant"),
    ("coffee", "restaurant"),
    ("restaurant", "restaurant"),
    ("bar", "restaurant"),
    ("brewery", "restaurant"),
    ("distillery", "restaurant"),
    ("retail", "retail"),
    ("store", "retail"),
    ("shop", "retail"),
    ("office", "office"),
    ("coworking", "office"),
];

/// Maps a free-text proposed use to the real-estate property type of the
/// first keyword it contains.
pub fn resolve_property_type(proposed_use: &str) -> &'static str {
    let normalized = proposed_use.to_lowercase();
    USE_TO_PROPERTY_TYPE
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
        .map(|(_, property_type)| *property_type)
        .unwrap_or(DEFAULT_PROPERTY_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_declared_keyword_wins() {
        assert_eq!(resolve_property_type("Coffee Shop"), "restaurant");
        assert_eq!(resolve_property_type("Craft Brewery Taproom"), "restaurant");
        assert_eq!(resolve_property_type("Bookstore"), "retail");
        assert_eq!(resolve_property_type("Coworking Loft"), "office");
    }

    #[test]
    fn unmapped_use_defaults_to_retail() {
        assert_eq!(resolve_property_type("Widget Factory"), "retail");
        assert_eq!(resolve_property_type(""), "retail");
    }
}
