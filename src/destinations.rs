//! Destination resolution tables
//!
//! Free-form destinations ("south korea", "Paris") are resolved to an ISO
//! country code for the advisory lookup and a representative city for the
//! weather, events and cost lookups. Unknown destinations keep their own
//! name as the city and default to the US advisory.

/// Destination name to ISO 3166-1 alpha-2 country code
const COUNTRY_CODES: &[(&str, &str)] = &[
    ("south korea", "KR"),
    ("korea", "KR"),
    ("seoul", "KR"),
    ("india", "IN"),
    ("delhi", "IN"),
    ("mumbai", "IN"),
    ("japan", "JP"),
    ("tokyo", "JP"),
    ("nigeria", "NG"),
    ("lagos", "NG"),
    ("france", "FR"),
    ("paris", "FR"),
    ("egypt", "EG"),
    ("cairo", "EG"),
    ("singapore", "SG"),
    ("usa", "US"),
    ("united states", "US"),
    ("uk", "GB"),
    ("united kingdom", "GB"),
    ("germany", "DE"),
    ("brazil", "BR"),
    ("kenya", "KE"),
    ("nairobi", "KE"),
];

/// Country-level destination to a representative city
const CITY_NAMES: &[(&str, &str)] = &[
    ("south korea", "Seoul"),
    ("korea", "Seoul"),
    ("india", "Delhi"),
    ("japan", "Tokyo"),
    ("nigeria", "Lagos"),
    ("france", "Paris"),
    ("kenya", "Nairobi"),
    ("brazil", "Sao Paulo"),
    ("egypt", "Cairo"),
    ("singapore", "Singapore"),
];

/// Resolve a destination to an advisory country code, defaulting to `US`
#[must_use]
pub fn country_code_for(destination: &str) -> &'static str {
    let key = destination.trim().to_lowercase();
    COUNTRY_CODES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or("US", |(_, code)| *code)
}

/// Resolve a destination to a city name, keeping unknown names as-is
#[must_use]
pub fn city_for(destination: &str) -> &str {
    let key = destination.trim().to_lowercase();
    CITY_NAMES
        .iter()
        .find(|(name, _)| *name == key)
        .map_or(destination, |(_, city)| *city)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("South Korea", "KR")]
    #[case("seoul", "KR")]
    #[case("JAPAN", "JP")]
    #[case("united kingdom", "GB")]
    #[case("Atlantis", "US")]
    fn test_country_code_resolution(#[case] destination: &str, #[case] expected: &str) {
        assert_eq!(country_code_for(destination), expected);
    }

    #[rstest]
    #[case("south korea", "Seoul")]
    #[case("Japan", "Tokyo")]
    #[case("BRAZIL", "Sao Paulo")]
    fn test_city_resolution(#[case] destination: &str, #[case] expected: &str) {
        assert_eq!(city_for(destination), expected);
    }

    #[test]
    fn test_unknown_destination_keeps_own_name() {
        assert_eq!(city_for("Reykjavik"), "Reykjavik");
    }
}
