//! Interest-based destination discovery
//!
//! Pure-local suggestions: each interest maps to a handful of destinations,
//! places already visited are skipped, duplicates collapse in first-seen
//! order, and at most five suggestions are returned.

/// Interest keyword to candidate destinations
const INTEREST_DESTINATIONS: &[(&str, &[&str])] = &[
    ("culture", &["Kyoto", "Istanbul", "Rome", "Cairo"]),
    ("adventure", &["Patagonia", "Nepal", "Iceland", "New Zealand"]),
    ("food", &["Tokyo", "Bangkok", "Lima", "Barcelona"]),
    ("nature", &["Costa Rica", "Norway", "Tanzania", "Canada"]),
    ("history", &["Athens", "Jerusalem", "Petra", "Angkor Wat"]),
    ("nightlife", &["Berlin", "Ibiza", "Las Vegas", "Amsterdam"]),
    ("shopping", &["Dubai", "Singapore", "Milan", "Hong Kong"]),
    ("relaxation", &["Maldives", "Bali", "Santorini", "Seychelles"]),
];

/// Maximum number of suggestions returned
const MAX_SUGGESTIONS: usize = 5;

/// Suggest new destinations for the given interests, skipping visited ones
#[must_use]
pub fn suggest(interests: &[String], history: &[String]) -> Vec<String> {
    let mut suggestions: Vec<String> = Vec::new();

    for interest in interests {
        let key = interest.trim().to_lowercase();
        let Some((_, destinations)) = INTEREST_DESTINATIONS
            .iter()
            .find(|(name, _)| *name == key)
        else {
            continue;
        };

        for destination in *destinations {
            let visited = history.iter().any(|h| h.eq_ignore_ascii_case(destination));
            let seen = suggestions.iter().any(|s| s == destination);
            if !visited && !seen {
                suggestions.push((*destination).to_string());
            }
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}
