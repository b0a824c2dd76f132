//! Coarse screen categories for presentation grouping.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreenCategory {
    Auth,
    Main,
    Admin,
    Onboarding,
    Feature,
}

/// Ordered match table; the first category with a matching substring wins.
const CATEGORY_HINTS: [(ScreenCategory, &[&str]); 4] = [
    (
        ScreenCategory::Auth,
        &["login", "logout", "signin", "signup", "register", "auth", "password"],
    ),
    (ScreenCategory::Main, &["dashboard", "home", "main"]),
    (ScreenCategory::Admin, &["admin", "manage", "audit"]),
    (
        ScreenCategory::Onboarding,
        &["onboarding", "welcome", "tutorial", "setup", "intro"],
    ),
];

/// Classify a screen by its name. Anything unmatched is a feature screen.
pub fn classify_screen(name: &str) -> ScreenCategory {
    let lower = name.to_lowercase();
    CATEGORY_HINTS
        .iter()
        .find(|(_, hints)| hints.iter().any(|hint| lower.contains(hint)))
        .map(|(category, _)| *category)
        .unwrap_or(ScreenCategory::Feature)
}
