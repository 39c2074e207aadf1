//! Static registry of friend groups.
//!
//! A group code is a short nickname for a recurring set of people (the
//! flatmates, the office lunch crowd). Lookup is case- and
//! accent-insensitive so `HSR`, `hsr` and `hšr` resolve the same way.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// Known group codes and their ordered member names.
const FRIEND_GROUPS: &[(&str, &[&str])] = &[
    (
        "ecityhp",
        &[
            "Shetty",
            "Madhu",
            "Shaun",
            "Sai",
            "Calvin",
            "Gaman",
            "Rishika",
            "Siddhanth",
            "Sharanya",
            "Rachana",
        ],
    ),
    ("hsr", &["Calvin", "Gaman", "Hardhik", "Jason"]),
];

/// Resolve a group code to its ordered member names.
pub fn lookup(code: &str) -> Option<&'static [&'static str]> {
    let key = normalize_code(code);
    FRIEND_GROUPS
        .iter()
        .find(|(group_code, _)| *group_code == key)
        .map(|(_, names)| *names)
}

/// Fold a code for lookup: NFKD, drop combining marks, lowercase, keep only
/// alphanumeric characters.
fn normalize_code(code: &str) -> String {
    let mut out = String::new();
    for ch in code.trim().nfkd() {
        if is_combining_mark(ch) {
            continue;
        }
        if ch.is_alphanumeric() {
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(lookup("HSR"), lookup("hsr"));
        assert!(lookup("hsr").is_some());
    }

    #[test]
    fn lookup_folds_accents() {
        assert_eq!(lookup("écityhp"), lookup("ecityhp"));
        assert!(lookup("ecityhp").is_some());
    }

    #[test]
    fn registry_members_are_complete() {
        let names = lookup("ecityhp").unwrap();
        assert_eq!(names.len(), 10);
        assert_eq!(names[8], "Sharanya");
        assert_eq!(names[9], "Rachana");
    }

    #[test]
    fn unknown_code_is_none() {
        assert!(lookup("nope").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn member_order_is_stable() {
        let names = lookup("hsr").unwrap();
        assert_eq!(names, ["Calvin", "Gaman", "Hardhik", "Jason"]);
    }
}
