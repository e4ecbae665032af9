//! Static book tables: canonical names, API identifiers and abbreviations.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Canonical book names in canon order with their 3-letter API identifiers.
pub const BOOKS: [(&str, &str); 66] = [
    ("Genesis", "GEN"),
    ("Exodus", "EXO"),
    ("Leviticus", "LEV"),
    ("Numbers", "NUM"),
    ("Deuteronomy", "DEU"),
    ("Joshua", "JOS"),
    ("Judges", "JDG"),
    ("Ruth", "RUT"),
    ("1 Samuel", "1SA"),
    ("2 Samuel", "2SA"),
    ("1 Kings", "1KI"),
    ("2 Kings", "2KI"),
    ("1 Chronicles", "1CH"),
    ("2 Chronicles", "2CH"),
    ("Ezra", "EZR"),
    ("Nehemiah", "NEH"),
    ("Esther", "EST"),
    ("Job", "JOB"),
    ("Psalms", "PSA"),
    ("Proverbs", "PRO"),
    ("Ecclesiastes", "ECC"),
    ("Song of Songs", "SNG"),
    ("Isaiah", "ISA"),
    ("Jeremiah", "JER"),
    ("Lamentations", "LAM"),
    ("Ezekiel", "EZK"),
    ("Daniel", "DAN"),
    ("Hosea", "HOS"),
    ("Joel", "JOL"),
    ("Amos", "AMO"),
    ("Obadiah", "OBA"),
    ("Jonah", "JON"),
    ("Micah", "MIC"),
    ("Nahum", "NAM"),
    ("Habakkuk", "HAB"),
    ("Zephaniah", "ZEP"),
    ("Haggai", "HAG"),
    ("Zechariah", "ZEC"),
    ("Malachi", "MAL"),
    ("Matthew", "MAT"),
    ("Mark", "MRK"),
    ("Luke", "LUK"),
    ("John", "JHN"),
    ("Acts", "ACT"),
    ("Romans", "ROM"),
    ("1 Corinthians", "1CO"),
    ("2 Corinthians", "2CO"),
    ("Galatians", "GAL"),
    ("Ephesians", "EPH"),
    ("Philippians", "PHP"),
    ("Colossians", "COL"),
    ("1 Thessalonians", "1TH"),
    ("2 Thessalonians", "2TH"),
    ("1 Timothy", "1TI"),
    ("2 Timothy", "2TI"),
    ("Titus", "TIT"),
    ("Philemon", "PHM"),
    ("Hebrews", "HEB"),
    ("James", "JAS"),
    ("1 Peter", "1PE"),
    ("2 Peter", "2PE"),
    ("1 John", "1JN"),
    ("2 John", "2JN"),
    ("3 John", "3JN"),
    ("Jude", "JUD"),
    ("Revelation", "REV"),
];

/// Lower-case abbreviation → canonical name.
const ABBREVIATIONS: [(&str, &str); 66] = [
    ("gen", "Genesis"),
    ("ex", "Exodus"),
    ("lev", "Leviticus"),
    ("num", "Numbers"),
    ("deut", "Deuteronomy"),
    ("josh", "Joshua"),
    ("judg", "Judges"),
    ("ruth", "Ruth"),
    ("1 sam", "1 Samuel"),
    ("2 sam", "2 Samuel"),
    ("1 kgs", "1 Kings"),
    ("2 kgs", "2 Kings"),
    ("1 chr", "1 Chronicles"),
    ("2 chr", "2 Chronicles"),
    ("ezra", "Ezra"),
    ("neh", "Nehemiah"),
    ("esth", "Esther"),
    ("job", "Job"),
    ("ps", "Psalms"),
    ("prov", "Proverbs"),
    ("eccl", "Ecclesiastes"),
    ("song", "Song of Songs"),
    ("isa", "Isaiah"),
    ("jer", "Jeremiah"),
    ("lam", "Lamentations"),
    ("ezek", "Ezekiel"),
    ("dan", "Daniel"),
    ("hos", "Hosea"),
    ("joel", "Joel"),
    ("amos", "Amos"),
    ("obad", "Obadiah"),
    ("jonah", "Jonah"),
    ("mic", "Micah"),
    ("nah", "Nahum"),
    ("hab", "Habakkuk"),
    ("zeph", "Zephaniah"),
    ("hag", "Haggai"),
    ("zech", "Zechariah"),
    ("mal", "Malachi"),
    ("matt", "Matthew"),
    ("mark", "Mark"),
    ("luke", "Luke"),
    ("john", "John"),
    ("acts", "Acts"),
    ("rom", "Romans"),
    ("1 cor", "1 Corinthians"),
    ("2 cor", "2 Corinthians"),
    ("gal", "Galatians"),
    ("eph", "Ephesians"),
    ("phil", "Philippians"),
    ("col", "Colossians"),
    ("1 thess", "1 Thessalonians"),
    ("2 thess", "2 Thessalonians"),
    ("1 tim", "1 Timothy"),
    ("2 tim", "2 Timothy"),
    ("titus", "Titus"),
    ("philem", "Philemon"),
    ("heb", "Hebrews"),
    ("james", "James"),
    ("1 pet", "1 Peter"),
    ("2 pet", "2 Peter"),
    ("1 jn", "1 John"),
    ("2 jn", "2 John"),
    ("3 jn", "3 John"),
    ("jude", "Jude"),
    ("rev", "Revelation"),
];

static BOOK_IDS: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| BOOKS.into_iter().collect());

static ABBREVIATION_MAP: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| ABBREVIATIONS.into_iter().collect());

/// API identifier for a canonical book name, e.g. `"John"` → `"JHN"`.
pub fn book_id(canonical: &str) -> Option<&'static str> {
    BOOK_IDS.get(canonical).copied()
}

/// Resolve a book token to its canonical name.
///
/// The lower-cased token is looked up in the abbreviation table first, then
/// compared case-insensitively against the canonical names.
pub fn canonical_book(token: &str) -> Option<&'static str> {
    let lowered = token.trim().to_lowercase();

    if let Some(name) = ABBREVIATION_MAP.get(lowered.as_str()) {
        return Some(name);
    }

    BOOKS
        .iter()
        .map(|(name, _)| *name)
        .find(|name| name.eq_ignore_ascii_case(&lowered))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_abbreviation_targets_a_known_book() {
        for (abbreviation, name) in ABBREVIATIONS {
            assert!(book_id(name).is_some(), "{abbreviation} -> {name}");
        }
    }

    #[test]
    fn ids_are_unique() {
        let mut ids: Vec<_> = BOOKS.iter().map(|(_, id)| *id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BOOKS.len());
    }

    #[test]
    fn abbreviation_wins_over_canonical_lookup() {
        assert_eq!(canonical_book("1 cor"), Some("1 Corinthians"));
        assert_eq!(canonical_book("1 CORINTHIANS"), Some("1 Corinthians"));
        assert_eq!(canonical_book("Judea"), None);
    }
}
