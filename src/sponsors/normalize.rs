use tracing::debug;

use crate::utils::serde::RawName;

/// Multi-word fragments removed anywhere in the name, in this order.
pub const COMPOUND_PHRASES: &[&str] = &[
    "and co",
    "and company",
    "farmaceutici spa",
    "us inc",
    ", inc",
    "ireland pharmaceuticals",
    "ltd v",
    "branded pharm",
    "pharms intl",
    "an indirect whollyowned su",
    "aventis",
    "msd",
    "sharp dohme",
    "414",
    "sharp amp dohme",
    "limited ellens glen rd",
];

pub const CORPORATE_WORDS: &[&str] = &[
    ".",
    "inc",
    "corp",
    "corporation",
    "sub",
    "llc",
    "limited",
    "ab",
    "as",
    "ltd",
    "lp",
    "llp",
    "allsch",
    "co",
    "healthcare",
    "hlthcare",
    "respiratory",
    "synthelabo",
    "prods",
    "branded",
    "corp.",
    "idec",
    "spa",
    "sb",
    "us",
    "usa",
    "uk",
    "ireland",
    "hk",
    "ma",
    "gmbh",
    "company",
];

pub const PHARMA_WORDS: &[&str] = &[
    "pharma",
    "pharm",
    "pharms",
    "pharmaceuticals",
    "pharmaceutical",
];

pub const BIOTECH_WORDS: &[&str] = &["biotech", "biotechnologies", "biologicals"];

pub const THERAPY_WORDS: &[&str] = &["theraps", "therap"];

pub const VACCINE_WORDS: &[&str] = &[
    "vaccines",
    "vaccine",
    "diagnostics",
    "diagnostic",
    "vaccine and diagnostics",
];

/// Filler categories stripped from either end of a name, one pass each.
pub const AFFIX_CATEGORIES: &[&[&str]] = &[
    CORPORATE_WORDS,
    PHARMA_WORDS,
    BIOTECH_WORDS,
    THERAPY_WORDS,
    VACCINE_WORDS,
];

/// Normalizes a column of raw sponsor names.
///
/// Missing and non-text cells come back as empty strings so the output always
/// lines up row-for-row with the input.
pub fn normalize_names<I, T>(raw_names: I) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<RawName>,
{
    let raw: Vec<RawName> = raw_names.into_iter().map(Into::into).collect();
    let present = raw.iter().filter(|name| name.is_present()).count();
    debug!(present, total = raw.len(), "normalizing sponsor names");

    raw.iter().map(|name| normalize_name(name.as_text())).collect()
}

pub fn normalize_name(raw: &str) -> String {
    let mut name: String = raw
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect();

    for phrase in COMPOUND_PHRASES {
        if name.contains(phrase) {
            name = name.replace(phrase, "");
        }
    }

    for words in AFFIX_CATEGORIES {
        name = strip_affixes(name, words);
    }

    title_case(name.trim())
}

/// Drops the first and the last token when they belong to `words`.
///
/// Only the two end tokens are candidates, so "x pharm pharma" keeps its
/// inner "pharm". The string is returned untouched when nothing matched.
fn strip_affixes(name: String, words: &[&str]) -> String {
    let tokens: Vec<&str> = name.split_whitespace().collect();
    if tokens.is_empty() {
        return name;
    }

    let mut start = 0;
    let mut end = tokens.len();
    if words.contains(&tokens[0]) {
        start = 1;
    }
    if end > start && words.contains(&tokens[end - 1]) {
        end -= 1;
    }
    if start == 0 && end == tokens.len() {
        return name;
    }
    tokens[start..end].join(" ")
}

/// Uppercases every letter that does not follow another letter, so digits
/// and other non-letters also start a new word ("3m" becomes "3M").
fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut after_letter = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if after_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            after_letter = true;
        } else {
            out.push(ch);
            after_letter = false;
        }
    }
    out
}
