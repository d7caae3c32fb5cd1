/// Edit distance over characters with unit insert, delete and substitute costs.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    edit_distance(&a, &b, 1)
}

/// Similarity in `[0, 1]` derived from the edit distance.
///
/// Substitutions cost 2 here (a delete plus an insert), which makes the ratio
/// `(len(a) + len(b) - distance) / (len(a) + len(b))`. Either string being
/// empty yields 0.
pub fn levenshtein_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let total = a.len() + b.len();
    let distance = edit_distance(&a, &b, 2);
    total.saturating_sub(distance) as f64 / total as f64
}

fn edit_distance(a: &[char], b: &[char], substitution_cost: usize) -> usize {
    // single rolling row: prev[j] is the distance between a[..i] and b[..j]
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr: Vec<usize> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { substitution_cost };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_matches_classic_examples() {
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("flaw", "lawn"), 2);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("same", "same"), 0);
    }

    #[test]
    fn ratio_of_string_with_itself_is_one() {
        for s in ["trop2", "her2 positive", "ß", "pembrolizumab"] {
            assert_eq!(levenshtein_ratio(s, s), 1.0);
        }
    }

    #[test]
    fn ratio_uses_double_substitution_cost() {
        // one substitution costs 2 over a combined length of 10
        assert!((levenshtein_ratio("trop2", "trop3") - 0.8).abs() < 1e-12);
        // "kitten"/"sitting": 2 substitutions + 1 insert = 5 over 13
        assert!((levenshtein_ratio("kitten", "sitting") - 8.0 / 13.0).abs() < 1e-12);
    }

    #[test]
    fn ratio_with_empty_side_is_zero() {
        assert_eq!(levenshtein_ratio("", ""), 0.0);
        assert_eq!(levenshtein_ratio("abc", ""), 0.0);
        assert_eq!(levenshtein_ratio("", "abc"), 0.0);
    }

    #[test]
    fn ratio_counts_characters_not_bytes() {
        assert!((levenshtein_ratio("é", "e") - 0.0).abs() < 1e-12);
        assert!((levenshtein_ratio("éa", "ea") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn ratio_stays_in_unit_interval() {
        let pairs = [("abc", "xyz"), ("a", "abcdef"), ("trastuzumab", "pertuzumab")];
        for (a, b) in pairs {
            let r = levenshtein_ratio(a, b);
            assert!((0.0..=1.0).contains(&r), "{a}/{b} -> {r}");
        }
        assert_eq!(levenshtein_ratio("abc", "xyz"), 0.0);
    }
}
