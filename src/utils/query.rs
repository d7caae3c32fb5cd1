/// Escapes a term for openFDA's Lucene-style `search` parameter.
///
/// Sponsor names routinely carry `-`, `&`, `/` and parentheses, each of which
/// is query syntax, so every Lucene special character is backslash-escaped.
pub(crate) fn escape_lucene_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        if matches!(
            ch,
            '\\' | '+'
                | '-'
                | '!'
                | '('
                | ')'
                | '{'
                | '}'
                | '['
                | ']'
                | '^'
                | '"'
                | '~'
                | '*'
                | '?'
                | ':'
                | '/'
                | '&'
                | '|'
        ) {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::escape_lucene_value;

    #[test]
    fn escapes_sponsor_name_punctuation() {
        assert_eq!(
            escape_lucene_value("Merck Sharp & Dohme (MSD) A/S"),
            r"Merck Sharp \& Dohme \(MSD\) A\/S"
        );
        assert_eq!(escape_lucene_value("Bristol-Myers"), r"Bristol\-Myers");
    }

    #[test]
    fn leaves_plain_names_untouched() {
        assert_eq!(escape_lucene_value("Pfizer Inc."), "Pfizer Inc.");
    }
}
