use std::sync::OnceLock;

use minijinja::{Environment, context};

use crate::error::SponsorMatchError;
use crate::fuzzy::FuzzyMatch;
use crate::sponsors::{SponsorCount, SponsorMapping, SponsorName};

static ENV: OnceLock<Environment<'static>> = OnceLock::new();

fn env() -> Result<&'static Environment<'static>, SponsorMatchError> {
    if let Some(env) = ENV.get() {
        return Ok(env);
    }

    let mut env = Environment::new();
    env.add_filter("cell", |s: String| -> String {
        let s = s.trim();
        if s.is_empty() {
            return "-".to_string();
        }
        s.replace('|', "\\|")
    });
    env.add_filter("score", |v: f64| -> String { format!("{v:.3}") });
    env.add_template("names.md.j2", include_str!("../../templates/names.md.j2"))?;
    env.add_template("rename.md.j2", include_str!("../../templates/rename.md.j2"))?;
    env.add_template(
        "top_sponsors.md.j2",
        include_str!("../../templates/top_sponsors.md.j2"),
    )?;
    env.add_template("fuzzy.md.j2", include_str!("../../templates/fuzzy.md.j2"))?;

    let _ = ENV.set(env);
    ENV.get().ok_or_else(|| SponsorMatchError::InvalidArgument("template environment".into()))
}

pub fn names_markdown(names: &[SponsorName]) -> Result<String, SponsorMatchError> {
    let tmpl = env()?.get_template("names.md.j2")?;
    Ok(tmpl.render(context! { names => names })?)
}

pub fn rename_markdown(
    title: &str,
    mappings: &[SponsorMapping],
) -> Result<String, SponsorMatchError> {
    let with_sponsor = mappings.iter().filter(|m| !m.sponsor.is_empty()).count();
    let tmpl = env()?.get_template("rename.md.j2")?;
    Ok(tmpl.render(context! {
        title => title,
        mappings => mappings,
        with_sponsor => with_sponsor,
    })?)
}

pub fn top_sponsors_markdown(
    counts: &[SponsorCount],
    unique_drugs_only: bool,
) -> Result<String, SponsorMatchError> {
    let tmpl = env()?.get_template("top_sponsors.md.j2")?;
    Ok(tmpl.render(context! {
        counts => counts,
        unique_drugs_only => unique_drugs_only,
    })?)
}

pub fn fuzzy_markdown(
    target: &str,
    threshold: f64,
    segments: usize,
    result: &FuzzyMatch,
) -> Result<String, SponsorMatchError> {
    let tmpl = env()?.get_template("fuzzy.md.j2")?;
    Ok(tmpl.render(context! {
        target => target,
        threshold => threshold,
        segments => segments,
        score => result.score,
        ngram => result.ngram.as_deref().unwrap_or_default(),
    })?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_table_lists_each_stage() {
        let names = vec![SponsorName {
            raw: "Pfizer Inc.".into(),
            normalized: "Pfizer".into(),
            canonical: "Pfizer".into(),
        }];
        let md = names_markdown(&names).expect("markdown");
        assert!(md.contains("# Sponsor Names"));
        assert!(md.contains("| Pfizer Inc. | Pfizer | Pfizer |"));
    }

    #[test]
    fn rename_table_marks_missing_cells() {
        let mappings = vec![
            SponsorMapping {
                row: 0,
                drug_name: "Paxlovid".into(),
                raw_sponsor: "Pfizer Inc.".into(),
                sponsor: "Pfizer".into(),
            },
            SponsorMapping {
                row: 1,
                drug_name: "Mystery | Drug".into(),
                raw_sponsor: String::new(),
                sponsor: String::new(),
            },
        ];
        let md = rename_markdown("Sponsor Renames", &mappings).expect("markdown");
        assert!(md.contains("# Sponsor Renames"));
        assert!(md.contains("| 0 | Paxlovid | Pfizer Inc. | Pfizer |"));
        assert!(md.contains("| 1 | Mystery \\| Drug | - | - |"));
        assert!(md.contains("1/2 rows have a sponsor."));
    }

    #[test]
    fn top_sponsors_table_and_empty_state() {
        let counts = vec![SponsorCount {
            sponsor: "Merck".into(),
            count: 4,
        }];
        let md = top_sponsors_markdown(&counts, true).expect("markdown");
        assert!(md.contains("| Sponsor | Unique drugs |"));
        assert!(md.contains("| Merck | 4 |"));

        let md = top_sponsors_markdown(&counts, false).expect("markdown");
        assert!(md.contains("| Sponsor | Rows |"));

        let md = top_sponsors_markdown(&[], true).expect("markdown");
        assert!(md.contains("No sponsors found."));
    }

    #[test]
    fn fuzzy_report_formats_scores() {
        let result = FuzzyMatch {
            score: 0.8,
            ngram: Some("trop3".into()),
        };
        let md = fuzzy_markdown("trop2", 0.9, 2, &result).expect("markdown");
        assert!(md.contains("# Fuzzy Match: trop2"));
        assert!(md.contains("| Score | 0.800 |"));
        assert!(md.contains("| Match | trop3 |"));
        assert!(md.contains("| Threshold | 0.900 |"));

        let none = FuzzyMatch {
            score: 0.0,
            ngram: None,
        };
        let md = fuzzy_markdown("trop2", 0.8, 0, &none).expect("markdown");
        assert!(md.contains("| Match | - |"));
    }
}
