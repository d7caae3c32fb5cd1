use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use super::canonical::canonicalize;
use super::normalize::normalize_names;
use crate::utils::serde::RawName;

/// One record of a tabular drug dataset.
pub type Row = Map<String, Value>;

const FDA_DRUG_NAME_FIELD: &str = "fda_drug_name";
pub const DEFAULT_TOP_SPONSORS: usize = 50;

#[derive(Debug, Clone)]
pub struct RenameOptions {
    pub drug_name_field: String,
    pub sponsor_field: String,
    pub new_field: String,
}

impl Default for RenameOptions {
    fn default() -> Self {
        Self {
            drug_name_field: "drug_name".to_string(),
            sponsor_field: "fda_2_sponsor".to_string(),
            new_field: "sponsor".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SponsorMapping {
    pub row: usize,
    pub drug_name: String,
    pub raw_sponsor: String,
    pub sponsor: String,
}

#[derive(Debug, Clone)]
pub struct TopSponsorOptions {
    pub drug_name_field: String,
    pub sponsor_field: String,
    pub unique_drugs_only: bool,
    pub limit: usize,
}

impl Default for TopSponsorOptions {
    fn default() -> Self {
        Self {
            drug_name_field: "drug_name".to_string(),
            sponsor_field: "sponsor".to_string(),
            unique_drugs_only: true,
            limit: DEFAULT_TOP_SPONSORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SponsorCount {
    pub sponsor: String,
    pub count: usize,
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(_) => RawName::from_value(value).as_text().to_string(),
        other => other.to_string(),
    }
}

fn field_text(row: &Row, field: &str) -> String {
    row.get(field).map(cell_text).unwrap_or_default()
}

/// Normalizes and canonicalizes the sponsor column of `rows` in place.
///
/// The result lands in `options.new_field`; rows without a sponsor cell get
/// an empty string. When the table carries an `fda_drug_name` column it is
/// preferred for the reported drug name.
pub fn rename_sponsors<S: AsRef<str>>(
    rows: &mut [Row],
    options: &RenameOptions,
    canonical: &[S],
) -> Vec<SponsorMapping> {
    let raw: Vec<RawName> = rows
        .iter()
        .map(|row| {
            row.get(&options.sponsor_field)
                .map(RawName::from_value)
                .unwrap_or_default()
        })
        .collect();
    let normalized = normalize_names(raw.iter().cloned());

    let drug_name_field = if rows.iter().any(|row| row.contains_key(FDA_DRUG_NAME_FIELD)) {
        FDA_DRUG_NAME_FIELD
    } else {
        options.drug_name_field.as_str()
    };

    let mut mappings = Vec::with_capacity(rows.len());
    for (index, (row, name)) in rows.iter_mut().zip(normalized).enumerate() {
        let sponsor = canonicalize(&name, canonical);
        let raw_sponsor = raw[index].as_text().to_string();
        let drug_name = field_text(row, drug_name_field);
        debug!(
            row = index,
            drug = %drug_name,
            raw = %raw_sponsor,
            sponsor = %sponsor,
            "renamed sponsor"
        );
        row.insert(options.new_field.clone(), Value::String(sponsor.clone()));
        mappings.push(SponsorMapping {
            row: index,
            drug_name,
            raw_sponsor,
            sponsor,
        });
    }
    mappings
}

/// Counts drugs per sponsor, most frequent first.
///
/// Empty sponsors are skipped. Ties keep the order in which sponsors first
/// appear in the table.
pub fn top_sponsors(rows: &[Row], options: &TopSponsorOptions) -> Vec<SponsorCount> {
    let mut seen_pairs: HashSet<(String, String)> = HashSet::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<SponsorCount> = Vec::new();

    for row in rows {
        let sponsor = field_text(row, &options.sponsor_field);
        if options.unique_drugs_only {
            let drug_name = field_text(row, &options.drug_name_field);
            if !seen_pairs.insert((drug_name, sponsor.clone())) {
                continue;
            }
        }
        if sponsor.is_empty() {
            continue;
        }
        match positions.get(&sponsor) {
            Some(&position) => counts[position].count += 1,
            None => {
                positions.insert(sponsor.clone(), counts.len());
                counts.push(SponsorCount { sponsor, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(options.limit);
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sponsors::FDA_SPONSORS;
    use serde_json::json;

    fn rows(value: Value) -> Vec<Row> {
        serde_json::from_value(value).expect("rows")
    }

    #[test]
    fn rename_writes_canonical_column() {
        let mut table = rows(json!([
            {"drug_name": "Paxlovid", "fda_2_sponsor": "Pfizer Inc."},
            {"drug_name": "Tagrisso", "fda_2_sponsor": ["AstraZeneca Pharmaceuticals LP"]},
            {"drug_name": "Unknown", "fda_2_sponsor": null},
            {"drug_name": "Orphan"}
        ]));

        let mappings = rename_sponsors(&mut table, &RenameOptions::default(), FDA_SPONSORS);

        assert_eq!(table[0]["sponsor"], json!("Pfizer"));
        assert_eq!(table[1]["sponsor"], json!("Astrazeneca"));
        assert_eq!(table[2]["sponsor"], json!(""));
        assert_eq!(table[3]["sponsor"], json!(""));
        assert_eq!(mappings.len(), 4);
        assert_eq!(mappings[1].drug_name, "Tagrisso");
        assert_eq!(mappings[1].raw_sponsor, "AstraZeneca Pharmaceuticals LP");
        assert_eq!(mappings[1].sponsor, "Astrazeneca");
    }

    #[test]
    fn rename_prefers_fda_drug_name_column() {
        let mut table = rows(json!([
            {"drug_name": "nirmatrelvir", "fda_drug_name": "Paxlovid", "fda_2_sponsor": "Pfizer"}
        ]));
        let mappings = rename_sponsors(&mut table, &RenameOptions::default(), FDA_SPONSORS);
        assert_eq!(mappings[0].drug_name, "Paxlovid");
    }

    #[test]
    fn rename_honors_custom_fields_and_list() {
        let mut table = rows(json!([
            {"name": "X", "manufacturer": "Acme Holdings Inc"}
        ]));
        let options = RenameOptions {
            drug_name_field: "name".into(),
            sponsor_field: "manufacturer".into(),
            new_field: "company".into(),
        };
        let mappings = rename_sponsors(&mut table, &options, &["Acme Holdings"]);
        assert_eq!(table[0]["company"], json!("Acme Holdings"));
        assert_eq!(table[0]["manufacturer"], json!("Acme Holdings Inc"));
        assert_eq!(mappings[0].drug_name, "X");
    }

    #[test]
    fn top_sponsors_counts_unique_drugs() {
        let table = rows(json!([
            {"drug_name": "a", "sponsor": "Pfizer"},
            {"drug_name": "a", "sponsor": "Pfizer"},
            {"drug_name": "b", "sponsor": "Pfizer"},
            {"drug_name": "c", "sponsor": "Merck"},
            {"drug_name": "d", "sponsor": "Amgen"},
            {"drug_name": "e", "sponsor": "Merck"},
            {"drug_name": "f", "sponsor": ""},
            {"drug_name": "g"}
        ]));

        let top = top_sponsors(&table, &TopSponsorOptions::default());
        assert_eq!(
            top,
            vec![
                SponsorCount { sponsor: "Pfizer".into(), count: 2 },
                SponsorCount { sponsor: "Merck".into(), count: 2 },
                SponsorCount { sponsor: "Amgen".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn top_sponsors_all_rows_and_limit() {
        let table = rows(json!([
            {"drug_name": "a", "sponsor": "Pfizer"},
            {"drug_name": "a", "sponsor": "Pfizer"},
            {"drug_name": "c", "sponsor": "Merck"}
        ]));
        let options = TopSponsorOptions {
            unique_drugs_only: false,
            limit: 1,
            ..Default::default()
        };
        assert_eq!(
            top_sponsors(&table, &options),
            vec![SponsorCount { sponsor: "Pfizer".into(), count: 2 }]
        );
        assert!(top_sponsors(&[], &TopSponsorOptions::default()).is_empty());
    }
}
