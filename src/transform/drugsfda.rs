use serde_json::Value;

use crate::sources::openfda::DrugsFdaResult;
use crate::sponsors::Row;

pub(crate) const SPONSOR_NAME_FIELD: &str = "sponsor_name";
pub(crate) const DRUG_NAME_FIELD: &str = "drug_name";
const APPLICATION_NUMBER_FIELD: &str = "application_number";
const DOSAGE_FORM_FIELD: &str = "dosage_form";
const MARKETING_STATUS_FIELD: &str = "marketing_status";

const DOSE_INFORMATION_WORDS: &[&str] = &["capsule", "kit"];

/// Cuts presentation noise off a product name.
///
/// "Sivextro (tablet)" becomes "Sivextro"; anything from a dose-information
/// word such as "capsule" or "kit" onward is dropped too.
pub fn clean_drug_name(name: Option<&str>) -> Option<String> {
    let mut name = name?.to_string();
    if let Some((head, _)) = name.split_once('(') {
        name = head.trim().to_string();
    }
    for word in DOSE_INFORMATION_WORDS {
        if let Some((head, _)) = name.split_once(word) {
            name = head.trim().to_string();
        }
    }
    Some(name)
}

fn first_non_empty<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    values
        .into_iter()
        .map(str::trim)
        .find(|value| !value.is_empty())
}

fn drug_name(result: &DrugsFdaResult) -> Option<String> {
    let from_products = first_non_empty(
        result
            .products
            .iter()
            .filter_map(|product| product.brand_name.as_deref()),
    );
    let from_openfda = || {
        let openfda = result.openfda.as_ref()?;
        first_non_empty(openfda.brand_name.iter().map(String::as_str))
            .or_else(|| first_non_empty(openfda.generic_name.iter().map(String::as_str)))
    };
    clean_drug_name(from_products.or_else(from_openfda))
}

fn optional_text(value: Option<&str>) -> Value {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| Value::String(value.to_string()))
        .unwrap_or(Value::Null)
}

fn sponsor_cell(result: &DrugsFdaResult) -> Value {
    if let Some(sponsor) = result.sponsor_name.as_deref() {
        return Value::String(sponsor.to_string());
    }
    match result.openfda.as_ref() {
        Some(openfda) if !openfda.manufacturer_name.is_empty() => Value::Array(
            openfda
                .manufacturer_name
                .iter()
                .cloned()
                .map(Value::String)
                .collect(),
        ),
        _ => Value::Null,
    }
}

/// Flattens Drugs@FDA applications into one table row each.
///
/// The sponsor cell falls back to the label manufacturer list, which the
/// sponsor normalizer reads through its first element.
pub(crate) fn sponsor_rows(results: &[DrugsFdaResult]) -> Vec<Row> {
    results
        .iter()
        .map(|result| {
            let mut row = Row::new();
            row.insert(
                APPLICATION_NUMBER_FIELD.to_string(),
                result
                    .application_number
                    .clone()
                    .map(Value::String)
                    .unwrap_or(Value::Null),
            );
            row.insert(
                DRUG_NAME_FIELD.to_string(),
                drug_name(result).map(Value::String).unwrap_or(Value::Null),
            );
            row.insert(SPONSOR_NAME_FIELD.to_string(), sponsor_cell(result));
            let product = result.products.first();
            row.insert(
                DOSAGE_FORM_FIELD.to_string(),
                optional_text(product.and_then(|p| p.dosage_form.as_deref())),
            );
            row.insert(
                MARKETING_STATUS_FIELD.to_string(),
                optional_text(product.and_then(|p| p.marketing_status.as_deref())),
            );
            row
        })
        .collect()
}
