//! Command-line surface: argument parsing and command dispatch.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::error::SponsorMatchError;
use crate::fuzzy::{self, DEFAULT_FUZZY_THRESHOLD};
use crate::render;
use crate::sources::openfda::{DRUGSFDA_MAX_LIMIT, OpenFdaClient};
use crate::sponsors::{
    self, DEFAULT_TOP_SPONSORS, FDA_SPONSORS, RenameOptions, TopSponsorOptions,
};
use crate::transform::drugsfda::{DRUG_NAME_FIELD, SPONSOR_NAME_FIELD, sponsor_rows};

mod table;

#[derive(Parser, Debug)]
#[command(
    name = "sponsor-match",
    version,
    about = "Normalize drug sponsor names and fuzzy-match phrases in free text"
)]
pub struct Cli {
    /// Print pretty JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the normalized and canonical form of each sponsor name
    Normalize {
        /// Raw sponsor names
        #[arg(required = true)]
        names: Vec<String>,
    },

    /// Add a canonical sponsor column to a JSON or JSONL table
    Rename {
        /// Input table (JSON array of objects or JSON Lines)
        #[arg(long)]
        input: PathBuf,

        /// Write the updated table here (`.jsonl` for JSON Lines)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Column holding the drug name
        #[arg(long, default_value = "drug_name")]
        drug_field: String,

        /// Column holding the raw sponsor name
        #[arg(long, default_value = "fda_2_sponsor")]
        sponsor_field: String,

        /// Column receiving the canonical sponsor
        #[arg(long, default_value = "sponsor")]
        new_field: String,
    },

    /// Count drugs per sponsor, most frequent first
    Top {
        /// Input table (JSON array of objects or JSON Lines)
        #[arg(long)]
        input: PathBuf,

        /// Column holding the sponsor
        #[arg(long, default_value = "sponsor")]
        sponsor_field: String,

        /// Column holding the drug name
        #[arg(long, default_value = "drug_name")]
        drug_field: String,

        /// Count every row instead of unique (drug, sponsor) pairs
        #[arg(long)]
        all_rows: bool,

        /// Maximum number of sponsors to list
        #[arg(long, default_value_t = DEFAULT_TOP_SPONSORS)]
        limit: usize,
    },

    /// Find the n-gram in the given text segments closest to a target phrase
    Fuzzy {
        /// Phrase to look for
        #[arg(long)]
        target: String,

        /// Stop scanning a segment once this score is reached
        #[arg(long, default_value_t = DEFAULT_FUZZY_THRESHOLD)]
        threshold: f64,

        /// Text segments to scan
        segments: Vec<String>,
    },

    /// Search openFDA Drugs@FDA and canonicalize the returned sponsors
    Fetch {
        /// Sponsor, brand or generic name
        term: String,

        /// Maximum number of applications (1-100)
        #[arg(long, default_value = "25")]
        limit: usize,

        /// Number of applications to skip
        #[arg(long, default_value = "0")]
        skip: usize,
    },
}

pub async fn run(cli: Cli) -> anyhow::Result<String> {
    let json_output = cli.json;
    match cli.command {
        Commands::Normalize { names } => normalize(&names, json_output),
        Commands::Rename {
            input,
            output,
            drug_field,
            sponsor_field,
            new_field,
        } => {
            let options = RenameOptions {
                drug_name_field: drug_field,
                sponsor_field,
                new_field,
            };
            rename(&input, output.as_deref(), &options, json_output)
        }
        Commands::Top {
            input,
            sponsor_field,
            drug_field,
            all_rows,
            limit,
        } => {
            let options = TopSponsorOptions {
                drug_name_field: drug_field,
                sponsor_field,
                unique_drugs_only: !all_rows,
                limit,
            };
            top(&input, &options, json_output)
        }
        Commands::Fuzzy {
            target,
            threshold,
            segments,
        } => fuzzy_match(&target, threshold, &segments, json_output),
        Commands::Fetch { term, limit, skip } => {
            let client = OpenFdaClient::new()?;
            fetch(&client, &term, limit, skip, json_output).await
        }
    }
}

fn normalize(names: &[String], json_output: bool) -> anyhow::Result<String> {
    let names = sponsors::explain_sponsors(names, FDA_SPONSORS);
    if json_output {
        return Ok(render::json::to_pretty(&names)?);
    }
    Ok(render::markdown::names_markdown(&names)?)
}

fn rename(
    input: &std::path::Path,
    output: Option<&std::path::Path>,
    options: &RenameOptions,
    json_output: bool,
) -> anyhow::Result<String> {
    let mut rows = table::read_rows(input)?;
    if !rows.is_empty() && !rows.iter().any(|row| row.contains_key(&options.sponsor_field)) {
        return Err(SponsorMatchError::InvalidArgument(format!(
            "Column {:?} not found in {}. Use --sponsor-field to pick the sponsor column.",
            options.sponsor_field,
            input.display()
        ))
        .into());
    }

    let mappings = sponsors::rename_sponsors(&mut rows, options, FDA_SPONSORS);
    if let Some(output) = output {
        table::write_rows(output, &rows)?;
        info!(rows = rows.len(), path = %output.display(), "wrote renamed table");
    }

    if json_output {
        return Ok(render::json::to_pretty(&mappings)?);
    }
    Ok(render::markdown::rename_markdown("Sponsor Renames", &mappings)?)
}

fn top(
    input: &std::path::Path,
    options: &TopSponsorOptions,
    json_output: bool,
) -> anyhow::Result<String> {
    if options.limit == 0 {
        return Err(SponsorMatchError::InvalidArgument("--limit must be at least 1".into()).into());
    }
    let rows = table::read_rows(input)?;
    let counts = sponsors::top_sponsors(&rows, options);

    if json_output {
        return Ok(render::json::to_pretty(&counts)?);
    }
    Ok(render::markdown::top_sponsors_markdown(
        &counts,
        options.unique_drugs_only,
    )?)
}

fn fuzzy_match(
    target: &str,
    threshold: f64,
    segments: &[String],
    json_output: bool,
) -> anyhow::Result<String> {
    if target.trim().is_empty() {
        return Err(SponsorMatchError::InvalidArgument(
            "--target is required. Example: sponsor-match fuzzy --target trop2 \"anti trop-2 adc\""
                .into(),
        )
        .into());
    }
    if !(0.0..=1.0).contains(&threshold) {
        return Err(SponsorMatchError::InvalidArgument(
            "--threshold must be between 0 and 1".into(),
        )
        .into());
    }

    let result = fuzzy::best_match(target, segments, threshold);
    if json_output {
        return Ok(render::json::to_pretty(&result)?);
    }
    Ok(render::markdown::fuzzy_markdown(
        target,
        threshold,
        segments.len(),
        &result,
    )?)
}

async fn fetch(
    client: &OpenFdaClient,
    term: &str,
    limit: usize,
    skip: usize,
    json_output: bool,
) -> anyhow::Result<String> {
    if term.trim().is_empty() {
        return Err(SponsorMatchError::InvalidArgument(
            "Search term is required. Example: sponsor-match fetch pembrolizumab".into(),
        )
        .into());
    }
    if limit == 0 || limit > DRUGSFDA_MAX_LIMIT {
        return Err(SponsorMatchError::InvalidArgument(format!(
            "--limit must be between 1 and {DRUGSFDA_MAX_LIMIT}"
        ))
        .into());
    }

    let query = OpenFdaClient::sponsor_query(term);
    let results = match client.drugsfda_search(&query, limit, skip).await? {
        Some(resp) => {
            debug!(
                total = resp.total().unwrap_or_default(),
                returned = resp.results.len(),
                "openFDA applications"
            );
            resp.results
        }
        None => Vec::new(),
    };

    let mut rows = sponsor_rows(&results);
    let options = RenameOptions {
        drug_name_field: DRUG_NAME_FIELD.to_string(),
        sponsor_field: SPONSOR_NAME_FIELD.to_string(),
        ..RenameOptions::default()
    };
    let mappings = sponsors::rename_sponsors(&mut rows, &options, FDA_SPONSORS);

    if json_output {
        return Ok(render::json::to_pretty(&rows)?);
    }
    let title = format!("openFDA Sponsors: {}", term.trim());
    Ok(render::markdown::rename_markdown(&title, &mappings)?)
}
