/// Sponsor names as they appear, after normalization, across the FDA new
/// chemical entity and approved-drug tables.
///
/// Order matters: [`canonicalize`] keeps the last entry that matches, so a
/// longer name listed after its prefix (e.g. "Novo Nordisk" after "Novo") wins.
pub const FDA_SPONSORS: &[&str] = &[
    "Abbott",
    "Alba Bioscience",
    "Allecra",
    "Allergan",
    "Almirall",
    "Alnylam",
    "Altor Bioscience",
    "Alvogen Pine Brook",
    "Amgen",
    "Amicus",
    "Amivas",
    "Amneal",
    "Amryt",
    "Amylyx",
    "Anacor",
    "Apellis",
    "Apotex",
    "Ardelyx",
    "Argenx Bv",
    "Array Biopharma",
    "Ascendis Pharma Encocrinology Div As",
    "Astellas",
    "Astrazeneca",
    "Aurinia",
    "Aurobindo",
    "Aveo",
    "Avid Radiopharms",
    "Axsome Malta",
    "Basilea",
    "Bausch",
    "Bausch And Lomb",
    "Bayer",
    "Bdsi",
    "Beigene",
    "Biocodex Sa",
    "Biocryst",
    "Biogen",
    "Biolinerx",
    "Biomarin",
    "Bioverativ Therapeutics",
    "Bluebird",
    "Blue Earth",
    "Blueprint Medicines",
    "Boehringer Ingelheim",
    "Botanix",
    "Bracco",
    "Braintree Labs",
    "Breckenridge",
    "Bristol Myers Squibb",
    "Btg International",
    "Btg Intl",
    "Cara",
    "Cardinal Health",
    "Catalyst",
    "Celgene",
    "Chemo Research Sl",
    "Chemocentryx",
    "Chiesi",
    "Cipla",
    "Clivunel",
    "Coherus Biosciences",
    "Commave",
    "Cormedix",
    "Cosette",
    "Covis",
    "CSL Behring",
    "Cti Biopharma",
    "Cubist",
    "Daiichi Sankyo",
    "Day One Biopharms",
    "Deciphera",
    "Dermavant Sci",
    "Dompe Farmaceutici",
    "Dr Reddys",
    "Dutch Ophthalmic",
    "Dyax",
    "Eisai",
    "Eli Lilly",
    "Elusys Therapeutics",
    "Emd Serono",
    "Entasis",
    "Epizyme",
    "Esperion",
    "Eugia Pharma Speclts",
    "Eusa",
    "Evive Biotechnology",
    "Evol",
    "Fabre Kramer",
    "Ferrer Internacional",
    "Ferring",
    "Foldrx",
    "Fonseca Biosciences",
    "Fresenius Kabi",
    "G1",
    "Galderma Labs Lp",
    "Ge",
    "Genentech",
    "Genmab",
    "Genzyme",
    "Geron",
    "Gilead Sciences",
    "Giskit",
    "Glaxo Grp",
    "Glaxosmithkline",
    "Global Blood",
    "Guerbet",
    "Harmony",
    "Hatchtech",
    "Helsinn",
    "Hetero Labs",
    "Hoffmannla Roche",
    "Horizon Therapeutics",
    "Hugel",
    "Human Genome Sciences",
    "Idorsia",
    "Immucor",
    "Immunocore",
    "Immunogen",
    "Immunomedics",
    "Immunotek",
    "Incyte",
    "Ingenus",
    "Innate",
    "Intracellular",
    "Ipsen",
    "Ironwood",
    "Italfarmaco",
    "Janssen",
    "Jazz",
    "Kadmon",
    "Kai",
    "Karyopharm",
    "Kastle",
    "Key",
    "Knight",
    "Kyowa Kirin",
    "La Jolla",
    "Laurus Generics",
    "Lees",
    "Leo Pharma As",
    "Lexicon",
    "Life Molecular",
    "Lnhc",
    "Loxo Oncol",
    "Loxo Oncol Eli Lilly",
    "Lumicell",
    "Lundbeck Seattle Biopharmaceuticals",
    "Lupin",
    "Macrogenics",
    "Madrigal",
    "Mallinckrodt",
    "Marinus",
    "Mayne",
    "Mdgh",
    "Mediwound",
    "Melinta",
    "Merck",
    "Millipore",
    "Mirati",
    "Mirum",
    "Mp Biomedicals",
    "Morphosys",
    "Msn",
    "Msn Labs Pvt",
    "Mundipharma",
    "Mycovia",
    "Mylan",
    "Nabriva",
    "Natco",
    "National Cancer Institute",
    "Nektar Therapeutics",
    "Neurocrine",
    "Nippon Shinyaku",
    "Novartis",
    "Novimmune Sa",
    "Novo",
    "Novo Nordisk",
    "Nps",
    "On Target Labs",
    "Otsuka",
    "Paratek",
    "Pf Prism Cv",
    "Pfizer",
    "Pharmaessentia",
    "Pharming",
    "Phathom",
    "Polarean",
    "Portola",
    "Prinston",
    "Progenics",
    "Provention Bio",
    "Radiomedix",
    "Radius",
    "Reata",
    "Recordati Rare",
    "Redhill",
    "Regeneron",
    "Rempex",
    "Revance Therapeutics",
    "Rhythm",
    "Ridgeback Biotherapeutics",
    "Rigel",
    "Roche",
    "Rk",
    "Sage",
    "Salix",
    "Sandoz",
    "Sanofi",
    "Sarepta",
    "Scynexis",
    "Seagen",
    "Secura",
    "Sentynl",
    "Servier",
    "Shield Tx",
    "Shionogi",
    "Siga Technologies",
    "Sk Life",
    "Slayback",
    "Spectrum",
    "Springworks",
    "Sprout",
    "Stemline",
    "Stemline Therapeutics",
    "Sumitomo",
    "Sumitomo Pharma Am",
    "Sun",
    "Supernus",
    "Taiho Oncology",
    "Takeda",
    "Tarsus",
    "Tersera",
    "Tetraphase",
    "Teva",
    "Tg",
    "Tg Therapeutics",
    "Theracosbio",
    "Theratechnologies",
    "Thrombogenics",
    "Torrent",
    "Travere",
    "Trevena",
    "Ucb",
    "Ultragenyx",
    "United",
    "Urovant",
    "Uswm",
    "Valeant Luxembourg",
    "Valinor",
    "Vancocin Italia",
    "Vanda",
    "Verona",
    "Vertex",
    "Vgyaan",
    "Viela Bio",
    "Vifor",
    "Viiv",
    "Visiox",
    "Wyeth",
    "X4",
    "Ymabs Therapeutics",
    "Zealand",
    "Zenara",
    "Zhejiang Yongning",
    "Zr",
    "Zydus",
];

/// Replaces a normalized sponsor name with the canonical entry it matches.
///
/// An entry matches when it is one of the name's whitespace tokens, or when it
/// is longer than five characters and occurs anywhere in the name. Matching is
/// case-sensitive against the title-cased output of
/// [`normalize_name`](super::normalize_name). Every entry is tried in list
/// order and the last match wins; with no match the name comes back unchanged.
pub fn canonicalize<S: AsRef<str>>(normalized: &str, canonical: &[S]) -> String {
    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    let mut matched: Option<&str> = None;
    for entry in canonical {
        let entry = entry.as_ref();
        let is_token = tokens.contains(&entry);
        if is_token || (entry.chars().count() > 5 && normalized.contains(entry)) {
            matched = Some(entry);
        }
    }
    matched.unwrap_or(normalized).to_string()
}

pub fn canonicalize_names<S: AsRef<str>>(
    normalized: &[String],
    canonical: &[S],
) -> Vec<String> {
    normalized
        .iter()
        .map(|name| canonicalize(name, canonical))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sponsors::normalize::normalize_names;

    #[test]
    fn exact_canonical_entry_is_kept() {
        assert_eq!(canonicalize("Glaxosmithkline", FDA_SPONSORS), "Glaxosmithkline");
        assert_eq!(canonicalize("Pfizer", FDA_SPONSORS), "Pfizer");
    }

    #[test]
    fn single_token_entry_matches_inside_longer_name() {
        assert_eq!(canonicalize("Pfizer Labs", FDA_SPONSORS), "Pfizer");
        assert_eq!(canonicalize("Teva Parenteral", FDA_SPONSORS), "Teva");
    }

    #[test]
    fn long_entries_match_as_substrings() {
        assert_eq!(
            canonicalize("Gilead Sciences Ireland Uc", FDA_SPONSORS),
            "Gilead Sciences"
        );
        assert_eq!(canonicalize("Genentech Usa", FDA_SPONSORS), "Genentech");
    }

    #[test]
    fn short_entries_do_not_match_as_substrings() {
        // "Sun" and "Key" are five characters or fewer and not tokens here
        assert_eq!(canonicalize("Sunovion", FDA_SPONSORS), "Sunovion");
        assert_eq!(canonicalize("Keystone", FDA_SPONSORS), "Keystone");
    }

    #[test]
    fn last_matching_entry_wins() {
        assert_eq!(canonicalize("Novo Nordisk", FDA_SPONSORS), "Novo Nordisk");
        let list = ["Acme Holdings", "Acme"];
        assert_eq!(canonicalize("Acme Holdings", &list), "Acme");
        let list = ["Acme", "Acme Holdings"];
        assert_eq!(canonicalize("Acme Holdings", &list), "Acme Holdings");
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(canonicalize("pfizer", FDA_SPONSORS), "pfizer");
    }

    #[test]
    fn empty_name_and_empty_list_are_no_ops() {
        assert_eq!(canonicalize("", FDA_SPONSORS), "");
        assert_eq!(canonicalize("Pfizer", &[] as &[&str]), "Pfizer");
    }

    #[test]
    fn result_is_input_or_list_member() {
        let raw = [
            "Pfizer Inc.",
            "Loxo Oncology, Inc., a wholly owned subsidiary of Eli Lilly",
            "Merck Sharp Dohme Corp",
            "Unknown Start-Up LLC",
            "Bayer HealthCare Pharmaceuticals Inc.",
            "Novo Nordisk Inc",
            "",
        ];
        for name in normalize_names(raw) {
            let out = canonicalize(&name, FDA_SPONSORS);
            assert!(
                out == name || FDA_SPONSORS.contains(&out.as_str()),
                "{name:?} -> {out:?}"
            );
        }
    }

    #[test]
    fn canonicalize_names_maps_batch() {
        let names = vec![
            "Amgen".to_string(),
            "Sanofi Pasteur".to_string(),
            String::new(),
        ];
        assert_eq!(
            canonicalize_names(&names, FDA_SPONSORS),
            vec!["Amgen", "Sanofi", ""]
        );
    }

    #[test]
    fn list_entries_are_unique_and_trimmed() {
        let mut seen = std::collections::HashSet::new();
        for entry in FDA_SPONSORS {
            assert_eq!(entry.trim(), *entry);
            assert!(seen.insert(*entry), "duplicate {entry}");
        }
        assert!(FDA_SPONSORS.contains(&"Neurocrine"));
        assert!(FDA_SPONSORS.contains(&"Nektar Therapeutics"));
    }
}
