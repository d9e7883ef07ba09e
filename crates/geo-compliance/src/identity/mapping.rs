use std::collections::HashMap;
use std::sync::OnceLock;

static CATALOG_TO_ITU: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();
static ITU_NAMES: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();

/// Launch-registry owner codes mapped to the ITU symbols they may file under.
pub(crate) fn standard_symbols() -> &'static HashMap<&'static str, &'static [&'static str]> {
    CATALOG_TO_ITU.get_or_init(|| {
        const TABLE: &[(&str, &[&str])] = &[
            // Single-administration owners
            ("US", &["USA"]),
            ("USA", &["USA"]),
            ("PRC", &["CHN"]),
            ("CIS", &["RUS"]),
            ("RUS", &["RUS"]),
            ("UK", &["G"]),
            ("FR", &["F"]),
            ("GER", &["D"]),
            ("IT", &["I"]),
            ("SPN", &["E"]),
            ("JPN", &["J"]),
            ("IND", &["IND"]),
            ("CA", &["CAN"]),
            ("BRAZ", &["B"]),
            ("AUS", &["AUS"]),
            ("SKOR", &["KOR"]),
            ("INDO", &["INS"]),
            ("TURK", &["TUR"]),
            ("ISRA", &["ISR"]),
            ("SAUD", &["ARS"]),
            ("UAE", &["UAE"]),
            ("MEX", &["MEX"]),
            ("ARGN", &["ARG"]),
            ("THAI", &["THA"]),
            ("MALA", &["MLA"]),
            ("LUXE", &["LUX"]),
            ("NOR", &["NOR"]),
            ("NETH", &["HOL"]),
            ("SWED", &["S"]),
            ("VTNM", &["VTN"]),
            ("PAKI", &["PAK"]),
            ("EGYP", &["EGY"]),
            ("QAT", &["QAT"]),
            ("KAZ", &["KAZ"]),
            ("IRAN", &["IRN"]),
            ("NKOR", &["KRE"]),
            // Multinational operators file through several administrations
            ("ESA", &["F", "D", "I", "E", "G", "HOL", "S", "LUX"]),
            ("EUME", &["F", "D"]),
            ("EUTE", &["F"]),
            ("ITSO", &["USA", "G", "LUX"]),
            ("SES", &["LUX", "HOL", "USA"]),
            ("AB", &["ARS"]),
            ("RASC", &["TON", "PNG"]),
            ("ORB", &["USA"]),
            ("GLOB", &["USA", "F"]),
            // Registries with no ITU filing authority
            ("TBD", &[]),
            ("UNK", &[]),
        ];

        TABLE.iter().copied().collect()
    })
}

/// ITU administration symbols and the names shown in shortlists.
pub(crate) fn standard_names() -> &'static HashMap<&'static str, &'static str> {
    ITU_NAMES.get_or_init(|| {
        const TABLE: &[(&str, &str)] = &[
            ("USA", "United States of America"),
            ("CHN", "China (People's Republic of)"),
            ("RUS", "Russian Federation"),
            ("G", "United Kingdom of Great Britain and Northern Ireland"),
            ("F", "France"),
            ("D", "Germany (Federal Republic of)"),
            ("I", "Italy"),
            ("E", "Spain"),
            ("J", "Japan"),
            ("IND", "India (Republic of)"),
            ("CAN", "Canada"),
            ("B", "Brazil (Federative Republic of)"),
            ("AUS", "Australia"),
            ("KOR", "Korea (Republic of)"),
            ("INS", "Indonesia (Republic of)"),
            ("TUR", "Türkiye"),
            ("ISR", "Israel (State of)"),
            ("ARS", "Saudi Arabia (Kingdom of)"),
            ("UAE", "United Arab Emirates"),
            ("MEX", "Mexico"),
            ("ARG", "Argentine Republic"),
            ("THA", "Thailand"),
            ("MLA", "Malaysia"),
            ("LUX", "Luxembourg"),
            ("NOR", "Norway"),
            ("HOL", "Netherlands (Kingdom of the)"),
            ("S", "Sweden"),
            ("VTN", "Viet Nam (Socialist Republic of)"),
            ("PAK", "Pakistan (Islamic Republic of)"),
            ("EGY", "Egypt (Arab Republic of)"),
            ("QAT", "Qatar (State of)"),
            ("KAZ", "Kazakhstan (Republic of)"),
            ("IRN", "Iran (Islamic Republic of)"),
            ("KRE", "Democratic People's Republic of Korea"),
            ("TON", "Tonga (Kingdom of)"),
            ("PNG", "Papua New Guinea"),
        ];

        TABLE.iter().copied().collect()
    })
}
