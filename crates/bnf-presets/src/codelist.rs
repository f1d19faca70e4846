//! Bundled codelist presets.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use bnf_model::CodelistEntry;
use serde::Deserialize;

use crate::embedded;
use crate::error::{PresetError, Result};

/// A codelist bundled with the binary, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodelistPreset {
    /// Inhaled respiratory therapy categories.
    Respiratory,
    /// Antibacterials, antifungals, antivirals and opioids.
    AntimicrobialAnalgesic,
}

impl CodelistPreset {
    /// Name used on the command line.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Respiratory => "respiratory",
            Self::AntimicrobialAnalgesic => "antimicrobial-analgesic",
        }
    }

    pub const fn description(&self) -> &'static str {
        match self {
            Self::Respiratory => "Inhaled respiratory therapies (SABA, ICS, antimuscarinics, LTRAs)",
            Self::AntimicrobialAnalgesic => "Antibacterials, antifungals, antivirals and opioids",
        }
    }

    /// Get all bundled presets.
    pub const fn all() -> &'static [CodelistPreset] {
        &[Self::Respiratory, Self::AntimicrobialAnalgesic]
    }

    const fn content(&self) -> &'static str {
        match self {
            Self::Respiratory => embedded::CODELIST_RESPIRATORY,
            Self::AntimicrobialAnalgesic => embedded::CODELIST_ANTIMICROBIAL_ANALGESIC,
        }
    }

    /// Parses the embedded CSV into codelist entries.
    pub fn load(&self) -> Result<Vec<CodelistEntry>> {
        parse_codelist_csv(self.content(), self.name())
    }
}

impl fmt::Display for CodelistPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CodelistPreset {
    type Err = PresetError;

    fn from_str(name: &str) -> Result<Self> {
        let wanted = name.trim();
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PresetError::UnknownPreset {
                name: wanted.to_string(),
                available: Self::all()
                    .iter()
                    .map(CodelistPreset::name)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Loads a bundled codelist by name.
pub fn load_preset(name: &str) -> Result<Vec<CodelistEntry>> {
    name.parse::<CodelistPreset>()?.load()
}

#[derive(Debug, Deserialize)]
struct CodelistRow {
    #[serde(alias = "Category")]
    category: String,
    #[serde(alias = "BNF Prefix")]
    bnf_prefix: String,
}

fn parse_codelist_csv(content: &str, name: &'static str) -> Result<Vec<CodelistEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut entries = Vec::new();
    for row in reader.deserialize::<CodelistRow>() {
        let row = row.map_err(|source| PresetError::Csv { name, source })?;
        entries.push(CodelistEntry::new(row.category, row.bnf_prefix));
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_parses() {
        for preset in CodelistPreset::all() {
            let entries = preset.load().unwrap();
            assert!(!entries.is_empty(), "{preset} is empty");
            assert!(
                entries
                    .iter()
                    .all(|e| !e.category.is_empty() && !e.bnf_prefix.is_empty())
            );
        }
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in CodelistPreset::all() {
            assert_eq!(preset.name().parse::<CodelistPreset>().unwrap(), *preset);
        }
        assert_eq!(
            "Respiratory".parse::<CodelistPreset>().unwrap(),
            CodelistPreset::Respiratory
        );
    }

    #[test]
    fn unknown_preset_lists_available_names() {
        let err = load_preset("cardiology").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown codelist preset 'cardiology' (available: respiratory, antimicrobial-analgesic)"
        );
    }

    #[test]
    fn antimicrobial_preset_contents() {
        let entries = load_preset("antimicrobial-analgesic").unwrap();
        assert!(entries.contains(&CodelistEntry::new("Antibacterials", "0501")));
        assert!(entries.contains(&CodelistEntry::new("Opioids", "040702")));
    }

    #[test]
    fn labelled_headers_are_accepted() {
        let entries = parse_codelist_csv("Category,BNF Prefix\nOpioids, 040702\n", "test").unwrap();
        assert_eq!(entries, vec![CodelistEntry::new("Opioids", "040702")]);
    }
}
