//! Embedded presets.
//!
//! Codelists and reference settings are embedded at compile time using
//! `include_str!()`, so the binary needs no data directory at runtime.

// =============================================================================
// Codelists
// =============================================================================

/// Respiratory inhaler categories (the categories with reference cost multipliers).
pub const CODELIST_RESPIRATORY: &str = include_str!("../data/codelists/respiratory.csv");

/// Antimicrobial and opioid analgesic categories.
pub const CODELIST_ANTIMICROBIAL_ANALGESIC: &str =
    include_str!("../data/codelists/antimicrobial-analgesic.csv");

// =============================================================================
// Settings
// =============================================================================

/// Reference settings: provider allow-list and cost multipliers.
pub const REFERENCE_SETTINGS: &str = include_str!("../data/settings/reference.toml");
