//! Bundled codelists and reference settings for BNF aggregation.
//!
//! Everything here is compiled into the binary; [`Settings::load`] is the
//! only entry point that touches the filesystem.
//!
//! # Example
//!
//! ```
//! use bnf_presets::{CodelistPreset, Settings};
//!
//! let codelist = CodelistPreset::Respiratory.load().unwrap();
//! assert!(!codelist.is_empty());
//!
//! let options = Settings::reference().unwrap().to_options(true);
//! assert!(options.cost_override.enabled);
//! ```

mod codelist;
mod embedded;
mod error;
mod settings;

pub use codelist::{CodelistPreset, load_preset};
pub use error::{PresetError, Result};
pub use settings::Settings;
