//! Library side of the `bnf-aggregator` binary.

pub mod logging;
pub mod pipeline;
