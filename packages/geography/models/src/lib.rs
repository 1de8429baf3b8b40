#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! US state lookup tables and census region groupings.
//!
//! Every dataset in the system is keyed by a two-letter state code. These
//! helpers normalize the names that appear in source files into codes and
//! back into display names.

pub mod regions;
pub mod states;

pub use regions::CensusRegion;
pub use states::{STATE_CODES, code_from_name, describe, state_name};
