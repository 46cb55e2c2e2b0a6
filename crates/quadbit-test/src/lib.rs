//! quadbit-test - Regression test framework for quadbit
//!
//! Provides the `RegParams` harness used by every crate's `tests/*_reg.rs`
//! files, in two modes:
//!
//! - **Compare**: run the checks (default)
//! - **Display**: also write intermediate images to `tests/regout`
//!
//! plus deterministic fixtures so that no binary test images are needed.
//!
//! # Usage
//!
//! ```ignore
//! use quadbit_test::{RegParams, pix_from_ascii};
//!
//! let mut rp = RegParams::new("regions");
//! rp.compare_values(2.0, regions.len() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: set to "display" to write outputs

mod error;
mod fixtures;
mod params;

pub use error::{TestError, TestResult};
pub use fixtures::{
    Lcg, gray_ramp, multiband_tiff, pix_from_ascii, random_gray, random_mask,
    reference_components,
};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // quadbit-test is at crates/quadbit-test
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
