use std::path::Path;

use anyhow::{Context, Result};

use enex_omnivore::pipeline::run_verify;
use enex_omnivore::Config;

pub fn run(input: &Path, config: &Config) -> Result<()> {
    // Dead links are reported per URL by the verifier; they do not fail the run
    run_verify(input, config).with_context(|| format!("Failed to verify {}", input.display()))?;
    Ok(())
}
