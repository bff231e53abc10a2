use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};

use enex_omnivore::pipeline::run_export;
use enex_omnivore::Config;

pub fn run(input: &Path, output: Option<&Path>, config: &Config) -> Result<()> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let result = run_export(input, config, BufWriter::new(file));
            if result.is_err() {
                // Never leave a truncated import file behind
                let _ = fs::remove_file(path);
            }
            result.with_context(|| format!("Failed to export {}", input.display()))?;
        }
        None => {
            let stdout = io::stdout();
            run_export(input, config, stdout.lock())
                .with_context(|| format!("Failed to export {}", input.display()))?;
        }
    }

    Ok(())
}
