use std::path::Path;

use anyhow::{Context, Result};

use enex_omnivore::pipeline::preview_file;

pub fn run(input: &Path) -> Result<()> {
    let preview = preview_file(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;

    println!("Notes:        {}", preview.note_count);
    println!("Records:      {}", preview.record_count);
    println!("Without URL:  {}", preview.empty_urls);
    println!("Duplicates:   {}", preview.duplicates);
    println!("Tags:         {}", preview.tag_count);

    if !preview.warnings.is_empty() {
        println!();
        for warning in &preview.warnings {
            println!("warning: {}", warning);
        }
    }

    Ok(())
}
