use std::{fs, path::Path};

use anyhow::{Context, bail};

/// Extracts a numeric sample from CSV text.
///
/// The first line is a header and is skipped. Each remaining line
/// contributes its first field, split on a comma or whitespace; blank lines,
/// unparseable fields and non-finite values are dropped.
pub fn parse_csv_content(content: &str) -> Vec<f64> {
    content
        .lines()
        .skip(1)
        .filter_map(|line| {
            let field = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .find(|field| !field.is_empty())?;
            field.parse::<f64>().ok().filter(|value| value.is_finite())
        })
        .collect()
}

/// Reads a sample file, failing when it holds no usable values.
pub fn read_sample<P>(path: P) -> anyhow::Result<Vec<f64>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read sample file: {}", path.display()))?;
    let sample = parse_csv_content(&content);
    if sample.is_empty() {
        bail!("No numeric values found in {}", path.display());
    }
    eprintln!("Loaded {} values from {}", sample.len(), path.display());
    Ok(sample)
}
