use anyhow::Result;
use std::{fs::File, io::Write, path::Path};

/// Check that `path` names an `.html` file in an existing directory.
pub fn validate_html_path(path: &str) -> Result<()> {
    let pb = Path::new(path);

    let ext = pb
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase());
    match ext.as_deref() {
        Some("html") | Some("htm") => {}
        _ => anyhow::bail!("Report must have a .html extension: {}", path),
    }

    if let Some(parent) = pb.parent() {
        if !parent.as_os_str().is_empty() && !parent.is_dir() {
            anyhow::bail!("Report directory does not exist: {}", parent.display());
        }
    }

    Ok(())
}

pub fn write_bytes_to_file(path: &str, bytes: &[u8]) -> std::io::Result<()> {
    let path = Path::new(path);
    let mut file = File::create(path)?;
    file.write_all(bytes)?;
    Ok(())
}
