use super::{Outcome, SourceFile, is_up_to_date};
use crate::log;
use anyhow::{Context, Result};
use std::fs;

/// Copy a non-page content file to its output path unless it is up to date.
pub fn process_asset(file: &SourceFile) -> Result<Outcome> {
    // Assets don't depend on templates, just check source vs dest
    if is_up_to_date(&file.source, &file.dest, None) {
        return Ok(Outcome::Skipped);
    }

    if let Some(parent) = file.dest.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::copy(&file.source, &file.dest).with_context(|| {
        format!(
            "Failed to copy {} to {}",
            file.source.display(),
            file.dest.display()
        )
    })?;

    log!(file.kind.name(); "{}", file.relative);
    Ok(Outcome::Copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::tests::set_mtime;
    use std::time::{Duration, UNIX_EPOCH};
    use tempfile::TempDir;

    fn asset(dir: &TempDir, relative: &str, bytes: &[u8]) -> SourceFile {
        let content = dir.path().join("content");
        let path = content.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, bytes).unwrap();
        SourceFile::from_source(path, &content, &dir.path().join("out")).unwrap()
    }

    #[test]
    fn test_copy_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let bytes = b"body { color: red; }\n\x00\xff";
        let file = asset(&dir, "css/style.css", bytes);

        assert_eq!(process_asset(&file).unwrap(), Outcome::Copied);
        assert_eq!(fs::read(dir.path().join("out/css/style.css")).unwrap(), bytes);
    }

    #[test]
    fn test_fresh_asset_is_skipped() {
        let dir = TempDir::new().unwrap();
        let file = asset(&dir, "logo.svg", b"<svg/>");
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(&file.dest, "sentinel").unwrap();

        let t = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        set_mtime(&file.source, t);
        set_mtime(&file.dest, t + Duration::from_secs(1));

        assert_eq!(process_asset(&file).unwrap(), Outcome::Skipped);
        assert_eq!(fs::read_to_string(&file.dest).unwrap(), "sentinel");

        set_mtime(&file.source, t + Duration::from_secs(2));
        assert_eq!(process_asset(&file).unwrap(), Outcome::Copied);
        assert_eq!(fs::read_to_string(&file.dest).unwrap(), "<svg/>");
    }
}
