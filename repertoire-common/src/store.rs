//! Document loading and saving
//!
//! Documents are read whole, parsed, and later written back to the same path.
//! Output is pretty-printed with two-space indentation and non-ASCII text kept
//! literal, with no trailing newline.

use crate::error::{Error, Result};
use crate::model::Document;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Parse a document from JSON text
pub fn parse_document(content: &str) -> serde_json::Result<Document> {
    serde_json::from_str(content)
}

/// Read and parse the document at `path`
///
/// # Errors
/// Returns error if:
/// - The file is missing, unreadable, or not UTF-8
/// - The content is not JSON or not an object of participant lists
pub fn load_document(path: &Path) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let document = parse_document(&content).map_err(|e| Error::parse(path, e))?;
    info!("Loaded {} groups from {}", document.len(), path.display());
    Ok(document)
}

/// Render a document as the JSON text written by [`save_document`]
pub fn render_document(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}

/// Overwrite `path` with the rendered document
///
/// Symlinks are followed, so the file they point at is the one rewritten. The
/// text goes to a uniquely named temp file beside that target, takes over the
/// target's permissions, and is then renamed over it; the previous content
/// survives a failed write. No backup is kept once the rename succeeds. A
/// document that does not exist yet is written directly.
pub fn save_document(path: &Path, document: &Document) -> Result<()> {
    let json = render_document(document)?;
    let target = resolve_target(path);

    let metadata = match std::fs::metadata(&target) {
        Ok(metadata) => metadata,
        Err(_) => {
            std::fs::write(&target, json.as_bytes()).map_err(|e| Error::io(&target, e))?;
            info!("Created {} with {} groups", target.display(), document.len());
            return Ok(());
        }
    };

    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".repertoire-")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(|e| Error::io(dir, e))?;
    debug!("Writing {} bytes to {}", json.len(), temp.path().display());
    temp.write_all(json.as_bytes())
        .map_err(|e| Error::io(temp.path(), e))?;

    temp.as_file()
        .set_permissions(metadata.permissions())
        .map_err(|e| Error::io(temp.path(), e))?;

    // Dropping the temp file on error removes it
    temp.persist(&target).map_err(|e| Error::io(&target, e.error))?;

    info!("Saved {} groups to {}", document.len(), target.display());
    Ok(())
}

/// The file a write to `path` should land in
///
/// A document that does not exist yet is created at `path` as given.
fn resolve_target(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Participant;
    use tempfile::TempDir;

    #[test]
    fn test_render_format() {
        let mut doc = Document::new();
        doc.insert_group(
            "Үлкен топ",
            vec![Participant::new("A", vec!["Нұрлы таң".to_string()])],
        );
        doc.insert_group("Empty", Vec::new());

        let expected = "{\n  \"Үлкен топ\": [\n    {\n      \"Есім\": \"A\",\n      \"Репертуар\": [\n        \"Нұрлы таң\"\n      ]\n    }\n  ],\n  \"Empty\": []\n}";
        assert_eq!(render_document(&doc).unwrap(), expected);
    }

    #[test]
    fn test_render_empty_repertoire() {
        let mut doc = Document::new();
        doc.insert_group("G", vec![Participant::new("A", Vec::new())]);
        let text = render_document(&doc).unwrap();
        assert!(text.contains("\"Репертуар\": []"));
    }

    #[test]
    fn test_save_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{}").unwrap();

        save_document(&path, &Document::new()).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_save_keeps_unrelated_tmp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        let neighbour = dir.path().join("doc.json.tmp");
        std::fs::write(&path, "{}").unwrap();
        std::fs::write(&neighbour, "keep me").unwrap();

        save_document(&path, &Document::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&neighbour).unwrap(), "keep me");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_rewrites_target() {
        use std::os::unix::fs::symlink;

        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.json");
        let link = dir.path().join("link.json");
        std::fs::write(&real, r#"{"G": [{"Есім": "A", "Репертуар": ["X", "X"]}]}"#).unwrap();
        symlink(&real, &link).unwrap();

        let mut doc = load_document(&link).unwrap();
        crate::normalize::normalize_document(&crate::CorrectionTable::builtin(), &mut doc);
        save_document(&link, &doc).unwrap();

        assert!(std::fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        let saved = load_document(&real).unwrap();
        assert_eq!(saved.group("G").unwrap()[0].repertoire, vec!["X".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("doc.json");
        std::fs::write(&path, "{}").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        save_document(&path, &Document::new()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn test_save_creates_new_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fresh.json");

        save_document(&path, &Document::new()).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{\"G\": [").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
        assert!(err.to_string().contains("bad.json"));
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("doc.json");
        let err = save_document(&path, &Document::new()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
