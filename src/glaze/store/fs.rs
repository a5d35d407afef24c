use super::Catalog;
use crate::error::{GlazeError, Result};
use crate::model::{CatalogEntry, Piece};
use std::fs;
use std::path::{Path, PathBuf};

const PIECE_EXT: &str = "json";

pub struct FileCatalog {
    root: PathBuf,
}

impl FileCatalog {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn piece_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{}.{}", slug, PIECE_EXT))
    }

    fn read_piece(&self, path: &Path) -> Result<Piece> {
        let content = fs::read_to_string(path).map_err(GlazeError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| GlazeError::Store(format!("{}: {}", path.display(), e)))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(GlazeError::Io)?;
        }
        Ok(())
    }
}

fn validate_slug(slug: &str) -> Result<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(GlazeError::Store(format!("Invalid slug: {:?}", slug)))
    }
}

impl Catalog for FileCatalog {
    fn save_piece(&mut self, slug: &str, piece: &Piece) -> Result<()> {
        validate_slug(slug)?;
        self.ensure_dir()?;
        let content = serde_json::to_string_pretty(piece).map_err(GlazeError::Serialization)?;
        fs::write(self.piece_path(slug), content).map_err(GlazeError::Io)?;
        Ok(())
    }

    fn get_piece(&self, slug: &str) -> Result<Piece> {
        validate_slug(slug)?;
        let path = self.piece_path(slug);
        if !path.exists() {
            return Err(GlazeError::PieceNotFound(slug.to_string()));
        }
        self.read_piece(&path)
    }

    fn list_pieces(&self) -> Result<Vec<CatalogEntry>> {
        if !self.root.exists() {
            tracing::debug!(root = %self.root.display(), "catalog directory missing, listing nothing");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for dir_entry in fs::read_dir(&self.root).map_err(GlazeError::Io)? {
            let path = dir_entry.map_err(GlazeError::Io)?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PIECE_EXT) {
                continue;
            }
            let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let piece = self.read_piece(&path)?;
            entries.push(CatalogEntry::new(slug, piece));
        }

        entries.sort_by(|a, b| a.slug.cmp(&b.slug));
        tracing::debug!(root = %self.root.display(), pieces = entries.len(), "loaded catalog");
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::parse_timestamp;

    fn sample(title: &str) -> Piece {
        let mut piece = Piece::new(title, parse_timestamp("2025-02-10").unwrap(), "/main.jpg");
        piece.techniques = vec!["carving".into()];
        piece.colors = vec!["celadon".into()];
        piece
    }

    #[test]
    fn save_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = FileCatalog::new(dir.path().join("pieces"));
        catalog.save_piece("spiral-bowl", &sample("Spiral Bowl")).unwrap();

        let piece = catalog.get_piece("spiral-bowl").unwrap();
        assert_eq!(piece, sample("Spiral Bowl"));
    }

    #[test]
    fn lists_json_files_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = FileCatalog::new(dir.path());
        catalog.save_piece("b-piece", &sample("B")).unwrap();
        catalog.save_piece("a-piece", &sample("A")).unwrap();
        fs::write(dir.path().join("notes.md"), "ignored").unwrap();

        let slugs: Vec<_> = catalog
            .list_pieces()
            .unwrap()
            .into_iter()
            .map(|e| e.slug)
            .collect();
        assert_eq!(slugs, vec!["a-piece", "b-piece"]);
    }

    #[test]
    fn missing_directory_lists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileCatalog::new(dir.path().join("absent"));
        assert!(catalog.list_pieces().unwrap().is_empty());
    }

    #[test]
    fn unknown_slug() {
        let dir = tempfile::tempdir().unwrap();
        let catalog = FileCatalog::new(dir.path());
        assert!(matches!(
            catalog.get_piece("ghost"),
            Err(GlazeError::PieceNotFound(_))
        ));
    }

    #[test]
    fn rejects_path_like_slugs() {
        let dir = tempfile::tempdir().unwrap();
        let mut catalog = FileCatalog::new(dir.path());
        assert!(catalog.save_piece("../escape", &sample("X")).is_err());
        assert!(catalog.get_piece("").is_err());
    }

    #[test]
    fn malformed_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let catalog = FileCatalog::new(dir.path());
        let err = catalog.list_pieces().unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
