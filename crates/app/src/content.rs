use std::path::{Path, PathBuf};

use drive_core::model::{ContentCatalog, ContentError};
use thiserror::Error;

const BUNDLED_LESSONS: &str = include_str!("../../../data/lessons.json");
const BUNDLED_QUESTIONS: &str = include_str!("../../../data/questions.json");

#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Load the catalog from `dir`, or the bundled content when no dir is set.
pub fn load_catalog(dir: Option<&Path>) -> Result<ContentCatalog, ContentLoadError> {
    let Some(dir) = dir else {
        return Ok(ContentCatalog::from_json(BUNDLED_LESSONS, BUNDLED_QUESTIONS)?);
    };

    let lessons = read(&dir.join("lessons.json"))?;
    let questions = read(&dir.join("questions.json"))?;
    Ok(ContentCatalog::from_json(&lessons, &questions)?)
}

fn read(path: &Path) -> Result<String, ContentLoadError> {
    std::fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_content_is_valid() {
        let catalog = load_catalog(None).unwrap();
        assert!(catalog.lessons().len() >= 2);
        assert!(catalog.questions().len() >= 10);
    }

    #[test]
    fn missing_dir_reports_path() {
        let err = load_catalog(Some(Path::new("/definitely/not/here"))).unwrap_err();
        assert!(err.to_string().contains("lessons.json"));
    }
}
