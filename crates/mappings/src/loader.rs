//! MappingLoader - Load mapping definitions from YAML/JSON files

use shared::{FieldmapError, MappingDefinition, MappingManifest};
use std::path::{Path, PathBuf};
use tracing::warn;

const EXTENSIONS: [&str; 3] = ["yaml", "yml", "json"];

/// A definition file left out by `load_from_directory`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Mapping definition loader
#[derive(Debug, Default)]
pub struct MappingLoader {
    definitions: Vec<MappingDefinition>,
    skipped: Vec<SkippedFile>,
}

impl MappingLoader {
    /// Create a new MappingLoader
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every definition file directly inside a directory.
    ///
    /// Files that fail to parse are skipped with a warning, as are ids that
    /// were already loaded; both are recorded in `skipped()`. Returns the
    /// number of definitions added.
    pub fn load_from_directory(&mut self, dir: &Path) -> shared::Result<usize> {
        if !dir.exists() {
            return Ok(0);
        }

        let mut added = 0;
        for path in Self::definition_files(dir)? {
            let definition = match MappingDefinition::from_file(&path) {
                Ok(definition) => definition,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "skipping unreadable mapping file");
                    self.skipped.push(SkippedFile {
                        path,
                        reason: e.to_string(),
                    });
                    continue;
                }
            };

            if self.find(&definition.id).is_some() {
                warn!(path = %path.display(), id = %definition.id, "skipping duplicate mapping id");
                self.skipped.push(SkippedFile {
                    path,
                    reason: format!("Mapping '{}' is already loaded", definition.id),
                });
                continue;
            }

            self.definitions.push(definition);
            added += 1;
        }

        Ok(added)
    }

    /// Load a single definition file, failing on any error
    pub fn load_file(&mut self, path: &Path) -> shared::Result<&MappingDefinition> {
        let definition = MappingDefinition::from_file(path)?;

        if self.find(&definition.id).is_some() {
            return Err(FieldmapError::Config(format!(
                "Mapping '{}' from '{}' is already loaded",
                definition.id,
                path.display()
            )));
        }

        let index = self.definitions.len();
        self.definitions.push(definition);
        Ok(&self.definitions[index])
    }

    /// Definition files directly inside a directory, sorted by path
    pub fn definition_files(dir: &Path) -> shared::Result<Vec<PathBuf>> {
        let dir = dir.to_str().ok_or_else(|| {
            FieldmapError::Config(format!("Mapping directory '{}' is not valid UTF-8", dir.display()))
        })?;
        let dir = glob::Pattern::escape(dir);

        let mut files = Vec::new();
        for ext in EXTENSIONS {
            let pattern = format!("{}/*.{}", dir, ext);
            let paths = glob::glob(&pattern)
                .map_err(|e| FieldmapError::Config(format!("Invalid mapping pattern '{}': {}", pattern, e)))?;

            for entry in paths {
                match entry {
                    Ok(path) if path.is_file() => files.push(path),
                    Ok(_) => {}
                    Err(e) => warn!(error = %e, "skipping unreadable path"),
                }
            }
        }

        files.sort();
        Ok(files)
    }

    /// Get loaded definitions
    pub fn definitions(&self) -> &[MappingDefinition] {
        &self.definitions
    }

    /// Files skipped by `load_from_directory`
    pub fn skipped(&self) -> &[SkippedFile] {
        &self.skipped
    }

    /// Find a definition by id
    pub fn find(&self, id: &str) -> Option<&MappingDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    /// Generate a mapping manifest
    pub fn to_manifest(&self, version: &str) -> MappingManifest {
        MappingManifest {
            mappings: self.definitions.clone(),
            version: version.to_string(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::FieldRule;

    const USERS_YAML: &str = r#"
id: users-api
description: Users endpoint consumed by the profile view
fields:
  - consumer: firstName
    producer: userName
"#;

    const USERS_DB_JSON: &str = r#"{
  "id": "users-db",
  "fields": [{"consumer": "firstName", "producer": "username"}]
}"#;

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users-api.yaml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("users-db.json"), USERS_DB_JSON).unwrap();
        std::fs::write(dir.path().join("README.md"), "# not a mapping").unwrap();

        let mut loader = MappingLoader::new();
        let added = loader.load_from_directory(dir.path()).unwrap();

        assert_eq!(added, 2);
        let users = loader.find("users-api").unwrap();
        assert_eq!(users.fields, vec![FieldRule::new("firstName", "userName")]);
        assert!(loader.find("users-db").is_some());
    }

    #[test]
    fn test_malformed_and_duplicate_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.yaml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("b.yml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let mut loader = MappingLoader::new();
        let added = loader.load_from_directory(dir.path()).unwrap();

        assert_eq!(added, 1);
        assert_eq!(loader.definitions().len(), 1);

        let skipped: Vec<_> = loader
            .skipped()
            .iter()
            .map(|s| s.path.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(skipped, vec!["b.yml".to_string(), "broken.json".to_string()]);
        assert!(loader.skipped()[0].reason.contains("already loaded"));
    }

    #[test]
    fn test_definition_files_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("z.json"), USERS_DB_JSON).unwrap();
        std::fs::write(dir.path().join("a.yml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let files = MappingLoader::definition_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.yml"), dir.path().join("z.json")]);
    }

    #[test]
    fn test_missing_directory_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();

        let mut loader = MappingLoader::new();
        let added = loader.load_from_directory(&dir.path().join("absent")).unwrap();

        assert_eq!(added, 0);
    }

    #[test]
    fn test_load_file_is_strict() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("users.yaml");
        let broken = dir.path().join("broken.json");
        std::fs::write(&good, USERS_YAML).unwrap();
        std::fs::write(&broken, "{ not json").unwrap();

        let mut loader = MappingLoader::new();
        assert_eq!(loader.load_file(&good).unwrap().id, "users-api");
        assert!(matches!(loader.load_file(&good), Err(FieldmapError::Config(_))));
        assert!(matches!(loader.load_file(&broken), Err(FieldmapError::Json(_))));
    }

    #[test]
    fn test_manifest() {
        let mut loader = MappingLoader::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.yaml");
        std::fs::write(&path, USERS_YAML).unwrap();
        loader.load_file(&path).unwrap();

        let manifest = loader.to_manifest("1.0.0");
        assert_eq!(manifest.version, "1.0.0");
        assert_eq!(manifest.mappings.len(), 1);
        assert!(!manifest.generated_at.is_empty());
    }
}
