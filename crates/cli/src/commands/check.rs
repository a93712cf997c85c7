//! fieldmap check command

use adapter::FieldMapping;
use clap::Args;
use console::style;
use mappings::MappingLoader;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct CheckCommand {
    /// Mapping file or directory of mapping files
    #[arg(default_value = "mappings")]
    pub path: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let files = if self.path.is_dir() {
            MappingLoader::definition_files(&self.path)?
        } else {
            vec![self.path.clone()]
        };

        if files.is_empty() {
            anyhow::bail!("No mapping definitions found in {:?}", self.path);
        }

        // Every file is loaded strictly: parse failures and duplicate ids count as invalid
        let mut loader = MappingLoader::new();
        let mut invalid = 0;
        for file in &files {
            let definition = match loader.load_file(file) {
                Ok(definition) => definition,
                Err(e) => {
                    invalid += 1;
                    println!("{} {}: {}", style("✗").red(), style(file.display()).bold(), e);
                    continue;
                }
            };

            match FieldMapping::try_from(definition) {
                Ok(mapping) => {
                    println!("{} {}", style("✓").green(), style(&definition.id).bold());
                    if let Some(description) = &definition.description {
                        println!("  {}", style(description).dim());
                    }
                    for rule in mapping.rules() {
                        println!("  {} <- {}", rule.consumer, rule.producer);
                    }
                }
                Err(e) => {
                    invalid += 1;
                    println!("{} {}: {}", style("✗").red(), style(&definition.id).bold(), e);
                }
            }
        }

        if invalid > 0 {
            anyhow::bail!("{} of {} mapping definitions are invalid", invalid, files.len());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const USERS_YAML: &str = r#"
id: users-api
fields:
  - consumer: firstName
    producer: userName
"#;

    fn check(path: &Path) -> anyhow::Result<()> {
        CheckCommand {
            path: path.to_path_buf(),
        }
        .run()
    }

    #[test]
    fn test_check_valid_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users.yaml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("README.md"), "# not a mapping").unwrap();

        assert!(check(dir.path()).is_ok());
    }

    #[test]
    fn test_check_valid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.yaml");
        std::fs::write(&path, USERS_YAML).unwrap();

        assert!(check(&path).is_ok());
    }

    #[test]
    fn test_check_empty_directory_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = check(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("No mapping definitions found"));
    }

    #[test]
    fn test_check_malformed_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("users.yaml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

        let err = check(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 mapping definitions are invalid");
    }

    #[test]
    fn test_check_duplicate_id_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.yaml"), USERS_YAML).unwrap();
        std::fs::write(dir.path().join("b.yml"), USERS_YAML).unwrap();

        let err = check(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "1 of 2 mapping definitions are invalid");
    }

    #[test]
    fn test_check_duplicate_consumer_key_fails() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("users.yaml"),
            r#"
id: users-api
fields:
  - consumer: firstName
    producer: userName
  - consumer: firstName
    producer: nickName
"#,
        )
        .unwrap();

        let err = check(dir.path()).unwrap_err();
        assert_eq!(err.to_string(), "1 of 1 mapping definitions are invalid");
    }

    #[test]
    fn test_check_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();

        let err = check(&dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.to_string(), "1 of 1 mapping definitions are invalid");
    }
}
