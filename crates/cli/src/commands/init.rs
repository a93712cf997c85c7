//! fieldmap init command

use clap::Args;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InitCommand {
    /// Directory to initialize
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Create the mappings directory without example definitions
    #[arg(long)]
    pub minimal: bool,
}

impl InitCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        println!("Initializing Fieldmap mappings in {:?}", self.directory);

        let mappings_dir = self.directory.join("mappings");
        std::fs::create_dir_all(&mappings_dir)?;

        if !self.minimal {
            self.create_example_mappings(&mappings_dir)?;
        }

        println!("✓ Fieldmap mappings initialized");
        Ok(())
    }

    fn create_example_mappings(&self, mappings_dir: &Path) -> anyhow::Result<()> {
        // HTTP endpoint writes userName, the client view reads firstName
        std::fs::write(
            mappings_dir.join("users-api.yaml"),
            r#"id: users-api
description: Users endpoint consumed by the profile view
fields:
  - consumer: firstName
    producer: userName
"#,
        )?;

        // Query rows use the column names of the users table
        let users_db = serde_json::json!({
            "id": "users-db",
            "description": "Rows from the users table",
            "fields": [
                { "consumer": "firstName", "producer": "username" }
            ]
        });
        std::fs::write(
            mappings_dir.join("users-db.json"),
            serde_json::to_string_pretty(&users_db)?,
        )?;

        Ok(())
    }
}
