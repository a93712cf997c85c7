//! fieldmap adapt command

use adapter::{BoundaryRegistry, FieldAdapter};
use anyhow::Context;
use clap::Args;
use mappings::MappingLoader;
use serde_json::Value;
use shared::MappingDefinition;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Args)]
pub struct AdaptCommand {
    /// Mapping definition file (.yaml, .yml or .json)
    #[arg(short, long, conflicts_with = "mappings", required_unless_present = "mappings")]
    pub mapping: Option<PathBuf>,

    /// Directory of mapping definitions
    #[arg(long, requires = "boundary")]
    pub mappings: Option<PathBuf>,

    /// Boundary to use from the mapping directory
    #[arg(short, long, conflicts_with = "mapping")]
    pub boundary: Option<String>,

    /// JSON input file (object or array of objects); reads stdin when omitted
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Translate consumer naming back to producer naming
    #[arg(long)]
    pub inverse: bool,

    /// Pretty-print the output
    #[arg(long)]
    pub pretty: bool,
}

impl AdaptCommand {
    pub fn run(&self) -> anyhow::Result<()> {
        let input = match &self.input {
            Some(path) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read input {:?}", path))?,
            None => std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")?,
        };

        println!("{}", self.adapt_document(&input)?);
        Ok(())
    }

    /// Adapt a JSON document and render the result
    pub fn adapt_document(&self, input: &str) -> anyhow::Result<String> {
        let adapter = self.resolve_adapter()?;
        let value: Value = serde_json::from_str(input).context("Input is not valid JSON")?;
        let output = adapter.adapt_value(&value)?;

        let rendered = if self.pretty {
            serde_json::to_string_pretty(&output)?
        } else {
            serde_json::to_string(&output)?
        };
        Ok(rendered)
    }

    fn resolve_adapter(&self) -> anyhow::Result<FieldAdapter> {
        let mut registry = BoundaryRegistry::new();

        let (boundary, skipped) = match (&self.mapping, &self.mappings) {
            (Some(file), _) => {
                let definition = MappingDefinition::from_file(file)
                    .with_context(|| format!("Failed to load mapping {:?}", file))?;
                registry.register_definition(&definition)?;
                (definition.id, Vec::new())
            }
            (None, Some(dir)) => {
                let mut loader = MappingLoader::new();
                let loaded = loader.load_from_directory(dir)?;
                debug!(loaded, dir = %dir.display(), "loaded mapping definitions");
                registry.load_definitions(loader.definitions())?;
                let boundary = self
                    .boundary
                    .clone()
                    .context("--boundary is required with --mappings")?;
                (boundary, loader.skipped().to_vec())
            }
            (None, None) => anyhow::bail!("Either --mapping or --mappings must be given"),
        };

        let adapter = match registry.adapter(&boundary) {
            Ok(adapter) => adapter,
            Err(e) if skipped.is_empty() => return Err(e.into()),
            Err(e) => {
                let files: Vec<String> = skipped
                    .iter()
                    .map(|s| format!("{} ({})", s.path.display(), s.reason))
                    .collect();
                return Err(anyhow::Error::new(e)
                    .context(format!("Skipped mapping files: {}", files.join("; "))));
            }
        };
        if self.inverse {
            Ok(adapter.inverse()?)
        } else {
            Ok(adapter.clone())
        }
    }
}
