//! Lowering driver and high-level APIs
//!
//! Loads resolved syntax trees from disk, runs them through `sl-lower` and
//! serializes the resulting schemas. Several files can be lowered in
//! parallel; every file gets its own diagnostic collector and results always
//! come back in input order.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sl_lower::{Diagnostic, Diagnostics, LowerError};
use sl_schema::SchemaFile;
use sl_span::FileId;
use sl_syntax::SourceFile;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Schema of one file together with its non-fatal diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoweredFile {
    /// Lowered schema
    pub schema: SchemaFile,
    /// Diagnostics in report order
    pub diagnostics: Vec<Diagnostic>,
}

impl LoweredFile {
    /// Whether anything was reported
    #[must_use]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Why a file produced no schema
#[derive(Debug, Error)]
pub enum FileError {
    /// The tree could not be read or parsed
    #[error(transparent)]
    Load(#[from] anyhow::Error),
    /// The tree broke its resolution contract
    #[error(transparent)]
    Lower(#[from] LowerError),
}

/// Outcome of lowering one input path
#[derive(Debug)]
pub struct FileOutcome {
    /// Input path as given
    pub path: PathBuf,
    /// Lowered file or the reason there is none
    pub result: Result<LoweredFile, FileError>,
}

/// Read and deserialize a JSON syntax tree
///
/// When the tree does not name its own path, the path it was read from is
/// filled in.
pub fn load_source_file(path: impl AsRef<Path>) -> Result<SourceFile> {
    let path = path.as_ref();
    let json = std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let mut file: SourceFile =
        serde_json::from_str(&json).with_context(|| format!("Failed to parse syntax tree {}", path.display()))?;

    if file.path.is_empty() {
        file.path = path.display().to_string();
    }
    Ok(file)
}

/// Lower one syntax tree
///
/// # Errors
///
/// Returns the [`LowerError`] that stopped lowering. Diagnostics reported
/// before it are discarded.
pub fn lower_file(file: &SourceFile) -> Result<LoweredFile, LowerError> {
    let mut diagnostics = Diagnostics::new();
    let schema = sl_lower::build_schema(file, &mut diagnostics)?;

    tracing::debug!(
        path = %file.path,
        diagnostics = diagnostics.len(),
        "lowered file"
    );
    Ok(LoweredFile {
        schema,
        diagnostics: diagnostics.into_vec(),
    })
}

/// Load and lower many files
///
/// Each file is assigned the [`FileId`] of its position in `paths`. A failure
/// in one file does not affect the others.
pub fn lower_paths<P: AsRef<Path> + Sync>(paths: &[P], parallel: bool) -> Vec<FileOutcome> {
    let lower_one = |(index, path): (usize, &P)| {
        let path = path.as_ref();
        FileOutcome {
            path: path.to_path_buf(),
            result: load_and_lower(path, FileId::new(index as u32)),
        }
    };

    if parallel && paths.len() > 1 {
        tracing::debug!(files = paths.len(), "lowering in parallel");
        paths.par_iter().enumerate().map(lower_one).collect()
    } else {
        paths.iter().enumerate().map(lower_one).collect()
    }
}

fn load_and_lower(path: &Path, id: FileId) -> Result<LoweredFile, FileError> {
    let mut file = load_source_file(path)?;
    file.id = id;
    Ok(lower_file(&file)?)
}

/// Serialized form of a schema
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Compact single-line JSON
    #[default]
    Json,
    /// Indented JSON
    #[serde(rename = "pretty")]
    PrettyJson,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(format: &str) -> Result<Self> {
        match format {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::PrettyJson),
            other => anyhow::bail!("Unknown output format `{other}` (expected `json` or `pretty`)"),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(match self {
            Self::Json => "json",
            Self::PrettyJson => "pretty",
        })
    }
}

/// Serialize a schema
pub fn render_schema(schema: &SchemaFile, format: OutputFormat) -> Result<String> {
    render(schema, format)
}

/// Serialize several schemas as one JSON object keyed by input path
pub fn render_schemas<'a>(
    schemas: impl IntoIterator<Item = (&'a Path, &'a SchemaFile)>,
    format: OutputFormat,
) -> Result<String> {
    let keyed: IndexMap<String, &SchemaFile> = schemas
        .into_iter()
        .map(|(path, schema)| (path.display().to_string(), schema))
        .collect();
    render(&keyed, format)
}

fn render<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value),
        OutputFormat::PrettyJson => serde_json::to_string_pretty(value),
    };
    rendered.context("Failed to serialize schema")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const COLOR_TREE: &str = r#"{
        "path": "color.ts",
        "text": "enum Color { Red, DarkBlue }",
        "items": [
            {
                "kind": "enum",
                "name": { "text": "Color" },
                "members": [
                    { "name": { "text": "Red" } },
                    { "name": { "text": "DarkBlue" } }
                ]
            }
        ]
    }"#;

    const BROKEN_TREE: &str = r#"{
        "text": "class Box { item; }",
        "items": [
            {
                "kind": "class",
                "name": { "text": "Box" },
                "members": [ { "kind": "property", "name": { "text": "item" } } ]
            }
        ]
    }"#;

    fn write_tree(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_fills_in_missing_path() {
        let tree = write_tree(BROKEN_TREE);
        let file = load_source_file(tree.path()).unwrap();
        assert_eq!(file.path, tree.path().display().to_string());

        let named = write_tree(COLOR_TREE);
        assert_eq!(load_source_file(named.path()).unwrap().path, "color.ts");
    }

    #[test]
    fn test_load_reports_parse_failure() {
        let tree = write_tree("{ not json");
        let error = load_source_file(tree.path()).unwrap_err();
        assert!(error.to_string().starts_with("Failed to parse syntax tree"));
    }

    #[test]
    fn test_lower_and_render_compact() {
        let tree = write_tree(COLOR_TREE);
        let file = load_source_file(tree.path()).unwrap();
        let lowered = lower_file(&file).unwrap();
        assert!(!lowered.has_diagnostics());

        assert_eq!(
            render_schema(&lowered.schema, OutputFormat::Json).unwrap(),
            r#"{"enums":{"color":{"values":[{"name":"red"},{"name":"dark_blue"}]}},"classes":{}}"#
        );
    }

    #[test]
    fn test_lower_paths_keeps_input_order_and_isolates_failures() {
        let good = write_tree(COLOR_TREE);
        let broken = write_tree(BROKEN_TREE);
        let missing = PathBuf::from("/nonexistent/tree.json");
        let paths = vec![good.path().to_path_buf(), broken.path().to_path_buf(), missing.clone()];

        for parallel in [false, true] {
            let outcomes = lower_paths(&paths, parallel);
            assert_eq!(outcomes.len(), 3);
            assert_eq!(outcomes[0].path, good.path());
            assert!(outcomes[0].result.is_ok());
            assert!(matches!(
                outcomes[1].result,
                Err(FileError::Lower(LowerError::MissingType { .. }))
            ));
            assert_eq!(outcomes[2].path, missing);
            assert!(matches!(outcomes[2].result, Err(FileError::Load(_))));
        }
    }

    #[test]
    fn test_file_ids_follow_input_position() {
        let first = write_tree(BROKEN_TREE);
        let second = write_tree(BROKEN_TREE);
        let outcomes = lower_paths(&[first.path(), second.path()], false);

        let Err(FileError::Lower(LowerError::MissingType { span, .. })) = &outcomes[1].result else {
            panic!("expected missing type error");
        };
        assert_eq!(span.file, FileId(1));
    }

    #[test]
    fn test_render_several_schemas_keyed_by_path() {
        let schema = SchemaFile::default();
        let rendered = render_schemas(
            [(Path::new("b.json"), &schema), (Path::new("a.json"), &schema)],
            OutputFormat::Json,
        )
        .unwrap();
        assert_eq!(
            rendered,
            r#"{"b.json":{"enums":{},"classes":{}},"a.json":{"enums":{},"classes":{}}}"#
        );
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("pretty".parse::<OutputFormat>().unwrap(), OutputFormat::PrettyJson);
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::PrettyJson.to_string(), "pretty");
    }
}
