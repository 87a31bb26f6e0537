//! The validated options a pipeline run is configured with.
//!
//! No flag parsing happens here; callers hand over a plain value object
//! and the pipeline resolves it against the concrete header.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;
use crate::schema::ColumnType;

/// How rows reference each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkMode {
    /// Each row names its own parent id.
    #[default]
    Parent,
    /// Each row names a comma-separated list of child ids.
    Child,
}

impl FromStr for LinkMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            other => Err(ConfigError::UnknownMode(other.to_string())),
        }
    }
}

impl fmt::Display for LinkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parent => f.write_str("parent"),
            Self::Child => f.write_str("child"),
        }
    }
}

/// Explicit column type declarations, or full inference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeSpec {
    /// Infer every column from sampled data.
    #[default]
    Infer,
    /// `name:type` pairs; unnamed columns are inferred. A later pair
    /// for the same column wins.
    ByName(Vec<(String, ColumnType)>),
    /// Tokens aligned to header order; `None` means infer that column.
    ByPosition(Vec<Option<ColumnType>>),
}

impl TypeSpec {
    /// Parse a `name:type,name:type` list.
    pub fn parse_named(spec: &str) -> Result<Self, ConfigError> {
        let mut pairs = Vec::new();
        for entry in spec.split(',') {
            let entry = entry.trim();
            if entry.is_empty() {
                continue;
            }
            let (name, token) = entry
                .split_once(':')
                .ok_or_else(|| ConfigError::MalformedTypeSpec(entry.to_string()))?;
            pairs.push((name.trim().to_string(), token.parse()?));
        }
        Ok(Self::ByName(pairs))
    }

    /// Parse a positional `type,,type` list; an empty token leaves the
    /// column to inference.
    pub fn parse_positional(spec: &str) -> Result<Self, ConfigError> {
        let mut slots = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            if token.is_empty() {
                slots.push(None);
            } else {
                slots.push(Some(token.parse()?));
            }
        }
        Ok(Self::ByPosition(slots))
    }
}

/// Everything a pipeline run needs to know, validated but not yet
/// resolved against a header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Literal field delimiter.
    pub delimiter: String,
    pub mode: LinkMode,
    /// Id column name; defaults to the first header column in parent
    /// mode. Child mode has no default.
    pub id_column: Option<String>,
    /// Parent or child-list column name; defaults to the last header
    /// column in parent mode. Child mode has no default.
    pub link_column: Option<String>,
    pub types: TypeSpec,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            delimiter: "\t".to_string(),
            mode: LinkMode::Parent,
            id_column: None,
            link_column: None,
            types: TypeSpec::Infer,
        }
    }
}

/// Column indices and per-column type hints for one concrete header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub id_col: usize,
    pub link_col: usize,
    pub hints: Vec<Option<ColumnType>>,
}

impl TableOptions {
    /// Checks that need no header. Runs before any data is read.
    pub fn precheck(&self) -> Result<(), ConfigError> {
        if self.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(())
    }

    /// Resolve column names and type declarations against a header.
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedOptions, ConfigError> {
        let mut hints = vec![None; headers.len()];
        match &self.types {
            TypeSpec::Infer => {}
            TypeSpec::ByName(pairs) => {
                for (name, ty) in pairs {
                    let index = index_of(headers, name)?;
                    hints[index] = Some(*ty);
                }
            }
            TypeSpec::ByPosition(slots) => {
                if slots.len() > headers.len() {
                    return Err(ConfigError::TypeListTooLong {
                        got: slots.len(),
                        expected: headers.len(),
                    });
                }
                for (index, slot) in slots.iter().enumerate() {
                    hints[index] = *slot;
                }
            }
        }

        let id_col = match &self.id_column {
            Some(name) => index_of(headers, name)?,
            None => match self.mode {
                LinkMode::Parent if !headers.is_empty() => 0,
                _ => return Err(ConfigError::MissingColumn { role: "id" }),
            },
        };
        let link_col = match &self.link_column {
            Some(name) => index_of(headers, name)?,
            None => match self.mode {
                LinkMode::Parent if !headers.is_empty() => headers.len() - 1,
                _ => return Err(ConfigError::MissingColumn { role: "link" }),
            },
        };

        Ok(ResolvedOptions {
            id_col,
            link_col,
            hints,
        })
    }
}

fn index_of(headers: &[String], name: &str) -> Result<usize, ConfigError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ConfigError::UnknownColumn(name.to_string()))
}
