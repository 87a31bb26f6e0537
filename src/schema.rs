//! Column schema, typed cell values, and type inference.

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// The closed set of cell types a column can carry.
///
/// `Boolean` is never inferred from data; it is reachable only through
/// explicit configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    String,
    Double,
    Boolean,
    Url,
}

impl Default for ColumnType {
    fn default() -> Self {
        Self::String
    }
}

impl FromStr for ColumnType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "string" => Ok(Self::String),
            "double" => Ok(Self::Double),
            "boolean" => Ok(Self::Boolean),
            "url" => Ok(Self::Url),
            other => Err(ConfigError::UnknownType(other.to_string())),
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            Self::String => "string",
            Self::Double => "double",
            Self::Boolean => "boolean",
            Self::Url => "url",
        };
        f.write_str(token)
    }
}

/// One column of the schema: header name plus resolved type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The ordered column list shared by every record of one input stream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Position of a column by header name, first match wins.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }
}

/// A single typed cell.
///
/// No `PartialEq`: `Double` carries NaN for unparseable input, which has
/// no useful equality. Compare through the accessors or the string form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    String(String),
    Double(f64),
    Boolean(bool),
    Url(String),
}

impl Value {
    /// Parse one raw field according to its column type.
    ///
    /// Total over all input: unparseable numbers become NaN, anything
    /// but a case-insensitive `true` becomes `false`, text is stored
    /// verbatim with no validation.
    pub fn parse(raw: &str, ty: ColumnType) -> Self {
        match ty {
            ColumnType::String => Self::String(raw.to_string()),
            ColumnType::Url => Self::Url(raw.to_string()),
            ColumnType::Double => Self::Double(raw.trim().parse().unwrap_or(f64::NAN)),
            ColumnType::Boolean => Self::Boolean(raw.eq_ignore_ascii_case("true")),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Url(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    /// The string form used for id lookup and rendering. Integral
    /// doubles print without a fractional part, NaN prints as `NaN`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) | Self::Url(s) => f.write_str(s),
            Self::Boolean(b) => write!(f, "{}", b),
            Self::Double(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
        }
    }
}

/// Classifies columns from sampled values.
///
/// Shapes are compiled once; classification itself cannot fail.
pub struct TypeInferencer {
    url_re: Regex,
    number_re: Regex,
}

impl Default for TypeInferencer {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInferencer {
    pub fn new() -> Self {
        Self {
            url_re: Regex::new(r"^https?://.+").unwrap(),
            number_re: Regex::new(r"^-?\d+(\.\d+)?$").unwrap(),
        }
    }

    /// Classify one sampled value: URL shape, then numeric shape, then
    /// `String`. An empty sample is `String`.
    pub fn classify(&self, sample: &str) -> ColumnType {
        if self.url_re.is_match(sample) {
            ColumnType::Url
        } else if self.number_re.is_match(sample) {
            ColumnType::Double
        } else {
            ColumnType::String
        }
    }

    /// Resolve the full schema for a header.
    ///
    /// A `Some` hint wins unconditionally; for the rest, the first
    /// non-empty value of the column across all rows is classified
    /// (empty string when the column has no data at all).
    pub fn infer_schema(
        &self,
        headers: &[String],
        rows: &[Vec<String>],
        hints: &[Option<ColumnType>],
    ) -> Schema {
        let columns = headers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let ty = match hints.get(i).copied().flatten() {
                    Some(explicit) => explicit,
                    None => {
                        let sample = rows
                            .iter()
                            .map(|row| row.get(i).map(String::as_str).unwrap_or(""))
                            .find(|cell| !cell.is_empty())
                            .unwrap_or("");
                        self.classify(sample)
                    }
                };
                Column::new(name.clone(), ty)
            })
            .collect();
        Schema::new(columns)
    }
}
