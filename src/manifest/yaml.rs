//! YAML emitter with configurable indentation
//!
//! serde_yaml always writes two-space block style with sequences flush
//! against their parent key. Chart maintainers commonly use wider
//! indentation, so documents are converted to a `serde_yaml::Value` and
//! emitted here; scalars are still rendered by serde_yaml so quoting rules
//! stay identical.

use serde::Serialize;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Smallest and largest indentation accepted by YAML emitters
pub const MIN_INDENT: usize = 2;
pub const MAX_INDENT: usize = 9;

/// Errors raised while emitting a document
#[derive(Error, Debug)]
pub enum EmitError {
    /// Conversion to a YAML value or scalar rendering failed
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// Flow rendering of a complex key failed
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Serialize a value as a block-style YAML document using `indent` spaces.
///
/// Indentation outside 2..=9 is clamped. Sequences nested under a key are
/// indented like mappings:
///
/// ```text
/// dependencies:
///     - name: redis
///       version: 1.0.0
/// ```
pub fn to_string_with_indent<T: Serialize>(value: &T, indent: usize) -> Result<String, EmitError> {
    let value = serde_yaml::to_value(value)?;
    let mut emitter = Emitter {
        indent: indent.clamp(MIN_INDENT, MAX_INDENT),
        out: String::new(),
    };
    emitter.write_document(&value)?;
    Ok(emitter.out)
}

struct Emitter {
    indent: usize,
    out: String,
}

impl Emitter {
    fn write_document(&mut self, value: &Value) -> Result<(), EmitError> {
        match value {
            Value::Mapping(map) if !map.is_empty() => self.write_mapping(map, 0, false),
            Value::Sequence(seq) if !seq.is_empty() => self.write_sequence(seq, 0),
            other => {
                let rendered = scalar(other)?;
                self.out.push_str(&rendered);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    /// Writes mapping entries at column `col`. With `inline_first` the
    /// indentation of the first entry has already been written (after "- ").
    fn write_mapping(&mut self, map: &Mapping, col: usize, inline_first: bool) -> Result<(), EmitError> {
        for (i, (key, value)) in map.iter().enumerate() {
            if !(inline_first && i == 0) {
                self.pad(col);
            }
            let key = scalar(key)?;
            self.out.push_str(&key);
            self.out.push(':');
            self.write_value(value, col)?;
        }
        Ok(())
    }

    fn write_sequence(&mut self, seq: &[Value], col: usize) -> Result<(), EmitError> {
        for item in seq {
            self.pad(col);
            self.out.push('-');
            match item {
                Value::Mapping(map) if !map.is_empty() => {
                    self.out.push(' ');
                    self.write_mapping(map, col + 2, true)?;
                }
                other => self.write_value(other, col)?,
            }
        }
        Ok(())
    }

    /// Writes the value following a "key:" or "-" marker owned by column `col`
    fn write_value(&mut self, value: &Value, col: usize) -> Result<(), EmitError> {
        match value {
            Value::Mapping(map) if !map.is_empty() => {
                self.out.push('\n');
                self.write_mapping(map, col + self.indent, false)
            }
            Value::Sequence(seq) if !seq.is_empty() => {
                self.out.push('\n');
                self.write_sequence(seq, col + self.indent)
            }
            Value::Tagged(tagged) => {
                self.out.push(' ');
                self.out.push_str(&tagged.tag.to_string());
                self.write_value(&tagged.value, col)
            }
            other => {
                let rendered = scalar(other)?;
                self.out.push(' ');
                self.out.push_str(&rendered);
                self.out.push('\n');
                Ok(())
            }
        }
    }

    fn pad(&mut self, col: usize) {
        self.out.push_str(&" ".repeat(col));
    }
}

/// Render a value on a single line
fn scalar(value: &Value) -> Result<String, EmitError> {
    match value {
        Value::Mapping(map) if map.is_empty() => Ok("{}".to_string()),
        Value::Sequence(seq) if seq.is_empty() => Ok("[]".to_string()),
        // serde_yaml would switch to a literal block; stay on one line
        Value::String(s) if s.contains('\n') => Ok(serde_json::to_string(s)?),
        Value::Mapping(_) | Value::Sequence(_) => Ok(serde_json::to_string(value)?),
        other => Ok(serde_yaml::to_string(other)?.trim_end_matches('\n').to_string()),
    }
}
