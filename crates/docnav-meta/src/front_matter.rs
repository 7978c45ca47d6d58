//! Extraction of the leading `---` delimited YAML block.

use serde_yaml::{Mapping, Value};

/// Line that opens and closes a front matter block.
pub const DELIMITER: &str = "---";

/// Error returned when a document's front matter cannot be extracted.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// Document has no content at all.
    #[error("document is empty")]
    Empty,
    /// First line is not a `---` marker.
    #[error("document does not start with a `---` front matter marker")]
    MissingMarker,
    /// Opening marker found but no closing marker follows.
    #[error("front matter block is not terminated by a closing `---` marker")]
    Unterminated,
    /// Block is not valid YAML.
    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// Block is valid YAML but not a key/value mapping.
    #[error("front matter must be a key/value mapping")]
    NotMapping,
}

/// Split a document into its front matter block and the remaining body.
///
/// The first line must be exactly `---` (trailing whitespace and `\r` are
/// ignored). The block ends at the next line consisting of `---`.
///
/// # Errors
///
/// Returns [`FrontMatterError::Empty`], [`FrontMatterError::MissingMarker`] or
/// [`FrontMatterError::Unterminated`] when no complete block is present.
pub fn split(content: &str) -> Result<(&str, &str), FrontMatterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    if content.trim().is_empty() {
        return Err(FrontMatterError::Empty);
    }

    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Err(FrontMatterError::Empty);
    };
    if first.trim_end() != DELIMITER {
        return Err(FrontMatterError::MissingMarker);
    }

    let block_start = first.len();
    let mut offset = block_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return Ok((block, body));
        }
        offset += line.len();
    }

    Err(FrontMatterError::Unterminated)
}

/// Key/value mapping parsed from a document's front matter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrontMatter {
    fields: Mapping,
}

impl FrontMatter {
    /// Parse the front matter block at the top of `content`.
    ///
    /// An empty block (`---` immediately followed by `---`) yields an empty mapping.
    ///
    /// # Errors
    ///
    /// Returns an error if the block is missing, unterminated, not valid YAML,
    /// or not a mapping.
    pub fn parse(content: &str) -> Result<Self, FrontMatterError> {
        let (block, _) = split(content)?;
        if block.trim().is_empty() {
            return Ok(Self::default());
        }

        match serde_yaml::from_str::<Value>(block)? {
            Value::Mapping(fields) => Ok(Self { fields }),
            Value::Null => Ok(Self::default()),
            _ => Err(FrontMatterError::NotMapping),
        }
    }

    /// Look up a top-level key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Number of top-level keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── split tests ──────────────────────────────────────────────────

    #[test]
    fn test_split_returns_block_and_body() {
        let (block, body) = split("---\ntitle: Guide\n---\n# Guide\n").unwrap();
        assert_eq!(block, "title: Guide\n");
        assert_eq!(body, "# Guide\n");
    }

    #[test]
    fn test_split_handles_crlf() {
        let (block, body) = split("---\r\ntitle: Guide\r\n---\r\nText").unwrap();
        assert_eq!(block, "title: Guide\r\n");
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_split_closing_marker_at_eof() {
        let (block, body) = split("---\ntitle: Guide\n---").unwrap();
        assert_eq!(block, "title: Guide\n");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_skips_byte_order_mark() {
        let (block, _) = split("\u{feff}---\ntitle: Guide\n---\n").unwrap();
        assert_eq!(block, "title: Guide\n");
    }

    #[test]
    fn test_split_empty_document() {
        assert!(matches!(split(""), Err(FrontMatterError::Empty)));
        assert!(matches!(split("  \n\n"), Err(FrontMatterError::Empty)));
    }

    #[test]
    fn test_split_missing_marker() {
        let result = split("# Just a heading\n\ntitle: nope\n");
        assert!(matches!(result, Err(FrontMatterError::MissingMarker)));
    }

    #[test]
    fn test_split_unterminated_block() {
        let result = split("---\ntitle: Guide\n# Guide\n");
        assert!(matches!(result, Err(FrontMatterError::Unterminated)));
    }

    #[test]
    fn test_split_dashes_inside_value_do_not_close() {
        let (block, _) = split("---\ntitle: a---b\n---\n").unwrap();
        assert_eq!(block, "title: a---b\n");
    }

    // ── parse tests ──────────────────────────────────────────────────

    #[test]
    fn test_parse_mapping() {
        let front = FrontMatter::parse("---\ntitle: Guide\nweight: 3\n---\n").unwrap();
        assert_eq!(front.len(), 2);
        assert_eq!(front.get("title"), Some(&Value::String("Guide".to_owned())));
        assert_eq!(front.get("weight"), Some(&Value::Number(3.into())));
        assert!(front.get("missing").is_none());
    }

    #[test]
    fn test_parse_empty_block() {
        let front = FrontMatter::parse("---\n---\nBody").unwrap();
        assert!(front.is_empty());
    }

    #[test]
    fn test_parse_null_document() {
        let front = FrontMatter::parse("---\n~\n---\n").unwrap();
        assert!(front.is_empty());
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = FrontMatter::parse("---\ntitle: [unclosed\n---\n");
        assert!(matches!(result, Err(FrontMatterError::Yaml(_))));
    }

    #[test]
    fn test_parse_sequence_is_not_mapping() {
        let result = FrontMatter::parse("---\n- a\n- b\n---\n");
        assert!(matches!(result, Err(FrontMatterError::NotMapping)));
    }

    #[test]
    fn test_parse_error_messages() {
        let err = FrontMatter::parse("no front matter").unwrap_err();
        assert_eq!(
            err.to_string(),
            "document does not start with a `---` front matter marker"
        );
        let err = FrontMatter::parse("---\ntitle: x\n").unwrap_err();
        assert!(err.to_string().contains("not terminated"));
    }
}
