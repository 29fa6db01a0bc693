use std::collections::BTreeMap;

use thiserror::Error;

/// Substitution context: placeholder name to replacement text.
pub type RenderContext = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A non-escaped placeholder has no entry in the render context. Always
    /// an authoring bug in the template; never recovered automatically.
    #[error("unbound placeholder '{name}'")]
    UnboundPlaceholder { name: String },

    #[error("unclosed placeholder starting at byte {offset}")]
    UnclosedPlaceholder { offset: usize },

    #[error("empty placeholder at byte {offset}")]
    EmptyPlaceholder { offset: usize },

    /// A single `}` in literal text. Closing markers must be doubled to
    /// render literally, same as opening markers.
    #[error("stray closing marker at byte {offset}")]
    StrayClosingMarker { offset: usize },

    #[error("unknown template '{name}'")]
    UnknownTemplate { name: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed template: literal text interspersed with `{name}` placeholders.
///
/// Doubled markers (`{{`, `}}`) render as single literal marker characters.
/// The rule exists because target build-description formats use the same
/// markers for their own variable references (`${CMAKE_SOURCE_DIR}`), and
/// template authors must be able to emit those literally alongside
/// generator-level substitutions in the same document.
///
/// Parsing happens once; rendering is a pure function of (document, context)
/// and may run many times. The scanner has two states, literal text and
/// inside-placeholder, and is linear in the document length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDocument {
    segments: Vec<Segment>,
}

impl TemplateDocument {
    pub fn parse(text: &str) -> Result<Self, TemplateError> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = text.char_indices().peekable();

        while let Some((offset, c)) = chars.next() {
            match c {
                '{' => {
                    if matches!(chars.peek(), Some((_, '{'))) {
                        chars.next();
                        literal.push('{');
                        continue;
                    }
                    // Placeholder boundary.
                    let mut name = String::new();
                    let mut closed = false;
                    for (name_offset, nc) in chars.by_ref() {
                        match nc {
                            '}' => {
                                closed = true;
                                break;
                            }
                            '{' => {
                                return Err(TemplateError::UnclosedPlaceholder {
                                    offset: name_offset,
                                })
                            }
                            _ => name.push(nc),
                        }
                    }
                    if !closed {
                        return Err(TemplateError::UnclosedPlaceholder { offset });
                    }
                    if name.is_empty() {
                        return Err(TemplateError::EmptyPlaceholder { offset });
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name));
                }
                '}' => {
                    if matches!(chars.peek(), Some((_, '}'))) {
                        chars.next();
                        literal.push('}');
                    } else {
                        return Err(TemplateError::StrayClosingMarker { offset });
                    }
                }
                _ => literal.push(c),
            }
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    /// Render the document against a context. Unescaping already happened at
    /// parse time, unconditionally and independent of context lookups; only
    /// placeholder segments consult the context here.
    pub fn render(&self, context: &RenderContext) -> Result<String, TemplateError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => match context.get(name) {
                    Some(value) => out.push_str(value),
                    None => {
                        return Err(TemplateError::UnboundPlaceholder { name: name.clone() })
                    }
                },
            }
        }
        Ok(out)
    }

    /// Placeholder names in document order, duplicates included.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|s| match s {
                Segment::Placeholder(name) => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect()
    }
}
