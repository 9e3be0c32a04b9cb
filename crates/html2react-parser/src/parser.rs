//! HTML fragment tree builder.

use regex::Regex;
use std::sync::LazyLock;

use crate::ast::{Attributes, Node};

/// Elements that never take children.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Elements whose content is taken verbatim up to the matching close tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Deepest element nesting the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// Errors that can occur when parsing HTML.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Unterminated tag starting at byte {offset}")]
    UnterminatedTag { offset: usize },

    #[error("Unterminated comment starting at byte {offset}")]
    UnterminatedComment { offset: usize },

    #[error("Unterminated attribute value starting at byte {offset}")]
    UnterminatedQuote { offset: usize },

    #[error("Element at byte {offset} is nested deeper than {limit} levels")]
    TooDeep { offset: usize, limit: usize },
}

/// Parse an HTML fragment into its top-level nodes.
///
/// The parser is lenient: unmatched closing tags are ignored and elements
/// left open at the end of input are closed implicitly. It only fails on
/// markup that runs off the end of the input, or on elements nested deeper
/// than [`MAX_DEPTH`].
pub fn parse(source: &str) -> Result<Vec<Node>, ParseError> {
    TreeBuilder::new(source).run()
}

/// Kind of markup starting at a `<`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Markup {
    Comment,
    Directive,
    EndTag,
    StartTag,
    Literal,
}

fn classify(rest: &str) -> Markup {
    if rest.starts_with("<!--") {
        return Markup::Comment;
    }
    if rest.starts_with("<!") || rest.starts_with("<?") {
        return Markup::Directive;
    }

    let bytes = rest.as_bytes();
    match bytes.get(1) {
        Some(b'/') if bytes.get(2).is_some_and(u8::is_ascii_alphabetic) => Markup::EndTag,
        Some(b) if b.is_ascii_alphabetic() => Markup::StartTag,
        _ => Markup::Literal,
    }
}

fn is_name_end(b: u8) -> bool {
    b.is_ascii_whitespace() || b == b'/' || b == b'>'
}

fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

fn is_raw_text(tag: &str) -> bool {
    RAW_TEXT_ELEMENTS.contains(&tag.to_ascii_lowercase().as_str())
}

/// An element whose closing tag has not been seen yet.
#[derive(Debug)]
struct OpenElement {
    tag: String,
    attrs: Attributes,
    content: Vec<Node>,
}

impl OpenElement {
    fn into_node(self) -> Node {
        Node::element(self.tag, self.attrs, self.content)
    }
}

/// A parsed start tag.
#[derive(Debug)]
struct StartTag {
    tag: String,
    attrs: Attributes,
    self_closing: bool,
    /// Byte offset just past the closing `>`
    end: usize,
}

struct TreeBuilder<'s> {
    source: &'s str,
    pos: usize,
    stack: Vec<OpenElement>,
    roots: Vec<Node>,
}

impl<'s> TreeBuilder<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            pos: 0,
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Node>, ParseError> {
        let mut text_start = 0;

        while let Some(rel) = self.source[self.pos..].find('<') {
            let lt = self.pos + rel;
            let markup = classify(&self.source[lt..]);

            if markup == Markup::Literal {
                self.pos = lt + 1;
                continue;
            }

            self.flush_text(text_start, lt);

            let end = self.consume(markup, lt)?;

            self.pos = end;
            text_start = end;
        }

        self.flush_text(text_start, self.source.len());

        while let Some(open) = self.stack.pop() {
            tracing::trace!(tag = %open.tag, "closing element at end of input");
            self.push_node(open.into_node());
        }

        Ok(self.roots)
    }

    /// Consume the markup starting at `lt`, returning the offset where scanning resumes.
    fn consume(&mut self, markup: Markup, lt: usize) -> Result<usize, ParseError> {
        match markup {
            Markup::Comment => {
                // Searching from the `--` of the opener accepts `<!-->` and `<!--->`
                let close = self.source[lt + 2..]
                    .find("-->")
                    .ok_or(ParseError::UnterminatedComment { offset: lt })?;
                let end = lt + 2 + close + 3;
                self.push_node(Node::text(&self.source[lt..end]));
                Ok(end)
            }
            Markup::Directive => {
                let close = self.source[lt..]
                    .find('>')
                    .ok_or(ParseError::UnterminatedTag { offset: lt })?;
                let end = lt + close + 1;
                self.push_node(Node::text(&self.source[lt..end]));
                Ok(end)
            }
            Markup::EndTag => {
                let name_end = self.scan_name(lt + 2);
                let close = self.source[name_end..]
                    .find('>')
                    .ok_or(ParseError::UnterminatedTag { offset: lt })?;
                let tag = self.source[lt + 2..name_end].to_string();
                self.close(&tag);
                Ok(name_end + close + 1)
            }
            Markup::StartTag => self.open(lt),
            Markup::Literal => Ok(lt + 1),
        }
    }

    /// Byte offset where a tag name starting at `from` ends.
    fn scan_name(&self, from: usize) -> usize {
        self.source.as_bytes()[from..]
            .iter()
            .position(|&b| is_name_end(b))
            .map_or(self.source.len(), |p| from + p)
    }

    /// Find the `>` that ends a tag, skipping over quoted attribute values.
    fn find_tag_end(&self, from: usize, tag_start: usize) -> Result<usize, ParseError> {
        let bytes = self.source.as_bytes();
        let mut i = from;
        let mut after_eq = false;

        while i < bytes.len() {
            match bytes[i] {
                b'>' => return Ok(i),
                b'=' => after_eq = true,
                q @ (b'"' | b'\'') if after_eq => {
                    let close = self.source[i + 1..]
                        .find(q as char)
                        .ok_or(ParseError::UnterminatedQuote { offset: i })?;
                    i += close + 1;
                    after_eq = false;
                }
                b if b.is_ascii_whitespace() => {}
                _ => after_eq = false,
            }
            i += 1;
        }

        Err(ParseError::UnterminatedTag { offset: tag_start })
    }

    fn parse_start_tag(&self, lt: usize) -> Result<StartTag, ParseError> {
        let name_end = self.scan_name(lt + 1);
        let tag = self.source[lt + 1..name_end].to_string();
        let gt = self.find_tag_end(name_end, lt)?;

        let inner = self.source[name_end..gt].trim_end();
        let self_closing = is_self_closing(inner);

        Ok(StartTag {
            tag,
            attrs: parse_attributes(inner),
            self_closing,
            end: gt + 1,
        })
    }

    /// Handle a start tag at `lt`, returning the offset where scanning resumes.
    fn open(&mut self, lt: usize) -> Result<usize, ParseError> {
        if self.stack.len() >= MAX_DEPTH {
            return Err(ParseError::TooDeep {
                offset: lt,
                limit: MAX_DEPTH,
            });
        }

        let start = self.parse_start_tag(lt)?;

        if start.self_closing || is_void(&start.tag) {
            self.push_node(Node::element(start.tag, start.attrs, Vec::new()));
            return Ok(start.end);
        }

        if is_raw_text(&start.tag) {
            return self.raw_text(start);
        }

        self.stack.push(OpenElement {
            tag: start.tag,
            attrs: start.attrs,
            content: Vec::new(),
        });
        Ok(start.end)
    }

    /// Take the content of a raw-text element verbatim.
    fn raw_text(&mut self, start: StartTag) -> Result<usize, ParseError> {
        // ASCII lowercasing keeps byte offsets aligned with the source.
        let lowered = self.source[start.end..].to_ascii_lowercase();
        let needle = format!("</{}", start.tag.to_ascii_lowercase());

        let (content_end, resume) = match lowered.find(&needle) {
            Some(rel) => {
                let close_start = start.end + rel;
                let gt = self.source[close_start..]
                    .find('>')
                    .ok_or(ParseError::UnterminatedTag {
                        offset: close_start,
                    })?;
                (close_start, close_start + gt + 1)
            }
            None => (self.source.len(), self.source.len()),
        };

        let mut content = Vec::new();
        if content_end > start.end {
            content.push(Node::text(&self.source[start.end..content_end]));
        }
        self.push_node(Node::element(start.tag, start.attrs, content));

        Ok(resume)
    }

    /// Close the innermost open element named `tag` and everything inside it.
    fn close(&mut self, tag: &str) {
        let Some(depth) = self.stack.iter().rposition(|open| open.tag == tag) else {
            tracing::trace!(tag, "ignoring closing tag without open element");
            return;
        };

        while self.stack.len() > depth {
            if let Some(open) = self.stack.pop() {
                if open.tag != tag {
                    tracing::trace!(tag = %open.tag, closed_by = tag, "implicitly closing element");
                }
                self.push_node(open.into_node());
            }
        }
    }

    fn flush_text(&mut self, start: usize, end: usize) {
        if start < end {
            self.push_node(Node::text(&self.source[start..end]));
        }
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.content.push(node),
            None => self.roots.push(node),
        }
    }
}

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Match: name="value", name='value', name=value or a bare name
    Regex::new(r#"([^\s"'/=>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
        .expect("Invalid attribute regex")
});

/// Check whether the attribute section ends with a self-closing `/`.
///
/// A trailing `/` that belongs to an unquoted value (`href=/docs/`) does not
/// close the tag.
fn is_self_closing(inner: &str) -> bool {
    inner.ends_with('/')
        && ATTRIBUTE_RE
            .find_iter(inner)
            .last()
            .map_or(true, |m| m.end() < inner.len())
}

/// Parse the attribute section of a start tag. The first occurrence of a name wins.
fn parse_attributes(source: &str) -> Attributes {
    let mut attrs = Attributes::new();

    for caps in ATTRIBUTE_RE.captures_iter(source) {
        let Some(name) = caps.get(1) else {
            continue;
        };

        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map_or("", |m| m.as_str());

        if !attrs.insert_if_absent(name.as_str(), value) {
            tracing::trace!(name = name.as_str(), "ignoring duplicate attribute");
        }
    }

    attrs
}
