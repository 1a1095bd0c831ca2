//! Streaming XML token source.
//!
//! A thin pull cursor over quick-xml that yields exactly the event kinds the
//! response decoder consumes: element open, element close, character data and
//! whitespace-only character data. Empty elements are expanded into an
//! open/close pair and adjacent text/CDATA chunks are coalesced into one
//! token, so the decoder never needs lookahead.
//!
//! XML declaration, comments, processing instructions and DOCTYPE are
//! consumed silently. Well-formedness is the tokenizer's concern; its
//! failures surface as [`Error::XmlParse`].

use std::collections::VecDeque;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{Error, Result};

/// Byte cap for the raw-input fragment reported in grammar violations.
const MAX_CONTEXT_BYTES: usize = 120;

/// Byte span into the input, for error context.
type Span = (usize, usize);

/// One event of the token stream, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlToken {
    /// An element opened (empty elements open and immediately close).
    ElementStart(String),
    /// An element closed.
    ElementEnd(String),
    /// Character data with non-whitespace content, unescaped and coalesced.
    Text(String),
    /// Whitespace-only character data, significant only where text is
    /// structurally expected.
    Whitespace(String),
}

/// Pull-based token cursor over a complete XML document.
pub struct TokenSource<'a> {
    reader: Reader<&'a [u8]>,
    input: &'a str,
    queue: VecDeque<(XmlToken, Span)>,
    /// Open elements enclosing the cursor.
    depth: usize,
    /// Nesting depth of the most recently returned token.
    token_depth: usize,
    /// Input span of the most recently returned token.
    fragment: Span,
}

impl<'a> TokenSource<'a> {
    /// Creates a cursor over a UTF-8 XML document.
    pub fn new(input: &'a str) -> TokenSource<'a> {
        let mut reader = Reader::from_str(input);
        reader.config_mut().trim_text(false);
        TokenSource {
            reader,
            input,
            queue: VecDeque::new(),
            depth: 0,
            token_depth: 0,
            fragment: (0, 0),
        }
    }

    /// Returns the next token, or `None` at the end of the document.
    pub fn next_token(&mut self) -> Result<Option<XmlToken>> {
        if self.queue.is_empty() {
            self.fill_queue()?;
        }
        let Some((token, span)) = self.queue.pop_front() else {
            return Ok(None);
        };
        self.fragment = span;
        match &token {
            XmlToken::ElementStart(_) => {
                self.token_depth = self.depth;
                self.depth += 1;
            }
            XmlToken::ElementEnd(_) => {
                self.depth = self.depth.saturating_sub(1);
                self.token_depth = self.depth;
            }
            XmlToken::Text(_) | XmlToken::Whitespace(_) => {
                self.token_depth = self.depth;
            }
        }
        Ok(Some(token))
    }

    /// Nesting depth of the most recently returned token.
    pub fn depth(&self) -> usize {
        self.token_depth
    }

    /// Raw input fragment of the most recently returned token, capped for
    /// diagnostics.
    pub fn context(&self) -> String {
        let (start, end) = self.fragment;
        let end = end.min(self.input.len());
        let start = start.min(end);
        let mut fragment = &self.input[start..end];
        if fragment.len() > MAX_CONTEXT_BYTES {
            let mut cut = MAX_CONTEXT_BYTES;
            while !fragment.is_char_boundary(cut) {
                cut -= 1;
            }
            fragment = &fragment[..cut];
        }
        fragment.to_string()
    }

    /// Reads tokenizer events until at least one token is queued, coalescing
    /// character data runs. An empty queue afterwards means end of input.
    fn fill_queue(&mut self) -> Result<()> {
        let mut text: Option<(String, Span)> = None;
        loop {
            let start = self.reader.buffer_position() as usize;
            let event = self
                .reader
                .read_event()
                .map_err(|err| Error::XmlParse(err.to_string()))?;
            let span = (start, self.reader.buffer_position() as usize);
            match event {
                Event::Text(e) => {
                    let chunk = e.unescape().map_err(|err| Error::XmlParse(err.to_string()))?;
                    push_text(&mut text, &chunk, span);
                }
                Event::CData(e) => {
                    let bytes = e.into_inner();
                    push_text(&mut text, &String::from_utf8_lossy(&bytes), span);
                }
                Event::Start(e) => {
                    self.flush_text(&mut text);
                    self.queue
                        .push_back((XmlToken::ElementStart(element_name(e.name())), span));
                    return Ok(());
                }
                Event::Empty(e) => {
                    self.flush_text(&mut text);
                    let name = element_name(e.name());
                    self.queue
                        .push_back((XmlToken::ElementStart(name.clone()), span));
                    self.queue.push_back((XmlToken::ElementEnd(name), span));
                    return Ok(());
                }
                Event::End(e) => {
                    self.flush_text(&mut text);
                    self.queue
                        .push_back((XmlToken::ElementEnd(element_name(e.name())), span));
                    return Ok(());
                }
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => {
                    self.flush_text(&mut text);
                    return Ok(());
                }
            }
        }
    }

    /// Queues a buffered character-data run as one token.
    fn flush_text(&mut self, buf: &mut Option<(String, Span)>) {
        if let Some((text, span)) = buf.take() {
            let token = if text.trim().is_empty() {
                XmlToken::Whitespace(text)
            } else {
                XmlToken::Text(text)
            };
            self.queue.push_back((token, span));
        }
    }
}

fn push_text(buf: &mut Option<(String, Span)>, chunk: &str, span: Span) {
    match buf {
        Some((text, (_, end))) => {
            text.push_str(chunk);
            *end = span.1;
        }
        None => *buf = Some((chunk.to_string(), span)),
    }
}

fn element_name(name: QName<'_>) -> String {
    String::from_utf8_lossy(name.as_ref()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens_of(input: &str) -> Vec<XmlToken> {
        let mut source = TokenSource::new(input);
        let mut tokens = Vec::new();
        while let Some(token) = source.next_token().unwrap() {
            tokens.push(token);
        }
        tokens
    }

    #[test]
    fn simple_document() {
        assert_eq!(
            tokens_of("<a><b>x</b></a>"),
            vec![
                XmlToken::ElementStart("a".into()),
                XmlToken::ElementStart("b".into()),
                XmlToken::Text("x".into()),
                XmlToken::ElementEnd("b".into()),
                XmlToken::ElementEnd("a".into()),
            ]
        );
    }

    /// `<b/>` opens and immediately closes.
    #[test]
    fn empty_element_expands() {
        assert_eq!(
            tokens_of("<a><b/></a>"),
            vec![
                XmlToken::ElementStart("a".into()),
                XmlToken::ElementStart("b".into()),
                XmlToken::ElementEnd("b".into()),
                XmlToken::ElementEnd("a".into()),
            ]
        );
    }

    #[test]
    fn whitespace_is_distinguished_from_text() {
        assert_eq!(
            tokens_of("<a>  <b> x </b></a>"),
            vec![
                XmlToken::ElementStart("a".into()),
                XmlToken::Whitespace("  ".into()),
                XmlToken::ElementStart("b".into()),
                XmlToken::Text(" x ".into()),
                XmlToken::ElementEnd("b".into()),
                XmlToken::ElementEnd("a".into()),
            ]
        );
    }

    /// Text and CDATA chunks merge into a single token.
    #[test]
    fn adjacent_text_and_cdata_coalesce() {
        assert_eq!(
            tokens_of("<a>one<![CDATA[ & two]]> three</a>"),
            vec![
                XmlToken::ElementStart("a".into()),
                XmlToken::Text("one & two three".into()),
                XmlToken::ElementEnd("a".into()),
            ]
        );
    }

    #[test]
    fn entities_are_unescaped() {
        assert_eq!(
            tokens_of("<a>a &amp; b &lt;c&gt;</a>"),
            vec![
                XmlToken::ElementStart("a".into()),
                XmlToken::Text("a & b <c>".into()),
                XmlToken::ElementEnd("a".into()),
            ]
        );
    }

    #[test]
    fn markup_noise_is_skipped() {
        assert_eq!(
            tokens_of("<?xml version=\"1.0\"?><!-- hi --><a><?pi data?>x</a>"),
            vec![
                XmlToken::ElementStart("a".into()),
                XmlToken::Text("x".into()),
                XmlToken::ElementEnd("a".into()),
            ]
        );
    }

    #[test]
    fn depth_tracks_nesting() {
        let mut source = TokenSource::new("<a><b>x</b></a>");
        let expected = [
            (XmlToken::ElementStart("a".into()), 0),
            (XmlToken::ElementStart("b".into()), 1),
            (XmlToken::Text("x".into()), 2),
            (XmlToken::ElementEnd("b".into()), 1),
            (XmlToken::ElementEnd("a".into()), 0),
        ];
        for (token, depth) in expected {
            assert_eq!(source.next_token().unwrap(), Some(token));
            assert_eq!(source.depth(), depth);
        }
        assert_eq!(source.next_token().unwrap(), None);
    }

    #[test]
    fn context_reports_the_current_fragment() {
        let mut source = TokenSource::new("<a><unexpected/></a>");
        source.next_token().unwrap(); // <a>
        source.next_token().unwrap(); // <unexpected>
        assert!(source.context().contains("unexpected"), "{}", source.context());
    }

    #[test]
    fn context_is_capped() {
        let big = format!("<a>{}</a>", "x".repeat(10 * MAX_CONTEXT_BYTES));
        let mut source = TokenSource::new(&big);
        source.next_token().unwrap(); // <a>
        source.next_token().unwrap(); // text
        assert!(source.context().len() <= MAX_CONTEXT_BYTES);
    }

    /// Mismatched end tags are the tokenizer's failure, not a grammar error.
    #[test]
    fn ill_formed_input_is_an_xml_parse_error() {
        let mut source = TokenSource::new("<a><b></a></b>");
        source.next_token().unwrap();
        source.next_token().unwrap();
        let err = loop {
            match source.next_token() {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("expected a tokenizer error"),
                Err(err) => break err,
            }
        };
        assert!(matches!(err, Error::XmlParse(_)), "{err:?}");
    }
}
