//! Tag scanner for template bodies
//!
//! Splits a body into `{{ ... }}` tags with a forward-only state machine.
//! Text between tags is never copied; tags carry byte spans into the source.

/// What a tag does once it is interpreted
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TagKind {
    /// `{{ expr }}`: a lookup or a call, emitted into the buffer
    Expression { source: String },

    /// `{{each items |item|}}` or `{{section "key"}}`
    BlockStart { keyword: String, args: String },

    /// `{{/each}}` or `{{/section}}`
    BlockEnd { keyword: String },
}

/// Block keywords understood by the interpreter
pub(crate) const BLOCK_KEYWORDS: &[&str] = &["each", "section"];

/// One `{{...}}` tag with its position in the scanned text
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Tag {
    pub kind: TagKind,
    /// Byte offset of the opening `{{`
    pub start: usize,
    /// Byte length including both brace pairs
    pub length: usize,
    /// Backslashes immediately before `{{`; an odd count escapes the tag
    pub backslash_count: usize,
    /// Line on which the tag closes
    pub line: usize,
}

impl Tag {
    pub fn is_escaped(&self) -> bool {
        self.backslash_count % 2 == 1
    }

    /// Byte offset just past the closing `}}`
    pub fn end(&self) -> usize {
        self.start + self.length
    }
}

/// Scanner state
///
/// ```text
/// Text ──{──> OpenBrace ──{──> InTag ──}──> CloseBrace ──}──> [emit Tag] → Text
///  │             │               │              │
///  └─────────────┴── otherwise ──┴──────────────┴── fall back one state
/// ```
///
/// An opening `{{` with no closing `}}` produces no tag; the interpreter
/// reports it when it finds the dangling braces in trailing text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum ScanState {
    Text {
        backslashes: usize,
    },
    OpenBrace {
        at: usize,
        backslashes: usize,
    },
    InTag {
        start: usize,
        content_start: usize,
        backslashes: usize,
    },
    CloseBrace {
        start: usize,
        content_start: usize,
        content_end: usize,
        backslashes: usize,
    },
}

/// Iterator over the tags of a body
pub(crate) struct TagStream<'a> {
    bytes: &'a [u8],
    pos: usize,
    state: ScanState,
    line: usize,
}

impl<'a> TagStream<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
            state: ScanState::Text { backslashes: 0 },
            line: 1,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    fn classify(content: &str) -> TagKind {
        let trimmed = content.trim();

        if let Some(rest) = trimmed.strip_prefix('/') {
            return TagKind::BlockEnd {
                keyword: rest.trim().to_string(),
            };
        }

        for keyword in BLOCK_KEYWORDS {
            if let Some(args) = trimmed
                .strip_prefix(keyword)
                .and_then(|rest| rest.strip_prefix(char::is_whitespace))
            {
                return TagKind::BlockStart {
                    keyword: keyword.to_string(),
                    args: args.trim().to_string(),
                };
            }
        }

        TagKind::Expression {
            source: trimmed.to_string(),
        }
    }

    /// Feed one byte to the state machine.
    ///
    /// Returns the finished tag, if any, and whether the byte was consumed.
    /// An unconsumed byte is fed again in the fallback state, so each byte
    /// is visited at most twice.
    fn step(&mut self, byte: u8) -> (Option<Tag>, bool) {
        match self.state {
            ScanState::Text { backslashes } => {
                self.state = match byte {
                    b'\\' => ScanState::Text {
                        backslashes: backslashes + 1,
                    },
                    b'{' => ScanState::OpenBrace {
                        at: self.pos,
                        backslashes,
                    },
                    _ => {
                        if byte == b'\n' {
                            self.line += 1;
                        }
                        ScanState::Text { backslashes: 0 }
                    }
                };
                (None, true)
            }
            ScanState::OpenBrace { at, backslashes } => {
                if byte == b'{' {
                    self.state = ScanState::InTag {
                        start: at,
                        content_start: self.pos + 1,
                        backslashes,
                    };
                    (None, true)
                } else {
                    self.state = ScanState::Text { backslashes: 0 };
                    (None, false)
                }
            }
            ScanState::InTag {
                start,
                content_start,
                backslashes,
            } => {
                if byte == b'}' {
                    self.state = ScanState::CloseBrace {
                        start,
                        content_start,
                        content_end: self.pos,
                        backslashes,
                    };
                } else if byte == b'\n' {
                    self.line += 1;
                }
                (None, true)
            }
            ScanState::CloseBrace {
                start,
                content_start,
                content_end,
                backslashes,
            } => {
                if byte == b'}' {
                    let content =
                        std::str::from_utf8(&self.bytes[content_start..content_end]).unwrap_or("");
                    let tag = Tag {
                        kind: Self::classify(content),
                        start,
                        length: self.pos + 1 - start,
                        backslash_count: backslashes,
                        line: self.line,
                    };
                    self.state = ScanState::Text { backslashes: 0 };
                    (Some(tag), true)
                } else {
                    self.state = ScanState::InTag {
                        start,
                        content_start,
                        backslashes,
                    };
                    (None, false)
                }
            }
        }
    }
}

impl Iterator for TagStream<'_> {
    type Item = Tag;

    fn next(&mut self) -> Option<Tag> {
        while self.pos < self.bytes.len() {
            let byte = self.bytes[self.pos];
            #[cfg(test)]
            step_counter::inc();

            let (tag, consumed) = self.step(byte);
            if consumed {
                self.pos += 1;
            }
            if tag.is_some() {
                return tag;
            }
        }
        None
    }
}
