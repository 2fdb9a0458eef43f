//! Token cursor over a lossless token stream.
//!
//! The grammar looks only at significant tokens; trivia are tracked
//! separately so the parser can decide which node they land in. `pos`
//! indexes the significant tokens, `emitted` the full stream.

use jpsi_ir::{ElementType, Span};
use jpsi_lexer::Token;

pub(crate) struct Cursor<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    /// Indices into `tokens` of the non-trivia tokens.
    significant: Vec<u32>,
    pos: usize,
    emitted: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        let tokens = jpsi_lexer::tokenize(source);
        let significant = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.kind.is_trivia())
            .map(|(i, _)| u32::try_from(i).unwrap_or(u32::MAX))
            .collect();
        Cursor {
            source,
            tokens,
            significant,
            pos: 0,
            emitted: 0,
        }
    }

    #[inline]
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Index into the significant tokens of the current token.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.significant.len()
    }

    fn token_index(&self, sig: usize) -> Option<usize> {
        self.significant.get(sig).map(|&i| i as usize)
    }

    fn sig_token(&self, sig: usize) -> Option<&Token> {
        self.token_index(sig).map(|i| &self.tokens[i])
    }

    /// Kind of the `n`-th significant token ahead (0 is current).
    #[inline]
    pub fn nth(&self, n: usize) -> Option<ElementType> {
        self.sig_token(self.pos + n).map(|t| t.kind)
    }

    #[inline]
    pub fn current(&self) -> Option<ElementType> {
        self.nth(0)
    }

    /// Kind of the significant token just consumed.
    pub fn previous(&self) -> Option<ElementType> {
        self.pos.checked_sub(1).and_then(|p| self.sig_token(p)).map(|t| t.kind)
    }

    pub fn nth_text(&self, n: usize) -> &'src str {
        self.sig_token(self.pos + n)
            .map_or("", |t| &self.source[t.span.to_range()])
    }

    /// Whether significant tokens `n` and `n + 1` touch with nothing between.
    pub fn adjacent(&self, n: usize) -> bool {
        match (self.sig_token(self.pos + n), self.sig_token(self.pos + n + 1)) {
            (Some(a), Some(b)) => a.span.end == b.span.start,
            _ => false,
        }
    }

    /// Span of the current token, or an empty span at the end of input.
    pub fn current_span(&self) -> Span {
        match self.sig_token(self.pos) {
            Some(t) => t.span,
            None => {
                let end = u32::try_from(self.source.len()).unwrap_or(u32::MAX);
                Span::new(end, end)
            }
        }
    }

    /// Trivia tokens between the last emitted token and the current one.
    pub fn pending_trivia(&self) -> &[Token] {
        let until = self.token_index(self.pos).unwrap_or(self.tokens.len());
        &self.tokens[self.emitted.min(until)..until]
    }

    /// Take the next `count` pending trivia tokens for emission.
    pub fn take_trivia(&mut self, count: usize) -> Vec<(ElementType, &'src str)> {
        let until = self.token_index(self.pos).unwrap_or(self.tokens.len());
        let end = self.emitted.saturating_add(count).min(until);
        let taken = self.tokens[self.emitted..end]
            .iter()
            .map(|t| (t.kind, &self.source[t.span.to_range()]))
            .collect();
        self.emitted = end;
        taken
    }

    /// Consume the current token plus `extra` following ones and return the
    /// text they cover. Callers must have flushed pending trivia.
    pub fn take(&mut self, extra: usize) -> &'src str {
        let last = (self.pos + extra).min(self.significant.len().saturating_sub(1));
        let (Some(first_tok), Some(last_tok)) = (self.sig_token(self.pos), self.sig_token(last))
        else {
            return "";
        };
        let text = &self.source[first_tok.span.start as usize..last_tok.span.end as usize];
        self.emitted = self.token_index(last).map_or(self.tokens.len(), |i| i + 1);
        self.pos = last + 1;
        text
    }

    /// Significant-token offset (relative to current) of the token that
    /// closes the brace opened by the current `{`, if any.
    pub fn matching_brace(&self) -> Option<usize> {
        let mut depth = 0usize;
        for (offset, &i) in self.significant[self.pos..].iter().enumerate() {
            match self.tokens[i as usize].kind {
                ElementType::LBrace => depth += 1,
                ElementType::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(offset);
                    }
                }
                _ => {}
            }
        }
        None
    }

    /// Number of significant tokens from the current one to the end.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.significant.len().saturating_sub(self.pos)
    }
}
