//! Recognizers proposing candidate lexemes at the cursor.
mod cjk;
mod letter;
mod quantifier;

use crate::dictionary::{Dictionary, NodeId, Trie};
use crate::lexeme::{Candidate, LexemeType};
use crate::segmenter::context::AnalyzeContext;

pub(crate) use cjk::CjkRecognizer;
pub(crate) use letter::LetterRecognizer;
pub(crate) use quantifier::QuantifierRecognizer;

// Buffer lock identities.
const LETTER_LOCK: u8 = 1 << 0;
const QUANTIFIER_LOCK: u8 = 1 << 1;
const CJK_LOCK: u8 = 1 << 2;

/// Capability shared by the recognizers.
pub(crate) trait Recognizer {
    /// Inspects the character at the cursor, adding candidates to the context and
    /// locking the buffer while a match is in progress.
    fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary);

    /// Drops every in-progress match.
    fn reset(&mut self);
}

/// Closed set of recognizers.
pub(crate) enum RecognizerWrapper {
    Letter(LetterRecognizer),
    Quantifier(QuantifierRecognizer),
    Cjk(CjkRecognizer),
}

impl RecognizerWrapper {
    /// Creates all recognizers in the order they run at each cursor position.
    ///
    /// The order matters because the first candidate proposed for a span wins.
    pub fn all() -> Vec<Self> {
        vec![
            Self::Letter(LetterRecognizer::default()),
            Self::Quantifier(QuantifierRecognizer::default()),
            Self::Cjk(CjkRecognizer::default()),
        ]
    }
}

impl Recognizer for RecognizerWrapper {
    #[inline(always)]
    fn analyze(&mut self, ctx: &mut AnalyzeContext, dict: &Dictionary) {
        match self {
            Self::Letter(r) => r.analyze(ctx, dict),
            Self::Quantifier(r) => r.analyze(ctx, dict),
            Self::Cjk(r) => r.analyze(ctx, dict),
        }
    }

    #[inline(always)]
    fn reset(&mut self) {
        match self {
            Self::Letter(r) => r.reset(),
            Self::Quantifier(r) => r.reset(),
            Self::Cjk(r) => r.reset(),
        }
    }
}

/// Partial dictionary match anchored at `begin`.
#[derive(Clone, Copy, Debug)]
struct Hit {
    begin: usize,
    node: NodeId,
}

/// Alive hits, advanced in place at every cursor step.
#[derive(Default)]
pub(crate) struct HitArena {
    hits: Vec<Hit>,
}

impl HitArena {
    /// Extends every alive hit by the character at the cursor and starts a new one at
    /// the cursor, adding a candidate of `lex_type` for each completed word.
    pub fn advance(&mut self, trie: &Trie, ctx: &mut AnalyzeContext, lex_type: LexemeType) {
        let c = ctx.current_char();
        let cursor = ctx.cursor();

        self.hits.retain_mut(|hit| match trie.step(hit.node, c) {
            Some(next) => {
                hit.node = next;
                let state = trie.state(next);
                if state.is_match() {
                    let len = cursor + 1 - hit.begin;
                    ctx.add_candidate(Candidate::new(hit.begin, len, lex_type));
                }
                state.is_prefix()
            }
            None => false,
        });

        if let Some(node) = trie.step(trie.root(), c) {
            let state = trie.state(node);
            if state.is_match() {
                ctx.add_candidate(Candidate::new(cursor, 1, lex_type));
            }
            if state.is_prefix() {
                self.hits.push(Hit {
                    begin: cursor,
                    node,
                });
            }
        }
    }

    #[inline(always)]
    pub fn clear(&mut self) {
        self.hits.clear();
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Runs a recognizer alone over a text held in one buffer.
#[cfg(test)]
pub(crate) fn run_alone<R>(recognizer: &mut R, dict: &Dictionary, text: &str) -> Vec<Candidate>
where
    R: Recognizer,
{
    use crate::reader::StrReader;

    let mut ctx = AnalyzeContext::new(text.chars().count() + 2);
    ctx.fill_buffer(&mut StrReader::new(text)).unwrap();
    ctx.init_cursor();
    loop {
        recognizer.analyze(&mut ctx, dict);
        if !ctx.move_cursor() {
            break;
        }
    }
    assert!(!ctx.is_buffer_locked());
    ctx.take_candidates()
}
