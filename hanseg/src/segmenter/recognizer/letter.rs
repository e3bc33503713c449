use crate::character::{self, CharType};
use crate::dictionary::Dictionary;
use crate::lexeme::{Candidate, LexemeType};
use crate::segmenter::context::AnalyzeContext;
use crate::segmenter::recognizer::{Recognizer, LETTER_LOCK};

#[derive(Clone, Copy, Debug)]
struct Run {
    begin: usize,
    // Position next to the last body character; connectors never extend it.
    end: usize,
}

/// Rule of one scan: which character classes form the body of a run and which
/// characters may join two body characters.
struct ScanRule {
    lex_type: LexemeType,
    is_body: fn(CharType) -> bool,
    is_connector: fn(char) -> bool,
}

const ENGLISH_RULE: ScanRule = ScanRule {
    lex_type: LexemeType::English,
    is_body: |t| t == CharType::English,
    is_connector: |_| false,
};

const ARABIC_RULE: ScanRule = ScanRule {
    lex_type: LexemeType::Arabic,
    is_body: |t| t == CharType::Arabic,
    is_connector: character::is_num_connector,
};

const MIXED_RULE: ScanRule = ScanRule {
    lex_type: LexemeType::Letter,
    is_body: |t| matches!(t, CharType::English | CharType::Arabic),
    is_connector: character::is_letter_connector,
};

impl ScanRule {
    fn scan(&self, run: &mut Option<Run>, ctx: &mut AnalyzeContext) {
        let cursor = ctx.cursor();
        let body = (self.is_body)(ctx.current_char_type());

        match run {
            Some(r) if body => r.end = cursor + 1,
            // A single connector directly after a body character.
            Some(r) if r.end == cursor && (self.is_connector)(ctx.current_char()) => {}
            Some(_) => self.output(run, ctx),
            None if body => {
                *run = Some(Run {
                    begin: cursor,
                    end: cursor + 1,
                })
            }
            None => {}
        }

        if ctx.is_buffer_consumed() {
            self.output(run, ctx);
        }
    }

    fn output(&self, run: &mut Option<Run>, ctx: &mut AnalyzeContext) {
        if let Some(r) = run.take() {
            ctx.add_candidate(Candidate::new(r.begin, r.end - r.begin, self.lex_type));
        }
    }
}

/// Recognizer of Latin words, arabic numbers and mixed alphanumeric tokens.
///
/// The three scans run independently; a mixed run therefore yields both the mixed
/// candidate and its pure parts.
#[derive(Default)]
pub(crate) struct LetterRecognizer {
    english: Option<Run>,
    arabic: Option<Run>,
    mixed: Option<Run>,
}

impl Recognizer for LetterRecognizer {
    fn analyze(&mut self, ctx: &mut AnalyzeContext, _dict: &Dictionary) {
        ENGLISH_RULE.scan(&mut self.english, ctx);
        ARABIC_RULE.scan(&mut self.arabic, ctx);
        MIXED_RULE.scan(&mut self.mixed, ctx);

        if self.english.is_none() && self.arabic.is_none() && self.mixed.is_none() {
            ctx.unlock_buffer(LETTER_LOCK);
        } else {
            ctx.lock_buffer(LETTER_LOCK);
        }
    }

    fn reset(&mut self) {
        self.english = None;
        self.arabic = None;
        self.mixed = None;
    }
}
