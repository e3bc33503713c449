use std::collections::{BTreeMap, VecDeque};

use crate::character::{self, CharType};
use crate::common;
use crate::errors::Result;
use crate::lexeme::{Candidate, Lexeme, LexemeType};
use crate::reader::CharRead;

/// Region of the buffer resolved by the arbitrator.
#[derive(Debug, Default)]
pub(crate) struct ResolvedRegion {
    pub begin: usize,
    pub end: usize,
    /// Non-overlapping lexemes covering the region, sorted.
    pub primary: Vec<Candidate>,
    /// Remaining candidates kept for fine-grained output, sorted.
    pub alternatives: Vec<Candidate>,
}

/// Sliding buffer, cursor, candidates, and output queue of one segmenter.
///
/// Positions handled here are relative to the buffer; `buff_offset` maps them back
/// to the stream.
pub(crate) struct AnalyzeContext {
    buf: Vec<char>,
    types: Vec<CharType>,
    critical: usize,

    // Number of characters in `buf` that hold data.
    available: usize,
    cursor: usize,
    // Stream position of `buf[0]`.
    buff_offset: usize,
    // Characters finalized in the last cycle, shifted out at the next refill.
    consumed: usize,
    // Where the current cycle ends if it is cut before the cursor reaches the edge.
    cycle_end: Option<usize>,
    // Position right after the last cursor at which no recognizer was locked.
    last_clean_cut: usize,
    // The source reported the end of data.
    eof: bool,

    locks: u8,
    candidates: Vec<Candidate>,
    last_numeral_end: Option<usize>,
    regions: BTreeMap<usize, ResolvedRegion>,
    results: VecDeque<Lexeme>,
}

impl AnalyzeContext {
    pub fn new(capacity: usize) -> Self {
        debug_assert!(capacity >= 2);
        Self {
            buf: vec!['\0'; capacity],
            types: vec![CharType::default(); capacity],
            critical: common::exhaust_critical(capacity),
            available: 0,
            cursor: 0,
            buff_offset: 0,
            consumed: 0,
            cycle_end: None,
            last_clean_cut: 0,
            eof: false,
            locks: 0,
            candidates: vec![],
            last_numeral_end: None,
            regions: BTreeMap::new(),
            results: VecDeque::new(),
        }
    }

    /// Shifts the unconsumed tail to the front and reads until the buffer is full or
    /// the source is drained.
    ///
    /// Returns the number of characters now waiting in the buffer; `0` means the
    /// stream is exhausted.
    pub fn fill_buffer<R>(&mut self, rdr: &mut R) -> Result<usize>
    where
        R: CharRead,
    {
        if self.consumed != 0 {
            self.buf.copy_within(self.consumed..self.available, 0);
            self.available -= self.consumed;
            self.consumed = 0;
        }
        self.read_to_capacity(rdr)
    }

    fn read_to_capacity<R>(&mut self, rdr: &mut R) -> Result<usize>
    where
        R: CharRead,
    {
        while self.available < self.buf.len() && !self.eof {
            let num_read = rdr.read_chars(&mut self.buf[self.available..])?;
            if num_read == 0 {
                self.eof = true;
            } else {
                self.available += num_read;
            }
        }
        Ok(self.available)
    }

    /// Checks if the cursor stands at the buffer edge with more data to come while
    /// every earlier position was locked.
    #[inline(always)]
    pub fn is_edge_locked(&self) -> bool {
        !self.eof && self.cursor + 1 == self.available && self.last_clean_cut == 0
    }

    /// Doubles the buffer in the middle of a cycle and reads into the new room.
    ///
    /// Positions already scanned stay where they are, so the recognizers keep their
    /// in-progress matches.
    pub fn grow_buffer<R>(&mut self, rdr: &mut R) -> Result<usize>
    where
        R: CharRead,
    {
        let capacity = self.buf.len() * 2;
        tracing::debug!(capacity, cursor = self.cursor, "growing buffer over a locked span");
        self.buf.resize(capacity, '\0');
        self.types.resize(capacity, CharType::default());
        self.critical = common::exhaust_critical(capacity);
        self.read_to_capacity(rdr)
    }

    pub fn init_cursor(&mut self) {
        self.cursor = 0;
        self.cycle_end = None;
        self.last_clean_cut = 0;
        self.last_numeral_end = None;
        self.regularize_current();
    }

    /// Advances the cursor, returning `false` at the last available character.
    pub fn move_cursor(&mut self) -> bool {
        if self.cursor + 1 < self.available {
            self.cursor += 1;
            self.regularize_current();
            true
        } else {
            false
        }
    }

    #[inline(always)]
    fn regularize_current(&mut self) {
        let c = character::regularize(self.buf[self.cursor]);
        self.buf[self.cursor] = c;
        self.types[self.cursor] = character::char_type(c);
    }

    /// Decides whether the cycle ends at the current cursor to refill the buffer.
    ///
    /// While no recognizer is locked, the cycle ends once the cursor enters the
    /// lookahead margin. A recognizer still locked at the buffer edge makes the cycle
    /// fall back to the last unlocked position; the candidates after it are dropped and
    /// recognized again from the refilled buffer. Without such a position, the buffer
    /// is grown before the edge is reached (see [`Self::is_edge_locked`]).
    pub fn need_refill_buffer(&mut self) -> bool {
        if self.eof {
            return false;
        }
        let next = self.cursor + 1;
        if self.is_buffer_locked() {
            if next == self.available && self.last_clean_cut != 0 {
                self.cut_back(self.last_clean_cut);
                return true;
            }
            return false;
        }
        self.last_clean_cut = next;
        if next < self.available && next + self.critical > self.available {
            self.cycle_end = Some(next);
            return true;
        }
        false
    }

    fn cut_back(&mut self, cut: usize) {
        tracing::trace!(cut, cursor = self.cursor, "cutting cycle back");
        self.candidates.retain(|c| c.begin < cut);
        debug_assert!(self.candidates.iter().all(|c| c.end() <= cut));
        self.cycle_end = Some(cut);
    }

    /// Checks if recognizers must flush their in-progress matches at this cursor,
    /// which holds at the last character when no more data follows.
    #[inline(always)]
    pub fn is_buffer_consumed(&self) -> bool {
        self.cursor + 1 == self.available && self.eof
    }

    #[inline(always)]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[inline(always)]
    pub fn current_char(&self) -> char {
        self.buf[self.cursor]
    }

    #[inline(always)]
    pub fn current_char_type(&self) -> CharType {
        self.types[self.cursor]
    }

    #[inline(always)]
    pub fn lock_buffer(&mut self, id: u8) {
        self.locks |= id;
    }

    #[inline(always)]
    pub fn unlock_buffer(&mut self, id: u8) {
        self.locks &= !id;
    }

    #[inline(always)]
    pub fn is_buffer_locked(&self) -> bool {
        self.locks != 0
    }

    /// Adds a candidate. A candidate with the same span as an existing one is ignored.
    pub fn add_candidate(&mut self, cand: Candidate) {
        debug_assert!(cand.len != 0 && cand.end() <= self.cursor + 1);
        if let Err(i) = self
            .candidates
            .binary_search_by(|probe| probe.cmp_position(&cand))
        {
            self.candidates.insert(i, cand);
        }
        if matches!(cand.lex_type, LexemeType::CNum | LexemeType::Arabic) {
            let end = cand.end();
            self.last_numeral_end = Some(self.last_numeral_end.map_or(end, |e| e.max(end)));
        }
    }

    /// Checks if a numeral candidate ends right before the cursor.
    #[inline(always)]
    pub fn is_numeral_adjacent(&self) -> bool {
        self.last_numeral_end == Some(self.cursor)
    }

    /// Moves out the sorted candidates of the current cycle.
    pub fn take_candidates(&mut self) -> Vec<Candidate> {
        std::mem::take(&mut self.candidates)
    }

    pub fn add_resolved_region(&mut self, region: ResolvedRegion) {
        self.regions.insert(region.begin, region);
    }

    /// Moves the resolved regions of the processed part of the buffer to the output
    /// queue, filling every character not covered by a primary lexeme with a
    /// single-character lexeme.
    pub fn output_to_result(&mut self) {
        let end = self.cycle_end.take().unwrap_or(self.cursor + 1);
        let mut index = 0;
        while index < end {
            if let Some(region) = self.regions.remove(&index) {
                let mut merged: Vec<_> = region
                    .primary
                    .into_iter()
                    .map(|c| (c, false))
                    .chain(region.alternatives.into_iter().map(|c| (c, true)))
                    .collect();
                merged.sort_by(|(a, _), (b, _)| a.cmp_position(b));

                let mut covered = index;
                for (cand, alternative) in merged {
                    if covered < cand.begin {
                        self.output_single_chars(covered, cand.begin);
                        covered = cand.begin;
                    }
                    if !alternative {
                        covered = covered.max(cand.end());
                    }
                    self.push_result(cand, alternative);
                }
                self.output_single_chars(covered, region.end);
                index = region.end.max(index + 1);
            } else {
                self.output_single_chars(index, index + 1);
                index += 1;
            }
        }
        debug_assert!(self.regions.is_empty());
        self.regions.clear();
        self.consumed = end;
    }

    fn output_single_chars(&mut self, begin: usize, end: usize) {
        for i in begin..end {
            let lex_type = match self.types[i] {
                CharType::Chinese => LexemeType::CnChar,
                CharType::OtherCjk => LexemeType::OtherCjk,
                CharType::Arabic => LexemeType::Arabic,
                CharType::English => LexemeType::English,
                CharType::Useless => LexemeType::Unknown,
            };
            self.push_result(Candidate::new(i, 1, lex_type), false);
        }
    }

    fn push_result(&mut self, cand: Candidate, alternative: bool) {
        let text = self.buf[cand.begin..cand.end()].iter().collect();
        self.results.push_back(Lexeme::new(
            self.buff_offset + cand.begin,
            cand.len,
            cand.lex_type,
            text,
            alternative,
        ));
    }

    /// Records the characters consumed by the finished cycle.
    pub fn mark_buffer_offset(&mut self) {
        tracing::trace!(
            offset = self.buff_offset,
            consumed = self.consumed,
            available = self.available,
            queued = self.results.len(),
            "finished cycle"
        );
        self.buff_offset += self.consumed;
    }

    #[inline(always)]
    pub fn next_lexeme(&mut self) -> Option<Lexeme> {
        self.results.pop_front()
    }

    /// Gives mutable access to the output queue of the finished cycle.
    #[inline(always)]
    pub fn results_mut(&mut self) -> &mut VecDeque<Lexeme> {
        &mut self.results
    }

    pub fn reset(&mut self) {
        self.available = 0;
        self.cursor = 0;
        self.buff_offset = 0;
        self.consumed = 0;
        self.cycle_end = None;
        self.last_clean_cut = 0;
        self.eof = false;
        self.locks = 0;
        self.candidates.clear();
        self.last_numeral_end = None;
        self.regions.clear();
        self.results.clear();
    }
}
