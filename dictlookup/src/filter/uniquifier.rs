//! 表記と注釈が同一の候補をまとめるフィルター

use crate::candidate::{Candidate, CandidateList};
use crate::filter::{Filter, Ticket};
use crate::translation::Translation;

/// 登録名
pub const REGISTERED_NAME: &str = "phonology_uniquifier";

/// 表記と注釈が同一の候補をまとめるフィルター
///
/// 出力済みの候補と表記およびコメントが一致する候補は、出力済みの候補をまとめ候補に
/// 置き換えてその構成候補に加え、直接は出力しません。
#[derive(Clone, Debug, Default)]
pub struct PhonologyUniquifier {
    name_space: String,
}

impl PhonologyUniquifier {
    pub fn new(ticket: &Ticket) -> Self {
        Self {
            name_space: ticket.name_space.to_string(),
        }
    }

    #[inline(always)]
    pub fn name_space(&self) -> &str {
        &self.name_space
    }
}

impl Filter for PhonologyUniquifier {
    fn apply(&mut self, translation: Box<dyn Translation>) -> Box<dyn Translation> {
        Box::new(UniquifiedTranslation::new(translation))
    }
}

/// 重複する候補を出力済みの候補に取り込むストリーム
pub struct UniquifiedTranslation {
    upstream: Box<dyn Translation>,
    ready: bool,
}

impl UniquifiedTranslation {
    pub fn new(upstream: Box<dyn Translation>) -> Self {
        Self {
            upstream,
            ready: false,
        }
    }

    /// 上流の先頭が出力済みの候補と重複しなくなるまで重複を取り込みます。
    fn uniquify(&mut self, candidates: &mut CandidateList) {
        if self.ready {
            return;
        }
        while let Some(next) = self.upstream.peek(candidates) {
            let Some(i) = find_text_match(next, candidates) else {
                break;
            };
            let Some(duplicate) = self.upstream.pop(candidates) else {
                break;
            };
            log::debug!("Merged a duplicate of {:?}", duplicate.text());
            candidates[i].absorb(duplicate);
        }
        self.ready = true;
    }
}

fn find_text_match(target: &Candidate, candidates: &[Candidate]) -> Option<usize> {
    candidates
        .iter()
        .position(|c| c.text() == target.text() && c.comment() == target.comment())
}

impl Translation for UniquifiedTranslation {
    fn peek(&mut self, candidates: &mut CandidateList) -> Option<&Candidate> {
        self.uniquify(candidates);
        self.upstream.peek(candidates)
    }

    fn pop(&mut self, candidates: &mut CandidateList) -> Option<Candidate> {
        self.uniquify(candidates);
        self.ready = false;
        self.upstream.pop(candidates)
    }

    fn advance(&mut self, candidates: &mut CandidateList) -> bool {
        self.uniquify(candidates);
        self.ready = false;
        self.upstream.advance(candidates)
    }
}
