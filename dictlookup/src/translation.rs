//! 候補のストリーム
//!
//! 変換結果の候補は [`Translation`] から一つずつ引き出されます。
//! セグメントが所有する出力済み候補のリストは、すべての呼び出しに可変参照で渡されます。

use std::collections::VecDeque;

use crate::candidate::{Candidate, CandidateList};

/// 候補を先頭から順に引き出すストリーム
pub trait Translation {
    /// 先頭の候補を参照します。候補が尽きていれば `None` を返します。
    fn peek(&mut self, candidates: &mut CandidateList) -> Option<&Candidate>;

    /// 先頭の候補を取り出します。
    fn pop(&mut self, candidates: &mut CandidateList) -> Option<Candidate>;

    /// 先頭の候補を捨てます。捨てる候補があった場合は `true` を返します。
    fn advance(&mut self, candidates: &mut CandidateList) -> bool {
        self.pop(candidates).is_some()
    }

    /// 候補が尽きたかどうかを返します。
    fn exhausted(&mut self, candidates: &mut CandidateList) -> bool {
        self.peek(candidates).is_none()
    }
}

/// 与えられた候補を順に返すストリーム
#[derive(Clone, Debug, Default)]
pub struct FifoTranslation {
    queue: VecDeque<Candidate>,
}

impl FifoTranslation {
    pub fn new() -> Self {
        Self::default()
    }

    /// 候補を末尾に追加します。
    pub fn push<C>(&mut self, candidate: C)
    where
        C: Into<Candidate>,
    {
        self.queue.push_back(candidate.into());
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl<C> FromIterator<C> for FifoTranslation
where
    C: Into<Candidate>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = C>,
    {
        Self {
            queue: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl Translation for FifoTranslation {
    fn peek(&mut self, _candidates: &mut CandidateList) -> Option<&Candidate> {
        self.queue.front()
    }

    fn pop(&mut self, _candidates: &mut CandidateList) -> Option<Candidate> {
        self.queue.pop_front()
    }
}

/// セグメントの候補メニュー
///
/// フィルター適用後のストリームから候補を引き出し、出力済み候補のリストに積みます。
pub struct Menu {
    translation: Box<dyn Translation>,
    candidates: CandidateList,
}

impl Menu {
    pub fn new(translation: Box<dyn Translation>) -> Self {
        Self {
            translation,
            candidates: CandidateList::new(),
        }
    }

    /// 出力済み候補が `count` 件になるまで候補を引き出し、出力済み候補の件数を返します。
    pub fn prepare(&mut self, count: usize) -> usize {
        while self.candidates.len() < count {
            let Some(candidate) = self.translation.pop(&mut self.candidates) else {
                break;
            };
            self.candidates.push(candidate);
        }
        self.candidates.len()
    }

    /// すべての候補を引き出します。
    pub fn prepare_all(&mut self) -> usize {
        self.prepare(usize::MAX)
    }

    /// ストリームの候補が尽きたかどうかを返します。
    pub fn exhausted(&mut self) -> bool {
        self.translation.exhausted(&mut self.candidates)
    }

    /// 出力済み候補を取得します。
    #[inline(always)]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> CandidateList {
        self.candidates
    }
}
