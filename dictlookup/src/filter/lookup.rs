//! 候補に読みの注釈を付与するフィルター

use std::rc::Rc;

use crate::candidate::{Candidate, CandidateList};
use crate::composition::CompositionResolver;
use crate::dictionary::{Dictionary, DictionaryComponent};
use crate::errors::{LookupError, Result};
use crate::filter::{Filter, Segment, TagMatching, Ticket};
use crate::translation::Translation;

/// 登録名
pub const REGISTERED_NAME: &str = "dictionary_lookup_filter";

/// 汎用の名前空間
const GENERIC_NAME_SPACE: &str = "filter";

/// 候補に読みの注釈を付与するフィルター
///
/// 設定 `<name_space>/dictionary` で指定された辞書を最初の適用時に開きます。
/// 辞書を開けなかった場合、以後は上流のストリームをそのまま返します。
pub struct DictionaryLookupFilter {
    name_space: String,
    dictname: String,
    tags: TagMatching,
    component: Rc<dyn DictionaryComponent>,
    initialized: bool,
    dict: Option<Rc<dyn Dictionary>>,
}

impl DictionaryLookupFilter {
    /// 新しいフィルターを作成します。
    ///
    /// チケットの名前空間が `filter` の場合は `dictionary_lookup_filter` を名前空間として使います。
    pub fn new(ticket: &Ticket, component: Rc<dyn DictionaryComponent>) -> Self {
        let name_space = Self::resolve_name_space(ticket.name_space);
        let ticket = Ticket::new(name_space, ticket.config);
        let dictname = ticket.get_string("dictionary").unwrap_or_default();
        Self {
            name_space: name_space.to_string(),
            dictname: dictname.to_string(),
            tags: TagMatching::new(&ticket),
            component,
            initialized: false,
            dict: None,
        }
    }

    /// チケットの名前空間から設定の名前空間を求めます。
    pub fn resolve_name_space(name_space: &str) -> &str {
        if name_space == GENERIC_NAME_SPACE {
            REGISTERED_NAME
        } else {
            name_space
        }
    }

    /// 設定の名前空間を取得します。
    #[inline(always)]
    pub fn name_space(&self) -> &str {
        &self.name_space
    }

    /// 開く辞書の名前を取得します。
    #[inline(always)]
    pub fn dictname(&self) -> &str {
        &self.dictname
    }

    /// 辞書を開けているかどうかを返します。
    #[inline(always)]
    pub fn is_available(&self) -> bool {
        self.dict.is_some()
    }

    fn initialize(&mut self) {
        self.initialized = true;
        match self.open() {
            Ok(dict) => self.dict = Some(dict),
            Err(e) => log::warn!(
                "{}: the lookup dictionary is unavailable, candidates pass through: {e}",
                self.name_space,
            ),
        }
    }

    fn open(&self) -> Result<Rc<dyn Dictionary>> {
        if self.dictname.is_empty() {
            return Err(LookupError::invalid_state(
                "Failed to open the lookup dictionary",
                format!("{}/dictionary is not set", self.name_space),
            ));
        }
        self.component.create(&self.dictname)
    }
}

impl Filter for DictionaryLookupFilter {
    fn apply(&mut self, translation: Box<dyn Translation>) -> Box<dyn Translation> {
        if !self.initialized {
            self.initialize();
        }
        match &self.dict {
            Some(dict) => Box::new(LookupTranslation::new(translation, Rc::clone(dict))),
            None => translation,
        }
    }

    fn applies_to_segment(&self, segment: &Segment) -> bool {
        self.tags.matches(segment)
    }
}

/// 候補を引き出すときに注釈を付与するストリーム
///
/// 先頭の候補はキャッシュされ、注釈は一度だけ付与されます。
pub struct LookupTranslation {
    upstream: Box<dyn Translation>,
    dict: Rc<dyn Dictionary>,
    cache: Option<Candidate>,
}

impl LookupTranslation {
    pub fn new(upstream: Box<dyn Translation>, dict: Rc<dyn Dictionary>) -> Self {
        Self {
            upstream,
            dict,
            cache: None,
        }
    }

    fn fill(&mut self, candidates: &mut CandidateList) {
        if self.cache.is_some() {
            return;
        }
        if let Some(mut candidate) = self.upstream.pop(candidates) {
            CompositionResolver::new(self.dict.as_ref()).annotate(&mut candidate);
            self.cache = Some(candidate);
        }
    }
}

impl Translation for LookupTranslation {
    fn peek(&mut self, candidates: &mut CandidateList) -> Option<&Candidate> {
        self.fill(candidates);
        self.cache.as_ref()
    }

    fn pop(&mut self, candidates: &mut CandidateList) -> Option<Candidate> {
        self.fill(candidates);
        self.cache.take()
    }

    fn advance(&mut self, candidates: &mut CandidateList) -> bool {
        if self.cache.take().is_some() {
            return true;
        }
        self.upstream.advance(candidates)
    }
}
