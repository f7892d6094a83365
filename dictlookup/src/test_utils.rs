//! テスト用ユーティリティ
//!
//! テストコードで使用する便利なマクロや辞書を提供します。

use std::cell::RefCell;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::candidate::Code;
use crate::dictionary::{Dictionary, DictionaryComponent, Lexicon};
use crate::errors::{LookupError, Result};

macro_rules! hashmap {
    ( $($k:expr => $v:expr,)* ) => {
        {
            #[allow(unused_mut)]
            let mut h = hashbrown::HashMap::new();
            $(
                h.insert($k, $v);
            )*
            h
        }
    };
    ( $($k:expr => $v:expr),* ) => {
        hashmap![$( $k => $v, )*]
    };
}

pub(crate) use hashmap;

/// テスト用の参照表
pub(crate) const LOOKUP_TSV: &str = include_str!("./tests/resources/jyut6ping3.lookup.tsv");

/// テスト用の音節表
pub(crate) const SYLLABARY_TXT: &str = include_str!("./tests/resources/jyut6ping3.syllabary.txt");

pub(crate) fn test_lexicon() -> Lexicon {
    Lexicon::from_readers(LOOKUP_TSV.as_bytes(), SYLLABARY_TXT.as_bytes()).unwrap()
}

/// 表記ごとの問い合わせ回数を数える辞書
pub(crate) struct CountingDictionary {
    inner: Lexicon,
    queries: RefCell<HashMap<String, usize>>,
}

impl CountingDictionary {
    pub(crate) fn new(inner: Lexicon) -> Self {
        Self {
            inner,
            queries: RefCell::new(HashMap::new()),
        }
    }

    pub(crate) fn queries(&self, key: &str) -> usize {
        self.queries.borrow().get(key).copied().unwrap_or(0)
    }

    pub(crate) fn total_queries(&self) -> usize {
        self.queries.borrow().values().sum()
    }
}

impl Dictionary for CountingDictionary {
    fn lookup_words<'a>(
        &'a self,
        key: &str,
        predictive: bool,
    ) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        *self
            .queries
            .borrow_mut()
            .entry(key.to_string())
            .or_insert(0) += 1;
        self.inner.lookup_words(key, predictive)
    }

    fn decode(&self, code: &Code) -> Option<Vec<String>> {
        self.inner.decode(code)
    }
}

/// 登録済みの辞書を名前で返すコンポーネント
pub(crate) struct StaticComponent {
    dicts: HashMap<String, Rc<dyn Dictionary>>,
}

impl StaticComponent {
    pub(crate) fn new(dicts: HashMap<String, Rc<dyn Dictionary>>) -> Rc<dyn DictionaryComponent> {
        Rc::new(Self { dicts })
    }

    pub(crate) fn with_lexicon(name: &str, lexicon: Lexicon) -> Rc<dyn DictionaryComponent> {
        let dict: Rc<dyn Dictionary> = Rc::new(lexicon);
        Self::new(hashmap![name.to_string() => dict])
    }
}

impl DictionaryComponent for StaticComponent {
    fn create(&self, name: &str) -> Result<Rc<dyn Dictionary>> {
        self.dicts
            .get(name)
            .cloned()
            .ok_or_else(|| LookupError::DictionaryNotFound(name.to_string()))
    }
}
