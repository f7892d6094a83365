//! 参照レコードの照合
//!
//! 表記をキーとして辞書を引き、返された参照レコードを読みのヒントと照合して
//! 注釈レコードの断片に直列化します。

use crate::annotation::{FIELD_SEPARATOR, PronunciationSet, push_record};
use crate::dictionary::Dictionary;
use crate::errors::{LookupError, Result};

/// 照合のモード
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// 単語候補を単独で照合するモード。
    ///
    /// ヒントに一致するレコードがない場合、一致しなかったレコードをフラグ `1` で出力します。
    Standalone,

    /// 複合語の単語を照合するモード。一致しなかったレコードは常にフラグ `0` で出力します。
    Composition,
}

/// 辞書が返す参照レコード一行
///
/// 先頭の二つのフィールド（読みと優先順位）以外は解釈しません。
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LookupRecord<'a> {
    /// 格納された読み
    pub pronunciation: &'a str,

    /// 優先順位。小さいほど優先されます。
    pub order: i8,

    /// 元の行
    pub line: &'a str,
}

impl<'a> LookupRecord<'a> {
    /// 参照レコードの行を解析します。
    ///
    /// # エラー
    ///
    /// 行が空の場合、優先順位のフィールドがない場合、または優先順位が `i8` の整数として
    /// 解釈できない場合に [`LookupError`] を返します。
    ///
    /// # 例
    ///
    /// ```
    /// # use dictlookup::matcher::LookupRecord;
    /// let record = LookupRecord::parse("zoe6,-3,sit").unwrap();
    /// assert_eq!(record.pronunciation, "zoe6");
    /// assert_eq!(record.order, -3);
    ///
    /// assert!(LookupRecord::parse("zoe6,200,sit").is_err());
    /// ```
    pub fn parse(line: &'a str) -> Result<Self> {
        if line.is_empty() {
            return Err(LookupError::invalid_format(
                "lookup record",
                "The record is empty.",
            ));
        }
        let mut fields = line.splitn(3, FIELD_SEPARATOR);
        let pronunciation = fields.next().unwrap_or_default();
        let Some(order) = fields.next() else {
            return Err(LookupError::invalid_format(
                "lookup record",
                format!("The record has no priority order, {line:?}"),
            ));
        };
        let order = order.trim().parse()?;
        Ok(Self {
            pronunciation,
            order,
            line,
        })
    }
}

/// 表記に対する参照レコードを照合するマッチャー
pub struct EntryMatcher<'d> {
    dict: &'d dyn Dictionary,
}

impl<'d> EntryMatcher<'d> {
    pub fn new(dict: &'d dyn Dictionary) -> Self {
        Self { dict }
    }

    /// `text` の参照レコードを `hints` と照合し、注釈レコードの断片を返します。
    ///
    /// 一致したレコードを先に、一致しなかったレコードを後に出力し、それぞれのグループ内では
    /// 優先順位の昇順に並べます。優先順位が等しいレコードは辞書の返却順を保ちます。
    /// 辞書にエントリがない場合は空文字列を返します。
    ///
    /// 解析できない行はログに記録して読み飛ばします。
    ///
    /// # 例
    ///
    /// ```
    /// # use dictlookup::annotation::PronunciationSet;
    /// # use dictlookup::dictionary::Lexicon;
    /// # use dictlookup::matcher::{EntryMatcher, MatchMode};
    /// let lexicon = Lexicon::from_records([("坐", "co5,1,sit"), ("坐", "zoe6,0,sit")], vec![])?;
    /// let matcher = EntryMatcher::new(&lexicon);
    /// let fragment = matcher.match_entries(
    ///     "坐",
    ///     &PronunciationSet::parse("zoe6"),
    ///     MatchMode::Standalone,
    /// );
    /// assert_eq!(fragment, "\r1,坐,zoe6,0,sit\r0,坐,co5,1,sit");
    /// # Ok::<(), dictlookup::errors::LookupError>(())
    /// ```
    pub fn match_entries(&self, text: &str, hints: &PronunciationSet, mode: MatchMode) -> String {
        let mut matched = vec![];
        let mut unmatched = vec![];

        for line in self.dict.lookup_words(text, false) {
            match LookupRecord::parse(line) {
                Ok(record) => {
                    if hints.contains(record.pronunciation) {
                        matched.push(record);
                    } else {
                        unmatched.push(record);
                    }
                }
                Err(e) => log::warn!("Skipped a lookup record of {text:?}: {e}"),
            }
        }

        // sort_by_key is stable.
        matched.sort_by_key(|r| r.order);
        unmatched.sort_by_key(|r| r.order);

        let fallback =
            mode == MatchMode::Standalone && matched.is_empty() && !hints.is_empty();

        let mut buf = String::new();
        for record in &matched {
            push_record(&mut buf, true, text, record.line);
        }
        for record in &unmatched {
            push_record(&mut buf, fallback, text, record.line);
        }
        buf
    }
}
