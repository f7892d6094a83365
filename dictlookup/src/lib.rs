//! # dictlookup
//!
//! 入力メソッドの変換候補に、参照辞書から引いた読みの注釈を付与するフィルター群です。
//!
//! ## 概要
//!
//! 候補の表記をキーとして参照辞書を引き、返された参照レコードを候補の読みのヒントと照合して、
//! 構造化された注釈文字列を候補のコメントに書き込みます。複数の単語からなる候補は単語ごとに
//! 照合し、合成ヘッダーの後ろに各単語の注釈を並べます。
//!
//! ## 主な機能
//!
//! - **照合**: 読みのヒントに一致するレコードを優先順位順に並べる [`matcher::EntryMatcher`]
//! - **合成**: 文候補を単語に分解して注釈を合成する [`composition::CompositionResolver`]
//! - **注釈フィルター**: 候補を引き出すときに注釈を付与する [`DictionaryLookupFilter`]
//! - **重複の統合**: 表記と注釈が同一の候補をまとめる [`PhonologyUniquifier`]
//!
//! ## 使用例
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::rc::Rc;
//!
//! use dictlookup::candidate::{Code, DictEntry, Phrase};
//! use dictlookup::config::MapConfig;
//! use dictlookup::dictionary::{DictionaryComponent, LexiconDirectory};
//! use dictlookup::filter::{Filter, Ticket};
//! use dictlookup::translation::{FifoTranslation, Menu};
//! use dictlookup::DictionaryLookupFilter;
//!
//! let dir = tempfile::tempdir()?;
//! std::fs::write(dir.path().join("jyut6ping3.lookup.tsv"), "坐\tzoe6,0,sit\n坐\tco5,1,sit\n")?;
//!
//! let config = MapConfig::from_reader("dictionary_lookup_filter/dictionary: jyut6ping3".as_bytes())?;
//! let component: Rc<dyn DictionaryComponent> = Rc::new(LexiconDirectory::new(dir.path()));
//! let mut filter = DictionaryLookupFilter::new(&Ticket::new("filter", Some(&config)), component);
//!
//! let mut upstream = FifoTranslation::new();
//! let entry = DictEntry::new("坐", Code::default()).with_comment("\u{c}zoe6");
//! upstream.push(Phrase::new("phrase", 0, 4, entry));
//!
//! let mut menu = Menu::new(filter.apply(Box::new(upstream)));
//! menu.prepare(1);
//! assert_eq!(
//!     menu.candidates()[0].comment(),
//!     "\u{c}\r1,坐,zoe6,0,sit\r0,坐,co5,1,sit",
//! );
//! # Ok(())
//! # }
//! ```

/// 注釈レコードの書式
pub mod annotation;

/// 変換候補の表現
pub mod candidate;

/// 候補の注釈の解決
pub mod composition;

/// フィルターの設定
pub mod config;

/// 参照辞書
pub mod dictionary;

/// エラー型の定義
pub mod errors;

/// 候補ストリームのフィルター
pub mod filter;

/// 参照レコードの照合
pub mod matcher;

/// 候補のストリーム
pub mod translation;

/// 内部ユーティリティ関数
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-exports
pub use candidate::{Candidate, CandidateList, DictEntry};
pub use dictionary::{Dictionary, DictionaryComponent, Lexicon, LexiconDirectory};
pub use filter::{DictionaryLookupFilter, Filter, PhonologyUniquifier};
pub use translation::{Menu, Translation};

/// このライブラリのバージョン番号
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
