//! 参照辞書モジュール。
//!
//! フィルターは辞書エンジンを次の二つの操作を通してのみ利用します。
//!
//! - [`Dictionary::lookup_words`]: 表記をキーとして参照レコードの行を引く
//! - [`Dictionary::decode`]: ローマ字コードを音節の列に展開する
//!
//! 辞書は名前で [`DictionaryComponent`] から開かれ、同じ名前を使うフィルターの間で
//! 読み取り専用で共有されます。
//!
//! このクレートは参照実装として、TSV形式の参照表と音節表から構築する [`Lexicon`] と、
//! ディレクトリから名前で辞書を開く [`LexiconDirectory`] を提供します。
pub(crate) mod directory;
pub(crate) mod lexicon;

use std::rc::Rc;

use crate::candidate::Code;
use crate::errors::Result;

pub use crate::dictionary::directory::LexiconDirectory;
pub use crate::dictionary::lexicon::Lexicon;

/// 参照辞書
pub trait Dictionary {
    /// `key` に一致するエントリの参照レコードを辞書の返却順に列挙します。
    ///
    /// `predictive` が `true` の場合は `key` で始まるすべてのキーを対象にします。
    /// 一致するエントリがなければ空のイテレータを返します。
    fn lookup_words<'a>(
        &'a self,
        key: &str,
        predictive: bool,
    ) -> Box<dyn Iterator<Item = &'a str> + 'a>;

    /// ローマ字コードを音節の列に展開します。
    ///
    /// 音節表にないIDを含む場合は `None` を返します。
    fn decode(&self, code: &Code) -> Option<Vec<String>>;
}

/// 名前から辞書を開くコンポーネント
pub trait DictionaryComponent {
    /// `name` という名前の辞書を開きます。
    ///
    /// # エラー
    ///
    /// 辞書が存在しない、または読み込みに失敗した場合にエラーを返します。
    fn create(&self, name: &str) -> Result<Rc<dyn Dictionary>>;
}
