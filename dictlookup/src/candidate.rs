//! 変換候補の表現
//!
//! このモジュールは、変換パイプラインを流れる候補と、候補が参照する辞書エントリを定義します。
//! 候補の形は [`Candidate`] の列挙子で区別します。
//!
//! - [`Phrase`]: 単一の辞書エントリに由来する単語候補
//! - [`Sentence`]: 複数の辞書エントリを連結した文候補
//! - [`SimpleCandidate`]: 辞書エントリを持たない候補（記号など）
//! - [`UniquifiedCandidate`]: 同一のテキストと注釈を持つ候補をまとめた候補

use crate::utils::FromU32;

/// 音節ID
pub type SyllableId = u32;

/// ローマ字コード
///
/// 辞書の音節表に対する音節IDの列です。内容の解釈は辞書の [`decode`] に委ねられます。
///
/// [`decode`]: crate::dictionary::Dictionary::decode
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Code(Vec<SyllableId>);

impl Code {
    /// 音節IDの列から新しいコードを作成します。
    pub fn new<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = SyllableId>,
    {
        Self(ids.into_iter().collect())
    }

    /// 音節IDのスライスを取得します。
    #[inline(always)]
    pub fn ids(&self) -> &[SyllableId] {
        &self.0
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 音節表のインデックスのイテレータを取得します。
    pub(crate) fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().map(|&id| usize::from_u32(id))
    }
}

/// 辞書エントリ
///
/// 辞書エンジンが返すエントリです。一度返されたエントリは変更されません。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DictEntry {
    /// 表記
    pub text: String,

    /// ローマ字コード
    pub code: Code,

    /// 格納されたコメント。`\f` より前に読みのヒントを含むことがあります。
    pub comment: String,

    /// 事前に計算された分割結果。各要素は `text` を構成する単語です。
    pub elements: Vec<String>,
}

impl DictEntry {
    /// 表記とコードから新しいエントリを作成します。
    pub fn new<S>(text: S, code: Code) -> Self
    where
        S: Into<String>,
    {
        Self {
            text: text.into(),
            code,
            comment: String::new(),
            elements: vec![],
        }
    }

    /// コメントを設定したエントリを返します。
    pub fn with_comment<S>(mut self, comment: S) -> Self
    where
        S: Into<String>,
    {
        self.comment = comment.into();
        self
    }

    /// 分割結果を設定したエントリを返します。
    pub fn with_elements<I, S>(mut self, elements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.elements = elements.into_iter().map(Into::into).collect();
        self
    }
}

/// 単一の辞書エントリに由来する単語候補
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Phrase {
    kind: String,
    start: usize,
    end: usize,
    entry: DictEntry,
    comment: String,
}

impl Phrase {
    /// 新しい単語候補を作成します。コメントはエントリのコメントで初期化されます。
    pub fn new<S>(kind: S, start: usize, end: usize, entry: DictEntry) -> Self
    where
        S: Into<String>,
    {
        let comment = entry.comment.clone();
        Self {
            kind: kind.into(),
            start,
            end,
            entry,
            comment,
        }
    }

    /// 候補の元になった辞書エントリを取得します。
    #[inline(always)]
    pub fn entry(&self) -> &DictEntry {
        &self.entry
    }
}

/// 複数の辞書エントリを連結した文候補
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sentence {
    kind: String,
    start: usize,
    end: usize,
    text: String,
    comment: String,
    components: Vec<DictEntry>,
}

impl Sentence {
    /// 構成要素から新しい文候補を作成します。表記は構成要素の表記を連結したものです。
    pub fn new(start: usize, end: usize, components: Vec<DictEntry>) -> Self {
        let text = components.iter().map(|e| e.text.as_str()).collect();
        Self {
            kind: "sentence".to_string(),
            start,
            end,
            text,
            comment: String::new(),
            components,
        }
    }

    /// 構成要素を左から順に取得します。
    #[inline(always)]
    pub fn components(&self) -> &[DictEntry] {
        &self.components
    }
}

/// 辞書エントリを持たない候補
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleCandidate {
    kind: String,
    start: usize,
    end: usize,
    text: String,
    comment: String,
}

impl SimpleCandidate {
    pub fn new<K, T, C>(kind: K, start: usize, end: usize, text: T, comment: C) -> Self
    where
        K: Into<String>,
        T: Into<String>,
        C: Into<String>,
    {
        Self {
            kind: kind.into(),
            start,
            end,
            text: text.into(),
            comment: comment.into(),
        }
    }
}

/// 同一のテキストと注釈を持つ候補をまとめた候補
///
/// 最初の構成候補が主候補であり、表記とコメントは主候補のものを使います。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UniquifiedCandidate {
    kind: String,
    items: Vec<Candidate>,
}

impl UniquifiedCandidate {
    /// 主候補から新しいまとめ候補を作成します。
    pub fn new<S>(primary: Candidate, kind: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            kind: kind.into(),
            items: vec![primary],
        }
    }

    /// 同等の候補を末尾に追加します。
    pub fn append(&mut self, item: Candidate) {
        self.items.push(item);
    }

    /// 主候補を取得します。
    #[inline(always)]
    pub fn primary(&self) -> &Candidate {
        &self.items[0]
    }

    /// 主候補を含むすべての構成候補を追加順に取得します。
    #[inline(always)]
    pub fn items(&self) -> &[Candidate] {
        &self.items
    }
}

/// 変換候補
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Candidate {
    Phrase(Phrase),
    Sentence(Sentence),
    Simple(SimpleCandidate),
    Uniquified(UniquifiedCandidate),
}

impl Candidate {
    /// 候補の種類を取得します。
    pub fn kind(&self) -> &str {
        match self {
            Self::Phrase(p) => &p.kind,
            Self::Sentence(s) => &s.kind,
            Self::Simple(s) => &s.kind,
            Self::Uniquified(u) => &u.kind,
        }
    }

    /// 候補の表記を取得します。
    pub fn text(&self) -> &str {
        match self {
            Self::Phrase(p) => &p.entry.text,
            Self::Sentence(s) => &s.text,
            Self::Simple(s) => &s.text,
            Self::Uniquified(u) => u.primary().text(),
        }
    }

    /// 候補のコメント（注釈チャネル）を取得します。
    pub fn comment(&self) -> &str {
        match self {
            Self::Phrase(p) => &p.comment,
            Self::Sentence(s) => &s.comment,
            Self::Simple(s) => &s.comment,
            Self::Uniquified(u) => u.primary().comment(),
        }
    }

    /// 候補のコメントを書き換えます。まとめ候補では主候補のコメントを書き換えます。
    pub fn set_comment<S>(&mut self, comment: S)
    where
        S: Into<String>,
    {
        match self {
            Self::Phrase(p) => p.comment = comment.into(),
            Self::Sentence(s) => s.comment = comment.into(),
            Self::Simple(s) => s.comment = comment.into(),
            Self::Uniquified(u) => u.items[0].set_comment(comment),
        }
    }

    /// 候補が覆う入力の開始位置を取得します。
    pub fn start(&self) -> usize {
        match self {
            Self::Phrase(p) => p.start,
            Self::Sentence(s) => s.start,
            Self::Simple(s) => s.start,
            Self::Uniquified(u) => u.primary().start(),
        }
    }

    /// 候補が覆う入力の終了位置を取得します。
    pub fn end(&self) -> usize {
        match self {
            Self::Phrase(p) => p.end,
            Self::Sentence(s) => s.end,
            Self::Simple(s) => s.end,
            Self::Uniquified(u) => u.primary().end(),
        }
    }

    /// まとめ候補を剥がした元の候補を取得します。
    pub fn genuine(&self) -> &Self {
        match self {
            Self::Uniquified(u) => u.primary().genuine(),
            _ => self,
        }
    }

    /// 同等の候補を取り込みます。
    ///
    /// この候補がまだまとめ候補でなければ、自身を主候補とするまとめ候補に置き換えます。
    pub fn absorb(&mut self, duplicate: Self) {
        if let Self::Uniquified(u) = self {
            u.append(duplicate);
            return;
        }
        let primary = std::mem::replace(self, Self::Simple(SimpleCandidate::default()));
        let mut uniquified = UniquifiedCandidate::new(primary, "uniquified");
        uniquified.append(duplicate);
        *self = Self::Uniquified(uniquified);
    }
}

impl From<Phrase> for Candidate {
    fn from(phrase: Phrase) -> Self {
        Self::Phrase(phrase)
    }
}

impl From<Sentence> for Candidate {
    fn from(sentence: Sentence) -> Self {
        Self::Sentence(sentence)
    }
}

impl From<SimpleCandidate> for Candidate {
    fn from(simple: SimpleCandidate) -> Self {
        Self::Simple(simple)
    }
}

/// セグメントが所有する出力済み候補のリスト
pub type CandidateList = Vec<Candidate>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_text() {
        let sentence = Sentence::new(
            0,
            4,
            vec![
                DictEntry::new("我哋", Code::default()),
                DictEntry::new("好", Code::default()),
            ],
        );
        assert_eq!(sentence.text, "我哋好");
        assert_eq!(Candidate::from(sentence).kind(), "sentence");
    }

    #[test]
    fn test_phrase_comment_from_entry() {
        let entry = DictEntry::new("坐", Code::new([3])).with_comment("\u{c}zoe6");
        let mut cand = Candidate::from(Phrase::new("phrase", 0, 4, entry));
        assert_eq!(cand.comment(), "\u{c}zoe6");
        cand.set_comment("\u{c}\r1,坐,zoe6,0");
        assert_eq!(cand.comment(), "\u{c}\r1,坐,zoe6,0");
        let Candidate::Phrase(phrase) = &cand else {
            unreachable!()
        };
        assert_eq!(phrase.entry().comment, "\u{c}zoe6");
    }

    #[test]
    fn test_absorb() {
        let a = Candidate::from(SimpleCandidate::new("a", 0, 1, "x", "p"));
        let b = Candidate::from(SimpleCandidate::new("b", 0, 1, "x", "p"));
        let c = Candidate::from(SimpleCandidate::new("c", 0, 1, "x", "p"));

        let mut grouped = a.clone();
        grouped.absorb(b.clone());
        grouped.absorb(c.clone());

        assert_eq!(grouped.kind(), "uniquified");
        assert_eq!(grouped.text(), "x");
        assert_eq!(grouped.comment(), "p");
        assert_eq!(grouped.genuine(), &a);
        let Candidate::Uniquified(u) = &grouped else {
            unreachable!()
        };
        assert_eq!(u.items(), &[a, b, c]);
    }

    #[test]
    fn test_set_comment_uniquified() {
        let mut grouped = Candidate::from(SimpleCandidate::new("a", 0, 1, "x", "p"));
        grouped.absorb(Candidate::from(SimpleCandidate::new("b", 0, 1, "x", "p")));
        grouped.set_comment("q");
        assert_eq!(grouped.comment(), "q");
        assert_eq!(grouped.genuine().comment(), "q");
    }
}
