//! 注釈レコードの書式
//!
//! 候補のコメントに付与する注釈文字列の組み立てと解析を行います。
//! 下流のレンダラーがこの書式を解析するため、区切り文字とフィールドの順序は固定です。
//!
//! ```text
//! <prefix>\f\r<flag>,<text>,<line>\r<flag>,<text>,<line>...
//! ```
//!
//! - `\r` が各レコードの先頭を示し、レコード内のフィールドは `,` で区切られます。
//! - `flag` は読みがヒントに一致した場合に `1`、それ以外で `0` です。
//! - 複合語の注釈は合成ヘッダー
//!   `\r1,<fullText>,<pronunciation>,1,0,,,,composition,,,,,,,,,` で始まり、
//!   各単語のレコードが続きます。
//! - 元のコメントに読みのヒントがある場合、`\f` までを接頭辞として残します。

use std::fmt;

use hashbrown::HashSet;

use crate::utils::strip_whitespace;

/// レコードの開始を示す区切り文字
pub const RECORD_SEPARATOR: char = '\r';

/// 読みのヒントと注釈を隔てる区切り文字
pub const HINT_DELIMITER: char = '\u{c}';

/// フィールドの区切り文字
pub const FIELD_SEPARATOR: char = ',';

/// ヒント内で複数の読みを区切る文字
pub const PRONUNCIATION_SEPARATOR: char = ';';

/// 合成ヘッダーの読み以降のフィールド
const COMPOSITION_TAIL: &str = ",1,0,,,,composition,,,,,,,,,";

const COMPOSITION_MARKER: &str = "composition";

/// 読みのヒントの集合
///
/// 順序は意味を持たず、所属判定のみに使われます。
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PronunciationSet {
    items: HashSet<String>,
}

impl PronunciationSet {
    /// ヒント文字列を解析します。
    ///
    /// `;` または `\f` で分割してから各読みの空白を取り除き、空の読みは捨てます。
    /// `\f` も空白文字であるため、分割より先に空白を取り除いてはいけません。
    ///
    /// # 例
    ///
    /// ```
    /// # use dictlookup::annotation::PronunciationSet;
    /// let hints = PronunciationSet::parse(" zoe6; co5 ");
    /// assert!(hints.contains("zoe6"));
    /// assert!(hints.contains("co5"));
    /// assert_eq!(hints.len(), 2);
    /// ```
    pub fn parse(hint: &str) -> Self {
        let items = hint
            .split([PRONUNCIATION_SEPARATOR, HINT_DELIMITER])
            .map(strip_whitespace)
            .filter(|p| !p.is_empty())
            .collect();
        Self { items }
    }

    /// 一つの読みだけを含む集合を作成します。空の読みからは空の集合を作成します。
    pub fn single(pronunciation: &str) -> Self {
        let mut items = HashSet::new();
        if !pronunciation.is_empty() {
            items.insert(pronunciation.to_string());
        }
        Self { items }
    }

    #[inline(always)]
    pub fn contains(&self, pronunciation: &str) -> bool {
        self.items.contains(pronunciation)
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// 注釈レコードを一件追加します。
pub(crate) fn push_record(buf: &mut String, matched: bool, text: &str, line: &str) {
    buf.push(RECORD_SEPARATOR);
    buf.push_str(if matched { "1" } else { "0" });
    buf.push(FIELD_SEPARATOR);
    buf.push_str(text);
    buf.push(FIELD_SEPARATOR);
    buf.push_str(line);
}

/// 複合語の合成ヘッダーと各単語のレコードを連結します。
pub(crate) fn compose(text: &str, pronunciation: &str, entries: &str) -> String {
    let mut buf = String::with_capacity(
        text.len() + pronunciation.len() + COMPOSITION_TAIL.len() + entries.len() + 4,
    );
    buf.push(RECORD_SEPARATOR);
    buf.push('1');
    buf.push(FIELD_SEPARATOR);
    buf.push_str(text);
    buf.push(FIELD_SEPARATOR);
    buf.push_str(pronunciation);
    buf.push_str(COMPOSITION_TAIL);
    buf.push_str(entries);
    buf
}

/// 元のコメントに注釈を付与した新しいコメントを返します。
///
/// - コメントに `\f` があれば、最初の `\f` までを残して以降を注釈で置き換えます。
/// - コメントが空であれば注釈のみを返します。
/// - それ以外はコメントの後ろに `\f` を挟んで注釈を続けます。
pub fn attach(comment: &str, annotation: &str) -> String {
    if let Some(pos) = comment.find(HINT_DELIMITER) {
        let mut buf = String::with_capacity(pos + 1 + annotation.len());
        buf.push_str(&comment[..=pos]);
        buf.push_str(annotation);
        buf
    } else if comment.is_empty() {
        annotation.to_string()
    } else {
        format!("{comment}{HINT_DELIMITER}{annotation}")
    }
}

/// コメントに注釈レコードが既に含まれているかどうかを返します。
#[inline(always)]
pub fn is_annotated(comment: &str) -> bool {
    comment.contains(RECORD_SEPARATOR)
}

/// コメントの `\f` 以降にある読みのヒントを取得します。
pub fn hint_of(comment: &str) -> Option<&str> {
    comment
        .find(HINT_DELIMITER)
        .map(|pos| &comment[pos + HINT_DELIMITER.len_utf8()..])
}

/// 注釈レコード一件
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Record<'a> {
    /// 読みがヒントに一致したかどうか
    pub matched: bool,

    /// 候補または単語の表記
    pub text: &'a str,

    /// 辞書が返した参照レコード、または合成ヘッダーの残りのフィールド
    pub line: &'a str,
}

impl<'a> Record<'a> {
    /// レコードを解析します。
    ///
    /// 表記自体は区切られていないため、`,` を含む表記は `known` に渡された場合のみ正しく
    /// 切り出せます。それ以外は最初の `,` までを表記とみなします。
    fn parse(raw: &'a str, known: Option<&str>) -> Option<Self> {
        let (flag, rest) = raw.split_once(FIELD_SEPARATOR)?;
        let matched = match flag {
            "1" => true,
            "0" => false,
            _ => return None,
        };
        let known_split = known
            .filter(|t| t.contains(FIELD_SEPARATOR))
            .and_then(|t| {
                let line = rest.strip_prefix(t)?;
                let line = if line.is_empty() {
                    line
                } else {
                    line.strip_prefix(FIELD_SEPARATOR)?
                };
                Some((&rest[..t.len()], line))
            });
        let (text, line) = known_split
            .or_else(|| rest.split_once(FIELD_SEPARATOR))
            .unwrap_or((rest, ""));
        Some(Self {
            matched,
            text,
            line,
        })
    }

    /// レコードの読み（行の最初のフィールド）を取得します。
    pub fn pronunciation(&self) -> &'a str {
        self.line
            .split_once(FIELD_SEPARATOR)
            .map_or(self.line, |(p, _)| p)
    }

    /// 合成ヘッダーかどうかを返します。
    pub fn is_composition(&self) -> bool {
        self.line.split(FIELD_SEPARATOR).nth(6) == Some(COMPOSITION_MARKER)
    }
}

impl fmt::Display for Record<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{RECORD_SEPARATOR}{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            if self.matched { 1 } else { 0 },
            self.text,
            self.line,
        )
    }
}

/// 解析済みの注釈
///
/// `Display` で書き戻すと元のコメントと同一の文字列になります。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Annotation<'a> {
    head: &'a str,
    records: Vec<Record<'a>>,
}

impl<'a> Annotation<'a> {
    /// コメントを接頭辞とレコードに分解します。
    ///
    /// レコードを一件も含まない場合、または `0`/`1` 以外のフラグを含む場合は `None` を返します。
    ///
    /// レコードの表記は区切られていないため、`,` を含む表記（`1,000` など）は最初の `,` で
    /// 切られます。候補の表記が分かっている場合は [`Annotation::parse_with_text`] を使ってください。
    ///
    /// # 例
    ///
    /// ```
    /// # use dictlookup::annotation::Annotation;
    /// let comment = "zoe6\u{c}\r1,坐,zoe6,0,v\r0,坐,co5,1,v";
    /// let annotation = Annotation::parse(comment).unwrap();
    /// assert_eq!(annotation.prefix(), Some("zoe6"));
    /// assert_eq!(annotation.records().len(), 2);
    /// assert_eq!(annotation.to_string(), comment);
    /// ```
    pub fn parse(comment: &'a str) -> Option<Self> {
        Self::parse_inner(comment, None)
    }

    /// 候補の表記を手掛かりにコメントを解析します。
    ///
    /// 表記が `text` と一致するレコードは、`text` が `,` を含んでいてもその全体を表記とします。
    ///
    /// ```
    /// # use dictlookup::annotation::Annotation;
    /// let comment = "\r1,1,000,jat1cin1,0";
    /// let annotation = Annotation::parse_with_text(comment, "1,000").unwrap();
    /// assert_eq!(annotation.records()[0].text, "1,000");
    /// assert_eq!(annotation.records()[0].pronunciation(), "jat1cin1");
    /// ```
    pub fn parse_with_text(comment: &'a str, text: &str) -> Option<Self> {
        Self::parse_inner(comment, Some(text))
    }

    fn parse_inner(comment: &'a str, known: Option<&str>) -> Option<Self> {
        let pos = comment.find(RECORD_SEPARATOR)?;
        let head = &comment[..pos];
        let records = comment[pos + RECORD_SEPARATOR.len_utf8()..]
            .split(RECORD_SEPARATOR)
            .map(|raw| Record::parse(raw, known))
            .collect::<Option<Vec<_>>>()?;
        Some(Self { head, records })
    }

    /// `\f` の前に残された接頭辞を取得します。
    ///
    /// 注釈が接頭辞なしで始まる場合は `None` を返します。
    pub fn prefix(&self) -> Option<&'a str> {
        if self.head.is_empty() {
            return None;
        }
        Some(self.head.strip_suffix(HINT_DELIMITER).unwrap_or(self.head))
    }

    /// レコードを先頭から順に取得します。
    #[inline(always)]
    pub fn records(&self) -> &[Record<'a>] {
        &self.records
    }

    /// 合成ヘッダーで始まる注釈かどうかを返します。
    pub fn is_composition(&self) -> bool {
        self.records.first().is_some_and(Record::is_composition)
    }
}

impl fmt::Display for Annotation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.head)?;
        for record in &self.records {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}
