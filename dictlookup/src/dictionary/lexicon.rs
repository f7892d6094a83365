//! 参照表と音節表から構築するメモリ上の辞書
//!
//! 参照表は1行に1レコードのTSVで、1列目が表記、2列目が参照レコードです。
//!
//! ```text
//! # key	line
//! 坐	zoe6,0,sit
//! 坐	co5,1,sit
//! ```
//!
//! 音節表は1行に1音節を並べたテキストで、行番号（0始まり）が音節IDになります。

use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};
use std::ops::Bound;

use csv_core::{ReadFieldResult, ReaderBuilder};
use hashbrown::HashMap;

use crate::candidate::{Code, SyllableId};
use crate::dictionary::Dictionary;
use crate::errors::{LookupError, Result};

/// メモリ上の参照辞書
#[derive(Debug, Default)]
pub struct Lexicon {
    map: BTreeMap<String, Vec<String>>,
    syllabary: Vec<String>,
    syllable_ids: HashMap<String, SyllableId>,
}

impl Lexicon {
    /// 参照表と音節表のリーダーから新しいインスタンスを構築します。
    ///
    /// # 引数
    ///
    /// * `lookup_rdr` - 参照表 `*.lookup.tsv` のリーダー
    /// * `syllabary_rdr` - 音節表 `*.syllabary.txt` のリーダー
    ///
    /// # エラー
    ///
    /// 入力フォーマットが不正な場合に [`LookupError`] を返します。
    pub fn from_readers<L, S>(mut lookup_rdr: L, syllabary_rdr: S) -> Result<Self>
    where
        L: Read,
        S: Read,
    {
        let mut buf = vec![];
        lookup_rdr.read_to_end(&mut buf)?;
        let records = Self::parse_tsv(&buf, "lookup.tsv")?;
        let syllabary = Self::parse_syllabary(syllabary_rdr)?;
        Self::from_records(records, syllabary)
    }

    /// 表記と参照レコードの組、および音節表から新しいインスタンスを構築します。
    ///
    /// 同じ表記のレコードは与えられた順序のまま保持されます。
    ///
    /// # エラー
    ///
    /// 音節表に重複がある場合に [`LookupError`] を返します。
    pub fn from_records<I, K, V>(records: I, syllabary: Vec<String>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, line) in records {
            map.entry(key.into()).or_default().push(line.into());
        }
        let mut syllable_ids = HashMap::with_capacity(syllabary.len());
        for (i, syllable) in syllabary.iter().enumerate() {
            if syllable_ids
                .insert(syllable.clone(), SyllableId::try_from(i)?)
                .is_some()
            {
                return Err(LookupError::invalid_format(
                    "syllabary.txt",
                    format!("Duplicated syllable {syllable:?}"),
                ));
            }
        }
        Ok(Self {
            map,
            syllabary,
            syllable_ids,
        })
    }

    /// 音節の列をローマ字コードに変換します。
    ///
    /// 音節表にない音節を含む場合は `None` を返します。
    pub fn encode<I, S>(&self, syllables: I) -> Option<Code>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        syllables
            .into_iter()
            .map(|s| self.syllable_ids.get(s.as_ref()).copied())
            .collect::<Option<Vec<_>>>()
            .map(Code::new)
    }

    /// 登録されている表記の数を返します。
    pub fn num_keys(&self) -> usize {
        self.map.len()
    }

    /// 音節表の大きさを返します。
    pub fn num_syllables(&self) -> usize {
        self.syllabary.len()
    }

    fn parse_syllabary<R>(rdr: R) -> Result<Vec<String>>
    where
        R: Read,
    {
        let reader = BufReader::new(rdr);
        let mut syllabary = vec![];
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            syllabary.push(line.to_string());
        }
        Ok(syllabary)
    }

    pub(crate) fn parse_tsv(mut bytes: &[u8], name: &'static str) -> Result<Vec<(String, String)>> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(b'\t')
            .quoting(false)
            .comment(Some(b'#'))
            .build();
        let mut entries = vec![];
        let mut output = [0; 4096];
        let mut field = vec![];
        let mut record: Vec<String> = vec![];

        loop {
            let (result, nin, nout) = rdr.read_field(bytes, &mut output);
            bytes = &bytes[nin..];
            field.extend_from_slice(&output[..nout]);
            let record_end = match result {
                // A partial field. Calling again with empty input ends the data.
                ReadFieldResult::InputEmpty | ReadFieldResult::OutputFull => continue,
                ReadFieldResult::Field { record_end } => {
                    record.push(std::str::from_utf8(&field)?.to_string());
                    field.clear();
                    record_end
                }
                ReadFieldResult::End => break,
            };
            if !record_end {
                continue;
            }
            match record.as_slice() {
                [key] if key.is_empty() => {}
                [key, line] => {
                    if key.is_empty() {
                        log::warn!("Skipped a lookup record with an empty key, {line:?}");
                    } else {
                        entries.push((key.clone(), line.clone()));
                    }
                }
                _ => {
                    let msg = format!(
                        "A row of the lookup table must have exactly two items, {:?}",
                        record.join("\t"),
                    );
                    return Err(LookupError::invalid_format(name, msg));
                }
            }
            record.clear();
        }
        Ok(entries)
    }
}

impl Dictionary for Lexicon {
    fn lookup_words<'a>(
        &'a self,
        key: &str,
        predictive: bool,
    ) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        if !predictive {
            return Box::new(
                self.map
                    .get(key)
                    .into_iter()
                    .flatten()
                    .map(String::as_str),
            );
        }
        let lines: Vec<&'a str> = self
            .map
            .range::<str, _>((Bound::Included(key), Bound::Unbounded))
            .take_while(|(k, _)| k.starts_with(key))
            .flat_map(|(_, lines)| lines.iter().map(String::as_str))
            .collect();
        Box::new(lines.into_iter())
    }

    fn decode(&self, code: &Code) -> Option<Vec<String>> {
        code.indices()
            .map(|i| self.syllabary.get(i).cloned())
            .collect()
    }
}
