//! 候補の注釈の解決
//!
//! 単語候補はコメントの読みのヒントで単独に照合し、文候補は単語ごとに読みを求めて
//! 照合結果を合成ヘッダーの後ろに並べます。

use std::slice;

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

use crate::annotation::{self, HINT_DELIMITER, PronunciationSet};
use crate::candidate::{Candidate, DictEntry};
use crate::dictionary::Dictionary;
use crate::matcher::{EntryMatcher, MatchMode};
use crate::utils::{char_len, strip_whitespace};

/// 合成の単位となる単語
#[derive(Clone, Debug, PartialEq, Eq)]
struct Word {
    text: String,
    pronunciation: String,
}

/// 候補の注釈を求めるリゾルバー
pub struct CompositionResolver<'d> {
    dict: &'d dyn Dictionary,
    matcher: EntryMatcher<'d>,
}

impl<'d> CompositionResolver<'d> {
    pub fn new(dict: &'d dyn Dictionary) -> Self {
        Self {
            dict,
            matcher: EntryMatcher::new(dict),
        }
    }

    /// 候補の新しいコメントを求めます。
    ///
    /// 注釈を付与できない場合、または既に注釈が付与されている場合は `None` を返します。
    ///
    /// # 例
    ///
    /// ```
    /// # use dictlookup::candidate::{Candidate, Code, DictEntry, Phrase};
    /// # use dictlookup::composition::CompositionResolver;
    /// # use dictlookup::dictionary::Lexicon;
    /// let lexicon = Lexicon::from_records([("坐", "zoe6,0,sit"), ("坐", "co5,1,sit")], vec![])?;
    /// let entry = DictEntry::new("坐", Code::default()).with_comment("\u{c}zoe6");
    /// let cand = Candidate::from(Phrase::new("phrase", 0, 4, entry));
    ///
    /// let resolver = CompositionResolver::new(&lexicon);
    /// assert_eq!(
    ///     resolver.resolve(&cand).as_deref(),
    ///     Some("\u{c}\r1,坐,zoe6,0,sit\r0,坐,co5,1,sit"),
    /// );
    /// # Ok::<(), dictlookup::errors::LookupError>(())
    /// ```
    pub fn resolve(&self, candidate: &Candidate) -> Option<String> {
        let comment = candidate.comment();
        if annotation::is_annotated(comment) {
            return None;
        }
        let words = match candidate.genuine() {
            Candidate::Phrase(phrase) => {
                if let Some(hint) = annotation::hint_of(comment) {
                    let fragment = self.matcher.match_entries(
                        candidate.text(),
                        &PronunciationSet::parse(hint),
                        MatchMode::Standalone,
                    );
                    if fragment.is_empty() {
                        return None;
                    }
                    return Some(annotation::attach(comment, &fragment));
                }
                self.words_of(slice::from_ref(phrase.entry()))
            }
            Candidate::Sentence(sentence) => self.words_of(sentence.components()),
            Candidate::Simple(_) | Candidate::Uniquified(_) => return None,
        };
        if words.is_empty() {
            return None;
        }

        let mut memo: HashMap<&str, &str> = HashMap::new();
        let mut entries = String::new();
        let mut result = String::new();
        for word in &words {
            let pronunciation = match memo.entry(word.text.as_str()) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    let fragment = self.matcher.match_entries(
                        &word.text,
                        &PronunciationSet::single(&word.pronunciation),
                        MatchMode::Composition,
                    );
                    entries.push_str(&fragment);
                    *e.insert(word.pronunciation.as_str())
                }
            };
            result.push_str(pronunciation);
        }
        if entries.is_empty() {
            return None;
        }
        log::debug!("Composed {:?} from {} words", candidate.text(), words.len());

        let composed = annotation::compose(candidate.text(), &result, &entries);
        Some(annotation::attach(comment, &composed))
    }

    /// 候補に注釈を付与します。コメントを書き換えた場合は `true` を返します。
    pub fn annotate(&self, candidate: &mut Candidate) -> bool {
        match self.resolve(candidate) {
            Some(comment) => {
                candidate.set_comment(comment);
                true
            }
            None => false,
        }
    }

    fn words_of(&self, entries: &[DictEntry]) -> Vec<Word> {
        let mut words = vec![];
        for entry in entries {
            if !entry.elements.is_empty() && self.split_elements(entry, &mut words) {
                continue;
            }
            let own = strip_whitespace(
                entry
                    .comment
                    .split(HINT_DELIMITER)
                    .next()
                    .unwrap_or_default(),
            );
            let pronunciation = if own.is_empty() {
                self.dict
                    .decode(&entry.code)
                    .map(|syllables| syllables.concat())
                    .unwrap_or_default()
            } else {
                own
            };
            words.push(Word {
                text: entry.text.clone(),
                pronunciation,
            });
        }
        words
    }

    /// 分割結果の各要素に、文字数だけの音節を先頭から割り当てます。
    ///
    /// コードを展開できない場合、または音節数と文字数が一致しない場合は `false` を返します。
    fn split_elements(&self, entry: &DictEntry, words: &mut Vec<Word>) -> bool {
        let Some(syllables) = self.dict.decode(&entry.code) else {
            return false;
        };
        let total: usize = entry.elements.iter().map(|e| char_len(e)).sum();
        if total != syllables.len() {
            log::debug!(
                "The elements of {:?} do not align with {} syllables",
                entry.text,
                syllables.len(),
            );
            return false;
        }
        let mut rest = syllables.as_slice();
        for element in &entry.elements {
            let (head, tail) = rest.split_at(char_len(element));
            words.push(Word {
                text: element.clone(),
                pronunciation: head.concat(),
            });
            rest = tail;
        }
        true
    }
}
