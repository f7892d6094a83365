//! 候補ストリームのフィルター
//!
//! フィルターは上流の [`Translation`] を受け取り、変換後のストリームを返します。
//! どのフィルターも同じ形をしているため、ホストの設定に応じて任意の順序で連結できます。
//!
//! - [`DictionaryLookupFilter`]: 候補に読みの注釈を付与する
//! - [`PhonologyUniquifier`]: 表記と注釈が同一の候補をまとめる
pub(crate) mod lookup;
pub(crate) mod uniquifier;

use std::rc::Rc;

use hashbrown::HashSet;

use crate::config::Config;
use crate::dictionary::DictionaryComponent;
use crate::translation::Translation;

pub use crate::filter::lookup::DictionaryLookupFilter;
pub use crate::filter::uniquifier::PhonologyUniquifier;

/// タグが設定されていない場合に照合するタグ
pub const DEFAULT_TAG: &str = "abc";

/// 候補ストリームのフィルター
pub trait Filter {
    /// 上流のストリームを変換したストリームを返します。
    fn apply(&mut self, translation: Box<dyn Translation>) -> Box<dyn Translation>;

    /// このフィルターを `segment` に適用するかどうかを返します。
    fn applies_to_segment(&self, _segment: &Segment) -> bool {
        true
    }
}

/// 変換の対象となる入力の区間
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Segment {
    pub start: usize,
    pub end: usize,
    pub tags: HashSet<String>,
}

impl Segment {
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            tags: HashSet::new(),
        }
    }

    /// タグを設定した区間を返します。
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[inline(always)]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }
}

/// フィルターを作成するときに渡される情報
#[derive(Clone, Copy)]
pub struct Ticket<'a> {
    /// 設定の名前空間
    pub name_space: &'a str,

    /// スキーマの設定
    pub config: Option<&'a dyn Config>,
}

impl<'a> Ticket<'a> {
    pub fn new(name_space: &'a str, config: Option<&'a dyn Config>) -> Self {
        Self { name_space, config }
    }

    pub(crate) fn get_string(&self, key: &str) -> Option<&'a str> {
        self.config?.get_string(&format!("{}/{key}", self.name_space))
    }

    pub(crate) fn get_list(&self, key: &str) -> Option<&'a [String]> {
        self.config?.get_list(&format!("{}/{key}", self.name_space))
    }
}

/// 区間のタグによるフィルターの適用判定
///
/// `<name_space>/tags` に設定されたタグのいずれかを持つ区間にのみ適用します。
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagMatching {
    tags: Vec<String>,
}

impl TagMatching {
    pub fn new(ticket: &Ticket) -> Self {
        let tags = match ticket.get_list("tags") {
            Some(tags) if !tags.is_empty() => tags.to_vec(),
            _ => vec![DEFAULT_TAG.to_string()],
        };
        Self { tags }
    }

    #[inline(always)]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// 区間が照合するタグを持っているかどうかを返します。
    pub fn matches(&self, segment: &Segment) -> bool {
        self.tags.iter().any(|tag| segment.has_tag(tag))
    }
}

/// 区間に適用されるフィルターを順に適用します。
pub fn apply_filters(
    filters: &mut [Box<dyn Filter>],
    segment: &Segment,
    mut translation: Box<dyn Translation>,
) -> Box<dyn Translation> {
    for filter in filters.iter_mut() {
        if filter.applies_to_segment(segment) {
            translation = filter.apply(translation);
        }
    }
    translation
}

/// 登録名からフィルターを作成します。
///
/// | 登録名 | フィルター |
/// |---|---|
/// | `dictionary_lookup_filter` | [`DictionaryLookupFilter`] |
/// | `phonology_uniquifier` | [`PhonologyUniquifier`] |
///
/// 未知の登録名には `None` を返します。
pub fn create_filter(
    name: &str,
    ticket: &Ticket,
    component: &Rc<dyn DictionaryComponent>,
) -> Option<Box<dyn Filter>> {
    match name {
        lookup::REGISTERED_NAME => Some(Box::new(DictionaryLookupFilter::new(
            ticket,
            Rc::clone(component),
        ))),
        uniquifier::REGISTERED_NAME => Some(Box::new(PhonologyUniquifier::new(ticket))),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::config::MapConfig;

    #[test]
    fn test_default_tag() {
        let ticket = Ticket::new("dictionary_lookup_filter", None);
        let matching = TagMatching::new(&ticket);
        assert_eq!(matching.tags(), ["abc"]);
        assert!(matching.matches(&Segment::new(0, 2).with_tags(["abc", "raw"])));
        assert!(!matching.matches(&Segment::new(0, 2).with_tags(["punct"])));
        assert!(!matching.matches(&Segment::new(0, 2)));
    }

    #[test]
    fn test_configured_tags() {
        let mut config = MapConfig::new();
        config.set_list("jyut6ping3_lookup/tags", ["jyutping", "reverse"]);
        let ticket = Ticket::new("jyut6ping3_lookup", Some(&config));
        let matching = TagMatching::new(&ticket);
        assert!(matching.matches(&Segment::new(0, 2).with_tags(["reverse"])));
        assert!(!matching.matches(&Segment::new(0, 2).with_tags(["abc"])));
    }

    #[test]
    fn test_empty_tags() {
        let mut config = MapConfig::new();
        config.set_list("ns/tags", Vec::<String>::new());
        let ticket = Ticket::new("ns", Some(&config));
        assert_eq!(TagMatching::new(&ticket).tags(), ["abc"]);
    }
}
