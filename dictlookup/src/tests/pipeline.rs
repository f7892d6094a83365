use std::fs;
use std::rc::Rc;

use tempfile::tempdir;

use crate::candidate::{
    Candidate, CandidateList, Code, DictEntry, Phrase, Sentence, SimpleCandidate,
};
use crate::config::MapConfig;
use crate::dictionary::{Dictionary, DictionaryComponent, LexiconDirectory};
use crate::filter::{Filter, Segment, Ticket, apply_filters, create_filter};
use crate::test_utils::{
    CountingDictionary, LOOKUP_TSV, StaticComponent, SYLLABARY_TXT, hashmap, test_lexicon,
};
use crate::translation::{FifoTranslation, Menu};

const CONFIG: &str = "\
dictionary_lookup_filter/dictionary: jyut6ping3
dictionary_lookup_filter/tags: [abc, jyutping]
";

fn phrase(text: &str, hint: &str) -> Candidate {
    let entry = DictEntry::new(text, Code::default()).with_comment(format!("\u{c}{hint}"));
    Phrase::new("phrase", 0, 2, entry).into()
}

fn filters(config: &MapConfig, component: &Rc<dyn DictionaryComponent>) -> Vec<Box<dyn Filter>> {
    let ticket = Ticket::new("filter", Some(config));
    ["dictionary_lookup_filter", "phonology_uniquifier"]
        .into_iter()
        .map(|name| create_filter(name, &ticket, component).unwrap())
        .collect()
}

/// 注釈の付与と重複の統合を連結した動作のテスト
#[test]
fn test_lookup_then_uniquify() {
    let config = MapConfig::from_reader(CONFIG.as_bytes()).unwrap();
    let component = StaticComponent::with_lexicon("jyut6ping3", test_lexicon());
    let mut filters = filters(&config, &component);

    let upstream: FifoTranslation = [
        phrase("坐", "zoe6"),
        phrase("坐", "co5"),
        phrase("坐", "zoe6 "),
        phrase("我", "ngo5"),
    ]
    .into_iter()
    .collect();
    let segment = Segment::new(0, 4).with_tags(["abc"]);
    let mut menu = Menu::new(apply_filters(&mut filters, &segment, Box::new(upstream)));
    assert_eq!(menu.prepare_all(), 3);

    let candidates = menu.candidates();
    assert_eq!(candidates[0].comment(), "\u{c}\r1,坐,zoe6,0,sit\r0,坐,co5,1,sit");
    assert_eq!(candidates[0].kind(), "uniquified");
    assert_eq!(candidates[1].comment(), "\u{c}\r1,坐,co5,1,sit\r0,坐,zoe6,0,sit");
    assert_eq!(candidates[2].comment(), "\u{c}\r1,我,ngo5,0,I");
}

/// タグが一致しない区間では注釈を付与しないことのテスト
#[test]
fn test_segment_tags() {
    let config = MapConfig::from_reader(CONFIG.as_bytes()).unwrap();
    let component = StaticComponent::with_lexicon("jyut6ping3", test_lexicon());
    let mut filters = filters(&config, &component);

    let upstream: FifoTranslation = [phrase("坐", "zoe6"), phrase("坐", "zoe6")]
        .into_iter()
        .collect();
    let segment = Segment::new(0, 4).with_tags(["punct"]);
    let mut menu = Menu::new(apply_filters(&mut filters, &segment, Box::new(upstream)));
    assert_eq!(menu.prepare_all(), 1);
    assert_eq!(menu.candidates()[0].comment(), "\u{c}zoe6");
    assert_eq!(menu.candidates()[0].kind(), "uniquified");
}

/// 文候補と単語候補が混在するストリームのテスト
#[test]
fn test_sentence_and_phrase() {
    let config = MapConfig::from_reader(CONFIG.as_bytes()).unwrap();
    let component = StaticComponent::with_lexicon("jyut6ping3", test_lexicon());
    let mut filters = filters(&config, &component);

    let sentence = Sentence::new(
        0,
        6,
        vec![
            DictEntry::new("我哋", Code::new([2, 3])).with_elements(["我", "哋"]),
            DictEntry::new("好", Code::new([4])),
        ],
    );
    let upstream: FifoTranslation = [
        Candidate::from(sentence),
        Candidate::from(SimpleCandidate::new("punct", 6, 7, "，", "")),
        phrase("好", "hou3"),
    ]
    .into_iter()
    .collect();
    let segment = Segment::new(0, 7).with_tags(["jyutping"]);
    let mut menu = Menu::new(apply_filters(&mut filters, &segment, Box::new(upstream)));
    assert_eq!(menu.prepare_all(), 3);

    let candidates = menu.into_candidates();
    assert_eq!(
        candidates[0].comment(),
        "\r1,我哋好,ngo5dei6hou2,1,0,,,,composition,,,,,,,,,\
         \r1,我,ngo5,0,I\r1,哋,dei6,0,plural\r1,好,hou2,0,good\r0,好,hou3,1,like"
    );
    assert_eq!(candidates[1].comment(), "");
    assert_eq!(
        candidates[2].comment(),
        "\u{c}\r1,好,hou3,1,like\r0,好,hou2,0,good"
    );
}

/// 重複の統合を先に適用した場合のテスト
#[test]
fn test_uniquify_then_lookup() {
    let config = MapConfig::from_reader(CONFIG.as_bytes()).unwrap();
    let component = StaticComponent::with_lexicon("jyut6ping3", test_lexicon());
    let mut filters = filters(&config, &component);
    filters.reverse();

    let upstream: FifoTranslation = [phrase("坐", "zoe6"), phrase("坐", "zoe6")]
        .into_iter()
        .collect();
    let segment = Segment::new(0, 4).with_tags(["abc"]);
    let mut menu = Menu::new(apply_filters(&mut filters, &segment, Box::new(upstream)));
    assert_eq!(menu.prepare_all(), 2);
    for candidate in menu.candidates() {
        assert_eq!(candidate.comment(), "\u{c}\r1,坐,zoe6,0,sit\r0,坐,co5,1,sit");
    }
}

/// 辞書の問い合わせが候補ごとに一度であることのテスト
#[test]
fn test_query_once_per_candidate() {
    let counting = Rc::new(CountingDictionary::new(test_lexicon()));
    let dict: Rc<dyn Dictionary> = counting.clone();
    let component = StaticComponent::new(hashmap!["jyut6ping3".to_string() => dict]);
    let config = MapConfig::from_reader(CONFIG.as_bytes()).unwrap();
    let mut filters = filters(&config, &component);

    let upstream: FifoTranslation = [phrase("坐", "zoe6"), phrase("行", "hong4")]
        .into_iter()
        .collect();
    let segment = Segment::new(0, 2).with_tags(["abc"]);
    let mut translation = apply_filters(&mut filters, &segment, Box::new(upstream));
    let mut list = CandidateList::new();
    for _ in 0..3 {
        assert_eq!(translation.peek(&mut list).unwrap().text(), "坐");
    }
    let first = translation.pop(&mut list).unwrap();
    list.push(first);
    assert_eq!(
        translation.peek(&mut list).unwrap().comment(),
        "\u{c}\r1,行,hong4,0,row\r0,行,hang4,1,walk\r0,行,haang4,2,walk"
    );
    assert_eq!(counting.queries("坐"), 1);
    assert_eq!(counting.queries("行"), 1);
    assert_eq!(counting.total_queries(), 2);
}

/// 辞書ディレクトリから開いた辞書をフィルター間で共有するテスト
#[test]
fn test_shared_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("jyut6ping3.lookup.tsv"), LOOKUP_TSV).unwrap();
    fs::write(dir.path().join("jyut6ping3.syllabary.txt"), SYLLABARY_TXT).unwrap();
    let directory = Rc::new(LexiconDirectory::new(dir.path()));
    let component: Rc<dyn DictionaryComponent> = directory.clone();

    let config = MapConfig::from_reader(CONFIG.as_bytes()).unwrap();
    let mut first = filters(&config, &component);
    let mut second = filters(&config, &component);
    let segment = Segment::new(0, 2).with_tags(["abc"]);

    for filters in [&mut first, &mut second] {
        let upstream: FifoTranslation = [phrase("企", "kei5")].into_iter().collect();
        let mut menu = Menu::new(apply_filters(filters, &segment, Box::new(upstream)));
        menu.prepare_all();
        assert_eq!(menu.candidates()[0].comment(), "\u{c}\r1,企,kei5,0,stand");
    }
    assert!(Rc::ptr_eq(
        &directory.create("jyut6ping3").unwrap(),
        &component.create("jyut6ping3").unwrap(),
    ));
}
