use crate::candidate::Code;
use crate::dictionary::Dictionary;
use crate::test_utils::test_lexicon;

/// リソースの参照表と音節表の読み込みのテスト
#[test]
fn test_load_resources() {
    let lex = test_lexicon();
    assert_eq!(lex.num_keys(), 7);
    assert_eq!(lex.num_syllables(), 10);
    assert_eq!(
        lex.lookup_words("行", false).collect::<Vec<_>>(),
        vec!["hang4,1,walk", "hong4,0,row", "haang4,2,walk"]
    );
}

/// 音節表によるコードの変換のテスト
#[test]
fn test_encode_decode() {
    let lex = test_lexicon();
    let code = lex.encode(["ngo5", "dei6"]).unwrap();
    assert_eq!(code, Code::new([2, 3]));
    assert_eq!(lex.decode(&code).unwrap().concat(), "ngo5dei6");
}

/// 前方一致による検索のテスト
#[test]
fn test_predictive_lookup() {
    let lex = test_lexicon();
    assert_eq!(
        lex.lookup_words("我", true).collect::<Vec<_>>(),
        vec!["ngo5,0,I", "ngo5dei6,0,we"]
    );
}
