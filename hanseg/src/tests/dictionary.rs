use crate::dictionary::{Dictionary, DictionaryBuilder, MatchState};
use crate::errors::HansegError;
use crate::reader::StrReader;
use crate::segmenter::Segmenter;

use super::{build_dictionary, MAIN_DIC, QUANTIFIER_DIC};

fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

fn texts(dict: &Dictionary, text: &str, smart: bool) -> Vec<String> {
    Segmenter::new(dict, StrReader::new(text), smart)
        .map(|l| l.unwrap().text().to_string())
        .collect()
}

#[test]
fn test_resources() {
    let dict = build_dictionary();
    assert_eq!(dict.main_trie().num_words(), 19);
    assert_eq!(dict.quantifier_trie().num_words(), 9);
    assert_eq!(dict.stop_word_trie().num_words(), 4);

    assert_eq!(dict.query(&chars("中华")), MatchState::PrefixAndExact);
    assert_eq!(dict.query(&chars("中华人民")), MatchState::PrefixOnly);
    assert_eq!(dict.query(&chars("共和国")), MatchState::ExactOnly);
    assert_eq!(dict.query(&chars("国")), MatchState::NoMatch);
    assert_eq!(dict.query(&chars("t恤")), MatchState::ExactOnly);
    assert_eq!(dict.query_quantifier(&chars("分")), MatchState::PrefixAndExact);
    assert!(dict.is_stop_word(&chars("的")));
    assert!(dict.is_stop_word(&chars("the")));
}

#[test]
fn test_compiled_dictionary() {
    let dict = build_dictionary();
    let mut data = vec![];
    dict.write(&mut data).unwrap();
    let loaded = Dictionary::read(data.as_slice()).unwrap();

    let text = "中华人民共和国成立于1949年10月1日，北京大学的研究生研究生命起源";
    for smart in [true, false] {
        assert_eq!(texts(&loaded, text, smart), texts(&dict, text, smart));
    }
}

#[test]
fn test_extension_and_disabled_words() {
    let mut builder = DictionaryBuilder::new();
    builder
        .add_main_words(MAIN_DIC.as_bytes())
        .unwrap()
        .add_main_words("生命起源\n".as_bytes())
        .unwrap()
        .add_quantifier_words(QUANTIFIER_DIC.as_bytes())
        .unwrap();
    builder.disable_word("北京大学").add_word("ＩＫ分词器");
    let dict = builder.build();

    assert_eq!(texts(&dict, "生命起源", true), ["生命起源"]);
    assert_eq!(texts(&dict, "北京大学", true), ["北京", "大学"]);
    assert_eq!(texts(&dict, "IK分词器", true), ["ik分词器"]);
}

#[test]
fn test_global_dictionary() {
    // The only test touching the process-wide dictionary.
    assert!(matches!(
        Dictionary::global(),
        Err(HansegError::DictionaryNotInitialized)
    ));

    let first = Dictionary::init_global(build_dictionary());
    let second = Dictionary::init_global(DictionaryBuilder::new().build());
    assert!(std::ptr::eq(first, second));
    assert!(std::ptr::eq(first, Dictionary::global().unwrap()));
    assert_eq!(first.main_trie().num_words(), 19);

    assert_eq!(texts(Dictionary::global().unwrap(), "三本书", true), ["三本", "书"]);
}
