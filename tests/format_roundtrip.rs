//! Round-trips a built index through an actual file on disk, the way
//! `par2adv-build`/`par2adv-search` do, rather than through an in-memory
//! buffer.

use std::fs::File;
use std::io::{BufReader, BufWriter};

use par2adv::builder::IndexBuilder;
use par2adv::format;
use par2adv::search::{search, SearchContext};

#[test]
fn index_survives_a_round_trip_through_a_real_file() {
    let mut builder = IndexBuilder::default();
    for word in ["ABCDEFGHIJABCDE", "JJJJJJJJJJJJJJJ", "AAABBBCCCDDDEEE"] {
        builder.insert(word.as_bytes());
    }
    let index = builder.finalize().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dictionary.aix");

    {
        let file = File::create(&path).unwrap();
        let mut writer = BufWriter::new(file);
        format::serialize(&index, &mut writer).unwrap();
    }

    let reloaded = {
        let file = File::open(&path).unwrap();
        let mut reader = BufReader::new(file);
        format::deserialize(&mut reader).unwrap()
    };

    assert_eq!(reloaded.len(), index.len());
    assert_eq!(reloaded.words(), index.words());

    let mut ctx = SearchContext::new();
    assert!(search(&reloaded, b"ABCDEFGHIJABCDE", 3, &mut ctx));
    assert!(search(&reloaded, b"ABCJEFGHJJABCJE", 3, &mut ctx));
    assert!(!search(&reloaded, b"BBBBBBBBBBBBBBB", 0, &mut ctx));
}

#[test]
fn empty_dictionary_round_trips() {
    let builder = IndexBuilder::default();
    let index = builder.finalize().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.aix");

    let file = File::create(&path).unwrap();
    let mut writer = BufWriter::new(file);
    format::serialize(&index, &mut writer).unwrap();
    drop(writer);

    let file = File::open(&path).unwrap();
    let mut reader = BufReader::new(file);
    let reloaded = format::deserialize(&mut reader).unwrap();

    assert_eq!(reloaded.len(), 0);
    assert!(reloaded.is_empty());
}
