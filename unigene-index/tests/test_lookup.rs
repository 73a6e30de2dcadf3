use std::path::PathBuf;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use unigene_index::{build_lookup_tables, write_database, DbSequence, IndexError, LookupConfig,
                    LookupTable, Posting, SequenceDatabase};
use unigene_seq::sequence::{encode, words};
use unigene_io::{write_i32, write_u32};

fn temp_basename(tag: &str) -> String {
    let path: PathBuf = std::env::temp_dir().join(format!("unigene_lt_{}", tag));
    path.to_str().unwrap().to_owned()
}

fn remove_files(basename: &str, n_shards: usize) {
    let _ = std::fs::remove_file(format!("{}.ind", basename));
    let _ = std::fs::remove_file(format!("{}.sbin", basename));
    for i in 0..n_shards {
        let _ = std::fs::remove_file(format!("{}.lt.{}", basename, i));
    }
}

fn make_database(basename: &str, sequences: &[DbSequence]) -> SequenceDatabase {
    write_database(basename, sequences).unwrap();
    SequenceDatabase::open(basename).unwrap()
}

#[test]
fn every_window_has_exactly_one_posting() {
    let basename = temp_basename("complete");
    let sequences = vec![
        DbSequence { name: "a".to_owned(), codes: encode(b"ACGTACGTTGCA") },
        DbSequence { name: "b".to_owned(), codes: encode(b"TTGCAACGG") },
        DbSequence { name: "c".to_owned(), codes: encode(b"ACG") },            // shorter than w
    ];
    let mut db = make_database(&basename, &sequences);

    let config = LookupConfig { wordsize: 4, ..LookupConfig::default() };
    let shards = build_lookup_tables(&mut db, &basename, &config).unwrap();
    assert_eq!(shards.len(), 1);

    let table = LookupTable::open(&shards[0]).unwrap();
    assert_eq!(table.start(), 0);
    assert_eq!(table.end(), 3);
    for (seq_id, sequence) in sequences.iter().enumerate() {
        for (seq_pos, word) in words(&sequence.codes, 4) {
            let expected = Posting { seq_id: seq_id as u32, seq_pos: seq_pos as u32 };
            let occurrences = table.postings(word).iter().filter(|p| **p == expected).count();
            assert_eq!(occurrences, 1, "posting {:?} of word {:#x}", expected, word);
        }
    }
    // total postings = sum of (len - w + 1) over sequences long enough
    assert_eq!(table.n_postings(), 9 + 6);
    remove_files(&basename, 1);
}

#[test]
fn low_complexity_words_are_censored() {
    let basename = temp_basename("censor");
    let sequences = vec![
        DbSequence { name: "polya".to_owned(), codes: encode(&vec![b'A'; 200]) },
        DbSequence { name: "polya2".to_owned(), codes: encode(&vec![b'A'; 150]) },
    ];
    let mut db = make_database(&basename, &sequences);

    let config = LookupConfig { wordsize: 4, ..LookupConfig::default() };
    let shards = build_lookup_tables(&mut db, &basename, &config).unwrap();
    let table = LookupTable::open(&shards[0]).unwrap();

    // the only word the database holds is AAAA, far over 50x its expectation
    assert_eq!(table.n_postings(), 0);
    assert!(table.postings(0).is_empty());
    remove_files(&basename, 1);
}

#[test]
fn forward_only_skips_odd_ids() {
    let basename = temp_basename("fwd_only");
    // the even (forward) sequences carry ten distinct words between them, so
    // nothing gets censored and the posting count is exact
    let sequences = vec![
        DbSequence { name: "a".to_owned(), codes: encode(b"ACGTTGCA") },
        DbSequence { name: "a-".to_owned(), codes: encode(b"TGCAACGT") },
        DbSequence { name: "b".to_owned(), codes: encode(b"GGGACCCT") },
        DbSequence { name: "b-".to_owned(), codes: encode(b"AGGGTCCC") },
    ];
    let mut db = make_database(&basename, &sequences);

    let config = LookupConfig { wordsize: 4, forward_only: true, ..LookupConfig::default() };
    let shards = build_lookup_tables(&mut db, &basename, &config).unwrap();
    let table = LookupTable::open(&shards[0]).unwrap();

    assert_eq!(table.n_postings(), 10);                 // two sequences of 5 windows each
    for word in 0..(1u64 << 8) {
        assert!(table.postings(word).iter().all(|p| p.seq_id & 0x1 == 0));
    }
    remove_files(&basename, 1);
}

#[test]
fn shards_partition_the_database_without_gaps() {
    let basename = temp_basename("shards");
    let reference_basename = temp_basename("shards_ref");

    // enough random sequences to overflow a 1 MB posting budget (131072 postings)
    let mut rng = SmallRng::seed_from_u64(42);
    let sequences: Vec<DbSequence> = (0..2000)
        .map(|i| DbSequence {
            name: format!("read-{}", i),
            codes: (0..100).map(|_| rng.gen_range(0..4u8)).collect(),
        })
        .collect();

    let mut db = make_database(&basename, &sequences);
    let config = LookupConfig { memsize_mb: 1, ..LookupConfig::default() };
    let shards = build_lookup_tables(&mut db, &basename, &config).unwrap();
    assert!(shards.len() >= 2, "expected at least two shards, got {}", shards.len());

    let mut db_ref = make_database(&reference_basename, &sequences);
    let reference_config = LookupConfig::default();     // 192 MB: everything in one shard
    let reference_shards = build_lookup_tables(&mut db_ref, &reference_basename, &reference_config).unwrap();
    assert_eq!(reference_shards.len(), 1);
    let reference = LookupTable::open(&reference_shards[0]).unwrap();

    // shards chain over the full id range with no gaps or overlaps
    let tables: Vec<LookupTable> = shards.iter().map(|f| LookupTable::open(f).unwrap()).collect();
    assert_eq!(tables[0].start(), 0);
    for pair in tables.windows(2) {
        assert_eq!(pair[0].end(), pair[1].start());
    }
    assert_eq!(tables.last().unwrap().end(), db.n_seq());

    // per word, concatenating the shard postings reproduces the single-shard reference
    for word in 0..(1u64 << 18) {
        let concatenated: Vec<Posting> = tables.iter()
            .flat_map(|t| t.postings(word).iter().copied())
            .collect();
        assert_eq!(concatenated, reference.postings(word), "word {:#x}", word);
    }

    remove_files(&basename, shards.len());
    remove_files(&reference_basename, 1);
}

#[test]
fn inconsistent_posting_totals_are_fatal() {
    let path = temp_basename("mismatch.lt.0");
    {
        let mut file: Vec<u8> = Vec::new();
        write_u32(&mut file, unigene_index::LOOKUP_MAGIC).unwrap();
        write_u32(&mut file, 2).unwrap();               // word size -> 16 descriptors
        write_u32(&mut file, 0).unwrap();               // start
        write_u32(&mut file, 0).unwrap();               // last id, inclusive
        write_i32(&mut file, 0).unwrap();               // table index
        write_u32(&mut file, 5).unwrap();               // total postings: wrong on purpose
        for _ in 0..16 {
            write_u32(&mut file, 0).unwrap();           // n_words
            write_u32(&mut file, 152).unwrap();         // start_pos
        }
        std::fs::write(&path, file).unwrap();
    }

    assert!(matches!(LookupTable::open(&path),
        Err(IndexError::PostingCountMismatch { from_counts: 0, total: 5, .. })));
    let _ = std::fs::remove_file(&path);
}
