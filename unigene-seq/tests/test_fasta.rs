use std::io::Cursor;

use unigene_seq::sequence::{read_fasta_sequences, read_quality_records, load_reads};
use unigene_seq::SequenceError;

#[test]
fn multi_line_records_are_concatenated() {
    let fasta = "> read-1 some description\nACGT\nacgt\n\n>read-2\nTTTT\n";
    let sequences = read_fasta_sequences(Cursor::new(fasta), "test.fasta").unwrap();

    assert_eq!(sequences.len(), 2);
    assert_eq!(sequences[0].0, "read-1");
    assert_eq!(sequences[0].1, b"ACGTACGT".to_vec());
    assert_eq!(sequences[1].0, "read-2");
    assert_eq!(sequences[1].1, b"TTTT".to_vec());
}

#[test]
fn non_nucleotide_letters_are_dropped() {
    let fasta = ">r\nAC-GT*NX\n";
    let sequences = read_fasta_sequences(Cursor::new(fasta), "test.fasta").unwrap();
    assert_eq!(sequences[0].1, b"ACGTNX".to_vec());
}

#[test]
fn missing_header_is_a_parse_error() {
    let fasta = "ACGT\n>r\nACGT\n";
    let outcome = read_fasta_sequences(Cursor::new(fasta), "test.fasta");
    assert!(matches!(outcome,
        Err(SequenceError::FastaParseError { line: 1, .. })));
}

#[test]
fn header_without_a_name_is_a_parse_error() {
    let fasta = ">r1\nACGT\n>   \nACGT\n";
    let outcome = read_fasta_sequences(Cursor::new(fasta), "test.fasta");
    assert!(matches!(outcome,
        Err(SequenceError::FastaParseError { line: 3, .. })));
}

#[test]
fn quality_values_span_lines() {
    let qual = ">r1\n30 31 32\n33\n>r2\n10 10\n";
    let records = read_quality_records(Cursor::new(qual), "test.qual").unwrap();
    assert_eq!(records[0].1, vec![30, 31, 32, 33]);
    assert_eq!(records[1].1, vec![10, 10]);
}

#[test]
fn non_numeric_quality_is_a_parse_error() {
    let qual = ">r1\n30 3a 32\n";
    let outcome = read_quality_records(Cursor::new(qual), "test.qual");
    assert!(matches!(outcome, Err(SequenceError::FastaParseError { .. })));
}

#[test]
fn reads_are_paired_by_name() {
    let dir = std::env::temp_dir();
    let seq_path = dir.join("unigene_test_pairing.seq");
    let qual_path = dir.join("unigene_test_pairing.qual");
    // the quality file carries the records out of order, one duplicate and one unknown name
    std::fs::write(&seq_path, ">a\nACGT\n>b\nGGCC\n").unwrap();
    std::fs::write(&qual_path, ">b\n1 2 3 4\n>missing\n9 9\n>a\n30 30 30 30\n>b\n5 6 7 8\n").unwrap();

    let reads = load_reads(seq_path.to_str().unwrap(), qual_path.to_str().unwrap()).unwrap();
    assert_eq!(reads.len(), 2);
    assert_eq!(reads[0].name(), "a");
    assert_eq!(reads[0].quality(), &[30, 30, 30, 30]);
    assert_eq!(reads[1].name(), "b");
    assert_eq!(reads[1].quality(), &[1, 2, 3, 4]);          // the duplicate was skipped

    std::fs::remove_file(seq_path).unwrap();
    std::fs::remove_file(qual_path).unwrap();
}

#[test]
fn wrong_quality_count_is_fatal() {
    let dir = std::env::temp_dir();
    let seq_path = dir.join("unigene_test_count.seq");
    let qual_path = dir.join("unigene_test_count.qual");
    std::fs::write(&seq_path, ">a\nACGT\n").unwrap();
    std::fs::write(&qual_path, ">a\n30 30 30\n").unwrap();

    let outcome = load_reads(seq_path.to_str().unwrap(), qual_path.to_str().unwrap());
    assert!(matches!(outcome,
        Err(SequenceError::QualityCountMismatch { n_quality: 3, n_bases: 4, .. })));

    std::fs::remove_file(seq_path).unwrap();
    std::fs::remove_file(qual_path).unwrap();
}

#[test]
fn reverse_complement_record_keeps_reversed_quality() {
    use unigene_seq::sequence::ReadRecord;

    let read = ReadRecord::new("r", b"AACGTN".to_vec(), vec![1, 2, 3, 4, 5, 6]);
    let mate = read.reverse_complement();
    assert_eq!(mate.name(), "r-");
    assert_eq!(mate.seq(), b"NACGTT");
    assert_eq!(mate.quality(), &[6, 5, 4, 3, 2, 1]);
}
