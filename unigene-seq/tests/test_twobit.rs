use unigene_seq::sequence::{decode, encode, encode_base, reverse_complement};

#[test]
fn encoding_round_trip() {
    let text = b"ACGTTGCAACGTACGTACGT";
    let codes = encode(text);
    assert_eq!(codes.len(), text.len());
    assert_eq!(decode(&codes).as_bytes(), text);
}

#[test]
fn lowercase_letters_encode_too() {
    assert_eq!(encode(b"acgt"), encode(b"ACGT"));
}

#[test]
fn ambiguous_bases_are_dropped() {
    assert_eq!(encode(b"ACNGT"), encode(b"ACGT"));
    assert_eq!(encode(b"NNNN"), Vec::<u8>::new());
    assert_eq!(encode_base(b'N'), None);
    assert_eq!(encode_base(b'X'), None);
}

#[test]
fn reverse_complement_matches_by_hand() {
    // AACGT -> ACGTT
    let mut codes = encode(b"AACGT");
    reverse_complement(&mut codes);
    assert_eq!(decode(&codes), "ACGTT");
}

#[test]
fn reverse_complement_twice_is_identity() {
    let original = encode(b"GATTACAGATTACAGG");
    let mut codes = original.clone();
    reverse_complement(&mut codes);
    assert_ne!(codes, original);
    reverse_complement(&mut codes);
    assert_eq!(codes, original);
}
