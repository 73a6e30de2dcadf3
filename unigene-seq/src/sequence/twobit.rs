//! The 2-bit nucleotide alphabet: A=0, C=1, G=2, T=3.
//!
//! Every stage past the text one works on these codes. The sequence blob
//! stores one code per byte; the word index and the scanner pack `w`
//! consecutive codes into a rolling integer.

/// Returns the 2-bit code of a nucleotide letter, or `None` for an ambiguous base.
///
/// Letters are matched case-insensitively. Anything that is not a plain
/// A/C/G/T (including N and X) has no code; callers drop such bases, which
/// terminates any word running through them.
#[inline]
pub fn encode_base(letter: u8) -> Option<u8> {
    match letter.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Returns the nucleotide letter for a 2-bit code.
#[inline]
pub fn decode_base(code: u8) -> u8 {
    b"ACGT"[(code & 0x3) as usize]
}

/// Encodes nucleotide text into 2-bit codes, one byte per base.
///
/// Ambiguous bases are dropped, so the result may be shorter than the input.
///
/// # Example
/// ```rust
/// use unigene_seq::sequence::encode;
///
/// assert_eq!(encode(b"ACGT"), vec![0, 1, 2, 3]);
/// assert_eq!(encode(b"acNgt"), vec![0, 1, 2, 3]);
/// ```
pub fn encode(text: &[u8]) -> Vec<u8> {
    text.iter().filter_map(|&letter| encode_base(letter)).collect()
}

/// Decodes a 2-bit code slice back into nucleotide text.
pub fn decode(codes: &[u8]) -> String {
    String::from_utf8(codes.iter().map(|&code| decode_base(code)).collect()).unwrap()
}

/// Iterates the rolling `w`-mer codes of a 2-bit sequence.
///
/// Yields `(start, word)` pairs where `start` is the 0-based position of the
/// word's first base and `word` packs its `w` codes, two bits per base, most
/// significant base first. A sequence shorter than `w` yields nothing.
///
/// # Example
/// ```rust
/// use unigene_seq::sequence::{encode, words};
///
/// let codes = encode(b"ACGT");
/// let all: Vec<(usize, u64)> = words(&codes, 2).collect();
/// assert_eq!(all, vec![(0, 0b0001), (1, 0b0110), (2, 0b1011)]);
/// ```
pub fn words(codes: &[u8], wordsize: usize) -> Words<'_> {
    Words {
        codes,
        wordsize,
        mask: (1u64 << (2 * wordsize)) - 1,
        word: 0,
        next: 0,
    }
}

/// Iterator created by [`words`].
pub struct Words<'a> {
    codes: &'a [u8],
    wordsize: usize,
    mask: u64,
    word: u64,
    next: usize,
}

impl<'a> Iterator for Words<'a> {
    type Item = (usize, u64);

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.codes.len() {
            self.word = ((self.word << 2) & self.mask) | self.codes[self.next] as u64;
            self.next += 1;
            if self.next >= self.wordsize {
                return Some((self.next - self.wordsize, self.word));
            }
        }
        None
    }
}

/// Reverse-complements a 2-bit code slice in place.
///
/// Complementing a 2-bit code is a XOR with `0b11`, so the whole operation is
/// a reversal followed by a byte-wise XOR.
///
/// # Example
/// ```rust
/// use unigene_seq::sequence::{encode, reverse_complement};
///
/// let mut codes = encode(b"AACG");
/// reverse_complement(&mut codes);
/// assert_eq!(codes, encode(b"CGTT"));
/// ```
pub fn reverse_complement(codes: &mut [u8]) {
    codes.reverse();
    for code in codes.iter_mut() {
        *code ^= 0x3;
    }
}
