//! Deterministic pseudo-text for benchmarks run without input files.
//!
//! Produces sentence-shaped text from a fixed word list.  Word choice is
//! weighted toward short words so the sample has the repetition profile of
//! natural language, which is what an LZSS codec is usually fed.

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit",
    "sed", "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore",
    "magna", "aliqua", "enim", "ad", "minim", "veniam", "quis", "nostrud",
    "exercitation", "ullamco", "laboris", "nisi", "aliquip", "ex", "ea", "commodo",
    "consequat", "duis", "aute", "irure", "in", "reprehenderit", "voluptate",
    "velit", "esse", "cillum", "fugiat", "nulla", "pariatur", "excepteur", "sint",
    "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui", "officia",
    "deserunt", "mollit", "anim", "id", "est", "laborum", "a", "at", "eu", "mi",
];

/// Weight by word length; lengths past the end use the last entry.
const LENGTH_WEIGHTS: &[u32] = &[0, 8, 6, 4, 3, 2];

/// Small xorshift-style generator; the sample only needs to be reproducible.
struct Rng(u32);

impl Rng {
    fn below(&mut self, range: u32) -> u32 {
        const PRIME1: u32 = 2_654_435_761;
        const PRIME2: u32 = 2_246_822_519;
        self.0 = (self.0.wrapping_mul(PRIME1) ^ PRIME2).rotate_left(13);
        ((self.0 as u64 * range as u64) >> 32) as u32
    }

    /// Roughly `range`, never zero.
    fn about(&mut self, range: u32) -> u32 {
        self.below(range) + self.below(range) + 1
    }
}

fn weighted_words() -> Vec<&'static str> {
    let last = LENGTH_WEIGHTS.len() - 1;
    WORDS
        .iter()
        .flat_map(|w| {
            let n = LENGTH_WEIGHTS[w.len().min(last)] as usize;
            std::iter::repeat(*w).take(n)
        })
        .collect()
}

fn push_word(out: &mut Vec<u8>, word: &str, capitalise: bool) {
    let start = out.len();
    out.extend_from_slice(word.as_bytes());
    if capitalise {
        out[start] = out[start].to_ascii_uppercase();
    }
}

/// Generate exactly `size` bytes of text from `seed`.
///
/// The same `(size, seed)` pair always yields the same bytes.
pub fn gen_buffer(size: usize, seed: u32) -> Vec<u8> {
    let pool = weighted_words();
    let mut rng = Rng(seed);
    let mut out = Vec::with_capacity(size + 32);

    // Canonical opening so every sample starts the same way.
    out.extend_from_slice(b"Lorem ipsum dolor sit amet, consectetur adipiscing elit. ");

    while out.len() < size {
        let sentences = rng.about(7);
        for _ in 0..sentences {
            let words = rng.about(11);
            let comma = rng.about(9);
            for i in 0..words {
                let w = pool[rng.below(pool.len() as u32) as usize];
                push_word(&mut out, w, i == 0);
                if i + 1 == words {
                    out.extend_from_slice(if rng.below(11) == 7 { b"? " } else { b". " });
                } else if i == comma {
                    out.extend_from_slice(b", ");
                } else {
                    out.push(b' ');
                }
            }
        }
        out.push(b'\n');
    }

    out.truncate(size);
    out
}
