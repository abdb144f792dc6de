// e2e/wire_format.rs — bit-exact stream layout
//
// Golden vectors pin the encoder's output byte for byte.  The structural
// tests walk freshly produced streams and check every command against the
// format rules: header fields, literal-block sizes, reference ranges and the
// choice of the cheapest form.

use refpack::block::command::{Command, CommandIter, RefForm};
use refpack::block::{compress_to_vec, decompress_to_vec, Header, HEADER_SIZE, WINDOW_SIZE};
use refpack::hc::encoding_cost;
use refpack::lorem::gen_buffer;

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" ")
}

// ── 1. Golden vectors ────────────────────────────────────────────────────────

#[test]
fn golden_vectors() {
    let cases: &[(&[u8], &str)] = &[
        (b"", "00 00 00 00 10 fb 00 00 0a fc"),
        (b"A", "01 00 00 00 10 fb 00 00 0b fd 41"),
        (b"ABCABCABCABC", "0c 00 00 00 10 fb 00 00 0f 1b 02 41 42 43 fc"),
        (&[0u8; 100], "64 00 00 00 10 fb 00 00 0f c1 00 00 5e 00 fc"),
        (
            b"Simple Test Input",
            "11 00 00 00 10 fb 00 00 1c e3 53 69 6d 70 6c 65 20 54 65 73 74 20 49 6e 70 75 fd 74",
        ),
        (
            b"hello hello hello",
            "11 00 00 00 10 fb 00 00 14 e0 68 65 6c 6c 87 80 05 6f 20 fc",
        ),
        (
            b"01234567890123456789012345678901234567890123456789012345678901234567890123456789\
              01234567890123456789012345678901234567890123456789012345678901234567890123456789\
              0123456789012345678901234567890123456789",
            "c8 00 00 00 10 fb 00 00 19 e1 30 31 32 33 34 35 36 37 c2 00 09 b9 38 39 fc",
        ),
    ];
    for (input, expected) in cases {
        let packed = compress_to_vec(input).unwrap();
        assert_eq!(hex(&packed), *expected, "input of {} bytes", input.len());
        assert_eq!(decompress_to_vec(&packed).unwrap(), *input);
    }
}

#[test]
fn golden_alternating_pair() {
    let input = b"abababababababababab".repeat(3);
    assert_eq!(
        hex(&compress_to_vec(&input).unwrap()),
        "3c 00 00 00 10 fb 00 00 0f b6 80 01 61 62 fc"
    );
}

#[test]
fn golden_modular_counter() {
    let input: Vec<u8> = (0..50u8).map(|i| i % 7).collect();
    assert_eq!(
        hex(&compress_to_vec(&input).unwrap()),
        "32 00 00 00 10 fb 00 00 15 e0 00 01 02 03 a7 c0 06 04 05 06 fc"
    );
}

// ── 2. Structural rules ──────────────────────────────────────────────────────

fn check_stream(input: &[u8]) {
    let packed = compress_to_vec(input).unwrap();
    let header = Header::parse(&packed).unwrap();
    assert!(header.has_magic());
    assert_eq!(header.uncompressed_size as usize, input.len());
    assert_eq!(header.packed_size as usize, packed.len() & 0xFF_FFFF);

    let mut produced = 0usize;
    let mut saw_eof = false;
    let mut it = CommandIter::new(&packed).unwrap();
    for item in it.by_ref() {
        let (cmd, literals) = item.unwrap();
        assert_eq!(&input[produced..produced + literals.len()], literals);
        produced += literals.len();
        match cmd {
            Command::Literals { count } => {
                assert!(count % 4 == 0 && (4..=112).contains(&count));
            }
            Command::BackRef { form, literals, distance, length } => {
                assert!(literals <= 3);
                assert!((1..=WINDOW_SIZE).contains(&distance));
                assert!(distance <= produced, "reference before start");
                assert_eq!(form, RefForm::from_cost(encoding_cost(distance - 1, length)));
                assert!(length > form.header_len(), "unprofitable reference");
                assert_eq!(
                    &input[produced..produced + length],
                    &input[produced - distance..produced - distance + length]
                );
                produced += length;
            }
            Command::Eof { literals } => {
                assert!(literals <= 3);
                saw_eof = true;
            }
        }
    }
    assert!(saw_eof);
    assert_eq!(produced, input.len());
    assert_eq!(it.position(), packed.len());
    assert!(packed.len() >= HEADER_SIZE + 1);
}

#[test]
fn streams_follow_format_rules() {
    check_stream(b"");
    check_stream(&gen_buffer(70_000, 3));
    check_stream(&vec![7u8; 5000]);
    let saw: Vec<u8> = (0..40_000u32).map(|i| (i % 251) as u8 ^ (i / 997) as u8).collect();
    check_stream(&saw);
}

#[test]
fn consecutive_literal_blocks_are_full() {
    let input: Vec<u8> = (0..4000u32).map(|i| (i.wrapping_mul(2_654_435_761) >> 13) as u8).collect();
    let packed = compress_to_vec(&input).unwrap();
    let mut previous_block: Option<usize> = None;
    let mut blocks = 0;
    for item in CommandIter::new(&packed).unwrap() {
        let (cmd, _) = item.unwrap();
        if let Command::Literals { count } = cmd {
            if let Some(prev) = previous_block {
                assert_eq!(prev, 112, "short block followed by another block");
            }
            previous_block = Some(count);
            blocks += 1;
        } else {
            previous_block = None;
        }
    }
    assert!(blocks > 1);
}
