// Unit tests for the command codec (block/command.rs).
//
// Coverage:
//   - RefForm: cost mapping, header lengths
//   - Command::decode: each of the five opcode classes, truncated headers,
//                      end of stream
//   - Command::encode_into: byte-exact output for each class
//   - CommandIter: literal slicing, termination after EOF, error propagation
//   - CommandStats: per-kind counts via scan

use refpack::block::command::{Command, CommandIter, CommandStats, RefForm};
use refpack::block::RefPackError;

fn encode(cmd: Command) -> Vec<u8> {
    let mut out = Vec::new();
    cmd.encode_into(&mut out);
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// RefForm
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn ref_form_from_cost() {
    assert_eq!(RefForm::from_cost(2), RefForm::Short);
    assert_eq!(RefForm::from_cost(3), RefForm::Long);
    assert_eq!(RefForm::from_cost(4), RefForm::VeryLong);
    assert_eq!(RefForm::Short.header_len(), 2);
    assert_eq!(RefForm::Long.header_len(), 3);
    assert_eq!(RefForm::VeryLong.header_len(), 4);
}

// ─────────────────────────────────────────────────────────────────────────────
// decode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn decode_short_reference() {
    let (cmd, n) = Command::decode(&[0x1B, 0x02], 0).unwrap();
    assert_eq!(n, 2);
    assert_eq!(
        cmd,
        Command::BackRef { form: RefForm::Short, literals: 3, distance: 3, length: 9 }
    );
    assert_eq!(cmd.output_len(), 12);
}

#[test]
fn decode_short_reference_high_offset_bits() {
    // 0ffnnndd with ff = 11 and second byte FF: offset 1023.
    let (cmd, _) = Command::decode(&[0x60, 0xFF], 0).unwrap();
    assert_eq!(
        cmd,
        Command::BackRef { form: RefForm::Short, literals: 0, distance: 1024, length: 3 }
    );
}

#[test]
fn decode_long_reference() {
    let (cmd, n) = Command::decode(&[0xB6, 0x80, 0x01], 0).unwrap();
    assert_eq!(n, 3);
    assert_eq!(
        cmd,
        Command::BackRef { form: RefForm::Long, literals: 2, distance: 2, length: 58 }
    );
}

#[test]
fn decode_very_long_reference() {
    let (cmd, n) = Command::decode(&[0xC1, 0x00, 0x00, 0x5E], 0).unwrap();
    assert_eq!(n, 4);
    assert_eq!(
        cmd,
        Command::BackRef { form: RefForm::VeryLong, literals: 1, distance: 1, length: 99 }
    );
}

#[test]
fn decode_very_long_reference_extremes() {
    let (cmd, _) = Command::decode(&[0xDF, 0xFF, 0xFE, 0xFF], 0).unwrap();
    assert_eq!(
        cmd,
        Command::BackRef { form: RefForm::VeryLong, literals: 3, distance: 131_071, length: 1028 }
    );
}

#[test]
fn decode_literal_blocks() {
    assert_eq!(Command::decode(&[0xE0], 0).unwrap(), (Command::Literals { count: 4 }, 1));
    assert_eq!(Command::decode(&[0xE3], 0).unwrap(), (Command::Literals { count: 16 }, 1));
    assert_eq!(Command::decode(&[0xFB], 0).unwrap(), (Command::Literals { count: 112 }, 1));
}

#[test]
fn decode_eof() {
    for (i, op) in (0xFCu8..=0xFF).enumerate() {
        assert_eq!(Command::decode(&[op], 0).unwrap(), (Command::Eof { literals: i }, 1));
    }
}

#[test]
fn decode_at_offset() {
    let stream = [0xAA, 0xAA, 0xFD];
    assert_eq!(Command::decode(&stream, 2).unwrap().0, Command::Eof { literals: 1 });
}

#[test]
fn decode_cut_header_is_truncated() {
    assert_eq!(Command::decode(&[0x1B], 0), Err(RefPackError::Truncated));
    assert_eq!(Command::decode(&[0xB6, 0x80], 0), Err(RefPackError::Truncated));
    assert_eq!(Command::decode(&[0xC1, 0x00, 0x00], 0), Err(RefPackError::Truncated));
}

#[test]
fn decode_past_end_is_missing_eof() {
    assert_eq!(Command::decode(&[], 0), Err(RefPackError::MissingEof));
    assert_eq!(Command::decode(&[0xE0], 1), Err(RefPackError::MissingEof));
}

// ─────────────────────────────────────────────────────────────────────────────
// encode_into
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn encode_each_class() {
    let short = Command::BackRef { form: RefForm::Short, literals: 3, distance: 3, length: 9 };
    assert_eq!(encode(short), [0x1B, 0x02]);

    let long = Command::BackRef { form: RefForm::Long, literals: 2, distance: 2, length: 58 };
    assert_eq!(encode(long), [0xB6, 0x80, 0x01]);

    let very_long =
        Command::BackRef { form: RefForm::VeryLong, literals: 1, distance: 1, length: 99 };
    assert_eq!(encode(very_long), [0xC1, 0x00, 0x00, 0x5E]);

    assert_eq!(encode(Command::Literals { count: 112 }), [0xFB]);
    assert_eq!(encode(Command::Eof { literals: 0 }), [0xFC]);
    assert_eq!(encode(Command::Eof { literals: 3 }), [0xFF]);
}

#[test]
fn encode_decode_agree_at_field_limits() {
    let cmds = [
        Command::BackRef { form: RefForm::Short, literals: 0, distance: 1024, length: 10 },
        Command::BackRef { form: RefForm::Long, literals: 3, distance: 16_384, length: 67 },
        Command::BackRef { form: RefForm::VeryLong, literals: 0, distance: 131_071, length: 1028 },
        Command::BackRef { form: RefForm::VeryLong, literals: 2, distance: 65_537, length: 5 },
        Command::Literals { count: 4 },
    ];
    for cmd in cmds {
        let bytes = encode(cmd);
        assert_eq!(bytes.len(), cmd.header_len());
        assert_eq!(Command::decode(&bytes, 0).unwrap(), (cmd, bytes.len()));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// CommandIter / CommandStats
// ─────────────────────────────────────────────────────────────────────────────

const ABC_X4: [u8; 15] = [
    0x0C, 0x00, 0x00, 0x00, 0x10, 0xFB, 0x00, 0x00, 0x0F, 0x1B, 0x02, b'A', b'B', b'C', 0xFC,
];

#[test]
fn iter_yields_commands_with_literals() {
    let mut it = CommandIter::new(&ABC_X4).unwrap();
    assert_eq!(it.position(), 9);

    let (cmd, lits) = it.next().unwrap().unwrap();
    assert_eq!(
        cmd,
        Command::BackRef { form: RefForm::Short, literals: 3, distance: 3, length: 9 }
    );
    assert_eq!(lits, b"ABC");
    assert_eq!(it.position(), 14);

    let (cmd, lits) = it.next().unwrap().unwrap();
    assert_eq!(cmd, Command::Eof { literals: 0 });
    assert!(lits.is_empty());

    assert!(it.next().is_none());
}

#[test]
fn iter_stops_after_eof_even_with_trailing_bytes() {
    let mut stream = ABC_X4.to_vec();
    stream.extend_from_slice(&[0xE0, 1, 2, 3, 4]);
    assert_eq!(CommandIter::new(&stream).unwrap().count(), 2);
}

#[test]
fn iter_needs_header() {
    assert_eq!(CommandIter::new(&ABC_X4[..8]).err(), Some(RefPackError::TruncatedHeader));
}

#[test]
fn iter_reports_cut_literals_then_stops() {
    let mut stream = ABC_X4[..9].to_vec();
    stream.extend_from_slice(&[0xE0, 1, 2]);
    let mut it = CommandIter::new(&stream).unwrap();
    assert!(matches!(it.next(), Some(Err(RefPackError::Truncated))));
    assert!(it.next().is_none());
}

#[test]
fn stats_scan_counts_kinds() {
    let stats = CommandStats::scan(&ABC_X4).unwrap();
    assert_eq!(stats.short_refs, 1);
    assert_eq!(stats.long_refs, 0);
    assert_eq!(stats.very_long_refs, 0);
    assert_eq!(stats.literal_blocks, 0);
    assert_eq!(stats.literal_bytes, 3);
    assert_eq!(stats.matched_bytes, 9);
    assert_eq!(stats.references(), 1);
}

#[test]
fn stats_record_accumulates() {
    let mut stats = CommandStats::default();
    stats.record(&Command::Literals { count: 112 });
    stats.record(&Command::Literals { count: 8 });
    stats.record(&Command::BackRef { form: RefForm::Long, literals: 1, distance: 9, length: 20 });
    stats.record(&Command::Eof { literals: 2 });
    assert_eq!(stats.literal_blocks, 2);
    assert_eq!(stats.long_refs, 1);
    assert_eq!(stats.literal_bytes, 123);
    assert_eq!(stats.matched_bytes, 20);
}
