// Tests for CLI identity strings and the display level (cli/constants.rs).

use refpack::cli::constants::{
    display_level, set_display_level, AUTHOR, COMPRESSOR_NAME, REFPACKCAT, UNREFPACK,
};
use refpack::cli::help::welcome_message;
use refpack::displaylevel;

#[test]
fn alias_names_derive_from_compressor_name() {
    assert_eq!(format!("{COMPRESSOR_NAME}cat"), REFPACKCAT);
    assert_eq!(format!("un{COMPRESSOR_NAME}"), UNREFPACK);
}

#[test]
fn welcome_banner_format() {
    let msg = welcome_message();
    assert!(msg.starts_with("*** refpack v1.0.0 "));
    assert!(msg.contains(AUTHOR));
    assert!(msg.ends_with("***"));
}

#[test]
fn displaylevel_macro_respects_level() {
    let _guard = crate::DISPLAY_LEVEL_LOCK.lock().unwrap();
    set_display_level(0);
    // Would write to stderr at a higher level; at 0 the body is skipped.
    let mut evaluated = false;
    displaylevel!(1, "{}", {
        evaluated = true;
        ""
    });
    assert!(!evaluated);
    set_display_level(1);
    displaylevel!(1, "{}", {
        evaluated = true;
        ""
    });
    assert!(evaluated);
    assert_eq!(display_level(), 1);
    set_display_level(2);
}
