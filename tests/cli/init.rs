// Tests for binary-name alias detection (cli/init.rs).

use refpack::cli::constants::set_display_level;
use refpack::cli::init::detect_alias;
use refpack::cli::op_mode::OpMode;

#[test]
fn alias_from_full_path() {
    let _guard = crate::DISPLAY_LEVEL_LOCK.lock().unwrap();
    let cat = detect_alias("/opt/tools/bin/refpackcat");
    set_display_level(2);
    assert_eq!(cat.op_mode, OpMode::Decompress);
    assert!(cat.force_stdout);

    let un = detect_alias("C:\\tools\\unrefpack.exe");
    assert_eq!(un.op_mode, OpMode::Decompress);
    assert!(!un.force_stdout);
}

#[test]
fn near_miss_names_are_not_aliases() {
    for name in ["refpackcatx", "unrefpacker", "xrefpackcat", "refpack-cat"] {
        let init = detect_alias(name);
        assert_eq!(init.op_mode, OpMode::Auto, "{name}");
        assert!(!init.multiple_inputs, "{name}");
    }
}

#[test]
fn plain_name_keeps_sources_and_status() {
    let init = detect_alias("refpack");
    assert!(!init.prefs.remove_src_file);
    assert!(init.prefs.copy_file_status);
    assert!(!init.prefs.test_mode);
}

#[test]
fn alias_is_recorded() {
    use refpack::cli::init::Alias;
    assert_eq!(detect_alias("unrefpack").alias, Alias::Unrefpack);
    assert_eq!(detect_alias("refpack").alias, Alias::Refpack);
}
