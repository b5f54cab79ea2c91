//! Global logger integration; kept in its own test binary since the
//! logger is process-wide

use propfix_fixer::{fix_source, logging, ArrayPropertyDefaultValueFixer};

#[test]
fn test_fix_decisions_are_logged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("propfix.log");

    let written_to = logging::init_logger(Some(&path)).unwrap();
    assert_eq!(written_to, path);
    assert!(logging::is_enabled());

    let source = "<?php class A { /** @var int[] */ public $a; /** @var int */ public $b; }";
    fix_source(&ArrayPropertyDefaultValueFixer::new(), source).unwrap();
    logging::shutdown_logger();
    assert!(!logging::is_enabled());

    let log = std::fs::read_to_string(&path).unwrap();
    assert!(log.contains("FIX array_property_default_value"));
    assert!(log.contains("FIXED: $a"));
    assert!(log.contains("SKIPPED: $b"));
    assert!(log.contains("not an array type"));
}
