//! Integration tests for `zmk-build --print-layers`

mod common;

use common::{stdout, TestProject};

#[test]
fn test_print_layers_matches_shipped_header() {
    // Works outside a ZMK config: no build.yaml needed
    let project = TestProject::new();

    let output = project.run(&["--print-layers"]);
    let out = stdout(&output);

    assert!(output.status.success());
    assert!(out.contains("#pragma once"));

    let shipped = include_str!("../boards/shields/charybdis/charybdis_layers.h");
    for line in out.lines().filter(|l| l.starts_with("#define")) {
        assert!(shipped.contains(line), "shipped header is missing '{line}'");
    }
    assert_eq!(out.lines().filter(|l| l.starts_with("#define")).count(), 7);
}
