use sleuth_core::symbols::{
    contains_marker, external_names, parse_line, static_names, visibility_diff, FunctionRecord,
    FunctionScope, LineRecord,
};

fn lines(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[test]
fn non_func_records_are_not_functions() {
    assert_eq!(parse_line("MODULE windows x86_64 ABCD1234 xul.pdb"), LineRecord::NotAFunction);
    assert_eq!(parse_line("PUBLIC 1000 0 NtDllMain"), LineRecord::NotAFunction);
    assert_eq!(parse_line("1000 a 2 57"), LineRecord::NotAFunction);
    assert_eq!(parse_line(""), LineRecord::NotAFunction);
}

#[test]
fn short_or_nameless_func_lines_are_malformed() {
    assert_eq!(parse_line("FUNC 1000 10"), LineRecord::Malformed);
    assert_eq!(parse_line("FUNC 1000 10 0"), LineRecord::Malformed);
    assert_eq!(parse_line("FUNC 1000 10 0 static"), LineRecord::Malformed);
    // A name that is nothing but a parameter list has no canonical part.
    assert_eq!(parse_line("FUNC 1000 10 0 (int)"), LineRecord::Malformed);
}

#[test]
fn static_func_line_parses_with_file_static_scope() {
    let record = parse_line("FUNC 1000 10 0 static mozilla::Foo::Bar(int)");
    assert_eq!(
        record,
        LineRecord::Function(FunctionRecord {
            scope: FunctionScope::FileStatic,
            name: "mozilla::Foo::Bar".to_string(),
        })
    );
}

#[test]
fn external_func_line_parses_with_external_scope() {
    let record = parse_line("FUNC 2000 10 0 mozilla::Foo::Bar(int)");
    assert_eq!(
        record,
        LineRecord::Function(FunctionRecord {
            scope: FunctionScope::External,
            name: "mozilla::Foo::Bar".to_string(),
        })
    );
}

#[test]
fn multiple_field_marker_is_skipped() {
    let record = parse_line("FUNC m 1000 10 0 static mozilla::Baz(void)");
    assert_eq!(
        record,
        LineRecord::Function(FunctionRecord {
            scope: FunctionScope::FileStatic,
            name: "mozilla::Baz".to_string(),
        })
    );
}

#[test]
fn canonical_name_stops_at_template_arguments() {
    let record = parse_line("FUNC 3000 20 0 nsTArray<int>::Length()");
    assert_eq!(
        record,
        LineRecord::Function(FunctionRecord {
            scope: FunctionScope::External,
            name: "nsTArray".to_string(),
        })
    );
}

#[test]
fn marker_test_is_a_case_sensitive_substring_match() {
    let listing = lines(&[
        "FILE 0 xul.cpp",
        "FUNC 1000 10 0 static bool mozilla::SpinEventLoopUntil(int)",
    ]);
    assert!(contains_marker(&listing, "static bool mozilla::SpinEventLoopUntil"));
    assert!(contains_marker(&listing, "SpinEventLoop"));
    assert!(!contains_marker(&listing, "static bool mozilla::spineventloopuntil"));
    assert!(!contains_marker(&listing, "mozilla::Absent"));
    assert!(!contains_marker(&[], "anything"));
}

#[test]
fn scope_extraction_partitions_records() {
    let listing = lines(&[
        "FUNC 1000 10 0 static mozilla::Hidden(int)",
        "FUNC 2000 10 0 mozilla::Visible(int)",
        "FILE 1 other.cpp",
        "FUNC 3000",
    ]);
    let statics = static_names(&listing);
    let externals = external_names(&listing);
    assert!(statics.contains("mozilla::Hidden"));
    assert!(!statics.contains("mozilla::Visible"));
    assert!(externals.contains("mozilla::Visible"));
    assert!(!externals.contains("mozilla::Hidden"));
}

#[test]
fn diff_of_empty_operands_is_empty() {
    let listing = lines(&["FUNC 1000 10 0 static mozilla::Foo(int)"]);
    assert!(visibility_diff(&[], &listing).is_empty());
    assert!(visibility_diff(&listing, &[]).is_empty());
    assert!(visibility_diff(&[], &[]).is_empty());
}

#[test]
fn static_in_both_listings_is_not_a_candidate() {
    let bad = lines(&["FUNC 1000 10 0 static mozilla::Foo(int)"]);
    let good = lines(&["FUNC 2000 10 0 static mozilla::Foo(int)"]);
    assert!(visibility_diff(&bad, &good).is_empty());
}

#[test]
fn diff_finds_functions_that_lost_external_visibility() {
    let bad = lines(&["FUNC 1000 10 0 static mozilla::SpinEventLoopUntil(int)"]);
    let good = lines(&[
        "FUNC 2000 10 0 mozilla::SpinEventLoopUntil(int)",
        "FUNC 3000 10 0 mozilla::Other(int)",
    ]);

    let candidates = visibility_diff(&bad, &good);
    assert_eq!(candidates.len(), 1);
    assert!(candidates.contains("mozilla::SpinEventLoopUntil"));
}

#[test]
fn malformed_lines_are_silently_excluded_from_the_diff() {
    let bad = lines(&[
        "FUNC 1000 10 0 static mozilla::Gone(int)",
        "FUNC trailing",
        "garbage line",
    ]);
    let good = lines(&["FUNC 2000 10 0 mozilla::Gone(int)", "FUNC", "STACK WIN 4 1000"]);

    let candidates = visibility_diff(&bad, &good);
    assert_eq!(candidates.len(), 1);
    assert!(candidates.contains("mozilla::Gone"));
}
