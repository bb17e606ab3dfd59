use std::io::Write;

use flate2::write::GzEncoder;
use flate2::Compression;

use sleuth_core::fetch::{decode_listing, FetchError, HttpSymbolSource};

fn gzip(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("gzip write");
    encoder.finish().expect("gzip finish")
}

#[test]
fn decodes_gzip_body_without_trailing_empty_line() {
    let body = gzip(b"line1\nline2\n");
    let listing = decode_listing(&body, true).expect("decode");
    assert_eq!(listing, vec!["line1".to_string(), "line2".to_string()]);
}

#[test]
fn decodes_plain_body_and_trims_lines() {
    let listing =
        decode_listing(b"  FUNC 1000 10 0 foo(int)  \r\nbar\n", false).expect("decode");
    assert_eq!(listing, vec!["FUNC 1000 10 0 foo(int)".to_string(), "bar".to_string()]);
}

#[test]
fn empty_body_decodes_to_empty_listing() {
    assert!(decode_listing(b"", false).expect("decode").is_empty());
    assert!(decode_listing(&gzip(b""), true).expect("decode").is_empty());
}

#[test]
fn corrupt_gzip_body_is_a_decompress_error() {
    let err = decode_listing(b"definitely not gzip", true).expect_err("must fail");
    assert!(matches!(err, FetchError::Decompress(_)), "err = {err:?}");
}

#[test]
fn invalid_utf8_body_is_an_encoding_error() {
    let err = decode_listing(&[0xff, 0xfe, 0xfd], false).expect_err("must fail");
    assert!(matches!(err, FetchError::Encoding(_)), "err = {err:?}");
}

#[test]
fn listing_url_substitutes_the_debug_identifier() {
    let source = HttpSymbolSource::new(
        "https://symbols.test/v1/",
        "xul.pdb",
    )
    .expect("client");
    assert_eq!(
        source.listing_url("44E4EC8C2F41492B9369D6B9A059577C2"),
        "https://symbols.test/v1/xul.pdb/44E4EC8C2F41492B9369D6B9A059577C2/xul.sym"
    );
}

#[test]
fn listing_url_handles_extensionless_debug_files() {
    let source = HttpSymbolSource::new("https://symbols.test/v1", "libxul").expect("client");
    assert_eq!(source.listing_url("ABCD"), "https://symbols.test/v1/libxul/ABCD/libxul.sym");
}
