#![cfg(unstable)]
#![feature(test)]
extern crate test;

use subpath_json::matcher::{exec_match, MatchOptions};
use subpath_json::path::Path;

const FLAT: &str = r#"{"name":"Allagash Brewing","address":"155 Fisher Road, Portland, Maine","brewed":["Tripel","Curieux","Victoria Ale","Coolship Resurgam"],"active":true}"#;

const NESTED: &str = r#"{"user":{"id":42,"name":"Rowan","addresses":[{"city":"Portland","zip":"04101"},{"city":"Lewiston","zip":"04240"}]},"tags":["prod","us-east"]}"#;

#[bench]
fn match_flat_object_key(b: &mut test::Bencher) {
    let input = FLAT.as_bytes();
    let path = Path::parse("address").unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| exec_match(input, &path, MatchOptions::default()))
}

#[bench]
fn match_flat_array_index(b: &mut test::Bencher) {
    let input = FLAT.as_bytes();
    let path = Path::parse("brewed[2]").unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| exec_match(input, &path, MatchOptions::default()))
}

#[bench]
fn match_flat_last_child(b: &mut test::Bencher) {
    let input = FLAT.as_bytes();
    let path = Path::parse("brewed.[-1]").unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| exec_match(input, &path, MatchOptions::default()))
}

#[bench]
fn match_flat_no_match(b: &mut test::Bencher) {
    let input = FLAT.as_bytes();
    let path = Path::parse("brewery.country").unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| exec_match(input, &path, MatchOptions::default()))
}

#[bench]
fn match_flat_ensure_unique(b: &mut test::Bencher) {
    let input = FLAT.as_bytes();
    let path = Path::parse("brewed").unwrap();
    let candidate = subpath_json::Loc::new(FLAT.find("\"Curieux\"").unwrap(), "\"Curieux\"".len());

    b.bytes = input.len() as u64;
    b.iter(|| {
        exec_match(
            input,
            &path,
            MatchOptions {
                ensure_unique: Some(candidate),
                get_last_child_pos: false,
            },
        )
    })
}

#[bench]
fn match_nested_deep_key(b: &mut test::Bencher) {
    let input = NESTED.as_bytes();
    let path = Path::parse("user.addresses[0].city").unwrap();

    b.bytes = input.len() as u64;
    b.iter(|| exec_match(input, &path, MatchOptions::default()))
}

#[bench]
fn validate_flat_object(b: &mut test::Bencher) {
    let input = FLAT.as_bytes();

    b.bytes = input.len() as u64;
    b.iter(|| {
        subpath_json::validate::validate(
            input,
            subpath_json::validate::Framing::None,
            subpath_json::validate::ValidateFlags::default(),
        )
    })
}
