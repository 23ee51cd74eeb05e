use subpath_json::matcher::{exec_match, MatchOptions};
use subpath_json::path::{Component, Path};
use subpath_json::validate::{validate, Framing, ValidateFlags};

/// Exercises `exec_match` and `validate` against arbitrary bytes. The only property under test
/// is "never panics, never indexes out of bounds" — malformed documents and nonsensical paths
/// are expected and handled via `TokenizerError`/`Matchres::TypeMismatch`, not excluded from the
/// corpus.
pub fn fuzz_target(input: &[u8]) {
    if input.is_empty() {
        return;
    }

    let (path_len, rest) = input.split_at(1);
    let path = derive_path(path_len[0], rest);
    let document = rest;

    let _ = exec_match(document, &path, MatchOptions::default());
    let _ = exec_match(
        document,
        &path,
        MatchOptions {
            ensure_unique: Some(subpath_json::Loc::new(0, document.len().min(1))),
            get_last_child_pos: true,
        },
    );

    let flags = ValidateFlags {
        primitive_only: document.first() == Some(&b'['),
        single_value: document.first() == Some(&b'{'),
    };
    let _ = validate(document, Framing::None, flags);
    let _ = validate(document, Framing::ArrayElement, flags);
    let _ = validate(document, Framing::DictValue, flags);
}

/// Turns a single control byte into a short, bounded path, so the fuzzer can reach every branch
/// of the component-matching logic without needing a real path grammar in the corpus.
fn derive_path(control: u8, document: &[u8]) -> Path {
    let mut steps = Vec::new();

    for shift in 0..(control % 4) {
        steps.push(match (control >> (shift * 2)) & 0b11 {
            0 => Component::ObjectKey(b"a".to_vec()),
            1 => Component::ArrayIndex((control as u64) % 8),
            2 => Component::LastChildMarker,
            _ => Component::ObjectKey(document.get(..1).unwrap_or(b"z").to_vec()),
        });
    }

    Path::from_steps(steps)
}
