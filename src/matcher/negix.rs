//! Negative (`[-1]`) index resolution.
//!
//! A negative step can't be matched by a single forward pass — nothing discovers "the last
//! child" until the enclosing array has been fully scanned. Each `[-1]` in the path is resolved
//! by its own single-pass match against the array that contains it (using
//! [`MatchOptions::get_last_child_pos`] to learn where that array's last child lives), then the
//! scan continues from there for the remainder of the path. A path with several negative steps
//! (`"[-1].[-1]"`) walks this window by window, left to right, descending into each resolved
//! child in turn.

use crate::path::{Component, Path};

use super::{exec_match_simple, Match, MatchOptions, Matchres, NodeKind};

pub(super) fn exec_match_negix(document: &[u8], path: &Path, options: MatchOptions) -> Match {
    let components = path.components();

    let mut idx = 1; // skip the synthetic root marker
    let mut subdoc: &[u8] = document;
    let mut base_offset: usize = 0;
    let mut level_offset: usize = 0;

    loop {
        let marker_pos = components[idx..]
            .iter()
            .position(|c| matches!(c, Component::LastChildMarker));

        let Some(rel_marker_pos) = marker_pos else {
            // No more negative steps: match whatever regular suffix remains and we're done.
            let suffix = Path::from_steps(components[idx..].iter().cloned());
            let mut result = exec_match_simple(subdoc, &suffix, options);
            translate(&mut result, base_offset, level_offset);
            return result;
        };

        let marker_idx = idx + rel_marker_pos;
        let prefix = Path::from_steps(components[idx..marker_idx].iter().cloned());

        let parent = exec_match_simple(
            subdoc,
            &prefix,
            MatchOptions {
                ensure_unique: None,
                get_last_child_pos: true,
            },
        );

        if parent.matchres != Matchres::Complete {
            let mut result = parent;
            translate(&mut result, base_offset, level_offset);
            return result;
        }

        if parent.node_type != Some(NodeKind::List) {
            // `[-1]` only ever makes sense stepping into an array.
            let mut result = parent;
            result.matchres = Matchres::TypeMismatch;
            result.loc_match = None;
            translate(&mut result, base_offset, level_offset);
            return result;
        }

        let Some(last_child) = parent.last_child else {
            // The array exists but has no elements: `[-1]` doesn't resolve to anything.
            let mut result = parent;
            result.matchres = Matchres::NoMatch;
            result.loc_match = None;
            translate(&mut result, base_offset, level_offset);
            return result;
        };

        let after_marker = marker_idx + 1;

        if after_marker == components.len() {
            let mut result = Match {
                matchres: Matchres::Complete,
                node_type: Some(last_child.kind),
                loc_match: Some(last_child.loc),
                loc_parent: parent.loc_match,
                match_level: parent.match_level + 1,
                position: Some(last_child.index),
                num_siblings: Some(last_child.index),
                has_key: false,
                special_flags: last_child.special_flags,
                numval: last_child.numval,
                ..Match::default()
            };
            translate(&mut result, base_offset, level_offset);
            return result;
        }

        base_offset += last_child.loc.at;
        level_offset += parent.match_level + 1;
        subdoc = last_child.loc.as_bytes(subdoc);
        idx = after_marker;
    }
}

fn translate(result: &mut Match, base_offset: usize, level_offset: usize) {
    if base_offset == 0 && level_offset == 0 {
        return;
    }

    if let Some(loc) = &mut result.loc_match {
        loc.at += base_offset;
    }
    if let Some(loc) = &mut result.loc_parent {
        loc.at += base_offset;
    }
    if let Some(loc) = &mut result.loc_key {
        loc.at += base_offset;
    }
    if let Some(lc) = &mut result.last_child {
        lc.loc.at += base_offset;
    }
    result.match_level += level_offset;
}
