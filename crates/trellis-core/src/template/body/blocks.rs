//! Block matching (finding the closing tag of `each` and `section`)

use super::tokenize::{Tag, TagKind, TagStream};

/// Find the tag closing a block of `keyword` in `text`, which starts right
/// after the opening tag.
///
/// Nested blocks of the same keyword are skipped and escaped tags are
/// ignored. Single pass over the input.
pub(crate) fn find_block_end(text: &str, keyword: &str) -> Option<Tag> {
    let mut depth = 0usize;

    for tag in TagStream::new(text) {
        if tag.is_escaped() {
            continue;
        }

        match &tag.kind {
            TagKind::BlockStart { keyword: open, .. } if open == keyword => depth += 1,
            TagKind::BlockEnd { keyword: close } if close == keyword => {
                if depth == 0 {
                    return Some(tag);
                }
                depth -= 1;
            }
            _ => {}
        }
    }

    None
}
