/// Classification of a file's raw bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Text,
    Binary,
}

/// Any null byte marks the buffer as binary, regardless of extension or encoding.
/// UTF-16 text is therefore reported as binary as well.
pub fn classify_content(bytes: &[u8]) -> ContentKind {
    if bytes.contains(&0) {
        ContentKind::Binary
    } else {
        ContentKind::Text
    }
}

pub fn is_binary(bytes: &[u8]) -> bool {
    classify_content(bytes) == ContentKind::Binary
}
