use std::sync::Arc;

/// One shutter event: an id plus the encoded JPEG it produced.
///
/// Immutable once created; the compositor only reads it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capture {
    pub id: u64,
    pub bytes: Arc<[u8]>,
}

impl Capture {
    pub fn new(id: u64, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            id,
            bytes: bytes.into(),
        }
    }
}
