//! uniffi bindings for the embedding Kotlin/Android runtime.
//!
//! Exposes block and inline segmentation sessions plus the one-shot XML
//! splitter. Results cross the boundary as the flat `[tag, start, end, …]`
//! signed-32-bit layout; tag `-1` is the group-boundary marker and must never
//! be surfaced as content.
//!
//! Host strings are UTF-16; re-encoding the Rust `String` with
//! `encode_utf16` recovers exactly the host's code-unit indexing, so the
//! indices in returned segments line up with the host string.

use std::sync::Mutex;

use chunkdown_engine::{segments_to_wire, split_spans_to_wire, StreamSession};

uniffi::setup_scaffolding!();

/// A streaming segmentation session owned by the host.
///
/// The engine itself is single-threaded per session; the mutex makes the
/// handle safe to hold from managed code that may touch it from different
/// threads (never concurrently in practice). The session is released when
/// the host drops the handle.
#[derive(uniffi::Object)]
pub struct SessionHandle {
    inner: Mutex<StreamSession>,
}

#[uniffi::export]
impl SessionHandle {
    /// Session over the block-level roster.
    #[uniffi::constructor]
    pub fn new_block() -> Self {
        Self {
            inner: Mutex::new(StreamSession::block()),
        }
    }

    /// Session over the inline-level roster.
    #[uniffi::constructor]
    pub fn new_inline() -> Self {
        Self {
            inner: Mutex::new(StreamSession::inline()),
        }
    }

    /// Pushes one chunk and returns every segment closed within it,
    /// flattened as `[tag, start, end, …]`. An empty chunk returns an empty
    /// array.
    pub fn push(&self, chunk: String) -> Vec<i32> {
        let units: Vec<u16> = chunk.encode_utf16().collect();
        // Recover from a poisoned mutex (another thread panicked while
        // holding the lock).
        let mut session = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        segments_to_wire(&session.push(&units))
    }
}

/// One-shot whole-document split into default (tag 0) and XML (tag 1)
/// regions, same wire layout as `push`.
#[uniffi::export]
pub fn split_by_xml(content: String) -> Vec<i32> {
    let units: Vec<u16> = content.encode_utf16().collect();
    split_spans_to_wire(&chunkdown_engine::split_by_xml(&units))
}
