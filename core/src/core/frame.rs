/// Transient view of one rendered frame inside the emulation core's memory.
///
/// Packed RGB24, row-major, 3 bytes per pixel. The view borrows from the
/// session that produced it, so it cannot outlive the current tick and no
/// second frame can be pulled while it is alive. It is read-only and is
/// consumed by value when decoded.
#[derive(Debug)]
pub struct FrameRef<'a> {
    bytes: &'a [u8],
}

impl<'a> FrameRef<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// Build a view from a pointer/length pair handed out by a core that
    /// shares this module's linear memory.
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `len` bytes for the lifetime `'a`, and
    /// nothing may write to that region while the view is alive. A null
    /// pointer is only accepted together with `len == 0`.
    pub unsafe fn from_raw_parts(ptr: *const u8, len: usize) -> Self {
        if len == 0 {
            return Self { bytes: &[] };
        }
        // SAFETY: upheld by the caller.
        let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
        Self { bytes }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }
}
