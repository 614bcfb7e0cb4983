//! Byte storage for fully addressable MSC files

/// Trait for backends holding a whole MSC file in addressable memory
///
/// Implemented by memory maps and plain buffers alike; readers built on it
/// decode records straight out of the slice without seeking.
pub trait StorageBackend {
    /// The raw bytes of the file
    fn as_slice(&self) -> &[u8];

    /// Size of the data in bytes
    fn size(&self) -> usize {
        self.as_slice().len()
    }
}

impl StorageBackend for alloc::vec::Vec<u8> {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

impl StorageBackend for &[u8] {
    fn as_slice(&self) -> &[u8] {
        self
    }
}
