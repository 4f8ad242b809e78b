use crate::foundation::error::{RayframeError, RayframeResult};

/// Size of one linear memory page in bytes.
pub const PAGE_SIZE: usize = 64 * 1024;

/// Default growth limit (1 GiB).
pub const DEFAULT_MAX_PAGES: u32 = 16 * 1024;

/// Flat, byte-addressable memory that only grows, in whole pages.
///
/// Growing may move the backing allocation: slices returned by [`LinearMemory::view`] must be
/// re-derived after every call that can grow memory.
#[derive(Clone, Debug)]
pub struct LinearMemory {
    bytes: Vec<u8>,
    max_pages: u32,
}

impl LinearMemory {
    /// Zeroed memory of `pages` pages with the default growth limit.
    pub fn new(pages: u32) -> RayframeResult<Self> {
        Self::with_max_pages(pages, DEFAULT_MAX_PAGES)
    }

    /// Zeroed memory of `pages` pages that may grow up to `max_pages`.
    pub fn with_max_pages(pages: u32, max_pages: u32) -> RayframeResult<Self> {
        if pages > max_pages {
            return Err(RayframeError::memory(format!(
                "initial size of {pages} pages exceeds the limit of {max_pages}"
            )));
        }
        Ok(Self {
            bytes: vec![0; pages_to_bytes(pages)?],
            max_pages,
        })
    }

    /// Pages needed to hold `len` bytes.
    pub fn pages_for(len: usize) -> RayframeResult<u32> {
        u32::try_from(len.div_ceil(PAGE_SIZE))
            .map_err(|_| RayframeError::memory(format!("{len} bytes exceed the page range")))
    }

    /// Current size in pages.
    pub fn pages(&self) -> u32 {
        (self.bytes.len() / PAGE_SIZE) as u32
    }

    /// Current size in bytes.
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Grow by `delta` zeroed pages and return the previous page count.
    pub fn grow(&mut self, delta: u32) -> RayframeResult<u32> {
        let prev = self.pages();
        let next = prev
            .checked_add(delta)
            .filter(|n| *n <= self.max_pages)
            .ok_or_else(|| {
                RayframeError::memory(format!(
                    "cannot grow {prev} pages by {delta}: limit is {}",
                    self.max_pages
                ))
            })?;
        self.bytes.resize(pages_to_bytes(next)?, 0);
        Ok(prev)
    }

    /// Snapshot view of the whole memory.
    pub fn view(&self) -> &[u8] {
        &self.bytes
    }

    /// Mutable view of the whole memory.
    pub fn view_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Bounds-checked read of `len` bytes at `offset`.
    pub fn read(&self, offset: usize, len: usize) -> RayframeResult<&[u8]> {
        let range = self.range(offset, len)?;
        Ok(&self.bytes[range])
    }

    /// Bounds-checked mutable access to `len` bytes at `offset`.
    pub fn slice_mut(&mut self, offset: usize, len: usize) -> RayframeResult<&mut [u8]> {
        let range = self.range(offset, len)?;
        Ok(&mut self.bytes[range])
    }

    /// Bounds-checked copy of `data` into memory at `offset`.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> RayframeResult<()> {
        self.slice_mut(offset, data.len())?.copy_from_slice(data);
        Ok(())
    }

    fn range(&self, offset: usize, len: usize) -> RayframeResult<std::ops::Range<usize>> {
        match offset.checked_add(len) {
            Some(end) if end <= self.bytes.len() => Ok(offset..end),
            _ => Err(RayframeError::memory(format!(
                "access of {len} bytes at offset {offset} is outside memory of {} bytes",
                self.bytes.len()
            ))),
        }
    }
}

fn pages_to_bytes(pages: u32) -> RayframeResult<usize> {
    (pages as usize)
        .checked_mul(PAGE_SIZE)
        .ok_or_else(|| RayframeError::memory(format!("{pages} pages overflow usize")))
}

#[cfg(test)]
#[path = "../../tests/unit/module/memory.rs"]
mod tests;
