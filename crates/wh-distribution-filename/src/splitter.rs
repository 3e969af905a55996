use memchr::memchr;

/// Splits a string on a single-byte ASCII delimiter.
pub(crate) struct MemchrSplitter<'a> {
    haystack: &'a str,
    delimiter: u8,
    offset: usize,
    done: bool,
}

impl<'a> MemchrSplitter<'a> {
    pub(crate) fn split(haystack: &'a str, delimiter: u8) -> Self {
        debug_assert!(delimiter.is_ascii());
        MemchrSplitter {
            haystack,
            delimiter,
            offset: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for MemchrSplitter<'a> {
    type Item = &'a str;

    /// Like [`str::split`], yields empty pieces around leading, trailing and repeated delimiters.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if let Some(index) = memchr(self.delimiter, &self.haystack.as_bytes()[self.offset..]) {
            // The delimiter is ASCII, so both sides are on a char boundary.
            let piece = &self.haystack[self.offset..self.offset + index];
            self.offset += index + 1;
            Some(piece)
        } else {
            self.done = true;
            Some(&self.haystack[self.offset..])
        }
    }
}
