use crate::RowRange;

pub const DEFAULT_PAGE_SIZE: u32 = 15;

/// Position of the feed in the page sequence of its current scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page_index: u32,
    page_size: u32,
    has_more: bool,
}

impl PageCursor {
    /// A zero page size is bumped to one.
    pub fn new(page_size: u32) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            has_more: true,
        }
    }

    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn range(&self) -> RowRange {
        RowRange::for_page(self.page_index, self.page_size)
    }

    pub(crate) fn reset(&mut self) {
        *self = Self::new(self.page_size);
    }

    pub(crate) fn advance(&mut self, has_more: bool) {
        self.page_index += 1;
        self.has_more = has_more;
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
