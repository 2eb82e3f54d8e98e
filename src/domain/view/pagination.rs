pub const PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(PAGE_SIZE)
    }
}

impl Paginator {
    /// A zero page size is bumped to one.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn page_count(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.page_size)
    }

    /// Page 1 always exists, even over an empty sequence.
    pub fn contains(&self, page: usize, total_items: usize) -> bool {
        page == 1 || (page >= 1 && page <= self.page_count(total_items))
    }

    /// Out-of-range pages yield an empty slice with the page clamped into bounds.
    pub fn slice<'a, T>(&self, items: &'a [T], page: usize) -> PageSlice<'a, T> {
        let total_items = items.len();
        let page_count = self.page_count(total_items);
        let meta = PageMeta {
            current_page: page.clamp(1, page_count.max(1)),
            page_count,
            page_size: self.page_size,
            total_items,
        };

        if !self.contains(page, total_items) {
            return PageSlice { items: &[], meta };
        }

        let start = (page - 1) * self.page_size;
        let end = (start + self.page_size).min(total_items);
        PageSlice {
            items: &items[start.min(end)..end],
            meta,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSlice<'a, T> {
    pub items: &'a [T],
    pub meta: PageMeta,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageMeta {
    pub current_page: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub total_items: usize,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            page_count: 0,
            page_size: PAGE_SIZE,
            total_items: 0,
        }
    }
}

/// One button of the "Anterior / 1..N / Próximo" bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageControl {
    Previous { target: usize, enabled: bool },
    Page { number: usize, current: bool },
    Next { target: usize, enabled: bool },
}

impl PageMeta {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.page_count
    }

    /// Row number shown in the `#` column for the first item of the page.
    pub fn first_row_number(&self) -> usize {
        (self.current_page - 1) * self.page_size + 1
    }

    /// Nothing to render with a single page.
    pub fn controls(&self) -> Vec<PageControl> {
        if self.page_count <= 1 {
            return Vec::new();
        }

        let mut controls = Vec::with_capacity(self.page_count + 2);
        controls.push(PageControl::Previous {
            target: self.current_page.saturating_sub(1).max(1),
            enabled: self.has_previous(),
        });
        controls.extend((1..=self.page_count).map(|number| PageControl::Page {
            number,
            current: number == self.current_page,
        }));
        controls.push(PageControl::Next {
            target: (self.current_page + 1).min(self.page_count),
            enabled: self.has_next(),
        });
        controls
    }
}
