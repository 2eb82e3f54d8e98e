use crate::domain::entities::sheet::SheetRow;
use crate::domain::entities::spot::Spot;
use crate::domain::entities::wishlist::WishlistItem;
use crate::domain::view::filter::{filter_records, RecordFilter, SpotFilter, WishlistFilter};
use crate::domain::view::pagination::{PageSlice, Paginator};
use crate::domain::view::sort::{
    default_spot_sort, default_wishlist_sort, sort_records, SortState, Sortable, SpotSortKey,
    WishlistSortKey,
};
use crate::usecase::ports::backend::BackendError;
use crate::usecase::ports::renderer::ViewSink;
use crate::usecase::services::store::{EntityStore, FromSheetRow, LoadStatus};

pub type SpotView = CollectionView<Spot, SpotFilter>;
pub type WishlistView = CollectionView<WishlistItem, WishlistFilter>;

/// Everything the user picked for one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState<F, K> {
    pub criteria: F,
    pub sort: SortState<K>,
    pub page: usize,
}

/// What happened to a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest {
    Shown,
    /// Outside `1..=page_count`; the view did not change.
    Ignored,
}

/// Filter → sort → paginate over an entity store.
///
/// The sorted result is cached, so flipping pages never re-runs the filter or
/// the sort. Any change to the criteria or the sort goes back to page 1.
#[derive(Debug, Clone)]
pub struct CollectionView<R: Sortable, F> {
    store: EntityStore<R>,
    state: ViewState<F, R::Key>,
    sorted: Vec<R>,
    paginator: Paginator,
}

impl<R, F> CollectionView<R, F>
where
    R: Sortable + Clone,
    F: RecordFilter<R>,
{
    pub fn new(criteria: F, sort: SortState<R::Key>, paginator: Paginator) -> Self {
        Self {
            store: EntityStore::default(),
            state: ViewState {
                criteria,
                sort,
                page: 1,
            },
            sorted: Vec::new(),
            paginator,
        }
    }

    pub fn state(&self) -> &ViewState<F, R::Key> {
        &self.state
    }

    pub fn store(&self) -> &EntityStore<R> {
        &self.store
    }

    /// Filtered and sorted records, every page.
    pub fn filtered(&self) -> &[R] {
        &self.sorted
    }

    pub fn current_page(&self) -> PageSlice<'_, R> {
        self.paginator.slice(&self.sorted, self.state.page)
    }

    /// Replaces the criteria and starts over on page 1.
    pub fn apply_filter(&mut self, criteria: F, sink: &mut dyn ViewSink<R>) {
        self.state.criteria = criteria;
        self.refresh(sink);
    }

    /// Header click on `key`.
    pub fn request_sort(&mut self, key: R::Key, sink: &mut dyn ViewSink<R>) {
        self.state.sort = self.state.sort.toggled(key);
        tracing::debug!(key = ?key, direction = ?self.state.sort.direction, "sort changed");
        self.refresh(sink);
    }

    /// Moves to `page` using the cached sorted records.
    pub fn request_page(&mut self, page: usize, sink: &mut dyn ViewSink<R>) -> PageRequest {
        if !self.paginator.contains(page, self.sorted.len()) {
            tracing::debug!(
                page,
                page_count = self.paginator.page_count(self.sorted.len()),
                "ignoring out-of-range page request"
            );
            return PageRequest::Ignored;
        }
        self.state.page = page;
        self.notify(sink);
        PageRequest::Shown
    }

    /// Re-runs the whole pipeline from the store, back on page 1.
    pub fn refresh(&mut self, sink: &mut dyn ViewSink<R>) {
        let mut sorted = filter_records(self.store.records(), &self.state.criteria);
        sort_records(&mut sorted, &self.state.sort);
        self.sorted = sorted;
        self.state.page = 1;
        self.notify(sink);
    }

    fn notify(&self, sink: &mut dyn ViewSink<R>) {
        let page = self.current_page();
        sink.render_page(page.items, &page.meta);
        sink.render_map_markers(&self.sorted);
    }
}

impl<R, F> CollectionView<R, F>
where
    R: Sortable + Clone + FromSheetRow,
    F: RecordFilter<R>,
{
    /// Swaps in a freshly fetched record set and re-renders. A failed fetch
    /// renders an empty view; the returned status tells the two apart.
    pub fn reload(
        &mut self,
        fetched: Result<Vec<SheetRow>, BackendError>,
        sink: &mut dyn ViewSink<R>,
    ) -> LoadStatus {
        let status = self.store.ingest(fetched).clone();
        self.refresh(sink);
        status
    }
}

impl SpotView {
    /// Every spot, distance ascending, pages of ten.
    pub fn for_spots() -> Self {
        CollectionView::new(SpotFilter::default(), default_spot_sort(), Paginator::default())
    }

    pub fn sort_state(&self) -> SortState<SpotSortKey> {
        self.state.sort
    }
}

impl WishlistView {
    /// Every item, priority first, pages of ten.
    pub fn for_wishlist() -> Self {
        CollectionView::new(
            WishlistFilter::default(),
            default_wishlist_sort(),
            Paginator::default(),
        )
    }

    pub fn sort_state(&self) -> SortState<WishlistSortKey> {
        self.state.sort
    }
}
