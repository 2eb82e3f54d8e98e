use crate::domain::view::pagination::PageMeta;

/// Receives what a collection view produced after each pipeline run.
///
/// The table gets the current page only; the map gets every record that
/// passed the filter, whatever page is showing.
pub trait ViewSink<R> {
    fn render_page(&mut self, page: &[R], meta: &PageMeta);

    fn render_map_markers(&mut self, filtered: &[R]);
}

/// Keeps the latest notifications so they can be shown later, possibly on
/// another thread. `None` means that notification never arrived.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedView<R> {
    pub page: Option<(Vec<R>, PageMeta)>,
    pub map: Option<Vec<R>>,
}

impl<R> Default for RenderedView<R> {
    fn default() -> Self {
        Self {
            page: None,
            map: None,
        }
    }
}

impl<R: Clone> ViewSink<R> for RenderedView<R> {
    fn render_page(&mut self, page: &[R], meta: &PageMeta) {
        self.page = Some((page.to_vec(), *meta));
    }

    fn render_map_markers(&mut self, filtered: &[R]) {
        self.map = Some(filtered.to_vec());
    }
}
