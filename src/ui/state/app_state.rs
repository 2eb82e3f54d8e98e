use dioxus::prelude::*;

use crate::domain::entities::sheet::{cell_non_blank, SheetRow};
use crate::domain::entities::spot::{species_catalog, Spot, COL_ID, SPOT_FORM_COLUMNS};
use crate::domain::entities::visit::{Visit, VISIT_FORM_COLUMNS};
use crate::domain::entities::wishlist::{WishlistItem, WISHLIST_FORM_COLUMNS};
use crate::domain::view::filter::{SpotFilterInput, WishlistFilterInput};
use crate::domain::view::markers::{markers_for, MapMarker};
use crate::domain::view::pagination::PageMeta;
use crate::usecase::ports::renderer::RenderedView;
use crate::usecase::services::collection_view::{SpotView, WishlistView};
use crate::usecase::services::store::LoadStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Spots,
    Wishlist,
}

/// Which form overlay is open, with its draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FormState {
    Closed,
    Spot(SheetRow),
    Visit(SheetRow),
    Wishlist(SheetRow),
}

impl FormState {
    pub fn draft(&self) -> Option<&SheetRow> {
        match self {
            FormState::Closed => None,
            FormState::Spot(draft) | FormState::Visit(draft) | FormState::Wishlist(draft) => {
                Some(draft)
            }
        }
    }

    pub fn draft_mut(&mut self) -> Option<&mut SheetRow> {
        match self {
            FormState::Closed => None,
            FormState::Spot(draft) | FormState::Visit(draft) | FormState::Wishlist(draft) => {
                Some(draft)
            }
        }
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            FormState::Closed => &[],
            FormState::Spot(_) => &SPOT_FORM_COLUMNS,
            FormState::Visit(_) => &VISIT_FORM_COLUMNS,
            FormState::Wishlist(_) => &WISHLIST_FORM_COLUMNS,
        }
    }

    pub fn title(&self) -> &'static str {
        let editing = self
            .draft()
            .is_some_and(|draft| cell_non_blank(draft, COL_ID).is_some());
        match (self, editing) {
            (FormState::Closed, _) => "",
            (FormState::Spot(_), false) => "Novo pesqueiro",
            (FormState::Spot(_), true) => "Editar pesqueiro",
            (FormState::Visit(_), _) => "Registrar visita",
            (FormState::Wishlist(_), false) => "Novo item da wishlist",
            (FormState::Wishlist(_), true) => "Editar item da wishlist",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub tab: Signal<Tab>,
    pub busy: Signal<bool>,
    pub status: Signal<String>,

    pub spot_view: Signal<SpotView>,
    pub spot_filter: Signal<SpotFilterInput>,
    pub spot_page: Signal<Vec<Spot>>,
    pub spot_meta: Signal<PageMeta>,
    pub spot_load: Signal<LoadStatus>,
    pub markers: Signal<Vec<MapMarker>>,
    pub species: Signal<Vec<String>>,

    pub selected_spot: Signal<Option<Spot>>,
    pub selected_visits: Signal<Vec<Visit>>,
    pub timeline: Signal<Vec<Visit>>,

    pub wishlist_view: Signal<WishlistView>,
    pub wishlist_filter: Signal<WishlistFilterInput>,
    pub wishlist_page: Signal<Vec<WishlistItem>>,
    pub wishlist_meta: Signal<PageMeta>,
    pub wishlist_load: Signal<LoadStatus>,
    pub categories: Signal<Vec<String>>,

    pub form: Signal<FormState>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            tab: use_signal(|| Tab::Spots),
            busy: use_signal(|| false),
            status: use_signal(|| "Pronto".to_string()),
            spot_view: use_signal(SpotView::for_spots),
            spot_filter: use_signal(SpotFilterInput::default),
            spot_page: use_signal(Vec::<Spot>::new),
            spot_meta: use_signal(PageMeta::default),
            spot_load: use_signal(|| LoadStatus::NotLoaded),
            markers: use_signal(Vec::<MapMarker>::new),
            species: use_signal(Vec::<String>::new),
            selected_spot: use_signal(|| None::<Spot>),
            selected_visits: use_signal(Vec::<Visit>::new),
            timeline: use_signal(Vec::<Visit>::new),
            wishlist_view: use_signal(WishlistView::for_wishlist),
            wishlist_filter: use_signal(WishlistFilterInput::default),
            wishlist_page: use_signal(Vec::<WishlistItem>::new),
            wishlist_meta: use_signal(PageMeta::default),
            wishlist_load: use_signal(|| LoadStatus::NotLoaded),
            categories: use_signal(Vec::<String>::new),
            form: use_signal(|| FormState::Closed),
        }
    }

    pub fn set_status(self, text: impl Into<String>) {
        let mut status = self.status;
        status.set(text.into());
    }

    pub fn set_busy(self, value: bool) {
        let mut busy = self.busy;
        busy.set(value);
    }

    pub fn close_form(self) {
        let mut form = self.form;
        form.set(FormState::Closed);
    }

    /// Stores a view that ran elsewhere and shows what it rendered.
    pub fn commit_spots(self, view: SpotView, rendered: RenderedView<Spot>) {
        let mut species = self.species;
        let mut spot_load = self.spot_load;
        species.set(species_catalog(view.store().records()));
        spot_load.set(view.store().status().clone());
        let mut spot_view = self.spot_view;
        spot_view.set(view);
        self.show_spots(rendered);
    }

    pub fn show_spots(self, rendered: RenderedView<Spot>) {
        if let Some((page, meta)) = rendered.page {
            let mut spot_page = self.spot_page;
            let mut spot_meta = self.spot_meta;
            spot_page.set(page);
            spot_meta.set(meta);
        }
        if let Some(filtered) = rendered.map {
            let mut markers = self.markers;
            markers.set(markers_for(&filtered));
        }
    }

    pub fn commit_wishlist(self, view: WishlistView, rendered: RenderedView<WishlistItem>) {
        let mut categories = self.categories;
        let mut wishlist_load = self.wishlist_load;
        categories.set(category_catalog(view.store().records()));
        wishlist_load.set(view.store().status().clone());
        let mut wishlist_view = self.wishlist_view;
        wishlist_view.set(view);
        self.show_wishlist(rendered);
    }

    pub fn show_wishlist(self, rendered: RenderedView<WishlistItem>) {
        if let Some((page, meta)) = rendered.page {
            let mut wishlist_page = self.wishlist_page;
            let mut wishlist_meta = self.wishlist_meta;
            wishlist_page.set(page);
            wishlist_meta.set(meta);
        }
    }
}

fn category_catalog(items: &[WishlistItem]) -> Vec<String> {
    let mut catalog: Vec<String> = Vec::new();
    for category in items.iter().filter_map(|item| item.category.clone()) {
        if !catalog.contains(&category) {
            catalog.push(category);
        }
    }
    catalog.sort();
    catalog
}
