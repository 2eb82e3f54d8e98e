use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use crate::domain::entities::sheet::SheetRow;
use crate::domain::entities::spot::{Spot, SpotId};
use crate::domain::entities::wishlist::WishlistItem;
use crate::domain::view::filter::{SpotFilter, SpotFilterInput, WishlistFilter};
use crate::domain::view::sort::{SortDirection, SpotSortKey, WishlistSortKey};
use crate::usecase::ports::backend::{BackendError, MutationReceipt, SheetBackend};
use crate::usecase::ports::renderer::RenderedView;
use crate::usecase::services::collection_view::{PageRequest, SpotView, WishlistView};
use crate::usecase::services::spot_service::SpotService;
use crate::usecase::services::store::LoadStatus;
use crate::usecase::services::visit_service::VisitService;
use crate::usecase::services::wishlist_service::WishlistService;

fn row(value: Value) -> SheetRow {
    value.as_object().cloned().expect("row should be a json object")
}

#[derive(Debug, Clone, PartialEq)]
enum Call {
    FetchSpots,
    CreateSpot(SheetRow),
    UpdateSpot(SheetRow),
    DeleteSpot(String),
    FetchVisits(String),
    FetchAllVisits,
    CreateVisit(SheetRow),
    FetchWishlist,
    CreateWishlistItem(SheetRow),
    UpdateWishlistItem(SheetRow),
    DeleteWishlistItem(String),
}

#[derive(Default)]
struct FakeState {
    spots: Vec<SheetRow>,
    visits: Vec<SheetRow>,
    wishlist: Vec<SheetRow>,
    unreachable: bool,
    calls: Vec<Call>,
}

/// In-memory sheet that records every request it receives.
#[derive(Default)]
struct FakeSheet {
    state: Mutex<FakeState>,
}

impl FakeSheet {
    fn with_spots(spots: Vec<SheetRow>) -> Arc<Self> {
        let sheet = Self::default();
        sheet.state.lock().expect("lock").spots = spots;
        Arc::new(sheet)
    }

    fn with_wishlist(items: Vec<SheetRow>) -> Arc<Self> {
        let sheet = Self::default();
        sheet.state.lock().expect("lock").wishlist = items;
        Arc::new(sheet)
    }

    fn with_visits(visits: Vec<SheetRow>) -> Arc<Self> {
        let sheet = Self::default();
        sheet.state.lock().expect("lock").visits = visits;
        Arc::new(sheet)
    }

    fn go_offline(&self) {
        self.state.lock().expect("lock").unreachable = true;
    }

    fn calls(&self) -> Vec<Call> {
        self.state.lock().expect("lock").calls.clone()
    }

    fn read(
        &self,
        call: Call,
        pick: impl FnOnce(&FakeState) -> Vec<SheetRow>,
    ) -> Result<Vec<SheetRow>, BackendError> {
        let mut state = self.state.lock().expect("lock");
        state.calls.push(call);
        if state.unreachable {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(pick(&state))
    }

    fn write(
        &self,
        call: Call,
        apply: impl FnOnce(&mut FakeState),
    ) -> Result<MutationReceipt, BackendError> {
        let mut state = self.state.lock().expect("lock");
        state.calls.push(call);
        if state.unreachable {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        apply(&mut state);
        Ok(MutationReceipt {
            message: Some("ok".to_string()),
        })
    }
}

fn same_id(row: &SheetRow, id: &str) -> bool {
    match row.get("ID") {
        Some(Value::String(text)) => text == id,
        Some(Value::Number(number)) => number.to_string() == id,
        _ => false,
    }
}

impl SheetBackend for FakeSheet {
    fn fetch_spots(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.read(Call::FetchSpots, |state| state.spots.clone())
    }

    fn create_spot(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.write(Call::CreateSpot(data.clone()), |state| {
            let mut created = data;
            created.insert("ID".to_string(), json!(format!("{}", state.spots.len() + 1)));
            state.spots.push(created);
        })
    }

    fn update_spot(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.write(Call::UpdateSpot(data.clone()), |state| {
            let id = crate::domain::entities::sheet::cell_text(&data, "ID").unwrap_or_default();
            if let Some(existing) = state.spots.iter_mut().find(|spot| same_id(spot, &id)) {
                *existing = data;
            }
        })
    }

    fn delete_spot(&self, id: &SpotId) -> Result<MutationReceipt, BackendError> {
        self.write(Call::DeleteSpot(id.0.clone()), |state| {
            state.spots.retain(|spot| !same_id(spot, &id.0));
        })
    }

    fn fetch_visits(&self, spot_id: &SpotId) -> Result<Vec<SheetRow>, BackendError> {
        self.read(Call::FetchVisits(spot_id.0.clone()), |state| {
            state
                .visits
                .iter()
                .filter(|visit| visit.get("PesqueiroID") == Some(&json!(spot_id.0)))
                .cloned()
                .collect()
        })
    }

    fn fetch_all_visits(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.read(Call::FetchAllVisits, |state| state.visits.clone())
    }

    fn create_visit(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.write(Call::CreateVisit(data.clone()), |state| state.visits.push(data))
    }

    fn fetch_wishlist(&self) -> Result<Vec<SheetRow>, BackendError> {
        self.read(Call::FetchWishlist, |state| state.wishlist.clone())
    }

    fn create_wishlist_item(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.write(Call::CreateWishlistItem(data.clone()), |state| {
            let mut created = data;
            created.insert(
                "ID".to_string(),
                json!(format!("w{}", state.wishlist.len() + 1)),
            );
            state.wishlist.push(created);
        })
    }

    fn update_wishlist_item(&self, data: SheetRow) -> Result<MutationReceipt, BackendError> {
        self.write(Call::UpdateWishlistItem(data), |_| {})
    }

    fn delete_wishlist_item(&self, id: &str) -> Result<MutationReceipt, BackendError> {
        self.write(Call::DeleteWishlistItem(id.to_string()), |state| {
            state.wishlist.retain(|item| !same_id(item, id));
        })
    }
}

fn numbered_spots(count: usize) -> Vec<SheetRow> {
    (1..=count)
        .map(|n| {
            row(json!({
                "ID": n.to_string(),
                "NomePesqueiro": format!("Pesqueiro {n:02}"),
                "CidadeUF": "Atibaia/SP",
                "TempoSemTransito": n * 10,
                "Distancia": n * 7,
            }))
        })
        .collect()
}

fn page_ids(rendered: &RenderedView<Spot>) -> Vec<String> {
    rendered
        .page
        .as_ref()
        .map(|(items, _)| items.iter().map(|spot| spot.id.0.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn loading_renders_first_page_and_every_marker() {
    let sheet = FakeSheet::with_spots(numbered_spots(23));
    let service = SpotService::new(sheet.clone());
    let mut view = SpotView::for_spots();
    let mut rendered = RenderedView::<Spot>::default();

    let status = service.load(&mut view, &mut rendered);

    assert_eq!(status, LoadStatus::Loaded { count: 23 });
    let (items, meta) = rendered.page.clone().expect("page rendered");
    assert_eq!(items.len(), 10);
    assert_eq!(meta.page_count, 3);
    assert_eq!(meta.current_page, 1);
    assert_eq!(rendered.map.as_ref().map(Vec::len), Some(23));
    assert_eq!(sheet.calls(), vec![Call::FetchSpots]);
}

#[test]
fn third_page_holds_the_remainder_and_page_four_is_ignored() {
    let sheet = FakeSheet::with_spots(numbered_spots(23));
    let service = SpotService::new(sheet);
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());

    let mut rendered = RenderedView::<Spot>::default();
    assert_eq!(view.request_page(3, &mut rendered), PageRequest::Shown);
    assert_eq!(page_ids(&rendered), vec!["21", "22", "23"]);

    let mut untouched = RenderedView::<Spot>::default();
    assert_eq!(view.request_page(4, &mut untouched), PageRequest::Ignored);
    assert_eq!(untouched.page, None);
    assert_eq!(view.state().page, 3);
}

#[test]
fn drive_time_ceiling_keeps_matching_spots_in_distance_order() {
    let spots = (1..=15)
        .map(|n| {
            row(json!({
                "ID": n.to_string(),
                "NomePesqueiro": format!("P{n}"),
                "TempoSemTransito": format!("{} min", n * 10),
                "Distancia": 100 - n,
            }))
        })
        .collect();
    let service = SpotService::new(FakeSheet::with_spots(spots));
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());

    let input = SpotFilterInput {
        drive_time: vec!["60".to_string()],
        ..SpotFilterInput::default()
    };
    let mut rendered = RenderedView::<Spot>::default();
    view.apply_filter(SpotFilter::from_input(&input), &mut rendered);

    assert_eq!(page_ids(&rendered), vec!["6", "5", "4", "3", "2", "1"]);
    assert_eq!(rendered.map.as_ref().map(Vec::len), Some(6));
}

#[test]
fn species_filter_matches_inside_the_list() {
    let spots = vec![
        row(json!({ "ID": "1", "NomePesqueiro": "A", "Peixes": "Tilapia, Bass" })),
        row(json!({ "ID": "2", "NomePesqueiro": "B", "Peixes": "Pacu" })),
        row(json!({ "ID": "3", "NomePesqueiro": "C" })),
    ];
    let service = SpotService::new(FakeSheet::with_spots(spots));
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());

    let input = SpotFilterInput {
        species: "  bass ".to_string(),
        ..SpotFilterInput::default()
    };
    let mut rendered = RenderedView::<Spot>::default();
    view.apply_filter(SpotFilter::from_input(&input), &mut rendered);

    assert_eq!(page_ids(&rendered), vec!["1"]);
}

#[test]
fn missing_prices_stay_last_in_both_directions() {
    let items = vec![
        row(json!({ "ID": "a", "NomeItem": "Vara", "PrecoEstimado": 300 })),
        row(json!({ "ID": "b", "NomeItem": "Linha" })),
        row(json!({ "ID": "c", "NomeItem": "Molinete", "PrecoEstimado": "120,50" })),
        row(json!({ "ID": "d", "NomeItem": "Isca", "PrecoEstimado": null })),
    ];
    let service = WishlistService::new(FakeSheet::with_wishlist(items));
    let mut view = WishlistView::for_wishlist();
    service.load(&mut view, &mut RenderedView::<WishlistItem>::default());

    let ids = |rendered: &RenderedView<WishlistItem>| -> Vec<String> {
        rendered
            .page
            .as_ref()
            .map(|(items, _)| items.iter().map(|item| item.id.clone()).collect())
            .unwrap_or_default()
    };

    let mut ascending = RenderedView::<WishlistItem>::default();
    view.request_sort(WishlistSortKey::EstimatedPrice, &mut ascending);
    assert_eq!(view.sort_state().direction, SortDirection::Asc);
    assert_eq!(ids(&ascending)[..2], ["c", "a"]);
    assert_eq!(ids(&ascending)[2..].len(), 2);

    let mut descending = RenderedView::<WishlistItem>::default();
    view.request_sort(WishlistSortKey::EstimatedPrice, &mut descending);
    assert_eq!(view.sort_state().direction, SortDirection::Desc);
    assert_eq!(ids(&descending)[..2], ["a", "c"]);
    assert!(ids(&descending)[2..].iter().all(|id| id == "b" || id == "d"));
}

#[test]
fn failed_load_is_not_an_empty_sheet() {
    let sheet = FakeSheet::with_spots(numbered_spots(3));
    let service = SpotService::new(sheet.clone());
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());

    sheet.go_offline();
    let mut rendered = RenderedView::<Spot>::default();
    let status = service.load(&mut view, &mut rendered);

    assert!(status.is_failed());
    assert!(page_ids(&rendered).is_empty());
    assert!(view.store().is_empty());

    let empty = SpotService::new(FakeSheet::with_spots(Vec::new()))
        .load(&mut SpotView::for_spots(), &mut RenderedView::<Spot>::default());
    assert_eq!(empty, LoadStatus::Loaded { count: 0 });
}

#[test]
fn saving_without_id_creates_and_reloads() {
    let sheet = FakeSheet::with_spots(numbered_spots(2));
    let service = SpotService::new(sheet.clone());
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());

    let draft = row(json!({ "ID": "", "NomePesqueiro": "  Lago Novo ", "Distancia": "3" }));
    let mut rendered = RenderedView::<Spot>::default();
    service
        .save(&mut view, draft, &mut rendered)
        .expect("save should succeed");

    let calls = sheet.calls();
    assert_eq!(calls.len(), 3);
    match &calls[1] {
        Call::CreateSpot(sent) => {
            assert!(!sent.contains_key("ID"));
            assert_eq!(sent["NomePesqueiro"], json!("Lago Novo"));
        }
        other => panic!("expected a create, got {other:?}"),
    }
    assert_eq!(calls[2], Call::FetchSpots);
    assert_eq!(view.store().len(), 3);
    assert_eq!(page_ids(&rendered).first().map(String::as_str), Some("3"));
}

#[test]
fn saving_with_id_updates() {
    let sheet = FakeSheet::with_spots(numbered_spots(2));
    let service = SpotService::new(sheet.clone());
    let mut view = SpotView::for_spots();

    let mut draft = Spot::from_row(&numbered_spots(2)[1]).to_row();
    draft.insert("NomePesqueiro".to_string(), json!("Renomeado"));
    service
        .save(&mut view, draft, &mut RenderedView::<Spot>::default())
        .expect("update should succeed");

    assert!(matches!(&sheet.calls()[0], Call::UpdateSpot(sent) if sent["ID"] == json!("2")));
    let renamed = view
        .store()
        .records()
        .iter()
        .find(|spot| spot.id == SpotId::from("2"))
        .and_then(|spot| spot.name.clone());
    assert_eq!(renamed.as_deref(), Some("Renomeado"));
}

#[test]
fn nameless_spot_never_reaches_the_sheet() {
    let sheet = FakeSheet::with_spots(Vec::new());
    let service = SpotService::new(sheet.clone());

    let err = service
        .save(
            &mut SpotView::for_spots(),
            row(json!({ "NomePesqueiro": "   ", "CidadeUF": "Ibiúna/SP" })),
            &mut RenderedView::<Spot>::default(),
        )
        .unwrap_err();

    assert!(matches!(err, BackendError::InvalidPayload(_)));
    assert!(sheet.calls().is_empty());
}

#[test]
fn failed_save_keeps_the_local_records() {
    let sheet = FakeSheet::with_spots(numbered_spots(2));
    let service = SpotService::new(sheet.clone());
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());
    sheet.go_offline();

    let err = service
        .save(
            &mut view,
            row(json!({ "NomePesqueiro": "Lago" })),
            &mut RenderedView::<Spot>::default(),
        )
        .unwrap_err();

    assert!(matches!(err, BackendError::Transport(_)));
    assert_eq!(view.store().len(), 2);
    assert_eq!(sheet.calls().last(), Some(&Call::CreateSpot(row(json!({ "NomePesqueiro": "Lago" })))));
}

#[test]
fn deleting_a_spot_reloads_without_it() {
    let sheet = FakeSheet::with_spots(numbered_spots(3));
    let service = SpotService::new(sheet.clone());
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());

    let mut rendered = RenderedView::<Spot>::default();
    service
        .delete(&mut view, &SpotId::from("2"), &mut rendered)
        .expect("delete should succeed");

    assert_eq!(page_ids(&rendered), vec!["1", "3"]);
    assert!(service
        .delete(&mut view, &SpotId::from(" "), &mut RenderedView::<Spot>::default())
        .is_err());
    assert_eq!(
        sheet.calls(),
        vec![Call::FetchSpots, Call::DeleteSpot("2".to_string()), Call::FetchSpots]
    );
}

#[test]
fn sort_header_toggles_and_returns_to_page_one() {
    let service = SpotService::new(FakeSheet::with_spots(numbered_spots(23)));
    let mut view = SpotView::for_spots();
    service.load(&mut view, &mut RenderedView::<Spot>::default());
    view.request_page(2, &mut RenderedView::<Spot>::default());

    let mut rendered = RenderedView::<Spot>::default();
    view.request_sort(SpotSortKey::Distance, &mut rendered);

    assert_eq!(view.sort_state().direction, SortDirection::Desc);
    assert_eq!(view.state().page, 1);
    assert_eq!(page_ids(&rendered).first().map(String::as_str), Some("23"));
}

#[test]
fn visit_needs_a_spot() {
    let sheet = FakeSheet::with_visits(Vec::new());
    let service = VisitService::new(sheet.clone());

    let err = service
        .record_visit(row(json!({ "DataVisita": "2024-05-01", "PesqueiroID": " " })))
        .unwrap_err();
    assert!(matches!(err, BackendError::InvalidPayload(_)));
    assert!(sheet.calls().is_empty());

    service
        .record_visit(row(json!({
            "PesqueiroID": "4",
            "DataVisita": "2024-05-01",
            "PeixesCapturados": " 3 tilápias ",
        })))
        .expect("visit recorded");
    let visits = service.visits_for(&SpotId::from("4")).expect("visits");
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].catch_notes.as_deref(), Some("3 tilápias"));
}

#[test]
fn timeline_shows_newest_visits_first() {
    let visits = vec![
        row(json!({ "PesqueiroID": "1", "DataVisita": "2024-01-10" })),
        row(json!({ "PesqueiroID": "2", "DataVisita": "15/03/2024" })),
        row(json!({ "PesqueiroID": "3" })),
        row(json!({ "PesqueiroID": "1", "DataVisita": "2024-02-01T03:00:00.000Z" })),
        row(json!({ "PesqueiroID": "2", "DataVisita": "2023-12-24" })),
        row(json!({ "PesqueiroID": "4", "DataVisita": "2023-11-02" })),
    ];
    let service = VisitService::new(FakeSheet::with_visits(visits));

    let timeline = service.timeline().expect("timeline");

    let order: Vec<&str> = timeline.iter().map(|visit| visit.spot_id.0.as_str()).collect();
    assert_eq!(order, vec!["2", "1", "1", "2", "4"]);
}

#[test]
fn wishlist_save_sends_two_decimal_price() {
    let sheet = FakeSheet::with_wishlist(Vec::new());
    let service = WishlistService::new(sheet.clone());
    let mut view = WishlistView::for_wishlist();

    let mut rendered = RenderedView::<WishlistItem>::default();
    service
        .save(
            &mut view,
            row(json!({ "NomeItem": "Carretilha", "PrecoEstimado": "349,9", "Prioridade": "Alta" })),
            &mut rendered,
        )
        .expect("save should succeed");

    match &sheet.calls()[0] {
        Call::CreateWishlistItem(sent) => assert_eq!(sent["PrecoEstimado"], json!("349.90")),
        other => panic!("expected a create, got {other:?}"),
    }
    let (items, _) = rendered.page.expect("page rendered");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].estimated_price, Some(349.9));
}

#[test]
fn wishlist_rejects_bad_input_before_sending() {
    let sheet = FakeSheet::with_wishlist(Vec::new());
    let service = WishlistService::new(sheet.clone());
    let mut view = WishlistView::for_wishlist();

    let bad_price = service.save(
        &mut view,
        row(json!({ "NomeItem": "Vara", "PrecoEstimado": "barato" })),
        &mut RenderedView::<WishlistItem>::default(),
    );
    let no_name = service.save(
        &mut view,
        row(json!({ "NomeItem": "", "PrecoEstimado": "10" })),
        &mut RenderedView::<WishlistItem>::default(),
    );

    assert!(matches!(bad_price, Err(BackendError::InvalidPayload(_))));
    assert!(matches!(no_name, Err(BackendError::InvalidPayload(_))));
    assert!(sheet.calls().is_empty());
}

#[test]
fn wishlist_filter_and_delete() {
    let items = vec![
        row(json!({ "ID": "1", "NomeItem": "Vara", "Categoria": "Varas", "Status": "Desejado" })),
        row(json!({ "ID": "2", "NomeItem": "Linha", "Categoria": "Linhas", "Status": "Comprado" })),
    ];
    let sheet = FakeSheet::with_wishlist(items);
    let service = WishlistService::new(sheet.clone());
    let mut view = WishlistView::for_wishlist();
    service.load(&mut view, &mut RenderedView::<WishlistItem>::default());

    view.apply_filter(
        WishlistFilter {
            category: Some("Linhas".to_string()),
            ..WishlistFilter::default()
        },
        &mut RenderedView::<WishlistItem>::default(),
    );
    assert_eq!(view.filtered().len(), 1);

    let mut rendered = RenderedView::<WishlistItem>::default();
    service
        .delete(&mut view, "2", &mut rendered)
        .expect("delete should succeed");

    assert!(view.filtered().is_empty());
    assert_eq!(view.store().len(), 1);
    assert_eq!(sheet.calls().get(1), Some(&Call::DeleteWishlistItem("2".to_string())));
}
