use std::sync::Arc;

use chrono::Local;
use dioxus::prelude::*;
use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};
use serde_json::Value;

use crate::config;
use crate::domain::entities::sheet::{cell_text, format_number, SheetRow};
use crate::domain::entities::spot::{
    Reservation, Spot, COL_ADDRESS, COL_AVERAGE_PRICE, COL_CITY, COL_DISTANCE, COL_DRIVE_TIME,
    COL_LATITUDE, COL_LONGITUDE, COL_NAME, COL_RESERVATION, COL_SPECIES,
};
use crate::domain::entities::visit::{
    recent_visits, Visit, COL_VISIT_CATCH, COL_VISIT_DATE, COL_VISIT_NOTES, COL_VISIT_SPOT_ID,
    COL_VISIT_SPOT_NAME,
};
use crate::domain::entities::wishlist::{
    Priority, WishlistItem, WishlistStatus, COL_ITEM_BRAND_MODEL, COL_ITEM_CATEGORY,
    COL_ITEM_FISHING_TYPE, COL_ITEM_LINK, COL_ITEM_NAME, COL_ITEM_NOTES, COL_ITEM_PRICE,
    COL_ITEM_PRIORITY, COL_ITEM_SPECS, COL_ITEM_SPOT_ID, COL_ITEM_STATUS,
};
use crate::domain::view::filter::{SpotFilter, WishlistFilter};
use crate::domain::view::markers::waze_route_url;
use crate::domain::view::pagination::{PageControl, PageMeta};
use crate::domain::view::sort::{SpotSortKey, WishlistSortKey};
use crate::platform::desktop::blocking::run_blocking;
use crate::ui::state::app_state::{AppState, FormState, Tab};
use crate::usecase::ports::backend::SheetBackend;
use crate::usecase::ports::renderer::RenderedView;
use crate::usecase::services::spot_service::SpotService;
use crate::usecase::services::store::LoadStatus;
use crate::usecase::services::visit_service::VisitService;
use crate::usecase::services::wishlist_service::WishlistService;

const CELL_STYLE: &str = "border: 1px solid #bbb; padding: 6px;";
const HEADER_STYLE: &str = "border: 1px solid #bbb; padding: 6px; background: #f2f2f2; cursor: pointer;";
const ANY_OPTION_VALUE: &str = "";

#[derive(Clone)]
pub struct Services {
    pub spots: Arc<SpotService>,
    pub visits: Arc<VisitService>,
    pub wishlist: Arc<WishlistService>,
}

impl PartialEq for Services {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.spots, &other.spots)
            && Arc::ptr_eq(&self.visits, &other.visits)
            && Arc::ptr_eq(&self.wishlist, &other.wishlist)
    }
}

impl Services {
    pub fn new(backend: Arc<dyn SheetBackend>) -> Self {
        Self {
            spots: Arc::new(SpotService::new(backend.clone())),
            visits: Arc::new(VisitService::new(backend.clone())),
            wishlist: Arc::new(WishlistService::new(backend)),
        }
    }

    pub fn from_config() -> anyhow::Result<Self> {
        let file = config::load_default()?;
        let backend = config::connect(&file.backend_choice()?)?;
        Ok(Self::new(backend))
    }
}

#[component]
pub fn App() -> Element {
    let setup = use_hook(|| Services::from_config().map_err(|err| format!("{err:#}")));

    match setup {
        Ok(services) => rsx! { Workspace { services } },
        Err(err) => rsx! {
            div {
                p { "Não foi possível iniciar: {err}" }
            }
        },
    }
}

#[component]
fn Workspace(services: Services) -> Element {
    let state = AppState::new();
    use_context_provider(|| state);
    let services = use_context_provider(|| services);

    let services_for_init = services.clone();
    use_effect(move || {
        load_spots(state, &services_for_init);
        load_wishlist(state, &services_for_init);
        load_timeline(state, &services_for_init);
    });

    let mut tab = state.tab;
    let busy = *state.busy.read();
    let status = state.status.cloned();
    let services_for_reload = services.clone();

    rsx! {
        div { style: "font-family: sans-serif; padding: 8px;",
            nav {
                style: "display: flex; gap: 12px; align-items: center; flex-wrap: wrap; padding: 8px 0;",
                button {
                    disabled: *tab.read() == Tab::Spots,
                    onclick: move |_| tab.set(Tab::Spots),
                    "Pesqueiros"
                }
                button {
                    disabled: *tab.read() == Tab::Wishlist,
                    onclick: move |_| tab.set(Tab::Wishlist),
                    "Wishlist"
                }
                button {
                    disabled: busy,
                    onclick: move |_| {
                        load_spots(state, &services_for_reload);
                        load_wishlist(state, &services_for_reload);
                        load_timeline(state, &services_for_reload);
                    },
                    "Recarregar"
                }
                if busy {
                    span { "Carregando..." }
                }
                span { " {status}" }
            }

            {match *tab.read() {
                Tab::Spots => rsx! { SpotsPanel {} },
                Tab::Wishlist => rsx! { WishlistPanel {} },
            }}

            FormOverlay {}
        }
    }
}

#[component]
fn SpotsPanel() -> Element {
    let state = use_context::<AppState>();
    let mut form = state.form;
    let page = state.spot_page.cloned();
    let meta = *state.spot_meta.read();
    let load = state.spot_load.cloned();
    let sort = state.spot_view.read().sort_state();
    let headers: Vec<(SpotSortKey, String)> = SpotSortKey::ALL
        .into_iter()
        .map(|key| (key, format!("{}{}", key.header(), sort.arrow_for(key))))
        .collect();
    let total = meta.total_items;
    let first_row = meta.first_row_number();
    let colspan = (SpotSortKey::ALL.len() + 2).to_string();
    let empty = empty_message(&load, "Nenhum pesqueiro encontrado.");

    rsx! {
        div { style: "display: flex; gap: 16px; align-items: flex-start;",
            div { style: "flex: 3;",
                SpotFilters {}
                div { style: "display: flex; gap: 12px; align-items: center; margin: 8px 0;",
                    span { "{total} pesqueiro(s)" }
                    button {
                        onclick: move |_| form.set(FormState::Spot(SheetRow::new())),
                        "Novo pesqueiro"
                    }
                }
                table { style: "border-collapse: collapse; width: 100%; border: 1px solid #bbb;",
                    thead {
                        tr {
                            th { style: "{CELL_STYLE} background: #f2f2f2;", "#" }
                            for (key, label) in headers {
                                th {
                                    style: HEADER_STYLE,
                                    onclick: move |_| sort_spots(state, key),
                                    "{label}"
                                }
                            }
                            th { style: "{CELL_STYLE} background: #f2f2f2;", "Ações" }
                        }
                    }
                    tbody {
                        if page.is_empty() {
                            tr {
                                td { style: CELL_STYLE, colspan: "{colspan}", "{empty}" }
                            }
                        } else {
                            for (idx, spot) in page.into_iter().enumerate() {
                                SpotRow { key: "{spot.id}", spot: spot.clone(), number: first_row + idx }
                            }
                        }
                    }
                }
                Pager {
                    meta,
                    on_page: move |number| page_spots(state, number),
                }
                SpotDetails {}
            }
            div { style: "flex: 1; min-width: 240px;",
                MarkerList {}
                Timeline {}
            }
        }
    }
}

#[component]
fn SpotFilters() -> Element {
    let state = use_context::<AppState>();
    let mut filter = state.spot_filter;
    let input = filter.cloned();
    let species = state.species.cloned();
    let drive_time = input.drive_time.first().cloned().unwrap_or_default();
    let reservation = input.reservation.clone();

    rsx! {
        div { style: "display: flex; gap: 8px; flex-wrap: wrap; align-items: center;",
            input {
                placeholder: "Nome ou cidade",
                value: "{input.text}",
                oninput: move |event| {
                    filter.write().text = event.value();
                    filter_spots(state);
                },
            }
            select {
                value: "{drive_time}",
                onchange: move |event| {
                    let value = event.value();
                    filter.write().drive_time = if value.is_empty() { Vec::new() } else { vec![value] };
                    filter_spots(state);
                },
                option { value: ANY_OPTION_VALUE, "Qualquer tempo" }
                option { value: "30", "Até 30 min" }
                option { value: "60", "Até 1 h" }
                option { value: "90", "Até 1 h 30" }
                option { value: "120", "Até 2 h" }
                option { value: "120+", "Mais de 2 h" }
            }
            select {
                value: "{input.species}",
                onchange: move |event| {
                    filter.write().species = event.value();
                    filter_spots(state);
                },
                option { value: ANY_OPTION_VALUE, "Todos os peixes" }
                for fish in species {
                    option { value: "{fish}", "{fish}" }
                }
            }
            input {
                r#type: "number",
                placeholder: "Preço máximo",
                value: "{input.max_price}",
                oninput: move |event| {
                    filter.write().max_price = event.value();
                    filter_spots(state);
                },
            }
            select {
                value: "{reservation}",
                onchange: move |event| {
                    filter.write().reservation = event.value();
                    filter_spots(state);
                },
                option { value: ANY_OPTION_VALUE, "Reserva: tanto faz" }
                option { value: Reservation::Yes.label(), "Aceita reserva" }
                option { value: Reservation::No.label(), "Não aceita reserva" }
            }
        }
    }
}

#[component]
fn SpotRow(spot: Spot, number: usize) -> Element {
    let state = use_context::<AppState>();
    let services = use_context::<Services>();
    let mut form = state.form;
    let spot_for_details = spot.clone();
    let spot_for_edit = spot.clone();
    let spot_for_delete = spot.clone();
    let services_for_details = services.clone();
    let name = spot.display_name().to_string();
    let city = text_or_na(&spot.city).to_string();
    let drive_time = number_or_na(spot.drive_time, " min");
    let distance = number_or_na(spot.distance, " km");
    let price = price_or_na(spot.average_price);
    let reservation = spot.reservation.map_or("N/A", |r| r.label());

    rsx! {
        tr {
            td { style: CELL_STYLE, "{number}" }
            td { style: CELL_STYLE, "{name}" }
            td { style: CELL_STYLE, "{city}" }
            td { style: CELL_STYLE, "{drive_time}" }
            td { style: CELL_STYLE, "{distance}" }
            td { style: CELL_STYLE, "{price}" }
            td { style: CELL_STYLE, "{reservation}" }
            td { style: CELL_STYLE,
                button {
                    onclick: move |_| show_spot_details(state, &services_for_details, spot_for_details.clone()),
                    "Detalhes"
                }
                button {
                    onclick: move |_| form.set(FormState::Spot(spot_for_edit.to_row())),
                    "Editar"
                }
                button {
                    onclick: move |_| delete_spot(state, &services, &spot_for_delete),
                    "Excluir"
                }
            }
        }
    }
}

#[component]
fn SpotDetails() -> Element {
    let state = use_context::<AppState>();
    let mut selected_spot = state.selected_spot;
    let mut form = state.form;
    let Some(spot) = selected_spot.cloned() else {
        return rsx! {};
    };
    let visits = state.selected_visits.cloned();
    let spot_for_visit = spot.clone();
    let name = spot.display_name().to_string();
    let city = text_or_na(&spot.city).to_string();
    let address = text_or_na(&spot.address).to_string();
    let species = text_or_na(&spot.species).to_string();
    let route_url = spot
        .coordinates()
        .map(|(lat, lng)| waze_route_url(lat, lng));

    rsx! {
        div { style: "border: 1px solid #bbb; padding: 8px; margin-top: 12px;",
            h3 { "{name}" }
            p { "Cidade: {city}" }
            p { "Endereço: {address}" }
            p { "Peixes: {species}" }
            if let Some(url) = route_url {
                p {
                    a { href: "{url}", target: "_blank", "Abrir rota no Waze" }
                }
            }
            div { style: "display: flex; gap: 8px;",
                button {
                    onclick: move |_| form.set(FormState::Visit(visit_draft(&spot_for_visit))),
                    "Registrar visita"
                }
                button {
                    onclick: move |_| selected_spot.set(None),
                    "Fechar"
                }
            }
            h4 { "Visitas" }
            if visits.is_empty() {
                p { "Nenhuma visita registrada." }
            }
            for visit in visits {
                VisitEntry { visit, show_spot: false }
            }
        }
    }
}

#[component]
fn VisitEntry(visit: Visit, show_spot: bool) -> Element {
    let date = visit.display_date();
    let spot_name = text_or_na(&visit.spot_name).to_string();
    let catch = text_or_na(&visit.catch_notes).to_string();
    let notes = visit
        .observations
        .clone()
        .unwrap_or_else(|| "Sem observações.".to_string());

    rsx! {
        div { style: "border-bottom: 1px solid #ddd; padding: 4px 0;",
            p { style: "margin: 0; color: #666; font-size: 12px;", "{date}" }
            if show_spot {
                p { style: "margin: 0; font-weight: bold;", "{spot_name}" }
            } else {
                p { style: "margin: 0;", "Peixes: {catch}" }
            }
            p { style: "margin: 0; font-size: 12px;", "{notes}" }
        }
    }
}

#[component]
fn MarkerList() -> Element {
    let state = use_context::<AppState>();
    let markers = state.markers.cloned();

    rsx! {
        div {
            h4 { "No mapa ({markers.len()})" }
            if markers.is_empty() {
                p { "Nenhum pesqueiro com coordenadas." }
            }
            ul { style: "padding-left: 16px;",
                for marker in markers {
                    li { key: "{marker.id}",
                        "{marker.name} "
                        if !marker.city.is_empty() {
                            span { style: "color: #666;", "({marker.city}) " }
                        }
                        a { href: "{marker.route_url}", target: "_blank", "Rota" }
                    }
                }
            }
        }
    }
}

#[component]
fn Timeline() -> Element {
    let state = use_context::<AppState>();
    let visits = state.timeline.cloned();

    rsx! {
        div {
            h4 { "Últimas visitas" }
            if visits.is_empty() {
                p { "Nenhuma visita registrada." }
            }
            for visit in visits {
                VisitEntry { visit, show_spot: true }
            }
        }
    }
}

#[component]
fn WishlistPanel() -> Element {
    let state = use_context::<AppState>();
    let mut form = state.form;
    let mut filter = state.wishlist_filter;
    let input = filter.cloned();
    let categories = state.categories.cloned();
    let page = state.wishlist_page.cloned();
    let meta = *state.wishlist_meta.read();
    let load = state.wishlist_load.cloned();
    let sort = state.wishlist_view.read().sort_state();
    let headers: Vec<(WishlistSortKey, String)> = WishlistSortKey::ALL
        .into_iter()
        .map(|key| (key, format!("{}{}", key.header(), sort.arrow_for(key))))
        .collect();
    let total = meta.total_items;
    let first_row = meta.first_row_number();
    let colspan = (WishlistSortKey::ALL.len() + 2).to_string();
    let empty = empty_message(&load, "Nenhum item na wishlist.");

    rsx! {
        div {
            div { style: "display: flex; gap: 8px; flex-wrap: wrap; align-items: center;",
                input {
                    placeholder: "Item ou categoria",
                    value: "{input.text}",
                    oninput: move |event| {
                        filter.write().text = event.value();
                        filter_wishlist(state);
                    },
                }
                select {
                    value: "{input.category}",
                    onchange: move |event| {
                        filter.write().category = event.value();
                        filter_wishlist(state);
                    },
                    option { value: ANY_OPTION_VALUE, "Todas as categorias" }
                    for category in categories {
                        option { value: "{category}", "{category}" }
                    }
                }
                select {
                    value: "{input.priority}",
                    onchange: move |event| {
                        filter.write().priority = event.value();
                        filter_wishlist(state);
                    },
                    option { value: ANY_OPTION_VALUE, "Qualquer prioridade" }
                    for priority in Priority::ALL {
                        option { value: priority.label(), "{priority.label()}" }
                    }
                }
                select {
                    value: "{input.status}",
                    onchange: move |event| {
                        filter.write().status = event.value();
                        filter_wishlist(state);
                    },
                    option { value: ANY_OPTION_VALUE, "Qualquer status" }
                    for status in WishlistStatus::ALL {
                        option { value: status.label(), "{status.label()}" }
                    }
                }
                input {
                    r#type: "number",
                    placeholder: "Preço máximo",
                    value: "{input.max_price}",
                    oninput: move |event| {
                        filter.write().max_price = event.value();
                        filter_wishlist(state);
                    },
                }
            }
            div { style: "display: flex; gap: 12px; align-items: center; margin: 8px 0;",
                span { "{total} item(ns)" }
                button {
                    onclick: move |_| form.set(FormState::Wishlist(SheetRow::new())),
                    "Novo item"
                }
            }
            table { style: "border-collapse: collapse; width: 100%; border: 1px solid #bbb;",
                thead {
                    tr {
                        th { style: "{CELL_STYLE} background: #f2f2f2;", "#" }
                        for (key, label) in headers {
                            th {
                                style: HEADER_STYLE,
                                onclick: move |_| sort_wishlist(state, key),
                                "{label}"
                            }
                        }
                        th { style: "{CELL_STYLE} background: #f2f2f2;", "Ações" }
                    }
                }
                tbody {
                    if page.is_empty() {
                        tr {
                            td { style: CELL_STYLE, colspan: "{colspan}", "{empty}" }
                        }
                    } else {
                        for (idx, item) in page.into_iter().enumerate() {
                            WishlistRow { key: "{item.id}-{idx}", item: item.clone(), number: first_row + idx }
                        }
                    }
                }
            }
            Pager {
                meta,
                on_page: move |number| page_wishlist(state, number),
            }
        }
    }
}

#[component]
fn WishlistRow(item: WishlistItem, number: usize) -> Element {
    let state = use_context::<AppState>();
    let services = use_context::<Services>();
    let mut form = state.form;
    let item_for_edit = item.clone();
    let item_for_delete = item.clone();
    let name = item.display_name().to_string();
    let link = item.purchase_link.clone();
    let category = text_or_na(&item.category).to_string();
    let price = item.display_price();
    let priority = item.priority.map_or("N/A", |p| p.label());
    let status = text_or_na(&item.status_label).to_string();
    let status_style = status_cell_style(item.status);

    rsx! {
        tr {
            td { style: CELL_STYLE, "{number}" }
            td { style: CELL_STYLE,
                "{name}"
                if let Some(link) = link {
                    " "
                    a { href: "{link}", target: "_blank", "(link)" }
                }
            }
            td { style: CELL_STYLE, "{category}" }
            td { style: CELL_STYLE, "{price}" }
            td { style: CELL_STYLE, "{priority}" }
            td { style: "{status_style}", "{status}" }
            td { style: CELL_STYLE,
                button {
                    onclick: move |_| form.set(FormState::Wishlist(item_for_edit.to_row())),
                    "Editar"
                }
                button {
                    onclick: move |_| delete_wishlist_item(state, &services, &item_for_delete),
                    "Excluir"
                }
            }
        }
    }
}

#[component]
fn Pager(meta: PageMeta, on_page: EventHandler<usize>) -> Element {
    let controls = meta.controls();
    if controls.is_empty() {
        return rsx! {};
    }

    rsx! {
        div { style: "display: flex; gap: 6px; margin: 8px 0;",
            for control in controls {
                {match control {
                    PageControl::Previous { target, enabled } => rsx! {
                        button { disabled: !enabled, onclick: move |_| on_page.call(target), "Anterior" }
                    },
                    PageControl::Page { number, current } => {
                        let weight = if current { "font-weight: bold;" } else { "" };
                        rsx! {
                            button {
                                disabled: current,
                                style: weight,
                                onclick: move |_| on_page.call(number),
                                "{number}"
                            }
                        }
                    }
                    PageControl::Next { target, enabled } => rsx! {
                        button { disabled: !enabled, onclick: move |_| on_page.call(target), "Próximo" }
                    },
                }}
            }
        }
    }
}

#[component]
fn FormOverlay() -> Element {
    let state = use_context::<AppState>();
    let services = use_context::<Services>();
    let form = state.form.cloned();
    let Some(draft) = form.draft().cloned() else {
        return rsx! {};
    };
    let busy = *state.busy.read();

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.4); display: flex; align-items: center; justify-content: center;",
            div { style: "background: white; padding: 16px; min-width: 420px; max-height: 90vh; overflow-y: auto;",
                h3 { "{form.title()}" }
                for column in form.columns().iter().copied() {
                    FormField { key: "{column}", column, value: cell_text(&draft, column).unwrap_or_default() }
                }
                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    button {
                        disabled: busy,
                        onclick: move |_| submit_form(state, &services),
                        "Salvar"
                    }
                    button {
                        disabled: busy,
                        onclick: move |_| state.close_form(),
                        "Cancelar"
                    }
                }
            }
        }
    }
}

#[component]
fn FormField(column: &'static str, value: String) -> Element {
    let state = use_context::<AppState>();
    let mut form = state.form;
    let mut set_value = move |text: String| {
        if let Some(draft) = form.write().draft_mut() {
            draft.insert(column.to_string(), Value::String(text));
        }
    };

    let control = match column {
        COL_RESERVATION => rsx! {
            select {
                value: "{value}",
                onchange: move |event| set_value(event.value()),
                option { value: ANY_OPTION_VALUE, "" }
                option { value: Reservation::Yes.label(), "{Reservation::Yes.label()}" }
                option { value: Reservation::No.label(), "{Reservation::No.label()}" }
            }
        },
        COL_ITEM_PRIORITY => rsx! {
            select {
                value: "{value}",
                onchange: move |event| set_value(event.value()),
                option { value: ANY_OPTION_VALUE, "" }
                for priority in Priority::ALL {
                    option { value: priority.label(), "{priority.label()}" }
                }
            }
        },
        COL_ITEM_STATUS => rsx! {
            select {
                value: "{value}",
                onchange: move |event| set_value(event.value()),
                option { value: ANY_OPTION_VALUE, "" }
                for status in WishlistStatus::ALL {
                    option { value: status.label(), "{status.label()}" }
                }
            }
        },
        COL_VISIT_NOTES | COL_ITEM_NOTES | COL_ITEM_SPECS => rsx! {
            textarea {
                value: "{value}",
                oninput: move |event| set_value(event.value()),
            }
        },
        _ => rsx! {
            input {
                r#type: input_type(column),
                value: "{value}",
                oninput: move |event| set_value(event.value()),
            }
        },
    };

    rsx! {
        label { style: "display: flex; flex-direction: column; margin: 6px 0;",
            span { "{field_label(column)}" }
            {control}
        }
    }
}

fn field_label(column: &str) -> &str {
    match column {
        COL_NAME => "Nome",
        COL_CITY => "Cidade/UF",
        COL_ADDRESS => "Endereço completo",
        COL_LATITUDE => "Latitude",
        COL_LONGITUDE => "Longitude",
        COL_DRIVE_TIME => "Tempo sem trânsito (min)",
        COL_DISTANCE => "Distância (km)",
        COL_AVERAGE_PRICE => "Preço médio (R$)",
        COL_RESERVATION => "Aceita reserva",
        COL_SPECIES => "Peixes (separados por vírgula)",
        COL_VISIT_DATE => "Data da visita",
        COL_VISIT_CATCH => "Peixes capturados",
        COL_VISIT_NOTES => "Observações",
        COL_ITEM_NAME => "Item",
        COL_ITEM_CATEGORY => "Categoria",
        COL_ITEM_FISHING_TYPE => "Tipo de pesca",
        COL_ITEM_BRAND_MODEL => "Marca/Modelo",
        COL_ITEM_SPECS => "Especificações",
        COL_ITEM_PRICE => "Preço estimado (R$)",
        COL_ITEM_LINK => "Link de compra",
        COL_ITEM_SPOT_ID => "Pesqueiro associado (ID)",
        other => other,
    }
}

fn input_type(column: &str) -> &'static str {
    match column {
        COL_VISIT_DATE => "date",
        COL_ITEM_LINK => "url",
        _ => "text",
    }
}

/// Finished items (bought or sold) are greyed out.
fn status_cell_style(status: Option<WishlistStatus>) -> String {
    if status.is_some_and(WishlistStatus::is_done) {
        format!("{CELL_STYLE} color: #888;")
    } else {
        CELL_STYLE.to_string()
    }
}

fn text_or_na(value: &Option<String>) -> &str {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .unwrap_or("N/A")
}

fn number_or_na(value: Option<f64>, unit: &str) -> String {
    value
        .map(|number| format!("{}{unit}", format_number(number)))
        .unwrap_or_else(|| "N/A".to_string())
}

fn price_or_na(value: Option<f64>) -> String {
    value
        .map(|price| format!("R$ {}", format!("{price:.2}").replace('.', ",")))
        .unwrap_or_else(|| "N/A".to_string())
}

fn empty_message(load: &LoadStatus, empty: &str) -> String {
    match load {
        LoadStatus::NotLoaded => "Carregando...".to_string(),
        LoadStatus::Loaded { .. } => empty.to_string(),
        LoadStatus::Failed { reason } => format!("Não foi possível carregar os dados: {reason}"),
    }
}

fn load_message(what: &str, status: &LoadStatus) -> String {
    match status {
        LoadStatus::NotLoaded => format!("{what}: aguardando"),
        LoadStatus::Loaded { count } => format!("{count} {what} carregado(s)"),
        LoadStatus::Failed { reason } => format!("Falha ao carregar {what}: {reason}"),
    }
}

fn visit_draft(spot: &Spot) -> SheetRow {
    let mut draft = SheetRow::new();
    draft.insert(COL_VISIT_SPOT_ID.to_string(), Value::String(spot.id.0.clone()));
    draft.insert(
        COL_VISIT_SPOT_NAME.to_string(),
        Value::String(spot.display_name().to_string()),
    );
    draft.insert(
        COL_VISIT_DATE.to_string(),
        Value::String(Local::now().date_naive().format("%Y-%m-%d").to_string()),
    );
    draft
}

fn alert(level: MessageLevel, title: &str, text: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(title)
        .set_description(text)
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn confirm(title: &str, text: &str) -> bool {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title(title)
        .set_description(text)
        .set_buttons(MessageButtons::YesNo)
        .show()
        == MessageDialogResult::Yes
}

fn load_spots(state: AppState, services: &Services) {
    state.set_busy(true);
    let mut view = (*state.spot_view.peek()).clone();
    let mut rendered = RenderedView::<Spot>::default();
    let spots = &services.spots;
    let status = run_blocking(|| spots.load(&mut view, &mut rendered));
    state.commit_spots(view, rendered);
    state.set_status(load_message("pesqueiros", &status));
    state.set_busy(false);
}

fn load_wishlist(state: AppState, services: &Services) {
    state.set_busy(true);
    let mut view = (*state.wishlist_view.peek()).clone();
    let mut rendered = RenderedView::<WishlistItem>::default();
    let wishlist = &services.wishlist;
    let status = run_blocking(|| wishlist.load(&mut view, &mut rendered));
    state.commit_wishlist(view, rendered);
    if status.is_failed() {
        state.set_status(load_message("itens da wishlist", &status));
    }
    state.set_busy(false);
}

fn load_timeline(state: AppState, services: &Services) {
    let visits = &services.visits;
    match run_blocking(|| visits.timeline()) {
        Ok(latest) => {
            let mut timeline = state.timeline;
            timeline.set(latest);
        }
        Err(err) => state.set_status(format!("Falha ao carregar visitas: {err}")),
    }
}

fn filter_spots(state: AppState) {
    let criteria = SpotFilter::from_input(&state.spot_filter.peek());
    let mut rendered = RenderedView::<Spot>::default();
    let mut spot_view = state.spot_view;
    spot_view.write().apply_filter(criteria, &mut rendered);
    state.show_spots(rendered);
}

fn sort_spots(state: AppState, key: SpotSortKey) {
    let mut rendered = RenderedView::<Spot>::default();
    let mut spot_view = state.spot_view;
    spot_view.write().request_sort(key, &mut rendered);
    state.show_spots(rendered);
}

fn page_spots(state: AppState, number: usize) {
    let mut rendered = RenderedView::<Spot>::default();
    let mut spot_view = state.spot_view;
    spot_view.write().request_page(number, &mut rendered);
    state.show_spots(rendered);
}

fn filter_wishlist(state: AppState) {
    let criteria = WishlistFilter::from_input(&state.wishlist_filter.peek());
    let mut rendered = RenderedView::<WishlistItem>::default();
    let mut wishlist_view = state.wishlist_view;
    wishlist_view.write().apply_filter(criteria, &mut rendered);
    state.show_wishlist(rendered);
}

fn sort_wishlist(state: AppState, key: WishlistSortKey) {
    let mut rendered = RenderedView::<WishlistItem>::default();
    let mut wishlist_view = state.wishlist_view;
    wishlist_view.write().request_sort(key, &mut rendered);
    state.show_wishlist(rendered);
}

fn page_wishlist(state: AppState, number: usize) {
    let mut rendered = RenderedView::<WishlistItem>::default();
    let mut wishlist_view = state.wishlist_view;
    wishlist_view.write().request_page(number, &mut rendered);
    state.show_wishlist(rendered);
}

fn show_spot_details(state: AppState, services: &Services, spot: Spot) {
    let mut selected_spot = state.selected_spot;
    let mut selected_visits = state.selected_visits;
    let visits = &services.visits;
    let id = spot.id.clone();
    selected_spot.set(Some(spot));

    state.set_busy(true);
    match run_blocking(|| visits.visits_for(&id)) {
        Ok(found) => selected_visits.set(recent_visits(&found, found.len())),
        Err(err) => {
            selected_visits.set(Vec::new());
            state.set_status(format!("Falha ao carregar visitas: {err}"));
        }
    }
    state.set_busy(false);
}

fn submit_form(state: AppState, services: &Services) {
    let form = (*state.form.peek()).clone();
    state.set_busy(true);
    match form {
        FormState::Closed => {}
        FormState::Spot(draft) => {
            let mut view = (*state.spot_view.peek()).clone();
            let mut rendered = RenderedView::<Spot>::default();
            let spots = &services.spots;
            match run_blocking(|| spots.save(&mut view, draft, &mut rendered)) {
                Ok(_) => {
                    state.commit_spots(view, rendered);
                    state.close_form();
                    alert(MessageLevel::Info, "Pesqueiros", "Pesqueiro salvo com sucesso!");
                }
                Err(err) => alert(
                    MessageLevel::Error,
                    "Pesqueiros",
                    &format!("Erro ao salvar pesqueiro: {err}"),
                ),
            }
        }
        FormState::Visit(draft) => {
            let visits = &services.visits;
            match run_blocking(|| visits.record_visit(draft)) {
                Ok(_) => {
                    state.close_form();
                    let selected = (*state.selected_spot.peek()).clone();
                    if let Some(spot) = selected {
                        show_spot_details(state, services, spot);
                    }
                    load_timeline(state, services);
                    alert(MessageLevel::Info, "Visitas", "Visita registrada com sucesso!");
                }
                Err(err) => alert(
                    MessageLevel::Error,
                    "Visitas",
                    &format!("Erro ao registrar visita: {err}"),
                ),
            }
        }
        FormState::Wishlist(draft) => {
            let mut view = (*state.wishlist_view.peek()).clone();
            let mut rendered = RenderedView::<WishlistItem>::default();
            let wishlist = &services.wishlist;
            match run_blocking(|| wishlist.save(&mut view, draft, &mut rendered)) {
                Ok(_) => {
                    state.commit_wishlist(view, rendered);
                    state.close_form();
                    alert(MessageLevel::Info, "Wishlist", "Item da wishlist salvo com sucesso!");
                }
                Err(err) => alert(
                    MessageLevel::Error,
                    "Wishlist",
                    &format!("Erro ao salvar item da wishlist: {err}"),
                ),
            }
        }
    }
    state.set_busy(false);
}

fn delete_spot(state: AppState, services: &Services, spot: &Spot) {
    let question = format!("Tem certeza que deseja excluir \"{}\"?", spot.display_name());
    if !confirm("Excluir pesqueiro", &question) {
        return;
    }

    state.set_busy(true);
    let mut view = (*state.spot_view.peek()).clone();
    let mut rendered = RenderedView::<Spot>::default();
    let spots = &services.spots;
    match run_blocking(|| spots.delete(&mut view, &spot.id, &mut rendered)) {
        Ok(_) => {
            state.commit_spots(view, rendered);
            let mut selected_spot = state.selected_spot;
            if selected_spot.peek().as_ref().is_some_and(|s| s.id == spot.id) {
                selected_spot.set(None);
            }
            state.set_status("Pesqueiro excluído");
        }
        Err(err) => alert(
            MessageLevel::Error,
            "Pesqueiros",
            &format!("Erro ao excluir pesqueiro: {err}"),
        ),
    }
    state.set_busy(false);
}

fn delete_wishlist_item(state: AppState, services: &Services, item: &WishlistItem) {
    let question = format!("Tem certeza que deseja excluir \"{}\"?", item.display_name());
    if !confirm("Excluir item", &question) {
        return;
    }

    state.set_busy(true);
    let mut view = (*state.wishlist_view.peek()).clone();
    let mut rendered = RenderedView::<WishlistItem>::default();
    let wishlist = &services.wishlist;
    match run_blocking(|| wishlist.delete(&mut view, &item.id, &mut rendered)) {
        Ok(_) => {
            state.commit_wishlist(view, rendered);
            state.set_status("Item excluído");
        }
        Err(err) => alert(
            MessageLevel::Error,
            "Wishlist",
            &format!("Erro ao excluir item: {err}"),
        ),
    }
    state.set_busy(false);
}
