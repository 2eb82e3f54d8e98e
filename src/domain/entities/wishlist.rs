use serde_json::Value;

use crate::domain::entities::sheet::{cell_non_blank, cell_number, cell_text, SheetRow};

pub const COL_ITEM_ID: &str = "ID";
pub const COL_ITEM_NAME: &str = "NomeItem";
pub const COL_ITEM_CATEGORY: &str = "Categoria";
pub const COL_ITEM_FISHING_TYPE: &str = "TipoPesca";
pub const COL_ITEM_BRAND_MODEL: &str = "MarcaModelo";
pub const COL_ITEM_SPECS: &str = "Especificacoes";
pub const COL_ITEM_PRICE: &str = "PrecoEstimado";
pub const COL_ITEM_LINK: &str = "LinkCompra";
pub const COL_ITEM_PRIORITY: &str = "Prioridade";
pub const COL_ITEM_STATUS: &str = "Status";
pub const COL_ITEM_NOTES: &str = "NotasPessoais";
pub const COL_ITEM_ADDED_AT: &str = "DataAdicionado";
pub const COL_ITEM_SPOT_ID: &str = "PesqueiroID";

pub const WISHLIST_FORM_COLUMNS: [&str; 11] = [
    COL_ITEM_NAME,
    COL_ITEM_CATEGORY,
    COL_ITEM_FISHING_TYPE,
    COL_ITEM_BRAND_MODEL,
    COL_ITEM_SPECS,
    COL_ITEM_PRICE,
    COL_ITEM_LINK,
    COL_ITEM_PRIORITY,
    COL_ITEM_STATUS,
    COL_ITEM_NOTES,
    COL_ITEM_SPOT_ID,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "alta" | "high" => Some(Priority::High),
            "média" | "media" | "medium" => Some(Priority::Medium),
            "baixa" | "low" => Some(Priority::Low),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Priority::High => "Alta",
            Priority::Medium => "Média",
            Priority::Low => "Baixa",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

/// Purchase lifecycle: researching, then planning, then an end state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WishlistStatus {
    Researching,
    Planning,
    Purchased,
    Sold,
}

impl WishlistStatus {
    pub const ALL: [WishlistStatus; 4] = [
        WishlistStatus::Researching,
        WishlistStatus::Planning,
        WishlistStatus::Purchased,
        WishlistStatus::Sold,
    ];

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "pesquisando" | "researching" => Some(WishlistStatus::Researching),
            "planejando" | "planning" => Some(WishlistStatus::Planning),
            "já comprei" | "ja comprei" | "comprado" | "ganhei" | "purchased" => {
                Some(WishlistStatus::Purchased)
            }
            "vendido" | "vendi" | "sold" => Some(WishlistStatus::Sold),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WishlistStatus::Researching => "Pesquisando",
            WishlistStatus::Planning => "Planejando",
            WishlistStatus::Purchased => "Já comprei",
            WishlistStatus::Sold => "Vendido",
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            WishlistStatus::Researching => 1,
            WishlistStatus::Planning => 2,
            WishlistStatus::Purchased => 3,
            WishlistStatus::Sold => 4,
        }
    }

    pub fn is_done(self) -> bool {
        matches!(self, WishlistStatus::Purchased | WishlistStatus::Sold)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WishlistItem {
    pub id: String,
    pub name: Option<String>,
    pub category: Option<String>,
    pub fishing_type: Option<String>,
    pub brand_model: Option<String>,
    pub specifications: Option<String>,
    pub estimated_price: Option<f64>,
    pub purchase_link: Option<String>,
    pub priority: Option<Priority>,
    /// Raw status label, kept because the sheet may hold labels we don't rank.
    pub status_label: Option<String>,
    pub status: Option<WishlistStatus>,
    pub notes: Option<String>,
    pub added_at: Option<String>,
    pub spot_id: Option<String>,
}

impl WishlistItem {
    pub fn from_row(row: &SheetRow) -> Self {
        let status_label = cell_non_blank(row, COL_ITEM_STATUS);
        Self {
            id: cell_text(row, COL_ITEM_ID).unwrap_or_default(),
            name: cell_non_blank(row, COL_ITEM_NAME),
            category: cell_non_blank(row, COL_ITEM_CATEGORY),
            fishing_type: cell_non_blank(row, COL_ITEM_FISHING_TYPE),
            brand_model: cell_non_blank(row, COL_ITEM_BRAND_MODEL),
            specifications: cell_non_blank(row, COL_ITEM_SPECS),
            estimated_price: cell_number(row, COL_ITEM_PRICE),
            purchase_link: cell_non_blank(row, COL_ITEM_LINK),
            priority: cell_text(row, COL_ITEM_PRIORITY)
                .as_deref()
                .and_then(Priority::parse),
            status: status_label.as_deref().and_then(WishlistStatus::parse),
            status_label,
            notes: cell_non_blank(row, COL_ITEM_NOTES),
            added_at: cell_non_blank(row, COL_ITEM_ADDED_AT),
            spot_id: cell_non_blank(row, COL_ITEM_SPOT_ID),
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Item Sem Nome")
    }

    /// Form draft for editing.
    pub fn to_row(&self) -> SheetRow {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let cells = [
            (COL_ITEM_ID, self.id.clone()),
            (COL_ITEM_NAME, text(&self.name)),
            (COL_ITEM_CATEGORY, text(&self.category)),
            (COL_ITEM_FISHING_TYPE, text(&self.fishing_type)),
            (COL_ITEM_BRAND_MODEL, text(&self.brand_model)),
            (COL_ITEM_SPECS, text(&self.specifications)),
            (
                COL_ITEM_PRICE,
                self.estimated_price
                    .map(|price| format!("{price:.2}"))
                    .unwrap_or_default(),
            ),
            (COL_ITEM_LINK, text(&self.purchase_link)),
            (
                COL_ITEM_PRIORITY,
                self.priority.map(|p| p.label().to_string()).unwrap_or_default(),
            ),
            (COL_ITEM_STATUS, text(&self.status_label)),
            (COL_ITEM_NOTES, text(&self.notes)),
            (COL_ITEM_SPOT_ID, text(&self.spot_id)),
        ];

        let mut row = SheetRow::new();
        for (column, value) in cells {
            row.insert(column.to_string(), Value::String(value));
        }
        row
    }

    /// `R$ 12,50`, or `N/A` without a price.
    pub fn display_price(&self) -> String {
        match self.estimated_price {
            Some(price) => format!("R$ {}", format!("{price:.2}").replace('.', ",")),
            None => "N/A".to_string(),
        }
    }
}
