pub mod collection_view;
pub mod spot_service;
pub mod store;
pub mod visit_service;
pub mod wishlist_service;
