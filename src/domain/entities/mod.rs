pub mod sheet;
pub mod spot;
pub mod visit;
pub mod wishlist;
