pub mod config;
pub mod domain;
pub mod infra;
pub mod platform;
pub mod usecase;

#[cfg(feature = "desktop")]
pub mod app;
#[cfg(feature = "desktop")]
pub mod ui;

#[cfg(test)]
mod tests;
