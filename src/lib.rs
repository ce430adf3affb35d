pub mod api;
pub mod conf;
pub mod core;
pub mod registry;
pub mod table;

#[cfg(feature = "testutil")]
pub mod testutil;
