pub mod api;
pub mod core;
pub mod feed;
pub mod ffi;
pub mod logging;
pub mod storage;
pub mod sync;
