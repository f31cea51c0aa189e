pub mod api_utils;
pub mod components;
pub mod config;
pub mod crud;
pub mod export;
pub mod format;
pub mod http;
pub mod icons;
pub mod invoice;
pub mod lookup;
pub mod modal;
pub mod page_context;
pub mod page_frame;
pub mod page_standard;
pub mod paginator;
pub mod toast;
