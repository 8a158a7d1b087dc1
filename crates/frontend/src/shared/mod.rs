pub mod api;
pub mod api_utils;
pub mod components;
pub mod config;
pub mod data_table;
pub mod excel_importer;
pub mod export;
pub mod form;
pub mod hooks;
pub mod icons;
pub mod notify;
pub mod page_frame;
