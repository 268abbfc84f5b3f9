//! 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 추후 GUI나 CRM 연동도 쉽게 한다.

pub mod app;
pub mod catalog;
pub mod config;
pub mod crm;
pub mod i18n;
pub mod report;
pub mod solar;
pub mod telemetry;
pub mod ui_cli;
