// ============================================
// Core Module - Настройки и демо-приложение
// ============================================

pub mod app;
pub mod config;

pub use config::TileRendererConfig;
