//! GeoDais 端末版
//!
//! 共通ライブラリのデータストア・地図ビューを端末から使う

pub mod api;
pub mod browse;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod error;
