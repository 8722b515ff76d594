//! Quire - a terminal client for a Supabase-backed blog
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod app;
pub mod auth;
pub mod backend;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod terminal;
pub mod traits;
pub mod ui;
pub mod view_state;
pub mod widgets;
