// src/bin/gui.rs
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]
use std::sync::Arc;

use eframe::egui::ViewportBuilder;
use uver_sync::{config::AppConfig, core::HttpClient, gui, log, store::RestStore};

fn main() {
    log::init("info");

    let store = AppConfig::load(None)
        .and_then(|cfg| {
            let http = HttpClient::new()?;
            Ok(RestStore::new(&http, cfg.credentials.require_store()?))
        });
    let store = match store {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Cannot open the store: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default()
            .with_title("UVERworld Dashboard")
            .with_inner_size([1100.0, 720.0]),
        ..Default::default()
    };

    if let Err(e) = gui::run(options, store) {
        eprintln!("GUI failed: {}", e);
        std::process::exit(1);
    }
}
