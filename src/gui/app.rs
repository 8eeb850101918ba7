// src/gui/app.rs
use std::{error::Error, sync::Arc, time::Instant};

use chrono::Local;
use eframe::egui;

use crate::{
    dashboard::{Dashboard, Snapshot},
    store::Store,
};

use super::{
    loader::Loader,
    pages::{Page, PageCtx, PageKind, ViewState},
    router,
};

pub fn run(options: eframe::NativeOptions, store: Arc<dyn Store>) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "UVERworld Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(App::new(Dashboard::new(store), &cc.egui_ctx)))),
    )?;
    Ok(())
}

pub struct App {
    loader: Loader,
    // last delivered data; pages only ever read it
    snapshot: Snapshot,
    view: ViewState,
    current: usize,
    status: String,
    reload_requested: Option<bool>,
}

impl App {
    pub fn new(dashboard: Dashboard, ctx: &egui::Context) -> Self {
        let mut app = Self {
            loader: Loader::new(dashboard),
            snapshot: Snapshot::default(),
            view: ViewState::default(),
            current: router::index_of(PageKind::Sns),
            status: s!("Idle"),
            reload_requested: None,
        };
        app.start_load(ctx, false);
        app
    }

    /* ---------- tiny helpers ---------- */

    #[inline]
    pub fn current_index(&self) -> usize { self.current }

    #[inline]
    pub fn set_current_index(&mut self, idx: usize) { self.current = idx; }

    #[inline]
    pub fn current_page(&self) -> &'static dyn Page { router::all_pages()[self.current] }

    #[inline]
    pub fn status(&self) -> &str { &self.status }

    #[inline]
    pub fn is_loading(&self) -> bool { self.loader.is_loading() }

    fn start_load(&mut self, ctx: &egui::Context, fresh: bool) {
        if self.loader.is_loading() {
            return;
        }
        logf!("Load: begin (fresh={fresh})");
        self.status = s!("Loading…");
        let ctx = ctx.clone();
        self.loader.start(fresh, move || ctx.request_repaint());
    }

    /// Ask for new data; the next frame picks up the request.
    pub fn reload(&mut self, fresh: bool) {
        self.reload_requested = Some(fresh);
    }

    fn apply(&mut self, snap: Snapshot) {
        let failed: Vec<&str> = [
            ("sns", snap.sns.error.is_some()),
            ("videos", snap.videos.error.is_some()),
            ("schedule", snap.schedule.error.is_some()),
            ("surveys", snap.surveys.error.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, bad)| bad.then_some(name))
        .collect();

        self.status = if failed.is_empty() {
            format!("Loaded {}", Local::now().format("%H:%M:%S"))
        } else {
            format!("Loaded with errors: {}", failed.join(", "))
        };
        logf!("Load: done ({})", self.status);
        self.snapshot = snap;
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(snap) = self.loader.poll() {
            self.apply(snap);
        }
        if let Some(fresh) = self.reload_requested.take() {
            self.start_load(ctx, fresh);
        } else if self.loader.is_due(Instant::now()) {
            // cached tables have expired; read through the cache again
            self.start_load(ctx, false);
        }
        ctx.request_repaint_after(self.loader.ttl());

        egui::TopBottomPanel::top("tabs").show(ctx, |ui| {
            ui.add_space(4.0);
            crate::gui::components::tabs::draw(ui, self);
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let page = self.current_page();
            let mut pctx = PageCtx {
                snap: &self.snapshot,
                view: &mut self.view,
                today: Local::now().date_naive(),
            };
            page.draw(ui, &mut pctx);
        });
    }
}
