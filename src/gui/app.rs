// src/gui/app.rs
use std::{
    error::Error,
    path::Path,
    sync::{mpsc, Arc, Mutex},
    thread,
    time::Instant,
};

use eframe::egui::{self, RichText};

use crate::{
    config::{consts::DEFAULT_SETTINGS_FILE, settings, state::AppState},
    export,
    roster::{Card, Roster},
    source::RemoteSource,
    store::RosterCache,
};

use super::{admin, card, progress::GuiProgress};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    let mut state = AppState::default();
    state.options = settings::load(Path::new(DEFAULT_SETTINGS_FILE));

    eframe::run_native(
        "STVP Digital",
        options,
        Box::new(|cc| Ok(Box::new(App::new(state, cc.egui_ctx.clone())))),
    )?;
    Ok(())
}

type SharedCache = Arc<Mutex<RosterCache<RemoteSource>>>;

/// What the refresh thread hands back to the UI thread.
struct Published {
    roster: Arc<Roster>,
    error: Option<String>,
}

pub struct App {
    pub state: AppState,
    ctx: egui::Context,

    cache: Option<SharedCache>,
    pub roster: Arc<Roster>,
    published_at: Option<Instant>,
    pub last_error: Option<String>,

    // first fetch finished (ok or not)
    pub loaded: bool,
    pub refreshing: bool,
    refresh_rx: Option<mpsc::Receiver<Published>>,

    pub card: Option<Card>,
    /// Login-screen message (lookup misses).
    pub message: Option<&'static str>,
    /// Admin panel feedback.
    pub admin_message: Option<String>,

    // status/progress (refresh thread writes here)
    pub status: Arc<Mutex<String>>,
}

impl App {
    pub fn new(state: AppState, ctx: egui::Context) -> Self {
        let (cache, last_error) = match RemoteSource::from_options(&state.options.sources) {
            Ok(src) => (Some(Arc::new(Mutex::new(RosterCache::new(src)))), None),
            Err(e) => {
                loge!("Init: bad source configuration: {e}");
                (None, Some(e.to_string()))
            }
        };
        logf!("Init: members={} family={}", state.options.sources.members, state.options.sources.family);

        let mut app = Self {
            state,
            ctx,
            loaded: cache.is_none(),
            cache,
            roster: Arc::new(Roster::empty()),
            published_at: None,
            last_error,
            refreshing: false,
            refresh_rx: None,
            card: None,
            message: None,
            admin_message: None,
            status: Arc::new(Mutex::new(s!("Cargando padrón…"))),
        };
        app.spawn_refresh(false);
        app
    }

    pub fn status<T: Into<String>>(&self, msg: T) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }

    pub fn status_text(&self) -> String {
        self.status.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Run `get_or_refresh` on a worker thread. `force` invalidates first.
    pub fn spawn_refresh(&mut self, force: bool) {
        if self.refreshing {
            return;
        }
        let Some(cache) = self.cache.clone() else { return };

        let (tx, rx) = mpsc::channel();
        let status = Arc::clone(&self.status);
        let ctx = self.ctx.clone();
        let ttl = self.state.options.cache.ttl();

        thread::spawn(move || {
            let mut progress = GuiProgress::new(status);
            let mut cache = match cache.lock() {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
            if force {
                cache.invalidate();
            }
            let roster = cache.get_or_refresh(Instant::now(), ttl, Some(&mut progress));
            let error = cache.last_error().map(str::to_string);
            let _ = tx.send(Published { roster, error });
            ctx.request_repaint();
        });

        self.refreshing = true;
        self.refresh_rx = Some(rx);
    }

    /// Swap in a snapshot the worker finished, if any.
    fn poll_refresh(&mut self) {
        let Some(rx) = &self.refresh_rx else { return };
        let published = match rx.try_recv() {
            Ok(p) => p,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                loge!("Refresh: worker ended without a result");
                self.refresh_rx = None;
                self.refreshing = false;
                self.loaded = true;
                return;
            }
        };
        self.refresh_rx = None;
        self.refreshing = false;
        self.loaded = true;
        self.published_at = Some(Instant::now());
        self.last_error = published.error;
        self.roster = published.roster;

        // A shown card follows the new snapshot.
        if let Some(id) = self.card.as_ref().map(|c| c.member.id.clone()) {
            self.card = self.roster.card(&id).ok();
        }
    }

    fn refresh_if_expired(&mut self) {
        let ttl = self.state.options.cache.ttl();
        if self.published_at.is_some_and(|t| t.elapsed() >= ttl) {
            self.spawn_refresh(false);
        }
    }

    pub fn submit(&mut self) {
        self.refresh_if_expired();
        match self.roster.card(&self.state.gui.dni_input) {
            Ok(card) => {
                self.card = Some(card);
                self.message = None;
            }
            Err(miss) => {
                self.card = None;
                self.message = Some(miss.message());
            }
        }
    }

    pub fn logout(&mut self) {
        self.card = None;
        self.message = None;
        self.state.gui.dni_input.clear();
    }

    /// Plain key compare, then invalidate + background refresh.
    pub fn admin_refresh(&mut self) {
        if self.state.options.admin.accepts(&self.state.gui.admin_pass) {
            logf!("Admin: refresh accepted");
            self.state.gui.admin_pass.clear();
            self.spawn_refresh(true);
            self.admin_message = Some(s!("Actualización en curso…"));
        } else {
            logf!("Admin: refresh denied");
            self.admin_message = Some(s!("Clave incorrecta."));
        }
    }

    pub fn export_card(&mut self) {
        let Some(card) = &self.card else { return };
        match export::write_card(&self.state.options.export, &card.member, &card.dependents) {
            Ok(path) => self.status(format!("Credencial exportada: {}", path.display())),
            Err(e) => {
                loge!("Export: {e}");
                self.status(format!("Error al exportar: {e}"));
            }
        }
    }
}

fn draw_loading(ui: &mut egui::Ui, app: &App) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.spinner();
        ui.add_space(8.0);
        ui.label(RichText::new(app.status_text()).weak());
    });
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_refresh();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("STVP Digital");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("🔒").on_hover_text("Administración").clicked() {
                        self.state.gui.admin_open = !self.state.gui.admin_open;
                    }
                    if self.refreshing {
                        ui.spinner();
                    }
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(RichText::new(self.status_text()).small().weak());
        });

        if self.state.gui.admin_open {
            let mut open = true;
            egui::Window::new("Administración")
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| admin::draw(ui, self));
            self.state.gui.admin_open = open && self.state.gui.admin_open;
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if !self.loaded {
                draw_loading(ui, self);
            } else if self.card.is_some() {
                card::draw_card(ui, self);
            } else {
                card::draw_login(ui, self);
            }
        });
    }
}
