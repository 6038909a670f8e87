// src/gui/admin.rs
use eframe::egui::{self, RichText};

use crate::gui::app::App;

pub fn draw(ui: &mut egui::Ui, app: &mut App) {
    ui.label("Clave de administración");
    let resp = ui.add(
        egui::TextEdit::singleline(&mut app.state.gui.admin_pass)
            .password(true)
            .desired_width(200.0),
    );
    let entered = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

    ui.add_space(6.0);
    let button = ui.add_enabled(!app.refreshing, egui::Button::new("Forzar actualización"));
    if button.clicked() || (entered && !app.refreshing) {
        app.admin_refresh();
    }
    if let Some(msg) = &app.admin_message {
        ui.label(RichText::new(msg).small());
    }

    ui.separator();
    egui::Grid::new("admin_stats").num_columns(2).show(ui, |ui| {
        ui.label("Afiliados");
        ui.label(app.roster.member_count().to_string());
        ui.end_row();
        ui.label("Familiares");
        ui.label(app.roster.dependent_count().to_string());
        ui.end_row();
    });

    for issue in app.roster.issues() {
        ui.colored_label(ui.visuals().warn_fg_color, issue.to_string());
    }
    if let Some(err) = &app.last_error {
        ui.add_space(4.0);
        ui.label(RichText::new("Último error").strong());
        ui.colored_label(ui.visuals().error_fg_color, err);
    }
}
