// src/gui/card.rs
//
// Login view and the themed member card.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, Stroke};

use crate::{gui::app::App, roster::RoleCategory};

use super::family;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub accent: Color32,
    pub fill: Color32,
    pub on_accent: Color32,
}

/// Card palette per role: amber leadership, emerald delegates, blue otherwise.
pub fn theme(category: RoleCategory) -> Theme {
    match category {
        RoleCategory::Leadership => Theme {
            accent: Color32::from_rgb(245, 158, 11),
            fill: Color32::from_rgb(69, 45, 8),
            on_accent: Color32::from_rgb(28, 25, 23),
        },
        RoleCategory::Delegate => Theme {
            accent: Color32::from_rgb(16, 185, 129),
            fill: Color32::from_rgb(6, 55, 42),
            on_accent: Color32::WHITE,
        },
        RoleCategory::Ordinary => Theme {
            accent: Color32::from_rgb(37, 99, 235),
            fill: Color32::from_rgb(17, 34, 74),
            on_accent: Color32::WHITE,
        },
    }
}

pub fn draw_login(ui: &mut egui::Ui, app: &mut App) {
    ui.vertical_centered(|ui| {
        ui.add_space(48.0);
        ui.label(RichText::new("Credencial digital").size(22.0).strong());
        ui.label(RichText::new("Sindicato de Trabajadores").weak());
        ui.add_space(24.0);

        let edit = egui::TextEdit::singleline(&mut app.state.gui.dni_input)
            .hint_text("DNI (sólo números)")
            .desired_width(220.0);
        let resp = ui.add(edit);
        if resp.changed() {
            app.state.gui.dni_input.retain(|c| c.is_ascii_digit());
        }
        let entered = resp.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        ui.add_space(8.0);
        if ui.button("Ingresar").clicked() || entered {
            app.submit();
        }

        if let Some(msg) = app.message {
            ui.add_space(12.0);
            ui.colored_label(ui.visuals().error_fg_color, msg);
        }
    });
}

pub fn draw_card(ui: &mut egui::Ui, app: &mut App) {
    let Some(card) = app.card.clone() else { return };
    let th = theme(card.category);
    let m = &card.member;

    egui::ScrollArea::vertical().show(ui, |ui| {
        egui::Frame::new()
            .fill(th.fill)
            .stroke(Stroke::new(2.0, th.accent))
            .corner_radius(CornerRadius::same(14))
            .inner_margin(Margin::same(18))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new("STVP").strong().color(th.accent));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        egui::Frame::new()
                            .fill(th.accent)
                            .corner_radius(CornerRadius::same(8))
                            .inner_margin(Margin::symmetric(8, 2))
                            .show(ui, |ui| {
                                ui.label(RichText::new(&card.badge).small().strong().color(th.on_accent));
                            });
                    });
                });

                ui.add_space(10.0);
                ui.label(RichText::new(&m.full_name).size(22.0).strong().color(Color32::WHITE));
                if !card.title.is_empty() {
                    ui.label(RichText::new(&card.title).color(th.accent));
                }
                ui.label(RichText::new(card.category.label()).small().weak());

                ui.add_space(12.0);
                egui::Grid::new("card_fields").num_columns(2).spacing([16.0, 4.0]).show(ui, |ui| {
                    ui.label(RichText::new("DNI").weak());
                    ui.label(RichText::new(&m.id).monospace().color(Color32::WHITE));
                    ui.end_row();
                    ui.label(RichText::new("Vence").weak());
                    ui.label(RichText::new(&card.expires).color(Color32::WHITE));
                    ui.end_row();
                    for (label, value) in &m.extra {
                        ui.label(RichText::new(label).weak());
                        ui.label(value);
                        ui.end_row();
                    }
                });

                if let Some(url) = &m.photo_url {
                    ui.add_space(6.0);
                    ui.hyperlink_to("Ver foto", url);
                }
            });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui.button("Exportar credencial").clicked() {
                app.export_card();
            }
            if ui.button("Salir").clicked() {
                app.logout();
            }
        });

        ui.add_space(14.0);
        family::draw(ui, &card.dependents, th.accent);
    });
}
