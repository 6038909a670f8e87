// src/gui/family.rs
use eframe::egui::{self, Color32, RichText};
use egui_extras::{Column, TableBuilder};

use crate::roster::Dependent;

pub fn draw(ui: &mut egui::Ui, dependents: &[Dependent], accent: Color32) {
    ui.horizontal(|ui| {
        ui.label(RichText::new("Grupo familiar").strong().color(accent));
        ui.label(RichText::new(format!("{} registro(s)", dependents.len())).weak());
    });
    ui.separator();

    if dependents.is_empty() {
        ui.label(RichText::new("Sin familiares registrados.").weak());
        return;
    }

    TableBuilder::new(ui)
        .id_salt("family_table")
        .striped(true)
        .vscroll(false)
        .column(Column::remainder().at_least(140.0).clip(true))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(90.0))
        .column(Column::auto())
        .header(20.0, |mut header| {
            for title in ["Nombre", "Vínculo", "DNI", "Foto"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for d in dependents {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&d.full_name);
                    });
                    row.col(|ui| {
                        ui.label(d.relationship_label());
                    });
                    row.col(|ui| {
                        ui.monospace(d.dependent_id.as_deref().unwrap_or("-"));
                    });
                    row.col(|ui| match &d.photo_url {
                        Some(url) => {
                            ui.hyperlink_to("Ver", url);
                        }
                        None => {
                            ui.label("-");
                        }
                    });
                });
            }
        });
}
