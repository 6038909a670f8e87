// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::{progress::Progress, roster::TableKind};

/// Writes refresh status into a shared line the UI thread paints.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
    done: usize,
    failed: usize,
    total: usize,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status, done: 0, failed: 0, total: 0 }
    }

    fn set_status(&self, msg: impl Into<String>) {
        if let Ok(mut s) = self.status.lock() {
            *s = msg.into();
        }
    }
}

fn table_name(kind: TableKind) -> &'static str {
    match kind {
        TableKind::Members => "afiliados",
        TableKind::Dependents => "familiares",
    }
}

impl Progress for GuiProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn item_done(&mut self, table: TableKind) {
        self.done += 1;
        self.set_status(format!("Cargado: {} ({}/{})", table_name(table), self.done, self.total));
    }
    fn item_failed(&mut self, table: TableKind, _err: &str) {
        self.failed += 1;
        self.set_status(format!("No se pudo cargar: {}", table_name(table)));
    }
    fn finish(&mut self) {
        if self.failed == 0 {
            self.set_status("Padrón actualizado");
        } else {
            self.set_status(format!("Padrón actualizado con {} error(es)", self.failed));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_tracks_tables() {
        let status = Arc::new(Mutex::new(s!()));
        let mut p = GuiProgress::new(Arc::clone(&status));
        p.begin(2);
        p.item_done(TableKind::Members);
        assert_eq!(*status.lock().unwrap(), "Cargado: afiliados (1/2)");
        p.item_failed(TableKind::Dependents, "offline");
        p.finish();
        assert_eq!(*status.lock().unwrap(), "Padrón actualizado con 1 error(es)");
    }
}
