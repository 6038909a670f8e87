// tests/export_card.rs
use std::fs;
use std::path::PathBuf;

use stvp_card::config::options::{AppOptions, ExportFormat};
use stvp_card::export::write_card;
use stvp_card::roster::{rebuild, RawTable};

fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("stvp_export_{}", name));
    let _ = fs::remove_dir_all(&p);
    p
}

fn card() -> stvp_card::roster::Card {
    let roster = rebuild(
        RawTable::from_csv("dni,nombre,cargo\n12.345.678,PEREZ JUAN,Secretario\n"),
        RawTable::from_csv("dni_titular,dni_familiar,nombre,parentesco\n12345678,45111222,SOFIA,Hija\n"),
    );
    roster.card("12345678").unwrap()
}

#[test]
fn writes_dni_named_file_and_creates_directory() {
    let dir = tmp_dir("csv");
    let mut opts = AppOptions::default();
    opts.export.dir = dir.join("nested");

    let card = card();
    let path = write_card(&opts.export, &card.member, &card.dependents).unwrap();
    assert_eq!(path, dir.join("nested").join("12345678.csv"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Tipo,DNI,Nombre"));
    assert!(lines[1].starts_with("Titular,12345678,PEREZ JUAN,,Secretario,AL DÍA"));
    assert!(lines[2].starts_with("Familiar,45111222,SOFIA,Hija"));
}

#[test]
fn tsv_without_headers_to_explicit_file() {
    let dir = tmp_dir("tsv");
    let mut opts = AppOptions::default();
    opts.export.format = ExportFormat::Tsv;
    opts.export.include_headers = false;
    opts.export.file = Some(dir.join("card.txt"));

    let card = card();
    let path = write_card(&opts.export, &card.member, &card.dependents).unwrap();
    assert!(path.ends_with("card.txt"));

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("Titular\t12345678\t"));
    assert_eq!(text.lines().count(), 2);
}

#[test]
fn export_dir_that_is_a_file_is_an_error() {
    let dir = tmp_dir("blocked");
    fs::create_dir_all(&dir).unwrap();
    let blocker = dir.join("out");
    fs::write(&blocker, "x").unwrap();

    let mut opts = AppOptions::default();
    opts.export.dir = blocker;
    let card = card();
    assert!(write_card(&opts.export, &card.member, &card.dependents).is_err());
}

#[test]
fn path_like_member_id_is_written_inside_export_dir() {
    let dir = tmp_dir("escape");
    let mut opts = AppOptions::default();
    opts.export.dir = dir.clone();

    let mut card = card();
    card.member.id = String::from("/tmp/stvp_escape");
    let path = write_card(&opts.export, &card.member, &card.dependents).unwrap();
    assert_eq!(path, dir.join("tmpstvpescape.csv"));
    assert!(path.exists());
}
