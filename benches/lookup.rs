// benches/lookup.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use stvp_card::roster::{normalize_table, rebuild, RawTable, TableKind};

/// Synthetic export shaped like the real one: dotted DNIs, some with ".0".
fn members_csv(n: usize) -> String {
    let mut s = String::from("DNI,Apellido y Nombre,Miembro,Cargo,Vencimiento,Foto\n");
    for i in 0..n {
        let id = 20_000_000 + i;
        let dni = if i % 3 == 0 { format!("{id}.0") } else { format!("{}.{:03}.{:03}", id / 1_000_000, (id / 1000) % 1000, id % 1000) };
        s.push_str(&format!("{dni},SOCIO {i},Activo,,12/2026,https://drive.google.com/file/d/F{i}/view\n"));
    }
    s
}

fn family_csv(n: usize) -> String {
    let mut s = String::from("DNI_TITULAR,DNI Familiar,Nombre,Parentesco\n");
    for i in 0..n {
        s.push_str(&format!("{},{},FAMILIAR {i},Hijo\n", 20_000_000 + (i / 2), 40_000_000 + i));
    }
    s
}

fn bench_lookup(c: &mut Criterion) {
    let members = members_csv(5_000);
    let family = family_csv(8_000);

    c.bench_function("normalize_members_5k", |b| {
        b.iter(|| {
            let t = normalize_table(RawTable::from_csv(black_box(&members)), TableKind::Members.schema());
            black_box(t.map(|t| t.len()).unwrap_or(0))
        })
    });

    let roster = rebuild(RawTable::from_csv(&members), RawTable::from_csv(&family));

    c.bench_function("card_last_member", |b| {
        b.iter(|| {
            let card = roster.card(black_box("20.004.999"));
            black_box(card.map(|c| c.dependents.len()).unwrap_or(0))
        })
    });

    c.bench_function("miss_unknown_dni", |b| {
        b.iter(|| black_box(roster.find_member(black_box("1")).is_err()))
    });
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
