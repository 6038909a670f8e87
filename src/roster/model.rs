// src/roster/model.rs
//
// Typed views over normalized rows. Column names live here and nowhere else.

use serde::Serialize;

use super::{
    photo::resolve_photo,
    role::{classify_role, RoleCategory},
    schema::Record,
};
use crate::{
    config::consts::{DEFAULT_BADGE, DEFAULT_EXPIRY},
    core::sanitize::normalize_ws,
};

pub const NAME_ALIASES: &[&str] = &["nombre", "apellido_y_nombre", "nombre_completo"];
pub const CLASS_ALIASES: &[&str] = &["miembro"];
pub const POSITION_ALIASES: &[&str] = &["cargo"];
pub const PHOTO_ALIASES: &[&str] = &["foto", "photo", "foto_url", "imagen"];
pub const EXPIRY_ALIASES: &[&str] = &["vence", "vencimiento"];
pub const RELATION_ALIASES: &[&str] = &["parentesco", "vinculo"];

fn is_known(label: &str) -> bool {
    [NAME_ALIASES, CLASS_ALIASES, POSITION_ALIASES, PHOTO_ALIASES, EXPIRY_ALIASES]
        .iter()
        .any(|set| set.contains(&label))
}

fn owned(v: Option<&str>) -> Option<String> {
    v.filter(|s| !s.is_empty()).map(str::to_string)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Member {
    pub id: String,
    pub full_name: String,
    /// `miembro` column: "ACTIVO", "DELEGADO", "COMISIÓN DIRECTIVA"...
    pub member_class: Option<String>,
    /// `cargo` column: "SECRETARIO GENERAL"...
    pub position: Option<String>,
    pub expires: Option<String>,
    pub photo_reference: Option<String>,
    pub photo_url: Option<String>,
    /// Every other non-empty column, in table order.
    pub extra: Vec<(String, String)>,
}

impl Member {
    pub fn from_record(rec: &Record<'_>) -> Self {
        let photo_reference = owned(rec.first_non_empty(PHOTO_ALIASES));
        let photo_url = resolve_photo(photo_reference.as_deref());
        let key_label = rec.key_label();
        let extra = rec
            .fields()
            .filter(|(label, value)| {
                !label.is_empty() && !value.is_empty() && Some(*label) != key_label && !is_known(label)
            })
            .map(|(l, v)| (l.to_string(), v.to_string()))
            .collect();

        Self {
            id: rec.key().to_string(),
            full_name: normalize_ws(rec.first_non_empty(NAME_ALIASES).unwrap_or_default()),
            member_class: owned(rec.first_non_empty(CLASS_ALIASES)),
            position: owned(rec.first_non_empty(POSITION_ALIASES)),
            expires: owned(rec.first_non_empty(EXPIRY_ALIASES)),
            photo_reference,
            photo_url,
            extra,
        }
    }

    /// Text the theme is derived from: member class first, then position.
    pub fn role_text(&self) -> &str {
        self.member_class.as_deref().or(self.position.as_deref()).unwrap_or("")
    }

    /// Title shown under the name: position first, then member class.
    pub fn title(&self) -> &str {
        self.position.as_deref().or(self.member_class.as_deref()).unwrap_or("")
    }

    /// First word of the member class, upper-cased.
    pub fn badge(&self) -> String {
        self.member_class
            .as_deref()
            .and_then(|c| c.split_whitespace().next())
            .map(|w| w.to_uppercase())
            .unwrap_or_else(|| s!(DEFAULT_BADGE))
    }

    pub fn category(&self) -> RoleCategory {
        classify_role(self.role_text())
    }

    pub fn expires_label(&self) -> &str {
        self.expires.as_deref().unwrap_or(DEFAULT_EXPIRY)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Dependent {
    pub sponsor_id: String,
    pub dependent_id: Option<String>,
    pub full_name: String,
    pub relationship: Option<String>,
    pub photo_reference: Option<String>,
    pub photo_url: Option<String>,
}

impl Dependent {
    pub fn from_record(rec: &Record<'_>) -> Self {
        let photo_reference = owned(rec.first_non_empty(PHOTO_ALIASES));
        let photo_url = resolve_photo(photo_reference.as_deref());
        Self {
            sponsor_id: rec.key().to_string(),
            dependent_id: owned(rec.own_id()),
            full_name: normalize_ws(rec.first_non_empty(NAME_ALIASES).unwrap_or_default()),
            relationship: owned(rec.first_non_empty(RELATION_ALIASES)),
            photo_reference,
            photo_url,
        }
    }

    pub fn relationship_label(&self) -> &str {
        self.relationship.as_deref().unwrap_or("-")
    }
}

/// Everything a front end needs to draw one card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Card {
    pub member: Member,
    pub category: RoleCategory,
    pub title: String,
    pub badge: String,
    pub expires: String,
    pub dependents: Vec<Dependent>,
}

impl Card {
    pub fn new(member: Member, dependents: Vec<Dependent>) -> Self {
        Self {
            category: member.category(),
            title: member.title().to_string(),
            badge: member.badge(),
            expires: member.expires_label().to_string(),
            member,
            dependents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::schema::{normalize_table, RawTable, DEPENDENTS_SCHEMA, MEMBERS_SCHEMA};

    fn table(csv: &str, members: bool) -> crate::roster::schema::NormalizedTable {
        let schema = if members { &MEMBERS_SCHEMA } else { &DEPENDENTS_SCHEMA };
        normalize_table(RawTable::from_csv(csv), schema).unwrap()
    }

    #[test]
    fn member_fields_come_from_aliases() {
        let t = table(
            "DNI,Apellido y Nombre,Miembro,Cargo,Vencimiento,Foto,Sector\n\
             12.345.678,PEREZ JUAN,Comisión Directiva,Secretario General,12/2025,https://drive.google.com/file/d/AB1/view,Taller\n",
            true,
        );
        let m = Member::from_record(&t.record(0).unwrap());
        assert_eq!(m.id, "12345678");
        assert_eq!(m.full_name, "PEREZ JUAN");
        assert_eq!(m.title(), "Secretario General");
        assert_eq!(m.badge(), "COMISIÓN");
        assert_eq!(m.category(), RoleCategory::Leadership);
        assert_eq!(m.expires_label(), "12/2025");
        assert_eq!(m.photo_url.as_deref(), Some("https://drive.google.com/uc?export=view&id=AB1"));
        assert_eq!(m.extra, vec![(s!("sector"), s!("Taller"))]);
    }

    #[test]
    fn member_defaults_when_columns_missing() {
        let t = table("dni,nombre\n7,ANA\n", true);
        let m = Member::from_record(&t.record(0).unwrap());
        assert_eq!(m.badge(), DEFAULT_BADGE);
        assert_eq!(m.expires_label(), DEFAULT_EXPIRY);
        assert_eq!(m.title(), "");
        assert_eq!(m.category(), RoleCategory::Ordinary);
        assert_eq!(m.photo_url, None);
    }

    #[test]
    fn theme_prefers_member_class_and_title_prefers_position() {
        let t = table("dni,miembro,cargo\n1,Delegado,Tesorero de Comisión\n", true);
        let m = Member::from_record(&t.record(0).unwrap());
        assert_eq!(m.category(), RoleCategory::Delegate);
        assert_eq!(m.title(), "Tesorero de Comisión");
    }

    #[test]
    fn dependent_fields() {
        let t = table("dni_titular,dni_familiar,nombre,vinculo\n1,40.111.222,MARIA,Hija\n", false);
        let d = Dependent::from_record(&t.record(0).unwrap());
        assert_eq!(d.sponsor_id, "1");
        assert_eq!(d.dependent_id.as_deref(), Some("40111222"));
        assert_eq!(d.relationship_label(), "Hija");
    }

    #[test]
    fn card_serializes_category_in_lowercase() {
        let t = table("dni,nombre,miembro\n1,ANA,Delegada\n", true);
        let card = Card::new(Member::from_record(&t.record(0).unwrap()), vec![]);
        let json = serde_json::to_string(&card).unwrap();
        assert!(json.contains(r#""category":"delegate""#));
        assert!(json.contains(r#""badge":"DELEGADA""#));
    }
}
