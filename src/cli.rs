// src/cli.rs
use std::{
    env,
    error::Error,
    iter::Peekable,
    path::PathBuf,
    time::Instant,
};

use crate::{
    config::{
        consts::DEFAULT_SETTINGS_FILE,
        options::{AppOptions, ExportFormat},
        settings,
    },
    export,
    progress::Progress,
    roster::{Card, Roster, TableKind},
    source::RemoteSource,
    store::RosterCache,
};

const HELP: &str = include_str!("cli_help.txt");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliArgs {
    pub dni: Option<String>,
    pub json: bool,
    pub members: Option<String>,
    pub family: Option<String>,
    pub settings: PathBuf,
    /// `Some(None)`: export to the default path.
    pub export: Option<Option<PathBuf>>,
    pub format: Option<ExportFormat>,
    pub include_headers: bool,
    pub stats: bool,
    pub save_settings: bool,
    pub help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            dni: None,
            json: false,
            members: None,
            family: None,
            settings: PathBuf::from(DEFAULT_SETTINGS_FILE),
            export: None,
            format: None,
            include_headers: false,
            stats: false,
            save_settings: false,
            help: false,
        }
    }
}

impl CliArgs {
    /// Flags win over the settings file.
    pub fn apply(&self, opts: &mut AppOptions) {
        if let Some(m) = &self.members { opts.sources.members = m.clone(); }
        if let Some(f) = &self.family { opts.sources.family = f.clone(); }
        if let Some(fmt) = self.format { opts.export.format = fmt; }
        if self.include_headers { opts.export.include_headers = true; }
        if let Some(Some(path)) = &self.export { opts.export.file = Some(path.clone()); }
    }
}

pub fn parse_args<I>(args: I) -> Result<CliArgs, Box<dyn Error>>
where
    I: IntoIterator<Item = String>,
{
    let mut out = CliArgs::default();
    let mut args = args.into_iter().peekable();
    while let Some(a) = args.next() {
        match a.as_str() {
            "--dni" => out.dni = Some(args.next().ok_or("Missing value for --dni")?),
            "--json" => out.json = true,
            "--members" => out.members = Some(args.next().ok_or("Missing value for --members")?),
            "--family" => out.family = Some(args.next().ok_or("Missing value for --family")?),
            "--settings" => {
                out.settings = PathBuf::from(args.next().ok_or("Missing value for --settings")?);
            }
            "--export" => out.export = Some(optional_value(&mut args).map(PathBuf::from)),
            "--format" => {
                let v = args.next().ok_or("Missing value for --format")?;
                out.format = Some(ExportFormat::parse(&v).ok_or_else(|| format!("Unknown format: {v}"))?);
            }
            "--include-headers" => out.include_headers = true,
            "--stats" => out.stats = true,
            "--save-settings" => out.save_settings = true,
            "-h" | "--help" => out.help = true,
            _ => return Err(format!("Unknown arg: {a}").into()),
        }
    }
    Ok(out)
}

/// Next argument, unless it looks like another flag.
fn optional_value<I: Iterator<Item = String>>(args: &mut Peekable<I>) -> Option<String> {
    match args.peek() {
        Some(v) if !v.starts_with('-') => args.next(),
        _ => None,
    }
}

struct CliProgress;

impl Progress for CliProgress {
    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }
    fn item_failed(&mut self, table: TableKind, err: &str) {
        eprintln!("Warning: could not load {} table: {err}", table.label());
    }
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args(env::args().skip(1))?;
    if args.help {
        print!("{HELP}");
        return Ok(());
    }

    let mut opts = settings::load(&args.settings);
    args.apply(&mut opts);

    if args.save_settings {
        settings::save(&args.settings, &opts)?;
        println!("Settings saved to {}", args.settings.display());
    }
    if args.dni.is_none() && !args.stats {
        if args.save_settings { return Ok(()); }
        return Err("Nothing to do: pass --dni <DNI> or --stats (see --help)".into());
    }

    let source = RemoteSource::from_options(&opts.sources).map_err(|e| e.to_string())?;
    let mut cache = RosterCache::new(source);
    let roster = cache.get_or_refresh(Instant::now(), opts.cache.ttl(), Some(&mut CliProgress));

    if args.stats {
        print!("{}", render_stats(&roster));
    }

    let Some(dni) = &args.dni else { return Ok(()) };
    let card = match roster.card(dni) {
        Ok(card) => card,
        Err(miss) => {
            logf!("CLI: lookup miss ({miss})");
            return Err(miss.message().into());
        }
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        print!("{}", render_card(&card));
    }

    if args.export.is_some() {
        let path = export::write_card(&opts.export, &card.member, &card.dependents)?;
        eprintln!("Exported to {}", path.display());
    }
    Ok(())
}

pub fn render_stats(roster: &Roster) -> String {
    let mut s = s!();
    for kind in TableKind::ALL {
        let table = roster.table(kind);
        s.push_str(&format!("{}: {}", kind.label(), table.len()));
        if let Some(key) = table.key_column() {
            s.push_str(&format!(" (key: {key})"));
        }
        s.push('\n');
    }
    for issue in roster.issues() {
        s.push_str(&format!("issue: {issue}\n"));
    }
    s
}

/// Plain-text card for the terminal.
pub fn render_card(card: &Card) -> String {
    let m = &card.member;
    let mut s = format!(
        "{}\n[{}] {}\nCategoría: {}\nDNI: {}\nVence: {}\n",
        m.full_name,
        card.badge,
        card.title,
        card.category.label(),
        m.id,
        card.expires,
    );
    if let Some(url) = &m.photo_url {
        s.push_str(&format!("Foto: {url}\n"));
    }

    s.push_str(&format!("\nGrupo familiar ({})\n", card.dependents.len()));
    if card.dependents.is_empty() {
        s.push_str("  Sin familiares registrados.\n");
    }
    for d in &card.dependents {
        s.push_str(&format!("  - {} ({})", d.full_name, d.relationship_label()));
        if let Some(id) = &d.dependent_id {
            s.push_str(&format!(" DNI {id}"));
        }
        s.push('\n');
    }
    s
}
