use crate::generator::GenerateOptions;
use crate::model::{is_valid_title, Catalog, Day, Schedule, Slot};
use anyhow::{bail, Context, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Dossier de sortie par défaut, relatif au répertoire courant.
pub const DEFAULT_OUTPUT_DIR: &str = "./data";

/// Comportement quand un fichier `day_<i>` existe déjà.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum WriteMode {
    /// Ajoute en fin de fichier : une relance duplique les lignes.
    #[default]
    Append,
    /// Remplace le contenu (écriture atomique).
    Overwrite,
}

pub fn day_file_name(index: u32) -> String {
    format!("day_{index}")
}

/// `"<movie> <start> <end>\n"`
pub fn format_slot_line(slot: &Slot) -> String {
    let mut num = itoa::Buffer::new();
    let mut line = String::with_capacity(slot.movie.len() + 7);
    line.push_str(&slot.movie);
    line.push(' ');
    line.push_str(num.format(slot.start));
    line.push(' ');
    line.push_str(num.format(slot.end));
    line.push('\n');
    line
}

pub fn format_day(day: &Day) -> String {
    day.slots.iter().map(format_slot_line).collect()
}

/// Écrit une journée par fichier dans `dir` (créé au besoin), dans l'ordre des jours.
pub fn write_schedule<P: AsRef<Path>>(
    dir: P,
    schedule: &Schedule,
    mode: WriteMode,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .with_context(|| format!("creating output directory {}", dir.display()))?;

    let mut written = Vec::with_capacity(schedule.days.len());
    for day in &schedule.days {
        let path = dir.join(day_file_name(day.index));
        let content = format_day(day);
        match mode {
            WriteMode::Append => append_file(&path, &content)?,
            WriteMode::Overwrite => replace_file(dir, &path, &content)?,
        }
        #[cfg(feature = "logging")]
        tracing::debug!(path = %path.display(), slots = day.slots.len(), ?mode, "day written");
        written.push(path);
    }

    #[cfg(feature = "logging")]
    tracing::info!(dir = %dir.display(), files = written.len(), "schedule written");

    Ok(written)
}

fn append_file(path: &Path, content: &str) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening {}", path.display()))?;
    f.write_all(content.as_bytes())
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn replace_file(dir: &Path, path: &Path, content: &str) -> Result<()> {
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("atomic rename to {}", path.display()))?;
    Ok(())
}

/// Parse une ligne `<movie> <start> <end>` au format exact (sans `\n`).
///
/// Espaces simples uniquement, heures sans zéro ni signe en tête. La cohérence
/// des heures n'est pas contrôlée ici.
pub fn parse_slot_line(line: &str) -> Result<Slot> {
    let fields: Vec<&str> = line.split(' ').collect();
    let [movie, start, end] = fields.as_slice() else {
        bail!("expected `<movie> <start> <end>`, got {line:?}");
    };
    if !is_valid_title(movie) {
        bail!("invalid movie title {movie:?}");
    }
    let start: u8 = start
        .parse()
        .with_context(|| format!("invalid start hour {start:?}"))?;
    let end: u8 = end
        .parse()
        .with_context(|| format!("invalid end hour {end:?}"))?;
    let slot = Slot {
        movie: movie.to_string(),
        start,
        end,
    };
    if format_slot_line(&slot).strip_suffix('\n') != Some(line) {
        bail!("non-canonical line {line:?}");
    }
    Ok(slot)
}

/// Relit un fichier `day_<i>` ; chaque ligne doit se terminer par `\n`.
pub fn read_day_file<P: AsRef<Path>>(path: P) -> Result<Vec<Slot>> {
    let path = path.as_ref();
    let data =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    data.split_inclusive('\n')
        .enumerate()
        .map(|(n, raw)| {
            let line = raw
                .strip_suffix('\n')
                .with_context(|| format!("{}:{}: missing final newline", path.display(), n + 1))?;
            parse_slot_line(line).with_context(|| format!("{}:{}", path.display(), n + 1))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    MissingFile,
    LineCount,
    Malformed,
    HourSequence,
    UnknownTitle,
    /// `day_<n>` hors de `1..=days`.
    Stray,
}

impl IssueKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IssueKind::MissingFile => "missing",
            IssueKind::LineCount => "line-count",
            IssueKind::Malformed => "malformed",
            IssueKind::HourSequence => "hours",
            IssueKind::UnknownTitle => "unknown-title",
            IssueKind::Stray => "stray",
        }
    }
}

/// Anomalie relevée dans un dossier de sortie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub day: u32,
    /// Ligne concernée (à partir de 1).
    pub line: Option<usize>,
    pub kind: IssueKind,
    pub detail: String,
}

/// Vérifie `day_1..day_<n>` : présence, format exact des lignes, heures et titres,
/// puis signale les `day_<i>` en trop.
///
/// Un dossier rempli deux fois en mode `Append` ressort en `LineCount`.
/// Seules les vraies erreurs d'E/S interrompent la vérification.
pub fn verify_output_dir<P: AsRef<Path>>(
    dir: P,
    opts: &GenerateOptions,
    catalog: &Catalog,
) -> Result<Vec<Issue>> {
    opts.validate()?;
    let dir = dir.as_ref();
    let expected: Vec<u8> = opts.start_hours().collect();
    let mut out = Vec::new();

    for day in 1..=opts.days {
        let path = dir.join(day_file_name(day));
        if !path.is_file() {
            out.push(Issue {
                day,
                line: None,
                kind: IssueKind::MissingFile,
                detail: path.display().to_string(),
            });
            continue;
        }
        let bytes = fs::read(&path).with_context(|| format!("reading {}", path.display()))?;
        let data = match String::from_utf8(bytes) {
            Ok(data) => data,
            Err(err) => {
                out.push(Issue {
                    day,
                    line: None,
                    kind: IssueKind::Malformed,
                    detail: format!("not valid UTF-8: {err}"),
                });
                continue;
            }
        };
        let lines: Vec<&str> = data.split_inclusive('\n').collect();
        if lines.len() != expected.len() {
            out.push(Issue {
                day,
                line: None,
                kind: IssueKind::LineCount,
                detail: format!("expected {} lines, found {}", expected.len(), lines.len()),
            });
        }

        for (idx, (raw, want)) in lines.iter().zip(expected.iter().cycle()).enumerate() {
            let issue = |kind, detail| Issue {
                day,
                line: Some(idx + 1),
                kind,
                detail,
            };
            let Some(line) = raw.strip_suffix('\n') else {
                out.push(issue(IssueKind::Malformed, "missing final newline".to_string()));
                continue;
            };
            let slot = match parse_slot_line(line) {
                Ok(s) => s,
                Err(err) => {
                    out.push(issue(IssueKind::Malformed, format!("{err:#}")));
                    continue;
                }
            };
            if slot.start != *want || u16::from(slot.end) != u16::from(slot.start) + 1 {
                out.push(issue(
                    IssueKind::HourSequence,
                    format!("expected {} {}, got {} {}", want, want + 1, slot.start, slot.end),
                ));
            }
            if !catalog.contains(&slot.movie) {
                out.push(issue(IssueKind::UnknownTitle, slot.movie));
            }
        }
    }

    out.extend(stray_day_files(dir, opts.days)?);
    Ok(out)
}

fn stray_day_files(dir: &Path, days: u32) -> Result<Vec<Issue>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut out = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let name = entry?.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        let Some(day) = name.strip_prefix("day_").and_then(|n| n.parse::<u32>().ok()) else {
            continue;
        };
        if day_file_name(day) == name && (day == 0 || day > days) {
            out.push(Issue {
                day,
                line: None,
                kind: IssueKind::Stray,
                detail: dir.join(name).display().to_string(),
            });
        }
    }
    out.sort_by_key(|i| i.day);
    Ok(out)
}
