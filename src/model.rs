use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Nombre de jours simulés par défaut.
pub const DAY_COUNT: u32 = 30;
/// Première heure de séance (incluse).
pub const FIRST_HOUR: u8 = 8;
/// Dernière heure de début de séance (incluse).
pub const LAST_HOUR: u8 = 21;
/// Séances par jour avec les heures par défaut.
pub const SLOTS_PER_DAY: usize = (LAST_HOUR - FIRST_HOUR + 1) as usize;
/// Nombre de salles. Conservé dans la config, ignoré par la génération.
pub const ROOM_COUNT: u32 = 9;

/// Titres du catalogue par défaut.
pub const DEFAULT_TITLES: [&str; 7] = [
    "initial_D_stage_one",
    "initial_D_stage_two",
    "initial_D_stage_three",
    "initial_D_extra_stage",
    "initial_D_super_stage",
    "initial_D_train_stage",
    "initial_D_spitfire_stage",
];

/// Catalogue de films candidats (ordre conservé).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct Catalog {
    titles: Vec<String>,
}

impl Catalog {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
        }
    }

    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn contains(&self, title: &str) -> bool {
        self.titles.iter().any(|t| t == title)
    }

    /// Premier titre inutilisable dans le format ligne (vide ou avec espace).
    pub fn first_invalid_title(&self) -> Option<&str> {
        self.titles
            .iter()
            .map(String::as_str)
            .find(|t| !is_valid_title(t))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(DEFAULT_TITLES)
    }
}

pub(crate) fn is_valid_title(title: &str) -> bool {
    !title.is_empty() && !title.chars().any(char::is_whitespace)
}

/// Séance d'une heure : `end == start + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Slot {
    pub movie: String,
    pub start: u8,
    pub end: u8,
}

impl Slot {
    /// `None` si `start + 1` ne tient pas sur un `u8`.
    pub fn new<M: Into<String>>(movie: M, start: u8) -> Option<Self> {
        let end = start.checked_add(1)?;
        Some(Self {
            movie: movie.into(),
            start,
            end,
        })
    }
}

/// Journée simulée (index à partir de 1).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Day {
    pub index: u32,
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub date: Option<NaiveDate>,
    pub slots: Vec<Slot>,
}

impl Day {
    pub fn start_hours(&self) -> impl Iterator<Item = u8> + '_ {
        self.slots.iter().map(|s| s.start)
    }
}

/// Planning complet, jours dans l'ordre.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Schedule {
    pub days: Vec<Day>,
}

impl Schedule {
    pub fn find_day(&self, index: u32) -> Option<&Day> {
        self.days.iter().find(|d| d.index == index)
    }

    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.slots.len()).sum()
    }
}
