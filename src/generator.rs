use crate::model::{
    is_valid_title, Catalog, Day, Schedule, Slot, DAY_COUNT, FIRST_HOUR, LAST_HOUR,
};
use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use thiserror::Error;

/// Options de génération
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    pub days: u32,
    pub first_hour: u8,
    /// Heure de début de la dernière séance (incluse).
    pub last_hour: u8,
    /// Date du jour 1, si l'on veut étiqueter les journées.
    pub start_date: Option<NaiveDate>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            days: DAY_COUNT,
            first_hour: FIRST_HOUR,
            last_hour: LAST_HOUR,
            start_date: None,
        }
    }
}

impl GenerateOptions {
    pub fn validate(&self) -> Result<(), GenError> {
        if self.days == 0 {
            return Err(GenError::ZeroDays);
        }
        // la dernière séance doit finir au plus tard à 24h
        if self.first_hour > self.last_hour || self.last_hour > 23 {
            return Err(GenError::InvalidHours {
                first: self.first_hour,
                last: self.last_hour,
            });
        }
        Ok(())
    }

    pub fn slots_per_day(&self) -> usize {
        usize::from(self.last_hour.saturating_sub(self.first_hour)) + 1
    }

    pub fn start_hours(&self) -> impl Iterator<Item = u8> {
        self.first_hour..=self.last_hour
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenError {
    #[error("day count must be > 0")]
    ZeroDays,
    #[error("invalid hour range: first={first}, last={last} (expected first <= last <= 23)")]
    InvalidHours { first: u8, last: u8 },
    #[error("catalog is empty")]
    EmptyCatalog,
    #[error("invalid movie title: {0:?}")]
    InvalidTitle(String),
    #[error("title source returned a title outside the catalog: {0}")]
    UnknownTitle(String),
    #[error("date overflow for day {0}")]
    DateOverflow(u32),
}

/// Source de titres injectable (aléatoire en production, figée en test).
pub trait TitleSource {
    /// Tire un titre ; `None` si le catalogue est vide.
    fn pick(&mut self, catalog: &Catalog) -> Option<String>;
}

/// Tirage uniforme avec remise.
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl<R: Rng> RngSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngSource<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TitleSource for RngSource<R> {
    fn pick(&mut self, catalog: &Catalog) -> Option<String> {
        catalog.titles().choose(&mut self.rng).cloned()
    }
}

/// Renvoie toujours le même titre.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantSource(pub String);

impl ConstantSource {
    pub fn new<S: Into<String>>(title: S) -> Self {
        Self(title.into())
    }
}

impl TitleSource for ConstantSource {
    fn pick(&mut self, _catalog: &Catalog) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Génère `opts.days` journées, une séance par heure de `first_hour` à `last_hour`.
pub fn generate_schedule(
    opts: &GenerateOptions,
    catalog: &Catalog,
    source: &mut dyn TitleSource,
) -> Result<Schedule, GenError> {
    opts.validate()?;
    if catalog.is_empty() {
        return Err(GenError::EmptyCatalog);
    }
    if let Some(bad) = catalog.first_invalid_title() {
        return Err(GenError::InvalidTitle(bad.to_string()));
    }

    let mut schedule = Schedule {
        days: Vec::with_capacity(opts.days as usize),
    };

    for index in 1..=opts.days {
        let date = match opts.start_date {
            Some(d) => Some(
                d.checked_add_signed(Duration::days(i64::from(index - 1)))
                    .ok_or(GenError::DateOverflow(index))?,
            ),
            None => None,
        };

        let mut slots = Vec::with_capacity(opts.slots_per_day());
        for hour in opts.start_hours() {
            let movie = source.pick(catalog).ok_or(GenError::EmptyCatalog)?;
            if !is_valid_title(&movie) {
                return Err(GenError::InvalidTitle(movie));
            }
            if !catalog.contains(&movie) {
                return Err(GenError::UnknownTitle(movie));
            }
            let slot = Slot::new(movie, hour).ok_or(GenError::InvalidHours {
                first: opts.first_hour,
                last: opts.last_hour,
            })?;
            slots.push(slot);
        }

        schedule.days.push(Day { index, date, slots });
    }

    #[cfg(feature = "logging")]
    tracing::debug!(
        days = schedule.days.len(),
        slots = schedule.slot_count(),
        "schedule generated"
    );

    Ok(schedule)
}
