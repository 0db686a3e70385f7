#![forbid(unsafe_code)]
//! Séances — génération de plannings de projection factices (fixtures).
//!
//! - Catalogue fixe de films, tirage uniforme avec remise.
//! - Une séance par heure, de 8h à 21h, sur 30 jours simulés.
//! - Un fichier texte par jour (`day_<i>`), une ligne `<film> <début> <fin>` par séance.
//! - Source aléatoire injectable ; dossier de sortie explicite.

#[cfg(feature = "serde")]
pub mod config;
#[cfg(feature = "serde")]
pub mod export;
pub mod generator;
pub mod model;
pub mod writer;

#[cfg(feature = "serde")]
pub use config::Config;
#[cfg(feature = "serde")]
pub use export::{export_schedule_csv, export_schedule_json, load_schedule_json};
pub use generator::{
    generate_schedule, ConstantSource, GenError, GenerateOptions, RngSource, TitleSource,
};
pub use model::{Catalog, Day, Schedule, Slot, DEFAULT_TITLES};
pub use writer::{
    day_file_name, format_slot_line, read_day_file, verify_output_dir, write_schedule, Issue,
    IssueKind, WriteMode,
};
