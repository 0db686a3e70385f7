use crate::model::Schedule;
use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::fs;
use std::path::Path;

/// Export JSON du planning (jolie mise en forme)
pub fn export_schedule_json<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    let path = path.as_ref();
    let s = serde_json::to_string_pretty(schedule)?;
    fs::write(path, s).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

/// Export CSV à plat : header `day,date,movie,start,end`
pub fn export_schedule_csv<P: AsRef<Path>>(path: P, schedule: &Schedule) -> Result<()> {
    let path = path.as_ref();
    let mut w = WriterBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    w.write_record(["day", "date", "movie", "start", "end"])?;
    for day in &schedule.days {
        let index = day.index.to_string();
        let date = day.date.map(|d| d.to_string()).unwrap_or_default();
        for slot in &day.slots {
            let start = slot.start.to_string();
            let end = slot.end.to_string();
            w.write_record([
                index.as_str(),
                date.as_str(),
                slot.movie.as_str(),
                start.as_str(),
                end.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}

/// Relit un export JSON.
pub fn load_schedule_json<P: AsRef<Path>>(path: P) -> Result<Schedule> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let schedule: Schedule = serde_json::from_slice(&data)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(schedule)
}
