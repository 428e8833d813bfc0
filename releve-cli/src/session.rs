use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use releve_core::working_set::WorkingSet;

pub fn releve_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".releve"))
}

pub fn ensure_releve_home() -> Result<PathBuf> {
    let dir = releve_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn session_path() -> Result<PathBuf> {
    Ok(ensure_releve_home()?.join("session.json"))
}

/// Working set carried between invocations; `None` when no import is in
/// flight.
pub fn read_session() -> Result<Option<WorkingSet>> {
    let p = session_path()?;
    if !p.exists() {
        return Ok(None);
    }
    let s = fs::read_to_string(&p).with_context(|| format!("read {}", p.display()))?;
    Ok(Some(serde_json::from_str(&s).context("parse session.json")?))
}

pub fn write_session(set: &WorkingSet) -> Result<()> {
    let p = session_path()?;
    let json = serde_json::to_string_pretty(set)?;
    fs::write(&p, json).with_context(|| format!("write {}", p.display()))?;
    Ok(())
}

pub fn clear_session() -> Result<()> {
    let p = session_path()?;
    if p.exists() {
        fs::remove_file(&p).with_context(|| format!("remove {}", p.display()))?;
    }
    Ok(())
}
