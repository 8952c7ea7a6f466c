use super::*;

pub(super) const PERSONS_FILE: &str = "persons.json";

pub(super) fn load_persons(path: &std::path::Path) -> Result<Vec<Person>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let persons: Vec<Person> =
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))?;
    Ok(persons)
}

pub(super) fn persist_persons(path: &std::path::Path, persons: &[Person]) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(persons).context("serialize persons")?;
    phonebook::config::write_atomic_overwrite(path, &bytes).context("write persons.json")?;
    Ok(())
}

/// Random 4-byte hex id, retried until unused.
pub(super) fn generate_id(taken: &[Person]) -> Result<PersonId> {
    loop {
        let mut bytes = [0u8; 4];
        getrandom::getrandom(&mut bytes).map_err(|e| anyhow::anyhow!("getrandom: {:?}", e))?;
        let mut out = String::with_capacity(8);
        for b in &bytes {
            out.push_str(&format!("{:02x}", b));
        }
        let id = PersonId(out);
        if !taken.iter().any(|p| p.id == id) {
            return Ok(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/bin/phonebook_server/persistence_tests.rs"]
mod tests;
