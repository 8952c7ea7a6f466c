//! Local mirror of the remote collection's last confirmed state.
//!
//! Order is insertion order and exists only for stable display. Every
//! mutation here is expected to follow a confirmed remote result.

use crate::model::{Person, PersonId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PersonCache {
    entries: Vec<Person>,
}

impl PersonCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole cache, as after an initial fetch. Later duplicates
    /// of an id are dropped so ids stay unique.
    pub fn replace_all(&mut self, persons: Vec<Person>) {
        self.entries.clear();
        for p in persons {
            if self.position(&p.id).is_none() {
                self.entries.push(p);
            }
        }
    }

    /// Appends a newly created person. If the id is already cached the
    /// existing entry is overwritten in place instead.
    pub fn append(&mut self, person: Person) {
        match self.position(&person.id) {
            Some(i) => self.entries[i] = person,
            None => self.entries.push(person),
        }
    }

    /// Replaces the entry with the same id, keeping its position. Returns
    /// false when the id is not cached.
    pub fn replace(&mut self, person: Person) -> bool {
        let Some(i) = self.position(&person.id) else {
            return false;
        };
        self.entries[i] = person;
        true
    }

    pub fn remove(&mut self, id: &PersonId) -> Option<Person> {
        let i = self.position(id)?;
        Some(self.entries.remove(i))
    }

    pub fn get(&self, id: &PersonId) -> Option<&Person> {
        self.entries.iter().find(|p| &p.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Person> {
        self.entries.iter().find(|p| p.name_matches(name))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Person> {
        self.entries.iter()
    }

    pub fn as_slice(&self) -> &[Person] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, id: &PersonId) -> Option<usize> {
        self.entries.iter().position(|p| &p.id == id)
    }
}

impl<'a> IntoIterator for &'a PersonCache {
    type Item = &'a Person;
    type IntoIter = std::slice::Iter<'a, Person>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
#[path = "tests/cache_tests.rs"]
mod tests;
