use super::http_client::{malformed, unreachable};
use super::*;

impl PersonStore for RemoteClient {
    fn fetch_all(&self) -> Result<Vec<Person>, TransportError> {
        let label = "list persons";
        let resp = self
            .client
            .get(self.url("/persons"))
            .send()
            .map_err(|e| unreachable(label, e))?;

        let persons: Vec<Person> = self
            .ensure_ok(resp, label, None)?
            .json()
            .map_err(|e| malformed(label, e))?;
        Ok(persons)
    }

    fn create(&self, draft: &PersonDraft) -> Result<Person, TransportError> {
        let label = "create person";
        let resp = self
            .client
            .post(self.url("/persons"))
            .json(draft)
            .send()
            .map_err(|e| unreachable(label, e))?;

        let person: Person = self
            .ensure_ok(resp, label, None)?
            .json()
            .map_err(|e| malformed(label, e))?;
        Ok(person)
    }

    fn update(&self, id: &PersonId, patch: &PersonPatch) -> Result<Person, TransportError> {
        let label = "update person";
        let resp = self
            .client
            .put(self.person_url(id))
            .json(patch)
            .send()
            .map_err(|e| unreachable(label, e))?;

        let person: Person = self
            .ensure_ok(resp, label, Some(id))?
            .json()
            .map_err(|e| malformed(label, e))?;
        Ok(person)
    }

    fn remove(&self, id: &PersonId) -> Result<(), TransportError> {
        let label = "delete person";
        let resp = self
            .client
            .delete(self.person_url(id))
            .send()
            .map_err(|e| unreachable(label, e))?;

        self.ensure_ok(resp, label, Some(id))?;
        Ok(())
    }
}
