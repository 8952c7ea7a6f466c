use super::*;

pub(crate) struct AppState {
    pub(crate) data_path: PathBuf,

    /// Insertion order is the order `GET /persons` returns.
    pub(crate) persons: RwLock<Vec<Person>>,
}
