use std::fmt::{Display, Formatter};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::{Contact, seed_contacts};

#[derive(Debug)]
pub enum StoreError {
    Unavailable(std::io::Error),
    LoadFailed(StoreFailure),
    SaveFailed(StoreFailure),
}

#[derive(Debug)]
pub enum StoreFailure {
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Unavailable(err) => write!(f, "contact store unavailable: {err}"),
            StoreError::LoadFailed(cause) => write!(f, "failed to load contacts: {cause}"),
            StoreError::SaveFailed(cause) => write!(f, "failed to save contacts: {cause}"),
        }
    }
}

impl Display for StoreFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreFailure::Io(err) => write!(f, "io error: {err}"),
            StoreFailure::Json(err) => write!(f, "bad contacts document: {err}"),
        }
    }
}

impl std::error::Error for StoreError {}

// Persisted layout: one JSON document holding the `contacts` collection.
#[derive(Debug, Serialize, Deserialize)]
struct ContactsDocument {
    contacts: Vec<Contact>,
}

#[derive(Debug, Clone)]
pub struct ContactStore {
    path: PathBuf,
}

impl ContactStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(StoreError::Unavailable)?;
            }
        }

        if path.exists() && path.is_dir() {
            return Err(StoreError::Unavailable(std::io::Error::new(
                ErrorKind::InvalidInput,
                format!("{} is a directory", path.display()),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load_all(&self) -> Result<Vec<Contact>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::LoadFailed(StoreFailure::Io(err))),
        };

        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let document: ContactsDocument = serde_json::from_str(&raw)
            .map_err(|err| StoreError::LoadFailed(StoreFailure::Json(err)))?;
        Ok(document.contacts)
    }

    // Full-collection replace; there is no merge with what is on disk.
    pub fn save_all(&self, contacts: &[Contact]) -> Result<(), StoreError> {
        let document = ContactsDocument {
            contacts: contacts.to_vec(),
        };
        let encoded = serde_json::to_string_pretty(&document)
            .map_err(|err| StoreError::SaveFailed(StoreFailure::Json(err)))?;

        let mut file = fs::File::create(&self.path)
            .map_err(|err| StoreError::SaveFailed(StoreFailure::Io(err)))?;
        file.write_all(encoded.as_bytes())
            .map_err(|err| StoreError::SaveFailed(StoreFailure::Io(err)))?;
        file.write_all(b"\n")
            .map_err(|err| StoreError::SaveFailed(StoreFailure::Io(err)))?;

        Ok(())
    }
}

// Degrade path: open failure, load failure, and an empty store all resolve
// to the seed dataset so the caller always has a displayable list.
pub fn load_contacts_or_seed(store: Option<&ContactStore>) -> Vec<Contact> {
    let Some(store) = store else {
        return seed_contacts();
    };

    match store.load_all() {
        Ok(contacts) if contacts.is_empty() => seed_contacts(),
        Ok(contacts) => contacts,
        Err(err) => {
            eprintln!("warning: {err}; showing the demo roster");
            seed_contacts()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use crate::domain::{Roster, seed_contacts};

    use super::{ContactStore, StoreError, load_contacts_or_seed};

    #[test]
    fn round_trips_the_contacts_collection() {
        let path = temp_file("roster_clock_roundtrip.json");
        let store = ContactStore::open(&path).expect("store should open");

        let mut roster = Roster::new();
        roster
            .add_contact(
                "Ada".to_string(),
                "GMT+8".to_string(),
                Some("ada@example.com".to_string()),
                Some("Singapore".to_string()),
            )
            .expect("contact should be added");
        roster
            .add_contact("Grace".to_string(), "GMT-5".to_string(), None, None)
            .expect("contact should be added");

        store.save_all(&roster.contacts).expect("save should succeed");
        let loaded = store.load_all().expect("load should succeed");
        assert_eq!(loaded, roster.contacts);

        // Saving back what was loaded leaves the snapshot unchanged.
        store.save_all(&loaded).expect("save should succeed");
        assert_eq!(store.load_all().expect("load should succeed"), loaded);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_loads_as_empty() {
        let path = temp_file("roster_clock_missing.json");
        let _ = fs::remove_file(&path);
        let store = ContactStore::open(&path).expect("store should open");
        assert!(store.load_all().expect("load should succeed").is_empty());
    }

    #[test]
    fn save_replaces_the_whole_collection() {
        let path = temp_file("roster_clock_replace.json");
        let store = ContactStore::open(&path).expect("store should open");

        store.save_all(&seed_contacts()).expect("save should succeed");
        let mut remaining = seed_contacts();
        remaining.retain(|contact| contact.id != "seed0001");
        store.save_all(&remaining).expect("save should succeed");

        let loaded = store.load_all().expect("load should succeed");
        assert_eq!(loaded.len(), 3);
        assert!(loaded.iter().all(|contact| contact.id != "seed0001"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn added_contact_survives_reload_with_its_id() {
        let path = temp_file("roster_clock_add.json");
        let store = ContactStore::open(&path).expect("store should open");

        let mut roster = Roster::from_contacts(seed_contacts());
        let id = roster
            .add_contact("Mei Lin".to_string(), "GMT+8".to_string(), None, None)
            .expect("contact should be added");
        store.save_all(&roster.contacts).expect("save should succeed");

        let loaded = Roster::from_contacts(store.load_all().expect("load should succeed"));
        let contact = loaded.contact(&id).expect("imported contact");
        assert_eq!(contact.name, "Mei Lin");
        assert_eq!(contact.timezone, "GMT+8");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_document_fails_as_load_error() {
        let path = temp_file("roster_clock_corrupt.json");
        fs::write(&path, "{ not json").expect("fixture write");
        let store = ContactStore::open(&path).expect("store should open");
        assert!(matches!(store.load_all(), Err(StoreError::LoadFailed(_))));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn unavailable_store_degrades_to_the_seed_dataset() {
        let contacts = load_contacts_or_seed(None);
        assert_eq!(contacts.len(), 4);
        assert!(contacts.iter().any(|contact| contact.name == "John Doe"));
    }

    #[test]
    fn empty_store_degrades_to_the_seed_dataset() {
        let path = temp_file("roster_clock_empty.json");
        let _ = fs::remove_file(&path);
        let store = ContactStore::open(&path).expect("store should open");
        let contacts = load_contacts_or_seed(Some(&store));
        assert_eq!(contacts, seed_contacts());
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}", name, std::process::id()));
        path
    }
}
