use std::env;
use std::fmt::{Display, Formatter};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::{Contact, generate_id};

pub const IMPORT_FILE_ENV: &str = "ROSTER_CLOCK_IMPORT";

#[derive(Debug)]
pub enum PickerError {
    Unavailable,
    Cancelled,
    Failed(String),
}

impl Display for PickerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::Unavailable => write!(f, "no contact picker available"),
            PickerError::Cancelled => write!(f, "contact selection cancelled"),
            PickerError::Failed(reason) => write!(f, "contact picker failed: {reason}"),
        }
    }
}

impl std::error::Error for PickerError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerField {
    Name,
    Email,
    Tel,
    Icon,
}

pub trait ContactPicker {
    fn select(
        &self,
        fields: &[PickerField],
        multiple: bool,
    ) -> Result<Vec<RawContact>, PickerError>;
}

// Resolved once at startup; the rest of the app only sees the variants.
pub enum PickerCapability {
    Available(Box<dyn ContactPicker>),
    Unavailable,
}

impl PickerCapability {
    pub fn detect() -> Self {
        match env::var_os(IMPORT_FILE_ENV) {
            Some(path) if !path.is_empty() => {
                PickerCapability::Available(Box::new(FilePicker::new(PathBuf::from(path))))
            }
            _ => PickerCapability::Unavailable,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, PickerCapability::Available(_))
    }
}

// Raw record shape of the reference picker: every field arrives as a list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawContact {
    #[serde(default)]
    pub name: Vec<String>,
    #[serde(default)]
    pub email: Vec<String>,
    #[serde(default)]
    pub tel: Vec<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

// Reads raw records from a JSON file, standing in for the platform picker.
pub struct FilePicker {
    path: PathBuf,
}

impl FilePicker {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ContactPicker for FilePicker {
    fn select(
        &self,
        _fields: &[PickerField],
        multiple: bool,
    ) -> Result<Vec<RawContact>, PickerError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(PickerError::Unavailable);
            }
            Err(err) => return Err(PickerError::Failed(err.to_string())),
        };

        // A null document stands for an aborted selection.
        let records: Option<Vec<RawContact>> =
            serde_json::from_str(&raw).map_err(|err| PickerError::Failed(err.to_string()))?;
        let mut records = records.ok_or(PickerError::Cancelled)?;
        if !multiple {
            records.truncate(1);
        }
        Ok(records)
    }
}

// Fields the picker does not supply stay empty until the user edits them.
// Records without a usable name are dropped; tel has no slot in the
// contact shape and is not kept.
pub fn normalize(raw: RawContact) -> Option<Contact> {
    let name = raw
        .name
        .into_iter()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())?;

    Some(Contact {
        id: generate_id(),
        name,
        email: raw.email.into_iter().find(|value| !value.trim().is_empty()),
        timezone: String::new(),
        place: None,
        icon: raw.icon,
    })
}

pub fn pick_and_normalize(picker: &dyn ContactPicker) -> Result<Vec<Contact>, PickerError> {
    let fields = [
        PickerField::Name,
        PickerField::Email,
        PickerField::Tel,
        PickerField::Icon,
    ];
    let records = picker.select(&fields, true)?;
    Ok(records.into_iter().filter_map(normalize).collect())
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use super::{
        ContactPicker, FilePicker, PickerError, PickerField, RawContact, normalize,
        pick_and_normalize,
    };

    #[test]
    fn normalize_takes_first_present_values() {
        let raw = RawContact {
            name: vec!["".to_string(), "Mei Lin".to_string()],
            email: vec!["mei@example.com".to_string(), "other@example.com".to_string()],
            tel: vec!["+6591234567".to_string()],
            icon: Some("mei.png".to_string()),
        };

        let contact = normalize(raw).expect("record should normalize");
        assert!(!contact.id.is_empty());
        assert_eq!(contact.name, "Mei Lin");
        assert_eq!(contact.email.as_deref(), Some("mei@example.com"));
        assert_eq!(contact.timezone, "");
        assert_eq!(contact.place, None);
        assert_eq!(contact.icon.as_deref(), Some("mei.png"));
    }

    #[test]
    fn normalize_drops_nameless_records() {
        let raw = RawContact {
            email: vec!["anon@example.com".to_string()],
            ..RawContact::default()
        };
        assert!(normalize(raw).is_none());
    }

    #[test]
    fn file_picker_reads_raw_records() {
        let path = temp_file("roster_clock_import.json");
        fs::write(
            &path,
            r#"[
                {"name": ["Mei Lin"], "email": ["mei@example.com"], "tel": ["+6591234567"]},
                {"name": ["Omar Haddad"]},
                {"email": ["nameless@example.com"]}
            ]"#,
        )
        .expect("fixture write");

        let picker = FilePicker::new(path.clone());
        let contacts = pick_and_normalize(&picker).expect("import should succeed");
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Mei Lin");
        assert_eq!(contacts[1].name, "Omar Haddad");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn single_selection_truncates_to_one_record() {
        let path = temp_file("roster_clock_import_single.json");
        fs::write(
            &path,
            r#"[{"name": ["Mei Lin"]}, {"name": ["Omar Haddad"]}]"#,
        )
        .expect("fixture write");

        let picker = FilePicker::new(path.clone());
        let records = picker
            .select(&[PickerField::Name], false)
            .expect("selection should succeed");
        assert_eq!(records.len(), 1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn null_selection_is_cancelled() {
        let path = temp_file("roster_clock_import_null.json");
        fs::write(&path, "null").expect("fixture write");
        let picker = FilePicker::new(path.clone());
        assert!(matches!(
            pick_and_normalize(&picker),
            Err(PickerError::Cancelled)
        ));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_import_file_is_unavailable() {
        let path = temp_file("roster_clock_import_missing.json");
        let _ = fs::remove_file(&path);
        let picker = FilePicker::new(path);
        assert!(matches!(
            pick_and_normalize(&picker),
            Err(PickerError::Unavailable)
        ));
    }

    fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("{}_{}", name, std::process::id()));
        path
    }
}
