use rand::{Rng, distributions::Alphanumeric, thread_rng};
use serde::{Deserialize, Serialize};

use crate::clock;

const ID_LEN: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub place: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
}

impl Contact {
    pub fn display_place(&self) -> &str {
        self.place.as_deref().unwrap_or("(no place)")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Timezone,
    Place,
}

impl ContactField {
    pub fn label(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Timezone => "timezone",
            ContactField::Place => "place",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    pub contacts: Vec<Contact>,
}

impl Roster {
    pub fn new() -> Self {
        Self {
            contacts: Vec::new(),
        }
    }

    pub fn from_contacts(contacts: Vec<Contact>) -> Self {
        Self { contacts }
    }

    pub fn contact(&self, id: &str) -> Option<&Contact> {
        self.contacts.iter().find(|contact| contact.id == id)
    }

    pub fn add_contact(
        &mut self,
        name: String,
        timezone: String,
        email: Option<String>,
        place: Option<String>,
    ) -> Result<String, String> {
        if name.trim().is_empty() {
            return Err("contact name must not be empty".to_string());
        }
        clock::offset_minutes(&timezone).map_err(|err| err.to_string())?;

        let id = generate_id();
        self.contacts.push(Contact {
            id: id.clone(),
            name,
            email,
            timezone,
            place,
            icon: None,
        });
        Ok(id)
    }

    pub fn update_contact(
        &mut self,
        id: &str,
        name: Option<String>,
        email: Option<String>,
        timezone: Option<String>,
        place: Option<String>,
    ) -> Result<(), String> {
        if let Some(name) = &name {
            if name.trim().is_empty() {
                return Err("contact name must not be empty".to_string());
            }
        }
        if let Some(timezone) = &timezone {
            clock::offset_minutes(timezone).map_err(|err| err.to_string())?;
        }

        let contact = self
            .contacts
            .iter_mut()
            .find(|contact| contact.id == id)
            .ok_or_else(|| format!("contact not found: {id}"))?;

        if let Some(name) = name {
            contact.name = name;
        }
        if let Some(email) = email {
            contact.email = if email.trim().is_empty() {
                None
            } else {
                Some(email)
            };
        }
        if let Some(timezone) = timezone {
            contact.timezone = timezone;
        }
        if let Some(place) = place {
            contact.place = if place.trim().is_empty() {
                None
            } else {
                Some(place)
            };
        }

        Ok(())
    }

    pub fn remove_contact(&mut self, id: &str) -> Result<Contact, String> {
        let index = self
            .contacts
            .iter()
            .position(|contact| contact.id == id)
            .ok_or_else(|| format!("contact not found: {id}"))?;
        Ok(self.contacts.remove(index))
    }

    pub fn merge_imported(&mut self, imported: Vec<Contact>) -> usize {
        let count = imported.len();
        self.contacts.extend(imported);
        count
    }
}

// First-run/demo fallback, also the fixture the storage tests reference.
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact {
            id: "seed0001".to_string(),
            name: "John Doe".to_string(),
            email: Some("john.doe@example.com".to_string()),
            timezone: "GMT-5".to_string(),
            place: Some("New York, USA".to_string()),
            icon: None,
        },
        Contact {
            id: "seed0002".to_string(),
            name: "Ines Moreau".to_string(),
            email: Some("ines.moreau@example.com".to_string()),
            timezone: "GMT+1".to_string(),
            place: Some("Paris, France".to_string()),
            icon: None,
        },
        Contact {
            id: "seed0003".to_string(),
            name: "Akira Tanaka".to_string(),
            email: None,
            timezone: "GMT+9".to_string(),
            place: Some("Tokyo, Japan".to_string()),
            icon: None,
        },
        Contact {
            id: "seed0004".to_string(),
            name: "Lucia Alvarez".to_string(),
            email: None,
            timezone: "GMT-3".to_string(),
            place: Some("Buenos Aires, Argentina".to_string()),
            icon: None,
        },
    ]
}

pub fn generate_id() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_LEN)
        .map(char::from)
        .collect()
}
