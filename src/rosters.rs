use std::env;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const STATE_FILE: &str = "recent_rosters.json";
const DEFAULT_ROSTER_FILE: &str = "contacts.json";
const MAX_RECENT_ROSTERS: usize = 20;

// One remembered roster file, newest first in the state document. The
// contact count is a hint for the switch popup and may lag the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
	pub path: PathBuf,
	pub contacts: usize,
	pub opened_at: DateTime<Utc>,
}

impl RosterEntry {
	pub fn label(&self) -> String {
		format!("{} ({} contacts)", self.path.display(), self.contacts)
	}
}

// Flag, then env, then the most recently opened roster, then a per-user
// default; a fresh machine opens the default without any arguments.
pub fn resolve_roster_path(cli_path: Option<PathBuf>) -> PathBuf {
	if let Some(path) = cli_path {
		return absolutize(path);
	}

	if let Some(path) = env::var_os("ROSTER_CLOCK_FILE") {
		let path = PathBuf::from(path);
		if !path.as_os_str().is_empty() {
			return absolutize(path);
		}
	}

	if let Ok(mut recent) = recent_rosters(1) {
		if let Some(entry) = recent.pop() {
			return entry.path;
		}
	}

	state_dir().join(DEFAULT_ROSTER_FILE)
}

pub fn remember_roster(path: &Path, contacts: usize) -> Result<(), std::io::Error> {
	remember_in(&state_dir(), path, contacts)
}

pub fn recent_rosters(limit: usize) -> Result<Vec<RosterEntry>, std::io::Error> {
	let mut entries = load_entries(&state_dir())?;
	entries.truncate(limit);
	Ok(entries)
}

fn remember_in(state_dir: &Path, path: &Path, contacts: usize) -> Result<(), std::io::Error> {
	let path = absolutize(path.to_path_buf());
	let mut entries = load_entries(state_dir)?;
	entries.retain(|entry| entry.path != path);
	entries.insert(
		0,
		RosterEntry {
			path,
			contacts,
			opened_at: Utc::now(),
		},
	);
	entries.truncate(MAX_RECENT_ROSTERS);
	save_entries(state_dir, &entries)
}

fn load_entries(state_dir: &Path) -> Result<Vec<RosterEntry>, std::io::Error> {
	let raw = match fs::read_to_string(state_dir.join(STATE_FILE)) {
		Ok(raw) => raw,
		Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
		Err(err) => return Err(err),
	};

	// A corrupt state document only costs the recents list.
	Ok(serde_json::from_str(&raw).unwrap_or_default())
}

fn save_entries(state_dir: &Path, entries: &[RosterEntry]) -> Result<(), std::io::Error> {
	fs::create_dir_all(state_dir)?;
	let encoded = serde_json::to_string_pretty(entries)
		.map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;
	fs::write(state_dir.join(STATE_FILE), encoded)
}

fn state_dir() -> PathBuf {
	if let Some(path) = env::var_os("ROSTER_CLOCK_STATE_DIR") {
		return PathBuf::from(path);
	}

	#[cfg(target_os = "windows")]
	{
		if let Some(path) = env::var_os("LOCALAPPDATA") {
			return PathBuf::from(path).join("roster_clock");
		}
	}

	if let Some(path) = env::var_os("XDG_STATE_HOME") {
		return PathBuf::from(path).join("roster_clock");
	}

	if let Some(path) = env::var_os("HOME") {
		return PathBuf::from(path)
			.join(".local")
			.join("state")
			.join("roster_clock");
	}

	PathBuf::from(".roster_clock")
}

fn absolutize(path: PathBuf) -> PathBuf {
	let path = if path.is_absolute() {
		path
	} else if let Ok(cwd) = env::current_dir() {
		cwd.join(path)
	} else {
		path
	};

	if path.exists() {
		fs::canonicalize(&path).unwrap_or(path)
	} else {
		path
	}
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::path::PathBuf;

	use super::{MAX_RECENT_ROSTERS, STATE_FILE, load_entries, remember_in};

	#[test]
	fn remembers_newest_first_with_metadata() {
		let state_dir = temp_state_dir("recent_order");
		remember_in(&state_dir, &state_dir.join("home.json"), 4).expect("remember should work");
		remember_in(&state_dir, &state_dir.join("work.json"), 12).expect("remember should work");

		let entries = load_entries(&state_dir).expect("load should work");
		assert_eq!(entries.len(), 2);
		assert!(entries[0].path.ends_with("work.json"));
		assert_eq!(entries[0].contacts, 12);
		assert!(entries[0].label().contains("12 contacts"));
		assert!(entries[1].path.ends_with("home.json"));
		let _ = fs::remove_dir_all(state_dir);
	}

	#[test]
	fn reopening_a_roster_moves_it_to_the_front_once() {
		let state_dir = temp_state_dir("recent_dedup");
		let home = state_dir.join("home.json");
		remember_in(&state_dir, &home, 4).expect("remember should work");
		remember_in(&state_dir, &state_dir.join("work.json"), 12).expect("remember should work");
		remember_in(&state_dir, &home, 5).expect("remember should work");

		let entries = load_entries(&state_dir).expect("load should work");
		assert_eq!(entries.len(), 2);
		assert!(entries[0].path.ends_with("home.json"));
		assert_eq!(entries[0].contacts, 5);
		let _ = fs::remove_dir_all(state_dir);
	}

	#[test]
	fn recents_list_is_capped() {
		let state_dir = temp_state_dir("recent_cap");
		for index in 0..MAX_RECENT_ROSTERS + 5 {
			remember_in(&state_dir, &state_dir.join(format!("roster{index}.json")), index)
				.expect("remember should work");
		}

		let entries = load_entries(&state_dir).expect("load should work");
		assert_eq!(entries.len(), MAX_RECENT_ROSTERS);
		assert!(entries[0].path.ends_with(format!("roster{}.json", MAX_RECENT_ROSTERS + 4)));
		let _ = fs::remove_dir_all(state_dir);
	}

	#[test]
	fn missing_or_corrupt_state_loads_as_empty() {
		let state_dir = temp_state_dir("recent_corrupt");
		assert!(load_entries(&state_dir).expect("load should work").is_empty());

		fs::create_dir_all(&state_dir).expect("state dir");
		fs::write(state_dir.join(STATE_FILE), "{ not json").expect("fixture write");
		assert!(load_entries(&state_dir).expect("load should work").is_empty());
		let _ = fs::remove_dir_all(state_dir);
	}

	fn temp_state_dir(name: &str) -> PathBuf {
		let dir = std::env::temp_dir().join(format!(
			"roster_clock_{}_{}",
			name,
			std::process::id()
		));
		let _ = fs::remove_dir_all(&dir);
		dir
	}
}
