mod clock;
mod domain;
mod importer;
mod rosters;
mod storage;
mod ui;

use std::error::Error;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Parser, Subcommand};

use crate::clock::{derive_local_time, device_offset_minutes, format_clock};
use crate::domain::Roster;
use crate::importer::{FilePicker, PickerCapability, pick_and_normalize};
use crate::rosters::{recent_rosters, remember_roster, resolve_roster_path};
use crate::storage::{ContactStore, load_contacts_or_seed};
use crate::ui::run_dashboard;

#[derive(Debug, Parser)]
#[command(name = "roster-clock", about = "Terminal-first contact world clock")]
struct Cli {
	#[arg(long)]
	roster: Option<PathBuf>,
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
	Init,
	Dashboard,
	Add {
		#[arg(long)]
		name: String,
		#[arg(long)]
		timezone: String,
		#[arg(long)]
		email: Option<String>,
		#[arg(long)]
		place: Option<String>,
	},
	Edit {
		#[arg(long)]
		id: String,
		#[arg(long)]
		name: Option<String>,
		#[arg(long)]
		email: Option<String>,
		#[arg(long)]
		timezone: Option<String>,
		#[arg(long)]
		place: Option<String>,
	},
	Remove {
		#[arg(long)]
		id: String,
	},
	List,
	Times,
	Import {
		#[arg(long)]
		file: PathBuf,
	},
	Rosters {
		#[arg(long, default_value_t = 20)]
		limit: usize,
	},
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> Result<(), Box<dyn Error>> {
	let cli = Cli::parse();

	if let Some(Command::Rosters { limit }) = &cli.command {
		print_recent_rosters(*limit)?;
		return Ok(());
	}

	let mut roster_path = resolve_roster_path(cli.roster);
	let mut store = match ContactStore::open(&roster_path) {
		Ok(store) => Some(store),
		Err(err) => {
			eprintln!("warning: {err}; changes will not be persisted");
			None
		}
	};
	let mut roster = Roster::from_contacts(load_contacts_or_seed(store.as_ref()));
	if let Err(err) = remember_roster(&roster_path, roster.contacts.len()) {
		eprintln!("warning: failed to store recent roster: {err}");
	}

	match cli.command.unwrap_or(Command::Dashboard) {
		Command::Init => {
			save_or_warn(store.as_ref(), &roster);
			println!("initialized roster at {}", roster_path.display());
		}
		Command::Dashboard => {
			let picker = PickerCapability::detect();
			run_dashboard(&mut roster, &mut store, &picker, &mut roster_path)?;
		}
		Command::Add {
			name,
			timezone,
			email,
			place,
		} => {
			let id = roster.add_contact(name, timezone, email, place)?;
			save_or_warn(store.as_ref(), &roster);
			println!("added contact {id}");
		}
		Command::Edit {
			id,
			name,
			email,
			timezone,
			place,
		} => {
			roster.update_contact(&id, name, email, timezone, place)?;
			save_or_warn(store.as_ref(), &roster);
			println!("updated contact {id}");
		}
		Command::Remove { id } => {
			let removed = roster.remove_contact(&id)?;
			save_or_warn(store.as_ref(), &roster);
			println!("removed {}", removed.name);
		}
		Command::List => {
			print_contacts(&roster);
		}
		Command::Times => {
			print_local_times(&roster);
		}
		Command::Import { file } => {
			let picker = FilePicker::new(file);
			let contacts = pick_and_normalize(&picker)?;
			let count = roster.merge_imported(contacts);
			save_or_warn(store.as_ref(), &roster);
			println!("imported {count} contact(s); set their timezones with `edit`");
		}
		Command::Rosters { .. } => {}
	}

	Ok(())
}

// Persistence failure is never fatal; the in-memory change stands and the
// user is told the durable copy is behind.
fn save_or_warn(store: Option<&ContactStore>, roster: &Roster) {
	match store {
		Some(store) => {
			if let Err(err) = store.save_all(&roster.contacts) {
				eprintln!("warning: {err}; the change was not persisted");
			}
		}
		None => eprintln!("warning: contact store unavailable; the change was not persisted"),
	}
}

fn print_recent_rosters(limit: usize) -> Result<(), Box<dyn Error>> {
	let rows = recent_rosters(limit)?;
	if rows.is_empty() {
		println!("no recent rosters");
		return Ok(());
	}

	for (index, entry) in rows.iter().enumerate() {
		println!(
			"{:>2}. {} | opened {}",
			index + 1,
			entry.label(),
			entry.opened_at.format("%Y-%m-%d %H:%M")
		);
	}

	Ok(())
}

fn print_contacts(roster: &Roster) {
	if roster.contacts.is_empty() {
		println!("no contacts yet");
		return;
	}

	for contact in &roster.contacts {
		println!(
			"{} | {} | {} | {} | {}",
			contact.id,
			contact.name,
			contact.email.as_deref().unwrap_or("(no email)"),
			if contact.timezone.is_empty() {
				"(no timezone)"
			} else {
				&contact.timezone
			},
			contact.display_place()
		);
	}
}

fn print_local_times(roster: &Roster) {
	if roster.contacts.is_empty() {
		println!("no contacts yet");
		return;
	}

	let now = Utc::now();
	let device_offset = device_offset_minutes();
	for contact in &roster.contacts {
		match derive_local_time(&contact.timezone, now, device_offset) {
			Ok(local) => println!(
				"{} {:<5} | {} | {} | {}",
				format_clock(local.wall),
				local.phase.to_string(),
				contact.name,
				contact.timezone,
				contact.display_place()
			),
			Err(err) => println!("--:--:-- --    | {} | {err}", contact.name),
		}
	}
}
