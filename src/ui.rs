use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration as StdDuration, Instant};

use chrono::{Local, Utc};
use crossterm::event::{self, Event as CEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, ExecutableCommand};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph};
use ratatui::{Frame, Terminal};

use crate::clock::{self, DayPhase};
use crate::domain::{ContactField, Roster, seed_contacts};
use crate::importer::{self, IMPORT_FILE_ENV, PickerCapability};
use crate::rosters::{recent_rosters, remember_roster};
use crate::storage::ContactStore;

const REFRESH_INTERVAL: StdDuration = StdDuration::from_millis(1000);
const POLL_INTERVAL: StdDuration = StdDuration::from_millis(250);
const DAY_COLOR: Color = Color::Yellow;
const NIGHT_COLOR: Color = Color::LightBlue;
const HIGHLIGHT_BACKGROUND_COLOR: Color = Color::Rgb(42, 45, 52);
const MAX_SWITCH_OPTIONS: usize = 20;

pub fn run_dashboard(
	roster: &mut Roster,
	store: &mut Option<ContactStore>,
	picker: &PickerCapability,
	roster_path: &mut PathBuf,
) -> Result<(), Box<dyn Error>> {
	enable_raw_mode()?;
	let mut stdout = io::stdout();
	stdout.execute(EnterAlternateScreen)?;
	let backend = CrosstermBackend::new(stdout);
	let mut terminal = Terminal::new(backend)?;

	let result = run_event_loop(&mut terminal, roster, store, picker, roster_path);

	disable_raw_mode()?;
	execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
	terminal.show_cursor()?;

	result
}

fn run_event_loop(
	terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
	roster: &mut Roster,
	store: &mut Option<ContactStore>,
	picker: &PickerCapability,
	roster_path: &mut PathBuf,
) -> Result<(), Box<dyn Error>> {
	let device_offset_minutes = clock::device_offset_minutes();
	let mut app = App::default();
	let mut rows = build_rows(roster, device_offset_minutes);
	let mut last_refresh = Instant::now();

	loop {
		// One tick per interval; a mutation forces the next tick early.
		// Each tick replaces the whole row list.
		if app.dirty || last_refresh.elapsed() >= REFRESH_INTERVAL {
			rows = build_rows(roster, device_offset_minutes);
			last_refresh = Instant::now();
			app.dirty = false;
		}
		app.clamp_selection(&rows);
		terminal.draw(|frame| draw_dashboard(frame, &app, &rows, roster_path))?;

		if event::poll(POLL_INTERVAL)? {
			if let CEvent::Key(key) = event::read()? {
				if key.kind != KeyEventKind::Press {
					continue;
				}

				let should_quit = match &app.mode {
					InputMode::Prompt(_) => handle_prompt_key(&mut app, key.code, roster, store),
					InputMode::Select(_) => {
						handle_select_key(&mut app, key.code, roster, store, roster_path)
					}
					InputMode::Normal => {
						handle_normal_key(&mut app, key.code, roster, store, picker, roster_path, &rows)
					}
				};

				if should_quit {
					break;
				}
			}
		}
	}

	Ok(())
}

fn build_rows(roster: &Roster, device_offset_minutes: i32) -> Vec<ContactRow> {
	let now = Utc::now();
	roster
		.contacts
		.iter()
		.map(|contact| {
			let derived = clock::derive_local_time(&contact.timezone, now, device_offset_minutes).ok();
			ContactRow {
				id: contact.id.clone(),
				name: contact.name.clone(),
				email: contact.email.clone(),
				place: contact.place.clone(),
				timezone: contact.timezone.clone(),
				has_icon: contact.icon.is_some(),
				clock_text: derived
					.map(|local| clock::format_clock(local.wall))
					.unwrap_or_else(|| "--:--:--".to_string()),
				offset_minutes: derived.map(|local| local.offset_minutes),
				phase: derived.map(|local| local.phase),
			}
		})
		.collect()
}

fn draw_dashboard(frame: &mut Frame, app: &App, rows: &[ContactRow], roster_path: &Path) {
	let layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([Constraint::Min(8), Constraint::Length(5)])
		.split(frame.area());

	let body = Layout::default()
		.direction(Direction::Horizontal)
		.constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
		.split(layout[0]);

	render_contacts_panel(frame, body[0], app, rows, roster_path);
	render_details_panel(frame, body[1], app, rows);
	render_footer(frame, layout[1], app);

	if let InputMode::Select(select) = &app.mode {
		render_select_popup(frame, select);
	}
}

fn render_contacts_panel(frame: &mut Frame, area: Rect, app: &App, rows: &[ContactRow], roster_path: &Path) {
	let items = rows
		.iter()
		.map(|row| ListItem::new(render_contact_line(row)))
		.collect::<Vec<_>>();

	let mut state = ListState::default();
	if !rows.is_empty() {
		state.select(Some(app.selected.min(rows.len() - 1)));
	}

	let title = format!("Contacts ({}) | {}", rows.len(), roster_path.display());
	let block = Block::default().borders(Borders::ALL).title(title);
	let list = List::new(if items.is_empty() {
		vec![ListItem::new("(no contacts; press a to add)")]
	} else {
		items
	})
	.block(block)
	.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR).add_modifier(Modifier::BOLD));

	frame.render_stateful_widget(list, area, &mut state);
}

fn render_contact_line(row: &ContactRow) -> Line<'static> {
	let phase_text = match row.phase {
		Some(DayPhase::Day) => "Day  ",
		Some(DayPhase::Night) => "Night",
		None => "--   ",
	};

	let mut spans = vec![
		Span::styled(format!("{:<8}", row.clock_text), phase_style(row.phase)),
		Span::styled(format!(" {phase_text} "), phase_style(row.phase)),
		Span::raw(row.name.clone()),
	];
	if let Some(place) = &row.place {
		spans.push(Span::styled(format!(" | {place}"), Style::default().fg(Color::DarkGray)));
	}

	Line::from(spans)
}

fn render_details_panel(frame: &mut Frame, area: Rect, app: &App, rows: &[ContactRow]) {
	let lines = match app.selected_row(rows) {
		Some(row) => {
			let timezone_text = if row.timezone.is_empty() {
				"(not set; press e to pick a timezone)".to_string()
			} else {
				match row.offset_minutes {
					Some(offset) => format!("{} ({offset:+} min from UTC)", row.timezone),
					None => format!("{} (unparseable)", row.timezone),
				}
			};
			let phase_text = row
				.phase
				.map(|phase| phase.to_string())
				.unwrap_or_else(|| "unknown".to_string());

			vec![
				Line::from(Span::styled(
					row.name.clone(),
					Style::default().add_modifier(Modifier::BOLD),
				)),
				Line::from(format!("Email:      {}", row.email.as_deref().unwrap_or("(none)"))),
				Line::from(format!("Place:      {}", row.place.as_deref().unwrap_or("(none)"))),
				Line::from(format!("Timezone:   {timezone_text}")),
				Line::from(vec![
					Span::raw("Local time: "),
					Span::styled(format!("{} {phase_text}", row.clock_text), phase_style(row.phase)),
				]),
				Line::from(format!("Icon:       {}", if row.has_icon { "attached" } else { "(none)" })),
				Line::from(format!("Id:         {}", row.id)),
			]
		}
		None => vec![Line::from("(no contact selected)")],
	};

	let details = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Details"));
	frame.render_widget(details, area);
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
	let footer_lines = match &app.mode {
		InputMode::Normal => vec![
			Line::from(
				"j/k or arrows navigate | a add | e edit | d delete | i import | g switch roster | q quit",
			),
			Line::from(format!(
				"Device {} | UTC {}",
				Local::now().format("%H:%M:%S"),
				Utc::now().format("%H:%M:%S")
			)),
			Line::from(app.status.clone()),
		],
		InputMode::Prompt(prompt) => vec![
			Line::from(prompt.title.clone()),
			Line::from(format!("> {}", prompt.input)),
			Line::from("Enter submit | Esc cancel"),
		],
		InputMode::Select(select) => vec![
			Line::from(select.title.clone()),
			Line::from(format!(
				"Selected: {}",
				select
					.selected_option()
					.map(|option| option.label.as_str())
					.unwrap_or("(none)")
			)),
			Line::from("j/k or arrows move | Enter choose | Esc cancel"),
		],
	};

	let footer = Paragraph::new(footer_lines).block(Block::default().borders(Borders::ALL).title("Roster Clock"));
	frame.render_widget(footer, area);
}

fn render_select_popup(frame: &mut Frame, select: &SelectState) {
	let area = centered_rect(62, 55, frame.area());
	frame.render_widget(Clear, area);

	let items = if select.options.is_empty() {
		vec![ListItem::new("(no choices)")]
	} else {
		select
			.options
			.iter()
			.map(|option| ListItem::new(option.label.clone()))
			.collect::<Vec<_>>()
	};

	let list = List::new(items)
		.block(Block::default().borders(Borders::ALL).title(select.title.clone()))
		.highlight_symbol(">> ")
		.highlight_style(Style::default().bg(HIGHLIGHT_BACKGROUND_COLOR));

	let mut state = ListState::default();
	if !select.options.is_empty() {
		state.select(Some(select.selected.min(select.options.len().saturating_sub(1))));
	}
	frame.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
	let popup_layout = Layout::default()
		.direction(Direction::Vertical)
		.constraints([
			Constraint::Percentage((100 - percent_y) / 2),
			Constraint::Percentage(percent_y),
			Constraint::Percentage((100 - percent_y) / 2),
		])
		.split(area);
	Layout::default()
		.direction(Direction::Horizontal)
		.constraints([
			Constraint::Percentage((100 - percent_x) / 2),
			Constraint::Percentage(percent_x),
			Constraint::Percentage((100 - percent_x) / 2),
		])
		.split(popup_layout[1])[1]
}

fn handle_normal_key(
	app: &mut App,
	code: KeyCode,
	roster: &mut Roster,
	store: &Option<ContactStore>,
	picker: &PickerCapability,
	roster_path: &Path,
	rows: &[ContactRow],
) -> bool {
	match code {
		KeyCode::Char('q') | KeyCode::Esc => true,
		KeyCode::Up | KeyCode::Char('k') => {
			app.move_selection(-1, rows);
			false
		}
		KeyCode::Down | KeyCode::Char('j') => {
			app.move_selection(1, rows);
			false
		}
		KeyCode::Char('a') => {
			app.mode = InputMode::Prompt(PromptState::new("Contact name", PromptKind::AddName));
			false
		}
		KeyCode::Char('e') => {
			match app.selected_row(rows) {
				Some(row) => match build_edit_field_select(roster, &row.id) {
					Ok(select) => app.mode = InputMode::Select(select),
					Err(err) => app.status = err,
				},
				None => app.status = "Select a contact first".to_string(),
			}
			false
		}
		KeyCode::Char('d') => {
			match app.selected_row(rows) {
				Some(row) => {
					app.mode = InputMode::Select(build_delete_confirm_select(&row.id, &row.name));
				}
				None => app.status = "Select a contact first".to_string(),
			}
			false
		}
		KeyCode::Char('i') => {
			app.status = match import_contacts(picker, roster, store) {
				Ok(message) => message,
				Err(err) => format!("error: {err}"),
			};
			app.dirty = true;
			false
		}
		KeyCode::Char('g') => {
			match build_roster_switch_select(roster_path) {
				Ok(select) => app.mode = InputMode::Select(select),
				Err(err) => app.status = err,
			}
			false
		}
		_ => false,
	}
}

fn handle_prompt_key(
	app: &mut App,
	code: KeyCode,
	roster: &mut Roster,
	store: &Option<ContactStore>,
) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Input cancelled".to_string();
		}
		KeyCode::Backspace => {
			if let InputMode::Prompt(prompt) = &mut app.mode {
				prompt.input.pop();
			}
		}
		KeyCode::Char(value) => {
			if let InputMode::Prompt(prompt) = &mut app.mode {
				prompt.input.push(value);
			}
		}
		KeyCode::Enter => {
			let prompt = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Prompt(prompt) => prompt,
				InputMode::Normal | InputMode::Select(_) => return false,
			};

			match submit_prompt(prompt.clone(), roster, store) {
				Ok(PromptOutcome::NextPrompt(next_prompt)) => app.mode = InputMode::Prompt(next_prompt),
				Ok(PromptOutcome::Done(message)) => {
					app.mode = InputMode::Normal;
					app.status = message;
					app.dirty = true;
				}
				Err(err) => {
					app.mode = InputMode::Prompt(prompt);
					app.status = format!("error: {err}");
				}
			}
		}
		_ => {}
	}

	false
}

fn handle_select_key(
	app: &mut App,
	code: KeyCode,
	roster: &mut Roster,
	store: &mut Option<ContactStore>,
	roster_path: &mut PathBuf,
) -> bool {
	match code {
		KeyCode::Esc => {
			app.mode = InputMode::Normal;
			app.status = "Selection cancelled".to_string();
		}
		KeyCode::Up | KeyCode::Char('k') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(-1);
			}
		}
		KeyCode::Down | KeyCode::Char('j') => {
			if let InputMode::Select(select) = &mut app.mode {
				select.move_selection(1);
			}
		}
		KeyCode::Enter => {
			let select = match std::mem::replace(&mut app.mode, InputMode::Normal) {
				InputMode::Select(select) => select,
				_ => return false,
			};

			match submit_select(select.clone(), roster, store, roster_path) {
				Ok(SelectOutcome::NextPrompt(prompt)) => app.mode = InputMode::Prompt(prompt),
				Ok(SelectOutcome::Done(message)) => {
					app.mode = InputMode::Normal;
					app.status = message;
					app.dirty = true;
				}
				Err(err) => {
					app.mode = InputMode::Select(select);
					app.status = format!("error: {err}");
				}
			}
		}
		_ => {}
	}

	false
}

fn submit_prompt(
	prompt: PromptState,
	roster: &mut Roster,
	store: &Option<ContactStore>,
) -> Result<PromptOutcome, String> {
	match prompt.kind {
		PromptKind::AddName => {
			let name = required_text(&prompt.input, "contact name")?;
			Ok(PromptOutcome::NextPrompt(PromptState::new(
				"Email (optional)",
				PromptKind::AddEmail { name },
			)))
		}
		PromptKind::AddEmail { name } => {
			let email = optional_text(&prompt.input);
			Ok(PromptOutcome::NextPrompt(PromptState::new(
				"Timezone (e.g. GMT-5)",
				PromptKind::AddTimezone { name, email },
			)))
		}
		PromptKind::AddTimezone { name, email } => {
			let timezone = required_text(&prompt.input, "timezone")?;
			clock::offset_minutes(&timezone).map_err(|err| err.to_string())?;
			Ok(PromptOutcome::NextPrompt(PromptState::new(
				"Place (optional)",
				PromptKind::AddPlace {
					name,
					email,
					timezone,
				},
			)))
		}
		PromptKind::AddPlace {
			name,
			email,
			timezone,
		} => {
			let place = optional_text(&prompt.input);
			let added_name = name.clone();
			roster.add_contact(name, timezone, email, place)?;
			Ok(PromptOutcome::Done(persist_message(
				store,
				roster,
				format!("added {added_name}"),
			)))
		}
		PromptKind::EditField { id, field } => {
			let input = prompt.input;
			let (name, email, timezone, place) = match field {
				ContactField::Name => (Some(required_text(&input, "contact name")?), None, None, None),
				ContactField::Email => (None, Some(input), None, None),
				ContactField::Timezone => (None, None, Some(required_text(&input, "timezone")?), None),
				ContactField::Place => (None, None, None, Some(input)),
			};
			roster.update_contact(&id, name, email, timezone, place)?;
			Ok(PromptOutcome::Done(persist_message(
				store,
				roster,
				format!("updated {}", field.label()),
			)))
		}
	}
}

fn submit_select(
	select: SelectState,
	roster: &mut Roster,
	store: &mut Option<ContactStore>,
	roster_path: &mut PathBuf,
) -> Result<SelectOutcome, String> {
	let selected_value = select
		.selected_option()
		.map(|option| option.value.clone())
		.ok_or_else(|| "no option selected".to_string())?;

	match select.kind {
		SelectKind::EditField { id } => {
			let field = match selected_value.as_str() {
				"name" => ContactField::Name,
				"email" => ContactField::Email,
				"timezone" => ContactField::Timezone,
				_ => ContactField::Place,
			};
			let title = match field {
				ContactField::Name => "New name",
				ContactField::Email => "New email (empty clears)",
				ContactField::Timezone => "New timezone (e.g. GMT+8)",
				ContactField::Place => "New place (empty clears)",
			};
			Ok(SelectOutcome::NextPrompt(PromptState::new(
				title,
				PromptKind::EditField { id, field },
			)))
		}
		SelectKind::DeleteConfirm { id, name } => {
			if selected_value == "delete" {
				roster.remove_contact(&id)?;
				Ok(SelectOutcome::Done(persist_message(
					store,
					roster,
					format!("deleted {name}"),
				)))
			} else {
				Ok(SelectOutcome::Done("Delete cancelled".to_string()))
			}
		}
		SelectKind::RosterSwitch => {
			let next_path = PathBuf::from(selected_value);
			switch_roster(roster, store, roster_path, next_path).map(SelectOutcome::Done)
		}
	}
}

fn build_edit_field_select(roster: &Roster, id: &str) -> Result<SelectState, String> {
	let contact = roster
		.contact(id)
		.ok_or_else(|| format!("contact not found: {id}"))?;

	let options = vec![
		SelectOption::new(format!("name: {}", contact.name), "name"),
		SelectOption::new(
			format!("email: {}", contact.email.as_deref().unwrap_or("(none)")),
			"email",
		),
		SelectOption::new(
			format!(
				"timezone: {}",
				if contact.timezone.is_empty() {
					"(not set)"
				} else {
					&contact.timezone
				}
			),
			"timezone",
		),
		SelectOption::new(
			format!("place: {}", contact.place.as_deref().unwrap_or("(none)")),
			"place",
		),
	];

	Ok(SelectState::new(
		format!("Edit {}", contact.name),
		SelectKind::EditField { id: id.to_string() },
		options,
	))
}

fn build_delete_confirm_select(id: &str, name: &str) -> SelectState {
	SelectState::new(
		format!("Delete {name}?"),
		SelectKind::DeleteConfirm {
			id: id.to_string(),
			name: name.to_string(),
		},
		vec![
			SelectOption::new("Cancel", "cancel"),
			SelectOption::new("Delete contact", "delete"),
		],
	)
}

fn build_roster_switch_select(current_path: &Path) -> Result<SelectState, String> {
	let entries = recent_rosters(MAX_SWITCH_OPTIONS).map_err(|err| err.to_string())?;
	let options = entries
		.iter()
		.filter(|entry| entry.path.as_path() != current_path)
		.map(|entry| SelectOption::new(entry.label(), entry.path.display().to_string()))
		.collect::<Vec<_>>();

	if options.is_empty() {
		return Err("no other recent rosters; pass --roster <path> to open a new one".to_string());
	}

	Ok(SelectState::new("Switch roster", SelectKind::RosterSwitch, options))
}

fn switch_roster(
	roster: &mut Roster,
	store: &mut Option<ContactStore>,
	roster_path: &mut PathBuf,
	next_path: PathBuf,
) -> Result<String, String> {
	let next_store = ContactStore::open(&next_path).map_err(|err| err.to_string())?;
	let contacts = match next_store.load_all() {
		Ok(contacts) if contacts.is_empty() => seed_contacts(),
		Ok(contacts) => contacts,
		Err(err) => return Err(err.to_string()),
	};

	*roster = Roster::from_contacts(contacts);
	*store = Some(next_store);
	*roster_path = next_path.clone();
	let _ = remember_roster(&next_path, roster.contacts.len());

	Ok(format!("switched to {}", next_path.display()))
}

fn import_contacts(
	picker: &PickerCapability,
	roster: &mut Roster,
	store: &Option<ContactStore>,
) -> Result<String, String> {
	let PickerCapability::Available(picker) = picker else {
		return Err(format!("no contact picker available (set {IMPORT_FILE_ENV})"));
	};

	let contacts = importer::pick_and_normalize(picker.as_ref()).map_err(|err| err.to_string())?;
	if contacts.is_empty() {
		return Ok("import selected no contacts".to_string());
	}

	let count = roster.merge_imported(contacts);
	Ok(persist_message(
		store,
		roster,
		format!("imported {count} contact(s); set their timezones with e"),
	))
}

// Save failures are reported but never roll back the in-memory roster.
fn persist_message(store: &Option<ContactStore>, roster: &Roster, message: String) -> String {
	match persist(store.as_ref(), roster) {
		Ok(()) => message,
		Err(err) => format!("{message} (not saved: {err})"),
	}
}

fn persist(store: Option<&ContactStore>, roster: &Roster) -> Result<(), String> {
	let store = store.ok_or_else(|| "contact store unavailable".to_string())?;
	store.save_all(&roster.contacts).map_err(|err| err.to_string())
}

fn required_text(input: &str, field_name: &str) -> Result<String, String> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		return Err(format!("{field_name} must not be empty"));
	}
	Ok(trimmed.to_string())
}

fn optional_text(input: &str) -> Option<String> {
	let trimmed = input.trim();
	if trimmed.is_empty() {
		None
	} else {
		Some(trimmed.to_string())
	}
}

fn phase_style(phase: Option<DayPhase>) -> Style {
	match phase {
		Some(DayPhase::Day) => Style::default().fg(DAY_COLOR),
		Some(DayPhase::Night) => Style::default().fg(NIGHT_COLOR),
		None => Style::default().fg(Color::DarkGray),
	}
}

#[derive(Debug, Clone)]
enum PromptOutcome {
	NextPrompt(PromptState),
	Done(String),
}

#[derive(Debug, Clone)]
enum SelectOutcome {
	NextPrompt(PromptState),
	Done(String),
}

#[derive(Debug, Clone)]
struct PromptState {
	title: String,
	input: String,
	kind: PromptKind,
}

impl PromptState {
	fn new(title: impl Into<String>, kind: PromptKind) -> Self {
		Self {
			title: title.into(),
			input: String::new(),
			kind,
		}
	}
}

#[derive(Debug, Clone)]
struct SelectState {
	title: String,
	options: Vec<SelectOption>,
	selected: usize,
	kind: SelectKind,
}

impl SelectState {
	fn new(title: impl Into<String>, kind: SelectKind, options: Vec<SelectOption>) -> Self {
		Self {
			title: title.into(),
			options,
			selected: 0,
			kind,
		}
	}

	fn move_selection(&mut self, delta: i32) {
		if self.options.is_empty() {
			self.selected = 0;
			return;
		}

		if delta > 0 {
			self.selected = (self.selected + delta as usize).min(self.options.len() - 1);
		} else {
			self.selected = self.selected.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_option(&self) -> Option<&SelectOption> {
		self.options.get(self.selected)
	}
}

#[derive(Debug, Clone)]
struct SelectOption {
	label: String,
	value: String,
}

impl SelectOption {
	fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			value: value.into(),
		}
	}
}

#[derive(Debug, Clone)]
enum PromptKind {
	AddName,
	AddEmail {
		name: String,
	},
	AddTimezone {
		name: String,
		email: Option<String>,
	},
	AddPlace {
		name: String,
		email: Option<String>,
		timezone: String,
	},
	EditField {
		id: String,
		field: ContactField,
	},
}

#[derive(Debug, Clone)]
enum SelectKind {
	EditField {
		id: String,
	},
	DeleteConfirm {
		id: String,
		name: String,
	},
	RosterSwitch,
}

#[derive(Debug, Clone)]
enum InputMode {
	Normal,
	Prompt(PromptState),
	Select(SelectState),
}

#[derive(Debug, Clone)]
struct App {
	selected: usize,
	mode: InputMode,
	status: String,
	dirty: bool,
}

impl Default for App {
	fn default() -> Self {
		Self {
			selected: 0,
			mode: InputMode::Normal,
			status: "Ready".to_string(),
			dirty: false,
		}
	}
}

impl App {
	fn clamp_selection(&mut self, rows: &[ContactRow]) {
		if rows.is_empty() {
			self.selected = 0;
		} else {
			self.selected = self.selected.min(rows.len() - 1);
		}
	}

	fn move_selection(&mut self, delta: i32, rows: &[ContactRow]) {
		if rows.is_empty() {
			self.selected = 0;
			return;
		}

		if delta > 0 {
			self.selected = (self.selected + delta as usize).min(rows.len() - 1);
		} else {
			self.selected = self.selected.saturating_sub(delta.unsigned_abs() as usize);
		}
	}

	fn selected_row<'rows>(&self, rows: &'rows [ContactRow]) -> Option<&'rows ContactRow> {
		rows.get(self.selected)
	}
}

#[derive(Debug, Clone)]
struct ContactRow {
	id: String,
	name: String,
	email: Option<String>,
	place: Option<String>,
	timezone: String,
	has_icon: bool,
	clock_text: String,
	offset_minutes: Option<i32>,
	phase: Option<DayPhase>,
}
