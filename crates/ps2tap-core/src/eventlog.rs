use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EntryKind {
    Press,
    Release,
    /// Diagnostics: invalid frames, resync failures, overflow resets.
    Notice,
}

#[derive(Debug, Clone)]
pub struct EventEntry {
    pub timestamp: u64,
    pub kind: EntryKind,
    pub label: String,
    pub raw: Vec<u8>,
}

/// Bounded in-memory record of the current session. Nothing is persisted;
/// the store only feeds the live display and the end-of-run summary.
pub struct EventStore {
    entries: Vec<EventEntry>,
    max_entries: usize,
    filter_press: bool,
    filter_release: bool,
}

impl EventStore {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
            filter_press: true,
            filter_release: true,
        }
    }

    pub fn set_filter(&mut self, show_press: bool, show_release: bool) {
        self.filter_press = show_press;
        self.filter_release = show_release;
    }

    pub fn push(&mut self, kind: EntryKind, label: String, raw: Vec<u8>) {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        self.entries.push(EventEntry { timestamp, kind, label, raw });

        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    pub fn entries(&self) -> &[EventEntry] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn last(&self) -> Option<&EventEntry> {
        self.entries.last()
    }

    pub fn to_text(&self, show_timestamp: bool, show_hex: bool) -> String {
        let mut result = String::new();
        for entry in &self.entries {
            if (entry.kind == EntryKind::Press && !self.filter_press)
                || (entry.kind == EntryKind::Release && !self.filter_release)
            {
                continue;
            }
            result.push_str(&format_entry(entry, show_timestamp, show_hex));
            result.push('\n');
        }
        result
    }
}

/// Renders one entry the way the transcript does, without the trailing newline.
pub fn format_entry(entry: &EventEntry, show_timestamp: bool, show_hex: bool) -> String {
    let mut result = String::new();

    if show_timestamp {
        let millis = entry.timestamp % 1000;
        let total_secs = entry.timestamp / 1000;
        let hours = (total_secs / 3600) % 24;
        let minutes = (total_secs / 60) % 60;
        let seconds = total_secs % 60;
        result.push_str(&format!("[{hours:02}:{minutes:02}:{seconds:02}.{millis:03}] "));
    }

    let prefix = match entry.kind {
        EntryKind::Press => "DOWN ",
        EntryKind::Release => "UP   ",
        EntryKind::Notice => "---- ",
    };
    result.push_str(prefix);
    result.push_str(&entry.label);

    if show_hex && !entry.raw.is_empty() {
        result.push_str("  |");
        for byte in &entry.raw {
            result.push_str(&format!(" {byte:02X}"));
        }
    }
    result
}
