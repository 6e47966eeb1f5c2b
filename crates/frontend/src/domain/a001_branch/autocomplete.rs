//! Branch autocomplete state machine, one per form row
//!
//! `Idle -> Searching -> Showing -> Selected`. The list hides a fixed delay
//! after blur so a click on a suggestion still lands. Whether the row's shop
//! code is locked is row state, not part of this machine.

use super::directory::{BranchDirectory, BranchRecord};

/// Delay between blur and hiding the suggestion list
pub const BLUR_HIDE_MS: f64 = 200.0;

/// Shop-code lookups start at this many characters
pub const MIN_CODE_LOOKUP_LEN: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompletePhase {
    Idle,
    Searching {
        term: String,
    },
    Showing {
        term: String,
        suggestions: Vec<BranchRecord>,
        highlight: Option<usize>,
    },
    Selected {
        record: BranchRecord,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

impl NavKey {
    /// Maps `KeyboardEvent.key`
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" => Some(NavKey::Down),
            "ArrowUp" => Some(NavKey::Up),
            "Enter" => Some(NavKey::Enter),
            "Escape" => Some(NavKey::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Autocomplete {
    phase: AutocompletePhase,
    /// Blur whose delayed hide is still due
    pending_hide: Option<u64>,
    blur_seq: u64,
}

impl Default for Autocomplete {
    fn default() -> Self {
        Self {
            phase: AutocompletePhase::Idle,
            pending_hide: None,
            blur_seq: 0,
        }
    }
}

impl Autocomplete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &AutocompletePhase {
        &self.phase
    }

    /// Text typed into the branch input. Returns the term to search for,
    /// or `None` when the input is blank and the row went back to idle.
    pub fn input(&mut self, text: &str) -> Option<String> {
        self.pending_hide = None;
        let term = text.trim();
        if term.is_empty() {
            self.phase = AutocompletePhase::Idle;
            return None;
        }
        self.phase = AutocompletePhase::Searching {
            term: term.to_string(),
        };
        Some(term.to_string())
    }

    /// Focus re-runs the search for non-blank text
    pub fn focus(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() {
            self.pending_hide = None;
            return None;
        }
        self.input(text)
    }

    /// Applies search results for `term`. Results for a term the input no
    /// longer holds are dropped.
    pub fn show_results(&mut self, term: &str, suggestions: Vec<BranchRecord>) -> bool {
        let current = match &self.phase {
            AutocompletePhase::Searching { term } | AutocompletePhase::Showing { term, .. } => term,
            _ => return false,
        };
        if current != term {
            return false;
        }
        self.phase = AutocompletePhase::Showing {
            term: term.to_string(),
            suggestions,
            highlight: None,
        };
        true
    }

    /// Keyboard navigation. Returns the record committed by Enter.
    pub fn key(&mut self, key: NavKey) -> Option<BranchRecord> {
        match key {
            NavKey::Escape => {
                if self.list_visible() {
                    self.phase = AutocompletePhase::Idle;
                }
                None
            }
            NavKey::Down | NavKey::Up => {
                if let AutocompletePhase::Showing {
                    suggestions,
                    highlight,
                    ..
                } = &mut self.phase
                {
                    if suggestions.is_empty() {
                        return None;
                    }
                    let last = suggestions.len() - 1;
                    *highlight = match (key, *highlight) {
                        (NavKey::Down, None) => Some(0),
                        (NavKey::Down, Some(i)) => Some((i + 1).min(last)),
                        (_, None) | (_, Some(0)) => None,
                        (_, Some(i)) => Some(i - 1),
                    };
                }
                None
            }
            NavKey::Enter => {
                let chosen = match &self.phase {
                    AutocompletePhase::Showing {
                        suggestions,
                        highlight: Some(i),
                        ..
                    } => suggestions.get(*i).cloned(),
                    _ => None,
                };
                if let Some(record) = &chosen {
                    self.select(record.clone());
                }
                chosen
            }
        }
    }

    /// Click on a suggestion or an exact shop-code match
    pub fn select(&mut self, record: BranchRecord) {
        self.pending_hide = None;
        self.phase = AutocompletePhase::Selected { record };
    }

    /// Starts the delayed hide of a visible list. The caller waits
    /// `BLUR_HIDE_MS` and then hands the returned ticket to `blur_elapsed`.
    pub fn blur(&mut self) -> Option<u64> {
        if !self.list_visible() {
            return None;
        }
        self.blur_seq += 1;
        self.pending_hide = Some(self.blur_seq);
        self.pending_hide
    }

    /// Hides the list unless typing, focus or a selection happened after
    /// the blur that issued `ticket`; true when it did
    pub fn blur_elapsed(&mut self, ticket: u64) -> bool {
        if self.pending_hide != Some(ticket) {
            return false;
        }
        self.pending_hide = None;
        if self.list_visible() {
            self.phase = AutocompletePhase::Idle;
            return true;
        }
        false
    }

    pub fn list_visible(&self) -> bool {
        matches!(self.phase, AutocompletePhase::Showing { .. })
    }

    pub fn suggestions(&self) -> &[BranchRecord] {
        match &self.phase {
            AutocompletePhase::Showing { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    pub fn highlight(&self) -> Option<usize> {
        match &self.phase {
            AutocompletePhase::Showing { highlight, .. } => *highlight,
            _ => None,
        }
    }

    /// The list is open but nothing matched: the UI offers a new branch
    pub fn offers_new_branch(&self) -> bool {
        matches!(&self.phase, AutocompletePhase::Showing { suggestions, .. } if suggestions.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeLookup {
    TooShort,
    Found(BranchRecord),
    /// No local match; ask the server
    Remote(String),
    NotFound,
}

/// Shop code typed by the user: local exact match first, then the server
pub fn lookup_code(directory: &BranchDirectory, code: &str, remote: bool) -> CodeLookup {
    let code = code.trim();
    if code.chars().count() < MIN_CODE_LOOKUP_LEN {
        return CodeLookup::TooShort;
    }
    match directory.lookup_by_code(code) {
        Some(record) => CodeLookup::Found(record.clone()),
        None if remote => CodeLookup::Remote(code.to_string()),
        None => CodeLookup::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, code: &str) -> BranchRecord {
        BranchRecord {
            name: name.to_string(),
            shop_code: code.to_string(),
            locked: true,
        }
    }

    fn showing(n: usize) -> Autocomplete {
        let mut ac = Autocomplete::new();
        let term = ac.input("ma").unwrap();
        let suggestions = (0..n).map(|i| record(&format!("Mall {}", i), "")).collect();
        assert!(ac.show_results(&term, suggestions));
        ac
    }

    #[test]
    fn test_arrow_down_clamps_at_last() {
        let mut ac = showing(3);
        for _ in 0..4 {
            ac.key(NavKey::Down);
        }
        assert_eq!(ac.highlight(), Some(2));
    }

    #[test]
    fn test_arrow_up_clamps_at_none() {
        let mut ac = showing(3);
        ac.key(NavKey::Down);
        ac.key(NavKey::Up);
        ac.key(NavKey::Up);
        assert_eq!(ac.highlight(), None);
        assert!(ac.list_visible());
    }

    #[test]
    fn test_enter_commits_highlighted() {
        let mut ac = showing(3);
        assert_eq!(ac.key(NavKey::Enter), None);
        ac.key(NavKey::Down);
        ac.key(NavKey::Down);
        let chosen = ac.key(NavKey::Enter).unwrap();
        assert_eq!(chosen.name, "Mall 1");
        assert!(matches!(ac.phase(), AutocompletePhase::Selected { .. }));
        assert!(!ac.list_visible());
    }

    #[test]
    fn test_escape_hides_list() {
        let mut ac = showing(2);
        ac.key(NavKey::Escape);
        assert_eq!(ac.phase(), &AutocompletePhase::Idle);
    }

    #[test]
    fn test_blank_input_goes_idle() {
        let mut ac = showing(2);
        assert_eq!(ac.input("   "), None);
        assert_eq!(ac.phase(), &AutocompletePhase::Idle);
    }

    #[test]
    fn test_stale_results_are_dropped() {
        let mut ac = Autocomplete::new();
        let old = ac.input("ma").unwrap();
        ac.input("mal");
        assert!(!ac.show_results(&old, vec![record("Mall", "1")]));
        assert!(matches!(ac.phase(), AutocompletePhase::Searching { term } if term == "mal"));
    }

    #[test]
    fn test_list_survives_blur_until_delay() {
        let mut ac = showing(2);
        let ticket = ac.blur().unwrap();
        assert!(ac.list_visible());
        assert_eq!(ac.suggestions().len(), 2);
        assert!(ac.blur_elapsed(ticket));
        assert!(!ac.list_visible());
        assert!(!ac.blur_elapsed(ticket));
    }

    #[test]
    fn test_click_after_blur_cancels_hide() {
        let mut ac = showing(2);
        let ticket = ac.blur().unwrap();
        ac.select(record("Mall 0", ""));
        assert!(!ac.blur_elapsed(ticket));
        assert!(matches!(ac.phase(), AutocompletePhase::Selected { .. }));
    }

    #[test]
    fn test_older_blur_does_not_hide_refreshed_list() {
        let mut ac = showing(2);
        let first = ac.blur().unwrap();
        ac.input("mal");
        assert!(ac.show_results("mal", vec![record("Mall", "1")]));
        let second = ac.blur().unwrap();
        assert!(!ac.blur_elapsed(first));
        assert!(ac.list_visible());
        assert!(ac.blur_elapsed(second));
        assert!(!ac.list_visible());
    }

    #[test]
    fn test_blur_without_list_schedules_nothing() {
        let mut ac = Autocomplete::new();
        assert_eq!(ac.blur(), None);
    }

    #[test]
    fn test_empty_results_offer_new_branch() {
        let ac = showing(0);
        assert!(ac.offers_new_branch());
        assert!(!showing(1).offers_new_branch());
    }

    #[test]
    fn test_lookup_code() {
        let mut dir = BranchDirectory::new();
        dir.upsert("Downtown", "123", true);
        assert_eq!(lookup_code(&dir, "1", true), CodeLookup::TooShort);
        assert!(matches!(lookup_code(&dir, "123", true), CodeLookup::Found(r) if r.name == "Downtown"));
        assert_eq!(lookup_code(&dir, "12", true), CodeLookup::Remote("12".to_string()));
        assert_eq!(lookup_code(&dir, "12", false), CodeLookup::NotFound);
    }
}
