//! Model entry rows of the data-entry form

use contracts::domain::a002_model_entry::EntryField;
use contracts::domain::a003_catalog::CatalogKind;

use super::cascade::{Dependent, DependentList, LoadStatus};
use super::images::{ImageFile, ImageSelection};
use super::validation::FormValidationError;
use crate::domain::a001_branch::autocomplete::Autocomplete;
use crate::domain::a001_branch::directory::{BranchDirectory, BranchRecord};

pub const EMPTY_POP_MESSAGE: &str = "No POP materials configured for this model yet.";

/// Request the form must issue after a cascade change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CascadeRequest {
    List {
        row: usize,
        kind: CatalogKind,
        token: String,
    },
    Guide {
        row: usize,
        category: String,
        model: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelEntry<F> {
    /// Session index used in field names; never reused until reset
    pub index: usize,
    /// Unique for the page lifetime, survives resets. Async results for a
    /// row carry it so they cannot land on a row that replaced it.
    pub serial: u64,
    pub branch: String,
    pub shop_code: String,
    /// Name of the locked directory record the shop code came from
    pub locked_branch: Option<String>,
    pub autocomplete: Autocomplete,
    pub category: String,
    pub model: String,
    pub display_type: String,
    pub models: DependentList,
    pub display_types: DependentList,
    pub pop_options: DependentList,
    pub pop_materials: Vec<String>,
    /// `None` while the comment section is closed
    pub comment: Option<String>,
    pub guide_url: Dependent<Option<String>>,
    pub images: ImageSelection<F>,
    pub invalid: Vec<EntryField>,
}

impl<F: ImageFile> ModelEntry<F> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            serial: 0,
            branch: String::new(),
            shop_code: String::new(),
            locked_branch: None,
            autocomplete: Autocomplete::new(),
            category: String::new(),
            model: String::new(),
            display_type: String::new(),
            models: DependentList::new(),
            display_types: DependentList::new(),
            pop_options: DependentList::new(),
            pop_materials: Vec::new(),
            comment: None,
            guide_url: Dependent::new(),
            images: ImageSelection::new(),
            invalid: Vec::new(),
        }
    }

    // --- branch and shop code ---

    /// Shop code is read-only (but still submitted) while a locked branch is selected
    pub fn shop_code_readonly(&self) -> bool {
        self.locked_branch.is_some()
    }

    /// Typing into the branch input. Returns the term to search for.
    /// Leaving the locked branch name detaches the row from it.
    pub fn branch_input(&mut self, text: &str) -> Option<String> {
        self.branch = text.to_string();
        self.clear_invalid(EntryField::Branch);
        if self
            .locked_branch
            .as_deref()
            .is_some_and(|locked| locked != text.trim())
        {
            self.locked_branch = None;
            self.shop_code.clear();
        }
        if text.trim().is_empty() {
            self.shop_code.clear();
        }
        self.autocomplete.input(text)
    }

    /// Suggestion click, Enter on a highlighted item, or exact code match
    pub fn select_branch(&mut self, record: BranchRecord) {
        self.branch = record.name.clone();
        self.shop_code = record.shop_code.clone();
        self.locked_branch =
            (record.locked && !record.shop_code.is_empty()).then(|| record.name.clone());
        self.clear_invalid(EntryField::Branch);
        if !self.shop_code.is_empty() {
            self.clear_invalid(EntryField::ShopCode);
        }
        self.autocomplete.select(record);
    }

    /// Typing into the shop-code input; ignored while it is read-only
    pub fn shop_code_input(&mut self, code: &str) -> bool {
        if self.shop_code_readonly() {
            return false;
        }
        self.shop_code = code.to_string();
        self.clear_invalid(EntryField::ShopCode);
        true
    }

    // --- catalog cascade ---

    pub fn set_category(&mut self, value: &str) -> Option<CascadeRequest> {
        self.category = value.to_string();
        self.clear_invalid(EntryField::Category);
        self.model.clear();
        self.clear_model_dependents();
        self.models
            .request(value)
            .map(|token| CascadeRequest::List {
                row: self.index,
                kind: CatalogKind::Models,
                token,
            })
    }

    pub fn set_model(&mut self, value: &str) -> Vec<CascadeRequest> {
        self.model = value.to_string();
        self.clear_invalid(EntryField::Model);
        self.clear_model_dependents();
        if value.trim().is_empty() {
            return Vec::new();
        }

        let mut requests = Vec::new();
        if let Some(token) = self.display_types.request(&self.category) {
            requests.push(CascadeRequest::List {
                row: self.index,
                kind: CatalogKind::DisplayTypes,
                token,
            });
        }
        if let Some(token) = self.pop_options.request(value) {
            requests.push(CascadeRequest::List {
                row: self.index,
                kind: CatalogKind::PopMaterials,
                token,
            });
        }
        if self.guide_url.request(value).is_some() && !self.category.trim().is_empty() {
            requests.push(CascadeRequest::Guide {
                row: self.index,
                category: self.category.trim().to_string(),
                model: value.trim().to_string(),
            });
        }
        requests
    }

    pub fn set_display_type(&mut self, value: &str) {
        self.display_type = value.to_string();
        self.clear_invalid(EntryField::DisplayType);
    }

    fn clear_model_dependents(&mut self) {
        self.display_type.clear();
        self.pop_materials.clear();
        self.display_types.reset();
        self.pop_options.reset();
        self.guide_url.reset();
    }

    /// Applies a list reply if its parent control still holds `token`
    pub fn apply_list(&mut self, kind: CatalogKind, token: &str, result: Result<Vec<String>, String>) -> bool {
        match kind {
            CatalogKind::Models => self.models.resolve(token, &self.category, result),
            CatalogKind::DisplayTypes => self.display_types.resolve(token, &self.category, result),
            CatalogKind::PopMaterials => self.pop_options.resolve(token, &self.model, result),
            CatalogKind::Categories => false,
        }
    }

    pub fn apply_guide(&mut self, model: &str, result: Result<Option<String>, String>) -> bool {
        self.guide_url.resolve(model, &self.model, result)
    }

    pub fn guide(&self) -> Option<&str> {
        self.guide_url.value().as_deref()
    }

    /// Display type, POP, comment and image sections follow the model
    pub fn sections_visible(&self) -> bool {
        !self.model.trim().is_empty()
    }

    pub fn toggle_pop(&mut self, material: &str, checked: bool) {
        let present = self.pop_materials.iter().any(|m| m == material);
        if checked && !present {
            self.pop_materials.push(material.to_string());
        } else if !checked {
            self.pop_materials.retain(|m| m != material);
        }
    }

    /// Selected materials in checklist order
    pub fn selected_pop_materials(&self) -> Vec<String> {
        self.pop_options
            .value()
            .iter()
            .filter(|m| self.pop_materials.contains(m))
            .cloned()
            .collect()
    }

    pub fn pop_empty_message(&self) -> Option<&'static str> {
        (self.pop_options.status() == &LoadStatus::Ready && self.pop_options.value().is_empty())
            .then_some(EMPTY_POP_MESSAGE)
    }

    // --- comment ---

    pub fn open_comment(&mut self) {
        if self.comment.is_none() {
            self.comment = Some(String::new());
        }
    }

    pub fn set_comment(&mut self, text: &str) {
        self.comment = Some(text.to_string());
    }

    /// Closes the section and drops its text
    pub fn remove_comment(&mut self) {
        self.comment = None;
    }

    /// Trimmed comment, only when there is one to submit
    pub fn comment_to_submit(&self) -> Option<&str> {
        self.comment
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }

    // --- validation ---

    pub fn value_of(&self, field: EntryField) -> &str {
        match field {
            EntryField::Branch => &self.branch,
            EntryField::ShopCode => &self.shop_code,
            EntryField::Category => &self.category,
            EntryField::Model => &self.model,
            EntryField::DisplayType => &self.display_type,
            EntryField::PopMaterials | EntryField::Comment | EntryField::Images => "",
        }
    }

    pub fn missing_fields(&self) -> Vec<EntryField> {
        EntryField::REQUIRED
            .into_iter()
            .filter(|f| self.value_of(*f).trim().is_empty())
            .collect()
    }

    pub fn is_invalid(&self, field: EntryField) -> bool {
        self.invalid.contains(&field)
    }

    fn clear_invalid(&mut self, field: EntryField) {
        self.invalid.retain(|f| *f != field);
    }
}

/// Ordered rows of the form; at least one row always exists
#[derive(Debug, Clone, PartialEq)]
pub struct EntryList<F> {
    entries: Vec<ModelEntry<F>>,
    next_index: usize,
    next_serial: u64,
}

impl<F: ImageFile> Default for EntryList<F> {
    fn default() -> Self {
        Self {
            entries: vec![ModelEntry::new(0)],
            next_index: 1,
            next_serial: 1,
        }
    }
}

impl<F: ImageFile> EntryList<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an empty row and returns its index
    pub fn add(&mut self) -> usize {
        let index = self.next_index;
        self.next_index += 1;
        let row = self.new_row(index);
        self.entries.push(row);
        index
    }

    fn new_row(&mut self, index: usize) -> ModelEntry<F> {
        let mut row = ModelEntry::new(index);
        row.serial = self.next_serial;
        self.next_serial += 1;
        row
    }

    pub fn remove(&mut self, index: usize) -> Result<(), FormValidationError> {
        if self.entries.len() <= 1 {
            return Err(FormValidationError::LastEntry);
        }
        self.entries.retain(|e| e.index != index);
        Ok(())
    }

    /// Back to a single empty row at index 0
    pub fn reset(&mut self) {
        let row = self.new_row(0);
        self.entries = vec![row];
        self.next_index = 1;
    }

    /// The row at `index`, only while it is still the row numbered `serial`
    pub fn get_current_mut(&mut self, index: usize, serial: u64) -> Option<&mut ModelEntry<F>> {
        self.get_mut(index).filter(|e| e.serial == serial)
    }

    pub fn entries(&self) -> &[ModelEntry<F>] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [ModelEntry<F>] {
        &mut self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ModelEntry<F>> {
        self.entries.iter().find(|e| e.index == index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut ModelEntry<F>> {
        self.entries.iter_mut().find(|e| e.index == index)
    }

    pub fn indices(&self) -> Vec<usize> {
        self.entries.iter().map(|e| e.index).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Visible header, numbered by position: "Model Entry k"
    pub fn header(&self, index: usize) -> String {
        let position = self
            .entries
            .iter()
            .position(|e| e.index == index)
            .map(|p| p + 1)
            .unwrap_or(0);
        format!("Model Entry {}", position)
    }

    /// Branches typed by hand join the directory unlocked before submit
    pub fn register_unknown_branches(&self, directory: &mut BranchDirectory) {
        for entry in &self.entries {
            if !directory.get(&entry.branch).is_some_and(|r| r.locked) {
                directory.upsert(&entry.branch, &entry.shop_code, false);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_model_entry::images::fake::FakeFile;

    type List = EntryList<FakeFile>;
    type Entry = ModelEntry<FakeFile>;

    fn locked(name: &str, code: &str) -> BranchRecord {
        BranchRecord {
            name: name.to_string(),
            shop_code: code.to_string(),
            locked: true,
        }
    }

    #[test]
    fn test_indices_are_monotonic_and_headers_renumber() {
        let mut list = List::new();
        let second = list.add();
        let third = list.add();
        assert_eq!((second, third), (1, 2));

        list.remove(second).unwrap();
        assert_eq!(list.header(third), "Model Entry 2");
        assert_eq!(list.add(), 3);
    }

    #[test]
    fn test_last_entry_cannot_be_removed() {
        let mut list = List::new();
        let err = list.remove(0).unwrap_err();
        assert_eq!(err.to_string(), "At least one model entry is required.");
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_reset_leaves_single_row_at_zero() {
        let mut list = List::new();
        list.add();
        list.add();
        list.reset();
        assert_eq!(list.indices(), vec![0]);
        assert_eq!(list.add(), 1);
    }

    #[test]
    fn test_reset_row_ignores_previews_of_replaced_row() {
        let mut list = List::new();
        let old_serial = list.get(0).unwrap().serial;
        list.get_mut(0)
            .unwrap()
            .images
            .add_files(vec![FakeFile::jpeg("old.jpg")])
            .unwrap();

        list.reset();
        let fresh = list.get_mut(0).unwrap();
        assert_ne!(fresh.serial, old_serial);
        fresh.images.add_files(vec![FakeFile::jpeg("new.jpg")]).unwrap();

        assert!(list.get_current_mut(0, old_serial).is_none());
        let new_serial = list.get(0).unwrap().serial;
        let row = list.get_current_mut(0, new_serial).unwrap();
        assert!(row.images.set_preview(0, "data:new".to_string()));
        assert_eq!(row.images.items()[0].preview.as_deref(), Some("data:new"));
    }

    #[test]
    fn test_locked_selection_makes_code_readonly() {
        let mut entry = Entry::new(0);
        entry.branch_input("Mall");
        entry.select_branch(locked("Mall of Egypt", "204"));
        assert!(entry.shop_code_readonly());
        assert!(!entry.shop_code_input("999"));
        assert_eq!(entry.shop_code, "204");
    }

    #[test]
    fn test_unlocked_selection_stays_editable() {
        let mut entry = Entry::new(0);
        entry.select_branch(BranchRecord {
            name: "Downtown".to_string(),
            shop_code: "123".to_string(),
            locked: false,
        });
        assert!(!entry.shop_code_readonly());
        assert!(entry.shop_code_input("124"));
    }

    #[test]
    fn test_clearing_branch_detaches_lock() {
        let mut entry = Entry::new(0);
        entry.select_branch(locked("Mall of Egypt", "204"));
        assert_eq!(entry.branch_input(""), None);
        assert!(!entry.shop_code_readonly());
        assert_eq!(entry.shop_code, "");

        entry.select_branch(locked("Mall of Egypt", "204"));
        assert!(entry.shop_code_readonly());
    }

    #[test]
    fn test_category_change_clears_dependents() {
        let mut entry = Entry::new(2);
        let req = entry.set_category("OLED").unwrap();
        assert_eq!(
            req,
            CascadeRequest::List {
                row: 2,
                kind: CatalogKind::Models,
                token: "OLED".to_string()
            }
        );
        assert!(entry.apply_list(CatalogKind::Models, "OLED", Ok(vec!["S95F".to_string()])));

        let requests = entry.set_model("S95F");
        assert_eq!(requests.len(), 3);
        assert!(entry.sections_visible());
        entry.toggle_pop("Header", true);

        entry.set_category("QLED");
        assert_eq!(entry.model, "");
        assert!(entry.pop_materials.is_empty());
        assert!(!entry.sections_visible());
        assert!(entry.models.is_loading());
    }

    #[test]
    fn test_stale_pop_reply_is_ignored() {
        let mut entry = Entry::new(0);
        entry.set_category("OLED");
        entry.set_model("S90D");
        entry.set_model("S95F");
        assert!(!entry.apply_list(CatalogKind::PopMaterials, "S90D", Ok(vec!["Old".to_string()])));
        assert!(entry.apply_list(CatalogKind::PopMaterials, "S95F", Ok(Vec::new())));
        assert_eq!(entry.pop_empty_message(), Some(EMPTY_POP_MESSAGE));
    }

    #[test]
    fn test_pop_selection_follows_checklist_order() {
        let mut entry = Entry::new(0);
        entry.set_category("OLED");
        entry.set_model("S95F");
        entry.apply_list(
            CatalogKind::PopMaterials,
            "S95F",
            Ok(vec!["Header".to_string(), "Wobbler".to_string(), "Stand".to_string()]),
        );
        entry.toggle_pop("Stand", true);
        entry.toggle_pop("Header", true);
        entry.toggle_pop("Header", true);
        assert_eq!(entry.selected_pop_materials(), vec!["Header", "Stand"]);
        entry.toggle_pop("Header", false);
        assert_eq!(entry.selected_pop_materials(), vec!["Stand"]);
    }

    #[test]
    fn test_comment_section() {
        let mut entry = Entry::new(0);
        assert_eq!(entry.comment_to_submit(), None);
        entry.open_comment();
        entry.set_comment("  ");
        assert_eq!(entry.comment_to_submit(), None);
        entry.set_comment(" Shelf damaged ");
        assert_eq!(entry.comment_to_submit(), Some("Shelf damaged"));
        entry.remove_comment();
        assert_eq!(entry.comment, None);
    }

    #[test]
    fn test_branch_on_file_without_code_accepts_typed_code() {
        let mut dir = BranchDirectory::new();
        dir.load(&[contracts::domain::a001_branch::BranchDto {
            name: "Mall of Egypt".to_string(),
            code: "N/A".to_string(),
        }]);
        let record = dir.search("Mall").remove(0);

        let mut list = List::new();
        if let Some(entry) = list.get_mut(0) {
            entry.branch_input("Mall");
            entry.select_branch(record);
            assert!(!entry.shop_code_readonly());
            assert!(entry.shop_code_input("204"));
            assert_eq!(entry.shop_code, "204");
            assert!(!entry.missing_fields().contains(&EntryField::ShopCode));
        }

        list.register_unknown_branches(&mut dir);
        dir.promote_all();
        let saved = dir.get("Mall of Egypt").unwrap();
        assert_eq!(saved.shop_code, "204");
        assert!(saved.locked);
    }

    #[test]
    fn test_unknown_branches_join_directory_unlocked() {
        let mut dir = BranchDirectory::new();
        dir.upsert("Mall of Egypt", "204", true);
        let mut list = List::new();
        if let Some(entry) = list.get_mut(0) {
            entry.branch_input("Downtown");
            entry.shop_code_input("123");
        }
        list.register_unknown_branches(&mut dir);
        let record = dir.get("Downtown").unwrap();
        assert!(!record.locked);
        assert_eq!(record.shop_code, "123");
    }
}
