use contracts::domain::a002_model_entry::EntryField;
use thiserror::Error;

use super::entry::EntryList;
use super::images::ImageFile;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("Please fill in all required fields.")]
    MissingFields { missing: Vec<(usize, EntryField)> },
    #[error("At least one model entry is required.")]
    LastEntry,
}

/// Checks every row's required fields and flags the missing ones on the rows
pub fn validate_entries<F: ImageFile>(list: &mut EntryList<F>) -> Result<(), FormValidationError> {
    let mut missing = Vec::new();
    for entry in list.entries_mut() {
        entry.invalid = entry.missing_fields();
        missing.extend(entry.invalid.iter().map(|f| (entry.index, *f)));
    }
    if missing.is_empty() {
        Ok(())
    } else {
        Err(FormValidationError::MissingFields { missing })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_model_entry::images::fake::FakeFile;

    #[test]
    fn test_missing_fields_are_flagged_per_row() {
        let mut list: EntryList<FakeFile> = EntryList::new();
        let second = list.add();
        if let Some(entry) = list.get_mut(0) {
            entry.branch_input("Downtown");
            entry.shop_code_input("123");
            entry.set_category("OLED");
            entry.model = "S95F".to_string();
            entry.set_display_type("Fixtures");
        }

        let err = validate_entries(&mut list).unwrap_err();
        assert_eq!(err.to_string(), "Please fill in all required fields.");
        match err {
            FormValidationError::MissingFields { missing } => {
                assert_eq!(missing.len(), 5);
                assert!(missing.iter().all(|(row, _)| *row == second));
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(list.get(0).unwrap().invalid.is_empty());
        assert!(list.get(second).unwrap().is_invalid(EntryField::DisplayType));
    }

    #[test]
    fn test_typing_clears_highlight() {
        let mut list: EntryList<FakeFile> = EntryList::new();
        assert!(validate_entries(&mut list).is_err());
        let entry = list.get_mut(0).unwrap();
        assert!(entry.is_invalid(EntryField::Branch));
        entry.branch_input("Mall");
        assert!(!entry.is_invalid(EntryField::Branch));
        assert!(entry.is_invalid(EntryField::ShopCode));
    }
}
