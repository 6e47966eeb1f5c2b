//! Multipart body of `/submit_data`, as an ordered list of parts
//!
//! Built without the browser; the API layer copies the parts into a
//! `FormData`.

use contracts::domain::a002_model_entry::EntryField;

use super::entry::EntryList;
use super::images::ImageFile;

#[derive(Debug, Clone, PartialEq)]
pub enum PartValue<F> {
    Text(String),
    File(F),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormPart<F> {
    pub name: String,
    pub value: PartValue<F>,
}

impl<F> FormPart<F> {
    fn text(name: String, value: &str) -> Self {
        Self {
            name,
            value: PartValue::Text(value.trim().to_string()),
        }
    }
}

/// Parts for every row in display order. Read-only shop codes are included
/// like any other; the comment only when non-blank.
pub fn build_parts<F: ImageFile>(list: &EntryList<F>) -> Vec<FormPart<F>> {
    let mut parts = Vec::new();
    for entry in list.entries() {
        let i = entry.index;
        parts.push(FormPart::text(EntryField::Branch.name(i), &entry.branch));
        parts.push(FormPart::text(EntryField::ShopCode.name(i), &entry.shop_code));
        parts.push(FormPart::text(EntryField::Category.name(i), &entry.category));
        parts.push(FormPart::text(EntryField::Model.name(i), &entry.model));
        parts.push(FormPart::text(EntryField::DisplayType.name(i), &entry.display_type));
        for material in entry.selected_pop_materials() {
            parts.push(FormPart::text(EntryField::PopMaterials.name(i), &material));
        }
        if let Some(comment) = entry.comment_to_submit() {
            parts.push(FormPart::text(EntryField::Comment.name(i), comment));
        }
        for file in entry.images.files() {
            parts.push(FormPart {
                name: EntryField::Images.name(i),
                value: PartValue::File(file.clone()),
            });
        }
    }
    parts
}

/// Flash shown after a save: the server's message, or a stock line when it sent none
pub fn saved_message(server_message: &str) -> String {
    let message = server_message.trim();
    if message.is_empty() {
        "Data saved successfully!".to_string()
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_branch::directory::BranchRecord;
    use crate::domain::a002_model_entry::images::fake::FakeFile;
    use contracts::domain::a003_catalog::CatalogKind;

    fn text<'a>(parts: &'a [FormPart<FakeFile>], name: &str) -> Vec<&'a str> {
        parts
            .iter()
            .filter(|p| p.name == name)
            .filter_map(|p| match &p.value {
                PartValue::Text(t) => Some(t.as_str()),
                PartValue::File(_) => None,
            })
            .collect()
    }

    #[test]
    fn test_single_entry_body() {
        let mut list: EntryList<FakeFile> = EntryList::new();
        let entry = list.get_mut(0).unwrap();
        entry.select_branch(BranchRecord {
            name: "Downtown".to_string(),
            shop_code: "123".to_string(),
            locked: true,
        });
        entry.set_category("OLED");
        entry.apply_list(CatalogKind::Models, "OLED", Ok(vec!["S95F".to_string()]));
        entry.set_model("S95F");
        entry.set_display_type("Fixtures");
        entry
            .images
            .add_files(vec![FakeFile::jpeg("front.jpg"), FakeFile::jpeg("side.jpg")])
            .unwrap();

        let parts = build_parts(&list);
        assert_eq!(text(&parts, "branch_0"), vec!["Downtown"]);
        assert_eq!(text(&parts, "shop_code_0"), vec!["123"]);
        assert_eq!(text(&parts, "category_0"), vec!["OLED"]);
        assert_eq!(text(&parts, "model_0"), vec!["S95F"]);
        assert_eq!(text(&parts, "display_type_0"), vec!["Fixtures"]);
        assert!(text(&parts, "comment_0").is_empty());

        let images: Vec<&str> = parts
            .iter()
            .filter(|p| p.name == "images_0")
            .filter_map(|p| match &p.value {
                PartValue::File(f) => Some(f.name.as_str()),
                PartValue::Text(_) => None,
            })
            .collect();
        assert_eq!(images, vec!["front.jpg", "side.jpg"]);
    }

    #[test]
    fn test_rows_use_their_session_index() {
        let mut list: EntryList<FakeFile> = EntryList::new();
        let second = list.add();
        list.remove(0).unwrap();
        if let Some(entry) = list.get_mut(second) {
            entry.branch_input("Mall");
            entry.open_comment();
            entry.set_comment("Needs new header");
        }

        let parts = build_parts(&list);
        assert_eq!(text(&parts, "branch_1"), vec!["Mall"]);
        assert_eq!(text(&parts, "comment_1"), vec!["Needs new header"]);
        assert!(parts.iter().all(|p| !p.name.ends_with("_0")));
    }

    #[test]
    fn test_saved_message_prefers_server_text() {
        assert_eq!(saved_message("Saved 3 entries"), "Saved 3 entries");
        assert_eq!(saved_message("  "), "Data saved successfully!");
        assert_eq!(saved_message(""), "Data saved successfully!");
    }
}
