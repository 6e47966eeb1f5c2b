//! Model entry form contract
//!
//! The submit endpoint receives one multipart body for the whole form. Every
//! entry contributes fields named `<field>_<index>`, where `index` is the
//! entry's stable session index.

/// Submit endpoint for the data-entry form
pub const SUBMIT_PATH: &str = "/submit_data";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryField {
    Branch,
    ShopCode,
    Category,
    Model,
    DisplayType,
    PopMaterials,
    Comment,
    Images,
}

impl EntryField {
    /// Fields that must be non-empty before the form may be submitted
    pub const REQUIRED: [EntryField; 5] = [
        EntryField::Branch,
        EntryField::ShopCode,
        EntryField::Category,
        EntryField::Model,
        EntryField::DisplayType,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            EntryField::Branch => "branch",
            EntryField::ShopCode => "shop_code",
            EntryField::Category => "category",
            EntryField::Model => "model",
            EntryField::DisplayType => "display_type",
            EntryField::PopMaterials => "pop_materials",
            EntryField::Comment => "comment",
            EntryField::Images => "images",
        }
    }

    /// Multipart field name for the entry at `index`
    pub fn name(&self, index: usize) -> String {
        format!("{}_{}", self.prefix(), index)
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntryField::Branch => "Branch Name",
            EntryField::ShopCode => "Shop Code",
            EntryField::Category => "Category",
            EntryField::Model => "Model",
            EntryField::DisplayType => "Display Type",
            EntryField::PopMaterials => "POP Material",
            EntryField::Comment => "Comment",
            EntryField::Images => "Images",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_names_carry_index() {
        assert_eq!(EntryField::Branch.name(0), "branch_0");
        assert_eq!(EntryField::ShopCode.name(3), "shop_code_3");
        assert_eq!(EntryField::PopMaterials.name(12), "pop_materials_12");
        assert_eq!(EntryField::Images.name(1), "images_1");
    }
}
