//! In-memory branch directory shared by every form row
//!
//! Records come from the initial `/get_branches` load (locked) or from the
//! user typing a branch that is not on file yet (unlocked until the next
//! successful save). A locked record never becomes unlocked and its shop
//! code never changes until the page is reloaded. Only records with a shop
//! code are ever locked; a branch on file without one stays editable so the
//! first entry for it can supply the code.

use std::collections::HashMap;

use contracts::domain::a001_branch::BranchDto;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRecord {
    pub name: String,
    /// Empty when the server has no code on file
    pub shop_code: String,
    pub locked: bool,
}

impl BranchRecord {
    fn from_dto(dto: &BranchDto) -> Self {
        let shop_code = dto.shop_code().unwrap_or_default().trim().to_string();
        Self {
            name: dto.name.trim().to_string(),
            locked: !shop_code.is_empty(),
            shop_code,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BranchDirectory {
    records: HashMap<String, BranchRecord>,
    loaded: bool,
}

impl BranchDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the directory with the server's full list; records with a
    /// shop code are locked
    pub fn load(&mut self, branches: &[BranchDto]) {
        self.records = branches
            .iter()
            .map(BranchRecord::from_dto)
            .filter(|r| !r.name.is_empty())
            .map(|r| (r.name.clone(), r))
            .collect();
        self.loaded = true;
    }

    /// Folds in the result of a remote search, locking the same way as `load`
    pub fn merge_remote(&mut self, branches: &[BranchDto]) {
        for dto in branches {
            let record = BranchRecord::from_dto(dto);
            if !record.name.is_empty() {
                self.records.insert(record.name.clone(), record);
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&BranchRecord> {
        self.records.get(name.trim())
    }

    /// Case-insensitive substring match on name or shop code, ordered by name
    pub fn search(&self, term: &str) -> Vec<BranchRecord> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let mut found: Vec<BranchRecord> = self
            .records
            .values()
            .filter(|r| {
                r.name.to_lowercase().contains(&needle)
                    || r.shop_code.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });
        found
    }

    /// Exact shop-code match
    pub fn lookup_by_code(&self, code: &str) -> Option<&BranchRecord> {
        let code = code.trim();
        if code.is_empty() {
            return None;
        }
        let mut matches: Vec<&BranchRecord> =
            self.records.values().filter(|r| r.shop_code == code).collect();
        matches.sort_by(|a, b| a.name.cmp(&b.name));
        matches.into_iter().next()
    }

    /// Inserts a record or updates an unlocked one. Locked records keep
    /// their code and stay locked.
    pub fn upsert(&mut self, name: &str, shop_code: &str, locked: bool) {
        let name = name.trim();
        if name.is_empty() {
            return;
        }
        match self.records.get_mut(name) {
            Some(existing) if existing.locked => {}
            Some(existing) => {
                existing.shop_code = shop_code.trim().to_string();
                existing.locked = locked && !existing.shop_code.is_empty();
            }
            None => {
                let shop_code = shop_code.trim().to_string();
                self.records.insert(
                    name.to_string(),
                    BranchRecord {
                        name: name.to_string(),
                        locked: locked && !shop_code.is_empty(),
                        shop_code,
                    },
                );
            }
        }
    }

    /// Locks every record that has a shop code, after a successful save
    pub fn promote_all(&mut self) {
        for record in self.records.values_mut() {
            record.locked = !record.shop_code.is_empty();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto(name: &str, code: &str) -> BranchDto {
        BranchDto {
            name: name.to_string(),
            code: code.to_string(),
        }
    }

    fn loaded() -> BranchDirectory {
        let mut dir = BranchDirectory::new();
        dir.load(&[
            dto("Mall of Egypt", "204"),
            dto("City Stars", "118"),
            dto("Cairo Festival", "N/A"),
        ]);
        dir
    }

    #[test]
    fn test_load_locks_only_records_with_code() {
        let dir = loaded();
        assert!(dir.is_loaded());
        assert_eq!(dir.len(), 3);
        assert!(dir.get("City Stars").unwrap().locked);
        let festival = dir.get("Cairo Festival").unwrap();
        assert!(!festival.locked);
        assert_eq!(festival.shop_code, "");
    }

    #[test]
    fn test_codeless_branch_takes_code_on_save() {
        let mut dir = loaded();
        dir.promote_all();
        assert!(!dir.get("Cairo Festival").unwrap().locked);

        dir.upsert("Cairo Festival", "204", false);
        dir.promote_all();
        let festival = dir.get("Cairo Festival").unwrap();
        assert!(festival.locked);
        assert_eq!(festival.shop_code, "204");
    }

    #[test]
    fn test_search_matches_name_and_code() {
        let dir = loaded();
        let by_name: Vec<_> = dir.search("CITY").into_iter().map(|r| r.name).collect();
        assert_eq!(by_name, vec!["City Stars"]);

        let by_code: Vec<_> = dir.search("20").into_iter().map(|r| r.name).collect();
        assert_eq!(by_code, vec!["Mall of Egypt"]);

        let ordered: Vec<_> = dir.search("c").into_iter().map(|r| r.name).collect();
        assert_eq!(ordered, vec!["Cairo Festival", "City Stars"]);

        assert!(dir.search("zzz").is_empty());
        assert!(dir.search("   ").is_empty());
    }

    #[test]
    fn test_upsert_new_branch_is_unlocked() {
        let mut dir = loaded();
        dir.upsert("Downtown", "123", false);
        let found = dir.search("Downtown");
        assert_eq!(found.len(), 1);
        assert!(!found[0].locked);
        assert_eq!(found[0].shop_code, "123");
    }

    #[test]
    fn test_locked_record_is_immutable() {
        let mut dir = loaded();
        dir.upsert("City Stars", "999", false);
        let record = dir.get("City Stars").unwrap();
        assert_eq!(record.shop_code, "118");
        assert!(record.locked);
    }

    #[test]
    fn test_promote_all_after_save() {
        let mut dir = loaded();
        dir.upsert("Downtown", "123", false);
        dir.upsert("Downtown", "124", false);
        assert_eq!(dir.get("Downtown").unwrap().shop_code, "124");
        dir.promote_all();
        assert!(dir.get("Downtown").unwrap().locked);
        dir.upsert("Downtown", "777", false);
        assert_eq!(dir.get("Downtown").unwrap().shop_code, "124");
    }

    #[test]
    fn test_lookup_by_code_is_exact() {
        let dir = loaded();
        assert_eq!(dir.lookup_by_code("118").map(|r| r.name.as_str()), Some("City Stars"));
        assert!(dir.lookup_by_code("11").is_none());
        assert!(dir.lookup_by_code("").is_none());
    }

    #[test]
    fn test_load_overwrites_and_remote_merge_locks() {
        let mut dir = loaded();
        dir.upsert("Downtown", "123", false);
        dir.load(&[dto("City Stars", "118")]);
        assert_eq!(dir.len(), 1);

        dir.merge_remote(&[dto("Downtown", "123")]);
        assert!(dir.get("Downtown").unwrap().locked);
    }
}
