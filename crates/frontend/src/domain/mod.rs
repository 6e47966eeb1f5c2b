pub mod a001_branch;
pub mod a002_model_entry;
pub mod a003_catalog;
