pub mod doc_id;
pub mod validate;
pub mod validate_dir;
