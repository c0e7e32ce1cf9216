use serde_json::Value;
use sha2::{Digest, Sha256};

use super::DOC_ID_FIELD;

/// Hex SHA-256 of the base filename, so copies of one file in different
/// directories share an id.
pub fn generate_doc_id(filename: &str) -> String {
    let digest = Sha256::digest(base_name(filename).as_bytes());
    format!("{:x}", digest)
}

pub(super) fn assign_doc_id(record: &mut Value, source_filename: &str) -> Option<String> {
    let object = record.as_object_mut()?;
    let doc_id = generate_doc_id(source_filename);
    object.insert(DOC_ID_FIELD.to_string(), Value::String(doc_id.clone()));
    Some(doc_id)
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
