mod json_import;

pub(crate) use json_import::{suggest_json_fixes, JsonImporter};
