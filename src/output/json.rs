use serde::Serialize;

use crate::errors::Result;

/// Pretty JSON for any view model
pub fn to_json<T: Serialize + ?Sized>(view: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(view)?)
}
