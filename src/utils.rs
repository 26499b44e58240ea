use serde::{Deserialize, Serialize};

pub fn des_from_str<T: for<'a> Deserialize<'a>>(string: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(string)
}

/// Empty or `null` bodies decode to `T::default()`.
pub fn des_body_or_default<T: for<'a> Deserialize<'a> + Default>(
    string: &str,
) -> Result<T, serde_json::Error> {
    if string.trim().is_empty() {
        return Ok(T::default());
    }
    Ok(des_from_str::<Option<T>>(string)?.unwrap_or_default())
}

pub fn ser_to_str<T: Serialize + ?Sized>(t: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(t)
}
