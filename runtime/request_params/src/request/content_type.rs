use http::HeaderMap;

/// Extract the essence of the `Content-Type` header, i.e. its type and subtype
/// without any parameter.
///
/// `application/json; charset=utf-8` becomes `application/json`.
/// Returns `None` if the header is missing or blank.
///
/// Values that can't be parsed as a MIME type are cut at the first `;`, trimmed
/// and lower-cased: it's up to the symbol lookup to reject them.
pub fn normalize_content_type(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(http::header::CONTENT_TYPE)?;
    let raw = String::from_utf8_lossy(raw.as_bytes());
    match raw.parse::<mime::Mime>() {
        Ok(mime) => Some(mime.essence_str().to_owned()),
        Err(_) => {
            let essence = raw.split(';').next().unwrap_or_default().trim();
            if essence.is_empty() {
                None
            } else {
                Some(essence.to_ascii_lowercase())
            }
        }
    }
}
