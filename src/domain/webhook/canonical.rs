//! Canonical form of a webhook payload.
//!
//! The signed message is built by sorting the fields by key and joining
//! `key=value` pairs with `&`. Values are escaped like a URI data string:
//! every byte outside the RFC 3986 unreserved set becomes `%XX`.

/// Builds the canonical string that the provider signs.
///
/// Fields are sorted by key using byte-wise ordering, independent of the
/// iteration order of the input. Entries with equal keys are ordered by value.
///
/// # Example
///
/// ```
/// use paddle_vendor::domain::webhook::canonicalize;
///
/// let canonical = canonicalize([("event_time", "2024-01-01 12:00:00"), ("alert_id", "1")]);
/// assert_eq!(canonical, "alert_id=1&event_time=2024-01-01%2012%3A00%3A00");
/// ```
pub fn canonicalize<I, K, V>(fields: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut entries: Vec<(K, V)> = fields.into_iter().collect();
    entries.sort_by(|(ka, va), (kb, vb)| {
        ka.as_ref()
            .cmp(kb.as_ref())
            .then_with(|| va.as_ref().cmp(vb.as_ref()))
    });

    entries
        .iter()
        .map(|(key, value)| {
            // Escapes everything except `A-Z a-z 0-9 - _ . ~`.
            format!("{}={}", key.as_ref(), urlencoding::encode(value.as_ref()))
        })
        .collect::<Vec<_>>()
        .join("&")
}
