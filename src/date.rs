//! Publication timestamp normalization.

/// Reduce an ISO-8601 timestamp to its date part.
///
/// Everything from the first `T` onwards (time of day and zone) is dropped:
/// `2019-03-03T12:00:00Z` becomes `2019-03-03`. A string without a `T`
/// separator is returned unchanged.
///
/// # Examples
///
/// ```
/// use guardian_feed::date::normalize;
///
/// assert_eq!(normalize("2019-03-03T15:30:00Z"), "2019-03-03");
/// assert_eq!(normalize("2019-03-03"), "2019-03-03");
/// ```
pub fn normalize(raw: &str) -> String {
    match raw.split_once('T') {
        Some((date, _)) => date.to_string(),
        None => raw.to_string(),
    }
}
