use easyapply_protocols::BrowserError;
use tracing::debug;

/// Treat a non-fatal lookup failure as absence.
///
/// Fatal session errors still propagate.
pub(crate) fn absent_unless_fatal<T>(
    result: Result<Option<T>, BrowserError>,
    what: &str,
) -> Result<Option<T>, BrowserError> {
    match result {
        Ok(found) => Ok(found),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            debug!(probe = what, error = %e, "Lookup failed, treating as absent");
            Ok(None)
        }
    }
}

/// Same as [`absent_unless_fatal`] for list lookups.
pub(crate) fn empty_unless_fatal<T>(
    result: Result<Vec<T>, BrowserError>,
    what: &str,
) -> Result<Vec<T>, BrowserError> {
    match result {
        Ok(found) => Ok(found),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            debug!(probe = what, error = %e, "Lookup failed, treating as empty");
            Ok(Vec::new())
        }
    }
}
