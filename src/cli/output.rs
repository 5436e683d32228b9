//! CLI output: error mapping from client errors to the stderr line.

use crate::error::ClientError;

/// Map a client error to the single line printed on stderr.
/// Usage errors read as plain errors; everything else is an execution failure.
pub fn map_error(e: &ClientError) -> String {
    if e.is_usage() {
        format!("Error: {}", e)
    } else {
        format!("Execution Failed: {}", e)
    }
}
