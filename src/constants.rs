//! Application-wide constants
//!
//! This module contains all constant values used throughout the client.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// JUDGE API DEFAULTS
// =============================================================================

/// Default base URL of the judge service API
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8081/api";

/// Default timeout for a single HTTP request in seconds
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;

// =============================================================================
// POLLING DEFAULTS
// =============================================================================

/// Default interval between submission status checks in milliseconds
pub const DEFAULT_SUBMISSION_POLL_INTERVAL_MS: u64 = 2000;

/// Default interval between leaderboard refreshes in seconds
pub const DEFAULT_LEADERBOARD_REFRESH_SECONDS: u64 = 30;

// =============================================================================
// SESSION
// =============================================================================

/// Directory (under the home directory) holding the session file
pub const SESSION_DIR_NAME: &str = ".shodh";

/// Session file name
pub const SESSION_FILE_NAME: &str = "session.json";

/// Prefix of generated user identifiers
pub const USER_ID_PREFIX: &str = "user_";

// =============================================================================
// SUPPORTED LANGUAGES
// =============================================================================

/// Language identifiers
pub mod languages {
    pub const JAVA: &str = "java";
    pub const PYTHON: &str = "python";
    pub const CPP: &str = "cpp";

    /// Language used when none is given
    pub const DEFAULT: &str = JAVA;

    /// All supported language identifiers
    pub const ALL: &[&str] = &[JAVA, PYTHON, CPP];
}

/// Starter code shown in the editor for each language
pub mod templates {
    pub const JAVA: &str = "public class Main {
    public static void main(String[] args) {
        // Your code here
    }
}";

    pub const PYTHON: &str = "# Your code here
def solution():
    pass

if __name__ == \"__main__\":
    solution()";

    pub const CPP: &str = "#include <iostream>
using namespace std;

int main() {
    // Your code here
    return 0;
}";
}

// =============================================================================
// VIEW TEXT
// =============================================================================

/// Number of sample test cases shown with a problem
pub const MAX_SAMPLE_TEST_CASES: usize = 2;

/// Shown when a contest could not be fetched
pub const CONTEST_LOAD_FAILED: &str = "Failed to load contest";

/// Shown when the leaderboard has no entries
pub const EMPTY_LEADERBOARD: &str = "No submissions yet";

/// Shown when an accepted submission is rendered
pub const ACCEPTED_BANNER: &str = "Accepted ✓ All tests passed";

/// Shown when a finished submission carries no result message
pub const NO_DETAILS: &str = "No details available.";

/// Prefix of the error shown when following a submission fails
pub const POLL_FAILED_PREFIX: &str = "Lost track of the submission, resubmit to retry: ";

/// Join form error when a field is left blank
pub const JOIN_FIELDS_REQUIRED: &str = "Please enter both contest ID and username.";
