//! Integration tests driving the releaser binary end to end
//!
//! The fake tools are shell scripts, so these only run on unix.

#![cfg(unix)]

mod test_failures;
