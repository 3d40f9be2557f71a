//! Property-based tests for diff laws and fingerprint stability

mod fingerprint;
