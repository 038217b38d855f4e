//! Utility functions for paths and chat message formatting.
//!
//! This module provides helpers used throughout the bot for file system path
//! construction and for embedding user supplied text in chat replies.

use std::path::PathBuf;

/// Constructs a file system path by joining a directory path with a file name.
///
/// # Arguments
///
/// * `dir_path` - The base directory path
/// * `file_path` - The file name (or relative path) to append
///
/// # Returns
///
/// A `String` containing the joined path. Non UTF-8 components are replaced
/// lossily.
///
/// # Examples
///
/// ```
/// # use foosbot::utils::get_path;
/// let path = get_path("/var/lib/foosbot", "matches.json");
/// assert_eq!(path, "/var/lib/foosbot/matches.json");
/// ```
pub fn get_path(dir_path: &str, file_path: &str) -> String {
    let path_buf: PathBuf = [dir_path, file_path].iter().collect();
    path_buf.to_string_lossy().into_owned()
}

/// Joins names the way a sentence lists them: `A`, `A and B`, `A, B and C`.
///
/// # Examples
///
/// ```
/// # use foosbot::utils::join_names;
/// let names = vec!["Alice".to_string(), "Bob".to_string(), "Carol".to_string()];
/// assert_eq!(join_names(&names), "Alice, Bob and Carol");
/// ```
pub fn join_names(names: &[String]) -> String {
    match names {
        [] => String::new(),
        [name] => name.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

/// Escapes the characters that have a meaning in HTML.
///
/// Used on every user supplied string embedded in an HTML reply.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
