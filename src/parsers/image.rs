use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::PLACEHOLDER_IMAGE;

static FILE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z0-9_-]{25,}").expect("Invalid file id regex"));

/// Width requested from the thumbnail and CDN endpoints.
const LARGE_WIDTH: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedImage {
    /// URL to display first.
    pub source: String,
    /// Alternate URLs for the same file, tried in order. Empty for direct URLs.
    pub candidates: Vec<String>,
}

/// First run of 25+ id characters, treated as a cloud-drive file identifier.
pub fn extract_file_id(raw: &str) -> Option<&str> {
    FILE_ID_REGEX.find(raw).map(|m| m.as_str())
}

pub fn drive_candidates(file_id: &str) -> Vec<String> {
    vec![
        format!("https://drive.google.com/uc?export=view&id={}", file_id),
        format!(
            "https://drive.google.com/thumbnail?id={}&sz=w{}",
            file_id, LARGE_WIDTH
        ),
        format!(
            "https://lh3.googleusercontent.com/d/{}=w{}",
            file_id, LARGE_WIDTH
        ),
    ]
}

/// Turn a raw image cell into a display URL plus fallbacks.
///
/// Share links are rewritten to the direct-view endpoint; anything without a
/// recognisable file id is returned as-is with no candidates.
pub fn resolve_image(raw: &str) -> ResolvedImage {
    let raw = raw.trim();
    match extract_file_id(raw) {
        Some(file_id) => {
            let candidates = drive_candidates(file_id);
            ResolvedImage {
                source: candidates[0].clone(),
                candidates,
            }
        }
        None => ResolvedImage {
            source: raw.to_string(),
            candidates: Vec::new(),
        },
    }
}

/// Load-failure state for one displayed image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFallback {
    candidates: Vec<String>,
    /// Index of the candidate currently shown.
    position: usize,
    settled: bool,
}

impl ImageFallback {
    pub fn new(candidates: &[String]) -> Self {
        Self {
            candidates: candidates.to_vec(),
            position: 0,
            settled: false,
        }
    }

    /// Next URL to try after the current one failed to load.
    ///
    /// Walks the remaining candidates, then yields the placeholder once, then
    /// `None` for every later call.
    pub fn on_error(&mut self) -> Option<String> {
        if self.settled {
            return None;
        }

        let next = self.position + 1;
        if next < self.candidates.len() {
            self.position = next;
            return Some(self.candidates[next].clone());
        }

        self.settled = true;
        Some(PLACEHOLDER_IMAGE.to_string())
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }
}
