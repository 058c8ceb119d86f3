use std::collections::HashSet;

/// Flags that last for one browsing session only. Nothing is written to disk.
#[derive(Debug, Default)]
pub struct SessionMarker {
    flags: HashSet<String>,
}

impl SessionMarker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    /// Set the flag. Returns true only the first time in this session.
    pub fn mark(&mut self, flag: &str) -> bool {
        self.flags.insert(flag.to_string())
    }
}
