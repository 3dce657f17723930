/// Load-time check restricting activation to matching document origins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OriginFilter(Option<String>);

impl OriginFilter {
    pub fn new(fragment: Option<impl Into<String>>) -> Self {
        Self(fragment.map(Into::into))
    }

    /// A filter that lets every origin through.
    pub fn any() -> Self {
        Self(None)
    }

    pub fn fragment(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Whether the engine may install in a document with this origin.
    /// An absent or empty fragment allows everything.
    pub fn allows(&self, origin: &str) -> bool {
        match self.0.as_deref() {
            None | Some("") => true,
            Some(fragment) => origin.contains(fragment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_match() {
        let filter = OriginFilter::new(Some("example.com"));
        assert!(filter.allows("https://app.example.com"));
        assert!(!filter.allows("https://other.org"));

        let filter = OriginFilter::new(Some("other.com"));
        assert!(!filter.allows("https://app.example.com"));
    }

    #[test]
    fn empty_or_absent_allows_all() {
        assert!(OriginFilter::any().allows("https://anything"));
        assert!(OriginFilter::new(Some("")).allows("intercept://localhost"));
        assert!(OriginFilter::default().allows(""));
    }
}
