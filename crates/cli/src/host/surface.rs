use pipeshell_core::{EditorSurface, Error, Region, Result};

/// An in-memory document standing in for the editor's active view
#[derive(Debug, Default)]
pub struct DocumentSurface {
    text: Option<String>,
    selections: Vec<Region>,
    results: Vec<(String, String)>,
    modified: bool,
}

impl DocumentSurface {
    /// No active text view; only plain commands can run
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Select byte ranges given as `START:END`
    pub fn with_selections(mut self, specs: &[String]) -> Result<Self> {
        let len = self.text.as_deref().map_or(0, str::len);
        for spec in specs {
            let region = parse_region(spec)?;
            if region.end > len {
                return Err(Error::UserInput(format!(
                    "Selection {spec} is outside the document ({len} bytes)"
                )));
            }
            if !self.is_boundary(region) {
                return Err(Error::UserInput(format!(
                    "Selection {spec} splits a character"
                )));
            }
            self.selections.push(region);
        }
        Ok(self)
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Result views opened so far as `(title, text)`
    pub fn results(&self) -> &[(String, String)] {
        &self.results
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    fn is_boundary(&self, region: Region) -> bool {
        self.text.as_deref().is_some_and(|text| {
            text.is_char_boundary(region.start) && text.is_char_boundary(region.end)
        })
    }
}

/// Parse `START:END` into a region
pub fn parse_region(spec: &str) -> Result<Region> {
    let invalid = || Error::UserInput(format!("Invalid selection {spec:?}, expected START:END"));
    let (start, end) = spec.split_once(':').ok_or_else(invalid)?;
    let start = start.trim().parse::<usize>().map_err(|_| invalid())?;
    let end = end.trim().parse::<usize>().map_err(|_| invalid())?;
    Ok(Region::new(start, end))
}

impl EditorSurface for DocumentSurface {
    fn has_text_surface(&self) -> bool {
        self.text.is_some()
    }

    fn selections(&self) -> Vec<Region> {
        self.selections.clone()
    }

    fn document_region(&self) -> Region {
        Region::new(0, self.text.as_deref().map_or(0, str::len))
    }

    fn region_text(&self, region: Region) -> String {
        self.text
            .as_deref()
            .and_then(|text| text.get(region.start..region.end))
            .unwrap_or_default()
            .to_string()
    }

    fn replace_region(&mut self, region: Region, replacement: &str) -> Result<()> {
        if !self.is_boundary(region) {
            return Err(Error::UserInput(format!(
                "Cannot replace {}:{}, it is not a valid range",
                region.start, region.end
            )));
        }
        if let Some(ref mut text) = self.text {
            text.replace_range(region.start..region.end, replacement);
            self.modified = true;
        }
        Ok(())
    }

    fn open_result(&mut self, title: &str, text: &str) -> Result<()> {
        self.results.push((title.to_string(), text.to_string()));
        Ok(())
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("❌ {message}");
    }

    fn show_status(&mut self, message: &str) {
        eprintln!("ℹ️  {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_region() {
        assert_eq!(parse_region("3:7").unwrap(), Region::new(3, 7));
        assert_eq!(parse_region("7:3").unwrap(), Region::new(3, 7));
        assert!(parse_region("3").is_err());
        assert!(parse_region("a:b").is_err());
    }

    #[test]
    fn test_selections_are_checked() {
        let surface = DocumentSurface::with_text("héllo");
        assert!(
            surface
                .with_selections(&["0:2".to_string()])
                .unwrap_err()
                .is_user_input()
        );

        let surface = DocumentSurface::with_text("hello");
        assert!(surface.with_selections(&["0:99".to_string()]).is_err());
    }

    #[test]
    fn test_replace_marks_modified() {
        let mut surface = DocumentSurface::with_text("hello world")
            .with_selections(&["6:11".to_string()])
            .unwrap();
        let region = surface.selections()[0];
        assert_eq!(surface.region_text(region), "world");

        surface.replace_region(region, "there").unwrap();
        assert_eq!(surface.text(), Some("hello there"));
        assert!(surface.is_modified());
    }

    #[test]
    fn test_detached_has_no_text() {
        let surface = DocumentSurface::detached();
        assert!(!surface.has_text_surface());
        assert_eq!(surface.document_region(), Region::new(0, 0));
    }
}
