//! Spreadsheet address parsed from a share URL.

use url::Url;

/// Errors raised while reading a spreadsheet URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SheetLocationError {
    /// The text is not a URL.
    #[error("sheet URL is invalid: {0}")]
    InvalidUrl(String),
    /// The URL has no `/spreadsheets/d/<id>` segment.
    #[error("sheet URL does not contain a spreadsheet id: {0}")]
    MissingId(String),
}

/// Which spreadsheet and tab hold the workout log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLocation {
    spreadsheet_id: String,
    worksheet: String,
}

impl SheetLocation {
    /// Build a location from a browser URL such as
    /// `https://docs.google.com/spreadsheets/d/<id>/edit#gid=0`.
    ///
    /// # Errors
    ///
    /// Returns [`SheetLocationError`] when the URL is malformed or has no id.
    pub fn from_url(sheet_url: &str, worksheet: impl Into<String>) -> Result<Self, SheetLocationError> {
        let url = Url::parse(sheet_url.trim())
            .map_err(|error| SheetLocationError::InvalidUrl(error.to_string()))?;
        let segments: Vec<&str> = url
            .path_segments()
            .map(Iterator::collect)
            .unwrap_or_default();
        let spreadsheet_id = segments
            .windows(3)
            .find_map(|window| match window {
                ["spreadsheets", "d", id] if !id.is_empty() => Some(*id),
                _ => None,
            })
            .ok_or_else(|| SheetLocationError::MissingId(sheet_url.to_owned()))?;

        Ok(Self {
            spreadsheet_id: spreadsheet_id.to_owned(),
            worksheet: worksheet.into(),
        })
    }

    /// Spreadsheet id.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Tab name.
    pub fn worksheet(&self) -> &str {
        &self.worksheet
    }

    /// A1 range covering the whole tab, quoted so names with spaces work.
    pub(super) fn whole_sheet_range(&self) -> String {
        format!("'{}'", self.worksheet.replace('\'', "''"))
    }

    /// The first row of the tab, where the column headers live.
    pub(super) fn header_range(&self) -> String {
        format!("{}!1:1", self.whole_sheet_range())
    }

    /// Anchor for appends: the first cell of the tab.
    pub(super) fn append_range(&self) -> String {
        format!("{}!A1", self.whole_sheet_range())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://docs.google.com/spreadsheets/d/1AbC-xyz_09/edit#gid=0")]
    #[case("https://docs.google.com/spreadsheets/d/1AbC-xyz_09")]
    #[case("https://docs.google.com/spreadsheets/d/1AbC-xyz_09/")]
    #[case("  https://docs.google.com/spreadsheets/d/1AbC-xyz_09/edit?usp=sharing ")]
    fn extracts_spreadsheet_id(#[case] url: &str) {
        let location = SheetLocation::from_url(url, "Workouts").expect("url parses");
        assert_eq!(location.spreadsheet_id(), "1AbC-xyz_09");
        assert_eq!(location.worksheet(), "Workouts");
    }

    #[rstest]
    #[case("not a url")]
    #[case("https://docs.google.com/document/d/abc/edit")]
    #[case("https://docs.google.com/spreadsheets/d/")]
    #[case("https://docs.google.com/spreadsheets/")]
    fn rejects_urls_without_id(#[case] url: &str) {
        assert!(SheetLocation::from_url(url, "Workouts").is_err());
    }

    #[test]
    fn quotes_tab_names() {
        let location = SheetLocation::from_url(
            "https://docs.google.com/spreadsheets/d/abc/edit",
            "Jo's Log",
        )
        .expect("url parses");
        assert_eq!(location.whole_sheet_range(), "'Jo''s Log'");
        assert_eq!(location.append_range(), "'Jo''s Log'!A1");
    }
}
