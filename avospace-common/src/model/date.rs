use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

/// `M/D/YYYY`, the shape the web client has always written.
const DATE_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

/// The creation date of a post, as the store holds it: a locale-formatted
/// `M/D/YYYY` string. Legacy records contain arbitrary strings, so the raw
/// value is kept verbatim and parsing is best-effort.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostDate(String);

impl PostDate {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn from_date(date: Date) -> Self {
        Self(format!(
            "{}/{}/{}",
            u8::from(date.month()),
            date.day(),
            date.year()
        ))
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }

    /// `None` for anything that is not a well-formed `M/D/YYYY` date.
    /// A failed parse is never an error; it only demotes the post in
    /// newest-first orderings.
    #[must_use]
    pub fn parse(&self) -> Option<Date> {
        Date::parse(&self.0, DATE_FORMAT).ok()
    }

    /// Newest-first ordering: valid dates descending, every valid date before
    /// every unparseable one, unparseable dates mutually equal (so a stable
    /// sort preserves their arrival order).
    #[must_use]
    pub fn cmp_newest_first(&self, other: &Self) -> Ordering {
        match (self.parse(), other.parse()) {
            (Some(this), Some(other)) => other.cmp(&this),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

impl From<Date> for PostDate {
    fn from(value: Date) -> Self {
        Self::from_date(value)
    }
}
