use crate::model::{Id, kaomoji::Kaomoji};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use thiserror::Error;

pub const USERNAME_MAX_LEN: usize = 50;
pub const DEFAULT_USERNAME: &str = "this_person";
pub const DEFAULT_BG_COLOR: &str = "#ffffff";

#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub struct UserMarker;

/// One account's identity and presentation, as the rest of the application
/// sees it: already strictly typed and fully defaulted. Conversion from the
/// store's shape-free documents happens once, at the store boundary.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: Username,
    pub kaomoji: Kaomoji,
    pub bg_color: BgColor,
    pub friends: Vec<Id<UserMarker>>,
}

impl UserProfile {
    /// The avatar string shown next to the user everywhere. Always derived
    /// from the current parts.
    #[must_use]
    pub fn composed_avatar(&self) -> String {
        self.kaomoji.compose()
    }

    #[must_use]
    pub fn is_friend(&self, user: &Id<UserMarker>) -> bool {
        self.friends.contains(user)
    }
}

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize)]
#[serde(transparent)]
pub struct Username(String);

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash, Error)]
#[error("The username is invalid: {0}")]
pub struct InvalidUsernameError(String);

impl Username {
    pub fn new(username: String) -> Result<Self, InvalidUsernameError> {
        if username.chars().count() <= USERNAME_MAX_LEN {
            Ok(Username(username))
        } else {
            Err(InvalidUsernameError(username))
        }
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Default for Username {
    fn default() -> Self {
        Self(DEFAULT_USERNAME.to_owned())
    }
}

impl<'de> Deserialize<'de> for Username {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let inner = String::deserialize(deserializer)?;
        Username::new(inner)
            .map_err(|err| Error::invalid_value(Unexpected::Str(&err.0), &"Username"))
    }
}

/// A CSS color string. The web client only ever wrote `#rrggbb` values, but
/// older documents are not guaranteed to, so no validation is applied.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BgColor(String);

impl BgColor {
    #[must_use]
    pub fn new(color: impl Into<String>) -> Self {
        Self(color.into())
    }

    #[must_use]
    pub fn get(&self) -> &str {
        &self.0
    }
}

impl Default for BgColor {
    fn default() -> Self {
        Self(DEFAULT_BG_COLOR.to_owned())
    }
}
