//! Wire-shape documents. Every field is optional because the hosted store
//! never enforced a schema; the conversions below apply the defaults exactly
//! once, so no fallback logic leaks into call sites.

use avospace_common::model::{
    Id,
    date::PostDate,
    kaomoji::{Accessory, Cheek, Kaomoji, LeftEye, LeftSide, Mouth, RightEye, RightSide},
    post::{NewPost, Post, PostMarker},
    user::{BgColor, UserProfile, Username},
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserDocument {
    pub username: Option<String>,
    pub bg_color: Option<String>,
    /// The composed avatar as the web client stored it. Ignored on read;
    /// recomputed from the parts on write so it can never drift from them.
    pub kao: Option<String>,
    pub accessory: Option<String>,
    pub left_side: Option<String>,
    pub left_cheek: Option<String>,
    pub left_eye: Option<String>,
    pub mouth: Option<String>,
    pub right_eye: Option<String>,
    pub right_cheek: Option<String>,
    pub right_side: Option<String>,
    pub friends: Option<Vec<String>>,
}

fn glyph(field: Option<&String>) -> &str {
    field.map_or("", String::as_str)
}

impl From<UserDocument> for UserProfile {
    fn from(value: UserDocument) -> Self {
        let kaomoji = Kaomoji {
            accessory: Accessory::new_or_default(glyph(value.accessory.as_ref())),
            left_side: LeftSide::new_or_default(glyph(value.left_side.as_ref())),
            left_cheek: Cheek::new_or_default(glyph(value.left_cheek.as_ref())),
            left_eye: LeftEye::new_or_default(glyph(value.left_eye.as_ref())),
            mouth: Mouth::new_or_default(glyph(value.mouth.as_ref())),
            right_eye: RightEye::new_or_default(glyph(value.right_eye.as_ref())),
            right_cheek: Cheek::new_or_default(glyph(value.right_cheek.as_ref())),
            right_side: RightSide::new_or_default(glyph(value.right_side.as_ref())),
        };

        Self {
            username: value
                .username
                .and_then(|username| Username::new(username).ok())
                .unwrap_or_default(),
            kaomoji,
            bg_color: value.bg_color.map(BgColor::new).unwrap_or_default(),
            friends: value
                .friends
                .unwrap_or_default()
                .into_iter()
                .map(Id::new)
                .collect(),
        }
    }
}

impl From<&UserProfile> for UserDocument {
    fn from(value: &UserProfile) -> Self {
        Self {
            username: Some(value.username.get().to_owned()),
            bg_color: Some(value.bg_color.get().to_owned()),
            kao: Some(value.composed_avatar()),
            accessory: Some(value.kaomoji.accessory.get().to_owned()),
            left_side: Some(value.kaomoji.left_side.get().to_owned()),
            left_cheek: Some(value.kaomoji.left_cheek.get().to_owned()),
            left_eye: Some(value.kaomoji.left_eye.get().to_owned()),
            mouth: Some(value.kaomoji.mouth.get().to_owned()),
            right_eye: Some(value.kaomoji.right_eye.get().to_owned()),
            right_cheek: Some(value.kaomoji.right_cheek.get().to_owned()),
            right_side: Some(value.kaomoji.right_side.get().to_owned()),
            friends: Some(
                value
                    .friends
                    .iter()
                    .map(|friend| friend.get().to_owned())
                    .collect(),
            ),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PostDocument {
    pub text: Option<String>,
    pub date: Option<String>,
    pub likes: Option<u32>,
    pub uid: Option<String>,
}

impl PostDocument {
    #[must_use]
    pub fn into_post(self, id: Id<PostMarker>) -> Post {
        Post {
            id,
            author: Id::new(self.uid.unwrap_or_default()),
            text: self.text.unwrap_or_default(),
            created_at: PostDate::new(self.date.unwrap_or_default()),
            likes: self.likes.unwrap_or_default(),
        }
    }
}

impl From<&NewPost> for PostDocument {
    fn from(value: &NewPost) -> Self {
        Self {
            text: Some(value.text.clone()),
            date: Some(value.created_at.get().to_owned()),
            likes: Some(value.likes),
            uid: Some(value.author.get().to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PostDocument, UserDocument};
    use avospace_common::model::{Id, user::UserProfile};

    #[test]
    fn empty_user_document_defaults_to_the_signup_profile() {
        let profile = UserProfile::from(UserDocument::default());
        assert_eq!(profile, UserProfile::default());
        assert_eq!(profile.composed_avatar(), "(^ᗜ^)");
    }

    #[test]
    fn unknown_glyphs_fall_back_per_part() {
        let document = UserDocument {
            mouth: Some("definitely not a mouth".to_owned()),
            left_side: Some("ʕ".to_owned()),
            ..UserDocument::default()
        };

        let profile = UserProfile::from(document);
        assert_eq!(profile.kaomoji.mouth.get(), "ᗜ");
        assert_eq!(profile.kaomoji.left_side.get(), "ʕ");
    }

    #[test]
    fn overlong_usernames_fall_back_to_the_default() {
        let document = UserDocument {
            username: Some("x".repeat(200)),
            ..UserDocument::default()
        };

        assert_eq!(
            UserProfile::from(document).username.get(),
            "this_person"
        );
    }

    #[test]
    fn written_documents_carry_the_recomposed_avatar() {
        let profile = UserProfile::default();
        let document = UserDocument::from(&profile);
        assert_eq!(document.kao.as_deref(), Some("(^ᗜ^)"));
        assert_eq!(document.bg_color.as_deref(), Some("#ffffff"));
    }

    #[test]
    fn documents_use_the_wire_field_names() {
        let profile = UserProfile::default();
        let json = serde_json::to_value(UserDocument::from(&profile)).unwrap();
        assert!(json.get("bgColor").is_some());
        assert!(json.get("leftSide").is_some());
        assert!(json.get("rightCheek").is_some());
    }

    #[test]
    fn missing_post_fields_default() {
        let post = PostDocument::default().into_post(Id::new("p1"));
        assert_eq!(post.text, "");
        assert_eq!(post.likes, 0);
        assert!(post.author.is_empty());
        assert_eq!(post.created_at.parse(), None);
    }
}
