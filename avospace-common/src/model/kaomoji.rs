//! The kaomoji avatar: eight independently chosen glyph parts, each drawn
//! from a small fixed option set, composed left to right into one string.

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{Error, Unexpected},
};
use std::fmt::Display;

pub const ACCESSORY_OPTIONS: [&str; 16] = [
    "", "✧", "𝜗ৎ", "⋆˚꩜｡", "⋆˚࿔", "ꉂ", "ദി", "✧ദ്ദി", "❀༉", "♡", "⸜", "٩", "و", "⸝", "ᕙ",
    "ᕗ",
];
pub const LEFT_SIDE_OPTIONS: [&str; 6] = ["(", "[", "𝔌", "ʕ", "|", "૮"];
pub const RIGHT_SIDE_OPTIONS: [&str; 6] = [")", "]", "𝔍", "ʔ", "|", "ა"];
pub const CHEEK_OPTIONS: [&str; 11] = ["", " ", "^", "˵", "՞", "｡", "*", "๑", "..", "ᢣ", "⸝⸝"];
pub const LEFT_EYE_OPTIONS: [&str; 16] = [
    "^", "˃", "╥", "ᵔ", "•", "•̀", "-", "◞", "꩜⭒", "°", ".", "≧", "◜", "¬", "ᴗ͈", "ˆ",
];
pub const RIGHT_EYE_OPTIONS: [&str; 16] = [
    "^", "˂", "╥", "ᵔ", "•", "•́", "-", "◟", "꩜⭒", "°", ".", "≦", "◝", "¬", "ᴗ͈", "ˆ",
];
pub const MOUTH_OPTIONS: [&str; 15] = [
    "", "ᗜ", "▽", "﹏", "ヮ", "‿", "⤙", "꒳", "˕", "˘", "𐃷", " ̫", "⌓", "‸", "ᴗ",
];

macro_rules! kaomoji_part {
    ($(#[$meta:meta])* $name:ident: options = $options:ident, default = $default:expr) => {
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(&'static str);

        impl $name {
            pub const OPTIONS: &'static [&'static str] = &$options;

            /// `None` if the glyph is outside this part's option set.
            #[must_use]
            pub fn new(glyph: &str) -> Option<Self> {
                Self::OPTIONS
                    .iter()
                    .find(|option| **option == glyph)
                    .map(|option| Self(option))
            }

            /// Falls back to the part's default for anything outside the
            /// option set, matching the defaulting the web client applied to
            /// shape-free documents.
            #[must_use]
            pub fn new_or_default(glyph: &str) -> Self {
                Self::new(glyph).unwrap_or_default()
            }

            #[must_use]
            pub fn get(self) -> &'static str {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self($default)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let glyph = String::deserialize(deserializer)?;
                Self::new(&glyph).ok_or_else(|| {
                    Error::invalid_value(Unexpected::Str(&glyph), &stringify!($name))
                })
            }
        }
    };
}

kaomoji_part!(Accessory: options = ACCESSORY_OPTIONS, default = "");
kaomoji_part!(LeftSide: options = LEFT_SIDE_OPTIONS, default = "(");
kaomoji_part!(RightSide: options = RIGHT_SIDE_OPTIONS, default = ")");
kaomoji_part!(
    /// Used for both the left and the right cheek; the option set is shared.
    Cheek: options = CHEEK_OPTIONS, default = ""
);
kaomoji_part!(LeftEye: options = LEFT_EYE_OPTIONS, default = "^");
kaomoji_part!(RightEye: options = RIGHT_EYE_OPTIONS, default = "^");
kaomoji_part!(Mouth: options = MOUTH_OPTIONS, default = "ᗜ");

/// The full avatar. The composed string is always derived from the current
/// parts, never stored alongside them, so the two cannot drift apart.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Default, Hash, Serialize, Deserialize)]
pub struct Kaomoji {
    pub accessory: Accessory,
    pub left_side: LeftSide,
    pub left_cheek: Cheek,
    pub left_eye: LeftEye,
    pub mouth: Mouth,
    pub right_eye: RightEye,
    pub right_cheek: Cheek,
    pub right_side: RightSide,
}

impl Kaomoji {
    /// Concatenation of the eight parts in fixed order.
    #[must_use]
    pub fn compose(&self) -> String {
        [
            self.accessory.get(),
            self.left_side.get(),
            self.left_cheek.get(),
            self.left_eye.get(),
            self.mouth.get(),
            self.right_eye.get(),
            self.right_cheek.get(),
            self.right_side.get(),
        ]
        .concat()
    }
}

impl Display for Kaomoji {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.compose())
    }
}

#[cfg(test)]
mod tests {
    use super::{Accessory, Cheek, Kaomoji, LeftEye, LeftSide, Mouth, RightEye, RightSide};

    #[test]
    fn default_avatar() {
        assert_eq!(Kaomoji::default().compose(), "(^ᗜ^)");
    }

    #[test]
    fn compose_is_the_ordered_concatenation_of_parts() {
        let kaomoji = Kaomoji {
            accessory: Accessory::new("♡").unwrap(),
            left_side: LeftSide::new("ʕ").unwrap(),
            left_cheek: Cheek::new("˵").unwrap(),
            left_eye: LeftEye::new("˃").unwrap(),
            mouth: Mouth::new("ᗜ").unwrap(),
            right_eye: RightEye::new("˂").unwrap(),
            right_cheek: Cheek::new(" ").unwrap(),
            right_side: RightSide::new("ʔ").unwrap(),
        };

        let concatenated = format!(
            "{}{}{}{}{}{}{}{}",
            kaomoji.accessory.get(),
            kaomoji.left_side.get(),
            kaomoji.left_cheek.get(),
            kaomoji.left_eye.get(),
            kaomoji.mouth.get(),
            kaomoji.right_eye.get(),
            kaomoji.right_cheek.get(),
            kaomoji.right_side.get(),
        );
        assert_eq!(kaomoji.compose(), concatenated);
        assert_eq!(kaomoji.compose(), "♡ʕ˵˃ᗜ˂ ʔ");
    }

    #[test]
    fn parts_reject_glyphs_outside_the_option_set() {
        assert!(Mouth::new("x").is_none());
        assert!(LeftSide::new("ʔ").is_none());
        assert_eq!(Mouth::new_or_default("x"), Mouth::default());
    }

    #[test]
    fn every_default_is_a_member_of_its_option_set() {
        assert!(Accessory::new(Accessory::default().get()).is_some());
        assert!(LeftSide::new(LeftSide::default().get()).is_some());
        assert!(Cheek::new(Cheek::default().get()).is_some());
        assert!(LeftEye::new(LeftEye::default().get()).is_some());
        assert!(Mouth::new(Mouth::default().get()).is_some());
        assert!(RightEye::new(RightEye::default().get()).is_some());
        assert!(RightSide::new(RightSide::default().get()).is_some());
    }
}
