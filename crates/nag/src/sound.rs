use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

/// Label of a simulated sound effect. Nothing is ever played; the label is only shown.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    EnumString,
    EnumIter,
    IntoStaticStr,
    StrumDisplay,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum SoundKind {
    Loading,
    Complete,
    Popup,
    Shake,
    Music,
    Move,
    Toggle,
    Menu,
    Close,
    Mute,
}

impl SoundKind {
    pub fn label(&self) -> &'static str {
        (*self).into()
    }
}

/// What an expiring sound timer does when a newer label has replaced the one it was armed for.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "kebab-case")]
pub enum SoundClear {
    /// Clear whatever is showing. A stale timer can cut a newer label short.
    #[default]
    #[strum(serialize = "unconditional", serialize = "always")]
    Unconditional,
    /// Clear only if the label is still the one the timer was armed for.
    #[strum(serialize = "if-unchanged", serialize = "if_unchanged", serialize = "latest")]
    IfUnchanged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_labels_are_lowercase() {
        for kind in SoundKind::iter() {
            assert_eq!(kind.label(), kind.label().to_lowercase());
            assert_eq!(kind.to_string(), kind.label());
        }
        assert_eq!(SoundKind::Music.label(), "music");
        assert_eq!(SoundKind::from_str("POPUP").unwrap(), SoundKind::Popup);
    }

    #[test]
    fn test_sound_clear_deserialization() {
        let cases = vec![
            ("\"unconditional\"", SoundClear::Unconditional),
            ("\"Always\"", SoundClear::Unconditional),
            ("\"if-unchanged\"", SoundClear::IfUnchanged),
            ("\"IF_UNCHANGED\"", SoundClear::IfUnchanged),
            ("\"latest\"", SoundClear::IfUnchanged),
        ];

        for (json, expected) in cases {
            let deserialized: SoundClear = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }

        assert!(serde_json::from_str::<SoundClear>("\"sometimes\"").is_err());
    }
}
