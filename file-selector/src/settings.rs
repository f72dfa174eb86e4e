/// User settings that outlive a single selector session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SelectorSettings {
    /// The "long-press a folder to choose it" hint was already shown.
    pub folder_hint_shown: bool,
}
