//! ClueWeb22 language list.
//!
//! Static enum, as described at
//! <https://lemurproject.org/clueweb22/docspecs.php#Organization>.
use crate::error::Error;

/// One supported ClueWeb22 language.
///
/// `id` is the filesystem directory name used throughout shard paths;
/// `tag` is the short form used in public dataset names
/// (`clueweb22/l/<tag>`). They agree for every language except Chinese,
/// whose directory id is `zh_chs` but whose dataset tag is `zh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    De,
    En,
    Es,
    Fr,
    It,
    Ja,
    Nl,
    Po,
    Pt,
    ZhChs,
    Other,
}

/// All languages, in the order the corpus documentation lists them.
pub const LANGUAGES: &[Language] = &[
    Language::De,
    Language::En,
    Language::Es,
    Language::Fr,
    Language::It,
    Language::Ja,
    Language::Nl,
    Language::Po,
    Language::Pt,
    Language::ZhChs,
    Language::Other,
];

impl Language {
    /// Filesystem directory id, e.g. `zh_chs`.
    pub fn id(&self) -> &'static str {
        match self {
            Language::De => "de",
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::It => "it",
            Language::Ja => "ja",
            Language::Nl => "nl",
            Language::Po => "po",
            Language::Pt => "pt",
            Language::ZhChs => "zh_chs",
            Language::Other => "other",
        }
    }

    /// Short dataset-name tag, e.g. `zh`.
    pub fn tag(&self) -> &'static str {
        match self {
            Language::ZhChs => "zh",
            Language::Other => "other-languages",
            other => other.id(),
        }
    }

    /// Looks up a language by its filesystem directory id.
    pub fn from_id(id: &str) -> Result<Language, Error> {
        LANGUAGES
            .iter()
            .copied()
            .find(|lang| lang.id() == id)
            .ok_or_else(|| Error::MalformedIdentifier(format!("unknown language id: {id}")))
    }
}
