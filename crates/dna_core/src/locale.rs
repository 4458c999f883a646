//! Localized UI messages.
//!
//! Lookup is an exact match on the locale code after the encoding suffix is
//! stripped (`pt_BR.UTF-8` -> `pt_BR`). An unknown locale is an error; the
//! caller decides whether to fall back.

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    /// Status of an empty sample box.
    LoadSample,
    /// Match pressed with a box still empty.
    Match,
    /// Match result; `{}` is replaced by the percentage.
    MatchIt,
    /// Caption of the load buttons.
    Load,
    /// Status of a filled sample box.
    Loaded,
    /// Both boxes filled.
    MatchReady,
    /// Caption of the match button.
    MatchButton,
}

impl MessageKey {
    pub const ALL: &'static [MessageKey] = &[
        MessageKey::LoadSample,
        MessageKey::Match,
        MessageKey::MatchIt,
        MessageKey::Load,
        MessageKey::Loaded,
        MessageKey::MatchReady,
        MessageKey::MatchButton,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Self::LoadSample => "load_sample",
            Self::Match => "match",
            Self::MatchIt => "matchit",
            Self::Load => "load",
            Self::Loaded => "loaded",
            Self::MatchReady => "match_ready",
            Self::MatchButton => "match_button",
        }
    }
}

type Table = &'static [(MessageKey, &'static str)];

const EN_GB: Table = &[
    (MessageKey::LoadSample, "No \"DNA\" sample selected"),
    (MessageKey::Match, "Fill all the sample's boxes"),
    (
        MessageKey::MatchIt,
        "The samples have {}% of chance to being from the guy.",
    ),
    (MessageKey::Load, "Select your sample"),
    (MessageKey::Loaded, "Ready and loaded"),
    (MessageKey::MatchReady, "You are all free now"),
    (MessageKey::MatchButton, "Match"),
];

const PT_BR: Table = &[
    (MessageKey::LoadSample, "Nenhuma amostra selecionada."),
    (MessageKey::Match, "Preencha todas as caixas"),
    (MessageKey::MatchIt, "Há {}% de chance desses DNAs serem do alvo."),
    (MessageKey::Load, "Selecione a sua amostra"),
    (MessageKey::Loaded, "Carregada"),
    (MessageKey::MatchReady, "Tudo pronto para a análise"),
    (MessageKey::MatchButton, "Comparar"),
];

const LOCALES: &[(&str, Table)] = &[("en_GB", EN_GB), ("pt_BR", PT_BR)];

#[derive(Debug, Clone, Copy)]
pub struct Messages {
    locale: &'static str,
    table: Table,
}

impl Messages {
    pub fn for_locale(code: &str) -> Result<Self> {
        let wanted = normalize_locale(code);
        LOCALES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|&(locale, table)| Self { locale, table })
            .ok_or_else(|| Error::LocaleNotSupported {
                locale: code.to_string(),
            })
    }

    /// `preferred` if it has a table, otherwise `fallback` (logged).
    pub fn resolve(preferred: &str, fallback: Option<&str>) -> Result<Self> {
        match Self::for_locale(preferred) {
            Ok(messages) => Ok(messages),
            Err(err) => {
                let Some(fallback) = fallback else {
                    return Err(err);
                };
                log::warn!("{err}; falling back to '{fallback}'");
                Self::for_locale(fallback)
            }
        }
    }

    pub fn supported() -> impl Iterator<Item = &'static str> {
        LOCALES.iter().map(|(name, _)| *name)
    }

    pub fn locale(&self) -> &'static str {
        self.locale
    }

    pub fn get(&self, key: MessageKey) -> &'static str {
        self.table
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, text)| *text)
            .unwrap_or_else(|| key.code())
    }

    /// `MatchIt` with the similarity ratio rendered as a percentage.
    pub fn match_result(&self, ratio: f64) -> String {
        self.get(MessageKey::MatchIt)
            .replacen("{}", &format!("{:.2}", ratio * 100.0), 1)
    }
}

/// `en_GB.UTF-8@euro` -> `en_GB`, `pt-BR` -> `pt_BR`.
pub fn normalize_locale(code: &str) -> String {
    let base = code
        .split(['.', '@'])
        .next()
        .unwrap_or_default()
        .trim();
    base.replace('-', "_")
}
