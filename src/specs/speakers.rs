// src/specs/speakers.rs
//
// Closed spokesperson table. Order matters: the first entry found in the
// searched text wins.

use tracing::debug;

use crate::core::NormalizedLine;
use crate::engine::language::Language;
use crate::engine::types::SpeakerIdentity;

/// How many leading body lines a Chinese page may name its spokesperson in.
const CHINESE_BODY_FALLBACK_LINES: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Spokesperson {
    pub english: &'static str,
    pub chinese: &'static str,
}

impl Spokesperson {
    pub fn name_in(&self, language: Language) -> &'static str {
        match language {
            Language::English => self.english,
            Language::Chinese => self.chinese,
        }
    }

    /// `"Geng Shuang|耿爽"`
    pub fn canonical(&self) -> String {
        join!(self.english, "|", self.chinese)
    }

    pub fn identity(&self, language: Language) -> SpeakerIdentity {
        SpeakerIdentity {
            original_name: s!(self.name_in(language)),
            canonical_name: Some(self.canonical()),
        }
    }
}

pub const SPOKESPERSONS: &[Spokesperson] = &[
    Spokesperson { english: "Geng Shuang", chinese: "耿爽" },
    Spokesperson { english: "Hua Chunying", chinese: "华春莹" },
    Spokesperson { english: "Zhao Lijian", chinese: "赵立坚" },
    Spokesperson { english: "Wang Wenbin", chinese: "汪文斌" },
    Spokesperson { english: "Lu Kang", chinese: "陆慷" },
    Spokesperson { english: "Hong Lei", chinese: "洪磊" },
    Spokesperson { english: "Qin Gang", chinese: "秦刚" },
    Spokesperson { english: "Mao Ning", chinese: "毛宁" },
    Spokesperson { english: "Lin Jian", chinese: "林剑" },
    Spokesperson { english: "Guo Jiakun", chinese: "郭嘉昆" },
    Spokesperson { english: "Jiang Yu", chinese: "姜瑜" },
    Spokesperson { english: "Ma Zhaoxu", chinese: "马朝旭" },
    Spokesperson { english: "Liu Weimin", chinese: "刘为民" },
    Spokesperson { english: "Liu Jianchao", chinese: "刘建超" },
    Spokesperson { english: "Kong Quan", chinese: "孔泉" },
];

/// First table entry whose name (in `language`) occurs in `text`.
pub fn find_in(text: &str, language: Language) -> Option<&'static Spokesperson> {
    SPOKESPERSONS.iter().find(|p| text.contains(p.name_in(language)))
}

/// Title first; Chinese pages then try the first non-blank body lines.
pub fn resolve(title: &str, body: &[NormalizedLine], language: Language) -> SpeakerIdentity {
    if let Some(p) = find_in(title, language) {
        return p.identity(language);
    }

    if language == Language::Chinese {
        let hit = body
            .iter()
            .filter(|l| !l.is_blank())
            .take(CHINESE_BODY_FALLBACK_LINES)
            .find_map(|l| find_in(&l.text, language));
        if let Some(p) = hit {
            debug!("speaker {} found in body, not title: {title}", p.chinese);
            return p.identity(language);
        }
    }

    debug!("no known spokesperson in {language} title: {title}");
    SpeakerIdentity::unresolved()
}
