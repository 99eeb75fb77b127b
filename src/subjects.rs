//! Subject table: who the model should be, and which sites count as authoritative.

/// Everything the pipeline needs to know about one school subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubjectProfile {
    /// Canonical display name.
    pub name: &'static str,
    /// Alternate keys that resolve to this profile.
    pub aliases: &'static [&'static str],
    /// System instruction for the completion service.
    pub persona: &'static str,
    /// Trusted domains, most authoritative first.
    pub trusted_domains: &'static [&'static str],
    /// Whether a short-answer computation lookup makes sense.
    pub quantitative: bool,
}

pub const SUBJECTS: &[SubjectProfile] = &[
    SubjectProfile {
        name: "Математика",
        aliases: &["math", "mathematics", "алгебра", "геометрия"],
        persona: "Ты - опытный учитель математики. Решаешь задачи строго и пошагово, \
                  проверяешь вычисления и объясняешь каждое преобразование простым языком.",
        trusted_domains: &["mathprofi.ru", "khanacademy.org", "wolframalpha.com"],
        quantitative: true,
    },
    SubjectProfile {
        name: "Физика",
        aliases: &["physics"],
        persona: "Ты - опытный учитель физики. Начинаешь с «Дано», называешь используемые \
                  законы и формулы, следишь за единицами измерения.",
        trusted_domains: &["class-fizika.ru", "femto.com.ua", "khanacademy.org"],
        quantitative: true,
    },
    SubjectProfile {
        name: "Химия",
        aliases: &["chemistry"],
        persona: "Ты - опытный учитель химии. Записываешь уравнения реакций, расставляешь \
                  коэффициенты и поясняешь свойства веществ.",
        trusted_domains: &["himija-online.ru", "chemport.ru"],
        quantitative: false,
    },
    SubjectProfile {
        name: "Русский язык",
        aliases: &["russian"],
        persona: "Ты - опытный учитель русского языка. Опираешься на правила орфографии \
                  и пунктуации и приводишь примеры.",
        trusted_domains: &["gramota.ru", "orfogrammka.ru"],
        quantitative: false,
    },
    SubjectProfile {
        name: "Литература",
        aliases: &["literature"],
        persona: "Ты - опытный учитель литературы. Анализируешь произведения, опираясь на \
                  текст, контекст эпохи и биографию автора.",
        trusted_domains: &["ilibrary.ru", "feb-web.ru"],
        quantitative: false,
    },
    SubjectProfile {
        name: "Биология",
        aliases: &["biology"],
        persona: "Ты - опытный учитель биологии. Объясняешь процессы живых организмов \
                  последовательно и с примерами из природы.",
        trusted_domains: &["biomolecula.ru", "bio-faq.ru"],
        quantitative: false,
    },
];

/// Used for any subject the table does not know.
pub const GENERIC: SubjectProfile = SubjectProfile {
    name: "",
    aliases: &[],
    persona: "Ты - профессиональный школьный учитель, объясняющий решение задач простым языком.",
    trusted_domains: &["ru.wikipedia.org", "britannica.com"],
    quantitative: false,
};

/// Resolve a subject string to its profile, falling back to [`GENERIC`].
/// Matching ignores case and surrounding whitespace.
pub fn profile(subject: &str) -> &'static SubjectProfile {
    let key = subject.trim().to_lowercase();
    SUBJECTS
        .iter()
        .find(|p| p.name.to_lowercase() == key || p.aliases.iter().any(|a| *a == key))
        .unwrap_or(&GENERIC)
}
