use crate::lookup::ContextBundle;
use crate::subjects;

const FORMAT_RULE: &str = "Ответь строго в формате JSON, без markdown и без пояснений вне JSON.";
const PLAIN_FIELDS: &str = "{\n  \"answer\": \"краткий финальный ответ\",\n  \"steps\": [\"шаг 1\", \"шаг 2\", \"шаг 3\"]\n}";
const GROUNDED_FIELDS: &str = "{\n  \"answer\": \"краткий финальный ответ\",\n  \"steps\": [\"шаг 1\", \"шаг 2\", \"шаг 3\"],\n  \"confidence\": \"высокая | средняя | низкая\",\n  \"sources_used\": [\"названия источников, на которые ты опирался\"]\n}";
const RULES: &[&str] = &[
    "Реши задачу пошагово и подробно объясни каждый шаг.",
    "Каждый шаг должен быть понятным школьнику.",
    "Поле \"steps\" - массив строк в порядке решения.",
];
const GROUNDED_RULE: &str =
    "Опирайся на справочные материалы ниже, если они относятся к задаче, и не противоречь им.";

/// System and user messages for one completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

/// Build the instruction pair for a subject, question and gathered context.
pub fn build_solve_prompt(subject: &str, question: &str, context: &ContextBundle) -> PromptPair {
    let system = subjects::profile(subject).persona.to_string();
    let grounded = !context.is_empty();

    let mut rules: Vec<&str> = RULES.to_vec();
    if grounded {
        rules.push(GROUNDED_RULE);
    }
    let rules = rules
        .iter()
        .map(|rule| format!("- {}", rule))
        .collect::<Vec<_>>()
        .join("\n");

    let fields = if grounded { GROUNDED_FIELDS } else { PLAIN_FIELDS };
    let context_text = context.to_prompt_text();

    let mut user = format!("Предмет: \"{subject}\".\n\nЗадача: {question}\n\n{rules}\n");
    if !context_text.is_empty() {
        user.push_str(&format!("\n{context_text}\n"));
    }
    user.push_str(&format!("\n{FORMAT_RULE}\n{fields}\n"));

    PromptPair { system, user }
}
