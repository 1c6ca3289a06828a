//! Fixed instructions and templates sent to the tutoring model.

use crate::domain::Category;

/// System instruction for first-turn answers.
pub const TUTOR_SYSTEM_PROMPT: &str = "学生の学習支援を行うAI教師です。分かりやすく、教育的な回答を心がけてください。回答は日本語で、高校生や大学生にとって理解しやすい内容にしてください。";

/// System instruction for continuing an existing exchange.
pub const FOLLOW_UP_SYSTEM_PROMPT: &str =
    "学生の学習支援を行うAI教師です。前の質問と回答を踏まえて、フォローアップの質問に答えてください。";

/// System instruction for classification. The model must reply with a bare
/// category token.
pub const CLASSIFIER_SYSTEM_PROMPT: &str = "あなたは質問を分類する専門家です。質問を以下のカテゴリーのいずれかに分類してください: study(学習), career(キャリア), exam(大学受験), other(その他)。カテゴリー名のみを回答してください。";

const ANSWER_GUIDANCE: &str = "\
この質問に対して、以下の点を考慮して回答してください：
1. 高校生や大学生にとって分かりやすい説明
2. 具体的な例や方法の提示
3. 実践的なアドバイス
4. 励ましやモチベーションを高める要素

回答は500文字以内でまとめてください。";

/// Build the user turn for a first answer: category label, question, the four
/// guidance bullets and the length ceiling.
pub fn answer_prompt(question: &str, category: Category) -> String {
    format!(
        "カテゴリー: {}\n質問: {}\n\n{}",
        category.label(),
        question,
        ANSWER_GUIDANCE
    )
    .trim()
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prompt_interpolates_label_and_question() {
        let prompt = answer_prompt("効率的な学習方法は？", Category::Study);
        assert!(prompt.starts_with("カテゴリー: 学習\n質問: 効率的な学習方法は？\n\n"));
        assert!(prompt.contains("4. 励ましやモチベーションを高める要素"));
        assert!(prompt.ends_with("回答は500文字以内でまとめてください。"));
    }

    #[test]
    fn answer_prompt_is_trimmed() {
        let prompt = answer_prompt("  ", Category::Other);
        assert!(prompt.starts_with("カテゴリー: その他"));
        assert_eq!(prompt, prompt.trim());
    }

    #[test]
    fn classifier_prompt_lists_every_category() {
        for category in Category::ALL {
            assert!(CLASSIFIER_SYSTEM_PROMPT.contains(category.as_str()));
            assert!(CLASSIFIER_SYSTEM_PROMPT.contains(category.label()));
        }
    }
}
