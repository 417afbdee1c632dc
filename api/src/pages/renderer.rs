//! Page renderer
//!
//! Renders the poll pages with Tera. Templates are compiled into the binary
//! and loaded once at startup.

use serde::Serialize;
use tera::{Context, Tera};

use crate::app::QuestionWithChoices;
use crate::domain::entities::Question;

const TEMPLATES: [(&str, &str); 4] = [
    ("base.html", include_str!("../../templates/base.html")),
    ("polls/index.html", include_str!("../../templates/polls/index.html")),
    ("polls/detail.html", include_str!("../../templates/polls/detail.html")),
    ("polls/results.html", include_str!("../../templates/polls/results.html")),
];

/// Renders poll pages from the embedded templates
pub struct PageRenderer {
    tera: Tera,
}

impl PageRenderer {
    /// Parse all templates; fails on syntax errors
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    /// Index page. Context variable: `latest_question_list`
    pub fn render_index(&self, latest_question_list: &[Question]) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("latest_question_list", latest_question_list);
        self.tera.render("polls/index.html", &context)
    }

    /// Voting form, optionally flagged with "You didn't pick a choice."
    pub fn render_detail(
        &self,
        page: &QuestionWithChoices,
        no_choice_selected: bool,
    ) -> Result<String, tera::Error> {
        let mut context = question_context(page)?;
        context.insert("no_choice_selected", &no_choice_selected);
        self.tera.render("polls/detail.html", &context)
    }

    /// Vote counts per choice
    pub fn render_results(&self, page: &QuestionWithChoices) -> Result<String, tera::Error> {
        let context = question_context(page)?;
        self.tera.render("polls/results.html", &context)
    }
}

fn question_context<T: Serialize>(page: &T) -> Result<Context, tera::Error> {
    // `question` and `choices` become top-level template variables
    Context::from_serialize(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Choice, ChoiceId, QuestionId};
    use chrono::Utc;

    fn page(votes: &[i32]) -> QuestionWithChoices {
        QuestionWithChoices {
            question: Question {
                id: QuestionId(7),
                question_text: "Past Question".to_string(),
                pub_date: Utc::now(),
            },
            choices: votes
                .iter()
                .enumerate()
                .map(|(i, v)| Choice {
                    id: ChoiceId(i as i32 + 1),
                    question_id: QuestionId(7),
                    choice_text: format!("Choice {}", i + 1),
                    votes: *v,
                })
                .collect(),
        }
    }

    #[test]
    fn templates_parse() {
        assert!(PageRenderer::new().is_ok());
    }

    #[test]
    fn empty_index_shows_placeholder() {
        let html = PageRenderer::new().unwrap().render_index(&[]).unwrap();
        assert!(html.contains("No polls are available."));
    }

    #[test]
    fn index_links_questions_in_order() {
        let renderer = PageRenderer::new().unwrap();
        let newer = page(&[]).question;
        let mut older = newer.clone();
        older.id = QuestionId(3);
        older.question_text = "Older Question".to_string();

        let html = renderer.render_index(&[newer, older]).unwrap();
        assert!(!html.contains("No polls are available."));
        let first = html.find("/polls/7/").unwrap();
        let second = html.find("/polls/3/").unwrap();
        assert!(first < second);
    }

    #[test]
    fn detail_has_vote_form() {
        let html = PageRenderer::new()
            .unwrap()
            .render_detail(&page(&[0, 0]), false)
            .unwrap();
        assert!(html.contains("Past Question"));
        assert!(html.contains(r#"action="/polls/7/vote/""#));
        assert!(html.contains(r#"name="choice" id="choice2" value="2""#));
        assert!(!html.contains("You didn't pick a choice"));
    }

    #[test]
    fn detail_shows_missing_choice_message() {
        let html = PageRenderer::new()
            .unwrap()
            .render_detail(&page(&[0, 0]), true)
            .unwrap();
        assert!(html.contains("You didn't pick a choice."));
    }

    #[test]
    fn results_pluralize_votes() {
        let html = PageRenderer::new()
            .unwrap()
            .render_results(&page(&[1, 0, 2]))
            .unwrap();
        assert!(html.contains("Choice 1 -- 1 vote<"));
        assert!(html.contains("Choice 2 -- 0 votes"));
        assert!(html.contains("Choice 3 -- 2 votes"));
    }

    #[test]
    fn question_text_is_escaped() {
        let mut page = page(&[]);
        page.question.question_text = "<script>alert(1)</script>".to_string();
        let html = PageRenderer::new().unwrap().render_results(&page).unwrap();
        assert!(!html.contains("<script>"));
    }
}
