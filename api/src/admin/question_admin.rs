//! Question admin options
//!
//! Change list columns, search, the `pub_date` date filter and the add form
//! with its inline choices.

use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::inline::{
    ChoiceInline, FormsetConfig, InlineChoiceForm, InlineEditor, MinChoicesPolicy,
};
use crate::domain::entities::{validate_text, NewChoice, NewQuestion};
use crate::domain::ports::QuestionFilter;
use crate::error::{DomainError, FormErrors};

/// A question cannot be saved from the admin with fewer choices than this
pub const MIN_CHOICES: usize = 2;

/// Date hierarchy filter on `pub_date`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateFilter {
    #[default]
    Any,
    Today,
    #[serde(rename = "past_7_days")]
    Past7Days,
    ThisMonth,
    ThisYear,
}

impl DateFilter {
    /// Half-open `[from, until)` window in UTC, or `None` for `Any`
    pub fn range(&self, now: DateTime<Utc>) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let today = now.date_naive();
        let (from, until) = match self {
            DateFilter::Any => return None,
            DateFilter::Today => (today, today + Duration::days(1)),
            DateFilter::Past7Days => (today - Duration::days(7), today + Duration::days(1)),
            DateFilter::ThisMonth => {
                let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1)?;
                let next = if today.month() == 12 {
                    NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1)?
                };
                (first, next)
            }
            DateFilter::ThisYear => (
                NaiveDate::from_ymd_opt(today.year(), 1, 1)?,
                NaiveDate::from_ymd_opt(today.year() + 1, 1, 1)?,
            ),
        };
        Some((midnight(from)?, midnight(until)?))
    }
}

fn midnight(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Query string of the change list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeListQuery {
    /// Search term
    pub q: Option<String>,
    #[serde(default)]
    pub pub_date: DateFilter,
}

/// Add form: question fields plus the inline choices formset
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionAddForm {
    #[serde(default)]
    pub question_text: String,
    pub pub_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub choices: Vec<InlineChoiceForm>,
}

/// Admin options for questions
pub struct QuestionAdmin {
    inline: MinChoicesPolicy<ChoiceInline>,
}

impl Default for QuestionAdmin {
    fn default() -> Self {
        Self::new()
    }
}

impl QuestionAdmin {
    /// Columns shown in the change list
    pub const LIST_DISPLAY: [&'static str; 3] =
        ["question_text", "pub_date", "was_published_recently"];
    pub const LIST_FILTER: [&'static str; 1] = ["pub_date"];
    pub const SEARCH_FIELDS: [&'static str; 1] = ["question_text"];
    /// Fields of the add/change form, in order
    pub const FIELDS: [&'static str; 2] = ["pub_date", "question_text"];

    pub fn new() -> Self {
        Self {
            inline: MinChoicesPolicy::new(ChoiceInline, MIN_CHOICES),
        }
    }

    /// Formset used for the inline choices of the add form
    pub fn choice_formset(&self) -> FormsetConfig {
        self.inline.get_formset(FormsetConfig::default())
    }

    /// Validate the add form, collecting every error at once
    pub fn clean(&self, form: &QuestionAddForm) -> Result<(NewQuestion, Vec<NewChoice>), FormErrors> {
        let mut errors = FormErrors::new();
        let question_text = form.question_text.trim();

        if let Err(e) = validate_text("question_text", question_text) {
            errors.add_field("question_text", field_message(e));
        }
        if form.pub_date.is_none() {
            errors.add_field("pub_date", "This field is required.");
        }

        let choices = match self.choice_formset().validate(&form.choices) {
            Ok(choices) => Some(choices),
            Err(formset_errors) => {
                errors.non_field_errors.extend(formset_errors.non_field_errors);
                errors.fields.extend(formset_errors.fields);
                None
            }
        };

        match (form.pub_date, choices) {
            (Some(pub_date), Some(choices)) if errors.is_empty() => Ok((
                NewQuestion::new(question_text, pub_date),
                choices,
            )),
            _ => Err(errors),
        }
    }

    /// Translate change list parameters into a repository filter
    pub fn change_list_filter(&self, query: &ChangeListQuery, now: DateTime<Utc>) -> QuestionFilter {
        let (published_from, published_until) = match query.pub_date.range(now) {
            Some((from, until)) => (Some(from), Some(until)),
            None => (None, None),
        };
        QuestionFilter {
            search: query
                .q
                .as_deref()
                .map(str::trim)
                .filter(|q| !q.is_empty())
                .map(str::to_string),
            published_from,
            published_until,
        }
    }
}

fn field_message(e: DomainError) -> String {
    match e {
        DomainError::Validation(msg) => msg,
        other => other.to_string(),
    }
}
