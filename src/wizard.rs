//! Application wizard / 申请向导
//!
//! The server keeps no wizard state: the client sends its current step and
//! the whole form, and gets back the transition outcome. Validation failures
//! are part of the outcome, never an error.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::datasets::languages;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    PersonalInfo,
    AcademicBackground,
    Tests,
    Preferences,
    Submitted,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::PersonalInfo,
        Step::AcademicBackground,
        Step::Tests,
        Step::Preferences,
        Step::Submitted,
    ];

    /// 1-based position for progress display / 步骤序号
    pub fn number(self) -> u8 {
        match self {
            Step::PersonalInfo => 1,
            Step::AcademicBackground => 2,
            Step::Tests => 3,
            Step::Preferences => 4,
            Step::Submitted => 5,
        }
    }

    /// Step reached by "Next". Preferences only leaves through `submit`.
    fn following(self) -> Option<Step> {
        match self {
            Step::PersonalInfo => Some(Step::AcademicBackground),
            Step::AcademicBackground => Some(Step::Tests),
            Step::Tests => Some(Step::Preferences),
            Step::Preferences | Step::Submitted => None,
        }
    }

    fn preceding(self) -> Option<Step> {
        match self {
            Step::PersonalInfo | Step::Submitted => None,
            Step::AcademicBackground => Some(Step::PersonalInfo),
            Step::Tests => Some(Step::AcademicBackground),
            Step::Preferences => Some(Step::Tests),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationForm {
    pub name: String,
    pub email: String,
    pub whatsapp: String,
    pub academic_level: String,
    pub current_institution: String,
    pub gpa: String,
    pub test_name: String,
    pub test_score: String,
    pub preferred_course: String,
    pub preferred_university: String,
    /// Language code of the teaching medium / 授课语言代码
    pub study_medium: String,
    pub additional_info: String,
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(EMAIL_PATTERN).ok());

fn is_email(value: &str) -> bool {
    EMAIL_RE.as_ref().map_or(false, |re| re.is_match(value))
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Offending fields of one step, in form order / 校验单个步骤
pub fn validate(step: Step, form: &ApplicationForm) -> Vec<&'static str> {
    let mut invalid = Vec::new();
    match step {
        Step::PersonalInfo => {
            if blank(&form.name) {
                invalid.push("name");
            }
            if !is_email(form.email.trim()) {
                invalid.push("email");
            }
            if blank(&form.whatsapp) {
                invalid.push("whatsapp");
            }
        }
        Step::AcademicBackground => {
            if blank(&form.academic_level) {
                invalid.push("academicLevel");
            }
            if blank(&form.current_institution) {
                invalid.push("currentInstitution");
            }
            if blank(&form.gpa) {
                invalid.push("gpa");
            }
        }
        Step::Tests => {
            if blank(&form.test_name) && !blank(&form.test_score) {
                invalid.push("testName");
            }
        }
        Step::Preferences => {
            if blank(&form.preferred_course) {
                invalid.push("preferredCourse");
            }
            if blank(&form.preferred_university) {
                invalid.push("preferredUniversity");
            }
            if !blank(&form.study_medium) && languages::by_code(&form.study_medium).is_none() {
                invalid.push("studyMedium");
            }
        }
        Step::Submitted => {}
    }
    invalid
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub step: Step,
    pub step_number: u8,
    pub moved: bool,
    pub invalid_fields: Vec<&'static str>,
}

impl Transition {
    fn to(step: Step) -> Self {
        Self { step, step_number: step.number(), moved: true, invalid_fields: Vec::new() }
    }

    fn stay(step: Step, invalid_fields: Vec<&'static str>) -> Self {
        Self { step, step_number: step.number(), moved: false, invalid_fields }
    }
}

/// "Next": advance one step iff the current one validates / 下一步
pub fn next(step: Step, form: &ApplicationForm) -> Transition {
    let invalid = validate(step, form);
    if !invalid.is_empty() {
        tracing::debug!("Wizard step {:?} blocked by {:?}", step, invalid);
        return Transition::stay(step, invalid);
    }
    match step.following() {
        Some(target) => Transition::to(target),
        None => Transition::stay(step, invalid),
    }
}

/// "Back": one step backward, no-op at the first step and after submission / 上一步
pub fn back(step: Step) -> Transition {
    match step.preceding() {
        Some(target) => Transition::to(target),
        None => Transition::stay(step, Vec::new()),
    }
}

/// Messaging deep link built from a completed form / WhatsApp跳转
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Handoff {
    pub message: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "reason")]
pub enum Rejection {
    /// Submission only happens from the preferences step
    WrongStep { step: Step },
    #[serde(rename_all = "camelCase")]
    Invalid { step: Step, invalid_fields: Vec<&'static str> },
}

/// Compose the handoff message / 生成消息文本
pub fn compose_message(form: &ApplicationForm) -> String {
    let mut message = format!(
        "Hello GlobalEdu Gateway! I'm {}, interested in {} at {}. Contact: {}. Email: {}",
        form.name.trim(),
        form.preferred_course.trim(),
        form.preferred_university.trim(),
        form.whatsapp.trim(),
        form.email.trim(),
    );

    let mut details: Vec<String> = Vec::new();
    if !blank(&form.academic_level) {
        details.push(format!("Academic level: {}", form.academic_level.trim()));
    }
    if !blank(&form.current_institution) {
        details.push(format!("Institution: {}", form.current_institution.trim()));
    }
    if !blank(&form.gpa) {
        details.push(format!("GPA: {}", form.gpa.trim()));
    }
    if !blank(&form.test_name) {
        let score = if blank(&form.test_score) { "score pending" } else { form.test_score.trim() };
        details.push(format!("Test: {} ({})", form.test_name.trim(), score));
    }
    if let Some(language) = languages::by_code(&form.study_medium) {
        details.push(format!("Study medium: {}", language.name));
    }
    if !blank(&form.additional_info) {
        details.push(format!("Notes: {}", form.additional_info.trim()));
    }

    for detail in details {
        message.push('\n');
        message.push_str(&detail);
    }
    message
}

pub fn whatsapp_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(|c| c.is_ascii_digit()).collect();
    format!("https://wa.me/{}?text={}", digits, urlencoding::encode(message))
}

/// Final transition: every step must validate / 提交申请
pub fn submit(step: Step, form: &ApplicationForm, whatsapp_number: &str) -> Result<Handoff, Rejection> {
    if step != Step::Preferences {
        return Err(Rejection::WrongStep { step });
    }
    // The client could have skipped steps, so earlier ones are checked again.
    for earlier in Step::ALL.iter().copied().take_while(|s| *s != Step::Submitted) {
        let invalid = validate(earlier, form);
        if !invalid.is_empty() {
            return Err(Rejection::Invalid { step: earlier, invalid_fields: invalid });
        }
    }

    let message = compose_message(form);
    let url = whatsapp_url(whatsapp_number, &message);
    tracing::info!("Application handoff prepared for {}", form.email.trim());
    Ok(Handoff { message, url })
}
