//! Field validation for everything that gets persisted.
//!
//! Validators collect every failing field instead of stopping at the first,
//! so a rejected write reports all of its problems at once.

use lazy_static::lazy_static;
use regex::Regex;

use crate::entities::{
    Message, NotificationDraft, NotificationTarget, Portfolio, Project, UserNotification,
};
use crate::errors::ValidationErrors;

lazy_static! {
    static ref EMAIL: Regex =
        Regex::new(r"^(?-u:\w)+([\.-]?(?-u:\w)+)*@(?-u:\w)+([\.-]?(?-u:\w)+)*(\.(?-u:\w){2,3})+$").unwrap();
    static ref SLUG_STRIP: Regex = Regex::new(r"[^a-z0-9_\s-]").unwrap();
    static ref SLUG_SEPARATORS: Regex = Regex::new(r"[\s_-]+").unwrap();
    static ref HEX_COLOR: Regex = Regex::new(r"^#(?:[0-9a-fA-F]{3}){1,2}$").unwrap();
}

pub const MESSAGE_MIN_LEN: usize = 10;
pub const MESSAGE_MAX_LEN: usize = 5000;
pub const SKILL_LEVEL_MIN: i32 = 0;
pub const SKILL_LEVEL_MAX: i32 = 100;

/// Derives the URL slug for a project title.
///
/// ```
/// assert_eq!(folio::validation::slugify("Hello, World! 2.0"), "hello-world-20");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let stripped = SLUG_STRIP.replace_all(&lowered, "");
    let collapsed = SLUG_SEPARATORS.replace_all(&stripped, "-");

    collapsed.trim_matches('-').to_string()
}

pub fn is_email(value: &str) -> bool { EMAIL.is_match(value) }

fn chars(s: &str) -> usize { s.chars().count() }

fn required(errs: &mut ValidationErrors, field: &'static str, value: &str, message: &str) {
    if value.trim().is_empty() {
        errs.push(field, message);
    }
}

fn max_len(errs: &mut ValidationErrors, field: &'static str, value: &str, max: usize, what: &str) {
    if chars(value) > max {
        errs.push(field, format!("{} cannot exceed {} characters", what, max));
    }
}

fn email(errs: &mut ValidationErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errs.push(field, "Email is required");
    } else if !is_email(value) {
        errs.push(field, "Please provide a valid email");
    }
}

pub fn validate_message(m: &Message) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    required(&mut errs, "name", &m.name, "Name is required");
    max_len(&mut errs, "name", &m.name, 100, "Name");
    email(&mut errs, "email", &m.email);
    required(&mut errs, "subject", &m.subject, "Subject is required");
    max_len(&mut errs, "subject", &m.subject, 200, "Subject");

    match chars(&m.message) {
        0 => errs.push("message", "Message is required"),
        n if n < MESSAGE_MIN_LEN => errs.push(
            "message",
            format!("Message must be at least {} characters", MESSAGE_MIN_LEN),
        ),
        n if n > MESSAGE_MAX_LEN => errs.push(
            "message",
            format!("Message cannot exceed {} characters", MESSAGE_MAX_LEN),
        ),
        _ => (),
    }

    if let Some(reply) = &m.reply_message {
        max_len(&mut errs, "replyMessage", reply, MESSAGE_MAX_LEN, "Reply");
    }

    errs.into_result()
}

pub fn validate_project(p: &Project) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    required(&mut errs, "title", &p.title, "Project title is required");
    max_len(&mut errs, "title", &p.title, 100, "Title");
    if !p.title.trim().is_empty() && p.slug.is_empty() {
        errs.push("title", "Project title must contain at least one letter or digit");
    }
    required(&mut errs, "description", &p.description, "Project description is required");
    max_len(&mut errs, "description", &p.description, 500, "Description");
    if !HEX_COLOR.is_match(&p.color) {
        errs.push("color", "Color must be a hex value such as #3b82f6");
    }

    errs.into_result()
}

pub fn validate_portfolio(p: &Portfolio) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    required(&mut errs, "name", &p.name, "Name is required");
    email(&mut errs, "email", &p.email);

    for skill in &p.skills {
        required(&mut errs, "skills.name", &skill.name, "Skill name is required");
        if !(SKILL_LEVEL_MIN..=SKILL_LEVEL_MAX).contains(&skill.level) {
            errs.push(
                "skills.level",
                format!(
                    "Skill level must be between {} and {}",
                    SKILL_LEVEL_MIN, SKILL_LEVEL_MAX
                ),
            );
        }
    }

    for exp in &p.experience {
        required(&mut errs, "experience.company", &exp.company, "Company is required");
        required(&mut errs, "experience.position", &exp.position, "Position is required");
        if matches!(exp.end_date, Some(end) if end < exp.start_date) {
            errs.push("experience.endDate", "End date cannot be before start date");
        }
    }

    for edu in &p.education {
        required(&mut errs, "education.institution", &edu.institution, "Institution is required");
        required(&mut errs, "education.degree", &edu.degree, "Degree is required");
        if matches!(edu.end_date, Some(end) if end < edu.start_date) {
            errs.push("education.endDate", "End date cannot be before start date");
        }
    }

    errs.into_result()
}

pub fn validate_notification(n: &UserNotification) -> Result<(), ValidationErrors> {
    let mut errs = ValidationErrors::default();

    required(&mut errs, "message", &n.message, "Notification message is required");
    max_len(&mut errs, "message", &n.message, 500, "Notification message");

    errs.into_result()
}

/// Resolves the `relatedId`/`onModel` pair of a draft into a target.
pub fn resolve_target(d: &NotificationDraft) -> Result<Option<NotificationTarget>, ValidationErrors> {
    let mut errs = ValidationErrors::default();

    let target = match (&d.related_id, d.on_model.as_deref()) {
        (None, None) => None,
        (Some(id), Some(model)) => match NotificationTarget::from_parts(model, *id) {
            Some(t) => Some(t),
            None => {
                errs.push("onModel", format!("`{}` is not a valid reference model", model));
                None
            },
        },
        (Some(_), None) => {
            errs.push("onModel", "onModel is required when relatedId is set");
            None
        },
        (None, Some(_)) => {
            errs.push("relatedId", "relatedId is required when onModel is set");
            None
        },
    };

    errs.into_result().map(|_| target)
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use rstest::rstest;

    use super::*;
    use crate::entities::{MessageDraft, NotificationKind, ProjectDraft, Skill, UserId};

    #[rstest]
    #[case("Hello, World! 2.0", "hello-world-20")]
    #[case("  --Rust & WebAssembly--  ", "rust-webassembly")]
    #[case("snake_case_title", "snake-case-title")]
    #[case("Multiple   spaces - and -- dashes", "multiple-spaces-and-dashes")]
    #[case("Café Müller", "caf-mller")]
    #[case("!!!", "")]
    fn slugify_cases(#[case] title: &str, #[case] expected: &str) {
        assert_eq!(slugify(title), expected);
    }

    #[rstest]
    #[case("Hello, World! 2.0")]
    #[case("Some ___ odd --- Title")]
    #[case("")]
    fn slugify_is_stable(#[case] title: &str) {
        let once = slugify(title);
        assert_eq!(once, slugify(title));
        assert_eq!(once, slugify(&once));
    }

    fn message(body: &str, email: &str) -> Message {
        MessageDraft {
            name: "Ada".to_string(),
            email: email.to_string(),
            subject: "Hello".to_string(),
            message: body.to_string(),
        }
        .into_message(None, Utc::now())
    }

    #[test]
    fn short_message_names_message_field() {
        let errs = validate_message(&message("too short", "ada@example.com")).unwrap_err();

        assert_eq!(errs.fields(), vec!["message"]);
        assert_eq!(errs.messages(), vec!["Message must be at least 10 characters"]);
    }

    #[test]
    fn ten_character_message_is_accepted() {
        assert!(validate_message(&message("0123456789", "ada@example.com")).is_ok());
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("ada@")]
    #[case("@example.com")]
    #[case("ada@example")]
    #[case("josé@example.com")]
    #[case("ada@exämple.com")]
    #[case("ada@example.рф")]
    fn bad_emails_rejected_on_message(#[case] addr: &str) {
        let errs = validate_message(&message("long enough body", addr)).unwrap_err();
        assert_eq!(errs.fields(), vec!["email"]);
    }

    fn portfolio(email: &str, levels: &[i32]) -> Portfolio {
        Portfolio {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            skills: levels
                .iter()
                .map(|l| Skill {
                    name: "Rust".to_string(),
                    level: *l,
                    category: "language".to_string(),
                })
                .collect(),
            ..Default::default()
        }
    }

    #[rstest]
    #[case("not-an-email")]
    #[case("zoë@example.com")]
    #[case("ada@例え.jp")]
    fn bad_email_rejected_on_portfolio(#[case] addr: &str) {
        let errs = validate_portfolio(&portfolio(addr, &[])).unwrap_err();
        assert_eq!(errs.fields(), vec!["email"]);
    }

    #[test]
    fn ascii_addresses_pass() {
        assert!(is_email("ada.lovelace@example.co.uk"));
        assert!(is_email("a_b-c@mail-host.io"));
    }

    #[rstest]
    #[case(0, true)]
    #[case(100, true)]
    #[case(55, true)]
    #[case(-1, false)]
    #[case(101, false)]
    fn skill_level_bounds_are_inclusive(#[case] level: i32, #[case] ok: bool) {
        let res = validate_portfolio(&portfolio("ada@example.com", &[level]));
        assert_eq!(res.is_ok(), ok);
        if let Err(errs) = res {
            assert_eq!(errs.fields(), vec!["skills.level"]);
        }
    }

    #[test]
    fn experience_end_before_start_rejected() {
        let mut p = portfolio("ada@example.com", &[]);
        p.experience.push(crate::entities::Experience {
            company: "Analytical Engines".to_string(),
            position: "Engineer".to_string(),
            start_date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2019, 5, 1),
            current: false,
            description: String::new(),
        });

        let errs = validate_portfolio(&p).unwrap_err();
        assert_eq!(errs.fields(), vec!["experience.endDate"]);
    }

    #[test]
    fn project_requires_title_and_description() {
        let p = ProjectDraft::default().into_project(Utc::now());
        let errs = validate_project(&p).unwrap_err();

        assert_eq!(errs.fields(), vec!["title", "description"]);
    }

    #[test]
    fn punctuation_only_title_rejected() {
        let p = ProjectDraft {
            title: "???".to_string(),
            description: "d".to_string(),
            ..Default::default()
        }
        .into_project(Utc::now());

        assert_eq!(validate_project(&p).unwrap_err().fields(), vec!["title"]);
    }

    #[test]
    fn project_color_must_be_hex() {
        let p = ProjectDraft {
            title: "Colorful".to_string(),
            description: "d".to_string(),
            color: Some("blue".to_string()),
            ..Default::default()
        }
        .into_project(Utc::now());

        assert_eq!(validate_project(&p).unwrap_err().fields(), vec!["color"]);
    }

    fn notification_draft(related: Option<uuid::Uuid>, model: Option<&str>) -> NotificationDraft {
        NotificationDraft {
            recipient: UserId::generate(),
            kind: NotificationKind::Like,
            message: "someone liked your track".to_string(),
            related_id: related,
            on_model: model.map(str::to_string),
            data: None,
        }
    }

    #[test]
    fn target_resolves_known_models_only() {
        let id = uuid::Uuid::new_v4();

        assert_eq!(resolve_target(&notification_draft(None, None)).unwrap(), None);
        assert_eq!(
            resolve_target(&notification_draft(Some(id), Some("Track"))).unwrap(),
            Some(NotificationTarget::Track(crate::entities::TrackId(id)))
        );
        assert_eq!(
            resolve_target(&notification_draft(Some(id), Some("Album")))
                .unwrap_err()
                .fields(),
            vec!["onModel"]
        );
        assert_eq!(
            resolve_target(&notification_draft(None, Some("User")))
                .unwrap_err()
                .fields(),
            vec!["relatedId"]
        );
    }
}
