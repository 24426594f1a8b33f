//! Server-rendered workout form.
//!
//! The page is plain HTML built with `format!`. Every value that can reach
//! the page from the log or the coach is escaped with `html_escape`.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::domain::ports::{DayPlan, PlannedExercise};
use crate::domain::{Advice, Difficulty, RoutineDay};

/// Page title.
pub const PAGE_TITLE: &str = "Private Gym Tracker";

/// Outcome shown inside the panel of the exercise just submitted.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// The row was appended.
    Saved {
        /// Exercise the notice belongs to.
        exercise_name: String,
        /// Advice stored in the row.
        advice: Advice,
    },
    /// The submission failed.
    Failed {
        /// Exercise the notice belongs to, when known.
        exercise_name: Option<String>,
        /// Client-safe failure message.
        message: String,
    },
}

impl Notice {
    fn exercise_name(&self) -> Option<&str> {
        match self {
            Self::Saved { exercise_name, .. } => Some(exercise_name),
            Self::Failed { exercise_name, .. } => exercise_name.as_deref(),
        }
    }
}

/// Render the full page for a day plan.
#[must_use]
pub fn page(plan: &DayPlan, notice: Option<&Notice>) -> String {
    let mut body = format!("<h1>\u{1f3cb}\u{fe0f} {PAGE_TITLE}</h1>\n");
    body.push_str(&day_selector(plan.day));
    body.push_str("<hr>\n");

    let orphan_notice = notice.filter(|notice| {
        notice.exercise_name().is_none_or(|name| {
            !plan
                .exercises
                .iter()
                .any(|planned| planned.spec.name == name)
        })
    });
    if let Some(notice) = orphan_notice {
        body.push_str(&notice_html(notice));
    }

    for planned in &plan.exercises {
        let panel_notice =
            notice.filter(|notice| notice.exercise_name() == Some(planned.spec.name));
        body.push_str(&exercise_panel(plan.day, planned, panel_notice));
    }

    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{PAGE_TITLE}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>\n"
    )
}

const STYLE: &str = "body{font-family:sans-serif;max-width:40rem;margin:auto;padding:1rem}\
details{border:1px solid #ccc;border-radius:.4rem;margin:.5rem 0;padding:.5rem}\
summary{font-weight:bold;cursor:pointer}\
.columns{display:flex;gap:1rem}.columns label{flex:1}\
input,select{width:100%}\
.success{background:#e6f4ea;padding:.5rem}.info{background:#e8f0fe;padding:.5rem}\
.error{background:#fce8e6;padding:.5rem}";

fn day_selector(selected: RoutineDay) -> String {
    let options: String = RoutineDay::ALL
        .into_iter()
        .map(|day| {
            let marker = if day == selected { " selected" } else { "" };
            format!("<option value=\"{name}\"{marker}>{name}</option>", name = day.name())
        })
        .collect();
    format!(
        "<form method=\"get\" action=\"/\">\n<label>Select Routine \
         <select name=\"day\" onchange=\"this.form.submit()\">{options}</select></label>\n\
         <noscript><button type=\"submit\">Show</button></noscript>\n</form>\n"
    )
}

fn exercise_panel(day: RoutineDay, planned: &PlannedExercise, notice: Option<&Notice>) -> String {
    let spec = planned.spec;
    let name_text = encode_text(spec.name);
    let name_attr = encode_double_quoted_attribute(spec.name);
    let difficulty_options: String = Difficulty::ALL
        .into_iter()
        .map(|difficulty| {
            let label = encode_double_quoted_attribute(difficulty.label());
            format!("<option value=\"{label}\">{}</option>", encode_text(difficulty.label()))
        })
        .collect();
    let open = if notice.is_some() { " open" } else { "" };
    let feedback = notice.map(notice_html).unwrap_or_default();

    format!(
        "<details{open}>\n<summary>{name_text} (Target: {target} lbs)</summary>\n\
         <p>Sets: {sets} | Reps: {reps}</p>\n\
         <form method=\"post\" action=\"/log\">\n\
         <input type=\"hidden\" name=\"day\" value=\"{day}\">\n\
         <input type=\"hidden\" name=\"exercise\" value=\"{name_attr}\">\n\
         <div class=\"columns\">\n\
         <label>Weight Used <input type=\"number\" name=\"weight\" min=\"0\" step=\"any\" value=\"{target}\"></label>\n\
         <label>Difficulty <select name=\"difficulty\">{difficulty_options}</select></label>\n\
         </div>\n\
         <button type=\"submit\">Log Workout</button>\n\
         </form>\n{feedback}</details>\n",
        target = planned.suggested_weight,
        sets = spec.target_sets,
        reps = encode_text(spec.target_reps),
        day = day.name(),
    )
}

fn notice_html(notice: &Notice) -> String {
    match notice {
        Notice::Saved { advice, .. } => format!(
            "<p class=\"success\">Saved! Coach says: {}</p>\n<p class=\"info\">Next time: {} lbs</p>\n",
            encode_text(&advice.message),
            advice.new_weight,
        ),
        Notice::Failed { message, .. } => format!(
            "<p class=\"error\">Could not save workout: {}</p>\n",
            encode_text(message)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Weight;

    fn pounds(value: f64) -> Weight {
        Weight::new(value).expect("valid weight")
    }

    #[test]
    fn renders_every_exercise_of_the_day() {
        let html = page(&DayPlan::with_defaults(RoutineDay::Push), None);

        assert!(html.contains("Private Gym Tracker"));
        assert!(html.contains("<option value=\"Push\" selected>Push</option>"));
        assert!(html.contains("Machine Chest Press (Target: 45 lbs)"));
        assert!(html.contains("Machine Lateral Raise (Target: 15 lbs)"));
        assert!(html.contains("Sets: 4 | Reps: 12-15"));
        assert!(html.contains("value=\"Too Hard/Fail\""));
        assert_eq!(html.matches("Log Workout").count(), 6);
        assert!(!html.contains("<details open>"));
    }

    #[test]
    fn prefills_weight_input_with_suggestion() {
        let mut plan = DayPlan::with_defaults(RoutineDay::Cardio);
        if let Some(first) = plan.exercises.first_mut() {
            first.suggested_weight = pounds(2.5);
        }
        let html = page(&plan, None);
        assert!(html.contains("Incline Walk (Target: 2.5 lbs)"));
        assert!(html.contains("name=\"weight\" min=\"0\" step=\"any\" value=\"2.5\""));
    }

    #[test]
    fn saved_notice_opens_its_panel() {
        let notice = Notice::Saved {
            exercise_name: "Face Pulls".to_owned(),
            advice: Advice {
                new_weight: pounds(35.0),
                message: "Nice & steady".to_owned(),
            },
        };
        let html = page(&DayPlan::with_defaults(RoutineDay::Pull), Some(&notice));

        assert!(html.contains("Saved! Coach says: Nice &amp; steady"));
        assert!(html.contains("Next time: 35 lbs"));
        assert_eq!(html.matches("<details open>").count(), 1);
    }

    #[test]
    fn coach_message_is_escaped() {
        let notice = Notice::Saved {
            exercise_name: "Leg Press".to_owned(),
            advice: Advice {
                new_weight: pounds(190.0),
                message: "<script>alert('x')</script>".to_owned(),
            },
        };
        let html = page(&DayPlan::with_defaults(RoutineDay::Legs), Some(&notice));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn notice_for_other_day_is_shown_above_panels() {
        let notice = Notice::Failed {
            exercise_name: None,
            message: "Internal server error".to_owned(),
        };
        let html = page(&DayPlan::with_defaults(RoutineDay::Push), Some(&notice));
        assert!(html.contains("Could not save workout: Internal server error"));
        assert!(!html.contains("<details open>"));
    }
}
