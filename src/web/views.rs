use leptos::prelude::*;

use crate::models::{Activity, Catalog, Status};

const STYLE: &str = include_str!("../style.css");

/// Confirms before any unregister form posts, reading the exact
/// (activity, email) pair off the clicked affordance.
const CONFIRM_SCRIPT: &str = r#"
document.addEventListener("submit", (event) => {
  const form = event.target;
  if (!form.classList.contains("unregister-form")) return;
  const icon = form.querySelector(".delete-icon");
  const activity = icon.getAttribute("data-activity");
  const email = icon.getAttribute("data-email");
  if (!confirm(`Unregister ${email} from ${activity}?`)) {
    event.preventDefault();
  }
});
"#;

pub(super) fn render_page(catalog: Option<&Catalog>, status: &Status) -> String {
    let activities_html = match catalog {
        Some(catalog) => render_activity_cards(catalog),
        None => view! {
            <p>"Failed to load activities. Please try again later."</p>
        }
        .to_html(),
    };
    let form_html = render_signup_form(catalog);
    let message_html = render_status(status);
    let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

    view! {
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <title>"Mergington High School Activities"</title>
                <style>{STYLE}</style>
            </head>
            <body>
                <h1>"Mergington High School"</h1>
                <p class="timestamp">"Updated: " {now}</p>
                <section>
                    <h2>"Extracurricular Activities"</h2>
                    <div id="activities-list" inner_html=activities_html />
                </section>
                <section>
                    <h2>"Sign Up"</h2>
                    <div id="message" inner_html=message_html />
                    <div inner_html=form_html />
                </section>
                <script inner_html=CONFIRM_SCRIPT />
            </body>
        </html>
    }
    .to_html()
}

fn render_activity_cards(catalog: &Catalog) -> String {
    if catalog.is_empty() {
        return view! { <p class="empty">"No activities found."</p> }.to_html();
    }

    catalog
        .iter()
        .map(|(name, activity)| render_card(name, activity))
        .collect()
}

fn render_card(name: &str, activity: &Activity) -> String {
    let title = name.to_string();
    let description = activity.description.clone();
    let schedule = activity.schedule.clone();
    let availability = format!("{} spots left", activity.spots_left());
    let participants_html = render_participants(name, activity);

    view! {
        <div class="activity-card">
            <h4>{title}</h4>
            <p>{description}</p>
            <p><strong>"Schedule: "</strong>{schedule}</p>
            <p><strong>"Availability: "</strong>{availability}</p>
            <div class="participants-section" inner_html=participants_html />
        </div>
    }
    .to_html()
}

fn render_participants(name: &str, activity: &Activity) -> String {
    if activity.participants.is_empty() {
        return view! {
            <strong>"Participants: "</strong>
            <span class="no-participants">"No participants yet"</span>
        }
        .to_html();
    }

    let items_html: String = activity
        .participants
        .iter()
        .map(|email| render_participant_item(name, email))
        .collect();

    view! {
        <strong>"Participants:"</strong>
        <ul class="participants-list no-bullets" inner_html=items_html />
    }
    .to_html()
}

/// One roster row: the email plus its remove affordance, a tiny form that
/// carries the exact (activity, email) pair and confirms in the browser
/// before posting.
fn render_participant_item(name: &str, email: &str) -> String {
    let activity = name.to_string();
    let email_text = email.to_string();
    let email_value = email.to_string();
    let data_activity = name.to_string();
    let data_email = email.to_string();

    view! {
        <li class="participant-item">
            {email_text}
            <form class="unregister-form" method="post" action="/unregister">
                <input type="hidden" name="activity" value=activity />
                <input type="hidden" name="email" value=email_value />
                <button
                    type="submit"
                    class="delete-icon"
                    title="Unregister"
                    data-activity=data_activity
                    data-email=data_email
                >
                    "\u{1F5D1}"
                </button>
            </form>
        </li>
    }
    .to_html()
}

/// The signup form. The activity dropdown is rebuilt from scratch on every
/// render, one placeholder plus one option per catalog entry, so repeated
/// loads never accumulate duplicates.
fn render_signup_form(catalog: Option<&Catalog>) -> String {
    let options_html: String = catalog
        .map(|catalog| {
            catalog
                .keys()
                .map(|name| {
                    let value = name.clone();
                    let label = name.clone();
                    view! { <option value=value>{label}</option> }.to_html()
                })
                .collect()
        })
        .unwrap_or_default();

    let select_html = format!(
        "{}{}",
        view! { <option value="">"-- Select an activity --"</option> }.to_html(),
        options_html,
    );

    view! {
        <form id="signup-form" method="post" action="/signup">
            <label for="email">"Student Email"</label>
            <input
                type="email"
                id="email"
                name="email"
                required=true
                placeholder="your-email@mergington.edu"
            />
            <label for="activity">"Activity"</label>
            <select id="activity" name="activity" required=true inner_html=select_html />
            <button type="submit">"Sign Up"</button>
        </form>
    }
    .to_html()
}

fn render_status(status: &Status) -> String {
    let class = if status.visible {
        status.kind.css_class().to_string()
    } else {
        format!("{} hidden", status.kind.css_class())
    };
    let text = status.text.clone();

    view! { <p class=class>{text}</p> }.to_html()
}
