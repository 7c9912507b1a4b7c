//! Schedule fragment rendering.
//!
//! Pure transformation from an ordered show list to an HTML fragment.
//! All user-supplied text (title, description, thumbnail URL) is escaped,
//! so field content can never produce live markup in the host page.

use tvguide_db::shows::Show;

use crate::clock::{format_12h, parse_time_of_day};

/// Placeholder rendered when a stored time value fails to parse.
const TIME_PLACEHOLDER: &str = "time unavailable";

/// Rendering options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Heading placed above the list.
    pub heading: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            heading: String::from("Today's Shows"),
        }
    }
}

/// Escapes text for embedding in HTML content or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Formats a show's time range as 12-hour clock text.
///
/// - Both times parse: `7:00 PM – 8:00 PM`.
/// - End time absent: the start time alone.
/// - Any present value fails to parse: the `time unavailable` placeholder
///   for the whole range. Never panics; malformed data is isolated to the
///   affected entry.
#[must_use]
pub fn format_time_range(start_time: Option<&str>, end_time: Option<&str>) -> String {
    let Some(start_raw) = start_time else {
        return String::from(TIME_PLACEHOLDER);
    };
    let Ok(start) = parse_time_of_day(start_raw) else {
        return String::from(TIME_PLACEHOLDER);
    };

    match end_time {
        None => format_12h(start),
        Some(end_raw) => match parse_time_of_day(end_raw) {
            Ok(end) => format!("{} \u{2013} {}", format_12h(start), format_12h(end)),
            Err(_) => String::from(TIME_PLACEHOLDER),
        },
    }
}

/// Renders the ordered show list as an HTML fragment.
///
/// An empty list produces exactly the no-shows message with no list markup.
/// Shows are rendered in the order given; this function does not sort.
#[allow(clippy::module_name_repetitions)]
#[must_use]
pub fn render_schedule(shows: &[Show], opts: &RenderOptions) -> String {
    if shows.is_empty() {
        return String::from("<p class=\"tv-guide-empty\">No shows scheduled for today.</p>\n");
    }

    let mut out = String::from("<div class=\"tv-guide-schedule\">\n");
    out.push_str(&format!("<h2>{}</h2>\n", escape_html(&opts.heading)));
    out.push_str("<ul>\n");

    for show in shows {
        out.push_str("<li>\n");
        if let Some(thumbnail) = &show.thumbnail {
            out.push_str(&format!(
                "<img class=\"tv-guide-thumbnail\" src=\"{}\" alt=\"\">\n",
                escape_html(thumbnail)
            ));
        }
        out.push_str(&format!("<strong>{}</strong><br>\n", escape_html(&show.title)));
        out.push_str(&format!(
            "Time: {}<br>\n",
            format_time_range(show.start_time.as_deref(), show.end_time.as_deref())
        ));
        out.push_str(&escape_html(&show.description));
        out.push_str("\n</li>\n");
    }

    out.push_str("</ul>\n</div>\n");
    out
}

/// Renders the store-failure fragment.
///
/// Embedding hosts show this when the schedule query errors; it is distinct
/// from the empty-schedule message so the two outcomes stay tellable apart.
#[allow(clippy::module_name_repetitions)]
#[must_use]
pub fn render_unavailable() -> String {
    String::from("<p class=\"tv-guide-error\">Schedule temporarily unavailable.</p>\n")
}
