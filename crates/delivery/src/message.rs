//! The daily lesson email: subject line and HTML body.

use chrono::NaiveDate;

/// Reading time shown in the email header.
pub const DAILY_LESSON_DURATION: &str = "5 min";

/// A fully rendered email ready for a [`crate::LessonMailer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

/// One generated daily lesson, before rendering.
#[derive(Debug, Clone, Copy)]
pub struct DailyLessonEmail<'a> {
    pub topic: &'a str,
    /// Plain text from the model. Line breaks are kept.
    pub content: &'a str,
    pub sent_on: NaiveDate,
}

impl DailyLessonEmail<'_> {
    pub fn title(&self) -> String {
        format!("Learn: {}", self.topic)
    }

    pub fn subject(&self) -> String {
        format!("\u{1F4DA} Daily Micro-Lesson: {}", self.title())
    }

    /// HTML body. Model text is escaped before line breaks become `<br>`.
    pub fn render_html(&self) -> String {
        let content = escape_html(self.content).replace('\n', "<br>");
        format!(
            r#"<html>
<body style="font-family: Arial, sans-serif; max-width: 600px; margin: auto; padding: 20px;">
    <div style="background: #f0f7ff; padding: 15px; border-radius: 8px; margin-bottom: 20px;">
        <h2 style="color: #2c5282; margin: 0;">{title}</h2>
        <p><strong>Duration:</strong> {duration}</p>
    </div>
    <div style="line-height: 1.6; font-size: 16px;">
        <p>{content}</p>
    </div>
    <hr style="margin: 30px 0;">
    <p style="font-size: 14px; color: #666; text-align: center;">
        Sent by Your AI Learning Assistant &bull; {date}
    </p>
</body>
</html>"#,
            title = escape_html(&self.title()),
            duration = DAILY_LESSON_DURATION,
            date = self.sent_on.format("%B %d, %Y"),
        )
    }

    pub fn to_outgoing(&self, to: &str) -> OutgoingEmail {
        OutgoingEmail {
            to: to.to_string(),
            subject: self.subject(),
            html_body: self.render_html(),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
