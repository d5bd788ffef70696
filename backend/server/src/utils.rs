use contact::ContactForm;

use crate::{config::Config, mailer::Notification};

pub fn build_notification(config: &Config, form: &ContactForm) -> Notification {
    Notification {
        from: config.smtp_user.clone(),
        to: config.recipient.clone(),
        subject: format!("Portfolio Contact: {}", form.subject),
        html: format_body(form),
    }
}

pub fn format_body(form: &ContactForm) -> String {
    format!(
        "<h3>New Contact Form Submission</h3>\n\
         <p><strong>Name:</strong> {}</p>\n\
         <p><strong>Email:</strong> {}</p>\n\
         <p><strong>Subject:</strong> {}</p>\n\
         <p><strong>Message:</strong></p>\n\
         <p>{}</p>\n\
         <hr>\n\
         <p><em>Sent from your portfolio website</em></p>\n",
        escape_html(&form.name),
        escape_html(&form.email),
        escape_html(&form.subject),
        escape_html(&form.message),
    )
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html("<script>alert('x')</script>"),
            "&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
    }

    #[test]
    fn test_body_has_every_field() {
        let form = ContactForm::new("Jo", "jo@example.com", "Hiring", "Let's <talk>");
        let body = format_body(&form);

        assert!(body.contains("<p><strong>Name:</strong> Jo</p>"));
        assert!(body.contains("<p><strong>Email:</strong> jo@example.com</p>"));
        assert!(body.contains("<p><strong>Subject:</strong> Hiring</p>"));
        assert!(body.contains("<p>Let&#39;s &lt;talk&gt;</p>"));
        assert!(body.contains("Sent from your portfolio website"));
    }
}
