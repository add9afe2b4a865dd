use url::Url;

const BRAND_NAME: &str = "Enginuity";
const TAGLINE: &str = "Learn to build real software, not just pass tutorials.";

fn origin_label(app_origin: &str) -> String {
    Url::parse(app_origin)
        .ok()
        .and_then(|url| url.host_str().map(|host| host.to_string()))
        .unwrap_or_else(|| app_origin.to_string())
}

fn greeting(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Hi {name},"),
        None => "Hi there,".to_string(),
    }
}

pub fn primary_button(url: &str, label: &str) -> String {
    format!(
        r#"<a href="{url}" style="display:inline-block;padding:12px 20px;background-color:#4f46e5;color:#ffffff;text-decoration:none;border-radius:6px;font-weight:600;">{label}</a>"#
    )
}

pub fn waitlist_confirmation_email(app_origin: &str, name: Option<&str>) -> (String, String) {
    let subject = format!("You're on the {} waitlist", BRAND_NAME);
    let headline = "You're on the list!";
    let lead = format!(
        "{} Thanks for joining the <strong>{}</strong> waitlist. We'll email you as soon as your spot opens up.",
        greeting(name),
        BRAND_NAME
    );
    let body = format!(
        r#"<p style="margin:12px 0 0;color:#475569;">In the meantime, keep an eye on your inbox. Spots open in the order people signed up, and you won't lose your place.</p>
        <p style="margin:12px 0 0;color:#475569;">{}</p>"#,
        TAGLINE
    );
    let reason = "you joined the waitlist";

    let html = wrap_email(app_origin, headline, &lead, &body, reason);
    (subject, html)
}

pub fn welcome_email(app_origin: &str, name: Option<&str>) -> (String, String) {
    let subject = format!("Welcome to {}", BRAND_NAME);
    let headline = "Your account is ready";
    let lead = format!(
        "{} Your <strong>{}</strong> account has been created, and you can sign in right away.",
        greeting(name),
        BRAND_NAME
    );
    let button = primary_button(app_origin, "Start learning");
    let body = format!(
        r#"{button}<p style="margin:12px 0 0;color:#475569;">Pick a project, write real code, and get feedback as you go.</p>"#
    );
    let reason = "you created an account";

    let html = wrap_email(app_origin, headline, &lead, &body, reason);
    (subject, html)
}

pub fn wrap_email(
    app_origin: &str,
    headline: &str,
    lead: &str,
    body_html: &str,
    reason: &str,
) -> String {
    let origin = origin_label(app_origin);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <body style="background:#f1f5f9;margin:0;padding:32px 16px;font-family:Arial,Helvetica,sans-serif;">
    <div style="max-width:520px;margin:0 auto;">
      <div style="text-align:center;padding-bottom:16px;font-size:18px;font-weight:700;color:#4f46e5;">{brand}</div>
      <div style="background:#ffffff;border:1px solid #e2e8f0;border-radius:10px;padding:28px;">
        <h1 style="margin:0 0 10px;font-size:21px;color:#0f172a;">{headline}</h1>
        <p style="margin:0 0 12px;font-size:15px;color:#0f172a;line-height:1.6;">{lead}</p>
        {body_html}
      </div>
      <p style="margin:16px 0 4px;text-align:center;font-size:12px;color:#64748b;">You received this because {reason} at {origin}.</p>
      <p style="margin:0;text-align:center;font-size:12px;color:#94a3b8;">If this wasn't you, you can safely ignore this email.</p>
    </div>
  </body>
</html>
"#,
        brand = BRAND_NAME,
        origin = origin,
        headline = headline,
        lead = lead,
        body_html = body_html,
        reason = reason,
    )
}
