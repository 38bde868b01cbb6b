use crate::document::{Page, Slot, MODE_ATTRIBUTE, THEME_ATTRIBUTE};
use crate::models::Gender;

pub const THEMES: [(&str, &str); 4] = [
    ("default", "Default"),
    ("ocean", "Ocean"),
    ("forest", "Forest"),
    ("sunset", "Sunset"),
];

pub fn render_page(page: &Page) -> String {
    fill(INDEX_HTML, |key| {
        let value = match key {
            "MODE" => escape_html(page.root_attribute(MODE_ATTRIBUTE).unwrap_or_default()),
            "THEME" => escape_html(page.root_attribute(THEME_ATTRIBUTE).unwrap_or_default()),
            "MODE_CHECKED" => checked(page.mode_switch_checked).to_string(),
            "MODE_ICON" => escape_html(&page.mode_icon_class),
            "THEME_OPTIONS" => theme_options(&page.theme_select_value),
            "WEIGHT" => escape_html(&page.form.weight),
            "UNIT_OPTIONS" => unit_options(&page.form.weight_unit),
            "GENDER_RADIOS" => gender_radios(page.form.gender.as_deref()),
            "DRINKS" => escape_html(&page.form.current_drinks),
            "RESULT_DISPLAY" => page.result.display.as_css().to_string(),
            "DRINKS_TO_TARGET" => render_slot(&page.result.drinks_to_target),
            "TIME_TO_SOBER" => render_slot(&page.result.time_to_sober),
            _ => return None,
        };
        Some(value)
    })
}

pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn render_slot(slot: &Slot) -> String {
    match slot {
        Slot::Empty => String::new(),
        Slot::Text(text) => escape_html(text),
        Slot::Markup(markup) => markup.clone(),
    }
}

/// Single pass over `{{KEY}}` placeholders so substituted values are never
/// scanned again. Unknown keys are left as written.
fn fill(template: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match lookup(key) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

fn checked(on: bool) -> &'static str {
    if on { "checked" } else { "" }
}

fn selected(on: bool) -> &'static str {
    if on { " selected" } else { "" }
}

fn theme_options(current: &str) -> String {
    let mut options: String = THEMES
        .iter()
        .map(|(value, label)| {
            format!(
                "<option value=\"{value}\"{}>{label}</option>",
                selected(*value == current)
            )
        })
        .collect();
    // A stored theme outside the known list is still shown as selected.
    if !current.is_empty() && !THEMES.iter().any(|(value, _)| *value == current) {
        let current = escape_html(current);
        options.push_str(&format!("<option value=\"{current}\" selected>{current}</option>"));
    }
    options
}

fn unit_options(current: &str) -> String {
    ["kg", "lbs"]
        .iter()
        .map(|unit| format!("<option value=\"{unit}\"{}>{unit}</option>", selected(*unit == current)))
        .collect()
}

fn gender_radios(current: Option<&str>) -> String {
    Gender::ALL
        .iter()
        .map(|gender| {
            let value = gender.as_str();
            let mut label = value.to_string();
            label[..1].make_ascii_uppercase();
            format!(
                r#"<div class="form-check form-check-inline">
            <input class="form-check-input" type="radio" name="gender" id="gender-{value}" value="{value}" {}>
            <label class="form-check-label" for="gender-{value}">{label}</label>
          </div>"#,
                checked(current == Some(value))
            )
        })
        .collect()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en" data-bs-theme="{{MODE}}" data-theme="{{THEME}}">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Are You Drunk Yet?</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.3/dist/css/bootstrap.min.css" />
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/bootstrap-icons@1.11.3/font/bootstrap-icons.min.css" />
  <style>
    [data-theme="ocean"] { --accent: #1f7a8c; }
    [data-theme="forest"] { --accent: #2d6a4f; }
    [data-theme="sunset"] { --accent: #e76f51; }
    :root, [data-theme="default"] { --accent: #6f42c1; }

    body {
      min-height: 100vh;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
    }

    .btn-accent {
      background: var(--accent);
      color: white;
    }

    #result {
      gap: 8px;
      flex-direction: column;
    }
  </style>
</head>
<body>
  <main class="app card shadow p-4">
    <header class="d-flex justify-content-between align-items-center mb-3">
      <h1 class="h3 m-0">Are You Drunk Yet?</h1>
      <div class="d-flex gap-3 align-items-center">
        <form id="mode-form" method="post" action="/prefs/mode" class="form-check form-switch m-0">
          <input class="form-check-input" type="checkbox" role="switch" id="mode-switch" name="mode-switch" value="on" {{MODE_CHECKED}} onchange="this.form.submit()" />
          <label class="form-check-label" for="mode-switch"><i class="{{MODE_ICON}}"></i></label>
          <noscript><button type="submit" class="btn btn-sm btn-outline-secondary">Apply</button></noscript>
        </form>
        <form id="theme-form" method="post" action="/prefs/theme" class="m-0">
          <select id="theme" name="theme" class="form-select form-select-sm" onchange="this.form.submit()">{{THEME_OPTIONS}}</select>
          <noscript><button type="submit" class="btn btn-sm btn-outline-secondary">Apply</button></noscript>
        </form>
      </div>
    </header>

    <form id="bac-form" method="post" action="/calculate" class="d-grid gap-3">
      <div class="input-group">
        <input type="text" inputmode="decimal" class="form-control" id="weight" name="weight" placeholder="Weight" value="{{WEIGHT}}" required />
        <select id="weight-unit" name="weight-unit" class="form-select" style="max-width: 6rem">{{UNIT_OPTIONS}}</select>
      </div>
      <div id="gender-group">
        {{GENDER_RADIOS}}
      </div>
      <div>
        <label for="current-drinks" class="form-label">Drinks so far</label>
        <input type="number" min="0" step="1" class="form-control" id="current-drinks" name="current-drinks" value="{{DRINKS}}" required />
      </div>
      <button type="submit" class="btn btn-accent">Am I drunk yet?</button>
    </form>

    <section id="result" class="mt-4" style="display: {{RESULT_DISPLAY}}">
      <p id="drinks-to-target" class="m-0">{{DRINKS_TO_TARGET}}</p>
      <p id="time-to-sober" class="m-0">{{TIME_TO_SOBER}}</p>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_client::render_failure;
    use crate::document::{Display, ResultPanel};
    use crate::models::Mode;
    use crate::preferences::{apply, Preferences};

    #[test]
    fn root_attributes_follow_preferences() {
        let mut page = Page::new();
        apply(
            &mut page,
            &Preferences {
                mode: Mode::Light,
                theme: "forest".to_string(),
            },
        );
        let html = render_page(&page);
        assert!(html.contains(r#"<html lang="en" data-bs-theme="light" data-theme="forest">"#));
        assert!(html.contains(r#"<option value="forest" selected>"#));
        assert!(html.contains(r#"<i class="bi bi-moon-stars-fill">"#));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn result_is_hidden_until_filled() {
        let html = render_page(&Page::new());
        assert!(html.contains(r#"style="display: none""#));
    }

    #[test]
    fn text_slots_are_escaped() {
        let mut page = Page::new();
        page.result = ResultPanel {
            display: Display::Flex,
            drinks_to_target: Slot::Text("Error: <b>{{WEIGHT}}</b>".to_string()),
            time_to_sober: Slot::Empty,
        };
        let html = render_page(&page);
        assert!(html.contains("Error: &lt;b&gt;{{WEIGHT}}&lt;/b&gt;"));
        assert!(html.contains(r#"style="display: flex""#));
    }

    #[test]
    fn failure_panel_uses_block_display() {
        let mut page = Page::new();
        page.result = render_failure();
        assert!(render_page(&page).contains(r#"style="display: block""#));
    }

    #[test]
    fn unknown_theme_is_kept_selected() {
        let options = theme_options("neon");
        assert!(options.contains(r#"<option value="neon" selected>neon</option>"#));
    }

    #[test]
    fn fill_leaves_unknown_keys() {
        assert_eq!(fill("a {{X}} {{Y}} b", |k| (k == "X").then(|| "1".to_string())), "a 1 {{Y}} b");
    }
}
