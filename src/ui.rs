use crate::classify::{format_tons, Classification, Tier};
use crate::format::to_fixed;
use crate::state::PageState;
use std::fmt::Write;

pub fn render_home() -> String {
    PAGE_HTML
        .replace("{{TITLE}}", "CarbonCraft")
        .replace("{{BODY}}", HOME_BODY)
}

pub fn render_calculator(page: &PageState) -> String {
    let message = page
        .message
        .as_deref()
        .map(|message| format!(r#"<p class="status" id="message">{}</p>"#, escape_html(message)))
        .unwrap_or_default();

    let results = match (page.result, page.classification()) {
        (Some(result), Some(classification)) => render_results(
            result.scope1,
            result.scope2,
            page.calculated_at.as_deref(),
            &classification,
        ),
        _ => String::new(),
    };

    // User-entered values go in last so they are never scanned for placeholders.
    let body = CALCULATOR_BODY
        .replace("{{MESSAGE}}", &message)
        .replace("{{RESULTS}}", &results)
        .replace("{{DIESEL}}", &escape_html(&page.inputs.diesel))
        .replace("{{GASOLINE}}", &escape_html(&page.inputs.gasoline))
        .replace("{{NATURAL_GAS}}", &escape_html(&page.inputs.natural_gas))
        .replace("{{KWH}}", &escape_html(&page.inputs.kwh));

    PAGE_HTML
        .replace("{{TITLE}}", "CarbonCraft Calculator")
        .replace("{{BODY}}", &body)
}

fn render_results(
    scope1: f64,
    scope2: f64,
    calculated_at: Option<&str>,
    classification: &Classification,
) -> String {
    let mut rows = String::new();
    for tier in Tier::ALL {
        let class = if tier == classification.tier {
            r#" class="current""#
        } else {
            ""
        };
        let max = tier
            .max_tons()
            .map(|max| max.to_string())
            .unwrap_or_else(|| "&gt;175".to_string());
        let apr = tier
            .apr()
            .map(|apr| format!("{apr:.1}"))
            .unwrap_or_else(|| "N/A".to_string());
        // Writing to a String cannot fail.
        let _ = write!(
            rows,
            "<tr{class}><td>{}</td><td>{max}</td><td>{apr}</td></tr>",
            tier.label()
        );
    }

    let stamp = calculated_at
        .map(|at| format!(r#"<p class="hint">Calculated {}</p>"#, escape_html(at)))
        .unwrap_or_default();

    RESULTS_HTML
        .replace("{{SCOPE1}}", &format_tons(scope1))
        .replace("{{SCOPE2}}", &format_tons(scope2))
        .replace("{{TOTAL}}", &to_fixed(classification.total_tons, 2))
        .replace("{{BADGE_CLASS}}", classification.impact_level.badge_class())
        .replace("{{IMPACT}}", classification.impact)
        .replace("{{TIER}}", classification.tier.label())
        .replace("{{TIER_ROWS}}", &rows)
        .replace("{{RECOMMENDATION}}", &escape_html(&classification.recommendation))
        .replace("{{STAMP}}", &stamp)
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // Keeps user text from forming template placeholders.
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const HOME_BODY: &str = r#"<main class="app">
    <header>
      <h1>Welcome to CarbonCraft 🌿</h1>
      <p class="subtitle">Your one-stop platform to easily track and reduce your carbon footprint. Enter your energy usage and get personalized insights!</p>
    </header>
    <a class="button btn-primary" href="/calculate">Start Calculating 🚀</a>
  </main>"#;

const CALCULATOR_BODY: &str = r#"<main class="app">
    <header>
      <h1>CarbonCraft 🌿</h1>
      <a class="button btn-secondary" href="/">🏠 Home</a>
    </header>

    <form class="panel" method="post" action="/calculate">
      <label>Gallons of Diesel Used
        <input type="number" step="any" min="0" name="diesel" value="{{DIESEL}}" placeholder="Enter diesel usage" />
      </label>
      <label>Gallons of Gasoline Used
        <input type="number" step="any" min="0" name="gasoline" value="{{GASOLINE}}" placeholder="Enter gasoline usage" />
      </label>
      <label>Natural Gas Used (m³)
        <input type="number" step="any" min="0" name="natural_gas" value="{{NATURAL_GAS}}" placeholder="Enter natural gas usage" />
      </label>
      <label>Electricity Used (kWh)
        <input type="number" step="any" min="0" name="kwh" value="{{KWH}}" placeholder="Enter kWh used" />
      </label>
      <button class="btn-primary" type="submit">Calculate Emissions 🚀</button>
      {{MESSAGE}}
    </form>
    {{RESULTS}}
  </main>"#;

const RESULTS_HTML: &str = r#"<section class="results" id="results">
      <h2>Your Results 🌎</h2>
      <div class="stat"><span class="label">Scope 1 Emissions</span><span class="value" id="scope1">{{SCOPE1}} tons CO₂e</span></div>
      <div class="stat"><span class="label">Scope 2 Emissions</span><span class="value" id="scope2">{{SCOPE2}} tons CO₂e</span></div>
      <div class="stat"><span class="label">Total</span><span class="value" id="total">{{TOTAL}} tons CO₂e</span></div>
      <p class="badge {{BADGE_CLASS}}" id="impact">{{IMPACT}}</p>

      <h2>Your Tier &amp; APR 📊</h2>
      <table data-tier="{{TIER}}">
        <thead><tr><th>Tier</th><th>Max Emissions (tons)</th><th>Interest Rate (APR%)</th></tr></thead>
        <tbody>{{TIER_ROWS}}</tbody>
      </table>

      <div class="recommendation">
        <h3>🌱 Recommendation</h3>
        <p id="recommendation">{{RECOMMENDATION}}</p>
      </div>
      {{STAMP}}
    </section>"#;

const PAGE_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}}</title>
  <style>
    :root {
      --bg-1: #f0fdf4;
      --bg-2: #eff6ff;
      --ink: #1f2937;
      --accent: #16a34a;
      --accent-2: #2563eb;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(22, 101, 52, 0.15);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: linear-gradient(135deg, var(--bg-1), var(--bg-2));
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 10px;
    }

    h1 {
      margin: 0;
      color: #14532d;
      font-size: clamp(2rem, 4vw, 2.8rem);
    }

    .subtitle,
    .hint {
      margin: 0;
      color: #4b5563;
    }

    .panel {
      display: grid;
      gap: 16px;
    }

    label {
      display: grid;
      gap: 6px;
      font-weight: 600;
    }

    input {
      padding: 10px;
      border: 1px solid #d1d5db;
      border-radius: 8px;
      font-size: 1rem;
    }

    .button,
    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 14px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      text-align: center;
      text-decoration: none;
      color: white;
      justify-self: start;
    }

    .btn-primary {
      background: var(--accent-2);
    }

    .btn-secondary {
      background: var(--accent);
    }

    .status {
      margin: 0;
      font-size: 0.95rem;
    }

    .results {
      display: grid;
      gap: 12px;
    }

    .stat {
      display: flex;
      justify-content: space-between;
    }

    .stat .value {
      font-weight: 600;
    }

    .badge {
      justify-self: center;
      padding: 8px 16px;
      border-radius: 999px;
      color: white;
      font-weight: 600;
    }

    .badge-low {
      background: #22c55e;
    }

    .badge-moderate {
      background: #eab308;
    }

    .badge-high {
      background: #ef4444;
      animation: pulse 1.5s ease-in-out infinite;
    }

    table {
      width: 100%;
      text-align: center;
      border-collapse: collapse;
    }

    tr.current {
      background: #dcfce7;
      font-weight: 600;
    }

    .recommendation {
      padding: 16px;
      background: #f0fdf4;
      border-left: 4px solid #22c55e;
      border-radius: 8px;
    }

    @keyframes pulse {
      50% {
        opacity: 0.6;
      }
    }
  </style>
</head>
<body>
  {{BODY}}
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmissionsResult, UsageForm};
    use crate::state::Outcome;

    #[test]
    fn empty_page_has_no_results() {
        let html = render_calculator(&PageState::default());
        assert!(html.contains(r#"name="diesel""#));
        assert!(!html.contains(r#"id="results""#));
        assert!(!html.contains(r#"id="message""#));
    }

    #[test]
    fn results_highlight_current_tier() {
        let page = PageState::default().with_outcome(Outcome::Calculated {
            inputs: UsageForm::default(),
            result: EmissionsResult {
                scope1: 40_000.0,
                scope2: 40_000.0,
            },
            calculated_at: "2026-01-05 10:00:00".to_string(),
        });
        let html = render_calculator(&page);
        assert!(html.contains(r#"<tr class="current"><td>B</td><td>100</td><td>6.0</td></tr>"#));
        assert!(html.contains("40.00 tons CO₂e"));
        assert!(html.contains("Moderate Impact"));
        assert!(html.contains("badge-moderate"));
        assert!(html.contains("Reduce emissions by 30.00 tons to reach Tier A!"));
        assert!(html.contains("Calculated 2026-01-05 10:00:00"));
    }

    #[test]
    fn form_values_are_escaped() {
        let mut page = PageState::default();
        page.inputs.diesel = r#""><script>"#.to_string();
        let html = render_calculator(&page);
        assert!(html.contains("&quot;&gt;&lt;script&gt;"));
        assert!(!html.contains(r#""><script>"#));
    }

    #[test]
    fn placeholder_text_in_inputs_is_not_substituted() {
        let mut page = PageState::default();
        page.inputs.diesel = "{{KWH}}".to_string();
        page.inputs.kwh = "5".to_string();
        let html = render_calculator(&page);
        assert!(html.contains(r#"name="diesel" value="&#123;&#123;KWH&#125;&#125;""#));
        assert!(html.contains(r#"name="kwh" value="5""#));
        assert!(!html.contains(r#"name="diesel" value="5""#));
    }

    #[test]
    fn home_links_to_calculator() {
        assert!(render_home().contains(r#"href="/calculate""#));
    }
}
