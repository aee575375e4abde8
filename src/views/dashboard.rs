use bigdecimal::BigDecimal;

use crate::client::QueryState;
use crate::locale::Language;
use crate::models::{Me, Summary};

/// Formats an amount as whole rupiah with the language's digit grouping,
/// e.g. `Rp 1.250.000` (id) or `Rp 1,250,000` (en).
pub fn format_rupiah(amount: &BigDecimal, lang: Language) -> String {
    let text = amount.round(0).to_string();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.as_str()),
    };
    let whole = digits.split('.').next().unwrap_or("0");

    let separator = lang.thousands_separator();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }

    if negative {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub title: String,
    pub greeting: String,
    /// Label/value pairs in display order.
    pub rows: Vec<(String, String)>,
    pub logout_label: String,
}

impl DashboardView {
    pub fn build(lang: Language, me: &QueryState<Me>, summary: Option<&Summary>) -> Self {
        let strings = lang.strings();

        let greeting = match (&me.data, me.is_loading, &me.error) {
            (Some(user), _, _) => format!("{}, {}", strings.greeting, user.fullname),
            (None, true, _) => strings.loading.to_string(),
            (None, false, Some(_)) => strings.load_error.to_string(),
            (None, false, None) => format!("{}, {}", strings.greeting, strings.guest),
        };

        let rows = match summary {
            Some(summary) => vec![
                (
                    strings.period.to_string(),
                    format!("{} - {} ({} {})", summary.from, summary.to, summary.days, strings.days),
                ),
                (strings.total_in.to_string(), format_rupiah(&summary.total_in, lang)),
                (strings.total_out.to_string(), format_rupiah(&summary.total_out, lang)),
                (strings.balance.to_string(), format_rupiah(&summary.balance, lang)),
            ],
            None => vec![(strings.no_summary.to_string(), String::new())],
        };

        Self {
            title: strings.app_title.to_string(),
            greeting,
            rows,
            logout_label: strings.logout.to_string(),
        }
    }

    pub fn render(&self) -> String {
        let width = self.rows.iter().map(|(label, _)| label.chars().count()).max().unwrap_or(0);
        let mut out = format!("{}\n{}\n", self.title, self.greeting);
        for (label, value) in &self.rows {
            if value.is_empty() {
                out.push_str(label);
            } else {
                out.push_str(&format!("{:<width$}  {}", label, value, width = width));
            }
            out.push('\n');
        }
        out.push_str(&format!("[{}]", self.logout_label));
        out
    }
}
