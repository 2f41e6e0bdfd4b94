use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, Color, ContentArrangement, Table};
use std::fmt::Write as _;

use super::{ComparisonView, SchoolRow, SearchStatus, SearchView};
use crate::affordability::{SchoolReport, SeverityColor};
use crate::compare::MAX_COMPARE;
use crate::core::School;
use crate::formatting::{
    format_count, format_money, format_percent, format_signed_money, formatter_for,
    FormattingConfig, OutputFormatter, NOT_AVAILABLE,
};

fn table_color(color: SeverityColor) -> Color {
    match color {
        SeverityColor::Neutral => Color::Grey,
        SeverityColor::Low => Color::Green,
        SeverityColor::Medium => Color::Yellow,
        SeverityColor::High => Color::DarkYellow,
        SeverityColor::Critical => Color::Red,
    }
}

fn range_text(range: Option<(f64, f64)>) -> String {
    match range {
        Some((low, high)) => format!("{}-{}", low.round() as i64, high.round() as i64),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Renders view models as human-readable terminal text.
pub struct TerminalRenderer {
    formatter: Box<dyn OutputFormatter>,
    styled: bool,
}

impl TerminalRenderer {
    pub fn new(config: FormattingConfig) -> Self {
        Self {
            formatter: formatter_for(config),
            styled: config.color.should_use_color(),
        }
    }

    pub fn plain() -> Self {
        Self::new(FormattingConfig::plain())
    }

    pub fn formatter(&self) -> &dyn OutputFormatter {
        self.formatter.as_ref()
    }

    fn table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.styled {
            table.enforce_styling();
        } else {
            table.force_no_tty();
        }
        table
    }

    fn severity_cell(&self, text: String, color: SeverityColor) -> Cell {
        Cell::new(text).fg(table_color(color))
    }

    fn money_cell(amount: Option<f64>) -> Cell {
        Cell::new(format_signed_money(amount)).set_alignment(CellAlignment::Right)
    }

    pub fn search(&self, view: &SearchView) -> String {
        let bracket = view.criteria.bracket;
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            self.formatter
                .header(&format!("Schools for family income {}", bracket.label()))
        );

        match view.status {
            SearchStatus::Failed => {
                let message = view.error.as_deref().unwrap_or("unknown error");
                let _ = writeln!(
                    out,
                    "{}",
                    self.formatter.error(&format!(
                        "Search failed: {}. Your filters were kept; try again shortly.",
                        message
                    ))
                );
                return out;
            }
            SearchStatus::Empty => {
                let _ = writeln!(
                    out,
                    "{}",
                    self.formatter.warning(
                        "No schools match these filters. Try raising the maximum gap or removing filters."
                    )
                );
                return out;
            }
            SearchStatus::Idle | SearchStatus::Loading | SearchStatus::Loaded => {}
        }

        let _ = writeln!(
            out,
            "{}",
            self.formatter
                .dim(&format!("{} schools, lowest gap first", view.results.len()))
        );

        let mut table = self.table();
        table.set_header(vec![
            "#", "ID", "School", "Location", "Type", "Gap / yr", "Severity", "True cost / yr",
            "Travel", "",
        ]);
        for (index, row) in view.results.iter().enumerate() {
            table.add_row(self.search_row(index + 1, row));
        }
        let _ = writeln!(out, "{}", table);
        let _ = write!(
            out,
            "{}",
            self.formatter.dim(
                "Gap = cost after grants and scholarships, before loans. Negative gaps (+) mean money back."
            )
        );
        out
    }

    fn search_row(&self, position: usize, row: &SchoolRow) -> Vec<Cell> {
        let mut badges = Vec::new();
        if row.no_loan_policy {
            badges.push("No-loan");
        }
        if row.in_compare {
            badges.push("Comparing");
        }
        vec![
            Cell::new(position),
            Cell::new(&row.id),
            Cell::new(&row.name),
            Cell::new(&row.location),
            Cell::new(row.control),
            self.severity_cell(format_signed_money(row.cost.gap()), row.cost.color)
                .set_alignment(CellAlignment::Right),
            self.severity_cell(row.cost.severity_label.to_string(), row.cost.color),
            Self::money_cell(Some(row.cost.true_annual_cost())),
            Cell::new(row.travel.map(|t| t.label()).unwrap_or(NOT_AVAILABLE)),
            Cell::new(badges.join(", ")),
        ]
    }

    pub fn report(&self, report: &SchoolReport) -> String {
        let f = self.formatter.as_ref();
        let cost = &report.cost;
        let mut out = String::new();

        let _ = writeln!(out, "{}", f.header(&report.name));
        let _ = writeln!(
            out,
            "{} | {} | {} students{}",
            report.location,
            report.control,
            format_count(report.enrollment),
            if report.no_loan_policy {
                format!(" | {}", f.success("No-loan policy"))
            } else {
                String::new()
            }
        );
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "{}",
            f.bold(&format!("Your cost at {}", cost.bracket.label()))
        );
        let _ = writeln!(
            out,
            "  Cost of attendance            {}",
            format_money(report.cost_of_attendance)
        );
        if let Some(aid) = report.estimated_grant_aid {
            let _ = writeln!(
                out,
                "  Estimated grant aid           {}",
                f.success(&format!("- {}", format_money(Some(aid))))
            );
        }
        let _ = writeln!(
            out,
            "  Your gap (what you pay)       {}  {}",
            f.severity(&format_signed_money(cost.gap()), cost.color),
            f.severity(cost.severity_label, cost.color)
        );
        let _ = writeln!(
            out,
            "  Travel ({})                 {}",
            report.travel.mode.map(|m| m.label()).unwrap_or(NOT_AVAILABLE),
            format_money(report.travel.annual_cost)
        );
        let _ = writeln!(
            out,
            "  True annual cost              {}",
            f.bold(&format_signed_money(Some(cost.true_annual_cost())))
        );
        if let Some(note) = &report.money_back_note {
            let _ = writeln!(out, "  {}", f.success(note));
        }
        let _ = writeln!(
            out,
            "  {}",
            f.dim("The gap does not include loans. Loans must be paid back, so they are not counted as aid.")
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", f.bold("4-year projection"));
        let _ = writeln!(
            out,
            "  Gap {}  |  Travel {}  |  True cost {}",
            format_signed_money(cost.four_year_gap()),
            format_money(Some(cost.cost.four_year_travel)),
            format_signed_money(Some(cost.four_year_true_cost()))
        );
        let _ = writeln!(out);

        if !cost.narrative.is_empty() {
            let _ = writeln!(out, "{}", f.bold("What this means for your family"));
            let _ = writeln!(out, "  {}", cost.narrative);
            let _ = writeln!(out);
        }

        let _ = writeln!(out, "{}", f.bold("Gap by family income"));
        let mut table = self.table();
        table.set_header(vec!["Family income", "Annual gap", "4-year gap", "Severity", ""]);
        for row in &report.gap_table {
            let color = row.severity.color();
            table.add_row(vec![
                Cell::new(row.label),
                self.severity_cell(format_signed_money(row.gap), color)
                    .set_alignment(CellAlignment::Right),
                Self::money_cell(row.four_year_gap),
                self.severity_cell(row.severity.label().to_string(), color),
                Cell::new(if row.selected { "<- you" } else { "" }),
            ]);
        }
        let _ = writeln!(out, "{}", table);
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", f.bold("Admissions"));
        if report.admissions.is_reported() {
            let _ = writeln!(
                out,
                "  Admission rate {}  |  SAT {}  |  ACT {}",
                format_percent(report.admissions.admission_rate),
                range_text(report.admissions.sat_range),
                range_text(report.admissions.act_range)
            );
        } else {
            let _ = writeln!(out, "  {}", f.dim("Admissions data not reported."));
        }
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", f.bold("Outcomes"));
        let outcomes = &report.outcomes;
        let _ = writeln!(
            out,
            "  4-year grad rate {}  |  Pell grad rate {}  |  Median debt {}  |  Earnings after 10 yrs {}",
            format_percent(outcomes.grad_rate_4yr),
            format_percent(outcomes.grad_rate_pell),
            format_money(outcomes.median_debt),
            format_money(outcomes.median_earnings_10yr)
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "{}", f.bold("Plan for your gap"));
        let _ = writeln!(out, "  {}", report.action_plan);

        let links = [
            ("Net price calculator", &report.links.net_price_calculator),
            ("Website", &report.links.website),
        ];
        let shown: Vec<_> = links
            .iter()
            .filter_map(|(label, url)| url.as_ref().map(|url| format!("  {}: {}", label, url)))
            .collect();
        if !shown.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", f.bold("Links"));
            for line in shown {
                let _ = writeln!(out, "{}", line);
            }
        }

        out.trim_end().to_string()
    }

    pub fn comparison(&self, view: &ComparisonView) -> String {
        let f = self.formatter.as_ref();
        let mut out = String::new();

        if view.schools.is_empty() {
            let message = if view.missing.is_empty() {
                "Your compare list is empty. Add schools with `gapmap compare add <ID>`.".to_string()
            } else {
                format!(
                    "None of the schools in your compare list were found in the dataset: {}",
                    view.missing.join(", ")
                )
            };
            let _ = write!(out, "{}", f.warning(&message));
            return out;
        }

        let _ = writeln!(
            out,
            "{}",
            f.header(&format!(
                "Comparing {} of {} schools at family income {}",
                view.schools.len(),
                MAX_COMPARE,
                view.bracket.label()
            ))
        );

        let mut table = self.table();
        let mut header = vec![Cell::new("")];
        header.extend(view.schools.iter().map(|s| Cell::new(&s.name)));
        table.set_header(header);

        type Metric = fn(&SchoolReport) -> String;
        let plain_rows: [(&str, Metric); 11] = [
            ("ID", |r| r.id.clone()),
            ("Location", |r| r.location.clone()),
            ("Type", |r| r.control.to_string()),
            ("Cost of attendance", |r| format_money(r.cost_of_attendance)),
            ("True cost / yr", |r| {
                format_signed_money(Some(r.cost.true_annual_cost()))
            }),
            ("4-year true cost", |r| {
                format_signed_money(Some(r.cost.four_year_true_cost()))
            }),
            ("Travel", |r| {
                format!(
                    "{} {}",
                    r.travel.mode.map(|m| m.label()).unwrap_or(NOT_AVAILABLE),
                    format_money(r.travel.annual_cost)
                )
            }),
            ("No-loan policy", |r| {
                let answer = if r.no_loan_policy { "Yes" } else { "No" };
                answer.to_string()
            }),
            ("4-year grad rate", |r| format_percent(r.outcomes.grad_rate_4yr)),
            ("Pell grad rate", |r| format_percent(r.outcomes.grad_rate_pell)),
            ("Median debt", |r| format_money(r.outcomes.median_debt)),
        ];

        let mut gap_row = vec![Cell::new("Gap / yr")];
        gap_row.extend(view.schools.iter().map(|r| {
            self.severity_cell(format_signed_money(r.cost.gap()), r.cost.color)
        }));
        table.add_row(gap_row);

        let mut severity_row = vec![Cell::new("Severity")];
        severity_row.extend(
            view.schools
                .iter()
                .map(|r| self.severity_cell(r.cost.severity_label.to_string(), r.cost.color)),
        );
        table.add_row(severity_row);

        for (label, metric) in plain_rows {
            let mut row = vec![Cell::new(label)];
            row.extend(view.schools.iter().map(|r| Cell::new(metric(r))));
            table.add_row(row);
        }

        let _ = write!(out, "{}", table);
        if !view.missing.is_empty() {
            let _ = write!(
                out,
                "\n{}",
                f.warning(&format!(
                    "Not found in the dataset: {}",
                    view.missing.join(", ")
                ))
            );
        }
        out
    }

    /// Name-search matches with their compare status
    pub fn name_matches(&self, query: &str, schools: &[School], saved: &[String]) -> String {
        if schools.is_empty() {
            return self
                .formatter
                .warning(&format!("No schools found matching \"{}\".", query));
        }
        let mut table = self.table();
        table.set_header(vec!["ID", "School", "Location", ""]);
        for school in schools {
            let status = if saved.contains(&school.id) {
                "Comparing"
            } else {
                ""
            };
            table.add_row(vec![
                Cell::new(&school.id),
                Cell::new(&school.name),
                Cell::new(school.location()),
                Cell::new(status),
            ]);
        }
        table.to_string()
    }
}
