//! Plain-text rendering of a period report

use chrono::Datelike;
use ledgerlens_config::{Config, Granularity};
use ledgerlens_core::{Metric, PeriodReport};
use ledgerlens_utils::{
    format_currency, format_percentage, format_share, month_abbrev, month_title, Locale, NumberStyle,
};
use rust_decimal::Decimal;
use std::fmt::{self, Write};

/// Presentation settings taken from the config
pub struct Renderer {
    style: NumberStyle,
    locale: Locale,
    top_categories: usize,
}

impl Renderer {
    pub fn from_config(config: &Config) -> Self {
        Self {
            style: config.currency.number_style(),
            locale: config.report.locale,
            top_categories: config.report.top_categories,
        }
    }

    fn labels(&self) -> Labels {
        match self.locale {
            Locale::PtBr => Labels {
                monthly: "Relatório Mensal",
                annual: "Relatório Anual",
                income: "Receitas",
                expense: "Despesas",
                balance: "Saldo",
                versus: "vs",
                categories: "Despesas por Categoria",
                evolution: "Evolução Mensal",
                empty: "Nenhuma despesa no período",
            },
            Locale::En => Labels {
                monthly: "Monthly Report",
                annual: "Annual Report",
                income: "Income",
                expense: "Expenses",
                balance: "Balance",
                versus: "vs",
                categories: "Expenses by Category",
                evolution: "Monthly Evolution",
                empty: "No expenses in this period",
            },
        }
    }

    /// Title of the viewed period: "janeiro de 2024" or "2024"
    pub fn period_title(&self, report: &PeriodReport) -> String {
        let start = report.current_period.start();
        match report.granularity {
            Granularity::Month => month_title(start.year(), start.month0(), self.locale),
            Granularity::Year => start.year().to_string(),
        }
    }

    fn previous_title(&self, report: &PeriodReport) -> String {
        let start = report.previous_period.start();
        match report.granularity {
            Granularity::Month => format!("{}/{}", month_abbrev(start.month0(), self.locale), start.year()),
            Granularity::Year => start.year().to_string(),
        }
    }

    fn change_line(&self, report: &PeriodReport, metric: Metric, label: &str) -> String {
        let cmp = report.comparison.get(metric);
        let marker = if metric.is_favorable(cmp.percent_change) { "▲" } else { "▼" };
        format!(
            "{:<10} {:>18}  {} {} {} {}",
            label,
            format_currency(cmp.current_value, &self.style),
            marker,
            format_percentage(cmp.percent_change),
            self.labels().versus,
            self.previous_title(report)
        )
    }

    fn balance_line(&self, report: &PeriodReport, label: &str) -> String {
        let cmp = report.comparison.get(Metric::Balance);
        let difference = cmp.difference();
        let sign = if difference > Decimal::ZERO { "+" } else { "" };
        format!(
            "{:<10} {:>18}  {}{} {} {} ({})",
            label,
            format_currency(cmp.current_value, &self.style),
            sign,
            format_currency(difference, &self.style),
            self.labels().versus,
            self.previous_title(report),
            format_currency(cmp.previous_value, &self.style)
        )
    }

    pub fn render(&self, report: &PeriodReport) -> Result<String, fmt::Error> {
        let labels = self.labels();
        let mut out = String::new();

        let heading = match report.granularity {
            Granularity::Month => labels.monthly,
            Granularity::Year => labels.annual,
        };
        writeln!(out, "{} - {}", heading, self.period_title(report))?;
        writeln!(out, "{}", report.current_period)?;
        writeln!(out)?;

        writeln!(out, "{}", self.change_line(report, Metric::Income, labels.income))?;
        writeln!(out, "{}", self.change_line(report, Metric::Expense, labels.expense))?;
        writeln!(out, "{}", self.balance_line(report, labels.balance))?;
        writeln!(out)?;

        writeln!(out, "{}", labels.categories)?;
        if report.expense_ranking.is_empty() {
            writeln!(out, "  {}", labels.empty)?;
        }
        for row in report.expense_ranking.iter().take(self.top_categories) {
            writeln!(
                out,
                "  {:<20} {:>18} {:>7}",
                row.category,
                format_currency(row.amount, &self.style),
                format_share(row.share)
            )?;
        }

        if let Some(monthly) = &report.monthly {
            writeln!(out)?;
            writeln!(out, "{}", labels.evolution)?;
            for point in monthly {
                writeln!(
                    out,
                    "  {:<4} {:>18} {:>18} {:>18}",
                    month_abbrev(point.month, self.locale),
                    format_currency(point.income, &self.style),
                    format_currency(point.expense, &self.style),
                    format_currency(point.balance, &self.style)
                )?;
            }
        }

        Ok(out)
    }
}

struct Labels {
    monthly: &'static str,
    annual: &'static str,
    income: &'static str,
    expense: &'static str,
    balance: &'static str,
    versus: &'static str,
    categories: &'static str,
    evolution: &'static str,
    empty: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use ledgerlens_core::{build_report, Transaction, TransactionKind};

    fn report(granularity: Granularity) -> PeriodReport {
        let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();
        let txs = vec![
            Transaction::new("1", TransactionKind::Income, "Salário", Decimal::new(100000, 2), d(2024, 1, 15)),
            Transaction::new("2", TransactionKind::Expense, "Aluguel", Decimal::new(30000, 2), d(2024, 1, 20)),
            Transaction::new("3", TransactionKind::Expense, "Mercado", Decimal::new(25000, 2), d(2023, 12, 20)),
        ];
        build_report(&txs, d(2024, 1, 10), granularity).unwrap()
    }

    #[test]
    fn test_render_month_pt_br() {
        let renderer = Renderer::from_config(&Config::default());
        let text = renderer.render(&report(Granularity::Month)).unwrap();
        assert!(text.starts_with("Relatório Mensal - janeiro de 2024"));
        assert!(text.contains("R$ 1.000,00"));
        assert!(text.contains("+20.0%"));
        // Balance 700 against -250 in December
        assert!(text.contains("+R$ 950,00 vs dez/2023 (-R$ 250,00)"));
        assert!(text.contains("Aluguel"));
        assert!(text.contains("100.0%"));
        assert!(!text.contains("Evolução Mensal"));
    }

    #[test]
    fn test_render_year_has_evolution() {
        let mut config = Config::default();
        config.report.locale = Locale::En;
        let renderer = Renderer::from_config(&config);
        let text = renderer.render(&report(Granularity::Year)).unwrap();
        assert!(text.starts_with("Annual Report - 2024"));
        assert!(text.contains("Monthly Evolution"));
        assert!(text.contains("Dec"));
    }
}
