//! Markdown tables and lists for each report section.

use crate::domain::context::PortfolioSummary;
use crate::domain::exposure::CategoryExposure;
use crate::domain::market_analysis::{NewsItem, PortfolioImpact, SectorInsight};
use crate::domain::rebalance::{RebalanceAction, RebalanceSnapshot};
use crate::domain::recommendation::Recommendation;
use crate::domain::report::GoalProgress;
use crate::domain::sentiment::MarketSentiment;

/// Rupee amount with Indian digit grouping: `₹12,34,567.89`.
pub fn fmt_inr(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let grouped = if whole.len() <= 3 {
        whole.to_string()
    } else {
        let (head, last3) = whole.split_at(whole.len() - 3);
        let mut pairs: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 2 {
            pairs.push(&head[end - 2..end]);
            end -= 2;
        }
        pairs.push(&head[..end]);
        pairs.reverse();
        format!("{},{}", pairs.join(","), last3)
    };

    format!("{sign}₹{grouped}.{fraction}")
}

fn fmt_signed_pct(value: f64) -> String {
    format!("{:+.2}%", value)
}

/// Escapes pipes so free text cannot break a table row.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub fn render_portfolio_summary(summary: &PortfolioSummary) -> String {
    let mut out = String::from("| Metric | Value |\n| --- | ---: |\n");
    out.push_str(&format!("| Invested | {} |\n", fmt_inr(summary.total_investment)));
    out.push_str(&format!("| Current Value | {} |\n", fmt_inr(summary.total_current_value)));
    out.push_str(&format!("| Gain / Loss | {} |\n", fmt_inr(summary.total_gain_loss)));
    out.push_str(&format!(
        "| Stocks | {:.1}% |\n",
        summary.asset_allocation.stocks_percentage
    ));
    out.push_str(&format!(
        "| Mutual Funds | {:.1}% |\n",
        summary.asset_allocation.mutual_funds_percentage
    ));
    out.push_str(&format!(
        "| Effective Equity | {:.1}% |\n",
        summary.effective_equity_pct()
    ));
    out
}

pub fn render_sentiment(sentiment: &MarketSentiment) -> String {
    let mut out = format!("**{:.0} / 100** ({})\n\n", sentiment.score, sentiment.label);
    for factor in &sentiment.factors {
        out.push_str(&format!("- {}\n", factor));
    }
    out
}

pub fn render_sector_table(sectors: &[SectorInsight]) -> String {
    if sectors.is_empty() {
        return "_No stock holdings to analyse._\n".to_string();
    }

    let mut out = String::from(
        "| Sector | Exposure | Move | Outlook | Call | Impact | Holdings |\n| --- | ---: | ---: | --- | --- | ---: | --- |\n",
    );
    for s in sectors {
        out.push_str(&format!(
            "| {} | {:.1}% | {} | {} | {} | {} | {} |\n",
            cell(&s.name),
            s.exposure,
            fmt_signed_pct(s.performance),
            s.outlook,
            cell(&s.recommendation),
            fmt_signed_pct(s.impact_on_portfolio),
            cell(&s.holdings.join(", ")),
        ));
    }
    out
}

pub fn render_portfolio_impact(impact: &PortfolioImpact) -> String {
    let mut out = format!(
        "Net estimated move: **{}** (gains {}, losses {})\n\n",
        fmt_inr(impact.net),
        fmt_inr(impact.total_positive),
        fmt_inr(impact.total_negative)
    );
    if impact.sectors.is_empty() {
        return out;
    }
    out.push_str("| Sector | Value | Move | Impact |\n| --- | ---: | ---: | ---: |\n");
    for s in &impact.sectors {
        out.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            cell(&s.sector),
            fmt_inr(s.value),
            fmt_signed_pct(s.performance),
            fmt_inr(s.impact)
        ));
    }
    out
}

pub fn render_category_table(categories: &[CategoryExposure]) -> String {
    if categories.is_empty() {
        return "_No mutual fund holdings._\n".to_string();
    }
    let mut out = String::from("| Category | Value | Share | Funds |\n| --- | ---: | ---: | --- |\n");
    for c in categories {
        out.push_str(&format!(
            "| {} | {} | {:.1}% | {} |\n",
            c.category,
            fmt_inr(c.value),
            c.percentage,
            cell(&c.holdings.join(", "))
        ));
    }
    out
}

pub fn render_news(news: &[NewsItem]) -> String {
    if news.is_empty() {
        return "_No news today._\n".to_string();
    }
    let mut out = String::new();
    for item in news {
        out.push_str(&format!("- **{}** ({}, {})", item.title, item.source, item.sentiment));
        if let Some(relevance) = &item.relevance {
            out.push_str(&format!(" · relevant to {}", relevance));
        }
        out.push_str(&format!("\n  {}\n", item.summary));
    }
    out
}

pub fn render_recommendations(recs: &[Recommendation]) -> String {
    if recs.is_empty() {
        return "_Nothing to act on right now._\n".to_string();
    }
    let mut out = String::new();
    for (i, r) in recs.iter().enumerate() {
        out.push_str(&format!(
            "{}. **{}** [{} priority, impact {:.0}]\n   {}\n",
            i + 1,
            r.title,
            r.priority,
            r.impact_score,
            r.description
        ));
        if let (Some(current), Some(target)) = (r.current_allocation, r.recommended_allocation) {
            out.push_str(&format!("   Allocation: {:.1}% → {:.1}%\n", current, target));
        }
        if let Some(amount) = r.suggested_amount {
            out.push_str(&format!("   Suggested amount: {}\n", fmt_inr(amount)));
        }
        for reason in &r.reasoning {
            out.push_str(&format!("   - {}\n", reason));
        }
    }
    out
}

pub fn render_rebalance_table(snapshot: &RebalanceSnapshot) -> String {
    let mut out = format!(
        "Target profile: **{}** (tolerance ±{:.1} points)\n\n",
        snapshot.risk_tolerance, snapshot.tolerance
    );
    out.push_str("| Bucket | Current | Target | Deviation | Action | Amount |\n| --- | ---: | ---: | ---: | --- | ---: |\n");
    for b in &snapshot.buckets {
        let amount = match b.action {
            RebalanceAction::Hold => "-".to_string(),
            _ => fmt_inr(b.amount),
        };
        out.push_str(&format!(
            "| {} | {:.1}% | {:.1}% | {:+.1} | {} | {} |\n",
            b.bucket, b.current_percentage, b.target_percentage, b.deviation, b.action, amount
        ));
    }
    out
}

pub fn render_goals(goals: &[GoalProgress]) -> String {
    if goals.is_empty() {
        return "_No goals set._\n".to_string();
    }
    let mut out = String::from(
        "| Goal | Target | Saved | Progress | Months Left | Needed / Month |\n| --- | ---: | ---: | ---: | ---: | ---: |\n",
    );
    for g in goals {
        out.push_str(&format!(
            "| {} | {} | {} | {:.1}% | {} | {} |\n",
            cell(&g.name),
            fmt_inr(g.target_amount),
            fmt_inr(g.current_amount),
            g.progress_pct,
            g.months_remaining.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
            g.required_monthly.map(fmt_inr).unwrap_or_else(|| "-".into()),
        ));
    }
    out
}
