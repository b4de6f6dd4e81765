use anyhow::{Result, bail};
use mindtrack_core::insights::{
    AT_RISK_STUDENTS, CLASS_PERFORMANCE, CLASS_WEEKS, CORRELATION_INSIGHTS, DAILY_MOOD, Insight,
    MOOD_INSIGHTS, MOOD_PRODUCTIVITY_CORRELATION, SUBJECT_CORRELATIONS, SUBJECT_SCORES,
    WEEKLY_MOOD, average_daily_mood, average_daily_productivity, mood_performance_for,
};

/// Time range of the student dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Range {
    Daily,
    Weekly,
}

pub fn student(range: Range) -> Result<()> {
    print!("{}", render_student(range));
    Ok(())
}

pub fn correlation(subject: Option<&str>) -> Result<()> {
    print!("{}", render_correlation(subject)?);
    Ok(())
}

pub fn class() -> Result<()> {
    print!("{}", render_class());
    Ok(())
}

fn render_student(range: Range) -> String {
    let mut out = String::new();
    out.push_str("📊 Mood & productivity\n");
    match range {
        Range::Daily => {
            for day in DAILY_MOOD {
                out.push_str(&format!(
                    "  {:<4} mood {:.1}  productivity {:>3.0}%\n",
                    day.day, day.mood, day.productivity
                ));
            }
            out.push_str(&format!(
                "  Average mood {:.1}, average productivity {:.0}%\n",
                average_daily_mood(),
                average_daily_productivity()
            ));
        }
        Range::Weekly => {
            for week in WEEKLY_MOOD {
                out.push_str(&format!(
                    "  {:<7} mood {:.1}  productivity {:>3.0}%  study {}h\n",
                    week.week, week.mood, week.productivity, week.study_hours
                ));
            }
        }
    }
    out.push_str(&format!(
        "  Mood/productivity correlation: {:.2}\n\n",
        MOOD_PRODUCTIVITY_CORRELATION
    ));

    out.push_str("📚 Subjects\n");
    for subject in SUBJECT_SCORES {
        out.push_str(&format!(
            "  {:<8} score {:>3}  mood {:.1}\n",
            subject.subject, subject.score, subject.mood
        ));
    }
    out.push('\n');
    push_insights(&mut out, &MOOD_INSIGHTS);
    out
}

fn render_correlation(subject: Option<&str>) -> Result<String> {
    let points = mood_performance_for(subject);
    if points.is_empty() {
        bail!(
            "No mood/performance data for subject '{}'",
            subject.unwrap_or_default()
        );
    }

    let mut out = String::new();
    out.push_str("🔗 Mood vs performance\n");
    for point in &points {
        out.push_str(&format!(
            "  {:<8} mood {}  performance {:>3}%\n",
            point.subject, point.mood, point.performance
        ));
    }
    out.push_str("\n  Correlation by subject\n");
    for entry in SUBJECT_CORRELATIONS
        .iter()
        .filter(|c| subject.is_none_or(|s| c.subject.eq_ignore_ascii_case(s)))
    {
        out.push_str(&format!("  {:<8} {:.2}\n", entry.subject, entry.correlation));
    }
    out.push('\n');
    push_insights(&mut out, &CORRELATION_INSIGHTS);
    Ok(out)
}

fn render_class() -> String {
    let mut out = String::new();
    out.push_str("🏫 Class mood & attendance\n");
    for week in CLASS_WEEKS {
        out.push_str(&format!(
            "  {:<7} mood {:.1}  attendance {}%\n",
            week.week, week.average_mood, week.attendance
        ));
    }
    out.push_str("\n  Subject performance\n");
    for subject in CLASS_PERFORMANCE {
        out.push_str(&format!(
            "  {:<8} avg {:>3}%  ({})\n",
            subject.subject,
            subject.avg_score,
            subject.change_label()
        ));
    }
    out.push_str("\n⚠️  Students needing attention\n");
    for student in AT_RISK_STUDENTS {
        out.push_str(&format!(
            "  {:<16} mood {:.1}  {:<9} last active {:<10}  risk {}\n",
            student.name,
            student.mood,
            student.performance,
            student.last_activity,
            student.risk.label()
        ));
    }
    out
}

fn push_insights(out: &mut String, insights: &[Insight]) {
    out.push_str("💡 Insights\n");
    for insight in insights {
        out.push_str(&format!("  {}\n    {}\n", insight.title, insight.content));
    }
}
