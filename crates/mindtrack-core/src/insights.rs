//! Sample mood and performance datasets.
//!
//! These are fixed literals rendered by the dashboard views. Only the daily
//! averages are computed; every correlation value is a constant.

/// One day of the student dashboard.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DailyMood {
    pub day: &'static str,
    pub mood: f64,
    pub productivity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeeklyMood {
    pub week: &'static str,
    pub mood: f64,
    pub productivity: f64,
    pub study_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectScore {
    pub subject: &'static str,
    pub score: u32,
    pub mood: f64,
}

/// Scatter point of the mood/performance chart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoodPerformancePoint {
    pub subject: &'static str,
    pub mood: u8,
    pub performance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubjectCorrelation {
    pub subject: &'static str,
    pub correlation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassWeek {
    pub week: &'static str,
    pub average_mood: f64,
    pub attendance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassSubjectPerformance {
    pub subject: &'static str,
    pub avg_score: u32,
    pub previous_avg: u32,
}

impl ClassSubjectPerformance {
    /// Signed change as shown in the table, e.g. `+3%`.
    pub fn change_label(&self) -> String {
        let delta = i64::from(self.avg_score) - i64::from(self.previous_avg);
        format!("{delta:+}%")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskLevel {
    Medium,
    High,
}

impl RiskLevel {
    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtRiskStudent {
    pub name: &'static str,
    pub mood: f64,
    pub performance: &'static str,
    pub last_activity: &'static str,
    pub risk: RiskLevel,
}

/// A headline insight card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insight {
    pub title: &'static str,
    pub content: &'static str,
}

const fn daily(day: &'static str, mood: f64, productivity: f64) -> DailyMood {
    DailyMood {
        day,
        mood,
        productivity,
    }
}

pub const DAILY_MOOD: [DailyMood; 7] = [
    daily("Mon", 3.0, 65.0),
    daily("Tue", 4.0, 80.0),
    daily("Wed", 2.0, 45.0),
    daily("Thu", 5.0, 90.0),
    daily("Fri", 3.0, 70.0),
    daily("Sat", 4.0, 75.0),
    daily("Sun", 5.0, 85.0),
];

const fn weekly(week: &'static str, mood: f64, productivity: f64, study_hours: u32) -> WeeklyMood {
    WeeklyMood {
        week,
        mood,
        productivity,
        study_hours,
    }
}

pub const WEEKLY_MOOD: [WeeklyMood; 4] = [
    weekly("Week 1", 3.5, 72.0, 18),
    weekly("Week 2", 4.0, 78.0, 22),
    weekly("Week 3", 3.2, 65.0, 15),
    weekly("Week 4", 4.5, 85.0, 24),
];

const fn score(subject: &'static str, score: u32, mood: f64) -> SubjectScore {
    SubjectScore {
        subject,
        score,
        mood,
    }
}

pub const SUBJECT_SCORES: [SubjectScore; 5] = [
    score("Math", 85, 4.2),
    score("Science", 78, 3.8),
    score("English", 92, 4.5),
    score("History", 74, 3.2),
    score("Art", 88, 4.7),
];

/// Shown as the dashboard's mood/productivity correlation. Not computed.
pub const MOOD_PRODUCTIVITY_CORRELATION: f64 = 0.75;

const fn point(subject: &'static str, mood: u8, performance: u32) -> MoodPerformancePoint {
    MoodPerformancePoint {
        subject,
        mood,
        performance,
    }
}

pub const MOOD_PERFORMANCE: [MoodPerformancePoint; 20] = [
    point("Math", 1, 50),
    point("Math", 2, 60),
    point("Math", 3, 70),
    point("Math", 4, 85),
    point("Math", 5, 95),
    point("Science", 1, 55),
    point("Science", 2, 65),
    point("Science", 3, 75),
    point("Science", 4, 80),
    point("Science", 5, 90),
    point("English", 1, 60),
    point("English", 2, 70),
    point("English", 3, 80),
    point("English", 4, 85),
    point("English", 5, 95),
    point("History", 1, 45),
    point("History", 2, 55),
    point("History", 3, 65),
    point("History", 4, 75),
    point("History", 5, 85),
];

const fn correlation(subject: &'static str, correlation: f64) -> SubjectCorrelation {
    SubjectCorrelation {
        subject,
        correlation,
    }
}

pub const SUBJECT_CORRELATIONS: [SubjectCorrelation; 5] = [
    correlation("Math", 0.72),
    correlation("Science", 0.65),
    correlation("English", 0.58),
    correlation("History", 0.48),
    correlation("Art", 0.81),
];

const fn class_week(week: &'static str, average_mood: f64, attendance: u32) -> ClassWeek {
    ClassWeek {
        week,
        average_mood,
        attendance,
    }
}

pub const CLASS_WEEKS: [ClassWeek; 6] = [
    class_week("Week 1", 3.7, 92),
    class_week("Week 2", 3.5, 88),
    class_week("Week 3", 3.2, 84),
    class_week("Week 4", 3.9, 93),
    class_week("Week 5", 4.1, 95),
    class_week("Week 6", 3.8, 91),
];

const fn subject_performance(
    subject: &'static str,
    avg_score: u32,
    previous_avg: u32,
) -> ClassSubjectPerformance {
    ClassSubjectPerformance {
        subject,
        avg_score,
        previous_avg,
    }
}

pub const CLASS_PERFORMANCE: [ClassSubjectPerformance; 5] = [
    subject_performance("Math", 78, 75),
    subject_performance("Science", 82, 80),
    subject_performance("English", 85, 88),
    subject_performance("History", 79, 76),
    subject_performance("Art", 91, 92),
];

const fn at_risk(
    name: &'static str,
    mood: f64,
    performance: &'static str,
    last_activity: &'static str,
    risk: RiskLevel,
) -> AtRiskStudent {
    AtRiskStudent {
        name,
        mood,
        performance,
        last_activity,
        risk,
    }
}

pub const AT_RISK_STUDENTS: [AtRiskStudent; 5] = [
    at_risk("Alex Johnson", 2.1, "Declining", "2 days ago", RiskLevel::High),
    at_risk("Jamie Smith", 2.4, "Stable", "1 day ago", RiskLevel::Medium),
    at_risk("Taylor Wilson", 2.3, "Declining", "3 days ago", RiskLevel::High),
    at_risk("Jordan Richards", 2.8, "Improving", "Today", RiskLevel::Medium),
    at_risk("Casey Brown", 2.2, "Stable", "5 days ago", RiskLevel::High),
];

pub const MOOD_INSIGHTS: [Insight; 4] = [
    Insight {
        title: "Peak Productivity Times",
        content: "Your productivity is highest between 9-11 AM when your mood is typically rated 4 or higher.",
    },
    Insight {
        title: "Subject Correlations",
        content: "Math work correlates with higher moods, while History shows lower mood ratings. Consider varying your study approach.",
    },
    Insight {
        title: "Weekly Patterns",
        content: "Wednesdays show dips in mood and productivity. Plan lighter workloads or extra breaks mid-week.",
    },
    Insight {
        title: "Growth Trend",
        content: "Your overall mood has improved 15% this month compared to last month, with corresponding productivity gains.",
    },
];

pub const CORRELATION_INSIGHTS: [Insight; 3] = [
    Insight {
        title: "Strong Correlation Detected",
        content: "There is a strong positive correlation (r=0.87) between your mood ratings and academic performance, particularly in Math and English.",
    },
    Insight {
        title: "Performance Optimization",
        content: "Your optimal performance occurs when your mood rating is 4 or higher. Consider scheduling challenging tasks during these periods.",
    },
    Insight {
        title: "Subject-Specific Pattern",
        content: "History shows the weakest mood-performance correlation. This suggests other factors may have more influence on your performance in this subject.",
    },
];

/// Mean mood of [`DAILY_MOOD`].
pub fn average_daily_mood() -> f64 {
    DAILY_MOOD.iter().map(|d| d.mood).sum::<f64>() / DAILY_MOOD.len() as f64
}

/// Mean productivity of [`DAILY_MOOD`].
pub fn average_daily_productivity() -> f64 {
    DAILY_MOOD.iter().map(|d| d.productivity).sum::<f64>() / DAILY_MOOD.len() as f64
}

/// Scatter points for one subject, or all points when `subject` is `None`.
/// Matching is case-insensitive.
pub fn mood_performance_for(subject: Option<&str>) -> Vec<MoodPerformancePoint> {
    MOOD_PERFORMANCE
        .iter()
        .filter(|p| subject.is_none_or(|s| p.subject.eq_ignore_ascii_case(s)))
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daily_averages() {
        assert!((average_daily_mood() - 26.0 / 7.0).abs() < 1e-9);
        assert_eq!(format!("{:.1}", average_daily_mood()), "3.7");
        assert_eq!(format!("{:.0}", average_daily_productivity()), "73");
    }

    #[test]
    fn test_subject_filter() {
        assert_eq!(mood_performance_for(None).len(), 20);
        let math = mood_performance_for(Some("math"));
        assert_eq!(math.len(), 5);
        assert!(math.iter().all(|p| p.subject == "Math"));
        assert!(mood_performance_for(Some("Art")).is_empty());
    }

    #[test]
    fn test_change_label() {
        assert_eq!(CLASS_PERFORMANCE[0].change_label(), "+3%");
        assert_eq!(CLASS_PERFORMANCE[2].change_label(), "-3%");
    }
}
