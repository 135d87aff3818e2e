use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::workout::WorkoutKind;

/// Label language for rendered summaries
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Locale {
    #[default]
    Ru,
    En,
}

/// Immutable snapshot of one session's derived metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    workout_type: String,
    duration_hours: f64,
    distance_km: f64,
    mean_speed_kmh: f64,
    calories_kcal: f64,
}

impl SessionSummary {
    pub fn new(
        kind: WorkoutKind,
        duration_hours: f64,
        distance_km: f64,
        mean_speed_kmh: f64,
        calories_kcal: f64,
    ) -> Self {
        Self {
            workout_type: kind.to_string(),
            duration_hours,
            distance_km,
            mean_speed_kmh,
            calories_kcal,
        }
    }

    pub fn workout_type(&self) -> &str {
        &self.workout_type
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration_hours
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn mean_speed_kmh(&self) -> f64 {
        self.mean_speed_kmh
    }

    pub fn calories_kcal(&self) -> f64 {
        self.calories_kcal
    }

    /// Render with the default (Russian) labels
    pub fn format(&self) -> String {
        self.format_with(Locale::Ru)
    }

    pub fn format_with(&self, locale: Locale) -> String {
        match locale {
            Locale::Ru => format!(
                "Тип тренировки: {}; Длительность: {:.3} ч.; Дистанция: {:.3} км; \
                 Ср. скорость: {:.3} км/ч; Потрачено ккал: {:.3}.",
                self.workout_type,
                self.duration_hours,
                self.distance_km,
                self.mean_speed_kmh,
                self.calories_kcal
            ),
            Locale::En => format!(
                "Workout type: {}; Duration: {:.3} h; Distance: {:.3} km; \
                 Avg speed: {:.3} km/h; Calories burned: {:.3}.",
                self.workout_type,
                self.duration_hours,
                self.distance_km,
                self.mean_speed_kmh,
                self.calories_kcal
            ),
        }
    }
}

impl fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(line: &'a str, label: &str) -> &'a str {
        let start = line.find(label).unwrap() + label.len();
        line[start..]
            .trim_start()
            .split([' ', ';'])
            .next()
            .unwrap()
    }

    #[test]
    fn russian_template_matches_exactly() {
        let summary = SessionSummary::new(WorkoutKind::Running, 1.0, 9.75, 9.75, 797.805);
        assert_eq!(
            summary.format(),
            "Тип тренировки: Running; Длительность: 1.000 ч.; Дистанция: 9.750 км; \
             Ср. скорость: 9.750 км/ч; Потрачено ккал: 797.805."
        );
    }

    #[test]
    fn display_matches_format() {
        let summary = SessionSummary::new(WorkoutKind::Swimming, 1.0, 0.9936, 1.0, 336.0);
        assert_eq!(summary.to_string(), summary.format());
    }

    #[test]
    fn english_template() {
        let summary = SessionSummary::new(WorkoutKind::Swimming, 1.5, 0.9936, 1.0, 336.0);
        assert_eq!(
            summary.format_with(Locale::En),
            "Workout type: Swimming; Duration: 1.500 h; Distance: 0.994 km; \
             Avg speed: 1.000 km/h; Calories burned: 336.000."
        );
    }

    #[test]
    fn duration_field_parses_back_rounded() {
        for duration in [0.25, 1.0, 1.23456, 2.0004, 0.0005] {
            let summary =
                SessionSummary::new(WorkoutKind::SportsWalking, duration, 1.0, 1.0, 1.0);
            let line = summary.format();
            let parsed: f64 = field(&line, "Длительность:").parse().unwrap();
            let rounded = (duration * 1000.0_f64).round() / 1000.0;
            assert!((parsed - rounded).abs() < 1e-9, "{line}");
        }
    }

    #[test]
    fn every_number_has_three_decimals() {
        let summary = SessionSummary::new(WorkoutKind::Running, 2.0, 13.0, 6.5, 1234.56789);
        let line = summary.format();
        for label in ["Длительность:", "Дистанция:", "скорость:", "ккал:"] {
            let value = field(&line, label).trim_end_matches('.');
            let decimals = value.split('.').nth(1).unwrap();
            assert_eq!(decimals.len(), 3, "{label} in {line}");
        }
    }

    #[test]
    fn serializes_to_json() {
        let summary = SessionSummary::new(WorkoutKind::Running, 1.0, 9.75, 9.75, 797.805);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["workout_type"], "Running");
        assert_eq!(json["distance_km"], 9.75);
    }

    #[test]
    fn locale_names() {
        assert_eq!(Locale::default(), Locale::Ru);
        assert_eq!(Locale::En.to_string(), "en");
    }
}
