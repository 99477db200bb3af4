//! Staffing requirements and run options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, ScheduleError};
use crate::schedule::calendar::{parse_month, MonthInfo};

pub const DEFAULT_SUN_TO_WED: u32 = 2;
pub const DEFAULT_THURS: u32 = 2;
pub const DEFAULT_FRI_TO_SAT: u32 = 3;

/// Requirements as supplied by the user. Headcounts may be omitted and fall
/// back to the form placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsConfig {
    #[serde(default)]
    pub on_call_sun_to_wed: Option<u32>,
    #[serde(default)]
    pub on_call_thurs: Option<u32>,
    #[serde(default)]
    pub on_call_fri_to_sat: Option<u32>,
    #[serde(default)]
    pub days_in_month: u32,
    #[serde(default)]
    pub first_day_of_month: u8,
}

impl RequirementsConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// Required on-call headcount per weekday class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headcounts {
    pub sun_to_wed: u32,
    pub thurs: u32,
    pub fri_to_sat: u32,
}

/// Fairness points earned per shift class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointValues {
    pub weekday: i64,
    pub weekend: i64,
}

impl PointValues {
    pub const FIXED: PointValues = PointValues {
        weekday: 1,
        weekend: 2,
    };
}

/// Validated, immutable requirements for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub headcounts: Headcounts,
    pub points: PointValues,
    pub month: MonthInfo,
}

impl Requirements {
    pub fn from_config(config: &RequirementsConfig) -> Result<Self> {
        if !(1..=31).contains(&config.days_in_month) {
            return Err(ScheduleError::InvalidConfig(format!(
                "daysInMonth must be between 1 and 31, got {}",
                config.days_in_month
            )));
        }
        if config.first_day_of_month > 6 {
            return Err(ScheduleError::InvalidConfig(format!(
                "firstDayOfMonth must be between 0 (Sunday) and 6 (Saturday), got {}",
                config.first_day_of_month
            )));
        }

        let headcounts = Headcounts {
            sun_to_wed: config.on_call_sun_to_wed.unwrap_or(DEFAULT_SUN_TO_WED),
            thurs: config.on_call_thurs.unwrap_or(DEFAULT_THURS),
            fri_to_sat: config.on_call_fri_to_sat.unwrap_or(DEFAULT_FRI_TO_SAT),
        };
        let month = MonthInfo::derive(config.days_in_month, config.first_day_of_month);
        debug!(
            weekends = month.num_weekends,
            thursdays = month.num_thursdays,
            weekdays = month.num_weekdays,
            "derived month shape"
        );

        Ok(Self {
            headcounts,
            points: PointValues::FIXED,
            month,
        })
    }

    /// Points needed to staff every required slot of the month.
    pub fn total_point_budget(&self) -> i64 {
        let month = &self.month;
        let counts = &self.headcounts;
        (month.num_weekdays_excl_thursday * i64::from(counts.sun_to_wed)
            + month.num_thursdays * i64::from(counts.thurs))
            * self.points.weekday
            + month.num_weekends * i64::from(counts.fri_to_sat) * self.points.weekend
    }

    /// Each person's fair share of the budget, floored.
    pub fn points_per_person(&self, person_count: usize) -> Result<i64> {
        if person_count == 0 {
            return Err(ScheduleError::EmptyRoster);
        }
        Ok(self.total_point_budget().div_euclid(person_count as i64))
    }
}

/// Everything the CLI needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub output: PathBuf,
    pub requirements: RequirementsConfig,
}

impl RunOptions {
    /// Parses `<availability.csv> [--days N --first-day F | --month YYYY-MM]
    /// [--config file.json] [--out schedule.csv]`. Flags override the config file.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let usage = |msg: &str| ScheduleError::InvalidConfig(msg.to_string());

        let mut input = None;
        let mut output = PathBuf::from("schedule.csv");
        let mut config_path = None;
        let mut days = None;
        let mut first_day = None;
        let mut month = None;

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            let mut value = |flag: &str| {
                iter.next()
                    .cloned()
                    .ok_or_else(|| usage(&format!("{flag} expects a value")))
            };
            match arg.as_str() {
                "--days" => days = Some(parse_number::<u32>("--days", &value("--days")?)?),
                "--first-day" => {
                    first_day = Some(parse_number::<u8>("--first-day", &value("--first-day")?)?)
                }
                "--month" => month = Some(parse_month(&value("--month")?)?),
                "--config" => config_path = Some(PathBuf::from(value("--config")?)),
                "--out" => output = PathBuf::from(value("--out")?),
                flag if flag.starts_with("--") => {
                    return Err(usage(&format!("unknown option {flag}")));
                }
                path => {
                    if input.is_some() {
                        return Err(usage(&format!("unexpected argument {path}")));
                    }
                    input = Some(PathBuf::from(path));
                }
            }
        }

        let input = input.ok_or_else(|| usage("missing availability CSV path"))?;
        let mut requirements = match config_path {
            Some(path) => RequirementsConfig::from_json_file(path)?,
            None => RequirementsConfig::default(),
        };
        if let Some((month_days, month_first_day)) = month {
            requirements.days_in_month = month_days;
            requirements.first_day_of_month = month_first_day;
        }
        if let Some(days) = days {
            requirements.days_in_month = days;
        }
        if let Some(first_day) = first_day {
            requirements.first_day_of_month = first_day;
        }

        Ok(Self {
            input,
            output,
            requirements,
        })
    }
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ScheduleError::InvalidConfig(format!("{flag} expects a number, got {value:?}")))
}
