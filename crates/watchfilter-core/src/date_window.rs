//! Relative date windows
//!
//! Date operators are relative to the current date. [`DateWindowResolver`]
//! turns day offsets into absolute inclusive bounds; an absent bound means
//! the window is open on that side.

use chrono::{Datelike, Days, NaiveDate, Weekday};

use crate::field::Operator;

/// Inclusive date bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
	pub from: Option<NaiveDate>,
	pub to: Option<NaiveDate>,
}

impl DateWindow {
	pub fn contains(&self, date: NaiveDate) -> bool {
		self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
	}
}

/// Resolves day offsets against a fixed current date
#[derive(Debug, Clone, Copy)]
pub struct DateWindowResolver {
	today: NaiveDate,
	first_day_of_week: Weekday,
}

impl DateWindowResolver {
	pub fn new(today: NaiveDate, first_day_of_week: Weekday) -> Self {
		Self {
			today,
			first_day_of_week,
		}
	}

	pub fn today(&self) -> NaiveDate {
		self.today
	}

	/// Window between two offsets in days from today, negative is past
	pub fn resolve(&self, low: Option<i64>, high: Option<i64>) -> DateWindow {
		DateWindow {
			from: low.map(|days| self.shift(days)),
			to: high.map(|days| self.shift(days)),
		}
	}

	/// Window of a date operator with `days` as its argument.
	///
	/// Returns `None` for operators that are not date operators.
	pub fn for_operator(&self, operator: Operator, days: i64) -> Option<DateWindow> {
		let past = days.saturating_neg();
		let window = match operator {
			Operator::Today => self.resolve(Some(0), Some(0)),
			Operator::DaysAgo => self.resolve(Some(past), Some(past)),
			Operator::DaysAhead => self.resolve(Some(days), Some(days)),
			Operator::InPastDays => self.resolve(Some(past), Some(0)),
			Operator::OlderThanDays => self.resolve(None, Some(past)),
			Operator::LaterThanDays => self.resolve(Some(days), None),
			Operator::InNextDays => self.resolve(Some(0), Some(days)),
			Operator::ThisWeek => {
				let start = -self.days_since_week_start();
				self.resolve(Some(start), Some(start + 6))
			}
			_ => return None,
		};
		Some(window)
	}

	/// Days between the first day of the current week and today
	fn days_since_week_start(&self) -> i64 {
		let today = i64::from(self.today.weekday().number_from_monday());
		let first = i64::from(self.first_day_of_week.number_from_monday());
		if today >= first {
			today - first
		} else {
			today + 7 - first
		}
	}

	/// Shift today by a signed number of days, clamped to the calendar range
	fn shift(&self, days: i64) -> NaiveDate {
		let magnitude = Days::new(days.unsigned_abs());
		let shifted = if days >= 0 {
			self.today.checked_add_days(magnitude)
		} else {
			self.today.checked_sub_days(magnitude)
		};
		shifted.unwrap_or(if days >= 0 {
			NaiveDate::MAX
		} else {
			NaiveDate::MIN
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate {
		NaiveDate::from_ymd_opt(y, m, d).unwrap()
	}

	// 2024-03-14 is a Thursday
	fn resolver(first_day_of_week: Weekday) -> DateWindowResolver {
		DateWindowResolver::new(date(2024, 3, 14), first_day_of_week)
	}

	#[rstest]
	#[case(Operator::Today, 0, Some(date(2024, 3, 14)), Some(date(2024, 3, 14)))]
	#[case(Operator::DaysAgo, 3, Some(date(2024, 3, 11)), Some(date(2024, 3, 11)))]
	#[case(Operator::DaysAhead, 3, Some(date(2024, 3, 17)), Some(date(2024, 3, 17)))]
	#[case(Operator::InPastDays, 7, Some(date(2024, 3, 7)), Some(date(2024, 3, 14)))]
	#[case(Operator::OlderThanDays, 7, None, Some(date(2024, 3, 7)))]
	#[case(Operator::LaterThanDays, 7, Some(date(2024, 3, 21)), None)]
	#[case(Operator::InNextDays, 7, Some(date(2024, 3, 14)), Some(date(2024, 3, 21)))]
	fn test_operator_windows(
		#[case] operator: Operator,
		#[case] days: i64,
		#[case] from: Option<NaiveDate>,
		#[case] to: Option<NaiveDate>,
	) {
		let window = resolver(Weekday::Mon).for_operator(operator, days).unwrap();
		assert_eq!(window, DateWindow { from, to });
	}

	#[rstest]
	#[case(Weekday::Mon, date(2024, 3, 11), date(2024, 3, 17))]
	#[case(Weekday::Sun, date(2024, 3, 10), date(2024, 3, 16))]
	#[case(Weekday::Fri, date(2024, 3, 8), date(2024, 3, 14))]
	#[case(Weekday::Thu, date(2024, 3, 14), date(2024, 3, 20))]
	fn test_this_week(
		#[case] first_day_of_week: Weekday,
		#[case] from: NaiveDate,
		#[case] to: NaiveDate,
	) {
		let window = resolver(first_day_of_week)
			.for_operator(Operator::ThisWeek, 0)
			.unwrap();
		assert_eq!(window.from, Some(from));
		assert_eq!(window.to, Some(to));
		assert!(window.contains(date(2024, 3, 14)));
	}

	#[rstest]
	fn test_non_date_operator() {
		assert!(resolver(Weekday::Mon).for_operator(Operator::Equals, 1).is_none());
	}

	#[rstest]
	fn test_huge_offsets_clamp() {
		let window = resolver(Weekday::Mon).resolve(Some(i64::MIN), Some(i64::MAX));
		assert_eq!(window.from, Some(NaiveDate::MIN));
		assert_eq!(window.to, Some(NaiveDate::MAX));
	}
}
